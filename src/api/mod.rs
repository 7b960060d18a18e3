//! Listing service client module for gRPC communication

mod client;
pub mod proto;
mod traits;

pub use client::{ListingClient, DEFAULT_ADDRESS};
pub use traits::ListingServiceTrait;

#[cfg(test)]
pub use traits::MockListingServiceTrait;
