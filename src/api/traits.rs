//! Trait abstraction for the listing service to enable mocking in tests

use crate::listing::{ListingId, SubmissionPayload};
use anyhow::Result;
use async_trait::async_trait;

/// Listing service operations the wizard depends on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingServiceTrait: Send + Sync {
    /// Check if the service is reachable
    async fn check_connection(&self) -> bool;

    /// Create a new listing, returning its id
    async fn add_listing(&mut self, payload: &SubmissionPayload) -> Result<ListingId>;

    /// Replace the contents of an existing listing
    async fn edit_listing(&mut self, id: ListingId, payload: &SubmissionPayload) -> Result<()>;

    /// Fetch a stored listing for editing
    async fn get_listing(&mut self, id: ListingId) -> Result<SubmissionPayload>;
}
