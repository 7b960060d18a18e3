//! gRPC client for the listing service
//!
//! Speaks `listings.v1.ListingService` over a tonic channel. The connection
//! is attempted once at startup and retried lazily on the next call.

use super::proto::{self, ADD_LISTING_PATH, EDIT_LISTING_PATH, GET_LISTING_PATH};
use super::traits::ListingServiceTrait;
use crate::listing::{ListingId, SubmissionPayload};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tonic::client::Grpc;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::{Channel, Endpoint};

/// Default listing service address
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:50061";

/// Client for communicating with the listing service
pub struct ListingClient {
    /// The gRPC client
    client: Option<Grpc<Channel>>,
    /// The service address
    address: String,
    connect_timeout: Duration,
}

impl ListingClient {
    /// Create a new client and try to connect. An unreachable service is not
    /// an error here; calls will retry the connection.
    pub async fn new(address: impl Into<String>, connect_timeout: Duration) -> Self {
        let address = address.into();
        let client = match Self::connect(&address, connect_timeout).await {
            Ok(channel) => Some(Grpc::new(channel)),
            Err(err) => {
                tracing::warn!(%address, "listing service unreachable: {err:#}");
                None
            }
        };

        Self {
            client,
            address,
            connect_timeout,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn connect(address: &str, timeout: Duration) -> Result<Channel> {
        let endpoint = Endpoint::from_shared(address.to_string())
            .with_context(|| format!("Invalid listing service address `{address}`"))?
            .connect_timeout(timeout);
        endpoint
            .connect()
            .await
            .map_err(|e| anyhow!("Failed to connect to listing service: {}", e))
    }

    /// Ensure connection is established
    async fn ensure_connected(&mut self) -> Result<&mut Grpc<Channel>> {
        if self.client.is_none() {
            let channel = Self::connect(&self.address, self.connect_timeout).await?;
            self.client = Some(Grpc::new(channel));
        }
        self.client
            .as_mut()
            .ok_or_else(|| anyhow!("Client not connected"))
    }

    async fn unary<Req, Resp>(&mut self, path: &'static str, request: Req) -> Result<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let client = self.ensure_connected().await?;
        client
            .ready()
            .await
            .map_err(|e| anyhow!("Listing service not ready: {}", e))?;

        let codec: ProstCodec<Req, Resp> = ProstCodec::default();
        let response = client
            .unary(
                tonic::Request::new(request),
                PathAndQuery::from_static(path),
                codec,
            )
            .await
            .map_err(|status| anyhow!("{} failed: {}", path, status.message()))?;

        Ok(response.into_inner())
    }
}

#[async_trait]
impl ListingServiceTrait for ListingClient {
    async fn check_connection(&self) -> bool {
        self.client.is_some()
    }

    async fn add_listing(&mut self, payload: &SubmissionPayload) -> Result<ListingId> {
        let request = proto::AddListingRequest {
            listing: Some(proto::Listing::from(payload)),
        };
        let response: proto::AddListingResponse = self
            .unary(ADD_LISTING_PATH, request)
            .await
            .context("Failed to add listing")?;

        if !response.success {
            return Err(anyhow!("Failed to add listing: {}", response.error));
        }
        response
            .listing_id
            .parse()
            .with_context(|| format!("Service returned invalid listing id `{}`", response.listing_id))
    }

    async fn edit_listing(&mut self, id: ListingId, payload: &SubmissionPayload) -> Result<()> {
        let request = proto::EditListingRequest {
            listing_id: id.to_string(),
            listing: Some(proto::Listing::from(payload)),
        };
        let response: proto::EditListingResponse = self
            .unary(EDIT_LISTING_PATH, request)
            .await
            .context("Failed to edit listing")?;

        if !response.success {
            return Err(anyhow!("Failed to edit listing: {}", response.error));
        }
        Ok(())
    }

    async fn get_listing(&mut self, id: ListingId) -> Result<SubmissionPayload> {
        let request = proto::GetListingRequest {
            listing_id: id.to_string(),
        };
        let response: proto::GetListingResponse = self
            .unary(GET_LISTING_PATH, request)
            .await
            .context("Failed to load listing")?;

        if !response.success {
            return Err(anyhow!("Failed to load listing {}: {}", id, response.error));
        }
        response
            .listing
            .map(SubmissionPayload::from)
            .ok_or_else(|| anyhow!("Listing {} has no content", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_service_is_not_fatal() {
        // port 9 (discard) is essentially never serving gRPC
        let client = ListingClient::new("http://127.0.0.1:9", Duration::from_millis(200)).await;
        assert!(!client.check_connection().await);
        assert_eq!(client.address(), "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_invalid_address_fails_on_call() {
        let mut client = ListingClient::new("not a uri", Duration::from_millis(50)).await;
        assert!(!client.check_connection().await);
        let err = client.get_listing(ListingId::new()).await.unwrap_err();
        assert!(format!("{err:#}").contains("Invalid listing service address"));
    }
}
