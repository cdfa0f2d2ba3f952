pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::models::{BookingPayload, BookingReceipt};

/// The external service that records a booking and issues its identifier.
#[async_trait]
pub trait BookingAcceptance: Send + Sync {
    async fn accept(&self, payload: &BookingPayload) -> anyhow::Result<BookingReceipt>;
}
