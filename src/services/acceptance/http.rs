use anyhow::Context;
use async_trait::async_trait;

use super::BookingAcceptance;
use crate::models::{BookingPayload, BookingReceipt};

/// Forwards bookings to a remote acceptance endpoint as JSON.
pub struct HttpAcceptance {
    url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpAcceptance {
    pub fn new(url: String, token: String) -> Self {
        Self {
            url,
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BookingAcceptance for HttpAcceptance {
    async fn accept(&self, payload: &BookingPayload) -> anyhow::Result<BookingReceipt> {
        let mut req = self.client.post(&self.url).json(payload);
        if !self.token.is_empty() {
            req = req.bearer_auth(&self.token);
        }

        let receipt: BookingReceipt = req
            .send()
            .await
            .context("failed to call booking acceptance service")?
            .error_for_status()
            .context("booking acceptance service returned error")?
            .json()
            .await
            .context("failed to parse booking acceptance response")?;

        Ok(receipt)
    }
}
