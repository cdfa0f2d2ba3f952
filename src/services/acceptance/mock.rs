use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::BookingAcceptance;
use crate::models::{BookingPayload, BookingReceipt};

const ID_CHARS: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Accepts every booking after a fixed delay. Stands in until a real
/// acceptance service is configured.
pub struct MockAcceptance {
    latency: Duration,
}

impl MockAcceptance {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl BookingAcceptance for MockAcceptance {
    async fn accept(&self, payload: &BookingPayload) -> anyhow::Result<BookingReceipt> {
        tokio::time::sleep(self.latency).await;

        let booking_id = generate_booking_id();
        tracing::debug!(
            booking_id = %booking_id,
            service = payload.service.as_str(),
            date = %payload.date,
            "mock acceptance issued booking"
        );

        Ok(BookingReceipt {
            accepted: true,
            booking_id,
        })
    }
}

/// `BOOK` followed by nine random base-36 characters.
pub fn generate_booking_id() -> String {
    let mut n = Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(4 + ID_CHARS);
    id.push_str("BOOK");
    for _ in 0..ID_CHARS {
        id.push(BASE36[(n % 36) as usize] as char);
        n /= 36;
    }
    id
}
