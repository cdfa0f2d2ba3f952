use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::service::Service;

/// The booking form as the customer fills it in. Every field starts empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: Option<Service>,
    pub style: String,
    pub date: Option<NaiveDate>,
    pub time: String,
    pub message: String,
}

impl BookingForm {
    pub fn is_empty(&self) -> bool {
        *self == BookingForm::default()
    }

    /// Style choices for the currently selected service.
    pub fn style_options(&self) -> &'static [&'static str] {
        self.service.map(|s| s.styles()).unwrap_or(&[])
    }

    /// Finalize the form for the acceptance service. Returns `None` until
    /// service and date are both set.
    pub fn to_payload(&self) -> Option<BookingPayload> {
        let service = self.service?;
        let date = self.date?;
        let message = self.message.trim();

        Some(BookingPayload {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            service,
            style: self.style.clone(),
            date: date.format("%Y-%m-%d").to_string(),
            time: self.time.clone(),
            message: if message.is_empty() {
                None
            } else {
                Some(self.message.clone())
            },
        })
    }
}

/// Field edits from the client. Absent fields are left untouched; `service`
/// and `date` sent as `null` are cleared.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub service: Option<Option<Service>>,
    pub style: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub date: Option<Option<NaiveDate>>,
    pub time: Option<String>,
    pub message: Option<String>,
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service: Service,
    pub style: String,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingReceipt {
    pub accepted: bool,
    pub booking_id: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        }
    }

    /// Banner text shown above the form, if any.
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            SubmissionStatus::Success => Some(SUCCESS_BANNER),
            SubmissionStatus::Error => Some(ERROR_BANNER),
            _ => None,
        }
    }
}

pub const SUCCESS_BANNER: &str = "Booking successful! We'll send you a confirmation soon.";
pub const ERROR_BANNER: &str = "Something went wrong. Please try again later.";

/// Broadcast whenever a session's submission status changes.
#[derive(Debug, Clone, Serialize)]
pub struct StatusEvent {
    pub session_id: Uuid,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}
