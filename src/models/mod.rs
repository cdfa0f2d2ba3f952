pub mod account;
pub mod booking;
pub mod catalog;
pub mod service;

pub use account::{LoginForm, RegisterForm};
pub use booking::{
    BookingForm, BookingPayload, BookingReceipt, FormPatch, StatusEvent, SubmissionStatus,
    ERROR_BANNER, SUCCESS_BANNER,
};
pub use catalog::{ServiceInfo, StyleInfo};
pub use service::{Service, TIME_SLOTS};
