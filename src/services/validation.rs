use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::models::service::is_time_slot;
use crate::models::{BookingForm, LoginForm, RegisterForm};

const MIN_NAME_CHARS: usize = 2;
const MIN_PHONE_CHARS: usize = 10;
const MIN_PASSWORD_CHARS: usize = 6;

/// Failing fields and their messages, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push((field, message.into()));
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|(f, _)| *f).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for FieldErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, message) in &self.0 {
            map.serialize_entry(field, message)?;
        }
        map.end()
    }
}

/// Inputs the booking checks depend on besides the form itself.
#[derive(Debug, Clone, Copy)]
pub struct BookingRules {
    pub today: NaiveDate,
    /// Reject styles the selected service does not offer.
    pub strict_styles: bool,
}

impl BookingRules {
    pub fn lenient(today: NaiveDate) -> Self {
        Self {
            today,
            strict_styles: false,
        }
    }
}

type BookingCheck = fn(&BookingForm, &BookingRules) -> Option<String>;

/// Booking field checks in form order. `message` is never checked.
const BOOKING_CHECKS: [(&str, BookingCheck); 7] = [
    ("name", |f, _| check_name(&f.name)),
    ("email", |f, _| check_email(&f.email)),
    ("phone", |f, _| check_phone(&f.phone)),
    ("service", |f, _| {
        f.service
            .is_none()
            .then(|| "Please select a service".to_string())
    }),
    ("style", |f, rules| {
        if f.style.is_empty() {
            Some("Please select a style".to_string())
        } else if rules.strict_styles {
            check_style_offered(f)
        } else {
            None
        }
    }),
    ("date", |f, rules| match f.date {
        None => Some("Please select a date".to_string()),
        Some(d) if d < rules.today => Some("Date cannot be in the past".to_string()),
        Some(_) => None,
    }),
    ("time", |f, _| {
        if f.time.is_empty() {
            Some("Please select a time".to_string())
        } else if !is_time_slot(&f.time) {
            Some("Please select a valid time slot".to_string())
        } else {
            None
        }
    }),
];

/// Runs every booking check independently and collects the failures.
///
/// Unless `rules.strict_styles` is set, the style is only required to be
/// non-empty; see [`check_style_offered`] for the cross-field check.
pub fn validate_booking(form: &BookingForm, rules: &BookingRules) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, check) in BOOKING_CHECKS {
        if let Some(message) = check(form, rules) {
            errors.insert(field, message);
        }
    }
    errors
}

/// Cross-field check: the chosen style must be one the selected service offers.
pub fn check_style_offered(form: &BookingForm) -> Option<String> {
    let service = form.service?;
    if form.style.is_empty() || service.offers_style(&form.style) {
        return None;
    }
    Some("Please select a style offered for this service".to_string())
}

pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(m) = check_email(&form.email) {
        errors.insert("email", m);
    }
    if let Some(m) = check_password(&form.password) {
        errors.insert("password", m);
    }
    errors
}

pub fn validate_registration(form: &RegisterForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(m) = check_name(&form.name) {
        errors.insert("name", m);
    }
    if let Some(m) = check_email(&form.email) {
        errors.insert("email", m);
    }
    if let Some(m) = check_phone(&form.phone) {
        errors.insert("phone", m);
    }
    if let Some(m) = check_password(&form.password) {
        errors.insert("password", m);
    }
    if form.password != form.confirm_password {
        errors.insert("confirm_password", "Passwords don't match");
    }
    errors
}

/// Lengths are counted in UTF-16 code units, the way the browser form does.
fn text_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn check_name(name: &str) -> Option<String> {
    (text_len(name) < MIN_NAME_CHARS)
        .then(|| format!("Name must be at least {MIN_NAME_CHARS} characters"))
}

fn check_phone(phone: &str) -> Option<String> {
    (text_len(phone) < MIN_PHONE_CHARS)
        .then(|| format!("Phone number must be at least {MIN_PHONE_CHARS} digits"))
}

fn check_password(password: &str) -> Option<String> {
    (text_len(password) < MIN_PASSWORD_CHARS)
        .then(|| format!("Password must be at least {MIN_PASSWORD_CHARS} characters"))
}

fn check_email(email: &str) -> Option<String> {
    if is_valid_email(email) {
        None
    } else {
        Some("Invalid email address".to_string())
    }
}

/// Syntax check only. The domain must carry a TLD.
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    if !email_address::EmailAddress::is_valid(trimmed) {
        return false;
    }
    match trimmed.rsplit_once('@') {
        Some((_, domain)) => domain.contains('.'),
        None => false,
    }
}
