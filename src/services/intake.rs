use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::{BookingForm, FormPatch, Service, StatusEvent, SubmissionStatus};
use crate::services::acceptance::BookingAcceptance;
use crate::services::validation::{validate_booking, BookingRules, FieldErrors};

#[derive(Debug, Clone, Copy)]
pub struct IntakeSettings {
    /// How long a success stays visible before the status returns to idle.
    pub success_display: Duration,
    /// Also reject styles the selected service does not offer.
    pub strict_styles: bool,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            success_display: Duration::from_secs(5),
            strict_styles: false,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum WorkflowError {
    #[error("a booking submission is already in progress")]
    InFlight,

    #[error("the form cannot be edited while a booking is being submitted")]
    Locked,
}

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    Accepted { booking_id: String },
    Invalid(FieldErrors),
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub form: BookingForm,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<&'static str>,
    pub style_options: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_id: Option<String>,
}

struct Intake {
    form: BookingForm,
    status: SubmissionStatus,
    // Bumped on every submission so a stale success timer cannot reset a
    // newer status.
    generation: u64,
    booking_id: Option<String>,
}

/// One customer's booking form and its submission lifecycle.
///
/// Status moves `Idle -> Submitting -> Success | Error`. Success falls back
/// to `Idle` after the display window; Error stays until the next attempt.
/// At most one submission is in flight, and field edits are refused while it
/// is.
pub struct BookingWorkflow {
    session_id: Uuid,
    intake: Mutex<Intake>,
    acceptance: Arc<dyn BookingAcceptance>,
    events: broadcast::Sender<StatusEvent>,
    settings: IntakeSettings,
}

impl BookingWorkflow {
    pub fn new(
        session_id: Uuid,
        acceptance: Arc<dyn BookingAcceptance>,
        events: broadcast::Sender<StatusEvent>,
        settings: IntakeSettings,
    ) -> Self {
        Self {
            session_id,
            intake: Mutex::new(Intake {
                form: BookingForm::default(),
                status: SubmissionStatus::Idle,
                generation: 0,
                booking_id: None,
            }),
            acceptance,
            events,
            settings,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    fn lock(&self) -> MutexGuard<'_, Intake> {
        self.intake.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn status(&self) -> SubmissionStatus {
        self.lock().status
    }

    pub fn form(&self) -> BookingForm {
        self.lock().form.clone()
    }

    pub fn style_options(&self) -> &'static [&'static str] {
        self.lock().form.style_options()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let intake = self.lock();
        SessionSnapshot {
            session_id: self.session_id,
            form: intake.form.clone(),
            status: intake.status,
            banner: intake.status.banner(),
            style_options: intake.form.style_options(),
            booking_id: match intake.status {
                SubmissionStatus::Success => intake.booking_id.clone(),
                _ => None,
            },
        }
    }

    /// Selecting a service always clears the chosen style.
    pub fn update_service(&self, service: Service) -> Result<(), WorkflowError> {
        let mut intake = self.lock();
        if intake.status == SubmissionStatus::Submitting {
            return Err(WorkflowError::Locked);
        }
        intake.form.service = Some(service);
        intake.form.style.clear();
        Ok(())
    }

    /// Applies field edits. A new service is applied before the style, so a
    /// patch may switch service and pick a style in one go. An explicit null
    /// service or date clears it; clearing the service clears the style too.
    pub fn update_fields(&self, patch: FormPatch) -> Result<(), WorkflowError> {
        let mut intake = self.lock();
        if intake.status == SubmissionStatus::Submitting {
            return Err(WorkflowError::Locked);
        }

        let form = &mut intake.form;
        if let Some(service) = patch.service {
            form.service = service;
            form.style.clear();
        }
        if let Some(name) = patch.name {
            form.name = name;
        }
        if let Some(email) = patch.email {
            form.email = email;
        }
        if let Some(phone) = patch.phone {
            form.phone = phone;
        }
        if let Some(style) = patch.style {
            form.style = style;
        }
        if let Some(date) = patch.date {
            form.date = date;
        }
        if let Some(time) = patch.time {
            form.time = time;
        }
        if let Some(message) = patch.message {
            form.message = message;
        }
        Ok(())
    }

    pub fn validate(&self, today: NaiveDate) -> FieldErrors {
        let intake = self.lock();
        self.check(&intake.form, today)
    }

    fn check(&self, form: &BookingForm, today: NaiveDate) -> FieldErrors {
        let rules = BookingRules {
            today,
            strict_styles: self.settings.strict_styles,
        };
        validate_booking(form, &rules)
    }

    /// Validates the form and, if it passes, hands it to the acceptance
    /// service. An invalid form never reaches the service and leaves the
    /// status untouched.
    pub async fn submit(self: &Arc<Self>, today: NaiveDate) -> Result<SubmitOutcome, WorkflowError> {
        let (payload, generation) = {
            let mut intake = self.lock();
            if intake.status == SubmissionStatus::Submitting {
                return Err(WorkflowError::InFlight);
            }

            let errors = self.check(&intake.form, today);
            if !errors.is_empty() {
                return Ok(SubmitOutcome::Invalid(errors));
            }
            let Some(payload) = intake.form.to_payload() else {
                return Ok(SubmitOutcome::Invalid(errors));
            };

            intake.generation += 1;
            intake.booking_id = None;
            self.transition(&mut intake, SubmissionStatus::Submitting);
            (payload, intake.generation)
        };

        tracing::info!(
            session_id = %self.session_id,
            service = payload.service.as_str(),
            date = %payload.date,
            "submitting booking"
        );

        let result = self.acceptance.accept(&payload).await;

        let mut intake = self.lock();
        match result {
            Ok(receipt) if receipt.accepted => {
                intake.form = BookingForm::default();
                intake.booking_id = Some(receipt.booking_id.clone());
                self.transition(&mut intake, SubmissionStatus::Success);
                drop(intake);

                tracing::info!(
                    session_id = %self.session_id,
                    booking_id = %receipt.booking_id,
                    "booking accepted"
                );
                self.schedule_idle(generation);

                Ok(SubmitOutcome::Accepted {
                    booking_id: receipt.booking_id,
                })
            }
            Ok(receipt) => {
                self.transition(&mut intake, SubmissionStatus::Error);
                tracing::warn!(
                    session_id = %self.session_id,
                    booking_id = %receipt.booking_id,
                    "booking declined by acceptance service"
                );
                Ok(SubmitOutcome::Failed {
                    reason: "booking was not accepted".to_string(),
                })
            }
            Err(e) => {
                self.transition(&mut intake, SubmissionStatus::Error);
                tracing::error!(
                    session_id = %self.session_id,
                    error = %e,
                    "booking submission failed"
                );
                Ok(SubmitOutcome::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }

    fn transition(&self, intake: &mut Intake, status: SubmissionStatus) {
        intake.status = status;
        let booking_id = match status {
            SubmissionStatus::Success => intake.booking_id.clone(),
            _ => None,
        };
        // No subscribers is fine.
        let _ = self.events.send(StatusEvent {
            session_id: self.session_id,
            status,
            booking_id,
        });
    }

    fn schedule_idle(self: &Arc<Self>, generation: u64) {
        let workflow = Arc::downgrade(self);
        let delay = self.settings.success_display;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(workflow) = workflow.upgrade() {
                workflow.return_to_idle(generation);
            }
        });
    }

    fn return_to_idle(&self, generation: u64) {
        let mut intake = self.lock();
        if intake.status == SubmissionStatus::Success && intake.generation == generation {
            intake.booking_id = None;
            self.transition(&mut intake, SubmissionStatus::Idle);
        }
    }
}
