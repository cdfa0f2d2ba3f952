use std::collections::BTreeMap;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::Json;
use chrono::NaiveDate;
use serde::Serialize;
use tokio_stream::wrappers::{BroadcastStream, IntervalStream};
use tokio_stream::StreamExt;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    FormPatch, Service, StatusEvent, SubmissionStatus, SUCCESS_BANNER, TIME_SLOTS,
};
use crate::services::intake::{BookingWorkflow, SessionSnapshot, SubmitOutcome};
use crate::services::validation::FieldErrors;
use crate::state::AppState;

const KEEPALIVE_EVERY: Duration = Duration::from_secs(30);

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn find_session(state: &AppState, session_id: &Uuid) -> Result<Arc<BookingWorkflow>, AppError> {
    state
        .sessions
        .get(session_id)
        .ok_or_else(|| AppError::NotFound(format!("booking session {session_id}")))
}

// GET /api/booking/options
#[derive(Serialize)]
pub struct BookingOptions {
    services: Vec<Service>,
    styles: BTreeMap<&'static str, &'static [&'static str]>,
    time_slots: &'static [&'static str],
}

pub async fn options() -> Json<BookingOptions> {
    Json(BookingOptions {
        services: Service::ALL.to_vec(),
        styles: Service::ALL
            .into_iter()
            .map(|s| (s.as_str(), s.styles()))
            .collect(),
        time_slots: &TIME_SLOTS,
    })
}

// POST /api/booking/sessions
pub async fn open_session(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<SessionSnapshot>) {
    let workflow = state.sessions.open();
    (StatusCode::CREATED, Json(workflow.snapshot()))
}

// GET /api/booking/sessions/:id
pub async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let workflow = find_session(&state, &session_id)?;
    Ok(Json(workflow.snapshot()))
}

// DELETE /api/booking/sessions/:id
pub async fn close_session(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.close(&session_id) {
        return Err(AppError::NotFound(format!("booking session {session_id}")));
    }
    tracing::debug!(session_id = %session_id, "closed booking session");
    Ok(StatusCode::NO_CONTENT)
}

// PATCH /api/booking/sessions/:id/form
pub async fn update_form(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(patch): Json<FormPatch>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let workflow = find_session(&state, &session_id)?;
    workflow.update_fields(patch)?;
    Ok(Json(workflow.snapshot()))
}

// POST /api/booking/sessions/:id/validate
#[derive(Serialize)]
pub struct ValidationResponse {
    valid: bool,
    errors: FieldErrors,
}

pub async fn validate_form(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ValidationResponse>, AppError> {
    let workflow = find_session(&state, &session_id)?;
    let errors = workflow.validate(today());
    Ok(Json(ValidationResponse {
        valid: errors.is_empty(),
        errors,
    }))
}

// POST /api/booking/sessions/:id/submit
#[derive(Serialize)]
pub struct SubmitResponse {
    status: SubmissionStatus,
    booking_id: String,
    banner: &'static str,
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SubmitResponse>, AppError> {
    let workflow = find_session(&state, &session_id)?;

    match workflow.submit(today()).await? {
        SubmitOutcome::Accepted { booking_id } => Ok(Json(SubmitResponse {
            status: SubmissionStatus::Success,
            booking_id,
            banner: SUCCESS_BANNER,
        })),
        SubmitOutcome::Invalid(errors) => Err(AppError::Validation(errors)),
        SubmitOutcome::Failed { reason } => Err(AppError::Acceptance(reason)),
    }
}

fn status_event(event: &StatusEvent) -> Event {
    let data = serde_json::to_string(event).unwrap_or_default();
    Event::default().data(data).event("status")
}

// GET /api/booking/sessions/:id/events — SSE stream
pub async fn events_stream(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>>, AppError> {
    let workflow = find_session(&state, &session_id)?;

    // Subscribe before reading the current status so no transition is missed.
    let rx = state.sessions.subscribe();
    let snapshot = workflow.snapshot();
    let current = StatusEvent {
        session_id,
        status: snapshot.status,
        booking_id: snapshot.booking_id,
    };

    let current_stream = tokio_stream::once(Ok::<_, Infallible>(status_event(&current)));

    let live_stream = BroadcastStream::new(rx).filter_map(move |result| match result {
        Ok(event) if event.session_id == session_id => Some(Ok(status_event(&event))),
        Ok(_) => None,
        Err(tokio_stream::wrappers::errors::BroadcastStreamRecvError::Lagged(_)) => None,
    });

    let keepalive_start = tokio::time::Instant::now() + KEEPALIVE_EVERY;
    let keepalive_stream = tokio_stream::StreamExt::map(
        IntervalStream::new(tokio::time::interval_at(keepalive_start, KEEPALIVE_EVERY)),
        |_| Ok(Event::default().comment("keepalive")),
    );

    let combined = current_stream.chain(live_stream);
    let merged = StreamExt::merge(combined, keepalive_stream);

    Ok(Sse::new(merged))
}
