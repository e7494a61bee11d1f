//! `POST /api/contact`: validate a contact form and hand it to the inbox.
//!
//! Every outcome answers with a [`ContactResponse`] body. Malformed JSON and
//! rule violations are 400s; an inbox that cannot accept the submission is a
//! 500. Nothing here panics on bad input.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use site::contact::{self, ContactInput, ContactResponse, FieldErrors};
use tracing::{info, warn};

use crate::state::AppState;

/// Result of one contact request, mapped to a status and body in one place.
#[derive(Debug)]
pub enum ContactOutcome {
    Accepted,
    Malformed,
    Invalid(FieldErrors),
    Failed,
}

impl IntoResponse for ContactOutcome {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Accepted => (StatusCode::OK, ContactResponse::accepted()),
            Self::Malformed => (StatusCode::BAD_REQUEST, ContactResponse::malformed()),
            Self::Invalid(errors) => (StatusCode::BAD_REQUEST, ContactResponse::invalid(errors)),
            Self::Failed => (StatusCode::INTERNAL_SERVER_ERROR, ContactResponse::failed()),
        };
        (status, Json(body)).into_response()
    }
}

/// `POST /api/contact`: validate, wait out the processing delay, enqueue.
pub async fn submit(State(state): State<AppState>, body: Result<Json<ContactInput>, JsonRejection>) -> ContactOutcome {
    let input = match body {
        Ok(Json(input)) => input,
        Err(rejection) => {
            warn!(error = %rejection, "contact body rejected");
            return ContactOutcome::Malformed;
        }
    };

    let variant = input.variant();
    let submission = match contact::validate(&input) {
        Ok(submission) => submission,
        Err(errors) => {
            info!(?variant, field_count = errors.len(), "contact form failed validation");
            return ContactOutcome::Invalid(errors);
        }
    };

    if !state.contact_delay.is_zero() {
        tokio::time::sleep(state.contact_delay).await;
    }

    match state.inbox.submit(submission) {
        Ok(()) => ContactOutcome::Accepted,
        Err(err) => {
            warn!(error = %err, "contact submission not accepted");
            ContactOutcome::Failed
        }
    }
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;
