//! Cold email generator screen

use axum::{
    Form, Router,
    extract::State,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;

use crate::auth::Session;
use crate::delegates::{AddOutcome, DelegateRecord, ResponseStatus};
use crate::error::AppError;
use crate::outreach::{GenerationRequest, Tone};
use crate::server::AppState;
use crate::views::outreach::{Generated, GeneratorView, generator_page};
use crate::views::Notice;

/// Contact placeholder for delegates added from a generated message
pub const CONTACT_PLACEHOLDER: &str = "Add contact info";

/// Days until the first follow-up of a newly added delegate
pub const FOLLOW_UP_DAYS: i64 = 3;

/// Personalization form as submitted. Empty strings mean "not provided".
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GenerateForm {
    pub name: String,
    pub committee: String,
    pub position: String,
    pub institution: String,
    pub experience_level: String,
    pub event_highlight: String,
    pub special_invite: String,
    /// `YYYY-MM-DD` from the date input
    pub deadline: String,
    pub tone: String,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl GenerateForm {
    pub fn to_request(&self) -> Result<GenerationRequest, AppError> {
        let tone = match self.tone.trim() {
            "" => Tone::default(),
            raw => raw.parse::<Tone>().map_err(AppError::Validation)?,
        };
        let deadline = match self.deadline.trim() {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map_err(|_| AppError::Validation(format!("Invalid registration deadline '{raw}'")))?,
            ),
        };

        Ok(GenerationRequest {
            committee: optional(&self.committee),
            position: optional(&self.position),
            institution: optional(&self.institution),
            experience_level: optional(&self.experience_level),
            event_highlight: optional(&self.event_highlight),
            special_invite: optional(&self.special_invite),
            deadline,
            ..GenerationRequest::new(self.name.trim()).with_tone(tone)
        })
    }
}

/// Submitted by "Add to Delegate List" below a generated message
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddGeneratedForm {
    pub name: String,
    pub message: String,
}

pub async fn generator(session: Session) -> Html<String> {
    let form = GenerateForm::default();
    generator_page(
        &session,
        &GeneratorView {
            form: &form,
            notice: None,
            generated: None,
        },
    )
}

pub async fn generate(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GenerateForm>,
) -> Response {
    let result = match form.to_request() {
        Ok(request) if request.name.is_empty() => Err(AppError::Validation(
            "Please enter a Delegate Name to generate an email.".to_string(),
        )),
        Ok(request) => state.generator.generate(&request).await.map_err(AppError::from),
        Err(e) => Err(e),
    };

    match result {
        Ok(message) => generator_page(
            &session,
            &GeneratorView {
                form: &form,
                notice: Some(Notice::Success("Email generated successfully!".to_string())),
                generated: Some(Generated {
                    delegate_name: form.name.trim(),
                    text: &message.text,
                    provider: Some(message.provider),
                }),
            },
        )
        .into_response(),
        Err(e) => {
            e.log();
            let notice = match &e {
                AppError::Validation(_) => Notice::Warning(e.user_message()),
                _ => Notice::Error(e.user_message()),
            };
            (
                e.status(),
                generator_page(
                    &session,
                    &GeneratorView {
                        form: &form,
                        notice: Some(notice),
                        generated: None,
                    },
                ),
            )
                .into_response()
        }
    }
}

/// Track the delegate of a generated message with default follow-up details
pub async fn add_generated(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddGeneratedForm>,
) -> Response {
    let name = form.name.trim();
    let notice = if name.is_empty() {
        Notice::Error("Delegate name not found to add to the list.".to_string())
    } else {
        let record = DelegateRecord {
            name: name.to_string(),
            contact_info: CONTACT_PLACEHOLDER.to_string(),
            response_status: ResponseStatus::NoResponse,
            follow_up_date: Some(Local::now().date_naive() + Duration::days(FOLLOW_UP_DAYS)),
        };
        match state.store.add(record) {
            Ok(AddOutcome::Added) => {
                Notice::Success(format!("✅ Delegate '{name}' added to tracking list!"))
            }
            Ok(AddOutcome::Duplicate) => {
                Notice::Warning(format!("Delegate '{name}' already exists in the list."))
            }
            Err(e) => {
                let err = AppError::from(e);
                err.log();
                Notice::Error(err.user_message())
            }
        }
    };

    let generate_form = GenerateForm {
        name: form.name.clone(),
        ..Default::default()
    };
    let generated = (!form.message.is_empty()).then(|| Generated {
        delegate_name: name,
        text: &form.message,
        provider: None,
    });
    generator_page(
        &session,
        &GeneratorView {
            form: &generate_form,
            notice: Some(notice),
            generated,
        },
    )
    .into_response()
}

pub fn create_outreach_routes() -> Router<AppState> {
    Router::new()
        .route("/generator", get(generator).post(generate))
        .route("/generator/add", post(add_generated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_to_request() {
        let form = GenerateForm {
            name: "  Priya Sharma ".to_string(),
            committee: "UNSC".to_string(),
            institution: " ".to_string(),
            deadline: "2025-06-03".to_string(),
            tone: "Formal".to_string(),
            ..Default::default()
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.name, "Priya Sharma");
        assert_eq!(request.committee.as_deref(), Some("UNSC"));
        assert_eq!(request.institution, None);
        assert_eq!(request.deadline, NaiveDate::from_ymd_opt(2025, 6, 3));
        assert_eq!(request.tone, Tone::Formal);
    }

    #[test]
    fn test_form_defaults_and_errors() {
        let request = GenerateForm {
            name: "Alex".to_string(),
            ..Default::default()
        }
        .to_request()
        .unwrap();
        assert_eq!(request.tone, Tone::SemiFormal);
        assert_eq!(request.deadline, None);

        let bad_date = GenerateForm {
            name: "Alex".to_string(),
            deadline: "next week".to_string(),
            ..Default::default()
        };
        assert!(matches!(bad_date.to_request(), Err(AppError::Validation(_))));
    }
}
