//! Delegate management screen: add, search, inline edit, export

use std::collections::BTreeMap;

use axum::{
    Form, Router,
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Duration, Local, NaiveDate};
use serde::Deserialize;

use crate::auth::Session;
use crate::delegates::models::parse_follow_up;
use crate::delegates::store::EditSummary;
use crate::delegates::{AddOutcome, DelegateRecord, EditedRow, ResponseStatus};
use crate::error::AppError;
use crate::routes::outreach::FOLLOW_UP_DAYS;
use crate::server::AppState;
use crate::views::Notice;
use crate::views::delegates::{DelegatesView, delegates_page};

const EXPORT_FILE_NAME: &str = "delegates_export.csv";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
}

/// "Add New Delegate" form as submitted
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AddDelegateForm {
    pub name: String,
    pub contact_info: String,
    pub response_status: String,
    /// `YYYY-MM-DD` from the date input
    pub follow_up_date: String,
}

impl AddDelegateForm {
    /// Empty form with the default follow-up date filled in
    pub fn blank() -> Self {
        Self {
            response_status: ResponseStatus::Interested.label().to_string(),
            follow_up_date: default_follow_up().format("%Y-%m-%d").to_string(),
            ..Default::default()
        }
    }

    fn to_record(&self) -> Result<DelegateRecord, AppError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Delegate Name is required.".to_string()));
        }
        Ok(DelegateRecord {
            name: name.to_string(),
            contact_info: self.contact_info.trim().to_string(),
            response_status: parse_status(&self.response_status)?,
            follow_up_date: parse_date(&self.follow_up_date)?,
        })
    }
}

fn default_follow_up() -> NaiveDate {
    Local::now().date_naive() + Duration::days(FOLLOW_UP_DAYS)
}

fn parse_status(raw: &str) -> Result<ResponseStatus, AppError> {
    raw.parse().map_err(AppError::Validation)
}

fn parse_date(raw: &str) -> Result<Option<NaiveDate>, AppError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_follow_up(raw)
        .map(Some)
        .ok_or_else(|| AppError::Validation(format!("Invalid follow-up date '{raw}'")))
}

/// Cells of one submitted editor row
#[derive(Debug, Default)]
struct RowFields {
    original: Option<String>,
    name: String,
    contact: String,
    status: String,
    date: String,
    delete: bool,
}

/// Submitted editor table: the names it showed, the surviving rows and the
/// active search query
#[derive(Debug, Default)]
pub struct TableEdit {
    pub view_names: Vec<String>,
    pub rows: Vec<EditedRow>,
    pub query: String,
}

/// Decode `row_{index}_{field}` pairs posted by the editor table.
pub fn parse_table_edit(fields: Vec<(String, String)>) -> Result<TableEdit, AppError> {
    let mut edit = TableEdit::default();
    let mut rows: BTreeMap<usize, RowFields> = BTreeMap::new();

    for (key, value) in fields {
        if key == "q" {
            edit.query = value;
            continue;
        }
        let Some((index, field)) = key
            .strip_prefix("row_")
            .and_then(|rest| rest.split_once('_'))
            .and_then(|(index, field)| index.parse::<usize>().ok().map(|i| (i, field)))
        else {
            continue;
        };
        let row = rows.entry(index).or_default();
        match field {
            "original" => row.original = Some(value),
            "name" => row.name = value,
            "contact" => row.contact = value,
            "status" => row.status = value,
            "date" => row.date = value,
            "delete" => row.delete = true,
            _ => {}
        }
    }

    for row in rows.into_values() {
        if let Some(original) = &row.original {
            edit.view_names.push(original.clone());
        }
        if row.delete || (row.original.is_none() && row.name.trim().is_empty()) {
            continue;
        }
        let name = row.name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Delegate Name is required.".to_string()));
        }
        edit.rows.push(EditedRow {
            original: row.original,
            record: DelegateRecord {
                name: name.to_string(),
                contact_info: row.contact.trim().to_string(),
                response_status: parse_status(&row.status)?,
                follow_up_date: parse_date(&row.date)?,
            },
        });
    }
    Ok(edit)
}

fn render(
    state: &AppState,
    session: &Session,
    query: &str,
    add_form: &AddDelegateForm,
    notice: Option<Notice>,
) -> Response {
    let (records, notice) = match state.store.try_load() {
        Ok(records) => (records, notice),
        Err(e) => {
            let err = AppError::from(e);
            err.log();
            (Vec::new(), Some(Notice::Error(err.user_message())))
        }
    };
    delegates_page(
        session,
        &DelegatesView {
            records: &records,
            query,
            add_form,
            notice,
        },
    )
    .into_response()
}

pub async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(search): Query<SearchQuery>,
) -> Response {
    render(&state, &session, &search.q, &AddDelegateForm::blank(), None)
}

pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddDelegateForm>,
) -> Response {
    let result = form
        .to_record()
        .and_then(|record| state.store.add(record).map_err(AppError::from));

    match result {
        Ok(AddOutcome::Added) => {
            tracing::info!(name = %form.name.trim(), "Delegate added from management form");
            let notice = Notice::Success(format!("Added delegate: {}", form.name.trim()));
            render(&state, &session, "", &AddDelegateForm::blank(), Some(notice))
        }
        Ok(AddOutcome::Duplicate) => {
            let notice = Notice::Warning(format!("Delegate '{}' already exists.", form.name.trim()));
            render(&state, &session, "", &form, Some(notice))
        }
        Err(e) => {
            e.log();
            let notice = match &e {
                AppError::Validation(_) => Notice::Warning(e.user_message()),
                _ => Notice::Error(e.user_message()),
            };
            render(&state, &session, "", &form, Some(notice))
        }
    }
}

pub async fn save(
    State(state): State<AppState>,
    session: Session,
    Form(fields): Form<Vec<(String, String)>>,
) -> Response {
    let mut query = String::new();
    let result = parse_table_edit(fields).and_then(|edit| {
        query = edit.query;
        state
            .store
            .apply_edits(&edit.view_names, edit.rows)
            .map_err(AppError::from)
    });

    let notice = match result {
        Ok(EditSummary { updated, added, deleted }) => Notice::Success(format!(
            "Delegate list updated successfully! ({updated} updated, {added} added, {deleted} deleted)"
        )),
        Err(e) => {
            e.log();
            Notice::Error(format!("Error saving changes: {}", e.user_message()))
        }
    };
    render(&state, &session, &query, &AddDelegateForm::blank(), Some(notice))
}

/// Download the full, unfiltered table
pub async fn export(State(state): State<AppState>, _session: Session) -> Result<Response, AppError> {
    let bytes = state.store.export()?;
    tracing::info!(bytes = bytes.len(), "Exporting delegate list");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

pub fn create_delegate_routes() -> Router<AppState> {
    Router::new()
        .route("/delegates", get(list))
        .route("/delegates/add", post(add))
        .route("/delegates/save", post(save))
        .route("/delegates/export", get(export))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_parse_table_edit() {
        let edit = parse_table_edit(pairs(&[
            ("q", "june"),
            ("row_0_original", "Priya Sharma"),
            ("row_0_name", "Priya Sharma"),
            ("row_0_contact", "priya@du.ac.in"),
            ("row_0_status", "Registered"),
            ("row_0_date", "2025-06-03"),
            ("row_1_original", "Alex"),
            ("row_1_name", "Alex"),
            ("row_1_contact", ""),
            ("row_1_status", "No Response"),
            ("row_1_date", ""),
            ("row_1_delete", "on"),
            ("row_2_name", ""),
            ("row_2_contact", ""),
            ("row_2_status", "No Response"),
            ("row_2_date", ""),
        ]))
        .unwrap();

        assert_eq!(edit.query, "june");
        assert_eq!(edit.view_names, vec!["Priya Sharma", "Alex"]);
        assert_eq!(edit.rows.len(), 1);
        assert_eq!(edit.rows[0].original.as_deref(), Some("Priya Sharma"));
        assert_eq!(edit.rows[0].record.response_status, ResponseStatus::Registered);
        assert_eq!(edit.rows[0].record.follow_up_date, NaiveDate::from_ymd_opt(2025, 6, 3));
    }

    #[test]
    fn test_parse_table_edit_new_row_and_errors() {
        let edit = parse_table_edit(pairs(&[
            ("row_0_name", "Neha Gupta"),
            ("row_0_status", "Interested"),
            ("row_0_date", "2025-07-01"),
        ]))
        .unwrap();
        assert!(edit.view_names.is_empty());
        assert_eq!(edit.rows[0].original, None);
        assert_eq!(edit.rows[0].record.name, "Neha Gupta");

        let cleared_name = parse_table_edit(pairs(&[
            ("row_0_original", "Alex"),
            ("row_0_name", " "),
            ("row_0_status", "Interested"),
        ]));
        assert!(matches!(cleared_name, Err(AppError::Validation(_))));

        let bad_status = parse_table_edit(pairs(&[
            ("row_0_name", "Alex"),
            ("row_0_status", "Maybe"),
        ]));
        assert!(matches!(bad_status, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_add_form_validation() {
        let blank = AddDelegateForm::blank();
        assert!(matches!(blank.to_record(), Err(AppError::Validation(_))));

        let form = AddDelegateForm {
            name: "Alex".to_string(),
            ..AddDelegateForm::blank()
        };
        let record = form.to_record().unwrap();
        assert_eq!(record.response_status, ResponseStatus::Interested);
        assert_eq!(record.follow_up_date, Some(default_follow_up()));
    }
}
