use axum::response::Html;

use crate::auth::Session;
use crate::delegates::store::filter;
use crate::delegates::{DelegateRecord, ResponseStatus};
use crate::routes::delegates::AddDelegateForm;
use crate::views::{Notice, escape, layout, options, render_notice};

pub struct DelegatesView<'a> {
    /// The full table; filtering happens here
    pub records: &'a [DelegateRecord],
    pub query: &'a str,
    pub add_form: &'a AddDelegateForm,
    pub notice: Option<Notice>,
}

fn status_options(selected: &str) -> String {
    options(ResponseStatus::ALL.map(ResponseStatus::label), selected)
}

fn editor_row(index: usize, record: Option<&DelegateRecord>) -> String {
    let original = record
        .map(|r| {
            format!(
                r#"<input type="hidden" name="row_{index}_original" value="{}">"#,
                escape(&r.name)
            )
        })
        .unwrap_or_default();
    let name = record.map(|r| escape(&r.name)).unwrap_or_default();
    let contact = record.map(|r| escape(&r.contact_info)).unwrap_or_default();
    let status = record
        .map(|r| r.response_status)
        .unwrap_or(ResponseStatus::NoResponse);
    let date = record
        .and_then(|r| r.follow_up_date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let delete = if record.is_some() {
        format!(r#"<input type="checkbox" name="row_{index}_delete" value="on" title="Delete row">"#)
    } else {
        "<small>new</small>".to_string()
    };

    format!(
        r#"<tr>
  <td>{original}<input name="row_{index}_name" value="{name}"></td>
  <td><input name="row_{index}_contact" value="{contact}"></td>
  <td><select name="row_{index}_status">{statuses}</select></td>
  <td><input type="date" name="row_{index}_date" value="{date}"></td>
  <td>{delete}</td>
</tr>"#,
        statuses = status_options(status.label()),
    )
}

pub fn delegates_page(session: &Session, view: &DelegatesView<'_>) -> Html<String> {
    let shown = filter(view.records, view.query);
    let add = view.add_form;

    let mut body = format!(
        r#"<h1>Delegate Management</h1>
<p><a class="button secondary" href="{home}">← Back to Home</a></p>
{notice}
<details class="card"{open}>
  <summary>➕ Add New Delegate</summary>
  <form method="post" action="{add_action}">
    <div class="columns">
      <div>
        <label for="add_name">Name *</label>
        <input class="field" id="add_name" name="name" value="{add_name}">
        <label for="add_contact">Contact Info (Email/Phone)</label>
        <input class="field" id="add_contact" name="contact_info" value="{add_contact}">
      </div>
      <div>
        <label for="add_status">Response Status</label>
        <select class="field" id="add_status" name="response_status">{add_statuses}</select>
        <label for="add_date">Follow-up Date</label>
        <input class="field" id="add_date" name="follow_up_date" type="date" value="{add_date}">
      </div>
    </div>
    <p><button type="submit">Add Delegate</button></p>
  </form>
</details>
<hr>
<h2>Current Delegates</h2>
<form method="get" action="/delegates">
  <input type="hidden" name="gds_auth" value="{token}">
  <label for="q">Search Delegates</label>
  <input class="field" id="q" name="q" placeholder="Search by name, contact, status..." value="{query}">
</form>
<p>Showing {shown_count} of {total} delegates.</p>"#,
        home = escape(&session.link("/")),
        notice = render_notice(view.notice.as_ref()),
        open = if add.name.is_empty() { "" } else { " open" },
        add_action = escape(&session.link("/delegates/add")),
        add_name = escape(&add.name),
        add_contact = escape(&add.contact_info),
        add_statuses = status_options(&add.response_status),
        add_date = escape(&add.follow_up_date),
        token = escape(&session.token),
        query = escape(view.query),
        shown_count = shown.len(),
        total = view.records.len(),
    );

    if shown.is_empty() {
        body.push_str(
            &Notice::Info(
                "No delegates found matching your search criteria, or the list is empty.".to_string(),
            )
            .render(),
        );
    }

    // The editor is always rendered so rows can be added to an empty list
    let rows: String = shown
        .iter()
        .enumerate()
        .map(|(index, record)| editor_row(index, Some(*record)))
        .chain(std::iter::once(editor_row(shown.len(), None)))
        .collect();
    body.push_str(&format!(
        r#"
<form method="post" action="{save_action}">
  <input type="hidden" name="q" value="{query}">
  <table>
    <thead><tr><th>Name</th><th>Contact Info</th><th>Response Status</th><th>Follow-up Date</th><th>Delete</th></tr></thead>
    <tbody>
{rows}
    </tbody>
  </table>
  <p><button type="submit">Save Changes to Delegate List</button></p>
</form>"#,
        save_action = escape(&session.link("/delegates/save")),
        query = escape(view.query),
    ));

    if !view.records.is_empty() {
        body.push_str(&format!(
            r#"
<hr>
<a class="button" href="{}" download="delegates_export.csv">📥 Export Delegates as CSV</a>"#,
            escape(&session.link("/delegates/export"))
        ));
    }

    layout("Delegate Management", &body)
}
