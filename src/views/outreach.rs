use axum::response::Html;

use crate::auth::Session;
use crate::outreach::MessageGenerator;
use crate::outreach::prompt::{COMMITTEES, EVENT_HIGHLIGHT_MAX_CHARS, EXPERIENCE_LEVELS, POSITIONS, Tone};
use crate::routes::outreach::GenerateForm;
use crate::views::{Notice, escape, layout, options, render_notice};

/// Generated message carried between the preview and "add to list"
pub struct Generated<'a> {
    pub delegate_name: &'a str,
    pub text: &'a str,
    pub provider: Option<&'a str>,
}

pub struct GeneratorView<'a> {
    pub form: &'a GenerateForm,
    pub notice: Option<Notice>,
    pub generated: Option<Generated<'a>>,
}

const TIPS: &str = r#"<details class="card">
  <summary>💡 Tips for Effective Delegate Outreach</summary>
  <ul>
    <li><strong>Personalize:</strong> Add specific details about why they'd be a good fit.</li>
    <li><strong>Follow up:</strong> If no response, follow up gently after 3-4 days.</li>
    <li><strong>Be Concise:</strong> Keep your message brief and to the point.</li>
    <li><strong>Highlight Benefits:</strong> Focus on what they'll gain from participating.</li>
    <li><strong>Clear Call to Action:</strong> Make it obvious what you want them to do next (e.g., register, visit website).</li>
  </ul>
</details>"#;

fn copy_button(target: &str, label: &str) -> String {
    format!(
        r#"<button type="button" onclick="navigator.clipboard.writeText(document.getElementById('{target}').value)">{label}</button>"#
    )
}

pub fn generator_page(session: &Session, view: &GeneratorView<'_>) -> Html<String> {
    let template = escape(MessageGenerator::base_template());
    let form = view.form;
    let tone = if form.tone.is_empty() { Tone::default().label() } else { form.tone.as_str() };

    let mut body = format!(
        r#"<h1>Cold Email Generator</h1>
<p><a class="button secondary" href="{home}">← Back to Home</a></p>
<div class="highlight">
  <h3>Delegate Outreach Email Generator</h3>
  <p>Generate personalized invitation messages for the Global Diplomatic Summit-Lucknow MUN 2025.</p>
  <p><small>Use the basic template for quick outreach or generate a personalized message with specific delegate details.</small></p>
</div>
{notice}
<section>
  <h2>📋 Basic Template</h2>
  <p>Use this pre-written message as a starting point:</p>
  <div class="styled-text-box">{template}</div>
  <h3>Customize &amp; Copy</h3>
  <label for="template-edit">Edit the template if needed:</label>
  <textarea class="field" id="template-edit" rows="12">{template}</textarea>
  <p>{copy_template}</p>
</section>
<section>
  <h2>✨ Personalized Message</h2>
  <p>Enter delegate details to create a unique invitation:</p>
  <form class="card" method="post" action="{action}">
    <label for="name">Delegate Name *</label>
    <input class="field" id="name" name="name" placeholder="Enter delegate's full name" value="{name}">
    <p><strong>Basic Details (Optional)</strong></p>
    <div class="columns">
      <div>
        <label for="committee">Committee Preference</label>
        <select class="field" id="committee" name="committee">{committees}</select>
        <label for="position">Position</label>
        <select class="field" id="position" name="position">{positions}</select>
      </div>
      <div>
        <label for="institution">Institution/University</label>
        <input class="field" id="institution" name="institution" placeholder="e.g., Harvard University" value="{institution}">
        <label for="experience_level">Experience Level</label>
        <select class="field" id="experience_level" name="experience_level">{levels}</select>
      </div>
    </div>
    <details>
      <summary>Additional Customization Options</summary>
      <label for="event_highlight">Event Highlight</label>
      <textarea class="field" id="event_highlight" name="event_highlight" maxlength="{max_highlight}" placeholder="Mention specific conference highlights or special events (max {max_highlight} chars)">{event_highlight}</textarea>
      <label for="special_invite">Special Invitation Note</label>
      <input class="field" id="special_invite" name="special_invite" placeholder="e.g., Based on your exceptional performance at XYZ conference..." value="{special_invite}">
      <label for="deadline">Registration Deadline</label>
      <input class="field" id="deadline" name="deadline" type="date" value="{deadline}">
      <label for="tone">Message Tone</label>
      <select class="field" id="tone" name="tone">{tones}</select>
    </details>
    <p><button type="submit">Generate Personalized Email</button></p>
  </form>
</section>"#,
        home = escape(&session.link("/")),
        notice = render_notice(view.notice.as_ref()),
        copy_template = copy_button("template-edit", "Copy Template to Clipboard"),
        action = escape(&session.link("/generator")),
        name = escape(&form.name),
        committees = options(std::iter::once("").chain(COMMITTEES), &form.committee),
        positions = options(std::iter::once("").chain(POSITIONS), &form.position),
        institution = escape(&form.institution),
        levels = options(std::iter::once("").chain(EXPERIENCE_LEVELS), &form.experience_level),
        max_highlight = EVENT_HIGHLIGHT_MAX_CHARS,
        event_highlight = escape(&form.event_highlight),
        special_invite = escape(&form.special_invite),
        deadline = escape(&form.deadline),
        tones = options(Tone::ALL.map(Tone::label), tone),
    );

    if let Some(generated) = &view.generated {
        let provider = generated
            .provider
            .map(|p| format!("<p><small>Generated with {}</small></p>", escape(p)))
            .unwrap_or_default();
        body.push_str(&format!(
            r#"
<hr>
<section>
  <h3>Generated Email Preview</h3>
  <div class="styled-text-box">{text}</div>
  {provider}
  <h3>Edit &amp; Actions</h3>
  <label for="generated-edit">Edit the message if needed:</label>
  <textarea class="field" id="generated-edit" rows="12">{text}</textarea>
  <div class="columns">
    <p>{copy_generated}</p>
    <form method="post" action="{add_action}">
      <input type="hidden" name="name" value="{delegate}">
      <input type="hidden" name="message" value="{text}">
      <button type="submit" title="Add this delegate to your tracking list">Add to Delegate List</button>
    </form>
  </div>
</section>
{TIPS}"#,
            text = escape(generated.text),
            copy_generated = copy_button("generated-edit", "Copy Generated Message"),
            add_action = escape(&session.link("/generator/add")),
            delegate = escape(generated.delegate_name),
        ));
    }

    layout("Cold Email Generator", &body)
}
