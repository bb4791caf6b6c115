use axum::response::Html;

use crate::auth::Session;
use crate::views::{APP_TITLE, Notice, escape, layout, render_notice};

pub fn login_page(notice: Option<&Notice>, username: &str) -> Html<String> {
    let body = format!(
        r#"<h1>{APP_TITLE}</h1>
<h2>Delegate Affairs System</h2>
{notice}
<form class="card" method="post" action="/login">
  <h3>Login</h3>
  <label for="username">Username</label>
  <input class="field" id="username" name="username" value="{username}" autocomplete="username">
  <label for="password">Password</label>
  <input class="field" id="password" name="password" type="password" autocomplete="current-password">
  <p>
    <input id="remember_me" name="remember_me" type="checkbox" value="on" checked>
    <label class="inline" for="remember_me" title="Stay logged in on this device">Remember me</label>
  </p>
  <button type="submit">Login</button>
</form>"#,
        notice = render_notice(notice),
        username = escape(username),
    );
    layout("Login", &body)
}

pub fn home_page(session: &Session) -> Html<String> {
    let body = format!(
        r#"<h1>{APP_TITLE} - Delegate Affairs System</h1>
<h4>Welcome, {username}!</h4>
<hr>
<div class="columns">
  <div class="card">
    <h3>📧 Cold Email Generator</h3>
    <p>Generate personalized outreach messages for potential delegates.</p>
    <a class="button" href="{generator}">Go to Email Generator</a>
  </div>
  <div class="card">
    <h3>👥 Delegate Management</h3>
    <p>Manage delegate contacts, responses, and follow-ups.</p>
    <a class="button" href="{delegates}">Go to Delegate Management</a>
  </div>
</div>
<hr>
<a class="button secondary" href="/logout">Logout</a>"#,
        username = escape(&session.username),
        generator = escape(&session.link("/generator")),
        delegates = escape(&session.link("/delegates")),
    );
    layout("Home", &body)
}
