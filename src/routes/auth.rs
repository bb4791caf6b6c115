//! Login, logout and the home screen

use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};

use crate::auth::Session;
use crate::auth::models::{LoginForm, SessionQuery};
use crate::auth::session::with_token;
use crate::error::AppError;
use crate::server::AppState;
use crate::views::{self, Notice};

/// Show the login form, or skip it when the URL already carries a valid token
pub async fn login_page(
    State(state): State<AppState>,
    Query(query): Query<SessionQuery>,
) -> Response {
    if let Some(token) = query.token.filter(|t| !t.is_empty()) {
        if let Some(username) = state.tokens.verify(&token) {
            tracing::info!(%username, "Restored session from saved token");
            return Redirect::to(&with_token("/", &token)).into_response();
        }
    }
    views::auth::login_page(None, "").into_response()
}

pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if !state.credentials.authenticate(&form.username, &form.password) {
        let err = AppError::Auth;
        err.log();
        let notice = Notice::Error(err.user_message());
        return (err.status(), views::auth::login_page(Some(&notice), &form.username)).into_response();
    }

    let token = if form.remember() {
        state.tokens.issue(&form.username)
    } else {
        state.tokens.issue_for(&form.username, state.session_ttl)
    };
    tracing::info!(username = %form.username, remember = form.remember(), "Login successful");

    Redirect::to(&with_token("/", &token)).into_response()
}

/// Tokens are not revoked server-side; dropping the URL parameter ends the session
pub async fn logout() -> Redirect {
    tracing::info!("Operator logged out");
    Redirect::to("/login")
}

pub async fn home(session: Session) -> Html<String> {
    views::auth::home_page(&session)
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/", get(home))
}
