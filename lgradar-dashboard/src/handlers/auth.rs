//! Home redirect, sign-in, sign-up and sign-out
//!
//! Google sign-in uses the provider's PKCE flow: `/auth/google` stores a
//! verifier cookie and redirects to the authorize URL, `/auth/callback`
//! exchanges the returned code for the access cookie.

use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;
use validator::Validate;

use crate::app::AppState;
use crate::auth::oauth::{CALLBACK_PATH, PKCE_COOKIE};
use crate::auth::{DemoFlag, OAuthProvider, PasswordCredentials, PkceVerifier};
use crate::error::ProviderError;
use crate::forms::ValidationErrors;
use crate::views::public;

const MIN_PASSWORD_LEN: usize = 6;
const SIGNUP_CONFIRMATION: &str = "Check your email for the confirmation link!";

/// Submitted sign-in form
#[derive(Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Submitted sign-up form
#[derive(Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupForm {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    /// Password rules, checked after field validation passes
    fn password_problem(&self) -> Option<&'static str> {
        if self.password != self.confirm_password {
            Some("Passwords do not match")
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            Some("Password must be at least 6 characters")
        } else {
            None
        }
    }
}

/// Query the provider appends when redirecting back from Google
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OAuthCallback {
    pub code: Option<String>,
    pub error_description: Option<String>,
}

/// Never logs the submitted email
fn log_provider_failure(action: &'static str, error: &ProviderError) {
    tracing::warn!(action, error = %error, "Identity provider request failed");
}

fn login_error(state: &AppState, message: &str) -> Html<String> {
    let mut errors = ValidationErrors::new();
    errors.add_form_error(message);
    Html(public::login(&errors, "", state.config.auth.allow_demo))
}

/// `GET /`: signed-in and demo viewers go to the dashboard, others to login
pub async fn home(State(state): State<AppState>, jar: CookieJar, uri: Uri) -> Redirect {
    let resolution = state
        .resolver()
        .resolve(DemoFlag::from_uri(&uri), state.access_token(&jar))
        .await;

    let auth = &state.config.auth;
    match resolution.into_viewer() {
        Some(viewer) => Redirect::to(&viewer.link(&auth.after_login_path)),
        None => Redirect::to(&auth.login_path),
    }
}

pub async fn login_page(State(state): State<AppState>) -> Html<String> {
    Html(public::login(
        &ValidationErrors::new(),
        "",
        state.config.auth.allow_demo,
    ))
}

/// `POST /login`: sign in and store the access token cookie
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(mut form): Form<LoginForm>,
) -> Response {
    let allow_demo = state.config.auth.allow_demo;
    form.email = form.email.trim().to_string();
    let email = form.email.clone();

    if let Err(e) = form.validate() {
        return Html(public::login(&ValidationErrors::from(e), &email, allow_demo)).into_response();
    }

    let credentials = PasswordCredentials {
        email: email.clone(),
        password: form.password,
    };
    match state.provider.sign_in_with_password(&credentials).await {
        Ok(token) => {
            tracing::info!("User signed in");
            let cookie =
                state.auth_cookie(&state.config.identity.access_cookie, token.expose(), "/");
            (
                jar.add(cookie),
                Redirect::to(&state.config.auth.after_login_path),
            )
                .into_response()
        }
        Err(e) => {
            log_provider_failure("sign_in", &e);
            let mut errors = ValidationErrors::new();
            errors.add_form_error(e.user_message());
            Html(public::login(&errors, &email, allow_demo)).into_response()
        }
    }
}

pub async fn signup_page() -> Html<String> {
    Html(public::signup(&ValidationErrors::new(), "", None))
}

/// `POST /signup`: create an account pending email confirmation
pub async fn signup(
    State(state): State<AppState>,
    Form(mut form): Form<SignupForm>,
) -> Html<String> {
    form.email = form.email.trim().to_string();
    let email = form.email.clone();

    if let Err(e) = form.validate() {
        return Html(public::signup(&ValidationErrors::from(e), &email, None));
    }
    if let Some(problem) = form.password_problem() {
        let mut errors = ValidationErrors::new();
        errors.add_form_error(problem);
        return Html(public::signup(&errors, &email, None));
    }

    let credentials = PasswordCredentials {
        email: email.clone(),
        password: form.password,
    };
    let redirect_to = format!(
        "{}{}",
        state.config.server.origin(),
        state.config.auth.after_login_path
    );
    match state.provider.sign_up(&credentials, &redirect_to).await {
        Ok(()) => {
            tracing::info!("Sign-up submitted");
            Html(public::signup(
                &ValidationErrors::new(),
                "",
                Some(SIGNUP_CONFIRMATION),
            ))
        }
        Err(e) => {
            log_provider_failure("sign_up", &e);
            let mut errors = ValidationErrors::new();
            errors.add_form_error(e.user_message());
            Html(public::signup(&errors, &email, None))
        }
    }
}

/// `GET /auth/google`: remember a PKCE verifier and send the browser to Google
pub async fn google(State(state): State<AppState>, jar: CookieJar) -> Response {
    let verifier = PkceVerifier::generate();
    let redirect_to = format!("{}{CALLBACK_PATH}", state.config.server.origin());

    match state
        .provider
        .authorize_url(OAuthProvider::Google, &redirect_to, &verifier.challenge())
    {
        Ok(url) => {
            let cookie = state.auth_cookie(PKCE_COOKIE, verifier.as_str(), "/auth");
            (jar.add(cookie), Redirect::to(&url)).into_response()
        }
        Err(e) => {
            log_provider_failure("authorize", &e);
            login_error(&state, &e.user_message()).into_response()
        }
    }
}

/// `GET /auth/callback`: exchange the code for the access cookie
pub async fn oauth_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(callback): Query<OAuthCallback>,
) -> Response {
    let verifier = jar
        .get(PKCE_COOKIE)
        .and_then(|cookie| PkceVerifier::from_cookie(cookie.value()));
    let jar = jar.remove(Cookie::build((PKCE_COOKIE, "")).path("/auth"));

    if let Some(reason) = callback.error_description {
        tracing::warn!(reason = %reason, "Google sign-in was not completed");
        return (jar, login_error(&state, &reason)).into_response();
    }
    let (Some(code), Some(verifier)) = (callback.code.filter(|c| !c.is_empty()), verifier) else {
        tracing::warn!("Google sign-in callback without code or verifier");
        return (jar, login_error(&state, "Google sign-in expired, please try again")).into_response();
    };

    match state.provider.exchange_code(&code, verifier.as_str()).await {
        Ok(token) => {
            tracing::info!(provider = OAuthProvider::Google.as_str(), "User signed in");
            let cookie =
                state.auth_cookie(&state.config.identity.access_cookie, token.expose(), "/");
            (
                jar.add(cookie),
                Redirect::to(&state.config.auth.after_login_path),
            )
                .into_response()
        }
        Err(e) => {
            log_provider_failure("exchange_code", &e);
            (jar, login_error(&state, &e.user_message())).into_response()
        }
    }
}

/// `POST /logout`: revoke the token if possible and always clear the cookie
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(token) = state.access_token(&jar) {
        if let Err(e) = state.provider.sign_out(token).await {
            tracing::warn!(error = %e, "Sign-out failed, clearing cookie anyway");
        }
    }

    let jar = jar.remove(Cookie::build((state.config.identity.access_cookie.clone(), "")).path("/"));
    (jar, Redirect::to(&state.config.auth.login_path))
}
