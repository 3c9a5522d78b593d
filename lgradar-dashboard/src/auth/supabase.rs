//! Supabase (GoTrue) identity provider over HTTPS

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};

use super::oauth::OAuthProvider;
use super::provider::IdentityProvider;
use super::session::{AccessToken, PasswordCredentials, Session};
use crate::error::{DashboardError, ProviderError};

const MAX_ERROR_BODY: usize = 512;

/// GoTrue REST client
///
/// Holds only immutable connection settings; `reqwest::Client` is a cheap
/// handle over its own connection pool.
#[derive(Debug, Clone)]
pub struct SupabaseProvider {
    client: Client,
    base_url: String,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
    user_metadata: Option<UserMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    avatar_url: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenPayload {
    access_token: String,
}

#[derive(Serialize)]
struct PkceExchange<'a> {
    auth_code: &'a str,
    code_verifier: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
}

impl From<UserPayload> for Session {
    fn from(user: UserPayload) -> Self {
        let metadata = user.user_metadata.unwrap_or_default();
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            id: user.id,
            email: non_empty(user.email),
            role: non_empty(metadata.role),
            avatar_url: non_empty(metadata.avatar_url),
        }
    }
}

impl SupabaseProvider {
    /// Create a client for the project at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if the TLS backend cannot be initialised.
    pub fn new(
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DashboardError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    async fn rejection(response: Response) -> ProviderError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let payload: ErrorPayload = serde_json::from_str(&body).unwrap_or_default();
        let message = payload
            .error_description
            .or(payload.msg)
            .or(payload.message);

        match (status, message) {
            (StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::UNPROCESSABLE_ENTITY, Some(message)) => {
                ProviderError::Rejected(message)
            }
            _ => ProviderError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            },
        }
    }

    /// `POST /token?grant_type=...`, returning the issued access token
    async fn token_request<B: Serialize + Sync>(
        &self,
        grant_type: &str,
        body: &B,
    ) -> Result<AccessToken, ProviderError> {
        let response = self
            .client
            .post(self.endpoint("token"))
            .query(&[("grant_type", grant_type)])
            .header("apikey", &self.anon_key)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::rejection(response).await);
        }

        let payload: TokenPayload = response.json().await?;
        AccessToken::new(payload.access_token).ok_or_else(|| ProviderError::UnexpectedStatus {
            status: StatusCode::OK.as_u16(),
            body: "empty access token".to_string(),
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseProvider {
    async fn current_user(
        &self,
        token: Option<AccessToken>,
    ) -> Result<Option<Session>, ProviderError> {
        let Some(token) = token else {
            return Ok(None);
        };

        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token.expose())
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let user: UserPayload = response.json().await?;
                Ok(Some(user.into()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            _ => Err(Self::rejection(response).await),
        }
    }

    async fn sign_in_with_password(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<AccessToken, ProviderError> {
        self.token_request("password", credentials).await
    }

    async fn sign_up(
        &self,
        credentials: &PasswordCredentials,
        redirect_to: &str,
    ) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(self.endpoint("signup"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.anon_key)
            .json(credentials)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::rejection(response).await)
        }
    }

    fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<String, ProviderError> {
        let url = Url::parse_with_params(
            &self.endpoint("authorize"),
            &[
                ("provider", provider.as_str()),
                ("redirect_to", redirect_to),
                ("code_challenge", code_challenge),
                ("code_challenge_method", "s256"),
            ],
        )
        .map_err(|e| ProviderError::InvalidUrl(e.to_string()))?;
        Ok(url.into())
    }

    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AccessToken, ProviderError> {
        self.token_request(
            "pkce",
            &PkceExchange {
                auth_code,
                code_verifier,
            },
        )
        .await
    }

    async fn sign_out(&self, token: AccessToken) -> Result<(), ProviderError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(token.expose())
            .send()
            .await?;

        match response.status() {
            // An already-expired token is as signed out as it gets
            status if status.is_success() || status == StatusCode::UNAUTHORIZED => Ok(()),
            _ => Err(Self::rejection(response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::http::HeaderMap;
    use axum::response::{IntoResponse, Response as AxumResponse};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    const SIGNUP_REDIRECT: &str = "http://localhost:3000/dashboard";

    fn bearer(headers: &HeaderMap) -> &str {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .unwrap_or_default()
    }

    async fn user(headers: HeaderMap) -> AxumResponse {
        if headers.get("apikey").and_then(|v| v.to_str().ok()) != Some("anon") {
            return (axum::http::StatusCode::BAD_REQUEST, "missing apikey").into_response();
        }
        match bearer(&headers) {
            "good" => Json(json!({
                "id": "u-1",
                "email": "a@b.com",
                "user_metadata": {"role": "Planner"}
            }))
            .into_response(),
            "expired" => axum::http::StatusCode::UNAUTHORIZED.into_response(),
            "banned" => axum::http::StatusCode::FORBIDDEN.into_response(),
            _ => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        }
    }

    async fn token(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> AxumResponse {
        let field = |name: &str| body[name].as_str().unwrap_or_default().to_string();
        let reject = |status: u16, body: Value| {
            (axum::http::StatusCode::from_u16(status).unwrap(), Json(body)).into_response()
        };

        match query.get("grant_type").map(String::as_str) {
            Some("password") => match field("email").as_str() {
                "a@b.com" if field("password") == "secret1" => {
                    Json(json!({"access_token": "tok-password"})).into_response()
                }
                "a@b.com" => reject(
                    400,
                    json!({"error": "invalid_grant", "error_description": "Invalid login credentials"}),
                ),
                "unconfirmed@b.com" => reject(422, json!({"msg": "Email not confirmed"})),
                "legacy@b.com" => reject(401, json!({"message": "Invalid API key"})),
                _ => reject(500, json!({"error": "internal"})),
            },
            Some("pkce") if field("auth_code") == "code-1" && field("code_verifier") == "verifier-1" => {
                Json(json!({"access_token": "tok-pkce"})).into_response()
            }
            Some("pkce") => reject(
                400,
                json!({"error": "invalid_grant", "error_description": "invalid flow state"}),
            ),
            _ => reject(400, json!({})),
        }
    }

    async fn signup(
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> AxumResponse {
        if query.get("redirect_to").map(String::as_str) != Some(SIGNUP_REDIRECT) {
            return (axum::http::StatusCode::BAD_REQUEST, "redirect_to missing").into_response();
        }
        match body["email"].as_str() {
            Some("taken@b.com") => (
                axum::http::StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({"code": 422, "msg": "User already registered"})),
            )
                .into_response(),
            _ => Json(json!({"id": "u-2"})).into_response(),
        }
    }

    async fn logout(headers: HeaderMap) -> AxumResponse {
        match bearer(&headers) {
            "good" => axum::http::StatusCode::NO_CONTENT.into_response(),
            "expired" => axum::http::StatusCode::UNAUTHORIZED.into_response(),
            _ => (axum::http::StatusCode::BAD_GATEWAY, "upstream down").into_response(),
        }
    }

    /// GoTrue stand-in served on an ephemeral local port
    async fn local_gotrue() -> SupabaseProvider {
        let app = Router::new()
            .route("/auth/v1/user", get(user))
            .route("/auth/v1/token", post(token))
            .route("/auth/v1/signup", post(signup))
            .route("/auth/v1/logout", post(logout));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        SupabaseProvider::new(format!("http://{addr}"), "anon", Duration::from_secs(5)).unwrap()
    }

    fn credentials(email: &str, password: &str) -> PasswordCredentials {
        PasswordCredentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_user_payload_maps_to_session() {
        let user: UserPayload = serde_json::from_str(
            r#"{
                "id": "8d0f",
                "email": "a@b.com",
                "role": "authenticated",
                "user_metadata": {"avatar_url": "https://img/a.png", "role": "Planner"}
            }"#,
        )
        .unwrap();

        let session = Session::from(user);
        assert_eq!(session.id, "8d0f");
        assert_eq!(session.email.as_deref(), Some("a@b.com"));
        assert_eq!(session.role.as_deref(), Some("Planner"));
        assert_eq!(session.avatar_url.as_deref(), Some("https://img/a.png"));
    }

    #[test]
    fn test_user_payload_tolerates_missing_metadata() {
        let user: UserPayload =
            serde_json::from_str(r#"{"id": "8d0f", "email": "", "user_metadata": null}"#).unwrap();

        let session = Session::from(user);
        assert!(session.email.is_none());
        assert!(session.role.is_none());
        assert_eq!(session.display_role(), "Member");
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let provider =
            SupabaseProvider::new("https://x.supabase.co/", "key", Duration::from_secs(1)).unwrap();
        assert_eq!(provider.endpoint("user"), "https://x.supabase.co/auth/v1/user");
    }

    #[tokio::test]
    async fn test_missing_token_skips_network() {
        // Unroutable host: a network call would fail rather than return Ok(None)
        let provider =
            SupabaseProvider::new("http://127.0.0.1:9", "key", Duration::from_millis(50)).unwrap();
        assert_eq!(provider.current_user(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_transport_error() {
        let provider =
            SupabaseProvider::new("http://127.0.0.1:9", "key", Duration::from_millis(200)).unwrap();
        let result = provider.current_user(AccessToken::new("token")).await;
        assert!(matches!(result, Err(ProviderError::Transport(_))));
    }

    #[tokio::test]
    async fn test_user_lookup_maps_status_codes() {
        let provider = local_gotrue().await;

        let session = provider
            .current_user(AccessToken::new("good"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.id, "u-1");
        assert_eq!(session.email.as_deref(), Some("a@b.com"));
        assert_eq!(session.role.as_deref(), Some("Planner"));

        for token in ["expired", "banned"] {
            let result = provider.current_user(AccessToken::new(token)).await;
            assert_eq!(result.unwrap(), None, "{token}");
        }

        let result = provider.current_user(AccessToken::new("other")).await;
        assert!(matches!(
            result,
            Err(ProviderError::UnexpectedStatus { status: 500, ref body }) if body == "boom"
        ));
    }

    #[tokio::test]
    async fn test_password_sign_in_maps_rejections() {
        let provider = local_gotrue().await;

        let token = provider
            .sign_in_with_password(&credentials("a@b.com", "secret1"))
            .await
            .unwrap();
        assert_eq!(token.expose(), "tok-password");

        for (email, expected) in [
            ("a@b.com", "Invalid login credentials"),
            ("unconfirmed@b.com", "Email not confirmed"),
            ("legacy@b.com", "Invalid API key"),
        ] {
            let result = provider
                .sign_in_with_password(&credentials(email, "wrong"))
                .await;
            assert!(
                matches!(result, Err(ProviderError::Rejected(ref m)) if m == expected),
                "{email}: {result:?}"
            );
        }

        let result = provider
            .sign_in_with_password(&credentials("other@b.com", "wrong"))
            .await;
        assert!(matches!(
            result,
            Err(ProviderError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[tokio::test]
    async fn test_sign_up_sends_redirect_and_maps_rejection() {
        let provider = local_gotrue().await;

        provider
            .sign_up(&credentials("new@b.com", "secret1"), SIGNUP_REDIRECT)
            .await
            .unwrap();

        let result = provider
            .sign_up(&credentials("taken@b.com", "secret1"), SIGNUP_REDIRECT)
            .await;
        assert!(matches!(result, Err(ProviderError::Rejected(ref m)) if m == "User already registered"));

        // Without the expected redirect the stand-in answers 400 with no message
        let result = provider
            .sign_up(&credentials("new@b.com", "secret1"), "http://elsewhere/")
            .await;
        assert!(matches!(
            result,
            Err(ProviderError::UnexpectedStatus { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_sign_out_treats_expired_token_as_done() {
        let provider = local_gotrue().await;

        provider.sign_out(AccessToken::new("good").unwrap()).await.unwrap();
        provider
            .sign_out(AccessToken::new("expired").unwrap())
            .await
            .unwrap();

        let result = provider.sign_out(AccessToken::new("other").unwrap()).await;
        assert!(matches!(
            result,
            Err(ProviderError::UnexpectedStatus { status: 502, .. })
        ));
    }

    #[tokio::test]
    async fn test_pkce_code_exchange() {
        let provider = local_gotrue().await;

        let token = provider.exchange_code("code-1", "verifier-1").await.unwrap();
        assert_eq!(token.expose(), "tok-pkce");

        let result = provider.exchange_code("code-1", "forged").await;
        assert!(matches!(result, Err(ProviderError::Rejected(ref m)) if m == "invalid flow state"));
    }

    #[test]
    fn test_authorize_url_carries_pkce_challenge() {
        let provider =
            SupabaseProvider::new("https://x.supabase.co/", "key", Duration::from_secs(1)).unwrap();

        let url = provider
            .authorize_url(
                OAuthProvider::Google,
                "https://app.lgradar.com.au/auth/callback",
                "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM",
            )
            .unwrap();

        let url = Url::parse(&url).unwrap();
        assert_eq!(url.host_str(), Some("x.supabase.co"));
        assert_eq!(url.path(), "/auth/v1/authorize");
        let query: HashMap<_, _> = url.query_pairs().into_owned().collect();
        assert_eq!(query["provider"], "google");
        assert_eq!(query["redirect_to"], "https://app.lgradar.com.au/auth/callback");
        assert_eq!(
            query["code_challenge"],
            "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM"
        );
        assert_eq!(query["code_challenge_method"], "s256");
    }
}
