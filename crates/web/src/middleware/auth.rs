use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};
use storage::models::UserRole;
use uuid::Uuid;

use crate::error::WebError;

const TOKEN_VERSION: &str = "v1";

/// Identity attached to every authenticated request. The gateway trusts the
/// verified `(user_id, role)` pair; credentials never reach this service.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

/// Verifier for gateway-issued bearer tokens of the form
/// `v1.<user_id>.<role>.<expiry>.<signature>` where the signature is a
/// hex-encoded SHA-256 over the payload and the shared secret.
#[derive(Clone)]
pub struct TokenAuth {
    secret: String,
}

impl TokenAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn issue(&self, user_id: Uuid, role: UserRole, ttl: Duration) -> String {
        let expires_at = (Utc::now() + ttl).timestamp();
        let signature = self.signature(user_id, role, expires_at);
        format!("{TOKEN_VERSION}.{user_id}.{role}.{expires_at}.{signature}")
    }

    pub fn verify(&self, token: &str) -> Option<AuthUser> {
        let parts: Vec<&str> = token.split('.').collect();
        let [version, user_id, role, expires_at, signature] = parts.as_slice() else {
            return None;
        };

        if *version != TOKEN_VERSION {
            return None;
        }

        let user_id = Uuid::parse_str(user_id).ok()?;
        let role = UserRole::parse(role)?;
        let expires_at: i64 = expires_at.parse().ok()?;

        if self.signature(user_id, role, expires_at) != *signature {
            return None;
        }
        if expires_at < Utc::now().timestamp() {
            return None;
        }

        Some(AuthUser { user_id, role })
    }

    fn signature(&self, user_id: Uuid, role: UserRole, expires_at: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{user_id}.{role}.{expires_at}.{}", self.secret));
        hex::encode(hasher.finalize())
    }
}

pub async fn require_auth(
    State(auth): State<TokenAuth>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(WebError::Unauthorized("Missing Authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(WebError::Unauthorized("Invalid Authorization format"))?;

    let user = auth.verify(token).ok_or_else(|| {
        tracing::warn!("Rejected bearer token");
        WebError::Unauthorized("Invalid or expired token")
    })?;

    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

pub async fn require_student(req: Request, next: Next) -> Result<Response, WebError> {
    require_role(req, next, UserRole::Student).await
}

pub async fn require_organizer(req: Request, next: Next) -> Result<Response, WebError> {
    require_role(req, next, UserRole::Organizer).await
}

async fn require_role(req: Request, next: Next, role: UserRole) -> Result<Response, WebError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or(WebError::Unauthorized("Authentication required"))?;

    if user.role != role {
        return Err(WebError::Forbidden("Access denied for this role"));
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies() {
        let auth = TokenAuth::new("secret");
        let user_id = Uuid::new_v4();
        let token = auth.issue(user_id, UserRole::Student, Duration::hours(1));

        let user = auth.verify(&token).expect("token should verify");
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, UserRole::Student);
    }

    #[test]
    fn expired_token_is_rejected() {
        let auth = TokenAuth::new("secret");
        let token = auth.issue(Uuid::new_v4(), UserRole::Student, Duration::hours(-1));

        assert!(auth.verify(&token).is_none());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let auth = TokenAuth::new("secret");
        let other = TokenAuth::new("other-secret");
        let token = auth.issue(Uuid::new_v4(), UserRole::Organizer, Duration::hours(1));

        assert!(other.verify(&token).is_none());
    }

    #[test]
    fn tampered_role_is_rejected() {
        let auth = TokenAuth::new("secret");
        let token = auth.issue(Uuid::new_v4(), UserRole::Student, Duration::hours(1));
        let tampered = token.replace(".student.", ".organizer.");

        assert!(auth.verify(&tampered).is_none());
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let auth = TokenAuth::new("secret");
        for token in ["", "v1", "v1.not-a-uuid.student.123.abc", "a.b.c.d.e.f"] {
            assert!(auth.verify(token).is_none(), "accepted {token:?}");
        }
    }
}
