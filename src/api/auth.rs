//! Caller identity extraction.
//!
//! Authentication itself is an external collaborator: the upstream proxy
//! verifies credentials and forwards the asserted identity as headers.
//! [`AuthUser`] extracts and validates those headers; handlers enforce the
//! role they need.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::domain::UserRole;
use crate::error::GatewayError;

/// Header carrying the authenticated user's ID.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the authenticated user's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The authenticated caller, as asserted by the upstream auth layer.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    /// User ID.
    pub id: Uuid,
    /// Asserted role.
    pub role: UserRole,
}

impl AuthUser {
    /// Ensures the caller is a therapist.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Forbidden`] otherwise.
    pub const fn require_therapist(&self) -> Result<Uuid, GatewayError> {
        match self.role {
            UserRole::Therapist => Ok(self.id),
            UserRole::Patient => Err(GatewayError::Forbidden),
        }
    }

    /// Ensures the caller is a patient.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Forbidden`] otherwise.
    pub const fn require_patient(&self) -> Result<Uuid, GatewayError> {
        match self.role {
            UserRole::Patient => Ok(self.id),
            UserRole::Therapist => Err(GatewayError::Forbidden),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = GatewayError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(GatewayError::Unauthorized)?;

        // The upstream proxy always sets both headers; an absent role means
        // the request did not come through it.
        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(GatewayError::Unauthorized)
            .and_then(UserRole::parse)?;

        Ok(Self { id, role })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthUser, GatewayError> {
        let (mut parts, ()) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn valid_headers_yield_a_user() {
        let id = Uuid::new_v4();
        let request = Request::builder()
            .header(USER_ID_HEADER, id.to_string())
            .header(USER_ROLE_HEADER, "therapist")
            .body(())
            .ok();
        let Some(request) = request else {
            panic!("request build failed");
        };
        let Ok(user) = extract(request).await else {
            panic!("extraction failed");
        };
        assert_eq!(user.id, id);
        assert_eq!(user.role, UserRole::Therapist);
    }

    #[tokio::test]
    async fn missing_identity_is_unauthorized() {
        let request = Request::builder().body(()).ok();
        let Some(request) = request else {
            panic!("request build failed");
        };
        let Err(err) = extract(request).await else {
            panic!("missing headers must be rejected");
        };
        assert!(matches!(err, GatewayError::Unauthorized));
    }

    #[tokio::test]
    async fn missing_role_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, Uuid::new_v4().to_string())
            .body(())
            .ok();
        let Some(request) = request else {
            panic!("request build failed");
        };
        let Err(err) = extract(request).await else {
            panic!("missing role must be rejected");
        };
        assert!(matches!(err, GatewayError::Unauthorized));
    }

    #[tokio::test]
    async fn unknown_role_is_unauthorized() {
        let request = Request::builder()
            .header(USER_ID_HEADER, Uuid::new_v4().to_string())
            .header(USER_ROLE_HEADER, "admin")
            .body(())
            .ok();
        let Some(request) = request else {
            panic!("request build failed");
        };
        let Err(err) = extract(request).await else {
            panic!("unknown role must be rejected");
        };
        assert!(matches!(err, GatewayError::Unauthorized));
    }
}
