//! Staff profile and request session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::policy::{Action, Capabilities, Resource, Role};
use crate::error::AppError;

/// Staff profile, keyed by the auth provider's user id
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    /// Role label as stored (e.g. "Admin", "Dev.", "Técnico")
    pub role: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Change role request (admin only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRole {
    pub role: Role,
}

/// Claims of a bearer token issued by the hosted auth provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: Uuid,
    pub email: Option<String>,
    pub aud: String,
    pub exp: i64,
}

impl SessionClaims {
    /// Verify an HS256 token against the shared secret and expected audience
    pub fn from_token(token: &str, secret: &str, audience: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let mut validation = Validation::default();
        validation.set_audience(&[audience]);
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )?;
        Ok(token_data.claims)
    }
}

/// Authenticated staff member with capabilities resolved once per request
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub capabilities: Capabilities,
}

impl Session {
    pub fn new(profile: Profile) -> Self {
        let role = Role::parse_lenient(&profile.role);
        Self {
            user_id: profile.id,
            email: profile.email,
            full_name: profile.full_name,
            capabilities: Capabilities::for_role(role),
        }
    }

    pub fn role(&self) -> Role {
        self.capabilities.role
    }

    pub fn can(&self, resource: Resource, action: Action) -> bool {
        self.capabilities.allows(resource, action)
    }

    /// Short-circuit with an authorization error before touching the datastore
    pub fn require(&self, resource: Resource, action: Action) -> Result<(), AppError> {
        if self.can(resource, action) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Role {} may not {} {:?}",
                self.role(),
                action,
                resource
            )))
        }
    }

    /// Label recorded on history entries
    pub fn actor(&self) -> String {
        self.email
            .clone()
            .unwrap_or_else(|| self.user_id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: &str) -> Profile {
        Profile {
            id: Uuid::new_v4(),
            email: Some("ops@amiste.com.br".to_string()),
            full_name: None,
            role: role.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_session_resolves_role_once() {
        let session = Session::new(profile("Dev."));
        assert_eq!(session.role(), Role::Dev);
        assert!(session.require(Resource::Users, Action::Delete).is_ok());
    }

    #[test]
    fn test_require_rejects_missing_capability() {
        let session = Session::new(profile("Comercial"));
        let err = session.require(Resource::Checklists, Action::Delete).unwrap_err();
        assert!(matches!(err, AppError::Authorization(_)));
    }

    #[test]
    fn test_token_round_trip() {
        use jsonwebtoken::{encode, EncodingKey, Header};
        let claims = SessionClaims {
            sub: Uuid::new_v4(),
            email: Some("ops@amiste.com.br".to_string()),
            aud: "authenticated".to_string(),
            exp: Utc::now().timestamp() + 600,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();

        let decoded = SessionClaims::from_token(&token, "secret", "authenticated").unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert!(SessionClaims::from_token(&token, "other", "authenticated").is_err());
        assert!(SessionClaims::from_token(&token, "secret", "anon").is_err());
    }
}
