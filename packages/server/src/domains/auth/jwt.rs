//! HS256 bearer tokens.
//!
//! A token names the user (`sub`) and the site role they held when it was
//! issued. Club roles are never embedded: they are looked up per request so
//! an approval or demotion takes effect immediately.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::common::UserId;
use crate::domains::users::models::UserRole;

pub const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub role: UserRole,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    fn issue(user_id: UserId, role: UserRole, issuer: &str, now: DateTime<Utc>) -> Self {
        Self {
            sub: user_id,
            role,
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        }
    }
}

/// Signs and checks tokens with one shared secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl JwtService {
    pub fn new(secret: &str, issuer: String) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer,
        }
    }

    /// Token valid for [`TOKEN_TTL_HOURS`] from now.
    pub fn create_token(&self, user_id: UserId, role: UserRole) -> Result<String> {
        let claims = Claims::issue(user_id, role, &self.issuer, Utc::now());
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("failed to sign token")
    }

    /// Claims of a correctly signed, unexpired token from this issuer.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .context("invalid token")
    }
}
