//! # JWT Service
//!
//! This module verifies bearer access tokens issued by the external identity
//! provider and turns them into a [`CallerIdentity`].
//!
//! ## Rules
//!
//! - Tokens are HS256-signed with the shared secret from configuration
//! - The `aud` claim must be `authenticated`
//! - `exp` is mandatory and checked without leeway
//! - `sub` and `email` are trusted as-is, no lookup is performed

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, errors::ErrorKind};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::utils::constant::JWT_AUDIENCE;

/// Errors that can occur while authenticating a request
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Missing or malformed Authorization header")]
    MissingBearer,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// Claims read from an access token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as issued by the identity provider)
    pub sub: String,
    /// Email of the user, when the provider includes it
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Issued at timestamp (Unix epoch)
    #[serde(default)]
    pub iat: Option<u64>,
}

/// Identity of the caller, derived from a verified token for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub user_id: String,
    pub email: Option<String>,
}

impl From<Claims> for CallerIdentity {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

/// Extracts the token part of an `Authorization: Bearer <token>` header.
///
/// The scheme is matched case-insensitively. A missing header, another
/// scheme or an empty token all yield [`JwtError::MissingBearer`].
pub fn extract_bearer(header: Option<&str>) -> Result<&str, JwtError> {
    let header = header.ok_or(JwtError::MissingBearer)?;
    let (scheme, token) = header.split_once(' ').ok_or(JwtError::MissingBearer)?;

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(JwtError::MissingBearer);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(JwtError::MissingBearer);
    }

    Ok(token)
}

/// Service verifying access tokens against the shared secret
pub struct JwtService {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Creates a verifier for HS256 tokens signed with `secret`.
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[JWT_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "aud", "sub"]);
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Validates an access token and returns its claims.
    ///
    /// # Errors
    ///
    /// - [`JwtError::TokenExpired`] - Token has expired
    /// - [`JwtError::InvalidToken`] - Bad signature, malformed token, wrong
    ///   algorithm, wrong audience or empty subject
    #[instrument(skip_all, fields(token_length = token.len()))]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        trace!("Validating access token");

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) if token_data.claims.sub.is_empty() => {
                debug!("Access token has an empty subject");
                Err(JwtError::InvalidToken)
            }
            Ok(token_data) => {
                trace!(user_id = %token_data.claims.sub, "Access token validated successfully");
                Ok(token_data.claims)
            }
            Err(e) if e.kind() == &ErrorKind::ExpiredSignature => {
                debug!("Access token expired");
                Err(JwtError::TokenExpired)
            }
            Err(e) => {
                debug!(error = %e, "Invalid access token");
                Err(JwtError::InvalidToken)
            }
        }
    }

    /// Resolves the caller behind a raw `Authorization` header value.
    pub fn authenticate(&self, header: Option<&str>) -> Result<CallerIdentity, JwtError> {
        let token = extract_bearer(header)?;
        self.validate_access_token(token).map(CallerIdentity::from)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn service() -> JwtService {
        JwtService::new(&SecretString::from(SECRET.to_string()))
    }

    fn sign(claims: serde_json::Value, alg: Algorithm, secret: &str) -> String {
        encode(
            &Header::new(alg),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn valid_claims() -> serde_json::Value {
        json!({
            "sub": "user-1",
            "email": "user@example.com",
            "aud": "authenticated",
            "exp": now() + 3600,
            "iat": now(),
        })
    }

    #[test]
    fn extract_bearer_accepts_bearer_scheme() {
        assert_eq!(extract_bearer(Some("Bearer abc.def")), Ok("abc.def"));
        assert_eq!(extract_bearer(Some("bearer abc.def")), Ok("abc.def"));
    }

    #[test]
    fn extract_bearer_rejects_missing_or_other_schemes() {
        for header in [None, Some(""), Some("Bearer"), Some("Bearer   "), Some("Basic dXNlcg==")] {
            assert_eq!(extract_bearer(header), Err(JwtError::MissingBearer), "{header:?}");
        }
    }

    #[test]
    fn valid_token_yields_identity() {
        let token = sign(valid_claims(), Algorithm::HS256, SECRET);
        let identity = service()
            .authenticate(Some(&format!("Bearer {token}")))
            .unwrap();

        assert_eq!(
            identity,
            CallerIdentity {
                user_id: "user-1".into(),
                email: Some("user@example.com".into()),
            }
        );
    }

    #[test]
    fn email_claim_is_optional() {
        let mut claims = valid_claims();
        claims.as_object_mut().unwrap().remove("email");
        let token = sign(claims, Algorithm::HS256, SECRET);

        let identity = service().authenticate(Some(&format!("Bearer {token}"))).unwrap();
        assert_eq!(identity.email, None);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let mut claims = valid_claims();
        claims["exp"] = json!(now() - 3600);
        let token = sign(claims, Algorithm::HS256, SECRET);

        assert_eq!(
            service().validate_access_token(&token).unwrap_err(),
            JwtError::TokenExpired
        );
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = sign(
            valid_claims(),
            Algorithm::HS256,
            "another-secret-another-secret-xx",
        );
        assert_eq!(
            service().validate_access_token(&token).unwrap_err(),
            JwtError::InvalidToken
        );
    }

    #[test]
    fn wrong_audience_is_invalid() {
        let mut claims = valid_claims();
        claims["aud"] = json!("anon");
        let token = sign(claims, Algorithm::HS256, SECRET);
        assert_eq!(
            service().validate_access_token(&token).unwrap_err(),
            JwtError::InvalidToken
        );

        let mut claims = valid_claims();
        claims.as_object_mut().unwrap().remove("aud");
        let token = sign(claims, Algorithm::HS256, SECRET);
        assert_eq!(
            service().validate_access_token(&token).unwrap_err(),
            JwtError::InvalidToken
        );
    }

    #[test]
    fn other_algorithm_is_invalid() {
        let token = sign(valid_claims(), Algorithm::HS512, SECRET);
        assert_eq!(
            service().validate_access_token(&token).unwrap_err(),
            JwtError::InvalidToken
        );
    }

    #[test]
    fn garbage_and_empty_subject_are_invalid() {
        assert_eq!(
            service().validate_access_token("not-a-jwt").unwrap_err(),
            JwtError::InvalidToken
        );

        let mut claims = valid_claims();
        claims["sub"] = json!("");
        let token = sign(claims, Algorithm::HS256, SECRET);
        assert_eq!(
            service().validate_access_token(&token).unwrap_err(),
            JwtError::InvalidToken
        );
    }
}
