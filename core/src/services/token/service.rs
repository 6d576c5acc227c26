//! Stateless JWT issuing and verification

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::user::{Role, User};
use crate::domain::value_objects::Identity;
use crate::errors::{DomainError, TokenError};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Claim carrying the user id
pub const USER_ID_CLAIM: &str = "uid";

/// JWT claims; anything beyond the registered ones lands in `extra`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject email
    pub sub: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A signed token and the instant it stops verifying
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and verifies HS256 access tokens.
///
/// Holds no per-token state: there is no revocation list, so a token stays
/// valid until `exp` regardless of later changes to the account.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(config: TokenServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a service reading time from `clock`
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock after decoding
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Configured token lifetime in seconds
    pub fn expiry_seconds(&self) -> i64 {
        self.config.access_token_expiry_seconds
    }

    /// Signs a token for `subject` with `role` and any extra claims
    pub fn issue(
        &self,
        subject: &str,
        role: Role,
        extra: Map<String, Value>,
    ) -> Result<IssuedToken, DomainError> {
        let now = self.clock.now();
        let expires_at = now + Duration::seconds(self.config.access_token_expiry_seconds);

        let claims = Claims {
            sub: subject.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.config.issuer.clone(),
            extra,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Issues a token for `user`, embedding its id
    pub fn issue_for(&self, user: &User) -> Result<IssuedToken, DomainError> {
        let mut extra = Map::new();
        extra.insert(USER_ID_CLAIM.to_string(), Value::String(user.id.to_string()));
        self.issue(&user.email, user.role, extra)
    }

    /// Verifies signature, issuer, expiry and role, returning the identity
    pub fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidTokenFormat,
            }
        })?;
        let claims = data.claims;

        if self.clock.now().timestamp() >= claims.exp {
            return Err(TokenError::TokenExpired);
        }

        let role: Role = claims
            .role
            .parse()
            .map_err(|_| TokenError::UnknownRole { role: claims.role.clone() })?;

        let mut identity = Identity::new(claims.sub, role);
        if let Some(uid) = claims
            .extra
            .get(USER_ID_CLAIM)
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
        {
            identity = identity.with_user_id(uid);
        }
        Ok(identity)
    }
}
