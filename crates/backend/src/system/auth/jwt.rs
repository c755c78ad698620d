use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::access::{TokenDecodeError, TokenDecoder};
use contracts::system::auth::{TokenClaims, TokenResponse};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::Rng;

use crate::shared::config::{AuthConfig, DevUser};

/// HS256 token codec.
///
/// Expiry is not validated here: the access resolver decides `Expired`
/// against its own clock, so an expired token is never reported as malformed.
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    lifetime: chrono::Duration,
}

impl JwtCodec {
    pub fn new(secret: &str, lifetime_hours: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime: chrono::Duration::hours(lifetime_hours),
        }
    }

    /// Codec from config, generating a secret when none is configured
    pub fn from_config(config: &AuthConfig) -> Self {
        if config.jwt_secret.is_empty() {
            tracing::warn!("auth.jwt_secret is empty, generated a random secret; tokens will not survive a restart");
            Self::new(&generate_jwt_secret(), config.token_lifetime_hours)
        } else {
            Self::new(&config.jwt_secret, config.token_lifetime_hours)
        }
    }

    pub fn encode(&self, claims: &TokenClaims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .context("Failed to encode JWT token")
    }

    /// Issue an access token for a configured principal
    pub fn issue(&self, user: &DevUser) -> Result<TokenResponse> {
        let now = Utc::now();
        let exp = (now + self.lifetime).timestamp();

        let claims = TokenClaims {
            sub: user.username.clone(),
            username: user.username.clone(),
            roles: user.roles.clone(),
            departments: user.departments.clone(),
            permissions: user.permissions.clone(),
            brands: user.brands.clone(),
            exp,
            iat: now.timestamp(),
        };

        Ok(TokenResponse {
            access_token: self.encode(&claims)?,
            expires_at: exp,
        })
    }
}

impl TokenDecoder for JwtCodec {
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenDecodeError> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => TokenDecodeError::Signature,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenDecodeError::Format(e.to_string()),
                _ => TokenDecodeError::Claims(e.to_string()),
            })
    }
}

/// Generate a cryptographically secure JWT secret (256 bits)
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}
