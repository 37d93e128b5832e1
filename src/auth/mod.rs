use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// The single configured identity. Compared by exact, case-sensitive equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Signing key derived from the credential itself. Changing the credential
    /// changes the key, which invalidates every outstanding token.
    fn signing_key(&self) -> Vec<u8> {
        Sha256::digest(format!("{}/{}", self.username, self.password).as_bytes()).to_vec()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub password: String,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

impl Claims {
    pub fn new(credential: &Credential, issuer: &str, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            username: credential.username.clone(),
            password: credential.password.clone(),
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    pub fn matches(&self, credential: &Credential) -> bool {
        self.username == credential.username && self.password == credential.password
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token generation error: {0}")]
    Generation(String),
}

/// Issues and validates HS256 tokens bound to a credential
#[derive(Debug, Clone)]
pub struct TokenService {
    issuer: String,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(issuer: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            issuer: issuer.into(),
            lifetime,
        }
    }

    pub fn issue(&self, credential: &Credential) -> Result<String, TokenError> {
        self.issue_claims(&Claims::new(credential, &self.issuer, self.lifetime), credential)
    }

    fn issue_claims(&self, claims: &Claims, credential: &Credential) -> Result<String, TokenError> {
        let encoding_key = EncodingKey::from_secret(&credential.signing_key());

        encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verify `token` against the key derived from `credential`.
    ///
    /// Bad signature, expiry, wrong issuer and malformed input all collapse to
    /// `None`; callers only ever see pass/fail.
    pub fn validate(&self, token: &str, credential: &Credential) -> Option<Claims> {
        let decoding_key = DecodingKey::from_secret(&credential.signing_key());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);

        match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("token rejected: {}", e);
                None
            }
        }
    }
}
