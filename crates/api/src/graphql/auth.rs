use std::time::Duration;

use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString},
};
use base64::prelude::*;
use bson::{doc, oid::ObjectId};
use hmac::{Hmac, Mac, digest::InvalidLength};
use rand_core::OsRng;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use sha2::Sha256;
use thiserror::Error;

use crate::db::{CollectionKind, StorageError, Store, find_one_as, models::UserAccount};

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

#[derive(Serialize, Deserialize)]
struct JwtHeader {
    alg: String,
    #[serde(default)]
    typ: String,
}

#[derive(Serialize, Deserialize)]
#[serde(bound = "Inner: Serialize + DeserializeOwned")]
pub struct JwtPayload<Inner: DeserializeOwned> {
    #[serde(flatten)]
    pub custom_fields: Inner,
    #[serde(default)]
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

impl<Inner: DeserializeOwned> JwtPayload<Inner> {
    /// A payload without `exp`, valid until the secret changes.
    pub fn new(custom_fields: Inner) -> Self {
        Self {
            custom_fields,
            iat: chrono::Utc::now().timestamp(),
            exp: None,
        }
    }

    pub fn new_with_duration(custom_fields: Inner, valid_duration: Duration) -> Self {
        let current_time = chrono::Utc::now().timestamp();
        Self {
            custom_fields,
            iat: current_time,
            exp: Some(current_time.saturating_add_unsigned(valid_duration.as_secs())),
        }
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.exp
    }

    pub fn is_valid_now(&self) -> bool {
        self.exp
            .is_none_or(|exp| chrono::Utc::now().timestamp() <= exp)
    }
}

/// Which user collection an identity lives in.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserPool {
    Game,
    Link,
}

impl UserPool {
    pub fn collection(self) -> CollectionKind {
        match self {
            UserPool::Game => CollectionKind::GameUsers,
            UserPool::Link => CollectionKind::LinkUsers,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AuthJwtPayload {
    /// Hex object id of the user record.
    pub id: String,
    /// Absent in tokens issued before pools were recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pool: Option<UserPool>,
}

#[derive(Error, Debug)]
pub enum JwtValidationError {
    #[error("Invalid JWT format")]
    InvalidFormat,
    #[error("Base64 decoding error: {0}")]
    Base64DecodingError(#[from] base64::DecodeError),
    #[error("Unsupported JWT algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Invalid JWT signature")]
    InvalidSignature,
    #[error("JWT parsing error: {0}")]
    ParsingError(#[from] serde_json::Error),
    #[error("JWT is not valid at the current time")]
    InvalidTime,
    #[error("Invalid signing key: {0}")]
    InvalidKey(#[from] InvalidLength),
}

#[derive(Error, Debug)]
pub enum JwtGenerationError {
    #[error("JWT serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid signing key: {0}")]
    InvalidKey(#[from] InvalidLength),
}

/// HMAC key used to sign and verify access tokens.
#[derive(Clone)]
pub struct TokenSigner {
    secret: std::sync::Arc<[u8]>,
    ttl: Option<Duration>,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl: Option<Duration>) -> Self {
        Self {
            secret: secret.as_bytes().into(),
            ttl,
        }
    }

    fn mac(&self) -> Result<HmacSha256, InvalidLength> {
        HmacSha256::new_from_slice(&self.secret)
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }
}

fn split_token(token: &str) -> Result<(&str, &str, &str), JwtValidationError> {
    let mut segments = token.split('.');
    match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(header), Some(payload), Some(signature), None) => Ok((header, payload, signature)),
        _ => Err(JwtValidationError::InvalidFormat),
    }
}

/// Validate a JWT and its signature
fn validate_jwt(token: &str, signer: &TokenSigner) -> Result<(), JwtValidationError> {
    let (header_segment, payload_segment, signature_segment) = split_token(token)?;

    let decoded_header = BASE64_URL_SAFE_NO_PAD.decode(header_segment)?;
    let header = serde_json::from_slice::<JwtHeader>(&decoded_header)?;
    if header.alg != ALGORITHM {
        return Err(JwtValidationError::UnsupportedAlgorithm(header.alg));
    }

    let signature_bytes = BASE64_URL_SAFE_NO_PAD.decode(signature_segment)?;
    let mut mac = signer.mac()?;
    mac.update(header_segment.as_bytes());
    mac.update(b".");
    mac.update(payload_segment.as_bytes());
    mac.verify_slice(&signature_bytes)
        .map_err(|_| JwtValidationError::InvalidSignature)
}

pub fn parse_and_validate_jwt<T: DeserializeOwned + Serialize>(
    token: &str,
    signer: &TokenSigner,
) -> Result<JwtPayload<T>, JwtValidationError> {
    validate_jwt(token, signer)?;

    let (_, payload_segment, _) = split_token(token)?;
    let decoded_payload = BASE64_URL_SAFE_NO_PAD.decode(payload_segment)?;
    let payload: JwtPayload<T> = serde_json::from_slice(&decoded_payload)?;

    if !payload.is_valid_now() {
        return Err(JwtValidationError::InvalidTime);
    }

    Ok(payload)
}

pub fn generate_jwt<T: Serialize>(
    payload: &T,
    signer: &TokenSigner,
) -> Result<String, JwtGenerationError> {
    let header = JwtHeader {
        alg: ALGORITHM.to_string(),
        typ: "JWT".to_string(),
    };
    let header_json = serde_json::to_vec(&header)?;
    let payload_json = serde_json::to_vec(payload)?;

    let header_segment = BASE64_URL_SAFE_NO_PAD.encode(header_json);
    let payload_segment = BASE64_URL_SAFE_NO_PAD.encode(payload_json);
    let signing_input = format!("{}.{}", header_segment, payload_segment);

    let mut mac = signer.mac()?;
    mac.update(signing_input.as_bytes());
    let signature_segment = BASE64_URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature_segment))
}

/// Extracts the token from an `Authorization` header value.
///
/// Accepts `Bearer <token>` as well as a bare token.
pub fn bearer_token(header: &str) -> Option<&str> {
    let header = header.trim();
    let token = match header.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if header.eq_ignore_ascii_case("bearer") => "",
        _ => header,
    };
    (!token.is_empty()).then_some(token)
}

/// The user a request acts as.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub pool: UserPool,
    pub user: UserAccount,
}

/// Resolves the identity behind an access token.
///
/// A missing token, a token that fails verification, or a token whose user no
/// longer exists all resolve to `None`. Only storage failures are errors.
pub async fn resolve_identity(
    token: Option<&str>,
    signer: &TokenSigner,
    store: &dyn Store,
) -> Result<Option<Identity>, StorageError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Ok(None);
    };

    let payload = match parse_and_validate_jwt::<AuthJwtPayload>(token, signer) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("Ignoring rejected access token: {e}");
            return Ok(None);
        }
    };

    let Ok(object_id) = ObjectId::parse_str(&payload.custom_fields.id) else {
        tracing::debug!("Access token subject is not an object id");
        return Ok(None);
    };

    let pools: &[UserPool] = match payload.custom_fields.pool {
        Some(UserPool::Game) => &[UserPool::Game],
        Some(UserPool::Link) => &[UserPool::Link],
        None => &[UserPool::Game, UserPool::Link],
    };

    for &pool in pools {
        let user = find_one_as::<UserAccount>(store, pool.collection(), doc! { "_id": object_id })
            .await?;
        if let Some(user) = user {
            return Ok(Some(Identity { pool, user }));
        }
    }

    tracing::debug!("Access token refers to unknown user {object_id}");
    Ok(None)
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Checks `password` against a stored hash.
///
/// Records written by the previous deployment hold bcrypt hashes (`$2a$`, `$2b$`,
/// `$2y$`); everything else is parsed as an argon2 PHC string. Unparseable
/// hashes never match.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    if is_bcrypt_hash(stored_hash) {
        return match bcrypt::verify(password, stored_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!("Stored bcrypt hash could not be checked: {e}");
                false
            }
        };
    }

    match PasswordHash::new(stored_hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(e) => {
            tracing::warn!("Stored password hash could not be parsed: {e}");
            false
        }
    }
}

fn is_bcrypt_hash(stored_hash: &str) -> bool {
    ["$2a$", "$2b$", "$2y$"]
        .iter()
        .any(|prefix| stored_hash.starts_with(prefix))
}
