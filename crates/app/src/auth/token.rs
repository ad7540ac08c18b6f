//! Bearer API tokens.
//!
//! A token reads `sf_v1_{token_uuid}.{secret}` where the uuid is in simple
//! (unhyphenated) form and the secret is 32 random bytes as lowercase hex.
//! Only a SHA-256 verifier is stored, see [`ApiToken::verifier`].

use std::{fmt, fmt::Write as _, str::FromStr};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::domain::users::records::UserUuid;

pub const API_TOKEN_PREFIX: &str = "sf";

pub const API_TOKEN_SECRET_BYTES: usize = 32;

#[derive(Debug, Error)]
pub enum ApiTokenError {
    #[error("api token format is invalid")]
    InvalidFormat,

    #[error("api token uses an unsupported version")]
    UnsupportedVersion,

    #[error("api token secret encoding is invalid")]
    InvalidSecretEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiTokenVersion {
    V1,
}

impl ApiTokenVersion {
    pub const CURRENT: Self = Self::V1;

    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }
}

impl TryFrom<i16> for ApiTokenVersion {
    type Error = ApiTokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(ApiTokenError::UnsupportedVersion),
        }
    }
}

impl fmt::Display for ApiTokenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_i16())
    }
}

/// Secret half of a token. Zeroed on drop and never printed.
#[derive(Clone)]
pub struct ApiTokenSecret([u8; API_TOKEN_SECRET_BYTES]);

impl ApiTokenSecret {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; API_TOKEN_SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    fn random() -> Self {
        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    fn to_hex(&self) -> String {
        hex(&self.0)
    }

    fn from_hex(encoded: &str) -> Option<Self> {
        if encoded.len() != API_TOKEN_SECRET_BYTES * 2
            || !encoded.bytes().all(|byte| byte.is_ascii_hexdigit())
        {
            return None;
        }

        let mut bytes = [0_u8; API_TOKEN_SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(encoded.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).ok()?;

            *byte = u8::from_str_radix(pair, 16).ok()?;
        }

        Some(Self(bytes))
    }
}

impl fmt::Debug for ApiTokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiTokenSecret(**redacted**)")
    }
}

impl Drop for ApiTokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A bearer token as presented by a client.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub uuid: Uuid,
    pub version: ApiTokenVersion,
    secret: ApiTokenSecret,
}

impl ApiToken {
    #[must_use]
    pub fn new(uuid: Uuid, version: ApiTokenVersion, secret: ApiTokenSecret) -> Self {
        Self {
            uuid,
            version,
            secret,
        }
    }

    /// A fresh current-version token with a random secret.
    #[must_use]
    pub fn generate() -> Self {
        Self::new(
            Uuid::now_v7(),
            ApiTokenVersion::CURRENT,
            ApiTokenSecret::random(),
        )
    }

    /// The string handed to the client. Shown once at issuance.
    #[must_use]
    pub fn to_bearer(&self) -> String {
        format!(
            "{API_TOKEN_PREFIX}_{}_{}.{}",
            self.version,
            self.uuid.simple(),
            self.secret.to_hex()
        )
    }

    /// Hex SHA-256 of `{token_uuid}:{version}:{user_uuid}:{secret}`, the
    /// value stored for this token. Only matches for the owning user.
    #[must_use]
    pub fn verifier(&self, user: UserUuid) -> String {
        let input = format!(
            "{}:{}:{}:{}",
            self.uuid.simple(),
            self.version.as_i16(),
            user.into_uuid().simple(),
            self.secret.to_hex(),
        );

        hex(&Sha256::digest(input.as_bytes()))
    }

    /// Whether `stored` is this token's verifier for `user`. Compares every
    /// byte regardless of where the first mismatch is.
    #[must_use]
    pub fn verifies(&self, user: UserUuid, stored: &str) -> bool {
        let computed = self.verifier(user);

        computed.len() == stored.len()
            && computed
                .bytes()
                .zip(stored.bytes())
                .fold(0_u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }
}

impl FromStr for ApiToken {
    type Err = ApiTokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (id, secret) = token.split_once('.').ok_or(ApiTokenError::InvalidFormat)?;

        let Some((API_TOKEN_PREFIX, rest)) = id.split_once('_') else {
            return Err(ApiTokenError::InvalidFormat);
        };

        let (version, uuid) = rest.split_once('_').ok_or(ApiTokenError::InvalidFormat)?;

        let version = match version {
            "v1" => ApiTokenVersion::V1,
            _ => return Err(ApiTokenError::UnsupportedVersion),
        };

        let uuid = Uuid::try_parse(uuid).map_err(|_error| ApiTokenError::InvalidFormat)?;

        let secret =
            ApiTokenSecret::from_hex(secret).ok_or(ApiTokenError::InvalidSecretEncoding)?;

        Ok(Self::new(uuid, version, secret))
    }
}

fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut out, byte| {
            // Writing to a String cannot fail.
            let _ignored = write!(out, "{byte:02x}");
            out
        })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn make_token(fill: u8) -> ApiToken {
        ApiToken::new(
            Uuid::nil(),
            ApiTokenVersion::V1,
            ApiTokenSecret::from_bytes([fill; API_TOKEN_SECRET_BYTES]),
        )
    }

    #[test]
    fn bearer_string_parses_back() -> TestResult {
        let token = ApiToken::generate();
        let bearer = token.to_bearer();
        let parsed: ApiToken = bearer.parse()?;

        assert!(bearer.starts_with("sf_v1_"), "unexpected token {bearer}");
        assert_eq!(parsed.uuid, token.uuid);
        assert_eq!(parsed.version, ApiTokenVersion::V1);
        assert_eq!(parsed.to_bearer(), bearer);

        Ok(())
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let secret = "ab".repeat(API_TOKEN_SECRET_BYTES);
        let id = Uuid::nil().simple();

        for (token, expected) in [
            ("no-dot".to_string(), "format"),
            (format!("xx_v1_{id}.{secret}"), "format"),
            (format!("sf_v1_not-a-uuid.{secret}"), "format"),
            (format!("sf_v9_{id}.{secret}"), "version"),
            (format!("sf_v1_{id}.{}", "ab".repeat(31)), "secret"),
            (format!("sf_v1_{id}.{}", "zz".repeat(32)), "secret"),
        ] {
            let result = token.parse::<ApiToken>();

            let matched = match expected {
                "format" => matches!(result, Err(ApiTokenError::InvalidFormat)),
                "version" => matches!(result, Err(ApiTokenError::UnsupportedVersion)),
                _ => matches!(result, Err(ApiTokenError::InvalidSecretEncoding)),
            };

            assert!(matched, "{token}: expected {expected} error, got {result:?}");
        }
    }

    #[test]
    fn verifier_is_bound_to_secret_and_owner() {
        let owner = UserUuid::from_uuid(Uuid::nil());
        let other_owner = UserUuid::from_uuid(Uuid::max());

        let token = make_token(0xCD);
        let stored = token.verifier(owner);

        assert_eq!(stored.len(), 64);
        assert!(token.verifies(owner, &stored), "own verifier should match");
        assert!(
            !make_token(0xCE).verifies(owner, &stored),
            "other secret must not verify"
        );
        assert!(
            !token.verifies(other_owner, &stored),
            "other owner must not verify"
        );
        assert!(!token.verifies(owner, "deadbeef"), "short hash must not verify");
    }

    #[test]
    fn secret_debug_is_redacted() {
        assert!(
            !format!("{:?}", make_token(0x11)).contains("1111"),
            "secret bytes leaked into debug output"
        );
    }
}
