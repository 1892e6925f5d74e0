//! Account signup. Accounts are validated and hashed but not stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{required, ValidationError};

/// Shortest accepted password, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const HASH_SCHEME: &str = "sha256";
const HASH_ROUNDS: u32 = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Patient,
    Provider,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub role: UserRole,
}

/// What the signup endpoint returns. Never includes the hash.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    /// Providers start unverified; verification happens out of band.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<&'static str>,
    pub created_at: DateTime<Utc>,
}

impl SignupRequest {
    /// Validate the request, returning the summary and the password hash.
    pub fn register(
        self,
        id: String,
        salt: &str,
        now: DateTime<Utc>,
    ) -> Result<(UserSummary, String), ValidationError> {
        let missing = || ValidationError::new("Name, email and password are required");
        let name = required(self.name, "name").map_err(|_| missing())?;
        let email = required(self.email, "email").map_err(|_| missing())?;
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .ok_or_else(missing)?;

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::new(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let hash = hash_password(&password, salt);
        let verification_status = match self.role {
            UserRole::Provider => Some("pending"),
            UserRole::Patient => None,
        };

        Ok((
            UserSummary {
                id,
                name,
                email: email.to_lowercase(),
                role: self.role,
                verification_status,
                created_at: now,
            },
            hash,
        ))
    }
}

/// Salted, iterated SHA-256 in `sha256$<rounds>$<salt>$<hex>` form.
///
/// Placeholder until accounts are stored: not a memory-hard KDF, so swap it
/// for one before any hash is persisted. CPU-bound; call it off the async
/// executor.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut digest = Sha256::new()
        .chain_update(salt.as_bytes())
        .chain_update(password.as_bytes())
        .finalize();
    for _ in 1..HASH_ROUNDS {
        digest = Sha256::new()
            .chain_update(digest)
            .chain_update(password.as_bytes())
            .finalize();
    }
    format!(
        "{}${}${}${}",
        HASH_SCHEME,
        HASH_ROUNDS,
        salt,
        hex::encode(digest)
    )
}

/// Check a password against a hash produced by [`hash_password`].
#[cfg(test)]
fn verify_password(password: &str, encoded: &str) -> bool {
    let mut parts = encoded.splitn(4, '$');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(HASH_SCHEME), Some(rounds), Some(salt), Some(_))
            if rounds == HASH_ROUNDS.to_string() =>
        {
            hash_password(password, salt) == encoded
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(password: &str) -> SignupRequest {
        SignupRequest {
            name: Some("Abebe".into()),
            email: Some("Abebe@Example.com".into()),
            password: Some(password.into()),
            role: UserRole::Patient,
        }
    }

    #[test]
    fn seven_chars_is_too_short() {
        let err = request("1234567")
            .register("usr_1".into(), "salt", Utc::now())
            .unwrap_err();
        assert_eq!(err.0, "Password must be at least 8 characters");
    }

    #[test]
    fn eight_chars_is_accepted() {
        let (user, hash) = request("12345678")
            .register("usr_1".into(), "salt", Utc::now())
            .unwrap();
        assert_eq!(user.email, "abebe@example.com");
        assert!(verify_password("12345678", &hash));
        assert!(!verify_password("12345679", &hash));
    }

    #[test]
    fn missing_fields_are_rejected() {
        let req = SignupRequest {
            password: Some("longenough".into()),
            ..Default::default()
        };
        assert_eq!(
            req.register("usr_1".into(), "salt", Utc::now()).unwrap_err().0,
            "Name, email and password are required"
        );
    }

    #[test]
    fn providers_start_pending() {
        let req = SignupRequest {
            role: UserRole::Provider,
            ..request("password1")
        };
        let (user, _) = req.register("usr_2".into(), "salt", Utc::now()).unwrap();
        assert_eq!(user.verification_status, Some("pending"));
    }

    #[test]
    fn hash_depends_on_salt() {
        assert_ne!(hash_password("secret123", "a"), hash_password("secret123", "b"));
        assert!(hash_password("secret123", "a").starts_with("sha256$10000$a$"));
    }
}
