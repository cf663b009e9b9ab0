//! Registered users and their stored credentials.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::ValidationError;

/// Store-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(ValidationError::new(
                "user_id",
                format!("'{s}' is not a positive user identifier"),
            )),
        }
    }
}

/// A salted SHA-256 digest of a user's secret.
///
/// Stored as `sha256$<salt>$<hex digest>`. The clear secret is never kept.
///
/// # Examples
///
/// ```
/// use roombook::user::Credential;
///
/// let credential = Credential::hash("correct horse").unwrap();
/// assert!(credential.verify("correct horse"));
/// assert!(!credential.verify("battery staple"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

const CREDENTIAL_SCHEME: &str = "sha256";

impl Credential {
    /// Hashes `secret` with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty.
    pub fn hash(secret: &str) -> Result<Self, ValidationError> {
        if secret.is_empty() {
            return Err(ValidationError::new("password", "must not be empty"));
        }
        let salt = Uuid::new_v4().simple().to_string();
        Ok(Self::with_salt(&salt, secret))
    }

    fn with_salt(salt: &str, secret: &str) -> Self {
        Self(format!(
            "{CREDENTIAL_SCHEME}${salt}${}",
            digest_hex(salt, secret)
        ))
    }

    /// Reconstructs a credential read back from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if `stored` is not in the `sha256$salt$digest` form.
    pub fn from_stored(stored: &str) -> Result<Self, ValidationError> {
        let mut parts = stored.splitn(3, '$');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(CREDENTIAL_SCHEME), Some(salt), Some(digest))
                if !salt.is_empty() && digest.len() == 64 =>
            {
                Ok(Self(stored.to_string()))
            }
            _ => Err(ValidationError::new(
                "credential",
                "unrecognized credential format",
            )),
        }
    }

    /// Returns true if `secret` hashes to this credential.
    #[must_use]
    pub fn verify(&self, secret: &str) -> bool {
        match self.0.split('$').nth(1) {
            Some(salt) => Self::with_salt(salt, secret) == *self,
            None => false,
        }
    }

    /// The encoded form written to the store.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(..)")
    }
}

fn digest_hex(salt: &str, secret: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(secret.as_bytes());
    hasher
        .finalize()
        .iter()
        .fold(String::with_capacity(64), |mut out, byte| {
            let _ = write!(out, "{byte:02x}");
            out
        })
}

/// A registered user as read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, unique ignoring case.
    pub email: String,
    /// When the user registered.
    pub created_at: NaiveDateTime,
}

/// A validated registration request.
///
/// # Examples
///
/// ```
/// use roombook::NewUser;
///
/// let user = NewUser::new("Ada", "ada@example.com", "s3cret").unwrap();
/// assert_eq!(user.name(), "Ada");
/// assert!(NewUser::new("Ada", "not-an-email", "s3cret").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NewUser {
    name: String,
    email: String,
    email_key: String,
    credential: Credential,
}

impl NewUser {
    /// Validates the fields and hashes the secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank, the email is not of the form
    /// `local@domain`, or the secret is empty.
    pub fn new(name: &str, email: &str, secret: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::new(
                "name",
                "must be non-empty after trimming whitespace",
            ));
        }

        let email = email.trim();
        validate_email(email)?;

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            email_key: email_key(email),
            credential: Credential::hash(secret)?,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email as entered (trimmed).
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Lowercase form of the email used for uniqueness and lookup.
    #[must_use]
    pub fn email_key(&self) -> &str {
        &self.email_key
    }

    /// Hashed secret.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}

/// Folds an email address to the key it is stored and looked up under.
///
/// Lowercases with full Unicode rules, so `ÉMILE@x` and `émile@x` share a key.
///
/// # Examples
///
/// ```
/// use roombook::user::email_key;
///
/// assert_eq!(email_key(" Ada@Example.COM "), "ada@example.com");
/// assert_eq!(email_key("ÉMILE@example.com"), "émile@example.com");
/// ```
#[must_use]
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let mut parts = email.split('@');
    let valid = matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(local), Some(domain), None) if !local.is_empty() && !domain.is_empty()
    ) && !email.chars().any(char::is_whitespace);

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(
            "email",
            format!("'{email}' is not a valid email address"),
        ))
    }
}
