//! Player password digests.
//!
//! Clients hash the player's password with MD5 and submit the hex digest.
//! The service stores and compares digests only; comparison ignores case.

use std::fmt;

use md5::{Digest, Md5};

use super::names::FieldError;

/// Length of an MD5 digest rendered as hexadecimal.
pub const DIGEST_LEN: usize = 32;

/// Lowercase hexadecimal MD5 digest.
///
/// The [`fmt::Debug`] output is redacted so digests never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Validate a client-supplied digest, normalising it to lowercase.
    ///
    /// # Examples
    /// ```
    /// use gamescoreservice::domain::PasswordDigest;
    ///
    /// let upper = PasswordDigest::new("0CC175B9C0F1B6A831C399E269772661").unwrap();
    /// let lower = PasswordDigest::new("0cc175b9c0f1b6a831c399e269772661").unwrap();
    /// assert_eq!(upper, lower);
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self, FieldError> {
        let value = value.as_ref();
        if value.len() != DIGEST_LEN || !value.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(FieldError::InvalidPassword);
        }
        Ok(Self(value.to_ascii_lowercase()))
    }

    /// Digest of a plaintext password, as a client would compute it.
    pub fn of_plaintext(plaintext: &str) -> Self {
        Self(hex::encode(Md5::digest(plaintext.as_bytes())))
    }

    /// Whether `candidate` matches this digest.
    pub fn verify(&self, candidate: &Self) -> bool {
        self.0 == candidate.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
