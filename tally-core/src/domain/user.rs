//! User and admin domain models
//!
//! An [`Admin`] is a [`User`] with credentials attached. It holds the user
//! by value and forwards the user behavior, rather than duplicating it.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

use super::document::is_blank;
use super::result::{Error, Result};

/// Argon2id cost parameters for admin passwords
const ARGON2_MEMORY_KIB: u32 = 19 * 1024;
const ARGON2_TIME_COST: u32 = 2;
const ARGON2_PARALLELISM: u32 = 1;
const PASSWORD_HASH_LEN: usize = 32;
const SALT_LEN: usize = 16;

/// A person using the app. Lives only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    first_name: String,
    last_name: String,
    birth_date: String,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Result<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let birth_date = birth_date.into();

        if is_blank(&first_name) || is_blank(&last_name) || is_blank(&birth_date) {
            return Err(Error::validation(
                "First name, last name and birthdate are required.",
            ));
        }

        Ok(Self {
            first_name,
            last_name,
            birth_date,
            created_at: Utc::now(),
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn birth_date(&self) -> &str {
        &self.birth_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// `"<first> <last> <birthdate>"`
    pub fn output_details(&self) -> String {
        format!("{} {} {}", self.first_name, self.last_name, self.birth_date)
    }

    /// Blank out first and last name. Birthdate and creation time stay.
    pub fn clear_user_name(&mut self) {
        self.first_name.clear();
        self.last_name.clear();
    }
}

/// An administrator: a [`User`] plus an email and a password.
#[derive(Debug, Clone)]
pub struct Admin {
    email: String,
    password: PasswordHash,
    user: User,
}

#[derive(Clone)]
struct PasswordHash {
    salt: [u8; SALT_LEN],
    hash: Vec<u8>,
}

// Never print hash material, even in debug output.
impl std::fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

impl PasswordHash {
    fn new(password: &str) -> Result<Self> {
        let salt: [u8; SALT_LEN] = rand::thread_rng().gen();
        let hash = derive(password, &salt)?;
        Ok(Self { salt, hash })
    }

    fn verify(&self, candidate: &str) -> bool {
        match derive(candidate, &self.salt) {
            Ok(hash) => constant_time_eq(&hash, &self.hash),
            Err(_) => false,
        }
    }
}

fn derive(password: &str, salt: &[u8]) -> Result<Vec<u8>> {
    let params = argon2::Params::new(
        ARGON2_MEMORY_KIB,
        ARGON2_TIME_COST,
        ARGON2_PARALLELISM,
        Some(PASSWORD_HASH_LEN),
    )
    .map_err(|e| Error::Other(format!("Failed to create argon2 params: {:?}", e)))?;

    let argon2 = argon2::Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut out = vec![0u8; PASSWORD_HASH_LEN];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut out)
        .map_err(|e| Error::Other(format!("Failed to hash password: {:?}", e)))?;
    Ok(out)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl Admin {
    /// Create an admin with placeholder user details (`ADMIN ADMIN ---`)
    pub fn new(email: impl Into<String>, password: &str) -> Result<Self> {
        let email = email.into();
        if is_blank(&email) || password.is_empty() {
            return Err(Error::validation("Email and password are required."));
        }

        Ok(Self {
            email,
            password: PasswordHash::new(password)?,
            user: User {
                first_name: "ADMIN".to_string(),
                last_name: "ADMIN".to_string(),
                birth_date: "---".to_string(),
                created_at: Utc::now(),
            },
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn output_details(&self) -> String {
        self.user.output_details()
    }

    pub fn clear_user_name(&mut self) {
        self.user.clear_user_name();
    }
}

impl AsRef<User> for Admin {
    fn as_ref(&self) -> &User {
        &self.user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("Alice", "Smith", "05/15/1990").unwrap();
        assert_eq!(user.first_name(), "Alice");
        assert_eq!(user.output_details(), "Alice Smith 05/15/1990");
    }

    #[test]
    fn test_user_requires_all_fields() {
        for (first, last, birth) in [("", "Smith", "x"), ("A", "", "x"), ("A", "B", " ")] {
            let err = User::new(first, last, birth).unwrap_err();
            assert_eq!(
                err.to_string(),
                "First name, last name and birthdate are required."
            );
        }
    }

    #[test]
    fn test_clear_user_name_keeps_birth_date() {
        let mut user = User::new("Alice", "Smith", "05/15/1990").unwrap();
        user.clear_user_name();
        assert_eq!(user.first_name(), "");
        assert_eq!(user.last_name(), "");
        assert_eq!(user.output_details(), "  05/15/1990");
    }

    #[test]
    fn test_admin_embeds_placeholder_user() {
        let admin = Admin::new("test@example.com", "test123").unwrap();
        assert_eq!(admin.email(), "test@example.com");
        assert_eq!(admin.output_details(), "ADMIN ADMIN ---");
        assert_eq!(admin.as_ref().first_name(), "ADMIN");
    }

    #[test]
    fn test_admin_clear_user_name_reaches_user() {
        let mut admin = Admin::new("test@example.com", "test123").unwrap();
        admin.clear_user_name();
        assert_eq!(admin.user().output_details(), "  ---");
    }

    #[test]
    fn test_admin_password_check() {
        let admin = Admin::new("test@example.com", "test123").unwrap();
        assert!(admin.check_password("test123"));
        assert!(!admin.check_password("test124"));
        assert!(!admin.check_password(""));
    }

    #[test]
    fn test_admin_debug_hides_password() {
        let admin = Admin::new("test@example.com", "hunter2").unwrap();
        let debug = format!("{:?}", admin);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("PasswordHash(..)"));
    }

    #[test]
    fn test_admin_requires_credentials() {
        assert!(Admin::new("", "pw").is_err());
        assert!(Admin::new("a@b.c", "").is_err());
    }
}
