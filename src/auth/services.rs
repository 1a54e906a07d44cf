use anyhow::Context;
use argon2::{password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use regex::Regex;
use tracing::{info, warn};

use super::{
    dto::Credentials,
    jwt::JwtKeys,
    repo_types::User,
};
use crate::{error::AppError, store::Store};

pub const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("argon2 hash_password")?;
    Ok(hash.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable.
pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("argon2 parse hash")?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

pub async fn signup(store: &dyn Store, creds: Credentials) -> Result<User, AppError> {
    let email = normalize_email(&creds.email);
    if email.is_empty() || creds.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::validation("Invalid email"));
    }
    if creds.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::validation("Password too short"));
    }

    if store.find_user_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&creds.password)?;
    // A concurrent signup can still win the race; the unique index reports it as Conflict.
    let user = store.create_user(&email, &hash).await?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Verifies credentials and issues a token for the user.
pub async fn authenticate(
    store: &dyn Store,
    keys: &JwtKeys,
    creds: Credentials,
) -> Result<(User, String), AppError> {
    let email = normalize_email(&creds.email);
    if email.is_empty() || creds.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let invalid = || AppError::Unauthorized("Invalid credentials".into());
    let Some(user) = store.find_user_by_email(&email).await? else {
        warn!(email = %email, "signin unknown email");
        return Err(invalid());
    };
    if !verify_password(&creds.password, &user.password_hash)? {
        warn!(user_id = %user.id, "signin invalid password");
        return Err(invalid());
    }

    let token = keys.sign(user.id)?;
    info!(user_id = %user.id, "user signed in");
    Ok((user, token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::JwtConfig, store::memory::MemoryStore};

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.into(),
            password: password.into(),
        }
    }

    fn keys() -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: "test".into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 5,
        })
    }

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("Secur3P@ssw0rd!").expect("hashing should succeed");
        assert!(verify_password("Secur3P@ssw0rd!", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.de"));
    }

    #[tokio::test]
    async fn signup_normalizes_email_and_rejects_duplicates() {
        let store = MemoryStore::new();
        let user = signup(&store, creds("  Alice@Example.COM ", "long-enough"))
            .await
            .unwrap();
        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.password_hash, "long-enough");

        let err = signup(&store, creds("alice@example.com", "another-one"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn signup_validates_input() {
        let store = MemoryStore::new();
        for (email, password) in [("", "long-enough"), ("nope", "long-enough"), ("a@b.co", "short")] {
            let err = signup(&store, creds(email, password)).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)), "{email}/{password}");
        }
    }

    #[tokio::test]
    async fn authenticate_issues_verifiable_token() {
        let store = MemoryStore::new();
        let user = signup(&store, creds("bob@example.com", "hunter2hunter2"))
            .await
            .unwrap();
        let keys = keys();

        let (signed_in, token) = authenticate(&store, &keys, creds("BOB@example.com", "hunter2hunter2"))
            .await
            .unwrap();
        assert_eq!(signed_in.id, user.id);
        assert_eq!(keys.verify(&token).unwrap().sub, user.id);
    }

    #[tokio::test]
    async fn authenticate_rejects_bad_credentials() {
        let store = MemoryStore::new();
        signup(&store, creds("bob@example.com", "hunter2hunter2"))
            .await
            .unwrap();
        let keys = keys();

        let err = authenticate(&store, &keys, creds("bob@example.com", "wrong-password"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = authenticate(&store, &keys, creds("nobody@example.com", "hunter2hunter2"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
