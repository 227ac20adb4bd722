use argon2::{
    Algorithm, Argon2, Params, PasswordHash as Argon2Hash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use secrecy::{ExposeSecret, Secret};
use timetable_core::{HashingError, Password, PasswordHash, PasswordHasher};

/// Argon2id hasher. Hashing runs on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl PasswordHasher for Argon2Hasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<PasswordHash, HashingError> {
        let current_span: tracing::Span = tracing::Span::current();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()
                    .map_err(HashingError::HashError)?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| PasswordHash::new(Secret::from(h.to_string())))
                    .map_err(|e| HashingError::HashError(e.to_string()))
            })
        })
        .await
        .map_err(|e| HashingError::HashError(e.to_string()))?;

        result
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn verify(&self, hash: &PasswordHash, candidate: &Password) -> Result<bool, HashingError> {
        let current_span: tracing::Span = tracing::Span::current();
        let expected_password_hash = hash.as_ref().clone();
        let password_candidate = candidate.clone();

        let result = tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_password_hash = Argon2Hash::new(expected_password_hash.expose_secret())
                    .map_err(|e| HashingError::VerifyError(e.to_string()))?;

                match argon2()
                    .map_err(HashingError::VerifyError)?
                    .verify_password(
                        password_candidate.as_ref().expose_secret().as_bytes(),
                        &expected_password_hash,
                    ) {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(HashingError::VerifyError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| HashingError::VerifyError(e.to_string()))?;

        result
    }
}

fn argon2() -> Result<Argon2<'static>, String> {
    Ok(Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None).map_err(|e| e.to_string())?,
    ))
}
