use std::sync::Arc;

use secrecy::Secret;
use timetable_core::{
    Email, NewUser, Password, PasswordHasher, ServiceResult, UserId, UserRole, UserStore,
    UserStoreError,
};

use crate::{error::AccountError, messages::Messages};

/// Register use case - stores a new, unconfirmed account
pub struct RegisterUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: U,
    hasher: H,
    messages: Arc<Messages>,
}

impl<U, H> RegisterUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    pub fn new(user_store: U, hasher: H, messages: Arc<Messages>) -> Self {
        Self {
            user_store,
            hasher,
            messages,
        }
    }

    /// Execute the register use case
    ///
    /// # Arguments
    /// * `email` - Raw email address
    /// * `password` - Raw password, hashed before it is stored
    /// * `role` - Role of the new account
    ///
    /// # Returns
    /// The id of the new user on success. A collision with a confirmed account is
    /// reported before a collision with an unconfirmed one.
    #[tracing::instrument(name = "RegisterUseCase::execute", skip(self, email, password))]
    pub async fn execute(
        &self,
        email: &str,
        password: Secret<String>,
        role: UserRole,
    ) -> Result<ServiceResult<UserId>, AccountError> {
        let Ok(email) = Email::parse(email) else {
            return Ok(ServiceResult::fail(&self.messages.invalid_email));
        };
        let Ok(password) = Password::try_from(password) else {
            return Ok(ServiceResult::fail(&self.messages.weak_password));
        };

        if self.user_store.email_exists(&email, true).await? {
            return Ok(ServiceResult::fail(&self.messages.email_taken_confirmed));
        }
        if self.user_store.email_exists(&email, false).await? {
            return Ok(ServiceResult::fail(&self.messages.email_taken_unconfirmed));
        }

        let password_hash = self.hasher.hash(password).await?;
        let new_user = NewUser {
            email,
            password_hash,
            role,
        };

        match self.user_store.add_user(new_user).await {
            Ok(user_id) => {
                tracing::info!(%user_id, "User registered with unconfirmed email");
                Ok(ServiceResult::ok_with(&self.messages.user_registered, user_id))
            }
            // The store's uniqueness constraint is the final arbiter of concurrent sign-ups.
            Err(UserStoreError::UserAlreadyExists) => {
                Ok(ServiceResult::fail(&self.messages.email_taken_confirmed))
            }
            Err(e) => Err(e.into()),
        }
    }
}
