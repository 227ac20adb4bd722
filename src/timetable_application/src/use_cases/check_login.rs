use std::sync::Arc;

use secrecy::Secret;
use timetable_core::{
    Email, Password, PasswordHasher, ServiceResult, User, UserStore, UserStoreError,
};

use crate::{error::AccountError, messages::Messages};

/// Check login use case - verifies a credential pair against the stored account
pub struct CheckLoginUseCase<U, H>
where
    U: UserStore,
    H: PasswordHasher,
{
    user_store: U,
    hasher: H,
    messages: Arc<Messages>,
}

impl<U, H> CheckLoginUseCase<U, H>
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

    /// Execute the check login use case
    ///
    /// # Returns
    /// The stored user on success. Nothing is written.
    #[tracing::instrument(name = "CheckLoginUseCase::execute", skip(self, email, password))]
    pub async fn execute(
        &self,
        email: &str,
        password: Secret<String>,
    ) -> Result<ServiceResult<User>, AccountError> {
        let Ok(email) = Email::parse(email) else {
            return Ok(ServiceResult::fail(&self.messages.invalid_email));
        };
        let Ok(password) = Password::try_from(password) else {
            return Ok(ServiceResult::fail(&self.messages.weak_password));
        };

        let user = match self.user_store.get_user_by_email(&email).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => {
                return Ok(ServiceResult::fail(&self.messages.login_user_not_found));
            }
            Err(e) => return Err(e.into()),
        };

        if !user.is_email_confirmed() {
            return Ok(ServiceResult::fail(&self.messages.login_email_not_confirmed));
        }
        if user.password_hash().is_empty() {
            tracing::warn!(user_id = %user.id(), "Stored password hash is blank");
            return Ok(ServiceResult::fail(&self.messages.login_password_empty));
        }

        if self.hasher.verify(user.password_hash(), &password).await? {
            Ok(ServiceResult::ok_with(
                &self.messages.login_password_accepted,
                user,
            ))
        } else {
            Ok(ServiceResult::fail(&self.messages.login_password_wrong))
        }
    }
}
