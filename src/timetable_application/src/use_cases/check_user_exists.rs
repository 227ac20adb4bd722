use std::sync::Arc;

use timetable_core::{ServiceResult, UserId, UserStore};

use crate::{error::AccountError, messages::Messages};

pub struct CheckUserExistsUseCase<U>
where
    U: UserStore,
{
    user_store: U,
    messages: Arc<Messages>,
}

impl<U> CheckUserExistsUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U, messages: Arc<Messages>) -> Self {
        Self {
            user_store,
            messages,
        }
    }

    #[tracing::instrument(name = "CheckUserExistsUseCase::execute", skip(self))]
    pub async fn execute(&self, user_id: UserId) -> Result<ServiceResult, AccountError> {
        if user_id.is_unset() {
            return Ok(ServiceResult::fail(&self.messages.user_id_unset));
        }

        if self.user_store.user_exists(user_id).await? {
            Ok(ServiceResult::ok(&self.messages.user_found))
        } else {
            Ok(ServiceResult::fail(&self.messages.user_not_found))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockUserStore, STRONG_PASSWORD};

    #[tokio::test]
    async fn test_check_user_exists() {
        let store = MockUserStore::default();
        let id = store.insert("user@school.ru", STRONG_PASSWORD, false).await;
        let use_case = CheckUserExistsUseCase::new(store, Arc::new(Messages::default()));

        assert!(use_case.execute(id).await.unwrap().success);

        let missing = use_case.execute(UserId::new(77)).await.unwrap();
        assert_eq!(missing.description, Messages::default().user_not_found);

        let unset = use_case.execute(UserId::new(0)).await.unwrap();
        assert_eq!(unset.description, Messages::default().user_id_unset);
    }
}
