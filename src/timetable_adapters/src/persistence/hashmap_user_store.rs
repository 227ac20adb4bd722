use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use timetable_core::{Email, NewUser, User, UserId, UserStore, UserStoreError};

#[derive(Default)]
struct Users {
    by_id: HashMap<UserId, User>,
    next_id: i32,
}

/// In-memory user store. Emails are unique across confirmed and unconfirmed accounts.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<Users>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: NewUser) -> Result<UserId, UserStoreError> {
        let mut users = self.users.write().await;
        if users.by_id.values().any(|u| u.email() == &user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.next_id += 1;
        let id = UserId::new(users.next_id);
        users.by_id.insert(id, User::from_new(id, user));
        Ok(id)
    }

    async fn email_exists(&self, email: &Email, confirmed: bool) -> Result<bool, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .by_id
            .values()
            .any(|u| u.email() == email && u.is_email_confirmed() == confirmed))
    }

    async fn user_exists(&self, id: UserId) -> Result<bool, UserStoreError> {
        Ok(self.users.read().await.by_id.contains_key(&id))
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_id
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .by_id
            .get(&id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn update_user(&self, user: &User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .by_id
            .values()
            .any(|u| u.id() != user.id() && u.email() == user.email())
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let stored = users
            .by_id
            .get_mut(&user.id())
            .ok_or(UserStoreError::UserNotFound)?;
        *stored = user.clone();
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        users.by_id.remove(&id).ok_or(UserStoreError::UserNotFound)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::Secret;
    use timetable_core::{PasswordHash, UserRole};

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: Email::parse(email).unwrap(),
            password_hash: PasswordHash::new(Secret::from("hash".to_string())),
            role: UserRole::Teacher,
        }
    }

    #[tokio::test]
    async fn test_add_user() {
        let store = HashMapUserStore::new();
        let id = store.add_user(new_user("a@school.ru")).await.unwrap();

        assert!(store.user_exists(id).await.unwrap());
        let result = store.add_user(new_user("a@school.ru")).await;
        assert_eq!(result, Err(UserStoreError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = HashMapUserStore::new();
        let first = store.add_user(new_user("a@school.ru")).await.unwrap();
        store.delete_user(first).await.unwrap();
        let second = store.add_user(new_user("b@school.ru")).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(
            store.get_user_by_id(first).await.unwrap_err(),
            UserStoreError::UserNotFound
        );
    }

    #[tokio::test]
    async fn test_email_exists_respects_confirmation() {
        let store = HashMapUserStore::new();
        let id = store.add_user(new_user("a@school.ru")).await.unwrap();
        let email = Email::parse("a@school.ru").unwrap();

        assert!(store.email_exists(&email, false).await.unwrap());
        assert!(!store.email_exists(&email, true).await.unwrap());

        let mut user = store.get_user_by_id(id).await.unwrap();
        user.confirm_email();
        store.update_user(&user).await.unwrap();

        assert!(store.email_exists(&email, true).await.unwrap());
        assert!(!store.email_exists(&email, false).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_to_taken_email_fails() {
        let store = HashMapUserStore::new();
        store.add_user(new_user("a@school.ru")).await.unwrap();
        let id = store.add_user(new_user("b@school.ru")).await.unwrap();

        let mut user = store.get_user_by_id(id).await.unwrap();
        user.set_email(Email::parse("a@school.ru").unwrap());

        assert_eq!(
            store.update_user(&user).await,
            Err(UserStoreError::UserAlreadyExists)
        );
    }
}
