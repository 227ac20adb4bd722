use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use secrecy::ExposeSecret;
use timetable_core::{RegistrationCode, RegistrationCodeStore, RegistrationCodeStoreError};

#[derive(Default, Clone)]
pub struct HashMapRegistrationCodeStore {
    codes: Arc<RwLock<HashMap<String, RegistrationCode>>>,
}

impl HashMapRegistrationCodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.codes.read().await.len()
    }

    pub async fn get(&self, secret_key: &str) -> Option<RegistrationCode> {
        self.codes.read().await.get(secret_key).cloned()
    }
}

#[async_trait::async_trait]
impl RegistrationCodeStore for HashMapRegistrationCodeStore {
    async fn add_codes(
        &self,
        codes: Vec<RegistrationCode>,
    ) -> Result<(), RegistrationCodeStoreError> {
        let mut stored = self.codes.write().await;
        // All or nothing, like the single INSERT of the SQL store.
        if codes
            .iter()
            .any(|c| stored.contains_key(c.secret_key().expose_secret()))
        {
            return Err(RegistrationCodeStoreError::DuplicateKey);
        }
        for code in codes {
            stored.insert(code.secret_key().expose_secret().clone(), code);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use timetable_core::Role;

    #[tokio::test]
    async fn test_duplicate_key_rejects_whole_batch() {
        let store = HashMapRegistrationCodeStore::new();
        let first = RegistrationCode::issue(Role::Teacher, None, Utc::now()).unwrap();
        store.add_codes(vec![first.clone()]).await.unwrap();

        let fresh = RegistrationCode::issue(Role::Admin, None, Utc::now()).unwrap();
        let result = store.add_codes(vec![fresh.clone(), first]).await;

        assert!(matches!(result, Err(RegistrationCodeStoreError::DuplicateKey)));
        assert_eq!(store.len().await, 1);
        assert!(store.get(fresh.secret_key().expose_secret()).await.is_none());
    }
}
