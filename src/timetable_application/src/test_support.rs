//! In-memory mocks of the ports, shared by the use case tests.

use std::collections::{HashMap, HashSet};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use secrecy::{ExposeSecret, Secret};
use timetable_core::{
    ApprovalCode, ApprovalCodeRecord, ApprovalCodeStore, ApprovalCodeStoreError, ApprovalPurpose,
    ApprovalSender, Email, GroupId, GroupStore, GroupStoreError, HashingError, NewUser, Password,
    PasswordHash, PasswordHasher, RegistrationCode, RegistrationCodeStore,
    RegistrationCodeStoreError, ServiceResult, User, UserId, UserRole, UserStore, UserStoreError,
};
use tokio::sync::RwLock;

pub const STRONG_PASSWORD: &str = "Abc12345!";

pub fn secret(value: &str) -> Secret<String> {
    Secret::from(value.to_string())
}

#[derive(Clone, Default)]
pub struct MockUserStore {
    pub users: Arc<RwLock<HashMap<UserId, User>>>,
    pub writes: Arc<AtomicUsize>,
}

impl MockUserStore {
    pub async fn insert(&self, email: &str, password: &str, confirmed: bool) -> UserId {
        let mut users = self.users.write().await;
        let id = UserId::new(users.len() as i32 + 1);
        let user = User::new(
            id,
            Email::parse(email).unwrap(),
            PlainHasher::hash_str(password),
            confirmed,
            UserRole::Teacher,
        );
        users.insert(id, user);
        id
    }

    pub async fn get(&self, id: UserId) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl UserStore for MockUserStore {
    async fn add_user(&self, user: NewUser) -> Result<UserId, UserStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email() == &user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let id = UserId::new(users.len() as i32 + 1);
        users.insert(id, User::from_new(id, user));
        Ok(id)
    }

    async fn email_exists(&self, email: &Email, confirmed: bool) -> Result<bool, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.email() == email && u.is_email_confirmed() == confirmed))
    }

    async fn user_exists(&self, id: UserId) -> Result<bool, UserStoreError> {
        Ok(self.users.read().await.contains_key(&id))
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|u| u.email() == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_id(&self, id: UserId) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users.get(&id).cloned().ok_or(UserStoreError::UserNotFound)
    }

    async fn update_user(&self, user: &User) -> Result<(), UserStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(&user.id())
            .ok_or(UserStoreError::UserNotFound)?;
        *stored = user.clone();
        Ok(())
    }

    async fn delete_user(&self, id: UserId) -> Result<(), UserStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.users
            .write()
            .await
            .remove(&id)
            .ok_or(UserStoreError::UserNotFound)?;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockApprovalCodeStore {
    pub codes: Arc<RwLock<HashMap<(UserId, ApprovalPurpose), ApprovalCodeRecord>>>,
}

impl MockApprovalCodeStore {
    pub async fn code_for(&self, user_id: UserId, purpose: ApprovalPurpose) -> ApprovalCode {
        self.codes.read().await[&(user_id, purpose)].code
    }
}

#[async_trait::async_trait]
impl ApprovalCodeStore for MockApprovalCodeStore {
    async fn store_code(&self, record: ApprovalCodeRecord) -> Result<(), ApprovalCodeStoreError> {
        self.codes
            .write()
            .await
            .insert((record.user_id, record.purpose), record);
        Ok(())
    }

    async fn get_code(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
    ) -> Result<ApprovalCodeRecord, ApprovalCodeStoreError> {
        self.codes
            .read()
            .await
            .get(&(user_id, purpose))
            .cloned()
            .ok_or(ApprovalCodeStoreError::CodeNotFound)
    }

    async fn revoke(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
        code: ApprovalCode,
    ) -> Result<bool, ApprovalCodeStoreError> {
        let mut codes = self.codes.write().await;
        match codes.get_mut(&(user_id, purpose)) {
            Some(record) if record.code == code && !record.revoked => {
                record.revoked = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

/// Reversible stand-in for a real hash, enough to observe that plaintext is never stored.
#[derive(Clone, Default)]
pub struct PlainHasher;

impl PlainHasher {
    pub fn hash_str(password: &str) -> PasswordHash {
        PasswordHash::new(secret(&format!("hashed:{password}")))
    }
}

#[async_trait::async_trait]
impl PasswordHasher for PlainHasher {
    async fn hash(&self, password: Password) -> Result<PasswordHash, HashingError> {
        Ok(Self::hash_str(password.as_ref().expose_secret()))
    }

    async fn verify(&self, hash: &PasswordHash, candidate: &Password) -> Result<bool, HashingError> {
        Ok(hash.as_ref().expose_secret()
            == Self::hash_str(candidate.as_ref().expose_secret())
                .as_ref()
                .expose_secret())
    }
}

#[derive(Clone, Default)]
pub struct MockRegistrationCodeStore {
    pub codes: Arc<RwLock<Vec<RegistrationCode>>>,
    pub calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl RegistrationCodeStore for MockRegistrationCodeStore {
    async fn add_codes(
        &self,
        codes: Vec<RegistrationCode>,
    ) -> Result<(), RegistrationCodeStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.codes.write().await.extend(codes);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockGroupStore {
    pub groups: Arc<HashSet<GroupId>>,
    pub calls: Arc<AtomicUsize>,
}

impl MockGroupStore {
    pub fn with_groups(ids: &[i32]) -> Self {
        Self {
            groups: Arc::new(ids.iter().copied().map(GroupId::new).collect()),
            calls: Arc::default(),
        }
    }
}

#[async_trait::async_trait]
impl GroupStore for MockGroupStore {
    async fn group_exists(&self, id: GroupId) -> Result<bool, GroupStoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.groups.contains(&id))
    }
}

/// Sender that records every request and answers with a fixed outcome.
#[derive(Clone)]
pub struct MockApprovalSender {
    pub succeed: bool,
    pub registration_requests: Arc<RwLock<Vec<Email>>>,
    pub approval_requests: Arc<RwLock<Vec<(UserId, ApprovalPurpose)>>>,
}

impl MockApprovalSender {
    pub fn new(succeed: bool) -> Self {
        Self {
            succeed,
            registration_requests: Arc::default(),
            approval_requests: Arc::default(),
        }
    }

    fn outcome(&self) -> ServiceResult {
        if self.succeed {
            ServiceResult::ok("sent")
        } else {
            ServiceResult::fail("transport down")
        }
    }
}

#[async_trait::async_trait]
impl ApprovalSender for MockApprovalSender {
    async fn send_registration_code(&self, email: &Email) -> ServiceResult {
        self.registration_requests.write().await.push(email.clone());
        self.outcome()
    }

    async fn send_approval_code(&self, user_id: UserId, purpose: ApprovalPurpose) -> ServiceResult {
        self.approval_requests.write().await.push((user_id, purpose));
        self.outcome()
    }
}
