use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{
    email::{Email, EmailError},
    group::GroupId,
    password::PasswordHash,
};

/// Identifier of a user row. Zero means "not assigned".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(i32);

impl UserId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role code {0}")]
    UnknownRole(i32),
    #[error("Student role requires a group")]
    MissingGroup,
}

/// Role discriminant as stored and as received from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum Role {
    Student = 1,
    Teacher = 2,
    Admin = 3,
}

impl Role {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Role {
    type Error = RoleError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Student),
            2 => Ok(Self::Teacher),
            3 => Ok(Self::Admin),
            other => Err(RoleError::UnknownRole(other)),
        }
    }
}

/// Role of an account together with the data only that role carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Student { group_id: GroupId },
    Teacher,
    Admin,
}

impl UserRole {
    pub fn from_parts(role: i32, group_id: Option<i32>) -> Result<Self, RoleError> {
        match Role::try_from(role)? {
            Role::Student => group_id
                .map(|id| Self::Student {
                    group_id: GroupId::new(id),
                })
                .ok_or(RoleError::MissingGroup),
            Role::Teacher => Ok(Self::Teacher),
            Role::Admin => Ok(Self::Admin),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Self::Student { .. } => Role::Student,
            Self::Teacher => Role::Teacher,
            Self::Admin => Role::Admin,
        }
    }

    pub fn group_id(&self) -> Option<GroupId> {
        match self {
            Self::Student { group_id } => Some(*group_id),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

/// Account that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: PasswordHash,
    pub role: UserRole,
}

/// Persisted account.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    email: Email,
    password_hash: PasswordHash,
    is_email_confirmed: bool,
    role: UserRole,
}

impl User {
    pub fn new(
        id: UserId,
        email: Email,
        password_hash: PasswordHash,
        is_email_confirmed: bool,
        role: UserRole,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            is_email_confirmed,
            role,
        }
    }

    /// Rebuilds a user from raw stored columns, re-validating every invariant.
    pub fn parse(
        id: i32,
        email: Secret<String>,
        password_hash: Secret<String>,
        is_email_confirmed: bool,
        role: i32,
        group_id: Option<i32>,
    ) -> Result<Self, UserError> {
        Ok(Self {
            id: UserId::new(id),
            email: Email::try_from(email)?,
            password_hash: PasswordHash::new(password_hash),
            is_email_confirmed,
            role: UserRole::from_parts(role, group_id)?,
        })
    }

    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        Self::new(id, new_user.email, new_user.password_hash, false, new_user.role)
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn is_email_confirmed(&self) -> bool {
        self.is_email_confirmed
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn confirm_email(&mut self) {
        self.is_email_confirmed = true;
    }

    pub fn set_email(&mut self, email: Email) {
        self.email = email;
    }

    pub fn set_password_hash(&mut self, password_hash: PasswordHash) {
        self.password_hash = password_hash;
    }

    /// Checks the invariants a stored row must always satisfy.
    pub fn revalidate(&self) -> Result<(), UserError> {
        Email::try_from(self.email.as_ref().clone())?;
        UserRole::from_parts(
            self.role.role().code(),
            self.role.group_id().map(|id| id.value()),
        )?;
        Ok(())
    }

    pub fn email_str(&self) -> &str {
        self.email.as_ref().expose_secret()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_codes_round_trip() {
        for role in [Role::Student, Role::Teacher, Role::Admin] {
            assert_eq!(Role::try_from(role.code()), Ok(role));
        }
        assert_eq!(Role::try_from(0), Err(RoleError::UnknownRole(0)));
        assert_eq!(Role::try_from(4), Err(RoleError::UnknownRole(4)));
    }

    #[test]
    fn student_role_needs_group() {
        assert_eq!(UserRole::from_parts(1, None), Err(RoleError::MissingGroup));
        assert_eq!(
            UserRole::from_parts(1, Some(7)),
            Ok(UserRole::Student {
                group_id: GroupId::new(7)
            })
        );
    }

    #[test]
    fn non_student_roles_ignore_group() {
        assert_eq!(UserRole::from_parts(2, Some(7)), Ok(UserRole::Teacher));
        assert_eq!(UserRole::Admin.group_id(), None);
    }

    #[test]
    fn parse_rejects_corrupt_email() {
        let result = User::parse(
            1,
            Secret::from("not-an-email".to_string()),
            Secret::from("hash".to_string()),
            true,
            2,
            None,
        );
        assert!(matches!(result, Err(UserError::Email(EmailError::InvalidFormat))));
    }

    #[test]
    fn new_users_start_unconfirmed() {
        let new_user = NewUser {
            email: Email::parse("a@b.co").unwrap(),
            password_hash: PasswordHash::new(Secret::from("hash".to_string())),
            role: UserRole::Teacher,
        };
        let mut user = User::from_new(UserId::new(3), new_user);
        assert!(!user.is_email_confirmed());
        user.confirm_email();
        assert!(user.is_email_confirmed());
        assert!(user.revalidate().is_ok());
    }
}
