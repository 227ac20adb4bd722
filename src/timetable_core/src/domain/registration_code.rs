use chrono::{DateTime, Duration, Utc};
use rand::{Rng, distr::Alphanumeric};
use secrecy::Secret;

use super::{
    group::GroupId,
    user::{Role, RoleError},
};

/// Days a registration code stays valid after it is issued.
pub const REGISTRATION_CODE_VALIDITY_DAYS: i64 = 14;

/// Length of a generated secret key.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Upper bound of codes issued by a single request.
pub const MAX_CODES_PER_REQUEST: i32 = 1000;

/// Pre-issued grant allowing its holder to register with a given role.
#[derive(Debug, Clone)]
pub struct RegistrationCode {
    secret_key: Secret<String>,
    desired_role: Role,
    student_group_id: Option<GroupId>,
    expires_at: DateTime<Utc>,
}

impl RegistrationCode {
    /// Issues a code with a fresh secret key, valid for
    /// [`REGISTRATION_CODE_VALIDITY_DAYS`] from `now`.
    ///
    /// Student grants must name a group; other roles never carry one.
    pub fn issue(
        desired_role: Role,
        student_group_id: Option<GroupId>,
        now: DateTime<Utc>,
    ) -> Result<Self, RoleError> {
        Self::from_parts(
            generate_secret_key(),
            desired_role,
            student_group_id,
            now + Duration::days(REGISTRATION_CODE_VALIDITY_DAYS),
        )
    }

    pub fn from_parts(
        secret_key: Secret<String>,
        desired_role: Role,
        student_group_id: Option<GroupId>,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, RoleError> {
        let student_group_id = match desired_role {
            Role::Student => Some(student_group_id.ok_or(RoleError::MissingGroup)?),
            Role::Teacher | Role::Admin => None,
        };

        Ok(Self {
            secret_key,
            desired_role,
            student_group_id,
            expires_at,
        })
    }

    pub fn secret_key(&self) -> &Secret<String> {
        &self.secret_key
    }

    pub fn desired_role(&self) -> Role {
        self.desired_role
    }

    pub fn student_group_id(&self) -> Option<GroupId> {
        self.student_group_id
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

pub fn generate_secret_key() -> Secret<String> {
    let key: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_KEY_LENGTH)
        .map(char::from)
        .collect();
    Secret::from(key)
}
