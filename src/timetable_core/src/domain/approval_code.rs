use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::user::UserId;

/// Numeric one-time code. Zero is never issued and never accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApprovalCode(u32);

impl ApprovalCode {
    pub fn new(code: u32) -> Self {
        Self(code)
    }

    /// Generates a random six-digit code.
    pub fn generate() -> Self {
        Self(rand::rng().random_range(100_000..1_000_000))
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for ApprovalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown approval purpose {0}")]
pub struct UnknownPurpose(pub String);

/// Action an approval code authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApprovalPurpose {
    Registration,
    Unregistration,
    UpdateEmail,
    UpdatePassword,
}

impl ApprovalPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::Unregistration => "unregistration",
            Self::UpdateEmail => "update_email",
            Self::UpdatePassword => "update_password",
        }
    }
}

impl std::str::FromStr for ApprovalPurpose {
    type Err = UnknownPurpose;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(Self::Registration),
            "unregistration" => Ok(Self::Unregistration),
            "update_email" => Ok(Self::UpdateEmail),
            "update_password" => Ok(Self::UpdatePassword),
            other => Err(UnknownPurpose(other.to_string())),
        }
    }
}

impl std::fmt::Display for ApprovalPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored approval code bound to one `(user_id, purpose)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalCodeRecord {
    pub user_id: UserId,
    pub purpose: ApprovalPurpose,
    pub code: ApprovalCode,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl ApprovalCodeRecord {
    pub fn new(
        user_id: UserId,
        purpose: ApprovalPurpose,
        code: ApprovalCode,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            user_id,
            purpose,
            code,
            expires_at: issued_at + ttl,
            revoked: false,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}
