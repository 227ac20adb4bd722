pub mod domain;
pub mod ports;
pub mod validation;

// Re-export commonly used types for convenience
pub use domain::{
    approval_code::{ApprovalCode, ApprovalCodeRecord, ApprovalPurpose, UnknownPurpose},
    email::{Email, EmailError},
    group::GroupId,
    password::{Password, PasswordError, PasswordHash},
    registration_code::{
        MAX_CODES_PER_REQUEST, REGISTRATION_CODE_VALIDITY_DAYS, RegistrationCode,
    },
    service_result::ServiceResult,
    timetable::{ActualTimetableCell, Cabinet, CabinetError},
    user::{NewUser, Role, RoleError, User, UserError, UserId, UserRole},
};

pub use ports::{
    repositories::{
        ApprovalCodeStore, ApprovalCodeStoreError, GroupStore, GroupStoreError,
        RegistrationCodeStore, RegistrationCodeStoreError, UserStore, UserStoreError,
    },
    services::{ApprovalSender, EmailClient, EmailClientError, HashingError, PasswordHasher},
};

pub use validation::{validate_email, validate_password};
