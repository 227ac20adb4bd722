//! # Timetable - Account Backend Library
//!
//! This is a facade crate that re-exports the public APIs of the timetable backend
//! components. Use this crate to get the account lifecycle, its stores and
//! the timetable entities in one place.
//!
//! ## Structure
//!
//! - **Domain types**: `User`, `UserRole`, `ApprovalCode`, `RegistrationCode`, `Cabinet`, etc.
//! - **Ports**: `UserStore`, `ApprovalCodeStore`, `RegistrationCodeStore`, `GroupStore`,
//!   `PasswordHasher`, `EmailClient`, `ApprovalSender`
//! - **Use cases**: `RegisterUseCase`, `ConfirmEmailUseCase`, `CheckLoginUseCase`, etc.
//! - **Adapters**: `PostgresUserStore`, `RedisApprovalCodeStore`, `Argon2Hasher`, etc.
//! - **Service**: `AccountService` - composition root over all use cases

// ============================================================================
// Domain Types
// ============================================================================

/// Domain types, validators and ports
pub mod domain {
    pub use timetable_core::*;
}

// Re-export most commonly used domain types at the root level
pub use timetable_core::{
    ActualTimetableCell, ApprovalCode, ApprovalPurpose, Cabinet, Email, GroupId, Password,
    PasswordHash, RegistrationCode, Role, ServiceResult, User, UserId, UserRole,
    validate_email, validate_password,
};

// ============================================================================
// Ports
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use timetable_core::{
        ApprovalCodeStore, ApprovalCodeStoreError, GroupStore, GroupStoreError,
        RegistrationCodeStore, RegistrationCodeStoreError, UserStore, UserStoreError,
    };
}

pub use timetable_core::{
    ApprovalCodeStore, ApprovalSender, EmailClient, EmailClientError, GroupStore, PasswordHasher,
    RegistrationCodeStore, UserStore,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use timetable_application::*;
}

pub use timetable_application::{AccountError, ApprovalService, Messages};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Store implementations
    pub mod persistence {
        pub use timetable_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use timetable_adapters::email::*;
    }

    /// Configuration
    pub mod config {
        pub use timetable_adapters::config::*;
    }

    pub use timetable_adapters::{Argon2Hasher, EmailApprovalSender};
}

// ============================================================================
// Account Service (Main Entry Point)
// ============================================================================

pub use timetable_service::{
    AccountService, ProductionAccountService, build_account_service, configure_postgresql,
    configure_redis, init_tracing,
};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
