pub mod approval;
pub mod config;
pub mod email;
pub mod hashing;
pub mod persistence;

pub use approval::EmailApprovalSender;
pub use config::Settings;
pub use email::{MockEmailClient, PostmarkEmailClient, SentEmail};
pub use hashing::Argon2Hasher;
pub use persistence::*;
