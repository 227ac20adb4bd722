pub mod email_approval_sender;

pub use email_approval_sender::EmailApprovalSender;
