pub mod approval;
pub mod check_login;
pub mod check_user_exists;
pub mod confirm_email;
pub mod create_registration_codes;
pub mod register;
pub mod request_approval_code;
pub mod request_confirmation;
pub mod unregister;
pub mod update_email;
pub mod update_password;

pub use approval::{ApprovalService, DEFAULT_APPROVAL_CODE_TTL_SECS};
pub use check_login::CheckLoginUseCase;
pub use check_user_exists::CheckUserExistsUseCase;
pub use confirm_email::ConfirmEmailUseCase;
pub use create_registration_codes::CreateRegistrationCodesUseCase;
pub use register::RegisterUseCase;
pub use request_approval_code::RequestApprovalCodeUseCase;
pub use request_confirmation::RequestConfirmationEmailUseCase;
pub use unregister::UnregisterUseCase;
pub use update_email::UpdateEmailUseCase;
pub use update_password::UpdatePasswordUseCase;
