use std::sync::Arc;

use chrono::Duration;
use secrecy::Secret;
use timetable_adapters::EmailApprovalSender;
use timetable_application::{
    AccountError, ApprovalService, CheckLoginUseCase, CheckUserExistsUseCase, ConfirmEmailUseCase,
    CreateRegistrationCodesUseCase, Messages, RegisterUseCase, RequestApprovalCodeUseCase,
    RequestConfirmationEmailUseCase, UnregisterUseCase, UpdateEmailUseCase, UpdatePasswordUseCase,
};
use timetable_core::{
    ApprovalCode, ApprovalCodeStore, ApprovalPurpose, EmailClient, GroupStore, PasswordHasher,
    RegistrationCodeStore, ServiceResult, User, UserId, UserRole, UserStore,
};

type Sender<U, A, E> = EmailApprovalSender<U, A, E>;

/// Account lifecycle service wiring every use case to one set of stores
pub struct AccountService<U, A, R, G, H, E>
where
    U: UserStore + Clone,
    A: ApprovalCodeStore + Clone,
    R: RegistrationCodeStore,
    G: GroupStore,
    H: PasswordHasher + Clone,
    E: EmailClient,
{
    register: RegisterUseCase<U, H>,
    request_confirmation: RequestConfirmationEmailUseCase<Sender<U, A, E>>,
    confirm_email: ConfirmEmailUseCase<U, A>,
    unregister: UnregisterUseCase<U, A>,
    update_email: UpdateEmailUseCase<U, A>,
    update_password: UpdatePasswordUseCase<U, A, H>,
    check_login: CheckLoginUseCase<U, H>,
    check_user_exists: CheckUserExistsUseCase<U>,
    create_registration_codes: CreateRegistrationCodesUseCase<R, G>,
    request_approval_code: RequestApprovalCodeUseCase<U, Sender<U, A, E>>,
}

impl<U, A, R, G, H, E> AccountService<U, A, R, G, H, E>
where
    U: UserStore + Clone,
    A: ApprovalCodeStore + Clone,
    R: RegistrationCodeStore,
    G: GroupStore,
    H: PasswordHasher + Clone,
    E: EmailClient,
{
    /// Create a new AccountService with the provided stores and email client
    ///
    /// # Arguments
    /// * `user_store` - Store for accounts (must be Clone)
    /// * `approval_code_store` - Store for approval codes (must be Clone)
    /// * `registration_code_store` - Store for invitation codes
    /// * `group_store` - Lookup of student groups
    /// * `hasher` - Password hash primitive (must be Clone)
    /// * `email_client` - Transport for approval code emails
    /// * `approval_code_ttl` - Lifetime of an issued approval code
    /// * `messages` - Texts returned in result descriptions
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_store: U,
        approval_code_store: A,
        registration_code_store: R,
        group_store: G,
        hasher: H,
        email_client: E,
        approval_code_ttl: Duration,
        messages: Messages,
    ) -> Self {
        let messages = Arc::new(messages);
        let approval = ApprovalService::new(approval_code_store, approval_code_ttl, messages.clone());
        let sender = EmailApprovalSender::new(
            user_store.clone(),
            approval.clone(),
            Arc::new(email_client),
            messages.clone(),
        );

        Self {
            register: RegisterUseCase::new(user_store.clone(), hasher.clone(), messages.clone()),
            request_confirmation: RequestConfirmationEmailUseCase::new(
                sender.clone(),
                messages.clone(),
            ),
            confirm_email: ConfirmEmailUseCase::new(
                user_store.clone(),
                approval.clone(),
                messages.clone(),
            ),
            unregister: UnregisterUseCase::new(
                user_store.clone(),
                approval.clone(),
                messages.clone(),
            ),
            update_email: UpdateEmailUseCase::new(
                user_store.clone(),
                approval.clone(),
                messages.clone(),
            ),
            update_password: UpdatePasswordUseCase::new(
                user_store.clone(),
                approval,
                hasher.clone(),
                messages.clone(),
            ),
            check_login: CheckLoginUseCase::new(user_store.clone(), hasher, messages.clone()),
            check_user_exists: CheckUserExistsUseCase::new(user_store.clone(), messages.clone()),
            create_registration_codes: CreateRegistrationCodesUseCase::new(
                registration_code_store,
                group_store,
                messages.clone(),
            ),
            request_approval_code: RequestApprovalCodeUseCase::new(user_store, sender, messages),
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: Secret<String>,
        role: UserRole,
    ) -> Result<ServiceResult<UserId>, AccountError> {
        self.register.execute(email, password, role).await
    }

    pub async fn request_confirmation_email(
        &self,
        email: &str,
    ) -> Result<ServiceResult, AccountError> {
        self.request_confirmation.execute(email).await
    }

    pub async fn confirm_email(
        &self,
        email: &str,
        approval_code: ApprovalCode,
    ) -> Result<ServiceResult, AccountError> {
        self.confirm_email.execute(email, approval_code).await
    }

    pub async fn request_approval_code(
        &self,
        user_id: UserId,
        purpose: ApprovalPurpose,
    ) -> Result<ServiceResult, AccountError> {
        self.request_approval_code.execute(user_id, purpose).await
    }

    pub async fn unregister(
        &self,
        user_id: UserId,
        approval_code: ApprovalCode,
    ) -> Result<ServiceResult, AccountError> {
        self.unregister.execute(user_id, approval_code).await
    }

    pub async fn update_email(
        &self,
        user_id: UserId,
        new_email: &str,
        approval_code: ApprovalCode,
    ) -> Result<ServiceResult, AccountError> {
        self.update_email
            .execute(user_id, new_email, approval_code)
            .await
    }

    pub async fn update_password(
        &self,
        user_id: UserId,
        new_password: Secret<String>,
        approval_code: ApprovalCode,
    ) -> Result<ServiceResult, AccountError> {
        self.update_password
            .execute(user_id, new_password, approval_code)
            .await
    }

    pub async fn check_login(
        &self,
        email: &str,
        password: Secret<String>,
    ) -> Result<ServiceResult<User>, AccountError> {
        self.check_login.execute(email, password).await
    }

    pub async fn check_user_exists(&self, user_id: UserId) -> Result<ServiceResult, AccountError> {
        self.check_user_exists.execute(user_id).await
    }

    pub async fn create_registration_codes(
        &self,
        role: i32,
        number_of_links: i32,
        student_group_id: i32,
    ) -> Result<ServiceResult<Vec<Secret<String>>>, AccountError> {
        self.create_registration_codes
            .execute(role, number_of_links, student_group_id)
            .await
    }
}
