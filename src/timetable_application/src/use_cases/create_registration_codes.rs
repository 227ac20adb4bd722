use std::{collections::HashSet, sync::Arc};

use chrono::Utc;
use secrecy::{ExposeSecret, Secret};
use timetable_core::{
    GroupId, GroupStore, MAX_CODES_PER_REQUEST, RegistrationCode, RegistrationCodeStore, Role,
    ServiceResult,
};

use crate::{error::AccountError, messages::Messages};

/// Create registration codes use case - issues a batch of invitation keys for one role
pub struct CreateRegistrationCodesUseCase<R, G>
where
    R: RegistrationCodeStore,
    G: GroupStore,
{
    code_store: R,
    group_store: G,
    messages: Arc<Messages>,
}

impl<R, G> CreateRegistrationCodesUseCase<R, G>
where
    R: RegistrationCodeStore,
    G: GroupStore,
{
    pub fn new(code_store: R, group_store: G, messages: Arc<Messages>) -> Self {
        Self {
            code_store,
            group_store,
            messages,
        }
    }

    /// Execute the create registration codes use case
    ///
    /// # Arguments
    /// * `role` - Raw role code of the invited accounts
    /// * `number_of_links` - How many codes to issue, `1..=1000`
    /// * `student_group_id` - Group of the invited students, ignored for other roles
    ///
    /// # Returns
    /// The secret keys of the stored codes, all distinct and sharing one expiry.
    #[tracing::instrument(name = "CreateRegistrationCodesUseCase::execute", skip(self))]
    pub async fn execute(
        &self,
        role: i32,
        number_of_links: i32,
        student_group_id: i32,
    ) -> Result<ServiceResult<Vec<Secret<String>>>, AccountError> {
        if !(1..=MAX_CODES_PER_REQUEST).contains(&number_of_links) {
            return Ok(ServiceResult::fail(&self.messages.links_count_out_of_range));
        }
        let Ok(role) = Role::try_from(role) else {
            return Ok(ServiceResult::fail(&self.messages.unknown_role));
        };

        let group_id = match role {
            Role::Student => {
                if student_group_id < 1 {
                    return Ok(ServiceResult::fail(&self.messages.student_group_required));
                }
                let group_id = GroupId::new(student_group_id);
                if !self.group_store.group_exists(group_id).await? {
                    return Ok(ServiceResult::fail(&self.messages.group_not_found));
                }
                Some(group_id)
            }
            Role::Teacher | Role::Admin => None,
        };

        let now = Utc::now();
        let count = number_of_links as usize;
        let mut seen = HashSet::with_capacity(count);
        let mut codes = Vec::with_capacity(count);
        while codes.len() < count {
            let code = RegistrationCode::issue(role, group_id, now)
                .map_err(|e| AccountError::IntegrityViolation(e.to_string()))?;
            if seen.insert(code.secret_key().expose_secret().clone()) {
                codes.push(code);
            }
        }

        let keys = codes.iter().map(|c| c.secret_key().clone()).collect();
        self.code_store.add_codes(codes).await?;

        tracing::info!(?role, count, "Registration codes created");
        Ok(ServiceResult::ok_with(
            &self.messages.registration_codes_created,
            keys,
        ))
    }
}
