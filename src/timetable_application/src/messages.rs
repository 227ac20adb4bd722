//! User-facing texts returned in [`timetable_core::ServiceResult`] descriptions.
//!
//! The default table is Russian. Every entry can be overridden from
//! configuration; missing entries fall back to the default.

use serde::Deserialize;
use timetable_core::ApprovalCode;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    // Input validation
    pub invalid_email: String,
    /// Malformed email on the confirmation paths.
    pub malformed_email: String,
    pub weak_password: String,
    pub user_id_unset: String,
    pub approval_code_unset: String,
    /// Zero approval code passed to an account operation.
    pub approval_code_invalid: String,

    // Registration
    pub email_taken_confirmed: String,
    pub email_taken_unconfirmed: String,
    pub user_registered: String,
    pub confirmation_user_not_found: String,
    pub registration_code_rejected: String,
    pub email_confirmed: String,
    pub confirmation_email_not_sent: String,

    // Account changes
    pub user_not_found: String,
    pub user_found: String,
    pub unregistration_code_rejected: String,
    pub user_deleted: String,
    pub update_email_code_rejected: String,
    pub email_updated: String,
    pub update_password_code_rejected: String,
    pub password_updated: String,

    // Login
    pub login_user_not_found: String,
    pub login_email_not_confirmed: String,
    pub login_password_empty: String,
    pub login_password_accepted: String,
    pub login_password_wrong: String,

    // Registration codes
    pub links_count_out_of_range: String,
    pub unknown_role: String,
    pub student_group_required: String,
    pub group_not_found: String,
    pub registration_codes_created: String,

    // Approval codes
    pub approval_code_not_found: String,
    pub approval_code_mismatch: String,
    pub approval_code_revoked: String,
    pub approval_code_expired: String,
    pub approval_code_accepted: String,
    pub approval_code_sent: String,
    pub approval_code_not_sent: String,
    pub email_already_confirmed: String,
    pub approval_email_subject: String,
    /// `{code}` is replaced with the approval code.
    pub approval_email_body: String,
}

impl Messages {
    pub fn approval_email_body(&self, code: ApprovalCode) -> String {
        self.approval_email_body.replace("{code}", &code.to_string())
    }
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            invalid_email: "Email имеет неверный формат.".into(),
            malformed_email: "Email имеет неправильный формат.".into(),
            weak_password: "В пароле должно быть не менее 8 символов, большие и маленькие латинские буквы, цифры и спецсимволы #?!@$%^&*-".into(),
            user_id_unset: "Id пользователя не должен быть равен нулю.".into(),
            approval_code_unset: "ApprovalCode не может быть равен нулю.".into(),
            approval_code_invalid: "Некорректный approvalCode пользователя.".into(),

            email_taken_confirmed: "Пользователь с таким Email уже есть в бд.".into(),
            email_taken_unconfirmed: "Пользователь с таким Email уже есть в бд, но Email не подтвержден.".into(),
            user_registered: "Пользователь добавлен в базу, но имеет не подтвержденный Email. Запросите отправку email.".into(),
            confirmation_user_not_found: "Пользователь для валидации не был найден в бд.".into(),
            registration_code_rejected: "Код подтверждения регистрации не принят.".into(),
            email_confirmed: "Email пользователя подтвержден.".into(),
            confirmation_email_not_sent: "Письмо подтверждения регистрации не было отправлено.".into(),

            user_not_found: "Пользователь не найден в бд.".into(),
            user_found: "Пользователь успешно найден в бд.".into(),
            unregistration_code_rejected: "Код подтверждения для удаления аккаунта не принят.".into(),
            user_deleted: "Аккаунт пользователя удален.".into(),
            update_email_code_rejected: "Код подтверждения для изменения почты не принят.".into(),
            email_updated: "Email пользователя обновлен.".into(),
            update_password_code_rejected: "Код подтверждения для изменения пароля не принят.".into(),
            password_updated: "Пароль пользователя обновлен.".into(),

            login_user_not_found: "Пользователя нет в бд.".into(),
            login_email_not_confirmed: "Пользователь найден, но Email не подтвержден.".into(),
            login_password_empty: "Пользователь найден, но его пароль почему-то пуст.".into(),
            login_password_accepted: "Пароль подтвержден.".into(),
            login_password_wrong: "Пароль неверный.".into(),

            links_count_out_of_range: "Количество запрашиваемых ссылок не должно быть меньше 1 и больше 1000.".into(),
            unknown_role: "Получена несуществующая роль.".into(),
            student_group_required: "Для создания роли студента, нужно указать studentGroupId, который должен быть больше 0.".into(),
            group_not_found: "Группы с таким studentGroupId не существует.".into(),
            registration_codes_created: "Коды созданы и сохранены. Они действительны в течение 14-ти суток.".into(),

            approval_code_not_found: "Код подтверждения не найден.".into(),
            approval_code_mismatch: "Неверный код подтверждения.".into(),
            approval_code_revoked: "Код подтверждения уже использован.".into(),
            approval_code_expired: "Срок действия кода подтверждения истёк.".into(),
            approval_code_accepted: "Код подтверждения принят.".into(),
            approval_code_sent: "Код подтверждения отправлен на почту пользователя.".into(),
            approval_code_not_sent: "Не удалось отправить письмо с кодом подтверждения.".into(),
            email_already_confirmed: "Email пользователя уже подтвержден.".into(),
            approval_email_subject: "Код подтверждения".into(),
            approval_email_body: "Ваш код подтверждения: {code}".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_defaults() {
        let messages: Messages =
            serde_json::from_str(r#"{ "user_deleted": "Account deleted." }"#).unwrap();

        assert_eq!(messages.user_deleted, "Account deleted.");
        assert_eq!(messages.email_updated, Messages::default().email_updated);
    }

    #[test]
    fn email_body_contains_code() {
        let body = Messages::default().approval_email_body(ApprovalCode::new(42_042));
        assert_eq!(body, "Ваш код подтверждения: 042042");
    }
}
