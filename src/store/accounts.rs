use super::Tracker;
use crate::error::TrackerError;
use crate::model::{Account, Role};

#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub user_id: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Option<Role>,
    pub full_name: String,
    pub email: String,
    pub subject: String,
}

impl Tracker {
    /// Accounts are unique per `(user_id, role)`; the same id may hold both roles.
    pub fn register(&mut self, reg: Registration) -> Result<Account, TrackerError> {
        let role = reg.role.unwrap_or(Role::Student);
        let is_teacher = role == Role::Teacher;
        let user_id = reg.user_id.trim().to_string();
        let full_name = reg.full_name.trim();
        let email = reg.email.trim();
        let subject = reg.subject.trim();

        if user_id.is_empty()
            || reg.password.is_empty()
            || (!is_teacher && (full_name.is_empty() || email.is_empty()))
        {
            return Err(TrackerError::MissingFields);
        }
        if is_teacher && subject.is_empty() {
            return Err(TrackerError::MissingSubject);
        }
        if reg.password != reg.confirm_password {
            return Err(TrackerError::PasswordMismatch);
        }
        if self
            .accounts
            .iter()
            .any(|a| a.user_id == user_id && a.role == role)
        {
            return Err(TrackerError::DuplicateAccount);
        }

        let account = if is_teacher {
            Account {
                full_name: user_id.clone(),
                user_id,
                password: reg.password,
                role,
                email: String::new(),
                subject: subject.to_string(),
            }
        } else {
            Account {
                user_id,
                password: reg.password,
                role,
                full_name: full_name.to_string(),
                email: email.to_string(),
                subject: String::new(),
            }
        };
        self.accounts.push(account.clone());
        self.persist_accounts();
        tracing::info!(user_id = %account.user_id, role = account.role.as_str(), "account registered");
        Ok(account)
    }

    pub fn authenticate(
        &self,
        user_id: &str,
        password: &str,
        role: Role,
    ) -> Result<&Account, TrackerError> {
        let user_id = user_id.trim();
        self.accounts
            .iter()
            .find(|a| a.user_id == user_id && a.password == password && a.role == role)
            .ok_or(TrackerError::InvalidCredentials)
    }
}
