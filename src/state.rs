use crate::advisor::Advisor;
use crate::errors::AppError;
use crate::i18n::{Language, DEFAULT_LANGUAGE};
use crate::models::{AnalysisState, SessionLog, User};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Screen state for the single demo user: who is logged in, the active
/// language, and whether the entry form is open.
#[derive(Debug, Clone)]
pub struct UiState {
    pub user: Option<User>,
    pub language: Language,
    pub form_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            user: None,
            language: DEFAULT_LANGUAGE,
            form_open: false,
        }
    }
}

impl UiState {
    /// Login is a stub: any email passes, the display name is its local part.
    pub fn log_in(&mut self, email: &str) -> User {
        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = User {
            email: email.to_string(),
            name,
        };
        self.user = Some(user.clone());
        user
    }

    pub fn log_out(&mut self) {
        self.user = None;
        self.form_open = false;
    }

    pub fn require_user(&self) -> Result<&User, AppError> {
        self.user
            .as_ref()
            .ok_or_else(|| AppError::unauthorized("log in first"))
    }

    pub fn open_form(&mut self) -> Result<(), AppError> {
        self.require_user()?;
        self.form_open = true;
        Ok(())
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data_path: PathBuf,
    pub log: Arc<Mutex<SessionLog>>,
    pub ui: Arc<Mutex<UiState>>,
    pub analysis: Arc<Mutex<AnalysisState>>,
    pub advisor: Advisor,
}

impl AppState {
    pub fn new(data_path: PathBuf, log: SessionLog, advisor: Advisor) -> Self {
        Self {
            data_path,
            log: Arc::new(Mutex::new(log)),
            ui: Arc::new(Mutex::new(UiState::default())),
            analysis: Arc::new(Mutex::new(AnalysisState::default())),
            advisor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_names_the_user_after_the_email_local_part() {
        let mut ui = UiState::default();
        let user = ui.log_in("selin@example.com");
        assert_eq!(user.name, "selin");
        assert_eq!(ui.require_user().unwrap().email, "selin@example.com");
    }

    #[test]
    fn form_requires_a_logged_in_user() {
        let mut ui = UiState::default();
        assert!(ui.open_form().is_err());
        assert!(!ui.form_open);

        ui.log_in("a@b.c");
        ui.open_form().unwrap();
        assert!(ui.form_open);
    }

    #[test]
    fn logout_also_closes_the_form() {
        let mut ui = UiState::default();
        ui.log_in("a@b.c");
        ui.open_form().unwrap();

        ui.log_out();
        assert!(ui.user.is_none());
        assert!(!ui.form_open);
        assert!(ui.require_user().is_err());
    }

    #[test]
    fn language_can_change_in_any_state() {
        let mut ui = UiState::default();
        assert_eq!(ui.language, Language::En);
        ui.set_language(Language::Ar);
        assert_eq!(ui.language, Language::Ar);

        ui.log_in("a@b.c");
        ui.set_language(Language::En);
        assert_eq!(ui.language, Language::En);
    }
}
