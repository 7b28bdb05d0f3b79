//! Login, registration and password recovery.

use secrecy::SecretString;
use tracing::info;

use fitness_companion_core::preferences::UserPreferences;
use fitness_companion_core::validation::{
    validate_forgot_password, validate_login, validate_password_reset, validate_registration,
};

use crate::AppResult;

#[derive(Clone)]
pub struct AuthController {
    prefs: UserPreferences,
}

impl AuthController {
    pub fn new(prefs: UserPreferences) -> Self {
        Self { prefs }
    }

    /// Validate the form and store the new account locally.
    pub async fn register(&self, email: &str, password: &str, confirm: &str) -> AppResult<()> {
        validate_registration(email, password, confirm)?;
        self.prefs
            .save_credentials(email.trim(), &SecretString::new(password.into()))
            .await?;
        info!("account registered");
        Ok(())
    }

    pub async fn login(&self, email: &str, password: &str) -> AppResult<()> {
        let stored = self.prefs.get_credentials().await?;
        validate_login(email, password, &stored)?;
        info!("login succeeded");
        Ok(())
    }

    /// Only checks the address; there is no remote recovery service.
    pub fn forgot_password(&self, email: &str) -> AppResult<()> {
        validate_forgot_password(email)?;
        Ok(())
    }

    pub async fn reset_password(&self, password: &str, confirm: &str) -> AppResult<()> {
        validate_password_reset(password, confirm)?;
        self.prefs
            .update_password(&SecretString::new(password.into()))
            .await?;
        info!("password reset");
        Ok(())
    }

    /// Forget every stored field.
    pub async fn logout(&self) -> AppResult<()> {
        self.prefs.clear().await?;
        info!("user data cleared");
        Ok(())
    }
}
