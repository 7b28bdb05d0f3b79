//! Profile tab and the post-registration setup wizard.

use fitness_companion_core::preferences::{ProfileField, UserPreferences, UserProfile};
use fitness_companion_core::profile_setup::ProfileSetup;

use crate::AppResult;

pub const MAX_BIO_LEN: usize = 100;

/// Edits on the profile tab are written through as they happen.
#[derive(Clone)]
pub struct ProfileController {
    prefs: UserPreferences,
    profile: UserProfile,
}

impl ProfileController {
    pub fn new(prefs: UserPreferences) -> Self {
        Self {
            prefs,
            profile: UserProfile::default(),
        }
    }

    pub async fn load(&mut self) -> AppResult<&UserProfile> {
        self.profile = self.prefs.get_profile().await?;
        Ok(&self.profile)
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Name when set, otherwise the email, otherwise a generic greeting.
    pub fn greeting_name(&self) -> &str {
        [self.profile.name.as_str(), self.profile.email.as_str()]
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .unwrap_or("user")
    }

    async fn write(&mut self, field: ProfileField, value: &str) -> AppResult<()> {
        self.prefs.save_profile_field(field, value).await?;
        let slot = match field {
            ProfileField::Name => &mut self.profile.name,
            ProfileField::Bio => &mut self.profile.bio,
            ProfileField::Email => &mut self.profile.email,
            ProfileField::Gender => &mut self.profile.gender,
            ProfileField::Photo => &mut self.profile.photo,
        };
        *slot = value.to_string();
        Ok(())
    }

    pub async fn set_name(&mut self, name: &str) -> AppResult<()> {
        self.write(ProfileField::Name, name).await
    }

    /// Returns `false` and leaves the bio untouched when it is too long.
    pub async fn set_bio(&mut self, bio: &str) -> AppResult<bool> {
        if bio.chars().count() > MAX_BIO_LEN {
            return Ok(false);
        }
        self.write(ProfileField::Bio, bio).await?;
        Ok(true)
    }

    pub async fn set_email(&mut self, email: &str) -> AppResult<()> {
        self.write(ProfileField::Email, email).await
    }

    pub async fn set_gender(&mut self, gender: &str) -> AppResult<()> {
        self.write(ProfileField::Gender, gender).await
    }

    /// Store a reference (URI or path) to a picked or captured photo.
    pub async fn set_photo(&mut self, reference: &str) -> AppResult<()> {
        self.write(ProfileField::Photo, reference).await
    }

    /// Wizard pre-filled from what is already stored.
    pub async fn begin_setup(&self) -> AppResult<ProfileSetup> {
        let stored = self.prefs.get_profile().await?;
        Ok(ProfileSetup::with_stored(&stored))
    }

    pub async fn finish_setup(&mut self, setup: &ProfileSetup) -> AppResult<()> {
        setup.complete(&self.prefs).await?;
        self.load().await?;
        Ok(())
    }
}
