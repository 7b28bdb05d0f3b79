//! Typed access to the persisted user fields.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::store::{KeyValueStore, StoreError};

pub const EMAIL_KEY: &str = "email";
pub const PASSWORD_KEY: &str = "password";
pub const NAME_KEY: &str = "name";
pub const BIO_KEY: &str = "bio";
pub const GENDER_KEY: &str = "gender";
pub const PHOTO_KEY: &str = "photo";

/// Profile fields that can be written one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Bio,
    Email,
    Gender,
    Photo,
}

impl ProfileField {
    pub fn key(self) -> &'static str {
        match self {
            ProfileField::Name => NAME_KEY,
            ProfileField::Bio => BIO_KEY,
            ProfileField::Email => EMAIL_KEY,
            ProfileField::Gender => GENDER_KEY,
            ProfileField::Photo => PHOTO_KEY,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    /// An account exists once an email has been stored.
    pub fn is_registered(&self) -> bool {
        !self.email.is_empty()
    }

    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.expose_secret() == password
    }
}

/// Stored profile. Absent fields are empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub bio: String,
    pub email: String,
    pub gender: String,
    pub photo: String,
}

impl UserProfile {
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Bio => &self.bio,
            ProfileField::Email => &self.email,
            ProfileField::Gender => &self.gender,
            ProfileField::Photo => &self.photo,
        }
    }
}

#[derive(Clone)]
pub struct UserPreferences {
    store: Arc<dyn KeyValueStore>,
}

impl UserPreferences {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read(&self, key: &str) -> Result<String, StoreError> {
        Ok(self.store.get(key).await?.unwrap_or_default())
    }

    pub async fn save_credentials(&self, email: &str, password: &SecretString) -> Result<(), StoreError> {
        self.store
            .put_many(vec![
                (EMAIL_KEY.into(), email.to_string()),
                (PASSWORD_KEY.into(), password.expose_secret().to_string()),
            ])
            .await
    }

    pub async fn get_credentials(&self) -> Result<Credentials, StoreError> {
        let email = self.read(EMAIL_KEY).await?;
        let password = self.read(PASSWORD_KEY).await?;
        Ok(Credentials {
            email,
            password: SecretString::new(password.into()),
        })
    }

    pub async fn update_password(&self, password: &SecretString) -> Result<(), StoreError> {
        self.store
            .put(PASSWORD_KEY, password.expose_secret())
            .await
    }

    /// Name, bio and (when given) gender in a single batch.
    pub async fn save_profile(
        &self,
        name: &str,
        bio: &str,
        gender: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut entries = vec![
            (NAME_KEY.to_string(), name.to_string()),
            (BIO_KEY.to_string(), bio.to_string()),
        ];
        if let Some(g) = gender {
            entries.push((GENDER_KEY.to_string(), g.to_string()));
        }
        self.store.put_many(entries).await
    }

    pub async fn save_profile_field(&self, field: ProfileField, value: &str) -> Result<(), StoreError> {
        self.store.put(field.key(), value).await
    }

    pub async fn save_email(&self, email: &str) -> Result<(), StoreError> {
        self.save_profile_field(ProfileField::Email, email).await
    }

    pub async fn save_gender(&self, gender: &str) -> Result<(), StoreError> {
        self.save_profile_field(ProfileField::Gender, gender).await
    }

    pub async fn save_photo(&self, photo: &str) -> Result<(), StoreError> {
        self.save_profile_field(ProfileField::Photo, photo).await
    }

    pub async fn get_gender(&self) -> Result<String, StoreError> {
        self.read(GENDER_KEY).await
    }

    pub async fn get_profile(&self) -> Result<UserProfile, StoreError> {
        let mut all = self.store.snapshot().await?;
        let mut take = |k: &str| all.remove(k).unwrap_or_default();
        Ok(UserProfile {
            name: take(NAME_KEY),
            bio: take(BIO_KEY),
            email: take(EMAIL_KEY),
            gender: take(GENDER_KEY),
            photo: take(PHOTO_KEY),
        })
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;

    fn prefs() -> UserPreferences {
        UserPreferences::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn empty_store_yields_empty_values() {
        let p = prefs();
        let creds = p.get_credentials().await.unwrap();
        assert!(!creds.is_registered());
        assert_eq!(p.get_profile().await.unwrap(), UserProfile::default());
        assert_eq!(p.get_gender().await.unwrap(), "");
    }

    #[tokio::test]
    async fn credentials_round_trip() {
        let p = prefs();
        p.save_credentials("ana@duoc.cl", &SecretString::new("Pass1234".into()))
            .await
            .unwrap();
        let creds = p.get_credentials().await.unwrap();
        assert!(creds.matches("ana@duoc.cl", "Pass1234"));
        assert!(!creds.matches("ana@duoc.cl", "nope"));
    }

    #[tokio::test]
    async fn save_profile_keeps_gender_when_omitted() {
        let p = prefs();
        p.save_gender("Female").await.unwrap();
        p.save_profile("Ana", "runner", None).await.unwrap();
        let profile = p.get_profile().await.unwrap();
        assert_eq!(profile.name, "Ana");
        assert_eq!(profile.bio, "runner");
        assert_eq!(profile.gender, "Female");
        assert_eq!(profile.get(ProfileField::Bio), "runner");
    }

    #[tokio::test]
    async fn update_password_leaves_email() {
        let p = prefs();
        p.save_credentials("a@b.com", &SecretString::new("old1".into()))
            .await
            .unwrap();
        p.update_password(&SecretString::new("new2".into()))
            .await
            .unwrap();
        let creds = p.get_credentials().await.unwrap();
        assert!(creds.matches("a@b.com", "new2"));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let p = prefs();
        p.save_email("a@b.com").await.unwrap();
        p.save_photo("content://photo/1").await.unwrap();
        p.clear().await.unwrap();
        assert_eq!(p.get_profile().await.unwrap(), UserProfile::default());
    }
}
