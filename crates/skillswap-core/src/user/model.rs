//! User profile domain models.
//!
//! Represents the viewer (the authenticated user operating the client) and
//! the profile data the server keeps for every user.

use crate::error::{Result, SkillSwapError};
use crate::ids::UserId;
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum number of entries kept in a skill list.
pub const MAX_SKILLS: usize = 3;

/// Largest profile image accepted for upload (5 MiB).
pub const MAX_PROFILE_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// File extensions accepted for profile images.
pub const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Profile of any user, as served by the profile and match endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default)]
    pub pronouns: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub availability: Option<String>,
    #[serde(default)]
    pub learning_style: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills_to_offer: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills_to_learn: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_rating: f64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UserProfile {
    /// Builds a profile that only knows the identity returned by authentication.
    pub fn minimal(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: String::new(),
            pronouns: None,
            bio: None,
            location: None,
            availability: None,
            learning_style: None,
            skills_to_offer: Vec::new(),
            skills_to_learn: Vec::new(),
            average_rating: 0.0,
            image_url: None,
        }
    }
}

/// The authenticated user operating the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    profile: UserProfile,
}

impl Viewer {
    pub fn new(profile: UserProfile) -> Self {
        Self { profile }
    }

    pub fn id(&self) -> UserId {
        self.profile.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn avatar(&self) -> Option<&str> {
        self.profile.image_url.as_deref()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Replaces the profile, keeping the viewer identity.
    ///
    /// A profile for another user is rejected: switching users goes through
    /// logout and login.
    pub fn replace_profile(&mut self, profile: UserProfile) -> Result<()> {
        if profile.id != self.profile.id {
            return Err(SkillSwapError::validation(format!(
                "profile for user {} cannot replace viewer {}",
                profile.id, self.profile.id
            )));
        }
        self.profile = profile;
        Ok(())
    }

    pub fn set_image_url(&mut self, image_url: impl Into<String>) {
        self.profile.image_url = Some(image_url.into());
    }
}

/// Login form payload.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup form payload.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Identity returned by a successful login or signup.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthIdentity {
    pub user_id: UserId,
    pub name: String,
}

/// Partial profile update; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronouns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_to_offer: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills_to_learn: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl ProfileUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets name, pronouns and email together (the "user info" section).
    pub fn with_user_info(
        mut self,
        name: impl Into<String>,
        pronouns: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.name = Some(name.into());
        self.pronouns = Some(pronouns.into());
        self.email = Some(email.into());
        self
    }

    pub fn with_bio(mut self, bio: impl Into<String>) -> Self {
        self.bio = Some(bio.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_availability(mut self, availability: impl Into<String>) -> Self {
        self.availability = Some(availability.into());
        self
    }

    pub fn with_learning_style(mut self, learning_style: impl Into<String>) -> Self {
        self.learning_style = Some(learning_style.into());
        self
    }

    pub fn with_skills_to_offer<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills_to_offer = Some(normalize_skills(skills));
        self
    }

    pub fn with_skills_to_learn<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.skills_to_learn = Some(normalize_skills(skills));
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Trims entries, drops blank ones and keeps at most [`MAX_SKILLS`].
pub fn normalize_skills<I, S>(skills: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    skills
        .into_iter()
        .map(|skill| skill.as_ref().trim().to_string())
        .filter(|skill| !skill.is_empty())
        .take(MAX_SKILLS)
        .collect()
}

/// An image selected for upload as the viewer's avatar.
#[derive(Debug, Clone)]
pub struct ProfileImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ProfileImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Lower-cased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }

    /// Checks name, extension and size before anything is uploaded.
    pub fn validate(&self) -> Result<()> {
        if self.file_name.trim().is_empty() {
            return Err(SkillSwapError::validation("No file selected"));
        }
        if self.bytes.is_empty() {
            return Err(SkillSwapError::validation("No file provided"));
        }
        match self.extension() {
            Some(ext) if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => {}
            _ => {
                return Err(SkillSwapError::validation(
                    "File type not allowed. Please upload PNG, JPG, or JPEG",
                ));
            }
        }
        if self.bytes.len() > MAX_PROFILE_IMAGE_BYTES {
            return Err(SkillSwapError::validation("File too large"));
        }
        Ok(())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_tolerates_null_lists() {
        let profile: UserProfile = serde_json::from_value(json!({
            "id": 3,
            "name": "Ada",
            "email": "ada@example.com",
            "skills_to_offer": null,
            "skills_to_learn": ["piano"],
            "average_rating": 0,
            "image_url": null
        }))
        .unwrap();

        assert_eq!(profile.id, UserId(3));
        assert!(profile.skills_to_offer.is_empty());
        assert_eq!(profile.skills_to_learn, vec!["piano".to_string()]);
        assert_eq!(profile.average_rating, 0.0);
    }

    #[test]
    fn test_normalize_skills_trims_and_caps() {
        let skills = normalize_skills(["  rust ", "", "go", "   ", "sql", "cobol"]);
        assert_eq!(skills, vec!["rust", "go", "sql"]);
    }

    #[test]
    fn test_profile_update_serializes_only_set_fields() {
        let update = ProfileUpdate::new()
            .with_bio("Loves teaching")
            .with_skills_to_learn(["guitar", " "]);
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(
            value,
            json!({"bio": "Loves teaching", "skills_to_learn": ["guitar"]})
        );
        assert!(ProfileUpdate::new().is_empty());
    }

    #[test]
    fn test_viewer_rejects_foreign_profile() {
        let mut viewer = Viewer::new(UserProfile::minimal(UserId(1), "Ada"));
        let err = viewer
            .replace_profile(UserProfile::minimal(UserId(2), "Bob"))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(viewer.name(), "Ada");
    }

    #[test]
    fn test_profile_image_validation() {
        assert!(ProfileImage::new("me.PNG", vec![1, 2, 3]).validate().is_ok());
        assert!(ProfileImage::new("me.gif", vec![1]).validate().is_err());
        assert!(ProfileImage::new("noext", vec![1]).validate().is_err());
        assert!(ProfileImage::new("me.jpg", Vec::new()).validate().is_err());

        let too_big = ProfileImage::new("me.jpeg", vec![0; MAX_PROFILE_IMAGE_BYTES + 1]);
        assert!(too_big.validate().is_err());
    }
}
