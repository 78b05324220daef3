//! Session use case implementation.
//!
//! This module provides the `SessionUseCase` which owns the logged-in viewer
//! and keeps the conversation state in step with it: every login starts a
//! fresh conversation state, every logout wipes it.

use crate::conversation_usecase::ConversationUseCase;
use crate::notice::{self, Notice};
use anyhow::{Context, Result, anyhow};
use skillswap_core::SkillExchangeApi;
use skillswap_core::conversation::Message;
use skillswap_core::user::{
    AuthIdentity, Credentials, ProfileImage, ProfileUpdate, SignupRequest, UserProfile, Viewer,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Use case for the viewer's session and profile.
///
/// # Responsibilities
///
/// - Authenticating and loading the viewer's profile
/// - Resetting the conversation state on login and logout
/// - Saving profile changes and uploading the avatar image
pub struct SessionUseCase {
    api: Arc<dyn SkillExchangeApi>,
    viewer: RwLock<Option<Viewer>>,
    conversations: Arc<ConversationUseCase>,
}

impl SessionUseCase {
    pub fn new(api: Arc<dyn SkillExchangeApi>) -> Self {
        let conversations = Arc::new(ConversationUseCase::new(api.clone()));
        Self {
            api,
            viewer: RwLock::new(None),
            conversations,
        }
    }

    /// The conversation use case bound to this session.
    pub fn conversations(&self) -> Arc<ConversationUseCase> {
        self.conversations.clone()
    }

    pub async fn viewer(&self) -> Option<Viewer> {
        self.viewer.read().await.clone()
    }

    // ============================================================================
    // Authentication
    // ============================================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<Viewer> {
        let credentials = Credentials {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let identity = self
            .api
            .login(&credentials)
            .await
            .context("Login failed")?;
        self.establish(identity).await
    }

    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Viewer> {
        let request = SignupRequest {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let identity = self
            .api
            .signup(&request)
            .await
            .context("Signup failed")?;
        self.establish(identity).await
    }

    /// Forgets the viewer together with every piece of conversation state.
    pub async fn logout(&self) {
        let previous = self.viewer.write().await.take();
        self.conversations.reset(None).await;
        if let Some(viewer) = previous {
            tracing::info!("[SessionUseCase] Logged out user {}", viewer.id());
        }
    }

    async fn establish(&self, identity: AuthIdentity) -> Result<Viewer> {
        let profile = match self.api.fetch_profile(identity.user_id).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!(
                    "[SessionUseCase] Failed to load profile of {}, using login identity: {}",
                    identity.user_id,
                    err
                );
                UserProfile::minimal(identity.user_id, identity.name)
            }
        };

        let viewer = Viewer::new(profile);
        *self.viewer.write().await = Some(viewer.clone());
        self.conversations.reset(Some(viewer.id())).await;
        tracing::info!(
            "[SessionUseCase] Logged in as {} ({})",
            viewer.name(),
            viewer.id()
        );

        self.refresh_conversations().await;
        Ok(viewer)
    }

    // ============================================================================
    // Messaging
    // ============================================================================

    /// Sends `text` to the active conversation as the viewer.
    pub async fn send_message(&self, text: &str) -> Result<Message> {
        let viewer = self.require_viewer().await?;
        let conversation_id = self
            .conversations
            .active_id()
            .await
            .ok_or_else(|| anyhow!("No conversation is selected"))?;
        let message = self
            .conversations
            .send_message(conversation_id, viewer.id(), viewer.name(), text)
            .await?;
        Ok(message)
    }

    // ============================================================================
    // Profile
    // ============================================================================

    /// Saves a partial profile update and returns the stored profile.
    pub async fn save_profile(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let viewer = self.require_viewer().await?;
        if update.is_empty() {
            return Ok(viewer.profile().clone());
        }

        let profile = match self.api.update_profile(viewer.id(), &update).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!("[SessionUseCase] Profile update failed: {}", err);
                self.conversations
                    .push_notice(Notice::from_failure(&err, notice::PROFILE_UPDATE_FAILED))
                    .await;
                return Err(err).context("Failed to update profile");
            }
        };

        if let Some(current) = self.viewer.write().await.as_mut() {
            current.replace_profile(profile.clone())?;
        }
        tracing::info!("[SessionUseCase] Profile of {} updated", viewer.id());

        self.refresh_conversations().await;
        Ok(profile)
    }

    /// Validates and uploads a new avatar image, returning its URL.
    pub async fn upload_profile_image(&self, image: ProfileImage) -> Result<String> {
        let viewer = self.require_viewer().await?;
        if let Err(err) = image.validate() {
            self.conversations
                .push_notice(Notice::from_failure(&err, notice::IMAGE_UPLOAD_FAILED))
                .await;
            return Err(err.into());
        }

        let image_url = match self.api.upload_profile_image(viewer.id(), &image).await {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!("[SessionUseCase] Image upload failed: {}", err);
                self.conversations
                    .push_notice(Notice::from_failure(&err, notice::IMAGE_UPLOAD_FAILED))
                    .await;
                return Err(err).context("Failed to upload profile image");
            }
        };

        if let Some(current) = self.viewer.write().await.as_mut() {
            current.set_image_url(image_url.clone());
        }
        tracing::info!("[SessionUseCase] Profile image of {} updated", viewer.id());

        self.refresh_conversations().await;
        Ok(image_url)
    }

    /// Reads an image file from disk and uploads it.
    pub async fn upload_profile_image_from_path(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("Not a file: {}", path.display()))?;
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image file: {}", path.display()))?;
        self.upload_profile_image(ProfileImage::new(file_name, bytes))
            .await
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn require_viewer(&self) -> Result<Viewer> {
        self.viewer().await.ok_or_else(|| anyhow!("No user is logged in"))
    }

    async fn refresh_conversations(&self) {
        if let Err(err) = self.conversations.refresh().await {
            tracing::warn!("[SessionUseCase] Conversation refresh failed: {}", err);
        }
    }
}
