//! HttpSkillExchangeApi - REST implementation of [`SkillExchangeApi`].
//!
//! Every request goes through [`HttpSkillExchangeApi::execute`], which maps
//! failures onto the client's error taxonomy:
//! - the request never completed (connect, timeout, body read): `Transport`
//! - a non-success status: `Rejected`, carrying the server's error text

use crate::dto::{
    AuthDto, ChatDto, ChatListing, CreateChatBody, CreateMessageBody, ErrorBody, MarkReadBody,
    MessageDto, MessageListing, RatingBody, RatingDto, UploadDto,
};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use skillswap_core::config::ClientConfig;
use skillswap_core::conversation::{
    Message, NewConversation, NewMessage, NewRating, Rating, RawConversation,
};
use skillswap_core::matching::MatchList;
use skillswap_core::user::{
    AuthIdentity, Credentials, ProfileImage, ProfileUpdate, SignupRequest, UserProfile,
};
use skillswap_core::{ConversationId, Result, SkillExchangeApi, SkillSwapError, UserId};
use std::time::Duration;

/// Client for the SkillSwap REST API.
#[derive(Clone)]
pub struct HttpSkillExchangeApi {
    client: Client,
    base_url: String,
}

impl HttpSkillExchangeApi {
    /// Creates a client for `config.api_url` with the configured request timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| SkillSwapError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and decodes a successful JSON answer.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| SkillSwapError::transport(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SkillSwapError::transport(format!("Failed to read {} response: {}", what, e))
        })?;

        if !status.is_success() {
            let message = ErrorBody::message_from(&body);
            tracing::debug!(
                "[HttpSkillExchangeApi] {} rejected ({}): {}",
                what,
                status,
                message
            );
            return Err(SkillSwapError::rejected(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("[HttpSkillExchangeApi] Unexpected {} response: {}", what, e);
            SkillSwapError::from(e)
        })
    }
}

#[async_trait]
impl SkillExchangeApi for HttpSkillExchangeApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthIdentity> {
        let request = self.client.post(self.url("/auth/login")).json(credentials);
        let dto: AuthDto = self.execute(request, "login").await?;
        Ok(dto.into())
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthIdentity> {
        let request = self.client.post(self.url("/auth/signup")).json(request);
        let dto: AuthDto = self.execute(request, "signup").await?;
        Ok(dto.into())
    }

    async fn fetch_profile(&self, user_id: UserId) -> Result<UserProfile> {
        let request = self.client.get(self.url(&format!("/profile/{}", user_id)));
        self.execute(request, "fetch profile").await
    }

    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate) -> Result<UserProfile> {
        let request = self
            .client
            .put(self.url(&format!("/profile/{}", user_id)))
            .json(update);
        self.execute(request, "update profile").await
    }

    async fn upload_profile_image(&self, user_id: UserId, image: &ProfileImage) -> Result<String> {
        let mime = mime_guess::from_path(&image.file_name).first_or_octet_stream();
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(mime.as_ref())
            .map_err(|e| SkillSwapError::validation(format!("Invalid image type: {}", e)))?;
        let form = Form::new().part("image", part);

        let request = self
            .client
            .post(self.url(&format!("/upload/profile-image/{}", user_id)))
            .multipart(form);
        let dto: UploadDto = self.execute(request, "upload image").await?;
        Ok(dto.image_url)
    }

    async fn list_matches(&self, user_id: UserId) -> Result<MatchList> {
        let request = self.client.get(self.url(&format!("/matches/{}", user_id)));
        self.execute(request, "list matches").await
    }

    async fn list_conversations(&self, viewer: UserId) -> Result<Vec<RawConversation>> {
        let request = self.client.get(self.url(&format!("/chats/{}", viewer)));
        let listing: ChatListing = self.execute(request, "list chats").await?;
        Ok(listing.into_conversations())
    }

    async fn list_messages(&self, conversation_id: ConversationId) -> Result<Vec<Message>> {
        let request = self
            .client
            .get(self.url(&format!("/chats/{}/messages", conversation_id)));
        let listing: MessageListing = self.execute(request, "list messages").await?;
        Ok(listing.into_messages())
    }

    async fn create_message(&self, message: &NewMessage) -> Result<Message> {
        let request = self
            .client
            .post(self.url(&format!("/chats/{}/messages", message.conversation_id)))
            .json(&CreateMessageBody::from(message));
        let dto: MessageDto = self.execute(request, "send message").await?;
        Ok(dto.into())
    }

    async fn create_conversation(&self, request: &NewConversation) -> Result<RawConversation> {
        let body = CreateChatBody::from(request);
        let request = self.client.post(self.url("/chats")).json(&body);
        let dto: ChatDto = self.execute(request, "create chat").await?;
        Ok(dto.into())
    }

    async fn mark_read(&self, conversation_id: ConversationId, viewer: UserId) -> Result<()> {
        let request = self
            .client
            .put(self.url(&format!("/chats/{}/messages/read", conversation_id)))
            .json(&MarkReadBody { user_id: viewer.0 });
        let _: IgnoredAny = self.execute(request, "mark read").await?;
        Ok(())
    }

    async fn submit_rating(&self, rating: &NewRating) -> Result<Rating> {
        let request = self
            .client
            .post(self.url("/ratings"))
            .json(&RatingBody::from(rating));
        let dto: RatingDto = self.execute(request, "submit rating").await?;
        Ok(dto.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_joined_without_double_slash() {
        let config = ClientConfig {
            api_url: "http://localhost:5000/".to_string(),
            ..ClientConfig::default()
        };
        let api = HttpSkillExchangeApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000");
        assert_eq!(api.url("/chats/4"), "http://localhost:5000/chats/4");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_transport_error() {
        let config = ClientConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 2,
            ..ClientConfig::default()
        };
        let api = HttpSkillExchangeApi::new(&config).unwrap();

        let err = api.list_conversations(UserId(1)).await.unwrap_err();
        assert!(err.is_transport());
    }
}
