#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use skillswap_core::conversation::{
    DeliveryStatus, Message, NewConversation, NewMessage, NewRating, Participant, Rating,
    RawConversation,
};
use skillswap_core::matching::MatchList;
use skillswap_core::user::{
    AuthIdentity, Credentials, ProfileImage, ProfileUpdate, SignupRequest, UserProfile,
};
use skillswap_core::{ConversationId, MessageId, Result, SkillExchangeApi, SkillSwapError, UserId};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

/// Every request the mock received, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Signup(String),
    FetchProfile(UserId),
    UpdateProfile(UserId),
    UploadImage(UserId, String),
    ListMatches(UserId),
    ListConversations(UserId),
    ListMessages(ConversationId),
    CreateMessage(ConversationId, String),
    CreateConversation(UserId, UserId),
    MarkRead(ConversationId, UserId),
    SubmitRating(ConversationId, u8),
}

/// In-memory `SkillExchangeApi` with scripted responses.
///
/// Message sends can be held back with [`MockApi::hold_send`] so a test
/// decides when, and in which order, each one completes.
pub struct MockApi {
    pub identity: Mutex<Result<AuthIdentity>>,
    pub profile: Mutex<Result<UserProfile>>,
    pub conversations: Mutex<Result<Vec<RawConversation>>>,
    pub messages: Mutex<HashMap<ConversationId, Vec<Message>>>,
    pub mark_read_error: Mutex<Option<SkillSwapError>>,
    pub create_conversation_error: Mutex<Option<SkillSwapError>>,
    pub rating_error: Mutex<Option<SkillSwapError>>,
    pub update_error: Mutex<Option<SkillSwapError>>,
    pub matches: Mutex<Result<MatchList>>,
    held_sends: Mutex<VecDeque<oneshot::Receiver<Result<Message>>>>,
    calls: Mutex<Vec<Call>>,
    next_id: AtomicI64,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            identity: Mutex::new(Ok(AuthIdentity {
                user_id: UserId(1),
                name: "user1".to_string(),
            })),
            profile: Mutex::new(Err(SkillSwapError::rejected(404, "User not found"))),
            conversations: Mutex::new(Ok(Vec::new())),
            messages: Mutex::new(HashMap::new()),
            mark_read_error: Mutex::new(None),
            create_conversation_error: Mutex::new(None),
            rating_error: Mutex::new(None),
            update_error: Mutex::new(None),
            matches: Mutex::new(Ok(MatchList::default())),
            held_sends: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1000),
        }
    }

    pub fn with_conversations(list: Vec<RawConversation>) -> Self {
        let api = Self::new();
        *api.conversations.lock().unwrap() = Ok(list);
        api
    }

    pub fn set_messages(&self, conversation_id: ConversationId, messages: Vec<Message>) {
        self.messages.lock().unwrap().insert(conversation_id, messages);
    }

    /// Holds back the next message send until the returned sender fires.
    pub fn hold_send(&self) -> oneshot::Sender<Result<Message>> {
        let (tx, rx) = oneshot::channel();
        self.held_sends.lock().unwrap().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|call| matches(call)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

#[async_trait]
impl SkillExchangeApi for MockApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthIdentity> {
        self.record(Call::Login(credentials.email.clone()));
        self.identity.lock().unwrap().clone()
    }

    async fn signup(&self, request: &SignupRequest) -> Result<AuthIdentity> {
        self.record(Call::Signup(request.email.clone()));
        self.identity.lock().unwrap().clone()
    }

    async fn fetch_profile(&self, user_id: UserId) -> Result<UserProfile> {
        self.record(Call::FetchProfile(user_id));
        self.profile.lock().unwrap().clone()
    }

    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate) -> Result<UserProfile> {
        self.record(Call::UpdateProfile(user_id));
        if let Some(err) = self.update_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut profile = UserProfile::minimal(user_id, update.name.clone().unwrap_or_default());
        profile.bio = update.bio.clone();
        profile.skills_to_offer = update.skills_to_offer.clone().unwrap_or_default();
        Ok(profile)
    }

    async fn upload_profile_image(&self, user_id: UserId, image: &ProfileImage) -> Result<String> {
        self.record(Call::UploadImage(user_id, image.file_name.clone()));
        Ok(format!("/static/uploads/user_{}_{}", user_id, image.file_name))
    }

    async fn list_matches(&self, user_id: UserId) -> Result<MatchList> {
        self.record(Call::ListMatches(user_id));
        self.matches.lock().unwrap().clone()
    }

    async fn list_conversations(&self, viewer: UserId) -> Result<Vec<RawConversation>> {
        self.record(Call::ListConversations(viewer));
        self.conversations.lock().unwrap().clone()
    }

    async fn list_messages(&self, conversation_id: ConversationId) -> Result<Vec<Message>> {
        self.record(Call::ListMessages(conversation_id));
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(&conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn create_message(&self, message: &NewMessage) -> Result<Message> {
        self.record(Call::CreateMessage(
            message.conversation_id,
            message.content.clone(),
        ));
        let held = self.held_sends.lock().unwrap().pop_front();
        match held {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(SkillSwapError::transport("send dropped"))),
            None => Ok(confirmed(self.next_id(), message)),
        }
    }

    async fn create_conversation(&self, request: &NewConversation) -> Result<RawConversation> {
        self.record(Call::CreateConversation(request.initiator, request.counterpart));
        if let Some(err) = self.create_conversation_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(raw(
            self.next_id(),
            request.initiator.0,
            request.counterpart.0,
            0,
        ))
    }

    async fn mark_read(&self, conversation_id: ConversationId, viewer: UserId) -> Result<()> {
        self.record(Call::MarkRead(conversation_id, viewer));
        match self.mark_read_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn submit_rating(&self, rating: &NewRating) -> Result<Rating> {
        self.record(Call::SubmitRating(rating.conversation_id, rating.score));
        if let Some(err) = self.rating_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(Rating {
            id: self.next_id(),
            rater_id: rating.rater_id,
            rated_id: rating.rated_id,
            conversation_id: rating.conversation_id,
            rater_name: None,
            score: rating.score,
            comment: rating.comment.clone(),
            timestamp: Some(Utc::now()),
        })
    }
}

pub fn raw(id: i64, a: i64, b: i64, unread_count: u32) -> RawConversation {
    RawConversation {
        id: ConversationId(id),
        participant_a: Participant::new(UserId(a), format!("user{a}"), None),
        participant_b: Participant::new(UserId(b), format!("user{b}"), None),
        unread_count,
        is_rated_by_viewer: false,
        created_at: None,
    }
}

pub fn stored(id: i64, conversation: i64, sender: i64, content: &str) -> Message {
    Message {
        id: Some(MessageId(id)),
        conversation_id: ConversationId(conversation),
        sender_id: UserId(sender),
        sender_name: Some(format!("user{sender}")),
        content: content.to_string(),
        timestamp: Utc::now(),
        is_read: true,
        status: DeliveryStatus::Confirmed,
    }
}

pub fn confirmed(id: i64, request: &NewMessage) -> Message {
    Message {
        id: Some(MessageId(id)),
        conversation_id: request.conversation_id,
        sender_id: request.sender_id,
        sender_name: Some(request.sender_name.clone()),
        content: request.content.clone(),
        timestamp: request.timestamp,
        is_read: false,
        status: DeliveryStatus::Confirmed,
    }
}

/// Polls `check` until it holds or a second has passed.
pub async fn eventually<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}
