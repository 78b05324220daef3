pub mod chats;
pub mod config;
pub mod matches;
pub mod profile;

use crate::Login;
use anyhow::{Context, Result};
use colored::Colorize;
use skillswap_application::{ConversationUseCase, MatchUseCase, NoticeLevel, SessionUseCase};
use skillswap_core::config::ClientConfig;
use skillswap_core::user::Viewer;
use skillswap_infrastructure::HttpSkillExchangeApi;
use std::sync::Arc;

/// Use cases wired to the HTTP API.
pub struct App {
    pub session: SessionUseCase,
    pub matches: MatchUseCase,
}

impl App {
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let api = Arc::new(
            HttpSkillExchangeApi::new(config).context("Failed to create API client")?,
        );
        tracing::debug!("[CLI] Using API at {}", api.base_url());
        Ok(Self {
            session: SessionUseCase::new(api.clone()),
            matches: MatchUseCase::new(api),
        })
    }

    /// Connects and logs in; the conversation list is loaded as part of login.
    pub async fn login(config: &ClientConfig, login: &Login) -> Result<Self> {
        let app = Self::connect(config)?;
        app.session.login(&login.email, &login.password).await?;
        Ok(app)
    }

    pub async fn signup(&self, name: &str, login: &Login) -> Result<()> {
        let viewer = self
            .session
            .signup(name, &login.email, &login.password)
            .await?;
        println!(
            "{}",
            format!("Welcome, {}! Your user id is {}.", viewer.name(), viewer.id()).green()
        );
        Ok(())
    }

    pub fn conversations(&self) -> Arc<ConversationUseCase> {
        self.session.conversations()
    }

    pub async fn viewer(&self) -> Result<Viewer> {
        self.session
            .viewer()
            .await
            .context("Not logged in")
    }

    /// Prints and clears the queued notices.
    pub async fn flush_notices(&self) {
        for notice in self.conversations().take_notices().await {
            match notice.level {
                NoticeLevel::Info => println!("{}", notice.message.green()),
                NoticeLevel::Error => eprintln!("{}", notice.message.red()),
            }
        }
    }
}
