//! Infrastructure layer for the SkillSwap client.
//!
//! Provides the HTTP implementation of [`skillswap_core::SkillExchangeApi`],
//! the wire DTOs behind it, and file-backed configuration.

pub mod config_service;
pub mod dto;
pub mod http_api_client;
pub mod paths;

pub use config_service::ConfigService;
pub use http_api_client::HttpSkillExchangeApi;
pub use paths::SkillSwapPaths;
