//! Client-side data layer for an article-publishing web application.
//!
//! Every public gateway method performs one REST call against a configured
//! base URL and translates the outcome into lifecycle signals for a store
//! ([`domain::ports::Dispatch`]) plus user-facing notifications
//! ([`domain::ports::Notifier`]). Nothing throws past a gateway: transport
//! faults, server errors and malformed bodies all converge on a classified
//! [`domain::failure::ApiFailure`].

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;
pub use config::toml_config::TomlConfig;
pub use core::{ArticleGateway, FollowGateway};
pub use domain::failure::{ApiFailure, FailureKind};
pub use domain::model::{
    Article, ArticleDraft, ArticleListing, ArticleUpdate, AuthorRef, FollowEntry, PaginationMeta,
};
pub use domain::ports::{ConfigProvider, Dispatch, Notifier};
pub use domain::signal::{OpKind, Signal};
pub use utils::error::{ClientError, Result};
