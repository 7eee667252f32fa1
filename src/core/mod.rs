pub mod articles;
pub mod follows;
pub mod request;

pub use crate::domain::model::{
    Article, ArticleDraft, ArticleListing, ArticleUpdate, FollowEntry, PaginationMeta,
};
pub use crate::domain::ports::{ConfigProvider, Dispatch, Notifier};
pub use crate::utils::error::Result;
pub use articles::ArticleGateway;
pub use follows::FollowGateway;
