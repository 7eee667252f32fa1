use crate::domain::failure::ApiFailure;
use crate::domain::model::{Article, FollowEntry, PaginationMeta};
use std::fmt;

/// One variant per API operation the client performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    CreateArticle,
    ListArticles,
    GetArticle,
    ListUserArticles,
    EditArticle,
    DeleteArticle,
    ListFeatured,
    ListFollowers,
    ListFollowing,
    FollowUser,
    UnfollowUser,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::CreateArticle => "create_article",
            OpKind::ListArticles => "list_articles",
            OpKind::GetArticle => "get_article",
            OpKind::ListUserArticles => "list_user_articles",
            OpKind::EditArticle => "edit_article",
            OpKind::DeleteArticle => "delete_article",
            OpKind::ListFeatured => "list_featured",
            OpKind::ListFollowers => "list_followers",
            OpKind::ListFollowing => "list_following",
            OpKind::FollowUser => "follow_user",
            OpKind::UnfollowUser => "unfollow_user",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle notification emitted to the store. Every operation dispatches
/// exactly one `Began` followed by exactly one success variant or one
/// `Failed`, in that order.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    Began(OpKind),
    ArticleCreated(Article),
    ArticleLoaded(Article),
    ArticlesLoaded {
        articles: Vec<Article>,
        pagination: Option<PaginationMeta>,
    },
    ArticleUpdated(Article),
    ArticleDeleted {
        message: String,
    },
    FeaturedLoaded(Vec<Article>),
    FollowersLoaded(Vec<FollowEntry>),
    FollowingLoaded(Vec<FollowEntry>),
    Followed {
        message: String,
    },
    Unfollowed {
        message: String,
    },
    Failed {
        op: OpKind,
        failure: ApiFailure,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_kind_names_are_stable() {
        assert_eq!(OpKind::CreateArticle.as_str(), "create_article");
        assert_eq!(OpKind::UnfollowUser.to_string(), "unfollow_user");
    }
}
