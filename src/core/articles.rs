use crate::core::request::{self, ArticleEnvelope, ArticleListEnvelope, ErrorPolicy, MessageEnvelope};
use crate::domain::failure::ApiFailure;
use crate::domain::model::{Article, ArticleDraft, ArticleListing, ArticleUpdate};
use crate::domain::ports::{ConfigProvider, Dispatch, Notifier};
use crate::domain::signal::{OpKind, Signal};
use crate::utils::error::{ClientError, Result};
use reqwest::Method;

/// Gateway for the article CRUD endpoints. Each method performs one round
/// trip and dispatches a begin signal, then a success or failure signal,
/// before returning the typed payload to the caller.
pub struct ArticleGateway<D: Dispatch, N: Notifier, C: ConfigProvider> {
    dispatch: D,
    notifier: N,
    config: C,
    client: reqwest::Client,
}

impl<D: Dispatch, N: Notifier, C: ConfigProvider> ArticleGateway<D, N, C> {
    pub fn new(dispatch: D, notifier: N, config: C) -> Self {
        let client = request::build_client(config.timeout_seconds());
        Self {
            dispatch,
            notifier,
            config,
            client,
        }
    }

    fn began(&self, op: OpKind) {
        self.dispatch.dispatch(Signal::Began(op));
    }

    /// Converges every failure path: store signal, user notification, and
    /// the error value the caller receives.
    fn fail(&self, op: OpKind, failure: ApiFailure) -> ClientError {
        tracing::warn!("{} failed: {}", op, failure);
        self.notifier.error(&failure.message);
        self.dispatch.dispatch(Signal::Failed {
            op,
            failure: failure.clone(),
        });
        ClientError::ApiError(failure)
    }

    /// POST /articles/
    pub async fn create_article(&self, draft: &ArticleDraft) -> Result<Article> {
        let op = OpKind::CreateArticle;
        self.began(op);

        let url = format!("{}/articles/", self.config.base_url());
        let envelope = match request::execute::<_, ArticleEnvelope>(
            &self.client,
            Method::POST,
            &url,
            Some(draft),
            ErrorPolicy::HideInternal,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.article {
            Some(article) => {
                tracing::info!("created article '{}'", article.slug);
                self.dispatch.dispatch(Signal::ArticleCreated(article.clone()));
                if let Some(message) = envelope.message.as_deref() {
                    self.notifier.success(message);
                }
                Ok(article)
            }
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }

    /// GET /articles
    pub async fn list_articles(&self) -> Result<ArticleListing> {
        let op = OpKind::ListArticles;
        self.began(op);

        let url = format!("{}/articles", self.config.base_url());
        self.fetch_listing(op, url).await
    }

    /// GET /articles?user={user}
    pub async fn list_user_articles(&self, user: &str) -> Result<ArticleListing> {
        let op = OpKind::ListUserArticles;
        self.began(op);

        let url = format!("{}/articles?user={}", self.config.base_url(), user);
        self.fetch_listing(op, url).await
    }

    /// GET /articles/{slug}
    pub async fn get_article(&self, slug: &str) -> Result<Article> {
        let op = OpKind::GetArticle;
        self.began(op);

        let url = format!("{}/articles/{}", self.config.base_url(), slug);
        let envelope = match request::execute::<(), ArticleEnvelope>(
            &self.client,
            Method::GET,
            &url,
            None,
            ErrorPolicy::HideInternal,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.article {
            Some(article) => {
                self.dispatch.dispatch(Signal::ArticleLoaded(article.clone()));
                Ok(article)
            }
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }

    /// PUT /articles/{slug}
    pub async fn edit_article(&self, slug: &str, update: &ArticleUpdate) -> Result<Article> {
        let op = OpKind::EditArticle;
        self.began(op);

        let url = format!("{}/articles/{}", self.config.base_url(), slug);
        let envelope = match request::execute::<_, ArticleEnvelope>(
            &self.client,
            Method::PUT,
            &url,
            Some(update),
            ErrorPolicy::HideInternal,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.article {
            Some(article) => {
                tracing::info!("updated article '{}'", article.slug);
                self.dispatch.dispatch(Signal::ArticleUpdated(article.clone()));
                if let Some(message) = envelope.message.as_deref() {
                    self.notifier.success(message);
                }
                Ok(article)
            }
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }

    /// DELETE /articles/{slug}
    pub async fn delete_article(&self, slug: &str) -> Result<String> {
        let op = OpKind::DeleteArticle;
        self.began(op);

        let url = format!("{}/articles/{}", self.config.base_url(), slug);
        let envelope = match request::execute::<(), MessageEnvelope>(
            &self.client,
            Method::DELETE,
            &url,
            None,
            ErrorPolicy::HideInternal,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.message {
            Some(message) => {
                tracing::info!("deleted article '{}'", slug);
                self.dispatch.dispatch(Signal::ArticleDeleted {
                    message: message.clone(),
                });
                self.notifier.success(&message);
                Ok(message)
            }
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }

    /// GET /featuredArticles
    ///
    /// A read like the other list endpoints; no success notification.
    pub async fn featured_articles(&self) -> Result<Vec<Article>> {
        let op = OpKind::ListFeatured;
        self.began(op);

        let url = format!("{}/featuredArticles", self.config.base_url());
        let envelope = match request::execute::<(), ArticleListEnvelope>(
            &self.client,
            Method::GET,
            &url,
            None,
            ErrorPolicy::HideInternal,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.articles {
            Some(articles) => {
                self.dispatch.dispatch(Signal::FeaturedLoaded(articles.clone()));
                Ok(articles)
            }
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }

    /// Both list endpoints share the envelope shape and the store signal.
    async fn fetch_listing(&self, op: OpKind, url: String) -> Result<ArticleListing> {
        let envelope = match request::execute::<(), ArticleListEnvelope>(
            &self.client,
            Method::GET,
            &url,
            None,
            ErrorPolicy::HideInternal,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.articles {
            Some(articles) => {
                tracing::debug!("loaded {} articles", articles.len());
                let listing = ArticleListing {
                    articles,
                    pagination: envelope.pagination_meta,
                };
                self.dispatch.dispatch(Signal::ArticlesLoaded {
                    articles: listing.articles.clone(),
                    pagination: listing.pagination.clone(),
                });
                Ok(listing)
            }
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }
}
