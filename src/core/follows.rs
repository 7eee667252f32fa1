use crate::core::request::{self, ErrorPolicy, FollowListEnvelope, MessageEnvelope};
use crate::domain::failure::ApiFailure;
use crate::domain::model::FollowEntry;
use crate::domain::ports::{ConfigProvider, Dispatch, Notifier};
use crate::domain::signal::{OpKind, Signal};
use crate::utils::error::{ClientError, Result};
use reqwest::{Method, StatusCode};

/// Gateway for the follow-relationship endpoints. Unlike the article
/// gateway, error statuses always surface the server body; there is no
/// internal-error special case for this API area.
pub struct FollowGateway<D: Dispatch, N: Notifier, C: ConfigProvider> {
    dispatch: D,
    notifier: N,
    config: C,
    client: reqwest::Client,
}

impl<D: Dispatch, N: Notifier, C: ConfigProvider> FollowGateway<D, N, C> {
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

    fn fail(&self, op: OpKind, failure: ApiFailure) -> ClientError {
        tracing::warn!("{} failed: {}", op, failure);
        self.notifier.error(&failure.message);
        self.dispatch.dispatch(Signal::Failed {
            op,
            failure: failure.clone(),
        });
        ClientError::ApiError(failure)
    }

    /// GET /profiles/{username}/followers
    pub async fn followers(&self, username: &str) -> Result<Vec<FollowEntry>> {
        let op = OpKind::ListFollowers;
        self.began(op);

        let url = format!("{}/profiles/{}/followers", self.config.base_url(), username);
        let envelope = match request::execute::<(), FollowListEnvelope>(
            &self.client,
            Method::GET,
            &url,
            None,
            ErrorPolicy::SurfaceAll,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.followers {
            Some(followers) => {
                tracing::debug!("{} has {} followers", username, followers.len());
                self.dispatch
                    .dispatch(Signal::FollowersLoaded(followers.clone()));
                Ok(followers)
            }
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }

    /// GET /profiles/{username}/following
    pub async fn following(&self, username: &str) -> Result<Vec<FollowEntry>> {
        let op = OpKind::ListFollowing;
        self.began(op);

        let url = format!("{}/profiles/{}/following", self.config.base_url(), username);
        let envelope = match request::execute::<(), FollowListEnvelope>(
            &self.client,
            Method::GET,
            &url,
            None,
            ErrorPolicy::SurfaceAll,
        )
        .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.following {
            Some(following) => {
                tracing::debug!("{} follows {} users", username, following.len());
                self.dispatch
                    .dispatch(Signal::FollowingLoaded(following.clone()));
                Ok(following)
            }
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }

    /// POST /profiles/{username}/follow
    ///
    /// On success the followers and following lists of `acting_user` are
    /// re-fetched so the store reflects the new edge. Refresh failures take
    /// their own failure paths and never affect the relationship signal
    /// already dispatched or the returned message.
    pub async fn follow(&self, username: &str, acting_user: &str) -> Result<String> {
        let op = OpKind::FollowUser;
        let url = format!("{}/profiles/{}/follow", self.config.base_url(), username);
        let message = self.relationship_call(op, Method::POST, &url).await?;

        self.dispatch.dispatch(Signal::Followed {
            message: message.clone(),
        });
        self.notifier.success(&message);
        self.refresh_profile_lists(acting_user).await;
        Ok(message)
    }

    /// DELETE /profiles/{username}/unfollow
    ///
    /// Same re-fetch behavior as `follow`.
    pub async fn unfollow(&self, username: &str, acting_user: &str) -> Result<String> {
        let op = OpKind::UnfollowUser;
        let url = format!("{}/profiles/{}/unfollow", self.config.base_url(), username);
        let message = self.relationship_call(op, Method::DELETE, &url).await?;

        self.dispatch.dispatch(Signal::Unfollowed {
            message: message.clone(),
        });
        self.notifier.success(&message);
        self.refresh_profile_lists(acting_user).await;
        Ok(message)
    }

    /// Shared half of follow/unfollow: begin signal, the round trip, and the
    /// status-200 gate. The server signals a state change with exactly 200;
    /// any other 2xx means the edge did not change and is failed closed.
    async fn relationship_call(&self, op: OpKind, method: Method, url: &str) -> Result<String> {
        self.began(op);

        let response = match request::send::<()>(&self.client, method, url, None).await {
            Ok(response) => response,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        let status = response.status();
        if status.is_success() && status != StatusCode::OK {
            tracing::warn!("{} answered {} instead of 200", op, status);
            return Err(self.fail(op, ApiFailure::malformed()));
        }

        let envelope = match request::classify::<MessageEnvelope>(response, ErrorPolicy::SurfaceAll)
            .await
        {
            Ok(envelope) => envelope,
            Err(failure) => return Err(self.fail(op, failure)),
        };

        match envelope.message {
            Some(message) => Ok(message),
            None => Err(self.fail(op, ApiFailure::malformed())),
        }
    }

    /// Dependent re-fetches after a relationship change. Each one dispatches
    /// its own begin/success/failure signals; errors are only logged here.
    async fn refresh_profile_lists(&self, acting_user: &str) {
        if let Err(err) = self.followers(acting_user).await {
            tracing::debug!("followers refresh failed: {}", err);
        }
        if let Err(err) = self.following(acting_user).await {
            tracing::debug!("following refresh failed: {}", err);
        }
    }
}
