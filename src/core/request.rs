use crate::domain::failure::ApiFailure;
use crate::domain::model::{Article, FollowEntry, PaginationMeta};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How an error status is mapped to a failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// 5xx collapses to a fixed generic failure; the raw body is discarded.
    /// Any other error status surfaces the server body. Article operations
    /// use this.
    HideInternal,
    /// Every error status surfaces the server body. Follow-relationship
    /// operations use this.
    SurfaceAll,
}

/// Success body for endpoints returning a single article.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticleEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub article: Option<Article>,
}

/// Success body for the article list endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ArticleListEnvelope {
    #[serde(default)]
    pub articles: Option<Vec<Article>>,
    #[serde(default)]
    pub pagination_meta: Option<PaginationMeta>,
}

/// Success body for endpoints whose payload is a confirmation message.
#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope {
    #[serde(default)]
    pub message: Option<String>,
}

/// Success body for the followers/following list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct FollowListEnvelope {
    #[serde(default)]
    pub followers: Option<Vec<FollowEntry>>,
    #[serde(default)]
    pub following: Option<Vec<FollowEntry>>,
}

pub(crate) fn build_client(timeout_seconds: u64) -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Issues the request and returns the raw response. A transport fault (no
/// response at all) becomes a `Network` failure instead of propagating.
pub(crate) async fn send<B>(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<&B>,
) -> Result<Response, ApiFailure>
where
    B: Serialize + ?Sized,
{
    tracing::debug!("{} {}", method, url);

    let mut request = client.request(method, url);
    if let Some(body) = body {
        request = request.json(body);
    }

    match request.send().await {
        Ok(response) => Ok(response),
        Err(err) => {
            tracing::warn!("transport failure for {}: {}", url, err);
            Err(ApiFailure::network())
        }
    }
}

/// Turns a response into either the typed success envelope or a classified
/// failure. Total: every status and body shape maps to a value.
pub(crate) async fn classify<E>(response: Response, policy: ErrorPolicy) -> Result<E, ApiFailure>
where
    E: DeserializeOwned,
{
    let status = response.status();
    tracing::debug!("response status {}", status);

    if status.is_success() {
        return match response.json::<E>().await {
            Ok(envelope) => Ok(envelope),
            Err(err) => {
                tracing::warn!("malformed success body: {}", err);
                Err(ApiFailure::malformed())
            }
        };
    }

    if status.is_server_error() && policy == ErrorPolicy::HideInternal {
        return Err(ApiFailure::internal());
    }

    match response.json::<Value>().await {
        Ok(body) => match body.get("message").and_then(Value::as_str) {
            Some(message) => Err(ApiFailure::rejected(message.to_string(), body.clone())),
            None => {
                tracing::warn!("error body without a message field: {}", body);
                Err(ApiFailure::malformed())
            }
        },
        Err(err) => {
            tracing::warn!("unreadable error body: {}", err);
            Err(ApiFailure::malformed())
        }
    }
}

/// One round trip: send, then classify.
pub(crate) async fn execute<B, E>(
    client: &Client,
    method: Method,
    url: &str,
    body: Option<&B>,
    policy: ErrorPolicy,
) -> Result<E, ApiFailure>
where
    B: Serialize + ?Sized,
    E: DeserializeOwned,
{
    let response = send(client, method, url, body).await?;
    classify(response, policy).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::failure::FailureKind;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn classify_parses_success_envelope() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/articles/some-slug");
            then.status(200).json_body(serde_json::json!({
                "article": {"slug": "some-slug", "title": "Some title"}
            }));
        });

        let client = Client::new();
        let envelope: ArticleEnvelope = execute::<(), _>(
            &client,
            Method::GET,
            &server.url("/articles/some-slug"),
            None,
            ErrorPolicy::HideInternal,
        )
        .await
        .unwrap();

        mock.assert();
        assert_eq!(envelope.article.unwrap().slug, "some-slug");
    }

    #[tokio::test]
    async fn classify_hides_internal_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/articles");
            then.status(500)
                .json_body(serde_json::json!({"message": "stack trace details"}));
        });

        let client = Client::new();
        let failure = execute::<(), ArticleListEnvelope>(
            &client,
            Method::GET,
            &server.url("/articles"),
            None,
            ErrorPolicy::HideInternal,
        )
        .await
        .unwrap_err();

        assert_eq!(failure.kind, FailureKind::Internal);
        assert_eq!(failure.message, ApiFailure::INTERNAL_MESSAGE);
        assert!(failure.payload.is_none());
    }

    #[tokio::test]
    async fn classify_surfaces_server_errors_when_asked() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/profiles/jdoe/follow");
            then.status(500)
                .json_body(serde_json::json!({"message": "database down"}));
        });

        let client = Client::new();
        let failure = execute::<(), MessageEnvelope>(
            &client,
            Method::POST,
            &server.url("/profiles/jdoe/follow"),
            None,
            ErrorPolicy::SurfaceAll,
        )
        .await
        .unwrap_err();

        assert_eq!(failure.kind, FailureKind::Rejected);
        assert_eq!(failure.message, "database down");
    }

    #[tokio::test]
    async fn classify_surfaces_rejection_body_verbatim() {
        let server = MockServer::start();
        let body = serde_json::json!({"message": "Title is required", "field": "title"});
        server.mock(|when, then| {
            when.method(POST).path("/articles/");
            then.status(400).json_body(body.clone());
        });

        let client = Client::new();
        let failure = execute::<Value, ArticleEnvelope>(
            &client,
            Method::POST,
            &server.url("/articles/"),
            Some(&serde_json::json!({})),
            ErrorPolicy::HideInternal,
        )
        .await
        .unwrap_err();

        assert_eq!(failure.kind, FailureKind::Rejected);
        assert_eq!(failure.message, "Title is required");
        assert_eq!(failure.payload, Some(body));
    }

    #[tokio::test]
    async fn classify_fails_closed_on_unreadable_error_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/articles");
            then.status(400).body("<html>not json</html>");
        });

        let client = Client::new();
        let failure = execute::<(), ArticleListEnvelope>(
            &client,
            Method::GET,
            &server.url("/articles"),
            None,
            ErrorPolicy::HideInternal,
        )
        .await
        .unwrap_err();

        assert_eq!(failure.kind, FailureKind::Malformed);
    }

    #[tokio::test]
    async fn classify_fails_closed_on_error_body_without_message() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/articles");
            then.status(422).json_body(serde_json::json!({"errors": ["bad"]}));
        });

        let client = Client::new();
        let failure = execute::<(), ArticleListEnvelope>(
            &client,
            Method::GET,
            &server.url("/articles"),
            None,
            ErrorPolicy::HideInternal,
        )
        .await
        .unwrap_err();

        assert_eq!(failure.kind, FailureKind::Malformed);
    }

    #[tokio::test]
    async fn send_maps_transport_faults_to_network_failures() {
        let client = Client::new();
        // Nothing listens on this port.
        let failure = send::<()>(&client, Method::GET, "http://127.0.0.1:9/articles", None)
            .await
            .unwrap_err();

        assert_eq!(failure.kind, FailureKind::Network);
    }
}
