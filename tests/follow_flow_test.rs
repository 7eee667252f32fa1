use blog_client::core::FollowGateway;
use blog_client::domain::failure::FailureKind;
use blog_client::domain::ports::{ConfigProvider, Dispatch, Notifier};
use blog_client::domain::signal::{OpKind, Signal};
use httpmock::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct RecordingDispatch {
    signals: Arc<Mutex<Vec<Signal>>>,
}

impl RecordingDispatch {
    fn signals(&self) -> Vec<Signal> {
        self.signals.lock().unwrap().clone()
    }
}

impl Dispatch for RecordingDispatch {
    fn dispatch(&self, signal: Signal) {
        self.signals.lock().unwrap().push(signal);
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    successes: Arc<Mutex<Vec<String>>>,
    errors: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    fn successes(&self) -> Vec<String> {
        self.successes.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().unwrap().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

struct TestConfig {
    base_url: String,
}

impl ConfigProvider for TestConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        5
    }
}

fn gateway_for(
    base_url: String,
) -> (
    FollowGateway<RecordingDispatch, RecordingNotifier, TestConfig>,
    RecordingDispatch,
    RecordingNotifier,
) {
    let dispatch = RecordingDispatch::default();
    let notifier = RecordingNotifier::default();
    let gateway = FollowGateway::new(
        dispatch.clone(),
        notifier.clone(),
        TestConfig { base_url },
    );
    (gateway, dispatch, notifier)
}

#[tokio::test]
async fn follow_success_dispatches_edge_then_refreshes_both_lists() {
    let server = MockServer::start();
    let follow_mock = server.mock(|when, then| {
        when.method(POST).path("/profiles/jane/follow");
        then.status(200)
            .json_body(serde_json::json!({"message": "You are now following jane"}));
    });
    let followers_mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/jdoe/followers");
        then.status(200).json_body(serde_json::json!({
            "followers": [{"username": "jane"}]
        }));
    });
    let following_mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/jdoe/following");
        then.status(200).json_body(serde_json::json!({
            "following": [{"username": "jane"}]
        }));
    });

    let (gateway, dispatch, notifier) = gateway_for(server.url(""));
    let message = gateway.follow("jane", "jdoe").await.unwrap();

    follow_mock.assert();
    followers_mock.assert();
    following_mock.assert();
    assert_eq!(message, "You are now following jane");

    let signals = dispatch.signals();
    assert_eq!(signals[0], Signal::Began(OpKind::FollowUser));
    assert_eq!(
        signals[1],
        Signal::Followed {
            message: "You are now following jane".to_string()
        }
    );
    // The dependent refreshes run after the relationship signal, each with
    // its own begin/success pair.
    assert_eq!(signals[2], Signal::Began(OpKind::ListFollowers));
    assert!(matches!(signals[3], Signal::FollowersLoaded(_)));
    assert_eq!(signals[4], Signal::Began(OpKind::ListFollowing));
    assert!(matches!(signals[5], Signal::FollowingLoaded(_)));

    assert_eq!(notifier.successes(), vec!["You are now following jane"]);
}

#[tokio::test]
async fn follow_with_non_200_success_status_changes_nothing() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/profiles/jane/follow");
        then.status(204);
    });
    let followers_mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/jdoe/followers");
        then.status(200).json_body(serde_json::json!({"followers": []}));
    });
    let following_mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/jdoe/following");
        then.status(200).json_body(serde_json::json!({"following": []}));
    });

    let (gateway, dispatch, notifier) = gateway_for(server.url(""));
    let err = gateway.follow("jane", "jdoe").await.unwrap_err();

    assert_eq!(err.as_api_failure().unwrap().kind, FailureKind::Malformed);
    assert_eq!(followers_mock.hits(), 0);
    assert_eq!(following_mock.hits(), 0);

    let signals = dispatch.signals();
    assert!(!signals.iter().any(|s| matches!(s, Signal::Followed { .. })));
    assert!(matches!(
        signals[1],
        Signal::Failed {
            op: OpKind::FollowUser,
            ..
        }
    ));
    assert!(notifier.successes().is_empty());
}

#[tokio::test]
async fn follow_surfaces_server_body_even_for_server_errors() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/profiles/jane/follow");
        then.status(500)
            .json_body(serde_json::json!({"message": "database down"}));
    });

    let (gateway, dispatch, notifier) = gateway_for(server.url(""));
    let err = gateway.follow("jane", "jdoe").await.unwrap_err();

    // Unlike the article endpoints, this API area has no internal-error
    // masking: the server message is surfaced as-is.
    let failure = err.as_api_failure().unwrap();
    assert_eq!(failure.kind, FailureKind::Rejected);
    assert_eq!(failure.message, "database down");

    assert!(matches!(
        dispatch.signals()[1],
        Signal::Failed {
            op: OpKind::FollowUser,
            ..
        }
    ));
    assert_eq!(notifier.errors(), vec!["database down"]);
}

#[tokio::test]
async fn unfollow_success_dispatches_edge_then_refreshes_both_lists() {
    let server = MockServer::start();
    let unfollow_mock = server.mock(|when, then| {
        when.method(DELETE).path("/profiles/jane/unfollow");
        then.status(200)
            .json_body(serde_json::json!({"message": "You unfollowed jane"}));
    });
    let followers_mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/jdoe/followers");
        then.status(200).json_body(serde_json::json!({"followers": []}));
    });
    let following_mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/jdoe/following");
        then.status(200).json_body(serde_json::json!({"following": []}));
    });

    let (gateway, dispatch, notifier) = gateway_for(server.url(""));
    let message = gateway.unfollow("jane", "jdoe").await.unwrap();

    unfollow_mock.assert();
    followers_mock.assert();
    following_mock.assert();
    assert_eq!(message, "You unfollowed jane");
    assert_eq!(
        dispatch.signals()[1],
        Signal::Unfollowed {
            message: "You unfollowed jane".to_string()
        }
    );
    assert_eq!(notifier.successes(), vec!["You unfollowed jane"]);
}

#[tokio::test]
async fn refresh_failure_does_not_roll_back_the_relationship_change() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/profiles/jane/follow");
        then.status(200)
            .json_body(serde_json::json!({"message": "You are now following jane"}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/profiles/jdoe/followers");
        then.status(500)
            .json_body(serde_json::json!({"message": "followers unavailable"}));
    });
    let following_mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/jdoe/following");
        then.status(200).json_body(serde_json::json!({"following": []}));
    });

    let (gateway, dispatch, _) = gateway_for(server.url(""));
    let message = gateway.follow("jane", "jdoe").await.unwrap();

    // The composite still succeeds; the broken refresh fails on its own.
    assert_eq!(message, "You are now following jane");
    following_mock.assert();

    let signals = dispatch.signals();
    assert!(signals.iter().any(|s| matches!(s, Signal::Followed { .. })));
    assert!(signals.iter().any(|s| matches!(
        s,
        Signal::Failed {
            op: OpKind::ListFollowers,
            ..
        }
    )));
    assert!(signals
        .iter()
        .any(|s| matches!(s, Signal::FollowingLoaded(_))));
}

#[tokio::test]
async fn followers_list_success_carries_entries() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/profiles/jane/followers");
        then.status(200).json_body(serde_json::json!({
            "followers": [
                {"username": "jdoe", "bio": "hi"},
                {"username": "sam"}
            ]
        }));
    });

    let (gateway, dispatch, _) = gateway_for(server.url(""));
    let followers = gateway.followers("jane").await.unwrap();

    mock.assert();
    assert_eq!(followers.len(), 2);
    assert_eq!(followers[0].username, "jdoe");
    match &dispatch.signals()[1] {
        Signal::FollowersLoaded(entries) => assert_eq!(entries.len(), 2),
        other => panic!("expected FollowersLoaded, got {:?}", other),
    }
}

#[tokio::test]
async fn following_list_with_wrong_field_fails_closed() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/profiles/jane/following");
        then.status(200)
            .json_body(serde_json::json!({"followers": []}));
    });

    let (gateway, dispatch, _) = gateway_for(server.url(""));
    let err = gateway.following("jane").await.unwrap_err();

    assert_eq!(err.as_api_failure().unwrap().kind, FailureKind::Malformed);
    assert!(matches!(
        dispatch.signals()[1],
        Signal::Failed {
            op: OpKind::ListFollowing,
            ..
        }
    ));
}
