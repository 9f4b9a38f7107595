use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use futures::StreamExt;
use mdesk_domain::config::ApiConfig;
use mdesk_event_bus::{EventBusError, Subscriber};
use mdesk_kernel::server::ApiState;
use mdesk_presence::{Presence, TypingEvent};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug, Default)]
struct Recorder {
    events: Mutex<Vec<Arc<TypingEvent>>>,
}

impl Recorder {
    fn received(&self) -> Vec<Arc<TypingEvent>> {
        self.events.lock().expect("recorder lock").clone()
    }
}

impl Subscriber<TypingEvent> for Recorder {
    fn deliver(&self, event: Arc<TypingEvent>) -> Result<(), EventBusError> {
        self.events.lock().expect("recorder lock").push(event);
        Ok(())
    }
}

fn test_state() -> ApiState {
    let config = ApiConfig::default();
    let slice = mdesk_presence::init(&config).expect("presence init");
    ApiState::builder().config(config).register_slice(slice).build().expect("state")
}

fn test_app(state: &ApiState) -> axum::Router {
    let (router, _doc) = OpenApiRouter::new()
        .merge(mdesk_presence::router())
        .with_state(state.clone())
        .split_for_parts();
    router
}

fn post_typing(json: &str) -> Request<Body> {
    Request::post("/typing")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_owned()))
        .expect("request")
}

#[tokio::test]
async fn ingest_acknowledges_publisher() {
    let state = test_state();
    let app = test_app(&state);

    let response = app
        .oneshot(post_typing(r#"{"channel":"team","user":"bob","typing":true}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let ack: serde_json::Value = serde_json::from_slice(&bytes).expect("json ack");
    assert_eq!(ack, serde_json::json!({ "ok": true }));
}

#[tokio::test]
async fn ingest_acknowledges_even_without_subscribers() {
    let state = test_state();
    let app = test_app(&state);

    let response = app
        .oneshot(post_typing(r#"{"channel":"nobody-listens"}"#))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_body_publishes_defaults() {
    let state = test_state();
    let recorder = Arc::new(Recorder::default());
    let presence = state.get_slice::<Presence>().expect("slice");
    let _guard = presence.channels().subscribe(None, recorder.clone());

    let app = test_app(&state);
    let response = app.oneshot(post_typing("{not json")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let received = recorder.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].channel, "general");
    assert_eq!(received[0].user, "anonymous");
    assert!(!received[0].typing);
}

#[tokio::test]
async fn missing_body_publishes_defaults() {
    let state = test_state();
    let recorder = Arc::new(Recorder::default());
    let presence = state.get_slice::<Presence>().expect("slice");
    let _guard = presence.channels().subscribe(None, recorder.clone());

    let app = test_app(&state);
    let response = app
        .oneshot(Request::post("/typing").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(recorder.received().len(), 1);
}

#[tokio::test]
async fn stream_receives_published_event() {
    let state = test_state();
    let app = test_app(&state);

    let stream_response = app
        .clone()
        .oneshot(Request::get("/typing/stream?channel=team").body(Body::empty()).expect("request"))
        .await
        .expect("stream response");

    assert_eq!(stream_response.status(), StatusCode::OK);
    let content_type = stream_response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(content_type.starts_with("text/event-stream"), "got {content_type}");

    let mut body = stream_response.into_body().into_data_stream();

    let post_response = app
        .oneshot(post_typing(r#"{"channel":"team","user":"bob","typing":false}"#))
        .await
        .expect("post response");
    assert_eq!(post_response.status(), StatusCode::OK);

    let chunk = tokio::time::timeout(Duration::from_secs(1), body.next())
        .await
        .expect("frame within timeout")
        .expect("stream still open")
        .expect("chunk");
    let text = String::from_utf8(chunk.to_vec()).expect("utf-8 frame");

    assert!(text.starts_with("event: typing\n"), "unexpected frame: {text}");
    assert_eq!(text.matches("event: typing").count(), 1, "exactly one frame per event");

    let data_line = text.lines().find(|l| l.starts_with("data: ")).expect("data line");
    let payload: serde_json::Value =
        serde_json::from_str(&data_line["data: ".len()..]).expect("payload json");
    assert_eq!(payload["user"], "bob");
    assert_eq!(payload["typing"], false);
    assert!(payload["timestamp"].is_i64(), "timestamp must be numeric");
}

#[tokio::test]
async fn stream_defaults_to_configured_channel() {
    let state = test_state();
    let app = test_app(&state);

    let stream_response = app
        .clone()
        .oneshot(Request::get("/typing/stream").body(Body::empty()).expect("request"))
        .await
        .expect("stream response");
    let mut body = stream_response.into_body().into_data_stream();

    // Body-less publish lands on the default channel as well.
    let post_response = app
        .oneshot(Request::post("/typing").body(Body::empty()).expect("request"))
        .await
        .expect("post response");
    assert_eq!(post_response.status(), StatusCode::OK);

    let chunk = tokio::time::timeout(Duration::from_secs(1), body.next())
        .await
        .expect("frame within timeout")
        .expect("stream still open")
        .expect("chunk");
    let text = String::from_utf8(chunk.to_vec()).expect("utf-8 frame");
    let data_line = text.lines().find(|l| l.starts_with("data: ")).expect("data line");
    let payload: serde_json::Value =
        serde_json::from_str(&data_line["data: ".len()..]).expect("payload json");
    assert_eq!(payload["channel"], "general");
    assert_eq!(payload["user"], "anonymous");
}

#[tokio::test]
async fn idle_stream_emits_keep_alive_comments() {
    let mut config = ApiConfig::default();
    config.presence.keep_alive_seconds = 1;
    let slice = mdesk_presence::init(&config).expect("presence init");
    let state =
        ApiState::builder().config(config).register_slice(slice).build().expect("state");
    let app = test_app(&state);

    let stream_response = app
        .oneshot(Request::get("/typing/stream").body(Body::empty()).expect("request"))
        .await
        .expect("stream response");
    let mut body = stream_response.into_body().into_data_stream();

    // Nothing is published; the connection must still produce comment frames
    // at the configured interval.
    let chunk = tokio::time::timeout(Duration::from_secs(3), body.next())
        .await
        .expect("keep-alive within timeout")
        .expect("stream still open")
        .expect("chunk");
    let text = String::from_utf8(chunk.to_vec()).expect("utf-8 frame");
    assert!(text.starts_with(':'), "idle stream yields a comment frame, got {text}");
}

#[tokio::test]
async fn client_disconnect_releases_subscription() {
    let state = test_state();
    let app = test_app(&state);
    let channels = state.get_slice::<Presence>().expect("slice").channels();

    let stream_response = app
        .clone()
        .oneshot(Request::get("/typing/stream?channel=team").body(Body::empty()).expect("request"))
        .await
        .expect("stream response");
    assert_eq!(channels.subscriber_count("team"), 1);

    // Client goes away: the response body is dropped and teardown must be
    // synchronous.
    drop(stream_response);
    assert_eq!(channels.subscriber_count("team"), 0);

    let post_response = app
        .oneshot(post_typing(r#"{"channel":"team"}"#))
        .await
        .expect("post response");
    assert_eq!(post_response.status(), StatusCode::OK, "publisher is unaffected");
}

#[tokio::test]
async fn streams_on_different_channels_are_isolated() {
    let state = test_state();
    let app = test_app(&state);

    let room1 = app
        .clone()
        .oneshot(Request::get("/typing/stream?channel=room1").body(Body::empty()).expect("request"))
        .await
        .expect("stream response");
    let mut room1_body = room1.into_body().into_data_stream();

    let post_response = app
        .oneshot(post_typing(r#"{"channel":"room2","user":"eve","typing":true}"#))
        .await
        .expect("post response");
    assert_eq!(post_response.status(), StatusCode::OK);

    let pending = tokio::time::timeout(Duration::from_millis(100), room1_body.next()).await;
    assert!(pending.is_err(), "room1 must not observe room2 events");
}
