use crate::Presence;
use crate::event::TypingDraft;
use crate::stream::TypingEventStream;
use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::sse::{KeepAlive, KeepAliveStream, Sse};
use mdesk_domain::constants::PRESENCE_TAG;
use mdesk_kernel::server::ApiState;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Acknowledgement returned to every publisher that reaches the endpoint.
#[derive(Debug, Serialize, ToSchema)]
struct TypingAck {
    ok: bool,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default)]
struct StreamParams {
    /// Channel to subscribe to; the configured default channel when omitted.
    channel: Option<String>,
}

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(publish_typing)).routes(routes!(typing_stream))
}

#[utoipa::path(
    post,
    path = "/typing",
    request_body = TypingDraft,
    responses((status = OK, description = "Event accepted and broadcast", body = TypingAck)),
    tag = PRESENCE_TAG,
)]
async fn publish_typing(
    State(state): State<ApiState>,
    body: Result<Json<TypingDraft>, JsonRejection>,
) -> Result<Json<TypingAck>, StatusCode> {
    // Malformed or absent bodies collapse to an all-defaults draft; field
    // defaulting absorbs the rest.
    let draft = body.map_or_else(
        |rejection| {
            debug!(error = %rejection, "Unreadable typing payload; publishing defaults");
            TypingDraft::default()
        },
        |Json(draft)| draft,
    );

    let presence =
        state.try_get_slice::<Presence>().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    presence.channels().publish(draft);

    Ok(Json(TypingAck { ok: true }))
}

#[utoipa::path(
    get,
    path = "/typing/stream",
    params(StreamParams),
    responses((status = OK, description = "Long-lived SSE stream of typing events")),
    tag = PRESENCE_TAG,
)]
async fn typing_stream(
    State(state): State<ApiState>,
    Query(params): Query<StreamParams>,
) -> Result<Sse<KeepAliveStream<TypingEventStream>>, StatusCode> {
    let presence =
        state.try_get_slice::<Presence>().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let stream = TypingEventStream::open(presence.channels(), params.channel.as_deref());

    // Comment frames keep idle connections alive through proxies.
    let keep_alive = KeepAlive::new()
        .interval(Duration::from_secs(state.config.presence.keep_alive_seconds));

    Ok(Sse::new(stream).keep_alive(keep_alive))
}
