//! Live update stream
//!
//! Server-sent events carrying the hub's [`ChangeEvent`]s. The
//! subscription is registered when the stream starts and released when
//! the client disconnects and the stream is dropped.

use std::convert::Infallible;

use axum::{
    Router,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::Stream;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/live", get(live))
}

#[derive(Debug, Deserialize)]
pub struct LiveQuery {
    /// Restrict the stream to one resource type
    pub resource: Option<String>,
}

/// GET /api/live - change-event stream
pub async fn live(
    State(state): State<ServerState>,
    ctx: CurrentUser,
    Query(query): Query<LiveQuery>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let label = format!("sse:{}", ctx.name);
    let subscription = state.hub.subscribe(&label, query.resource.as_deref());

    let stream = futures::stream::unfold(subscription, |mut subscription| async move {
        let change = subscription.recv().await?;
        let event = Event::default()
            .event(change.resource.clone())
            .json_data(&change)
            .ok()?;
        Some((Ok(event), subscription))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
