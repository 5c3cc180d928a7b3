use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::{debug, warn};

use httpsnotif_codec::{build_capabilities, select_encoding, AcceptPreference, CapabilitySet, Encoding};

use crate::validator::validate_relay_notification;
use crate::AppState;

/// GET /capabilities
pub(crate) async fn capabilities(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let accept = headers.get(header::ACCEPT).and_then(|v| v.to_str().ok());
    let prefs = AcceptPreference::parse(accept);

    let chosen = select_encoding(&prefs, state.capabilities())
        .or_else(|| fallback_encoding(&prefs, state.capabilities()));
    let Some(encoding) = chosen else {
        debug!("capability request with no usable response encoding");
        return (
            StatusCode::NOT_ACCEPTABLE,
            "no response encoding available",
        )
            .into_response();
    };

    match build_capabilities(state.capabilities(), encoding) {
        Ok((body, mime)) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, mime)], body).into_response()
        }
        Err(err) => {
            warn!(%err, "capability document serialization failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "capability document unavailable",
            )
                .into_response()
        }
    }
}

/// POST /relay-notification
pub(crate) async fn relay_notification(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    match validate_relay_notification(content_type, &body, state.capabilities(), state.schema()) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            debug!(%err, status = err.status().as_u16(), "relay notification rejected");
            (err.status(), err.to_string()).into_response()
        }
    }
}

/// The capabilities endpoint answers even when negotiation proper finds no
/// usable encoding: any enabled encoding, JSON preferred, skipping ones the
/// client excluded with q=0 when an alternative exists.
fn fallback_encoding(prefs: &AcceptPreference, enabled: &CapabilitySet) -> Option<Encoding> {
    const PREFERRED: [Encoding; 2] = [Encoding::Json, Encoding::Xml];

    PREFERRED
        .iter()
        .copied()
        .find(|&e| enabled.contains(e) && !prefs.excludes(e))
        .or_else(|| PREFERRED.iter().copied().find(|&e| enabled.contains(e)))
}
