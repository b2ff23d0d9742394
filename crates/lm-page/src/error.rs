//! Error types

/// Failure inside a single event handler
///
/// A failing handler aborts only itself; dispatch continues with the
/// remaining listeners.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("malformed data-payload for tracked event {event:?}: {source}")]
    Payload {
        event: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Page-level errors
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("invalid page URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
