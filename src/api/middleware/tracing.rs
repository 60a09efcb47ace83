//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// # Logging Behavior
///
/// Each request gets an `INFO` span carrying method, URI and HTTP version.
/// The request start is logged at `DEBUG`; responses at `INFO` with status
/// and latency in milliseconds.
///
/// # Example Logs
///
/// ```text
/// DEBUG request{method=GET uri=/aB3xZ version=HTTP/1.1}: started processing request
/// INFO request{method=GET uri=/aB3xZ version=HTTP/1.1}: finished processing request latency=3 ms status=301
/// ```
///
/// # Integration
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/{code}", get(redirect_handler))
///     .layer(tracing::layer());
/// ```
pub fn layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
