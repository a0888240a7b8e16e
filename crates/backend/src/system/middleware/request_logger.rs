use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// HTTP request log line: duration, response size, status, method and path.
/// The body is read to learn the real response size and then re-attached.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => {
            let duration = start.elapsed();
            tracing::warn!(
                "{:>5}ms | {:>10} | {} {:>6} {}",
                duration.as_millis(),
                "body error",
                parts.status.as_u16(),
                method,
                uri.path()
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let duration = start.elapsed();
    tracing::info!(
        "{:>5}ms | {:>9}B | {} {:>6} {}",
        duration.as_millis(),
        bytes.len(),
        parts.status.as_u16(),
        method,
        uri.path()
    );

    Response::from_parts(parts, Body::from(bytes))
}
