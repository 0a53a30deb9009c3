use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;

/// One structured event per request.
pub async fn log_access(req: Request, next: Next) -> Response {
    let t0 = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().to_string();

    let res = next.run(req).await;

    tracing::info!(
        method = %method,
        uri = %uri,
        status = res.status().as_u16(),
        time_ms = t0.elapsed().as_millis() as u64,
        "request"
    );
    res
}
