use std::time::Instant;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Request logging middleware.
///
/// Emits one structured `api_request` event per request with the method,
/// path, status and latency, plus the instrument id for `/instruments/{id}`
/// routes. Bodies are never logged, so respondent identity and answers stay
/// out of the logs.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let instrument = instrument_segment(&path).map(str::to_string);
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;
    match instrument {
        Some(instrument) => tracing::info!(
            method = %method,
            path = %path,
            instrument = %instrument,
            status,
            latency_ms,
            "api_request"
        ),
        None => tracing::info!(
            method = %method,
            path = %path,
            status,
            latency_ms,
            "api_request"
        ),
    }

    response
}

/// The `{id}` segment of `/instruments/{id}` and `/instruments/{id}/...`.
fn instrument_segment(path: &str) -> Option<&str> {
    path.strip_prefix("/instruments/")?
        .split('/')
        .next()
        .filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instrument_id_is_taken_from_instrument_routes() {
        assert_eq!(instrument_segment("/instruments/dass21"), Some("dass21"));
        assert_eq!(
            instrument_segment("/instruments/self_compassion/evaluate"),
            Some("self_compassion")
        );
    }

    #[test]
    fn other_routes_have_no_instrument() {
        assert_eq!(instrument_segment("/instruments"), None);
        assert_eq!(instrument_segment("/instruments/"), None);
        assert_eq!(instrument_segment("/health"), None);
        assert_eq!(instrument_segment("/respondents"), None);
    }
}
