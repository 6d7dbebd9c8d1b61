use axum::http::StatusCode;

/// `GET /healthz`. The id manager process is up and serving requests.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz`. Config registration has already finished by the time the
/// listener is bound, so readiness matches liveness.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
