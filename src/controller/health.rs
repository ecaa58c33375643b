/// Liveness check for uptime monitors.
pub async fn health() -> &'static str {
    "Transcript server is running."
}
