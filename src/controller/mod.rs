//! HTTP handlers of the transcript server.
//!
//! - `health` - Liveness text at `/`
//! - `transcript` - Serves generated HTML and TXT transcripts

pub mod health;
pub mod transcript;
