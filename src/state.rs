//! State shared by the transcript server's request handlers.

use std::{path::PathBuf, sync::Arc};

use crate::config::Config;

/// Application state for the transcript server.
///
/// Cloned for each request through Axum's state extraction; the
/// configuration sits behind an `Arc` shared with the bot.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Directory transcripts are written to and served from.
    pub fn transcripts_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.transcripts_dir)
    }
}
