use serde::Deserialize;

/// Connection configuration, supplied externally (environment/config loader).
///
/// The core only needs a path it can open; everything else about locating the
/// database belongs to the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Filesystem path, or `:memory:` for an in-process database.
    pub path: String,
    /// Pass-through statement wait budget: how long the backend may wait on a
    /// locked database before reporting a concurrency error. `None` leaves
    /// the driver default in place.
    #[serde(default)]
    pub busy_timeout_ms: Option<u64>,
}

impl DataConfig {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: None,
        }
    }

    /// In-memory database, used mostly by tests.
    #[must_use]
    pub fn memory() -> Self {
        Self::new(":memory:")
    }

    #[must_use]
    pub fn with_busy_timeout_ms(mut self, ms: u64) -> Self {
        self.busy_timeout_ms = Some(ms);
        self
    }
}
