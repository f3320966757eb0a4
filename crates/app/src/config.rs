//! API Configuration

/// Configuration for connecting to the PropBox backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Create a configuration for the given base URL, e.g.
    /// `"http://localhost:3000"`. A trailing slash is normalized away.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();

        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self { base_url }
    }

    /// Absolute URL for an API path.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
