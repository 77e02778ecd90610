//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Listen address (default: "0.0.0.0:8000")
    pub bind: String,
    /// Upper bound for one multipart upload, in bytes
    pub max_upload_bytes: usize,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8000".to_string(),
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}
