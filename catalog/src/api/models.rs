use serde::{Deserialize, Serialize};

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Welcome {
    pub message: String,
}

impl Default for Welcome {
    fn default() -> Self {
        Self {
            message: "Welcome to Food Facilities API".to_string(),
        }
    }
}
