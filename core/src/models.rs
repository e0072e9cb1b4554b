// Request models for the drowsiness monitor API

use serde::{Deserialize, Serialize};

/// Body of `POST /predict`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    /// Base64 image, either bare or as a `data:` URL
    pub image: String,
}

impl PredictRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self { image: image.into() }
    }

    /// Build a request from raw image bytes
    pub fn from_bytes(bytes: &[u8], mime: &str) -> Self {
        Self::new(crate::image::to_data_url(bytes, mime))
    }
}

/// Monitoring session summary, the body of `POST /save_session`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Session start (ISO 8601 as produced by the browser)
    pub start_time: String,

    /// Session end (ISO 8601)
    pub end_time: String,

    /// Duration in seconds
    pub duration: f64,

    pub awake_count: u32,
    pub drowsy_count: u32,
    pub alert_count: u32,

    /// Mean prediction confidence (percent)
    pub avg_confidence: f64,

    /// Identifier generated in the browser before the server assigns one.
    /// Frames saved during capture are linked back through it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_session_id: Option<String>,
}

/// One captured frame, the body of `POST /save_frame`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_session_id: Option<String>,

    /// Base64 image data
    pub frame_data: String,

    pub timestamp: String,

    /// "awake" or "drowsy"
    pub prediction: String,

    pub confidence: f64,

    pub frame_number: u32,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}
