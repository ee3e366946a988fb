//! Clarifai `outputs` request and response types.
//!
//! Only the fields the classifier reads are modelled; everything else in the
//! response is ignored.

use serde::{Deserialize, Serialize};

/// Clarifai's status code for a successful call.
pub const STATUS_SUCCESS: u32 = 10_000;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PredictRequest {
    pub inputs: Vec<PredictInput>,
}

#[derive(Debug, Serialize)]
pub struct PredictInput {
    pub data: InputData,
}

#[derive(Debug, Serialize)]
pub struct InputData {
    pub image: InputImage,
}

#[derive(Debug, Serialize)]
pub struct InputImage {
    /// Standard base64 of the raw image bytes.
    pub base64: String,
}

impl PredictRequest {
    #[must_use]
    pub fn from_base64(base64: String) -> Self {
        Self {
            inputs: vec![PredictInput {
                data: InputData {
                    image: InputImage { base64 },
                },
            }],
        }
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    pub status: ApiStatus,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

#[derive(Debug, Deserialize)]
pub struct ApiStatus {
    pub code: u32,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub data: Option<OutputData>,
}

#[derive(Debug, Deserialize)]
pub struct OutputData {
    #[serde(default)]
    pub concepts: Option<Vec<Concept>>,
}

#[derive(Debug, Deserialize)]
pub struct Concept {
    pub name: String,
    pub value: f64,
}
