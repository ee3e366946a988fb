//! HTTP client for the Clarifai model `outputs` endpoint.
//!
//! Posts a base64-encoded image, checks both the HTTP status and the
//! `status.code` field in the JSON envelope, and returns the concepts of the
//! first output.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use dinescout_core::{AppConfig, ClassifierConcept};
use reqwest::{Client, Url};

use crate::classifier::ImageClassifier;
use crate::error::VisionError;
use crate::types::{PredictRequest, PredictResponse, STATUS_SUCCESS};

const DEFAULT_BASE_URL: &str = "https://api.clarifai.com";

/// Which Clarifai model to call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClarifaiModel {
    pub user_id: String,
    pub app_id: String,
    pub model_id: String,
}

impl Default for ClarifaiModel {
    /// Clarifai's public food recognition model.
    fn default() -> Self {
        Self {
            user_id: "clarifai".to_string(),
            app_id: "main".to_string(),
            model_id: "food-item-recognition".to_string(),
        }
    }
}

/// Client for Clarifai image predictions.
///
/// Use [`ClarifaiClient::new`] for production or
/// [`ClarifaiClient::with_base_url`] to point at a mock server in tests.
pub struct ClarifaiClient {
    client: Client,
    pat: String,
    predict_url: Url,
}

impl std::fmt::Debug for ClarifaiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClarifaiClient")
            .field("pat", &"[redacted]")
            .field("predict_url", &self.predict_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ClarifaiClient {
    /// Creates a client for the default food model on the production API.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(pat: &str, timeout_secs: u64) -> Result<Self, VisionError> {
        Self::with_base_url(pat, timeout_secs, DEFAULT_BASE_URL, &ClarifaiModel::default())
    }

    /// Creates a client with a custom base URL and model.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`VisionError::InvalidConfig`] if
    /// `base_url` is not a usable URL.
    pub fn with_base_url(
        pat: &str,
        timeout_secs: u64,
        base_url: &str,
        model: &ClarifaiModel,
    ) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent("dinescout/0.1 (image-search)")
            .build()?;

        let predict_url = build_predict_url(base_url, model)?;

        Ok(Self {
            client,
            pat: pat.to_owned(),
            predict_url,
        })
    }

    /// Builds a client from application config. Returns `Ok(None)` when no
    /// Clarifai token is configured.
    ///
    /// # Errors
    ///
    /// Same as [`ClarifaiClient::with_base_url`].
    pub fn from_app_config(config: &AppConfig) -> Result<Option<Self>, VisionError> {
        let Some(pat) = config.clarifai_pat.as_deref() else {
            return Ok(None);
        };
        let model = ClarifaiModel {
            user_id: config.clarifai_user_id.clone(),
            app_id: config.clarifai_app_id.clone(),
            model_id: config.clarifai_model_id.clone(),
        };
        Self::with_base_url(
            pat,
            config.classifier_timeout_secs,
            &config.clarifai_base_url,
            &model,
        )
        .map(Some)
    }

    #[must_use]
    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    /// Runs the model on `image` and returns the concepts of the first output.
    ///
    /// # Errors
    ///
    /// - [`VisionError::Http`] on network failure or timeout.
    /// - [`VisionError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`VisionError::Api`] if Clarifai reports a non-success status code.
    /// - [`VisionError::Deserialize`] if the body is not the expected JSON.
    /// - [`VisionError::MalformedResponse`] if the first output carries no
    ///   concept list.
    pub async fn predict(&self, image: &[u8]) -> Result<Vec<ClassifierConcept>, VisionError> {
        let request = PredictRequest::from_base64(STANDARD.encode(image));

        let response = self
            .client
            .post(self.predict_url.clone())
            .header(reqwest::header::AUTHORIZATION, format!("Key {}", self.pat))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisionError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: PredictResponse =
            serde_json::from_str(&body).map_err(|e| VisionError::Deserialize {
                context: self.predict_url.path().to_string(),
                source: e,
            })?;

        concepts_from_response(parsed)
    }
}

#[async_trait]
impl ImageClassifier for ClarifaiClient {
    async fn classify(&self, image: &[u8]) -> Result<Vec<ClassifierConcept>, VisionError> {
        self.predict(image).await
    }
}

fn build_predict_url(base_url: &str, model: &ClarifaiModel) -> Result<Url, VisionError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| VisionError::InvalidConfig(format!("invalid base URL '{base_url}': {e}")))?;
    url.path_segments_mut()
        .map_err(|()| VisionError::InvalidConfig(format!("base URL '{base_url}' cannot have a path")))?
        .pop_if_empty()
        .extend([
            "v2",
            "users",
            model.user_id.as_str(),
            "apps",
            model.app_id.as_str(),
            "models",
            model.model_id.as_str(),
            "outputs",
        ]);
    Ok(url)
}

fn concepts_from_response(response: PredictResponse) -> Result<Vec<ClassifierConcept>, VisionError> {
    if response.status.code != STATUS_SUCCESS {
        return Err(VisionError::Api {
            code: response.status.code,
            description: response.status.description,
        });
    }

    let concepts = response
        .outputs
        .into_iter()
        .next()
        .and_then(|output| output.data)
        .and_then(|data| data.concepts)
        .ok_or_else(|| VisionError::MalformedResponse("no concepts in first output".to_string()))?;

    Ok(concepts
        .into_iter()
        .map(|concept| ClassifierConcept::new(concept.name, concept.value))
        .collect())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
