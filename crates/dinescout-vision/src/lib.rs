//! Image classification for cuisine search.
//!
//! [`ImageClassifier`] is the seam the API depends on; [`ClarifaiClient`] is
//! the production implementation backed by Clarifai's food model.

pub mod classifier;
pub mod client;
pub mod error;
pub mod types;

pub use classifier::{detect_search_tags, ImageClassifier};
pub use client::{ClarifaiClient, ClarifaiModel};
pub use error::VisionError;
