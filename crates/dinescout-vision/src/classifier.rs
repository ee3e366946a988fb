use async_trait::async_trait;
use dinescout_core::{extract_search_tags, ClassifierConcept};

use crate::error::VisionError;

/// Labels the contents of an image.
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    /// Returns the labels the model assigned to `image`, in model order.
    async fn classify(&self, image: &[u8]) -> Result<Vec<ClassifierConcept>, VisionError>;
}

/// Classifies `image` and reduces the result to cuisine search tags.
///
/// An empty result means the image classified fine but nothing in it is a
/// known cuisine term.
///
/// # Errors
///
/// Propagates any [`VisionError`] from the classifier.
pub async fn detect_search_tags(
    classifier: &dyn ImageClassifier,
    image: &[u8],
) -> Result<Vec<String>, VisionError> {
    let concepts = classifier.classify(image).await?;
    let tags = extract_search_tags(&concepts);
    tracing::debug!(
        concepts = concepts.len(),
        tags = ?tags,
        "image classified"
    );
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClassifier(Vec<ClassifierConcept>);

    #[async_trait]
    impl ImageClassifier for FixedClassifier {
        async fn classify(&self, _image: &[u8]) -> Result<Vec<ClassifierConcept>, VisionError> {
            Ok(self.0.clone())
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl ImageClassifier for FailingClassifier {
        async fn classify(&self, _image: &[u8]) -> Result<Vec<ClassifierConcept>, VisionError> {
            Err(VisionError::UnexpectedStatus { status: 503 })
        }
    }

    #[tokio::test]
    async fn detect_search_tags_filters_by_vocabulary_and_confidence() {
        let classifier = FixedClassifier(vec![
            ClassifierConcept::new("Pizza", 0.97),
            ClassifierConcept::new("Plate", 0.99),
            ClassifierConcept::new("cheese", 0.95),
            ClassifierConcept::new("pasta", 0.85),
            ClassifierConcept::new("Italian", 0.90),
        ]);

        let tags = detect_search_tags(&classifier, b"jpeg")
            .await
            .expect("classification succeeds");
        assert_eq!(tags, vec!["pizza".to_string(), "italian".to_string()]);
    }

    #[tokio::test]
    async fn detect_search_tags_returns_empty_when_nothing_relevant() {
        let classifier = FixedClassifier(vec![ClassifierConcept::new("Table", 0.99)]);
        let tags = detect_search_tags(&classifier, b"jpeg").await.expect("ok");
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn detect_search_tags_propagates_classifier_failure() {
        let err = detect_search_tags(&FailingClassifier, b"jpeg")
            .await
            .expect_err("failure must propagate");
        assert!(matches!(err, VisionError::UnexpectedStatus { status: 503 }));
    }
}
