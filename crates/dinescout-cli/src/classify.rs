use std::path::Path;

use anyhow::Context;
use dinescout_core::{extract_search_tags, is_cuisine_term, AppConfig, ClassifierConcept};
use dinescout_vision::ClarifaiClient;

/// Sends an image to the configured classifier and prints every concept it
/// returned, followed by the search tags image search would use.
///
/// # Errors
///
/// Returns an error if no Clarifai token is configured, the file cannot be
/// read, or classification fails.
pub(crate) async fn run_classify(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let client = ClarifaiClient::from_app_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build Clarifai client: {e}"))?
        .ok_or_else(|| anyhow::anyhow!("CLARIFAI_PAT is not set; cannot classify images"))?;

    let image = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let concepts = client.predict(&image).await?;
    for line in render_concepts(&concepts) {
        println!("{line}");
    }

    let tags = extract_search_tags(&concepts);
    if tags.is_empty() {
        println!("search tags: none (no relevant cuisine detected)");
    } else {
        println!("search tags: {}", tags.join(", "));
    }
    Ok(())
}

fn render_concepts(concepts: &[ClassifierConcept]) -> Vec<String> {
    concepts
        .iter()
        .map(|concept| {
            let marker = if is_cuisine_term(&concept.name.to_lowercase()) {
                "*"
            } else {
                " "
            };
            format!("{marker} {:<24} {:.3}", concept.name, concept.value)
        })
        .collect()
}
