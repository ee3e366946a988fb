//! Restaurant document import.
//!
//! Accepts a plain array of documents or the paged dump layout, where each
//! page carries a `restaurants` array of `{"restaurant": {...}}` wrappers.
//! Both may be mixed within one file.

use std::path::Path;

use anyhow::Context;
use dinescout_db::RestaurantStore;
use serde_json::Value;

/// Reads `path` and stores every restaurant document found in it.
///
/// When `store` is `None` the documents are parsed and counted only.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, if any entry is not
/// a JSON object, or if the store rejects the batch.
pub(crate) async fn run_import(
    store: Option<&dyn RestaurantStore>,
    path: &Path,
) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let documents =
        parse_documents(&raw).with_context(|| format!("failed to parse {}", path.display()))?;

    let Some(store) = store else {
        println!(
            "dry-run: would import {} restaurant document(s) from {}",
            documents.len(),
            path.display()
        );
        return Ok(());
    };

    let inserted = store.insert_many(documents).await?;
    tracing::info!(inserted, path = %path.display(), "restaurant import complete");
    println!("imported {inserted} restaurant document(s)");
    Ok(())
}

/// Flattens an import file into a list of restaurant documents.
pub(crate) fn parse_documents(raw: &str) -> anyhow::Result<Vec<Value>> {
    let value: Value = serde_json::from_str(raw).context("file is not valid JSON")?;
    if !value.is_array() && !value.is_object() {
        anyhow::bail!("expected a JSON array or object at the top level");
    }

    let mut documents = Vec::new();
    collect_documents(value, &mut documents);

    if let Some(index) = documents.iter().position(|doc| !doc.is_object()) {
        anyhow::bail!("entry {index} is not a JSON object");
    }
    Ok(documents)
}

fn collect_documents(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_documents(item, out);
            }
        }
        Value::Object(mut fields) => {
            if matches!(fields.get("restaurants"), Some(Value::Array(_))) {
                if let Some(Value::Array(items)) = fields.remove("restaurants") {
                    for item in items {
                        collect_documents(item, out);
                    }
                }
            } else if fields.len() == 1 && matches!(fields.get("restaurant"), Some(Value::Object(_)))
            {
                if let Some(inner) = fields.remove("restaurant") {
                    out.push(inner);
                }
            } else {
                out.push(Value::Object(fields));
            }
        }
        other => out.push(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_a_plain_array() {
        let docs = parse_documents(r#"[{"name": "A"}, {"name": "B"}]"#).expect("parse");
        assert_eq!(docs, vec![json!({"name": "A"}), json!({"name": "B"})]);
    }

    #[test]
    fn unwraps_paged_dump_layout() {
        let raw = json!([
            {
                "results_found": 2,
                "restaurants": [
                    { "restaurant": { "id": "1", "name": "Truffles" } },
                    { "restaurant": { "id": "2", "name": "Toit" } }
                ]
            },
            { "results_found": 0, "restaurants": [] },
            { "restaurants": [ { "restaurant": { "id": "3", "name": "Meghana" } } ] }
        ])
        .to_string();

        let docs = parse_documents(&raw).expect("parse");
        let names: Vec<_> = docs.iter().map(|d| d["name"].as_str()).collect();
        assert_eq!(names, vec![Some("Truffles"), Some("Toit"), Some("Meghana")]);
    }

    #[test]
    fn single_object_with_restaurants_key_is_accepted() {
        let raw = r#"{"restaurants": [{"name": "Solo"}]}"#;
        assert_eq!(parse_documents(raw).expect("parse"), vec![json!({"name": "Solo"})]);
    }

    #[test]
    fn documents_with_extra_fields_are_not_unwrapped() {
        let raw = r#"[{"restaurant": {"name": "inner"}, "note": "keep me whole"}]"#;
        let docs = parse_documents(raw).expect("parse");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["note"], "keep me whole");
    }

    #[test]
    fn rejects_scalars_and_invalid_json() {
        assert!(parse_documents("42").is_err());
        assert!(parse_documents("not json").is_err());
        let err = parse_documents(r#"[{"name": "A"}, "B"]"#).expect_err("scalar entry");
        assert!(err.to_string().contains("entry 1"));
    }

    #[tokio::test]
    async fn imports_into_a_store() {
        let dir = std::env::temp_dir().join(format!("dinescout-import-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("restaurants.json");
        std::fs::write(&path, r#"[{"name": "A"}, {"restaurant": {"name": "B"}}]"#)
            .expect("write fixture");

        let store = dinescout_db::MemoryRestaurantStore::new();
        run_import(Some(&store), &path).await.expect("import");
        assert_eq!(store.count().await.expect("count"), 2);

        run_import(None, &path).await.expect("dry run");
        assert_eq!(store.count().await.expect("count"), 2);

        std::fs::remove_dir_all(&dir).ok();
    }
}
