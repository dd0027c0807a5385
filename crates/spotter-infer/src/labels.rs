use crate::InferError;
use std::path::Path;

/// Load a label table from a JSON array of strings
/// (`["person", "bicycle", ...]`), index = model class id.
pub fn load_labels(path: impl AsRef<Path>) -> Result<Vec<String>, InferError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let labels: Vec<String> = serde_json::from_str(&text)?;
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_labels_array() {
        let path = std::env::temp_dir().join(format!("spotter-labels-{}.json", std::process::id()));
        std::fs::write(&path, r#"["cat", "dog", "bird"]"#).unwrap();

        let labels = load_labels(&path).unwrap();
        assert_eq!(labels, vec!["cat", "dog", "bird"]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_labels_missing_file() {
        let err = load_labels("/nonexistent/labels.json").unwrap_err();
        assert!(matches!(err, InferError::Io(_)));
    }

    #[test]
    fn test_load_labels_bad_json() {
        let path =
            std::env::temp_dir().join(format!("spotter-badlabels-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"not": "an array"}"#).unwrap();

        let err = load_labels(&path).unwrap_err();
        assert!(matches!(err, InferError::Config(_)));
        std::fs::remove_file(&path).ok();
    }
}
