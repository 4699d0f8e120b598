use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KickstackError {
    #[error("{0}")]
    UserInput(String),

    #[error("folder already exists: {}", .0.display())]
    Precondition(PathBuf),

    #[error("{tool} failed: {detail}")]
    ExternalTool { tool: String, detail: String },

    #[error("validation failed:\n{}", format_failures(.0))]
    Validation(Vec<ValidationFailure>),

    #[error("invalid config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A single failed post-condition. The validator collects every failure
/// before aborting so the user sees the whole picture at once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("{} still contains demo content ({marker:?})", file.display())]
    DemoContent { file: PathBuf, marker: String },

    #[error("{} is missing the required directive {directive:?}", file.display())]
    MissingDirective { file: PathBuf, directive: String },

    #[error("{} is missing the feature marker {marker:?}", file.display())]
    MissingFeatureMarker { file: PathBuf, marker: String },

    #[error("required patch '{rule}' on {} is incomplete: {reason}", target.display())]
    PatchIncomplete {
        rule: String,
        target: PathBuf,
        reason: String,
    },

    #[error("{} does not exist", file.display())]
    MissingFile { file: PathBuf },

    #[error("package.json: {0}")]
    Manifest(String),
}

fn format_failures(failures: &[ValidationFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("  - {f}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub type Result<T> = std::result::Result<T, KickstackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_lists_every_failure() {
        let err = KickstackError::Validation(vec![
            ValidationFailure::DemoContent {
                file: PathBuf::from("src/App.jsx"),
                marker: "logo".into(),
            },
            ValidationFailure::MissingFile {
                file: PathBuf::from("src/index.css"),
            },
        ]);
        let msg = err.to_string();
        assert!(msg.contains("src/App.jsx still contains demo content"));
        assert!(msg.contains("src/index.css does not exist"));
        assert_eq!(msg.lines().count(), 3);
    }

    #[test]
    fn external_tool_error_names_the_tool() {
        let err = KickstackError::ExternalTool {
            tool: "npm".into(),
            detail: "exit status: 1".into(),
        };
        assert_eq!(err.to_string(), "npm failed: exit status: 1");
    }
}
