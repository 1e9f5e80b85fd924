use photocomp_common::error::Error;
use serde::de::DeserializeOwned;

/// Parses a YAML document, pointing at the offending line on failure.
pub fn parse_yaml<T: DeserializeOwned>(yaml_str: &str) -> Result<T, Error> {
    serde_yaml::from_str(yaml_str).map_err(|e| {
        let err = if let Some(location) = e.location() {
            ParseError::InvalidYaml {
                line: location.line(),
                column: location.column(),
                message: e.to_string(),
            }
        } else {
            ParseError::InvalidYamlNoLocation {
                message: e.to_string(),
            }
        };
        Error::Config(err.to_string())
    })
}

/// Reads and parses a YAML file.
pub fn parse_yaml_file<T: DeserializeOwned>(path: &str) -> Result<T, Error> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Failed to read {path}: {e}")))?;
    parse_yaml(&contents)
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid YAML at line {line}, column {column}: {message}")]
    InvalidYaml {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Invalid YAML: {message}")]
    InvalidYamlNoLocation { message: String },
}
