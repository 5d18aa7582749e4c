use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Decode error: field '{field}' is missing or not {expected}")]
    Decode { field: String, expected: &'static str },

    #[error("Batch decode failed at item {index}: {source}")]
    BatchDecode {
        index: usize,
        #[source]
        source: Box<FetchError>,
    },

    #[error("Worker task panicked: {message}")]
    TaskPanicked { message: String },

    #[error("Worker pool is shut down")]
    PoolShutdown,

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl FetchError {
    pub fn decode(field: impl Into<String>, expected: &'static str) -> Self {
        FetchError::Decode {
            field: field.into(),
            expected,
        }
    }

    /// 批次錯誤往下找到實際失敗的原因
    pub fn root_cause(&self) -> &FetchError {
        match self {
            FetchError::BatchDecode { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_cause_unwraps_nested_batches() {
        let err = FetchError::BatchDecode {
            index: 3,
            source: Box::new(FetchError::BatchDecode {
                index: 1,
                source: Box::new(FetchError::decode("jobs[0].id", "an integer")),
            }),
        };

        assert!(matches!(
            err.root_cause(),
            FetchError::Decode { field, .. } if field == "jobs[0].id"
        ));
        assert_eq!(
            err.to_string(),
            "Batch decode failed at item 3: Batch decode failed at item 1: \
             Decode error: field 'jobs[0].id' is missing or not an integer"
        );
    }
}
