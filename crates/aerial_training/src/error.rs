use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrainingError {
    #[error("Unknown drill: {0:?}")]
    UnknownDrill(String),

    #[error("Car {index} not present in snapshot")]
    CarNotFound { index: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrainingError {
    /// Errors the tick loop can shrug off and retry on the next snapshot.
    pub fn is_recoverable(&self) -> bool {
        match self {
            TrainingError::CarNotFound { .. } => true,
            TrainingError::UnknownDrill(_) => true,
            TrainingError::InvalidConfig(_) => false,
            TrainingError::Json(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, TrainingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TrainingError::CarNotFound { index: 3 };
        assert_eq!(err.to_string(), "Car 3 not present in snapshot");

        let err = TrainingError::UnknownDrill("backflip".to_string());
        assert_eq!(err.to_string(), "Unknown drill: \"backflip\"");
    }

    #[test]
    fn test_recoverable() {
        assert!(TrainingError::CarNotFound { index: 0 }.is_recoverable());
        assert!(!TrainingError::InvalidConfig("x".to_string()).is_recoverable());
    }

    #[test]
    fn test_from_serde_json() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: TrainingError = parse.unwrap_err().into();
        assert!(matches!(err, TrainingError::Json(_)));
    }
}
