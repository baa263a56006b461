pub type StoryfxResult<T> = Result<T, StoryfxError>;

#[derive(thiserror::Error, Debug)]
pub enum StoryfxError {
    #[error("validation error: {0}")]
    Validation(String),

    /// The storyboard document is missing required structure.
    #[error("storyboard error: {0}")]
    Storyboard(String),

    #[error("evaluation error: {0}")]
    Evaluation(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryfxError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn storyboard(msg: impl Into<String>) -> Self {
        Self::Storyboard(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn audio(msg: impl Into<String>) -> Self {
        Self::Audio(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for StoryfxError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            StoryfxError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            StoryfxError::storyboard("x")
                .to_string()
                .contains("storyboard error:")
        );
        assert!(
            StoryfxError::evaluation("x")
                .to_string()
                .contains("evaluation error:")
        );
        assert!(StoryfxError::audio("x").to_string().contains("audio error:"));
        assert!(
            StoryfxError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = StoryfxError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn json_errors_map_to_serde() {
        let e = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StoryfxError::from(e);
        assert!(matches!(err, StoryfxError::Serde(_)));
    }
}
