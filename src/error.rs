pub type AgifResult<T> = Result<T, AgifError>;

#[derive(thiserror::Error, Debug)]
pub enum AgifError {
    /// Malformed or truncated container bytes. Always fatal to the decode call.
    #[error("format error: {0}")]
    Format(String),

    /// A frame image or audio clip failed to decode through a host capability.
    /// Fatal to the enclosing load; there is no per-asset recovery.
    #[error("asset decode error: {0}")]
    AssetDecode(String),

    /// Encode-time invariant violation, e.g. declared counts not matching the
    /// supplied sections. A programming error on the caller's side.
    #[error("caller error: {0}")]
    Caller(String),

    /// Constructor-time invariant violation (dimensions, frame rate, trigger
    /// index ranges).
    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AgifError {
    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn asset_decode(msg: impl Into<String>) -> Self {
        Self::AssetDecode(msg.into())
    }

    pub fn caller(msg: impl Into<String>) -> Self {
        Self::Caller(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(AgifError::format("x").to_string().contains("format error:"));
        assert!(
            AgifError::asset_decode("x")
                .to_string()
                .contains("asset decode error:")
        );
        assert!(AgifError::caller("x").to_string().contains("caller error:"));
        assert!(
            AgifError::validation("x")
                .to_string()
                .contains("validation error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = AgifError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
