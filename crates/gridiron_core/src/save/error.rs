use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data: {reason}")]
    Corrupted { reason: String },

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid save filename: {name:?}")]
    InvalidFilename { name: String },
}

impl SaveError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Io(_) | SaveError::FileNotFound { .. } | SaveError::InvalidFilename { .. } => {
                true
            }
            SaveError::Serialization(_)
            | SaveError::Deserialization(_)
            | SaveError::Decompression
            | SaveError::Corrupted { .. }
            | SaveError::VersionMismatch { .. }
            | SaveError::ChecksumMismatch => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(SaveError::Io(io).is_recoverable());
        assert!(SaveError::FileNotFound { path: "a.dat".into() }.is_recoverable());
        assert!(SaveError::InvalidFilename { name: "..".into() }.is_recoverable());
    }

    #[test]
    fn test_damaged_data_is_not_recoverable() {
        assert!(!SaveError::Decompression.is_recoverable());
        assert!(!SaveError::ChecksumMismatch.is_recoverable());
        assert!(!SaveError::Corrupted { reason: "short".into() }.is_recoverable());
        assert!(!SaveError::VersionMismatch { found: 9, expected: 1 }.is_recoverable());

        let decode = rmp_serde::from_slice::<u32>(&[]).unwrap_err();
        assert!(!SaveError::Deserialization(decode).is_recoverable());
    }
}
