use std::path::PathBuf;

/// Errors surfaced by the identity engine.
///
/// A missing or unreadable key pair is not an error: the key store reports
/// it as `None` and the engine regenerates.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("I/O error on key file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cryptographic failure: {0}")]
    Crypto(String),
    #[error("Encoding failure: {0}")]
    Encoding(String),
}

impl IdentityError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = IdentityError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_the_path() {
        let error = IdentityError::io(
            "id_42.pub",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let rendered = error.to_string();
        assert!(rendered.contains("id_42.pub"), "got {rendered}");
        assert!(rendered.contains("denied"), "got {rendered}");
    }

    #[test]
    fn io_error_exposes_source() {
        use std::error::Error;

        let error = IdentityError::io("id_1", std::io::Error::other("disk full"));
        assert!(error.source().is_some());
    }

    #[test]
    fn crypto_error_message() {
        let error = IdentityError::Crypto("entropy source failed".into());
        assert_eq!(error.to_string(), "Cryptographic failure: entropy source failed");
    }
}
