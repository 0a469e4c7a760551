use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{IdentityError, Result};
use crate::message::Message;
use crate::naming::KeyPaths;
use crate::signing::KeyPair;

/// PEM files holding one key pair per message, named by [`KeyPaths`].
///
/// The store assumes a single writer. Writes are neither locked nor atomic;
/// a half-written pair is read back as absent.
#[derive(Debug, Clone)]
pub struct KeyStore {
    root: PathBuf,
}

impl KeyStore {
    /// Store rooted at `root`. The directory is not created.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store whose files are named relative to the process working directory.
    pub fn current_dir() -> Self {
        Self::new(PathBuf::new())
    }

    pub fn paths(&self, message: &Message) -> KeyPaths {
        KeyPaths::derive(&self.root, message)
    }

    /// Load the key pair stored for `message`.
    ///
    /// Returns `Ok(None)` when either file is missing or the private key
    /// does not parse. The public file is never read: the public key is
    /// recomputed from the private scalar.
    pub fn load(&self, message: &Message) -> Result<Option<KeyPair>> {
        let paths = self.paths(message);

        for path in [paths.private(), paths.public()] {
            if !path.exists() {
                debug!(path = %path.display(), "key file missing");
                return Ok(None);
            }
        }

        let pem = match fs::read_to_string(paths.private()) {
            Ok(pem) => pem,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %paths.private().display(), "private key vanished before read");
                return Ok(None);
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                warn!(path = %paths.private().display(), "private key is not UTF-8, regenerating");
                return Ok(None);
            }
            Err(e) => return Err(IdentityError::io(paths.private(), e)),
        };

        match KeyPair::from_private_key_pem(&pem) {
            Ok(key) => {
                debug!(path = %paths.private().display(), "loaded key pair");
                Ok(Some(key))
            }
            Err(e) => {
                warn!(path = %paths.private().display(), error = %e, "unusable private key, regenerating");
                Ok(None)
            }
        }
    }

    /// Write `key` for `message`, creating or truncating both files.
    ///
    /// Both PEM documents are encoded before either file is touched.
    pub fn persist(&self, key: &KeyPair, message: &Message) -> Result<()> {
        let paths = self.paths(message);
        let private_pem = key.private_key_pem()?;
        let public_pem = key.public_key_pem()?;

        fs::write(paths.private(), private_pem.as_bytes())
            .map_err(|e| IdentityError::io(paths.private(), e))?;
        fs::write(paths.public(), public_pem.as_bytes())
            .map_err(|e| IdentityError::io(paths.public(), e))?;

        debug!(
            private = %paths.private().display(),
            public = %paths.public().display(),
            "persisted key pair"
        );
        Ok(())
    }
}
