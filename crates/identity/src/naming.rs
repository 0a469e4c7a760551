use std::path::{Path, PathBuf};

use crate::message::Message;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over raw bytes.
///
/// Used only as a short file-name label; collisions are possible and are
/// not detected.
pub fn fnv1a32(bytes: &[u8]) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &b in bytes {
        hash ^= b as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// File locations of the key pair belonging to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPaths {
    private: PathBuf,
    public: PathBuf,
}

impl KeyPaths {
    /// `id_<h>` and `id_<h>.pub` under `root`, where `h` is the decimal
    /// FNV-1a-32 hash of the message.
    pub fn derive(root: &Path, message: &Message) -> Self {
        let stem = format!("id_{}", fnv1a32(message.as_bytes()));
        Self {
            public: root.join(format!("{stem}.pub")),
            private: root.join(stem),
        }
    }

    pub fn private(&self) -> &Path {
        &self.private
    }

    pub fn public(&self) -> &Path {
        &self.public
    }
}
