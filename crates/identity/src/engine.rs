use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::{debug, info};

use crate::encoding::OutputRecord;
use crate::error::Result;
use crate::message::Message;
use crate::signing::{self, KeyPair};
use crate::store::KeyStore;

/// Where the key pair used for a signature came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySource {
    Loaded,
    Generated,
}

/// Outcome of one [`IdentityEngine::process`] call.
#[derive(Debug, Clone)]
pub struct Identity {
    pub record: OutputRecord,
    pub key: KeyPair,
    pub source: KeySource,
}

/// Load-or-create a message's key pair, then sign the message with it.
#[derive(Debug, Clone)]
pub struct IdentityEngine {
    store: KeyStore,
}

impl IdentityEngine {
    pub fn new(store: KeyStore) -> Self {
        Self { store }
    }

    pub fn process(&self, message: &Message) -> Result<Identity> {
        self.process_with_rng(message, &mut OsRng)
    }

    /// A freshly generated key is persisted before anything is signed, so a
    /// returned [`Identity`] always has its key pair on disk.
    pub fn process_with_rng<R: RngCore + CryptoRng>(
        &self,
        message: &Message,
        rng: &mut R,
    ) -> Result<Identity> {
        let (key, source) = match self.store.load(message)? {
            Some(key) => (key, KeySource::Loaded),
            None => {
                let key = KeyPair::generate(rng)?;
                self.store.persist(&key, message)?;
                info!(
                    path = %self.store.paths(message).private().display(),
                    "generated new key pair"
                );
                (key, KeySource::Generated)
            }
        };

        let signature = signing::sign_with_rng(&key, message.as_bytes(), rng)?;
        let record = OutputRecord::new(message, &key, &signature)?;
        debug!(?source, "signed message");

        Ok(Identity {
            record,
            key,
            source,
        })
    }
}
