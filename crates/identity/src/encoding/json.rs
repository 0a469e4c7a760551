use std::io::Write;

use serde::{Deserialize, Serialize};

use super::signature_to_base64_der;
use crate::error::{IdentityError, Result};
use crate::message::Message;
use crate::signing::{KeyPair, Signature};

/// The JSON record binding a message to its signature and public key.
///
/// Serializes as `{"message":…,"signature":…,"pubkey":…}`, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputRecord {
    /// The message, verbatim.
    pub message: String,
    /// Base64 of the DER-encoded `(r, s)` pair.
    pub signature: String,
    /// `PUBLIC KEY` PEM text including the trailing newline.
    pub pubkey: String,
}

impl OutputRecord {
    pub fn new(message: &Message, key: &KeyPair, signature: &Signature) -> Result<Self> {
        Ok(Self {
            message: message.as_str().to_owned(),
            signature: signature_to_base64_der(signature),
            pubkey: key.public_key_pem()?,
        })
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| IdentityError::Encoding(format!("serializing output record: {e}")))
    }
}

/// Canonical JSON bytes for one signed message, without a trailing newline.
pub fn format(message: &Message, key: &KeyPair, signature: &Signature) -> Result<Vec<u8>> {
    OutputRecord::new(message, key, signature)?.to_json()
}

/// Write `record` as JSON to `writer` and flush.
pub fn write_record<W: Write>(mut writer: W, record: &OutputRecord) -> std::io::Result<()> {
    serde_json::to_writer(&mut writer, record)?;
    writer.flush()
}
