mod json;

pub use json::{OutputRecord, format, write_record};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::signing::Signature;

/// ASN.1 DER `SEQUENCE { INTEGER r, INTEGER s }`, base64 with padding.
pub fn signature_to_base64_der(signature: &Signature) -> String {
    STANDARD.encode(signature.to_der().as_bytes())
}
