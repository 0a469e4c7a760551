use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use p256::ecdsa::{SigningKey, VerifyingKey};
use p256::elliptic_curve::zeroize::Zeroizing;
use p256::pkcs8::EncodePublicKey;
use p256::{FieldBytes, PublicKey, SecretKey};
use pem_rfc7468::LineEnding;
use rand::{CryptoRng, RngCore};

use crate::error::{IdentityError, Result};

/// PEM label of the private-key file. The body is SEC1 DER, not PKCS#8.
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

/// PEM label of the public-key file (PKIX SubjectPublicKeyInfo).
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

// A uniformly random 32-byte string lands outside [1, n-1] with
// probability below 2^-32, so a handful of draws is plenty.
const MAX_GENERATION_ATTEMPTS: usize = 8;

/// ECDSA key pair on NIST P-256.
///
/// Only the private scalar is stored; the public point is always
/// recomputed from it.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    secret: SecretKey,
}

impl KeyPair {
    /// Draw a fresh private scalar from `rng`.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let mut bytes = FieldBytes::default();
            rng.try_fill_bytes(bytes.as_mut_slice())
                .map_err(|e| IdentityError::Crypto(format!("entropy source failed: {e}")))?;
            if let Ok(secret) = SecretKey::from_bytes(&bytes) {
                return Ok(Self { secret });
            }
        }
        Err(IdentityError::Crypto(format!(
            "no valid P-256 scalar after {MAX_GENERATION_ATTEMPTS} draws"
        )))
    }

    /// Parse a SEC1 `ECPrivateKey` DER structure.
    pub fn from_sec1_der(der: &[u8]) -> Result<Self> {
        let secret = SecretKey::from_sec1_der(der)
            .map_err(|e| IdentityError::Encoding(format!("invalid SEC1 private key: {e}")))?;
        Ok(Self { secret })
    }

    /// Parse a `PRIVATE KEY` PEM block wrapping SEC1 DER.
    pub fn from_private_key_pem(pem: &str) -> Result<Self> {
        let (label, der) = pem_rfc7468::decode_vec(pem.as_bytes())
            .map_err(|e| IdentityError::Encoding(format!("malformed PEM: {e}")))?;
        let der = Zeroizing::new(der);
        if label != PRIVATE_KEY_LABEL {
            return Err(IdentityError::Encoding(format!(
                "unexpected PEM label {label:?}, expected {PRIVATE_KEY_LABEL:?}"
            )));
        }
        Self::from_sec1_der(&der)
    }

    pub fn to_sec1_der(&self) -> Result<Zeroizing<Vec<u8>>> {
        self.secret
            .to_sec1_der()
            .map_err(|e| IdentityError::Encoding(format!("encoding SEC1 private key: {e}")))
    }

    pub fn private_key_pem(&self) -> Result<Zeroizing<String>> {
        let der = self.to_sec1_der()?;
        pem_rfc7468::encode_string(PRIVATE_KEY_LABEL, LineEnding::LF, &der)
            .map(Zeroizing::new)
            .map_err(|e| IdentityError::Encoding(format!("encoding private key PEM: {e}")))
    }

    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    /// SubjectPublicKeyInfo DER of the public point.
    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        self.public_key()
            .to_public_key_der()
            .map(|doc| doc.into_vec())
            .map_err(|e| IdentityError::Encoding(format!("encoding public key DER: {e}")))
    }

    /// `PUBLIC KEY` PEM text, trailing newline included.
    pub fn public_key_pem(&self) -> Result<String> {
        let der = self.public_key_der()?;
        pem_rfc7468::encode_string(PUBLIC_KEY_LABEL, LineEnding::LF, &der)
            .map_err(|e| IdentityError::Encoding(format!("encoding public key PEM: {e}")))
    }

    pub fn signing_key(&self) -> SigningKey {
        SigningKey::from(&self.secret)
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey::from(&self.public_key())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let point = self.public_key().to_sec1_bytes();
        f.debug_struct("KeyPair")
            .field("curve", &"P-256")
            .field("public_key", &STANDARD.encode(point))
            .finish_non_exhaustive()
    }
}
