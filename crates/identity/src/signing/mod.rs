mod keypair;

pub use keypair::{KeyPair, PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL};
pub use p256::ecdsa::Signature;

use p256::ecdsa::signature::hazmat::RandomizedPrehashSigner;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use sha2::{Digest, Sha256};

use crate::error::{IdentityError, Result};

/// Sign `SHA-256(message)` with a nonce hedged by operating-system entropy.
pub fn sign(key: &KeyPair, message: &[u8]) -> Result<Signature> {
    sign_with_rng(key, message, &mut OsRng)
}

/// Sign `SHA-256(message)` with ECDSA over P-256.
///
/// 32 bytes drawn from `rng` seed the nonce generator, so repeated calls
/// over the same message produce different signatures. A failing `rng`
/// yields [`IdentityError::Crypto`].
pub fn sign_with_rng<R: RngCore + CryptoRng>(
    key: &KeyPair,
    message: &[u8],
    rng: &mut R,
) -> Result<Signature> {
    let digest = Sha256::digest(message);

    let mut seed = <ChaCha20Rng as SeedableRng>::Seed::default();
    rng.try_fill_bytes(&mut seed)
        .map_err(|e| IdentityError::Crypto(format!("entropy source failed: {e}")))?;
    let mut nonce_rng = ChaCha20Rng::from_seed(seed);

    let signature: Signature = key
        .signing_key()
        .sign_prehash_with_rng(&mut nonce_rng, digest.as_slice())
        .map_err(|e| IdentityError::Crypto(format!("p256 sign_prehash failed: {e}")))?;
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::ecdsa::signature::Verifier;
    use p256::ecdsa::signature::hazmat::PrehashVerifier;

    fn test_pair() -> KeyPair {
        let mut rng = ChaCha20Rng::from_seed([42; 32]);
        KeyPair::generate(&mut rng).unwrap()
    }

    struct BrokenRng;

    impl RngCore for BrokenRng {
        fn next_u32(&mut self) -> u32 {
            unreachable!()
        }

        fn next_u64(&mut self) -> u64 {
            unreachable!()
        }

        fn fill_bytes(&mut self, _dest: &mut [u8]) {
            unreachable!()
        }

        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::other("no entropy")))
        }
    }

    impl CryptoRng for BrokenRng {}

    #[test]
    fn signature_verifies_over_sha256() {
        let pair = test_pair();
        let message = b"simple tests";
        let signature = sign(&pair, message).unwrap();

        let verifying_key = pair.verifying_key();
        verifying_key.verify(message, &signature).unwrap();
        verifying_key
            .verify_prehash(&Sha256::digest(message), &signature)
            .unwrap();
    }

    #[test]
    fn signing_is_randomized() {
        let pair = test_pair();
        let sig1 = sign(&pair, b"hello").unwrap();
        let sig2 = sign(&pair, b"hello").unwrap();
        assert_ne!(sig1, sig2);
    }

    #[test]
    fn same_entropy_gives_same_signature() {
        let pair = test_pair();
        let sig1 = sign_with_rng(&pair, b"hello", &mut ChaCha20Rng::from_seed([1; 32])).unwrap();
        let sig2 = sign_with_rng(&pair, b"hello", &mut ChaCha20Rng::from_seed([1; 32])).unwrap();
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn signature_does_not_verify_other_message() {
        let pair = test_pair();
        let signature = sign(&pair, b"hello").unwrap();
        assert!(pair.verifying_key().verify(b"hellp", &signature).is_err());
    }

    #[test]
    fn entropy_failure_is_crypto_error() {
        let err = sign_with_rng(&test_pair(), b"hello", &mut BrokenRng).unwrap_err();
        assert!(matches!(err, IdentityError::Crypto(_)), "got {err:?}");
    }
}
