//! ECDSA verification over secp256r1.

use p256::ecdsa::signature::Verifier;
use p256::ecdsa::{Signature, VerifyingKey};

/// Verifies a 64-byte `r || s` signature over `message` with a compressed
/// public key. The message is hashed with SHA-256 as part of verification.
///
/// Malformed keys or signatures verify as false rather than erroring; the
/// VM treats them as failed signature checks.
pub fn verify_signature(public_key: &[u8], signature: &[u8], message: &[u8]) -> bool {
    let Ok(key) = VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };
    let Ok(sig) = Signature::from_slice(signature) else {
        return false;
    };
    key.verify(message, &sig).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::ecdsa::signature::Signer;
    use p256::ecdsa::SigningKey;

    fn test_key() -> SigningKey {
        SigningKey::from_slice(&[0x11; 32]).unwrap()
    }

    #[test]
    fn accepts_a_valid_signature() {
        let key = test_key();
        let message = b"deterministic message";
        let signature: Signature = key.sign(message);
        let public = key.verifying_key().to_encoded_point(true);
        assert!(verify_signature(
            public.as_bytes(),
            &signature.to_bytes(),
            message
        ));
    }

    #[test]
    fn rejects_a_tampered_message() {
        let key = test_key();
        let signature: Signature = key.sign(b"original");
        let public = key.verifying_key().to_encoded_point(true);
        assert!(!verify_signature(
            public.as_bytes(),
            &signature.to_bytes(),
            b"tampered"
        ));
    }

    #[test]
    fn malformed_inputs_verify_false() {
        assert!(!verify_signature(&[0x02; 33], &[0u8; 64], b"m"));
        assert!(!verify_signature(&[], &[], b"m"));
    }
}
