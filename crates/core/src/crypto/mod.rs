//! SM2 field-encryption helper
//!
//! Protects field-level values before they leave the client and decrypts
//! values returned by the trusted counterpart holding the matching private
//! key. Ciphertexts use the C1C3C2 component ordering and travel as hex
//! strings.
//!
//! Every call is an independent transform; the module holds no mutable
//! state. Failures never cross the public boundary as panics: each path
//! logs a diagnostic and returns a tagged [`CryptoError`] so callers can
//! branch on the cause.

use chameleon_domain::constants::SM2_DIST_ID;
use chameleon_domain::{CryptoConfig, CryptoError};
use once_cell::sync::Lazy;
use regex::Regex;
use sm2::dsa::signature::{Signer, Verifier};
use sm2::dsa::{Signature, SigningKey, VerifyingKey};
use sm2::pke::{DecryptingKey, EncryptingKey, Mode};
use sm2::{PublicKey, SecretKey};
use tracing::error;

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]+$").expect("hex pattern compiles"));

/// Field cipher bound to the public key injected at startup.
///
/// The key is read-only for the lifetime of the process; decryption and
/// signing take their private key per call and never retain it.
#[derive(Debug, Clone)]
pub struct FieldCipher {
    public_key: String,
}

impl FieldCipher {
    /// Create a cipher for the given uncompressed SEC1 public key (hex).
    ///
    /// # Errors
    /// Returns [`CryptoError::EmptyInput`] when the key is empty. Key
    /// parsing is deferred to the first operation, matching the upstream
    /// contract where the key is an opaque deployment constant.
    pub fn new(public_key_hex: impl Into<String>) -> Result<Self, CryptoError> {
        let public_key = public_key_hex.into();
        if public_key.is_empty() {
            error!("refusing to build field cipher without a public key");
            return Err(CryptoError::EmptyInput);
        }
        Ok(Self { public_key })
    }

    /// Build from the crypto section of the application configuration.
    ///
    /// # Errors
    /// See [`FieldCipher::new`].
    pub fn from_config(config: &CryptoConfig) -> Result<Self, CryptoError> {
        Self::new(config.public_key.clone())
    }

    /// The configured public key, identical across calls.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Encrypt a field value under the configured public key.
    ///
    /// # Errors
    /// See [`encrypt`].
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        encrypt(plaintext, &self.public_key)
    }

    /// Decrypt a hex ciphertext with a caller-supplied private key.
    ///
    /// # Errors
    /// See [`decrypt`].
    pub fn decrypt(
        &self,
        ciphertext_hex: &str,
        private_key_hex: &str,
    ) -> Result<String, CryptoError> {
        decrypt(ciphertext_hex, private_key_hex)
    }

    /// Sign data with a caller-supplied private key.
    ///
    /// # Errors
    /// See [`sign`].
    pub fn sign(&self, data: &str, private_key_hex: &str) -> Result<String, CryptoError> {
        sign(data, private_key_hex)
    }

    /// Verify a hex signature against the configured public key.
    pub fn verify(&self, data: &str, signature_hex: &str) -> bool {
        verify(data, signature_hex, &self.public_key)
    }
}

/// Encrypt `plaintext` under the given SM2 public key (C1C3C2 ordering).
///
/// Returns the ciphertext as a hex string.
///
/// # Errors
/// - [`CryptoError::EmptyInput`] when either argument is empty
/// - [`CryptoError::Primitive`] when the key is malformed or the cipher
///   rejects the input
pub fn encrypt(plaintext: &str, public_key_hex: &str) -> Result<String, CryptoError> {
    if plaintext.is_empty() || public_key_hex.is_empty() {
        error!("missing plaintext or public key for encryption");
        return Err(CryptoError::EmptyInput);
    }

    let public_key = parse_public_key(public_key_hex)?;
    let ciphertext = EncryptingKey::new_with_mode(public_key, Mode::C1C3C2)
        .encrypt(plaintext.as_bytes())
        .map_err(|e| primitive_failure("SM2 encryption failed", &e))?;

    Ok(hex::encode(ciphertext))
}

/// Decrypt a hex ciphertext with the given SM2 private key (C1C3C2).
///
/// # Errors
/// - [`CryptoError::EmptyInput`] when either argument is empty
/// - [`CryptoError::MalformedHex`] when the ciphertext is not a pure hex
///   string; the primitive is never invoked in this case
/// - [`CryptoError::Primitive`] when the key is malformed, the ciphertext
///   is corrupt, or the plaintext is not valid UTF-8
pub fn decrypt(ciphertext_hex: &str, private_key_hex: &str) -> Result<String, CryptoError> {
    if ciphertext_hex.is_empty() || private_key_hex.is_empty() {
        error!("missing ciphertext or private key for decryption");
        return Err(CryptoError::EmptyInput);
    }
    if !HEX_RE.is_match(ciphertext_hex) {
        error!("ciphertext is not a valid hex string");
        return Err(CryptoError::MalformedHex);
    }

    let ciphertext = hex::decode(ciphertext_hex).map_err(|e| {
        error!(error = %e, "ciphertext hex decoding failed");
        CryptoError::MalformedHex
    })?;

    let secret_key = parse_secret_key(private_key_hex)?;
    let plaintext = DecryptingKey::new_with_mode(secret_key.to_nonzero_scalar(), Mode::C1C3C2)
        .decrypt(&ciphertext)
        .map_err(|e| primitive_failure("SM2 decryption failed", &e))?;

    String::from_utf8(plaintext)
        .map_err(|e| primitive_failure("decrypted bytes are not valid UTF-8", &e))
}

/// Sign `data` with the given SM2 private key.
///
/// Returns the 64-byte signature as a hex string.
///
/// # Errors
/// - [`CryptoError::EmptyInput`] when either argument is empty
/// - [`CryptoError::Primitive`] when the key is malformed or signing fails
pub fn sign(data: &str, private_key_hex: &str) -> Result<String, CryptoError> {
    if data.is_empty() || private_key_hex.is_empty() {
        error!("missing data or private key for signing");
        return Err(CryptoError::EmptyInput);
    }

    let secret_key = parse_secret_key(private_key_hex)?;
    let signing_key = SigningKey::new(SM2_DIST_ID, &secret_key)
        .map_err(|e| primitive_failure("failed to derive SM2 signing key", &e))?;
    let signature: Signature = signing_key
        .try_sign(data.as_bytes())
        .map_err(|e| primitive_failure("SM2 signing failed", &e))?;

    Ok(hex::encode(signature.to_bytes()))
}

/// Verify a hex signature over `data` against an SM2 public key.
///
/// Any failure (empty input, malformed hex, malformed key, mismatched
/// signature) verifies as `false`; verification never raises.
pub fn verify(data: &str, signature_hex: &str, public_key_hex: &str) -> bool {
    if data.is_empty() || signature_hex.is_empty() || public_key_hex.is_empty() {
        return false;
    }
    let Ok(signature_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&signature_bytes) else {
        return false;
    };
    let Ok(public_key_bytes) = hex::decode(public_key_hex) else {
        return false;
    };
    let Ok(verifying_key) = VerifyingKey::from_sec1_bytes(SM2_DIST_ID, &public_key_bytes) else {
        return false;
    };

    verifying_key.verify(data.as_bytes(), &signature).is_ok()
}

fn parse_public_key(public_key_hex: &str) -> Result<PublicKey, CryptoError> {
    let bytes = hex::decode(public_key_hex)
        .map_err(|e| primitive_failure("public key is not valid hex", &e))?;
    PublicKey::from_sec1_bytes(&bytes)
        .map_err(|e| primitive_failure("malformed SM2 public key", &e))
}

fn parse_secret_key(private_key_hex: &str) -> Result<SecretKey, CryptoError> {
    let bytes = hex::decode(private_key_hex)
        .map_err(|e| primitive_failure("private key is not valid hex", &e))?;
    SecretKey::from_slice(&bytes)
        .map_err(|e| primitive_failure("malformed SM2 private key", &e))
}

fn primitive_failure(context: &str, err: &dyn std::fmt::Display) -> CryptoError {
    error!(error = %err, "{}", context);
    CryptoError::Primitive(format!("{context}: {err}"))
}

#[cfg(test)]
mod tests {
    use chameleon_domain::constants::SM2_PUBLIC_KEY;
    use rand::rngs::OsRng;
    use sm2::elliptic_curve::sec1::ToEncodedPoint;

    use super::*;

    /// Fresh (public, private) hex pair for round-trip tests.
    fn generated_key_pair() -> (String, String) {
        let secret_key = SecretKey::random(&mut OsRng);
        let public_key = secret_key.public_key().to_encoded_point(false);
        (hex::encode(public_key.as_bytes()), hex::encode(secret_key.to_bytes()))
    }

    #[test]
    fn round_trips_plaintext_through_encrypt_and_decrypt() {
        let (public_key, private_key) = generated_key_pair();

        let ciphertext = encrypt("привет, chameleon", &public_key).expect("encrypts");
        let plaintext = decrypt(&ciphertext, &private_key).expect("decrypts");

        assert_eq!(plaintext, "привет, chameleon");
    }

    #[test]
    fn digits_scenario_produces_pure_hex_and_round_trips() {
        let (public_key, private_key) = generated_key_pair();

        let ciphertext = encrypt("12345678", &public_key).expect("encrypts");
        assert!(HEX_RE.is_match(&ciphertext));
        assert_eq!(decrypt(&ciphertext, &private_key).expect("decrypts"), "12345678");
    }

    #[test]
    fn embedded_key_produces_hex_ciphertext() {
        let ciphertext = encrypt("12345678", SM2_PUBLIC_KEY).expect("encrypts");
        assert!(!ciphertext.is_empty());
        assert!(HEX_RE.is_match(&ciphertext));
    }

    #[test]
    fn encrypt_rejects_empty_inputs() {
        let (public_key, _) = generated_key_pair();

        assert_eq!(encrypt("", &public_key), Err(CryptoError::EmptyInput));
        assert_eq!(encrypt("secret", ""), Err(CryptoError::EmptyInput));
    }

    #[test]
    fn encrypt_with_malformed_key_is_primitive_failure() {
        match encrypt("secret", "not-hex-at-all") {
            Err(CryptoError::Primitive(_)) => {}
            other => panic!("expected primitive failure, got {:?}", other),
        }
    }

    #[test]
    fn decrypt_rejects_empty_inputs() {
        let (_, private_key) = generated_key_pair();

        assert_eq!(decrypt("", &private_key), Err(CryptoError::EmptyInput));
        assert_eq!(decrypt("deadbeef", ""), Err(CryptoError::EmptyInput));
    }

    #[test]
    fn decrypt_rejects_non_hex_ciphertext_before_the_primitive() {
        let (_, private_key) = generated_key_pair();

        assert_eq!(decrypt("zz", &private_key), Err(CryptoError::MalformedHex));
        assert_eq!(decrypt("dead beef", &private_key), Err(CryptoError::MalformedHex));
    }

    #[test]
    fn decrypt_of_well_formed_garbage_is_primitive_failure() {
        let (_, private_key) = generated_key_pair();

        match decrypt("deadbeef", &private_key) {
            Err(CryptoError::Primitive(_)) => {}
            other => panic!("expected primitive failure, got {:?}", other),
        }
    }

    #[test]
    fn decrypt_with_wrong_private_key_fails() {
        let (public_key, _) = generated_key_pair();
        let (_, other_private_key) = generated_key_pair();

        let ciphertext = encrypt("secret", &public_key).expect("encrypts");
        assert!(decrypt(&ciphertext, &other_private_key).is_err());
    }

    #[test]
    fn public_key_accessor_is_stable() {
        let cipher =
            FieldCipher::from_config(&chameleon_domain::CryptoConfig::default()).expect("cipher");

        assert_eq!(cipher.public_key(), SM2_PUBLIC_KEY);
        assert_eq!(cipher.public_key(), cipher.public_key());
    }

    #[test]
    fn field_cipher_requires_a_key() {
        assert_eq!(FieldCipher::new("").unwrap_err(), CryptoError::EmptyInput);
    }

    #[test]
    fn field_cipher_encrypts_with_its_configured_key() {
        let (public_key, private_key) = generated_key_pair();
        let cipher = FieldCipher::new(public_key).expect("cipher");

        let ciphertext = cipher.encrypt("field value").expect("encrypts");
        assert_eq!(cipher.decrypt(&ciphertext, &private_key).expect("decrypts"), "field value");
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let (public_key, private_key) = generated_key_pair();

        let signature = sign("payload", &private_key).expect("signs");
        assert!(HEX_RE.is_match(&signature));
        assert!(verify("payload", &signature, &public_key));
    }

    #[test]
    fn verify_rejects_tampered_data() {
        let (public_key, private_key) = generated_key_pair();

        let signature = sign("payload", &private_key).expect("signs");
        assert!(!verify("payload2", &signature, &public_key));
    }

    #[test]
    fn verify_treats_malformed_signature_as_invalid() {
        let (public_key, _) = generated_key_pair();

        assert!(!verify("payload", "zz", &public_key));
        assert!(!verify("payload", "", &public_key));
        assert!(!verify("", "deadbeef", &public_key));
    }

    #[test]
    fn sign_rejects_empty_inputs() {
        let (_, private_key) = generated_key_pair();

        assert_eq!(sign("", &private_key), Err(CryptoError::EmptyInput));
        assert_eq!(sign("payload", ""), Err(CryptoError::EmptyInput));
    }
}
