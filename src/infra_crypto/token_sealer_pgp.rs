use super::key_ring::{KeyRing, KeyRingError};
use crate::application_port::{SealError, TokenSealer};
use crate::logger::*;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::types::PublicKeyTrait;
use pgp::{Deserializable, Message, SignedSecretKey};

const SYMMETRIC_ALGORITHM: SymmetricKeyAlgorithm = SymmetricKeyAlgorithm::AES128;

impl From<KeyRingError> for SealError {
    fn from(err: KeyRingError) -> Self {
        SealError::KeyRing(err.to_string())
    }
}

/// OpenPGP encryption of a token to the primary entity of an account's key
/// ring: one recipient, no signature, SEIPD v1 so any RFC 4880 client can
/// decrypt it. The recipient is the entity's first encryption subkey, or the
/// primary key itself when that can encrypt.
#[derive(Debug, Default, Clone, Copy)]
pub struct PgpTokenSealer;

impl PgpTokenSealer {
    pub fn new() -> Self {
        PgpTokenSealer
    }

    fn parse_ring(key_material: &str) -> Result<KeyRing, SealError> {
        if key_material.trim().is_empty() {
            return Err(SealError::NoUsableKey);
        }
        let ring = KeyRing::parse_armored(key_material)?;
        if ring.is_empty() {
            return Err(SealError::NoUsableKey);
        }
        Ok(ring)
    }

    fn encrypt_to(
        message: &Message,
        recipient: &impl PublicKeyTrait,
    ) -> Result<Message, SealError> {
        debug!(key_id = ?recipient.key_id(), "sealing token");
        let mut rng = rand::thread_rng();
        message
            .encrypt_to_keys_seipdv1(&mut rng, SYMMETRIC_ALGORITHM, &[recipient])
            .map_err(|e| SealError::Crypto(e.to_string()))
    }

    fn encrypt_to_entity(
        message: &Message,
        entity: &SignedSecretKey,
    ) -> Result<Message, SealError> {
        if let Some(subkey) = entity
            .secret_subkeys
            .iter()
            .find(|s| s.key.is_encryption_key())
        {
            return Self::encrypt_to(message, &subkey.key);
        }
        if let Some(subkey) = entity
            .public_subkeys
            .iter()
            .find(|s| s.key.is_encryption_key())
        {
            return Self::encrypt_to(message, &subkey.key);
        }
        if entity.primary_key.is_encryption_key() {
            return Self::encrypt_to(message, &entity.primary_key);
        }
        Err(SealError::NoUsableKey)
    }
}

impl TokenSealer for PgpTokenSealer {
    fn seal(&self, plaintext: &str, key_material: &str) -> Result<String, SealError> {
        let ring = Self::parse_ring(key_material)?;
        let primary = ring.primary().ok_or(SealError::NoUsableKey)?;

        let message = Message::new_literal_bytes("", plaintext.as_bytes());
        let sealed = Self::encrypt_to_entity(&message, primary)?;
        sealed
            .to_armored_string(None.into())
            .map_err(|e| SealError::Armor(e.to_string()))
    }

    fn open(&self, envelope: &str, key_material: &str) -> Result<String, SealError> {
        let ring = Self::parse_ring(key_material)?;
        let (message, _headers) =
            Message::from_string(envelope).map_err(|e| SealError::Armor(e.to_string()))?;

        let keys: Vec<&SignedSecretKey> = ring.keys().iter().collect();
        let (decrypted, _key_ids) = message
            .decrypt(String::new, &keys)
            .map_err(|e| SealError::Crypto(e.to_string()))?;
        let content = decrypted
            .get_content()
            .map_err(|e| SealError::Crypto(e.to_string()))?
            .ok_or_else(|| SealError::Malformed("message carries no literal data".to_string()))?;

        String::from_utf8(content).map_err(|e| SealError::Malformed(e.to_string()))
    }
}
