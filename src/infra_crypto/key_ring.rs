use pgp::crypto::ecc_curve::ECCCurve;
use pgp::crypto::hash::HashAlgorithm;
use pgp::crypto::sym::SymmetricKeyAlgorithm;
use pgp::types::{CompressionAlgorithm, PublicKeyTrait};
use pgp::{Deserializable, KeyType, SecretKeyParamsBuilder, SignedSecretKey, SubkeyParamsBuilder};
use smallvec::smallvec;

#[derive(Debug, thiserror::Error)]
pub enum KeyRingError {
    #[error(transparent)]
    Pgp(#[from] pgp::errors::Error),
    #[error("invalid key parameters: {0}")]
    Params(String),
}

/// Secret keys read from one `PGP PRIVATE KEY BLOCK`, in file order. The
/// first one is the primary entity.
#[derive(Debug, Clone, Default)]
pub struct KeyRing {
    keys: Vec<SignedSecretKey>,
}

impl KeyRing {
    pub fn parse_armored(text: &str) -> Result<Self, KeyRingError> {
        let (keys, _headers) = SignedSecretKey::from_armor_many(text.as_bytes())?;
        let keys = keys.collect::<Result<Vec<_>, _>>()?;
        Ok(KeyRing { keys })
    }

    /// A fresh Ed25519 primary with a Curve25519 encryption subkey, armored.
    /// No passphrase.
    pub fn generate_armored(user_id: &str) -> Result<String, KeyRingError> {
        let mut rng = rand::thread_rng();

        let encryption_subkey = SubkeyParamsBuilder::default()
            .key_type(KeyType::ECDH(ECCCurve::Curve25519))
            .can_encrypt(true)
            .build()
            .map_err(|e| KeyRingError::Params(e.to_string()))?;

        let params = SecretKeyParamsBuilder::default()
            .key_type(KeyType::EdDSALegacy)
            .can_certify(true)
            .can_sign(true)
            .primary_user_id(user_id.to_string())
            .preferred_symmetric_algorithms(smallvec![SymmetricKeyAlgorithm::AES256])
            .preferred_hash_algorithms(smallvec![HashAlgorithm::SHA2_256])
            .preferred_compression_algorithms(smallvec![CompressionAlgorithm::Uncompressed])
            .subkey(encryption_subkey)
            .build()
            .map_err(|e| KeyRingError::Params(e.to_string()))?;

        let key = params.generate(&mut rng)?.sign(&mut rng, String::new)?;
        Ok(key.to_armored_string(None.into())?)
    }

    pub fn primary(&self) -> Option<&SignedSecretKey> {
        self.keys.first()
    }

    pub fn keys(&self) -> &[SignedSecretKey] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Whether an entity carries a key that can receive encrypted messages,
/// either an encryption subkey or an encryption-capable primary.
pub fn can_receive(key: &SignedSecretKey) -> bool {
    key.secret_subkeys.iter().any(|s| s.key.is_encryption_key())
        || key.public_subkeys.iter().any(|s| s.key.is_encryption_key())
        || key.primary_key.is_encryption_key()
}
