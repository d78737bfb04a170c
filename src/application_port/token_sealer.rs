#[derive(Debug, thiserror::Error)]
pub enum SealError {
    #[error("key ring does not contain any key")]
    NoUsableKey,
    #[error("invalid key ring: {0}")]
    KeyRing(String),
    #[error("invalid armor: {0}")]
    Armor(String),
    #[error("malformed message: {0}")]
    Malformed(String),
    #[error("crypto error: {0}")]
    Crypto(String),
}

/// Seals a token for the holder of a key ring.
///
/// The envelope is an armored OpenPGP message addressed to the ring's primary
/// entity only, with no signature. Implementations are synchronous and CPU
/// bound; async callers should move them off the reactor.
pub trait TokenSealer: Send + Sync {
    fn seal(&self, plaintext: &str, key_material: &str) -> Result<String, SealError>;
    fn open(&self, envelope: &str, key_material: &str) -> Result<String, SealError>;
}
