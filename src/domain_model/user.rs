use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Uid(pub uuid::Uuid);

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An authenticated account as handed to the token issuer.
///
/// `private_key` is the armored key ring the access token gets sealed to.
/// Both key fields are echoed back to the client unchanged.
#[derive(Debug, Clone)]
pub struct Account {
    pub uid: Uid,
    pub username: String,
    pub private_key: String,
    pub encrypted_private_key: String,
}
