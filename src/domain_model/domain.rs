use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DomainId(pub uuid::Uuid);

impl DomainId {
    pub fn generate() -> Self {
        DomainId(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for DomainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainRecord {
    pub id: DomainId,
    pub name: String,
}

impl DomainRecord {
    /// A record that has not been stored yet. The id is a placeholder and
    /// gets replaced on insertion.
    pub fn new(name: impl Into<String>) -> Self {
        DomainRecord {
            id: DomainId(uuid::Uuid::nil()),
            name: name.into(),
        }
    }
}
