use crate::domain_model::DomainRecord;

#[derive(Debug, thiserror::Error)]
pub enum DomainStoreError {
    #[error("No such domain")]
    NotFound,
    #[error("domain name must not be empty")]
    InvalidName,
    #[error("domain already exists: {0}")]
    NameTaken(String),
}

#[async_trait::async_trait]
pub trait DomainStore: Send + Sync {
    /// All domains, in insertion order.
    async fn list_domains(&self) -> Result<Vec<DomainRecord>, DomainStoreError>;

    /// Exact, case-sensitive match on the name.
    async fn get_domain_by_name(&self, name: &str) -> Result<DomainRecord, DomainStoreError>;

    /// Store a domain under a freshly generated id. Any id on `domain` is
    /// discarded.
    async fn insert_domain(&self, domain: DomainRecord) -> Result<DomainRecord, DomainStoreError>;
}
