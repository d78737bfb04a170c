use crate::domain_port::DomainStoreError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error(transparent)]
    Store(#[from] DomainStoreError),
}

#[async_trait::async_trait]
pub trait DomainService: Send + Sync {
    /// Names of the domains new addresses can be created under.
    async fn available_domains(&self) -> Result<Vec<String>, DomainError>;
}
