use crate::domain_model::{DomainId, DomainRecord};
use crate::domain_port::{DomainStore, DomainStoreError};
use tokio::sync::RwLock;

/// Domains kept in process memory, in insertion order.
#[derive(Debug, Default)]
pub struct MemoryDomainStore {
    domains: RwLock<Vec<DomainRecord>>,
}

impl MemoryDomainStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DomainStore for MemoryDomainStore {
    async fn list_domains(&self) -> Result<Vec<DomainRecord>, DomainStoreError> {
        Ok(self.domains.read().await.clone())
    }

    async fn get_domain_by_name(&self, name: &str) -> Result<DomainRecord, DomainStoreError> {
        self.domains
            .read()
            .await
            .iter()
            .find(|d| d.name == name)
            .cloned()
            .ok_or(DomainStoreError::NotFound)
    }

    async fn insert_domain(
        &self,
        mut domain: DomainRecord,
    ) -> Result<DomainRecord, DomainStoreError> {
        if domain.name.is_empty() {
            return Err(DomainStoreError::InvalidName);
        }

        // check and append under one write guard
        let mut domains = self.domains.write().await;
        if domains.iter().any(|d| d.name == domain.name) {
            return Err(DomainStoreError::NameTaken(domain.name));
        }
        domain.id = DomainId::generate();
        domains.push(domain.clone());
        Ok(domain)
    }
}
