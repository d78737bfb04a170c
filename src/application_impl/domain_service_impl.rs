use crate::application_port::{DomainError, DomainService};
use crate::domain_port::DomainStore;
use std::sync::Arc;

pub struct RealDomainService {
    store: Arc<dyn DomainStore>,
}

impl RealDomainService {
    pub fn new(store: Arc<dyn DomainStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl DomainService for RealDomainService {
    async fn available_domains(&self) -> Result<Vec<String>, DomainError> {
        let domains = self.store.list_domains().await?;
        Ok(domains.into_iter().map(|d| d.name).collect())
    }
}
