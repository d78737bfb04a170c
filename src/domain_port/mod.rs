mod account_repo;
mod domain_store;

pub use account_repo::*;
pub use domain_store::*;
