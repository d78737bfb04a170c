mod account_repo_memory;
mod domain_store_memory;

pub use account_repo_memory::*;
pub use domain_store_memory::*;
