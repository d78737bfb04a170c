mod account_service;
mod auth_service;
mod domain_service;
mod token_sealer;

pub use account_service::*;
pub use auth_service::*;
pub use domain_service::*;
pub use token_sealer::*;
