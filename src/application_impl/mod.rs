mod account_service_fake;
mod account_service_impl;
mod auth_service_impl;
mod domain_service_impl;

pub use account_service_fake::*;
pub use account_service_impl::*;
pub use auth_service_impl::*;
pub use domain_service_impl::*;
