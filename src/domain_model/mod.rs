mod domain;
mod grant;
mod user;

pub use domain::*;
pub use grant::*;
pub use user::*;
