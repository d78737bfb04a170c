//! OpenPGP key rings and token sealing on top of rPGP (`pgp`).

mod key_ring;
mod token_sealer_pgp;

pub use key_ring::*;
pub use token_sealer_pgp::*;
