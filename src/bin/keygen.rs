//! Prints a freshly generated OpenPGP secret key (Ed25519 primary with a
//! Curve25519 encryption subkey, no passphrase) on stdout.
//!
//! $ cargo run --bin keygen -- --user-id alice@example.com > alice.key
//! then point an account's `private_key_path` at the file.

use clap::Parser;
use neutron_auth::infra_crypto::KeyRing;

#[derive(Parser, Debug)]
struct Args {
    /// User ID bound to the primary key
    #[arg(long)]
    user_id: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    println!("{}", KeyRing::generate_armored(&args.user_id)?);
    Ok(())
}
