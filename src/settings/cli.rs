use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "neutron-auth", about = "Session credential service for mail accounts")]
pub struct Cli {
    /// Settings file, defaults to settings/dev.toml (settings/release.toml in release builds)
    #[arg(long)]
    pub settings: Option<String>,
    /// Overrides http.address from the settings file
    #[arg(long)]
    pub address: Option<String>,
}
