use anyhow::{Result, anyhow};
use config::{Config, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub auth: Auth,
    pub http: Http,
    pub log: Log,
    #[serde(default)]
    pub directory: Directory,
    #[serde(default)]
    pub accounts: Vec<AccountSeed>,
}

#[derive(Debug, Deserialize)]
pub struct Auth {
    pub backend: String, // "fake" or "real"
    #[serde(default = "default_timeout_ms")]
    pub authenticate_timeout_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub seal_timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Http {
    pub address: String,
    // TLS is enabled only when both are set
    pub cert_path: Option<String>,
    pub key_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Log {
    pub filter: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Directory {
    #[serde(default)]
    pub domains: Vec<String>,
}

#[derive(Deserialize)]
pub struct AccountSeed {
    pub username: String,
    pub password: String,
    /// Armored key ring. A fresh one is generated when absent.
    pub private_key_path: Option<String>,
}

impl std::fmt::Debug for AccountSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountSeed")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("private_key_path", &self.private_key_path)
            .finish()
    }
}

fn default_timeout_ms() -> u64 {
    5_000
}

#[cfg(debug_assertions)]
const SETTINGS_PATH: &str = "settings/dev.toml";
#[cfg(not(debug_assertions))]
const SETTINGS_PATH: &str = "settings/release.toml";

pub fn parse_settings(path: Option<&str>) -> Result<Settings> {
    let path = path.unwrap_or(SETTINGS_PATH);

    let settings: Settings = Config::builder()
        .add_source(File::with_name(path))
        .build()
        .map_err(|e| anyhow!(e))?
        .try_deserialize()
        .map_err(|e| anyhow!(e))?;

    Ok(settings)
}
