use neutron_auth::settings::*;

fn main() -> anyhow::Result<()> {
    // Load settings from the default location
    let project_settings = parse_settings(None)?;
    println!("Loaded settings: {:?}", project_settings);

    // Attempt to load from an invalid path (expected to fail)
    let is_err = parse_settings(Some("")).is_err();
    println!("Error on invalid path: {:?}", is_err);

    // Attempt to load from a custom path
    // $ cargo run --bin settings_demo -- --settings=settings/release.toml
    let cli = Cli::parse();
    let project_settings = parse_settings(cli.settings.as_deref())?;
    println!(
        "Loaded {} domain(s), {} seeded account(s)",
        project_settings.directory.domains.len(),
        project_settings.accounts.len()
    );

    Ok(())
}
