use neutron_auth::logger::*;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let config = LogConfig {
        filter: "neutron_auth=debug".to_string(),
    };
    logger.reload_from_config(&config)?;
    trace!("application trace log");
    debug!("application debug log");
    info!("application info log");

    // an invalid directive leaves the previous filter in place
    let bad = LogConfig {
        filter: "neutron_auth=loud".to_string(),
    };
    if let Err(e) = logger.reload_from_config(&bad) {
        warn!("rejected filter: {}", e);
    }

    Ok(())
}
