use clap::Parser;
use gift_catalog::adapters::export::write_catalog_csv;
use gift_catalog::utils::error::ErrorSeverity;
use gift_catalog::utils::logger;
use gift_catalog::utils::validation::Validate;
use gift_catalog::{CliConfig, Command, GiftInstance, GiftService, KeyValueStore, Result};

fn main() {
    let cli = CliConfig::parse();

    let config = match cli.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let format = config.log_format().unwrap_or_default();
    logger::init_cli_logger(cli.verbose, config.logging.level.as_deref(), format);
    tracing::debug!("Resolved configuration: {:?}", config);

    let result = GiftService::from_config(&config).and_then(|service| run(&service, cli.command));

    if let Err(e) = result {
        tracing::error!("Command failed: {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

fn run<S: KeyValueStore>(service: &GiftService<'_, S>, command: Command) -> Result<()> {
    match command {
        Command::List => {
            for definition in service.catalog().definitions() {
                let supply = match service.tracker().get_availability(definition) {
                    Some(remaining) => format!(
                        "{}/{} left",
                        remaining,
                        definition.total_supply.unwrap_or(remaining)
                    ),
                    None => "unlimited".to_string(),
                };
                println!(
                    "{:<14} {:>4} ⭐  {} levels  {}",
                    definition.id,
                    definition.base_price,
                    definition.max_level(),
                    supply
                );
            }
        }
        Command::Show { id, level, json } => {
            let instance = service.present(&id, level)?;
            print_instance(service, &instance, json)?;
        }
        Command::Buy { id, json } => {
            let instance = service.purchase(&id)?;
            print_instance(service, &instance, json)?;
        }
        Command::Availability { id } => match service.availability(&id)? {
            Some(remaining) => println!("{}", remaining),
            None => println!("unlimited"),
        },
        Command::Upgrade { id, from, json } => {
            let current = service.present(&id, from)?;
            let upgraded = service.upgrade(&current)?;
            print_instance(service, &upgraded, json)?;
        }
        Command::Export { output } => {
            let rows = match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)?;
                    let rows = write_catalog_csv(service.catalog(), file)?;
                    tracing::info!("📁 Catalog exported to: {}", path);
                    rows
                }
                None => write_catalog_csv(service.catalog(), std::io::stdout().lock())?,
            };
            tracing::info!("Exported {} catalog rows", rows);
        }
    }
    Ok(())
}

fn print_instance<S: KeyValueStore>(
    service: &GiftService<'_, S>,
    instance: &GiftInstance,
    json: bool,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(instance)?);
        return Ok(());
    }

    println!(
        "{} (level {}/{})",
        instance.title, instance.metadata.level, instance.metadata.max_level
    );
    println!("  gift:       {}", instance.id);
    println!("  invested:   {} ⭐", instance.stars);
    println!("  convert:    {} ⭐", instance.stars_to_convert);
    match instance.upgrade_stars {
        Some(cost) => println!("  next level: {} ⭐", cost),
        None => println!("  next level: max level reached"),
    }
    if let Some(limited) = &instance.limited {
        let remaining = limited
            .remaining
            .map(|r| r.to_string())
            .unwrap_or_else(|| "?".to_string());
        let sold_out = if limited.sold_out { " (sold out)" } else { "" };
        println!("  supply:     {}/{}{}", remaining, limited.total, sold_out);
    }
    match service.media_url(instance) {
        Ok(url) => println!("  animation:  {}", url),
        Err(e) => tracing::warn!("Could not resolve animation for {}: {}", instance.id, e),
    }
    Ok(())
}
