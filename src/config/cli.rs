use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gift-catalog")]
#[command(about = "Inspect, buy and upgrade gifts from the local gift catalog")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Availability store file (overrides storage.path)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Storage backend: file, memory or disabled (overrides storage.backend)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Storage key prefix (overrides storage.key_prefix)
    #[arg(long, global = true)]
    pub key_prefix: Option<String>,

    /// Base URL for animated assets (overrides assets.base_url)
    #[arg(long, global = true)]
    pub asset_base_url: Option<String>,

    /// Log format: compact or json (overrides logging.format)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List every gift in the catalog
    List,
    /// Show a gift at a given level
    Show {
        id: String,
        #[arg(short, long, default_value_t = 1)]
        level: u32,
        #[arg(long)]
        json: bool,
    },
    /// Buy one unit of a gift
    Buy {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the remaining supply of a gift
    Availability { id: String },
    /// Upgrade a gift from the given level to the next one
    Upgrade {
        id: String,
        #[arg(long, default_value_t = 1)]
        from: u32,
        #[arg(long)]
        json: bool,
    },
    /// Export the catalog as CSV
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl CliConfig {
    /// Loads the configuration file, if any, and applies command line overrides.
    pub fn load(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };

        if let Some(store) = &self.store {
            config.storage.path = store.clone();
        }
        if let Some(backend) = &self.backend {
            config.storage.backend = backend.clone();
        }
        if let Some(prefix) = &self.key_prefix {
            config.storage.key_prefix = prefix.clone();
        }
        if let Some(base_url) = &self.asset_base_url {
            config.assets.base_url = base_url.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = Some(format.clone());
        }

        Ok(config)
    }
}
