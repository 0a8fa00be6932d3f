use crate::config::toml_config::FplConfig;
use crate::core::TransferSpec;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "fpl-transfer")]
#[command(about = "Log in to Fantasy Premier League and submit a transfer")]
pub struct CliArgs {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "fpl-transfer.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Build and print the payload without logging in or submitting
    #[arg(long)]
    pub dry_run: bool,

    /// Override the entry (team) id
    #[arg(long)]
    pub entry: Option<u64>,

    /// Override the gameweek
    #[arg(long)]
    pub event: Option<u32>,

    /// Transfer as IN:OUT or IN:OUT:PURCHASE:SELLING; replaces the configured list
    #[arg(long = "transfer", value_name = "IN:OUT[:PURCHASE:SELLING]")]
    pub transfers: Vec<TransferSpec>,

    /// Play the wildcard chip
    #[arg(long)]
    pub wildcard: bool,

    /// Play the free hit chip
    #[arg(long)]
    pub freehit: bool,

    /// Send the request with confirmed=false
    #[arg(long)]
    pub preview: bool,

    /// Check the squad and bank before submitting
    #[arg(long)]
    pub verify_squad: bool,
}

impl FplConfig {
    /// Applies command line overrides on top of the file settings.
    pub fn apply_overrides(&mut self, args: &CliArgs) {
        if let Some(entry) = args.entry {
            self.request.entry = entry;
            tracing::info!("🔧 Entry overridden to: {}", entry);
        }
        if let Some(event) = args.event {
            self.request.event = event;
            tracing::info!("🔧 Gameweek overridden to: {}", event);
        }
        if !args.transfers.is_empty() {
            self.request.transfers = args.transfers.clone();
            tracing::info!(
                "🔧 Transfers replaced by {} from the command line",
                args.transfers.len()
            );
        }
        if args.wildcard {
            self.request.wildcard = true;
        }
        if args.freehit {
            self.request.freehit = true;
        }
        if args.preview {
            self.request.confirmed = false;
        }
        if args.verify_squad {
            self.request.verify_squad = true;
        }
    }
}
