use clap::Parser;
use fpl_transfer::utils::error::TransferError;
use fpl_transfer::utils::{logger, validation::Validate};
use fpl_transfer::{CliArgs, FplConfig, HttpFantasyApi, TransferEngine};

fn exit_with(e: &TransferError) -> ! {
    tracing::error!(
        "❌ fpl-transfer failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting fpl-transfer");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match FplConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    config.apply_overrides(&args);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let api = match HttpFantasyApi::from_config(&config) {
        Ok(api) => api,
        Err(e) => exit_with(&e),
    };
    let engine = TransferEngine::new(api);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be submitted");
        let request = match engine.prepare(&config.request).await {
            Ok(request) => request,
            Err(e) => exit_with(&e),
        };
        println!("{}", serde_json::to_string(&request)?);
        println!("{:?}", request);
        return Ok(());
    }

    let report = match engine.run(&config.request, &config.auth).await {
        Ok(report) => report,
        Err(e) => exit_with(&e),
    };

    for line in report.lines() {
        println!("{}", line);
    }

    match report.outcome.into_result() {
        Ok(transfers) => {
            println!("✅ {} transfer(s) accepted", transfers.len());
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}
