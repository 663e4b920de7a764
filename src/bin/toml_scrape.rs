use clap::Parser;
use syllabus_etl::core::builder::generate_combinations;
use syllabus_etl::core::term::{in_scope, term_code};
use syllabus_etl::domain::ports::ConfigProvider;
use syllabus_etl::utils::{logger, validation::Validate};
use syllabus_etl::{CanvasClient, EtlEngine, LocalStorage, SyllabusPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-scrape")]
#[command(about = "Syllabus scrape driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "syllabus-etl.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the output directory from the config
    #[arg(long)]
    output_path: Option<String>,

    /// Show what would be scraped without sending any request
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config file '{}': {}", args.config, e);
            eprintln!("Make sure the file exists and is valid TOML format");
            std::process::exit(e.exit_code());
        }
    };

    let verbose = args.verbose || config.verbose();
    if config.json_logs() {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }
    tracing::info!("Loaded configuration from: {}", args.config);

    if let Some(output_path) = args.output_path {
        tracing::info!("Output path overridden to: {}", output_path);
        config.load.output_path = output_path;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("DRY RUN MODE - no requests will be sent");
        perform_dry_run();
        return Ok(());
    }

    let client = CanvasClient::from_config(&config)?;
    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = SyllabusPipeline::new(storage, config, client);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("Syllabi saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Scrape failed: {} (Category: {:?})", e, e.category());
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("Configuration summary:");
    tracing::info!("   Canvas: {}", config.base_url());
    tracing::info!("   Registry course: {}", config.registry_course_id());
    tracing::info!(
        "   Timeout: {}s, page size: {}",
        config.request_timeout_secs(),
        config.per_page()
    );
    if let Some(token) = config.fallback_module_token() {
        tracing::info!("   Fallback module token: {}", token);
    }
    tracing::info!(
        "   Output: {}/{}",
        config.output_path(),
        config.output_file()
    );
}

fn perform_dry_run() {
    let combinations: Vec<_> = generate_combinations()
        .into_iter()
        .filter(|(_, season, year)| in_scope(*season, *year))
        .collect();

    tracing::info!("Would visit {} combinations:", combinations.len());
    for (department, season, year) in &combinations {
        tracing::info!("   {} {}", department, term_code(*season, *year));
    }
}
