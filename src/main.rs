use clap::Parser;
use syllabus_etl::utils::{logger, validation::Validate};
use syllabus_etl::{CanvasClient, CliConfig, EtlEngine, LocalStorage, SyllabusPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting syllabus-etl");
    tracing::debug!(
        "Canvas {} registry course {}, output {}/{}",
        config.base_url,
        config.registry_course_id,
        config.output_path,
        config.output_file
    );

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let client = CanvasClient::from_config(&config)?;
    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = SyllabusPipeline::new(storage, config, client);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("Syllabi saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!("Scrape failed: {} (Category: {:?})", e, e.category());
            tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("{}", e.user_friendly_message());
            eprintln!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
