use anyhow::Context;
use clap::Parser;
use esign_envelope::core::sender::load_envelope;
use esign_envelope::core::{ConfigProvider, Storage};
use esign_envelope::utils::{logger, validation::Validate};
use esign_envelope::{
    CliConfig, EnvelopeDefinition, EnvelopeSender, EsignError, HttpEnvelopeApi, LocalStorage,
    TomlConfig,
};

const DRY_RUN_FILENAME: &str = "envelope_request.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting esign-envelope");

    // A TOML file, when given, replaces the flags
    let file_config = match &cli.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
        ),
        None => None,
    };
    let config: &dyn ConfigProvider = match &file_config {
        Some(toml) => toml,
        None => &cli,
    };

    // Validate configuration
    let validation = match &file_config {
        Some(toml) => toml.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validation {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }

    match run(config, cli.dry_run).await {
        Ok(message) => {
            println!("✅ {}", message);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Envelope submission failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(if e.is_input_error() { 2 } else { 1 });
        }
    }
}

async fn run(config: &dyn ConfigProvider, dry_run: bool) -> Result<String, EsignError> {
    let request = config.envelope_request()?;
    // Document and template paths resolve against the working directory
    let documents = LocalStorage::new(".");

    // Dry run: write the request body, skip submission
    if dry_run {
        let envelope = load_envelope(&documents, &request).await?;
        let body = serde_json::to_vec_pretty(&EnvelopeDefinition::from(&envelope))?;

        let output = LocalStorage::new(config.output_path());
        output.write_file(DRY_RUN_FILENAME, &body).await?;
        tracing::info!("Request body written to {}/{}", config.output_path(), DRY_RUN_FILENAME);
        return Ok(format!(
            "Dry run: request body saved to {}/{}",
            config.output_path(),
            DRY_RUN_FILENAME
        ));
    }

    // Create the API client and sender
    let api = HttpEnvelopeApi::from_config(config)?;
    let sender = EnvelopeSender::new(documents, api);
    let summary = sender.send(&request).await?;

    Ok(format!("Envelope was created. EnvelopeId {}", summary.envelope_id))
}
