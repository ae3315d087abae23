use clap::{Parser, Subcommand};
use headshot_studio::{
    logger::{self, LoggerConfig},
    server, Config, GeminiClient,
};

#[derive(Parser, Debug)]
#[command(name = "headshot-studio")]
#[command(about = "Stylized professional headshots from a single photo via Gemini")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// List the Gemini models the configured API key can access
    ListModels,
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::from_env())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = Config::from_env();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            if let Err(e) = server::run(config).await {
                log::error!("❌ Server failed: {}", e);
                return Err(e.into());
            }
        }
        Commands::ListModels => list_models(config).await?,
    }

    Ok(())
}

async fn list_models(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = GeminiClient::new(config.gemini)?;
    let models = client.models().list().await?;

    println!("Available models:");
    for model in models {
        println!("- {}", model.name);
        if let Some(display_name) = &model.display_name {
            println!("  Display Name: {}", display_name);
        }
        println!(
            "  Supported Methods: {}",
            model.supported_generation_methods.join(", ")
        );
        println!();
    }

    Ok(())
}
