use anyhow::{Context, Result};
use blob_tier_fixer::{
    AccessTier, ContainerName, ObjectPath, RunConfig, RunSummary, Selection,
    app::{AppBuilder, AppConfig, AppError, StorageBackend},
    services::TierPipeline,
};
use clap::{ArgAction, Parser, error::ErrorKind};
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_USAGE: u8 = 1;
const EXIT_FAILURE: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "fixtier")]
#[command(about = "Move the blobs of a storage container to a colder access tier", long_about = None)]
struct Cli {
    /// Storage connection string (AccountName or BlobEndpoint, plus SharedAccessSignature)
    #[arg(long, env = "FIXTIER_CONNECTION_STRING", hide_env_values = true)]
    connection_string: String,

    /// Container to scan
    #[arg(long, env = "FIXTIER_CONTAINER")]
    container: String,

    /// Only report what would be changed
    #[arg(
        long,
        env = "FIXTIER_DRY_RUN",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = false,
        default_missing_value = "true"
    )]
    dry_run: bool,

    /// Refuse to run when more candidates than this are found
    #[arg(
        long,
        env = "FIXTIER_MAX_BLOBS",
        default_value_t = 5000,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_blobs: u32,

    /// Transition this single blob instead of listing the container
    #[arg(long, env = "FIXTIER_BLOB_PATH")]
    blob_path: Option<String>,

    /// Consider every blob, not only those still in a warmer tier
    #[arg(long)]
    all_blobs: bool,

    /// Tier to move blobs to (hot, cool, cold, archive)
    #[arg(long, env = "FIXTIER_TARGET_TIER", default_value = "archive")]
    target_tier: String,

    /// Maximum number of tier changes in flight
    #[arg(
        long,
        env = "FIXTIER_CONCURRENCY",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    concurrency: u32,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let container = ContainerName::new(self.container.clone())
            .with_context(|| format!("Invalid container name '{}'", self.container))?;
        let target_tier: AccessTier = self
            .target_tier
            .parse()
            .with_context(|| format!("Invalid target tier '{}'", self.target_tier))?;
        let blob_path = self
            .blob_path
            .as_ref()
            .map(|path| {
                ObjectPath::new(path.clone())
                    .with_context(|| format!("Invalid blob path '{}'", path))
            })
            .transpose()?;
        let selection = if self.all_blobs {
            Selection::All
        } else {
            Selection::Warm
        };

        let run = RunConfig::builder()
            .container(container)
            .target_tier(target_tier)
            .dry_run(self.dry_run)
            .max_objects(self.max_blobs as usize)
            .maybe_blob_path(blob_path)
            .selection(selection)
            .concurrency(self.concurrency as usize)
            .build();

        Ok(AppConfig {
            storage_backend: StorageBackend::Azure {
                connection_string: self.connection_string.clone(),
            },
            run,
        })
    }

    fn init_logging(&self) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(self.log_level.to_lowercase()))
            .with_context(|| format!("Invalid log level '{}'", self.log_level))?;

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

async fn run(pipeline: &TierPipeline) -> Result<RunSummary> {
    let summary = pipeline.run().await.context("Tier run aborted")?;
    Ok(summary)
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    if let Err(e) = cli.init_logging() {
        eprintln!("{:#}", e);
        return ExitCode::from(EXIT_USAGE);
    }

    let config = match cli.to_app_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {:#}", e);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match serde_json::to_string(&config.run) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Could not render configuration: {}", e),
    }

    let pipeline = match AppBuilder::new(config).build() {
        Ok(pipeline) => pipeline,
        Err(e @ AppError::Configuration { .. }) => {
            eprintln!("{}", e);
            return ExitCode::from(EXIT_USAGE);
        }
        Err(e) => {
            eprintln!("An error happened: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    match run(&pipeline).await {
        Ok(summary) => {
            info!(
                candidates = summary.candidates,
                applied = summary.applied,
                simulated = summary.simulated,
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("An error happened: {:#}", e);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
