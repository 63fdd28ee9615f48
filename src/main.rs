use clap::{Args, Parser, Subcommand};
use console::style;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rivalscope::cli::commands::analyze::{AnalyzeOptions, CompanyInput};

#[derive(Parser)]
#[command(name = "rivalscope")]
#[command(
    version,
    about = "Competitor intelligence reports from a company URL or description"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover competitors and generate an intelligence report
    Analyze(AnalyzeArgs),

    /// List selectable models per provider
    Models {
        #[arg(long, help = "Only this provider (openai, anthropic, google, deepseek)")]
        provider: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct InputArgs {
    #[arg(long, help = "Company website (http:// or https://)")]
    url: Option<String>,
    #[arg(long, help = "Free-text company description")]
    description: Option<String>,
}

#[derive(Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,

    #[arg(long, help = "LLM provider (openai, anthropic, google, deepseek)")]
    provider: Option<String>,
    #[arg(long, conflicts_with = "model_label", help = "Model id")]
    model: Option<String>,
    #[arg(long, help = "Model display label, e.g. \"gpt-4o (Balanced/Latest)\"")]
    model_label: Option<String>,
    #[arg(long, env = "RIVALSCOPE_API_KEY", hide_env_values = true, help = "LLM API key")]
    api_key: Option<String>,
    #[arg(long, help = "Number of competitors to discover")]
    count: Option<usize>,
    #[arg(long, help = "Competitor crawls in flight at once")]
    concurrency: Option<usize>,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

impl AnalyzeArgs {
    fn into_options(self) -> AnalyzeOptions {
        let input = match (self.input.url, self.input.description) {
            (Some(url), _) => CompanyInput::Url(url),
            (None, description) => CompanyInput::Description(description.unwrap_or_default()),
        };

        AnalyzeOptions {
            input,
            provider: self.provider,
            model: self.model,
            model_label: self.model_label,
            api_key: self.api_key,
            count: self.count,
            concurrency: self.concurrency,
            json: self.json,
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(long, help = "Output as JSON instead of TOML")]
        json: bool,
    },
    /// Show configuration file paths
    Path,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n{}", style("━━━ PANIC ━━━").red().bold());
        eprintln!("{}", style("rivalscope encountered an unexpected error:").red());
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "{}",
                style(format!(
                    "Location: {}:{}:{}",
                    location.file(),
                    location.line(),
                    location.column()
                ))
                .dim()
            );
        }
        eprintln!();

        // Default hook prints the backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red(), e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze(args) => {
            let rt = Runtime::new()?;
            rt.block_on(rivalscope::cli::commands::analyze::run(args.into_options()))?;
        }
        Commands::Models { provider } => {
            rivalscope::cli::commands::models::run(provider.as_deref())?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { json } => {
                rivalscope::cli::commands::config::show(json)?;
            }
            ConfigAction::Path => {
                rivalscope::cli::commands::config::path()?;
            }
        },
    }

    Ok(())
}
