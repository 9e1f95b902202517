//! Setup shared between the card-producing commands.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use typecard::Result;
use typecard::activity::Aggregator;
use typecard::card::TypeCard;
use typecard::config::Config;
use typecard::github::GitHubFetcher;
use typecard::render::HttpImageEncoder;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Arguments shared by every command that talks to GitHub
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to configuration file [default: one of typecard.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

pub type GitHubTypeCard = TypeCard<GitHubFetcher, HttpImageEncoder>;

pub struct Common {
    pub card: GitHubTypeCard,
}

impl Common {
    /// Initialize logging, load the configuration and build a card backed by the GitHub API
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the HTTP clients cannot be built
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = load_config(args.config.as_ref())?;
        let timeout = config.request_timeout();

        let fetcher = GitHubFetcher::new(args.github_token.as_deref(), &config.api_url, &config.user_agent, timeout)?;
        let encoder = HttpImageEncoder::new(&config.user_agent, timeout)?;

        let card = TypeCard::new(
            Aggregator::new(fetcher, config.aggregator_options()),
            encoder,
            config.theme_resolver(),
        );

        Ok(Self { card })
    }
}

/// Load the configuration and print any validation warnings to stderr
pub fn load_config(config_path: Option<&Utf8PathBuf>) -> Result<Config> {
    let (config, warnings) = Config::load(Utf8Path::new("."), config_path)?;
    print_warnings(&warnings);
    Ok(config)
}

pub fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    eprintln!("\n⚠️  Configuration validation warnings:");
    for warning in warnings {
        eprintln!("   {warning}");
    }
    eprintln!();
}

pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}
