use super::common::load_config;
use camino::Utf8PathBuf;
use clap::Parser;
use typecard::Result;
use typecard::activity::{MAX_COMMITS_PER_REPOSITORY, MAX_REPOSITORIES};
use typecard::config::Config;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: one of typecard.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

/// Load the configuration, report warnings, and print the settings a card request would use
pub fn validate_config(args: &ValidateArgs) -> Result<()> {
    let config = load_config(args.config.as_ref()).inspect_err(|e| eprintln!("❌ Configuration validation failed: {e}"))?;

    match &args.config {
        Some(path) => println!("Configuration in {path} is valid"),
        None => println!("Configuration is valid (typecard.[toml|yml|yaml|json] in the current directory, or defaults)"),
    }

    print!("{}", summary(&config));
    Ok(())
}

fn summary(config: &Config) -> String {
    let options = config.aggregator_options();
    let mut text = format!(
        "  api: {}\n  repositories: {}, commits per repository: {}\n  timeouts: {}s per request, {}s per repository\n",
        config.api_url,
        options.max_repositories.min(MAX_REPOSITORIES),
        options.commits_per_repository.min(MAX_COMMITS_PER_REPOSITORY),
        config.request_timeout_secs,
        config.repository_timeout_secs,
    );

    if options.fail_on_partial_failure {
        text.push_str("  any failing repository fails the card\n");
    }

    if !config.themes.is_empty() {
        let names: Vec<_> = config.themes.keys().map(String::as_str).collect();
        text.push_str(&format!("  custom themes: {}\n", names.join(", ")));
    }

    text
}
