//! Render a GitHub user's commit time-of-day distribution as an SVG profile card.
//!
//! # Quick Start
//!
//! ```bash
//! typecard card --username octocat > octocat.svg
//! ```
//!
//! The card samples the user's ten most recently updated repositories, reads up to a hundred
//! of the user's commits from each default branch, and sorts them into four buckets:
//! morning (06-12), daytime (12-18), evening (18-24) and night (00-06), all in UTC.
//!
//! # Commands
//!
//! - `typecard card` renders the SVG card.
//! - `typecard json` prints the aggregated distribution and the resolved theme as JSON.
//! - `typecard themes` lists the available theme presets.
//! - `typecard init` writes a default configuration file.
//! - `typecard validate` checks a configuration file.
//!
//! # Styling
//!
//! Pick a preset with `--tq dark`, then override individual fields:
//!
//! ```bash
//! typecard card -u octocat --tq dark --text ff0000 --title-size 20
//! ```
//!
//! Colors accept `#rgb`, `#rrggbb`, bare hex, or CSS color names. Parameters can also be passed
//! in query-string form with `--query "username=octocat&tq=dark"`.
//!
//! # Authentication
//!
//! GitHub's GraphQL API requires a token. Set `GITHUB_TOKEN` or pass `--github-token`.
//!
//! # Configuration
//!
//! Settings are read from `typecard.toml`, `typecard.yml`, `typecard.yaml` or `typecard.json`
//! in the current directory, or from the file given with `--config`. Run `typecard init` to
//! get a starting point. Custom presets go under `[themes.<name>]`.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use typecard::Result;

mod commands;

use crate::commands::{
    CardArgs, InitArgs, ThemesArgs, ValidateArgs, init_config, list_themes, print_json, render_card, validate_config,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "typecard", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the commit time-of-day card as SVG
    Card(Box<CardArgs>),
    /// Print the card's data and resolved theme as JSON
    Json(Box<CardArgs>),
    /// List available theme presets
    Themes(ThemesArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Card(args) => render_card(args).await,
        Command::Json(args) => print_json(args).await,
        Command::Themes(args) => list_themes(args),
        Command::Init(args) => init_config(args),
        Command::Validate(args) => validate_config(args),
    }
}
