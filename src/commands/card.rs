use super::common::{Common, CommonArgs};
use camino::Utf8PathBuf;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use typecard::Result;
use typecard::card::{self, CardRequest};

#[derive(Parser, Debug)]
pub struct CardArgs {
    /// GitHub login of the user to profile
    #[arg(long, short = 'u', value_name = "LOGIN")]
    pub username: Option<String>,

    /// Background image URL (http or https)
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Theme preset name (see the `themes` command)
    #[arg(long, value_name = "NAME")]
    pub tq: Option<String>,

    /// Raw request parameters as a query string, e.g. `username=octocat&tq=dark`
    ///
    /// Explicit flags take precedence over values given here.
    #[arg(long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Write the output to a file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<Utf8PathBuf>,

    /// Title color
    #[arg(long, value_name = "COLOR", help_heading = "Style Overrides")]
    pub title: Option<String>,

    /// Icon and bar color
    #[arg(long, value_name = "COLOR", help_heading = "Style Overrides")]
    pub icon: Option<String>,

    /// Body text color
    #[arg(long, value_name = "COLOR", help_heading = "Style Overrides")]
    pub text: Option<String>,

    /// Card background color
    #[arg(long, value_name = "COLOR", help_heading = "Style Overrides")]
    pub background: Option<String>,

    /// Card border color
    #[arg(long, value_name = "COLOR", help_heading = "Style Overrides")]
    pub border: Option<String>,

    /// Font family
    #[arg(long, value_name = "FONT", help_heading = "Style Overrides")]
    pub font: Option<String>,

    /// Base font size
    #[arg(long, value_name = "PX", help_heading = "Style Overrides")]
    pub size: Option<String>,

    /// Base font weight
    #[arg(long, value_name = "WEIGHT", help_heading = "Style Overrides")]
    pub weight: Option<String>,

    /// Title font size
    #[arg(long, value_name = "PX", help_heading = "Style Overrides")]
    pub title_size: Option<String>,

    /// Title font weight
    #[arg(long, value_name = "WEIGHT", help_heading = "Style Overrides")]
    pub title_weight: Option<String>,

    /// Body text font size
    #[arg(long, value_name = "PX", help_heading = "Style Overrides")]
    pub text_size: Option<String>,

    /// Body text font weight
    #[arg(long, value_name = "WEIGHT", help_heading = "Style Overrides")]
    pub text_weight: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl CardArgs {
    /// Merge `--query` with the explicit flags into a single request.
    ///
    /// Values are passed through verbatim so that validation errors come from the card itself.
    fn request(&self) -> CardRequest {
        let mut request = self.query.as_deref().map(CardRequest::from_query).unwrap_or_default();

        let flags = [
            ("username", &self.username),
            ("url", &self.url),
            ("tq", &self.tq),
            ("title", &self.title),
            ("icon", &self.icon),
            ("text", &self.text),
            ("background", &self.background),
            ("border", &self.border),
            ("font", &self.font),
            ("size", &self.size),
            ("weight", &self.weight),
            ("titlesize", &self.title_size),
            ("titleweight", &self.title_weight),
            ("textsize", &self.text_size),
            ("textweight", &self.text_weight),
        ];

        for (key, value) in flags {
            if let Some(value) = value {
                request.insert(key, value.as_str());
            }
        }

        request
    }

    fn emit(&self, text: &str) -> Result<()> {
        match &self.output {
            Some(path) => {
                fs::write(path, text).into_app_err_with(|| format!("writing output to {path}"))?;
                eprintln!("Wrote {path}");
            }
            None => println!("{text}"),
        }
        Ok(())
    }
}

/// Render the SVG card for a user
pub async fn render_card(args: &CardArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let svg = card::run(&common.card, &args.request())
        .await
        .into_app_err("unable to produce the card")?;

    args.emit(&svg)
}

/// Print the aggregated data and resolved theme as JSON
pub async fn print_json(args: &CardArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let value = card::run_json(&common.card, &args.request())
        .await
        .into_app_err("unable to gather card data")?;

    let text = serde_json::to_string_pretty(&value).into_app_err("serializing card data")?;
    args.emit(&text)
}
