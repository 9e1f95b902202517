use super::common::load_config;
use camino::Utf8PathBuf;
use clap::Parser;
use typecard::Result;

#[derive(Parser, Debug)]
pub struct ThemesArgs {
    /// Path to configuration file [default: one of typecard.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn list_themes(args: &ThemesArgs) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    let resolver = config.theme_resolver();

    for key in resolver.preset_keys() {
        if config.themes.keys().any(|custom| custom.trim().eq_ignore_ascii_case(key)) {
            println!("{key} (from configuration)");
        } else {
            println!("{key}");
        }
    }

    Ok(())
}
