use camino::Utf8PathBuf;
use clap::Parser;
use ohno::bail;
use typecard::Result;
use typecard::config::Config;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path; the extension picks TOML, YAML or JSON
    #[arg(value_name = "PATH", default_value = "typecard.toml")]
    pub output: Utf8PathBuf,

    /// Overwrite the file if it already exists
    #[arg(long)]
    pub force: bool,
}

/// Write a configuration file holding every default value
pub fn init_config(args: &InitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!("{} already exists; pass --force to overwrite it", args.output);
    }

    Config::default().save(&args.output)?;
    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
