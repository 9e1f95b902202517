//! Runtime configuration loaded from `typecard.[toml|yml|yaml|json]`.

#[expect(clippy::module_inception, reason = "Config type lives in a file named after it")]
mod config;

pub use config::Config;
