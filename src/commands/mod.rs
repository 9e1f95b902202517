mod card;
mod common;
mod init;
mod themes;
mod validate;

pub use card::{CardArgs, print_json, render_card};
pub use init::{InitArgs, init_config};
pub use themes::{ThemesArgs, list_themes};
pub use validate::{ValidateArgs, validate_config};
