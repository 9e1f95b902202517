//! Card styling and the cascading theme resolution.

mod color;
mod presets;
mod resolver;
#[expect(clippy::module_inception, reason = "theme types live in a file named after them")]
mod theme;

pub use color::Color;
pub use presets::builtin_presets;
pub use resolver::ThemeResolver;
pub use theme::{DesignColors, PartialTheme, ResolvedTheme, TextMetrics, TextStyle, ThemeOverride};
