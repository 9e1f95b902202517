use super::Color;
use serde::{Deserialize, Serialize};

/// Colors of the card's graphical elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignColors {
    pub title: Color,
    pub icon: Color,
    pub text: Color,
    pub background: Color,
    pub border: Color,
}

/// Size and weight of one kind of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextMetrics {
    pub size: u32,
    pub weight: u32,
}

/// Typography of the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    pub font: String,
    pub size: u32,
    pub weight: u32,
    pub title: TextMetrics,
    pub text: TextMetrics,
}

/// A fully populated style. Every field has a value once resolution is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTheme {
    pub design: DesignColors,
    pub text: TextStyle,
}

impl Default for ResolvedTheme {
    fn default() -> Self {
        Self {
            design: DesignColors {
                title: Color::from_hex(0x2f_80_ed),
                icon: Color::from_hex(0x4c_71_f2),
                text: Color::from_hex(0x43_4d_58),
                background: Color::from_hex(0xff_fe_fe),
                border: Color::from_hex(0xe4_e2_e2),
            },
            text: TextStyle {
                font: "Segoe UI, Ubuntu, Sans-Serif".to_string(),
                size: 14,
                weight: 400,
                title: TextMetrics { size: 18, weight: 600 },
                text: TextMetrics { size: 14, weight: 400 },
            },
        }
    }
}

/// A theme where any field may be left unset.
///
/// Used both for named presets and for per-request overrides; `None` always means
/// "not specified here", never "empty".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartialTheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_weight: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_weight: Option<u32>,
}

/// Style values supplied with a request.
pub type ThemeOverride = PartialTheme;

impl PartialTheme {
    /// Whether no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// First value present among `layers`, else `fallback`.
fn pick<T: Clone>(layers: &[&PartialTheme], field: impl Fn(&PartialTheme) -> Option<&T>, fallback: T) -> T {
    layers.iter().find_map(|layer| field(*layer)).cloned().unwrap_or(fallback)
}

impl ResolvedTheme {
    /// Resolve every leaf field independently: the first layer that sets it wins, and
    /// `base` supplies whatever no layer sets.
    #[must_use]
    pub fn from_layers(layers: &[&PartialTheme], base: Self) -> Self {
        let Self { design, text } = base;

        Self {
            design: DesignColors {
                title: pick(layers, |t| t.title.as_ref(), design.title),
                icon: pick(layers, |t| t.icon.as_ref(), design.icon),
                text: pick(layers, |t| t.text.as_ref(), design.text),
                background: pick(layers, |t| t.background.as_ref(), design.background),
                border: pick(layers, |t| t.border.as_ref(), design.border),
            },
            text: TextStyle {
                font: pick(layers, |t| t.font.as_ref(), text.font),
                size: pick(layers, |t| t.size.as_ref(), text.size),
                weight: pick(layers, |t| t.weight.as_ref(), text.weight),
                title: TextMetrics {
                    size: pick(layers, |t| t.title_size.as_ref(), text.title.size),
                    weight: pick(layers, |t| t.title_weight.as_ref(), text.title.weight),
                },
                text: TextMetrics {
                    size: pick(layers, |t| t.text_size.as_ref(), text.text.size),
                    weight: pick(layers, |t| t.text_weight.as_ref(), text.text.weight),
                },
            },
        }
    }
}
