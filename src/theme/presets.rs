use super::{Color, PartialTheme};
use std::collections::BTreeMap;

/// Preset with the four colors most themes change. Everything else is inherited.
const fn colors(title: u32, icon: u32, text: u32, background: u32) -> PartialTheme {
    PartialTheme {
        title: Some(Color::from_hex(title)),
        icon: Some(Color::from_hex(icon)),
        text: Some(Color::from_hex(text)),
        background: Some(Color::from_hex(background)),
        border: None,
        font: None,
        size: None,
        weight: None,
        title_size: None,
        title_weight: None,
        text_size: None,
        text_weight: None,
    }
}

/// The presets that ship with the crate, keyed by their lowercase name.
pub fn builtin_presets() -> BTreeMap<String, PartialTheme> {
    let presets = [
        ("default", PartialTheme::default()),
        (
            "dark",
            PartialTheme {
                border: Some(Color::from_hex(0x30_36_3d)),
                ..colors(0xff_ff_ff, 0x79_ff_97, 0x9f_9f_9f, 0x15_15_15)
            },
        ),
        ("radical", colors(0xfe_42_8e, 0xf8_d8_47, 0xa9_fe_f7, 0x14_13_21)),
        ("merko", colors(0xab_d2_00, 0xb7_d3_64, 0x68_b5_87, 0x0a_0f_0b)),
        ("gruvbox", colors(0xfa_bd_2f, 0xfe_80_19, 0x8e_c0_7c, 0x28_28_28)),
        ("tokyonight", colors(0x70_a5_fd, 0xbf_91_f3, 0x38_bd_ae, 0x1a_1b_27)),
        ("onedark", colors(0xe4_bf_7a, 0x8e_b5_73, 0xdf_6d_74, 0x28_2c_34)),
        ("cobalt", colors(0xe6_83_d9, 0x04_80_ef, 0x75_ee_b2, 0x19_35_49)),
        ("synthwave", colors(0xe2_e9_ec, 0xef_85_39, 0xe5_28_9e, 0x2b_21_3a)),
        (
            "highcontrast",
            PartialTheme {
                border: Some(Color::from_hex(0xff_ff_ff)),
                weight: Some(600),
                text_weight: Some(600),
                ..colors(0xe7_f2_16, 0x00_ff_ff, 0xff_ff_ff, 0x00_00_00)
            },
        ),
        ("dracula", colors(0xff_6e_96, 0x79_da_fa, 0xf8_f8_f2, 0x28_2a_36)),
        ("nord", colors(0x81_a1_c1, 0x88_c0_d0, 0xd8_de_e9, 0x2e_34_40)),
    ];

    presets.into_iter().map(|(key, theme)| (key.to_string(), theme)).collect()
}
