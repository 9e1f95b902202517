use super::bar::progress_bar;
use super::image::EmbeddedImage;
use crate::activity::{TimeBucket, TypeLabel};
use crate::theme::ResolvedTheme;
use core::fmt::{Result, Write};

/// Width of the rendered card, in pixels.
pub const CARD_WIDTH: u32 = 530;

/// Height of the rendered card, in pixels.
pub const CARD_HEIGHT: u32 = 185;

const INSET: u32 = 5;
const CORNER_RADIUS: u32 = 6;
const IMAGE_WIDTH: u32 = 390;
const ROW_X: u32 = 25;
const TITLE_Y: u32 = 30;
const FIRST_ROW_Y: u32 = 60;
const ROW_SPACING: u32 = 30;
const COUNT_X: u32 = 90;
const BAR_X: u32 = 180;
const PERCENT_X: u32 = 450;
const CLIP_ID: &str = "typecard-background";

/// Render a card as a standalone SVG document.
///
/// The output depends only on the arguments, so equal inputs always produce byte-identical documents.
#[must_use]
pub fn render(theme: &ResolvedTheme, buckets: &[TimeBucket], label: TypeLabel, background: Option<&EmbeddedImage>) -> String {
    let mut svg = String::with_capacity(4096);
    let mut generator = SvgGenerator::new(&mut svg, theme);

    // writing into a String cannot fail
    let _ = generator.generate(buckets, label, background);
    svg
}

struct SvgGenerator<'a, W: Write> {
    writer: &'a mut W,
    theme: &'a ResolvedTheme,
}

impl<'a, W: Write> SvgGenerator<'a, W> {
    const fn new(writer: &'a mut W, theme: &'a ResolvedTheme) -> Self {
        Self { writer, theme }
    }

    fn generate(&mut self, buckets: &[TimeBucket], label: TypeLabel, background: Option<&EmbeddedImage>) -> Result {
        self.write_header()?;
        self.write_styles()?;
        self.write_frame()?;

        if let Some(image) = background {
            self.write_background(image)?;
        }

        self.write_title(label)?;
        for (row, bucket) in buckets.iter().enumerate() {
            self.write_row(row, bucket)?;
        }

        writeln!(self.writer, "</svg>")
    }

    fn write_header(&mut self) -> Result {
        // the caller-chosen font is an attribute value, never part of the stylesheet
        writeln!(
            self.writer,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
             width=\"{CARD_WIDTH}\" height=\"{CARD_HEIGHT}\" viewBox=\"0 0 {CARD_WIDTH} {CARD_HEIGHT}\" fill=\"none\" \
             font-family=\"{}\">",
            xml_escape(&self.theme.text.font)
        )
    }

    fn write_styles(&mut self) -> Result {
        let text = &self.theme.text;
        let colors = &self.theme.design;

        writeln!(self.writer, "<style>")?;
        writeln!(
            self.writer,
            "  .card {{ font-size: {}px; font-weight: {}; }}",
            text.size, text.weight
        )?;
        writeln!(
            self.writer,
            "  .title {{ fill: {}; font-size: {}px; font-weight: {}; }}",
            colors.title, text.title.size, text.title.weight
        )?;
        writeln!(
            self.writer,
            "  .label {{ fill: {}; font-size: {}px; font-weight: {}; }}",
            colors.icon, text.text.size, text.text.weight
        )?;
        writeln!(
            self.writer,
            "  .text {{ fill: {}; font-size: {}px; font-weight: {}; }}",
            colors.text, text.text.size, text.text.weight
        )?;
        writeln!(self.writer, "  .bar {{ fill: {}; font-family: monospace; }}", colors.icon)?;
        writeln!(self.writer, "</style>")
    }

    fn write_frame(&mut self) -> Result {
        let colors = &self.theme.design;
        writeln!(
            self.writer,
            "<rect x=\"{INSET}\" y=\"{INSET}\" rx=\"{CORNER_RADIUS}\" width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>",
            CARD_WIDTH - 2 * INSET,
            CARD_HEIGHT - 2 * INSET,
            colors.background,
            colors.border
        )
    }

    fn write_background(&mut self, image: &EmbeddedImage) -> Result {
        let height = CARD_HEIGHT - 2 * INSET;

        writeln!(self.writer, "<defs>")?;
        writeln!(self.writer, "  <clipPath id=\"{CLIP_ID}\">")?;
        writeln!(
            self.writer,
            "    <rect x=\"{INSET}\" y=\"{INSET}\" rx=\"{CORNER_RADIUS}\" width=\"{IMAGE_WIDTH}\" height=\"{height}\"/>"
        )?;
        writeln!(self.writer, "  </clipPath>")?;
        writeln!(self.writer, "</defs>")?;
        writeln!(
            self.writer,
            "<image x=\"{INSET}\" y=\"{INSET}\" width=\"{IMAGE_WIDTH}\" height=\"{height}\" preserveAspectRatio=\"xMidYMid slice\" \
             clip-path=\"url(#{CLIP_ID})\" href=\"{}\"/>",
            xml_escape(&image.data_uri())
        )
    }

    fn write_title(&mut self, label: TypeLabel) -> Result {
        writeln!(
            self.writer,
            "<text class=\"card title\" x=\"{ROW_X}\" y=\"{TITLE_Y}\">{}</text>",
            xml_escape(label.title())
        )
    }

    fn write_row(&mut self, row: usize, bucket: &TimeBucket) -> Result {
        let y = FIRST_ROW_Y as usize + ROW_SPACING as usize * row;

        writeln!(self.writer, "<g transform=\"translate({ROW_X}, {y})\">")?;
        writeln!(self.writer, "  <text class=\"card label\" x=\"0\" y=\"0\">{}</text>", xml_escape(bucket.name))?;
        writeln!(
            self.writer,
            "  <text class=\"card text\" x=\"{COUNT_X}\" y=\"0\">{} commits</text>",
            bucket.count
        )?;
        writeln!(
            self.writer,
            "  <text class=\"card bar\" x=\"{BAR_X}\" y=\"0\">{}</text>",
            progress_bar(bucket.percent)
        )?;
        writeln!(
            self.writer,
            "  <text class=\"card text\" x=\"{PERCENT_X}\" y=\"0\">{}%</text>",
            bucket.percent
        )?;
        writeln!(self.writer, "</g>")
    }
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
