//! Turning aggregated data and a theme into an SVG card.

mod bar;
mod image;
mod svg;

pub use bar::{BAR_WIDTH, progress_bar};
pub use image::{EmbeddedImage, HttpImageEncoder, ImageEncoder, MAX_IMAGE_BYTES};
pub use svg::{CARD_HEIGHT, CARD_WIDTH, render};
