/// Number of cells in a progress bar.
pub const BAR_WIDTH: usize = 25;

const FILLED: char = '█';
const EMPTY: char = '░';

/// A fixed-width text bar with `percent` of its cells filled. Values above 100 are clamped.
#[must_use]
#[expect(clippy::cast_possible_truncation, reason = "result is within 0..=BAR_WIDTH")]
#[expect(clippy::cast_sign_loss, reason = "result is never negative")]
#[expect(clippy::cast_precision_loss, reason = "BAR_WIDTH is tiny")]
pub fn progress_bar(percent: u32) -> String {
    let percent = percent.min(100);
    let filled = (f64::from(percent) / 100.0 * BAR_WIDTH as f64).round() as usize;

    let mut bar = String::with_capacity(BAR_WIDTH * FILLED.len_utf8());
    bar.extend(core::iter::repeat_n(FILLED, filled));
    bar.extend(core::iter::repeat_n(EMPTY, BAR_WIDTH - filled));
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_cells(bar: &str) -> usize {
        bar.chars().filter(|&c| c == FILLED).count()
    }

    #[test]
    fn test_bar_is_fixed_width() {
        for percent in [0, 1, 13, 50, 99, 100, 250] {
            assert_eq!(progress_bar(percent).chars().count(), BAR_WIDTH);
        }
    }

    #[test]
    fn test_bar_fill() {
        assert_eq!(filled_cells(&progress_bar(0)), 0);
        assert_eq!(filled_cells(&progress_bar(100)), BAR_WIDTH);
        assert_eq!(filled_cells(&progress_bar(50)), 13);
        assert_eq!(filled_cells(&progress_bar(25)), 6);
        assert_eq!(filled_cells(&progress_bar(400)), BAR_WIDTH);
    }
}
