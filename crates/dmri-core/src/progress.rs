//! Text progress bars.

use std::fmt;

/// Glyph for completed cells.
pub const FILLED: char = '█';

/// Glyph for remaining cells.
pub const EMPTY: char = '░';

/// Default bar width in cells.
pub const DEFAULT_WIDTH: usize = 50;

/// Renders `[<bar>] <pct>% (<current>/<total>)`.
///
/// The bar is always `width` cells wide; `floor(width * current / total)`
/// of them are filled, capped at `width`. The percentage is printed with
/// one decimal and is not capped.
///
/// # Panics
///
/// Panics if `total` is zero.
///
/// # Example
/// ```
/// use dmri_core::progress::progress_bar;
///
/// assert_eq!(progress_bar(5, 10, 10), "[█████░░░░░] 50.0% (5/10)");
/// ```
pub fn progress_bar(current: usize, total: usize, width: usize) -> String {
    assert!(total > 0, "progress_bar requires a non-zero total");
    let fraction = current as f64 / total as f64;
    let filled = ((width as f64 * fraction).floor() as usize).min(width);

    let mut out = String::with_capacity(width * FILLED.len_utf8() + 24);
    out.push('[');
    out.extend(std::iter::repeat(FILLED).take(filled));
    out.extend(std::iter::repeat(EMPTY).take(width - filled));
    out.push_str(&format!("] {:.1}% ({}/{})", fraction * 100.0, current, total));
    out
}

/// A progress bar with a fixed total and width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    total: usize,
    width: usize,
}

impl ProgressBar {
    /// Creates a bar of [`DEFAULT_WIDTH`] cells.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero.
    pub fn new(total: usize) -> Self {
        Self::with_width(total, DEFAULT_WIDTH)
    }

    /// Creates a bar of `width` cells.
    ///
    /// # Panics
    ///
    /// Panics if `total` is zero.
    pub fn with_width(total: usize, width: usize) -> Self {
        assert!(total > 0, "progress bar requires a non-zero total");
        Self { total, width }
    }

    /// Total number of items.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Renders the state after `current` items.
    pub fn render(&self, current: usize) -> String {
        progress_bar(current, self.total, self.width)
    }

    /// Borrowing display adapter for `current` items.
    pub fn at(&self, current: usize) -> ProgressState<'_> {
        ProgressState { bar: self, current }
    }
}

/// Display adapter returned by [`ProgressBar::at`].
#[derive(Debug, Clone, Copy)]
pub struct ProgressState<'a> {
    bar: &'a ProgressBar,
    current: usize,
}

impl fmt::Display for ProgressState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bar.render(self.current))
    }
}
