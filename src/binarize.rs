//! Dark-pixel thresholding into a ridge/background grid.

use crate::image::{Grid, Pixel};
use crate::trace::{trace_event, trace_span};

/// Channel value below which a pixel counts as ridge.
pub const DEFAULT_DARK_THRESHOLD: u8 = 128;

/// Binarizes `image` with [`DEFAULT_DARK_THRESHOLD`].
pub fn binarize<P: Pixel>(image: &Grid<P>) -> Grid<bool> {
    binarize_with_threshold(image, DEFAULT_DARK_THRESHOLD)
}

/// Marks a pixel as ridge when all three channels are below `threshold`.
///
/// The outermost ring of rows and columns is always background so later
/// 3x3 inspections never leave the grid and no minutia lands on the border.
pub fn binarize_with_threshold<P: Pixel>(image: &Grid<P>, threshold: u8) -> Grid<bool> {
    let _span = trace_span!("binarize", width = image.width(), height = image.height()).entered();

    let mut out = image.map(|px| px.channels().iter().all(|&c| c < threshold));
    let width = out.width();
    let height = out.height();
    for x in 0..width {
        out.put(x, 0, false);
        out.put(x, height - 1, false);
    }
    for y in 0..height {
        out.put(0, y, false);
        out.put(width - 1, y, false);
    }

    trace_event!("ridge_pixels", count = out.count_foreground());
    out
}
