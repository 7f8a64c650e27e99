//! Convenience helpers for loading and saving images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{Grid, Rgb};
use crate::util::{MinutiaeError, MinutiaeResult};
use std::path::Path;

/// Converts an RGB image buffer into an owned grid.
pub fn grid_from_rgb_image(img: &image::RgbImage) -> MinutiaeResult<Grid<Rgb>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.pixels().map(|px| Rgb(px.0)).collect();
    Grid::new(data, width, height)
}

/// Converts a dynamic image (any colour type) into an RGB grid.
pub fn grid_from_dynamic_image(img: &image::DynamicImage) -> MinutiaeResult<Grid<Rgb>> {
    grid_from_rgb_image(&img.to_rgb8())
}

/// Loads an image from disk as an RGB grid.
pub fn load_rgb_image<P: AsRef<Path>>(path: P) -> MinutiaeResult<Grid<Rgb>> {
    let img = image::open(path).map_err(|err| MinutiaeError::ImageIo {
        reason: err.to_string(),
    })?;
    grid_from_dynamic_image(&img)
}

/// Converts an RGB grid into an `image` buffer.
pub fn rgb_image_from_grid(grid: &Grid<Rgb>) -> MinutiaeResult<image::RgbImage> {
    let width = u32::try_from(grid.width()).map_err(|_| MinutiaeError::InvalidDimensions {
        width: grid.width(),
        height: grid.height(),
    })?;
    let height = u32::try_from(grid.height()).map_err(|_| MinutiaeError::InvalidDimensions {
        width: grid.width(),
        height: grid.height(),
    })?;
    let raw: Vec<u8> = grid.as_slice().iter().flat_map(|px| px.0).collect();
    image::RgbImage::from_raw(width, height, raw).ok_or(MinutiaeError::BufferSizeMismatch {
        needed: grid.width() * grid.height() * 3,
        got: grid.as_slice().len() * 3,
    })
}

/// Writes an RGB grid to disk; the format follows the file extension.
pub fn save_rgb_image<P: AsRef<Path>>(path: P, grid: &Grid<Rgb>) -> MinutiaeResult<()> {
    rgb_image_from_grid(grid)?
        .save(path)
        .map_err(|err| MinutiaeError::ImageIo {
            reason: err.to_string(),
        })
}
