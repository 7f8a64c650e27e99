//! Owned pixel grids shared by every pipeline stage.
//!
//! `Grid<T>` is a contiguous row-major buffer with `stride == width`. Pipeline
//! stages take a grid by reference and return a new one; only the individual
//! thinning passes work in place.

use crate::util::{MinutiaeError, MinutiaeResult};

#[cfg(feature = "image-io")]
pub mod io;

/// 8-bit RGB colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const WHITE: Rgb = Rgb([255, 255, 255]);
    pub const BLUE: Rgb = Rgb([0, 0, 255]);
    pub const RED: Rgb = Rgb([255, 0, 0]);
    pub const GREEN: Rgb = Rgb([0, 255, 0]);
}

/// A pixel type the binarizer can threshold.
pub trait Pixel: Copy {
    /// Red, green and blue intensities; grayscale repeats its value.
    fn channels(&self) -> [u8; 3];

    /// Converts the pixel to RGB.
    fn to_rgb(&self) -> Rgb {
        Rgb(self.channels())
    }
}

impl Pixel for u8 {
    fn channels(&self) -> [u8; 3] {
        [*self; 3]
    }
}

impl Pixel for Rgb {
    fn channels(&self) -> [u8; 3] {
        self.0
    }
}

/// Owned 2D grid indexed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Grid<T> {
    /// Wraps a row-major buffer of exactly `width * height` elements.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> MinutiaeResult<Self> {
        let needed = required_len(width, height)?;
        if data.len() != needed {
            return Err(MinutiaeError::BufferSizeMismatch {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Returns the grid width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the row-major backing slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consumes the grid and returns its buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    /// Returns a mutable reference to the element at `(x, y)`.
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    /// Returns row `y` as a slice.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        self.data.get(start..start + self.width)
    }

    /// Applies `f` to every element, keeping the dimensions.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            data: self.data.iter().map(f).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Creates a grid with every element set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> MinutiaeResult<Self> {
        let needed = required_len(width, height)?;
        Ok(Self {
            data: vec![value; needed],
            width,
            height,
        })
    }
}

impl<T: Copy> Grid<T> {
    /// Unchecked read; callers keep `(x, y)` inside the grid.
    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> T {
        self.data[y * self.width + x]
    }

    #[inline]
    pub(crate) fn put(&mut self, x: usize, y: usize, value: T) {
        self.data[y * self.width + x] = value;
    }
}

impl Grid<bool> {
    /// Number of `true` (ridge) pixels.
    pub fn count_foreground(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Reads the neighbour at a signed offset from `(x, y)`.
    ///
    /// Callers guarantee that `(x + dx, y + dy)` lies inside the grid.
    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize, dx: isize, dy: isize) -> bool {
        let nx = x.wrapping_add_signed(dx);
        let ny = y.wrapping_add_signed(dy);
        self.at(nx, ny)
    }
}

fn required_len(width: usize, height: usize) -> MinutiaeResult<usize> {
    if width == 0 || height == 0 {
        return Err(MinutiaeError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(MinutiaeError::InvalidDimensions { width, height })
}
