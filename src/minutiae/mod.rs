//! Minutiae and the templates that hold them.
//!
//! A template is stored as a flat record: one size slot, six header slots
//! (`origin.x`, `origin.y` and four reserved zeros) and six slots per minutia
//! (`x`, `y`, `radius`, `angle`, `kind`, `direction`). The layout constants
//! below keep the historical values so stored templates stay loadable.

mod extract;

pub use extract::{extract, extract_with, ExtractParams, DEFAULT_DEDUP_TOLERANCE, DEFAULT_SCAN_MARGIN};

use crate::origin::Point;
use crate::util::math::polar_angle;

/// Scalar slots per minutia record.
pub const FIELDS_PER_MINUTIA: usize = 6;
/// Size slot plus the six-slot header.
pub const HEADER_SLOTS: usize = 1 + FIELDS_PER_MINUTIA;
/// Historical template capacity in scalar slots (99 minutiae).
pub const DEFAULT_CAPACITY: usize = 601;

/// Number of minutiae that fit in `capacity` scalar slots.
pub fn minutiae_for_capacity(capacity: usize) -> usize {
    capacity.saturating_sub(HEADER_SLOTS) / FIELDS_PER_MINUTIA
}

/// Ridge feature class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MinutiaKind {
    /// Skeleton pixel with exactly one neighbour.
    RidgeEnding,
    /// Skeleton pixel with three or more neighbours.
    Bifurcation,
}

impl MinutiaKind {
    /// Neighbour-count code written to the record.
    pub fn code(self) -> u8 {
        match self {
            MinutiaKind::RidgeEnding => 1,
            MinutiaKind::Bifurcation => 3,
        }
    }

    /// Parses a record code: 1 is an ending, anything from 2 up a bifurcation.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(MinutiaKind::RidgeEnding),
            _ => Some(MinutiaKind::Bifurcation),
        }
    }
}

/// Compass direction of a ridge ending, in 45 degree steps.
///
/// Angles follow the polar convention of minutia positions: 0 is `+x`, 90 is
/// `+y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// Neighbour offsets checked for an ending, first match wins.
    pub const PRIORITY: [(Direction, (isize, isize)); 8] = [
        (Direction::NorthWest, (-1, 1)),
        (Direction::North, (0, 1)),
        (Direction::NorthEast, (1, 1)),
        (Direction::East, (1, 0)),
        (Direction::SouthEast, (1, -1)),
        (Direction::South, (0, -1)),
        (Direction::SouthWest, (-1, -1)),
        (Direction::West, (-1, 0)),
    ];

    /// Direction in whole degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Direction::East => 0,
            Direction::NorthEast => 45,
            Direction::North => 90,
            Direction::NorthWest => 135,
            Direction::West => 180,
            Direction::SouthWest => 225,
            Direction::South => 270,
            Direction::SouthEast => 315,
        }
    }

    /// Inverse of [`Direction::degrees`].
    pub fn from_degrees(degrees: u16) -> Option<Self> {
        Direction::PRIORITY
            .iter()
            .map(|&(dir, _)| dir)
            .find(|dir| dir.degrees() == degrees)
    }
}

/// Direction slot value written for bifurcations.
pub const BIFURCATION_DIRECTION: u16 = 0;

/// One detected ridge feature, positioned relative to the template origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Minutia {
    pub x: i32,
    pub y: i32,
    /// Distance from the origin.
    pub radius: f64,
    /// Polar angle in radians (see [`Minutia::at`]).
    pub angle: f64,
    pub kind: MinutiaKind,
    /// Set for ridge endings only.
    pub direction: Option<Direction>,
}

impl Minutia {
    /// Builds a minutia at `(x, y)` and derives its polar form.
    pub fn at(x: i32, y: i32, kind: MinutiaKind, direction: Option<Direction>) -> Self {
        let (fx, fy) = (f64::from(x), f64::from(y));
        Self {
            x,
            y,
            radius: fx.hypot(fy),
            angle: polar_angle(fx, fy),
            kind,
            direction,
        }
    }

    /// Ridge ending at `(x, y)`.
    pub fn ending(x: i32, y: i32, direction: Direction) -> Self {
        Self::at(x, y, MinutiaKind::RidgeEnding, Some(direction))
    }

    /// Bifurcation at `(x, y)`.
    pub fn bifurcation(x: i32, y: i32) -> Self {
        Self::at(x, y, MinutiaKind::Bifurcation, None)
    }

    /// Value of the direction slot.
    pub fn direction_code(&self) -> u16 {
        self.direction
            .map(Direction::degrees)
            .unwrap_or(BIFURCATION_DIRECTION)
    }
}

/// Origin-relative minutiae of one fingerprint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Template {
    origin: Point,
    minutiae: Vec<Minutia>,
}

impl Template {
    /// Creates a template from an origin and its minutiae.
    pub fn new(origin: Point, minutiae: Vec<Minutia>) -> Self {
        Self { origin, minutiae }
    }

    /// Template with no minutiae.
    pub fn empty(origin: Point) -> Self {
        Self::new(origin, Vec::new())
    }

    /// Core coordinates in the source image.
    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn minutiae(&self) -> &[Minutia] {
        &self.minutiae
    }

    /// Number of minutiae.
    pub fn len(&self) -> usize {
        self.minutiae.len()
    }

    pub fn is_empty(&self) -> bool {
        self.minutiae.is_empty()
    }

    /// Scalar slots used by the record: `7 + 6 * len`.
    pub fn count(&self) -> usize {
        HEADER_SLOTS + FIELDS_PER_MINUTIA * self.minutiae.len()
    }

    /// Iterates over minutiae of one kind.
    pub fn of_kind(&self, kind: MinutiaKind) -> impl Iterator<Item = &Minutia> + '_ {
        self.minutiae.iter().filter(move |m| m.kind == kind)
    }

    pub(crate) fn push(&mut self, minutia: Minutia) {
        self.minutiae.push(minutia);
    }

    pub(crate) fn last(&self) -> Option<&Minutia> {
        self.minutiae.last()
    }

    pub(crate) fn pop(&mut self) -> Option<Minutia> {
        self.minutiae.pop()
    }
}
