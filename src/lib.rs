//! Minutiae is a fingerprint template library: it turns a fingerprint image
//! into a core-relative set of ridge endings and bifurcations and scores two
//! such templates against each other.
//!
//! The pipeline is binarize, thin (Hilditch and hit-and-miss), locate the
//! core, then extract minutiae. Matching tolerates small rotations, with
//! optional parallel evaluation via the `rayon` feature. Image loading and
//! PNG output live behind `image-io`; structured logging behind `tracing`.

pub mod binarize;
pub mod codec;
pub mod identify;
pub mod image;
pub mod minutiae;
pub mod origin;
pub mod pipeline;
pub mod print;
pub mod render;
pub mod search;
pub mod skeleton;
pub mod store;
mod trace;
pub mod util;

pub use binarize::{binarize, binarize_with_threshold};
pub use codec::{decode, encode};
pub use identify::{compare, rank, Comparison, Ranked};
pub use image::{Grid, Pixel, Rgb};
pub use minutiae::{Direction, Minutia, MinutiaKind, Template};
pub use origin::{find_core, Point};
pub use pipeline::{build_template, ExtractConfig, Extraction, TemplateBuilder};
pub use print::Print;
pub use render::render_labelled;
pub use search::{score, MatchConfig, MatchOutcome, Matcher};
pub use skeleton::thin;
pub use store::{print_name, PrintDir, TemplateStore};
pub use util::{MinutiaeError, MinutiaeResult};
