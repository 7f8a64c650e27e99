//! Image-to-template pipeline: binarize, thin, locate the core, extract.

use crate::binarize::{binarize_with_threshold, DEFAULT_DARK_THRESHOLD};
use crate::image::{Grid, Pixel};
use crate::minutiae::{extract_with, ExtractParams, Template, DEFAULT_CAPACITY, FIELDS_PER_MINUTIA, HEADER_SLOTS};
use crate::minutiae::{DEFAULT_DEDUP_TOLERANCE, DEFAULT_SCAN_MARGIN};
use crate::origin::{find_core_with_margin, DEFAULT_CORE_MARGIN};
use crate::skeleton::{thin_with_limit, DEFAULT_MAX_SWEEPS};
use crate::trace::{trace_event, trace_span};
use crate::util::{MinutiaeError, MinutiaeResult};

/// Configuration for [`TemplateBuilder`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Channel value below which a pixel is ridge.
    pub threshold: u8,
    /// Inset of the core search from every edge.
    pub core_margin: usize,
    /// Inset of the minutiae scan from every edge.
    pub scan_margin: usize,
    /// Per-axis duplicate radius for same-kind minutiae.
    pub dedup_tolerance: i32,
    /// Template capacity in scalar slots; must be `7 + 6k`.
    pub capacity: usize,
    /// Sweep cap for each thinning pass.
    pub max_sweeps: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_DARK_THRESHOLD,
            core_margin: DEFAULT_CORE_MARGIN,
            scan_margin: DEFAULT_SCAN_MARGIN,
            dedup_tolerance: DEFAULT_DEDUP_TOLERANCE,
            capacity: DEFAULT_CAPACITY,
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

impl ExtractConfig {
    /// Checks that the configuration can produce a well-formed template.
    pub fn validate(&self) -> MinutiaeResult<()> {
        if self.capacity < HEADER_SLOTS || (self.capacity - HEADER_SLOTS) % FIELDS_PER_MINUTIA != 0 {
            return Err(MinutiaeError::InvalidConfig {
                reason: "capacity must be 7 + 6k slots",
            });
        }
        if self.max_sweeps == 0 {
            return Err(MinutiaeError::InvalidConfig {
                reason: "max_sweeps must be at least 1",
            });
        }
        if self.dedup_tolerance < 0 {
            return Err(MinutiaeError::InvalidConfig {
                reason: "dedup_tolerance must be non-negative",
            });
        }
        Ok(())
    }

    fn extract_params(&self) -> ExtractParams {
        ExtractParams {
            scan_margin: self.scan_margin,
            dedup_tolerance: self.dedup_tolerance,
            capacity: self.capacity,
        }
    }
}

/// Intermediate and final products of one pipeline run.
#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    /// One-pixel-wide ridge skeleton.
    pub skeleton: Grid<bool>,
    /// Minutiae relative to the detected core.
    pub template: Template,
}

/// Builds templates from fingerprint images.
#[derive(Clone, Debug, Default)]
pub struct TemplateBuilder {
    cfg: ExtractConfig,
}

impl TemplateBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the builder configuration.
    pub fn with_config(mut self, cfg: ExtractConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.cfg
    }

    /// Runs the full pipeline on `image`.
    ///
    /// A blank or tiny image is not an error: it yields an empty template at
    /// the default origin.
    pub fn build<P: Pixel>(&self, image: &Grid<P>) -> MinutiaeResult<Extraction> {
        self.cfg.validate()?;
        let _span = trace_span!("build_template", width = image.width(), height = image.height())
            .entered();

        let binary = binarize_with_threshold(image, self.cfg.threshold);
        let skeleton = thin_with_limit(&binary, self.cfg.max_sweeps);
        let origin = find_core_with_margin(&skeleton, self.cfg.core_margin);
        let template = extract_with(&skeleton, origin, &self.cfg.extract_params());

        trace_event!("template_built", minutiae = template.len(), count = template.count());
        Ok(Extraction { skeleton, template })
    }
}

/// Builds a template from `image` with the default configuration.
pub fn build_template<P: Pixel>(image: &Grid<P>) -> MinutiaeResult<Template> {
    Ok(TemplateBuilder::new().build(image)?.template)
}
