//! A captured fingerprint with everything derived from it.

use crate::image::{Grid, Pixel, Rgb};
use crate::minutiae::Template;
use crate::pipeline::{ExtractConfig, TemplateBuilder};
use crate::render::render_labelled;
use crate::util::MinutiaeResult;

/// Named fingerprint: source image, skeleton, template and labelled image.
#[derive(Clone, Debug)]
pub struct Print {
    name: String,
    image: Grid<Rgb>,
    skeleton: Grid<bool>,
    template: Template,
    labelled: Grid<Rgb>,
}

impl Print {
    /// Runs the pipeline on `image` and renders the labelled view.
    pub fn capture<P: Pixel>(
        name: impl Into<String>,
        image: &Grid<P>,
        cfg: ExtractConfig,
    ) -> MinutiaeResult<Self> {
        let extraction = TemplateBuilder::new().with_config(cfg).build(image)?;
        let labelled = render_labelled(&extraction.skeleton, &extraction.template);
        Ok(Self {
            name: name.into(),
            image: image.map(|px| px.to_rgb()),
            skeleton: extraction.skeleton,
            template: extraction.template,
            labelled,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source image as captured.
    pub fn image(&self) -> &Grid<Rgb> {
        &self.image
    }

    pub fn skeleton(&self) -> &Grid<bool> {
        &self.skeleton
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Skeleton with minutiae boxes and the core cross drawn on it.
    pub fn labelled(&self) -> &Grid<Rgb> {
        &self.labelled
    }
}
