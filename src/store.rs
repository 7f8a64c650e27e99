//! Named template storage.
//!
//! A [`PrintDir`] keeps one print per name inside a directory:
//! `<name>.png` (source image), `<name>Template.txt` (template record) and
//! `<name>Labelled.png` (labelled skeleton). Only templates are needed for
//! matching; the images are written when the `image-io` feature is enabled.

use crate::codec::{decode, encode};
use crate::minutiae::Template;
use crate::trace::trace_event;
use crate::util::MinutiaeResult;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[cfg(feature = "image-io")]
use crate::image::{Grid, Rgb};
#[cfg(feature = "image-io")]
use crate::print::Print;

/// Directory used when none is given.
pub const DEFAULT_PRINT_DIR: &str = "prints";
/// Suffix of template files.
pub const TEMPLATE_SUFFIX: &str = "Template.txt";
/// Suffix of labelled images.
pub const LABELLED_SUFFIX: &str = "Labelled.png";

/// Persistent templates addressed by print name.
pub trait TemplateStore {
    /// Loads the template stored under `name`, or `Ok(None)` if there is none.
    fn load(&self, name: &str) -> MinutiaeResult<Option<Template>>;

    /// Stores `template` under `name`, replacing any previous one.
    fn save(&self, name: &str, template: &Template) -> MinutiaeResult<()>;

    /// Names of every stored template, sorted.
    fn names(&self) -> MinutiaeResult<Vec<String>>;
}

/// Filesystem-backed [`TemplateStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrintDir {
    root: PathBuf,
}

impl Default for PrintDir {
    fn default() -> Self {
        Self::new(DEFAULT_PRINT_DIR)
    }
}

impl PrintDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn template_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}{TEMPLATE_SUFFIX}"))
    }

    pub fn image_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.png"))
    }

    pub fn labelled_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}{LABELLED_SUFFIX}"))
    }

    /// Returns true if a template file exists for `name`.
    pub fn has_template(&self, name: &str) -> bool {
        self.template_path(name).is_file()
    }

    /// Writes the source image as `<name>.png`.
    #[cfg(feature = "image-io")]
    pub fn save_print(&self, name: &str, image: &Grid<Rgb>) -> MinutiaeResult<()> {
        fs::create_dir_all(&self.root)?;
        crate::image::io::save_rgb_image(self.image_path(name), image)
    }

    /// Writes the labelled image as `<name>Labelled.png`.
    #[cfg(feature = "image-io")]
    pub fn save_labelled(&self, name: &str, image: &Grid<Rgb>) -> MinutiaeResult<()> {
        fs::create_dir_all(&self.root)?;
        crate::image::io::save_rgb_image(self.labelled_path(name), image)
    }

    /// Loads `<name>.png`.
    #[cfg(feature = "image-io")]
    pub fn load_print(&self, name: &str) -> MinutiaeResult<Grid<Rgb>> {
        crate::image::io::load_rgb_image(self.image_path(name))
    }

    /// Writes all three files for `print`.
    #[cfg(feature = "image-io")]
    pub fn store(&self, print: &Print) -> MinutiaeResult<()> {
        self.save_print(print.name(), print.image())?;
        self.save(print.name(), print.template())?;
        self.save_labelled(print.name(), print.labelled())
    }
}

impl TemplateStore for PrintDir {
    fn load(&self, name: &str) -> MinutiaeResult<Option<Template>> {
        let text = match fs::read_to_string(self.template_path(name)) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode(&text).map(Some)
    }

    fn save(&self, name: &str, template: &Template) -> MinutiaeResult<()> {
        fs::create_dir_all(&self.root)?;
        fs::write(self.template_path(name), encode(template))?;
        trace_event!("template_saved", minutiae = template.len());
        Ok(())
    }

    fn names(&self) -> MinutiaeResult<Vec<String>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(TEMPLATE_SUFFIX) {
                if !name.is_empty() {
                    names.push(name.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

/// Print name for an image path: the file name without directories or
/// extension.
pub fn print_name(path: impl AsRef<Path>) -> String {
    path.as_ref()
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
