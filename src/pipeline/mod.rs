//! The sequential per-fixture rendering pipeline.
//!
//! Four stages, each delegating the actual work to an external collaborator:
//! PDF render (headless Chrome), rasterization (`convert`), reference
//! comparison (`compare`), and thumbnailing (`convert -resize`). Stages
//! communicate through file paths only.

pub mod compare;
pub mod pdf;
pub mod raster;
pub mod thumbs;

use std::path::{Path, PathBuf};

use crate::{HarnessConfig, Result};
use self::pdf::PdfRenderer;

/// Artifacts produced for a single rasterized page.
///
/// The reference/diff slots stay empty when comparison is disabled or the
/// page has no approved reference image.
#[derive(Debug, Clone, Default)]
pub struct PageArtifacts {
    /// Rasterized page image
    pub png: PathBuf,
    /// Thumbnail of the rasterized page
    pub png_thumb: PathBuf,
    /// Copy of the approved reference image, when one was found
    pub reference: Option<PathBuf>,
    /// Thumbnail of the reference copy
    pub ref_thumb: Option<PathBuf>,
    /// Difference image produced by `compare`
    pub diff: Option<PathBuf>,
    /// Thumbnail of the difference image
    pub diff_thumb: Option<PathBuf>,
}

/// Everything produced for one input fixture: the PDF plus the ordered
/// per-page artifacts.
#[derive(Debug, Clone)]
pub struct RenderResult {
    /// Rendered PDF
    pub pdf: PathBuf,
    /// Per-page artifacts, in page order
    pub pages: Vec<PageArtifacts>,
}

/// Run the full pipeline for one fixture file.
///
/// Any stage failure aborts the whole batch; only a missing reference image
/// is tolerated, leaving that page without comparison artifacts.
pub fn render_file(
    renderer: &mut dyn PdfRenderer,
    source: &Path,
    config: &HarnessConfig,
) -> Result<RenderResult> {
    let pdf = pdf::render_pdf(renderer, source, config)?;
    let pngs = raster::convert_to_png(&pdf, config)?;

    let mut pages = Vec::with_capacity(pngs.len());
    for png in pngs {
        let png_thumb = thumbs::create_thumbnail(&png, config)?;
        pages.push(PageArtifacts {
            png,
            png_thumb,
            ..Default::default()
        });
    }

    if !config.no_compare {
        for page in &mut pages {
            compare::compare_page(page, config)?;
        }
    }

    Ok(RenderResult { pdf, pages })
}

/// Insert a tag before the extension: `a.page1.png` -> `a.page1.diff.png`.
pub(crate) fn tag_path(path: &Path, tag: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .unwrap_or_else(|| std::ffi::OsStr::new(""))
        .to_string_lossy();
    match path.extension() {
        Some(ext) => path.with_file_name(format!("{}.{}.{}", stem, tag, ext.to_string_lossy())),
        None => path.with_file_name(format!("{}.{}", stem, tag)),
    }
}
