//! HTML report assembly.
//!
//! The report is a pure function of the accumulated render results and the
//! template file: two literal tokens are substituted, nothing else.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::pipeline::{PageArtifacts, RenderResult};
use crate::{HarnessConfig, Result};

const TITLE_TOKEN: &str = "%%TITLE%%";
const RESULTS_TOKEN: &str = "%%RESULTS%%";

/// Substitute the template tokens and write `index.html` into the output
/// directory. Returns the report path.
pub fn create_html_file(results: &[RenderResult], config: &HarnessConfig) -> Result<PathBuf> {
    let title = format!(
        "renderproof Test Rendering Results, {}",
        Local::now().format("%c")
    );
    let template = fs::read_to_string(&config.template)?;
    let html = template
        .replace(TITLE_TOKEN, &title)
        .replace(RESULTS_TOKEN, &results_fragment(results));

    let htmlfile = config.output_dir.join("index.html");
    fs::write(&htmlfile, html)?;
    Ok(htmlfile)
}

/// Assemble the per-file, per-page result blocks.
fn results_fragment(results: &[RenderResult]) -> String {
    let mut html = String::new();

    for result in results {
        let pdf = basename(&result.pdf);
        html.push_str(&format!(
            "<div class=\"result\">\n<h2><a href=\"{pdf}\" class=\"pdf-file\">{pdf}</a></h2>\n",
        ));

        for (i, page) in result.pages.iter().enumerate() {
            html.push_str(&page_fragment(page, i + 1));
        }

        html.push_str("</div>\n\n");
    }

    html
}

fn page_fragment(page: &PageArtifacts, number: usize) -> String {
    let png = basename(&page.png);
    let png_thumb = basename(&page.png_thumb);

    match (&page.diff, &page.diff_thumb, &page.reference, &page.ref_thumb) {
        (Some(diff), Some(diff_thumb), Some(reference), Some(ref_thumb)) => {
            let diff = basename(diff);
            let diff_thumb = basename(diff_thumb);
            let reference = basename(reference);
            let ref_thumb = basename(ref_thumb);
            format!(
                "<div class=\"result-page-diff\">\n\
                 <h3>Page {number}</h3>\n\
                 <div class=\"result-img\">\n\
                 <div class=\"result-type\">Difference</div>\n\
                 <a href=\"{diff}\" class=\"diff-file\"><img src=\"{diff_thumb}\"/></a>\n\
                 </div>\n\
                 <div class=\"result-img\">\n\
                 <div class=\"result-type\">Rendered</div>\n\
                 <a href=\"{png}\" class=\"png-file\"><img src=\"{png_thumb}\"/></a>\n\
                 </div>\n\
                 <div class=\"result-img\">\n\
                 <div class=\"result-type\">Reference</div>\n\
                 <a href=\"{reference}\" class=\"ref-file\"><img src=\"{ref_thumb}\"/></a>\n\
                 </div>\n\
                 </div>\n"
            )
        }
        _ => format!(
            "<div class=\"result-page\">\n\
             <h3>Page {number}</h3>\n\
             <div class=\"result-img\">\n\
             <a href=\"{png}\" class=\"png-file\"><img src=\"{png_thumb}\"/></a>\n\
             </div>\n\
             </div>\n"
        ),
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
