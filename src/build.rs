//! Exports the [`build_site`] function which renders every page of the site,
//! in a fixed order, via [`crate::render::Renderer`].

use crate::config::Config;
use crate::render::{Page, Renderer, Result};

/// Template names and their output names, in the order they are rendered.
/// `None` means the page is written under its template's name.
const PAGES: &[(&str, Option<&str>)] = &[
    // home page
    ("raytracerPage1.html", Some("index.html")),
    ("raytracerPage1.html", None),
    ("raytracerPage2.html", None),
    ("raytracerPage3.html", None),
    ("raytracerPage4.html", None),
    ("rayTracerFinalReport.html", None),
];

/// Returns the site's [`Page`]s in render order. Each call builds fresh pages
/// with their own (empty) argument maps.
pub fn pages() -> Vec<Page> {
    PAGES
        .iter()
        .map(|(template_id, output_name)| match output_name {
            Some(output_name) => Page::new(template_id).with_output_name(output_name),
            None => Page::new(template_id),
        })
        .collect()
}

/// Builds the site from a [`Config`] object. Pages are rendered one at a time
/// and the first failure stops the build, so pages after the failing one keep
/// whatever content they had before.
pub fn build_site(config: &Config) -> Result<()> {
    let renderer = Renderer::new(&config.html_directory, &config.output_directory);
    let pages = pages();
    tracing::debug!(
        templates = %config.html_directory.display(),
        output = %config.output_directory.display(),
        pages = pages.len(),
        "building site"
    );
    for page in &pages {
        renderer.render_page(page)?;
    }
    tracing::info!(pages = pages.len(), "built site");
    Ok(())
}
