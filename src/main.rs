use anyhow::Result;
use clap::{App, Arg};
use raytracer_pages::build::build_site;
use raytracer_pages::config::{Config, DEFAULT_HTML_DIRECTORY};
use raytracer_pages::logging;
use std::path::Path;

fn main() -> Result<()> {
    let matches = App::new("raytracer-pages")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders the raytracer HTML templates into static pages")
        .arg(
            Arg::with_name("HTML_DIR")
                .help("The template directory; pages are written to its parent")
                .default_value(DEFAULT_HTML_DIRECTORY)
                .index(1),
        )
        .get_matches();

    logging::init()?;

    let html_directory = matches.value_of("HTML_DIR").unwrap_or(DEFAULT_HTML_DIRECTORY);
    let config = Config::from_html_directory(Path::new(html_directory))?;
    build_site(&config)?;
    Ok(())
}
