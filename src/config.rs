use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// The template directory used when none is given, relative to the working
/// directory.
pub const DEFAULT_HTML_DIRECTORY: &str = "./html";

pub struct Config {
    /// The directory template names are resolved against.
    pub html_directory: PathBuf,

    /// The directory rendered pages are written into. Always the parent of
    /// [`Config::html_directory`].
    pub output_directory: PathBuf,
}

impl Config {
    pub fn from_html_directory(html_directory: &Path) -> Result<Config> {
        match html_directory.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for template directory '{}'",
                html_directory.display()
            )),
            Some(parent) => Ok(Config {
                html_directory: html_directory.to_owned(),
                output_directory: match parent.as_os_str().is_empty() {
                    true => PathBuf::from("."),
                    false => parent.to_owned(),
                },
            }),
        }
    }
}
