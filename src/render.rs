//! Exports the [`Renderer`] which loads a template from the search directory,
//! applies a [`Page`]'s arguments to it, and writes the result to the output
//! directory.

use minijinja::{path_loader, AutoEscape, Environment, ErrorKind, UndefinedBehavior, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// A single output file: the template it is rendered from, the name it is
/// written under, and the variables made available to the template.
#[derive(Clone, Debug)]
pub struct Page {
    /// The path of the template, relative to the search directory.
    pub template_id: String,

    /// The path of the output file, relative to the output directory. Defaults
    /// to [`Page::template_id`].
    pub output_name: String,

    /// The variables passed into the template. Every page owns its own map.
    pub template_args: BTreeMap<String, Value>,
}

impl Page {
    /// Creates a [`Page`] that renders `template_id` with no arguments into an
    /// output file of the same name.
    pub fn new(template_id: &str) -> Page {
        Page {
            template_id: template_id.to_owned(),
            output_name: template_id.to_owned(),
            template_args: BTreeMap::new(),
        }
    }

    /// Writes the page under `output_name` instead of its template's name.
    pub fn with_output_name(mut self, output_name: &str) -> Page {
        self.output_name = output_name.to_owned();
        self
    }

    /// Binds the template variable `name` to `value`.
    pub fn with_arg(mut self, name: &str, value: impl Into<Value>) -> Page {
        self.template_args.insert(name.to_owned(), value.into());
        self
    }
}

/// Responsible for templating [`Page`]s and writing them to disk.
pub struct Renderer {
    env: Environment<'static>,

    /// The directory into which output files are written.
    output_directory: PathBuf,
}

impl Renderer {
    /// Creates a [`Renderer`] which resolves template names against
    /// `search_directory` and writes pages into `output_directory`.
    ///
    /// Variables a template references but a page doesn't supply are errors
    /// rather than empty strings. Substituted values are not HTML-escaped, and
    /// a template's trailing newline is kept so static templates come out
    /// byte-for-byte unchanged.
    pub fn new(search_directory: &Path, output_directory: &Path) -> Renderer {
        let mut env = Environment::new();
        env.set_loader(path_loader(search_directory.to_owned()));
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        Renderer {
            env,
            output_directory: output_directory.to_owned(),
        }
    }

    /// Returns the location on disk that `page` is written to.
    pub fn output_path(&self, page: &Page) -> PathBuf {
        self.output_directory.join(&page.output_name)
    }

    /// Renders `page` to a string without touching the output directory.
    pub fn render(&self, page: &Page) -> Result<String> {
        let template = self.env.get_template(&page.template_id).map_err(|err| {
            let name = page.template_id.clone();
            match err.kind() {
                ErrorKind::TemplateNotFound => Error::TemplateNotFound { name, err },
                _ => Error::Render { name, err },
            }
        })?;
        template
            .render(&page.template_args)
            .map_err(|err| Error::Render {
                name: page.template_id.clone(),
                err,
            })
    }

    /// Takes a single [`Page`], templates it, and writes it to disk. An
    /// existing output file is truncated and overwritten, but only once the
    /// template rendered successfully.
    pub fn render_page(&self, page: &Page) -> Result<()> {
        let contents = self.render(page)?;
        let path = self.output_path(page);
        std::fs::write(&path, contents).map_err(|err| Error::Write {
            path: path.clone(),
            err,
        })?;
        tracing::debug!(
            template = %page.template_id,
            output = %path.display(),
            "rendered page"
        );
        Ok(())
    }
}

/// The result of a fallible rendering operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error rendering a [`Page`].
#[derive(Debug)]
pub enum Error {
    /// The template name didn't resolve to a file in the search directory.
    TemplateNotFound { name: String, err: minijinja::Error },

    /// The template failed to parse, or it referenced a variable the page
    /// didn't supply.
    Render { name: String, err: minijinja::Error },

    /// The output file couldn't be written.
    Write { path: PathBuf, err: io::Error },
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::TemplateNotFound { name, err: _ } => {
                write!(f, "Template '{}' not found", name)
            }
            Error::Render { name, err } => {
                write!(f, "Rendering template '{}': {}", name, err)
            }
            Error::Write { path, err } => {
                write!(f, "Writing output file '{}': {}", path.display(), err)
            }
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::TemplateNotFound { name: _, err } => Some(err),
            Error::Render { name: _, err } => Some(err),
            Error::Write { path: _, err } => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    type TestResult = std::result::Result<(), Box<dyn std::error::Error>>;

    // Lays out `<tmp>/html/<name>` for each template and returns the temp dir
    // along with a renderer writing into `<tmp>`.
    fn fixture(templates: &[(&str, &str)]) -> io::Result<(TempDir, Renderer)> {
        let root = tempfile::tempdir()?;
        let html = root.path().join("html");
        fs::create_dir(&html)?;
        for (name, contents) in templates {
            fs::write(html.join(name), contents)?;
        }
        let renderer = Renderer::new(&html, root.path());
        Ok((root, renderer))
    }

    #[test]
    fn test_static_template_is_copied_verbatim() -> TestResult {
        let source = "<html>\n  <body>Raytracer</body>\n</html>\n";
        let (root, renderer) = fixture(&[("raytracerPage1.html", source)])?;
        renderer.render_page(&Page::new("raytracerPage1.html"))?;
        let rendered = fs::read_to_string(root.path().join("raytracerPage1.html"))?;
        assert_eq!(source, rendered);
        Ok(())
    }

    #[test]
    fn test_output_name_override() -> TestResult {
        let (root, renderer) = fixture(&[("raytracerPage1.html", "home")])?;
        renderer.render_page(&Page::new("raytracerPage1.html").with_output_name("index.html"))?;
        assert_eq!("home", fs::read_to_string(root.path().join("index.html"))?);
        assert!(!root.path().join("raytracerPage1.html").exists());
        Ok(())
    }

    #[test]
    fn test_arguments_are_substituted() -> TestResult {
        let (_root, renderer) = fixture(&[("page.html", "<h1>{{ title }}</h1>")])?;
        let rendered = renderer.render(&Page::new("page.html").with_arg("title", "Part 2"))?;
        assert_eq!("<h1>Part 2</h1>", rendered);
        Ok(())
    }

    #[test]
    fn test_arguments_are_not_escaped() -> TestResult {
        let (_root, renderer) = fixture(&[("page.html", "{{ body }}")])?;
        let rendered = renderer.render(&Page::new("page.html").with_arg("body", "<b>&</b>"))?;
        assert_eq!("<b>&</b>", rendered);
        Ok(())
    }

    #[test]
    fn test_templates_can_extend_siblings() -> TestResult {
        let (_root, renderer) = fixture(&[
            ("base.html", "<main>{% block content %}{% endblock %}</main>"),
            (
                "page.html",
                "{% extends \"base.html\" %}{% block content %}page{% endblock %}",
            ),
        ])?;
        assert_eq!("<main>page</main>", renderer.render(&Page::new("page.html"))?);
        Ok(())
    }

    #[test]
    fn test_missing_variable_is_a_render_error() -> TestResult {
        let (root, renderer) = fixture(&[("page.html", "<p>{{ missing }}</p>")])?;
        match renderer.render_page(&Page::new("page.html")) {
            Err(Error::Render { name, err: _ }) => assert_eq!("page.html", name),
            other => panic!("expected a render error, got {:?}", other),
        }
        assert!(!root.path().join("page.html").exists());
        Ok(())
    }

    #[test]
    fn test_syntax_error_is_a_render_error() -> TestResult {
        let (_root, renderer) = fixture(&[("page.html", "{% if %}")])?;
        match renderer.render(&Page::new("page.html")) {
            Err(Error::Render { .. }) => Ok(()),
            other => panic!("expected a render error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_template() -> TestResult {
        let (_root, renderer) = fixture(&[])?;
        match renderer.render_page(&Page::new("raytracerPage1.html")) {
            Err(Error::TemplateNotFound { name, err: _ }) => {
                assert_eq!("raytracerPage1.html", name);
                Ok(())
            }
            other => panic!("expected a missing template error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_output_directory_is_a_write_error() -> TestResult {
        let (root, renderer) = fixture(&[("page.html", "text")])?;
        let page = Page::new("page.html").with_output_name("missing/page.html");
        match renderer.render_page(&page) {
            Err(Error::Write { path, err: _ }) => {
                assert_eq!(root.path().join("missing/page.html"), path);
                Ok(())
            }
            other => panic!("expected a write error, got {:?}", other),
        }
    }

    #[test]
    fn test_existing_output_is_overwritten() -> TestResult {
        let (root, renderer) = fixture(&[("raytracerPage1.html", "new")])?;
        let index = root.path().join("index.html");
        fs::write(&index, "some much longer stale content")?;
        renderer.render_page(&Page::new("raytracerPage1.html").with_output_name("index.html"))?;
        assert_eq!("new", fs::read_to_string(&index)?);
        Ok(())
    }

    #[test]
    fn test_failed_render_leaves_output_untouched() -> TestResult {
        let (root, renderer) = fixture(&[("page.html", "{{ missing }}")])?;
        let output = root.path().join("page.html");
        fs::write(&output, "previous")?;
        assert!(renderer.render_page(&Page::new("page.html")).is_err());
        assert_eq!("previous", fs::read_to_string(&output)?);
        Ok(())
    }

    #[test]
    fn test_pages_do_not_share_arguments() {
        let first = Page::new("a.html").with_arg("x", 1);
        let second = Page::new("a.html");
        assert_eq!(1, first.template_args.len());
        assert!(second.template_args.is_empty());
    }
}
