//! The library code for `raytracer-pages`, which renders the raytracer
//! project's HTML templates into the static pages that are served as the
//! project site. The work breaks down into two steps:
//!
//! 1. Resolving where templates are read from and where pages are written to
//!    ([`crate::config`])
//! 2. Rendering a fixed sequence of pages to disk ([`crate::build`]), each of
//!    which is a single template applied by [`crate::render`]
//!
//! There is no incremental mode: every run re-renders every page and
//! overwrites whatever output was there before.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod build;
pub mod config;
pub mod logging;
pub mod render;
