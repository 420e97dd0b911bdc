//! Template engine wrapper.
//!
//! Loads every `.html` template from the configured template directory into a
//! `minijinja` environment at startup, so no per-request parsing happens.
//! Templates are addressed by file stem (`views/top.html` -> `top`).

use crate::error::HandlerError;
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Load all `.html` files from `dir` into the environment.
    pub fn from_dir(dir: &str) -> Result<Self, HandlerError> {
        let mut env = Environment::new();

        for entry in fs::read_dir(Path::new(dir))? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("html") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let source = fs::read_to_string(&path)?;
            env.add_template_owned(stem.to_string(), source)?;
        }

        Ok(Self { env })
    }

    /// Build an engine from a single in-memory template. Test support.
    #[cfg(test)]
    pub fn from_source(name: &str, source: &str) -> Result<Self, HandlerError> {
        let mut env = Environment::new();
        env.add_template_owned(name.to_string(), source.to_string())?;
        Ok(Self { env })
    }

    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, HandlerError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_render_from_source() {
        let engine = TemplateEngine::from_source("greet", "Hello {{ name }}!").unwrap();
        let html = engine.render("greet", context! { name => "World" }).unwrap();
        assert_eq!(html, "Hello World!");
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        let engine = TemplateEngine::from_source("greet", "hi").unwrap();
        assert!(engine.render("missing", context! {}).is_err());
    }

    #[test]
    fn test_from_dir_loads_repo_templates() {
        let engine = TemplateEngine::from_dir("views").unwrap();
        let html = engine
            .render("top", context! { title => "t", message => "m" })
            .unwrap();
        assert!(html.contains("t"));
    }
}
