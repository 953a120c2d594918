//! Template rendering for command lines
//!
//! A command may be rendered through a named engine before it is executed,
//! e.g. `tar -czf /tmp/{{ host.id }}.tar.gz /etc`. `jinja` and `jinja2`
//! are accepted as names for the Jinja-compatible Tera engine.

use std::collections::BTreeMap;
use std::error::Error as _;
use std::str::FromStr;

use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::infrastructure::{InfraError, InfraResult};

/// Supported template engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateEngine {
    Tera,
}

impl FromStr for TemplateEngine {
    type Err = InfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tera" | "jinja" | "jinja2" => Ok(TemplateEngine::Tera),
            _ => Err(InfraError::UnknownTemplateEngine(s.to_string())),
        }
    }
}

/// Facts about the local host exposed as `host.*`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HostFacts {
    pub id: String,
    pub hostname: String,
}

impl HostFacts {
    pub fn detect() -> Self {
        let hostname = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "localhost".to_string());
        Self {
            id: hostname.clone(),
            hostname,
        }
    }
}

/// Renders command strings with `host`, `vars` and `env` in scope.
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    host: HostFacts,
    vars: BTreeMap<String, String>,
}

impl TemplateRenderer {
    pub fn new(host: HostFacts, vars: BTreeMap<String, String>) -> Self {
        Self { host, vars }
    }

    /// Renderer using the detected host facts.
    pub fn with_vars(vars: BTreeMap<String, String>) -> Self {
        Self::new(HostFacts::detect(), vars)
    }

    pub fn render(&self, engine: &str, source: &str) -> InfraResult<String> {
        match engine.parse::<TemplateEngine>()? {
            TemplateEngine::Tera => self.render_tera(engine, source),
        }
    }

    fn render_tera(&self, engine: &str, source: &str) -> InfraResult<String> {
        let env: BTreeMap<String, String> = std::env::vars().collect();

        let mut context = Context::new();
        context.insert("host", &self.host);
        context.insert("vars", &self.vars);
        context.insert("env", &env);

        let rendered = Tera::one_off(source, &context, false).map_err(|e| {
            // tera puts the useful part of the message in the source chain
            let mut message = e.to_string();
            let mut cause = e.source();
            while let Some(inner) = cause {
                message.push_str(": ");
                message.push_str(&inner.to_string());
                cause = inner.source();
            }
            InfraError::Template {
                engine: engine.to_string(),
                message,
            }
        })?;
        debug!("render: engine={}, rendered={}", engine, rendered);
        Ok(rendered)
    }
}
