//! Template input, structural compilation and per-phase scene specs.
//!
//! A [`Template`] pairs a canvas configuration with the AST emitted by the upstream markup
//! parser. [`Template::compile`] turns it into a [`CompiledTemplate`] once; the compiled tree is
//! immutable and can be resolved any number of times, from any number of threads, against
//! independent data environments.

pub(crate) mod ast;
pub(crate) mod attrs;
pub(crate) mod compiler;
pub mod dsl;
pub(crate) mod error;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;
use rayon::prelude::*;

pub use ast::{Attr, AttrValue, Block, Comment, Conditional, Mixin, Node, Tag, Text};
pub use attrs::{AttrMap, classify};
pub use compiler::{Compiler, compile};
pub use error::{CompileError, CompileErrorKind};

use crate::expression::{EvalOpts, ExpressionError};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::value::{DataEnv, Value};
use crate::resolve::{BatchOpts, Resolve, Resolver, build_thread_pool};
use crate::scene::attribute::Attribute;
use crate::scene::component::ComponentSpec;
use crate::scene::phase::{EffectSpec, PhaseSpec};
use crate::scene::props::LayoutProp;

fn default_fps() -> f64 {
    30.0
}

/// Canvas configuration of a template.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateConfig {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Frames per second handed to the renderer.
    #[serde(default = "default_fps")]
    pub fps: f64,
}

/// A template file: canvas configuration plus the parsed structure.
///
/// On disk this is one JSON object, `{"width": .., "height": .., "fps": .., "structure": <Block>}`.
#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Template {
    /// Canvas configuration.
    #[serde(flatten)]
    pub config: TemplateConfig,
    /// Root block of the markup AST.
    pub structure: Block,
}

impl Template {
    /// Template over an already-built AST.
    pub fn new(config: TemplateConfig, structure: Block) -> Self {
        Self { config, structure }
    }

    /// Parse a template from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SceneResult<Self> {
        serde_json::from_reader(r).map_err(|e| SceneError::serde(format!("parse template JSON: {e}")))
    }

    /// Parse a template from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open template JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Compile the structure; the root ZStack is sized to the canvas.
    pub fn compile(&self) -> Result<CompiledTemplate, CompileError> {
        let mut compiled = compile(&self.structure)?;
        let layout = &mut compiled.root.common_mut().layout;
        layout.insert(
            LayoutProp::Width,
            Attribute::Literal(Value::Number(self.config.width)),
        );
        layout.insert(
            LayoutProp::Height,
            Attribute::Literal(Value::Number(self.config.height)),
        );
        Ok(compiled)
    }

    /// Compile, resolve against `data` and split the result into one scene per phase.
    #[tracing::instrument(skip(self, data, opts), fields(phases = tracing::field::Empty))]
    pub fn build(&self, name: &str, data: &DataEnv, opts: &EvalOpts) -> SceneResult<Vec<SceneSpec>> {
        let resolved = self.compile()?.resolve(data, opts)?;
        tracing::Span::current().record("phases", resolved.phases.len());
        Ok(self.scenes(name, resolved))
    }

    /// Split a resolved template into one scene per phase.
    ///
    /// Scene names are `"<name> <phase>"`, in phase declaration order.
    pub fn scenes(&self, name: &str, resolved: CompiledTemplate) -> Vec<SceneSpec> {
        let CompiledTemplate { root, phases } = resolved;
        phases
            .into_iter()
            .map(|phase| SceneSpec {
                name: format!("{name} {}", phase.name),
                fps: self.config.fps,
                width: self.config.width,
                height: self.config.height,
                root: root.clone(),
                effects: phase.effects,
            })
            .collect()
    }
}

/// Output of structural compilation: the component tree and its phases.
///
/// Before resolving, attributes may still be [`Attribute::Dynamic`] and components may carry a
/// `cond`. A resolved copy has neither.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CompiledTemplate {
    /// Root ZStack.
    pub root: ComponentSpec,
    /// Phases in declaration order; never empty.
    pub phases: Vec<PhaseSpec>,
}

impl CompiledTemplate {
    /// Resolve a copy of this template against `data`.
    #[tracing::instrument(skip_all, fields(vars = data.len()))]
    pub fn resolve(&self, data: &DataEnv, opts: &EvalOpts) -> Result<Self, ExpressionError> {
        let mut r = Resolver::with_opts(data, *opts);
        self.resolve_fields(&mut r)
    }

    /// Like [`CompiledTemplate::resolve`], calling `observer` with the source and value of every
    /// dynamic attribute as it is substituted.
    pub fn resolve_observed<'a>(
        &self,
        data: &'a DataEnv,
        opts: &EvalOpts,
        observer: impl FnMut(&str, &Value) + 'a,
    ) -> Result<Self, ExpressionError> {
        let mut r = Resolver::with_opts(data, *opts).on_expression(observer);
        self.resolve_fields(&mut r)
    }

    /// Resolve one copy per data environment. Results are in input order.
    ///
    /// The first failure aborts the batch.
    #[tracing::instrument(skip_all, fields(requests = envs.len(), parallel = batch.parallel))]
    pub fn resolve_batch(
        &self,
        envs: &[DataEnv],
        opts: &EvalOpts,
        batch: &BatchOpts,
    ) -> SceneResult<Vec<Self>> {
        if !batch.parallel {
            return envs
                .iter()
                .map(|data| self.resolve(data, opts).map_err(SceneError::from))
                .collect();
        }

        let pool = build_thread_pool(batch.threads)?;
        tracing::debug!(threads = pool.current_num_threads(), "resolving batch in parallel");
        let out = pool.install(|| {
            envs.par_iter()
                .map(|data| self.resolve(data, opts))
                .collect::<Result<Vec<_>, _>>()
        })?;
        Ok(out)
    }

    /// Depth-first search of the component tree by literal id.
    pub fn find(&self, id: &str) -> Option<&ComponentSpec> {
        self.root.find(id)
    }

    /// Phase named `name`.
    pub fn phase(&self, name: &str) -> Option<&PhaseSpec> {
        self.phases.iter().find(|p| p.name == name)
    }
}

impl Resolve for CompiledTemplate {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(Self {
            root: self.root.resolve_fields(r)?,
            phases: self.phases.resolve_fields(r)?,
        })
    }
}

/// One renderable scene: the resolved component tree plus the effects of a single phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneSpec {
    /// `"<template name> <phase name>"`.
    pub name: String,
    /// Frames per second.
    pub fps: f64,
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Resolved component tree.
    pub root: ComponentSpec,
    /// Effects of the phase.
    pub effects: Vec<EffectSpec>,
}

#[cfg(test)]
#[path = "../../tests/unit/template/template.rs"]
mod tests;
