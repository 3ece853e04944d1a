//! Sceneplate compiles parameterized scene templates into renderable specifications.
//!
//! A template is a markup AST (produced by an external parser) describing nested visual
//! components plus named animation phases. The pipeline is:
//!
//! - Load a [`Template`] (or build its AST with [`dsl`])
//! - [`Template::compile`] it once into a [`CompiledTemplate`], whose attributes may still be
//!   deferred data-binding expressions
//! - Per request, resolve the compiled tree against a [`DataEnv`]; every expression runs in a
//!   whitelisting [`Sandbox`]
//!
//! Resolved trees are handed to an external layout and render engine.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Sandboxed data-binding expressions.
pub mod expression;
/// Render-time substitution and pruning.
pub mod resolve;
/// Compiled component and phase model.
pub mod scene;
/// Template AST, structural compiler and scene specs.
pub mod template;

pub use crate::foundation::error::{SceneError, SceneResult};
pub use crate::foundation::value::{Callable, DataEnv, Object, Value};

pub use crate::expression::{
    EvalOpts, ExprErrorKind, ExpressionError, Sandbox, eval_expression, global_env,
};
pub use crate::resolve::{BatchOpts, Resolve, Resolver};
pub use crate::scene::{
    Attribute, ComponentKind, ComponentSpec, EffectSpec, PhaseSpec, TransitionProp,
};
pub use crate::template::dsl;
pub use crate::template::{
    Block, CompileError, CompileErrorKind, CompiledTemplate, Node, SceneSpec, Template,
    TemplateConfig, compile,
};
