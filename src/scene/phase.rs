use std::collections::BTreeMap;

use crate::scene::attribute::Attribute;
use crate::scene::props::{Easing, TransitionProp, TransitionValues};

/// Default per-character duration of the typing effect.
pub const DEFAULT_TYPING_DURATION: f64 = 50.0;

/// A named, ordered group of effects applied to the component tree.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PhaseSpec {
    /// Non-empty phase name.
    pub name: String,
    /// Effects in source order.
    pub effects: Vec<EffectSpec>,
    /// Source line of the `phase` tag; `None` for the synthesized default phase.
    #[serde(skip)]
    pub line: Option<u32>,
}

impl PhaseSpec {
    /// The phase synthesized when a template declares none.
    pub fn main() -> Self {
        Self {
            name: "main".to_owned(),
            effects: Vec::new(),
            line: None,
        }
    }
}

/// One animation effect of a phase.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EffectSpec {
    /// Interpolate properties of a component.
    Transition(TransitionSpec),
    /// Set properties of a component directly.
    Override(OverrideSpec),
    /// Built-in named effect.
    Effect(CustomEffectSpec),
}

impl EffectSpec {
    /// Id of the component the effect targets.
    pub fn component(&self) -> &str {
        match self {
            Self::Transition(t) => &t.component,
            Self::Override(o) => &o.component,
            Self::Effect(CustomEffectSpec::Typing(t)) => &t.component,
        }
    }
}

/// Interpolation of transitionable properties over `duration`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionSpec {
    /// Target component id.
    pub component: String,
    /// Length of the transition; positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Attribute<f64>>,
    /// Timing curve.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub easing: Option<Attribute<Easing>>,
    /// Start values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Attribute<TransitionValues>>,
    /// End values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Attribute<TransitionValues>>,
}

/// Direct assignment of transitionable properties.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct OverrideSpec {
    /// Target component id.
    pub component: String,
    /// Values to apply.
    #[serde(flatten)]
    pub values: BTreeMap<TransitionProp, Attribute<f64>>,
}

/// Built-in effects, discriminated by `name`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "name", rename_all = "lowercase")]
pub enum CustomEffectSpec {
    /// Reveal a text component character by character.
    Typing(TypingEffect),
}

/// Typing effect parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TypingEffect {
    /// Target component id.
    pub component: String,
    /// Positive per-character duration.
    pub duration: f64,
}
