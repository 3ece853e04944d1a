//! Compiled scene model: components, phases and their attributes.

pub(crate) mod attribute;
pub(crate) mod component;
pub(crate) mod phase;
pub(crate) mod props;

pub use attribute::{Attribute, FromValue};
pub use component::{
    CommonProps, ComponentKind, ComponentSpec, ContainerSpec, ImageSpec, RectangleSpec, StackSpec,
    TextSpec,
};
pub use phase::{
    CustomEffectSpec, DEFAULT_TYPING_DURATION, EffectSpec, OverrideSpec, PhaseSpec,
    TransitionSpec, TypingEffect,
};
pub use props::{Easing, ImageSource, LayoutProp, StyleMap, TransitionProp, TransitionValues};
