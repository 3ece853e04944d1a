use std::collections::BTreeMap;
use std::sync::Arc;

/// Layout fields shared by every component kind.
///
/// Their values are opaque to this crate; units and semantics belong to the layout engine.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum LayoutProp {
    Inset,
    Left,
    Right,
    Top,
    Bottom,
    Width,
    MaxWidth,
    MinWidth,
    Height,
    MaxHeight,
    MinHeight,
    AspectRatio,
    Offset,
    OffsetX,
    OffsetY,
    Flex,
    FlexGrow,
    FlexShrink,
    FlexBasis,
    Padding,
    PaddingX,
    PaddingY,
    PaddingLeft,
    PaddingRight,
    PaddingTop,
    PaddingBottom,
    TransformOrigin,
}

impl LayoutProp {
    /// Every layout field, in declaration order.
    pub const ALL: [Self; 27] = [
        Self::Inset,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::Width,
        Self::MaxWidth,
        Self::MinWidth,
        Self::Height,
        Self::MaxHeight,
        Self::MinHeight,
        Self::AspectRatio,
        Self::Offset,
        Self::OffsetX,
        Self::OffsetY,
        Self::Flex,
        Self::FlexGrow,
        Self::FlexShrink,
        Self::FlexBasis,
        Self::Padding,
        Self::PaddingX,
        Self::PaddingY,
        Self::PaddingLeft,
        Self::PaddingRight,
        Self::PaddingTop,
        Self::PaddingBottom,
        Self::TransformOrigin,
    ];

    /// Attribute name as written in templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inset => "inset",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Width => "width",
            Self::MaxWidth => "max_width",
            Self::MinWidth => "min_width",
            Self::Height => "height",
            Self::MaxHeight => "max_height",
            Self::MinHeight => "min_height",
            Self::AspectRatio => "aspect_ratio",
            Self::Offset => "offset",
            Self::OffsetX => "offset_x",
            Self::OffsetY => "offset_y",
            Self::Flex => "flex",
            Self::FlexGrow => "flex_grow",
            Self::FlexShrink => "flex_shrink",
            Self::FlexBasis => "flex_basis",
            Self::Padding => "padding",
            Self::PaddingX => "padding_x",
            Self::PaddingY => "padding_y",
            Self::PaddingLeft => "padding_left",
            Self::PaddingRight => "padding_right",
            Self::PaddingTop => "padding_top",
            Self::PaddingBottom => "padding_bottom",
            Self::TransformOrigin => "transform_origin",
        }
    }

    /// Inverse of [`LayoutProp::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// Properties that transitions and overrides may animate.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum TransitionProp {
    Opacity,
    Scale,
    Rotate,
    TranslateX,
    TranslateY,
}

impl TransitionProp {
    /// Every transitionable property.
    pub const ALL: [Self; 5] = [
        Self::Opacity,
        Self::Scale,
        Self::Rotate,
        Self::TranslateX,
        Self::TranslateY,
    ];

    /// Attribute name as written in templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::Rotate => "rotate",
            Self::TranslateX => "translate_x",
            Self::TranslateY => "translate_y",
        }
    }

    /// Inverse of [`TransitionProp::as_str`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }
}

/// `from`/`to` values of a transition.
pub type TransitionValues = BTreeMap<TransitionProp, f64>;

/// Free-form style map handed through to the renderer.
pub type StyleMap = crate::foundation::value::Object;

/// Transition timing curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Slow start.
    EaseIn,
    /// Slow end.
    EaseOut,
    /// Slow start and end.
    EaseInOut,
}

impl Easing {
    /// Name as written in templates.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::EaseInOut => "ease-in-out",
        }
    }

    /// Parse a template easing name.
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::Linear, Self::EaseIn, Self::EaseOut, Self::EaseInOut]
            .into_iter()
            .find(|e| e.as_str() == name)
    }
}

/// Image payload: a URL to fetch later, or bytes supplied with the request data.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ImageSource {
    /// Location understood by the renderer.
    Url(String),
    /// Raw encoded image bytes.
    Binary(#[serde(serialize_with = "serialize_binary")] Arc<[u8]>),
}

fn serialize_binary<S>(bytes: &Arc<[u8]>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_bytes(bytes)
}

/// Attributes recognized on every component tag, besides layout and transition fields.
pub(crate) const COMMON_ATTRS: &[&str] = &["id", "style"];
/// Extra attribute recognized on container tags. Children come from the tag's block, so the
/// compiler drops it after whitelisting.
pub(crate) const CONTAINER_ATTRS: &[&str] = &["children"];
pub(crate) const STACK_ATTRS: &[&str] = &["gap", "align", "justify"];
pub(crate) const IMAGE_ATTRS: &[&str] = &["src", "resize_mode", "image_displacement", "image_offset"];
pub(crate) const TEXT_ATTRS: &[&str] = &["text"];

pub(crate) const PHASE_ATTRS: &[&str] = &["name"];
pub(crate) const TRANSITION_ATTRS: &[&str] = &["component", "easing", "duration", "from", "to"];
pub(crate) const EFFECT_ATTRS: &[&str] = &["name", "component", "duration"];
