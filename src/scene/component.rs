use std::collections::BTreeMap;

use crate::foundation::value::Value;
use crate::scene::attribute::{Attribute, FromValue};
use crate::scene::props::{
    COMMON_ATTRS, CONTAINER_ATTRS, IMAGE_ATTRS, ImageSource, LayoutProp, STACK_ATTRS, StyleMap,
    TEXT_ATTRS, TransitionProp,
};

/// Component kinds a template tag may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Children stacked on top of each other.
    ZStack,
    /// Children laid out top to bottom.
    VStack,
    /// Children laid out left to right.
    HStack,
    /// Image, optionally with overlaid children.
    Image,
    /// Text run.
    Text,
    /// Plain rectangle.
    Rectangle,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::ZStack,
        Self::VStack,
        Self::HStack,
        Self::Image,
        Self::Text,
        Self::Rectangle,
    ];

    /// Tag name in templates, also the `kind` discriminant on the wire.
    pub fn tag(self) -> &'static str {
        match self {
            Self::ZStack => "zstack",
            Self::VStack => "vstack",
            Self::HStack => "hstack",
            Self::Image => "image",
            Self::Text => "text",
            Self::Rectangle => "rectangle",
        }
    }

    /// Inverse of [`ComponentKind::tag`].
    pub fn from_tag(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == name)
    }

    /// Kinds that own a child list.
    pub fn is_container(self) -> bool {
        matches!(self, Self::ZStack | Self::VStack | Self::HStack | Self::Image)
    }

    fn specific_attrs(self) -> &'static [&'static str] {
        match self {
            Self::VStack | Self::HStack => STACK_ATTRS,
            Self::Image => IMAGE_ATTRS,
            Self::Text => TEXT_ATTRS,
            Self::ZStack | Self::Rectangle => &[],
        }
    }

    /// Whether a tag of this kind keeps attribute `name`.
    pub fn allows_attr(self, name: &str) -> bool {
        COMMON_ATTRS.contains(&name)
            || LayoutProp::from_name(name).is_some()
            || TransitionProp::from_name(name).is_some()
            || (self.is_container() && CONTAINER_ATTRS.contains(&name))
            || self.specific_attrs().contains(&name)
    }
}

/// Fields every component carries.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct CommonProps {
    /// Identifier that effects refer to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Attribute<String>>,
    /// Style map handed to the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Attribute<StyleMap>>,
    /// Inclusion condition; the component is pruned when it evaluates falsy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cond: Option<String>,
    /// Layout fields.
    #[serde(flatten)]
    pub layout: BTreeMap<LayoutProp, Attribute<Value>>,
    /// Transitionable property values.
    #[serde(flatten)]
    pub transition: BTreeMap<TransitionProp, Attribute<f64>>,
    /// Source line of the tag this component came from.
    #[serde(skip)]
    pub line: Option<u32>,
}

/// ZStack fields.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ContainerSpec {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonProps,
    /// Child components, in source order.
    pub children: Vec<ComponentSpec>,
}

/// VStack/HStack fields.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct StackSpec {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonProps,
    /// Space between children.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<Attribute<f64>>,
    /// Cross-axis alignment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<Attribute<String>>,
    /// Main-axis distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify: Option<Attribute<String>>,
    /// Child components, in source order.
    pub children: Vec<ComponentSpec>,
}

/// Image fields.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ImageSpec {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonProps,
    /// Image payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<Attribute<ImageSource>>,
    /// How the image fits its box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resize_mode: Option<Attribute<String>>,
    /// Displacement of the image inside its box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_displacement: Option<Attribute<Value>>,
    /// Offset of the image inside its box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_offset: Option<Attribute<Value>>,
    /// Overlaid child components.
    pub children: Vec<ComponentSpec>,
}

/// Text fields.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct TextSpec {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonProps,
    /// Text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Attribute<String>>,
}

/// Rectangle fields.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RectangleSpec {
    /// Shared fields.
    #[serde(flatten)]
    pub common: CommonProps,
}

/// One node of the compiled component tree.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum ComponentSpec {
    ZStack(ContainerSpec),
    VStack(StackSpec),
    HStack(StackSpec),
    Image(ImageSpec),
    Text(TextSpec),
    Rectangle(RectangleSpec),
}

impl Default for ComponentSpec {
    fn default() -> Self {
        Self::ZStack(ContainerSpec::default())
    }
}

impl ComponentSpec {
    /// Empty component of `kind`.
    pub fn new(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::ZStack => Self::ZStack(ContainerSpec::default()),
            ComponentKind::VStack => Self::VStack(StackSpec::default()),
            ComponentKind::HStack => Self::HStack(StackSpec::default()),
            ComponentKind::Image => Self::Image(ImageSpec::default()),
            ComponentKind::Text => Self::Text(TextSpec::default()),
            ComponentKind::Rectangle => Self::Rectangle(RectangleSpec::default()),
        }
    }

    /// Discriminant.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::ZStack(_) => ComponentKind::ZStack,
            Self::VStack(_) => ComponentKind::VStack,
            Self::HStack(_) => ComponentKind::HStack,
            Self::Image(_) => ComponentKind::Image,
            Self::Text(_) => ComponentKind::Text,
            Self::Rectangle(_) => ComponentKind::Rectangle,
        }
    }

    /// Shared fields.
    pub fn common(&self) -> &CommonProps {
        match self {
            Self::ZStack(c) => &c.common,
            Self::VStack(c) | Self::HStack(c) => &c.common,
            Self::Image(c) => &c.common,
            Self::Text(c) => &c.common,
            Self::Rectangle(c) => &c.common,
        }
    }

    /// Shared fields, mutably.
    pub fn common_mut(&mut self) -> &mut CommonProps {
        match self {
            Self::ZStack(c) => &mut c.common,
            Self::VStack(c) | Self::HStack(c) => &mut c.common,
            Self::Image(c) => &mut c.common,
            Self::Text(c) => &mut c.common,
            Self::Rectangle(c) => &mut c.common,
        }
    }

    /// Child list of container kinds.
    pub fn children(&self) -> Option<&[ComponentSpec]> {
        match self {
            Self::ZStack(c) => Some(&c.children),
            Self::VStack(c) | Self::HStack(c) => Some(&c.children),
            Self::Image(c) => Some(&c.children),
            Self::Text(_) | Self::Rectangle(_) => None,
        }
    }

    /// Child list of container kinds, mutably.
    pub fn children_mut(&mut self) -> Option<&mut Vec<ComponentSpec>> {
        match self {
            Self::ZStack(c) => Some(&mut c.children),
            Self::VStack(c) | Self::HStack(c) => Some(&mut c.children),
            Self::Image(c) => Some(&mut c.children),
            Self::Text(_) | Self::Rectangle(_) => None,
        }
    }

    /// Literal id, if any.
    pub fn id(&self) -> Option<&str> {
        self.common()
            .id
            .as_ref()
            .and_then(Attribute::as_literal)
            .map(String::as_str)
    }

    /// Depth-first search for the component with literal id `id`.
    pub fn find(&self, id: &str) -> Option<&ComponentSpec> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children()?.iter().find_map(|child| child.find(id))
    }

    /// Store a whitelisted attribute on the matching field.
    ///
    /// On a literal of the wrong type, returns the expected type name. Names that map to no
    /// field are ignored.
    pub(crate) fn set_attr(
        &mut self,
        name: &str,
        value: Attribute<Value>,
    ) -> Result<(), &'static str> {
        let common = self.common_mut();
        match name {
            "id" => {
                common.id = Some(typed(value)?);
                return Ok(());
            }
            "style" => {
                common.style = Some(typed(value)?);
                return Ok(());
            }
            _ => {}
        }
        if let Some(prop) = LayoutProp::from_name(name) {
            common.layout.insert(prop, value);
            return Ok(());
        }
        if let Some(prop) = TransitionProp::from_name(name) {
            common.transition.insert(prop, typed(value)?);
            return Ok(());
        }

        match (self, name) {
            (Self::VStack(s) | Self::HStack(s), "gap") => s.gap = Some(typed(value)?),
            (Self::VStack(s) | Self::HStack(s), "align") => s.align = Some(typed(value)?),
            (Self::VStack(s) | Self::HStack(s), "justify") => s.justify = Some(typed(value)?),
            (Self::Image(i), "src") => i.src = Some(typed(value)?),
            (Self::Image(i), "resize_mode") => i.resize_mode = Some(typed(value)?),
            (Self::Image(i), "image_displacement") => i.image_displacement = Some(value),
            (Self::Image(i), "image_offset") => i.image_offset = Some(value),
            (Self::Text(t), "text") => t.text = Some(typed(value)?),
            _ => tracing::trace!(attr = name, "attribute has no field, ignored"),
        }
        Ok(())
    }
}

fn typed<T: FromValue>(value: Attribute<Value>) -> Result<Attribute<T>, &'static str> {
    Attribute::typed(value).map_err(|_| T::EXPECTED)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/component.rs"]
mod tests;
