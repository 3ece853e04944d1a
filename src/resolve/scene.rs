use crate::expression::ExpressionError;
use crate::resolve::{Resolve, Resolver};
use crate::scene::attribute::Attribute;
use crate::scene::component::{
    CommonProps, ComponentSpec, ContainerSpec, ImageSpec, RectangleSpec, StackSpec, TextSpec,
};
use crate::scene::phase::{CustomEffectSpec, EffectSpec, OverrideSpec, PhaseSpec, TransitionSpec};

impl Resolve for CommonProps {
    /// The owning component consumes `cond`; resolved output never carries one.
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(Self {
            id: self.id.resolve_fields(r)?,
            style: self.style.resolve_fields(r)?,
            cond: None,
            layout: self.layout.resolve_fields(r)?,
            transition: self.transition.resolve_fields(r)?,
            line: self.line,
        })
    }
}

impl Resolve for ContainerSpec {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(Self {
            common: self.common.resolve_fields(r)?,
            children: self.children.resolve_fields(r)?,
        })
    }
}

impl Resolve for StackSpec {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(Self {
            common: self.common.resolve_fields(r)?,
            gap: self.gap.resolve_fields(r)?,
            align: self.align.resolve_fields(r)?,
            justify: self.justify.resolve_fields(r)?,
            children: self.children.resolve_fields(r)?,
        })
    }
}

impl Resolve for ImageSpec {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(Self {
            common: self.common.resolve_fields(r)?,
            src: self.src.resolve_fields(r)?,
            resize_mode: self.resize_mode.resolve_fields(r)?,
            image_displacement: self.image_displacement.resolve_fields(r)?,
            image_offset: self.image_offset.resolve_fields(r)?,
            children: self.children.resolve_fields(r)?,
        })
    }
}

impl Resolve for TextSpec {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(Self {
            common: self.common.resolve_fields(r)?,
            text: self.text.resolve_fields(r)?,
        })
    }
}

impl Resolve for RectangleSpec {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(Self {
            common: self.common.resolve_fields(r)?,
        })
    }
}

impl Resolve for ComponentSpec {
    fn condition(&self) -> Option<&str> {
        self.common().cond.as_deref()
    }

    fn source_line(&self) -> Option<u32> {
        self.common().line
    }

    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(match self {
            Self::ZStack(c) => Self::ZStack(c.resolve_fields(r)?),
            Self::VStack(c) => Self::VStack(c.resolve_fields(r)?),
            Self::HStack(c) => Self::HStack(c.resolve_fields(r)?),
            Self::Image(c) => Self::Image(c.resolve_fields(r)?),
            Self::Text(c) => Self::Text(c.resolve_fields(r)?),
            Self::Rectangle(c) => Self::Rectangle(c.resolve_fields(r)?),
        })
    }
}

impl Resolve for PhaseSpec {
    fn source_line(&self) -> Option<u32> {
        self.line
    }

    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(Self {
            name: self.name.clone(),
            effects: self.effects.resolve_fields(r)?,
            line: self.line,
        })
    }
}

impl Resolve for EffectSpec {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        Ok(match self {
            Self::Transition(t) => Self::Transition(t.resolve_fields(r)?),
            Self::Override(o) => Self::Override(OverrideSpec {
                component: o.component.clone(),
                values: o.values.resolve_fields(r)?,
            }),
            Self::Effect(CustomEffectSpec::Typing(t)) => {
                Self::Effect(CustomEffectSpec::Typing(t.clone()))
            }
        })
    }
}

impl Resolve for TransitionSpec {
    fn resolve_fields(&self, r: &mut Resolver<'_>) -> Result<Self, ExpressionError> {
        let duration = self.duration.resolve_fields(r)?;
        if let (Some(Attribute::Dynamic(src)), Some(Attribute::Literal(d))) =
            (&self.duration, &duration)
            && (d.is_nan() || *d <= 0.0)
        {
            return Err(r.type_error(src, format!("transition duration must be positive, got {d}")));
        }

        Ok(Self {
            component: self.component.clone(),
            duration,
            easing: self.easing.resolve_fields(r)?,
            from: self.from.resolve_fields(r)?,
            to: self.to.resolve_fields(r)?,
        })
    }
}
