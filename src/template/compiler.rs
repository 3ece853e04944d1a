use std::collections::HashMap;
use std::rc::Rc;

use crate::foundation::value::Value;
use crate::scene::attribute::{Attribute, FromValue};
use crate::scene::component::{ComponentKind, ComponentSpec, ContainerSpec};
use crate::scene::phase::{
    CustomEffectSpec, DEFAULT_TYPING_DURATION, EffectSpec, OverrideSpec, PhaseSpec,
    TransitionSpec, TypingEffect,
};
use crate::scene::props::{EFFECT_ATTRS, PHASE_ATTRS, TRANSITION_ATTRS, TransitionProp};
use crate::template::CompiledTemplate;
use crate::template::ast::{Block, Conditional, Mixin, Node, Tag};
use crate::template::attrs::{AttrMap, extract};
use crate::template::error::{CompileError, CompileErrorKind};

/// Compile `ast` into a component tree and its phases.
pub fn compile(ast: &Block) -> Result<CompiledTemplate, CompileError> {
    Compiler::new().compile(ast)
}

/// Structural compiler for one template.
///
/// Owns the mixin table for the duration of a single compile; nothing is shared between
/// compilers, so independent compiles may run concurrently.
#[derive(Debug, Default)]
pub struct Compiler {
    mixins: HashMap<String, Rc<Block>>,
    expanding: Vec<String>,
    phases: Vec<PhaseSpec>,
}

impl Compiler {
    /// Fresh compiler with an empty mixin table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `ast` and produce the root ZStack plus the declared phases.
    ///
    /// Fails on the first structural error; nothing is returned for a partially compiled tree.
    #[tracing::instrument(skip_all, fields(nodes = ast.nodes.len()))]
    pub fn compile(mut self, ast: &Block) -> Result<CompiledTemplate, CompileError> {
        let children = self.block(ast)?;
        let root = ComponentSpec::ZStack(ContainerSpec {
            children,
            ..ContainerSpec::default()
        });

        let mut phases = self.phases;
        if phases.is_empty() {
            tracing::debug!("no phases declared, using `main`");
            phases.push(PhaseSpec::main());
        }
        Ok(CompiledTemplate { root, phases })
    }

    fn block(&mut self, block: &Block) -> Result<Vec<ComponentSpec>, CompileError> {
        for node in &block.nodes {
            if let Node::Mixin(mixin) = node
                && !mixin.call
            {
                self.declare(mixin);
            }
        }

        let mut out = Vec::new();
        for node in &block.nodes {
            self.node(node, &mut out)?;
        }
        Ok(out)
    }

    fn node(&mut self, node: &Node, out: &mut Vec<ComponentSpec>) -> Result<(), CompileError> {
        match node {
            Node::Block(block) => out.extend(self.block(block)?),
            Node::Tag(tag) => {
                if let Some(component) = self.tag(tag)? {
                    out.push(component);
                }
            }
            Node::Mixin(mixin) if mixin.call => out.extend(self.call(mixin)?),
            // Declarations were hoisted by the enclosing block.
            Node::Mixin(_) => {}
            Node::Conditional(cond) => self.conditional(cond, out)?,
            Node::Text(_) | Node::Comment(_) => {}
            Node::Unsupported { kind, line } => {
                return Err(CompileError::new(
                    CompileErrorKind::UnknownNodeKind(kind.clone()),
                    *line,
                ));
            }
        }
        Ok(())
    }

    fn declare(&mut self, mixin: &Mixin) {
        let body = mixin.block.clone().unwrap_or_default();
        if self
            .mixins
            .insert(mixin.name.clone(), Rc::new(body))
            .is_some()
        {
            tracing::debug!(mixin = %mixin.name, line = mixin.line, "mixin redeclared");
        }
    }

    fn call(&mut self, mixin: &Mixin) -> Result<Vec<ComponentSpec>, CompileError> {
        let Some(body) = self.mixins.get(&mixin.name).cloned() else {
            return Err(CompileError::new(
                CompileErrorKind::UnknownMixin(mixin.name.clone()),
                mixin.line,
            ));
        };
        if self.expanding.contains(&mixin.name) {
            return Err(CompileError::new(
                CompileErrorKind::RecursiveMixin(mixin.name.clone()),
                mixin.line,
            ));
        }
        if let Some(args) = mixin.args.as_deref()
            && !args.trim().is_empty()
        {
            tracing::warn!(
                mixin = %mixin.name,
                line = mixin.line,
                args,
                "mixin arguments are not supported and were ignored"
            );
        }

        self.expanding.push(mixin.name.clone());
        let out = self.block(&body);
        self.expanding.pop();
        out
    }

    fn conditional(
        &mut self,
        cond: &Conditional,
        out: &mut Vec<ComponentSpec>,
    ) -> Result<(), CompileError> {
        for child in self.block(&cond.consequent)? {
            out.push(with_cond(child, &cond.test));
        }

        if let Some(alternate) = &cond.alternate {
            let negated = format!("!({})", cond.test);
            let mut branch = Vec::new();
            self.node(alternate, &mut branch)?;
            out.extend(branch.into_iter().map(|child| with_cond(child, &negated)));
        }
        Ok(())
    }

    fn tag(&mut self, tag: &Tag) -> Result<Option<ComponentSpec>, CompileError> {
        if tag.name == "phase" {
            let phase = self.phase(tag)?;
            self.phases.push(phase);
            return Ok(None);
        }

        let Some(kind) = ComponentKind::from_tag(&tag.name) else {
            return Err(CompileError::new(
                CompileErrorKind::UnknownComponentKind(tag.name.clone()),
                tag.line,
            ));
        };

        let mut component = ComponentSpec::new(kind);
        for (name, value) in extract(tag, |name| kind.allows_attr(name))? {
            if name == "children" {
                continue;
            }
            component
                .set_attr(&name, value)
                .map_err(|expected| CompileError::invalid(&tag.name, &name, expected, tag.line))?;
        }
        component.common_mut().line = Some(tag.line);

        if kind.is_container() {
            let children = self.block(&tag.block)?;
            if let Some(slot) = component.children_mut() {
                *slot = children;
            }
        }
        Ok(Some(component))
    }

    fn phase(&mut self, tag: &Tag) -> Result<PhaseSpec, CompileError> {
        let attrs = extract(tag, |name| PHASE_ATTRS.contains(&name))?;
        let name = literal_string(tag, &attrs, "name")?;
        if name.is_empty() {
            return Err(CompileError::invalid(
                &tag.name,
                "name",
                "a non-empty string",
                tag.line,
            ));
        }

        let mut effects = Vec::new();
        for node in &tag.block.nodes {
            let effect = match node {
                Node::Comment(_) => continue,
                Node::Tag(effect) => match effect.name.as_str() {
                    "transition" => transition(effect)?,
                    "override" => override_effect(effect)?,
                    "effect" => custom_effect(effect)?,
                    other => {
                        return Err(CompileError::new(
                            CompileErrorKind::InvalidPhaseBody(format!(
                                "`{other}` is not allowed in phase `{name}`"
                            )),
                            effect.line,
                        ));
                    }
                },
                other => {
                    return Err(CompileError::new(
                        CompileErrorKind::InvalidPhaseBody(format!(
                            "{} node is not allowed in phase `{name}`",
                            other.kind_name()
                        )),
                        other.line(),
                    ));
                }
            };
            effects.push(effect);
        }

        if effects.is_empty() {
            return Err(CompileError::new(
                CompileErrorKind::InvalidPhaseBody(format!("phase `{name}` declares no effects")),
                tag.line,
            ));
        }

        tracing::debug!(phase = %name, effects = effects.len(), "compiled phase");
        Ok(PhaseSpec {
            name,
            effects,
            line: Some(tag.line),
        })
    }
}

/// Attach `test` to a branch component, conjoined with any condition it already carries.
fn with_cond(mut component: ComponentSpec, test: &str) -> ComponentSpec {
    let common = component.common_mut();
    common.cond = Some(match common.cond.take() {
        Some(inner) => format!("({test}) && ({inner})"),
        None => test.to_owned(),
    });
    component
}

fn literal_string(tag: &Tag, attrs: &AttrMap, name: &str) -> Result<String, CompileError> {
    match attrs.get(name) {
        None => Err(CompileError::missing(&tag.name, name, tag.line)),
        Some(Attribute::Literal(Value::String(s))) => Ok(s.clone()),
        Some(_) => Err(CompileError::invalid(
            &tag.name,
            name,
            "a string literal",
            tag.line,
        )),
    }
}

fn optional<T: FromValue>(
    tag: &Tag,
    attrs: &AttrMap,
    name: &str,
) -> Result<Option<Attribute<T>>, CompileError> {
    attrs
        .get(name)
        .cloned()
        .map(|raw| {
            Attribute::typed(raw).map_err(|msg| CompileError::invalid(&tag.name, name, msg, tag.line))
        })
        .transpose()
}

fn transition(tag: &Tag) -> Result<EffectSpec, CompileError> {
    let attrs = extract(tag, |name| TRANSITION_ATTRS.contains(&name))?;
    let component = literal_string(tag, &attrs, "component")?;

    let duration = optional::<f64>(tag, &attrs, "duration")?;
    if duration
        .as_ref()
        .and_then(Attribute::as_literal)
        .is_some_and(|d| d.is_nan() || *d <= 0.0)
    {
        return Err(CompileError::invalid(
            &tag.name,
            "duration",
            "a positive number",
            tag.line,
        ));
    }

    Ok(EffectSpec::Transition(TransitionSpec {
        component,
        duration,
        easing: optional(tag, &attrs, "easing")?,
        from: optional(tag, &attrs, "from")?,
        to: optional(tag, &attrs, "to")?,
    }))
}

fn override_effect(tag: &Tag) -> Result<EffectSpec, CompileError> {
    let attrs = extract(tag, |name| {
        name == "component" || TransitionProp::from_name(name).is_some()
    })?;
    let component = literal_string(tag, &attrs, "component")?;

    let mut values = std::collections::BTreeMap::new();
    for (name, raw) in &attrs {
        let Some(prop) = TransitionProp::from_name(name) else {
            continue;
        };
        let value = Attribute::<f64>::typed(raw.clone())
            .map_err(|msg| CompileError::invalid(&tag.name, name, msg, tag.line))?;
        values.insert(prop, value);
    }

    Ok(EffectSpec::Override(OverrideSpec { component, values }))
}

fn custom_effect(tag: &Tag) -> Result<EffectSpec, CompileError> {
    let attrs = extract(tag, |name| EFFECT_ATTRS.contains(&name))?;
    let name = literal_string(tag, &attrs, "name")?;
    let component = literal_string(tag, &attrs, "component")?;

    match name.as_str() {
        "typing" => {
            let duration = match attrs.get("duration") {
                None => DEFAULT_TYPING_DURATION,
                Some(Attribute::Literal(Value::Number(d))) if *d > 0.0 => *d,
                Some(_) => {
                    return Err(CompileError::invalid(
                        &tag.name,
                        "duration",
                        "a positive number literal",
                        tag.line,
                    ));
                }
            };
            Ok(EffectSpec::Effect(CustomEffectSpec::Typing(TypingEffect {
                component,
                duration,
            })))
        }
        _ => Err(CompileError::new(
            CompileErrorKind::UnknownEffect(name),
            tag.line,
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/compiler.rs"]
mod tests;
