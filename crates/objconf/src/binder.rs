//! # Property Binder
//!
//! Resolves a property name to a single [`PropertyBinding`]. Setter operations
//! are looked up first across the whole ancestor chain; attributes are only
//! considered when no operation claims the name. Within each pass the first
//! match walking from the most-derived type to the root wins.

use crate::descriptor::{AttributeDescriptor, Configurable, SetterDescriptor, TypeDescriptor};
use crate::error::{AccessError, BoxError, ConfigurationError, SlotError};
use crate::registry;
use std::any::Any;
use std::borrow::Cow;
use tracing::trace;

/// What a property name resolved to, independent of any target value.
#[derive(Debug, Clone, Copy)]
pub enum Resolution {
    /// A setter operation declared at `depth`.
    Operation { depth: usize, setter: &'static SetterDescriptor },
    /// An attribute declared at `depth`.
    Attribute { depth: usize, attribute: &'static AttributeDescriptor },
}

impl Resolution {
    /// Depth of the level declaring the resolved member.
    #[must_use]
    pub const fn depth(&self) -> usize {
        match self {
            Self::Operation { depth, .. } | Self::Attribute { depth, .. } => *depth,
        }
    }
}

/// Resolves `name` against the chain rooted at `leaf`.
#[must_use]
pub fn resolve(leaf: &'static TypeDescriptor, name: &str) -> Option<Resolution> {
    resolve_operation(leaf, name).or_else(|| resolve_attribute(leaf, name))
}

fn resolve_operation(leaf: &'static TypeDescriptor, name: &str) -> Option<Resolution> {
    registry::levels(Some(leaf)).find_map(|(depth, level)| {
        level
            .setters()
            .iter()
            .find(|setter| setter.property_name() == name)
            .map(|setter| Resolution::Operation { depth, setter })
    })
}

fn resolve_attribute(leaf: &'static TypeDescriptor, name: &str) -> Option<Resolution> {
    registry::attributes(Some(leaf))
        .find(|declared| declared.attribute.property_name() == Some(name))
        .map(|declared| Resolution::Attribute {
            depth: declared.depth,
            attribute: declared.attribute,
        })
}

/// Binds `name` on `target`, or returns `None` if nothing declares it.
pub fn bind<'t, T: Configurable>(target: &'t mut T, name: &'t str) -> Option<PropertyBinding<'t>> {
    let leaf = T::descriptor();
    resolve(leaf, name).map(|resolution| PropertyBinding {
        target,
        leaf,
        property: Cow::Borrowed(name),
        resolution,
    })
}

/// A resolved property, ready to receive exactly one value.
#[derive(Debug)]
pub struct PropertyBinding<'t> {
    target: &'t mut dyn Any,
    leaf: &'static TypeDescriptor,
    property: Cow<'t, str>,
    resolution: Resolution,
}

impl PropertyBinding<'_> {
    /// Returns the property name the binding was created for.
    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[must_use]
    pub const fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Applies `value` through the bound operation or attribute.
    ///
    /// # Errors
    /// * [`ConfigurationError::NotASetter`] if the operation lacks a setter shape.
    /// * [`ConfigurationError::Setter`] if the operation fails.
    /// * [`ConfigurationError::Coercion`] if `value` cannot become the attribute's type.
    /// * [`ConfigurationError::Assignment`] if the attribute cannot be reached or stored.
    pub fn assign(self, value: &str) -> Result<(), ConfigurationError> {
        match self.resolution {
            Resolution::Operation { depth, setter } => {
                trace!("setting method property {} to {value}", self.property);
                let property = self.property.into_owned();
                let Some(invoke) = setter.setter() else {
                    return Err(ConfigurationError::NotASetter {
                        property: property.into(),
                        method: setter.method,
                    });
                };
                let failed = |source: BoxError| ConfigurationError::Setter {
                    property: property.clone().into(),
                    value: value.to_owned(),
                    method: setter.method,
                    source,
                };

                let level = registry::project_mut(self.target, self.leaf, depth)
                    .map_err(|e| failed(e.into()))?;
                invoke(level, value).map_err(failed)
            },
            Resolution::Attribute { depth, attribute } => {
                trace!("setting field property {} to {value}", self.property);
                let property = self.property.into_owned();
                assign_attribute(self.target, self.leaf, depth, attribute, property, value)
            },
        }
    }
}

/// Coerces `value` and stores it in `attribute` of the level at `depth`.
pub(crate) fn assign_attribute(
    target: &mut dyn Any,
    leaf: &'static TypeDescriptor,
    depth: usize,
    attribute: &'static AttributeDescriptor,
    property: String,
    value: &str,
) -> Result<(), ConfigurationError> {
    let assignment = |source: AccessError| ConfigurationError::Assignment {
        field: attribute.field,
        property: property.clone().into(),
        value: value.to_owned(),
        source,
    };

    let slot =
        attribute.slot.ok_or(AccessError::Unbound { field: attribute.field }).map_err(assignment)?;
    let level = registry::project_mut(target, leaf, depth).map_err(assignment)?;

    match (slot.assign)(level, value) {
        Ok(()) => Ok(()),
        Err(SlotError::Coercion(source)) => Err(ConfigurationError::Coercion {
            property: property.into(),
            type_name: (attribute.type_name)(),
            value: value.to_owned(),
            source,
        }),
        Err(SlotError::Access(source)) => Err(assignment(source)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{AttributeSlot, Property, Signature, no_setters};
    use crate::slot::{downcast_mut, downcast_ref};

    #[derive(Default)]
    struct Probe {
        level: Option<u8>,
        calls: Vec<String>,
    }

    fn is_set(target: &dyn Any) -> Result<bool, AccessError> {
        Ok(downcast_ref::<Probe>(target)?.level.is_some())
    }

    fn assign(target: &mut dyn Any, raw: &str) -> Result<(), SlotError> {
        let value = crate::coerce::coerce::<u8>(raw)?;
        downcast_mut::<Probe>(target)?.level = Some(value);
        Ok(())
    }

    fn record(target: &mut dyn Any, raw: &str) -> Result<(), BoxError> {
        downcast_mut::<Probe>(target)?.calls.push(raw.to_owned());
        Ok(())
    }

    fn setters() -> &'static [SetterDescriptor] {
        static SETTERS: [SetterDescriptor; 1] = [SetterDescriptor {
            method: "set_trace",
            name: None,
            signature: Signature::SETTER,
            invoke: Some(record),
        }];
        &SETTERS
    }

    static PROBE: TypeDescriptor = TypeDescriptor {
        name: "Probe",
        attributes: &[
            AttributeDescriptor {
                field: "level",
                type_name: std::any::type_name::<u8>,
                property: Some(Property::new()),
                slot: Some(AttributeSlot { is_set, assign }),
            },
            AttributeDescriptor {
                field: "trace",
                type_name: std::any::type_name::<u8>,
                property: Some(Property::new()),
                slot: None,
            },
        ],
        setters,
        parent: None,
    };

    static BARE: TypeDescriptor =
        TypeDescriptor { name: "Bare", attributes: &[], setters: no_setters, parent: None };

    #[test]
    fn operations_shadow_attributes() {
        assert!(matches!(
            resolve(&PROBE, "trace"),
            Some(Resolution::Operation { depth: 0, setter }) if setter.method == "set_trace"
        ));
        assert!(matches!(
            resolve(&PROBE, "level"),
            Some(Resolution::Attribute { depth: 0, attribute }) if attribute.field == "level"
        ));
        assert!(resolve(&PROBE, "missing").is_none());
        assert!(resolve(&BARE, "level").is_none());
    }

    #[test]
    fn attribute_binding_coerces_and_stores() -> Result<(), ConfigurationError> {
        let mut probe = Probe::default();
        let binding = PropertyBinding {
            target: &mut probe,
            leaf: &PROBE,
            property: Cow::Borrowed("level"),
            resolution: Resolution::Attribute { depth: 0, attribute: &PROBE.attributes[0] },
        };
        binding.assign("9")?;
        assert_eq!(probe.level, Some(9));
        Ok(())
    }

    #[test]
    fn coercion_failure_keeps_previous_value() {
        let mut probe = Probe { level: Some(1), ..Probe::default() };
        let binding = PropertyBinding {
            target: &mut probe,
            leaf: &PROBE,
            property: Cow::Borrowed("level"),
            resolution: Resolution::Attribute { depth: 0, attribute: &PROBE.attributes[0] },
        };
        let err = binding.assign("300").err();
        assert!(matches!(err, Some(ConfigurationError::Coercion { type_name: "u8", .. })));
        assert_eq!(probe.level, Some(1));
    }

    #[test]
    fn unbound_attribute_is_an_assignment_fault() {
        let mut probe = Probe::default();
        let binding = PropertyBinding {
            target: &mut probe,
            leaf: &PROBE,
            property: Cow::Borrowed("trace"),
            resolution: Resolution::Attribute { depth: 0, attribute: &PROBE.attributes[1] },
        };
        assert!(matches!(
            binding.assign("1"),
            Err(ConfigurationError::Assignment {
                field: "trace",
                source: AccessError::Unbound { .. },
                ..
            })
        ));
    }

    #[test]
    fn operation_binding_invokes_setter() -> Result<(), ConfigurationError> {
        let mut probe = Probe::default();
        let binding = PropertyBinding {
            target: &mut probe,
            leaf: &PROBE,
            property: Cow::Borrowed("trace"),
            resolution: Resolution::Operation { depth: 0, setter: &setters()[0] },
        };
        binding.assign("on")?;
        assert_eq!(probe.calls, vec!["on".to_owned()]);
        Ok(())
    }
}
