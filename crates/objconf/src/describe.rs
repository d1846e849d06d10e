//! Property listings built from descriptor tables.

use crate::descriptor::Configurable;
use crate::registry;
use fxhash::FxHashSet;
use serde::Serialize;

/// The member a property is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PropertyKind {
    /// Set through a setter operation.
    #[serde(rename_all = "camelCase")]
    Setter { method: &'static str, is_setter: bool },
    /// Assigned to a data member.
    #[serde(rename_all = "camelCase")]
    Field { field: &'static str, type_name: &'static str },
}

/// One configurable property of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyInfo {
    pub name: String,
    /// The type in the ancestor chain declaring the property.
    pub owner: &'static str,
    #[serde(flatten)]
    pub kind: PropertyKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    /// `true` when an entry earlier in resolution order claims the same name.
    pub shadowed: bool,
}

/// Lists the properties of `T` in resolution order: setter operations of every
/// level first, then attributes carrying property metadata.
///
/// ```rust
/// use objconf::Configurable;
///
/// #[derive(Configurable)]
/// struct Pool {
///     /// Upper bound of open connections.
///     #[property(name = "max-size", default = "16", description = "pool capacity")]
///     max_size: Option<usize>,
/// }
///
/// let info = objconf::describe::<Pool>();
/// assert_eq!(info[0].name, "max-size");
/// assert_eq!(info[0].default_value, Some("16"));
/// ```
#[must_use]
pub fn describe<T: Configurable>() -> Vec<PropertyInfo> {
    let leaf = T::descriptor();
    let mut seen = FxHashSet::default();
    let mut properties = Vec::new();

    for (_, level) in registry::levels(Some(leaf)) {
        for setter in level.setters() {
            let name = setter.property_name().into_owned();
            properties.push(PropertyInfo {
                shadowed: !seen.insert(name.clone()),
                name,
                owner: level.name,
                kind: PropertyKind::Setter {
                    method: setter.method,
                    is_setter: setter.setter().is_some(),
                },
                required: false,
                default_value: None,
                description: None,
            });
        }
    }

    for declared in registry::attributes(Some(leaf)) {
        let (Some(property), Some(name)) =
            (declared.attribute.property.as_ref(), declared.attribute.property_name())
        else {
            continue;
        };
        properties.push(PropertyInfo {
            name: name.to_owned(),
            owner: declared.owner.name,
            kind: PropertyKind::Field {
                field: declared.attribute.field,
                type_name: (declared.attribute.type_name)(),
            },
            required: property.required,
            default_value: property.declared_default(),
            description: property.description,
            shadowed: !seen.insert(name.to_owned()),
        });
    }

    properties
}
