//! # Attribute Registry
//!
//! Walks a type's ancestor chain through its [`ParentLink`]s. Each type in the
//! chain is a *level*; the most-derived type sits at depth `0`.

use crate::descriptor::{AttributeDescriptor, TypeDescriptor};
use crate::error::AccessError;
use std::any::Any;
use std::iter::FusedIterator;

/// Iterator over the levels of an ancestor chain, most-derived first.
#[derive(Debug, Clone)]
pub struct Levels {
    next: Option<(usize, &'static TypeDescriptor)>,
}

impl Iterator for Levels {
    type Item = (usize, &'static TypeDescriptor);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, level) = self.next.take()?;
        self.next = level.ancestor().map(|ancestor| (depth + 1, ancestor));
        Some((depth, level))
    }
}

impl FusedIterator for Levels {}

/// Returns the levels of the chain rooted at `leaf`; empty for `None`.
#[must_use]
pub const fn levels(leaf: Option<&'static TypeDescriptor>) -> Levels {
    Levels {
        next: match leaf {
            Some(leaf) => Some((0, leaf)),
            None => None,
        },
    }
}

/// An attribute together with the level that declares it.
#[derive(Debug, Clone, Copy)]
pub struct DeclaredAttribute {
    pub depth: usize,
    pub owner: &'static TypeDescriptor,
    pub attribute: &'static AttributeDescriptor,
}

/// Lazy iterator over every attribute of a chain.
///
/// All attributes of the most-derived type come first, in declaration order,
/// followed by those of each ancestor up to the root.
#[derive(Debug, Clone)]
pub struct AllAttributes {
    levels: Levels,
    current: Option<(usize, &'static TypeDescriptor)>,
    fields: std::slice::Iter<'static, AttributeDescriptor>,
}

impl Iterator for AllAttributes {
    type Item = DeclaredAttribute;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((depth, owner)) = self.current
                && let Some(attribute) = self.fields.next()
            {
                return Some(DeclaredAttribute { depth, owner, attribute });
            }

            // Current level exhausted, move up; stop once the root is done.
            let (depth, owner) = self.levels.next()?;
            self.current = Some((depth, owner));
            self.fields = owner.attributes.iter();
        }
    }
}

impl FusedIterator for AllAttributes {}

/// Returns all attributes declared along the chain rooted at `leaf`.
#[must_use]
pub fn attributes(leaf: Option<&'static TypeDescriptor>) -> AllAttributes {
    AllAttributes { levels: levels(leaf), current: None, fields: std::slice::Iter::default() }
}

/// Reaches the value of the level at `depth` inside `target`.
///
/// # Errors
/// Returns [`AccessError::MissingAncestor`] when the chain is shorter than `depth`,
/// and [`AccessError::TypeMismatch`] when a projection rejects the value.
pub fn project_ref<'t>(
    target: &'t dyn Any,
    leaf: &'static TypeDescriptor,
    depth: usize,
) -> Result<&'t dyn Any, AccessError> {
    let mut current = target;
    let mut level = leaf;
    for _ in 0..depth {
        let link = level
            .parent
            .as_ref()
            .ok_or(AccessError::MissingAncestor { owner: level.name, depth })?;
        current =
            (link.project)(current).ok_or(AccessError::TypeMismatch { expected: level.name })?;
        level = (link.descriptor)();
    }
    Ok(current)
}

/// Mutable counterpart of [`project_ref`].
///
/// # Errors
/// Same as [`project_ref`].
pub fn project_mut<'t>(
    target: &'t mut dyn Any,
    leaf: &'static TypeDescriptor,
    depth: usize,
) -> Result<&'t mut dyn Any, AccessError> {
    let mut current = target;
    let mut level = leaf;
    for _ in 0..depth {
        let link = level
            .parent
            .as_ref()
            .ok_or(AccessError::MissingAncestor { owner: level.name, depth })?;
        current =
            (link.project_mut)(current).ok_or(AccessError::TypeMismatch { expected: level.name })?;
        level = (link.descriptor)();
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ParentLink, Property, no_setters};

    struct Root {
        id: Option<u32>,
    }

    struct Leaf {
        root: Root,
    }

    static ROOT: TypeDescriptor = TypeDescriptor {
        name: "Root",
        attributes: &[
            AttributeDescriptor {
                field: "id",
                type_name: std::any::type_name::<u32>,
                property: Some(Property::new()),
                slot: None,
            },
            AttributeDescriptor {
                field: "note",
                type_name: std::any::type_name::<String>,
                property: None,
                slot: None,
            },
        ],
        setters: no_setters,
        parent: None,
    };

    fn root() -> &'static TypeDescriptor {
        &ROOT
    }

    fn project(target: &dyn Any) -> Option<&dyn Any> {
        target.downcast_ref::<Leaf>().map(|leaf| &leaf.root as &dyn Any)
    }

    fn project_leaf_mut(target: &mut dyn Any) -> Option<&mut dyn Any> {
        target.downcast_mut::<Leaf>().map(|leaf| &mut leaf.root as &mut dyn Any)
    }

    static LEAF: TypeDescriptor = TypeDescriptor {
        name: "Leaf",
        attributes: &[AttributeDescriptor {
            field: "id",
            type_name: std::any::type_name::<u64>,
            property: Some(Property::new().name("leaf-id")),
            slot: None,
        }],
        setters: no_setters,
        parent: Some(ParentLink {
            field: "root",
            descriptor: root,
            project,
            project_mut: project_leaf_mut,
        }),
    };

    #[test]
    fn empty_for_missing_type() {
        assert_eq!(attributes(None).count(), 0);
        assert_eq!(levels(None).count(), 0);
    }

    #[test]
    fn walks_leaf_to_root_in_declaration_order() {
        let seen: Vec<_> =
            attributes(Some(&LEAF)).map(|a| (a.depth, a.owner.name, a.attribute.field)).collect();
        assert_eq!(seen, vec![(0, "Leaf", "id"), (1, "Root", "id"), (1, "Root", "note")]);
    }

    #[test]
    fn fresh_sequences_restart() {
        assert_eq!(attributes(Some(&LEAF)).count(), 3);
        assert_eq!(attributes(Some(&LEAF)).count(), 3);
    }

    #[test]
    fn projects_to_ancestor_value() -> Result<(), AccessError> {
        let mut leaf = Leaf { root: Root { id: Some(7) } };

        let root = project_ref(&leaf, &LEAF, 1)?;
        assert_eq!(root.downcast_ref::<Root>().and_then(|r| r.id), Some(7));

        let root = project_mut(&mut leaf, &LEAF, 1)?;
        if let Some(root) = root.downcast_mut::<Root>() {
            root.id = None;
        }
        assert_eq!(leaf.root.id, None);
        Ok(())
    }

    #[test]
    fn projection_failures_are_reported() {
        let leaf = Leaf { root: Root { id: None } };
        assert!(matches!(
            project_ref(&leaf, &LEAF, 2),
            Err(AccessError::MissingAncestor { owner: "Root", depth: 2 })
        ));
        assert!(matches!(
            project_ref(&leaf.root, &LEAF, 1),
            Err(AccessError::TypeMismatch { expected: "Leaf" })
        ));
    }
}
