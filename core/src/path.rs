//! References to attributes, possibly across relationships.
//!
//! `Child.mom.name` is an [`Attr`] rooted at `Child` with one hop over `mom`;
//! `Child.mom` alone is a [`Rel`]. Both remember the schema they start from so
//! a query can reject references that do not belong to it.

use compact_str::CompactString;
use smallvec::SmallVec;
use soql_types::ScalarKind;

use crate::attribute::AttributeType;
use crate::error::{Result, SoqlError};
use crate::registry::SchemaRef;
use crate::schema::HasAttributes;
use crate::soql::{Soql, ToSoql};

/// One relationship traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    field: CompactString,
    external_name: CompactString,
    many: bool,
}

impl Hop {
    fn new(field: &str, attr: &AttributeType) -> Self {
        Self {
            field: field.into(),
            external_name: attr.external_name().into(),
            many: attr.is_many(),
        }
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[inline]
    pub fn external_name(&self) -> &str {
        &self.external_name
    }

    #[inline]
    pub const fn is_many(&self) -> bool {
        self.many
    }
}

type Hops = SmallVec<[Hop; 2]>;

/// Reference to a scalar attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    root: SchemaRef,
    hops: Hops,
    owner: SchemaRef,
    field: CompactString,
    attribute: AttributeType,
    kind: ScalarKind,
}

impl Attr {
    pub(crate) fn direct(schema: &SchemaRef, field: &str) -> Result<Self> {
        Self::through(schema.clone(), Hops::new(), schema.clone(), field)
    }

    fn through(root: SchemaRef, hops: Hops, owner: SchemaRef, field: &str) -> Result<Self> {
        let attribute = owner.attribute(field)?.clone();
        let Some(kind) = attribute.scalar_kind() else {
            return Err(SoqlError::InvalidColumn {
                schema: owner.name().into(),
                attribute: field.into(),
                reason: "relationships cannot be used as columns",
            });
        };
        Ok(Self {
            root,
            hops,
            owner,
            field: field.into(),
            attribute,
            kind,
        })
    }

    /// Schema the reference starts from.
    #[inline]
    pub fn root(&self) -> &SchemaRef {
        &self.root
    }

    /// Schema that declares the attribute.
    #[inline]
    pub fn owner(&self) -> &SchemaRef {
        &self.owner
    }

    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    #[inline]
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    #[inline]
    pub fn attribute(&self) -> &AttributeType {
        &self.attribute
    }

    #[inline]
    pub const fn kind(&self) -> ScalarKind {
        self.kind
    }

    #[inline]
    pub fn external_name(&self) -> &str {
        self.attribute.external_name()
    }

    /// Declared directly on the root, no relationship in between.
    #[inline]
    pub fn is_direct(&self) -> bool {
        self.hops.is_empty()
    }

    /// Traverses at least one one-to-many relationship.
    pub fn crosses_many(&self) -> bool {
        self.hops.iter().any(Hop::is_many)
    }

    /// `Root.Hop.Field` segments as rendered in a statement.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        core::iter::once(self.root.object_name())
            .chain(self.hops.iter().map(Hop::external_name))
            .chain(core::iter::once(self.external_name()))
    }

    /// Dotted field-name path from the root, for error messages.
    pub(crate) fn field_path(&self) -> CompactString {
        let mut path = CompactString::default();
        for hop in &self.hops {
            path.push_str(&hop.field);
            path.push('.');
        }
        path.push_str(&self.field);
        path
    }
}

impl ToSoql for Attr {
    fn to_fragment(&self) -> Soql<'_> {
        Soql::path(self.segments())
    }
}

impl core::fmt::Display for Attr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.to_fragment().write_to(f)
    }
}

/// Reference to a relationship path ending in `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rel {
    root: SchemaRef,
    hops: Hops,
    target: SchemaRef,
}

impl Rel {
    pub(crate) fn direct(schema: &SchemaRef, field: &str) -> Result<Self> {
        Self::start(schema.clone(), Hops::new(), schema, field)
    }

    fn start(root: SchemaRef, mut hops: Hops, from: &SchemaRef, field: &str) -> Result<Self> {
        let attr = from.attribute(field)?;
        if !attr.is_relationship() {
            return Err(SoqlError::InvalidJoin {
                schema: from.name().into(),
                attribute: field.into(),
                reason: "not a relationship",
            });
        }
        let target = from.related(field)?;
        hops.push(Hop::new(field, attr));
        Ok(Self { root, hops, target })
    }

    /// Scalar attribute of the target schema, reached through this path.
    pub fn attr(&self, field: &str) -> Result<Attr> {
        Attr::through(
            self.root.clone(),
            self.hops.clone(),
            self.target.clone(),
            field,
        )
    }

    /// Extend the path over another relationship of the target schema.
    pub fn rel(&self, field: &str) -> Result<Rel> {
        Self::start(self.root.clone(), self.hops.clone(), &self.target, field)
    }

    #[inline]
    pub fn root(&self) -> &SchemaRef {
        &self.root
    }

    /// Schema at the end of the path.
    #[inline]
    pub fn target(&self) -> &SchemaRef {
        &self.target
    }

    /// Every traversal, root first. Never empty.
    #[inline]
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// The final traversal.
    pub fn last(&self) -> &Hop {
        // Constructors always push one hop.
        &self.hops[self.hops.len() - 1]
    }

    #[inline]
    pub fn is_many(&self) -> bool {
        self.last().is_many()
    }

    /// `Root.Hop.Hop` segments as rendered in a statement.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        core::iter::once(self.root.object_name()).chain(self.hops.iter().map(Hop::external_name))
    }
}

impl ToSoql for Rel {
    fn to_fragment(&self) -> Soql<'_> {
        Soql::path(self.segments())
    }
}

#[cfg(test)]
mod tests {
    use crate::{AttributeType, ModelSchema, Registry};

    use super::*;

    fn registry() -> Registry {
        Registry::builder()
            .model(
                ModelSchema::new("Grandparent").attribute("id", AttributeType::integer("Id")),
            )
            .model(
                ModelSchema::new("Parent")
                    .attribute("id", AttributeType::integer("Id"))
                    .attribute("name", AttributeType::string("Name"))
                    .attribute("mom", AttributeType::relationship("Mom", "Grandparent")),
            )
            .model(
                ModelSchema::new("Child")
                    .attribute("id", AttributeType::integer("Id"))
                    .attribute("mom", AttributeType::relationship("Mom", "Parent"))
                    .attribute("teacher", AttributeType::relationship("Teacher", "Teacher")),
            )
            .model(
                ModelSchema::new("Teacher")
                    .attribute("id", AttributeType::integer("Id"))
                    .attribute("students", AttributeType::many("Students", "Child")),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_direct_attr() {
        let child = registry().schema("Child").unwrap();
        let id = child.attr("id").unwrap();
        assert!(id.is_direct());
        assert_eq!(id.kind(), ScalarKind::Integer);
        assert_eq!(id.to_soql(), "Child.Id");
    }

    #[test]
    fn test_attr_through_relationships() {
        let child = registry().schema("Child").unwrap();
        let name = child.rel("mom").unwrap().attr("name").unwrap();
        assert_eq!(name.to_soql(), "Child.Mom.Name");
        assert_eq!(name.owner().name(), "Parent");
        assert_eq!(name.root(), &child);
        assert!(!name.crosses_many());

        let grandma = child.rel("mom").unwrap().rel("mom").unwrap().attr("id").unwrap();
        assert_eq!(grandma.to_soql(), "Child.Mom.Mom.Id");
        assert_eq!(grandma.field_path(), "mom.mom.id");

        let classmate = child
            .rel("teacher")
            .unwrap()
            .rel("students")
            .unwrap()
            .attr("id")
            .unwrap();
        assert!(classmate.crosses_many());
    }

    #[test]
    fn test_wrong_reference_kind() {
        let child = registry().schema("Child").unwrap();
        assert!(matches!(
            child.attr("mom"),
            Err(SoqlError::InvalidColumn { .. })
        ));
        assert!(matches!(
            child.rel("id"),
            Err(SoqlError::InvalidJoin { .. })
        ));
        assert!(matches!(
            child.attr("height"),
            Err(SoqlError::UnknownAttribute { .. })
        ));
    }

    #[test]
    fn test_rel_path() {
        let teacher = registry().schema("Teacher").unwrap();
        let students = teacher.rel("students").unwrap();
        assert!(students.is_many());
        assert_eq!(students.target().name(), "Child");
        assert_eq!(students.to_soql(), "Teacher.Students");
    }
}
