//! Explicit schema registration.

use std::ops::Deref;
use std::sync::Arc;

use compact_str::CompactString;
use hashbrown::HashMap;

use crate::attribute::AttributeType;
use crate::error::{Result, SoqlError};
use crate::path::{Attr, Rel};
use crate::schema::{HasAttributes, ModelSchema, ModelSchemaBuilder};

/// An immutable collection of model schemas.
///
/// Relationships name their target model, so schemas may reference each
/// other in any order (including cycles) as long as every target is part of
/// the same registry. Cloning is a reference count bump.
///
/// ```
/// use soql_core::{AttributeType, HasAttributes, ModelSchema, Registry};
///
/// let registry = Registry::builder()
///     .model(
///         ModelSchema::new("Account")
///             .attribute("id", AttributeType::string("Id"))
///             .attribute("contacts", AttributeType::many("Contacts", "User")),
///     )
///     .model(
///         ModelSchema::new("User")
///             .attribute("id", AttributeType::string("Id"))
///             .attribute("email", AttributeType::string("Email")),
///     )
///     .build()
///     .unwrap();
///
/// let account = registry.schema("Account").unwrap();
/// assert_eq!(account.related("contacts").unwrap().name(), "User");
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

#[derive(Debug)]
struct RegistryInner {
    schemas: Vec<ModelSchema>,
    by_name: HashMap<CompactString, usize>,
    by_object_name: HashMap<CompactString, usize>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder { models: Vec::new() }
    }

    /// Schema registered under the model name `name`.
    pub fn schema(&self, name: &str) -> Result<SchemaRef> {
        self.inner
            .by_name
            .get(name)
            .map(|&index| self.handle(index))
            .ok_or_else(|| SoqlError::UnknownModel(name.into()))
    }

    /// Schema whose external object name is `object_name`.
    pub fn by_object_name(&self, object_name: &str) -> Result<SchemaRef> {
        self.inner
            .by_object_name
            .get(object_name)
            .map(|&index| self.handle(index))
            .ok_or_else(|| SoqlError::UnknownModel(object_name.into()))
    }

    /// All schemas in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = SchemaRef> + '_ {
        (0..self.inner.schemas.len()).map(|index| self.handle(index))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.schemas.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.schemas.is_empty()
    }

    #[inline]
    fn handle(&self, index: usize) -> SchemaRef {
        SchemaRef {
            registry: self.clone(),
            index,
        }
    }
}

/// Collects model declarations for a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    models: Vec<ModelSchemaBuilder>,
}

impl RegistryBuilder {
    pub fn model(mut self, model: ModelSchemaBuilder) -> Self {
        self.models.push(model);
        self
    }

    /// Validate every declaration and resolve relationship targets.
    pub fn build(self) -> Result<Registry> {
        let mut schemas = Vec::with_capacity(self.models.len());
        let mut by_name = HashMap::with_capacity(self.models.len());
        let mut by_object_name = HashMap::with_capacity(self.models.len());

        for model in self.models {
            let schema = model.build()?;
            let index = schemas.len();
            if by_name.insert(CompactString::from(schema.name()), index).is_some() {
                return Err(SoqlError::DuplicateModel(schema.name().into()));
            }
            if by_object_name
                .insert(CompactString::from(schema.object_name()), index)
                .is_some()
            {
                return Err(SoqlError::DuplicateModel(schema.object_name().into()));
            }
            schemas.push(schema);
        }

        for schema in &schemas {
            for (field, attr) in schema.relationships() {
                let target = attr.target().unwrap_or_default();
                if !by_name.contains_key(target) {
                    return Err(SoqlError::UnresolvedRelationship {
                        schema: schema.name().into(),
                        attribute: field.into(),
                        target: target.into(),
                    });
                }
            }
        }

        Ok(Registry {
            inner: Arc::new(RegistryInner {
                schemas,
                by_name,
                by_object_name,
            }),
        })
    }
}

/// Handle to one schema inside a [`Registry`].
///
/// Dereferences to the [`ModelSchema`]. Two handles are equal when they point
/// at the same schema of the same registry.
#[derive(Clone)]
pub struct SchemaRef {
    registry: Registry,
    index: usize,
}

impl SchemaRef {
    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Schema a relationship attribute points at.
    pub fn related(&self, field: &str) -> Result<SchemaRef> {
        let attr = self.attribute(field)?;
        match attr.target() {
            Some(target) => self.registry.schema(target),
            None => Err(SoqlError::InvalidJoin {
                schema: self.name().into(),
                attribute: field.into(),
                reason: "not a relationship",
            }),
        }
    }

    /// Reference to a scalar attribute of this schema.
    pub fn attr(&self, field: &str) -> Result<Attr> {
        Attr::direct(self, field)
    }

    /// Reference to a relationship of this schema.
    pub fn rel(&self, field: &str) -> Result<Rel> {
        Rel::direct(self, field)
    }
}

impl Deref for SchemaRef {
    type Target = ModelSchema;

    #[inline]
    fn deref(&self) -> &ModelSchema {
        &self.registry.inner.schemas[self.index]
    }
}

impl HasAttributes for SchemaRef {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn object_name(&self) -> &str {
        (**self).object_name()
    }

    #[inline]
    fn attribute(&self, field: &str) -> Result<&AttributeType> {
        (**self).attribute(field)
    }

    fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeType)> {
        (**self).attributes()
    }
}

impl PartialEq for SchemaRef {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && Arc::ptr_eq(&self.registry.inner, &other.registry.inner)
    }
}

impl Eq for SchemaRef {}

impl core::fmt::Debug for SchemaRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("SchemaRef").field(&self.name()).finish()
    }
}

impl core::fmt::Display for SchemaRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
