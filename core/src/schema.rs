//! Model schemas.
//!
//! A [`ModelSchema`] is the declaration of one remote object: its model name,
//! the external object name used in statements and an ordered list of
//! attributes. Schemas are declared with [`ModelSchema::new`] and become
//! usable once added to a [`Registry`](crate::Registry).

use compact_str::CompactString;
use hashbrown::{HashMap, HashSet};

use crate::attribute::AttributeType;
use crate::error::{Result, SoqlError};

/// Anything that exposes a model's attributes by name.
pub trait HasAttributes {
    /// Model name.
    fn name(&self) -> &str;

    /// External object name rendered after `FROM`.
    fn object_name(&self) -> &str;

    /// Attribute declared for `field`.
    fn attribute(&self, field: &str) -> Result<&AttributeType>;

    /// Every attribute in declaration order.
    fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeType)>;

    fn has_attribute(&self, field: &str) -> bool {
        self.attribute(field).is_ok()
    }

    /// Non-relationship attributes in declaration order.
    fn columns(&self) -> impl Iterator<Item = (&str, &AttributeType)> {
        self.attributes().filter(|(_, attr)| !attr.is_relationship())
    }

    /// Relationship attributes in declaration order.
    fn relationships(&self) -> impl Iterator<Item = (&str, &AttributeType)> {
        self.attributes().filter(|(_, attr)| attr.is_relationship())
    }
}

/// Immutable declaration of a remote object.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: CompactString,
    object_name: CompactString,
    attributes: Vec<(CompactString, AttributeType)>,
    index: HashMap<CompactString, usize>,
}

impl ModelSchema {
    /// Start declaring a model. The object name defaults to `name`.
    ///
    /// ```
    /// use soql_core::{AttributeType, ModelSchema};
    ///
    /// let user = ModelSchema::new("User")
    ///     .attribute("id", AttributeType::string("Id"))
    ///     .attribute("email", AttributeType::string("Email"));
    /// ```
    pub fn new(name: impl Into<CompactString>) -> ModelSchemaBuilder {
        ModelSchemaBuilder {
            name: name.into(),
            object_name: None,
            attributes: Vec::new(),
            inherited: 0,
        }
    }

    /// Position of `field` in declaration order.
    #[inline]
    pub fn position(&self, field: &str) -> Option<usize> {
        self.index.get(field).copied()
    }

    /// Number of declared attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Field name and attribute at `position`.
    #[inline]
    pub fn attribute_at(&self, position: usize) -> Option<(&str, &AttributeType)> {
        self.attributes
            .get(position)
            .map(|(field, attr)| (field.as_str(), attr))
    }

    /// Attribute at a position obtained from [`position`](Self::position).
    #[inline]
    pub(crate) fn attribute_by_position(&self, position: usize) -> &AttributeType {
        &self.attributes[position].1
    }

    pub(crate) fn unknown(&self, field: &str) -> SoqlError {
        SoqlError::UnknownAttribute {
            schema: self.name.clone(),
            attribute: field.into(),
        }
    }
}

impl HasAttributes for ModelSchema {
    #[inline]
    fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    fn object_name(&self) -> &str {
        &self.object_name
    }

    fn attribute(&self, field: &str) -> Result<&AttributeType> {
        self.position(field)
            .map(|i| &self.attributes[i].1)
            .ok_or_else(|| self.unknown(field))
    }

    fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeType)> {
        self.attributes
            .iter()
            .map(|(field, attr)| (field.as_str(), attr))
    }
}

/// Builder for [`ModelSchema`].
///
/// Builders are cheap to clone, so a declaration that is never registered can
/// act as an abstract base for others through [`inherit`](Self::inherit).
#[derive(Debug, Clone)]
pub struct ModelSchemaBuilder {
    name: CompactString,
    object_name: Option<CompactString>,
    attributes: Vec<(CompactString, AttributeType)>,
    // Leading entries that came from `inherit` and may be redefined.
    inherited: usize,
}

impl ModelSchemaBuilder {
    /// External object name, e.g. `Custom_Object__c`.
    pub fn object_name(mut self, object_name: impl Into<CompactString>) -> Self {
        self.object_name = Some(object_name.into());
        self
    }

    /// Declare an attribute.
    ///
    /// Redefining an inherited field replaces it in place; declaring the same
    /// own field twice fails at registration.
    pub fn attribute(mut self, field: impl Into<CompactString>, attribute: AttributeType) -> Self {
        let field = field.into();
        match self.attributes[..self.inherited]
            .iter()
            .position(|(existing, _)| *existing == field)
        {
            Some(i) => self.attributes[i].1 = attribute,
            None => self.attributes.push((field, attribute)),
        }
        self
    }

    /// Take on the attributes of `base`.
    ///
    /// Inherited attributes come first, in the base's order. A field declared
    /// on both keeps the base's position and this builder's definition.
    pub fn inherit(mut self, base: &ModelSchemaBuilder) -> Self {
        let mut merged = Vec::with_capacity(base.attributes.len() + self.attributes.len());
        for (field, attr) in &base.attributes {
            match self.attributes.iter().position(|(own, _)| own == field) {
                Some(i) => merged.push(self.attributes.remove(i)),
                None => merged.push((field.clone(), attr.clone())),
            }
        }
        self.inherited = merged.len();
        merged.append(&mut self.attributes);
        self.attributes = merged;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validate the declaration.
    ///
    /// Relationship targets are checked by the registry.
    pub(crate) fn build(self) -> Result<ModelSchema> {
        let mut index = HashMap::with_capacity(self.attributes.len());
        {
            let mut external = HashSet::with_capacity(self.attributes.len());
            for (i, (field, attr)) in self.attributes.iter().enumerate() {
                if index.insert(field.clone(), i).is_some() {
                    return Err(SoqlError::DuplicateAttribute {
                        schema: self.name.clone(),
                        attribute: field.clone(),
                    });
                }
                if !attr.is_relationship() && !external.insert(attr.external_name()) {
                    return Err(SoqlError::DuplicateExternalName {
                        schema: self.name.clone(),
                        external_name: attr.external_name().into(),
                    });
                }
            }
        }

        let object_name = self.object_name.unwrap_or_else(|| self.name.clone());
        Ok(ModelSchema {
            name: self.name,
            object_name,
            attributes: self.attributes,
            index,
        })
    }
}
