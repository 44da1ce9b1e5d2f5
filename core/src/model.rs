//! Model instances.
//!
//! An [`Instance`] holds one slot per attribute of its schema. Slots start
//! unset and are filled by the loader, by [`SchemaRef::instance`] or through
//! the setters, which also track which scalar fields changed.

use serde_json::{Map, Value as JsonValue};
use soql_types::Value;

use crate::attribute::AttributeType;
use crate::error::{Result, SoqlError};
use crate::registry::SchemaRef;
use crate::schema::HasAttributes;

/// Content of one attribute of an [`Instance`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot {
    /// Never loaded or assigned.
    #[default]
    Unset,
    /// Scalar value, possibly `Value::Null`.
    Value(Value),
    /// Single-valued relationship; `None` when the related record is null.
    One(Option<Box<Instance>>),
    /// One-to-many relationship.
    Many(Vec<Instance>),
}

impl Slot {
    #[inline]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Slot::Unset)
    }
}

/// A record of a registered model.
#[derive(Debug, Clone)]
pub struct Instance {
    schema: SchemaRef,
    slots: Vec<Slot>,
    changed: Vec<bool>,
}

impl Instance {
    /// An instance with every attribute unset.
    pub fn new(schema: &SchemaRef) -> Self {
        Self {
            schema: schema.clone(),
            slots: vec![Slot::Unset; schema.len()],
            changed: vec![false; schema.len()],
        }
    }

    #[inline]
    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Raw slot for `field`.
    pub fn slot(&self, field: &str) -> Result<&Slot> {
        let position = self.position(field)?;
        Ok(&self.slots[position])
    }

    /// Whether `field` was loaded or assigned.
    pub fn is_set(&self, field: &str) -> bool {
        self.slot(field).is_ok_and(Slot::is_set)
    }

    /// Scalar value of `field`.
    pub fn get(&self, field: &str) -> Result<&Value> {
        match self.slot(field)? {
            Slot::Value(value) => Ok(value),
            Slot::Unset => Err(self.unset(field)),
            Slot::One(_) | Slot::Many(_) => Err(self.wrong_accessor(field, "use one() or many()")),
        }
    }

    /// Related record of a single-valued relationship.
    pub fn one(&self, field: &str) -> Result<Option<&Instance>> {
        self.check_relationship(field, false)?;
        match self.slot(field)? {
            Slot::One(related) => Ok(related.as_deref()),
            _ => Err(self.unset(field)),
        }
    }

    /// Related records of a one-to-many relationship.
    pub fn many(&self, field: &str) -> Result<&[Instance]> {
        self.check_relationship(field, true)?;
        match self.slot(field)? {
            Slot::Many(related) => Ok(related),
            _ => Err(self.unset(field)),
        }
    }

    /// Assign a scalar value, coercing it to the attribute's kind.
    ///
    /// The field is recorded as changed when the new value differs from the
    /// current one.
    pub fn set(&mut self, field: &str, value: impl Into<Value>) -> Result<()> {
        let position = self.position(field)?;
        let attr = self.attribute_at(position);
        if attr.is_relationship() {
            return Err(self.wrong_accessor(field, "use set_one() or set_many()"));
        }
        let value = attr.coerce(self.schema.name(), field, value.into())?;

        if !matches!(&self.slots[position], Slot::Value(current) if *current == value) {
            self.changed[position] = true;
        }
        self.slots[position] = Slot::Value(value);
        Ok(())
    }

    /// Assign the related record of a single-valued relationship.
    pub fn set_one(&mut self, field: &str, related: Option<Instance>) -> Result<()> {
        let position = self.check_relationship(field, false)?;
        match &related {
            Some(instance) => self.check_target(field, instance)?,
            None if !self.attribute_at(position).is_nullable() => {
                return Err(SoqlError::Nullability {
                    schema: self.schema.name().into(),
                    attribute: field.into(),
                });
            }
            None => {}
        }
        self.slots[position] = Slot::One(related.map(Box::new));
        Ok(())
    }

    /// Assign the related records of a one-to-many relationship.
    pub fn set_many(&mut self, field: &str, related: Vec<Instance>) -> Result<()> {
        let position = self.check_relationship(field, true)?;
        for instance in &related {
            self.check_target(field, instance)?;
        }
        self.slots[position] = Slot::Many(related);
        Ok(())
    }

    /// Changed scalar fields keyed by external name, with payload values.
    pub fn changes(&self) -> Map<String, JsonValue> {
        let mut changes = Map::new();
        for (position, _) in self.changed.iter().enumerate().filter(|(_, changed)| **changed) {
            let attr = self.attribute_at(position);
            if let Slot::Value(value) = &self.slots[position] {
                changes.insert(attr.external_name().to_owned(), attr.to_json(value));
            }
        }
        changes
    }

    /// Forget recorded changes.
    pub fn reset_changes(&mut self) {
        self.changed.fill(false);
    }

    /// Payload mapping of every set attribute, keyed by external name.
    ///
    /// The `attributes.type` entry names the object so the record can be fed
    /// back to [`Registry::load_record`](crate::Registry::load_record).
    pub fn to_record(&self) -> JsonValue {
        let mut record = Map::new();
        record.insert(
            "attributes".to_owned(),
            serde_json::json!({ "type": self.schema.object_name() }),
        );

        for (position, slot) in self.slots.iter().enumerate() {
            let attr = self.attribute_at(position);
            let value = match slot {
                Slot::Unset => continue,
                Slot::Value(value) => attr.to_json(value),
                Slot::One(None) => JsonValue::Null,
                Slot::One(Some(related)) => related.to_record(),
                Slot::Many(related) => {
                    JsonValue::Array(related.iter().map(Instance::to_record).collect())
                }
            };
            record.insert(attr.external_name().to_owned(), value);
        }
        JsonValue::Object(record)
    }

    // ==================== loader support ====================

    pub(crate) fn put(&mut self, position: usize, slot: Slot) {
        self.slots[position] = slot;
    }

    // ==================== helpers ====================

    fn position(&self, field: &str) -> Result<usize> {
        self.schema
            .position(field)
            .ok_or_else(|| self.schema.unknown(field))
    }

    #[inline]
    fn attribute_at(&self, position: usize) -> &AttributeType {
        self.schema.attribute_by_position(position)
    }

    fn check_relationship(&self, field: &str, many: bool) -> Result<usize> {
        let position = self.position(field)?;
        let attr = self.attribute_at(position);
        if !attr.is_relationship() {
            return Err(self.wrong_accessor(field, "scalar attribute; use get() or set()"));
        }
        if attr.is_many() != many {
            let hint = if many { "use one() or set_one()" } else { "use many() or set_many()" };
            return Err(self.wrong_accessor(field, hint));
        }
        Ok(position)
    }

    fn check_target(&self, field: &str, instance: &Instance) -> Result<()> {
        let target = self.schema.related(field)?;
        if instance.schema != target {
            return Err(SoqlError::InvalidJoin {
                schema: self.schema.name().into(),
                attribute: field.into(),
                reason: "related instance belongs to a different model",
            });
        }
        Ok(())
    }

    fn unset(&self, field: &str) -> SoqlError {
        SoqlError::UnsetField {
            schema: self.schema.name().into(),
            attribute: field.into(),
        }
    }

    fn wrong_accessor(&self, field: &str, reason: &'static str) -> SoqlError {
        SoqlError::InvalidColumn {
            schema: self.schema.name().into(),
            attribute: field.into(),
            reason,
        }
    }
}

impl PartialEq for Instance {
    /// Schema and slots; change tracking is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.slots == other.slots
    }
}

impl SchemaRef {
    /// Construct an instance from field-name / value pairs.
    ///
    /// Values are coerced to each attribute's kind; attributes not mentioned
    /// stay unset.
    ///
    /// ```ignore
    /// let user = schema.instance([("id", Value::from("123")), ("email", Value::Null)])?;
    /// ```
    pub fn instance<K, V, I>(&self, pairs: I) -> Result<Instance>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let mut instance = Instance::new(self);
        for (field, value) in pairs {
            let field = field.as_ref();
            let position = instance.position(field)?;
            let attr = instance.attribute_at(position);
            if attr.is_relationship() {
                return Err(instance.wrong_accessor(field, "use set_one() or set_many()"));
            }
            let value = attr.coerce(self.name(), field, value.into())?;
            instance.slots[position] = Slot::Value(value);
        }
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{AttributeType, ModelSchema, Registry};

    fn registry() -> Registry {
        Registry::builder()
            .model(
                ModelSchema::new("Account")
                    .attribute("id", AttributeType::string("Id"))
                    .attribute("employees", AttributeType::integer("NumberOfEmployees"))
                    .attribute("owner", AttributeType::relationship("Owner", "User").nullable())
                    .attribute("contacts", AttributeType::many("Contacts", "User")),
            )
            .model(
                ModelSchema::new("User")
                    .attribute("id", AttributeType::string("Id"))
                    .attribute("email", AttributeType::string("Email").nullable()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_instance_construction_coerces() {
        let account = registry().schema("Account").unwrap();
        let instance = account
            .instance([("id", Value::from(42)), ("employees", Value::from("12"))])
            .unwrap();
        assert_eq!(instance.get("id").unwrap(), &Value::from("42"));
        assert_eq!(instance.get("employees").unwrap(), &Value::from(12));
        assert!(instance.changes().is_empty());
    }

    #[test]
    fn test_construction_errors() {
        let account = registry().schema("Account").unwrap();
        assert!(matches!(
            account.instance([("id", Value::Null)]),
            Err(SoqlError::Nullability { .. })
        ));
        assert!(matches!(
            account.instance([("height", Value::from(1))]),
            Err(SoqlError::UnknownAttribute { .. })
        ));
        assert!(matches!(
            account.instance([("employees", Value::from("many"))]),
            Err(SoqlError::TypeCoercion { .. })
        ));
    }

    #[test]
    fn test_unset_and_wrong_accessor() {
        let account = registry().schema("Account").unwrap();
        let instance = Instance::new(&account);
        assert_eq!(
            instance.get("id"),
            Err(SoqlError::UnsetField {
                schema: "Account".into(),
                attribute: "id".into(),
            })
        );
        assert!(matches!(
            instance.one("contacts"),
            Err(SoqlError::InvalidColumn { .. })
        ));
        assert!(matches!(instance.get("owner"), Err(SoqlError::UnsetField { .. })));
        assert!(!instance.is_set("id"));
    }

    #[test]
    fn test_change_tracking() {
        let account = registry().schema("Account").unwrap();
        let mut instance = account
            .instance([("id", Value::from("001")), ("employees", Value::from(10))])
            .unwrap();

        instance.set("employees", 10).unwrap();
        assert!(instance.changes().is_empty());

        instance.set("employees", 11).unwrap();
        assert_eq!(instance.changes().get("NumberOfEmployees"), Some(&json!(11)));

        instance.reset_changes();
        assert!(instance.changes().is_empty());
        assert_eq!(instance.get("employees").unwrap(), &Value::from(11));
    }

    #[test]
    fn test_relationship_setters() {
        let registry = registry();
        let account = registry.schema("Account").unwrap();
        let user = registry.schema("User").unwrap();
        let mut instance = Instance::new(&account);

        let owner = user.instance([("id", "005")]).unwrap();
        instance.set_one("owner", Some(owner.clone())).unwrap();
        assert_eq!(instance.one("owner").unwrap(), Some(&owner));

        instance.set_one("owner", None).unwrap();
        assert_eq!(instance.one("owner").unwrap(), None);

        instance.set_many("contacts", vec![owner.clone()]).unwrap();
        assert_eq!(instance.many("contacts").unwrap().len(), 1);

        let err = instance
            .set_many("contacts", vec![Instance::new(&account)])
            .unwrap_err();
        assert!(matches!(err, SoqlError::InvalidJoin { .. }));
    }

    #[test]
    fn test_to_record() {
        let registry = registry();
        let account = registry.schema("Account").unwrap();
        let user = registry.schema("User").unwrap();
        let mut instance = account.instance([("id", "001")]).unwrap();
        instance
            .set_many(
                "contacts",
                vec![user.instance([("id", Value::from("003")), ("email", Value::Null)]).unwrap()],
            )
            .unwrap();

        assert_eq!(
            instance.to_record(),
            json!({
                "attributes": {"type": "Account"},
                "Id": "001",
                "Contacts": [
                    {"attributes": {"type": "User"}, "Id": "003", "Email": null}
                ]
            })
        );
    }
}
