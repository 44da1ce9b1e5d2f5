//! Loading response payloads into [`Instance`]s.
//!
//! Query-driven loading ([`Query::load`]) walks the query's projection and
//! joins, so every selected column and joined relationship must be present
//! in each record. Schema-driven loading ([`Registry::load_record`]) picks the
//! schema from the record's `attributes.type` and loads whatever
//! relationships the record carries.

use serde_json::{Map, Value as JsonValue};

use crate::error::{Result, SoqlError};
use crate::model::{Instance, Slot};
use crate::query::Query;
use crate::registry::{Registry, SchemaRef};
use crate::schema::HasAttributes;

/// Key of the metadata entry on every record returned by the API.
pub const ATTRIBUTES_KEY: &str = "attributes";

/// Key of the record list in a response envelope.
pub const RECORDS_KEY: &str = "records";

/// Key of the match count in a response envelope.
pub const TOTAL_SIZE_KEY: &str = "totalSize";

fn shape(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "list",
        JsonValue::Object(_) => "mapping",
    }
}

fn mismatch(schema: &str, attribute: &str, reason: impl Into<String>) -> SoqlError {
    SoqlError::SchemaMismatch {
        schema: schema.into(),
        attribute: attribute.into(),
        reason: reason.into(),
    }
}

fn as_record<'r>(schema: &str, value: &'r JsonValue) -> Result<&'r Map<String, JsonValue>> {
    value.as_object().ok_or_else(|| {
        mismatch(
            schema,
            "",
            format!("expected a record mapping, found a {}", shape(value)),
        )
    })
}

/// Records of a one-to-many relationship: a list, a `{"records": [...]}`
/// envelope, or null for none.
fn many_records<'r>(
    schema: &str,
    field: &str,
    value: &'r JsonValue,
) -> Result<&'r [JsonValue]> {
    match value {
        JsonValue::Null => Ok(&[]),
        JsonValue::Array(records) => Ok(records),
        JsonValue::Object(envelope) => match envelope.get(RECORDS_KEY) {
            Some(JsonValue::Array(records)) => Ok(records),
            _ => Err(mismatch(
                schema,
                field,
                "expected a list of records, found a mapping",
            )),
        },
        other => Err(mismatch(
            schema,
            field,
            format!("expected a list of records, found a {}", shape(other)),
        )),
    }
}

impl Query {
    /// Load one instance per record.
    pub fn load(&self, records: &[JsonValue]) -> Result<Vec<Instance>> {
        if self.is_count() {
            return Err(SoqlError::InvalidQuery {
                schema: self.root().name().into(),
                reason: "count queries return no records",
            });
        }
        crate::soql_trace_load!(self.root().name(), records.len());
        records.iter().map(|record| self.load_record(record)).collect()
    }

    /// Load the records of a full response, either the
    /// `{"totalSize": n, "records": [...]}` envelope or a bare list.
    pub fn load_response(&self, response: &JsonValue) -> Result<Vec<Instance>> {
        match response {
            JsonValue::Array(records) => self.load(records),
            JsonValue::Object(envelope) => match envelope.get(RECORDS_KEY) {
                Some(JsonValue::Array(records)) => self.load(records),
                Some(other) => Err(mismatch(
                    self.root().name(),
                    RECORDS_KEY,
                    format!("expected a list, found a {}", shape(other)),
                )),
                None => Err(mismatch(self.root().name(), RECORDS_KEY, "missing from response")),
            },
            other => Err(mismatch(
                self.root().name(),
                RECORDS_KEY,
                format!("expected a response mapping, found a {}", shape(other)),
            )),
        }
    }

    /// `totalSize` of a response envelope, the answer to a `count()` query.
    pub fn total_count(&self, response: &JsonValue) -> Result<u64> {
        response
            .get(TOTAL_SIZE_KEY)
            .and_then(JsonValue::as_u64)
            .ok_or_else(|| {
                mismatch(
                    self.root().name(),
                    TOTAL_SIZE_KEY,
                    "missing or not a non-negative integer",
                )
            })
    }

    fn load_record(&self, record: &JsonValue) -> Result<Instance> {
        let schema = self.root();
        let record = as_record(schema.name(), record)?;
        let mut instance = Instance::new(schema);

        for (field, attr) in self.selected_columns() {
            let raw = record
                .get(attr.external_name())
                .ok_or_else(|| mismatch(schema.name(), field, "missing from record"))?;
            let value = attr.coerce_in(schema.name(), field, raw)?;
            instance.put(position(schema, field)?, Slot::Value(value));
        }

        for join in self.joins() {
            let field = join.field();
            let raw = record
                .get(join.external_name())
                .ok_or_else(|| mismatch(schema.name(), field, "missing from record"))?;

            let slot = if join.is_many() {
                let related = many_records(schema.name(), field, raw)?
                    .iter()
                    .map(|record| join.query().load_record(record))
                    .collect::<Result<Vec<_>>>()?;
                Slot::Many(related)
            } else {
                match raw {
                    JsonValue::Null if join.attribute().is_nullable() => Slot::One(None),
                    JsonValue::Null => {
                        return Err(SoqlError::Nullability {
                            schema: schema.name().into(),
                            attribute: field.into(),
                        });
                    }
                    JsonValue::Object(_) => {
                        Slot::One(Some(Box::new(join.query().load_record(raw)?)))
                    }
                    other => {
                        return Err(mismatch(
                            schema.name(),
                            field,
                            format!("expected a single record, found a {}", shape(other)),
                        ));
                    }
                }
            };
            instance.put(position(schema, field)?, slot);
        }

        Ok(instance)
    }
}

fn position(schema: &SchemaRef, field: &str) -> Result<usize> {
    schema.position(field).ok_or_else(|| schema.unknown(field))
}

impl Registry {
    /// Load a record whose schema is named by its `attributes.type` entry.
    ///
    /// Every scalar attribute must be present; relationships are loaded when
    /// the record carries them and left unset otherwise.
    pub fn load_record(&self, record: &JsonValue) -> Result<Instance> {
        let schema = self.schema_of(record, None)?;
        self.load_with_schema(&schema, record)
    }

    /// Load every record of a response envelope or bare list.
    pub fn load_records(&self, response: &JsonValue) -> Result<Vec<Instance>> {
        let records = many_records("", RECORDS_KEY, response)?;
        records.iter().map(|record| self.load_record(record)).collect()
    }

    fn schema_of(&self, record: &JsonValue, fallback: Option<&SchemaRef>) -> Result<SchemaRef> {
        let object_name = record
            .get(ATTRIBUTES_KEY)
            .and_then(|attributes| attributes.get("type"))
            .and_then(JsonValue::as_str);
        match (object_name, fallback) {
            (Some(object_name), _) => self.by_object_name(object_name),
            (None, Some(schema)) => Ok(schema.clone()),
            (None, None) => Err(mismatch("", ATTRIBUTES_KEY, "record has no attributes.type")),
        }
    }

    fn load_with_schema(&self, schema: &SchemaRef, record: &JsonValue) -> Result<Instance> {
        let fields = as_record(schema.name(), record)?;
        let mut instance = Instance::new(schema);

        for (position, (field, attr)) in schema.attributes().enumerate() {
            let raw = fields.get(attr.external_name());
            let slot = match (raw, attr.is_relationship()) {
                (None, false) => {
                    return Err(mismatch(schema.name(), field, "missing from record"));
                }
                (None, true) => continue,
                (Some(raw), false) => Slot::Value(attr.coerce_in(schema.name(), field, raw)?),
                (Some(raw), true) => {
                    let target = schema.related(field)?;
                    if attr.is_many() {
                        let related = many_records(schema.name(), field, raw)?
                            .iter()
                            .map(|record| {
                                let related = self.schema_of(record, Some(&target))?;
                                self.load_with_schema(&related, record)
                            })
                            .collect::<Result<Vec<_>>>()?;
                        Slot::Many(related)
                    } else if raw.is_null() {
                        if !attr.is_nullable() {
                            return Err(SoqlError::Nullability {
                                schema: schema.name().into(),
                                attribute: field.into(),
                            });
                        }
                        Slot::One(None)
                    } else {
                        let related = self.schema_of(raw, Some(&target))?;
                        Slot::One(Some(Box::new(self.load_with_schema(&related, raw)?)))
                    }
                }
            };
            instance.put(position, slot);
        }

        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use soql_types::Value;

    use super::*;
    use crate::{AttributeType, ModelSchema, select};

    fn registry() -> Registry {
        Registry::builder()
            .model(
                ModelSchema::new("Account")
                    .attribute("id", AttributeType::string("Id"))
                    .attribute("name", AttributeType::string("Name"))
                    .attribute("owner", AttributeType::relationship("Owner", "User"))
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
    fn test_load_envelope_and_metadata() {
        let registry = registry();
        let account = registry.schema("Account").unwrap();
        let query = select(&account)
            .join(&account.rel("contacts").unwrap())
            .unwrap();

        let response = json!({
            "totalSize": 1,
            "done": true,
            "records": [{
                "attributes": {"type": "Account", "url": "/services/data/v42.0/sobjects/Account/001"},
                "Id": "001",
                "Name": "Acme",
                "Contacts": {
                    "totalSize": 1,
                    "records": [{"attributes": {"type": "User"}, "Id": "003", "Email": null}]
                }
            }]
        });

        let instances = query.load_response(&response).unwrap();
        assert_eq!(instances.len(), 1);
        let contacts = instances[0].many("contacts").unwrap();
        assert_eq!(contacts[0].get("id").unwrap(), &Value::from("003"));
        assert_eq!(contacts[0].get("email").unwrap(), &Value::Null);
        assert_eq!(query.total_count(&response).unwrap(), 1);
    }

    #[test]
    fn test_null_many_is_empty() {
        let account = registry().schema("Account").unwrap();
        let query = select(&account)
            .join(&account.rel("contacts").unwrap())
            .unwrap();
        let instances = query
            .load(&[json!({"Id": "001", "Name": "Acme", "Contacts": null})])
            .unwrap();
        assert!(instances[0].many("contacts").unwrap().is_empty());
    }

    #[test]
    fn test_shape_mismatches() {
        let account = registry().schema("Account").unwrap();
        let many = select(&account)
            .join(&account.rel("contacts").unwrap())
            .unwrap();
        let err = many
            .load(&[json!({"Id": "001", "Name": "Acme", "Contacts": {"Id": "003", "Email": null}})])
            .unwrap_err();
        assert!(matches!(err, SoqlError::SchemaMismatch { .. }));

        let one = select(&account).join(&account.rel("owner").unwrap()).unwrap();
        let err = one
            .load(&[json!({"Id": "001", "Name": "Acme", "Owner": [{"Id": "005", "Email": null}]})])
            .unwrap_err();
        assert!(matches!(err, SoqlError::SchemaMismatch { .. }));

        let err = one
            .load(&[json!({"Id": "001", "Name": "Acme", "Owner": null})])
            .unwrap_err();
        assert!(matches!(err, SoqlError::Nullability { .. }));

        let err = one.load(&[json!({"Id": "001", "Name": "Acme"})]).unwrap_err();
        assert_eq!(
            err,
            SoqlError::SchemaMismatch {
                schema: "Account".into(),
                attribute: "owner".into(),
                reason: "missing from record".into(),
            }
        );
    }

    #[test]
    fn test_count_query_does_not_load() {
        let account = registry().schema("Account").unwrap();
        let err = select(&account).count().load(&[]).unwrap_err();
        assert!(matches!(err, SoqlError::InvalidQuery { .. }));
        assert_eq!(
            select(&account)
                .count()
                .total_count(&json!({"totalSize": 42, "records": []}))
                .unwrap(),
            42
        );
    }

    #[test]
    fn test_schema_driven_loading() {
        let registry = registry();
        let record = json!({
            "attributes": {"type": "Account"},
            "Id": "001",
            "Name": "Acme",
            "Owner": {"attributes": {"type": "User"}, "Id": "005", "Email": "o@acme.test"}
        });
        let account = registry.load_record(&record).unwrap();
        assert_eq!(account.schema().name(), "Account");
        let owner = account.one("owner").unwrap().unwrap();
        assert_eq!(owner.get("email").unwrap(), &Value::from("o@acme.test"));
        assert!(!account.is_set("contacts"));

        let err = registry
            .load_record(&json!({"attributes": {"type": "Lead"}, "Id": "00Q"}))
            .unwrap_err();
        assert_eq!(err, SoqlError::UnknownModel("Lead".into()));

        let err = registry.load_record(&json!({"Id": "001"})).unwrap_err();
        assert!(matches!(err, SoqlError::SchemaMismatch { .. }));
    }
}
