use soql::error::SoqlError;
use soql::prelude::*;

mod common;

#[test]
fn test_columns_and_relationships_in_declaration_order() {
    let registry = common::family();
    let child = registry.schema("Child").unwrap();

    let columns: Vec<&str> = child.columns().map(|(field, _)| field).collect();
    assert_eq!(columns, ["id", "name"]);

    let relationships: Vec<&str> = child.relationships().map(|(field, _)| field).collect();
    assert_eq!(relationships, ["mom", "dad", "teacher"]);

    assert!(child.has_attribute("teacher"));
    assert!(!child.has_attribute("students"));
    assert_eq!(child.attribute("dad").unwrap().external_name(), "Dad");
}

#[test]
fn test_inherited_attributes_keep_base_position() {
    let base = ModelSchema::new("Base")
        .attribute("id", AttributeType::string("Id"))
        .attribute("name", AttributeType::string("Name"));
    let registry = Registry::builder()
        .model(
            ModelSchema::new("Lead")
                .inherit(&base)
                .attribute("score", AttributeType::integer("Score__c"))
                .attribute("name", AttributeType::string("Name").nullable()),
        )
        .build()
        .unwrap();
    let lead = registry.schema("Lead").unwrap();

    let fields: Vec<&str> = lead.attributes().map(|(field, _)| field).collect();
    assert_eq!(fields, ["id", "name", "score"]);
    assert!(lead.attribute("name").unwrap().is_nullable());
    assert!(registry.schema("Base").is_err());
}

#[test]
fn test_object_name_lookup() {
    let registry = common::kinds();

    let sample = registry.by_object_name("Sample__c").unwrap();
    assert_eq!(sample.name(), "Sample");
    assert_eq!(sample.object_name(), "Sample__c");
    assert_eq!(sample, registry.schema("Sample").unwrap());
    assert_eq!(
        registry.by_object_name("Sample").unwrap_err(),
        SoqlError::UnknownModel("Sample".into())
    );
}

#[test]
fn test_registration_errors() {
    let user = || ModelSchema::new("User").attribute("id", AttributeType::string("Id"));

    let err = Registry::builder()
        .model(user())
        .model(user())
        .build()
        .unwrap_err();
    assert_eq!(err, SoqlError::DuplicateModel("User".into()));

    let err = Registry::builder()
        .model(
            ModelSchema::new("User")
                .attribute("id", AttributeType::string("Id"))
                .attribute("id", AttributeType::integer("Id")),
        )
        .build()
        .unwrap_err();
    assert!(matches!(err, SoqlError::DuplicateAttribute { .. }));

    let err = Registry::builder()
        .model(
            ModelSchema::new("User")
                .attribute("id", AttributeType::string("Id"))
                .attribute("key", AttributeType::string("Id")),
        )
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        SoqlError::DuplicateExternalName {
            schema: "User".into(),
            external_name: "Id".into(),
        }
    );

    let err = Registry::builder()
        .model(user().attribute("manager", AttributeType::relationship("Manager", "Manager")))
        .build()
        .unwrap_err();
    assert!(matches!(err, SoqlError::UnresolvedRelationship { .. }));
}

#[test]
fn test_self_referencing_schema() {
    let registry = Registry::builder()
        .model(
            ModelSchema::new("User")
                .attribute("id", AttributeType::string("Id"))
                .attribute("manager", AttributeType::relationship("Manager", "User").nullable()),
        )
        .build()
        .unwrap();
    let user = registry.schema("User").unwrap();

    let query = select(&user)
        .join(&user.rel("manager").unwrap().rel("manager").unwrap())
        .unwrap();
    assert_eq!(
        query.to_soql(),
        "SELECT User.Id, User.Manager.Id, User.Manager.Manager.Id FROM User"
    );
}

#[test]
fn test_scalar_kind_of_attributes() {
    let registry = common::kinds();
    let sample = registry.schema("Sample").unwrap();

    let kinds: Vec<ScalarKind> = sample
        .columns()
        .filter_map(|(_, attr)| attr.scalar_kind())
        .collect();
    assert_eq!(
        kinds,
        [
            ScalarKind::String,
            ScalarKind::Integer,
            ScalarKind::Float,
            ScalarKind::Boolean,
            ScalarKind::Date,
            ScalarKind::DateTime,
            ScalarKind::String,
        ]
    );
}
