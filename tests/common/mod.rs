#![allow(dead_code)]

use soql::prelude::*;

/// `Account` with a one-to-many `contacts` relationship to `User`.
pub fn crm() -> Registry {
    Registry::builder()
        .model(
            ModelSchema::new("Account")
                .attribute("id", AttributeType::string("Id"))
                .attribute("contacts", AttributeType::many("Contacts", "User")),
        )
        .model(
            ModelSchema::new("User")
                .attribute("id", AttributeType::string("Id"))
                .attribute("email", AttributeType::string("Email")),
        )
        .build()
        .expect("crm schemas register")
}

/// Three generations of single-valued relationships plus a teacher with a
/// one-to-many `students` relationship back to `Child`.
pub fn family() -> Registry {
    let person = ModelSchema::new("Person")
        .attribute("id", AttributeType::integer("Id"))
        .attribute("name", AttributeType::string("Name"));

    Registry::builder()
        .model(ModelSchema::new("Grandparent").inherit(&person))
        .model(
            ModelSchema::new("Parent")
                .inherit(&person)
                .attribute("age", AttributeType::integer("Age").nullable())
                .attribute("mom", AttributeType::relationship("Mom", "Grandparent")),
        )
        .model(
            ModelSchema::new("Child")
                .inherit(&person)
                .attribute("mom", AttributeType::relationship("Mom", "Parent"))
                .attribute("dad", AttributeType::relationship("Dad", "Parent").nullable())
                .attribute("teacher", AttributeType::relationship("Teacher", "Teacher").nullable()),
        )
        .model(
            ModelSchema::new("Teacher")
                .inherit(&person)
                .attribute("students", AttributeType::many("Students", "Child")),
        )
        .build()
        .expect("family schemas register")
}

/// One attribute of every scalar kind.
pub fn kinds() -> Registry {
    Registry::builder()
        .model(
            ModelSchema::new("Sample")
                .object_name("Sample__c")
                .attribute("name", AttributeType::string("Name"))
                .attribute("count", AttributeType::integer("Count__c"))
                .attribute("ratio", AttributeType::float("Ratio__c"))
                .attribute("active", AttributeType::boolean("Active__c"))
                .attribute("born", AttributeType::date("Born__c"))
                .attribute("seen", AttributeType::datetime("Seen__c"))
                .attribute("notes", AttributeType::string("Notes__c").nullable()),
        )
        .build()
        .expect("sample schema registers")
}
