use soql::core::Attr;
use soql::error::SoqlError;
use soql::prelude::*;

mod common;

#[test]
fn test_select_all_columns_with_filter() {
    let registry = common::crm();
    let user = registry.schema("User").unwrap();

    let query = select(&user)
        .r#where(user.attr("id").unwrap().eq("123").unwrap())
        .unwrap();

    assert_eq!(
        query.to_soql(),
        "SELECT User.Id, User.Email FROM User WHERE User.Id = '123'"
    );
    assert_eq!(query.to_string(), query.to_soql());
}

#[test]
fn test_many_join_renders_subselect() {
    let registry = common::crm();
    let account = registry.schema("Account").unwrap();

    let query = select(&account)
        .join(&account.rel("contacts").unwrap())
        .unwrap();

    assert_eq!(
        query.to_soql(),
        "SELECT Account.Id, (SELECT User.Id, User.Email FROM Account.Contacts) FROM Account"
    );
}

#[test]
fn test_rendering_is_deterministic() {
    let registry = common::family();
    let child = registry.schema("Child").unwrap();
    let build = || {
        select(&child)
            .join(&child.rel("mom").unwrap())
            .unwrap()
            .r#where(child.attr("name").unwrap().like("A%").unwrap())
            .unwrap()
            .order_by(child.attr("id").unwrap().desc())
            .unwrap()
    };

    let first = build();
    let second = build();
    assert_eq!(first, second);
    assert_eq!(first.to_soql(), second.to_soql());
}

#[test]
fn test_explicit_columns() {
    let registry = common::family();
    let child = registry.schema("Child").unwrap();

    let query = select(&child)
        .columns([child.attr("name").unwrap()])
        .unwrap();
    assert_eq!(query.to_soql(), "SELECT Child.Name FROM Child");

    // An empty list falls back to every scalar column.
    let query = query.columns(Vec::<Attr>::new()).unwrap();
    assert_eq!(query.to_soql(), "SELECT Child.Id, Child.Name FROM Child");
}

#[test]
fn test_invalid_columns() {
    let registry = common::family();
    let child = registry.schema("Child").unwrap();
    let parent = registry.schema("Parent").unwrap();

    let err = select(&child)
        .columns([parent.attr("name").unwrap()])
        .unwrap_err();
    assert!(matches!(err, SoqlError::InvalidColumn { .. }));

    let through = child.rel("mom").unwrap().attr("name").unwrap();
    let err = select(&child).columns([through]).unwrap_err();
    assert!(matches!(err, SoqlError::InvalidColumn { .. }));

    let name = child.attr("name").unwrap();
    let err = select(&child)
        .columns([name.clone(), name])
        .unwrap_err();
    assert!(matches!(err, SoqlError::InvalidColumn { .. }));

    let err = child.attr("mom").unwrap_err();
    assert!(matches!(err, SoqlError::InvalidColumn { .. }));

    let err = child.attr("nickname").unwrap_err();
    assert_eq!(
        err,
        SoqlError::UnknownAttribute {
            schema: "Child".into(),
            attribute: "nickname".into(),
        }
    );
}

#[test]
fn test_where_replaces_previous_filter() {
    let registry = common::crm();
    let user = registry.schema("User").unwrap();
    let id = user.attr("id").unwrap();

    let query = select(&user)
        .r#where(id.eq("1").unwrap())
        .unwrap()
        .r#where(id.eq("2").unwrap())
        .unwrap();

    assert_eq!(
        query.to_soql(),
        "SELECT User.Id, User.Email FROM User WHERE User.Id = '2'"
    );
}

#[test]
fn test_where_through_parent_relationship() {
    let registry = common::family();
    let child = registry.schema("Child").unwrap();
    let grandma = child
        .rel("mom")
        .unwrap()
        .rel("mom")
        .unwrap()
        .attr("name")
        .unwrap();

    let query = select(&child)
        .columns([child.attr("id").unwrap()])
        .unwrap()
        .r#where(grandma.eq("Edna").unwrap())
        .unwrap();

    assert_eq!(
        query.to_soql(),
        "SELECT Child.Id FROM Child WHERE Child.Mom.Mom.Name = 'Edna'"
    );
}

#[test]
fn test_where_rejects_foreign_and_many_paths() {
    let registry = common::family();
    let child = registry.schema("Child").unwrap();
    let teacher = registry.schema("Teacher").unwrap();

    let err = select(&child)
        .r#where(teacher.attr("name").unwrap().eq("Ms. Frizzle").unwrap())
        .unwrap_err();
    assert!(matches!(err, SoqlError::InvalidColumn { .. }));

    let student_name = teacher
        .rel("students")
        .unwrap()
        .attr("name")
        .unwrap();
    let err = select(&teacher)
        .r#where(student_name.eq("Arnold").unwrap())
        .unwrap_err();
    assert!(matches!(err, SoqlError::InvalidColumn { .. }));
}

#[test]
fn test_order_limit_offset() {
    let registry = common::family();
    let parent = registry.schema("Parent").unwrap();

    let query = select(&parent)
        .columns([parent.attr("id").unwrap()])
        .unwrap()
        .order_by(parent.attr("age").unwrap().desc().nulls_last())
        .unwrap()
        .order_by(parent.attr("name").unwrap())
        .unwrap()
        .limit(10)
        .unwrap()
        .offset(20)
        .unwrap();

    assert_eq!(
        query.to_soql(),
        "SELECT Parent.Id FROM Parent ORDER BY Parent.Age DESC NULLS LAST, Parent.Name \
         LIMIT 10 OFFSET 20"
    );
    assert_eq!(query.limit_value(), Some(10));
    assert_eq!(query.offset_value(), Some(20));
}

#[test]
fn test_negative_limit_and_offset() {
    let registry = common::crm();
    let user = registry.schema("User").unwrap();

    assert_eq!(
        select(&user).limit(-1).unwrap_err(),
        SoqlError::InvalidLimit(-1)
    );
    assert_eq!(
        select(&user).offset(-5).unwrap_err(),
        SoqlError::InvalidOffset(-5)
    );
    assert_eq!(
        select(&user).limit(0).unwrap().to_soql(),
        "SELECT User.Id, User.Email FROM User LIMIT 0"
    );
}

#[test]
fn test_count() {
    let registry = common::crm();
    let user = registry.schema("User").unwrap();

    let query = select(&user)
        .r#where(user.attr("email").unwrap().like("%@example.com").unwrap())
        .unwrap()
        .count();

    assert!(query.is_count());
    assert_eq!(
        query.to_soql(),
        "SELECT COUNT() FROM User WHERE User.Email LIKE '%@example.com'"
    );
}

#[test]
fn test_nested_many_joins() {
    let registry = common::family();
    let teacher = registry.schema("Teacher").unwrap();
    let path = teacher
        .rel("students")
        .unwrap()
        .rel("teacher")
        .unwrap()
        .rel("students")
        .unwrap();

    let query = select(&teacher)
        .columns([teacher.attr("name").unwrap()])
        .unwrap()
        .join(&path)
        .unwrap();

    assert_eq!(
        query.to_soql(),
        "SELECT Teacher.Name, (SELECT Child.Id, Child.Name, Child.Teacher.Id, \
         Child.Teacher.Name, (SELECT Child.Id, Child.Name FROM Child.Teacher.Students) \
         FROM Teacher.Students) FROM Teacher"
    );
}

#[test]
fn test_join_with_keeps_earlier_nested_joins() {
    let registry = common::family();
    let teacher = registry.schema("Teacher").unwrap();
    let child = registry.schema("Child").unwrap();
    let students = teacher.rel("students").unwrap();

    let query = select(&teacher)
        .join(&students.rel("mom").unwrap())
        .unwrap()
        .join_with(&students, select(&child).limit(5).unwrap())
        .unwrap();

    assert_eq!(
        query.to_soql(),
        "SELECT Teacher.Id, Teacher.Name, (SELECT Child.Id, Child.Name, Child.Mom.Id, \
         Child.Mom.Name, Child.Mom.Age FROM Teacher.Students LIMIT 5) FROM Teacher"
    );
}

#[test]
fn test_join_from_another_schema_is_rejected() {
    let registry = common::family();
    let child = registry.schema("Child").unwrap();
    let teacher = registry.schema("Teacher").unwrap();

    let err = select(&child)
        .join(&teacher.rel("students").unwrap())
        .unwrap_err();
    assert!(matches!(err, SoqlError::InvalidJoin { .. }));

    let err = child.rel("name").unwrap_err();
    assert!(matches!(err, SoqlError::InvalidJoin { .. }));
}

#[test]
fn test_builder_values_are_independent() {
    let registry = common::crm();
    let user = registry.schema("User").unwrap();

    let base = select(&user);
    let limited = base.clone().limit(1).unwrap();

    assert_eq!(base.to_soql(), "SELECT User.Id, User.Email FROM User");
    assert_eq!(limited.to_soql(), "SELECT User.Id, User.Email FROM User LIMIT 1");
}
