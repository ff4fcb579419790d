mod common;

use common::*;
use recschema::{
    Constraint, FieldSpec, PrimitiveType, SchemaCodec, SchemaError, SchemaNode,
};

fn kitchen_sink_schema() -> SchemaNode {
    SchemaNode::new("event")
        .with_field(
            FieldSpec::new("kind", PrimitiveType::String)
                .with_constraint(Constraint::one_of(["create", "update", "delete"]).unwrap()),
        )
        .with_field(
            FieldSpec::new("score", PrimitiveType::Float)
                .with_coercion(true)
                .with_constraint(Constraint::range(0.0, 1.0).unwrap()),
        )
        .with_field(
            FieldSpec::new("retries", PrimitiveType::Integer)
                .with_constraint(Constraint::range_exclusive(-1.0, 10.0).unwrap()),
        )
        .with_field(
            FieldSpec::new("comment", PrimitiveType::String)
                .with_nullable(true)
                .with_constraint(Constraint::length(1, 280).unwrap())
                .with_constraint(Constraint::regex(r"^[^\n]*$").unwrap()),
        )
        .with_field(FieldSpec::new("active", PrimitiveType::Boolean))
        .with_field(
            FieldSpec::new("created", PrimitiveType::Timestamp)
                .with_coercion(true)
                .with_tz_aware(true),
        )
        .with_field(
            FieldSpec::new("updated", PrimitiveType::Timestamp).with_coercion(true),
        )
        .with_field(
            FieldSpec::new(
                "actor",
                SchemaNode::new("actor")
                    .with_field(FieldSpec::new("id", PrimitiveType::Integer))
                    .with_field(
                        FieldSpec::new("handle", PrimitiveType::String)
                            .with_constraint(Constraint::length(3, 20).unwrap()),
                    ),
            )
            .with_nullable(true),
        )
        .build()
        .expect("kitchen-sink schema is valid")
}

#[test]
fn test_roundtrip_covers_every_constraint_kind() {
    let schema = kitchen_sink_schema();
    let yaml = SchemaCodec::to_yaml(&schema).unwrap();
    let parsed = SchemaCodec::from_yaml(&yaml).unwrap();
    assert_eq!(schema, parsed);
}

#[test]
fn test_roundtrip_user_schema() {
    let schema = user_schema();
    let yaml = SchemaCodec::to_yaml(&schema).unwrap();
    let parsed = SchemaCodec::from_yaml(&yaml).unwrap();
    assert_eq!(schema, parsed);
}

#[test]
fn test_yaml_shape() {
    let yaml = SchemaCodec::to_yaml(&kitchen_sink_schema()).unwrap();

    assert!(yaml.contains("name: event"));
    assert!(yaml.contains("type: string"));
    assert!(yaml.contains("kind: one_of"));
    assert!(yaml.contains("kind: range"));
    assert!(yaml.contains("kind: length"));
    assert!(yaml.contains("kind: regex"));
    assert!(yaml.contains("tz_aware: true"));
    assert!(yaml.contains("nullable: true"));
    // Default attribute values are omitted rather than written as false.
    assert!(!yaml.contains("nullable: false"));
    assert!(!yaml.contains("tz_aware: false"));
    assert!(!yaml.contains("coerce: false"));
}

#[test]
fn test_parse_handwritten_document() {
    let yaml = r#"
name: user
fields:
- name: gender
  type: string
  constraints:
  - kind: one_of
    allowed:
    - female
    - male
- name: age
  type: integer
  coerce: true
  constraints:
  - kind: range
    min: 0
    max: 100
- name: id
  type:
    name: record_id
    fields:
    - name: name
      type: string
    - name: value
      type: string
      nullable: true
"#;

    let parsed = SchemaCodec::from_yaml(yaml).unwrap();
    let expected = SchemaNode::new("user")
        .with_field(
            FieldSpec::new("gender", PrimitiveType::String)
                .with_constraint(Constraint::one_of(["female", "male"]).unwrap()),
        )
        .with_field(
            FieldSpec::new("age", PrimitiveType::Integer)
                .with_coercion(true)
                .with_constraint(Constraint::range(0.0, 100.0).unwrap()),
        )
        .with_field(FieldSpec::new(
            "id",
            SchemaNode::new("record_id")
                .with_field(FieldSpec::new("name", PrimitiveType::String))
                .with_field(
                    FieldSpec::new("value", PrimitiveType::String).with_nullable(true),
                ),
        ))
        .build()
        .unwrap();
    assert_eq!(parsed, expected);
}

#[test]
fn test_range_inclusive_defaults_to_true_when_omitted() {
    let yaml = r#"
name: record
fields:
- name: age
  type: integer
  constraints:
  - kind: range
    min: 0
    max: 100
"#;
    let parsed = SchemaCodec::from_yaml(yaml).unwrap();
    let constraint = &parsed.field("age").unwrap().constraints[0];
    assert_eq!(constraint, &Constraint::range(0.0, 100.0).unwrap());
}

#[test]
fn test_malformed_yaml_is_rejected() {
    let err = SchemaCodec::from_yaml("{not yaml: [").unwrap_err();
    assert!(matches!(err, SchemaError::Yaml(_)));
}

#[test]
fn test_bad_pattern_fails_at_parse_time() {
    let yaml = r#"
name: record
fields:
- name: code
  type: string
  constraints:
  - kind: regex
    pattern: '[unclosed'
"#;
    let err = SchemaCodec::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SchemaError::Yaml(_)));
    assert!(err.to_string().contains("invalid pattern"));
}

#[test]
fn test_inverted_range_is_rejected() {
    let yaml = r#"
name: record
fields:
- name: age
  type: integer
  constraints:
  - kind: range
    min: 10
    max: 1
"#;
    let err = SchemaCodec::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SchemaError::Constraint { .. }));
    assert!(err.to_string().contains("inverted"));
}

#[test]
fn test_empty_allowed_set_is_rejected() {
    let yaml = r#"
name: record
fields:
- name: kind
  type: string
  constraints:
  - kind: one_of
    allowed: []
"#;
    let err = SchemaCodec::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SchemaError::Constraint { .. }));
}

#[test]
fn test_duplicate_field_names_are_rejected() {
    let yaml = r#"
name: record
fields:
- name: city
  type: string
- name: city
  type: string
"#;
    let err = SchemaCodec::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SchemaError::Schema { .. }));
    assert!(err.to_string().contains("duplicate"));
}

#[test]
fn test_cyclic_node_names_are_rejected() {
    let yaml = r#"
name: user
fields:
- name: friend
  type:
    name: user
    fields:
    - name: email
      type: string
"#;
    let err = SchemaCodec::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SchemaError::Schema { .. }));
    assert!(err.to_string().contains("cyclic"));
}

#[test]
fn test_tz_aware_requires_timestamp_field() {
    let yaml = r#"
name: record
fields:
- name: city
  type: string
  tz_aware: true
"#;
    let err = SchemaCodec::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SchemaError::Schema { .. }));
}

#[test]
fn test_constraints_forbidden_on_nested_fields() {
    let yaml = r#"
name: record
fields:
- name: nested
  type:
    name: inner
    fields:
    - name: leaf
      type: string
  constraints:
  - kind: length
    min: 0
    max: 1
"#;
    let err = SchemaCodec::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SchemaError::Schema { .. }));
}

#[test]
fn test_constraint_applicability_is_checked_on_parse() {
    let yaml = r#"
name: record
fields:
- name: city
  type: string
  constraints:
  - kind: range
    min: 0
    max: 10
"#;
    let err = SchemaCodec::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, SchemaError::Schema { .. }));
    assert!(err.to_string().contains("does not apply"));
}

#[test]
fn test_unknown_attributes_are_rejected() {
    let yaml = r#"
name: record
fields:
- name: city
  type: string
  nulable: true
"#;
    assert!(SchemaCodec::from_yaml(yaml).is_err());
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("user.schema.yaml");

    let schema = user_schema();
    SchemaCodec::save(&schema, &path).unwrap();
    let loaded = SchemaCodec::load(&path).unwrap();
    assert_eq!(schema, loaded);
}

#[test]
fn test_load_missing_file() {
    let err = SchemaCodec::load("/nonexistent/user.schema.yaml").unwrap_err();
    assert!(matches!(err, SchemaError::Load { .. }));
    assert!(err.to_string().contains("/nonexistent/user.schema.yaml"));
}

#[test]
fn test_save_rejects_invalid_schema() {
    // Assembled by hand to bypass build(): two fields share a name.
    let invalid = SchemaNode::new("record")
        .with_field(FieldSpec::new("city", PrimitiveType::String))
        .with_field(FieldSpec::new("city", PrimitiveType::String));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("invalid.schema.yaml");
    let err = SchemaCodec::save(&invalid, &path).unwrap_err();
    assert!(matches!(err, SchemaError::Schema { .. }));
    assert!(!path.exists());
}
