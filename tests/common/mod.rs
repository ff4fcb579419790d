use recschema::{Constraint, FieldSpec, PrimitiveType, SchemaNode, well_known};
use serde_json::{Value, json};

/// Schema for one randomuser-style user record, the shape the crate was
/// built around: flat identity fields plus nested name, location, login,
/// date, id, and picture objects.
#[allow(dead_code)]
pub fn user_schema() -> SchemaNode {
    SchemaNode::new("user")
        .with_field(
            FieldSpec::new("gender", PrimitiveType::String)
                .with_constraint(Constraint::one_of(["male", "female"]).unwrap()),
        )
        .with_field(
            FieldSpec::new("email", PrimitiveType::String)
                .with_constraint(well_known::EMAIL.clone()),
        )
        .with_field(FieldSpec::new("phone", PrimitiveType::String))
        .with_field(FieldSpec::new("cell", PrimitiveType::String))
        .with_field(
            FieldSpec::new("nat", PrimitiveType::String)
                .with_constraint(Constraint::length(2, 2).unwrap()),
        )
        .with_field(FieldSpec::new("name", name_node()))
        .with_field(FieldSpec::new("location", location_node()))
        .with_field(FieldSpec::new("login", login_node()))
        .with_field(FieldSpec::new("dob", date_age_node()))
        .with_field(FieldSpec::new("registered", date_age_node()))
        .with_field(FieldSpec::new("id", id_node()))
        .with_field(FieldSpec::new("picture", picture_node()))
        .build()
        .expect("user fixture schema is valid")
}

#[allow(dead_code)]
fn name_node() -> SchemaNode {
    SchemaNode::new("name")
        .with_field(FieldSpec::new("title", PrimitiveType::String))
        .with_field(FieldSpec::new("first", PrimitiveType::String))
        .with_field(FieldSpec::new("last", PrimitiveType::String))
}

#[allow(dead_code)]
fn street_node() -> SchemaNode {
    SchemaNode::new("street")
        .with_field(FieldSpec::new("number", PrimitiveType::Integer))
        .with_field(FieldSpec::new("name", PrimitiveType::String))
}

#[allow(dead_code)]
fn coordinates_node() -> SchemaNode {
    // Coordinates arrive as numeric strings in the upstream feed.
    SchemaNode::new("coordinates")
        .with_field(
            FieldSpec::new("latitude", PrimitiveType::Float)
                .with_coercion(true)
                .with_constraint(Constraint::range(-90.0, 90.0).unwrap()),
        )
        .with_field(
            FieldSpec::new("longitude", PrimitiveType::Float)
                .with_coercion(true)
                .with_constraint(Constraint::range(-180.0, 180.0).unwrap()),
        )
}

#[allow(dead_code)]
fn timezone_node() -> SchemaNode {
    SchemaNode::new("timezone")
        .with_field(FieldSpec::new("offset", PrimitiveType::String))
        .with_field(FieldSpec::new("description", PrimitiveType::String))
}

#[allow(dead_code)]
fn location_node() -> SchemaNode {
    SchemaNode::new("location")
        .with_field(FieldSpec::new("city", PrimitiveType::String))
        .with_field(FieldSpec::new("state", PrimitiveType::String))
        .with_field(FieldSpec::new("country", PrimitiveType::String))
        // Postcodes arrive as bare numbers for some locales; coercion
        // keeps them as strings without loss.
        .with_field(FieldSpec::new("postcode", PrimitiveType::String).with_coercion(true))
        .with_field(FieldSpec::new("street", street_node()))
        .with_field(FieldSpec::new("coordinates", coordinates_node()))
        .with_field(FieldSpec::new("timezone", timezone_node()))
}

#[allow(dead_code)]
fn login_node() -> SchemaNode {
    SchemaNode::new("login")
        .with_field(
            FieldSpec::new("uuid", PrimitiveType::String)
                .with_constraint(well_known::UUID.clone()),
        )
        .with_field(FieldSpec::new("username", PrimitiveType::String))
        .with_field(FieldSpec::new("password", PrimitiveType::String))
        .with_field(FieldSpec::new("salt", PrimitiveType::String))
        .with_field(
            FieldSpec::new("md5", PrimitiveType::String)
                .with_constraint(well_known::MD5_HEX.clone()),
        )
        .with_field(
            FieldSpec::new("sha1", PrimitiveType::String)
                .with_constraint(well_known::SHA1_HEX.clone()),
        )
        .with_field(
            FieldSpec::new("sha256", PrimitiveType::String)
                .with_constraint(well_known::SHA256_HEX.clone()),
        )
}

#[allow(dead_code)]
fn date_age_node() -> SchemaNode {
    SchemaNode::new("date_age")
        .with_field(
            FieldSpec::new("date", PrimitiveType::Timestamp)
                .with_coercion(true)
                .with_tz_aware(true),
        )
        .with_field(
            FieldSpec::new("age", PrimitiveType::Integer)
                .with_constraint(Constraint::range(0.0, 100.0).unwrap()),
        )
}

#[allow(dead_code)]
fn id_node() -> SchemaNode {
    SchemaNode::new("record_id")
        .with_field(FieldSpec::new("name", PrimitiveType::String))
        .with_field(FieldSpec::new("value", PrimitiveType::String).with_nullable(true))
}

#[allow(dead_code)]
fn picture_node() -> SchemaNode {
    SchemaNode::new("picture")
        .with_field(FieldSpec::new("large", PrimitiveType::String))
        .with_field(FieldSpec::new("medium", PrimitiveType::String))
        .with_field(FieldSpec::new("thumbnail", PrimitiveType::String))
}

/// A record that satisfies [`user_schema`] without any coercion.
#[allow(dead_code)]
pub fn sample_record() -> Value {
    json!({
        "gender": "female",
        "name": {"title": "Miss", "first": "Jennie", "last": "Nichols"},
        "location": {
            "street": {"number": 8929, "name": "Valwood Pkwy"},
            "city": "Billings",
            "state": "Michigan",
            "country": "United States",
            "postcode": "63104",
            "coordinates": {"latitude": "-69.8246", "longitude": "134.8719"},
            "timezone": {"offset": "+9:30", "description": "Adelaide, Darwin, Broken Hill"}
        },
        "email": "jennie.nichols@example.com",
        "login": {
            "uuid": "8040b8e6-5c8b-4db5-9b28-46d57479d836",
            "username": "yellowpeacock117",
            "password": "addison",
            "salt": "sld1yGtd",
            "md5": "ab54ac4c0be9480ae8fa5e9e2a5196a3",
            "sha1": "edcf2ce613cbdea349133c52dc2f3b83168dc51b",
            "sha256": "48df5229235ada28389b91e60a935e4f9b73eb4bdb855ef9258a1751f10bdc5d"
        },
        "dob": {"date": "1992-03-08T15:13:16.688Z", "age": 30},
        "registered": {"date": "2007-07-09T05:51:59.390Z", "age": 14},
        "phone": "(272) 790-0888",
        "cell": "(489) 330-2385",
        "id": {"name": "SSN", "value": "405-88-3636"},
        "picture": {
            "large": "https://randomuser.me/api/portraits/women/75.jpg",
            "medium": "https://randomuser.me/api/portraits/med/women/75.jpg",
            "thumbnail": "https://randomuser.me/api/portraits/thumb/women/75.jpg"
        },
        "nat": "US"
    })
}

/// Wraps a single field spec in a one-field schema named `record`.
#[allow(dead_code)]
pub fn single_field_schema(field: FieldSpec) -> SchemaNode {
    SchemaNode::new("record")
        .with_field(field)
        .build()
        .expect("single-field schema is valid")
}
