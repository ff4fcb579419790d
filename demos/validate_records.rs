/*!
 * Record Validation Walkthrough
 * =============================
 *
 * This demo loads a schema from YAML, replays a small NDJSON batch of
 * user records against it, and prints a validation report per record.
 *
 * It covers the three everyday workflows: collect-all validation for
 * diagnostics, fail-fast validation for cheap accept/reject gates, and
 * normalization for applying the schema's declared coercions.
 *
 * Run with `RUST_LOG=recschema=debug` to see schema and source logging.
 */

use std::path::{Path, PathBuf};

use recschema::{RecordSource, SchemaCodec, SchemaNode, Validator};
use serde_json::Value;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let demo_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

    let schema = load_schema(&demo_dir)?;
    let records = validate_batch(&demo_dir, &schema)?;
    compare_modes(&records, &schema);
    normalize_records(&records, &schema);

    Ok(())
}

fn load_schema(demo_dir: &PathBuf) -> Result<SchemaNode, Box<dyn std::error::Error>> {
    println!("📋 1. Loading the schema");
    println!("------------------------");

    let schema = SchemaCodec::load(demo_dir.join("user.schema.yaml"))?;
    let nested = schema
        .fields
        .iter()
        .filter(|field| field.field_type.is_nested())
        .count();
    println!(
        "   Loaded schema '{}' with {} top-level fields ({nested} nested)",
        schema.name,
        schema.len()
    );
    for field in &schema.fields {
        let kind = match field.field_type.as_node() {
            Some(node) => format!("nested ({} fields)", node.len()),
            None => field
                .field_type
                .primitive()
                .map(|p| p.to_string())
                .unwrap_or_default(),
        };
        println!("   - {}: {}", field.name, kind);
    }

    println!();
    Ok(schema)
}

fn validate_batch(
    demo_dir: &PathBuf,
    schema: &SchemaNode,
) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    println!("🔍 2. Validating the record batch (collect-all)");
    println!("-----------------------------------------------");

    let validator = Validator::new();
    let mut records = Vec::new();
    let mut valid_count = 0;

    for (i, result) in RecordSource::open(demo_dir.join("records.ndjson"))?.enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                println!("   ❌ record {}: unreadable ({e})", i + 1);
                continue;
            }
        };

        let report = validator.validate(&record, schema);
        if report.is_valid() {
            valid_count += 1;
            println!("   ✅ record {}: valid", i + 1);
        } else {
            println!("   ❌ record {}: {} error(s)", i + 1, report.len());
            for error in &report {
                println!("      [{}] {}", error.kind, error);
            }
        }
        records.push(record);
    }

    println!("   => {valid_count}/{} records valid\n", records.len());
    Ok(records)
}

fn compare_modes(records: &[Value], schema: &SchemaNode) {
    println!("⚡ 3. Fail-fast versus collect-all");
    println!("---------------------------------");

    let collect_all = Validator::new();
    let fail_fast = Validator::fail_fast();

    for (i, record) in records.iter().enumerate() {
        let full = collect_all.validate(record, schema);
        if full.is_valid() {
            continue;
        }
        let first = fail_fast.validate(record, schema);
        println!(
            "   record {}: fail-fast stopped after {} of {} error(s)",
            i + 1,
            first.len(),
            full.len()
        );
        if let Some(error) = first.first() {
            println!("      first error: {error}");
        }
    }

    println!();
}

fn normalize_records(records: &[Value], schema: &SchemaNode) {
    println!("🔧 4. Normalization");
    println!("-------------------");

    let validator = Validator::new();
    for (i, record) in records.iter().enumerate() {
        let (normalized, report) = validator.normalize(record, schema);
        let before = record.pointer("/location/postcode");
        let after = normalized.pointer("/location/postcode");
        match (before, after) {
            (Some(b), Some(a)) if b != a => {
                println!("   record {}: postcode {b} coerced to {a}", i + 1);
            }
            (Some(b), Some(_)) => {
                println!("   record {}: postcode {b} already canonical", i + 1);
            }
            _ => {
                println!("   record {}: no postcode to normalize", i + 1);
            }
        }
        if !report.is_valid() {
            println!(
                "      ({} error(s) remain; offending fields kept their observed values)",
                report.len()
            );
        }
    }
}
