//! Schema-driven random example bodies
//!
//! Walks a resolved JSON Schema and fills every node with a plausible random
//! value. Used directly in `random` mode and as the fallback whenever LLM
//! generation fails.

use chrono::{Duration, Local, Utc};
use fake::faker::internet::en::{IPv4, IPv6};
use fake::Fake;
use rand::Rng;
use serde_json::{json, Map, Number, Value};

const SAMPLE_EMAILS: [&str; 3] = ["alice@example.com", "bob@test.org", "charlie@mail.io"];

/// Upper bound on generated array length, whatever `minItems` asks for
pub const MAX_ARRAY_ITEMS: u64 = 100;

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBodyGenerator;

impl RandomBodyGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate a value matching `schema`
    pub fn generate(&self, schema: &Value) -> Value {
        if schema.is_null() {
            return Value::Null;
        }

        if schema.get("$ref").is_some() {
            return json!({ "error": "Schema references not yet resolved. Pass resolved schema." });
        }

        if let Some(choice) = schema
            .get("enum")
            .and_then(|v| v.as_array())
            .filter(|values| !values.is_empty())
        {
            let idx = rand::thread_rng().gen_range(0..choice.len());
            return choice[idx].clone();
        }

        match schema_type(schema).as_str() {
            "string" => json!(self.generate_string(schema.get("format").and_then(|v| v.as_str()))),
            "integer" => {
                let min = bound(schema, "minimum").map(|v| v as i64).unwrap_or(1);
                let max = bound(schema, "maximum").map(|v| v as i64).unwrap_or(1000).max(min);
                json!(rand::thread_rng().gen_range(min..=max))
            }
            "number" => {
                let min = bound(schema, "minimum").unwrap_or(1.0);
                let max = bound(schema, "maximum").unwrap_or(1000.0).max(min);
                let value = random_number(min, max);
                let rounded = (value * 100.0).round() / 100.0;
                let value = if rounded.is_finite() { rounded } else { value };
                Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null)
            }
            "boolean" => json!(rand::thread_rng().gen_bool(0.5)),
            "array" => {
                let max_items = schema.get("maxItems").and_then(|v| v.as_u64()).unwrap_or(MAX_ARRAY_ITEMS);
                let count = schema
                    .get("minItems")
                    .and_then(|v| v.as_u64())
                    .unwrap_or(1)
                    .min(max_items)
                    .min(MAX_ARRAY_ITEMS);
                let items = schema.get("items").unwrap_or(&Value::Null);
                Value::Array((0..count).map(|_| self.generate(items)).collect())
            }
            _ => {
                let mut obj = Map::new();
                if let Some(properties) = schema.get("properties").and_then(|v| v.as_object()) {
                    for (name, prop) in properties {
                        obj.insert(name.clone(), self.generate(prop));
                    }
                }
                Value::Object(obj)
            }
        }
    }

    fn generate_string(&self, format: Option<&str>) -> String {
        let mut rng = rand::thread_rng();
        let Some(format) = format else {
            return format!("string_{}", rng.gen_range(0..1000));
        };

        match format {
            "date" => (Local::now().date_naive() - Duration::days(rng.gen_range(0..365)))
                .format("%Y-%m-%d")
                .to_string(),
            "date-time" => (Utc::now() - Duration::days(rng.gen_range(0..365))).to_rfc3339(),
            "email" => SAMPLE_EMAILS[rng.gen_range(0..SAMPLE_EMAILS.len())].to_string(),
            "uuid" => uuid::Uuid::new_v4().to_string(),
            "uri" => format!("https://example.com/{}", &uuid::Uuid::new_v4().to_string()[..8]),
            "ipv4" => IPv4().fake::<String>(),
            "ipv6" => IPv6().fake::<String>(),
            _ => format!("value_{}", rng.gen_range(0..1000)),
        }
    }
}

/// Lower-cased `type`, defaulting to "object".
///
/// A type list (`["string", "null"]`) uses its first non-null entry.
fn schema_type(schema: &Value) -> String {
    let ty = match schema.get("type") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(|t| t.as_str())
            .find(|t| *t != "null"),
        _ => None,
    };
    ty.unwrap_or("object").to_lowercase()
}

/// Uniform in `[min, max]`; a span wider than `f64::MAX` is interpolated instead
fn random_number(min: f64, max: f64) -> f64 {
    let mut rng = rand::thread_rng();
    if (max - min).is_finite() {
        rng.gen_range(min..=max)
    } else {
        let t: f64 = rng.gen();
        (min * (1.0 - t) + max * t).clamp(min, max)
    }
}

fn bound(schema: &Value, key: &str) -> Option<f64> {
    schema.get(key).and_then(|v| v.as_f64())
}
