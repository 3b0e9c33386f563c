//! Wire models shared across handlers.
//!
//! Everything here is built from model output, which is shaped by prompt
//! instructions only. Decoding is therefore lenient: absent fields default,
//! and scalars of the wrong kind are coerced where no information is lost.

pub mod job;
pub mod resume;

pub(crate) mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Renders a JSON scalar as text. Objects are flattened to their values.
    fn value_to_text(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Array(items) => {
                let parts: Vec<String> = items.into_iter().filter_map(value_to_text).collect();
                (!parts.is_empty()).then(|| parts.join(", "))
            }
            Value::Object(map) => {
                let parts: Vec<String> = map.into_iter().filter_map(|(_, v)| value_to_text(v)).collect();
                (!parts.is_empty()).then(|| parts.join(" - "))
            }
        }
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(value_to_text(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn opt_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(value_to_text(Value::deserialize(deserializer)?).filter(|s| !s.trim().is_empty()))
    }

    /// Accepts a list of anything text-like, or a single comma-separated string.
    pub fn string_list<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<String>, D::Error> {
        let items = match Value::deserialize(deserializer)? {
            Value::Array(items) => items.into_iter().filter_map(value_to_text).collect(),
            Value::String(s) => s
                .split(',')
                .map(|part| part.trim().to_string())
                .collect(),
            Value::Null => Vec::new(),
            other => value_to_text(other).into_iter().collect(),
        };
        Ok(items.into_iter().filter(|s: &String| !s.trim().is_empty()).collect())
    }

    /// Accepts integers, floats and numeric strings (`"85%"` too), clamped to
    /// 0–100; anything else is `None`.
    pub fn opt_fit_score<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<u8>, D::Error> {
        let score = match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.round() as i64)),
            Value::String(s) => s
                .trim()
                .trim_end_matches('%')
                .parse::<f64>()
                .ok()
                .map(|f| f.round() as i64),
            _ => None,
        };
        Ok(score.map(|s| s.clamp(0, 100) as u8))
    }

    /// Accepts a non-negative integer or a numeric string; anything else is `None`.
    pub fn opt_index<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<usize>, D::Error> {
        let index = match Value::deserialize(deserializer)? {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<usize>().ok(),
            _ => None,
        };
        Ok(index)
    }
}
