use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

/// A decoded mapping with typed, optional field lookup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload {
    fields: Map<String, Value>,
}

impl Payload {
    pub fn new(fields: Map<String, Value>) -> Self {
        Payload { fields }
    }

    /// Looks up `key` as a `T`.
    ///
    /// Absent keys, `null` and values of the wrong shape all yield `None`.
    pub fn field<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.fields.get(key)?;
        if value.is_null() {
            return None;
        }
        match <T as Deserialize<'_>>::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!("ignoring field {:?}: {}", key, err);
                None
            }
        }
    }

    /// Looks up `key` as a whole number. Floats with no fractional part, such
    /// as `4096.0` or `1e3`, count as whole numbers.
    pub fn integer(&self, key: &str) -> Option<i64> {
        let number: Number = self.field(key)?;
        if let Some(int) = number.as_i64() {
            return Some(int);
        }
        match number.as_f64() {
            Some(float)
                if float.fract() == 0.0
                    && float >= i64::MIN as f64
                    && float < i64::MAX as f64 =>
            {
                Some(float as i64)
            }
            _ => {
                debug!("ignoring field {:?}: {} is not a 64-bit integer", key, number);
                None
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => Payload::new(map),
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn mistyped_and_null_fields_are_unset() {
        let p = payload(json!({ "ram": "lots", "nickname": null, "command": ["java", 3] }));
        assert_eq!(p.field::<i64>("ram"), None);
        assert_eq!(p.field::<String>("nickname"), None);
        assert_eq!(p.field::<Vec<String>>("command"), None);
        assert!(p.contains("ram"));
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn integral_floats_are_integers() {
        let p = payload(json!({
            "int": 4096,
            "float": 4096.0,
            "exp": 1e3,
            "negative": -2.0,
            "half": 2048.5,
            "huge": 18446744073709551615u64,
            "text": "4096"
        }));
        assert_eq!(p.integer("int"), Some(4096));
        assert_eq!(p.integer("float"), Some(4096));
        assert_eq!(p.integer("exp"), Some(1000));
        assert_eq!(p.integer("negative"), Some(-2));
        assert_eq!(p.integer("half"), None);
        assert_eq!(p.integer("huge"), None);
        assert_eq!(p.integer("text"), None);
        assert_eq!(p.integer("missing"), None);
    }

    #[test]
    fn extra_keys_are_kept_but_ignored() {
        let p = payload(json!({ "url": "https://example/pack.zip", "extra": true }));
        assert_eq!(p.field::<String>("url").as_deref(), Some("https://example/pack.zip"));
        assert_eq!(p.into_inner().len(), 2);
    }
}
