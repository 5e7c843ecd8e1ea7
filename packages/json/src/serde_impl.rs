//! serde support, so a tree can be handed to or built from any serde format.

use crate::number::Number;
use crate::value::Value;
use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use std::fmt;

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => n.serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(elements) => {
                let mut seq = serializer.serialize_seq(Some(elements.len()))?;
                for element in elements {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(members) => {
                // Entries go out in insertion order, duplicates included
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for (key, member) in members {
                    map.serialize_entry(key, member)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_i64() {
            Some(int) => serializer.serialize_i64(int),
            None => serializer.serialize_f64(self.as_f64()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from_i64(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from_f64(value as f64)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::from_f64(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut elements = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(element) = seq.next_element()? {
                    elements.push(element);
                }
                Ok(Value::Array(elements))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut members = Vec::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    members.push((key, value));
                }
                Ok(Value::Object(members))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse, Value};

    #[test]
    fn test_serialize_matches_print() {
        let source = r#"{"url":"https://x/a.png","width":1280,"ratio":0.5,"ok":true,"tags":[null,"a"]}"#;
        let value = parse(source).unwrap();

        assert_eq!(serde_json::to_string(&value).unwrap(), source);
    }

    #[test]
    fn test_serialize_keeps_duplicates_in_order() {
        let value = parse(r#"{"b":1,"a":2,"b":3}"#).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":1,"a":2,"b":3}"#);
    }

    #[test]
    fn test_deserialize_from_serde_json() {
        let value: Value = serde_json::from_str(r#"{"z":[1,2.5,"s"],"a":{"n":null}}"#).unwrap();

        let keys: Vec<_> = value.members().map(|(key, _)| key).collect();
        assert_eq!(keys, ["z", "a"]);
        assert_eq!(value.get_path("z.1").and_then(Value::as_f64), Some(2.5));
        assert!(value.get_path("a.n").unwrap().is_null());
    }

    #[test]
    fn test_integers_stay_integers() {
        let value: Value = serde_json::from_str("[7, -7, 18446744073709551615]").unwrap();
        let elements = value.as_array().unwrap();

        assert_eq!(elements[0].as_i64(), Some(7));
        assert_eq!(elements[1].as_i64(), Some(-7));
        assert_eq!(elements[2].as_i64(), None);
        assert_eq!(serde_json::to_string(&elements[0]).unwrap(), "7");
    }

    #[test]
    fn test_through_serde_json_value() {
        let ours = parse(r#"{"a":[true,false],"b":"x"}"#).unwrap();
        let theirs = serde_json::to_value(&ours).unwrap();

        assert_eq!(theirs["a"][1], serde_json::Value::Bool(false));
        assert_eq!(theirs["b"], "x");

        let back: Value = serde_json::from_value(theirs).unwrap();
        assert_eq!(back.get("b").and_then(Value::as_str), Some("x"));
    }
}
