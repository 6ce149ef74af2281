//! serde adapter for the document tree.
//!
//! Any self-describing serde format can be read into a [`Content`] and written
//! back out of one. Member order is kept as the format delivers it.

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

use super::node::{Content, Node, Scalar};

/// Key the `toml` deserializer uses to smuggle datetimes through serde
const TOML_DATETIME_FIELD: &str = "$__toml_private_datetime";

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(value) => serializer.serialize_bool(*value),
            Scalar::Int(value) => serializer.serialize_i64(*value),
            Scalar::UInt(value) => serializer.serialize_u64(*value),
            Scalar::Float(value) => serializer.serialize_f64(*value),
            Scalar::String(value) => serializer.serialize_str(value),
        }
    }
}

impl Serialize for Content {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Content::Scalar(scalar) => scalar.serialize(serializer),
            Content::Record(members) => {
                let mut map = serializer.serialize_map(Some(members.len()))?;
                for node in members {
                    map.serialize_entry(&node.name, &node.content)?;
                }
                map.end()
            }
            Content::Sequence(items) => serializer.collect_seq(items),
        }
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ContentVisitor)
    }
}

struct ContentVisitor;

impl<'de> Visitor<'de> for ContentVisitor {
    type Value = Content;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a structured document value")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Content, E> {
        Ok(Content::Scalar(Scalar::Bool(value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Content, E> {
        Ok(Content::Scalar(Scalar::Int(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Content, E> {
        Ok(Content::Scalar(match i64::try_from(value) {
            Ok(value) => Scalar::Int(value),
            Err(_) => Scalar::UInt(value),
        }))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Content, E> {
        Ok(Content::Scalar(Scalar::Float(value)))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Content, E> {
        Ok(Content::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Content, E> {
        Ok(Content::from(value))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Content, E> {
        Ok(Content::null())
    }

    fn visit_none<E: de::Error>(self) -> Result<Content, E> {
        Ok(Content::null())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Content, D::Error> {
        Content::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Content, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<Content>()? {
            items.push(item);
        }
        Ok(Content::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Content, A::Error> {
        let mut members = Vec::with_capacity(map.size_hint().unwrap_or(0));

        while let Some(MemberName(name)) = map.next_key()? {
            if members.is_empty() && name == TOML_DATETIME_FIELD {
                let datetime: String = map.next_value()?;
                return Ok(Content::from(datetime));
            }
            let content: Content = map.next_value()?;
            members.push(Node { name, content });
        }

        Ok(Content::Record(members))
    }
}

/// Record member name. YAML allows non-string keys; they are stringified.
struct MemberName(String);

impl<'de> Deserialize<'de> for MemberName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MemberNameVisitor)
    }
}

struct MemberNameVisitor;

impl Visitor<'_> for MemberNameVisitor {
    type Value = MemberName;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar member name")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<MemberName, E> {
        Ok(MemberName(value.to_string()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<MemberName, E> {
        Ok(MemberName(value))
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<MemberName, E> {
        Ok(MemberName(value.to_string()))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<MemberName, E> {
        Ok(MemberName(value.to_string()))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<MemberName, E> {
        Ok(MemberName(value.to_string()))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<MemberName, E> {
        Ok(MemberName(value.to_string()))
    }

    fn visit_unit<E: de::Error>(self) -> Result<MemberName, E> {
        Ok(MemberName("null".to_string()))
    }
}
