//! Wire types shared with the upstream shout API.

use std::fmt;

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// A shout request as sent by callers and forwarded upstream.
///
/// Keys are written upper case (`INPUT`, `OUTPUT`) per the upstream
/// convention. On the way in, keys match in any ASCII case and unknown keys
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShoutRequest {
    #[serde(rename = "INPUT")]
    pub input: String,

    #[serde(rename = "OUTPUT")]
    pub output: String,
}

impl ShoutRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: String::new(),
        }
    }
}

impl<'de> Deserialize<'de> for ShoutRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = deserializer.deserialize_map(ShoutFieldsVisitor)?;
        Ok(Self {
            input: fields.input.ok_or_else(|| de::Error::missing_field("INPUT"))?,
            output: fields.output.unwrap_or_default(),
        })
    }
}

/// Upstream reply. Either key may be missing.
#[derive(Debug, Default)]
pub(crate) struct UpstreamReply {
    pub output: String,
}

impl<'de> Deserialize<'de> for UpstreamReply {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = deserializer.deserialize_map(ShoutFieldsVisitor)?;
        Ok(Self {
            output: fields.output.unwrap_or_default(),
        })
    }
}

#[derive(Default)]
struct ShoutFields {
    input: Option<String>,
    output: Option<String>,
}

/// Collects `INPUT`/`OUTPUT` regardless of key case. A repeated key keeps
/// the last value.
struct ShoutFieldsVisitor;

impl<'de> Visitor<'de> for ShoutFieldsVisitor {
    type Value = ShoutFields;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with INPUT and OUTPUT strings")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ShoutFields, A::Error> {
        let mut fields = ShoutFields::default();
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("INPUT") {
                fields.input = Some(map.next_value()?);
            } else if key.eq_ignore_ascii_case("OUTPUT") {
                fields.output = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(fields)
    }
}
