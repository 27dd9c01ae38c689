use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// Feeds aren't consistent about quoting IDs, so accept both 501 and "501". They always serialize
// as strings.

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteID(#[serde(deserialize_with = "string_or_number")] String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DirectionID(#[serde(deserialize_with = "string_or_number")] String);

impl RouteID {
    pub fn new<I: Into<String>>(id: I) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DirectionID {
    pub fn new<I: Into<String>>(id: I) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for DirectionID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        // Past i64::MAX, so it doesn't go lossy through f64
        UInt(u64),
        Float(f64),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Text(x) => x,
        Raw::Int(x) => x.to_string(),
        Raw::UInt(x) => x.to_string(),
        Raw::Float(x) => x.to_string(),
    })
}
