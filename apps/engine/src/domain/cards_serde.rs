//! Serialization and deserialization for card types

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::cards_types::{Card, CardFace, Color, Trump};

// Color serde: lowercase names
impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Color::try_from(s.as_str()).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

// Card serde: {"type": "number", "color": "red", "number": 7, "id": 6}
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.face {
            CardFace::Number { color, rank } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("type", "number")?;
                map.serialize_entry("color", &color)?;
                map.serialize_entry("number", &rank)?;
                map.serialize_entry("id", &self.id)?;
                map.end()
            }
            CardFace::Wizard => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "wizard")?;
                map.serialize_entry("id", &self.id)?;
                map.end()
            }
            CardFace::Fool => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "fool")?;
                map.serialize_entry("id", &self.id)?;
                map.end()
            }
        }
    }
}

// Trump serde: a color name, or null for no trump
impl Serialize for Trump {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Trump::Color(c) => c.serialize(serializer),
            Trump::NoTrump => serializer.serialize_none(),
        }
    }
}
