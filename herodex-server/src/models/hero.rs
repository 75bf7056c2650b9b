//! Hero record types
//!
//! Field names on the wire and in the collection keep the original
//! Spanish keys (`nombreSuperHeroe`, `edad`, ...) so existing documents load.

use std::fmt;

use mongodb::bson::oid::ObjectId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::ValidationError;

/// ObjectId textual form: 12 bytes as 24 hex digits
static OBJECT_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("invalid object id regex"));

/// Store-assigned hero identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroId(ObjectId);

impl HeroId {
    /// Parse a hero id from its 24-hex-digit form.
    ///
    /// # Example
    /// ```
    /// use herodex_server::models::HeroId;
    ///
    /// assert!(HeroId::parse("65a1f0c2e4b0a1b2c3d4e5f6").is_ok());
    /// assert!(HeroId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        if !OBJECT_ID_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a 24 character hex ObjectId",
            });
        }

        ObjectId::parse_str(s)
            .map(Self)
            .map_err(|_| ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a 24 character hex ObjectId",
            })
    }

    /// Fresh identifier, as the store would assign on insert.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl From<ObjectId> for HeroId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

/// Stored hero document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(rename = "_id")]
    pub id: HeroId,
    #[serde(flatten)]
    pub fields: NewHero,
}

/// Hero fields without an identifier (insert payload)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHero {
    #[serde(rename = "nombreSuperHeroe")]
    pub alias: String,
    #[serde(rename = "nombreReal")]
    pub real_name: String,
    #[serde(rename = "edad", deserialize_with = "deserialize_age")]
    pub age: i32,
    #[serde(rename = "planetaOrigen", default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(rename = "debilidad", default, skip_serializing_if = "Option::is_none")]
    pub weakness: Option<String>,
    #[serde(rename = "poderes", default)]
    pub powers: Vec<String>,
    #[serde(rename = "aliados", default)]
    pub allies: Vec<String>,
    #[serde(rename = "enemigos", default)]
    pub enemies: Vec<String>,
}

impl NewHero {
    pub fn with_id(self, id: HeroId) -> Hero {
        Hero { id, fields: self }
    }
}

/// Stored ages may be any BSON number; integral values are accepted.
fn deserialize_age<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    struct AgeVisitor;

    impl<'de> Visitor<'de> for AgeVisitor {
        type Value = i32;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integral age")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i32, E> {
            i32::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i32, E> {
            if v.fract() == 0.0 && v >= i32::MIN as f64 && v <= i32::MAX as f64 {
                Ok(v as i32)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(AgeVisitor)
}

/// Partial update
///
/// Outer `None` leaves a field untouched. For the optional text fields,
/// `Some(None)` removes the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeroPatch {
    pub alias: Option<String>,
    pub real_name: Option<String>,
    pub age: Option<i32>,
    pub origin: Option<Option<String>>,
    pub weakness: Option<Option<String>>,
    pub powers: Option<Vec<String>>,
    pub allies: Option<Vec<String>>,
    pub enemies: Option<Vec<String>>,
}

impl HeroPatch {
    /// Apply the patch to a hero in place.
    pub fn apply(&self, hero: &mut NewHero) {
        if let Some(alias) = &self.alias {
            hero.alias = alias.clone();
        }
        if let Some(real_name) = &self.real_name {
            hero.real_name = real_name.clone();
        }
        if let Some(age) = self.age {
            hero.age = age;
        }
        if let Some(origin) = &self.origin {
            hero.origin = origin.clone();
        }
        if let Some(weakness) = &self.weakness {
            hero.weakness = weakness.clone();
        }
        if let Some(powers) = &self.powers {
            hero.powers = powers.clone();
        }
        if let Some(allies) = &self.allies {
            hero.allies = allies.clone();
        }
        if let Some(enemies) = &self.enemies {
            hero.enemies = enemies.clone();
        }
    }
}

/// Split comma-separated input into trimmed, non-empty items.
///
/// ```
/// use herodex_server::models::split_list;
///
/// assert_eq!(split_list(" vuelo, fuerza ,, visión "), vec!["vuelo", "fuerza", "visión"]);
/// ```
pub fn split_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}
