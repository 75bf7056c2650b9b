//! Search criteria: attribute lookups and the age filter

use std::fmt;

use mongodb::bson::{doc, Bson, Document};
use serde::Deserialize;

use super::hero::NewHero;
use super::input::parse_age;
use super::ValidationError;

/// Default age threshold for the "older than" filter
pub const DEFAULT_AGE_THRESHOLD: i32 = 30;

/// Hero attribute that can be searched by value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroAttribute {
    Alias,
    RealName,
    Age,
    Origin,
    Weakness,
    Powers,
    Allies,
    Enemies,
}

impl HeroAttribute {
    /// Parse an attribute name; accepts the stored key or an English alias,
    /// case-insensitively.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let attr = match s.trim().to_lowercase().as_str() {
            "nombresuperheroe" | "alias" => Self::Alias,
            "nombrereal" | "realname" => Self::RealName,
            "edad" | "age" => Self::Age,
            "planetaorigen" | "origin" => Self::Origin,
            "debilidad" | "weakness" => Self::Weakness,
            "poderes" | "powers" => Self::Powers,
            "aliados" | "allies" => Self::Allies,
            "enemigos" | "enemies" => Self::Enemies,
            "" => return Err(ValidationError::Empty { field: "atributo" }),
            _ => {
                return Err(ValidationError::InvalidFormat {
                    field: "atributo",
                    reason: "unknown hero attribute",
                })
            }
        };
        Ok(attr)
    }

    /// Key of the attribute in stored documents.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Alias => "nombreSuperHeroe",
            Self::RealName => "nombreReal",
            Self::Age => "edad",
            Self::Origin => "planetaOrigen",
            Self::Weakness => "debilidad",
            Self::Powers => "poderes",
            Self::Allies => "aliados",
            Self::Enemies => "enemigos",
        }
    }

    /// Turn a raw search value into a typed one for this attribute.
    pub fn value(&self, raw: &str) -> Result<AttributeValue, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "valor" });
        }
        match self {
            Self::Age => parse_age("valor", raw).map(AttributeValue::Int),
            _ => Ok(AttributeValue::Text(raw.to_owned())),
        }
    }
}

impl fmt::Display for HeroAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

/// Typed search value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Int(i32),
    Text(String),
}

impl From<&AttributeValue> for Bson {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Int(v) => Bson::Int32(*v),
            AttributeValue::Text(s) => Bson::String(s.clone()),
        }
    }
}

/// Attribute lookup: text fields match exactly, list fields match when any
/// element equals the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeQuery {
    pub attribute: HeroAttribute,
    pub value: AttributeValue,
}

impl AttributeQuery {
    pub fn parse(attribute: &str, value: &str) -> Result<Self, ValidationError> {
        let attribute = HeroAttribute::parse(attribute)?;
        let value = attribute.value(value)?;
        Ok(Self { attribute, value })
    }

    /// MongoDB filter document. Equality on an array field matches elements.
    pub fn to_filter(&self) -> Document {
        let mut filter = Document::new();
        filter.insert(self.attribute.field_name(), Bson::from(&self.value));
        filter
    }

    pub fn matches(&self, hero: &NewHero) -> bool {
        let text = match &self.value {
            AttributeValue::Int(age) => return self.attribute == HeroAttribute::Age && hero.age == *age,
            AttributeValue::Text(text) => text.as_str(),
        };
        match self.attribute {
            HeroAttribute::Alias => hero.alias == text,
            HeroAttribute::RealName => hero.real_name == text,
            HeroAttribute::Age => false,
            HeroAttribute::Origin => hero.origin.as_deref() == Some(text),
            HeroAttribute::Weakness => hero.weakness.as_deref() == Some(text),
            HeroAttribute::Powers => hero.powers.iter().any(|p| p == text),
            HeroAttribute::Allies => hero.allies.iter().any(|a| a == text),
            HeroAttribute::Enemies => hero.enemies.iter().any(|e| e == text),
        }
    }
}

/// Query parameters for the age filter endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeFilterParams {
    pub edad: Option<String>,
    pub planeta_origen: Option<String>,
    pub min_poderes: Option<String>,
}

/// Heroes strictly older than a threshold, optionally narrowed further
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeFilter {
    pub older_than: i32,
    pub planet: Option<String>,
    pub min_powers: Option<u32>,
}

impl Default for AgeFilter {
    fn default() -> Self {
        Self {
            older_than: DEFAULT_AGE_THRESHOLD,
            planet: None,
            min_powers: None,
        }
    }
}

impl AgeFilter {
    pub fn from_params(params: &AgeFilterParams) -> Result<Self, ValidationError> {
        let older_than = match params.edad.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_AGE_THRESHOLD,
            Some(raw) => parse_age("edad", raw)?,
        };
        let planet = params
            .planeta_origen
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_owned);
        let min_powers = match params.min_poderes.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| ValidationError::InvalidFormat {
                field: "minPoderes",
                reason: "must be a non-negative integer",
            })?),
        };

        Ok(Self {
            older_than,
            planet,
            min_powers,
        })
    }

    pub fn to_filter(&self) -> Document {
        let mut filter = doc! { "edad": { "$gt": self.older_than } };
        if let Some(planet) = &self.planet {
            filter.insert("planetaOrigen", planet.as_str());
        }
        if let Some(min) = self.min_powers {
            filter.insert(
                "$expr",
                doc! {
                    "$gte": [
                        { "$size": { "$ifNull": ["$poderes", []] } },
                        i64::from(min),
                    ]
                },
            );
        }
        filter
    }

    pub fn matches(&self, hero: &NewHero) -> bool {
        hero.age > self.older_than
            && self
                .planet
                .as_deref()
                .map_or(true, |planet| hero.origin.as_deref() == Some(planet))
            && self
                .min_powers
                .map_or(true, |min| hero.powers.len() >= min as usize)
    }
}
