//! Request payloads and their validators
//!
//! Two shapes reach the server: the urlencoded HTML form (`heroName`,
//! `heroAge`, ...) and the JSON API body (`nombreSuperHeroe`, `edad`, ...).
//! Both validate into the same typed values or a [`ValidationErrors`] list.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::hero::{split_list, HeroPatch, NewHero};
use super::{ValidationError, ValidationErrors};

/// Maximum length for names and short text fields
pub const MAX_TEXT_LEN: usize = 60;

/// Oldest accepted age
pub const MAX_AGE: i64 = 1000;

/// HTML form submitted by the add and edit pages
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroForm {
    pub hero_name: Option<String>,
    pub real_name: Option<String>,
    pub hero_age: Option<String>,
    pub planeta_origen: Option<String>,
    pub debilidad: Option<String>,
    pub poderes: Option<String>,
    pub aliados: Option<String>,
    pub enemigos: Option<String>,
}

impl HeroForm {
    /// Validate a form submitted to create a hero.
    pub fn validate_new(&self) -> Result<NewHero, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let alias = required_text(&mut errors, "heroName", self.hero_name.as_deref());
        let real_name = required_text(&mut errors, "realName", self.real_name.as_deref());
        let age = required_age(&mut errors, "heroAge", self.hero_age.as_deref().map(AgeValue::Text));
        let origin = optional_text(&mut errors, "planetaOrigen", self.planeta_origen.as_deref());
        let weakness = optional_text(&mut errors, "debilidad", self.debilidad.as_deref());
        let powers = form_list(&mut errors, "poderes", self.poderes.as_deref());
        let allies = form_list(&mut errors, "aliados", self.aliados.as_deref());
        let enemies = form_list(&mut errors, "enemigos", self.enemigos.as_deref());

        errors.finish(|| NewHero {
            alias: alias.unwrap_or_default(),
            real_name: real_name.unwrap_or_default(),
            age: age.unwrap_or_default(),
            origin,
            weakness,
            powers,
            allies,
            enemies,
        })
    }

    /// Validate a form submitted from the edit page.
    ///
    /// The edit page posts every field: blank text clears the stored value
    /// and list fields missing from the request are written as empty lists.
    pub fn validate_replace(&self) -> Result<HeroPatch, ValidationErrors> {
        self.validate_new().map(|hero| HeroPatch {
            alias: Some(hero.alias),
            real_name: Some(hero.real_name),
            age: Some(hero.age),
            origin: Some(hero.origin),
            weakness: Some(hero.weakness),
            powers: Some(hero.powers),
            allies: Some(hero.allies),
            enemies: Some(hero.enemies),
        })
    }
}

/// List field accepted by the JSON API: an array or comma-separated text
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListInput {
    Items(Vec<String>),
    Text(String),
}

impl ListInput {
    fn normalize(&self) -> Vec<String> {
        match self {
            Self::Items(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect(),
            Self::Text(text) => split_list(text),
        }
    }
}

/// JSON body for the create and update API endpoints
///
/// Optional text keeps `null` apart from an absent key: absent is
/// `None`, `null` is `Some(None)`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroPayload {
    pub nombre_super_heroe: Option<String>,
    pub nombre_real: Option<String>,
    pub edad: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub planeta_origen: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub debilidad: Option<Option<String>>,
    pub poderes: Option<ListInput>,
    pub aliados: Option<ListInput>,
    pub enemigos: Option<ListInput>,
}

impl HeroPayload {
    pub fn validate_new(&self) -> Result<NewHero, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let (alias, real_name, age) = self.required_fields(&mut errors);
        let origin = optional_text(&mut errors, "planetaOrigen", self.origin_text());
        let weakness = optional_text(&mut errors, "debilidad", self.weakness_text());
        let powers = json_list(&mut errors, "poderes", self.poderes.as_ref()).unwrap_or_default();
        let allies = json_list(&mut errors, "aliados", self.aliados.as_ref()).unwrap_or_default();
        let enemies = json_list(&mut errors, "enemigos", self.enemigos.as_ref()).unwrap_or_default();

        errors.finish(|| NewHero {
            alias: alias.unwrap_or_default(),
            real_name: real_name.unwrap_or_default(),
            age: age.unwrap_or_default(),
            origin,
            weakness,
            powers,
            allies,
            enemies,
        })
    }

    /// Validate an update: required fields must be present, optional fields
    /// are written only when supplied. Blank or `null` optional text clears
    /// the stored value.
    pub fn validate_update(&self) -> Result<HeroPatch, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let (alias, real_name, age) = self.required_fields(&mut errors);
        let origin = self
            .planeta_origen
            .as_ref()
            .map(|raw| optional_text(&mut errors, "planetaOrigen", raw.as_deref()));
        let weakness = self
            .debilidad
            .as_ref()
            .map(|raw| optional_text(&mut errors, "debilidad", raw.as_deref()));
        let powers = json_list(&mut errors, "poderes", self.poderes.as_ref());
        let allies = json_list(&mut errors, "aliados", self.aliados.as_ref());
        let enemies = json_list(&mut errors, "enemigos", self.enemigos.as_ref());

        errors.finish(|| HeroPatch {
            alias,
            real_name,
            age,
            origin,
            weakness,
            powers,
            allies,
            enemies,
        })
    }

    fn origin_text(&self) -> Option<&str> {
        self.planeta_origen.as_ref().and_then(|v| v.as_deref())
    }

    fn weakness_text(&self) -> Option<&str> {
        self.debilidad.as_ref().and_then(|v| v.as_deref())
    }

    fn required_fields(
        &self,
        errors: &mut ValidationErrors,
    ) -> (Option<String>, Option<String>, Option<i32>) {
        let alias = required_text(errors, "nombreSuperHeroe", self.nombre_super_heroe.as_deref());
        let real_name = required_text(errors, "nombreReal", self.nombre_real.as_deref());
        let age = required_age(errors, "edad", self.edad.as_ref().map(AgeValue::Json));
        (alias, real_name, age)
    }
}

/// Marks a key as present, keeping an explicit `null` as `Some(None)`.
fn present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

enum AgeValue<'a> {
    Text(&'a str),
    Json(&'a Value),
}

/// Parse an age from text, an integer, or a float without fraction.
pub fn parse_age(field: &'static str, raw: &str) -> Result<i32, ValidationError> {
    let value: i64 = raw.trim().parse().map_err(|_| ValidationError::InvalidFormat {
        field,
        reason: "must be an integer",
    })?;
    check_age(field, value)
}

fn check_age(field: &'static str, value: i64) -> Result<i32, ValidationError> {
    if !(0..=MAX_AGE).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field,
            min: 0,
            max: MAX_AGE,
        });
    }
    // bounded above, cannot truncate
    Ok(value as i32)
}

fn required_age(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<AgeValue<'_>>,
) -> Option<i32> {
    let parsed = match raw {
        None | Some(AgeValue::Json(Value::Null)) => Err(ValidationError::Missing { field }),
        Some(AgeValue::Text(text)) if text.trim().is_empty() => Err(ValidationError::Empty { field }),
        Some(AgeValue::Text(text)) => parse_age(field, text),
        Some(AgeValue::Json(Value::String(text))) if text.trim().is_empty() => {
            Err(ValidationError::Empty { field })
        }
        Some(AgeValue::Json(Value::String(text))) => parse_age(field, text),
        Some(AgeValue::Json(Value::Number(n))) => match (n.as_i64(), n.as_f64()) {
            (Some(v), _) => check_age(field, v),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() <= MAX_AGE as f64 => {
                check_age(field, f as i64)
            }
            _ => Err(ValidationError::InvalidFormat {
                field,
                reason: "must be an integer",
            }),
        },
        Some(AgeValue::Json(_)) => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be an integer",
        }),
    };

    parsed.map_err(|e| errors.push(e)).ok()
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<String> {
    let Some(raw) = raw else {
        errors.push(ValidationError::Missing { field });
        return None;
    };
    let value = raw.trim();
    if value.is_empty() {
        errors.push(ValidationError::Empty { field });
        return None;
    }
    if value.chars().count() > MAX_TEXT_LEN {
        errors.push(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
        return None;
    }
    Some(value.to_owned())
}

/// Blank optional text counts as absent.
fn optional_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&str>,
) -> Option<String> {
    let value = raw.map(str::trim).filter(|v| !v.is_empty())?;
    if value.chars().count() > MAX_TEXT_LEN {
        errors.push(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
        return None;
    }
    Some(value.to_owned())
}

fn check_items(errors: &mut ValidationErrors, field: &'static str, items: &[String]) {
    if items.iter().any(|item| item.chars().count() > MAX_TEXT_LEN) {
        errors.push(ValidationError::TooLong {
            field,
            max: MAX_TEXT_LEN,
        });
    }
}

fn form_list(errors: &mut ValidationErrors, field: &'static str, raw: Option<&str>) -> Vec<String> {
    let items = raw.map(split_list).unwrap_or_default();
    check_items(errors, field, &items);
    items
}

fn json_list(
    errors: &mut ValidationErrors,
    field: &'static str,
    raw: Option<&ListInput>,
) -> Option<Vec<String>> {
    let items = raw?.normalize();
    check_items(errors, field, &items);
    Some(items)
}
