//! JSON shapes returned by the API

use serde::Serialize;

use crate::models::{FieldError, Hero};

/// A hero as exposed to clients (id as hex string)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroView {
    pub id: String,
    pub nombre_super_heroe: String,
    pub nombre_real: String,
    pub edad: i32,
    pub planeta_origen: Option<String>,
    pub debilidad: Option<String>,
    pub poderes: Vec<String>,
    pub aliados: Vec<String>,
    pub enemigos: Vec<String>,
}

pub fn render_hero(hero: &Hero) -> HeroView {
    let fields = &hero.fields;
    HeroView {
        id: hero.id.to_hex(),
        nombre_super_heroe: fields.alias.clone(),
        nombre_real: fields.real_name.clone(),
        edad: fields.age,
        planeta_origen: fields.origin.clone(),
        debilidad: fields.weakness.clone(),
        poderes: fields.powers.clone(),
        aliados: fields.allies.clone(),
        enemigos: fields.enemies.clone(),
    }
}

pub fn render_hero_list(heroes: &[Hero]) -> Vec<HeroView> {
    heroes.iter().map(render_hero).collect()
}

/// `{ "mensaje": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub mensaje: String,
}

impl Message {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
        }
    }
}

/// `{ "mensaje": ..., "superheroe": {...} }` for write operations
#[derive(Debug, Clone, Serialize)]
pub struct HeroEnvelope {
    pub mensaje: String,
    pub superheroe: HeroView,
}

impl HeroEnvelope {
    pub fn new(mensaje: impl Into<String>, hero: &Hero) -> Self {
        Self {
            mensaje: mensaje.into(),
            superheroe: render_hero(hero),
        }
    }
}

/// `{ "mensaje": ..., "errores": [...] }` for rejected input
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub mensaje: String,
    pub errores: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeroId, NewHero};
    use serde_json::json;

    #[test]
    fn hero_view_uses_api_keys() {
        let id = HeroId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        let hero = NewHero {
            alias: "Batman".into(),
            real_name: "Bruce Wayne".into(),
            age: 40,
            origin: Some("Tierra".into()),
            weakness: None,
            powers: vec!["inteligencia".into()],
            allies: vec![],
            enemies: vec!["Joker".into()],
        }
        .with_id(id);

        let value = serde_json::to_value(render_hero(&hero)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "65a1f0c2e4b0a1b2c3d4e5f6",
                "nombreSuperHeroe": "Batman",
                "nombreReal": "Bruce Wayne",
                "edad": 40,
                "planetaOrigen": "Tierra",
                "debilidad": null,
                "poderes": ["inteligencia"],
                "aliados": [],
                "enemigos": ["Joker"]
            })
        );
    }
}
