//! Server-rendered HTML pages
//!
//! Each page has a context struct built by the handlers and a `render_*`
//! function producing the full document. All record text is escaped.

use std::fmt::{self, Write};

use super::json::HeroView;

/// Title shared by every page
pub const DEFAULT_TITLE: &str = "Lista de Superhéroes";

/// Landing page
#[derive(Debug, Clone)]
pub struct LandingPage {
    pub title: String,
}

impl Default for LandingPage {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
        }
    }
}

/// List of every hero, with edit and delete actions
#[derive(Debug, Clone)]
pub struct IndexPage {
    pub title: String,
    pub superheroes: Vec<HeroView>,
}

impl IndexPage {
    pub fn new(superheroes: Vec<HeroView>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            superheroes,
        }
    }
}

/// Add or edit form
#[derive(Debug, Clone)]
pub struct FormPage {
    pub title: String,
    /// Where the form posts to
    pub action: String,
    pub submit_label: &'static str,
    /// Prefilled values when editing
    pub superheroe: Option<HeroView>,
}

impl FormPage {
    pub fn add() -> Self {
        Self {
            title: "Agregar Superhéroe".to_string(),
            action: "/superheroes".to_string(),
            submit_label: "Agregar",
            superheroe: None,
        }
    }

    pub fn edit(hero: HeroView) -> Self {
        Self {
            title: format!("Editar {}", hero.nombre_super_heroe),
            action: format!("/superheroes/editar/{}", hero.id),
            submit_label: "Guardar cambios",
            superheroe: Some(hero),
        }
    }
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_landing(page: &LandingPage) -> String {
    layout(&page.title, |out| {
        writeln!(out, "<h1>{}</h1>", escape(&page.title))?;
        writeln!(out, "<nav>")?;
        writeln!(out, r#"  <a href="/superheroes">Ver superhéroes</a>"#)?;
        writeln!(out, r#"  <a href="/add-hero">Agregar superhéroe</a>"#)?;
        writeln!(out, "</nav>")
    })
}

pub fn render_index(page: &IndexPage) -> String {
    layout(&page.title, |out| {
        writeln!(out, "<h1>{}</h1>", escape(&page.title))?;
        writeln!(out, r#"<a href="/add-hero" class="button">Agregar superhéroe</a>"#)?;

        if page.superheroes.is_empty() {
            return writeln!(out, r#"<p class="empty">No hay superhéroes registrados.</p>"#);
        }

        writeln!(out, "<table>")?;
        writeln!(
            out,
            "  <thead><tr><th>Nombre</th><th>Nombre real</th><th>Edad</th>\
             <th>Planeta</th><th>Debilidad</th><th>Poderes</th><th>Aliados</th>\
             <th>Enemigos</th><th></th></tr></thead>"
        )?;
        writeln!(out, "  <tbody>")?;
        for hero in &page.superheroes {
            write_row(out, hero)?;
        }
        writeln!(out, "  </tbody>")?;
        writeln!(out, "</table>")
    })
}

pub fn render_form(page: &FormPage) -> String {
    let hero = page.superheroe.as_ref();
    let text = |get: &dyn Fn(&HeroView) -> String| hero.map(get).unwrap_or_default();

    layout(&page.title, |out| {
        writeln!(out, "<h1>{}</h1>", escape(&page.title))?;
        writeln!(out, r#"<form method="POST" action="{}">"#, escape(&page.action))?;
        write_input(out, "heroName", "Nombre de superhéroe", "text", &text(&|h: &HeroView| h.nombre_super_heroe.clone()), true)?;
        write_input(out, "realName", "Nombre real", "text", &text(&|h: &HeroView| h.nombre_real.clone()), true)?;
        write_input(out, "heroAge", "Edad", "number", &text(&|h: &HeroView| h.edad.to_string()), true)?;
        write_input(out, "planetaOrigen", "Planeta de origen", "text", &text(&|h: &HeroView| h.planeta_origen.clone().unwrap_or_default()), false)?;
        write_input(out, "debilidad", "Debilidad", "text", &text(&|h: &HeroView| h.debilidad.clone().unwrap_or_default()), false)?;
        write_input(out, "poderes", "Poderes (separados por coma)", "text", &text(&|h: &HeroView| h.poderes.join(", ")), false)?;
        write_input(out, "aliados", "Aliados (separados por coma)", "text", &text(&|h: &HeroView| h.aliados.join(", ")), false)?;
        write_input(out, "enemigos", "Enemigos (separados por coma)", "text", &text(&|h: &HeroView| h.enemigos.join(", ")), false)?;
        writeln!(out, r#"  <button type="submit">{}</button>"#, page.submit_label)?;
        writeln!(out, "</form>")?;
        writeln!(out, r#"<a href="/superheroes">Volver a la lista</a>"#)
    })
}

fn layout(title: &str, body: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = write_layout(&mut out, title, body);
    out
}

fn write_layout(
    out: &mut String,
    title: &str,
    body: impl FnOnce(&mut String) -> fmt::Result,
) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, r#"<html lang="es">"#)?;
    writeln!(out, "<head>")?;
    writeln!(out, r#"  <meta charset="UTF-8">"#)?;
    writeln!(out, r#"  <meta name="viewport" content="width=device-width, initial-scale=1.0">"#)?;
    writeln!(out, "  <title>{}</title>", escape(title))?;
    writeln!(out, r#"  <link rel="stylesheet" href="/css/styles.css">"#)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<main>")?;
    body(out)?;
    writeln!(out, "</main>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_row(out: &mut String, hero: &HeroView) -> fmt::Result {
    let opt = |v: &Option<String>| v.as_deref().map(escape).unwrap_or_default();
    let list = |v: &[String]| escape(&v.join(", "));

    writeln!(out, "    <tr>")?;
    writeln!(out, "      <td>{}</td>", escape(&hero.nombre_super_heroe))?;
    writeln!(out, "      <td>{}</td>", escape(&hero.nombre_real))?;
    writeln!(out, "      <td>{}</td>", hero.edad)?;
    writeln!(out, "      <td>{}</td>", opt(&hero.planeta_origen))?;
    writeln!(out, "      <td>{}</td>", opt(&hero.debilidad))?;
    writeln!(out, "      <td>{}</td>", list(&hero.poderes))?;
    writeln!(out, "      <td>{}</td>", list(&hero.aliados))?;
    writeln!(out, "      <td>{}</td>", list(&hero.enemigos))?;
    writeln!(out, "      <td>")?;
    writeln!(out, r#"        <a href="/superheroes/editar/{}">Editar</a>"#, hero.id)?;
    writeln!(
        out,
        r#"        <form method="POST" action="/delete-hero/{}" class="inline"><button type="submit">Eliminar</button></form>"#,
        hero.id
    )?;
    writeln!(out, "      </td>")?;
    writeln!(out, "    </tr>")
}

fn write_input(
    out: &mut String,
    name: &str,
    label: &str,
    kind: &str,
    value: &str,
    required: bool,
) -> fmt::Result {
    writeln!(out, r#"  <label for="{name}">{label}</label>"#)?;
    writeln!(
        out,
        r#"  <input type="{kind}" id="{name}" name="{name}" value="{}"{}>"#,
        escape(value),
        if required { " required" } else { "" }
    )
}
