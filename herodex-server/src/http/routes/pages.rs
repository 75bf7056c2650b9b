//! Browser pages and form posts

use std::sync::Arc;

use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Router,
};

use crate::http::error::{ApiError, PageError};
use crate::http::extractors::ValidHeroId;
use crate::http::server::AppState;
use crate::models::{HeroForm, HeroId};
use crate::views::{
    render_form, render_hero, render_hero_list, render_index, render_landing, FormPage, IndexPage,
    LandingPage,
};

/// Where every successful form post lands
const LIST_PATH: &str = "/superheroes";

/// 302 redirect (axum's `Redirect::to` answers 303)
fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

fn parse_id(raw: &str) -> Result<HeroId, PageError> {
    HeroId::parse(raw).map_err(|_| PageError::InvalidId)
}

fn read_form(form: Result<Form<HeroForm>, FormRejection>) -> Result<HeroForm, PageError> {
    form.map(|Form(form)| form)
        .map_err(|e| PageError::BadRequest(e.body_text()))
}

/// GET /
async fn landing() -> Html<String> {
    Html(render_landing(&LandingPage::default()))
}

/// GET /superheroes
async fn list_heroes(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let heroes = state
        .repo
        .get_all()
        .await
        .map_err(PageError::store("Error al obtener los superhéroes"))?;

    Ok(Html(render_index(&IndexPage::new(render_hero_list(&heroes)))))
}

/// GET /add-hero
async fn add_hero_form() -> Html<String> {
    Html(render_form(&FormPage::add()))
}

/// POST /superheroes
async fn create_hero(
    State(state): State<Arc<AppState>>,
    form: Result<Form<HeroForm>, FormRejection>,
) -> Result<Response, PageError> {
    let hero = read_form(form)?.validate_new()?;

    let created = state
        .repo
        .create(hero)
        .await
        .map_err(PageError::store("Error al agregar el superhéroe."))?;

    tracing::info!(id = %created.id, alias = %created.fields.alias, "Hero created from form");
    Ok(found(LIST_PATH))
}

/// GET /superheroes/editar/{id}
async fn edit_hero_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = parse_id(&id)?;

    let hero = state
        .repo
        .get_by_id(id)
        .await
        .map_err(PageError::store("Error al obtener los datos del superhéroe"))?
        .ok_or_else(|| {
            tracing::info!(id = %id, "No hero found for edit form");
            PageError::NotFound("Superhéroe no encontrado")
        })?;

    Ok(Html(render_form(&FormPage::edit(render_hero(&hero)))))
}

/// POST /superheroes/editar/{id}
async fn update_hero(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    form: Result<Form<HeroForm>, FormRejection>,
) -> Result<Response, PageError> {
    let id = parse_id(&id)?;
    let patch = read_form(form)?.validate_replace()?;

    state
        .repo
        .update_by_id(id, patch)
        .await
        .map_err(PageError::store("Error al actualizar el superhéroe"))?
        .ok_or(PageError::NotFound("Superhéroe no encontrado para actualizar"))?;

    tracing::info!(id = %id, "Hero updated from form");
    Ok(found(LIST_PATH))
}

/// POST /delete-hero/{id}
///
/// Answers JSON on failure, like the API.
async fn delete_hero(
    State(state): State<Arc<AppState>>,
    ValidHeroId(id): ValidHeroId,
) -> Result<Response, ApiError> {
    state
        .repo
        .delete_by_id(id)
        .await
        .map_err(ApiError::store("Error al eliminar el superhéroe"))?
        .ok_or_else(|| ApiError::not_found("Superhéroe no encontrado"))?;

    tracing::info!(id = %id, "Hero deleted from list page");
    Ok(found(LIST_PATH))
}

/// Page routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(landing))
        .route("/superheroes", get(list_heroes).post(create_hero))
        .route("/add-hero", get(add_hero_form))
        .route(
            "/superheroes/editar/{id}",
            get(edit_hero_form).post(update_hero),
        )
        .route("/delete-hero/{id}", post(delete_hero))
}
