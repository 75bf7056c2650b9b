//! End-to-end request flows against the router with an in-memory repository

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use async_trait::async_trait;
use axum::Router;
use herodex_server::models::{AgeFilter, AttributeQuery, Hero, HeroId, HeroPatch, NewHero};
use herodex_server::{build_router, HeroRepository, MemoryHeroRepo, RouterConfig, StoreError};
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp<R = MemoryHeroRepo> {
    router: Router,
    repo: Arc<R>,
    _static_dir: tempfile::TempDir,
}

fn app() -> TestApp {
    app_over(MemoryHeroRepo::new())
}

fn app_over<R: HeroRepository + 'static>(repo: R) -> TestApp<R> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let static_dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(static_dir.path().join("css")).unwrap();
    std::fs::write(static_dir.path().join("css/styles.css"), "body { margin: 0; }").unwrap();

    let repo = Arc::new(repo);
    let config = RouterConfig {
        static_dir: static_dir.path().to_path_buf(),
        ..RouterConfig::default()
    };
    let router = build_router(repo.clone() as Arc<dyn HeroRepository>, &config);

    TestApp {
        router,
        repo,
        _static_dir: static_dir,
    }
}

/// Store whose every call fails, as when the database is unreachable
struct UnavailableRepo;

impl UnavailableRepo {
    fn error() -> StoreError {
        StoreError::Internal("connection refused".into())
    }
}

#[async_trait]
impl HeroRepository for UnavailableRepo {
    async fn create(&self, _hero: NewHero) -> Result<Hero, StoreError> {
        Err(Self::error())
    }

    async fn get_by_id(&self, _id: HeroId) -> Result<Option<Hero>, StoreError> {
        Err(Self::error())
    }

    async fn get_all(&self) -> Result<Vec<Hero>, StoreError> {
        Err(Self::error())
    }

    async fn update_by_id(&self, _id: HeroId, _patch: HeroPatch) -> Result<Option<Hero>, StoreError> {
        Err(Self::error())
    }

    async fn delete_by_id(&self, _id: HeroId) -> Result<Option<Hero>, StoreError> {
        Err(Self::error())
    }

    async fn find_by_attribute(&self, _query: &AttributeQuery) -> Result<Vec<Hero>, StoreError> {
        Err(Self::error())
    }

    async fn find_older_than(&self, _filter: &AgeFilter) -> Result<Vec<Hero>, StoreError> {
        Err(Self::error())
    }
}

impl<R> TestApp<R> {
    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn json(&self, method: &str, uri: &str, body: Value) -> Response {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn form(&self, uri: &str, body: &str) -> Response {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
    }

    async fn create(&self, body: Value) -> String {
        let response = self.json("POST", "/api/heroes", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        body["superheroe"]["id"].as_str().unwrap().to_owned()
    }
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

fn superman() -> Value {
    json!({
        "nombreSuperHeroe": "Superman",
        "nombreReal": "Clark Kent",
        "edad": 35,
        "planetaOrigen": "Krypton",
        "debilidad": "Kryptonita",
        "poderes": "vuelo , fuerza,  visión de rayos x",
        "aliados": ["Batman", " Wonder Woman "],
        "enemigos": "Lex Luthor"
    })
}

const MISSING_ID: &str = "65a1f0c2e4b0a1b2c3d4e5f6";

#[tokio::test]
async fn api_create_then_fetch_returns_split_fields() {
    let app = app();
    let id = app.create(superman()).await;
    assert_eq!(id.len(), 24);

    let response = app.get(&format!("/api/heroes/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let hero = body_json(response).await;
    assert_eq!(hero["id"], id);
    assert_eq!(hero["nombreSuperHeroe"], "Superman");
    assert_eq!(hero["edad"], 35);
    assert_eq!(hero["poderes"], json!(["vuelo", "fuerza", "visión de rayos x"]));
    assert_eq!(hero["aliados"], json!(["Batman", "Wonder Woman"]));
    assert_eq!(hero["enemigos"], json!(["Lex Luthor"]));
}

#[tokio::test]
async fn api_create_missing_required_field_persists_nothing() {
    let app = app();
    let mut body = superman();
    body.as_object_mut().unwrap().remove("nombreReal");

    let response = app.json("POST", "/api/heroes", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["errores"][0]["campo"], "nombreReal");
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn api_create_rejects_unreadable_json() {
    let app = app();
    let response = app
        .send(
            Request::builder()
                .method("POST")
                .uri("/api/heroes")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn api_update_changes_supplied_fields_only() {
    let app = app();
    let id = app.create(superman()).await;

    let response = app
        .json(
            "PUT",
            &format!("/api/heroes/{id}"),
            json!({
                "nombreSuperHeroe": "Superman",
                "nombreReal": "Kal-El",
                "edad": 36
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let hero = &body["superheroe"];
    assert_eq!(hero["id"], id);
    assert_eq!(hero["nombreReal"], "Kal-El");
    assert_eq!(hero["edad"], 36);
    assert_eq!(hero["planetaOrigen"], "Krypton");
    assert_eq!(hero["poderes"], json!(["vuelo", "fuerza", "visión de rayos x"]));
}

#[tokio::test]
async fn form_update_with_blank_text_clears_it() {
    let app = app();
    let id = app.create(superman()).await;

    let response = app
        .form(
            &format!("/superheroes/editar/{id}"),
            "heroName=Superman&realName=Clark+Kent&heroAge=35&planetaOrigen=&debilidad=&poderes=vuelo",
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let hero = body_json(app.get(&format!("/api/heroes/{id}")).await).await;
    assert_eq!(hero["planetaOrigen"], Value::Null);
    assert_eq!(hero["debilidad"], Value::Null);
    assert_eq!(hero["poderes"], json!(["vuelo"]));
}

#[tokio::test]
async fn api_update_clears_null_or_blank_text() {
    let app = app();
    let id = app.create(superman()).await;

    let response = app
        .json(
            "PUT",
            &format!("/api/heroes/{id}"),
            json!({
                "nombreSuperHeroe": "Superman",
                "nombreReal": "Clark Kent",
                "edad": 35,
                "planetaOrigen": null,
                "debilidad": ""
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["superheroe"]["planetaOrigen"], Value::Null);
    assert_eq!(body["superheroe"]["debilidad"], Value::Null);
    assert_eq!(body["superheroe"]["enemigos"], json!(["Lex Luthor"]));
}

#[tokio::test]
async fn api_update_unknown_id_is_404() {
    let app = app();
    let response = app
        .json(
            "PUT",
            &format!("/api/heroes/{MISSING_ID}"),
            json!({ "nombreSuperHeroe": "X", "nombreReal": "Y", "edad": 1 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn api_delete_then_get_is_404() {
    let app = app();
    let id = app.create(superman()).await;
    let uri = format!("/api/heroes/{id}");

    let response = app.send(Request::delete(&uri).body(Body::empty()).unwrap()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["superheroe"]["id"], id);

    assert_eq!(app.get(&uri).await.status(), StatusCode::NOT_FOUND);

    let again = app.send(Request::delete(&uri).body(Body::empty()).unwrap()).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_ids_are_400_everywhere() {
    let app = app();

    assert_eq!(app.get("/api/heroes/not-an-id").await.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        app.json("PUT", "/api/heroes/123", json!({})).await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        app.send(Request::delete("/api/heroes/zz").body(Body::empty()).unwrap())
            .await
            .status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        app.get("/superheroes/editar/nope").await.status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        app.form("/superheroes/editar/nope", "heroName=a&realName=b&heroAge=1")
            .await
            .status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        app.form("/delete-hero/nope", "").await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn api_list_is_404_when_empty() {
    let app = app();
    let response = app.get("/api/heroes").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["mensaje"], "No se encontraron superhéroes");

    app.create(superman()).await;
    let response = app.get("/api/heroes").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn older_than_filter_is_strict() {
    let app = app();
    let heroes = [
        ("Thor", 1000, "Asgard"),
        ("Robin", 19, "Tierra"),
        ("Batman", 30, "Tierra"),
        ("Flecha", 31, "Tierra"),
    ];
    for (alias, age, planet) in heroes {
        app.create(json!({
            "nombreSuperHeroe": alias,
            "nombreReal": alias,
            "edad": age,
            "planetaOrigen": planet,
            "poderes": ["uno", "dos"]
        }))
        .await;
    }

    let response = app.get("/api/heroes/mayores-30").await;
    assert_eq!(response.status(), StatusCode::OK);
    let heroes = body_json(response).await;
    let aliases: Vec<&str> = heroes
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["nombreSuperHeroe"].as_str().unwrap())
        .collect();
    assert_eq!(aliases, vec!["Thor", "Flecha"]);

    let response = app.get("/api/heroes/mayores-30?planetaOrigen=Tierra&minPoderes=2").await;
    let heroes = body_json(response).await;
    assert_eq!(heroes.as_array().unwrap().len(), 1);

    let response = app.get("/api/heroes/mayores-30?edad=5000").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/api/heroes/mayores-30?edad=999").await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.get("/api/heroes/mayores-30?edad=1000").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_by_attribute() {
    let app = app();
    app.create(superman()).await;

    let response = app.get("/api/heroes/buscar/aliados/Batman").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await[0]["nombreSuperHeroe"], "Superman");

    let response = app.get("/api/heroes/buscar/edad/35").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.get("/api/heroes/buscar/planetaOrigen/Tierra").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/api/heroes/buscar/secreto/x").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.get("/api/heroes/buscar/edad/viejo").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn form_create_redirects_and_lists() {
    let app = app();
    let response = app
        .form(
            "/superheroes",
            "heroName=Spider-Man&realName=Peter+Parker&heroAge=22&planetaOrigen=Tierra\
             &debilidad=&poderes=trepar+muros,+sentido+ar%C3%A1cnido&aliados=&enemigos=Duende+Verde",
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/superheroes");

    let heroes = app.repo.get_all().await.unwrap();
    assert_eq!(heroes.len(), 1);
    assert_eq!(heroes[0].fields.powers, vec!["trepar muros", "sentido arácnido"]);
    assert_eq!(heroes[0].fields.weakness, None);

    let response = app.get("/superheroes").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Spider-Man"));
    assert!(html.contains(&format!("/superheroes/editar/{}", heroes[0].id)));
}

#[tokio::test]
async fn form_create_missing_fields_is_400() {
    let app = app();
    let response = app.form("/superheroes", "heroName=Spider-Man&heroAge=").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let text = body_text(response).await;
    assert!(text.starts_with("Faltan datos obligatorios."));
    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn edit_page_and_form_update() {
    let app = app();
    let id = app.create(superman()).await;

    let response = app.get(&format!("/superheroes/editar/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains(r#"value="Clark Kent""#));

    let response = app
        .form(
            &format!("/superheroes/editar/{id}"),
            "heroName=Superman&realName=Kal-El&heroAge=40&poderes=vuelo",
        )
        .await;
    assert_eq!(response.status(), StatusCode::FOUND);

    let hero = body_json(app.get(&format!("/api/heroes/{id}")).await).await;
    assert_eq!(hero["nombreReal"], "Kal-El");
    assert_eq!(hero["edad"], 40);
    assert_eq!(hero["poderes"], json!(["vuelo"]));
    assert_eq!(hero["aliados"], json!([]));
    assert_eq!(hero["planetaOrigen"], Value::Null);

    let missing = app.get(&format!("/superheroes/editar/{MISSING_ID}")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let missing = app
        .form(
            &format!("/superheroes/editar/{MISSING_ID}"),
            "heroName=a&realName=b&heroAge=1",
        )
        .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let invalid = app
        .form(&format!("/superheroes/editar/{id}"), "heroName=Superman")
        .await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_hero_form_redirects_then_404s() {
    let app = app();
    let id = app.create(superman()).await;

    let response = app.form(&format!("/delete-hero/{id}"), "").await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/superheroes");
    assert!(app.repo.is_empty().await);

    let response = app.form(&format!("/delete-hero/{id}"), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["mensaje"], "Superhéroe no encontrado");
}

#[tokio::test]
async fn static_pages_render() {
    let app = app();

    let landing = app.get("/").await;
    assert_eq!(landing.status(), StatusCode::OK);
    assert!(body_text(landing).await.contains("Lista de Superhéroes"));

    let form = app.get("/add-hero").await;
    assert_eq!(form.status(), StatusCode::OK);
    assert!(body_text(form).await.contains(r#"action="/superheroes""#));

    let empty = app.get("/superheroes").await;
    assert!(body_text(empty).await.contains("No hay superhéroes registrados."));
}

#[tokio::test]
async fn static_assets_and_unknown_routes() {
    let app = app();

    let css = app.get("/css/styles.css").await;
    assert_eq!(css.status(), StatusCode::OK);
    assert_eq!(body_text(css).await, "body { margin: 0; }");

    for uri in ["/no-existe", "/api/no-existe", "/img/missing.png"] {
        let response = app.get(uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        assert_eq!(body_json(response).await["mensaje"], "Ruta no encontrada");
    }
}

#[tokio::test]
async fn health_endpoint() {
    let app = app();
    let response = app.get("/api/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn store_failures_are_500() {
    let app = app_over(UnavailableRepo);

    let response = app.get("/superheroes").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Error al obtener los superhéroes");

    let response = app
        .form("/superheroes", "heroName=Flash&realName=Barry+Allen&heroAge=28")
        .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Error al agregar el superhéroe.");

    let api_calls = [
        app.get("/api/heroes").await,
        app.get(&format!("/api/heroes/{MISSING_ID}")).await,
        app.get("/api/heroes/mayores-30").await,
        app.get("/api/heroes/buscar/poderes/vuelo").await,
        app.json("POST", "/api/heroes", superman()).await,
        app.json("PUT", &format!("/api/heroes/{MISSING_ID}"), superman()).await,
        app.json("DELETE", &format!("/api/heroes/{MISSING_ID}"), json!({})).await,
    ];
    for response in api_calls {
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "mensaje": "Error interno del servidor" })
        );
    }
}

#[tokio::test]
async fn undecodable_search_path_is_json_400() {
    let app = app();
    let response = app.get("/api/heroes/buscar/%FF/vuelo").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["mensaje"].is_string());
}
