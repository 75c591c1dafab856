use std::sync::Arc;

use axum::Router;
use axum::http::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, HeaderName, LOCATION};
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum_prometheus::PrometheusMetricLayer;
use nutriclinic_core::{application::create_service, domain::common::NutriclinicConfig};
use tower_http::cors::CorsLayer;
use tracing::{debug, info_span, warn};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;
use utoipa_redoc::{Redoc, Servable};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::http::{
    equivalence::router::equivalence_routes, food::router::food_routes, health::health_routes,
    meal_plan::router::meal_plan_routes, server::app_state::AppState,
    server::openapi::ApiDoc,
};
use crate::application::viewer::VIEWER_HEADER;
use crate::args::Args;

pub async fn state(args: Arc<Args>) -> Result<AppState, anyhow::Error> {
    let config = NutriclinicConfig::from(args.as_ref().clone());
    let service = create_service(config).await?;

    Ok(AppState::new(args, service))
}

///  Returns the [`Router`] of this application.
pub fn router(state: AppState) -> Result<Router, anyhow::Error> {
    let trace_layer = tower_http::trace::TraceLayer::new_for_http().make_span_with(
        |request: &axum::extract::Request| {
            let uri: String = request.uri().to_string();
            info_span!("http_request", method = ?request.method(), uri)
        },
    );

    let allowed_origins = state
        .args
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid allowed origin {:?}", origin);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    debug!("Allowed origins: {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_origin(allowed_origins)
        .allow_headers([
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT,
            LOCATION,
            HeaderName::from_static(VIEWER_HEADER),
        ]);

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
    let root_path = state.args.server.root_path.clone();

    let router = api_routes(state.clone())
        .route(
            &format!("{}/metrics", root_path),
            get(|| async move { metric_handle.render() }),
        )
        .layer(trace_layer)
        .layer(cors)
        .layer(prometheus_layer)
        .with_state(state);
    Ok(router)
}

/// Domain routes and API docs, without the process-wide layers.
fn api_routes(state: AppState) -> Router<AppState> {
    let mut openapi = ApiDoc::openapi();
    let mut paths = openapi.paths.clone();
    paths.paths = openapi
        .paths
        .paths
        .into_iter()
        .map(|(path, item)| (format!("{}{path}", state.args.server.root_path), item))
        .collect();
    openapi.paths = paths;

    let root_path = state.args.server.root_path.clone();
    let api_docs_url = format!("{}/api-docs/openapi.json", root_path);

    Router::new()
        .merge(Scalar::with_url(
            format!("{}/scalar", root_path),
            openapi.clone(),
        ))
        .merge(
            SwaggerUi::new(format!("{}/swagger-ui", root_path))
                .url(api_docs_url.clone(), openapi.clone()),
        )
        .merge(Redoc::with_url(format!("{}/redoc", root_path), openapi))
        .merge(RapiDoc::new(api_docs_url).path(format!("{}/rapidoc", root_path)))
        .merge(food_routes(state.clone()))
        .merge(equivalence_routes(state.clone()))
        .merge(meal_plan_routes(state.clone()))
        .merge(health_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use clap::Parser;
    use nutriclinic_core::{
        domain::{
            common::StorageConfig,
            food::{Food, FoodVisibility},
        },
        infrastructure::memory::fixtures::{self, SeedData},
    };
    use serde_json::{Value, json};
    use uuid::Uuid;

    async fn test_server() -> TestServer {
        server_with_seed(None).await
    }

    async fn server_with_seed(seed_path: Option<String>) -> TestServer {
        let args = Arc::new(Args::parse_from(["nutriclinic-api", "--storage", "memory"]));
        let service = create_service(NutriclinicConfig {
            storage: StorageConfig::Memory,
            seed_path,
        })
        .await
        .unwrap();
        let state = AppState::new(args, service);

        TestServer::new(api_routes(state.clone()).with_state(state)).unwrap()
    }

    fn viewer_header(viewer_id: Uuid) -> HeaderValue {
        HeaderValue::from_str(&viewer_id.to_string()).unwrap()
    }

    async fn find_food(server: &TestServer, name: &str) -> Food {
        let response = server
            .get("/foods")
            .add_query_param("filter[name][ilike]", name)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        serde_json::from_value(body["data"][0].clone()).unwrap()
    }

    async fn create_plan(server: &TestServer) -> Value {
        let response = server
            .post("/meal-plans")
            .json(&json!({
                "patient_id": "0192f6a4-7c1e-7b3a-9d2e-3f4a5b6c7d8e",
                "title": "Low sodium",
                "start_date": "2026-10-19"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        response.json::<Value>()["data"].clone()
    }

    #[tokio::test]
    async fn test_search_filters_by_protein_and_sorts() {
        let server = test_server().await;

        let response = server
            .get("/foods")
            .add_query_param("filter[protein][gte]", "10")
            .add_query_param("sort", "-protein")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|food| food["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Chicken breast, grilled", "Egg, boiled"]);
        assert_eq!(body["data_unavailable"], json!(false));
    }

    #[tokio::test]
    async fn test_unknown_filter_field_is_bad_request() {
        let server = test_server().await;

        let response = server.get("/foods").add_query_param("filter[umami][gte]", "1").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["code"], json!("E_BAD_REQUEST"));
    }

    #[tokio::test]
    async fn test_unknown_food_is_not_found() {
        let server = test_server().await;

        let response = server.get(&format!("/foods/{}", uuid::Uuid::nil())).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_private_food_is_only_reachable_by_its_owner() {
        let owner = Uuid::new_v4();
        let mut foods = fixtures::sample_foods();
        foods[0].visibility = FoodVisibility::Private;
        foods[0].owner_id = Some(owner);
        let private_id = foods[0].id;
        let path = std::env::temp_dir().join(format!("nutriclinic-private-{}.json", private_id));
        std::fs::write(
            &path,
            serde_json::to_string(&SeedData { foods, plans: vec![] }).unwrap(),
        )
        .unwrap();

        let server = server_with_seed(Some(path.to_string_lossy().into_owned())).await;
        let _ = std::fs::remove_file(&path);

        server
            .get(&format!("/foods/{}", private_id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(&format!("/foods/{}/equivalences", private_id))
            .add_header(HeaderName::from_static(VIEWER_HEADER), viewer_header(Uuid::new_v4()))
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .get(&format!("/foods/{}", private_id))
            .add_header(HeaderName::from_static(VIEWER_HEADER), viewer_header(owner))
            .await
            .assert_status_ok();

        let plan = create_plan(&server).await;
        let item = json!({
            "day_index": 0,
            "meal_slot": "lunch",
            "food_id": private_id,
            "quantity": 100.0,
            "unit": "g"
        });
        let items_path = format!("/meal-plans/{}/items", plan["id"].as_str().unwrap());

        server
            .post(&items_path)
            .json(&item)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        server
            .post(&items_path)
            .add_header(HeaderName::from_static(VIEWER_HEADER), viewer_header(owner))
            .json(&item)
            .await
            .assert_status(StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_malformed_viewer_header_is_rejected() {
        let server = test_server().await;

        let response = server
            .get("/foods")
            .add_header(
                HeaderName::from_static(VIEWER_HEADER),
                HeaderValue::from_static("not-a-uuid"),
            )
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_food_equivalences_keep_base_food() {
        let server = test_server().await;
        let rice = find_food(&server, "rice").await;

        let response = server
            .get(&format!("/foods/{}/equivalences", rice.id))
            .add_query_param("quantity", "150")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["base_food"]["id"], json!(rice.id));
        assert_eq!(body["data"]["base_quantity"], json!(150.0));
    }

    #[tokio::test]
    async fn test_plan_editing_flow() {
        let server = test_server().await;
        let potato = find_food(&server, "potato").await;
        let chicken = find_food(&server, "chicken").await;
        let plan = create_plan(&server).await;
        let plan_id = plan["id"].as_str().unwrap().to_string();
        assert_eq!(plan["version"], json!(0));

        let response = server
            .post(&format!("/meal-plans/{}/items", plan_id))
            .json(&json!({
                "expected_version": 0,
                "day_index": 2,
                "meal_slot": "dinner",
                "food_id": potato.id,
                "quantity": 200.0,
                "unit": "g",
                "recommended_time": "19:00:00"
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let plan = response.json::<Value>()["data"].clone();
        assert_eq!(plan["version"], json!(1));
        let item_id = plan["items"][0]["id"].as_str().unwrap().to_string();

        let response = server
            .get(&format!("/meal-plans/{}/days/2", plan_id))
            .await;
        response.assert_status_ok();
        let day: Value = response.json();
        assert_eq!(day["data"]["totals"]["energy"], json!(154.0));

        let response = server
            .post(&format!("/meal-plans/{}/items/{}/substitution", plan_id, item_id))
            .json(&json!({ "replacement_food_id": chicken.id, "expected_version": 1 }))
            .await;
        response.assert_status_ok();
        let plan = response.json::<Value>()["data"].clone();
        assert_eq!(plan["items"][0]["food_id"], json!(chicken.id));
        assert_eq!(plan["items"][0]["quantity"], json!(200.0));

        let response = server
            .delete(&format!("/meal-plans/{}/items/{}", plan_id, item_id))
            .add_query_param("expected_version", 0)
            .await;
        response.assert_status(StatusCode::CONFLICT);

        let response = server
            .get(&format!("/meal-plans/{}/days/7", plan_id))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_item_body_is_rejected() {
        let server = test_server().await;
        let plan = create_plan(&server).await;

        let response = server
            .post(&format!("/meal-plans/{}/items", plan["id"].as_str().unwrap()))
            .json(&json!({
                "day_index": 9,
                "meal_slot": "lunch",
                "food_id": uuid::Uuid::nil(),
                "quantity": 100.0,
                "unit": "g"
            }))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_probes() {
        let server = test_server().await;

        server.get("/health/live").await.assert_json(&json!({ "status": "ok" }));

        let response = server.get("/health/ready").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"]["backend"], json!("memory"));
    }
}
