//! API Router with Swagger UI

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::{EmptyData, PaginatedResponse};
use super::modules::{groups, health, request_id::request_id_middleware, reservations, resources};
use super::state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Reservations
        reservations::create_reservation,
        reservations::list_reservations,
        reservations::current_reservations,
        reservations::get_reservation,
        reservations::update_reservation,
        reservations::delete_reservation,
        reservations::holder_reservations,
        // Resources
        resources::list_resources,
        resources::get_resource,
        resources::resource_availability,
        // Groups
        groups::list_groups,
        groups::get_group,
    ),
    components(
        schemas(
            EmptyData,
            PaginatedResponse<reservations::ReservationDto>,
            PaginatedResponse<resources::ResourceDto>,
            PaginatedResponse<groups::GroupDto>,
            health::HealthResponse,
            health::ComponentHealth,
            reservations::CreateReservationRequest,
            reservations::UpdateReservationRequest,
            reservations::ReservationDto,
            resources::ResourceDto,
            resources::AvailabilityDto,
            groups::GroupDto,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Reservations", description = "Book, reschedule and cancel resources"),
        (name = "Resources", description = "Rentable resources, availability and price quotes"),
        (name = "Groups", description = "Companies owning resources"),
    ),
    info(
        title = "Rental Service API",
        version = "1.0.0",
        description = "REST API for reserving rentable resources",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/current", get(reservations::current_reservations))
        .route(
            "/{id}",
            get(reservations::get_reservation)
                .put(reservations::update_reservation)
                .delete(reservations::delete_reservation),
        );

    let resource_routes = Router::new()
        .route("/", get(resources::list_resources))
        .route("/{id}", get(resources::get_resource))
        .route("/{id}/availability", get(resources::resource_availability));

    let group_routes = Router::new()
        .route("/", get(groups::list_groups))
        .route("/{id}", get(groups::get_group));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Reservations
        .nest("/api/v1/reservations", reservation_routes)
        .route(
            "/api/v1/holders/{id}/reservations",
            get(reservations::holder_reservations),
        )
        // Resources
        .nest("/api/v1/resources", resource_routes)
        // Groups
        .nest("/api/v1/groups", group_routes)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::application::{ListingService, ReservationService};
    use crate::domain::query::PageLimits;
    use crate::domain::{Holder, PricingPolicy, Resource, ResourceGroup};
    use crate::infrastructure::InMemoryRepositoryProvider;
    use crate::shared::CancelSignal;

    struct Fixture {
        app: Router,
        holder_id: i32,
        resource_id: i32,
    }

    fn fixture() -> Fixture {
        fixture_with_abort(CancelSignal::new())
    }

    fn fixture_with_abort(abort: CancelSignal) -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let now = Utc::now();
        let holder = repos.add_holder(Holder {
            id: 0,
            username: "alice".into(),
            email: "alice@example.com".into(),
            created_at: now,
        });
        let group = repos.add_group(ResourceGroup {
            id: 0,
            name: "Acme Rentals".into(),
            email: "desk@acme.example".into(),
            phone: "555-0100".into(),
            address: "1 Main St".into(),
            created_at: now,
            updated_at: now,
        });
        let resource = repos.add_resource(Resource {
            id: 0,
            group_id: group.id,
            make: "Toyota".into(),
            model: "Corolla".into(),
            year: 2022,
            color: "blue".into(),
            registration_no: "AB-123".into(),
            daily_rate: Decimal::from(100),
            created_at: now,
            updated_at: now,
        });

        let reservations = Arc::new(ReservationService::new(repos.clone(), PricingPolicy::default()));
        let listing = Arc::new(ListingService::new(repos, PageLimits::default()));
        let state = AppState::new(reservations, listing, abort, Duration::from_secs(5));

        Fixture {
            app: create_api_router(state),
            holder_id: holder.id,
            resource_id: resource.id,
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn decimal(v: &Value) -> Decimal {
        v.as_str().unwrap().parse().unwrap()
    }

    async fn book(f: &Fixture, start: &str, end: &str) -> (StatusCode, Value) {
        let body = json!({
            "holder_id": f.holder_id,
            "resource_id": f.resource_id,
            "start_date": start,
            "end_date": end,
        });
        send(&f.app, with_json("POST", "/api/v1/reservations", body)).await
    }

    #[tokio::test]
    async fn health_reports_memory_backend() {
        let f = fixture();
        let (status, body) = send(&f.app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "memory");
    }

    #[tokio::test]
    async fn create_then_reschedule_reprices() {
        let f = fixture();
        let (status, body) = book(&f, "2025-01-01", "2025-01-04").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["success"], true);
        assert_eq!(decimal(&body["data"]["total"]), Decimal::from(300));

        let id = body["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/v1/reservations/{id}");
        let update = json!({ "start_date": "2025-01-01", "end_date": "2025-01-10" });
        let (status, body) = send(&f.app, with_json("PUT", &uri, update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body["data"]["total"]), Decimal::from(900));

        let (status, body) = send(&f.app, get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["end_date"], "2025-01-10");
    }

    #[tokio::test]
    async fn overlapping_booking_is_rejected() {
        let f = fixture();
        assert_eq!(book(&f, "2025-03-01", "2025-03-05").await.0, StatusCode::CREATED);

        let (status, body) = book(&f, "2025-03-05", "2025-03-07").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .contains("resource not available for selected dates"));
    }

    #[tokio::test]
    async fn bad_dates_and_invalid_bodies() {
        let f = fixture();
        assert_eq!(book(&f, "2025-13-01", "2025-13-02").await.0, StatusCode::BAD_REQUEST);
        assert_eq!(book(&f, "2025-01-05", "2025-01-01").await.0, StatusCode::BAD_REQUEST);

        let body = json!({
            "holder_id": 0,
            "resource_id": f.resource_id,
            "start_date": "2025-01-01",
            "end_date": "2025-01-02",
        });
        let (status, body) = send(&f.app, with_json("POST", "/api/v1/reservations", body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("holder_id"));
    }

    #[tokio::test]
    async fn unknown_holder_is_not_found() {
        let f = fixture();
        let body = json!({
            "holder_id": 999,
            "resource_id": f.resource_id,
            "start_date": "2025-01-01",
            "end_date": "2025-01-02",
        });
        let (status, _) = send(&f.app, with_json("POST", "/api/v1/reservations", body)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_twice_gives_not_found() {
        let f = fixture();
        let (_, body) = book(&f, "2025-04-01", "2025-04-02").await;
        let uri = format!("/api/v1/reservations/{}", body["data"]["id"]);
        let delete = || Request::builder().method("DELETE").uri(&uri).body(Body::empty()).unwrap();

        assert_eq!(send(&f.app, delete()).await.0, StatusCode::OK);
        assert_eq!(send(&f.app, delete()).await.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn listing_filters_and_rejects_unknown_fields() {
        let f = fixture();
        book(&f, "2025-01-01", "2025-01-02").await;
        book(&f, "2025-02-01", "2025-02-02").await;

        let (status, body) = send(
            &f.app,
            get("/api/v1/reservations?start_date%5Bgte%5D=2025-01-15&sort=start_date-desc"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["items"][0]["start_date"], "2025-02-01");

        let (status, _) = send(&f.app, get("/api/v1/reservations?secret%5Beq%5D=1")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&f.app, get("/api/v1/groups?name%5Bzz%5D=x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&f.app, get("/api/v1/groups?name%5Bsw%5D=Acme")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["items"][0]["name"], "Acme Rentals");
        assert!(body["data"]["items"][0].get("phone").is_none());
    }

    #[tokio::test]
    async fn holder_and_current_reservations() {
        let f = fixture();
        book(&f, "2025-05-01", "2025-05-03").await;
        book(&f, "2025-06-01", "2025-06-03").await;

        let uri = format!("/api/v1/holders/{}/reservations", f.holder_id);
        let (_, body) = send(&f.app, get(&uri)).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (_, body) = send(&f.app, get("/api/v1/reservations/current?date=2025-05-03")).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, _) = send(&f.app, get("/api/v1/reservations/current?date=tomorrow")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn availability_quotes_a_price() {
        let f = fixture();
        book(&f, "2025-07-10", "2025-07-12").await;

        let uri = format!(
            "/api/v1/resources/{}/availability?start_date=2025-07-01&end_date=2025-07-04",
            f.resource_id
        );
        let (status, body) = send(&f.app, get(&uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["available"], true);
        assert_eq!(body["data"]["billed_days"], 3);
        assert_eq!(decimal(&body["data"]["quoted_total"]), Decimal::from(300));

        let uri = format!(
            "/api/v1/resources/{}/availability?start_date=2025-07-12&end_date=2025-07-15",
            f.resource_id
        );
        let (_, body) = send(&f.app, get(&uri)).await;
        assert_eq!(body["data"]["available"], false);

        let (status, _) = send(
            &f.app,
            get("/api/v1/resources/999/availability?start_date=2025-07-01&end_date=2025-07-02"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn resources_hide_registration_numbers() {
        let f = fixture();
        let (status, body) = send(&f.app, get("/api/v1/resources?registration_no=AB-123")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
        assert!(body["data"]["items"][0].get("registration_no").is_none());

        let (status, _) = send(&f.app, get("/api/v1/resources?sort=registration_no-asc")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&f.app, get("/api/v1/resources?registration_no%5Bsw%5D=AB")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(&f.app, get("/api/v1/groups?phone%5Bgt%5D=5")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn pattern_filters_treat_wildcards_literally() {
        let f = fixture();
        let (status, body) = send(&f.app, get("/api/v1/resources?make%5Bsw%5D=_")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 0);

        let (_, body) = send(&f.app, get("/api/v1/resources?make%5Bct%5D=%25")).await;
        assert_eq!(body["data"]["total"], 0);

        let (_, body) = send(&f.app, get("/api/v1/resources?make%5Bsw%5D=toy")).await;
        assert_eq!(body["data"]["total"], 1);
    }

    #[tokio::test]
    async fn requests_survive_shutdown_until_the_grace_period_ends() {
        let shutdown = CancelSignal::new();
        let abort = CancelSignal::new();
        let f = fixture_with_abort(abort.clone());
        let escalation = tokio::spawn(crate::shared::abort_after_grace(
            shutdown.clone(),
            abort.clone(),
            Duration::from_millis(200),
        ));

        shutdown.trigger();
        let (status, _) = book(&f, "2025-09-01", "2025-09-02").await;
        assert_eq!(status, StatusCode::CREATED);

        tokio::time::timeout(Duration::from_secs(2), abort.cancelled())
            .await
            .unwrap();
        escalation.await.unwrap();
        let (status, body) = book(&f, "2025-09-10", "2025-09-11").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let f = fixture();
        let (status, body) = send(&f.app, get("/api-doc/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"].get("/api/v1/reservations").is_some());
    }
}
