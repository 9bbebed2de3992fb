//! HTTP surface: auth, store scope and the day-close endpoint

mod common;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use common::{COMPANY_ID, Fixture};
use lotto_server::api::build_app;
use lotto_server::{Config, ServerState};

struct TestApp {
    state: ServerState,
    app: Router,
}

impl TestApp {
    async fn new() -> Self {
        let state = ServerState::in_memory(Config::for_tests()).await.unwrap();
        let app = build_app(&state).with_state(state.clone());
        Self { state, app }
    }

    async fn fixture(&self) -> Fixture {
        Fixture::with_pool(self.state.pool.clone(), COMPANY_ID, "Main St").await
    }

    fn token(&self, company_id: i64, role: &str, permissions: &[&str]) -> String {
        let permissions: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
        self.state
            .jwt_service
            .generate_token(7, "ana", company_id, role, &permissions)
            .unwrap()
    }

    fn manager(&self) -> String {
        self.token(
            COMPANY_ID,
            "manager",
            &["inventory:manage", "shifts:manage", "day:close", "reports:view"],
        )
    }

    async fn call(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

#[tokio::test]
async fn test_health_is_public() {
    let t = TestApp::new().await;
    let (status, body) = t.call("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "healthy");

    let (status, body) = t.call("GET", "/api/health/detailed", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let t = TestApp::new().await;
    let (status, body) = t.call("GET", "/api/stores", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_AUTHENTICATED");

    let (status, _) = t.call("GET", "/api/stores", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_foreign_and_missing_store_look_the_same() {
    let t = TestApp::new().await;
    let fx = t.fixture().await;
    let outsider = t.token(COMPANY_ID + 1, "manager", &["inventory:manage"]);

    let (status, foreign) = t
        .call("GET", &format!("/api/stores/{}/bins", fx.store.id), Some(&outsider), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(foreign["error"]["code"], "PERMISSION_DENIED");

    let (status, missing) = t
        .call("GET", "/api/stores/424242/bins", Some(&outsider), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(missing["error"], foreign["error"]);
}

#[tokio::test]
async fn test_store_list_is_company_scoped() {
    let t = TestApp::new().await;
    let fx = t.fixture().await;
    fx.sibling(COMPANY_ID + 1, "Elm St").await;

    let (status, body) = t.call("GET", "/api/stores", Some(&t.manager()), None).await;
    assert_eq!(status, StatusCode::OK);
    let stores = body["data"].as_array().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0]["name"], "Main St");
}

#[tokio::test]
async fn test_store_creation_requires_admin_and_valid_timezone() {
    let t = TestApp::new().await;
    let payload = json!({ "name": "Harbor", "state_code": "NY", "timezone": "America/New_York" });

    let (status, body) = t
        .call("POST", "/api/stores", Some(&t.manager()), Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "ADMIN_REQUIRED");

    // 权限列表里的 "all" 不能代替 admin 角色
    let superuser = t.token(COMPANY_ID, "manager", &["all"]);
    let (status, _) = t
        .call("POST", "/api/stores", Some(&superuser), Some(payload.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = t.token(COMPANY_ID, "admin", &["all"]);
    let (status, body) = t.call("POST", "/api/stores", Some(&admin), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["company_id"], COMPANY_ID);

    let bad = json!({ "name": "Nowhere", "timezone": "Mars/Olympus" });
    let (_, body) = t.call("POST", "/api/stores", Some(&admin), Some(bad)).await;
    assert_eq!(body["error"]["code"], "STORE_INVALID_TIMEZONE");
}

#[tokio::test]
async fn test_clerk_cannot_receive_packs() {
    let t = TestApp::new().await;
    let fx = t.fixture().await;
    let clerk = t.token(COMPANY_ID, "clerk", &["shifts:manage", "day:close"]);

    let payload = json!({
        "game_id": fx.game.id,
        "pack_number": "P1",
        "serial_start": "000",
        "serial_end": "029"
    });
    let uri = format!("/api/stores/{}/packs", fx.store.id);
    let (status, body) = t.call("POST", &uri, Some(&clerk), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "PERMISSION_DENIED");

    let (status, body) = t.call("POST", &uri, Some(&t.manager()), Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "RECEIVED");
}

#[tokio::test]
async fn test_day_close_round_trip() {
    let t = TestApp::new().await;
    let fx = t.fixture().await;
    let (_, p) = fx.stocked_bin(0).await;
    let s = fx.open_shift("Register 1", "Ana").await;
    let token = t.manager();
    let base = format!("/api/stores/{}", fx.store.id);

    let payload = json!({
        "closings": [{ "pack_id": p.id, "closing_serial": "035" }],
        "entry_method": "SCAN",
        "current_shift_id": s.id
    });
    let (status, body) = t
        .call("POST", &format!("{base}/lottery/day/close"), Some(&token), Some(payload))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["closings_created"], 1);
    assert_eq!(data["day_closed"], true);
    assert_eq!(data["business_day"]["status"], "CLOSED");
    assert_eq!(data["bins_closed"][0]["bin_number"], 1);
    assert_eq!(data["bins_closed"][0]["closing_serial"], "035");
    let date = data["business_day"]["business_date"].as_str().unwrap().to_string();

    let (_, body) = t
        .call("GET", &format!("{base}/bins/current"), Some(&token), None)
        .await;
    let pack = &body["data"][0]["pack"];
    assert_eq!(pack["starting_serial"], "035");
    assert!(pack["ending_serial"].is_null());

    let (status, body) = t
        .call("GET", &format!("{base}/lottery/days/{date}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_tickets_sold"], 35);
    assert_eq!(body["data"]["total_sales_amount"], 175.0);
    assert_eq!(body["data"]["packs"][0]["ending_serial"], "035");

    let (_, body) = t
        .call("GET", &format!("{base}/lottery/day/period"), Some(&token), None)
        .await;
    assert_eq!(body["data"]["is_first_period"], false);
    assert_eq!(body["data"]["last_closed_date"], date.as_str());
    assert_eq!(body["data"]["label"], "TODAY");
}

#[tokio::test]
async fn test_day_close_rejections_are_structured() {
    let t = TestApp::new().await;
    let fx = t.fixture().await;
    let (b1, p1) = fx.stocked_bin(0).await;
    let (_, p2) = fx.stocked_bin(1).await;
    let s = fx.open_shift("Register 1", "Ana").await;
    fx.open_shift("Register 2", "Ben").await;
    let token = t.manager();
    let uri = format!("/api/stores/{}/lottery/day/close", fx.store.id);

    let payload = json!({
        "closings": [{ "pack_id": p2.id, "closing_serial": "010" }],
        "entry_method": "SCAN",
        "current_shift_id": s.id
    });
    let (status, body) = t.call("POST", &uri, Some(&token), Some(payload.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "SHIFTS_STILL_OPEN");
    assert_eq!(body["error"]["details"]["open_shifts"][0]["cashier_name"], "Ben");

    let blocking = lotto_server::db::repository::shift::find_unclosed(&fx.pool, fx.store.id)
        .await
        .unwrap()
        .into_iter()
        .find(|x| x.id != s.id)
        .unwrap();
    fx.close_shift(&blocking).await;

    let (status, body) = t.call("POST", &uri, Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "MISSING_PACKS");
    assert_eq!(body["error"]["details"]["missing"][0]["bin_id"], b1.id);
    assert_eq!(body["error"]["details"]["missing"][0]["pack_id"], p1.id);

    let out_of_range = json!({
        "closings": [
            { "pack_id": p1.id, "closing_serial": "010" },
            { "pack_id": p2.id, "closing_serial": "061" }
        ],
        "entry_method": "MANUAL",
        "current_shift_id": s.id
    });
    let (status, body) = t.call("POST", &uri, Some(&token), Some(out_of_range)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"]["pack_id"], p2.id);
}
