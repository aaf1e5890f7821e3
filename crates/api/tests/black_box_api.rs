use std::time::Duration;

use candystock_api::config::AppConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
    _dir: tempfile::TempDir,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, fresh database file, ephemeral port.
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let config = AppConfig {
            db_path: dir.path().join("challenge.db"),
            bind_addr: "127.0.0.1:0".to_string(),
            feed_interval: Duration::from_secs(1),
            ..AppConfig::default()
        };

        let app = candystock_api::app::build_app(&config)
            .await
            .expect("failed to build app");
        let listener = tokio::net::TcpListener::bind(&config.bind_addr)
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            handle,
            _dir: dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn get_json(client: &reqwest::Client, url: String) -> Value {
    let res = client.get(url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_and_version() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let version = get_json(&client, srv.url("/version")).await;
    assert!(version["version"].as_str().unwrap().starts_with("candystock v"));
}

#[tokio::test]
async fn swedish_fish_is_added_once() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/items"))
        .json(&json!({ "name": "  Swedish Fish " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await.unwrap();
    assert_eq!(created["name"], "Swedish Fish");
    assert!(created["id"].as_i64().unwrap() > 0);

    let res = client
        .post(srv.url("/items"))
        .json(&json!({ "name": "Swedish Fish" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Item already exists" }));

    let items = get_json(&client, srv.url("/items")).await;
    let fish = items
        .as_array()
        .unwrap()
        .iter()
        .filter(|i| i["name"] == "Swedish Fish")
        .count();
    assert_eq!(fish, 1);
}

#[tokio::test]
async fn inventory_lifecycle_add_update_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let item: Value = client
        .post(srv.url("/items"))
        .json(&json!({ "name": "Jelly Beans" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let item_id = item["id"].as_i64().unwrap();

    // Body is parsed without a JSON content type.
    let res = client
        .post(srv.url("/inventory"))
        .body(format!(r#"{{"item": {item_id}, "stock": 4, "capacity": 10}}"#))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let row: Value = res.json().await.unwrap();
    assert_eq!(row["item_name"], "Jelly Beans");
    assert_eq!(row["amount_in_stock"], 4);
    let inv_id = row["id"].as_i64().unwrap();

    let res = client
        .put(srv.url(&format!("/inventory/{inv_id}")))
        .json(&json!({ "stock": 7, "capacity": 10 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "ok" }));

    let rows = get_json(&client, srv.url(&format!("/inventory/{inv_id}"))).await;
    assert_eq!(rows[0]["amount_in_stock"], 7);

    let res = client
        .delete(srv.url(&format!("/inventory/{inv_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "ok" }));

    let res = client
        .delete(srv.url(&format!("/inventory/{inv_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "not_found" }));

    let rows = get_json(&client, srv.url(&format!("/inventory/{inv_id}"))).await;
    assert_eq!(rows, json!([]));
}

#[tokio::test]
async fn inventory_for_unknown_item_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/inventory"))
        .json(&json!({ "item": 999, "stock": 1, "capacity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Item 999 not found");

    let res = client
        .post(srv.url("/inventory"))
        .json(&json!({ "item": 1, "stock": 1, "capacity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn reports_classify_seeded_inventory() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let all = get_json(&client, srv.url("/inventory")).await;
    assert_eq!(all.as_array().unwrap().len(), 17);

    let low = get_json(&client, srv.url("/inventory/low-stock")).await;
    let names: Vec<&str> = low
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["item_name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Good & Plenty", "Twix", "Starburst", "Butterfinger", "Sour Patch Kids"]
    );

    assert_eq!(get_json(&client, srv.url("/inventory/out-of-stock")).await, json!([]));
    assert_eq!(get_json(&client, srv.url("/inventory/overstocked")).await, json!([]));
}

#[tokio::test]
async fn cheapest_restock_and_offerings() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let best = get_json(&client, srv.url("/items/10/restock/100/cheapest")).await;
    assert_eq!(best["distributor_name"], "The Sweet Suite");
    assert_eq!(best["total_cost"], 25.0);

    let offerings = get_json(&client, srv.url("/items/10/distributors")).await;
    assert_eq!(offerings.as_array().unwrap().len(), 2);

    let catalog = get_json(&client, srv.url("/distributors/1/items")).await;
    assert_eq!(catalog[0]["item_name"], "Licorice");

    let res = client
        .get(srv.url("/items/10/restock/many/cheapest"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn distributor_catalog_pricing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/distributors"))
        .json(&json!({ "name": "Sugar Rush" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let distributor: Value = res.json().await.unwrap();
    let id = distributor["id"].as_i64().unwrap();

    let res = client
        .post(srv.url(&format!("/distributors/{id}/catalog")))
        .json(&json!({ "item": 10, "cost": 0.05 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let added: Value = res.json().await.unwrap();
    assert_eq!(added["status"], "ok");
    assert!(added["id"].as_i64().unwrap() > 27);

    let best = get_json(&client, srv.url("/items/10/restock/10/cheapest")).await;
    assert_eq!(best["distributor_name"], "Sugar Rush");

    let res = client
        .put(srv.url(&format!("/distributors/{id}/catalog/10")))
        .json(&json!({ "cost": 0.9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "ok" }));

    let res = client
        .put(srv.url(&format!("/distributors/{id}/catalog/11")))
        .json(&json!({ "cost": 0.9 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "not_found" }));

    let res = client
        .delete(srv.url(&format!("/distributors/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "ok" }));

    let best = get_json(&client, srv.url("/items/10/restock/100/cheapest")).await;
    assert_eq!(best["distributor_name"], "The Sweet Suite");
}

#[tokio::test]
async fn bad_input_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/items"))
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));

    let res = client
        .post(srv.url("/inventory"))
        .json(&json!({ "item": 1, "stock": "lots", "capacity": 2 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .post(srv.url("/items"))
        .json(&json!({ "name": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Both levels are required; a partial update changes nothing.
    let res = client
        .put(srv.url("/inventory/1"))
        .json(&json!({ "stock": 7 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));
    let rows = get_json(&client, srv.url("/inventory/1")).await;
    assert_eq!(rows[0]["amount_in_stock"], 22);
    assert_eq!(rows[0]["total_capacity"], 25);

    let res = client.delete(srv.url("/items/abc")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "invalid id" }));
}

#[tokio::test]
async fn export_is_csv() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(srv.url("/export?table=inventory"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/csv");
    let csv = res.text().await.unwrap();
    assert!(csv.starts_with("inventory_id,item_name,"));
    assert!(csv.contains("Candy Corn"));

    let res = client.get(srv.url("/export?table=users")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "error,invalid_table\n");
}

#[tokio::test]
async fn reset_restores_reference_dataset() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.delete(srv.url("/items/1")).send().await.unwrap();
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "status": "ok" }));
    assert_eq!(
        get_json(&client, srv.url("/inventory")).await.as_array().unwrap().len(),
        16
    );

    let res = client.get(srv.url("/reset")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), "OK");

    let items = get_json(&client, srv.url("/items")).await;
    assert_eq!(items.as_array().unwrap().len(), 17);
    assert_eq!(items[0], json!({ "id": 1, "name": "Licorice" }));
    assert_eq!(
        get_json(&client, srv.url("/inventory")).await.as_array().unwrap().len(),
        17
    );
}

#[tokio::test]
async fn inventory_stream_sends_a_frame_immediately() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut res = client
        .get(srv.url("/stream/inventory"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()["content-type"], "text/event-stream");

    // Collect until the first complete event.
    let mut buf = String::new();
    let frame = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let chunk = res.chunk().await.unwrap().expect("stream ended early");
            buf.push_str(&String::from_utf8_lossy(&chunk));
            if let Some(end) = buf.find("\n\n") {
                return buf[..end].to_string();
            }
        }
    })
    .await
    .expect("no frame within timeout");

    let data = frame.strip_prefix("data: ").expect("unnamed data event");
    let rows: Value = serde_json::from_str(data).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 17);
}
