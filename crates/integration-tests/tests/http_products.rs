//! Product API end to end: HTTP client → router → redb store.

#![allow(clippy::unwrap_used)]

use fruitvendor_core::{Client, Error, Product, ProductId, ProductService};
use fruitvendor_integration_tests::TestServer;
use serde_json::Value;

fn apple(id: &str) -> Product {
    Product {
        token: "t0k".to_string(),
        name: "Apple".to_string(),
        sku: "S1".to_string(),
        product_type: "fruit".to_string(),
        color: "Red".to_string(),
        description: "crisp".to_string(),
        ..Product::new(id)
    }
}

#[test]
fn test_create_and_fetch() {
    let server = TestServer::start();
    let service = server.client().product_service();

    let mut product = apple("X");
    service.create_product(&mut product).unwrap();
    assert_eq!(product.token, "t0k");

    let fetched = service.product(&ProductId::new("X")).unwrap();
    assert_eq!(fetched.sku, "S1");
    assert_eq!(fetched.name, "Apple");
    assert_eq!(fetched.mod_time, product.mod_time);
    // The public view never carries the token.
    assert!(fetched.token.is_empty());

    // The store kept it.
    let stored = server.db().products().get(&ProductId::new("X")).unwrap();
    assert_eq!(stored.token, "t0k");
}

#[test]
fn test_lifecycle() {
    let server = TestServer::start();
    let service = server.client().product_service();
    let id = ProductId::new("X");

    let mut product = Product {
        sku: "S1".to_string(),
        ..Product::new("X")
    };
    service.create_product(&mut product).unwrap();
    let t0 = product.mod_time;

    let patch = Product {
        sku: "S2".to_string(),
        ..Product::default()
    };
    let updated = service.update_product(&id, &patch).unwrap();
    assert_eq!(updated.sku, "S2");
    assert!(updated.mod_time >= t0);
    assert_eq!(service.product(&id).unwrap().sku, "S2");

    service.delete_product(&id, "").unwrap();
    assert!(matches!(service.product(&id), Err(Error::ProductNotFound)));
}

#[test]
fn test_errors_map_back_to_variants() {
    let server = TestServer::start();
    let service = server.client().product_service();

    assert!(matches!(
        service.product(&ProductId::new("nope")),
        Err(Error::ProductNotFound)
    ));
    assert!(matches!(
        service.create_product(&mut Product::default()),
        Err(Error::ProductIdRequired)
    ));

    service.create_product(&mut apple("A")).unwrap();
    assert!(matches!(
        service.create_product(&mut apple("A")),
        Err(Error::ProductExists)
    ));
    assert!(matches!(
        service.update_product(&ProductId::new("B"), &apple("B")),
        Err(Error::ProductNotFound)
    ));
    assert!(matches!(
        service.delete_product(&ProductId::new("B"), "t0k"),
        Err(Error::ProductNotFound)
    ));
}

#[test]
fn test_list() {
    let server = TestServer::start();
    let service = server.client().product_service();

    assert!(service.products().unwrap().is_empty());

    for id in ["A", "B", "C"] {
        service.create_product(&mut apple(id)).unwrap();
    }
    assert_eq!(service.products().unwrap().len(), 3);
}

#[test]
fn test_internal_errors_are_hidden() {
    let server = TestServer::start();
    let service = server.client().product_service();

    server.db().close();
    assert!(matches!(service.products(), Err(Error::Internal)));
}

#[test]
fn test_raw_responses() {
    let server = TestServer::start();
    let http = reqwest::blocking::Client::new();
    let base = server.url();

    let response = http.get(base.join("/health").unwrap()).send().unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let response = http
        .get(base.join("/api/products/missing").unwrap())
        .send()
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    let body: Value = response.json().unwrap();
    assert_eq!(body, serde_json::json!({"err": "product not found"}));

    let response = http
        .post(base.join("/api/products").unwrap())
        .header("content-type", "application/json")
        .body("{oops")
        .send()
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().unwrap();
    assert_eq!(body["err"], "invalid json");
}
