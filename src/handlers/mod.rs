pub mod catalog;
pub mod orders;
pub mod reports;

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};
    use serde_json::{json, Value};

    use crate::application::query_service::WholesaleService;
    use crate::domain::errors::QueryError;
    use crate::domain::row::SqlParam;
    use crate::infrastructure::statements::CatalogScope;
    use crate::test_support::RecordingExecutor;

    macro_rules! app_with {
        ($executor:expr) => {
            test::init_service(App::new().configure(crate::configure(WholesaleService::new(
                $executor.clone(),
                CatalogScope::default(),
            ))))
            .await
        };
    }

    // ── catalog ──────────────────────────────────────────────────────────────

    #[actix_web::test]
    async fn tables_returns_names() {
        let executor = RecordingExecutor::returning(vec![
            json!({ "table_name": "customers" }),
            json!({ "table_name": "orders" }),
        ]);
        let app = app_with!(executor);

        let req = test::TestRequest::get().uri("/api/tables").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!(["customers", "orders"]));
    }

    #[actix_web::test]
    async fn views_failure_returns_500_with_detail() {
        let executor = RecordingExecutor::failing(QueryError::database("connection refused"));
        let app = app_with!(executor);

        let req = test::TestRequest::get().uri("/api/views").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "message": "Error fetching views", "errorDetail": "connection refused" })
        );
    }

    #[actix_web::test]
    async fn data_rejects_invalid_name_without_query() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        for uri in ["/api/data/Orders;DROP", "/api/data/Orders%5D", "/api/data/a%20b"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "message": "Invalid object name format." }));
        }
        assert!(executor.statements().is_empty());
    }

    #[actix_web::test]
    async fn data_failure_names_the_qualified_object() {
        let executor = RecordingExecutor::failing(QueryError::database(
            "relation \"public.Orders\" does not exist",
        ));
        let app = app_with!(executor);

        let req = test::TestRequest::get().uri("/api/data/Orders").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Error fetching data from public.Orders");
    }

    #[actix_web::test]
    async fn data_returns_rows_in_column_order() {
        let executor = RecordingExecutor::returning(vec![
            json!({ "b": "x", "a": 1 }),
            json!({ "b": "y", "a": 2 }),
        ]);
        let app = app_with!(executor);

        let req = test::TestRequest::get().uri("/api/data/Products").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;

        assert_eq!(body, r#"[{"b":"x","a":1},{"b":"y","a":2}]"#.as_bytes());
        assert!(executor.statements()[0].sql.contains("\"Products\" LIMIT 100"));
    }

    // ── reports ──────────────────────────────────────────────────────────────

    #[actix_web::test]
    async fn history_rejects_non_numeric_customer() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::get()
            .uri("/api/customer/abc/orders")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Invalid Customer ID" }));
        assert!(executor.statements().is_empty());
    }

    #[actix_web::test]
    async fn history_binds_customer_id() {
        let executor = RecordingExecutor::returning(vec![json!({ "order_id": 3 })]);
        let app = app_with!(executor);

        let req = test::TestRequest::get()
            .uri("/api/customer/12/orders")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!([{ "order_id": 3 }]));
        assert_eq!(executor.statements()[0].params, vec![SqlParam::Int(Some(12))]);
    }

    #[actix_web::test]
    async fn low_stock_uses_defaults() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::get()
            .uri("/api/products/lowstock")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body, json!([]));
        assert_eq!(
            executor.statements()[0].params,
            vec![SqlParam::Int(None), SqlParam::Float(100.0)]
        );
    }

    #[actix_web::test]
    async fn low_stock_ignores_garbage_and_reads_valid_values() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::get()
            .uri("/api/products/lowstock?warehouseId=x&threshold=25.5")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            executor.statements()[0].params,
            vec![SqlParam::Int(None), SqlParam::Float(25.5)]
        );
    }

    #[actix_web::test]
    async fn low_stock_takes_first_of_repeated_keys() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::get()
            .uri("/api/products/lowstock?threshold=1&threshold=2&warehouseId=3.7")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            executor.statements()[0].params,
            vec![SqlParam::Int(Some(3)), SqlParam::Float(1.0)]
        );
    }

    #[actix_web::test]
    async fn low_stock_tolerates_malformed_query_string() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::get()
            .uri("/api/products/lowstock?threshold&=5&warehouseId=north")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            executor.statements()[0].params,
            vec![SqlParam::Int(None), SqlParam::Float(100.0)]
        );
    }

    #[actix_web::test]
    async fn query_extractor_errors_are_json() {
        async fn typed(query: web::Query<super::reports::LowStockParams>) -> HttpResponse {
            HttpResponse::Ok().json(query.into_inner().threshold)
        }
        let executor = RecordingExecutor::returning(vec![]);
        let app = test::init_service(
            App::new()
                .configure(crate::configure(WholesaleService::new(
                    executor.clone(),
                    CatalogScope::default(),
                )))
                .route("/typed", web::get().to(typed)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/typed?threshold=1&threshold=2")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query string"));
    }

    // ── orders ───────────────────────────────────────────────────────────────

    #[actix_web::test]
    async fn create_order_returns_201_with_new_id() {
        let executor = RecordingExecutor::returning(vec![json!({ "NewOrderID": 42 })]);
        let app = app_with!(executor);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({ "customerId": 5, "employeeId": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "orderId": 42, "message": "Order created successfully." })
        );
        assert_eq!(
            executor.statements()[0].params,
            vec![
                SqlParam::Int(Some(5)),
                SqlParam::Int(Some(2)),
                SqlParam::Date(None),
                SqlParam::Text(None),
            ]
        );
    }

    #[actix_web::test]
    async fn create_order_without_identity_is_soft_200() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({ "customerId": "5", "employeeId": "2" }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body.get("orderId").is_none());
        assert!(body["message"].as_str().unwrap().starts_with("Order creation initiated"));
    }

    #[actix_web::test]
    async fn create_order_requires_ids() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({ "customerId": 5 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({ "message": "Customer ID and Employee ID are required." })
        );
        assert!(executor.statements().is_empty());
    }

    #[actix_web::test]
    async fn create_order_database_error_is_passed_through() {
        let executor = RecordingExecutor::failing(QueryError::database(
            "insert or update on table \"orders\" violates foreign key constraint",
        ));
        let app = app_with!(executor);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({ "customerId": 999, "employeeId": 2 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"]
            .as_str()
            .unwrap()
            .contains("violates foreign key constraint"));
        assert!(body["errorDetail"].is_string());
    }

    #[actix_web::test]
    async fn malformed_json_is_a_bad_request() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().starts_with("Invalid JSON body"));
    }

    #[actix_web::test]
    async fn add_item_succeeds() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let req = test::TestRequest::post()
            .uri("/api/orders/42/items")
            .set_json(json!({ "productId": 7, "warehouseId": 1, "quantity": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Product added to or updated on the order." }));
        assert_eq!(
            executor.statements()[0].params,
            vec![
                SqlParam::Int(Some(42)),
                SqlParam::Int(Some(7)),
                SqlParam::Int(Some(1)),
                SqlParam::Int(Some(3)),
            ]
        );
    }

    #[actix_web::test]
    async fn add_item_rejects_non_positive_quantity() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        for quantity in [json!(0), json!(-5)] {
            let req = test::TestRequest::post()
                .uri("/api/orders/42/items")
                .set_json(json!({ "productId": 7, "warehouseId": 1, "quantity": quantity }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "message": "Quantity must be greater than zero." }));
        }
        assert!(executor.statements().is_empty());
    }

    #[actix_web::test]
    async fn add_item_reports_which_constraint_failed() {
        let executor = RecordingExecutor::returning(vec![]);
        let app = app_with!(executor);

        let cases = [
            (
                "/api/orders/abc/items",
                json!({ "productId": 7, "warehouseId": 1, "quantity": 3 }),
                "Order ID in URL must be a number.",
            ),
            (
                "/api/orders/42/items",
                json!({ "productId": 7, "quantity": 3 }),
                "Product ID, Warehouse ID, and Quantity are required.",
            ),
            (
                "/api/orders/42/items",
                json!({ "productId": null, "warehouseId": 1, "quantity": 3 }),
                "Product ID, Warehouse ID, and Quantity must be numbers.",
            ),
        ];
        for (uri, payload, message) in cases {
            let req = test::TestRequest::post()
                .uri(uri)
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], json!(message));
        }
        assert!(executor.statements().is_empty());
    }

    #[actix_web::test]
    async fn add_item_surfaces_raised_procedure_error() {
        let executor = RecordingExecutor::failing(QueryError::Database {
            message: "Insufficient stock for product 7 in warehouse 1".to_string(),
            code: Some("Unknown".to_string()),
            detail: None,
        });
        let app = app_with!(executor);

        let req = test::TestRequest::post()
            .uri("/api/orders/42/items")
            .set_json(json!({ "productId": 7, "warehouseId": 1, "quantity": 300 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "message": "Insufficient stock for product 7 in warehouse 1",
                "errorDetail": "Insufficient stock for product 7 in warehouse 1"
            })
        );
    }
}
