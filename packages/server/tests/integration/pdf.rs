use serde_json::json;

use crate::common::{TestApp, routes};

mod pdf_crud {
    use super::*;

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PDFS,
                &json!({"name": "Invoice", "selected": false, "file": "x"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        let id = res.id();
        assert_eq!(
            res.body,
            json!({"id": id, "name": "Invoice", "selected": false, "file": "x"})
        );

        let res = app.get(&routes::pdf(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!({"id": id, "name": "Invoice", "selected": false, "file": "x"})
        );
    }

    #[tokio::test]
    async fn selected_defaults_to_false() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::PDFS, &json!({"name": "Notes", "file": "/tmp/notes.pdf"}))
            .await;
        assert_eq!(res.status, 201);
        assert_eq!(res.body["selected"], false);
    }

    #[tokio::test]
    async fn create_without_required_fields_is_422() {
        let app = TestApp::spawn().await;

        let res = app.post(routes::PDFS, &json!({"name": "No file"})).await;
        assert_eq!(res.status, 422);
        assert_eq!(res.body["code"], "UNPROCESSABLE_ENTITY");

        let res = app.post_raw(routes::PDFS, "{not json").await;
        assert_eq!(res.status, 422);
    }

    #[tokio::test]
    async fn ids_are_never_reused() {
        let app = TestApp::spawn().await;

        let first = app.create_pdf("a", false, "x").await;
        assert_eq!(app.delete(&routes::pdf(first)).await.status, 200);
        let second = app.create_pdf("b", false, "y").await;

        assert!(second > first);
    }

    #[tokio::test]
    async fn get_missing_record_is_404() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::pdf(9999)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
        assert_eq!(res.body["message"], "PDF not found");
    }
}

mod pdf_listing {
    use super::*;

    #[tokio::test]
    async fn lists_all_records_in_id_order() {
        let app = TestApp::spawn().await;
        let a = app.create_pdf("a", true, "x").await;
        let b = app.create_pdf("b", false, "y").await;
        let c = app.create_pdf("c", true, "z").await;

        let res = app.get(routes::PDFS).await;
        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![a as i64, b as i64, c as i64]);
    }

    #[tokio::test]
    async fn selected_filter_returns_matching_records_only() {
        let app = TestApp::spawn().await;
        app.create_pdf("a", true, "x").await;
        app.create_pdf("b", false, "y").await;
        app.create_pdf("c", true, "z").await;

        let selected = app.get("/pdfs?selected=true").await;
        let names: Vec<&str> = selected
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a", "c"]);

        let unselected = app.get("/pdfs?selected=false").await;
        assert_eq!(unselected.body.as_array().unwrap().len(), 1);
        assert_eq!(unselected.body[0]["name"], "b");
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::PDFS).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!([]));
    }

    #[tokio::test]
    async fn bad_filter_value_is_422() {
        let app = TestApp::spawn().await;

        let res = app.get("/pdfs?selected=maybe").await;
        assert_eq!(res.status, 422);
        assert_eq!(res.body["code"], "UNPROCESSABLE_ENTITY");
    }
}

mod pdf_update {
    use super::*;

    #[tokio::test]
    async fn partial_update_changes_only_supplied_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_pdf("Invoice", false, "x").await;

        let res = app.put(&routes::pdf(id), &json!({"selected": true})).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body,
            json!({"id": id, "name": "Invoice", "selected": true, "file": "x"})
        );

        let res = app
            .put(&routes::pdf(id), &json!({"name": "Invoice 2024", "file": "y"}))
            .await;
        assert_eq!(
            res.body,
            json!({"id": id, "name": "Invoice 2024", "selected": true, "file": "y"})
        );
    }

    #[tokio::test]
    async fn empty_update_returns_current_record() {
        let app = TestApp::spawn().await;
        let id = app.create_pdf("Invoice", true, "x").await;

        let res = app.put(&routes::pdf(id), &json!({})).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Invoice");
        assert_eq!(res.body["selected"], true);
    }

    #[tokio::test]
    async fn update_missing_record_is_404() {
        let app = TestApp::spawn().await;

        let res = app.put(&routes::pdf(404), &json!({"name": "ghost"})).await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn wrongly_typed_field_is_422() {
        let app = TestApp::spawn().await;
        let id = app.create_pdf("Invoice", false, "x").await;

        let res = app.put(&routes::pdf(id), &json!({"selected": "yes"})).await;
        assert_eq!(res.status, 422);
    }
}

mod pdf_delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_the_record() {
        let app = TestApp::spawn().await;
        let id = app.create_pdf("Invoice", false, "x").await;

        let res = app.delete(&routes::pdf(id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body,
            json!({"message": "PDF successfully deleted from storage and database"})
        );

        assert_eq!(app.get(&routes::pdf(id)).await.status, 404);
    }

    #[tokio::test]
    async fn directly_created_records_skip_storage_delete() {
        let app = TestApp::spawn().await;
        let id = app.create_pdf("Linked", false, "https://example.com/a.pdf").await;

        assert_eq!(app.delete(&routes::pdf(id)).await.status, 200);
        assert_eq!(app.deletes(), 0);
    }

    #[tokio::test]
    async fn delete_missing_record_is_404() {
        let app = TestApp::spawn().await;

        let res = app.delete(&routes::pdf(12345)).await;
        assert_eq!(res.status, 404);
        assert_eq!(app.deletes(), 0);
    }
}

mod service {
    use super::*;

    #[tokio::test]
    async fn health_reports_database_up() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::HEALTH).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body, json!({"status": "ok", "database": "up"}));
    }

    #[tokio::test]
    async fn openapi_document_lists_pdf_routes() {
        let app = TestApp::spawn().await;

        let res = app.get("/api-docs/openapi.json").await;
        assert_eq!(res.status, 200);
        let paths = res.body["paths"].as_object().expect("paths object");
        for path in [
            "/pdfs",
            "/pdfs/{id}",
            "/pdfs/upload",
            "/pdfs/summarize-text",
            "/pdfs/qa-pdf/{id}",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }
}
