use std::sync::atomic::Ordering;

use sea_orm::EntityTrait;
use server::entity::pdf;

use crate::common::{TestApp, routes, sample_pdf};

async fn record_count(app: &TestApp) -> usize {
    pdf::Entity::find()
        .all(&app.db)
        .await
        .expect("DB query failed")
        .len()
}

mod pdf_upload {
    use super::*;

    #[tokio::test]
    async fn upload_stores_file_and_creates_record() {
        let app = TestApp::spawn().await;
        let bytes = sample_pdf(&["Invoice number 42"]);

        let res = app.upload("invoice.pdf", bytes.clone()).await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["name"], "invoice.pdf");
        assert_eq!(res.body["selected"], false);
        assert!(res.body.get("storage_key").is_none());

        let file = res.body["file"].as_str().unwrap();
        assert!(file.ends_with("pdfs/pdf_invoice.pdf"), "unexpected reference {file}");
        assert_eq!(std::fs::read(file).unwrap(), bytes);
        assert_eq!(app.puts(), 1);

        let stored = pdf::Entity::find_by_id(res.id())
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.storage_key.as_deref(), Some("pdfs/pdf_invoice.pdf"));
    }

    #[tokio::test]
    async fn non_pdf_is_rejected_before_storage_or_database() {
        let app = TestApp::spawn().await;

        let res = app.upload("notes.txt", b"hello".to_vec()).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "Only PDF files are allowed");

        assert_eq!(app.puts(), 0);
        assert_eq!(record_count(&app).await, 0);
    }

    #[tokio::test]
    async fn path_like_filenames_are_rejected() {
        let app = TestApp::spawn().await;

        let res = app.upload("../../etc/evil.pdf", b"%PDF".to_vec()).await;
        assert_eq!(res.status, 400);
        assert_eq!(app.puts(), 0);
    }

    #[tokio::test]
    async fn missing_file_field_is_400() {
        let app = TestApp::spawn().await;

        let form = reqwest::multipart::Form::new().text("name", "invoice.pdf");
        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::UPLOAD))
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn oversized_file_is_413() {
        let app = TestApp::spawn_with_limit(1024).await;

        let res = app.upload("big.pdf", vec![b'x'; 4096]).await;
        assert_eq!(res.status, 413, "{}", res.text);
        assert_eq!(res.body["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(record_count(&app).await, 0);
    }

    #[tokio::test]
    async fn deleting_an_upload_removes_the_stored_file() {
        let app = TestApp::spawn().await;
        let res = app.upload("report.pdf", sample_pdf(&["Quarterly"])).await;
        let id = res.id();
        let file = res.body["file"].as_str().unwrap().to_string();

        let res = app.delete(&routes::pdf(id)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(app.deletes(), 1);
        assert!(!std::path::Path::new(&file).exists());
        assert_eq!(app.get(&routes::pdf(id)).await.status, 404);
    }

    #[tokio::test]
    async fn failed_storage_delete_keeps_the_record() {
        let app = TestApp::spawn().await;
        let id = app.upload("keep.pdf", sample_pdf(&["Keep me"])).await.id();
        app.store.fail_deletes.store(true, Ordering::SeqCst);

        let res = app.delete(&routes::pdf(id)).await;
        assert_eq!(res.status, 500);
        assert_eq!(res.body["code"], "UPSTREAM_ERROR");
        assert!(res.text.contains("object store unavailable"));

        assert_eq!(app.get(&routes::pdf(id)).await.status, 200);
    }
}
