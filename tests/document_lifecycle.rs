mod common;

use axum::http::StatusCode;
use axum_test::multipart::MultipartForm;
use serde_json::{Value, json};

#[tokio::test]
async fn upload_then_fetch_round_trips_tags_and_visibility() {
    let env = common::TestEnv::start().await;
    let form = MultipartForm::new()
        .add_part("file", common::text_file("algebra.txt", "x^2"))
        .add_text("title", "Algebra")
        .add_text("tags", r#"["math","notes"]"#)
        .add_text("isPublic", "true");

    let created = env.server.post("/api/documents").multipart(form).await;
    created.assert_status(StatusCode::CREATED);
    let created: Value = created.json();
    let id = created["id"].as_i64().expect("numeric id");

    let fetched = env.server.get(&format!("/api/documents/{id}")).await;
    fetched.assert_status_ok();
    let fetched: Value = fetched.json();
    assert_eq!(fetched["tags"], json!(["math", "notes"]));
    assert_eq!(fetched["isPublic"], json!(true));
    assert_eq!(fetched["title"], "Algebra");
    assert_eq!(fetched["filename"], "algebra.txt");
    assert_eq!(fetched["fileType"], "text/plain");
    assert_eq!(fetched["content"], "x^2");
    assert_eq!(fetched["userId"], 1);
    assert_eq!(fetched["shareCode"], Value::Null);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn omitted_tags_serialize_as_empty_array() {
    let env = common::TestEnv::start().await;
    let created: Value = env
        .server
        .post("/api/documents")
        .multipart(common::text_upload("a.txt", "hello"))
        .await
        .json();
    assert_eq!(created["tags"], json!([]));
    assert_eq!(created["isPublic"], json!(false));
    assert_eq!(created["title"], "a.txt");
    assert_eq!(created["content"], "hello");
}

#[tokio::test]
async fn list_is_in_insertion_order_and_filters_by_owner() {
    let env = common::TestEnv::start().await;
    let other: Value = env
        .server
        .post("/api/users")
        .json(&json!({"username": "ada", "password": "pw"}))
        .await
        .json();
    let other_id = other["id"].as_i64().unwrap();

    for (name, owner) in [("a.txt", None), ("b.txt", Some(other_id)), ("c.txt", None)] {
        let mut form = common::text_upload(name, "x");
        if let Some(owner) = owner {
            form = form.add_text("userId", owner.to_string());
        }
        env.server
            .post("/api/documents")
            .multipart(form)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let all: Vec<Value> = env.server.get("/api/documents").await.json();
    let names: Vec<&str> = all.iter().map(|d| d["filename"].as_str().unwrap()).collect();
    assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);

    let mine: Vec<Value> = env
        .server
        .get("/api/documents")
        .add_query_param("userId", other_id)
        .await
        .json();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["userId"], other_id);
}

#[tokio::test]
async fn non_numeric_user_filter_is_bad_request() {
    let env = common::TestEnv::start().await;
    let res = env
        .server
        .get("/api/documents")
        .add_query_param("userId", "abc")
        .await;
    res.assert_status_bad_request();
    assert!(res.json::<Value>()["error"].is_string());
}

#[tokio::test]
async fn unknown_document_is_404_with_error_body() {
    let env = common::TestEnv::start().await;
    let res = env.server.get("/api/documents/999").await;
    res.assert_status_not_found();
    assert_eq!(res.json::<Value>()["error"], "Document not found");

    env.server
        .get("/api/documents/not-a-number")
        .await
        .assert_status_bad_request();
}

#[tokio::test]
async fn update_title_changes_only_title_and_timestamp() {
    let env = common::TestEnv::start().await;
    let form = common::text_upload("notes.txt", "body").add_text("tags", r#"["bio"]"#);
    let created: Value = env.server.post("/api/documents").multipart(form).await.json();
    let id = created["id"].as_i64().unwrap();

    let res = env
        .server
        .put(&format!("/api/documents/{id}"))
        .json(&json!({"title": "X"}))
        .await;
    res.assert_status_ok();
    let updated: Value = res.json();

    assert_eq!(updated["title"], "X");
    for field in [
        "id", "filename", "fileType", "content", "tags", "userId", "isPublic", "shareCode",
        "createdAt",
    ] {
        assert_eq!(updated[field], created[field], "{field} changed");
    }
}

#[tokio::test]
async fn update_rejects_immutable_fields_and_leaves_record_alone() {
    let env = common::TestEnv::start().await;
    let created: Value = env
        .server
        .post("/api/documents")
        .multipart(common::text_upload("n.txt", "body"))
        .await
        .json();
    let id = created["id"].as_i64().unwrap();

    let res = env
        .server
        .put(&format!("/api/documents/{id}"))
        .json(&json!({"title": "Y", "filename": "evil.exe"}))
        .await;
    res.assert_status_bad_request();

    let after: Value = env.server.get(&format!("/api/documents/{id}")).await.json();
    assert_eq!(after, created);
}

#[tokio::test]
async fn update_unknown_document_is_404() {
    let env = common::TestEnv::start().await;
    env.server
        .put("/api/documents/41")
        .json(&json!({"title": "X"}))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn delete_is_reported_once_then_404() {
    let env = common::TestEnv::start().await;
    let created: Value = env
        .server
        .post("/api/documents")
        .multipart(common::text_upload("d.txt", "bye"))
        .await
        .json();
    let path = format!("/api/documents/{}", created["id"]);

    let res = env.server.delete(&path).await;
    res.assert_status_ok();
    assert_eq!(res.json::<Value>(), json!({"success": true}));

    env.server.delete(&path).await.assert_status_not_found();
    env.server.get(&path).await.assert_status_not_found();
}
