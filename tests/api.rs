use axum_test::TestServer;
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{Value, json};

use kotoba::settings::Settings;
use kotoba::storage::SqliteStore;
use kotoba::storage::traits::{GrammarStore, VocabularyStore};
use kotoba::storage::types::{NewGrammar, NewVocabulary};

fn word(kanji: &str, meaning: &str) -> NewVocabulary {
    NewVocabulary {
        kanji: kanji.to_string(),
        furigana: None,
        meaning: meaning.to_string(),
    }
}

async fn server_with(seed: usize) -> TestServer {
    let store = SqliteStore::in_memory().unwrap();
    for i in 1..=seed {
        store
            .create_vocabulary(&word(&format!("語{i}"), &format!("word {i}")))
            .await
            .unwrap();
    }
    TestServer::new(kotoba::app(store, &Settings::default())).unwrap()
}

#[tokio::test]
async fn vocabulary_list_returns_page_and_meta() {
    let server = server_with(25).await;

    let response = server
        .get("/vocabulary")
        .add_query_param("pageNumber", 3)
        .add_query_param("pageSize", 10)
        .await;

    response.assert_status_ok();
    let page: Value = response.json();
    assert_eq!(page["data"].as_array().unwrap().len(), 5);
    assert_eq!(page["meta"]["total"], 25);
    assert_eq!(page["meta"]["lastPage"], 3);
    assert_eq!(page["meta"]["hasPreviousPage"], true);
    assert_eq!(page["meta"]["hasNextPage"], false);
}

#[tokio::test]
async fn overshooting_a_nonempty_set_is_404() {
    let server = server_with(25).await;

    let response = server
        .get("/vocabulary")
        .add_query_param("pageNumber", 4)
        .add_query_param("pageSize", 10)
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"], "no more data");
}

#[tokio::test]
async fn empty_collection_lists_successfully() {
    let server = server_with(0).await;

    let response = server.get("/vocabulary").await;
    response.assert_status_ok();
    let page: Value = response.json();
    assert!(page["data"].as_array().unwrap().is_empty());
    assert_eq!(page["meta"]["total"], 0);
    assert_eq!(page["meta"]["lastPage"], 0);
}

#[tokio::test]
async fn page_zero_equals_page_one() {
    let server = server_with(5).await;

    let zero = server.get("/vocabulary").add_query_param("pageNumber", 0).await;
    let one = server.get("/vocabulary").add_query_param("pageNumber", 1).await;
    zero.assert_status_ok();
    one.assert_status_ok();
    assert_eq!(zero.json::<Value>(), one.json::<Value>());
}

#[tokio::test]
async fn keyword_and_starred_filter_the_list() {
    let server = server_with(15).await;

    let response = server
        .get("/vocabulary")
        .add_query_param("keyword", "word 1")
        .await;
    response.assert_status_ok();
    let page: Value = response.json();
    // "word 1", "word 10" .. "word 15"
    assert_eq!(page["meta"]["total"], 7);
    assert_eq!(page["meta"]["lastPage"], 1);
    assert_eq!(page["meta"]["hasNextPage"], false);

    server.post("/vocabulary/3/star").await.assert_status_ok();
    let response = server.get("/vocabulary").add_query_param("starred", "true").await;
    let page: Value = response.json();
    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(page["data"][0]["id"], 3);
    assert_eq!(page["data"][0]["star"], true);
}

#[tokio::test]
async fn starred_items_sort_before_unstarred() {
    let server = server_with(5).await;
    server.post("/vocabulary/2/star").await.assert_status_ok();

    let page: Value = server.get("/vocabulary").await.json();
    let ids: Vec<i64> = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 5, 4, 3, 1]);
}

#[tokio::test]
async fn zero_page_size_is_rejected() {
    let server = server_with(5).await;
    let response = server.get("/vocabulary").add_query_param("pageSize", 0).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn single_item_lookup_and_miss() {
    let server = server_with(3).await;

    let response = server.get("/vocabulary/2").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["kanji"], "語2");
    assert_eq!(body["star"], false);

    server.get("/vocabulary/99").await.assert_status_not_found();
}

#[tokio::test]
async fn create_validates_and_returns_the_record() {
    let server = server_with(0).await;

    let response = server
        .post("/vocabulary")
        .json(&json!({ "kanji": "勉強", "furigana": "べんきょう", "meaning": "study" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], 1);
    assert_eq!(body["kanji"], "勉強");
    assert_eq!(body["star"], false);

    let response = server
        .post("/vocabulary")
        .json(&json!({ "kanji": "勉強", "meaning": "" }))
        .await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn update_overwrites_or_404s() {
    let server = server_with(1).await;

    let response = server
        .put("/vocabulary/1")
        .json(&json!({ "kanji": "語1", "meaning": "revised" }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let fetched: Value = server.get("/vocabulary/1").await.json();
    assert_eq!(fetched["meaning"], "revised");
    assert_eq!(fetched["furigana"], Value::Null);

    server
        .put("/vocabulary/42")
        .json(&json!({ "kanji": "無", "meaning": "none" }))
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn star_toggle_is_idempotent_under_double_invocation() {
    let server = server_with(1).await;

    server.post("/vocabulary/1/star").await.assert_status_ok();
    let body: Value = server.get("/vocabulary/1").await.json();
    assert_eq!(body["star"], true);

    server.post("/vocabulary/1/star").await.assert_status_ok();
    let body: Value = server.get("/vocabulary/1").await.json();
    assert_eq!(body["star"], false);

    server.post("/vocabulary/9/star").await.assert_status_not_found();
}

#[tokio::test]
async fn csv_import_upserts_and_reports_success() {
    let server = server_with(0).await;

    let csv = "kanji,furigana,meaning\n食べる,たべる,to eat\n飲む,のむ,to drink\n";
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(csv.as_bytes().to_vec())
            .file_name("vocabulary.csv")
            .mime_type("text/csv"),
    );
    let response = server.post("/vocabulary/csv").multipart(form).await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);

    let page: Value = server.get("/vocabulary").await.json();
    assert_eq!(page["meta"]["total"], 2);

    // re-import with one changed row: ids stay stable
    let csv = "kanji,furigana,meaning\n食べる,たべる,to eat (verb)\n飲む,のむ,to drink\n";
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(csv.as_bytes().to_vec())
            .file_name("vocabulary.csv")
            .mime_type("text/csv"),
    );
    server.post("/vocabulary/csv").multipart(form).await.assert_status_ok();

    let page: Value = server.get("/vocabulary").await.json();
    assert_eq!(page["meta"]["total"], 2);
    let eat = page["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|v| v["kanji"] == "食べる")
        .unwrap();
    assert_eq!(eat["id"], 1);
    assert_eq!(eat["meaning"], "to eat (verb)");
}

#[tokio::test]
async fn non_csv_upload_is_unsupported_media_type() {
    let server = server_with(0).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"kanji,furigana,meaning\n".to_vec())
            .file_name("vocabulary.txt")
            .mime_type("text/plain"),
    );
    let response = server.post("/vocabulary/csv").multipart(form).await;
    response.assert_status(axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn grammar_endpoints_mirror_vocabulary() {
    let store = SqliteStore::in_memory().unwrap();
    store
        .create_grammar(&NewGrammar {
            grammar: "〜ばかり".to_string(),
            furigana: None,
            meaning: "just did".to_string(),
            memo: Some("recent past".to_string()),
        })
        .await
        .unwrap();
    let server = TestServer::new(kotoba::app(store, &Settings::default())).unwrap();

    let page: Value = server.get("/grammar").await.json();
    assert_eq!(page["meta"]["total"], 1);
    assert_eq!(page["data"][0]["grammar"], "〜ばかり");
    assert_eq!(page["data"][0]["memo"], "recent past");

    server.post("/grammar/1/star").await.assert_status_ok();
    let body: Value = server.get("/grammar/1").await.json();
    assert_eq!(body["star"], true);

    let csv = "grammar,furigana,meaning,memo\n〜ながら,,while doing,two actions\n";
    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(csv.as_bytes().to_vec())
            .file_name("grammar.csv")
            .mime_type("text/csv"),
    );
    server.post("/grammar/csv").multipart(form).await.assert_status_ok();
    let page: Value = server.get("/grammar").await.json();
    assert_eq!(page["meta"]["total"], 2);
}

#[tokio::test]
async fn reference_lists_respond() {
    let server = server_with(0).await;

    let response = server.get("/honorific").add_query_param("type", "UP").await;
    response.assert_status_ok();
    assert!(response.json::<Value>().as_array().unwrap().is_empty());

    // unknown kind fails query deserialization
    server
        .get("/honorific")
        .add_query_param("type", "SIDEWAYS")
        .await
        .assert_status_bad_request();

    server.get("/ri-adverb").await.assert_status_ok();
    server.get("/onomatopoeia").await.assert_status_ok();
}
