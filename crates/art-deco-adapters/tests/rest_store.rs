//! REST artwork store against a mock backend

use art_deco::{Artwork, ArtworkStore, Embedding, StoreError};
use art_deco_adapters::{RestArtworkStore, WireSchema};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn starry_night_record() -> serde_json::Value {
    json!({
        "ulid": "A1",
        "title": "Starry Night",
        "author": "Van Gogh",
        "image_url": "http://x/a1.png"
    })
}

fn water_lilies_record() -> serde_json::Value {
    json!({
        "ulid": "B2",
        "title": "Water Lilies",
        "author": "Monet",
        "image_url": "http://x/b2.png"
    })
}

#[tokio::test]
async fn test_fetch_by_id_translates_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/A1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(starry_night_record()))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());
    let artwork = store.fetch_by_id("A1").await.unwrap();

    assert_eq!(
        artwork,
        Some(Artwork::new("A1", "Starry Night", "Van Gogh", "http://x/a1.png"))
    );
}

#[tokio::test]
async fn test_fetch_by_id_not_found_is_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Item not found"})))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());

    assert_eq!(store.fetch_by_id("missing").await, Ok(None));
}

#[tokio::test]
async fn test_fetch_by_id_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/A1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());
    let err = store.fetch_by_id("A1").await.unwrap_err();

    assert_eq!(err, StoreError::status(500, "Internal Server Error"));
}

#[tokio::test]
async fn test_fetch_by_id_malformed_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ulid": "A1",
            "title": "Starry Night",
            "author": "Van Gogh"
        })))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());

    assert!(matches!(
        store.fetch_by_id("A1").await,
        Err(StoreError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn test_fetch_by_id_with_artist_schema() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ulid": "A1",
            "title": "Starry Night",
            "artist": "Van Gogh",
            "image_url": "http://x/a1.png"
        })))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri()).with_schema(WireSchema::V2);
    let artwork = store.fetch_by_id("A1").await.unwrap().unwrap();

    assert_eq!(artwork.author(), "Van Gogh");
}

#[tokio::test]
async fn test_fetch_by_id_encodes_path_segment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/a%20b%2Fc"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(format!("{}/", server.uri()));

    assert_eq!(store.fetch_by_id("a b/c").await, Ok(None));
}

#[tokio::test]
async fn test_fetch_by_empty_id_is_rejected() {
    let store = RestArtworkStore::new("http://127.0.0.1:9");

    assert!(matches!(
        store.fetch_by_id("").await,
        Err(StoreError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn test_search_posts_form_and_keeps_order() {
    let embedding = Embedding::from_vector(&[0.25, -1.5, 3.0e-3]);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items/search"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string(format!(
            "embedding={}",
            urlencoding::encode(embedding.as_str())
        )))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([water_lilies_record(), starry_night_record()])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());
    let artworks = store.search_by_embedding(&embedding).await.unwrap();

    let ids: Vec<&str> = artworks.iter().map(|a| a.id()).collect();
    assert_eq!(ids, vec!["B2", "A1"]);
}

#[tokio::test]
async fn test_search_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());

    assert_eq!(
        store
            .search_by_embedding(&Embedding::from_vector(&[1.0]))
            .await,
        Ok(Vec::new())
    );
}

#[tokio::test]
async fn test_search_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items/search"))
        .respond_with(ResponseTemplate::new(422).set_body_string("invalid embedding"))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());
    let err = store
        .search_by_embedding(&Embedding::from_vector(&[1.0]))
        .await
        .unwrap_err();

    assert_eq!(err, StoreError::status(422, "invalid embedding"));
}

#[tokio::test]
async fn test_search_rejects_object_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(starry_night_record()))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());

    assert!(matches!(
        store
            .search_by_embedding(&Embedding::from_vector(&[1.0]))
            .await,
        Err(StoreError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn test_search_rejects_non_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/items/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());

    assert!(matches!(
        store
            .search_by_embedding(&Embedding::from_vector(&[1.0]))
            .await,
        Err(StoreError::MalformedPayload(_))
    ));
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Port 9 (discard) is closed on test machines
    let store = RestArtworkStore::new("http://127.0.0.1:9");

    assert!(matches!(
        store.fetch_by_id("A1").await,
        Err(StoreError::Unreachable(_))
    ));
}

#[tokio::test]
async fn test_fetch_embedding_by_id() {
    let stored = Embedding::from_vector(&[0.5, 0.25]);
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/items/A1/embedding"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(stored.as_str())))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/items/Z9/embedding"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = RestArtworkStore::new(server.uri());

    assert_eq!(store.fetch_embedding_by_id("A1").await, Ok(Some(stored)));
    assert_eq!(store.fetch_embedding_by_id("Z9").await, Ok(None));
}
