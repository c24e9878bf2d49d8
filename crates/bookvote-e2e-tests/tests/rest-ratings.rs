use bookvote_e2e_tests::{
    launch_env, prepare_env,
    rest::{list_books, publish_book, rate_book},
};
use futures::future::join_all;
use reqwest::StatusCode;
use serde_json::json;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_ratings() {
    let (args, mut config_guard) = prepare_env("rest-ratings").await.unwrap();
    let base_url = args.base_url.clone();
    let (client, _state) = launch_env(args, &mut config_guard).await.unwrap();

    let (_, book) = publish_book(&client, &base_url, "Hyperion").await.unwrap();

    let (status, body) = rate_book(&client, &base_url, book.id, json!(4), Some("phone"))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"ok": true}));

    let (status, body) = rate_book(&client, &base_url, book.id, json!(1), Some("phone"))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    for bad in [json!(0), json!(6), json!(3.5), json!("x"), json!(null)] {
        let (status, body) = rate_book(&client, &base_url, book.id, bad.clone(), Some("laptop"))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST, "score {bad}");
        assert!(body["error"].is_string());
    }

    let (status, _) = rate_book(&client, &base_url, book.id, json!("2"), Some("laptop"))
        .await
        .unwrap();
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = rate_book(&client, &base_url, 999_999, json!(3), None)
        .await
        .unwrap();
    assert_eq!(status, StatusCode::NOT_FOUND);

    let books = list_books(&client, &base_url).await.unwrap();
    assert_eq!(books[0].votes, 2);
    assert_eq!(books[0].avg_rating, Some(3.0));
}

#[tokio::test]
#[traced_test]
async fn test_concurrent_duplicate_votes() {
    let (args, mut config_guard) = prepare_env("rest-concurrent-votes").await.unwrap();
    let base_url = args.base_url.clone();
    let (client, _state) = launch_env(args, &mut config_guard).await.unwrap();

    let (_, book) = publish_book(&client, &base_url, "Ubik").await.unwrap();

    let attempts = (0..8).map(|_| rate_book(&client, &base_url, book.id, json!(5), Some("racer")));
    let results = join_all(attempts).await;
    let created = results
        .iter()
        .filter(|r| r.as_ref().unwrap().0 == StatusCode::CREATED)
        .count();
    let conflicts = results
        .iter()
        .filter(|r| r.as_ref().unwrap().0 == StatusCode::CONFLICT)
        .count();
    assert_eq!(created, 1);
    assert_eq!(conflicts, 7);

    let books = list_books(&client, &base_url).await.unwrap();
    assert_eq!(books[0].votes, 1);
}
