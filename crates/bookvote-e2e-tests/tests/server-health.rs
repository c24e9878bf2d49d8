use bookvote_e2e_tests::{launch_env, prepare_env};
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_health() {
    let (args, mut config_guard) = prepare_env("server-health").await.unwrap();
    let base_url = args.base_url.clone();
    let database_url = args.database_url();
    let (client, _state) = launch_env(args, &mut config_guard).await.unwrap();

    let response = client
        .get(base_url.join("health").unwrap())
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");

    assert!(database_url.starts_with("sqlite://"));
    assert!(config_guard.data_dir().join("bookvote.db").is_file());

    let response = client
        .get(base_url.join("api/nothing-here").unwrap())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}
