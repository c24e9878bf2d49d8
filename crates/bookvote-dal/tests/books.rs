use bookvote_dal::{
    Error,
    book::{BookRepositoryImpl, CreateBook},
};
use futures::TryStreamExt as _;
use sqlx::Executor;

const TEST_DATA: &str = r#"
INSERT INTO book (id, title, image, image_mime, created)
VALUES (1, 'Dune', NULL, NULL, '2024-01-01 10:00:00');
INSERT INTO book (id, title, image, image_mime, created)
VALUES (2, 'Solaris', X'89504E47', 'image/png', '2024-01-02 10:00:00');
INSERT INTO book (id, title, image, image_mime, created)
VALUES (3, 'Hyperion', X'0102', NULL, '2024-01-03 10:00:00');

INSERT INTO rating (book_id, score, client_id) VALUES (1, 5, 'a');
INSERT INTO rating (book_id, score, client_id) VALUES (1, 4, 'b');
INSERT INTO rating (book_id, score, client_id) VALUES (1, 4, NULL);
INSERT INTO rating (book_id, score, client_id) VALUES (2, 1, 'a');
"#;

async fn init_db() -> sqlx::Pool<sqlx::Sqlite> {
    const DB_URL: &str = "sqlite::memory:";
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .connect(DB_URL)
        .await
        .unwrap();
    conn.execute("PRAGMA foreign_keys = ON").await.unwrap();
    bookvote_dal::migrate(&conn).await.unwrap();

    conn.execute_many(TEST_DATA)
        .try_collect::<Vec<_>>()
        .await
        .unwrap();

    conn
}

#[tokio::test]
async fn test_list_books() {
    let conn = init_db().await;
    let repo = BookRepositoryImpl::new(conn);

    let books = repo.list().await.unwrap();
    let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Hyperion", "Solaris", "Dune"]);

    let dune = &books[2];
    assert_eq!(dune.votes, 3);
    assert_eq!(dune.avg_rating, Some(4.33));

    let hyperion = &books[0];
    assert_eq!(hyperion.votes, 0);
    assert_eq!(hyperion.avg_rating, None);
}

#[tokio::test]
async fn test_list_stats() {
    let conn = init_db().await;
    let repo = BookRepositoryImpl::new(conn);

    let stats = repo.list_stats().await.unwrap();
    let ids: Vec<_> = stats.iter().map(|b| b.id).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[tokio::test]
async fn test_stats_tie_breaks() {
    let conn = init_db().await;
    // 4 and 5 have same votes as Solaris (1), 5 has same average as 4
    conn.execute_many(
        r#"
        INSERT INTO book (id, title) VALUES (4, 'Ubik');
        INSERT INTO book (id, title) VALUES (5, 'Valis');
        INSERT INTO book (id, title) VALUES (6, 'Roadside Picnic');
        INSERT INTO rating (book_id, score) VALUES (4, 3);
        INSERT INTO rating (book_id, score) VALUES (5, 3);
        "#,
    )
    .try_collect::<Vec<_>>()
    .await
    .unwrap();
    let repo = BookRepositoryImpl::new(conn);

    let stats = repo.list_stats().await.unwrap();
    let ids: Vec<_> = stats.iter().map(|b| b.id).collect();
    // unrated books go last, newer (higher id) first among them
    assert_eq!(ids, [1, 5, 4, 2, 6, 3]);
    assert_eq!(stats[4].avg_rating, None);
}

#[tokio::test]
async fn test_publish() {
    let conn = init_db().await;
    let repo = BookRepositoryImpl::new(conn);

    let published = repo
        .publish(CreateBook::new("  The Left Hand of Darkness  "))
        .await
        .unwrap();
    assert!(published.created);
    assert_eq!(published.book.title, "The Left Hand of Darkness");

    let books = repo.list().await.unwrap();
    assert_eq!(books.len(), 4);
    assert_eq!(books[0].id, published.book.id);
    assert_eq!(books[0].votes, 0);

    let again = repo
        .publish(CreateBook::new("The Left Hand of Darkness"))
        .await
        .unwrap();
    assert!(!again.created);
    assert_eq!(again.book, published.book);
    assert_eq!(repo.list().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_publish_invalid_title() {
    let conn = init_db().await;
    let repo = BookRepositoryImpl::new(conn);

    for title in ["", "   ", "\t\n"] {
        let res = repo.publish(CreateBook::new(title)).await;
        assert!(matches!(res, Err(Error::InvalidInput(_))), "title {title:?}");
    }

    let res = repo.publish(CreateBook::new("x".repeat(512))).await;
    assert!(matches!(res, Err(Error::InvalidInput(_))));

    assert_eq!(repo.list().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_book_image() {
    let conn = init_db().await;
    let repo = BookRepositoryImpl::new(conn);

    let image = repo.get_image(2).await.unwrap();
    assert_eq!(image.mime, "image/png");
    assert_eq!(image.data, [0x89, 0x50, 0x4E, 0x47]);

    let image = repo.get_image(3).await.unwrap();
    assert_eq!(image.mime, "application/octet-stream");

    assert!(matches!(
        repo.get_image(1).await,
        Err(Error::RecordNotFound(_))
    ));
    assert!(matches!(
        repo.get_image(999).await,
        Err(Error::RecordNotFound(_))
    ));

    let published = repo
        .publish(CreateBook::new("Cover").with_image(vec![1, 2, 3], "image/jpeg"))
        .await
        .unwrap();
    let image = repo.get_image(published.book.id).await.unwrap();
    assert_eq!(image.mime, "image/jpeg");
    assert_eq!(image.data, [1, 2, 3]);
}

#[tokio::test]
async fn test_get_book() {
    let conn = init_db().await;
    let repo = BookRepositoryImpl::new(conn);

    let book = repo.get(2).await.unwrap();
    assert_eq!(book.title, "Solaris");
    assert_eq!(book.votes, 1);
    assert_eq!(book.avg_rating, Some(1.0));

    assert!(matches!(repo.get(42).await, Err(Error::RecordNotFound(_))));
}
