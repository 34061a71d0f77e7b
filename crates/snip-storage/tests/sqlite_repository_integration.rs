use std::sync::Arc;

use jiff::Timestamp;
use snip_core::{ShortCode, UrlRecord};
use snip_storage::{ReadRepository, Repository, SqliteRepository, SqliteSettings, StorageError};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    repo: SqliteRepository,
}

impl Fixture {
    async fn start() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite://{}", dir.path().join("snip.db").display());

        let repo = SqliteRepository::connect_with(SqliteSettings::builder().url(url).build())
            .await
            .expect("open sqlite");
        repo.ensure_schema().await.expect("create schema");

        Self { _dir: dir, repo }
    }
}

fn code(value: &str) -> ShortCode {
    ShortCode::new_unchecked(value)
}

fn record(url: &str) -> UrlRecord {
    UrlRecord {
        original_url: url.to_string(),
        created_at: Timestamp::from_second(1_700_000_000).unwrap(),
    }
}

#[tokio::test]
async fn insert_and_get_record() {
    let fixture = Fixture::start().await;
    let short_code = code("aB3dE9f");

    fixture
        .repo
        .insert(&short_code, record("https://example.com/a"))
        .await
        .unwrap();

    let got = fixture.repo.get(&short_code).await.unwrap().unwrap();
    assert_eq!(got, record("https://example.com/a"));
    assert!(fixture.repo.exists(&short_code).await.unwrap());
    assert_eq!(
        fixture.repo.find_code("https://example.com/a").await.unwrap(),
        Some(short_code)
    );
}

#[tokio::test]
async fn lookups_miss_on_empty_store() {
    let fixture = Fixture::start().await;

    assert!(fixture.repo.get(&code("zzzzzzz")).await.unwrap().is_none());
    assert!(!fixture.repo.exists(&code("zzzzzzz")).await.unwrap());
    assert!(fixture
        .repo
        .find_code("https://example.com/a")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn codes_are_case_sensitive() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(&code("abcdefg"), record("https://example.com/lower"))
        .await
        .unwrap();
    fixture
        .repo
        .insert(&code("ABCDEFG"), record("https://example.com/upper"))
        .await
        .unwrap();

    let lower = fixture.repo.get(&code("abcdefg")).await.unwrap().unwrap();
    assert_eq!(lower.original_url, "https://example.com/lower");
}

#[tokio::test]
async fn insert_conflicts_when_code_already_exists() {
    let fixture = Fixture::start().await;
    let short_code = code("abc1234");

    fixture
        .repo
        .insert(&short_code, record("https://one.example"))
        .await
        .unwrap();

    let err = fixture
        .repo
        .insert(&short_code, record("https://two.example"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::CodeConflict(_)));
    assert!(fixture
        .repo
        .find_code("https://two.example")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn insert_conflicts_when_url_already_has_a_code() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(&code("first01"), record("https://example.com"))
        .await
        .unwrap();

    let err = fixture
        .repo
        .insert(&code("second1"), record("https://example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::UrlConflict(_)));
    assert!(!fixture.repo.exists(&code("second1")).await.unwrap());
    assert_eq!(
        fixture.repo.find_code("https://example.com").await.unwrap(),
        Some(code("first01"))
    );
}

#[tokio::test]
async fn ensure_schema_is_idempotent() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(&code("keep123"), record("https://example.com"))
        .await
        .unwrap();
    fixture.repo.ensure_schema().await.unwrap();

    assert!(fixture.repo.exists(&code("keep123")).await.unwrap());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_inserts_for_one_url_admit_a_single_winner() {
    let fixture = Fixture::start().await;
    let repo = Arc::new(fixture.repo.clone());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.insert(
                    &code(&format!("race{i:03}")),
                    record("https://example.com/race"),
                )
                .await
            })
        })
        .collect();

    let mut wins = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => wins += 1,
            Err(err) => assert!(matches!(err, StorageError::UrlConflict(_)), "{err}"),
        }
    }

    assert_eq!(wins, 1);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
        .fetch_one(fixture.repo.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
}
