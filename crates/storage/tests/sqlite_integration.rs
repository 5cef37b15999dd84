use quiz_core::model::{ACTIVITY_LOG_CAPACITY, ActivityRecord};
use storage::repository::{ActivityLogStore, Storage};
use storage::sqlite::SqliteRepository;

fn record(n: usize) -> ActivityRecord {
    ActivityRecord::new(
        format!("Q{n}"),
        n % 4,
        format!("Option {}", n % 4),
        n % 3 == 0,
        "11/14/2023, 10:13:20 PM",
    )
}

fn file_url(dir: &tempfile::TempDir) -> String {
    format!("sqlite://{}?mode=rwc", dir.path().join("quiz.sqlite3").display())
}

#[tokio::test]
async fn sqlite_activity_log_is_bounded_fifo() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_activity_fifo?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.read_all().await.unwrap().is_empty());

    for n in 0..ACTIVITY_LOG_CAPACITY {
        repo.append(record(n)).await.unwrap();
    }
    let all = repo.read_all().await.unwrap();
    assert_eq!(all.len(), ACTIVITY_LOG_CAPACITY);
    assert_eq!(all[0].question_text, "Q0");

    repo.append(record(100)).await.unwrap();
    let all = repo.read_all().await.unwrap();
    assert_eq!(all.len(), ACTIVITY_LOG_CAPACITY);
    assert_eq!(all[0].question_text, "Q1");
    assert_eq!(all.last().unwrap().question_text, "Q100");

    let recent = repo.recent(7).await.unwrap();
    assert_eq!(recent.len(), 7);
    assert_eq!(recent[0].question_text, "Q100");
    assert_eq!(recent[1].question_text, "Q19");
}

#[tokio::test]
async fn sqlite_activity_log_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = file_url(&dir);

    {
        let storage = Storage::sqlite(&url).await.expect("open");
        storage.activity.append(record(1)).await.unwrap();
        storage.activity.append(record(2)).await.unwrap();
    }

    let repo = SqliteRepository::connect(&url).await.expect("reopen");
    repo.migrate().await.expect("migrations are idempotent");
    let all = repo.read_all().await.unwrap();
    assert_eq!(all, vec![record(1), record(2)]);
    repo.close().await;
}

#[tokio::test]
async fn sqlite_concurrent_appends_keep_every_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let repo = SqliteRepository::connect(&file_url(&dir))
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut handles = Vec::new();
    for n in 0..8 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move { repo.append(record(n)).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(repo.read_all().await.unwrap().len(), 8);
}

#[tokio::test]
async fn sqlite_two_repositories_on_one_file_keep_every_record() {
    let dir = tempfile::tempdir().expect("tempdir");
    let url = file_url(&dir);
    let first = SqliteRepository::connect(&url).await.expect("connect first");
    first.migrate().await.expect("migrate");
    let second = SqliteRepository::connect(&url).await.expect("connect second");

    let mut handles = Vec::new();
    for n in 0..12 {
        let repo = if n % 2 == 0 { first.clone() } else { second.clone() };
        handles.push(tokio::spawn(async move { repo.append(record(n)).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let all = first.read_all().await.unwrap();
    assert_eq!(all.len(), 12);
    assert_eq!(second.read_all().await.unwrap(), all);
    first.close().await;
    second.close().await;
}

#[tokio::test]
async fn sqlite_clear_resets_history() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_activity_clear?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    repo.append(record(1)).await.unwrap();
    repo.clear().await.unwrap();
    assert!(repo.read_all().await.unwrap().is_empty());
}
