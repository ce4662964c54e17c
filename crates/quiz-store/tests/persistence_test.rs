//! Round trips through an on-disk database.

use quiz_store::{DatabaseClient, StoreError};
use serde_json::json;
use tempfile::TempDir;

#[test]
fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("quizzes.db");

    {
        let db = DatabaseClient::open(&path).unwrap();
        db.create_user("ada", "secret").unwrap();
        db.save_quiz("world history", vec![json!({"q": "1066?"})])
            .unwrap();
        db.close().unwrap();
    }

    let db = DatabaseClient::open(&path).unwrap();
    assert!(db.find_user("ada").unwrap().is_some());

    let categories = db.categories().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "World History");
    assert_eq!(categories[0].num_quizzes, 1);

    // Counter picks up where the previous session left off
    let next = db.save_quiz("World history", vec![]).unwrap();
    assert_eq!(next.title, "World History - 1");

    let quizzes = db.quizzes_for_category(categories[0].id).unwrap();
    assert_eq!(quizzes.len(), 2);
    assert_eq!(quizzes[0].questions, vec![json!({"q": "1066?"})]);

    assert!(matches!(
        db.create_user("ada", "other"),
        Err(StoreError::DuplicateUsername(_))
    ));
}

#[test]
fn test_shared_across_threads() {
    let db = DatabaseClient::open_in_memory().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let db = db.clone();
            std::thread::spawn(move || {
                db.save_quiz("physics", vec![json!({ "n": i })]).unwrap()
            })
        })
        .collect();

    let mut titles: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().title)
        .collect();
    titles.sort();

    assert_eq!(
        titles,
        vec!["Physics - 0", "Physics - 1", "Physics - 2", "Physics - 3"]
    );
}
