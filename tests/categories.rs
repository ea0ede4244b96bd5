//! Integration tests for the category store: builtin data and CSV loading.

use imposter_party::{CategoryError, CategoryStore, SecretSource};

#[test]
fn builtin_has_word_and_question_categories() {
    let store = CategoryStore::builtin();
    assert!(store.word_categories().contains(&"animals".to_string()));
    assert!(store.question_categories().contains(&"icebreakers".to_string()));
    assert!(store.words("Animals").is_some_and(|w| !w.is_empty()));
    for pair in store.questions("icebreakers").unwrap() {
        assert!(!pair.real.is_empty());
        assert!(!pair.imposter.is_empty());
        assert_ne!(pair.real, pair.imposter);
    }
}

#[test]
fn csv_rows_are_grouped_by_category() {
    let data = "\
category,kind,text,imposter
Sports,word,tennis,
sports,word,curling,
Habits,question,How often do you cook?,How often do you order takeaway?
";
    let store = CategoryStore::from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(
        store.words("sports").unwrap(),
        &["tennis".to_string(), "curling".to_string()]
    );
    let pairs = store.questions("HABITS").unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].imposter, "How often do you order takeaway?");
    assert_eq!(store.word_categories(), vec!["sports".to_string()]);
}

#[test]
fn invalid_csv_rows_are_skipped() {
    let data = "\
category,kind,text,imposter
food,word,,
food,word,bagel,
quiz,question,Same prompt,same prompt
quiz,question,Missing imposter,
";
    let store = CategoryStore::from_csv_reader(data.as_bytes()).unwrap();
    assert_eq!(store.words("food").unwrap(), &["bagel".to_string()]);
    assert!(store.questions("quiz").is_none());
}

#[test]
fn unknown_row_kind_is_an_error() {
    let data = "category,kind,text,imposter\nfood,emoji,x,\n";
    match CategoryStore::from_csv_reader(data.as_bytes()) {
        Err(CategoryError::UnknownKind(kind)) => assert_eq!(kind, "emoji"),
        other => panic!("expected UnknownKind, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = CategoryStore::from_csv_path("/definitely/not/here.csv").unwrap_err();
    assert!(matches!(err, CategoryError::Io(_)));
}
