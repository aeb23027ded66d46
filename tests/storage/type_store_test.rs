use std::fs;

use archivist::{
    storage::{
        codec::StorageFormat,
        schema::Schema,
        type_store::{FileTypeStore, MemoryTypeStore, TypeStore},
    },
    types::{error::DatabaseError, page::Page, record::Record},
    utils::mock::{TempDatabase, fields, values},
};

fn sample_schema() -> Schema {
    let mut schema = Schema::new(
        "Book".to_string(),
        2,
        0,
        &fields(&[("isbn", "str"), ("title", "str")]),
    );
    let mut page = Page::new(0);
    page.push(Record::from_fields(
        schema.field_names().collect::<Vec<_>>(),
        values(&["978", "Dune"]),
    ));
    schema.pages.push(page);
    schema
}

fn assert_round_trip<S: TypeStore>(store: &mut S) {
    assert!(!store.exists("Book").unwrap());
    assert_eq!(store.load("Book").unwrap(), None);

    let schema = sample_schema();
    store.save("Book", &schema).unwrap();
    assert!(store.exists("Book").unwrap());
    assert_eq!(store.load("Book").unwrap(), Some(schema.clone()));

    // A second save replaces the whole state.
    let mut emptied = schema;
    emptied.pages.clear();
    store.save("Book", &emptied).unwrap();
    assert_eq!(store.load("Book").unwrap(), Some(emptied));
}

#[test]
fn test_memory_store() {
    let mut store = MemoryTypeStore::new();
    assert_round_trip(&mut store);
    assert_eq!(store.type_names(), vec!["Book"]);
}

#[test]
fn test_json_file_store() {
    let temp_db = TempDatabase::with_format(StorageFormat::Json);
    let mut store = temp_db.store().unwrap();
    assert_round_trip(&mut store);
    assert_eq!(store.type_path("Book"), temp_db.file("Book.json"));
    assert!(temp_db.file("Book.json").exists());
}

#[test]
fn test_binary_file_store() {
    let temp_db = TempDatabase::with_format(StorageFormat::Binary);
    let mut store = temp_db.store().unwrap();
    assert_round_trip(&mut store);
    assert!(temp_db.file("Book.arc").exists());
}

#[test]
fn test_state_survives_reopen() {
    let temp_db = TempDatabase::with_prefix("reopen");
    {
        let mut store = temp_db.store().unwrap();
        store.save("Book", &sample_schema()).unwrap();
    }
    let store = FileTypeStore::new(temp_db.path(), StorageFormat::Json).unwrap();
    assert_eq!(store.load("Book").unwrap(), Some(sample_schema()));
}

#[test]
fn test_save_leaves_no_staging_files() {
    let temp_db = TempDatabase::new();
    let mut store = temp_db.store().unwrap();
    for _ in 0..3 {
        store.save("Book", &sample_schema()).unwrap();
    }
    let names: Vec<_> = fs::read_dir(temp_db.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["Book.json"]);
}

#[test]
fn test_truncated_file_is_reported() {
    let temp_db = TempDatabase::new();
    fs::write(temp_db.file("Book.json"), b"{\"type_name\": \"Bo").unwrap();
    let store = temp_db.store().unwrap();

    match store.load("Book") {
        Err(DatabaseError::CorruptedSchema { type_name, .. }) => assert_eq!(type_name, "Book"),
        other => panic!("Expected CorruptedSchema, got {:?}", other),
    }
}

#[test]
fn test_creates_missing_data_dir() {
    let temp_db = TempDatabase::new();
    let nested = temp_db.file("a").join("b");
    let store = FileTypeStore::new(&nested, StorageFormat::Json).unwrap();
    assert!(nested.is_dir());
    assert_eq!(store.data_dir(), nested.as_path());
}
