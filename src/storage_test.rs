use super::*;

#[test]
fn get_returns_what_was_set() {
    let mut storage = MemoryStorage::new();
    assert_eq!(storage.get("name"), None);
    storage.set("name", "value");
    assert_eq!(storage.get("name").as_deref(), Some("value"));
    storage.set("name", "other");
    assert_eq!(storage.get("name").as_deref(), Some("other"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn int_round_trip() {
    let mut storage = MemoryStorage::new();
    storage.set_int("level", -12);
    assert_eq!(storage.get("level").as_deref(), Some("-12"));
    assert_eq!(storage.get_int("level"), Ok(Some(-12)));
}

#[test]
fn missing_int_is_none() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get_int("level"), Ok(None));
    assert_eq!(storage.get_int_or("level", 3), 3);
}

#[test]
fn malformed_int_is_an_error() {
    let mut storage = MemoryStorage::new();
    storage.set("level", "ten");
    assert_eq!(
        storage.get_int("level"),
        Err(StorageError::InvalidInteger { name: "level".to_owned(), value: "ten".to_owned() })
    );
    assert_eq!(storage.get_int_or("level", 5), 5);
}
