use bookstore_core::{Book, BookPatch, NewBook, SearchField};

fn sample() -> Book {
    NewBook::new("Great Expectations", "Charles Dickens", 25).into_book(3007)
}

#[test]
fn patch_apply_keeps_id_and_unset_fields() {
    let current = sample();
    let patch = BookPatch {
        author: Some("C. Dickens".to_string()),
        ..BookPatch::default()
    };

    let merged = patch.apply_to(&current);
    assert_eq!(merged.id, 3007);
    assert_eq!(merged.title, "Great Expectations");
    assert_eq!(merged.author, "C. Dickens");
    assert_eq!(merged.quantity, 25);
}

#[test]
fn default_patch_is_empty_and_identity() {
    let patch = BookPatch::default();
    assert!(patch.is_empty());
    assert_eq!(patch.apply_to(&sample()), sample());

    let quantity_only = BookPatch {
        quantity: Some(1),
        ..BookPatch::default()
    };
    assert!(!quantity_only.is_empty());
}

#[test]
fn book_serialization_uses_expected_wire_fields() {
    let book = sample();

    let json = serde_json::to_value(&book).unwrap();
    assert_eq!(json["id"], 3007);
    assert_eq!(json["title"], "Great Expectations");
    assert_eq!(json["author"], "Charles Dickens");
    assert_eq!(json["quantity"], 25);

    let decoded: Book = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, book);
}

#[test]
fn search_fields_map_to_columns() {
    assert_eq!(SearchField::Title.column(), "title");
    assert_eq!(SearchField::Author.column(), "author");
}
