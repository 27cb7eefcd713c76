//! Tests for `catalog` module

use super::catalog::*;
use super::error::Error;

fn cell(s: &str) -> Option<String> {
    Some(s.to_string())
}

#[test]
fn test_item_combined_text() {
    let item = Item::new("Heat", "Action, Crime", "A heist");
    assert_eq!(item.combined_text(), "Heat Action, Crime A heist");

    let bare = Item::new("Heat", "", "");
    assert_eq!(bare.combined_text(), "Heat  ");
}

#[test]
fn test_item_setters_refresh_combined_text() {
    let mut item = Item::new("Heat", "Crime", "");
    item.set_description("LA robbers");
    assert_eq!(item.combined_text(), "Heat Crime LA robbers");
    item.set_categories("Thriller");
    item.set_title("Ronin");
    assert_eq!(item.combined_text(), "Ronin Thriller LA robbers");
}

#[test]
fn test_empty_catalog_rejected() {
    assert_eq!(Catalog::from_items(Vec::new()), Err(Error::EmptyCatalog));
    let table = RawTable::new(["title", "listed_in"]);
    assert_eq!(Catalog::from_table(&table), Err(Error::EmptyCatalog));
}

#[test]
fn test_resolve_first_match_wins() {
    let catalog = Catalog::from_items(vec![
        Item::new("Dup", "Drama", ""),
        Item::new("Other", "Comedy", ""),
        Item::new("Dup", "Horror", ""),
    ])
    .expect("non-empty");
    assert_eq!(catalog.resolve("Dup"), Some(0));
    assert_eq!(catalog.resolve("Other"), Some(1));
    assert_eq!(catalog.len(), 3);
}

#[test]
fn test_resolve_is_exact() {
    let catalog = Catalog::from_items(vec![Item::new("Inception", "Sci-Fi", "")]).expect("non-empty");
    assert_eq!(catalog.resolve("inception"), None);
    assert_eq!(catalog.resolve("Inception "), None);
    assert_eq!(catalog.resolve(""), None);
}

#[test]
fn test_from_table_maps_columns_and_nulls() {
    let table = RawTable::new(["show_id", "title", "listed_in", "description"])
        .with_row(vec![cell("s1"), cell("A"), cell("Dramas"), None])
        .with_row(vec![cell("s2"), cell("B"), None, cell("Funny")]);
    let catalog = Catalog::from_table(&table).expect("valid table");

    let a = catalog.get(0).expect("row 0");
    assert_eq!(a.title(), "A");
    assert_eq!(a.categories(), "Dramas");
    assert_eq!(a.description(), "");
    let b = catalog.get(1).expect("row 1");
    assert_eq!(b.categories(), "");
    assert_eq!(b.combined_text(), "B  Funny");
}

#[test]
fn test_from_table_accepts_categories_alias_and_no_description() {
    let table = RawTable::new(["title", "categories"]).with_row(vec![cell("A"), cell("Drama")]);
    let catalog = Catalog::from_table(&table).expect("valid table");
    assert_eq!(catalog.get(0).map(Item::categories), Some("Drama"));
}

#[test]
fn test_from_table_missing_columns() {
    let no_title = RawTable::new(["name", "listed_in"]).with_row(vec![cell("A"), cell("Drama")]);
    assert_eq!(
        Catalog::from_table(&no_title),
        Err(Error::MissingColumn("title".to_string()))
    );

    let no_category = RawTable::new(["title", "genre"]).with_row(vec![cell("A"), cell("Drama")]);
    assert!(matches!(
        Catalog::from_table(&no_category),
        Err(Error::MissingColumn(name)) if name.contains("listed_in")
    ));
}

#[test]
fn test_raw_table_pads_short_rows() {
    let mut table = RawTable::new(["title", "listed_in", "description"]);
    table.push_row(vec![cell("A")]);
    assert_eq!(table.rows()[0], vec![cell("A"), None, None]);
    assert_eq!(table.column_index(" listed_in "), None);

    let table = RawTable::new([" title ", "listed_in"]);
    assert_eq!(table.column_index("title"), Some(0));
}

#[test]
fn test_combined_texts_in_row_order() {
    let catalog = Catalog::from_items(vec![Item::new("X", "a", ""), Item::new("Y", "b", "")])
        .expect("non-empty");
    let texts: Vec<&str> = catalog.combined_texts().collect();
    assert_eq!(texts, vec!["X a ", "Y b "]);
}
