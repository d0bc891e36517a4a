//! Tests for table filtering and debounced search inputs.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use mediadive_table::{
    Cell, Column, FilterConfig, FilterState, ListView, Row, apply_filter, create_table,
    create_table_with,
};
use proptest::prelude::*;

fn columns() -> Vec<Column> {
    vec![Column::searchable("id", "ID"), Column::searchable("name", "Name")]
}

fn rows() -> Vec<Row> {
    vec![
        Row::new().with("id", "1").with("name", "Acetate"),
        Row::new().with("id", "2").with("name", "Acetone"),
    ]
}

fn visible_ids(table: &mediadive_table::Table) -> Vec<String> {
    table
        .visible_rows()
        .map(|row| row.text("id").to_string())
        .collect()
}

#[test]
fn filters_combine_with_and() {
    let columns = columns();
    let mut table = create_table(columns.clone(), rows(), None);
    assert_eq!(table.visible_count(), 2);

    let filters: FilterState = [("id", "1"), ("name", "acet")].into_iter().collect();
    apply_filter(&mut table, &filters, &columns);
    assert_eq!(visible_ids(&table), ["1"]);
    assert!(table.is_visible(0));
    assert!(!table.is_visible(1));

    let filters: FilterState = [("id", "9")].into_iter().collect();
    apply_filter(&mut table, &filters, &columns);
    assert_eq!(table.visible_count(), 0);
    assert_eq!(table.len(), 2);

    apply_filter(&mut table, &FilterState::new(), &columns);
    assert_eq!(visible_ids(&table), ["1", "2"]);
}

#[test]
fn filter_on_unlisted_column_is_ignored() {
    let mut table = create_table(columns(), rows(), None);
    let filters: FilterState = [("formula", "C2")].into_iter().collect();
    apply_filter(&mut table, &filters, &[Column::new("id", "ID")]);
    assert_eq!(table.visible_count(), 2);
}

#[test]
fn burst_of_edits_reports_last_value_once() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut table = create_table(
        columns(),
        rows(),
        Some(Box::new(move |key: &str, value: &str| {
            sink.borrow_mut().push((key.to_string(), value.to_string()));
        })),
    );

    let start = Instant::now();
    assert!(table.edit_filter("name", "a", start));
    assert!(table.edit_filter("name", "ac", start + Duration::from_millis(40)));
    assert!(table.edit_filter("name", "ace", start + Duration::from_millis(80)));

    assert_eq!(table.poll_filters(start + Duration::from_millis(200)), 0);
    assert_eq!(table.input("name").unwrap().value(), "ace");
    assert_eq!(
        table.next_deadline(),
        Some(start + Duration::from_millis(230))
    );

    assert_eq!(table.poll_filters(start + Duration::from_millis(230)), 1);
    assert_eq!(table.poll_filters(start + Duration::from_secs(1)), 0);
    assert_eq!(
        *calls.borrow(),
        [("name".to_string(), "ace".to_string())]
    );
}

#[test]
fn inputs_are_independent_per_column() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut table = create_table_with(
        vec![
            Column::searchable("id", "ID"),
            Column::searchable("name", "Name"),
            Column::new("link", "Link"),
        ],
        rows(),
        Some(Box::new(move |key: &str, value: &str| {
            sink.borrow_mut().push(format!("{key}={value}"));
        })),
        FilterConfig {
            debounce: Duration::from_millis(10),
        },
    );

    let inputs: Vec<_> = table.inputs().iter().map(|i| i.placeholder()).collect();
    assert_eq!(inputs, ["Search ID", "Search Name"]);
    assert!(!table.edit_filter("link", "x", Instant::now()));

    let start = Instant::now();
    table.edit_filter("id", "1", start);
    table.edit_filter("name", "ac", start + Duration::from_millis(5));
    assert_eq!(table.poll_filters(start + Duration::from_millis(20)), 2);
    assert_eq!(*calls.borrow(), ["id=1", "name=ac"]);
}

#[test]
fn table_without_callback_has_no_inputs() {
    let mut table = create_table(columns(), rows(), None);
    assert!(table.inputs().is_empty());
    assert!(!table.edit_filter("name", "a", Instant::now()));
    assert_eq!(table.poll_filters(Instant::now()), 0);
}

#[test]
fn list_view_applies_settled_edits() {
    let mut view = ListView::new(columns(), rows());
    let start = Instant::now();

    view.edit("name", "ACETO", start);
    assert!(!view.poll(start + Duration::from_millis(100)));
    assert_eq!(view.table().visible_count(), 2);

    assert!(view.poll(start + Duration::from_millis(150)));
    assert_eq!(visible_ids(view.table()), ["2"]);
    assert_eq!(view.filters().get("name"), Some("ACETO"));

    view.set_filter("id", "1");
    assert_eq!(view.table().visible_count(), 0);

    view.clear_filters();
    assert_eq!(view.table().visible_count(), 2);
}

#[test]
fn cells_keep_links() {
    let row = Row::new()
        .with("id", Cell::linked("5", "#/medium/5"))
        .with("name", "Marine agar");
    insta::assert_debug_snapshot!(row.cell("id"), @r###"
    Some(
        Cell {
            text: "5",
            link: Some(
                "#/medium/5",
            ),
        },
    )
    "###);
    assert_eq!(row.text("missing"), "");
}

proptest! {
    #[test]
    fn visible_rows_match_every_active_filter(
        names in prop::collection::vec("[a-cA-C]{0,4}", 0..20),
        needle in "[a-c]{0,2}",
    ) {
        let columns = vec![Column::searchable("name", "Name")];
        let rows: Vec<Row> = names.iter().map(|n| Row::new().with("name", n.as_str())).collect();
        let mut table = create_table(columns.clone(), rows, None);
        let filters: FilterState = [("name", needle.clone())].into_iter().collect();
        apply_filter(&mut table, &filters, &columns);

        let expected = names
            .iter()
            .filter(|n| n.to_lowercase().contains(&needle))
            .count();
        prop_assert_eq!(table.visible_count(), expected);
        prop_assert_eq!(table.len(), names.len());
    }
}
