use std::io::Cursor;
use tblparse::{
    from_reader, from_str, from_str_with_options, to_values, Block, Error, ParseOptions, Schema,
    Value,
};

const ROSTER: &str = r#"
; ship crews, one table per voyage
"crew roster" 3 "ship port : name role"
## Endeavour Plymouth
   Cook    captain
   Banks   botanist   ; joined late
   "Sydney Parkinson" artist
## Resolution Plymouth
   Cook captain
"#;

#[test]
fn test_roster_tree() {
    let tables = from_str(ROSTER).unwrap();
    assert_eq!(tables.len(), 1);

    let roster = &tables[0];
    assert_eq!(roster.get("table name"), Some("crew roster"));
    assert_eq!(roster.get("version"), Some("3"));
    assert_eq!(roster.get("schema"), Some("ship port : name role"));

    let ships: Vec<_> = roster.children().iter().map(|s| s.get("ship")).collect();
    assert_eq!(ships, vec![Some("Endeavour"), Some("Resolution")]);

    let endeavour = &roster.children()[0];
    assert_eq!(endeavour.get("port"), Some("Plymouth"));
    let crew: Vec<_> = endeavour
        .children()
        .iter()
        .map(|c| (c.get("name"), c.get("role")))
        .collect();
    assert_eq!(
        crew,
        vec![
            (Some("Cook"), Some("captain")),
            (Some("Banks"), Some("botanist")),
            (Some("Sydney Parkinson"), Some("artist")),
        ]
    );
    assert_eq!(roster.descendants(), 6);
}

#[test]
fn test_materialized_json() {
    let tables = from_str("t 1 'a b'\n  x y").unwrap();
    let json = serde_json::to_value(to_values(&tables)).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "table name": "t",
            "version": "1",
            "schema": "a b",
            "children": [{"a": "x", "b": "y", "children": []}]
        }])
    );
}

#[test]
fn test_materialization_round_trip_through_json() {
    let tables = from_str(ROSTER).unwrap();
    let json = serde_json::to_string(&tables).unwrap();
    let values: Vec<Value> = serde_json::from_str(&json).unwrap();
    let rebuilt: Vec<Block> = values
        .into_iter()
        .map(Block::try_from)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(rebuilt, tables);
}

#[test]
fn test_files_concatenate_in_order() {
    let first = from_reader(Cursor::new("a 1 ''")).unwrap();
    let second = from_reader(Cursor::new("b 1 ''\nc 1 ''")).unwrap();
    let all: Vec<Block> = first.into_iter().chain(second).collect();
    let names: Vec<_> = all.iter().map(|t| t.get("table name")).collect();
    assert_eq!(names, vec![Some("a"), Some("b"), Some("c")]);
}

#[test]
fn test_table_without_schema_field() {
    let tables = from_str("lonely 1").unwrap();
    assert_eq!(tables.len(), 1);
    assert_eq!(tables[0].header().len(), 2);
    assert!(tables[0].is_leaf());
}

#[test]
fn test_extra_tokens_become_sibling_rows() {
    // Once a row's fields are filled, leftover tokens start the next row.
    let tables = from_str("t 1 'a'\n  x extra 2 ''").unwrap();
    assert_eq!(tables.len(), 1);
    let rows: Vec<_> = tables[0].children().iter().map(|r| r.get("a")).collect();
    assert_eq!(rows, vec![Some("x"), Some("extra"), Some("2"), Some("")]);
}

#[test]
fn test_custom_marker() {
    let options = ParseOptions::new().with_marker('*');
    let tables = from_str_with_options("t 1 'a'\n** x\n#\n* y 1 ''", options).unwrap();
    assert_eq!(tables.len(), 2);
    // '#' is an ordinary token under a '*' marker.
    let rows: Vec<_> = tables[0].children().iter().map(|r| r.get("a")).collect();
    assert_eq!(rows, vec![Some("x"), Some("#")]);
    assert_eq!(tables[1].get("table name"), Some("y"));
}

#[test]
fn test_custom_root_schema() {
    let root = Schema::parse("section : entry").unwrap().unwrap();
    let options = ParseOptions::new().with_root_schema(root);
    let blocks = from_str_with_options("# intro\n## hello\n## world\n# outro", options).unwrap();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].children().len(), 2);
    assert_eq!(blocks[1].get("section"), Some("outro"));
}

#[test]
fn test_unterminated_quote_is_an_error() {
    let err = from_str("t 1 'a'\n  \"broken row").unwrap_err();
    assert_eq!(err, Error::unterminated_quote('"', 2, 3));
    assert!(err.to_string().contains("Unterminated"));
}

#[test]
fn test_unicode_tokens() {
    let tables = from_str("café 1 'nom'\n  crème\n  brûlée").unwrap();
    let names: Vec<_> = tables[0]
        .children()
        .iter()
        .map(|c| c.get("nom"))
        .collect();
    assert_eq!(names, vec![Some("crème"), Some("brûlée")]);
}
