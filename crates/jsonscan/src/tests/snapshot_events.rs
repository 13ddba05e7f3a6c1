//! Snapshot tests pinning the exact event sequence the scanner reports,
//! together with the context visible at each event.

use insta::assert_snapshot;

use crate::{Lexer, ParserError, ScanContext, ScanHandler, Scanner, Value};

#[derive(Default)]
struct Trace(Vec<String>);

impl Trace {
    fn push(&mut self, ctx: &ScanContext, event: impl std::fmt::Display) {
        self.0.push(format!("{} {event} [{}]", ctx.depth(), ctx.key_path()));
    }
}

impl ScanHandler for Trace {
    fn enter_dictionary(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        self.push(ctx, "enter_dictionary");
        Ok(())
    }

    fn leave_dictionary(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        self.push(ctx, "leave_dictionary");
        Ok(())
    }

    fn got_dictionary_key(&mut self, ctx: &ScanContext, key: &str) -> Result<(), ParserError> {
        self.push(ctx, format!("key {key:?}"));
        Ok(())
    }

    fn got_dictionary_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        self.push(ctx, format!("dictionary_value {value}"));
        Ok(())
    }

    fn enter_array(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        self.push(ctx, "enter_array");
        Ok(())
    }

    fn leave_array(&mut self, ctx: &ScanContext) -> Result<(), ParserError> {
        self.push(ctx, "leave_array");
        Ok(())
    }

    fn got_array_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        self.push(ctx, format!("array_value {value}"));
        Ok(())
    }

    fn got_top_level_value(&mut self, ctx: &ScanContext, value: Value) -> Result<(), ParserError> {
        self.push(ctx, format!("top_level_value {value}"));
        Ok(())
    }
}

fn trace(text: &str) -> String {
    let mut trace = Trace::default();
    Scanner::default()
        .scan(&mut Lexer::from_str(text), &mut trace)
        .expect("scanner should not error on valid input");
    trace.0.join("\n")
}

#[test]
fn snapshot_complex_document() {
    let json = r#"{
        "users": [
            {"id": 1, "name": "Ada"},
            {"id": 2, "name": "Grace"}
        ],
        "meta": {"count": 2}
    }"#;

    assert_snapshot!(trace(json), @r#"
    1 enter_dictionary []
    1 key "users" [users]
    2 enter_array [users]
    3 enter_dictionary [users]
    3 key "id" [users.id]
    3 dictionary_value 1 [users.id]
    3 key "name" [users.name]
    3 dictionary_value "Ada" [users.name]
    2 leave_dictionary [users]
    3 enter_dictionary [users]
    3 key "id" [users.id]
    3 dictionary_value 2 [users.id]
    3 key "name" [users.name]
    3 dictionary_value "Grace" [users.name]
    2 leave_dictionary [users]
    1 leave_array [users]
    1 key "meta" [meta]
    2 enter_dictionary [meta]
    2 key "count" [meta.count]
    2 dictionary_value 2 [meta.count]
    1 leave_dictionary [meta]
    0 leave_dictionary []
    "#);
}

#[test]
fn snapshot_nested_arrays() {
    assert_snapshot!(trace(r#"[1, "two", [true], null]"#), @r#"
    1 enter_array []
    1 array_value 1 []
    1 array_value "two" []
    2 enter_array []
    2 array_value true []
    1 leave_array []
    1 array_value null []
    0 leave_array []
    "#);
}

#[test]
fn snapshot_top_level_scalar() {
    assert_snapshot!(trace("12345678901234567890123"), @"0 top_level_value 12345678901234567890123 []");
}
