//! Parameter parsing and rendering tests.

use specgen_runtime::convert::validation_errors;
use specgen_runtime::params::{MISSING, PARSING_FAILED, ParamsParser, ParamsWriter};
use std::str::FromStr;

fn pairs(values: &[(&str, &str)]) -> Vec<(String, String)> {
    values
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Red,
    Green,
}

impl Color {
    const VALUES: &'static [&'static str] = &["red", "green"];
}

impl FromStr for Color {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "red" => Ok(Self::Red),
            "green" => Ok(Self::Green),
            _ => Err(format!("unknown Color value: {value}")),
        }
    }
}

#[test]
fn test_required_missing_is_reported() {
    let mut query = ParamsParser::query(Vec::new());
    let page: Option<i32> = query.required("page");
    assert!(page.is_none());

    let errors = query.into_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path, "page");
    assert_eq!(errors[0].code, MISSING);
}

#[test]
fn test_errors_aggregate_across_params() {
    let mut query = ParamsParser::query(pairs(&[("page", "x"), ("size", "y")]));
    let page: Option<i32> = query.required("page");
    let size: Option<i32> = query.required("size");
    let term: Option<String> = query.required("term");
    assert!(page.is_none() && size.is_none() && term.is_none());

    let codes: Vec<_> = query.errors().iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec![PARSING_FAILED, PARSING_FAILED, MISSING]);
}

#[test]
fn test_optional_and_default() {
    let mut query = ParamsParser::query(pairs(&[("limit", "25")]));
    assert_eq!(query.optional::<i64>("cursor"), Some(None));
    assert_eq!(query.optional::<i64>("limit"), Some(Some(25)));
    assert_eq!(query.with_default::<i32>("page", "1"), Some(1));
    assert!(query.errors().is_empty());
}

#[test]
fn test_array_collects_repeated_values() {
    let mut query = ParamsParser::query(pairs(&[("id", "1"), ("other", "x"), ("id", "2")]));
    assert_eq!(query.array::<i32>("id"), Some(vec![1, 2]));
    assert_eq!(query.array::<i32>("none"), Some(Vec::new()));
}

#[test]
fn test_array_with_one_bad_value_fails() {
    let mut query = ParamsParser::query(pairs(&[("id", "1"), ("id", "two")]));
    assert_eq!(query.array::<i32>("id"), None);
    assert_eq!(query.errors().len(), 1);
}

#[test]
fn test_enum_member_decodes() {
    let mut query = ParamsParser::query(pairs(&[("color", "green")]));
    let color: Option<Color> = query.required_enum("color", Color::VALUES);
    assert_eq!(color, Some(Color::Green));
}

#[test]
fn test_enum_non_member_is_parsing_failed() {
    let mut query = ParamsParser::query(pairs(&[("color", "blue")]));
    let color: Option<Color> = query.required_enum("color", Color::VALUES);
    assert!(color.is_none());

    let errors = query.into_errors();
    assert_eq!(errors[0].path, "color");
    assert_eq!(errors[0].code, PARSING_FAILED);
    assert!(errors[0].message.contains("red, green"));
}

#[test]
fn test_enum_default_is_validated() {
    let mut query = ParamsParser::query(Vec::new());
    let color: Option<Color> = query.enum_with_default("color", "red", Color::VALUES);
    assert_eq!(color, Some(Color::Red));

    let colors: Option<Vec<Color>> = query.enum_array("colors", Color::VALUES);
    assert_eq!(colors, Some(Vec::new()));
}

#[test]
fn test_url_errors_use_placeholder_path() {
    let mut url = ParamsParser::url(pairs(&[("id", "abc")]));
    let id: Option<i32> = url.required("id");
    assert!(id.is_none());
    assert_eq!(url.errors()[0].path, ":id");
    assert_eq!(url.errors()[0].code, PARSING_FAILED);
}

#[test]
fn test_header_names_match_case_insensitively() {
    let mut header = ParamsParser::header(pairs(&[("x-request-id", "42")]));
    assert_eq!(header.required::<u64>("X-Request-Id"), Some(42));
}

#[test]
fn test_converter_keeps_path_and_code() {
    let mut form = ParamsParser::form(Vec::new());
    let _: Option<String> = form.required("title");
    let errors = validation_errors(form.into_errors());
    assert_eq!(errors[0].path, "title");
    assert_eq!(errors[0].code, MISSING);
    assert!(errors[0].message.is_some());
}

fn round_trip<T>(value: T) -> Option<T>
where
    T: std::fmt::Display + FromStr,
{
    let mut writer = ParamsWriter::new();
    writer.add("value", value);
    ParamsParser::query(writer.into_pairs()).required("value")
}

#[test]
fn test_primitives_round_trip() {
    assert_eq!(round_trip(-17_i32), Some(-17));
    assert_eq!(round_trip(i64::MAX), Some(i64::MAX));
    assert_eq!(round_trip(0.1_f64), Some(0.1));
    assert_eq!(round_trip(1.5e-7_f32), Some(1.5e-7));
    assert_eq!(round_trip(true), Some(true));
    assert_eq!(
        round_trip("hello world".to_string()),
        Some("hello world".to_string())
    );
}

#[test]
fn test_writer_optional_and_array() {
    let mut writer = ParamsWriter::new();
    writer.add_optional("missing", None::<i32>);
    writer.add_optional("present", Some(3));
    writer.add_array("tags", ["a", "b"]);

    assert_eq!(writer.pairs(), pairs(&[("present", "3"), ("tags", "a"), ("tags", "b")]).as_slice());
}
