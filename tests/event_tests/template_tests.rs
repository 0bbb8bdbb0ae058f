//! Message Template Tests
//!
//! Tests verify:
//! - Tokenizing text and holes
//! - Hole options (destructuring, alignment, format)
//! - Escaped and malformed braces
//! - Rendering against event properties

use chrono::DateTime;
use tablelog::event::{Alignment, Destructuring, TemplateToken};
use tablelog::{Culture, LogEvent, LogLevel, MessageTemplate, PropertyValue};

fn render(template: &str, properties: &[(&str, PropertyValue)]) -> String {
    let timestamp = DateTime::parse_from_rfc3339("2024-03-01T12:34:56+00:00").unwrap();
    let event = properties.iter().fold(
        LogEvent::new(timestamp, LogLevel::Information, MessageTemplate::parse(template)),
        |event, (name, value)| event.with_property(*name, value.clone()),
    );
    event.render_message(&Culture::invariant())
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_text_and_holes() {
    let template = MessageTemplate::parse("User {UserId} signed in");

    assert_eq!(template.text(), "User {UserId} signed in");
    assert_eq!(template.tokens().len(), 3);
    assert_eq!(template.tokens()[0], TemplateToken::Text("User ".to_string()));
    assert_eq!(template.tokens()[2], TemplateToken::Text(" signed in".to_string()));

    let names: Vec<&str> = template.properties().map(|p| p.name()).collect();
    assert_eq!(names, vec!["UserId"]);
}

#[test]
fn test_parse_hole_options() {
    let template = MessageTemplate::parse("{@User} {$Client,-10:l} {Count,5}");
    let holes: Vec<_> = template.properties().collect();

    assert_eq!(holes.len(), 3);
    assert_eq!(holes[0].destructuring(), Destructuring::Destructure);
    assert_eq!(holes[0].raw(), "{@User}");

    assert_eq!(holes[1].name(), "Client");
    assert_eq!(holes[1].destructuring(), Destructuring::Stringify);
    assert_eq!(holes[1].alignment(), Some(Alignment { width: 10, left: true }));
    assert_eq!(holes[1].format(), Some("l"));

    assert_eq!(holes[2].destructuring(), Destructuring::Default);
    assert_eq!(holes[2].alignment(), Some(Alignment { width: 5, left: false }));
    assert_eq!(holes[2].format(), None);
}

#[test]
fn test_parse_empty_template() {
    let template = MessageTemplate::parse("");
    assert!(template.tokens().is_empty());
}

#[test]
fn test_malformed_holes_are_text() {
    for text in ["Unclosed {Name", "{bad name}", "{}", "{Name,x}", "{@}", "lone } brace"] {
        let template = MessageTemplate::parse(text);
        assert_eq!(template.properties().count(), 0, "{text:?} produced a hole");
        assert_eq!(template.tokens(), &[TemplateToken::Text(text.to_string())]);
    }
}

// =============================================================================
// Rendering Tests
// =============================================================================

#[test]
fn test_render_quotes_strings() {
    let rendered = render("Hello {Name}", &[("Name", PropertyValue::from("World"))]);
    assert_eq!(rendered, "Hello \"World\"");
}

#[test]
fn test_render_literal_format() {
    let rendered = render("Hello {Name:l}", &[("Name", PropertyValue::from("World"))]);
    assert_eq!(rendered, "Hello World");
}

#[test]
fn test_render_missing_property_keeps_source() {
    let rendered = render("Missing {Nope:l} here", &[]);
    assert_eq!(rendered, "Missing {Nope:l} here");
}

#[test]
fn test_render_escaped_braces() {
    let rendered = render("{{literal}} {Name}", &[("Name", PropertyValue::from(1))]);
    assert_eq!(rendered, "{literal} 1");
}

#[test]
fn test_render_alignment() {
    let rendered = render("[{Count,5}|{Count,-5}|{Count,1}]", &[("Count", PropertyValue::from(42))]);
    assert_eq!(rendered, "[   42|42   |42]");
}

#[test]
fn test_render_positional_hole() {
    let rendered = render("{0} items", &[("0", PropertyValue::from(3))]);
    assert_eq!(rendered, "3 items");
}

#[test]
fn test_render_brace_inside_hole_restarts() {
    let rendered = render("{a{Name}", &[("Name", PropertyValue::from("x"))]);
    assert_eq!(rendered, "{a\"x\"");
}

#[test]
fn test_render_compound_and_numeric_format() {
    let rendered = render(
        "Took {Elapsed:F1} ms for {Ids}",
        &[
            ("Elapsed", PropertyValue::from(12.345)),
            ("Ids", PropertyValue::sequence([1, 2])),
        ],
    );
    assert_eq!(rendered, "Took 12.3 ms for [1, 2]");
}

#[test]
fn test_render_non_ascii_text() {
    let rendered = render("Grüße {Name:l} ✓", &[("Name", PropertyValue::from("Zoë"))]);
    assert_eq!(rendered, "Grüße Zoë ✓");
}
