//! Message templates
//!
//! Parses `"User {UserId} logged in from {@Client,-10:l}"` style templates
//! and renders them against event properties.
//!
//! ## Hole Syntax
//! ```text
//! { [@|$] Name [,alignment] [:format] }
//! ```
//! - `@` destructure, `$` stringify (capture hints, no effect on rendering)
//! - `Name`: letters, digits, `_` (`{0}` is a valid positional hole)
//! - `alignment`: signed width, negative pads on the right
//! - `{{` and `}}` are literal braces; malformed holes are kept as text

use std::collections::BTreeMap;

use crate::format::FormatProvider;

use super::PropertyValue;

/// How the capturing logger was asked to record the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destructuring {
    Default,
    Destructure,
    Stringify,
}

/// Padding direction and width for a rendered hole
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alignment {
    pub width: usize,
    pub left: bool,
}

/// A `{...}` hole in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyToken {
    name: String,
    format: Option<String>,
    alignment: Option<Alignment>,
    destructuring: Destructuring,
    raw: String,
}

impl PropertyToken {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> Option<&str> {
        self.format.as_deref()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn destructuring(&self) -> Destructuring {
        self.destructuring
    }

    /// Source text of the hole, braces included
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Parse the text between `{` and `}`
    fn parse(content: &str) -> Option<Self> {
        let (destructuring, rest) = match content.chars().next()? {
            '@' => (Destructuring::Destructure, &content[1..]),
            '$' => (Destructuring::Stringify, &content[1..]),
            _ => (Destructuring::Default, content),
        };

        let (head, format) = match rest.split_once(':') {
            Some((head, format)) => (head, Some(format.to_string())),
            None => (rest, None),
        };

        let (name, alignment) = match head.split_once(',') {
            Some((name, alignment)) => (name, Some(parse_alignment(alignment)?)),
            None => (head, None),
        };

        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            format,
            alignment,
            destructuring,
            raw: format!("{{{content}}}"),
        })
    }
}

fn parse_alignment(text: &str) -> Option<Alignment> {
    let (left, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(Alignment {
        width: digits.parse().ok()?,
        left,
    })
}

/// A piece of a parsed template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateToken {
    Text(String),
    Property(PropertyToken),
}

/// A parsed message template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    text: String,
    tokens: Vec<TemplateToken>,
}

impl MessageTemplate {
    pub fn parse(text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = tokenize(&text);
        Self { text, tokens }
    }

    /// The template exactly as written
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Holes in order of appearance
    pub fn properties(&self) -> impl Iterator<Item = &PropertyToken> {
        self.tokens.iter().filter_map(|token| match token {
            TemplateToken::Property(property) => Some(property),
            TemplateToken::Text(_) => None,
        })
    }

    /// Substitute each hole with its property's canonical text.
    ///
    /// Holes with no matching property render as their source text.
    pub fn render(
        &self,
        properties: &BTreeMap<String, PropertyValue>,
        provider: &dyn FormatProvider,
    ) -> String {
        let mut out = String::with_capacity(self.text.len());
        for token in &self.tokens {
            match token {
                TemplateToken::Text(text) => out.push_str(text),
                TemplateToken::Property(property) => match properties.get(property.name()) {
                    Some(value) => {
                        let rendered = value.to_text(property.format(), provider);
                        push_aligned(&mut out, &rendered, property.alignment());
                    }
                    None => out.push_str(property.raw()),
                },
            }
        }
        out
    }
}

fn push_aligned(out: &mut String, text: &str, alignment: Option<Alignment>) {
    let Some(alignment) = alignment else {
        out.push_str(text);
        return;
    };
    let padding = alignment.width.saturating_sub(text.chars().count());
    if alignment.left {
        out.push_str(text);
        out.extend(std::iter::repeat(' ').take(padding));
    } else {
        out.extend(std::iter::repeat(' ').take(padding));
        out.push_str(text);
    }
}

fn tokenize(text: &str) -> Vec<TemplateToken> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        match c {
            '{' if rest.starts_with("{{") => {
                literal.push('{');
                rest = &rest[2..];
            }
            '}' if rest.starts_with("}}") => {
                literal.push('}');
                rest = &rest[2..];
            }
            '{' => {
                // Hole runs to the next brace; an inner '{' starts over there
                let body = &rest[1..];
                match body.find(|c: char| c == '{' || c == '}') {
                    Some(end) if body.as_bytes()[end] == b'}' => {
                        match PropertyToken::parse(&body[..end]) {
                            Some(property) => {
                                if !literal.is_empty() {
                                    tokens.push(TemplateToken::Text(std::mem::take(&mut literal)));
                                }
                                tokens.push(TemplateToken::Property(property));
                            }
                            None => literal.push_str(&rest[..end + 2]),
                        }
                        rest = &body[end + 1..];
                    }
                    Some(end) => {
                        literal.push_str(&rest[..end + 1]);
                        rest = &body[end..];
                    }
                    None => {
                        literal.push_str(rest);
                        rest = "";
                    }
                }
            }
            _ => {
                literal.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !literal.is_empty() {
        tokens.push(TemplateToken::Text(literal));
    }
    tokens
}
