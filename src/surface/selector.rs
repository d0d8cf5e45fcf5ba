//! Compound CSS selectors
//!
//! Supports the subset the page scripts need: an optional tag name followed
//! by any number of `#id`, `.class`, `[attr]` and `[attr="value"]` parts.
//! Combinators are not supported.

use std::fmt;
use std::str::FromStr;

use super::{ElementId, RenderSurface};
use crate::error::FlashError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    /// Selector matching a single class
    pub fn class(name: &str) -> Self {
        Self {
            classes: vec![name.to_string()],
            ..Self::default()
        }
    }

    /// Selector matching a single id
    pub fn id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn parse(input: &str) -> Result<Self, FlashError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(FlashError::InvalidSelector("empty selector".to_string()));
        }

        let mut selector = Selector::default();
        let mut chars = input.chars().peekable();

        let tag = take_ident(&mut chars);
        if !tag.is_empty() {
            selector.tag = Some(tag.to_ascii_lowercase());
        }

        while let Some(c) = chars.next() {
            match c {
                '#' => {
                    let id = take_ident(&mut chars);
                    if id.is_empty() {
                        return Err(invalid(input, "missing id after '#'"));
                    }
                    selector.id = Some(id);
                }
                '.' => {
                    let class = take_ident(&mut chars);
                    if class.is_empty() {
                        return Err(invalid(input, "missing class after '.'"));
                    }
                    selector.classes.push(class);
                }
                '[' => {
                    let name = take_ident(&mut chars);
                    if name.is_empty() {
                        return Err(invalid(input, "missing attribute name"));
                    }
                    let value = match chars.next() {
                        Some(']') => None,
                        Some('=') => {
                            let value = take_attribute_value(&mut chars)
                                .ok_or_else(|| invalid(input, "unterminated attribute value"))?;
                            if chars.next() != Some(']') {
                                return Err(invalid(input, "expected ']'"));
                            }
                            Some(value)
                        }
                        _ => return Err(invalid(input, "expected ']' or '='")),
                    };
                    selector.attributes.push((name.to_ascii_lowercase(), value));
                }
                other => {
                    return Err(invalid(input, &format!("unexpected character '{}'", other)));
                }
            }
        }

        Ok(selector)
    }

    /// Check whether `el` on `surface` satisfies every part of the selector
    pub fn matches<S: RenderSurface + ?Sized>(&self, surface: &S, el: ElementId) -> bool {
        let Some(tag) = surface.tag(el) else {
            return false;
        };

        if let Some(expected) = &self.tag
            && expected != tag
        {
            return false;
        }

        if let Some(expected) = &self.id
            && surface.attribute(el, "id") != Some(expected.as_str())
        {
            return false;
        }

        if !self.classes.iter().all(|c| surface.has_class(el, c)) {
            return false;
        }

        self.attributes
            .iter()
            .all(|(name, value)| match (surface.attribute(el, name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            })
    }
}

impl FromStr for Selector {
    type Err = FlashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Selector::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(tag) = &self.tag {
            write!(f, "{}", tag)?;
        }
        if let Some(id) = &self.id {
            write!(f, "#{}", id)?;
        }
        for class in &self.classes {
            write!(f, ".{}", class)?;
        }
        for (name, value) in &self.attributes {
            match value {
                Some(value) => write!(f, "[{}=\"{}\"]", name, value)?,
                None => write!(f, "[{}]", name)?,
            }
        }
        Ok(())
    }
}

fn invalid(input: &str, reason: &str) -> FlashError {
    FlashError::InvalidSelector(format!("{}: {}", input, reason))
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

/// Quoted (single or double) or bare attribute value
fn take_attribute_value(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    match chars.peek().copied() {
        Some(quote @ ('"' | '\'')) => {
            chars.next();
            let mut value = String::new();
            for c in chars.by_ref() {
                if c == quote {
                    return Some(value);
                }
                value.push(c);
            }
            None
        }
        Some(_) => Some(take_ident(chars)),
        None => None,
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
