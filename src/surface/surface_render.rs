//! HTML-like rendering of a surface subtree
//!
//! Used by the CLI to print the resulting page and by snapshot tests.
//! Output is indented two spaces per level; an element with only text is
//! kept on one line.

use std::fmt::Write;

use super::{ElementId, RenderSurface};

/// Render `el` and its subtree
pub fn render_html<S: RenderSurface + ?Sized>(surface: &S, el: ElementId) -> String {
    let mut out = String::new();
    render_node(surface, el, 0, &mut out);
    out
}

fn render_node<S: RenderSurface + ?Sized>(
    surface: &S,
    el: ElementId,
    depth: usize,
    out: &mut String,
) {
    let Some(tag) = surface.tag(el) else {
        return;
    };
    let indent = "  ".repeat(depth);
    let text = surface.text(el);
    let children = surface.children(el);

    let _ = write!(out, "{}<{}", indent, tag);
    for (name, value) in surface.attributes(el) {
        let _ = write!(out, " {}=\"{}\"", name, escape_attribute(value));
    }
    out.push('>');

    if children.is_empty() {
        let _ = writeln!(out, "{}</{}>", escape_text(text), tag);
        return;
    }

    out.push('\n');
    if !text.is_empty() {
        let _ = writeln!(out, "{}  {}", indent, escape_text(text));
    }
    for child in children {
        render_node(surface, child, depth + 1, out);
    }
    let _ = writeln!(out, "{}</{}>", indent, tag);
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

#[cfg(test)]
#[path = "surface_render_tests.rs"]
mod surface_render_tests;
