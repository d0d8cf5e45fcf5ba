//! Tests for notification_state

use super::*;
use crate::surface::MemorySurface;

#[test]
fn test_parse_known_categories() {
    assert_eq!(Category::parse("info"), Category::Info);
    assert_eq!(Category::parse("success"), Category::Success);
    assert_eq!(Category::parse("warning"), Category::Warning);
    assert_eq!(Category::parse("error"), Category::Error);
}

#[test]
fn test_blank_category_defaults_to_info() {
    assert_eq!(Category::parse(""), Category::Info);
    assert_eq!(Category::parse("   "), Category::Info);
    assert_eq!(Category::default(), Category::Info);
}

#[test]
fn test_custom_category_is_kept() {
    let category = Category::parse("promo");
    assert_eq!(category, Category::Other("promo".to_string()));
    assert_eq!(category.class_name(), "alert--promo");
    assert!(!category.is_persistent());
}

#[test]
fn test_custom_category_whitespace_collapsed() {
    let category = Category::parse(" oferta  del dia ");
    assert_eq!(category.as_str(), "oferta-del-dia");
}

#[test]
fn test_category_matching_is_case_sensitive() {
    // Templates use lowercase tags; "Error" is a custom tag, not a persistent one
    assert!(!Category::parse("Error").is_persistent());
}

#[test]
fn test_only_error_is_persistent() {
    assert!(Category::Error.is_persistent());
    assert!(!Category::Info.is_persistent());
    assert!(!Category::Success.is_persistent());
    assert!(!Category::Warning.is_persistent());
}

#[test]
fn test_auto_dismiss_after() {
    let timeout = Duration::from_secs(7);
    assert_eq!(Category::Info.auto_dismiss_after(timeout), Some(timeout));
    assert_eq!(Category::Error.auto_dismiss_after(timeout), None);
}

#[test]
fn test_display_and_from() {
    let category: Category = "success".into();
    assert_eq!(category.to_string(), "success");
    assert_eq!(category.class_name(), "alert--success");
}

#[test]
fn test_of_element_reads_category_class() {
    let mut surface = MemorySurface::new();
    let root = surface.root();
    let error = surface.element(root, "div", &[("class", "alert alert--error")]);
    let plain = surface.element(root, "div", &[("class", "alert")]);
    let custom = surface.element(root, "div", &[("class", "fade alert alert--promo")]);

    assert_eq!(Category::of_element(&surface, error), Category::Error);
    assert_eq!(Category::of_element(&surface, plain), Category::Info);
    assert_eq!(
        Category::of_element(&surface, custom),
        Category::Other("promo".to_string())
    );
}

#[test]
fn test_of_element_error_wins_over_earlier_modifier() {
    let mut surface = MemorySurface::new();
    let root = surface.root();
    let error = surface.element(
        root,
        "div",
        &[("class", "alert alert--dismissible alert--error")],
    );
    let timed = surface.element(
        root,
        "div",
        &[("class", "alert alert--dismissible alert--success")],
    );

    assert_eq!(Category::of_element(&surface, error), Category::Error);
    assert_eq!(
        Category::of_element(&surface, timed),
        Category::Other("dismissible".to_string())
    );
}
