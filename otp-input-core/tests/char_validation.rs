#![allow(missing_docs)]
use otp_input_core::cells::{MaskPolicy, project_cells};
use otp_input_core::chars::{
    AllowedChars, char_count, normalize_digit, sanitize_input_char, split_allowed,
};
use regex::Regex;

#[test]
fn test_digits_accept_ascii_only() {
    assert_eq!(sanitize_input_char("7", &AllowedChars::Digits), Some("7".to_string()));
    assert_eq!(sanitize_input_char("a", &AllowedChars::Digits), None);
    assert_eq!(sanitize_input_char("", &AllowedChars::Digits), None);
    assert_eq!(sanitize_input_char("12", &AllowedChars::Digits), None);
}

#[test]
fn test_unicode_digits_are_normalized_before_testing() {
    // Arabic-Indic three and Extended Arabic-Indic seven.
    assert_eq!(sanitize_input_char("\u{0663}", &AllowedChars::Digits), Some("3".to_string()));
    assert_eq!(sanitize_input_char("\u{06F7}", &AllowedChars::Digits), Some("7".to_string()));
    assert_eq!(normalize_digit('\u{0969}'), '3'); // Devanagari
    assert_eq!(normalize_digit('\u{FF19}'), '9'); // Fullwidth
    assert_eq!(normalize_digit('x'), 'x');
}

#[test]
fn test_any_char_accepts_a_single_grapheme() {
    let composed = "e\u{0301}";
    assert_eq!(char_count(composed), 1);
    assert_eq!(
        sanitize_input_char(composed, &AllowedChars::AnyChar),
        Some(composed.to_string())
    );
    assert_eq!(sanitize_input_char("ab", &AllowedChars::AnyChar), None);
}

#[test]
fn test_one_of_and_custom_rules() {
    let hex = AllowedChars::OneOf("0123456789ABCDEF".to_string());
    assert!(hex.accepts("C"));
    assert!(!hex.accepts("G"));

    let upper = AllowedChars::custom(|c| c.chars().all(|ch| ch.is_ascii_uppercase()));
    assert_eq!(sanitize_input_char("Q", &upper), Some("Q".to_string()));
    assert_eq!(sanitize_input_char("q", &upper), None);
}

#[test]
fn test_pattern_rule_tests_the_normalized_character() {
    let pattern = AllowedChars::Pattern(Regex::new("^[A-Z0-9]$").expect("valid pattern"));
    assert_eq!(sanitize_input_char("K", &pattern), Some("K".to_string()));
    assert_eq!(sanitize_input_char("\u{0665}", &pattern), Some("5".to_string()));
    assert_eq!(sanitize_input_char("k", &pattern), None);
    assert_eq!(split_allowed("a1-B2", &pattern), vec!["1", "B", "2"]);
}

#[test]
fn test_split_allowed_skips_rejects_and_keeps_order() {
    assert_eq!(split_allowed("1a2b3c", &AllowedChars::Digits), vec!["1", "2", "3"]);
    assert_eq!(
        split_allowed("\u{0661}\u{0662}x\u{0663}", &AllowedChars::Digits),
        vec!["1", "2", "3"]
    );
}

#[test]
fn test_projection_always_has_length_cells() {
    for value in ["", "12", "123456", "123456789"] {
        assert_eq!(project_cells(value, 6).len(), 6, "value {value:?}");
    }
    assert_eq!(project_cells("12", 4), vec!["1", "2", "", ""]);
    assert_eq!(project_cells("123456789", 3), vec!["1", "2", "3"]);
}

#[test]
fn test_mask_hides_filled_cells() {
    let policy = MaskPolicy {
        mask: Some("*".to_string()),
        reveal_on_focus: true,
    };
    let cells = project_cells("12", 4);
    assert_eq!(policy.apply(cells.clone(), false), vec!["*", "*", "", ""]);
    assert_eq!(policy.apply(cells.clone(), true), vec!["1", "2", "", ""]);

    let always = MaskPolicy {
        mask: Some("*".to_string()),
        reveal_on_focus: false,
    };
    assert!(always.is_active(true));
    assert!(!MaskPolicy::default().is_active(false));
    assert_eq!(MaskPolicy::default().apply(cells, false), vec!["1", "2", "", ""]);
}
