#![allow(missing_docs)]
mod common;

use common::{Recorded, build, numeric, with_default};
use otp_input_core::focus::{FocusRecorder, FocusRequest, NoopFocus};
use otp_input_core::value::{ValueMode, ValueStore};
use otp_input_core::{InputEvent, Key, OtpConfig, OtpError, OtpInput};

fn controlled(length: usize, value: &str) -> OtpConfig {
    OtpConfig {
        length,
        value: Some(value.to_string()),
        ..OtpConfig::default()
    }
}

#[test]
fn test_set_value_get_value_roundtrip_truncates() {
    let (mut otp, recorded, _focus) = build(&numeric(6));
    assert_eq!(otp.mode(), ValueMode::Uncontrolled);

    otp.set_value("12345678");
    assert_eq!(otp.get_value(), "123456");
    assert_eq!(recorded.changes(), vec!["123456"]);
    assert_eq!(recorded.completes(), vec!["123456"]);

    otp.set_value("42");
    assert_eq!(otp.get_value(), "42");
}

#[test]
fn test_default_value_is_truncated_and_does_not_complete() {
    let (otp, recorded, _focus) = build(&with_default(4, "123456"));
    assert_eq!(otp.get_value(), "1234");
    assert!(recorded.completes().is_empty());
}

#[test]
fn test_clear_empties_and_focuses_first_cell() {
    let (mut otp, recorded, focus) = build(&with_default(6, "123"));
    otp.clear();
    assert_eq!(otp.get_value(), "");
    assert_eq!(recorded.changes(), vec![""]);
    assert_eq!(focus.last(), Some(FocusRequest::Cell(0)));
}

#[test]
fn test_focus_and_blur_requests() {
    let (mut otp, _recorded, focus) = build(&numeric(6));
    otp.focus(3);
    otp.focus(6);
    otp.blur();
    assert_eq!(
        focus.requests(),
        vec![FocusRequest::Cell(3), FocusRequest::BlurAll]
    );
    assert_eq!(focus.current(), None);
}

#[test]
fn test_auto_focus_requests_first_cell() {
    let config = OtpConfig {
        auto_focus: true,
        ..numeric(6)
    };
    let (_otp, _recorded, focus) = build(&config);
    assert_eq!(focus.current(), Some(0));
}

#[test]
fn test_controlled_edits_only_propose_values() {
    let (mut otp, recorded, _focus) = build(&controlled(6, "12"));
    assert_eq!(otp.mode(), ValueMode::Controlled);

    otp.handle(InputEvent::Input {
        index: 2,
        text: "3".to_string(),
    });
    assert_eq!(recorded.changes(), vec!["123"]);
    assert_eq!(otp.get_value(), "12");

    otp.sync_value("123");
    assert_eq!(otp.get_value(), "123");
}

#[test]
fn test_controlled_external_full_value_completes_once() {
    let (mut otp, recorded, _focus) = build(&controlled(4, "12"));
    otp.sync_value("1234");
    otp.sync_value("1234");
    assert_eq!(recorded.completes(), vec!["1234"]);

    otp.sync_value("12");
    otp.sync_value("1299");
    assert_eq!(recorded.completes(), vec!["1234", "1299"]);
    assert!(recorded.changes().is_empty());
}

#[test]
fn test_controlled_full_initial_value_completes() {
    let (_otp, recorded, _focus) = build(&controlled(4, "1234"));
    assert_eq!(recorded.completes(), vec!["1234"]);
}

#[test]
fn test_controlled_over_length_value_is_truncated() {
    let (mut otp, recorded, _focus) = build(&controlled(6, "1234567"));
    assert_eq!(otp.get_value(), "123456");
    assert!(otp.is_complete());
    assert_eq!(recorded.completes(), vec!["123456"]);

    otp.handle(InputEvent::Key {
        index: 5,
        key: Key::Enter,
    });
    assert_eq!(recorded.completes(), vec!["123456", "123456"]);

    otp.sync_value("12");
    otp.sync_value("98765432");
    assert_eq!(otp.get_value(), "987654");
    assert_eq!(otp.cells().len(), 6);
    assert_eq!(recorded.completes(), vec!["123456", "123456", "987654"]);
}

#[test]
fn test_controlled_commit_then_echo_completes_once() {
    let (mut otp, recorded, _focus) = build(&controlled(4, "123"));
    otp.handle(InputEvent::Input {
        index: 3,
        text: "4".to_string(),
    });
    otp.sync_value("1234");
    assert_eq!(recorded.changes(), vec!["1234"]);
    assert_eq!(recorded.completes(), vec!["1234"]);
}

#[test]
fn test_uncontrolled_store_ignores_external_values() {
    let recorded = Recorded::default();
    let mut store = ValueStore::uncontrolled(4, "12", recorded.callbacks());
    store.observe_external("9999");
    assert_eq!(store.value(), "12");
    assert!(recorded.completes().is_empty());

    store.commit("123456");
    assert_eq!(store.value(), "1234");
    assert!(store.is_full());
    assert!(store.submit_if_complete());
    assert_eq!(recorded.completes(), vec!["1234", "1234"]);
}

#[test]
fn test_zero_length_is_rejected_at_construction() {
    let result = OtpInput::new(&numeric(0), otp_input_core::Callbacks::new(), NoopFocus);
    assert!(matches!(result, Err(OtpError::InvalidLength { length: 0 })));
}

#[test]
fn test_display_cells_and_attributes() {
    let config = OtpConfig {
        mask: Some("\u{2022}".to_string()),
        reveal_on_focus: true,
        name: Some("otp".to_string()),
        placeholder: Some("-".to_string()),
        ..with_default(4, "12")
    };
    let focus = FocusRecorder::new();
    let otp = OtpInput::new(&config, otp_input_core::Callbacks::new(), focus)
        .expect("Failed to build OTP input");

    assert_eq!(otp.display_cells(false), vec!["\u{2022}", "\u{2022}", "", ""]);
    assert_eq!(otp.display_cells(true), vec!["1", "2", "", ""]);

    let attrs = otp.cell_attributes(2);
    assert_eq!(attrs.id.as_deref(), Some("otp-2"));
    assert_eq!(attrs.aria_label, "OTP digit 3");
    assert_eq!(attrs.input_mode, "numeric");
    assert_eq!(attrs.input_type, "tel");
    assert_eq!(attrs.pattern, Some("[0-9]*"));
    assert_eq!(attrs.auto_complete, "one-time-code");
    assert_eq!(attrs.placeholder, "-");

    let snapshot = otp.snapshot(false);
    assert_eq!(snapshot.value, "12");
    assert!(!snapshot.complete);
}
