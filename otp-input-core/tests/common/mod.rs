#![allow(dead_code)]
use otp_input_core::focus::FocusRecorder;
use otp_input_core::{Callbacks, OtpConfig, OtpInput};
use std::cell::RefCell;
use std::rc::Rc;

/// Captures every notification a widget emits.
#[derive(Debug, Clone, Default)]
pub(crate) struct Recorded {
    changes: Rc<RefCell<Vec<String>>>,
    completes: Rc<RefCell<Vec<String>>>,
    invalid: Rc<RefCell<Vec<String>>>,
}

impl Recorded {
    pub(crate) fn callbacks(&self) -> Callbacks {
        let changes = Rc::clone(&self.changes);
        let completes = Rc::clone(&self.completes);
        let invalid = Rc::clone(&self.invalid);
        Callbacks::new()
            .on_change(move |v| changes.borrow_mut().push(v.to_string()))
            .on_complete(move |v| completes.borrow_mut().push(v.to_string()))
            .on_invalid_char(move |c| invalid.borrow_mut().push(c.to_string()))
    }

    pub(crate) fn changes(&self) -> Vec<String> {
        self.changes.borrow().clone()
    }

    pub(crate) fn completes(&self) -> Vec<String> {
        self.completes.borrow().clone()
    }

    pub(crate) fn invalid(&self) -> Vec<String> {
        self.invalid.borrow().clone()
    }
}

pub(crate) fn numeric(length: usize) -> OtpConfig {
    OtpConfig {
        length,
        ..OtpConfig::default()
    }
}

pub(crate) fn with_default(length: usize, default_value: &str) -> OtpConfig {
    OtpConfig {
        length,
        default_value: Some(default_value.to_string()),
        ..OtpConfig::default()
    }
}

pub(crate) fn build(config: &OtpConfig) -> (OtpInput, Recorded, FocusRecorder) {
    let recorded = Recorded::default();
    let focus = FocusRecorder::new();
    let input = OtpInput::new(config, recorded.callbacks(), focus.clone())
        .expect("Failed to build OTP input");
    (input, recorded, focus)
}
