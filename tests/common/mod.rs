//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use guarded_input::editable::{ConstrainedTextField, Decision, FieldConfig, FieldKind};
use guarded_input::util::chars_eq_ignore_case;

/// Empty resources field: value `"Resources_"`, caret at 10
pub fn resources_field() -> ConstrainedTextField {
    ConstrainedTextField::new(FieldConfig::resources())
}

/// Field of `kind` holding `value` (programmatic set, caret at end)
pub fn field_with(kind: FieldKind, value: &str) -> ConstrainedTextField {
    let mut field = ConstrainedTextField::new(kind.config());
    field.set_value(value);
    field
}

/// Type each char of `text` at the current caret, returning the decisions
pub fn type_str(field: &mut ConstrainedTextField, text: &str) -> Vec<Decision> {
    text.chars()
        .map(|ch| {
            let caret = field.caret();
            field.on_character_typed(ch, caret)
        })
        .collect()
}

/// Assert the structural invariants every field must hold between events
pub fn assert_field_invariants(field: &ConstrainedTextField) {
    let config = field.config();
    let value = field.value();
    let prefix_len = config.prefix_len();
    let len = value.chars().count();

    assert!(
        value.starts_with(&config.prefix),
        "value {:?} lost prefix {:?}",
        value,
        config.prefix
    );

    let editable: Vec<char> = value.chars().skip(prefix_len).collect();
    assert!(
        editable.len() <= config.max_length,
        "editable part of {:?} exceeds {}",
        value,
        config.max_length
    );
    for ch in &editable {
        assert!(
            config.is_char_allowed(*ch),
            "disallowed {:?} in {:?}",
            ch,
            value
        );
    }

    if config.collapse_whitespace {
        assert!(
            !editable
                .windows(2)
                .any(|pair| pair[0].is_whitespace() && pair[1].is_whitespace()),
            "whitespace run in {:?}",
            value
        );
    }

    for word in config.forbidden_substrings.iter().filter(|w| !w.is_empty()) {
        let word: Vec<char> = word.chars().collect();
        assert!(
            !editable.windows(word.len()).any(|window| {
                window
                    .iter()
                    .zip(&word)
                    .all(|(c, w)| chars_eq_ignore_case(*c, *w))
            }),
            "forbidden {:?} left in {:?}",
            word.iter().collect::<String>(),
            value
        );
    }

    let sel = field.selection();
    assert!(sel.start() >= prefix_len, "caret {:?} inside prefix", sel);
    assert!(sel.end() <= len, "caret {:?} past end of {:?}", sel, value);
}
