//! Typed equation input from the math keypad.

use serde::{Deserialize, Serialize};

/// A key on the math keypad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "lowercase")]
pub enum Key {
    /// Insert text (a digit, operator, variable or symbol like `√`).
    Text(String),
    /// Delete the last character.
    Backspace,
    /// Delete everything.
    Clear,
}

impl Key {
    /// Map the keypad's raw key value to a key.
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "backspace" => Self::Backspace,
            "clear" => Self::Clear,
            other => Self::Text(other.to_string()),
        }
    }
}

/// Editable equation text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationBuffer {
    text: String,
}

impl EquationBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current equation text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether no text has been entered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace the whole text (free-form typing).
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Apply a keypad press.
    pub fn press(&mut self, key: &Key) {
        match key {
            Key::Text(s) => self.text.push_str(s),
            Key::Backspace => {
                self.text.pop();
            }
            Key::Clear => self.text.clear(),
        }
    }

    /// Whether the parentheses in the text are balanced.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        is_balanced(&self.text)
    }
}

/// Check that every `)` closes an earlier `(` and none are left open.
#[must_use]
pub fn is_balanced(expression: &str) -> bool {
    let mut depth: usize = 0;
    for c in expression.chars() {
        match c {
            '(' => depth += 1,
            ')' => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypad_editing() {
        let mut buffer = EquationBuffer::new();
        for value in ["x", "^", "2", "√", "backspace", "+", "1"] {
            buffer.press(&Key::from_value(value));
        }
        assert_eq!(buffer.as_str(), "x^2+1");

        buffer.press(&Key::Clear);
        assert!(buffer.is_empty());

        buffer.press(&Key::Backspace);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_balanced_parentheses() {
        assert!(is_balanced(""));
        assert!(is_balanced("(x + 1)(x - 1) = 0"));
        assert!(is_balanced("((2))"));
        assert!(!is_balanced("(x + 1"));
        assert!(!is_balanced(")x("));
    }
}
