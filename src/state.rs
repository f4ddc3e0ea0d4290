//! Calculator shell state, expressed as pure transitions: every interaction
//! consumes the current state and returns the next one. The evaluation
//! engine itself stays stateless; this module is the only place that
//! remembers anything between key presses.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::evaluate;

/// One finished calculation as it appears in the history panel, newest
/// first.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct HistoryItem {
    pub id: String,
    pub expression: String,
    pub result: String,
    /// Milliseconds since the unix epoch.
    pub timestamp: u64,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
}

/// The mutable state of the calculator shell: the expression under
/// construction, the last result display, an error flag, the keypad mode,
/// and the session history.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Calculator {
    pub input: String,
    pub result: String,
    pub is_error: bool,
    pub mode: Mode,
    pub history: Vec<HistoryItem>,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a digit, operator glyph, or function fragment to the input.
    /// A decimal point directly after another one is swallowed, and typing
    /// anything while an error is shown starts a fresh expression.
    pub fn apply_input(mut self, fragment: &str) -> Self {
        if fragment == "." && self.input.ends_with('.') {
            return self;
        }
        if self.is_error {
            self.is_error = false;
            self.input = fragment.to_string();
            self.result.clear();
            return self;
        }
        self.input.push_str(fragment);
        self
    }

    /// Single digit or decimal point.
    pub fn apply_digit(self, d: char) -> Self {
        self.apply_input(&d.to_string())
    }

    /// Operator key such as `+` or `×`.
    pub fn apply_operator(self, op: &str) -> Self {
        self.apply_input(op)
    }

    /// Backspace. While an error is shown it clears everything instead.
    pub fn delete(mut self) -> Self {
        if self.is_error {
            return self.clear();
        }
        self.input.pop();
        self.result.clear();
        self
    }

    /// Clears input, result, and error flag; the history stays.
    pub fn clear(mut self) -> Self {
        self.input.clear();
        self.result.clear();
        self.is_error = false;
        self
    }

    /// Evaluates the current input. An empty input is a no-op. On success
    /// the calculation is prepended to the history; on failure the input is
    /// kept so the user can correct it and only the error flag is raised.
    pub fn calculate(mut self) -> Self {
        if self.input.is_empty() {
            return self;
        }
        match evaluate(&self.input) {
            Ok(display) => {
                self.history.insert(
                    0,
                    HistoryItem {
                        id: generate_id(),
                        expression: self.input.clone(),
                        result: display.clone(),
                        timestamp: now_millis(),
                    },
                );
                self.result = display;
                self.is_error = false;
            }
            Err(e) => {
                log::debug!("evaluation of '{}' failed: {}", self.input, e);
                self.result = "Error".to_string();
                self.is_error = true;
            }
        }
        self
    }

    /// Restores a history entry into input and result.
    pub fn select_history(mut self, id: &str) -> Self {
        if let Some(item) = self.history.iter().find(|item| item.id == id) {
            self.input = item.expression.clone();
            self.result = item.result.clone();
            self.is_error = false;
        }
        self
    }

    pub fn clear_history(mut self) -> Self {
        self.history.clear();
        self
    }

    pub fn toggle_mode(mut self) -> Self {
        self.mode = match self.mode {
            Mode::Basic => Mode::Scientific,
            Mode::Scientific => Mode::Basic,
        };
        self
    }
}

/// Short collision-tolerant identifier for history entries: seven random
/// characters from the base-36 alphabet.
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..7)
        .map(|_| {
            let digit = rng.gen_range(0..36u32);
            char::from_digit(digit, 36).unwrap_or('0')
        })
        .collect()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{generate_id, Calculator, Mode};

    #[test]
    fn test_typing_and_calculate() {
        let state = Calculator::new()
            .apply_digit('2')
            .apply_operator("+")
            .apply_digit('2')
            .calculate();
        assert_eq!(state.result, "4");
        assert!(!state.is_error);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].expression, "2+2");
        assert_eq!(state.history[0].result, "4");
    }

    #[test]
    fn test_ui_glyphs_accepted() {
        let state = Calculator::new().apply_input("2×3÷1").calculate();
        assert_eq!(state.result, "6");
    }

    #[test]
    fn test_error_keeps_input() {
        let state = Calculator::new().apply_input("5/0").calculate();
        assert!(state.is_error);
        assert_eq!(state.result, "Error");
        assert_eq!(state.input, "5/0");
        assert!(state.history.is_empty());
    }

    #[test]
    fn test_input_after_error_starts_fresh() {
        let state = Calculator::new()
            .apply_input("5/0")
            .calculate()
            .apply_digit('7');
        assert_eq!(state.input, "7");
        assert!(!state.is_error);
    }

    #[test]
    fn test_double_decimal_swallowed() {
        let state = Calculator::new().apply_digit('1').apply_digit('.').apply_digit('.');
        assert_eq!(state.input, "1.");
    }

    #[test]
    fn test_empty_calculate_is_noop() {
        let state = Calculator::new().calculate();
        assert_eq!(state, Calculator::new());
    }

    #[test]
    fn test_history_newest_first() {
        let state = Calculator::new()
            .apply_input("1+1")
            .calculate()
            .clear()
            .apply_input("2+2")
            .calculate();
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[0].expression, "2+2");
        assert_eq!(state.history[1].expression, "1+1");
    }

    #[test]
    fn test_select_history() {
        let state = Calculator::new().apply_input("3*3").calculate().clear();
        let id = state.history[0].id.clone();
        let state = state.select_history(&id);
        assert_eq!(state.input, "3*3");
        assert_eq!(state.result, "9");
    }

    #[test]
    fn test_delete() {
        let state = Calculator::new().apply_input("12+").delete();
        assert_eq!(state.input, "12");
        let state = Calculator::new().apply_input("5/0").calculate().delete();
        assert_eq!(state.input, "");
        assert!(!state.is_error);
    }

    #[test]
    fn test_toggle_mode() {
        let state = Calculator::new().toggle_mode();
        assert_eq!(state.mode, Mode::Scientific);
        assert_eq!(state.toggle_mode().mode, Mode::Basic);
    }

    #[test]
    fn test_generate_id_shape() {
        for _ in 0..100 {
            let id = generate_id();
            assert_eq!(id.len(), 7);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric() && !c.is_uppercase()));
        }
    }
}
