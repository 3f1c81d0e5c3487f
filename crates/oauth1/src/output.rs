//! Colored progress output for interactive commands.

use console::{Style, Term};

/// Width of the rule drawn around banners.
const RULE_WIDTH: usize = 70;

/// Progress reporter writing to stderr, leaving stdout for command results.
pub(crate) struct Output {
    term: Term,
    green: Style,
    red: Style,
    cyan_bold: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            red: Style::new().red(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Plain message.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Numbered step of a multi-step command.
    pub(crate) fn step(&self, number: u8, msg: &str) {
        self.line(&step_line(number, msg));
    }

    /// Green confirmation.
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.green.apply_to(msg).to_string());
    }

    /// Red failure, used for the final error before exit.
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.red.apply_to(msg).to_string());
    }

    /// Title framed by rules, for points where the user has to act.
    pub(crate) fn banner(&self, title: &str) {
        let rule = rule();
        self.line(&rule);
        self.line(&self.cyan_bold.apply_to(title).to_string());
        self.line(&rule);
    }

    /// URL the user must open, set apart by blank lines.
    pub(crate) fn link(&self, url: &str) {
        self.line("");
        self.line(&self.cyan_bold.apply_to(url).to_string());
        self.line("");
    }

    fn line(&self, msg: &str) {
        // Best effort: a closed stderr is ignored
        let _ = self.term.write_line(msg);
    }
}

fn step_line(number: u8, msg: &str) -> String {
    format!("Step {number}: {msg}")
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_step_line() {
        assert_eq!(
            step_line(2, "Authorization Required"),
            "Step 2: Authorization Required"
        );
    }

    #[test]
    fn test_rule_width() {
        let rule = rule();
        assert_eq!(rule.len(), RULE_WIDTH);
        assert!(rule.chars().all(|c| c == '='));
    }
}
