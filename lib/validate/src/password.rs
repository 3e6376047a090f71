//! Password policy evaluation.
//!
//! The policy is a declarative rule table checked in declaration order.
//! Every rule runs on every call and each failing rule contributes its
//! message, so the caller gets the complete violation list in one pass.
//! The confirmation check runs ahead of the table and is therefore always
//! first in the output when it fires.

use std::sync::LazyLock;

use regex::Regex;

/// Violation message for a mismatched confirmation.
pub const MISMATCH: &str = "The confirmation password does not match.";

/// One entry of the password policy: optional length bounds and an
/// optional character-class pattern, with the message reported when the
/// entry fails.
struct PasswordRule {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<Regex>,
    message: &'static str,
}

impl PasswordRule {
    fn passes(&self, password: &str) -> bool {
        let length = password.chars().count();
        if let Some(min) = self.min_length {
            if length < min {
                return false;
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return false;
            }
        }
        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(password) {
                return false;
            }
        }
        true
    }
}

static RULES: LazyLock<Vec<PasswordRule>> = LazyLock::new(|| {
    vec![
        PasswordRule {
            min_length: Some(6),
            max_length: None,
            pattern: None,
            message: "Your password must be at least six characters long.",
        },
        PasswordRule {
            min_length: None,
            max_length: Some(50),
            pattern: None,
            message: "Your password cannot be longer than 50 characters.",
        },
        PasswordRule {
            min_length: None,
            max_length: None,
            pattern: Some(Regex::new(r"\d").expect("digit pattern")),
            message: "Your password must contain at least one digit.",
        },
        PasswordRule {
            min_length: None,
            max_length: None,
            pattern: Some(Regex::new(r"[a-zA-Z]").expect("letter pattern")),
            message: "Your password must contain at least one letter.",
        },
        PasswordRule {
            min_length: None,
            max_length: None,
            pattern: Some(Regex::new(r"[!@#$%^&*() =+_-]").expect("symbol pattern")),
            message: "Your password must contain at least one symbol in this list !@#$%^&*()=+_- or a space.",
        },
    ]
});

/// Result of evaluating a candidate password against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCheck {
    pub valid: bool,
    /// Violation messages in policy order; empty when `valid`.
    pub violations: Vec<&'static str>,
}

/// Evaluate `password` and its confirmation against the full policy.
///
/// All rules are checked and violations accumulate in declaration order,
/// mismatch first. Deterministic, no side effects. Callers own any
/// "both fields empty" short-circuit; this function always runs the
/// whole rule set.
pub fn evaluate(password: &str, confirm_password: &str) -> PasswordCheck {
    let mut violations = Vec::new();

    if password != confirm_password {
        violations.push(MISMATCH);
    }

    for rule in RULES.iter() {
        if !rule.passes(password) {
            violations.push(rule.message);
        }
    }

    PasswordCheck {
        valid: violations.is_empty(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_conforming_password() {
        let check = evaluate("abc123!", "abc123!");
        assert!(check.valid);
        assert!(check.violations.is_empty());
    }

    #[test]
    fn mismatch_is_the_only_violation_when_the_rest_passes() {
        let check = evaluate("abc123!", "xyz");
        assert!(!check.valid);
        assert_eq!(check.violations, vec![MISMATCH]);
    }

    #[test]
    fn minimum_length_boundary() {
        // 5 chars fails, 6 passes.
        assert!(
            evaluate("a1!bc", "a1!bc")
                .violations
                .contains(&"Your password must be at least six characters long.")
        );
        assert!(evaluate("a1!bcd", "a1!bcd").valid);
    }

    #[test]
    fn maximum_length_boundary() {
        // 50 chars passes, 51 fails.
        let at_limit = format!("a1!{}", "x".repeat(47));
        assert_eq!(at_limit.len(), 50);
        assert!(evaluate(&at_limit, &at_limit).valid);

        let over = format!("a1!{}", "x".repeat(48));
        assert!(
            evaluate(&over, &over)
                .violations
                .contains(&"Your password cannot be longer than 50 characters.")
        );
    }

    #[test]
    fn requires_digit_letter_and_symbol() {
        assert!(
            evaluate("abcdef!", "abcdef!")
                .violations
                .contains(&"Your password must contain at least one digit.")
        );
        assert!(
            evaluate("123456!", "123456!")
                .violations
                .contains(&"Your password must contain at least one letter.")
        );
        assert!(
            evaluate("abc1234", "abc1234")
                .violations
                .contains(&"Your password must contain at least one symbol in this list !@#$%^&*()=+_- or a space.")
        );
    }

    #[test]
    fn a_space_counts_as_a_symbol() {
        assert!(evaluate("abc 123", "abc 123").valid);
    }

    #[test]
    fn violations_keep_declaration_order() {
        // Empty password vs. non-empty confirmation trips every rule.
        let check = evaluate("", "different");
        assert_eq!(
            check.violations,
            vec![
                MISMATCH,
                "Your password must be at least six characters long.",
                "Your password must contain at least one digit.",
                "Your password must contain at least one letter.",
                "Your password must contain at least one symbol in this list !@#$%^&*()=+_- or a space.",
            ]
        );
    }

    #[test]
    fn empty_pair_runs_the_full_rule_set() {
        // The caller-side "both fields empty" short-circuit is form
        // policy; the evaluator itself reports every failing rule.
        let check = evaluate("", "");
        assert!(!check.valid);
        assert_eq!(check.violations.len(), 4);
        assert!(!check.violations.contains(&MISMATCH));
    }
}
