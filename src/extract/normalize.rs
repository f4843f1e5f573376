//! Repairs for known, reproducible misreads on the card font.
//!
//! Each rule is scoped to one kind of field and rules run in table order.
//! The weight rules are order sensitive: the `B` -> `8` pass can produce
//! `18S`, which the next rule removes.

use anyhow::Result;
use regex::Regex;

/// Field kinds that have repair rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Stat,
    HeightInches,
    Weight,
    Synergy,
}

#[derive(Clone, Copy, Debug)]
enum RuleKind {
    /// Whole text equals `pattern` -> `replacement`.
    Exact,
    /// Every match of `pattern` -> `replacement`.
    Replace,
    /// Keep only the text before the first match of `pattern`.
    TruncateAt,
}

#[derive(Clone, Copy, Debug)]
struct RuleSpec {
    field: FieldKind,
    kind: RuleKind,
    pattern: &'static str,
    replacement: &'static str,
}

const RULES: &[RuleSpec] = &[
    // Two-digit stats are often read as a single 7.
    RuleSpec {
        field: FieldKind::Stat,
        kind: RuleKind::Exact,
        pattern: "7",
        replacement: "77",
    },
    // Digit doubling on 11 inches.
    RuleSpec {
        field: FieldKind::HeightInches,
        kind: RuleKind::Exact,
        pattern: "111",
        replacement: "11",
    },
    RuleSpec {
        field: FieldKind::Weight,
        kind: RuleKind::Replace,
        pattern: "LBS",
        replacement: "",
    },
    RuleSpec {
        field: FieldKind::Weight,
        kind: RuleKind::Replace,
        pattern: "B",
        replacement: "8",
    },
    RuleSpec {
        field: FieldKind::Weight,
        kind: RuleKind::Replace,
        pattern: "18S",
        replacement: "",
    },
    // Drop tier qualifiers such as "(Tier 2)" or "[x2]".
    RuleSpec {
        field: FieldKind::Synergy,
        kind: RuleKind::TruncateAt,
        pattern: r"[(\[]",
        replacement: "",
    },
];

#[derive(Debug)]
enum Action {
    Exact {
        from: &'static str,
        to: &'static str,
    },
    Replace {
        regex: Regex,
        with: &'static str,
    },
    TruncateAt(Regex),
}

impl Action {
    fn apply(&self, text: String) -> String {
        match self {
            Action::Exact { from, to } => {
                if text == *from {
                    to.to_string()
                } else {
                    text
                }
            }
            Action::Replace { regex, with } => regex.replace_all(&text, *with).into_owned(),
            Action::TruncateAt(regex) => {
                let cut = regex.find(&text).map(|m| m.start());
                match cut {
                    Some(end) => text[..end].to_string(),
                    None => text,
                }
            }
        }
    }
}

#[derive(Debug)]
struct Rule {
    field: FieldKind,
    action: Action,
}

/// Compiled repair table.
#[derive(Debug)]
pub struct NormalizationRules {
    rules: Vec<Rule>,
}

impl NormalizationRules {
    /// Compiles the built-in rule table.
    pub fn standard() -> Result<Self> {
        let rules = RULES
            .iter()
            .map(|spec| -> Result<Rule> {
                let action = match spec.kind {
                    RuleKind::Exact => Action::Exact {
                        from: spec.pattern,
                        to: spec.replacement,
                    },
                    RuleKind::Replace => Action::Replace {
                        regex: Regex::new(spec.pattern)?,
                        with: spec.replacement,
                    },
                    RuleKind::TruncateAt => Action::TruncateAt(Regex::new(spec.pattern)?),
                };
                Ok(Rule {
                    field: spec.field,
                    action,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { rules })
    }

    /// Applies every rule for `field`, in table order.
    pub fn apply(&self, field: FieldKind, text: &str) -> String {
        self.rules
            .iter()
            .filter(|rule| rule.field == field)
            .fold(text.to_string(), |acc, rule| rule.action.apply(acc))
    }
}
