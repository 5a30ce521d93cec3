//! Schema violations found in one document, located by element path

use std::fmt::{self, Write as _};

#[cfg(feature = "colorized_output")]
use console::style;

/// Violations listed per rule before the rest is summarised
const MAX_LISTED: usize = 5;

/// Rule family a violation belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    /// `Database` root with `version="0"`
    Root,
    /// Element allowed under its parent
    KnownElement,
    /// Unknown, missing or mistyped attribute
    Attribute,
    /// Minimum/maximum occurrence of a child
    Cardinality,
    /// Numeric lists, integers and expressions in text
    Text,
    /// Document-level content, such as at least one element
    Content,
}

impl Rule {
    /// Every rule, in report order
    pub const ALL: [Rule; 6] = [
        Rule::Root,
        Rule::KnownElement,
        Rule::Attribute,
        Rule::Cardinality,
        Rule::Text,
        Rule::Content,
    ];

    /// Heading used in reports
    pub fn label(self) -> &'static str {
        match self {
            Rule::Root => "Root element",
            Rule::KnownElement => "Known elements",
            Rule::Attribute => "Attributes",
            Rule::Cardinality => "Child cardinality",
            Rule::Text => "Text content",
            Rule::Content => "Document content",
        }
    }
}

/// Whether a violation makes the document invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reported, document still valid
    Warning,
    /// Document is invalid
    Error,
}

/// One schema violation
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// Rule family
    pub rule: Rule,
    /// Warning or error
    pub severity: Severity,
    /// Element path, e.g. `Database/Phase/Model@type`
    pub path: String,
    /// What is wrong
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Result of checking one document tree against the schema
#[derive(Debug)]
pub struct ValidationReport {
    /// Where the document came from (file path or a label)
    pub source: String,
    /// Number of elements visited
    pub elements_checked: usize,
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Create an empty report for the given source
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            elements_checked: 0,
            violations: Vec::new(),
        }
    }

    pub(crate) fn error(&mut self, rule: Rule, path: &str, message: impl Into<String>) {
        self.push(rule, Severity::Error, path, message.into());
    }

    pub(crate) fn warn(&mut self, rule: Rule, path: &str, message: impl Into<String>) {
        self.push(rule, Severity::Warning, path, message.into());
    }

    fn push(&mut self, rule: Rule, severity: Severity, path: &str, message: String) {
        self.violations.push(Violation {
            rule,
            severity,
            path: path.to_string(),
            message,
        });
    }

    /// Every violation in document order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations of one rule family
    pub fn by_rule(&self, rule: Rule) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.rule == rule)
    }

    /// Whether any violation is an error
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Number of error violations
    pub fn failure_count(&self) -> usize {
        self.violations
            .iter()
            .filter(|v| v.severity == Severity::Error)
            .count()
    }

    /// Errors grouped by rule, one line per rule
    pub fn failure_summary(&self) -> String {
        Rule::ALL
            .iter()
            .filter_map(|&rule| {
                let errors: Vec<&Violation> = self
                    .by_rule(rule)
                    .filter(|v| v.severity == Severity::Error)
                    .collect();
                if errors.is_empty() {
                    return None;
                }
                let mut listed: Vec<String> =
                    errors.iter().take(MAX_LISTED).map(|v| v.to_string()).collect();
                if errors.len() > MAX_LISTED {
                    listed.push(format!("and {} more", errors.len() - MAX_LISTED));
                }
                Some(format!("{}: {}", rule.label(), listed.join("; ")))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format the report with colors (plain text without `colorized_output`)
    pub fn format_colored(&self) -> String {
        self.render(true)
    }

    fn render(&self, colored: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {} ({} elements)",
            paint("Schema check:", Tone::Heading, colored),
            self.source,
            self.elements_checked
        );

        for rule in Rule::ALL {
            let found: Vec<&Violation> = self.by_rule(rule).collect();
            if found.is_empty() {
                let _ = writeln!(out, "  {} {}", paint("ok  ", Tone::Good, colored), rule.label());
                continue;
            }
            let tone = if found.iter().any(|v| v.severity == Severity::Error) {
                Tone::Bad
            } else {
                Tone::Warn
            };
            let _ = writeln!(
                out,
                "  {} {} ({})",
                paint("FAIL", tone, colored),
                rule.label(),
                found.len()
            );
            for violation in found.iter().take(MAX_LISTED) {
                let _ = writeln!(out, "       {}", violation);
            }
            if found.len() > MAX_LISTED {
                let _ = writeln!(out, "       ... and {} more", found.len() - MAX_LISTED);
            }
        }

        let warnings = self.violations.len() - self.failure_count();
        let verdict = match (self.failure_count(), warnings) {
            (0, 0) => paint("valid", Tone::Good, colored),
            (0, w) => paint(&format!("valid, {} warnings", w), Tone::Warn, colored),
            (e, _) => paint(&format!("invalid, {} errors", e), Tone::Bad, colored),
        };
        let _ = writeln!(out, "{}", verdict);
        out
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

#[derive(Clone, Copy)]
enum Tone {
    Heading,
    Good,
    Warn,
    Bad,
}

#[cfg(feature = "colorized_output")]
fn paint(text: &str, tone: Tone, colored: bool) -> String {
    if !colored {
        return text.to_string();
    }
    let styled = style(text);
    match tone {
        Tone::Heading => styled.bold().cyan(),
        Tone::Good => styled.green(),
        Tone::Warn => styled.yellow().bold(),
        Tone::Bad => styled.red().bold(),
    }
    .to_string()
}

#[cfg(not(feature = "colorized_output"))]
fn paint(text: &str, _tone: Tone, _colored: bool) -> String {
    text.to_string()
}
