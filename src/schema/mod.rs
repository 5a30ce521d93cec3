//! # Document Schema
//!
//! The fixed schema of the database XML format, expressed as a table of
//! [`ElementRule`]s, and a validator that checks an [`XmlElement`] tree
//! against it.
//!
//! Every violation carries the path of the element it was found on and the
//! [`Rule`] family it breaks:
//!
//! | Rule | Covers |
//! |------|--------|
//! | Root element | `Database` root with `version="0"` |
//! | Known elements | every element is allowed under its parent |
//! | Attributes | unknown, missing and mistyped attributes |
//! | Child cardinality | minimum/maximum occurrence of children |
//! | Text content | numeric lists, integers and expressions |
//! | Document content | a warning when no `ChemicalElement` is defined |

pub use report::{Rule, Severity, ValidationReport, Violation};
pub use rules::{
    rule_for, AttributeRule, ChildRule, ElementRule, ValueKind, DATABASE_SCHEMA, FORMAT_VERSION,
    ROOT_ELEMENT,
};

mod report;
mod rules;


use std::collections::HashMap;

use crate::expr::Expr;
use crate::xml::XmlElement;

/// Validate a document tree against [`DATABASE_SCHEMA`]
pub fn validate(root: &XmlElement) -> ValidationReport {
    validate_source(root, "<memory>")
}

/// Validate a document tree, labelling the report with `source`
pub fn validate_source(root: &XmlElement, source: impl Into<String>) -> ValidationReport {
    let mut report = ValidationReport::new(source);

    if root.name != ROOT_ELEMENT {
        report.elements_checked = 1;
        report.error(
            Rule::Root,
            &root.name,
            format!("expected <{}> as the root element", ROOT_ELEMENT),
        );
        return report;
    }
    match root.attribute("version") {
        Some(FORMAT_VERSION) => {}
        Some(other) => report.error(
            Rule::Root,
            ROOT_ELEMENT,
            format!("unsupported version '{}'", other),
        ),
        None => report.error(Rule::Root, ROOT_ELEMENT, "missing version attribute"),
    }

    if let Some(rule) = rule_for(None, ROOT_ELEMENT) {
        check_element(root, rule, ROOT_ELEMENT, &mut report);
    }

    if root.children_named("ChemicalElement").next().is_none() {
        report.warn(
            Rule::Content,
            ROOT_ELEMENT,
            "document defines no ChemicalElement",
        );
    }

    report
}

fn check_element(
    element: &XmlElement,
    rule: &ElementRule,
    path: &str,
    report: &mut ValidationReport,
) {
    report.elements_checked += 1;
    // the root version is reported under Rule::Root
    let skip = |name: &str| path == ROOT_ELEMENT && name == "version";

    for (key, value) in element.attributes.iter().filter(|(key, _)| !skip(key.as_str())) {
        let attribute_path = format!("{}@{}", path, key);
        match rule.attributes.iter().find(|a| a.name == key.as_str()) {
            Some(attribute) => {
                if !value_matches(attribute.kind, value) {
                    report.error(
                        Rule::Attribute,
                        &attribute_path,
                        format!("invalid value '{}'", value),
                    );
                }
            }
            None => report.error(Rule::Attribute, &attribute_path, "unexpected attribute"),
        }
    }
    for attribute in rule.attributes.iter().filter(|a| a.required && !skip(a.name)) {
        if element.attribute(attribute.name).is_none() {
            report.error(
                Rule::Attribute,
                path,
                format!("missing attribute '{}'", attribute.name),
            );
        }
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for child in element.elements() {
        let child_path = format!("{}/{}", path, child.name);
        let allowed = rule.children.iter().any(|c| c.name == child.name);
        match rule_for(Some(&element.name), &child.name) {
            Some(child_rule) if allowed => {
                *counts.entry(child_rule.name).or_default() += 1;
                check_element(child, child_rule, &child_path, report);
            }
            _ => report.error(Rule::KnownElement, &child_path, "element not allowed here"),
        }
    }
    for child in rule.children {
        let count = counts.get(child.name).copied().unwrap_or(0);
        if count < child.min {
            report.error(
                Rule::Cardinality,
                path,
                format!("expected at least {} <{}>", child.min, child.name),
            );
        }
        if let Some(max) = child.max {
            if count > max {
                report.error(
                    Rule::Cardinality,
                    path,
                    format!("expected at most {} <{}>, found {}", max, child.name, count),
                );
            }
        }
    }

    let text = element.text();
    match rule.text {
        ValueKind::Empty => {
            if !text.is_empty() {
                report.error(Rule::Text, path, format!("unexpected text '{}'", text));
            }
        }
        ValueKind::Expression => {
            if !text.is_empty() && Expr::parse(&text).is_err() {
                report.error(Rule::Text, path, format!("invalid expression '{}'", text));
            }
        }
        kind => {
            if !value_matches(kind, &text) {
                report.error(Rule::Text, path, format!("invalid text '{}'", text));
            }
        }
    }
}

fn value_matches(kind: ValueKind, value: &str) -> bool {
    let value = value.trim();
    match kind {
        ValueKind::Empty => value.is_empty(),
        ValueKind::Text => !value.is_empty(),
        ValueKind::Float => value.parse::<f64>().is_ok(),
        ValueKind::Integer => value.parse::<i64>().is_ok(),
        ValueKind::FloatList => {
            !value.is_empty() && value.split_whitespace().all(|v| v.parse::<f64>().is_ok())
        }
        ValueKind::Expression => value.is_empty() || Expr::parse(value).is_ok(),
        ValueKind::OneOf(options) => options.contains(&value),
    }
}
