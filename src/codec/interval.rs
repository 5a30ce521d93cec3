//! Conversion between interval fragments and piecewise temperature expressions
//!
//! A value in the document is a sequence of fragments: bare algebraic text
//! and `<Interval in="T" lower=".." upper="..">` elements. Literal text is
//! summed; intervals become the branches of one piecewise expression with an
//! implicit zero default outside every declared range.

use crate::expr::{format_float, Branch, Expr, Interval, TEMPERATURE};
use crate::xml::{XmlElement, XmlNode};

use super::CodecError;

/// Tag of interval elements
pub const INTERVAL_ELEMENT: &str = "Interval";

/// One piece of an expression value
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    /// Bare algebraic text
    Text(String),
    /// Interval-restricted value
    Interval(IntervalFragment),
}

/// `<Interval>` descriptor
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalFragment {
    /// Domain variable, must be `T`
    pub variable: String,
    /// Inclusive lower bound, `None` is -inf
    pub lower: Option<f64>,
    /// Exclusive upper bound, `None` is +inf
    pub upper: Option<f64>,
    /// Nested value
    pub content: Vec<Fragment>,
}

/// Combine fragments into a single expression
pub fn decode(fragments: &[Fragment]) -> Result<Expr, CodecError> {
    let mut literal = Expr::zero();
    let mut branches = Vec::new();

    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => {
                if !text.trim().is_empty() {
                    literal = literal + parse_text(text)?;
                }
            }
            Fragment::Interval(interval) => {
                if interval.variable != TEMPERATURE {
                    return Err(CodecError::UnsupportedIntervalVariable(
                        interval.variable.clone(),
                    ));
                }
                let value = decode(&interval.content)?;
                branches.push(Branch::new(
                    value,
                    Interval::from_bounds(interval.lower, interval.upper),
                ));
            }
        }
    }

    if branches.is_empty() {
        return Ok(literal);
    }
    Ok(literal + Expr::piecewise(branches))
}

/// Split an expression into fragments that [`decode`] turns back into it
pub fn encode(expr: &Expr) -> Result<Vec<Fragment>, CodecError> {
    match expr {
        Expr::Piecewise(_) => encode_piecewise(expr),
        Expr::Add(terms) if terms.iter().any(|t| matches!(t, Expr::Piecewise(_))) => {
            let (piecewise, rest): (Vec<&Expr>, Vec<&Expr>) = terms
                .iter()
                .partition(|t| matches!(t, Expr::Piecewise(_)));
            if piecewise.len() > 1 {
                return Err(CodecError::UnrepresentableExpression(format!(
                    "sum of {} piecewise terms",
                    piecewise.len()
                )));
            }

            let literal = Expr::Add(rest.into_iter().cloned().collect()).simplify();
            let mut fragments = if literal.is_zero() {
                Vec::new()
            } else {
                encode(&literal)?
            };
            fragments.extend(encode_piecewise(piecewise[0])?);
            Ok(fragments)
        }
        other if other.contains_piecewise() => Err(CodecError::UnrepresentableExpression(
            other.to_string(),
        )),
        other => Ok(vec![Fragment::Text(other.to_string())]),
    }
}

fn encode_piecewise(expr: &Expr) -> Result<Vec<Fragment>, CodecError> {
    let mut fragments = Vec::new();
    for branch in expr.explicit_branches().unwrap_or_default() {
        let content = if branch.value.is_zero() {
            Vec::new()
        } else {
            encode(&branch.value)?
        };

        // Unbounded branches stay intervals so they keep their position;
        // bare text would be added to every branch instead.
        fragments.push(Fragment::Interval(IntervalFragment {
            variable: TEMPERATURE.to_string(),
            lower: Some(branch.interval.lower),
            upper: branch.interval.has_upper().then_some(branch.interval.upper),
            content,
        }));
    }
    Ok(fragments)
}

fn parse_text(text: &str) -> Result<Expr, CodecError> {
    Expr::parse(text).map_err(|source| CodecError::Expr {
        text: text.trim().to_string(),
        source,
    })
}

/// Collect the value fragments of `element` in document order
///
/// Direct text and `<Interval>` children are fragments; any other child
/// element belongs to the caller and is skipped.
pub fn fragments_from_xml(element: &XmlElement) -> Result<Vec<Fragment>, CodecError> {
    let mut fragments = Vec::new();
    for child in &element.children {
        match child {
            XmlNode::Text(text) => fragments.push(Fragment::Text(text.clone())),
            XmlNode::Element(e) if e.name == INTERVAL_ELEMENT => {
                fragments.push(Fragment::Interval(IntervalFragment {
                    variable: e.required_attribute("in")?.to_string(),
                    lower: e.f64_attribute("lower")?,
                    upper: e.f64_attribute("upper")?,
                    content: fragments_from_xml(e)?,
                }));
            }
            XmlNode::Element(_) => {}
        }
    }
    Ok(fragments)
}

/// Append fragments to `parent` as text and `<Interval>` children
pub fn fragments_to_xml(parent: &mut XmlElement, fragments: &[Fragment]) {
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => parent.push_text(text.as_str()),
            Fragment::Interval(interval) => {
                let mut element =
                    XmlElement::new(INTERVAL_ELEMENT).with_attribute("in", interval.variable.as_str());
                if let Some(lower) = interval.lower {
                    element.set_attribute("lower", format_float(lower));
                }
                if let Some(upper) = interval.upper {
                    element.set_attribute("upper", format_float(upper));
                }
                fragments_to_xml(&mut element, &interval.content);
                parent.push(element);
            }
        }
    }
}

/// Decode the value carried by `element`
pub fn read_value(element: &XmlElement) -> Result<Expr, CodecError> {
    decode(&fragments_from_xml(element)?)
}

/// Encode `value` into `element`
pub fn write_value(element: &mut XmlElement, value: &Expr) -> Result<(), CodecError> {
    let fragments = encode(value)?;
    fragments_to_xml(element, &fragments);
    Ok(())
}
