//! # Symbolic Expressions
//!
//! A small symbolic algebra over temperature (`T`), pressure (`P`) and named
//! functions, covering what the database codec needs from an algebra engine:
//!
//! - **parse**: read the algebraic text form used inside `<Expr>` and
//!   `<Parameter>` elements
//! - **simplify**: bring an expression into a canonical form so that
//!   structurally equivalent inputs compare equal
//! - **compare-equal**: `PartialEq` on simplified trees
//! - **interval decomposition**: piecewise branches carry a typed half-open
//!   temperature [`Interval`] rather than a free-form boolean condition
//!
//! The text produced by `Display` parses back to the identical simplified tree.
//! The natural logarithm is always printed as `ln`.
//!
//! ```rust
//! use calphad_xml::expr::Expr;
//!
//! let g = Expr::parse("-8000 + 120*T - 25*T*ln(T)")?;
//! let again = Expr::parse(&g.to_string())?;
//! assert_eq!(g, again);
//! # Ok::<(), calphad_xml::expr::ExprError>(())
//! ```

use std::fmt;

use serde::Serialize;

pub use error::ExprError;

mod error;
mod parser;


/// Name of the temperature variable
pub const TEMPERATURE: &str = "T";

/// Name of the pressure variable
pub const PRESSURE: &str = "P";

/// Unary functions understood by the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Function {
    /// Natural logarithm (`ln`, also accepted as `log`)
    Ln,
    /// Exponential
    Exp,
}

impl Function {
    /// Name used in the text form
    pub fn name(self) -> &'static str {
        match self {
            Function::Ln => "ln",
            Function::Exp => "exp",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ln" | "log" => Some(Function::Ln),
            "exp" => Some(Function::Exp),
            _ => None,
        }
    }

    fn apply(self, x: f64) -> f64 {
        match self {
            Function::Ln => x.ln(),
            Function::Exp => x.exp(),
        }
    }
}

/// Half-open temperature interval `[lower, upper)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    /// Inclusive lower bound (may be `-inf`)
    pub lower: f64,
    /// Exclusive upper bound (may be `+inf`)
    pub upper: f64,
}

impl Interval {
    /// The interval covering every temperature, i.e. the "always true" condition
    pub const ALWAYS: Interval = Interval {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    /// Create an interval from explicit bounds
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Create an interval from optional bounds, defaulting to `-inf`/`+inf`
    pub fn from_bounds(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self {
            lower: lower.unwrap_or(f64::NEG_INFINITY),
            upper: upper.unwrap_or(f64::INFINITY),
        }
    }

    /// Whether `t` lies inside the interval
    pub fn contains(&self, t: f64) -> bool {
        self.lower <= t && t < self.upper
    }

    /// Whether both bounds are infinite
    pub fn is_unbounded(&self) -> bool {
        self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY
    }

    /// Whether the upper bound is finite
    pub fn has_upper(&self) -> bool {
        self.upper != f64::INFINITY
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", format_float(self.lower), format_float(self.upper))
    }
}

/// One branch of a piecewise expression
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Branch {
    /// Value of the expression on this branch
    pub value: Expr,
    /// Temperatures for which the branch applies
    pub interval: Interval,
}

impl Branch {
    /// Create a branch
    pub fn new(value: Expr, interval: Interval) -> Self {
        Self { value, interval }
    }

    fn is_default(&self) -> bool {
        self.value.is_zero() && self.interval.is_unbounded()
    }
}

/// Symbolic expression tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Numeric constant
    Num(f64),
    /// Named symbol: a state variable or a function reference
    Sym(String),
    /// N-ary sum
    Add(Vec<Expr>),
    /// N-ary product
    Mul(Vec<Expr>),
    /// Base raised to an exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Unary function application
    Func(Function, Box<Expr>),
    /// Interval-conditioned branches; the first branch containing `T` applies
    Piecewise(Vec<Branch>),
}

impl Default for Expr {
    fn default() -> Self {
        Expr::Num(0.0)
    }
}

impl Expr {
    /// The constant zero
    pub fn zero() -> Self {
        Expr::Num(0.0)
    }

    /// Numeric constant
    pub fn num(value: f64) -> Self {
        Expr::Num(value)
    }

    /// Named symbol
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Sym(name.into())
    }

    /// Parse the algebraic text form and simplify the result
    pub fn parse(text: &str) -> Result<Self, ExprError> {
        Ok(parser::parse(text)?.simplify())
    }

    /// Build a piecewise expression from `branches`, appending the implicit
    /// `(0, always)` default branch
    pub fn piecewise(branches: Vec<Branch>) -> Self {
        let mut branches = branches;
        branches.push(Branch::new(Expr::zero(), Interval::ALWAYS));
        Expr::Piecewise(branches).simplify()
    }

    /// Whether this is the constant zero
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Num(v) if *v == 0.0)
    }

    /// Whether any node of the tree is piecewise
    pub fn contains_piecewise(&self) -> bool {
        match self {
            Expr::Num(_) | Expr::Sym(_) => false,
            Expr::Add(items) | Expr::Mul(items) => items.iter().any(Expr::contains_piecewise),
            Expr::Pow(base, exponent) => base.contains_piecewise() || exponent.contains_piecewise(),
            Expr::Func(_, argument) => argument.contains_piecewise(),
            Expr::Piecewise(_) => true,
        }
    }

    /// Branches of a piecewise expression, without the trailing default branch
    pub fn explicit_branches(&self) -> Option<&[Branch]> {
        match self {
            Expr::Piecewise(branches) => match branches.split_last() {
                Some((last, rest)) if last.is_default() => Some(rest),
                _ => Some(branches.as_slice()),
            },
            _ => None,
        }
    }

    /// Canonical form: flattened sums and products with folded constants
    /// (constant term / coefficient first), trivial powers removed and
    /// degenerate piecewise expressions collapsed.
    pub fn simplify(self) -> Expr {
        match self {
            Expr::Num(v) => Expr::Num(v + 0.0),
            Expr::Sym(_) => self,
            Expr::Add(terms) => simplify_sum(terms),
            Expr::Mul(factors) => simplify_product(factors),
            Expr::Pow(base, exponent) => simplify_power(*base, *exponent),
            Expr::Func(function, argument) => Expr::Func(function, Box::new(argument.simplify())),
            Expr::Piecewise(branches) => simplify_piecewise(branches),
        }
    }

    /// Evaluate numerically; `lookup` supplies values for symbols, including `T`
    pub fn evaluate<F>(&self, lookup: &F) -> Result<f64, ExprError>
    where
        F: Fn(&str) -> Option<f64>,
    {
        match self {
            Expr::Num(v) => Ok(*v),
            Expr::Sym(name) => lookup(name).ok_or_else(|| ExprError::UnboundSymbol(name.clone())),
            Expr::Add(terms) => terms.iter().try_fold(0.0, |acc, t| Ok(acc + t.evaluate(lookup)?)),
            Expr::Mul(factors) => factors
                .iter()
                .try_fold(1.0, |acc, t| Ok(acc * t.evaluate(lookup)?)),
            Expr::Pow(base, exponent) => {
                Ok(base.evaluate(lookup)?.powf(exponent.evaluate(lookup)?))
            }
            Expr::Func(function, argument) => Ok(function.apply(argument.evaluate(lookup)?)),
            Expr::Piecewise(branches) => {
                let t = lookup(TEMPERATURE)
                    .ok_or_else(|| ExprError::UnboundSymbol(TEMPERATURE.to_string()))?;
                match branches.iter().find(|b| b.interval.contains(t)) {
                    Some(branch) => branch.value.evaluate(lookup),
                    None => Ok(0.0),
                }
            }
        }
    }

    /// For a term with a negative leading coefficient, the term with the sign flipped
    fn negated(&self) -> Option<Expr> {
        match self {
            Expr::Num(v) if *v < 0.0 => Some(Expr::Num(-v)),
            Expr::Mul(factors) => match factors.split_first() {
                Some((Expr::Num(c), rest)) if *c < 0.0 => {
                    let mut positive = Vec::with_capacity(factors.len());
                    if *c != -1.0 {
                        positive.push(Expr::Num(-c));
                    }
                    positive.extend(rest.iter().cloned());
                    Some(if positive.len() == 1 {
                        positive.remove(0)
                    } else {
                        Expr::Mul(positive)
                    })
                }
                _ => None,
            },
            _ => None,
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::Add(vec![self, rhs]).simplify()
    }
}

impl std::ops::Mul for Expr {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Mul(vec![self, rhs]).simplify()
    }
}

fn simplify_sum(terms: Vec<Expr>) -> Expr {
    let mut constant = 0.0;
    let mut rest = Vec::with_capacity(terms.len());
    for term in terms {
        match term.simplify() {
            Expr::Num(v) => constant += v,
            Expr::Add(inner) => {
                for t in inner {
                    match t {
                        Expr::Num(v) => constant += v,
                        other => rest.push(other),
                    }
                }
            }
            other => rest.push(other),
        }
    }

    let constant = constant + 0.0;
    if constant != 0.0 {
        rest.insert(0, Expr::Num(constant));
    }
    match rest.len() {
        0 => Expr::zero(),
        1 => rest.remove(0),
        _ => Expr::Add(rest),
    }
}

fn simplify_product(factors: Vec<Expr>) -> Expr {
    let mut coefficient = 1.0;
    let mut rest = Vec::with_capacity(factors.len());
    for factor in factors {
        match factor.simplify() {
            Expr::Num(v) => coefficient *= v,
            Expr::Mul(inner) => {
                for f in inner {
                    match f {
                        Expr::Num(v) => coefficient *= v,
                        other => rest.push(other),
                    }
                }
            }
            other => rest.push(other),
        }
    }

    if coefficient == 0.0 {
        return Expr::zero();
    }
    if rest.is_empty() {
        return Expr::Num(coefficient + 0.0);
    }
    if coefficient != 1.0 {
        rest.insert(0, Expr::Num(coefficient));
    }
    if rest.len() == 1 {
        rest.remove(0)
    } else {
        Expr::Mul(rest)
    }
}

fn simplify_power(base: Expr, exponent: Expr) -> Expr {
    let base = base.simplify();
    let exponent = exponent.simplify();
    if let Expr::Num(e) = exponent {
        if e == 0.0 {
            return Expr::Num(1.0);
        }
        if e == 1.0 {
            return base;
        }
        if let Expr::Num(b) = base {
            return Expr::Num(b.powf(e) + 0.0);
        }
    }
    Expr::Pow(Box::new(base), Box::new(exponent))
}

fn simplify_piecewise(branches: Vec<Branch>) -> Expr {
    let mut branches: Vec<Branch> = branches
        .into_iter()
        .map(|b| Branch::new(b.value.simplify(), b.interval))
        .collect();

    if branches.iter().all(|b| b.value.is_zero()) {
        return Expr::zero();
    }
    // Only the first branch is reachable when it covers every temperature
    if branches[0].interval.is_unbounded() {
        return branches.swap_remove(0).value;
    }
    Expr::Piecewise(branches)
}

/// Shortest representation that parses back to the same `f64`
pub fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

fn is_atom(expr: &Expr) -> bool {
    match expr {
        Expr::Num(v) => *v >= 0.0,
        Expr::Sym(_) | Expr::Func(..) => true,
        _ => false,
    }
}

fn fmt_parenthesized(expr: &Expr, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({})", expr)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(v) => f.write_str(&format_float(*v)),
            Expr::Sym(name) => f.write_str(name),
            Expr::Add(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i == 0 {
                        write!(f, "{}", term)?;
                        continue;
                    }
                    match term.negated() {
                        Some(positive @ Expr::Add(_)) => {
                            f.write_str(" - ")?;
                            fmt_parenthesized(&positive, f)?;
                        }
                        Some(positive) => write!(f, " - {}", positive)?,
                        None => write!(f, " + {}", term)?,
                    }
                }
                Ok(())
            }
            Expr::Mul(factors) => {
                let mut first = true;
                for (i, factor) in factors.iter().enumerate() {
                    if i == 0 && factors.len() > 1 && matches!(factor, Expr::Num(v) if *v == -1.0) {
                        f.write_str("-")?;
                        continue;
                    }
                    if !first {
                        f.write_str("*")?;
                    }
                    match factor {
                        Expr::Add(_) | Expr::Mul(_) => fmt_parenthesized(factor, f)?,
                        Expr::Num(v) if *v < 0.0 && i > 0 => fmt_parenthesized(factor, f)?,
                        _ => write!(f, "{}", factor)?,
                    }
                    first = false;
                }
                Ok(())
            }
            Expr::Pow(base, exponent) => {
                if is_atom(base) {
                    write!(f, "{}", base)?;
                } else {
                    fmt_parenthesized(base, f)?;
                }
                f.write_str("**")?;
                if is_atom(exponent) {
                    write!(f, "{}", exponent)
                } else {
                    fmt_parenthesized(exponent, f)
                }
            }
            Expr::Func(function, argument) => write!(f, "{}({})", function.name(), argument),
            Expr::Piecewise(branches) => {
                f.write_str("Piecewise(")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({}, {})", branch.value, branch.interval)?;
                }
                f.write_str(")")
            }
        }
    }
}
