//! Property-based tests for the expression text form and the interval codec

use calphad_xml::codec::interval::{decode, encode, Fragment, IntervalFragment};
use calphad_xml::expr::Expr;
use proptest::prelude::*;

/// A single polynomial or logarithmic term in temperature
fn term() -> impl Strategy<Value = String> {
    let coefficient = (-100_000i32..100_000, 0u32..4).prop_map(|(mantissa, scale)| {
        f64::from(mantissa) / 10f64.powi(scale as i32)
    });
    (coefficient, 0usize..6).prop_map(|(c, shape)| match shape {
        0 => format!("{}", c),
        1 => format!("{}*T", c),
        2 => format!("{}*T*ln(T)", c),
        3 => format!("{}*T**2", c),
        4 => format!("{}*T**(-1)", c),
        _ => format!("{}*GHSERAL", c),
    })
}

fn polynomial() -> impl Strategy<Value = String> {
    prop::collection::vec(term(), 1..6).prop_map(|terms| terms.join(" + "))
}

/// Disjoint ascending intervals with a value each
fn branches() -> impl Strategy<Value = Vec<(f64, Option<f64>, String)>> {
    prop::collection::vec((1u32..500, polynomial()), 1..5).prop_map(|steps| {
        let count = steps.len();
        let mut lower = 298.15;
        steps
            .into_iter()
            .enumerate()
            .map(|(i, (width, value))| {
                let upper = if i + 1 == count {
                    None
                } else {
                    Some(lower + f64::from(width))
                };
                let branch = (lower, upper, value);
                if let Some(u) = upper {
                    lower = u;
                }
                branch
            })
            .collect()
    })
}

proptest! {
    /// Printing a parsed expression and parsing it again gives the same tree
    #[test]
    fn test_display_parse_round_trip(text in polynomial()) {
        let parsed = Expr::parse(&text).unwrap();
        let printed = parsed.to_string();
        prop_assert_eq!(Expr::parse(&printed).unwrap(), parsed);
    }

    /// Decode(Encode(e)) == e for every decoded piecewise expression
    #[test]
    fn test_interval_round_trip(literal in prop::option::of(polynomial()), pieces in branches()) {
        let mut fragments = Vec::new();
        if let Some(text) = literal {
            fragments.push(Fragment::Text(text));
        }
        for (lower, upper, value) in pieces {
            fragments.push(Fragment::Interval(IntervalFragment {
                variable: "T".to_string(),
                lower: Some(lower),
                upper,
                content: vec![Fragment::Text(value)],
            }));
        }

        let value = decode(&fragments).unwrap();
        let encoded = encode(&value).unwrap();
        prop_assert_eq!(decode(&encoded).unwrap(), value.clone());

        // encoding is stable once canonical
        prop_assert_eq!(encode(&decode(&encoded).unwrap()).unwrap(), encoded);
    }

    /// Decoded values agree with the branch they were declared on
    #[test]
    fn test_interval_evaluation(pieces in branches(), offset in 0.0f64..0.99) {
        let fragments: Vec<Fragment> = pieces
            .iter()
            .map(|(lower, upper, value)| Fragment::Interval(IntervalFragment {
                variable: "T".to_string(),
                lower: Some(*lower),
                upper: *upper,
                content: vec![Fragment::Text(value.clone())],
            }))
            .collect();
        let value = decode(&fragments).unwrap();

        let env = |t: f64| move |name: &str| match name {
            "T" => Some(t),
            "GHSERAL" => Some(-1000.0),
            _ => None,
        };
        for (lower, upper, text) in &pieces {
            let t = match upper {
                Some(u) => lower + (u - lower) * offset,
                None => lower + 1000.0 * offset,
            };
            let expected = Expr::parse(text).unwrap().evaluate(&env(t)).unwrap();
            let actual = value.evaluate(&env(t)).unwrap();
            prop_assert!((expected - actual).abs() <= 1e-9 * expected.abs().max(1.0));
        }
        prop_assert_eq!(value.evaluate(&env(100.0)).unwrap(), 0.0);
    }
}
