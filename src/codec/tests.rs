use std::collections::{BTreeMap, BTreeSet};

use super::interval::{self, Fragment, IntervalFragment};
use super::*;
use crate::database::{
    AdditionalMixing, Database, Element, HintValue, ModelFamily, ModelHints, MqmqaChemicalGroups,
    MqmqaHint, MqmxPayload, MqmzPayload, Parameter, ParameterKind, Phase, QktPayload, Species,
    HINT_KEYS,
};
use crate::expr::{Branch, Expr, Interval};
use crate::xml::{read_tree, XmlElement};

fn xml(text: &str) -> XmlElement {
    read_tree(text.as_bytes()).unwrap()
}

fn at(t: f64) -> impl Fn(&str) -> Option<f64> {
    move |name: &str| (name == "T").then_some(t)
}

fn interval_fragment(lower: Option<f64>, upper: Option<f64>, text: &str) -> Fragment {
    Fragment::Interval(IntervalFragment {
        variable: "T".to_string(),
        lower,
        upper,
        content: vec![Fragment::Text(text.to_string())],
    })
}

fn sample_db() -> Database {
    let mut db = Database::new();
    db.add_element(Element::new("A", 10.0, "FCC_A1", 0.0, 0.0));
    db.add_element(Element::new("B", 20.0, "FCC_A1", 0.0, 0.0));
    db.add_element(Element::new("O", 16.0, "GAS", 0.0, 0.0));
    let mut fe = BTreeMap::new();
    fe.insert("FE".to_string(), 1.0);
    db.add_species(Species::new("FE2", fe, 2.0));
    db
}

fn names(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// Interval fragments
// =============================================================================

#[test]
fn test_decode_literal_only() {
    let value = interval::decode(&[Fragment::Text(" 10000 ".to_string())]).unwrap();
    assert_eq!(value, Expr::num(10000.0));
    assert_eq!(interval::decode(&[]).unwrap(), Expr::zero());
}

#[test]
fn test_decode_interval_has_zero_default() {
    let value = interval::decode(&[interval_fragment(Some(1.0), Some(6000.0), "10000")]).unwrap();
    assert_eq!(value.evaluate(&at(300.0)).unwrap(), 10000.0);
    assert_eq!(value.evaluate(&at(1.0)).unwrap(), 10000.0);
    assert_eq!(value.evaluate(&at(6000.0)).unwrap(), 0.0);
    assert_eq!(value.evaluate(&at(0.5)).unwrap(), 0.0);

    let branches = value.explicit_branches().unwrap();
    assert_eq!(branches.len(), 1);
    assert_eq!(branches[0].interval, Interval::new(1.0, 6000.0));
}

#[test]
fn test_decode_sums_literals_and_intervals() {
    let value = interval::decode(&[
        Fragment::Text("5".to_string()),
        interval_fragment(Some(300.0), Some(1000.0), "10*T"),
        interval_fragment(Some(1000.0), None, "1"),
    ])
    .unwrap();
    assert_eq!(value.evaluate(&at(500.0)).unwrap(), 5005.0);
    assert_eq!(value.evaluate(&at(2000.0)).unwrap(), 6.0);
    assert_eq!(value.evaluate(&at(100.0)).unwrap(), 5.0);
}

#[test]
fn test_decode_rejects_other_variables() {
    let fragment = Fragment::Interval(IntervalFragment {
        variable: "P".to_string(),
        lower: Some(0.0),
        upper: None,
        content: vec![Fragment::Text("1".to_string())],
    });
    assert!(matches!(
        interval::decode(&[fragment]),
        Err(CodecError::UnsupportedIntervalVariable(v)) if v == "P"
    ));
}

#[test]
fn test_decode_reports_bad_text() {
    assert!(matches!(
        interval::decode(&[Fragment::Text("1 +* 2".to_string())]),
        Err(CodecError::Expr { .. })
    ));
}

#[test]
fn test_encode_plain_expression() {
    let value = Expr::parse("-8000 + 120*T - 20*T*LN(T)").unwrap();
    let fragments = interval::encode(&value).unwrap();
    assert_eq!(fragments.len(), 1);
    match &fragments[0] {
        Fragment::Text(text) => {
            assert!(text.contains("ln("));
            assert!(!text.contains("log"));
        }
        other => panic!("unexpected fragment {:?}", other),
    }
    assert_eq!(interval::decode(&fragments).unwrap(), value);
}

#[test]
fn test_encode_piecewise_strips_default() {
    let value = interval::decode(&[
        Fragment::Text("5".to_string()),
        interval_fragment(Some(300.0), Some(1000.0), "10000"),
        interval_fragment(None, Some(300.0), "2*T"),
        interval_fragment(Some(1000.0), None, "0"),
    ])
    .unwrap();

    let fragments = interval::encode(&value).unwrap();
    assert_eq!(
        fragments,
        vec![
            Fragment::Text("5.0".to_string()),
            interval_fragment(Some(300.0), Some(1000.0), "10000.0"),
            interval_fragment(Some(f64::NEG_INFINITY), Some(300.0), "2.0*T"),
            Fragment::Interval(IntervalFragment {
                variable: "T".to_string(),
                lower: Some(1000.0),
                upper: None,
                content: vec![],
            }),
        ]
    );
    assert_eq!(interval::decode(&fragments).unwrap(), value);
}

#[test]
fn test_encode_keeps_unbounded_branch_position() {
    let value = interval::decode(&[
        interval_fragment(Some(300.0), None, "6"),
        interval_fragment(None, None, "5"),
    ])
    .unwrap();

    let fragments = interval::encode(&value).unwrap();
    assert_eq!(
        fragments,
        vec![
            interval_fragment(Some(300.0), None, "6.0"),
            interval_fragment(Some(f64::NEG_INFINITY), None, "5.0"),
        ]
    );

    let reread = interval::decode(&fragments).unwrap();
    assert_eq!(reread, value);
    assert_eq!(reread.evaluate(&at(400.0)).unwrap(), 6.0);
    assert_eq!(reread.evaluate(&at(100.0)).unwrap(), 5.0);
}

#[test]
fn test_encode_rejects_unrepresentable() {
    let piecewise = Expr::piecewise(vec![Branch::new(Expr::num(1.0), Interval::new(0.0, 10.0))]);

    let scaled = Expr::Mul(vec![Expr::num(2.0), piecewise.clone()]);
    assert!(matches!(
        interval::encode(&scaled),
        Err(CodecError::UnrepresentableExpression(_))
    ));

    let doubled = Expr::Add(vec![piecewise.clone(), piecewise]);
    assert!(matches!(
        interval::encode(&doubled),
        Err(CodecError::UnrepresentableExpression(_))
    ));
}

#[test]
fn test_fragments_xml_round_trip() {
    let element = xml(
        r#"<Expr id="X">1.5 <Interval in="T" lower="298.15" upper="6000.0">GHSERAL + 3</Interval></Expr>"#,
    );
    let fragments = interval::fragments_from_xml(&element).unwrap();
    assert_eq!(
        fragments,
        vec![
            Fragment::Text("1.5".to_string()),
            interval_fragment(Some(298.15), Some(6000.0), "GHSERAL + 3"),
        ]
    );

    let mut rebuilt = XmlElement::new("Expr");
    interval::fragments_to_xml(&mut rebuilt, &fragments);
    assert_eq!(interval::fragments_from_xml(&rebuilt).unwrap(), fragments);

    let interval_node = rebuilt.children_named("Interval").next().unwrap();
    assert_eq!(interval_node.attribute("lower"), Some("298.15"));
    assert_eq!(interval_node.attribute("upper"), Some("6000.0"));
}

#[test]
fn test_interval_requires_variable() {
    let element = xml(r#"<Expr id="X"><Interval lower="1">2</Interval></Expr>"#);
    assert!(matches!(
        interval::read_value(&element),
        Err(CodecError::Xml(_))
    ));
}

// =============================================================================
// Model hints
// =============================================================================

const CEF_MODEL: &str = r#"
<Model type="CEF">
  <ConstituentArray>
    <Site id="0" ratio="3.0"><Constituent refid="B"/><Constituent refid="A"/></Site>
    <Site id="1" ratio="1.0"><Constituent refid="A"/></Site>
  </ConstituentArray>
  <MagneticOrdering type="IHJ" structure_factor="0.28" afm_factor="-3.0"/>
  <AtomicOrdering ordered_part="L12_FCC" disordered_part="FCC_A1"/>
  <Symmetry type="FCC_4SL"/>
  <ChemicalGroups><Constituent refid="A" groupid="1"/><Constituent refid="B" groupid="2"/></ChemicalGroups>
  <Liquid/>
</Model>"#;

#[test]
fn test_decode_cef_hints() {
    let db = sample_db();
    let model = xml(CEF_MODEL);
    let hints = model_hints::decode(&model, ModelFamily::Cef, "L12_FCC", &db).unwrap();

    assert_eq!(
        hints.get(HINT_KEYS::MAGNETIC_AFM_FACTOR),
        Some(&HintValue::Float(-3.0))
    );
    assert_eq!(
        hints.get(HINT_KEYS::MAGNETIC_STRUCTURE_FACTOR),
        Some(&HintValue::Float(0.28))
    );
    assert_eq!(
        hints.get(HINT_KEYS::ORDERED_PHASE).and_then(HintValue::as_str),
        Some("L12_FCC")
    );
    assert_eq!(hints.get(HINT_KEYS::SYMMETRY_FCC_4SL), Some(&HintValue::Bool(true)));
    assert_eq!(hints.get(HINT_KEYS::LIQUID), Some(&HintValue::Bool(true)));
    assert!(!hints.contains(HINT_KEYS::GAS));

    let mut groups = BTreeMap::new();
    groups.insert("A".to_string(), 1);
    groups.insert("B".to_string(), 2);
    assert_eq!(
        hints.get(HINT_KEYS::CHEMICAL_GROUPS),
        Some(&HintValue::ChemicalGroups(groups))
    );
    assert_eq!(hints.len(), 7);

    let (ratios, constituents) = model_hints::decode_sublattices(&model, ModelFamily::Cef).unwrap();
    assert_eq!(ratios, vec![3.0, 1.0]);
    assert_eq!(constituents, vec![names(&["A", "B"]), names(&["A"])]);
}

#[test]
fn test_decode_rejects_both_symmetries() {
    let db = sample_db();
    let model = xml(&CEF_MODEL.replace(
        r#"<Symmetry type="FCC_4SL"/>"#,
        r#"<Symmetry type="FCC_4SL"/><Symmetry type="BCC_4SL"/>"#,
    ));
    assert!(matches!(
        model_hints::decode(&model, ModelFamily::Cef, "X", &db),
        Err(CodecError::MultipleSymmetryOptions(p)) if p == "X"
    ));
}

#[test]
fn test_decode_checks_references() {
    let db = sample_db();

    let model = xml(&CEF_MODEL.replace(r#"type="IHJ""#, r#"type="XYZ""#));
    assert!(matches!(
        model_hints::decode(&model, ModelFamily::Cef, "X", &db),
        Err(CodecError::UnknownMagneticOrdering(m)) if m == "XYZ"
    ));

    let model = xml(&CEF_MODEL.replace(r#"refid="B" groupid="2""#, r#"refid="ZZ" groupid="2""#));
    assert!(matches!(
        model_hints::decode(&model, ModelFamily::Cef, "X", &db),
        Err(CodecError::UnknownSpecies(s)) if s == "ZZ"
    ));
}

const MQMQA_MODEL: &str = r#"
<Model type="MQMQA" version="SUBQ">
  <ConstituentArray>
    <Site id="0"><Constituent refid="FE2"/></Site>
    <Site id="1"><Constituent refid="O"/></Site>
  </ConstituentArray>
  <ChemicalGroups>
    <Cations><Constituent refid="FE2" groupid="1"/></Cations>
    <Anions><Constituent refid="O" groupid="1"/></Anions>
  </ChemicalGroups>
</Model>"#;

#[test]
fn test_decode_mqmqa_hint() {
    let db = sample_db();
    let model = xml(MQMQA_MODEL);
    let hints = model_hints::decode(&model, ModelFamily::Mqmqa, "SLAG", &db).unwrap();

    let mut expected = MqmqaHint {
        version: "SUBQ".to_string(),
        chemical_groups: MqmqaChemicalGroups::default(),
    };
    expected.chemical_groups.cations.insert("FE2".to_string(), 1);
    expected.chemical_groups.anions.insert("O".to_string(), 1);
    assert_eq!(hints.get(HINT_KEYS::MQMQA), Some(&HintValue::Mqmqa(expected)));
    assert_eq!(hints.len(), 1);

    let (ratios, constituents) =
        model_hints::decode_sublattices(&model, ModelFamily::Mqmqa).unwrap();
    assert_eq!(ratios, vec![1.0]);
    assert_eq!(constituents.len(), 2);
}

#[test]
fn test_decode_mqmqa_requires_cations_and_anions() {
    let db = sample_db();

    let missing = xml(&MQMQA_MODEL.replace(
        r#"<Anions><Constituent refid="O" groupid="1"/></Anions>"#,
        "",
    ));
    assert!(matches!(
        model_hints::decode(&missing, ModelFamily::Mqmqa, "SLAG", &db),
        Err(CodecError::MalformedStructure { .. })
    ));

    let doubled = xml(&MQMQA_MODEL.replace("</Cations>", "</Cations><Cations/>"));
    assert!(matches!(
        model_hints::decode(&doubled, ModelFamily::Mqmqa, "SLAG", &db),
        Err(CodecError::MalformedStructure { .. })
    ));

    let ungrouped = xml(
        r#"<Model type="MQMQA" version="SUBQ">
  <ConstituentArray><Site id="0"><Constituent refid="FE2"/></Site></ConstituentArray>
</Model>"#,
    );
    assert!(matches!(
        model_hints::decode(&ungrouped, ModelFamily::Mqmqa, "SLAG", &db),
        Err(CodecError::MalformedStructure { .. })
    ));
}

#[test]
fn test_encode_hints_round_trip() {
    let db = sample_db();
    let model = xml(CEF_MODEL);
    let hints = model_hints::decode(&model, ModelFamily::Cef, "L12_FCC", &db).unwrap();
    let (ratios, constituents) = model_hints::decode_sublattices(&model, ModelFamily::Cef).unwrap();
    let phase = Phase::new("L12_FCC", ModelFamily::Cef, ratios, constituents, hints.clone());

    let encoded = model_hints::encode(&phase).unwrap();
    assert_eq!(encoded.attribute("type"), Some("CEF"));
    assert_eq!(
        model_hints::decode(&encoded, ModelFamily::Cef, "L12_FCC", &db).unwrap(),
        hints
    );
    assert_eq!(
        model_hints::decode_sublattices(&encoded, ModelFamily::Cef).unwrap(),
        (phase.site_ratios.clone(), phase.constituents.clone())
    );

    let model = xml(MQMQA_MODEL);
    let hints = model_hints::decode(&model, ModelFamily::Mqmqa, "SLAG", &db).unwrap();
    let phase = Phase::new(
        "SLAG",
        ModelFamily::Mqmqa,
        vec![1.0],
        vec![names(&["FE2"]), names(&["O"])],
        hints.clone(),
    );
    let encoded = model_hints::encode(&phase).unwrap();
    assert_eq!(encoded.attribute("version"), Some("SUBQ"));
    assert_eq!(
        model_hints::decode(&encoded, ModelFamily::Mqmqa, "SLAG", &db).unwrap(),
        hints
    );
}

#[test]
fn test_encode_bcc_symmetry() {
    let hints = ModelHints::new().with(HINT_KEYS::SYMMETRY_BCC_4SL, HintValue::Bool(true));
    let phase = Phase::new("BCC_4SL", ModelFamily::Cef, vec![1.0], vec![names(&["A"])], hints);
    let encoded = model_hints::encode(&phase).unwrap();
    let symmetry = encoded.children_named("Symmetry").next().unwrap();
    assert_eq!(symmetry.attribute("type"), Some("BCC_4SL"));
}

#[test]
fn test_encode_completeness_check() {
    let base = |hints: ModelHints| {
        Phase::new("P", ModelFamily::Cef, vec![1.0], vec![names(&["A"])], hints)
    };

    let unknown = base(ModelHints::new().with("bogus_hint", HintValue::Bool(true)));
    match model_hints::encode(&unknown) {
        Err(CodecError::UnsupportedModelHint { phase, keys }) => {
            assert_eq!(phase, "P");
            assert_eq!(keys, vec!["bogus_hint".to_string()]);
        }
        other => panic!("unexpected result {:?}", other),
    }

    // a false flag has no XML representation
    let unset = base(ModelHints::new().with(HINT_KEYS::GAS, HintValue::Bool(false)));
    assert!(matches!(
        model_hints::encode(&unset),
        Err(CodecError::UnsupportedModelHint { .. })
    ));

    // half of the magnetic pair
    let half = base(ModelHints::new().with(HINT_KEYS::MAGNETIC_AFM_FACTOR, HintValue::Float(-1.0)));
    assert!(matches!(
        model_hints::encode(&half),
        Err(CodecError::UnsupportedModelHint { .. })
    ));

    let both = base(
        ModelHints::new()
            .with(HINT_KEYS::SYMMETRY_FCC_4SL, HintValue::Bool(true))
            .with(HINT_KEYS::SYMMETRY_BCC_4SL, HintValue::Bool(true)),
    );
    assert!(matches!(
        model_hints::encode(&both),
        Err(CodecError::MultipleSymmetryOptions(_))
    ));
}

#[test]
fn test_encode_mqmqa_requires_descriptor() {
    let phase = Phase::new(
        "SLAG",
        ModelFamily::Mqmqa,
        vec![1.0],
        vec![names(&["FE2"])],
        ModelHints::new(),
    );
    assert!(matches!(
        model_hints::encode(&phase),
        Err(CodecError::MissingRequiredField { .. })
    ));
}

// =============================================================================
// Parameters
// =============================================================================

#[test]
fn test_decode_cef_parameter_sorts_sublattices() {
    let db = sample_db();
    let element = xml(
        r#"<Parameter type="L">
             <ConstituentArray><Site id="0"><Constituent refid="B"/><Constituent refid="A"/></Site></ConstituentArray>
             -8000 + 2*T
           </Parameter>"#,
    );
    let parameter = parameter::decode(&element, "LIQUID", ModelFamily::Cef, &db).unwrap();

    assert_eq!(parameter.kind, ParameterKind::Generic("L".to_string()));
    assert_eq!(parameter.order, Some(0));
    assert_eq!(parameter.constituent_array, vec![vec!["A".to_string(), "B".to_string()]]);
    assert_eq!(parameter.value, Some(Expr::parse("-8000 + 2*T").unwrap()));
    assert_eq!(parameter.diffusing_species, None);
}

#[test]
fn test_decode_qkt_preserves_order() {
    let db = sample_db();
    let element = xml(
        r#"<Parameter type="QKT">
             <Order>2</Order>
             <ConstituentArray><Site id="0"><Constituent refid="B"/><Constituent refid="A"/></Site></ConstituentArray>
             <Exponents>1.0 0.0</Exponents>
             <Interval in="T" lower="298.15">-1000</Interval>
           </Parameter>"#,
    );
    let parameter = parameter::decode(&element, "LIQUID", ModelFamily::Cef, &db).unwrap();

    assert_eq!(parameter.order, None);
    assert_eq!(parameter.constituent_array, vec![vec!["B".to_string(), "A".to_string()]]);
    assert_eq!(
        parameter.kind,
        ParameterKind::Qkt(QktPayload { exponents: vec![1.0, 0.0] })
    );
    assert!(parameter.value.unwrap().explicit_branches().is_some());
}

#[test]
fn test_decode_without_value() {
    let db = sample_db();
    let element = xml(
        r#"<Parameter type="G"><Order>1</Order><ConstituentArray><Site><Constituent refid="A"/></Site></ConstituentArray></Parameter>"#,
    );
    let parameter = parameter::decode(&element, "FCC_A1", ModelFamily::Cef, &db).unwrap();
    assert_eq!(parameter.order, Some(1));
    assert_eq!(parameter.value, None);
}

#[test]
fn test_decode_mqmq_payloads() {
    let db = sample_db();

    let mqmz = xml(
        r#"<Parameter type="MQMZ">
             <ConstituentArray><Site><Constituent refid="FE2"/></Site><Site><Constituent refid="O"/></Site></ConstituentArray>
             <Coordinations>6.0 6.0 3.0 3.0</Coordinations>
             123
           </Parameter>"#,
    );
    let parameter = parameter::decode(&mqmz, "SLAG", ModelFamily::Mqmqa, &db).unwrap();
    assert_eq!(parameter.value, None);
    assert_eq!(parameter.order, None);
    assert_eq!(
        parameter.kind,
        ParameterKind::Mqmz(MqmzPayload { coordinations: vec![6.0, 6.0, 3.0, 3.0] })
    );

    let mqmx = xml(
        r#"<Parameter type="MQMX">
             <ConstituentArray><Site><Constituent refid="FE2"/></Site><Site><Constituent refid="O"/></Site></ConstituentArray>
             <MixingCode type="G"/>
             <Exponents>1 0 0 0</Exponents>
             <AdditionalMixingConstituent refid="FE2"/>
             <AdditionalMixingExponent>2</AdditionalMixingExponent>
             -5000
           </Parameter>"#,
    );
    let parameter = parameter::decode(&mqmx, "SLAG", ModelFamily::Mqmqa, &db).unwrap();
    assert_eq!(
        parameter.kind,
        ParameterKind::Mqmx(MqmxPayload {
            mixing_code: "G".to_string(),
            exponents: vec![1.0, 0.0, 0.0, 0.0],
            additional_mixing: Some(AdditionalMixing {
                constituent: "FE2".to_string(),
                exponent: 2.0,
            }),
        })
    );
    assert_eq!(parameter.value, Some(Expr::num(-5000.0)));

    let unknown = xml(&mqmx_text_with_constituent("NOPE"));
    assert!(matches!(
        parameter::decode(&unknown, "SLAG", ModelFamily::Mqmqa, &db),
        Err(CodecError::UnknownSpecies(s)) if s == "NOPE"
    ));
}

fn mqmx_text_with_constituent(refid: &str) -> String {
    format!(
        r#"<Parameter type="MQMX">
             <ConstituentArray><Site><Constituent refid="FE2"/></Site></ConstituentArray>
             <MixingCode type="G"/>
             <Exponents>1 0</Exponents>
             <AdditionalMixingConstituent refid="{}"/>
             <AdditionalMixingExponent>2</AdditionalMixingExponent>
           </Parameter>"#,
        refid
    )
}

#[test]
fn test_decode_missing_payload() {
    let db = sample_db();
    let element = xml(
        r#"<Parameter type="MQMG">
             <ConstituentArray><Site><Constituent refid="FE2"/></Site></ConstituentArray>
             <StoichiometricFactors>1 1 1 1</StoichiometricFactors>
           </Parameter>"#,
    );
    assert!(matches!(
        parameter::decode(&element, "SLAG", ModelFamily::Mqmqa, &db),
        Err(CodecError::MissingRequiredField { field, .. }) if field == "Zeta"
    ));
}

#[test]
fn test_encode_parameter_round_trip() {
    let db = sample_db();
    let original = Parameter::new(
        "FCC_A1",
        ParameterKind::Generic("G".to_string()),
        vec![vec!["A".to_string(), "B".to_string()], vec!["A".to_string()]],
    )
    .with_order(1)
    .with_diffusing_species("A")
    .with_value(
        interval::decode(&[interval_fragment(Some(298.15), Some(3000.0), "-1000 + T*ln(T)")])
            .unwrap(),
    );

    let element = parameter::encode(&original, ModelFamily::Cef).unwrap();
    assert_eq!(element.attribute("type"), Some("G"));
    assert_eq!(
        parameter::decode(&element, "FCC_A1", ModelFamily::Cef, &db).unwrap(),
        original
    );
}

#[test]
fn test_encode_rejects_mqmz_value() {
    let parameter = Parameter::new(
        "SLAG",
        ParameterKind::Mqmz(MqmzPayload { coordinations: vec![6.0, 6.0, 3.0, 3.0] }),
        vec![vec!["FE2".to_string()]],
    )
    .with_value(Expr::num(1.0));
    assert!(matches!(
        parameter::encode(&parameter, ModelFamily::Mqmqa),
        Err(CodecError::ValueExpressionConflict { .. })
    ));
}

#[test]
fn test_encode_rejects_empty_payload_lists() {
    let parameter = Parameter::new(
        "LIQUID",
        ParameterKind::Qkt(QktPayload { exponents: vec![] }),
        vec![vec!["A".to_string()]],
    );
    assert!(matches!(
        parameter::encode(&parameter, ModelFamily::Cef),
        Err(CodecError::MissingRequiredField { field, .. }) if field == "Exponents"
    ));
}

#[test]
fn test_encode_rejects_payload_type_without_payload() {
    for (name, field) in [
        ("MQMG", "Zeta"),
        ("MQMZ", "Coordinations"),
        ("MQMX", "MixingCode"),
        ("QKT", "Exponents"),
    ] {
        let parameter = Parameter::new(
            "SLAG",
            ParameterKind::Generic(name.to_string()),
            vec![vec!["FE2".to_string()]],
        );
        match parameter::encode(&parameter, ModelFamily::Mqmqa) {
            Err(CodecError::MissingRequiredField { field: missing, .. }) => {
                assert_eq!(missing, field)
            }
            other => panic!("unexpected result for {}: {:?}", name, other),
        }
    }
}

#[test]
fn test_encode_order_follows_family() {
    let db = sample_db();

    let unordered = Parameter::new(
        "FCC_A1",
        ParameterKind::Generic("G".to_string()),
        vec![vec!["A".to_string()]],
    );
    let element = parameter::encode(&unordered, ModelFamily::Cef).unwrap();
    assert_eq!(element.children_named("Order").next().unwrap().text(), "0");
    assert_eq!(
        parameter::decode(&element, "FCC_A1", ModelFamily::Cef, &db).unwrap().order,
        Some(0)
    );

    let quadruplet = Parameter::new(
        "SLAG",
        ParameterKind::Generic("MQMQ".to_string()),
        vec![vec!["FE2".to_string()]],
    )
    .with_order(3);
    let element = parameter::encode(&quadruplet, ModelFamily::Mqmqa).unwrap();
    assert!(element.children_named("Order").next().is_none());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_defaults() {
    assert!(ReaderConfig::default().validate_schema);
    let config = WriterConfig::default();
    assert!(config.require_valid);
    assert_eq!(config.indent, 2);
    assert!(config.write_metadata);
    assert!(!WriterConfig::lenient().require_valid);
    assert_eq!(WriterConfig::compact().indent, 0);
}
