//! Conversion between phase model metadata and the `<Model>` subtree

use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::database::{
    Database, HintValue, ModelFamily, ModelHints, MqmqaChemicalGroups, MqmqaHint, Phase,
    HINT_KEYS, PHASE_OPTIONS,
};
use crate::expr::format_float;
use crate::xml::XmlElement;

use super::{required_child, single_child, CodecError};

/// Magnetic ordering model supported by the format
pub const IHJ: &str = "IHJ";

const FCC_4SL: &str = "FCC_4SL";
const BCC_4SL: &str = "BCC_4SL";

/// Sublattice structure of a phase: site ratios and eligible species
pub type Sublattices = (Vec<f64>, Vec<BTreeSet<String>>);

/// Decode the hints carried by a `<Model>` element
///
/// `db` is consulted to resolve species named in chemical groups.
pub fn decode(
    model: &XmlElement,
    family: ModelFamily,
    phase_name: &str,
    db: &Database,
) -> Result<ModelHints, CodecError> {
    let mut hints = ModelHints::new();

    for ordering in model.children_named("MagneticOrdering") {
        let kind = ordering.required_attribute("type")?;
        if kind != IHJ {
            return Err(CodecError::UnknownMagneticOrdering(kind.to_string()));
        }
        hints.set(
            HINT_KEYS::MAGNETIC_AFM_FACTOR,
            HintValue::Float(ordering.required_f64_attribute("afm_factor")?),
        );
        hints.set(
            HINT_KEYS::MAGNETIC_STRUCTURE_FACTOR,
            HintValue::Float(ordering.required_f64_attribute("structure_factor")?),
        );
    }

    for ordering in model.children_named("AtomicOrdering") {
        hints.set(
            HINT_KEYS::ORDERED_PHASE,
            HintValue::Text(ordering.required_attribute("ordered_part")?.to_string()),
        );
        hints.set(
            HINT_KEYS::DISORDERED_PHASE,
            HintValue::Text(ordering.required_attribute("disordered_part")?.to_string()),
        );
    }

    for (key, element) in PHASE_OPTIONS {
        if model.children_named(element).next().is_some() {
            hints.set(key, HintValue::Bool(true));
        }
    }

    for symmetry in model.children_named("Symmetry") {
        let key = match symmetry.required_attribute("type")? {
            FCC_4SL => HINT_KEYS::SYMMETRY_FCC_4SL,
            BCC_4SL => HINT_KEYS::SYMMETRY_BCC_4SL,
            other => {
                return Err(CodecError::malformed(
                    "Symmetry",
                    format!("unknown symmetry type '{}'", other),
                ))
            }
        };
        hints.set(key, HintValue::Bool(true));
    }
    if hints.contains(HINT_KEYS::SYMMETRY_FCC_4SL) && hints.contains(HINT_KEYS::SYMMETRY_BCC_4SL) {
        return Err(CodecError::MultipleSymmetryOptions(phase_name.to_string()));
    }

    match family {
        ModelFamily::Mqmqa => {
            let version = model.required_attribute("version")?.to_string();
            let groups = required_child(model, "ChemicalGroups")?;
            let chemical_groups = MqmqaChemicalGroups {
                cations: read_groups(required_child(groups, "Cations")?, db)?,
                anions: read_groups(required_child(groups, "Anions")?, db)?,
            };
            hints.set(
                HINT_KEYS::MQMQA,
                HintValue::Mqmqa(MqmqaHint {
                    version,
                    chemical_groups,
                }),
            );
        }
        ModelFamily::Cef => {
            if let Some(groups) = single_child(model, "ChemicalGroups")? {
                hints.set(
                    HINT_KEYS::CHEMICAL_GROUPS,
                    HintValue::ChemicalGroups(read_groups(groups, db)?),
                );
            }
        }
    }

    debug!("Phase {} has {} model hints", phase_name, hints.len());
    Ok(hints)
}

fn read_groups(parent: &XmlElement, db: &Database) -> Result<BTreeMap<String, i64>, CodecError> {
    let mut groups = BTreeMap::new();
    for constituent in parent.children_named("Constituent") {
        let refid = constituent.required_attribute("refid")?;
        if db.species_named(refid).is_none() {
            return Err(CodecError::UnknownSpecies(refid.to_string()));
        }
        groups.insert(
            refid.to_string(),
            constituent.required_i64_attribute("groupid")?,
        );
    }
    Ok(groups)
}

fn write_groups(name: &str, groups: &BTreeMap<String, i64>) -> XmlElement {
    let mut element = XmlElement::new(name);
    for (species, group) in groups {
        element.push(
            XmlElement::new("Constituent")
                .with_attribute("refid", species.as_str())
                .with_attribute("groupid", group.to_string()),
        );
    }
    element
}

/// Decode the `<ConstituentArray>` of a `<Model>`
///
/// CEF sites carry a `ratio`; MQMQA sites carry none and the phase gets the
/// single quadruplet ratio 1.0.
pub fn decode_sublattices(model: &XmlElement, family: ModelFamily) -> Result<Sublattices, CodecError> {
    let array = required_child(model, "ConstituentArray")?;
    let mut site_ratios = Vec::new();
    let mut constituents = Vec::new();

    for site in array.children_named("Site") {
        if family == ModelFamily::Cef {
            site_ratios.push(site.required_f64_attribute("ratio")?);
        }
        let species = site
            .children_named("Constituent")
            .map(|c| c.required_attribute("refid").map(str::to_string))
            .collect::<Result<BTreeSet<_>, _>>()?;
        constituents.push(species);
    }

    if family == ModelFamily::Mqmqa {
        site_ratios = vec![1.0];
    }
    Ok((site_ratios, constituents))
}

/// Build the `<Model>` element of a phase
///
/// Every hint is consumed by exactly one XML construct; anything left over
/// fails with [`CodecError::UnsupportedModelHint`].
pub fn encode(phase: &Phase) -> Result<XmlElement, CodecError> {
    let family = phase
        .model
        .ok_or_else(|| CodecError::missing(format!("phase {}", phase.name), "Model"))?;
    let mut hints = phase.hints.clone();
    let mut model = XmlElement::new("Model").with_attribute("type", family.as_str());

    let mqmqa = match family {
        ModelFamily::Mqmqa => match hints.remove(HINT_KEYS::MQMQA) {
            Some(HintValue::Mqmqa(hint)) => Some(hint),
            Some(other) => {
                // put it back so the completeness check names it
                hints.set(HINT_KEYS::MQMQA, other);
                None
            }
            None => {
                return Err(CodecError::missing(
                    format!("MQMQA phase {}", phase.name),
                    HINT_KEYS::MQMQA,
                ))
            }
        },
        ModelFamily::Cef => None,
    };
    if let Some(hint) = &mqmqa {
        model.set_attribute("version", hint.version.as_str());
    }

    model.push(encode_sublattices(phase, family)?);

    let afm = float_hint(&hints, HINT_KEYS::MAGNETIC_AFM_FACTOR);
    let structure = float_hint(&hints, HINT_KEYS::MAGNETIC_STRUCTURE_FACTOR);
    if let (Some(afm), Some(structure)) = (afm, structure) {
        model.push(
            XmlElement::new("MagneticOrdering")
                .with_attribute("type", IHJ)
                .with_attribute("structure_factor", format_float(structure))
                .with_attribute("afm_factor", format_float(afm)),
        );
        hints.remove(HINT_KEYS::MAGNETIC_AFM_FACTOR);
        hints.remove(HINT_KEYS::MAGNETIC_STRUCTURE_FACTOR);
    }

    let ordered = text_hint(&hints, HINT_KEYS::ORDERED_PHASE);
    let disordered = text_hint(&hints, HINT_KEYS::DISORDERED_PHASE);
    if let (Some(ordered), Some(disordered)) = (ordered, disordered) {
        model.push(
            XmlElement::new("AtomicOrdering")
                .with_attribute("ordered_part", ordered)
                .with_attribute("disordered_part", disordered),
        );
        hints.remove(HINT_KEYS::ORDERED_PHASE);
        hints.remove(HINT_KEYS::DISORDERED_PHASE);
    }

    let fcc = flag_hint(&hints, HINT_KEYS::SYMMETRY_FCC_4SL);
    let bcc = flag_hint(&hints, HINT_KEYS::SYMMETRY_BCC_4SL);
    if fcc && bcc {
        return Err(CodecError::MultipleSymmetryOptions(phase.name.clone()));
    }
    for (set, key, kind) in [
        (fcc, HINT_KEYS::SYMMETRY_FCC_4SL, FCC_4SL),
        (bcc, HINT_KEYS::SYMMETRY_BCC_4SL, BCC_4SL),
    ] {
        if set {
            model.push(XmlElement::new("Symmetry").with_attribute("type", kind));
            hints.remove(key);
        }
    }

    match &mqmqa {
        Some(hint) => {
            model.push(
                XmlElement::new("ChemicalGroups")
                    .with_child(write_groups("Cations", &hint.chemical_groups.cations))
                    .with_child(write_groups("Anions", &hint.chemical_groups.anions)),
            );
        }
        None => {
            if let Some(HintValue::ChemicalGroups(groups)) = hints.get(HINT_KEYS::CHEMICAL_GROUPS) {
                model.push(write_groups("ChemicalGroups", groups));
                hints.remove(HINT_KEYS::CHEMICAL_GROUPS);
            }
        }
    }

    for (key, element) in PHASE_OPTIONS {
        if flag_hint(&hints, key) {
            model.push(XmlElement::new(element));
            hints.remove(key);
        }
    }

    if !hints.is_empty() {
        return Err(CodecError::UnsupportedModelHint {
            phase: phase.name.clone(),
            keys: hints.keys().map(str::to_string).collect(),
        });
    }
    Ok(model)
}

fn encode_sublattices(phase: &Phase, family: ModelFamily) -> Result<XmlElement, CodecError> {
    let mut array = XmlElement::new("ConstituentArray");
    if family == ModelFamily::Cef && phase.site_ratios.len() != phase.constituents.len() {
        return Err(CodecError::malformed(
            "ConstituentArray",
            format!(
                "phase {} has {} site ratios for {} sublattices",
                phase.name,
                phase.site_ratios.len(),
                phase.constituents.len()
            ),
        ));
    }

    for (index, species) in phase.constituents.iter().enumerate() {
        let mut site = XmlElement::new("Site").with_attribute("id", index.to_string());
        if family == ModelFamily::Cef {
            site.set_attribute("ratio", format_float(phase.site_ratios[index]));
        }
        for name in species {
            site.push(XmlElement::new("Constituent").with_attribute("refid", name.as_str()));
        }
        array.push(site);
    }
    Ok(array)
}

fn float_hint(hints: &ModelHints, key: &str) -> Option<f64> {
    hints.get(key).and_then(HintValue::as_float)
}

fn text_hint(hints: &ModelHints, key: &str) -> Option<String> {
    hints.get(key).and_then(HintValue::as_str).map(str::to_string)
}

fn flag_hint(hints: &ModelHints, key: &str) -> bool {
    hints.get(key).and_then(HintValue::as_bool) == Some(true)
}
