//! Conversion between `<Parameter>` elements and parameter records

use crate::database::{
    AdditionalMixing, Database, ModelFamily, MqmgPayload, MqmxPayload, MqmzPayload, Parameter,
    ParameterKind, QktPayload, PARAMETER_TYPES,
};
use crate::expr::format_float;
use crate::xml::XmlElement;

use super::interval::{self, Fragment};
use super::{single_child, CodecError};

/// Decode one `<Parameter>` of a phase with the given model family
///
/// Sublattice species are sorted for CEF phases. MQMQA-family phases and
/// `QKT` parameters keep document order, since position selects an exponent,
/// and have no Redlich-Kister order.
pub fn decode(
    element: &XmlElement,
    phase_name: &str,
    family: ModelFamily,
    db: &Database,
) -> Result<Parameter, CodecError> {
    let type_name = element.required_attribute("type")?;
    let positional = is_positional(family, type_name);

    let order = match single_child(element, "Order")? {
        Some(order) => order.i64_text()?,
        None => 0,
    };

    let mut constituent_array = read_constituent_array(element)?;
    if !positional {
        for site in &mut constituent_array {
            site.sort();
        }
    }

    let fragments = interval::fragments_from_xml(element)?;
    let has_value = fragments.iter().any(|f| match f {
        Fragment::Text(text) => !text.trim().is_empty(),
        Fragment::Interval(_) => true,
    });
    let mut value = if has_value {
        Some(interval::decode(&fragments)?)
    } else {
        None
    };

    let diffusing_species = single_child(element, "DiffusingSpecies")?
        .map(|d| d.required_attribute("refid").map(str::to_string))
        .transpose()?;

    let kind = match type_name {
        PARAMETER_TYPES::MQMG => ParameterKind::Mqmg(MqmgPayload {
            zeta: payload_child(element, type_name, "Zeta")?.f64_text()?,
            stoichiometry: payload_child(element, type_name, "StoichiometricFactors")?
                .f64_list_text()?,
        }),
        PARAMETER_TYPES::MQMZ => {
            value = None;
            ParameterKind::Mqmz(MqmzPayload {
                coordinations: payload_child(element, type_name, "Coordinations")?
                    .f64_list_text()?,
            })
        }
        PARAMETER_TYPES::MQMX => {
            let additional_mixing = match single_child(element, "AdditionalMixingConstituent")? {
                Some(constituent) => {
                    let refid = constituent.required_attribute("refid")?;
                    if db.species_named(refid).is_none() {
                        return Err(CodecError::UnknownSpecies(refid.to_string()));
                    }
                    Some(AdditionalMixing {
                        constituent: refid.to_string(),
                        exponent: payload_child(element, type_name, "AdditionalMixingExponent")?
                            .f64_text()?,
                    })
                }
                None => None,
            };
            ParameterKind::Mqmx(MqmxPayload {
                mixing_code: payload_child(element, type_name, "MixingCode")?
                    .required_attribute("type")?
                    .to_string(),
                exponents: payload_child(element, type_name, "Exponents")?.f64_list_text()?,
                additional_mixing,
            })
        }
        PARAMETER_TYPES::QKT => ParameterKind::Qkt(QktPayload {
            exponents: payload_child(element, type_name, "Exponents")?.f64_list_text()?,
        }),
        other => ParameterKind::Generic(other.to_string()),
    };

    Ok(Parameter {
        phase_name: phase_name.to_string(),
        kind,
        order: (!positional).then_some(order),
        constituent_array,
        diffusing_species,
        value,
    })
}

/// Whether sublattice position is significant and the record has no order
fn is_positional(family: ModelFamily, type_name: &str) -> bool {
    family == ModelFamily::Mqmqa || type_name == PARAMETER_TYPES::QKT
}

/// The element a payload type cannot be written without
fn required_payload_field(type_name: &str) -> Option<&'static str> {
    match type_name {
        PARAMETER_TYPES::MQMG => Some("Zeta"),
        PARAMETER_TYPES::MQMZ => Some("Coordinations"),
        PARAMETER_TYPES::MQMX => Some("MixingCode"),
        PARAMETER_TYPES::QKT => Some("Exponents"),
        _ => None,
    }
}

fn read_constituent_array(element: &XmlElement) -> Result<Vec<Vec<String>>, CodecError> {
    let Some(array) = single_child(element, "ConstituentArray")? else {
        return Ok(Vec::new());
    };
    array
        .children_named("Site")
        .map(|site| {
            site.children_named("Constituent")
                .map(|c| {
                    c.required_attribute("refid")
                        .map(str::to_string)
                        .map_err(CodecError::from)
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect()
}

fn payload_child<'a>(
    element: &'a XmlElement,
    type_name: &str,
    name: &'static str,
) -> Result<&'a XmlElement, CodecError> {
    single_child(element, name)?
        .ok_or_else(|| CodecError::missing(format!("{} parameter", type_name), name))
}

/// Build the `<Parameter>` element of a record owned by a `family` phase
///
/// Order-carrying records always get an `<Order>`, a missing order being
/// written as 0. Positional records never get one.
pub fn encode(parameter: &Parameter, family: ModelFamily) -> Result<XmlElement, CodecError> {
    let type_name = parameter.type_name();
    let context = || format!("{} parameter of phase {}", type_name, parameter.phase_name);

    if let ParameterKind::Generic(name) = &parameter.kind {
        if let Some(field) = required_payload_field(name) {
            return Err(CodecError::missing(context(), field));
        }
    }

    let mut element = XmlElement::new("Parameter").with_attribute("type", type_name);
    if !is_positional(family, type_name) {
        let order = parameter.order.unwrap_or(0);
        element.push(XmlElement::new("Order").with_text(order.to_string()));
    }

    let mut array = XmlElement::new("ConstituentArray");
    for (index, species) in parameter.constituent_array.iter().enumerate() {
        let mut site = XmlElement::new("Site").with_attribute("id", index.to_string());
        for name in species {
            site.push(XmlElement::new("Constituent").with_attribute("refid", name.as_str()));
        }
        array.push(site);
    }
    element.push(array);

    if let Some(species) = &parameter.diffusing_species {
        element.push(XmlElement::new("DiffusingSpecies").with_attribute("refid", species.as_str()));
    }

    if !parameter.kind.allows_value() && parameter.value.is_some() {
        return Err(CodecError::ValueExpressionConflict {
            phase: parameter.phase_name.clone(),
            parameter_type: type_name.to_string(),
        });
    }

    match &parameter.kind {
        ParameterKind::Generic(_) => {}
        ParameterKind::Mqmg(payload) => {
            element.push(XmlElement::new("Zeta").with_text(format_float(payload.zeta)));
            element.push(float_list("StoichiometricFactors", &payload.stoichiometry, context)?);
        }
        ParameterKind::Mqmz(payload) => {
            element.push(float_list("Coordinations", &payload.coordinations, context)?);
        }
        ParameterKind::Mqmx(payload) => {
            if payload.mixing_code.is_empty() {
                return Err(CodecError::missing(context(), "MixingCode"));
            }
            element.push(XmlElement::new("MixingCode").with_attribute("type", payload.mixing_code.as_str()));
            element.push(float_list("Exponents", &payload.exponents, context)?);
            if let Some(mixing) = &payload.additional_mixing {
                element.push(
                    XmlElement::new("AdditionalMixingConstituent")
                        .with_attribute("refid", mixing.constituent.as_str()),
                );
                element.push(
                    XmlElement::new("AdditionalMixingExponent").with_text(format_float(mixing.exponent)),
                );
            }
        }
        ParameterKind::Qkt(payload) => {
            element.push(float_list("Exponents", &payload.exponents, context)?);
        }
    }

    if let Some(value) = &parameter.value {
        interval::write_value(&mut element, value)?;
    }
    Ok(element)
}

fn float_list<F>(name: &str, values: &[f64], context: F) -> Result<XmlElement, CodecError>
where
    F: Fn() -> String,
{
    if values.is_empty() {
        return Err(CodecError::missing(context(), name));
    }
    let text = values
        .iter()
        .map(|v| format_float(*v))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(XmlElement::new(name).with_text(text))
}
