//! Declarative element rules for the database document format

/// Value type of an attribute or of an element's text content
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    /// No text allowed (element content only)
    Empty,
    /// Any non-empty string
    Text,
    /// Floating point number, `inf`/`-inf` included
    Float,
    /// Signed integer
    Integer,
    /// Whitespace-separated list of at least one float
    FloatList,
    /// Algebraic expression over `T` and `P`; may be empty
    Expression,
    /// One of a fixed set of tokens
    OneOf(&'static [&'static str]),
}

/// Allowed attribute
#[derive(Debug, Clone, Copy)]
pub struct AttributeRule {
    /// Attribute name
    pub name: &'static str,
    /// Value type
    pub kind: ValueKind,
    /// Whether the attribute must be present
    pub required: bool,
}

/// Allowed child element with its cardinality
#[derive(Debug, Clone, Copy)]
pub struct ChildRule {
    /// Child tag name
    pub name: &'static str,
    /// Minimum occurrences
    pub min: usize,
    /// Maximum occurrences, `None` for unbounded
    pub max: Option<usize>,
}

/// Content model of one element in the context of its parents
#[derive(Debug, Clone, Copy)]
pub struct ElementRule {
    /// Tag name
    pub name: &'static str,
    /// Parent tags this rule applies under; empty for the root
    pub parents: &'static [&'static str],
    /// Allowed attributes
    pub attributes: &'static [AttributeRule],
    /// Allowed children, in any order
    pub children: &'static [ChildRule],
    /// Text content type
    pub text: ValueKind,
}

/// Name of the document root
pub const ROOT_ELEMENT: &str = "Database";

/// The only supported value of `Database@version`
pub const FORMAT_VERSION: &str = "0";

const fn required(name: &'static str, kind: ValueKind) -> AttributeRule {
    AttributeRule { name, kind, required: true }
}

const fn optional(name: &'static str, kind: ValueKind) -> AttributeRule {
    AttributeRule { name, kind, required: false }
}

const fn one(name: &'static str) -> ChildRule {
    ChildRule { name, min: 1, max: Some(1) }
}

const fn maybe(name: &'static str) -> ChildRule {
    ChildRule { name, min: 0, max: Some(1) }
}

const fn many(name: &'static str) -> ChildRule {
    ChildRule { name, min: 0, max: None }
}

const fn at_least_one(name: &'static str) -> ChildRule {
    ChildRule { name, min: 1, max: None }
}

const fn marker(name: &'static str) -> ElementRule {
    ElementRule {
        name,
        parents: &["Model"],
        attributes: &[],
        children: &[],
        text: ValueKind::Empty,
    }
}

const SPECIES_REF: &[AttributeRule] = &[required("refid", ValueKind::Text)];

const fn species_ref(name: &'static str, parents: &'static [&'static str]) -> ElementRule {
    ElementRule {
        name,
        parents,
        attributes: SPECIES_REF,
        children: &[],
        text: ValueKind::Empty,
    }
}

const fn text_element(name: &'static str, text: ValueKind) -> ElementRule {
    ElementRule {
        name,
        parents: &["Parameter"],
        attributes: &[],
        children: &[],
        text,
    }
}

/// The complete document schema
pub static DATABASE_SCHEMA: &[ElementRule] = &[
    ElementRule {
        name: ROOT_ELEMENT,
        parents: &[],
        attributes: &[required("version", ValueKind::OneOf(&[FORMAT_VERSION]))],
        children: &[
            maybe("metadata"),
            many("ChemicalElement"),
            many("Species"),
            many("Expr"),
            many("Phase"),
        ],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "metadata",
        parents: &[ROOT_ELEMENT],
        attributes: &[],
        children: &[maybe("writer")],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "writer",
        parents: &["metadata"],
        attributes: &[],
        children: &[],
        text: ValueKind::Text,
    },
    ElementRule {
        name: "ChemicalElement",
        parents: &[ROOT_ELEMENT],
        attributes: &[
            required("id", ValueKind::Text),
            required("mass", ValueKind::Float),
            required("reference_phase", ValueKind::Text),
            required("H298", ValueKind::Float),
            required("S298", ValueKind::Float),
        ],
        children: &[],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "Species",
        parents: &[ROOT_ELEMENT],
        attributes: &[
            required("id", ValueKind::Text),
            optional("charge", ValueKind::Float),
        ],
        children: &[many("ChemicalElement")],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "ChemicalElement",
        parents: &["Species"],
        attributes: &[
            required("refid", ValueKind::Text),
            required("ratio", ValueKind::Float),
        ],
        children: &[],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "Expr",
        parents: &[ROOT_ELEMENT],
        attributes: &[required("id", ValueKind::Text)],
        children: &[many("Interval")],
        text: ValueKind::Expression,
    },
    ElementRule {
        name: "Interval",
        parents: &["Expr", "Parameter", "Interval"],
        attributes: &[
            required("in", ValueKind::Text),
            optional("lower", ValueKind::Float),
            optional("upper", ValueKind::Float),
        ],
        children: &[many("Interval")],
        text: ValueKind::Expression,
    },
    ElementRule {
        name: "Phase",
        parents: &[ROOT_ELEMENT],
        attributes: &[required("id", ValueKind::Text)],
        children: &[maybe("Model"), many("Parameter")],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "Model",
        parents: &["Phase"],
        attributes: &[
            required("type", ValueKind::OneOf(&["CEF", "MQMQA"])),
            optional("version", ValueKind::Text),
        ],
        children: &[
            one("ConstituentArray"),
            maybe("MagneticOrdering"),
            maybe("AtomicOrdering"),
            maybe("Symmetry"),
            maybe("ChemicalGroups"),
            maybe("TwoSublatticeIonicLiquid"),
            maybe("Liquid"),
            maybe("Gas"),
            maybe("Aqueous"),
            maybe("Charged"),
        ],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "ConstituentArray",
        parents: &["Model", "Parameter"],
        attributes: &[],
        children: &[at_least_one("Site")],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "Site",
        parents: &["ConstituentArray"],
        attributes: &[
            optional("id", ValueKind::Integer),
            optional("refid", ValueKind::Text),
            optional("ratio", ValueKind::Float),
        ],
        children: &[at_least_one("Constituent")],
        text: ValueKind::Empty,
    },
    species_ref("Constituent", &["Site"]),
    ElementRule {
        name: "MagneticOrdering",
        parents: &["Model"],
        attributes: &[
            required("type", ValueKind::OneOf(&["IHJ"])),
            required("structure_factor", ValueKind::Float),
            required("afm_factor", ValueKind::Float),
        ],
        children: &[],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "AtomicOrdering",
        parents: &["Model"],
        attributes: &[
            required("ordered_part", ValueKind::Text),
            required("disordered_part", ValueKind::Text),
        ],
        children: &[],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "Symmetry",
        parents: &["Model"],
        attributes: &[required("type", ValueKind::OneOf(&["FCC_4SL", "BCC_4SL"]))],
        children: &[],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "ChemicalGroups",
        parents: &["Model"],
        attributes: &[],
        children: &[many("Constituent"), maybe("Cations"), maybe("Anions")],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "Cations",
        parents: &["ChemicalGroups"],
        attributes: &[],
        children: &[many("Constituent")],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "Anions",
        parents: &["ChemicalGroups"],
        attributes: &[],
        children: &[many("Constituent")],
        text: ValueKind::Empty,
    },
    ElementRule {
        name: "Constituent",
        parents: &["ChemicalGroups", "Cations", "Anions"],
        attributes: &[
            required("refid", ValueKind::Text),
            required("groupid", ValueKind::Integer),
        ],
        children: &[],
        text: ValueKind::Empty,
    },
    marker("TwoSublatticeIonicLiquid"),
    marker("Liquid"),
    marker("Gas"),
    marker("Aqueous"),
    marker("Charged"),
    ElementRule {
        name: "Parameter",
        parents: &["Phase"],
        attributes: &[required("type", ValueKind::Text)],
        children: &[
            maybe("Order"),
            one("ConstituentArray"),
            maybe("DiffusingSpecies"),
            maybe("Zeta"),
            maybe("StoichiometricFactors"),
            maybe("Coordinations"),
            maybe("MixingCode"),
            maybe("Exponents"),
            maybe("AdditionalMixingConstituent"),
            maybe("AdditionalMixingExponent"),
            many("Interval"),
        ],
        text: ValueKind::Expression,
    },
    text_element("Order", ValueKind::Integer),
    species_ref("DiffusingSpecies", &["Parameter"]),
    text_element("Zeta", ValueKind::Float),
    text_element("StoichiometricFactors", ValueKind::FloatList),
    text_element("Coordinations", ValueKind::FloatList),
    ElementRule {
        name: "MixingCode",
        parents: &["Parameter"],
        attributes: &[required("type", ValueKind::Text)],
        children: &[],
        text: ValueKind::Empty,
    },
    text_element("Exponents", ValueKind::FloatList),
    species_ref("AdditionalMixingConstituent", &["Parameter"]),
    text_element("AdditionalMixingExponent", ValueKind::Float),
];

/// Rule for `name` appearing under `parent`; `None` parent selects the root
pub fn rule_for(parent: Option<&str>, name: &str) -> Option<&'static ElementRule> {
    DATABASE_SCHEMA.iter().find(|rule| {
        rule.name == name
            && match parent {
                Some(parent) => rule.parents.contains(&parent),
                None => rule.parents.is_empty(),
            }
    })
}
