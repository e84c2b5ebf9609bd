use crate::Kinetics::KineticsError;
use crate::Kinetics::rate_coefficients::coerce_float;
use crate::Kinetics::reactions::ReactionRecord;
use log::warn;
use nalgebra::DVector;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// parsed reaction-definition document: the ordered species list shared by
/// the whole system plus one record per reaction
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionSetRecord {
    pub species: Vec<String>,
    pub reactions: Vec<ReactionRecord>,
}

/// Parse a JSON reaction-definition document of the form
/// {"phase": {"speciesArray": [..]}, "reactionData": [{..}, ..]}. The
/// species array also accepts the compact whitespace-separated string form.
pub fn parse_reaction_document(doc: &str) -> Result<ReactionSetRecord, KineticsError> {
    if doc.is_empty() {
        return Err(KineticsError::EmptyInput);
    }
    let value: Value = serde_json::from_str(doc)
        .map_err(|e| KineticsError::InvalidStructure(format!("not a valid JSON document: {}", e)))?;
    parse_reaction_value(&value)
}

/// read and parse a reaction-definition document from a file; a zero-length
/// file is EmptyInput
pub fn parse_reaction_file(path: impl AsRef<Path>) -> Result<ReactionSetRecord, KineticsError> {
    let path = path.as_ref();
    let doc = fs::read_to_string(path).map_err(|e| {
        KineticsError::InvalidStructure(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_reaction_document(&doc)
}

pub fn parse_reaction_value(value: &Value) -> Result<ReactionSetRecord, KineticsError> {
    let species = parse_species_list(value)?;

    let reaction_list = value
        .get("reactionData")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            KineticsError::InvalidStructure("unable to locate reaction data".to_string())
        })?;
    if reaction_list.is_empty() {
        return Err(KineticsError::InvalidStructure(
            "invalid reactions list: no reactions found".to_string(),
        ));
    }

    let mut reactions = Vec::with_capacity(reaction_list.len());
    for reaction_value in reaction_list {
        reactions.push(parse_single_reaction(reaction_value, &species)?);
    }
    Ok(ReactionSetRecord { species, reactions })
}

fn parse_species_list(value: &Value) -> Result<Vec<String>, KineticsError> {
    let array = value.get("phase").and_then(|p| p.get("speciesArray"));
    let species: Vec<String> = match array {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    KineticsError::InvalidStructure(format!(
                        "species names must be strings, got {}",
                        item
                    ))
                })
            })
            .collect::<Result<_, _>>()?,
        Some(Value::String(text)) => text.split_whitespace().map(str::to_string).collect(),
        _ => {
            return Err(KineticsError::InvalidStructure(
                "no species list found in the document".to_string(),
            ));
        }
    };
    if species.is_empty() {
        return Err(KineticsError::InvalidStructure(
            "invalid species list: no species found".to_string(),
        ));
    }
    for (i, name) in species.iter().enumerate() {
        if species[..i].contains(name) {
            return Err(KineticsError::InvalidStructure(format!(
                "duplicate species name: {}",
                name
            )));
        }
    }
    Ok(species)
}

fn parse_single_reaction(
    value: &Value,
    species: &[String],
) -> Result<ReactionRecord, KineticsError> {
    let object = value.as_object().ok_or_else(|| {
        KineticsError::InvalidStructure("every reaction entry must be an object".to_string())
    })?;

    let reversible = match object.get("reversible").and_then(Value::as_str) {
        Some("yes") => true,
        Some("no") => false,
        Some(other) => {
            return Err(KineticsError::InvalidStructure(format!(
                "the reversible marker must be \"yes\" or \"no\", it was \"{}\"",
                other
            )));
        }
        None => {
            return Err(KineticsError::InvalidStructure(
                "missing reversible marker on a reaction".to_string(),
            ));
        }
    };

    match object.get("type").and_then(Value::as_str) {
        Some("Elementary") => {}
        Some(other) => {
            return Err(KineticsError::InvalidStructure(format!(
                "only elementary reactions are supported, got type \"{}\"",
                other
            )));
        }
        None => {
            return Err(KineticsError::InvalidStructure(
                "missing type marker on a reaction".to_string(),
            ));
        }
    }

    let (coeftype, a, b, e, k) = parse_rate_coeff(object)?;
    let vprime = parse_stoichiometry(object.get("reactants"), species, "reactant")?;
    let v2prime = parse_stoichiometry(object.get("products"), species, "product")?;

    Ok(ReactionRecord {
        reversible,
        coeftype,
        a,
        b,
        e,
        k,
        vprime,
        v2prime,
    })
}

/// extract the rate-law kind and its parameters, zero-filling the unused
/// slots; a supplied-but-unused parameter is a warning, not an error
fn parse_rate_coeff(
    object: &Map<String, Value>,
) -> Result<(String, f64, f64, f64, f64), KineticsError> {
    let rate_coeff = object
        .get("rateCoeff")
        .and_then(Value::as_object)
        .ok_or_else(|| {
            KineticsError::InvalidStructure("missing rateCoeff block on a reaction".to_string())
        })?;

    let (kind, params) = rate_coeff.iter().next().ok_or_else(|| {
        KineticsError::InvalidStructure("empty rateCoeff block on a reaction".to_string())
    })?;
    let params = params.as_object().ok_or_else(|| {
        KineticsError::InvalidStructure(format!("the {} parameters must be an object", kind))
    })?;

    let required = |name: &str| -> Result<f64, KineticsError> {
        let value = params.get(name).ok_or_else(|| {
            KineticsError::InvalidStructure(format!(
                "rate law {} requires the parameter {}",
                kind, name
            ))
        })?;
        coerce_float(name, value)
    };
    let warn_unused = |names: &[&str]| {
        for name in names {
            if params.contains_key(*name) {
                warn!(
                    "received a {} value for a {} rate coefficient, replaced with 0",
                    name, kind
                );
            }
        }
    };

    match kind.as_str() {
        "Arrhenius" => {
            warn_unused(&["b", "k"]);
            Ok(("Arrhenius".to_string(), required("A")?, 0.0, required("E")?, 0.0))
        }
        "modifiedArrhenius" => {
            warn_unused(&["k"]);
            Ok((
                "modifiedArrhenius".to_string(),
                required("A")?,
                required("b")?,
                required("E")?,
                0.0,
            ))
        }
        "Constant" => {
            warn_unused(&["A", "b", "E"]);
            Ok(("Constant".to_string(), 0.0, 0.0, 0.0, required("k")?))
        }
        other => Err(KineticsError::InvalidStructure(format!(
            "there is no valid rate law kind called {}",
            other
        ))),
    }
}

/// Build one stoichiometry column over the system species order. Accepts a
/// map {"H2": 1.0, ..} or the compact string form "H2:1 O2:1". A species
/// missing from the declared list is a structural defect.
fn parse_stoichiometry(
    value: Option<&Value>,
    species: &[String],
    side: &str,
) -> Result<DVector<f64>, KineticsError> {
    let mut column = DVector::zeros(species.len());
    let mut set = |name: &str, coefficient: f64| -> Result<(), KineticsError> {
        let index = species.iter().position(|s| s == name).ok_or_else(|| {
            KineticsError::InvalidStructure(format!(
                "unexpected {} species {} is not in the declared species list",
                side, name
            ))
        })?;
        if coefficient < 0.0 {
            return Err(KineticsError::InvalidStructure(format!(
                "stoichiometric coefficient of {} {} must be non-negative, it was {}",
                side, name, coefficient
            )));
        }
        column[index] = coefficient;
        Ok(())
    };

    match value {
        Some(Value::Object(map)) => {
            for (name, coefficient) in map {
                set(name, coerce_float(name, coefficient)?)?;
            }
        }
        Some(Value::String(text)) => {
            for pair in text.split_whitespace() {
                let (name, coefficient) = pair.split_once(':').ok_or_else(|| {
                    KineticsError::InvalidStructure(format!(
                        "malformed {} entry: {}",
                        side, pair
                    ))
                })?;
                let coefficient = coefficient.parse::<f64>().map_err(|_| {
                    KineticsError::InvalidStructure(format!(
                        "malformed {} coefficient for {}: {}",
                        side, name, coefficient
                    ))
                })?;
                set(name, coefficient)?;
            }
        }
        _ => {
            return Err(KineticsError::InvalidStructure(format!(
                "missing {}s block on a reaction",
                side
            )));
        }
    }
    Ok(column)
}
