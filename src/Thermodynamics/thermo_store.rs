use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ThermoError {
    #[error(
        "temperature {temperature} K is below the minimum possible, {bound} K, for species {species}"
    )]
    BelowRange {
        species: String,
        temperature: f64,
        bound: f64,
    },
    #[error(
        "temperature {temperature} K is greater than the maximum possible, {bound} K, for species {species}"
    )]
    AboveRange {
        species: String,
        temperature: f64,
        bound: f64,
    },
    #[error("no coefficient row found for species {species} at {temperature} K")]
    NotFound { species: String, temperature: f64 },
    #[error("invalid thermo data: {0}")]
    InvalidStructure(String),
}

/// one NASA7 coefficient row: seven polynomial coefficients valid over
/// [tlow, thigh]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermoRow {
    pub tlow: f64,
    pub thigh: f64,
    pub coeffs: [f64; 7],
}

impl ThermoRow {
    pub fn new(tlow: f64, thigh: f64, coeffs: [f64; 7]) -> Self {
        Self {
            tlow,
            thigh,
            coeffs,
        }
    }
}

/// In-memory NASA7 coefficient store. Species carry two rows each when
/// populated from a standard thermo table (low and high sub-range sharing a
/// mid-point temperature). The store is read-only once populated; reversible
/// reactions query it on every backward-coefficient evaluation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThermoStore {
    data: HashMap<String, Vec<ThermoRow>>,
}

impl ThermoStore {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// register coefficient rows for a species, appending to whatever is
    /// already stored under that name
    pub fn add_species(&mut self, species: &str, rows: Vec<ThermoRow>) {
        self.data.entry(species.to_string()).or_default().extend(rows);
    }

    pub fn species_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.data.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn rows(&self, species: &str) -> Option<&Vec<ThermoRow>> {
        self.data.get(species)
    }

    /// build the store from a serde Value of the form
    /// {"CO": [{"tlow": .., "thigh": .., "coeffs": [..7..]}, ..], ..}
    pub fn from_json(value: Value) -> Result<Self, ThermoError> {
        let data: HashMap<String, Vec<ThermoRow>> = serde_json::from_value(value)
            .map_err(|e| ThermoError::InvalidStructure(e.to_string()))?;
        Ok(Self { data })
    }

    /// Parse a fixed-width NASA7 thermo table. Every species occupies four
    /// lines tagged 1..4: a header line with the species name and the
    /// TLOW/THIGH/TMID bounds, then fourteen coefficients in 15-character
    /// fields, the first seven for the high sub-range and the last seven for
    /// the low sub-range. The table must be terminated by an END line.
    pub fn from_nasa_table(text: &str) -> Result<Self, ThermoError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.len() < 5 {
            return Err(ThermoError::InvalidStructure(
                "thermo table is too short".to_string(),
            ));
        }
        if lines[lines.len() - 1].trim() != "END"
            || !lines[lines.len() - 2].trim_end().ends_with('4')
        {
            return Err(ThermoError::InvalidStructure(
                "thermo table is not truncated by a line 4 record and END".to_string(),
            ));
        }

        let mut store = ThermoStore::new();
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];
            if line.trim_end().ends_with('1') && lines[i..].len() >= 4 {
                let header: Vec<&str> = line.split_whitespace().collect();
                if header.len() < 5 {
                    return Err(ThermoError::InvalidStructure(format!(
                        "malformed species header line: {}",
                        line
                    )));
                }
                let name = header[0].to_string();
                // trailing tokens are TLOW THIGH TMID followed by the tag 1
                let tmid = parse_bound(header[header.len() - 2])?;
                let thigh = parse_bound(header[header.len() - 3])?;
                let tlow = parse_bound(header[header.len() - 4])?;

                let mut coeffs = Vec::with_capacity(14);
                for coef_line in &lines[i + 1..i + 4] {
                    coeffs.extend(line_floats(coef_line)?);
                }
                if coeffs.len() < 14 {
                    return Err(ThermoError::InvalidStructure(format!(
                        "species {} carries {} coefficients, 14 expected",
                        name,
                        coeffs.len()
                    )));
                }
                let high_poly: [f64; 7] = coeffs[0..7].try_into().unwrap();
                let low_poly: [f64; 7] = coeffs[7..14].try_into().unwrap();
                store.add_species(
                    &name,
                    vec![
                        ThermoRow::new(tlow, tmid, low_poly),
                        ThermoRow::new(tmid, thigh, high_poly),
                    ],
                );
                i += 4;
            } else {
                i += 1;
            }
        }
        info!(
            "parsed NASA7 table with {} species",
            store.data.len()
        );
        Ok(store)
    }

    /// Retrieve, for every requested species in order, the coefficient row
    /// whose validity range contains T. If T lies outside a species'
    /// temperature envelope the query fails naming the species and the
    /// violated bound. When T equals a stored TLOW the row is selected with
    /// T+epsilon, so at the split point between two adjacent ranges the upper
    /// range's row wins.
    pub fn coefficients(&self, species: &[String], t: f64) -> Result<Vec<ThermoRow>, ThermoError> {
        let mut out = Vec::with_capacity(species.len());
        for name in species {
            let rows = self.data.get(name).ok_or_else(|| ThermoError::NotFound {
                species: name.clone(),
                temperature: t,
            })?;
            let tmin = rows.iter().map(|r| r.tlow).fold(f64::INFINITY, f64::min);
            let tmax = rows
                .iter()
                .map(|r| r.thigh)
                .fold(f64::NEG_INFINITY, f64::max);
            if t < tmin {
                return Err(ThermoError::BelowRange {
                    species: name.clone(),
                    temperature: t,
                    bound: tmin,
                });
            }
            if t > tmax {
                return Err(ThermoError::AboveRange {
                    species: name.clone(),
                    temperature: t,
                    bound: tmax,
                });
            }
            let t_sel = if rows.iter().any(|r| r.tlow == t) {
                t + f64::EPSILON * t.abs().max(1.0)
            } else {
                t
            };
            let row = rows
                .iter()
                .find(|r| r.tlow < t_sel && t_sel <= r.thigh)
                .ok_or_else(|| ThermoError::NotFound {
                    species: name.clone(),
                    temperature: t,
                })?;
            out.push(*row);
        }
        Ok(out)
    }
}

impl fmt::Display for ThermoStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThermoStore with {} species", self.data.len())
    }
}

fn parse_bound(token: &str) -> Result<f64, ThermoError> {
    token
        .parse::<f64>()
        .map_err(|_| ThermoError::InvalidStructure(format!("invalid temperature bound: {}", token)))
}

/// split a coefficient line into 15-character float fields, dropping the
/// trailing line tag
fn line_floats(line: &str) -> Result<Vec<f64>, ThermoError> {
    if line.is_empty() {
        return Err(ThermoError::InvalidStructure(
            "empty coefficient line".to_string(),
        ));
    }
    if !line.is_ascii() {
        return Err(ThermoError::InvalidStructure(format!(
            "non-ASCII coefficient line: {}",
            line
        )));
    }
    let payload = line[..line.len() - 1].trim_end();
    let bytes = payload.as_bytes();
    let mut floats = Vec::new();
    let mut start = 0;
    while start < bytes.len() {
        let end = (start + 15).min(bytes.len());
        let field = payload[start..end].trim();
        let value = field.parse::<f64>().map_err(|_| {
            ThermoError::InvalidStructure(format!("invalid coefficient field: {}", field))
        })?;
        floats.push(value);
        start = end;
    }
    Ok(floats)
}
