use crate::Kinetics::KineticsError;
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// default gas constant, J/(mol K)
pub const R: f64 = 8.314;

pub const RATE_LAW_KINDS: [&str; 3] = ["Constant", "Arrhenius", "modifiedArrhenius"];

/// Rate law of one elementary reaction. The parameters a reaction does not
/// use are zero-filled in the reaction record, the variant itself only
/// carries what its formula needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RateLaw {
    Constant { k: f64 },
    Arrhenius { a: f64, e: f64 },
    ModifiedArrhenius { a: f64, b: f64, e: f64 },
}

impl RateLaw {
    pub fn kind(&self) -> &'static str {
        match self {
            RateLaw::Constant { .. } => "Constant",
            RateLaw::Arrhenius { .. } => "Arrhenius",
            RateLaw::ModifiedArrhenius { .. } => "modifiedArrhenius",
        }
    }

    /// (A, b, E, k) with unused parameters zero-filled
    pub fn fields(&self) -> (f64, f64, f64, f64) {
        match *self {
            RateLaw::Constant { k } => (0.0, 0.0, 0.0, k),
            RateLaw::Arrhenius { a, e } => (a, 0.0, e, 0.0),
            RateLaw::ModifiedArrhenius { a, b, e } => (a, b, e, 0.0),
        }
    }

    /// Build a rate law from a kind marker and the flat parameter fields.
    /// The kind must be one of RATE_LAW_KINDS and A must be strictly positive
    /// for the Arrhenius kinds; this is checked at construction and repeated
    /// on every parameter mutation.
    pub fn from_fields(kind: &str, a: f64, b: f64, e: f64, k: f64) -> Result<Self, KineticsError> {
        let law = match kind {
            "Constant" => RateLaw::Constant { k },
            "Arrhenius" => RateLaw::Arrhenius { a, e },
            "modifiedArrhenius" => RateLaw::ModifiedArrhenius { a, b, e },
            other => {
                return Err(KineticsError::InvalidInput(format!(
                    "{} is not a valid rate law kind, expected one of {:?}",
                    other, RATE_LAW_KINDS
                )));
            }
        };
        match law {
            RateLaw::Arrhenius { a, .. } | RateLaw::ModifiedArrhenius { a, .. } if a <= 0.0 => {
                Err(KineticsError::InvalidInput(format!(
                    "the A value must be strictly positive, it was {}",
                    a
                )))
            }
            _ => Ok(law),
        }
    }

    /// Evaluate k(T). The constant kind returns its stored value
    /// unconditionally; the Arrhenius kinds are checked for overflow to
    /// infinity and underflow below machine epsilon.
    pub fn k_const(&self, t: f64, r: f64) -> Result<f64, KineticsError> {
        let t = check_temperature(t)?;
        let k = match *self {
            RateLaw::Constant { k } => {
                if k == 0.0 {
                    warn!("using a constant rate coefficient with k = 0");
                }
                return Ok(k);
            }
            RateLaw::Arrhenius { a, e } => a * f64::exp(-e / (r * t)),
            RateLaw::ModifiedArrhenius { a, b, e } => {
                if b == 0.0 {
                    warn!("using modified Arrhenius with b = 0");
                }
                a * t.powf(b) * f64::exp(-e / (r * t))
            }
        };
        if k == f64::INFINITY {
            return Err(KineticsError::Overflow { temperature: t });
        }
        if k <= f64::EPSILON {
            return Err(KineticsError::Underflow { temperature: t });
        }
        Ok(k)
    }
}

/// temperature must be a finite, non-negative real; T = 0 passes through to
/// the rate-law math
pub fn check_temperature(t: f64) -> Result<f64, KineticsError> {
    if !t.is_finite() {
        return Err(KineticsError::InvalidInput(format!(
            "temperature must be a finite number, it was {}",
            t
        )));
    }
    if t < 0.0 {
        return Err(KineticsError::InvalidInput(format!(
            "temperature must be non-negative, it was {}",
            t
        )));
    }
    Ok(t)
}

/// Coerce a serde Value holding a scalar into f64 the way the parameter
/// update path expects: numbers and numeric strings pass, a list is a type
/// mismatch distinguishable from a plain non-numeric input.
pub fn coerce_float(name: &str, value: &Value) -> Result<f64, KineticsError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            KineticsError::InvalidInput(format!(
                "your input for {} was not a representable real number",
                name
            ))
        }),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            KineticsError::InvalidInput(format!(
                "your input for {} was not a numeric, real number: {}",
                name, s
            ))
        }),
        Value::Array(_) => Err(KineticsError::TypeMismatch(format!(
            "{} must be a real number, you may have put in a list",
            name
        ))),
        Value::Object(_) => Err(KineticsError::TypeMismatch(format!(
            "{} must be a real number, you may have put in a map",
            name
        ))),
        Value::Bool(_) | Value::Null => Err(KineticsError::InvalidInput(format!(
            "your input for {} was not a numeric, real number: {}",
            name, value
        ))),
    }
}
