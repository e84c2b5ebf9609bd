use crate::Kinetics::KineticsError;
use crate::Kinetics::rate_coefficients::{self, RateLaw, check_temperature, coerce_float};
use crate::Thermodynamics::equilibrium::{P_REF, backward_rate_coefficient};
use crate::Thermodynamics::thermo_store::ThermoStore;
use enum_dispatch::enum_dispatch;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// One parsed reaction of the definition document: reversibility flag, rate
/// law kind with zero-filled unused parameters, and the reactant/product
/// stoichiometry columns over the system species order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    pub reversible: bool,
    pub coeftype: String,
    pub a: f64,
    pub b: f64,
    pub e: f64,
    pub k: f64,
    pub vprime: DVector<f64>,
    pub v2prime: DVector<f64>,
}

/// Partial parameter update for a live reaction. Fields arrive as serde
/// Values so a non-numeric scalar and a list-typed input fail with
/// distinguishable error kinds; fields left as None are untouched.
#[derive(Debug, Clone, Default)]
pub struct ParamUpdate {
    pub a: Option<Value>,
    pub b: Option<Value>,
    pub e: Option<Value>,
    pub r: Option<Value>,
    pub k: Option<Value>,
    pub coeftype: Option<String>,
}

/// data common to both reaction variants
#[derive(Debug, Clone)]
pub struct ReactionBase {
    pub species: Vec<String>,
    pub vprime: DVector<f64>,
    pub v2prime: DVector<f64>,
    pub law: RateLaw,
    pub r: f64,
    /// last computed forward coefficient
    pub kf: f64,
}

impl ReactionBase {
    fn new(record: &ReactionRecord, species: &[String]) -> Result<Self, KineticsError> {
        if record.vprime.len() != record.v2prime.len() {
            return Err(KineticsError::ShapeMismatch(format!(
                "the vprime and v2prime columns must be the same size, got {} and {}",
                record.vprime.len(),
                record.v2prime.len()
            )));
        }
        if record.vprime.len() != species.len() {
            return Err(KineticsError::ShapeMismatch(format!(
                "the stoichiometry columns must cover all {} species, they have length {}",
                species.len(),
                record.vprime.len()
            )));
        }
        let law = RateLaw::from_fields(&record.coeftype, record.a, record.b, record.e, record.k)?;
        Ok(Self {
            species: species.to_vec(),
            vprime: record.vprime.clone(),
            v2prime: record.v2prime.clone(),
            law,
            r: rate_coefficients::R,
            kf: 0.0,
        })
    }

    fn reaction_coef_forward(&mut self, t: f64) -> Result<f64, KineticsError> {
        self.kf = self.law.k_const(t, self.r)?;
        Ok(self.kf)
    }

    fn check_concentrations(&self, x: &DVector<f64>) -> Result<(), KineticsError> {
        if x.len() != self.vprime.len() {
            return Err(KineticsError::ShapeMismatch(format!(
                "the concentration vector must have length {}, it was {}",
                self.vprime.len(),
                x.len()
            )));
        }
        Ok(())
    }

    fn net_stoichiometry(&self) -> DVector<f64> {
        &self.v2prime - &self.vprime
    }

    fn set_params(&mut self, update: &ParamUpdate) -> Result<(), KineticsError> {
        let (mut a, mut b, mut e, mut k) = self.law.fields();
        if let Some(value) = &update.a {
            a = coerce_float("A", value)?;
        }
        if let Some(value) = &update.b {
            b = coerce_float("b", value)?;
        }
        if let Some(value) = &update.e {
            e = coerce_float("E", value)?;
        }
        if let Some(value) = &update.k {
            k = coerce_float("k", value)?;
        }
        let mut r = self.r;
        if let Some(value) = &update.r {
            r = coerce_float("R", value)?;
        }
        let kind = update.coeftype.as_deref().unwrap_or(self.law.kind());
        self.law = RateLaw::from_fields(kind, a, b, e, k)?;
        self.r = r;
        Ok(())
    }

    fn record(&self, reversible: bool) -> ReactionRecord {
        let (a, b, e, k) = self.law.fields();
        ReactionRecord {
            reversible,
            coeftype: self.law.kind().to_string(),
            a,
            b,
            e,
            k,
            vprime: self.vprime.clone(),
            v2prime: self.v2prime.clone(),
        }
    }
}

/// product over species of x[s]^v[s]; species with zero stoichiometry
/// contribute a factor of one
fn concentration_product(x: &DVector<f64>, exponents: &DVector<f64>) -> f64 {
    x.iter()
        .zip(exponents.iter())
        .map(|(xi, vi)| xi.powf(*vi))
        .product()
}

#[enum_dispatch]
pub trait ReactionRates {
    /// evaluate and memoize the forward rate coefficient at T
    fn reaction_coef_forward(&mut self, t: f64) -> Result<f64, KineticsError>;
    /// backward coefficient; None for the irreversible variant, which never
    /// fails here
    fn reaction_coef_backward(&mut self, t: f64) -> Result<Option<f64>, KineticsError>;
    /// (forward, backward) pair at T
    fn reaction_coefs(&mut self, t: f64) -> Result<(f64, Option<f64>), KineticsError>;
    /// net rate of advancement of this reaction at concentrations x
    fn progress_rate(&mut self, x: &DVector<f64>, t: f64) -> Result<f64, KineticsError>;
    /// per-species rate contribution, net stoichiometry times progress rate
    fn reaction_rate(&mut self, x: &DVector<f64>, t: f64) -> Result<DVector<f64>, KineticsError>;
    /// partial update of the rate-law parameters; invariants re-checked
    fn set_params(&mut self, update: &ParamUpdate) -> Result<(), KineticsError>;
    /// read back this reaction as a record with zero-filled unused fields
    fn get_record(&self) -> ReactionRecord;
    fn is_reversible(&self) -> bool;
}

/// elementary reaction with no backward term
#[derive(Debug, Clone)]
pub struct IrreversibleReaction {
    pub base: ReactionBase,
}

impl IrreversibleReaction {
    pub fn new(record: &ReactionRecord, species: &[String]) -> Result<Self, KineticsError> {
        if record.reversible {
            return Err(KineticsError::InvalidInput(
                "a reversible reaction record was passed to the irreversible variant".to_string(),
            ));
        }
        Ok(Self {
            base: ReactionBase::new(record, species)?,
        })
    }
}

impl ReactionRates for IrreversibleReaction {
    fn reaction_coef_forward(&mut self, t: f64) -> Result<f64, KineticsError> {
        self.base.reaction_coef_forward(t)
    }

    fn reaction_coef_backward(&mut self, _t: f64) -> Result<Option<f64>, KineticsError> {
        Ok(None)
    }

    fn reaction_coefs(&mut self, t: f64) -> Result<(f64, Option<f64>), KineticsError> {
        Ok((self.base.reaction_coef_forward(t)?, None))
    }

    fn progress_rate(&mut self, x: &DVector<f64>, t: f64) -> Result<f64, KineticsError> {
        self.base.check_concentrations(x)?;
        check_temperature(t)?;
        let kf = self.base.reaction_coef_forward(t)?;
        Ok(kf * concentration_product(x, &self.base.vprime))
    }

    fn reaction_rate(&mut self, x: &DVector<f64>, t: f64) -> Result<DVector<f64>, KineticsError> {
        let w = self.progress_rate(x, t)?;
        Ok(self.base.net_stoichiometry() * w)
    }

    fn set_params(&mut self, update: &ParamUpdate) -> Result<(), KineticsError> {
        self.base.set_params(update)
    }

    fn get_record(&self) -> ReactionRecord {
        self.base.record(false)
    }

    fn is_reversible(&self) -> bool {
        false
    }
}

/// elementary reaction whose backward coefficient is derived from the
/// equilibrium constant; queries the shared NASA7 store on every evaluation
#[derive(Debug, Clone)]
pub struct ReversibleReaction {
    pub base: ReactionBase,
    pub p0: f64,
    /// last computed backward coefficient
    pub kb: f64,
    thermo: Arc<ThermoStore>,
}

impl ReversibleReaction {
    pub fn new(
        record: &ReactionRecord,
        species: &[String],
        thermo: Arc<ThermoStore>,
    ) -> Result<Self, KineticsError> {
        if !record.reversible {
            return Err(KineticsError::InvalidInput(
                "an irreversible reaction record was passed to the reversible variant".to_string(),
            ));
        }
        Ok(Self {
            base: ReactionBase::new(record, species)?,
            p0: P_REF,
            kb: 0.0,
            thermo,
        })
    }
}

impl ReactionRates for ReversibleReaction {
    fn reaction_coef_forward(&mut self, t: f64) -> Result<f64, KineticsError> {
        self.base.reaction_coef_forward(t)
    }

    fn reaction_coef_backward(&mut self, t: f64) -> Result<Option<f64>, KineticsError> {
        check_temperature(t)?;
        let rows = self.thermo.coefficients(&self.base.species, t)?;
        let nu = self.base.net_stoichiometry();
        let kf = self.base.reaction_coef_forward(t)?;
        self.kb = backward_rate_coefficient(kf, &rows, &nu, t, self.base.r, self.p0);
        Ok(Some(self.kb))
    }

    fn reaction_coefs(&mut self, t: f64) -> Result<(f64, Option<f64>), KineticsError> {
        let kb = self.reaction_coef_backward(t)?;
        Ok((self.base.kf, kb))
    }

    fn progress_rate(&mut self, x: &DVector<f64>, t: f64) -> Result<f64, KineticsError> {
        self.base.check_concentrations(x)?;
        check_temperature(t)?;
        let kf = self.base.reaction_coef_forward(t)?;
        let kb = self
            .reaction_coef_backward(t)?
            .unwrap_or_default();
        Ok(kf * concentration_product(x, &self.base.vprime)
            - kb * concentration_product(x, &self.base.v2prime))
    }

    fn reaction_rate(&mut self, x: &DVector<f64>, t: f64) -> Result<DVector<f64>, KineticsError> {
        let w = self.progress_rate(x, t)?;
        Ok(self.base.net_stoichiometry() * w)
    }

    fn set_params(&mut self, update: &ParamUpdate) -> Result<(), KineticsError> {
        self.base.set_params(update)
    }

    fn get_record(&self) -> ReactionRecord {
        self.base.record(true)
    }

    fn is_reversible(&self) -> bool {
        true
    }
}

/// an elementary reaction, classified once at construction and never
/// reclassified
#[enum_dispatch(ReactionRates)]
#[derive(Debug, Clone)]
pub enum ReactionEnum {
    Irreversible(IrreversibleReaction),
    Reversible(ReversibleReaction),
}
