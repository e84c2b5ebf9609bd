use crate::Kinetics::KineticsError;
use crate::Kinetics::reaction_parser::{
    ReactionSetRecord, parse_reaction_document, parse_reaction_file, parse_reaction_value,
};
use crate::Kinetics::reactions::{
    IrreversibleReaction, ParamUpdate, ReactionEnum, ReactionRates, ReversibleReaction,
};
use crate::Thermodynamics::thermo_store::ThermoStore;
use log::info;
use nalgebra::{DMatrix, DVector};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// A whole system of elementary reactions over one ordered species list.
/// Every reaction is classified as irreversible or reversible at
/// construction; reversible reactions share the NASA7 store handle for their
/// backward-coefficient queries.
pub struct ReactionSystem {
    species: Vec<String>,
    reactions: Vec<ReactionEnum>,
    number_reverse: usize,
}

impl ReactionSystem {
    /// build the system from a parsed record; constructor errors of the
    /// individual reactions surface immediately
    pub fn from_record(
        record: &ReactionSetRecord,
        thermo: Arc<ThermoStore>,
    ) -> Result<Self, KineticsError> {
        let mut reactions = Vec::with_capacity(record.reactions.len());
        let mut number_reverse = 0;
        for reaction_record in &record.reactions {
            if reaction_record.reversible {
                number_reverse += 1;
                reactions.push(ReactionEnum::Reversible(ReversibleReaction::new(
                    reaction_record,
                    &record.species,
                    Arc::clone(&thermo),
                )?));
            } else {
                reactions.push(ReactionEnum::Irreversible(IrreversibleReaction::new(
                    reaction_record,
                    &record.species,
                )?));
            }
        }
        info!(
            "built reaction system: {} species, {} reversible and {} irreversible reactions",
            record.species.len(),
            number_reverse,
            reactions.len() - number_reverse
        );
        Ok(Self {
            species: record.species.clone(),
            reactions,
            number_reverse,
        })
    }

    /// parse a JSON reaction-definition document and build the system
    pub fn from_document(doc: &str, thermo: Arc<ThermoStore>) -> Result<Self, KineticsError> {
        let record = parse_reaction_document(doc)?;
        Self::from_record(&record, thermo)
    }

    pub fn from_value(value: &Value, thermo: Arc<ThermoStore>) -> Result<Self, KineticsError> {
        let record = parse_reaction_value(value)?;
        Self::from_record(&record, thermo)
    }

    pub fn from_file(
        path: impl AsRef<Path>,
        thermo: Arc<ThermoStore>,
    ) -> Result<Self, KineticsError> {
        let record = parse_reaction_file(path)?;
        Self::from_record(&record, thermo)
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    /// net per-species reaction rates: the per-reaction rate contributions
    /// summed into a zero-initialized species-length vector
    pub fn reaction_rates(
        &mut self,
        x: &DVector<f64>,
        t: f64,
    ) -> Result<DVector<f64>, KineticsError> {
        let mut rates = DVector::zeros(self.species.len());
        for reaction in &mut self.reactions {
            rates += reaction.reaction_rate(x, t)?;
        }
        Ok(rates)
    }

    /// progress rate of every reaction in input order
    pub fn progress_rates(
        &mut self,
        x: &DVector<f64>,
        t: f64,
    ) -> Result<DVector<f64>, KineticsError> {
        let mut rates = Vec::with_capacity(self.reactions.len());
        for reaction in &mut self.reactions {
            rates.push(reaction.progress_rate(x, t)?);
        }
        Ok(DVector::from_vec(rates))
    }

    /// (forward, backward) coefficient pairs in reaction order; backward is
    /// None for irreversible reactions
    pub fn reaction_coefs(&mut self, t: f64) -> Result<Vec<(f64, Option<f64>)>, KineticsError> {
        let mut coefs = Vec::with_capacity(self.reactions.len());
        for reaction in &mut self.reactions {
            coefs.push(reaction.reaction_coefs(t)?);
        }
        Ok(coefs)
    }

    /// read back the current parameters of every reaction as a record, with
    /// unused rate-law fields zero-filled
    pub fn get_params(&self) -> ReactionSetRecord {
        ReactionSetRecord {
            species: self.species.clone(),
            reactions: self.reactions.iter().map(|r| r.get_record()).collect(),
        }
    }

    /// update the rate-law parameters of the indexed reaction in place; the
    /// next evaluation recomputes from the new state
    pub fn set_params(
        &mut self,
        index: usize,
        update: &ParamUpdate,
    ) -> Result<(), KineticsError> {
        let len = self.reactions.len();
        let reaction = self
            .reactions
            .get_mut(index)
            .ok_or(KineticsError::IndexOutOfRange { index, len })?;
        reaction.set_params(update)
    }

    /// assemble the full (vprime, v2prime) stoichiometry matrix pair,
    /// species as rows and reactions as columns
    pub fn stoichiometry_matrices(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        let m = self.species.len();
        let n = self.reactions.len();
        let mut vprime = DMatrix::zeros(m, n);
        let mut v2prime = DMatrix::zeros(m, n);
        for (j, reaction) in self.reactions.iter().enumerate() {
            let record = reaction.get_record();
            vprime.set_column(j, &record.vprime);
            v2prime.set_column(j, &record.v2prime);
        }
        (vprime, v2prime)
    }
}

impl fmt::Display for ReactionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "species: {:?}, with {} reversible reaction(s) and {} irreversible reaction(s)",
            self.species,
            self.number_reverse,
            self.reactions.len() - self.number_reverse
        )
    }
}
