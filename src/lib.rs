#[allow(non_snake_case)]
/// rate laws, elementary reactions and reaction systems.
/// A reaction system is built from a JSON reaction-definition document (or a
/// parsed record) and evaluates forward/backward rate coefficients, progress
/// rates and net per-species reaction rates at a given temperature and
/// concentration vector.
/// # Examples
/// ```
/// use KiRate::Kinetics::reaction_system::ReactionSystem;
/// use KiRate::Thermodynamics::thermo_store::ThermoStore;
/// use nalgebra::DVector;
/// use serde_json::json;
/// use std::sync::Arc;
/// let doc = json!({
///     "phase": {"speciesArray": ["A", "B", "C"]},
///     "reactionData": [{
///         "reversible": "no",
///         "type": "Elementary",
///         "rateCoeff": {"Constant": {"k": 10.0}},
///         "reactants": {"A": 1.0, "B": 1.0},
///         "products": {"C": 1.0}
///     }]
/// });
/// let thermo = Arc::new(ThermoStore::new());
/// let mut system = ReactionSystem::from_value(&doc, thermo).unwrap();
/// let x = DVector::from_vec(vec![2.0, 1.0, 1.0]);
/// let w = system.progress_rates(&x, 300.0).unwrap();
/// assert_eq!(w[0], 20.0);
/// ```
pub mod Kinetics;
#[allow(non_snake_case)]
/// NASA7 polynomial coefficient store and the equilibrium constant used to
/// derive backward rate coefficients of reversible reactions
pub mod Thermodynamics;
#[allow(non_snake_case)]
pub mod Utils;
