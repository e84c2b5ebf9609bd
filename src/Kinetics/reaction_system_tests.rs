/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Kinetics::KineticsError;
    use crate::Kinetics::reaction_system::ReactionSystem;
    use crate::Kinetics::reactions::ParamUpdate;
    use crate::Thermodynamics::equilibrium::{P_REF, equilibrium_constant};
    use crate::Thermodynamics::thermo_store::{ThermoRow, ThermoStore};
    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use serde_json::{Value, json};
    use std::sync::Arc;

    const R: f64 = 8.314;

    fn empty_store() -> Arc<ThermoStore> {
        Arc::new(ThermoStore::new())
    }

    /// three species, two irreversible constant-rate reactions
    fn two_reaction_doc() -> Value {
        json!({
            "phase": {"speciesArray": ["A", "B", "C"]},
            "reactionData": [
                {
                    "reversible": "no",
                    "type": "Elementary",
                    "rateCoeff": {"Constant": {"k": 10.0}},
                    "reactants": {"A": 1.0, "B": 2.0},
                    "products": {"C": 2.0}
                },
                {
                    "reversible": "no",
                    "type": "Elementary",
                    "rateCoeff": {"Constant": {"k": 10.0}},
                    "reactants": {"A": 2.0, "C": 2.0},
                    "products": {"B": 1.0, "C": 1.0}
                }
            ]
        })
    }

    fn coef_doc() -> Value {
        json!({
            "phase": {"speciesArray": ["A", "B"]},
            "reactionData": [
                {
                    "reversible": "no",
                    "type": "Elementary",
                    "rateCoeff": {"Arrhenius": {"A": 0.00045, "E": 1.7}},
                    "reactants": {"A": 1.0},
                    "products": {"B": 1.0}
                },
                {
                    "reversible": "no",
                    "type": "Elementary",
                    "rateCoeff": {"modifiedArrhenius": {"A": 0.00045, "b": 1.2, "E": 1.7}},
                    "reactants": {"B": 1.0},
                    "products": {"A": 1.0}
                }
            ]
        })
    }

    fn reversible_store() -> Arc<ThermoStore> {
        let mut store = ThermoStore::new();
        store.add_species(
            "H2",
            vec![
                ThermoRow::new(
                    300.0,
                    1000.0,
                    [3.298124, 8.249442e-4, -8.143015e-7, -9.475434e-11, 4.134872e-13, -1012.5209, -3.294094],
                ),
                ThermoRow::new(
                    1000.0,
                    5000.0,
                    [2.991423, 7.000644e-4, -5.633829e-8, -9.231578e-12, 1.582752e-15, -835.034, -1.35511],
                ),
            ],
        );
        store.add_species(
            "O2",
            vec![
                ThermoRow::new(
                    300.0,
                    1000.0,
                    [3.212936, 1.127486e-3, -5.75615e-7, 1.313877e-9, -8.768554e-13, -1005.249, 6.034738],
                ),
                ThermoRow::new(
                    1000.0,
                    5000.0,
                    [3.697578, 6.135197e-4, -1.258842e-7, 1.775281e-11, -1.136435e-15, -1233.9301, 3.189166],
                ),
            ],
        );
        store.add_species(
            "OH",
            vec![
                ThermoRow::new(
                    300.0,
                    1000.0,
                    [3.637266, 1.85091e-4, -1.676165e-6, 2.387203e-9, -1.087741e-12, 3606.782, 1.3588605],
                ),
                ThermoRow::new(
                    1000.0,
                    5000.0,
                    [2.88273, 1.013974e-3, -2.276877e-7, 2.174684e-11, -5.126305e-16, 3886.888, 5.595712],
                ),
            ],
        );
        Arc::new(store)
    }

    fn reversible_doc() -> Value {
        json!({
            "phase": {"speciesArray": ["H2", "O2", "OH"]},
            "reactionData": [{
                "reversible": "yes",
                "type": "Elementary",
                "rateCoeff": {"modifiedArrhenius": {"A": 1e7, "b": 0.5, "E": 5e4}},
                "reactants": {"H2": 1.0, "O2": 1.0},
                "products": {"OH": 2.0}
            }]
        })
    }

    #[test]
    fn test_progress_rates_scenario() {
        let mut system = ReactionSystem::from_value(&two_reaction_doc(), empty_store()).unwrap();
        let x = DVector::from_vec(vec![1.0, 2.0, 1.0]);
        let w = system.progress_rates(&x, 10.0).unwrap();
        assert_relative_eq!(w[0], 40.0, max_relative = 1e-12);
        assert_relative_eq!(w[1], 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_reaction_rates_scenario() {
        let mut system = ReactionSystem::from_value(&two_reaction_doc(), empty_store()).unwrap();
        let x = DVector::from_vec(vec![1.0, 2.0, 1.0]);
        let rates = system.reaction_rates(&x, 10.0).unwrap();
        assert_relative_eq!(rates[0], -60.0, max_relative = 1e-12);
        assert_relative_eq!(rates[1], -70.0, max_relative = 1e-12);
        assert_relative_eq!(rates[2], 70.0, max_relative = 1e-12);
    }

    #[test]
    fn test_reaction_rates_equal_net_stoichiometry_times_progress() {
        let mut system = ReactionSystem::from_value(&two_reaction_doc(), empty_store()).unwrap();
        let x = DVector::from_vec(vec![1.0, 2.0, 1.0]);
        let w = system.progress_rates(&x, 10.0).unwrap();
        let rates = system.reaction_rates(&x, 10.0).unwrap();
        let (vprime, v2prime) = system.stoichiometry_matrices();
        let expected = (v2prime - vprime) * w;
        for i in 0..rates.len() {
            assert_relative_eq!(rates[i], expected[i], max_relative = 1e-12);
        }
    }

    #[test]
    fn test_reaction_coef_regressions() {
        let mut system = ReactionSystem::from_value(&coef_doc(), empty_store()).unwrap();
        let coefs = system.reaction_coefs(900.0).unwrap();
        assert_relative_eq!(coefs[0].0, 0.00044989777442266471, max_relative = 1e-14);
        assert_relative_eq!(coefs[1].0, 1.5783556022951033, max_relative = 1e-14);
        assert_eq!(coefs[0].1, None);
        assert_eq!(coefs[1].1, None);
    }

    #[test]
    fn test_reaction_coefs_idempotent() {
        let mut system = ReactionSystem::from_value(&coef_doc(), empty_store()).unwrap();
        let first = system.reaction_coefs(900.0).unwrap();
        let second = system.reaction_coefs(900.0).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_params_then_reevaluate() {
        let mut system = ReactionSystem::from_value(&coef_doc(), empty_store()).unwrap();
        let update = ParamUpdate {
            k: Some(json!(10.0)),
            coeftype: Some("Constant".to_string()),
            ..Default::default()
        };
        system.set_params(1, &update).unwrap();
        let coefs = system.reaction_coefs(900.0).unwrap();
        assert_relative_eq!(coefs[0].0, 0.00044989777442266471, max_relative = 1e-14);
        assert_relative_eq!(coefs[1].0, 10.0, max_relative = 1e-14);
    }

    #[test]
    fn test_set_params_error_kinds() {
        let mut system = ReactionSystem::from_value(&coef_doc(), empty_store()).unwrap();
        let update = ParamUpdate {
            a: Some(json!("ten")),
            ..Default::default()
        };
        assert!(matches!(
            system.set_params(0, &update),
            Err(KineticsError::InvalidInput(_))
        ));
        let update = ParamUpdate {
            a: Some(json!([1.0, 2.0])),
            ..Default::default()
        };
        assert!(matches!(
            system.set_params(0, &update),
            Err(KineticsError::TypeMismatch(_))
        ));
        let update = ParamUpdate {
            coeftype: Some("Quantum".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            system.set_params(0, &update),
            Err(KineticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_set_params_index_out_of_range() {
        let mut system = ReactionSystem::from_value(&coef_doc(), empty_store()).unwrap();
        let err = system.set_params(5, &ParamUpdate::default()).unwrap_err();
        assert!(matches!(
            err,
            KineticsError::IndexOutOfRange { index: 5, len: 2 }
        ));
    }

    #[test]
    fn test_get_params_round_trip() {
        let record = crate::Kinetics::reaction_parser::parse_reaction_value(&two_reaction_doc())
            .unwrap();
        let system = ReactionSystem::from_record(&record, empty_store()).unwrap();
        let read = system.get_params();
        assert_eq!(read.species, record.species);
        assert_eq!(read.reactions, record.reactions);
    }

    #[test]
    fn test_reversible_backward_coefficient() {
        let store = reversible_store();
        let mut system = ReactionSystem::from_value(&reversible_doc(), Arc::clone(&store)).unwrap();
        let t = 900.0;
        let coefs = system.reaction_coefs(t).unwrap();
        let (kf, kb) = coefs[0];
        let kb = kb.expect("reversible reaction must have a backward coefficient");
        assert!(kf > 0.0 && kb > 0.0);

        // cross-check against the equilibrium constant assembled by hand
        let species: Vec<String> = ["H2", "O2", "OH"].iter().map(|s| s.to_string()).collect();
        let rows = store.coefficients(&species, t).unwrap();
        let nu = DVector::from_vec(vec![-1.0, -1.0, 2.0]);
        let ke = equilibrium_constant(&rows, &nu, t, R, P_REF);
        assert_relative_eq!(kb, kf / ke, max_relative = 1e-12);
    }

    #[test]
    fn test_reversible_progress_rate_has_both_terms() {
        let store = reversible_store();
        let mut system = ReactionSystem::from_value(&reversible_doc(), Arc::clone(&store)).unwrap();
        let t = 900.0;
        let x = DVector::from_vec(vec![2.0, 1.0, 0.5]);
        let w = system.progress_rates(&x, t).unwrap();
        let (kf, kb) = system.reaction_coefs(t).unwrap()[0];
        let kb = kb.unwrap();
        let expected = kf * 2.0 * 1.0 - kb * 0.5_f64.powi(2);
        assert_relative_eq!(w[0], expected, max_relative = 1e-12);
    }

    #[test]
    fn test_reversible_below_envelope_names_species() {
        // T = 200 is below the 300 K envelope but still leaves the forward
        // coefficient representable, so the failure comes from the store
        let mut system =
            ReactionSystem::from_value(&reversible_doc(), reversible_store()).unwrap();
        let x = DVector::from_vec(vec![2.0, 1.0, 0.5]);
        let err = system.progress_rates(&x, 200.0).unwrap_err();
        match err {
            KineticsError::Thermo(thermo_err) => {
                let msg = thermo_err.to_string();
                assert!(msg.contains("below"));
                assert!(msg.contains("300"));
            }
            other => panic!("expected a thermo error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_temperature_rejected_by_system() {
        let mut system = ReactionSystem::from_value(&two_reaction_doc(), empty_store()).unwrap();
        let x = DVector::from_vec(vec![1.0, 2.0, 1.0]);
        assert!(matches!(
            system.reaction_rates(&x, -10.0),
            Err(KineticsError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_display_counts_variants() {
        let system = ReactionSystem::from_value(&reversible_doc(), reversible_store()).unwrap();
        let text = system.to_string();
        assert!(text.contains("1 reversible reaction(s)"));
        assert!(text.contains("0 irreversible reaction(s)"));
    }
}
