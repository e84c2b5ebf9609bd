use crate::Thermodynamics::thermo_store::ThermoRow;
use nalgebra::DVector;

/// reference pressure for the equilibrium prefactor, Pa
pub const P_REF: f64 = 1.0e5;

/// dimensionless enthalpy H/(RT) from a NASA7 coefficient row
pub fn enthalpy_rt(row: &ThermoRow, t: f64) -> f64 {
    let a = &row.coeffs;
    a[0] + a[1] * t / 2.0
        + a[2] * t.powi(2) / 3.0
        + a[3] * t.powi(3) / 4.0
        + a[4] * t.powi(4) / 5.0
        + a[5] / t
}

/// dimensionless entropy S/R from a NASA7 coefficient row
pub fn entropy_r(row: &ThermoRow, t: f64) -> f64 {
    let a = &row.coeffs;
    a[0] * t.ln() + a[1] * t + a[2] * t.powi(2) / 2.0 + a[3] * t.powi(3) / 3.0
        + a[4] * t.powi(4) / 4.0
        + a[6]
}

/// Equilibrium constant of one reaction from its net stoichiometry column nu
/// and the coefficient rows of all species (aligned to nu). The Gibbs term is
/// assembled from the dimensionless enthalpy and entropy sums,
/// Ke = (P0/(R T))^gamma * exp(dS/R - dH/RT) with gamma the sum of net
/// stoichiometric coefficients.
pub fn equilibrium_constant(
    rows: &[ThermoRow],
    nu: &DVector<f64>,
    t: f64,
    r: f64,
    p0: f64,
) -> f64 {
    let h_rt = DVector::from_iterator(rows.len(), rows.iter().map(|row| enthalpy_rt(row, t)));
    let s_r = DVector::from_iterator(rows.len(), rows.iter().map(|row| entropy_r(row, t)));
    let delta_h_rt = nu.dot(&h_rt);
    let delta_s_r = nu.dot(&s_r);
    let delta_g_rt = delta_s_r - delta_h_rt;
    let gamma = nu.sum();
    (p0 / (r * t)).powf(gamma) * delta_g_rt.exp()
}

/// backward rate coefficient kb = kf / Ke
pub fn backward_rate_coefficient(
    kf: f64,
    rows: &[ThermoRow],
    nu: &DVector<f64>,
    t: f64,
    r: f64,
    p0: f64,
) -> f64 {
    kf / equilibrium_constant(rows, nu, t, r, p0)
}
