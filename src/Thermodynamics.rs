/// storage and retrieval of NASA7 polynomial coefficients. The store is keyed
/// by species name, every species holds one 7-coefficient row per validity
/// range [TLOW, THIGH]
pub mod thermo_store;
/// equilibrium constant from NASA7 polynomials and the backward rate
/// coefficient derived from it
pub mod equilibrium;
