//! Unit system constants.
//!
//! Lengths are in Å, energies in eV, masses in amu and temperatures in K. The
//! natural time unit that follows from these is about 10.18 fs.

/// Boltzmann's constant in eV/K.
pub const BOLTZMANN: f64 = 8.617343e-5;

/// Femtoseconds per natural time unit.
pub const TIME_UNIT_FS: f64 = 1.018051e1;

/// Converts a time step given in femtoseconds to natural units.
#[inline]
pub fn fs_to_natural(time_step_fs: f64) -> f64 {
    time_step_fs / TIME_UNIT_FS
}
