use nalgebra::Vector3;

/// Bulk observables accumulated during one force evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceReport {
    pub potential_energy: f64,
    /// Diagonal of the virial tensor, `sum_i x_i * F_i` per axis.
    pub virial: Vector3<f64>,
    pub heat_current: Vector3<f64>,
}

impl ForceReport {
    #[inline]
    pub fn virial_trace(&self) -> f64 {
        self.virial.sum()
    }

    /// Instantaneous pressure in eV/Å³ from the virial theorem,
    /// `(2 K + W) / (3 V)`.
    pub fn pressure(&self, kinetic_energy: f64, volume: f64) -> f64 {
        (2.0 * kinetic_energy + self.virial_trace()) / (3.0 * volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::BOLTZMANN;

    fn with_virial(virial: Vector3<f64>) -> ForceReport {
        ForceReport {
            virial,
            ..ForceReport::default()
        }
    }

    #[test]
    fn virial_trace_sums_diagonal() {
        let report = with_virial(Vector3::new(1.0, -2.0, 4.5));
        assert_eq!(report.virial_trace(), 3.5);
    }

    #[test]
    fn pressure_without_virial_is_the_ideal_gas_value() {
        let (n, temperature, volume) = (108.0, 60.0, 1000.0);
        let kinetic = 1.5 * n * BOLTZMANN * temperature;
        let pressure = ForceReport::default().pressure(kinetic, volume);
        assert!((pressure - n * BOLTZMANN * temperature / volume).abs() < 1e-15);
    }

    #[test]
    fn negative_virial_lowers_pressure() {
        let report = with_virial(Vector3::new(-1.0, -1.0, -1.0));
        assert!((report.pressure(0.0, 10.0) + 0.1).abs() < 1e-15);
        assert!(report.pressure(1.5, 10.0).abs() < 1e-15);
    }
}
