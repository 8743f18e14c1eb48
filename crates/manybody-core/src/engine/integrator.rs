use crate::core::models::ensemble::ParticleEnsemble;
use crate::core::units::fs_to_natural;

/// The two halves of a velocity-Verlet step, on either side of the force
/// evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalfStep {
    /// Half kick with the current forces, then a full drift.
    Predict,
    /// Half kick with the freshly computed forces.
    Correct,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityVerlet {
    time_step: f64,
}

impl VelocityVerlet {
    /// Creates an integrator with a time step in natural units.
    pub fn new(time_step: f64) -> Self {
        Self { time_step }
    }

    pub fn from_femtoseconds(time_step_fs: f64) -> Self {
        Self::new(fs_to_natural(time_step_fs))
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn apply(&self, phase: HalfStep, ensemble: &mut ParticleEnsemble) {
        let half_step = 0.5 * self.time_step;
        let ParticleEnsemble {
            masses,
            positions,
            velocities,
            forces,
            ..
        } = ensemble;

        for (((v, x), f), &m) in velocities
            .iter_mut()
            .zip(positions.iter_mut())
            .zip(forces.iter())
            .zip(masses.iter())
        {
            *v += f * (half_step / m);
            if phase == HalfStep::Predict {
                *x += *v * self.time_step;
            }
        }
    }
}
