use super::ensemble::{EnsembleError, ParticleEnsemble};
use super::simulation_box::{GeometryError, SimulationBox};
use nalgebra::Vector3;
use serde::Deserialize;
use thiserror::Error;

const FCC_BASIS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.5, 0.5],
    [0.5, 0.0, 0.5],
    [0.5, 0.5, 0.0],
];

const DIAMOND_OFFSET: f64 = 0.25;

#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("Lattice must be replicated at least once along each axis")]
    ZeroCells,
    #[error("Lattice constant must be positive, got {0}")]
    InvalidLatticeConstant(f64),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Ensemble(#[from] EnsembleError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LatticeKind {
    /// Face-centered cubic, 4 atoms per conventional cell.
    #[default]
    Fcc,
    /// Diamond cubic, 8 atoms per conventional cell.
    Diamond,
}

impl LatticeKind {
    pub fn basis(&self) -> Vec<Vector3<f64>> {
        let fcc = FCC_BASIS.iter().map(|&[x, y, z]| Vector3::new(x, y, z));
        match self {
            LatticeKind::Fcc => fcc.collect(),
            LatticeKind::Diamond => fcc
                .clone()
                .chain(fcc.map(|s| s.add_scalar(DIAMOND_OFFSET)))
                .collect(),
        }
    }

    pub fn atoms_per_cell(&self) -> usize {
        match self {
            LatticeKind::Fcc => 4,
            LatticeKind::Diamond => 8,
        }
    }
}

impl std::fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LatticeKind::Fcc => write!(f, "fcc"),
            LatticeKind::Diamond => write!(f, "diamond"),
        }
    }
}

/// A periodic crystal: the box and the particles placed inside it.
#[derive(Debug, Clone)]
pub struct Crystal {
    pub sim_box: SimulationBox,
    pub ensemble: ParticleEnsemble,
}

pub struct LatticeBuilder {
    kind: LatticeKind,
    cells: usize,
    lattice_constant: f64,
    mass: f64,
}

impl LatticeBuilder {
    pub fn new(kind: LatticeKind, lattice_constant: f64, mass: f64) -> Self {
        Self {
            kind,
            cells: 1,
            lattice_constant,
            mass,
        }
    }

    /// Sets the number of conventional cells along each axis.
    pub fn cells(mut self, cells: usize) -> Self {
        self.cells = cells;
        self
    }

    /// Places atoms on the lattice inside a cubic box of edge
    /// `cells * lattice_constant`.
    ///
    /// Atoms are ordered by cell (x slowest, z fastest) and then by basis site.
    pub fn build(self) -> Result<Crystal, LatticeError> {
        if self.cells == 0 {
            return Err(LatticeError::ZeroCells);
        }
        if !(self.lattice_constant > 0.0) {
            return Err(LatticeError::InvalidLatticeConstant(self.lattice_constant));
        }

        let a = self.lattice_constant;
        let sim_box = SimulationBox::cubic(a * self.cells as f64)?;
        let basis = self.kind.basis();

        let n = self.cells.pow(3) * self.kind.atoms_per_cell();
        let mut positions = Vec::with_capacity(n);
        for ix in 0..self.cells {
            for iy in 0..self.cells {
                for iz in 0..self.cells {
                    let origin = Vector3::new(ix as f64, iy as f64, iz as f64);
                    positions.extend(basis.iter().map(|site| (origin + site) * a));
                }
            }
        }

        let ensemble = ParticleEnsemble::new(vec![self.mass; n], positions)?;
        Ok(Crystal { sim_box, ensemble })
    }
}
