use nalgebra::{Matrix3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Simulation box is degenerate (determinant = {determinant:e})")]
    DegenerateBox { determinant: f64 },
}

/// A periodic simulation cell defined by three lattice vectors.
///
/// The lattice vectors are stored as the columns of `matrix`, so a fractional
/// coordinate `s` maps to the Cartesian position `matrix * s`. The inverse is
/// computed once at construction and cached.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationBox {
    matrix: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl SimulationBox {
    /// Creates a box from a matrix whose columns are the lattice vectors.
    ///
    /// # Arguments
    ///
    /// * `matrix` - The forward box matrix (columns `a`, `b`, `c`).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateBox`] if the lattice vectors span
    /// zero volume.
    pub fn new(matrix: Matrix3<f64>) -> Result<Self, GeometryError> {
        let inverse = invert(&matrix)?;
        Ok(Self { matrix, inverse })
    }

    /// Creates a box from its three lattice vectors.
    pub fn from_columns(
        a: Vector3<f64>,
        b: Vector3<f64>,
        c: Vector3<f64>,
    ) -> Result<Self, GeometryError> {
        Self::new(Matrix3::from_columns(&[a, b, c]))
    }

    /// Creates an orthorhombic box with the given edge lengths.
    pub fn orthorhombic(lx: f64, ly: f64, lz: f64) -> Result<Self, GeometryError> {
        Self::new(Matrix3::from_diagonal(&Vector3::new(lx, ly, lz)))
    }

    /// Creates a cubic box with edge length `length`.
    pub fn cubic(length: f64) -> Result<Self, GeometryError> {
        Self::orthorhombic(length, length, length)
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    pub fn inverse(&self) -> &Matrix3<f64> {
        &self.inverse
    }

    /// Returns the (positive) cell volume.
    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    #[inline]
    pub fn to_fractional(&self, r: &Vector3<f64>) -> Vector3<f64> {
        self.inverse * r
    }

    #[inline]
    pub fn to_cartesian(&self, s: &Vector3<f64>) -> Vector3<f64> {
        self.matrix * s
    }

    /// Maps a Cartesian displacement onto its nearest periodic image.
    ///
    /// Each fractional component of the result lies in `(-0.5, 0.5]`.
    ///
    /// # Arguments
    ///
    /// * `dr` - The raw displacement `r_j - r_i`.
    ///
    /// # Return
    ///
    /// The minimum-image displacement in Cartesian coordinates.
    #[inline]
    pub fn minimum_image(&self, dr: &Vector3<f64>) -> Vector3<f64> {
        let s = self.to_fractional(dr).map(shift_to_nearest_image);
        self.to_cartesian(&s)
    }

    /// Maps a Cartesian position back into the primary cell.
    ///
    /// Each fractional component of the result lies in `[0, 1)`.
    #[inline]
    pub fn wrap(&self, r: &Vector3<f64>) -> Vector3<f64> {
        let s = self.to_fractional(r).map(wrap_into_unit);
        self.to_cartesian(&s)
    }

    /// Returns the perpendicular distances between opposite faces.
    ///
    /// Component `k` is the thickness of the cell measured along the normal of
    /// the face spanned by the two lattice vectors other than `k`. A cell grid
    /// with `floor(thickness[k] / cutoff)` slabs along axis `k` therefore has
    /// slabs at least one cutoff thick.
    pub fn thickness(&self) -> Vector3<f64> {
        let a = self.matrix.column(0).into_owned();
        let b = self.matrix.column(1).into_owned();
        let c = self.matrix.column(2).into_owned();
        let volume = self.volume();
        Vector3::new(
            volume / b.cross(&c).norm(),
            volume / c.cross(&a).norm(),
            volume / a.cross(&b).norm(),
        )
    }
}

fn invert(m: &Matrix3<f64>) -> Result<Matrix3<f64>, GeometryError> {
    let adjugate = Matrix3::new(
        m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
        m[(0, 2)] * m[(2, 1)] - m[(0, 1)] * m[(2, 2)],
        m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)],
        m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)],
        m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)],
        m[(0, 2)] * m[(1, 0)] - m[(0, 0)] * m[(1, 2)],
        m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
        m[(0, 1)] * m[(2, 0)] - m[(0, 0)] * m[(2, 1)],
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
    );
    let determinant = m[(0, 0)] * adjugate[(0, 0)]
        + m[(0, 1)] * adjugate[(1, 0)]
        + m[(0, 2)] * adjugate[(2, 0)];
    if determinant == 0.0 || !determinant.is_finite() {
        return Err(GeometryError::DegenerateBox { determinant });
    }
    Ok(adjugate / determinant)
}

#[inline]
fn shift_to_nearest_image(s: f64) -> f64 {
    s - (s - 0.5).ceil()
}

#[inline]
fn wrap_into_unit(s: f64) -> f64 {
    let wrapped = s - s.floor();
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
