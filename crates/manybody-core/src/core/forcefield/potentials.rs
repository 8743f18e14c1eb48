use std::f64::consts::PI;

/// Lennard-Jones 12-6 pair term at squared separation `r_sq`.
///
/// Returns `(energy, factor)` where `factor * r_ij` is the force on particle
/// `i` for the displacement `r_ij = x_j - x_i`.
#[inline]
pub fn lennard_jones_12_6(r_sq: f64, epsilon: f64, sigma: f64) -> (f64, f64) {
    let sigma6 = sigma.powi(6);
    let sigma12 = sigma6 * sigma6;
    let inv_r2 = 1.0 / r_sq;
    let inv_r6 = inv_r2 * inv_r2 * inv_r2;
    let inv_r8 = inv_r6 * inv_r2;
    let inv_r12 = inv_r6 * inv_r6;
    let inv_r14 = inv_r12 * inv_r2;
    let energy = 4.0 * epsilon * (sigma12 * inv_r12 - sigma6 * inv_r6);
    let factor = 24.0 * epsilon * sigma6 * inv_r8 - 48.0 * epsilon * sigma12 * inv_r14;
    (energy, factor)
}

/// Smooth Tersoff cutoff and its derivative.
#[inline]
pub fn tersoff_cutoff(d: f64, r1: f64, r2: f64) -> (f64, f64) {
    if d < r1 {
        (1.0, 0.0)
    } else if d < r2 {
        let pi_factor = PI / (r2 - r1);
        let phase = pi_factor * (d - r1);
        (0.5 + 0.5 * phase.cos(), -0.5 * pi_factor * phase.sin())
    } else {
        (0.0, 0.0)
    }
}

/// Repulsive pair term `A exp(-lambda d)` and its derivative.
#[inline]
pub fn tersoff_repulsive(d: f64, a: f64, lambda: f64) -> (f64, f64) {
    let fr = a * (-lambda * d).exp();
    (fr, -lambda * fr)
}

/// Attractive pair magnitude `B exp(-mu d)` and its derivative.
#[inline]
pub fn tersoff_attractive(d: f64, b: f64, mu: f64) -> (f64, f64) {
    let fa = b * (-mu * d).exp();
    (fa, -mu * fa)
}

/// Angular term `g(cos_theta)` and its derivative with respect to `cos_theta`.
#[inline]
pub fn tersoff_angular(cos_theta: f64, c: f64, d: f64, h: f64) -> (f64, f64) {
    let c2 = c * c;
    let d2 = d * d;
    let shifted = cos_theta - h;
    let denom = d2 + shifted * shifted;
    let g = 1.0 + c2 / d2 - c2 / denom;
    let gp = 2.0 * c2 * shifted / (denom * denom);
    (g, gp)
}

/// Bond order `b(zeta)` and its derivative with respect to `zeta`.
///
/// At `zeta == 0` the bond order is 1 and the derivative is taken as 0.
#[inline]
pub fn tersoff_bond_order(zeta: f64, beta: f64, n: f64) -> (f64, f64) {
    if zeta <= 0.0 {
        return (1.0, 0.0);
    }
    let bzn = (beta * zeta).powf(n);
    let b = (1.0 + bzn).powf(-0.5 / n);
    let bp = -b * bzn * 0.5 / ((1.0 + bzn) * zeta);
    (b, bp)
}
