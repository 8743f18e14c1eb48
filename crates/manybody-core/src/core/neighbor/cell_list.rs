use super::NeighborError;
use super::table::NeighborTable;
use crate::core::models::simulation_box::SimulationBox;
use nalgebra::Vector3;

/// Particles bucketed into a periodic grid of cells, laid out by counting sort.
///
/// Every cell is at least one cutoff thick along each axis, so all neighbors
/// of a particle lie in its own cell or in one of the adjacent cells.
struct CellGrid {
    dims: [usize; 3],
    cell_of: Vec<usize>,
    start: Vec<usize>,
    count: Vec<usize>,
    contents: Vec<usize>,
    /// Distinct periodic neighbor indices of each cell coordinate, per axis.
    adjacent: [Vec<Vec<usize>>; 3],
}

impl CellGrid {
    fn new(sim_box: &SimulationBox, positions: &[Vector3<f64>], cutoff: f64) -> Self {
        let thickness = sim_box.thickness();
        let dims = [0usize, 1, 2].map(|k| ((thickness[k] / cutoff).floor() as usize).max(1));

        let cell_of: Vec<usize> = positions
            .iter()
            .map(|r| {
                let s = sim_box.to_fractional(r);
                let [cx, cy, cz] = [0usize, 1, 2].map(|k| cell_coordinate(s[k], dims[k]));
                linear_index(cx, cy, cz, &dims)
            })
            .collect();

        let num_cells: usize = dims.iter().product();
        let mut count = vec![0usize; num_cells];
        for &cell in &cell_of {
            count[cell] += 1;
        }
        let mut start = vec![0usize; num_cells];
        for cell in 1..num_cells {
            start[cell] = start[cell - 1] + count[cell - 1];
        }
        let mut fill = start.clone();
        let mut contents = vec![0usize; positions.len()];
        for (particle, &cell) in cell_of.iter().enumerate() {
            contents[fill[cell]] = particle;
            fill[cell] += 1;
        }

        let adjacent = dims.map(|n| (0..n).map(|c| adjacent_along_axis(c, n)).collect());

        Self {
            dims,
            cell_of,
            start,
            count,
            contents,
            adjacent,
        }
    }

    fn coordinates(&self, cell: usize) -> [usize; 3] {
        let [nx, ny, _] = self.dims;
        [cell % nx, (cell / nx) % ny, cell / (nx * ny)]
    }

    fn particles_in(&self, cell: usize) -> &[usize] {
        &self.contents[self.start[cell]..self.start[cell] + self.count[cell]]
    }
}

/// Fills `table` from a linked-cell search.
///
/// Produces the same unordered pair set as the direct search.
pub(super) fn build(
    sim_box: &SimulationBox,
    positions: &[Vector3<f64>],
    cutoff: f64,
    table: &mut NeighborTable,
) -> Result<(), NeighborError> {
    table.clear();
    let grid = CellGrid::new(sim_box, positions, cutoff);
    let cutoff_sq = cutoff * cutoff;

    for i in 0..positions.len() {
        let [cx, cy, cz] = grid.coordinates(grid.cell_of[i]);
        for &nx in &grid.adjacent[0][cx] {
            for &ny in &grid.adjacent[1][cy] {
                for &nz in &grid.adjacent[2][cz] {
                    let cell = linear_index(nx, ny, nz, &grid.dims);
                    for &j in grid.particles_in(cell) {
                        if j <= i {
                            continue;
                        }
                        let dr = sim_box.minimum_image(&(positions[j] - positions[i]));
                        if dr.norm_squared() < cutoff_sq {
                            table.push_pair(i, j)?;
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

#[inline]
fn linear_index(cx: usize, cy: usize, cz: usize, dims: &[usize; 3]) -> usize {
    cx + dims[0] * (cy + dims[1] * cz)
}

#[inline]
fn cell_coordinate(s: f64, n: usize) -> usize {
    ((s * n as f64).floor() as isize).rem_euclid(n as isize) as usize
}

fn adjacent_along_axis(c: usize, n: usize) -> Vec<usize> {
    let mut cells = vec![(c + n - 1) % n, c, (c + 1) % n];
    cells.sort_unstable();
    cells.dedup();
    cells
}
