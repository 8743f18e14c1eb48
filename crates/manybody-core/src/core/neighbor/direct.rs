use super::NeighborError;
use super::table::NeighborTable;
use crate::core::models::simulation_box::SimulationBox;
use nalgebra::Vector3;

/// Fills `table` by testing every unordered pair once.
pub(super) fn build(
    sim_box: &SimulationBox,
    positions: &[Vector3<f64>],
    cutoff: f64,
    table: &mut NeighborTable,
) -> Result<(), NeighborError> {
    table.clear();
    let cutoff_sq = cutoff * cutoff;
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let dr = sim_box.minimum_image(&(positions[j] - positions[i]));
            if dr.norm_squared() < cutoff_sq {
                table.push_pair(i, j)?;
            }
        }
    }
    Ok(())
}
