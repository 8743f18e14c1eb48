use super::NeighborError;

/// One entry in a particle's neighbor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborSlot {
    /// Index of the neighboring particle.
    pub index: usize,
    /// Position of the owning particle inside the neighbor's own list.
    pub reverse: usize,
}

/// Bounded, symmetric per-particle neighbor lists.
///
/// Pairs are only ever inserted through [`NeighborTable::push_pair`], which
/// appends to both lists at once. The table is therefore symmetric by
/// construction, and every slot knows where its mirror slot lives. Slots are
/// numbered globally through [`NeighborTable::slot_offsets`] so per-bond data
/// can be stored in flat arrays aligned with the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighborTable {
    capacity: usize,
    lists: Vec<Vec<NeighborSlot>>,
}

impl NeighborTable {
    pub fn new(num_particles: usize, capacity: usize) -> Self {
        Self {
            capacity,
            lists: vec![Vec::new(); num_particles],
        }
    }

    #[inline]
    pub fn num_particles(&self) -> usize {
        self.lists.len()
    }

    pub fn clear(&mut self) {
        self.lists.iter_mut().for_each(Vec::clear);
    }

    /// Records `i` and `j` as neighbors of each other.
    ///
    /// # Errors
    ///
    /// Returns [`NeighborError::CapacityExceeded`] naming the first particle
    /// whose list is already full. Neither list is modified in that case.
    pub fn push_pair(&mut self, i: usize, j: usize) -> Result<(), NeighborError> {
        for particle in [i, j] {
            if self.lists[particle].len() >= self.capacity {
                return Err(NeighborError::CapacityExceeded {
                    particle,
                    capacity: self.capacity,
                });
            }
        }
        let slot_in_i = self.lists[i].len();
        let slot_in_j = self.lists[j].len();
        self.lists[i].push(NeighborSlot {
            index: j,
            reverse: slot_in_j,
        });
        self.lists[j].push(NeighborSlot {
            index: i,
            reverse: slot_in_i,
        });
        Ok(())
    }

    #[inline]
    pub fn neighbors(&self, i: usize) -> &[NeighborSlot] {
        &self.lists[i]
    }

    #[inline]
    pub fn count(&self, i: usize) -> usize {
        self.lists[i].len()
    }

    pub fn total_slots(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Global index of each particle's first slot, plus a trailing total.
    pub fn slot_offsets(&self) -> Vec<usize> {
        let mut offsets = Vec::with_capacity(self.lists.len() + 1);
        let mut running = 0;
        offsets.push(running);
        for list in &self.lists {
            running += list.len();
            offsets.push(running);
        }
        offsets
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.lists[i].iter().any(|slot| slot.index == j)
    }

    /// Iterates over every unordered pair once, as `(i, j)` with `i < j`.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.lists.iter().enumerate().flat_map(|(i, list)| {
            list.iter()
                .filter(move |slot| slot.index > i)
                .map(move |slot| (i, slot.index))
        })
    }
}
