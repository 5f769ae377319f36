use alloc::collections::{BTreeSet, VecDeque};

use crate::*;

/// Recomputes the `powered` flag on every tile from scratch.
///
/// Clears the whole grid, then walks the live-edge graph outward from the
/// power plant with an explicit worklist and a visited set keyed by
/// coordinate, so rings of tiles terminate and each tile is visited at most
/// once. A pure function of the current masks: re-running it without a
/// rotation in between yields the identical power assignment.
///
/// Returns how many tiles ended up powered.
pub fn propagate(grid: &mut Grid) -> CellCount {
    for tile in grid.tiles_mut() {
        tile.set_power(false);
    }

    let start = grid.plant_coords();
    grid[start].set_power(true);
    let mut powered: CellCount = 1;

    let mut visited = BTreeSet::from([start]);
    let mut to_visit: VecDeque<_> = grid[start].connected_neighbors(grid).into_iter().collect();

    while let Some(visit_coords) = to_visit.pop_front() {
        if !visited.insert(visit_coords) {
            continue;
        }

        grid[visit_coords].set_power(true);
        powered += 1;
        log::trace!("Powered tile at {:?}", visit_coords);

        to_visit.extend(
            grid[visit_coords]
                .connected_neighbors(grid)
                .into_iter()
                .filter(|pos| !visited.contains(pos)),
        );
    }

    log::debug!("Power reaches {} of {} tiles", powered, grid.total_tiles());
    powered
}
