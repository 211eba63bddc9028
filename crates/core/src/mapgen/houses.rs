//! House placement: solid 2x2 wall blocks next to a road.

use crate::grid::Grid;
use crate::types::{Coord, HouseArea};

/// Row-major scan of every interior 2x2 all-wall block with a path on its border.
pub(super) fn find_house_candidates(grid: &Grid) -> Vec<HouseArea> {
    interior_blocks(grid)
        .filter(|area| {
            area.cells().iter().all(|cell| !grid.is_path(*cell))
                && area.border().iter().any(|cell| grid.is_path(*cell))
        })
        .collect()
}

/// Blocks anchored on an odd/odd cell that stay clear of `keep_clear`.
///
/// Reserving one of these before carving guarantees a candidate later: the
/// anchor is never visited, so the whole block stays wall, and the next cell
/// two columns over is always carved.
pub(super) fn lot_candidates(grid: &Grid, keep_clear: &[Coord]) -> Vec<HouseArea> {
    interior_blocks(grid)
        .filter(|area| area.top_left.row % 2 == 1 && area.top_left.col % 2 == 1)
        .filter(|area| area.top_left.col + 2 < grid.width() as i32 - 1)
        .filter(|area| !keep_clear.iter().any(|cell| area.contains(*cell)))
        .collect()
}

fn interior_blocks(grid: &Grid) -> impl Iterator<Item = HouseArea> + '_ {
    let last_row = grid.height() as i32 - 3;
    let last_col = grid.width() as i32 - 3;
    (1..=last_row)
        .flat_map(move |row| (1..=last_col).map(move |col| HouseArea::new(Coord::new(row, col))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidates_need_a_solid_block_and_a_road_beside_it() {
        let grid = Grid::from_ascii(&[
            "#######", //
            "#.....#", //
            "#.##..#", //
            "#.##..#", //
            "#######", //
        ]);
        let candidates = find_house_candidates(&grid);
        assert_eq!(candidates, vec![HouseArea::new(Coord::new(2, 2))]);
    }

    #[test]
    fn enclosed_wall_blocks_are_not_candidates() {
        let grid = Grid::from_ascii(&["######", "#....#", "######"]);
        assert!(find_house_candidates(&grid).is_empty());

        let solid = Grid::from_ascii(&["######", "######", "######", "######", "######"]);
        assert!(find_house_candidates(&solid).is_empty());
    }

    #[test]
    fn lots_avoid_the_starting_area() {
        let grid = Grid::filled(9, 9, crate::types::Cell::Wall);
        let keep_clear = [Coord::new(6, 1), Coord::new(6, 2), Coord::new(7, 1), Coord::new(7, 2)];
        let lots = lot_candidates(&grid, &keep_clear);

        assert!(!lots.is_empty());
        for lot in lots {
            assert!(keep_clear.iter().all(|cell| !lot.contains(*cell)), "{lot:?}");
            assert_eq!(lot.top_left.row % 2, 1);
            assert!(lot.top_left.col + 2 <= 7);
        }
    }
}
