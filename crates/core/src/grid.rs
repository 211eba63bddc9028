//! Wall/path cell matrix shared by generation, reachability, and obstacle navigation.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Coord, Direction};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn filled(width: usize, height: usize, cell: Cell) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be non-zero, got {width}x{height}");
        Self { width, height, cells: vec![cell; width * height] }
    }

    /// Builds a grid from rows. Rows of differing lengths are a caller bug.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert!(!rows.is_empty(), "grid must have at least one row");
        let width = rows[0].len();
        assert!(width > 0, "grid rows must not be empty");
        let height = rows.len();

        let mut cells = Vec::with_capacity(width * height);
        for (index, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), width, "grid row {index} is not {width} cells wide");
            cells.extend(row);
        }
        Self { width, height, cells }
    }

    /// `#` is wall, anything else is path.
    pub fn from_ascii(lines: &[&str]) -> Self {
        Self::from_rows(
            lines
                .iter()
                .map(|line| {
                    line.chars()
                        .map(|ch| if ch == '#' { Cell::Wall } else { Cell::Path })
                        .collect()
                })
                .collect(),
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.height
            && (coord.col as usize) < self.width
    }

    pub fn is_border(&self, coord: Coord) -> bool {
        self.in_bounds(coord)
            && (coord.row == 0
                || coord.col == 0
                || coord.row as usize == self.height - 1
                || coord.col as usize == self.width - 1)
    }

    pub fn is_interior(&self, coord: Coord) -> bool {
        self.in_bounds(coord) && !self.is_border(coord)
    }

    /// Out-of-bounds cells read as wall.
    pub fn cell(&self, coord: Coord) -> Cell {
        if !self.in_bounds(coord) {
            return Cell::Wall;
        }
        self.cells[self.index(coord)]
    }

    pub fn is_path(&self, coord: Coord) -> bool {
        self.cell(coord) == Cell::Path
    }

    pub fn set(&mut self, coord: Coord, cell: Cell) {
        assert!(self.in_bounds(coord), "{coord:?} is outside a {}x{} grid", self.width, self.height);
        let index = self.index(coord);
        self.cells[index] = cell;
    }

    /// Row-major flat index. Caller guarantees `coord` is in bounds.
    pub fn index(&self, coord: Coord) -> usize {
        (coord.row as usize) * self.width + (coord.col as usize)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| Coord::new(row as i32, col as i32))
        })
    }

    /// In-bounds orthogonal neighbours, in `Direction::ALL` order.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |direction| (direction, coord.step(direction)))
            .filter(|(_, next)| self.in_bounds(*next))
    }

    pub fn path_neighbor_count(&self, coord: Coord) -> usize {
        self.neighbors(coord).filter(|(_, next)| self.is_path(*next)).count()
    }

    pub fn path_cells(&self) -> Vec<Coord> {
        self.coords().filter(|coord| self.is_path(*coord)).collect()
    }

    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Path).count()
    }

    /// Interior wall cells touching at least one path cell.
    pub fn wall_cells_adjacent_to_path(&self) -> Vec<Coord> {
        self.coords()
            .filter(|coord| {
                self.is_interior(*coord)
                    && !self.is_path(*coord)
                    && self.path_neighbor_count(*coord) > 0
            })
            .collect()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 + self.cells.len());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        bytes.extend(self.cells.iter().map(|cell| match cell {
            Cell::Wall => 0_u8,
            Cell::Path => 1_u8,
        }));
        bytes
    }

    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in 0..self.height {
            for col in 0..self.width {
                out.push(if self.is_path(Coord::new(row as i32, col as i32)) { '.' } else { '#' });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_wall() {
        let grid = Grid::filled(3, 3, Cell::Path);
        assert_eq!(grid.cell(Coord::new(-1, 0)), Cell::Wall);
        assert_eq!(grid.cell(Coord::new(0, 3)), Cell::Wall);
        assert_eq!(grid.cell(Coord::new(1, 1)), Cell::Path);
    }

    #[test]
    #[should_panic(expected = "grid row 1")]
    fn ragged_rows_are_rejected() {
        Grid::from_rows(vec![vec![Cell::Wall; 3], vec![Cell::Wall; 2]]);
    }

    #[test]
    fn border_and_interior_partition_the_grid() {
        let grid = Grid::filled(5, 4, Cell::Wall);
        let border = grid.coords().filter(|coord| grid.is_border(*coord)).count();
        let interior = grid.coords().filter(|coord| grid.is_interior(*coord)).count();
        assert_eq!(border, 14);
        assert_eq!(interior, 6);
    }

    #[test]
    fn wall_cells_adjacent_to_path_skip_border_and_isolated_walls() {
        let grid = Grid::from_ascii(&["#####", "#..##", "#####", "#####"]);
        let walls = grid.wall_cells_adjacent_to_path();
        assert_eq!(walls, vec![Coord::new(1, 3), Coord::new(2, 1), Coord::new(2, 2)]);
    }

    #[test]
    fn ascii_round_trips_through_from_ascii() {
        let lines = ["#####", "#.#.#", "#...#", "#####"];
        let grid = Grid::from_ascii(&lines);
        assert_eq!(grid.to_ascii(), lines.join("\n") + "\n");
        assert_eq!(grid.path_count(), 5);
    }
}
