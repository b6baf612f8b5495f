//! Fixed-size binary cell grid and the generation rule

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Neighbor-count rule for computing the next generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleSet {
    /// B3/S23
    #[default]
    Conway,
    /// Overcrowding only kills above five neighbors; four or five fall
    /// through to dead because neither survival branch matches
    AboveFive,
}

impl RuleSet {
    /// Next state of a cell given its state and live neighbor count
    pub fn next_state(self, alive: bool, neighbors: u8) -> bool {
        match self {
            RuleSet::Conway => matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3)),
            RuleSet::AboveFive => {
                if alive && neighbors < 2 {
                    return false;
                }
                if alive && (neighbors == 2 || neighbors == 3) {
                    return true;
                }
                if alive && neighbors > 5 {
                    return false;
                }
                if !alive && neighbors == 3 {
                    return true;
                }
                false
            }
        }
    }
}

/// Column-major grid of alive/dead cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        x * self.height + y
    }

    /// Cell state; out-of-bounds reads as dead
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[self.index(x, y)]
    }

    /// Set a cell. Returns false if `(x, y)` is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, alive: bool) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.index(x, y);
        self.cells[i] = alive;
        true
    }

    /// Fill with random cells, each alive with probability `density`.
    /// NaN density reads as an empty grid.
    pub fn randomize(&mut self, seed: u64, density: f64) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let density = if density.is_nan() {
            0.0
        } else {
            density.clamp(0.0, 1.0)
        };
        for cell in self.cells.iter_mut() {
            *cell = rng.random_bool(density);
        }
    }

    /// Live cells in the 8-neighborhood; cells past the edge don't count
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for dx in -1isize..=1 {
            for dy in -1isize..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if self.get(nx, ny) {
                    count += 1;
                }
            }
        }
        count
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_all_dead(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Coordinates of live cells, column by column
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| (i / self.height, i % self.height))
    }

    /// Write the generation after `self` into `next` (same dimensions)
    pub fn step_into(&self, rules: RuleSet, next: &mut Grid) {
        debug_assert_eq!((self.width, self.height), (next.width, next.height));
        for x in 0..self.width {
            for y in 0..self.height {
                let alive = rules.next_state(self.get(x, y), self.live_neighbors(x, y));
                let i = next.index(x, y);
                next.cells[i] = alive;
            }
        }
    }

    /// Cell under a screen position, if any
    pub fn cell_at_screen(&self, sx: f32, sy: f32, cell_size: f32) -> Option<(usize, usize)> {
        if !(sx.is_finite() && sy.is_finite()) || sx < 0.0 || sy < 0.0 || cell_size <= 0.0 {
            return None;
        }
        let x = (sx / cell_size) as usize;
        let y = (sy / cell_size) as usize;
        (x < self.width && y < self.height).then_some((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(cells: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(10, 10);
        for &(x, y) in cells {
            grid.set(x, y, true);
        }
        grid
    }

    fn step(grid: &Grid, rules: RuleSet) -> Grid {
        let mut next = Grid::new(grid.width(), grid.height());
        grid.step_into(rules, &mut next);
        next
    }

    #[test]
    fn test_isolated_cell_dies() {
        let grid = grid_with(&[(5, 5)]);
        assert!(step(&grid, RuleSet::Conway).is_all_dead());
        assert!(step(&grid, RuleSet::AboveFive).is_all_dead());
    }

    #[test]
    fn test_birth_on_three() {
        // Dead (5, 5) has exactly three live neighbors
        let grid = grid_with(&[(4, 4), (5, 4), (6, 4)]);
        assert_eq!(grid.live_neighbors(5, 5), 3);
        let next = step(&grid, RuleSet::Conway);
        assert!(next.get(5, 5));
        // Blinker flips to vertical
        assert!(next.get(5, 3) && next.get(5, 4));
        assert!(!next.get(4, 4) && !next.get(6, 4));
    }

    #[test]
    fn test_corner_neighbors() {
        let grid = grid_with(&[(1, 0), (0, 1), (1, 1)]);
        assert_eq!(grid.live_neighbors(0, 0), 3);
        assert_eq!(grid.live_neighbors(9, 9), 0);
        assert!(step(&grid, RuleSet::Conway).get(0, 0));
    }

    #[test]
    fn test_block_is_stable() {
        let grid = grid_with(&[(2, 2), (2, 3), (3, 2), (3, 3)]);
        assert_eq!(step(&grid, RuleSet::Conway), grid);
        assert_eq!(step(&grid, RuleSet::AboveFive), grid);
    }

    #[test]
    fn test_rule_tables() {
        for n in 0..=8u8 {
            let survives = n == 2 || n == 3;
            assert_eq!(RuleSet::Conway.next_state(true, n), survives, "live n={n}");
            assert_eq!(RuleSet::Conway.next_state(false, n), n == 3, "dead n={n}");
            assert_eq!(RuleSet::AboveFive.next_state(false, n), n == 3, "dead n={n}");
        }
    }

    #[test]
    fn test_above_five_four_and_five_fall_through_to_dead() {
        assert!(!RuleSet::AboveFive.next_state(true, 4));
        assert!(!RuleSet::AboveFive.next_state(true, 5));
        assert!(!RuleSet::AboveFive.next_state(true, 6));
        assert!(RuleSet::AboveFive.next_state(true, 3));
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::new(3, 3);
        assert!(!grid.set(3, 0, true));
        assert!(!grid.get(3, 0));
        assert!(grid.is_all_dead());
    }

    #[test]
    fn test_cell_at_screen() {
        let grid = Grid::new(100, 100);
        assert_eq!(grid.cell_at_screen(15.0, 99.0, 10.0), Some((1, 9)));
        assert_eq!(grid.cell_at_screen(999.9, 0.0, 10.0), Some((99, 0)));
        assert_eq!(grid.cell_at_screen(1000.0, 0.0, 10.0), None);
        assert_eq!(grid.cell_at_screen(-0.5, 5.0, 10.0), None);
    }

    #[test]
    fn test_randomize_is_seeded() {
        let mut a = Grid::new(20, 20);
        let mut b = Grid::new(20, 20);
        a.randomize(7, 0.3);
        b.randomize(7, 0.3);
        assert_eq!(a, b);
        assert!(a.live_count() > 0);

        a.randomize(7, 0.0);
        assert!(a.is_all_dead());
    }

    #[test]
    fn test_randomize_out_of_range_density() {
        let mut grid = Grid::new(10, 10);
        grid.randomize(3, f64::NAN);
        assert!(grid.is_all_dead());

        grid.randomize(3, 2.5);
        assert_eq!(grid.live_count(), 100);

        grid.randomize(3, -1.0);
        assert!(grid.is_all_dead());
    }

    #[test]
    fn test_live_cells_coordinates() {
        let grid = grid_with(&[(1, 2), (7, 3)]);
        let cells: Vec<_> = grid.live_cells().collect();
        assert_eq!(cells, vec![(1, 2), (7, 3)]);
    }
}
