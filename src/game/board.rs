use std::collections::{HashMap, HashSet};

use rand::{Rng, seq::SliceRandom};

use super::{config::Variant, state::Cell};

/// An apple lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Food {
    pub cell: Cell,
    /// Growth granted when eaten
    pub size: u32,
}

impl Food {
    pub fn new(cell: Cell, size: u32) -> Self {
        Self { cell, size }
    }
}

/// The playing field: fixed dimensions, wall cells and the apples currently on it
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    width: usize,
    height: usize,
    variant: Variant,
    walls: HashSet<Cell>,
    foods: HashMap<Cell, Food>,
}

impl Board {
    /// Create an empty board. Walls are derived from the variant and never change.
    pub fn new(width: usize, height: usize, variant: Variant) -> Self {
        let mut walls = HashSet::new();

        if variant.has_walls() && width > 0 && height > 0 {
            let (right, bottom) = (width as i32 - 1, height as i32 - 1);
            for x in 0..=right {
                walls.insert(Cell::new(x, 0));
                walls.insert(Cell::new(x, bottom));
            }
            for y in 0..=bottom {
                walls.insert(Cell::new(0, y));
                walls.insert(Cell::new(right, y));
            }
        }

        Self {
            width,
            height,
            variant,
            walls,
            foods: HashMap::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Check if a cell lies within `[0, width) x [0, height)`
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width as i32 && cell.y >= 0 && cell.y < self.height as i32
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    pub fn walls(&self) -> &HashSet<Cell> {
        &self.walls
    }

    pub fn foods(&self) -> impl Iterator<Item = &Food> {
        self.foods.values()
    }

    pub fn food_count(&self) -> usize {
        self.foods.len()
    }

    pub fn food_at(&self, cell: Cell) -> Option<&Food> {
        self.foods.get(&cell)
    }

    /// Put an apple on the board, returning the one it replaced
    pub fn place_food(&mut self, food: Food) -> Option<Food> {
        self.foods.insert(food.cell, food)
    }

    /// Remove and return the apple at `cell`
    pub fn take_food(&mut self, cell: Cell) -> Option<Food> {
        self.foods.remove(&cell)
    }

    pub fn clear_food(&mut self) {
        self.foods.clear();
    }

    /// Cells that are in bounds, not walls, not in `occupied` and hold no apple,
    /// in row-major order
    pub fn free_cells(&self, occupied: &[Cell]) -> Vec<Cell> {
        let occupied: HashSet<Cell> = occupied.iter().copied().collect();

        (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| Cell::new(x, y)))
            .filter(|cell| {
                !self.is_wall(*cell) && !occupied.contains(cell) && !self.foods.contains_key(cell)
            })
            .collect()
    }

    /// Place up to `count` new apples on distinct free cells and return them.
    ///
    /// Samples from the free-cell pool, so a crowded board yields fewer apples
    /// (possibly none) instead of retrying forever.
    pub fn spawn_food<R: Rng + ?Sized>(
        &mut self,
        occupied: &[Cell],
        count: usize,
        rng: &mut R,
    ) -> Vec<Food> {
        let free = self.free_cells(occupied);
        if free.len() < count {
            log::warn!(
                "only {} free cells left, wanted {} apples",
                free.len(),
                count
            );
        }

        let cells: Vec<Cell> = free.choose_multiple(rng, count).copied().collect();
        let max_size = self.variant.max_food_size();

        let spawned: Vec<Food> = cells
            .into_iter()
            .map(|cell| Food::new(cell, rng.gen_range(1..=max_size)))
            .collect();

        for food in &spawned {
            log::debug!("apple of size {} spawned at {:?}", food.size, food.cell);
            self.foods.insert(food.cell, *food);
        }

        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn snake_cells() -> Vec<Cell> {
        vec![Cell::new(3, 1), Cell::new(2, 1), Cell::new(1, 1)]
    }

    #[test]
    fn test_classic_board_has_no_walls() {
        let board = Board::new(20, 10, Variant::Classic);
        assert!(board.walls().is_empty());
        assert!(!board.is_wall(Cell::new(0, 0)));
        assert!(!board.is_wall(Cell::new(19, 9)));
    }

    #[test]
    fn test_walled_board_outer_ring() {
        let board = Board::new(6, 4, Variant::Walled);
        // 2 * 6 + 2 * 2 cells on the ring
        assert_eq!(board.walls().len(), 16);

        assert!(board.is_wall(Cell::new(0, 0)));
        assert!(board.is_wall(Cell::new(5, 2)));
        assert!(board.is_wall(Cell::new(3, 3)));
        assert!(board.is_wall(Cell::new(0, 1)));

        assert!(!board.is_wall(Cell::new(1, 1)));
        assert!(!board.is_wall(Cell::new(4, 2)));
    }

    #[test]
    fn test_bounds_checking() {
        let board = Board::new(20, 10, Variant::Classic);

        assert!(board.is_in_bounds(Cell::new(0, 0)));
        assert!(board.is_in_bounds(Cell::new(19, 9)));
        assert!(!board.is_in_bounds(Cell::new(-1, 0)));
        assert!(!board.is_in_bounds(Cell::new(20, 0)));
        assert!(!board.is_in_bounds(Cell::new(0, 10)));
    }

    #[test]
    fn test_spawn_food_avoids_snake_walls_and_apples() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::new(8, 5, Variant::Walled);
        board.place_food(Food::new(Cell::new(5, 2), 2));
        let snake = snake_cells();

        // interior is 6x3 = 18 cells, 3 snake + 1 apple taken
        let spawned = board.spawn_food(&snake, 14, &mut rng);
        assert_eq!(spawned.len(), 14);
        assert_eq!(board.food_count(), 15);

        for food in &spawned {
            assert!(!snake.contains(&food.cell));
            assert!(!board.is_wall(food.cell));
            assert!(board.is_in_bounds(food.cell));
            assert_ne!(food.cell, Cell::new(5, 2));
            assert!((1..=3).contains(&food.size));
        }
        assert!(board.free_cells(&snake).is_empty());
    }

    #[test]
    fn test_classic_food_size_is_one() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new(20, 10, Variant::Classic);

        let spawned = board.spawn_food(&snake_cells(), 30, &mut rng);
        assert_eq!(spawned.len(), 30);
        assert!(spawned.iter().all(|food| food.size == 1));
    }

    #[test]
    fn test_spawn_on_full_board_returns_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        // interior of a 5x3 walled board is exactly the starting snake
        let mut board = Board::new(5, 3, Variant::Walled);

        let spawned = board.spawn_food(&snake_cells(), 1, &mut rng);
        assert!(spawned.is_empty());
        assert_eq!(board.food_count(), 0);
    }

    #[test]
    fn test_spawn_returns_fewer_when_crowded() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut board = Board::new(6, 3, Variant::Walled);

        let spawned = board.spawn_food(&snake_cells(), 3, &mut rng);
        assert_eq!(spawned.len(), 1);
        assert_eq!(spawned[0].cell, Cell::new(4, 1));
    }

    #[test]
    fn test_seeded_spawn_is_reproducible() {
        let spawn = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::new(20, 10, Variant::Walled);
            board.spawn_food(&snake_cells(), 3, &mut rng)
        };

        assert_eq!(spawn(1389075), spawn(1389075));
    }

    #[test]
    fn test_take_food() {
        let mut board = Board::new(20, 10, Variant::Classic);
        let food = Food::new(Cell::new(4, 1), 1);
        board.place_food(food);

        assert_eq!(board.food_at(Cell::new(4, 1)), Some(&food));
        assert_eq!(board.take_food(Cell::new(4, 1)), Some(food));
        assert_eq!(board.take_food(Cell::new(4, 1)), None);
        assert_eq!(board.food_count(), 0);
    }
}
