use std::time::{Duration, Instant};

use crate::game::Food;

/// Per-game statistics shown next to the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub apples_eaten: u32,
    /// Total growth granted by the apples eaten
    pub growth_eaten: u32,
    /// Clock is frozen once the game ends
    pub finished: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            apples_eaten: 0,
            growth_eaten: 0,
            finished: false,
        }
    }

    pub fn update(&mut self) {
        if !self.finished {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_food_eaten(&mut self, food: Food) {
        self.apples_eaten += 1;
        self.growth_eaten += food.size;
    }

    pub fn on_game_over(&mut self) {
        self.update();
        self.finished = true;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_apple_counting() {
        let mut metrics = GameMetrics::new();

        metrics.on_food_eaten(Food::new(Cell::new(1, 1), 3));
        metrics.on_food_eaten(Food::new(Cell::new(2, 1), 1));
        assert_eq!(metrics.apples_eaten, 2);
        assert_eq!(metrics.growth_eaten, 4);
    }

    #[test]
    fn test_clock_stops_at_game_over() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(20));
        metrics.on_game_over();
        let frozen = metrics.elapsed_time;
        assert!(frozen.as_millis() >= 20);

        std::thread::sleep(Duration::from_millis(20));
        metrics.update();
        assert_eq!(metrics.elapsed_time, frozen);
    }
}
