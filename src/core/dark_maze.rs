//! Level 2: walk a freshly generated maze to the green exit.
use rand::Rng;

use crate::core::input::{InputFrame, Key};
use crate::core::maze::Maze;

/// Pixels of virtual resolution per maze column / row.
const PX_PER_COL: u32 = 40;
const PX_PER_ROW: u32 = 36;

/// Maze dimensions in cells for a virtual resolution.
pub fn maze_dimensions(resolution: (u32, u32)) -> (usize, usize) {
    let cols = (resolution.0 / PX_PER_COL).clamp(10, 100);
    let rows = (resolution.1 / PX_PER_ROW).clamp(8, 75);
    (cols as usize, rows as usize)
}

/// Largest square cell that fits `dims` on screen.
pub fn cell_size_for(screen: (i32, i32), dims: (usize, usize)) -> f32 {
    let w = screen.0.max(1) as usize / dims.0;
    let h = screen.1.max(1) as usize / dims.1;
    w.min(h).max(1) as f32
}

#[derive(Debug)]
pub struct DarkMaze {
    maze: Maze,
    dims: (usize, usize),
    screen: (i32, i32),
}

impl DarkMaze {
    pub fn new<R: Rng + ?Sized>(resolution: (u32, u32), screen: (i32, i32), rng: &mut R) -> Self {
        let dims = maze_dimensions(resolution);
        let mut maze = Maze::new(dims.0, dims.1, cell_size_for(screen, dims));
        maze.generate(rng);
        log::debug!("Generated {}x{} maze, cell {}px", dims.0, dims.1, maze.cell_size());
        Self { maze, dims, screen }
    }

    pub fn maze(&self) -> &Maze { &self.maze }

    #[cfg(test)]
    pub(crate) fn maze_mut(&mut self) -> &mut Maze { &mut self.maze }

    /// Rebuilds the maze when the size setting or the screen changed.
    pub fn ensure_size<R: Rng + ?Sized>(&mut self, resolution: (u32, u32), screen: (i32, i32), rng: &mut R) {
        if maze_dimensions(resolution) != self.dims || screen != self.screen {
            *self = Self::new(resolution, screen, rng);
        }
    }

    pub fn update(&mut self, input: &InputFrame, dt: f32) {
        let up = input.held_any(&[Key::Letter('W'), Key::Up]);
        let down = input.held_any(&[Key::Letter('S'), Key::Down]);
        let left = input.held_any(&[Key::Letter('A'), Key::Left]);
        let right = input.held_any(&[Key::Letter('D'), Key::Right]);
        self.maze.update_player(dt, up, down, left, right);
    }

    /// Enter at the exit moves on to the next level.
    pub fn wants_next_level(&self, input: &InputFrame) -> bool {
        self.maze.is_at_exit() && input.pressed(Key::Enter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn dimensions_are_clamped() {
        assert_eq!(maze_dimensions((1280, 720)), (32, 20));
        assert_eq!(maze_dimensions((100, 100)), (10, 8));
        assert_eq!(maze_dimensions((10000, 10000)), (100, 75));
    }

    #[test]
    fn cells_fit_on_screen() {
        let dims = (32, 20);
        let cs = cell_size_for((1920, 1080), dims);
        assert_eq!(cs, 54.0);
        assert!(cs * dims.0 as f32 <= 1920.0 && cs * dims.1 as f32 <= 1080.0);
        assert_eq!(cell_size_for((0, 0), dims), 1.0);
    }

    #[test]
    fn resize_rebuilds_only_on_change() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut level = DarkMaze::new((1280, 720), (1920, 1080), &mut rng);
        assert_eq!((level.maze().cols(), level.maze().rows()), (32, 20));
        level.ensure_size((1280, 720), (1920, 1080), &mut rng);
        assert_eq!(level.maze().cols(), 32);
        level.ensure_size((800, 600), (1920, 1080), &mut rng);
        assert_eq!((level.maze().cols(), level.maze().rows()), (20, 16));
        assert!(level.maze().is_perfect());
    }

    #[test]
    fn enter_away_from_exit_does_nothing() {
        let level = DarkMaze::new((800, 600), (800, 600), &mut StdRng::seed_from_u64(1));
        assert!(!level.wants_next_level(&InputFrame::with_pressed(&[Key::Enter])));
    }

    #[test]
    fn arrows_and_wasd_both_move() {
        let mut rng = StdRng::seed_from_u64(2);
        // The start cell has room to move inside it whichever walls are closed.
        for key in [Key::Letter('D'), Key::Right, Key::Letter('S'), Key::Down] {
            let mut level = DarkMaze::new((800, 600), (800, 600), &mut rng);
            let start = level.maze().player_pos();
            level.update(&InputFrame::with_held(&[key]), 1.0 / 60.0);
            assert_ne!(level.maze().player_pos(), start, "{key:?}");
        }
    }
}
