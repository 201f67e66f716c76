//! Maze generation, collision and player movement.
use rand::Rng;

pub const TOP: usize = 0;
pub const RIGHT: usize = 1;
pub const BOTTOM: usize = 2;
pub const LEFT: usize = 3;

/// Tolerance used by wall tests so the player never jitters against a wall.
const WALL_EPSILON: f32 = 0.1;
const DIAGONAL: f32 = 0.707;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub visited: bool,
    /// top, right, bottom, left
    pub walls: [bool; 4],
}

impl Default for Cell {
    fn default() -> Self { Self { visited: false, walls: [true; 4] } }
}

#[derive(Clone, Debug)]
pub struct Maze {
    cols: usize,
    rows: usize,
    cell_size: f32,
    grid: Vec<Vec<Cell>>,
    player_cell: (usize, usize),
    player_pos: (f32, f32),
    player_radius: f32,
    player_speed: f32,
}

impl Maze {
    /// A fully walled `cols × rows` grid. Call [`Maze::generate`] to carve it.
    pub fn new(cols: usize, rows: usize, cell_size: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        let cell_size = cell_size.max(1.0);
        Self {
            cols,
            rows,
            cell_size,
            grid: vec![vec![Cell::default(); cols]; rows],
            player_cell: (0, 0),
            player_pos: (cell_size / 2.0, cell_size / 2.0),
            player_radius: cell_size / 4.0,
            player_speed: 4.0 * cell_size,
        }
    }

    pub fn cols(&self) -> usize { self.cols }
    pub fn rows(&self) -> usize { self.rows }
    pub fn cell_size(&self) -> f32 { self.cell_size }
    pub fn cell(&self, x: usize, y: usize) -> &Cell { &self.grid[y][x] }
    pub fn player_cell(&self) -> (usize, usize) { self.player_cell }
    pub fn player_pos(&self) -> (f32, f32) { self.player_pos }
    pub fn player_radius(&self) -> f32 { self.player_radius }
    pub fn exit_cell(&self) -> (usize, usize) { (self.cols - 1, self.rows - 1) }

    pub fn is_at_exit(&self) -> bool { self.player_cell == self.exit_cell() }

    /// Carves a perfect maze with randomized depth-first backtracking and puts
    /// the player back at the entrance.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.grid = vec![vec![Cell::default(); self.cols]; self.rows];
        self.reset_player();

        let mut stack = vec![(0usize, 0usize)];
        self.grid[0][0].visited = true;

        while let Some(&(cx, cy)) = stack.last() {
            let neighbors = self.unvisited_neighbors(cx, cy);
            if neighbors.is_empty() {
                stack.pop();
                continue;
            }
            let (nx, ny) = neighbors[rng.gen_range(0..neighbors.len())];
            self.remove_wall((cx, cy), (nx, ny));
            self.grid[ny][nx].visited = true;
            stack.push((nx, ny));
        }

        // Keep the exit reachable even if the carve above ever changes.
        let (ex, ey) = self.exit_cell();
        if self.cols > 1 {
            self.grid[ey][ex].walls[LEFT] = false;
            self.grid[ey][ex - 1].walls[RIGHT] = false;
        }
        if self.rows > 1 {
            self.grid[ey][ex].walls[TOP] = false;
            self.grid[ey - 1][ex].walls[BOTTOM] = false;
        }
    }

    pub fn reset_player(&mut self) {
        self.player_cell = (0, 0);
        self.player_pos = (self.cell_size / 2.0, self.cell_size / 2.0);
    }

    #[cfg(test)]
    pub(crate) fn place_player(&mut self, cell: (usize, usize)) {
        self.player_cell = cell;
        self.player_pos = ((cell.0 as f32 + 0.5) * self.cell_size, (cell.1 as f32 + 0.5) * self.cell_size);
    }

    fn unvisited_neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        if y > 0 && !self.grid[y - 1][x].visited { out.push((x, y - 1)); }
        if x + 1 < self.cols && !self.grid[y][x + 1].visited { out.push((x + 1, y)); }
        if y + 1 < self.rows && !self.grid[y + 1][x].visited { out.push((x, y + 1)); }
        if x > 0 && !self.grid[y][x - 1].visited { out.push((x - 1, y)); }
        out
    }

    fn remove_wall(&mut self, a: (usize, usize), b: (usize, usize)) {
        let (side_a, side_b) = if a.0 == b.0 {
            if a.1 > b.1 { (TOP, BOTTOM) } else { (BOTTOM, TOP) }
        } else if a.0 > b.0 {
            (LEFT, RIGHT)
        } else {
            (RIGHT, LEFT)
        };
        self.grid[a.1][a.0].walls[side_a] = false;
        self.grid[b.1][b.0].walls[side_b] = false;
    }

    /// Whether the player circle centred at `(x, y)` fits without touching a wall.
    pub fn can_move_to(&self, x: f32, y: f32) -> bool {
        let r = self.player_radius;
        let cs = self.cell_size;
        if x - r < 0.0 || x + r >= self.cols as f32 * cs || y - r < 0.0 || y + r >= self.rows as f32 * cs {
            return false;
        }

        let clamp_col = |v: f32| ((v / cs) as usize).min(self.cols - 1);
        let clamp_row = |v: f32| ((v / cs) as usize).min(self.rows - 1);
        let (left, right) = (clamp_col(x - r), clamp_col(x + r));
        let (top, bottom) = (clamp_row(y - r), clamp_row(y + r));

        for cy in top..=bottom {
            for cx in left..=right {
                let cell = &self.grid[cy][cx];
                let cell_left = cx as f32 * cs;
                let cell_right = (cx + 1) as f32 * cs;
                let cell_top = cy as f32 * cs;
                let cell_bottom = (cy + 1) as f32 * cs;
                let overlaps_x = x + r > cell_left && x - r < cell_right;
                let overlaps_y = y + r > cell_top && y - r < cell_bottom;

                if cell.walls[TOP] && y - r < cell_top + WALL_EPSILON && overlaps_x { return false; }
                if cell.walls[RIGHT] && x + r > cell_right - WALL_EPSILON && overlaps_y { return false; }
                if cell.walls[BOTTOM] && y + r > cell_bottom - WALL_EPSILON && overlaps_x { return false; }
                if cell.walls[LEFT] && x - r < cell_left + WALL_EPSILON && overlaps_y { return false; }
            }
        }
        true
    }

    /// Moves the player for one frame, sliding along walls axis by axis.
    pub fn update_player(&mut self, dt: f32, up: bool, down: bool, left: bool, right: bool) {
        let mut dx = 0.0f32;
        let mut dy = 0.0f32;
        if up { dy -= 1.0; }
        if down { dy += 1.0; }
        if left { dx -= 1.0; }
        if right { dx += 1.0; }
        if dx == 0.0 && dy == 0.0 { return; }
        if dx != 0.0 && dy != 0.0 {
            dx *= DIAGONAL;
            dy *= DIAGONAL;
        }

        let step = self.player_speed * dt;
        let (mut x, mut y) = self.player_pos;
        if dx != 0.0 && self.can_move_to(x + dx * step, y) { x += dx * step; }
        if dy != 0.0 && self.can_move_to(x, y + dy * step) { y += dy * step; }
        self.player_pos = (x, y);

        self.player_cell = (
            ((x / self.cell_size) as usize).min(self.cols - 1),
            ((y / self.cell_size) as usize).min(self.rows - 1),
        );
    }

    /// Number of open passages between neighbouring cells.
    pub fn passage_count(&self) -> usize {
        let mut n = 0;
        for y in 0..self.rows {
            for x in 0..self.cols {
                if x + 1 < self.cols && !self.grid[y][x].walls[RIGHT] { n += 1; }
                if y + 1 < self.rows && !self.grid[y][x].walls[BOTTOM] { n += 1; }
            }
        }
        n
    }

    /// Cells reachable from the entrance through open walls.
    pub fn reachable_from_entrance(&self) -> usize {
        let mut seen = vec![vec![false; self.cols]; self.rows];
        let mut todo = vec![(0usize, 0usize)];
        seen[0][0] = true;
        let mut count = 0;
        while let Some((x, y)) = todo.pop() {
            count += 1;
            let walls = self.grid[y][x].walls;
            let mut visit = |nx: usize, ny: usize| {
                if !seen[ny][nx] {
                    seen[ny][nx] = true;
                    todo.push((nx, ny));
                }
            };
            if !walls[TOP] && y > 0 { visit(x, y - 1); }
            if !walls[RIGHT] && x + 1 < self.cols { visit(x + 1, y); }
            if !walls[BOTTOM] && y + 1 < self.rows { visit(x, y + 1); }
            if !walls[LEFT] && x > 0 { visit(x - 1, y); }
        }
        count
    }

    /// Connected and acyclic: exactly one simple path between any two cells.
    pub fn is_perfect(&self) -> bool {
        let cells = self.cols * self.rows;
        self.reachable_from_entrance() == cells && self.passage_count() == cells - 1
    }
}
