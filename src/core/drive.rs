//! Level 3: a top-down drive down a three-lane road, dodging slower traffic.
//!
//! All coordinates are screen pixels. The player's car sits at a fixed height
//! and the road scrolls; traffic moves down the screen at the difference
//! between the player's speed and its own.
use rand::Rng;

use crate::core::Rect;
use crate::core::input::{InputFrame, Key};

pub const LANES: usize = 3;
pub const LANE_WIDTH: f32 = 140.0;
pub const CAR_W: f32 = 50.0;
pub const CAR_H: f32 = 90.0;

pub const MIN_SPEED: f32 = 150.0;
pub const MAX_SPEED: f32 = 700.0;
const ACCEL: f32 = 320.0;
const BRAKE: f32 = 480.0;
const STEER_SPEED: f32 = 380.0;

/// Traffic never drives faster than this, so it always drifts down the screen.
const TRAFFIC_MIN_SPEED: f32 = 40.0;
const TRAFFIC_MAX_SPEED: f32 = 130.0;

pub const PX_PER_METER: f32 = 10.0;
pub const GOAL_METERS: f32 = 2000.0;

const HORN_CHANCE: f64 = 0.35;
/// Gap in pixels under which a car with a horn sounds it.
const HORN_RANGE: f32 = 220.0;
/// Hitboxes are shrunk by this much on each side.
const HIT_SLACK: f32 = 4.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Horn {
    Ready,
    Sounded,
}

#[derive(Clone, Debug)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub speed: f32,
    pub horn: Option<Horn>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Driving,
    Crashed,
    Finished,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DriveEvent {
    Horn,
    Crash,
    Finished,
}

impl Obstacle {
    pub fn rect(&self) -> Rect { Rect { x: self.x - self.w / 2.0, y: self.y, w: self.w, h: self.h } }
}

#[derive(Debug)]
pub struct Drive {
    screen: (f32, f32),
    car_x: f32,
    speed: f32,
    distance: f32,
    obstacles: Vec<Obstacle>,
    spawn_timer: f32,
    phase: Phase,
    passed: u32,
}

impl Drive {
    pub fn new(screen: (i32, i32)) -> Self {
        let screen = (screen.0.max(1) as f32, screen.1.max(1) as f32);
        Self {
            screen,
            car_x: screen.0 / 2.0,
            speed: MIN_SPEED,
            distance: 0.0,
            obstacles: Vec::new(),
            spawn_timer: 1.0,
            phase: Phase::Driving,
            passed: 0,
        }
    }

    pub fn restart(&mut self) {
        *self = Self::new((self.screen.0 as i32, self.screen.1 as i32));
    }

    pub fn phase(&self) -> Phase { self.phase }
    pub fn speed(&self) -> f32 { self.speed }
    pub fn distance(&self) -> f32 { self.distance }
    pub fn passed(&self) -> u32 { self.passed }
    pub fn obstacles(&self) -> &[Obstacle] { &self.obstacles }
    pub fn progress(&self) -> f32 { (self.distance / GOAL_METERS).clamp(0.0, 1.0) }

    pub fn road_left(&self) -> f32 { (self.screen.0 - LANES as f32 * LANE_WIDTH) / 2.0 }
    pub fn road_right(&self) -> f32 { self.road_left() + LANES as f32 * LANE_WIDTH }
    pub fn lane_center(&self, lane: usize) -> f32 { self.road_left() + (lane as f32 + 0.5) * LANE_WIDTH }

    pub fn car_rect(&self) -> Rect {
        Rect { x: self.car_x - CAR_W / 2.0, y: self.screen.1 * 0.8 - CAR_H / 2.0, w: CAR_W, h: CAR_H }
    }

    /// Distance scrolled so far in pixels, for animating lane markings.
    pub fn scroll_px(&self) -> f32 { self.distance * PX_PER_METER }

    /// Parks a stopped car right on top of the player.
    #[cfg(test)]
    pub(crate) fn block_car(&mut self) {
        let car = self.car_rect();
        self.obstacles.push(Obstacle { x: self.car_x, y: car.y, w: CAR_W, h: CAR_H, speed: 0.0, horn: None });
    }

    #[cfg(test)]
    pub(crate) fn set_distance(&mut self, meters: f32) { self.distance = meters; }

    pub fn update<R: Rng + ?Sized>(&mut self, input: &InputFrame, dt: f32, rng: &mut R) -> Vec<DriveEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Driving {
            return events;
        }

        if input.held_any(&[Key::Letter('A'), Key::Left]) { self.car_x -= STEER_SPEED * dt; }
        if input.held_any(&[Key::Letter('D'), Key::Right]) { self.car_x += STEER_SPEED * dt; }
        self.car_x = self.car_x.clamp(self.road_left() + CAR_W / 2.0, self.road_right() - CAR_W / 2.0);

        if input.held_any(&[Key::Letter('W'), Key::Up]) { self.speed += ACCEL * dt; }
        if input.held_any(&[Key::Letter('S'), Key::Down]) { self.speed -= BRAKE * dt; }
        self.speed = self.speed.clamp(MIN_SPEED, MAX_SPEED);

        self.distance += self.speed * dt / PX_PER_METER;

        self.spawn_timer -= dt;
        if self.spawn_timer <= 0.0 {
            self.spawn_timer = if self.spawn(rng) { self.spawn_interval() } else { 0.2 };
        }

        for o in &mut self.obstacles {
            o.y += (self.speed - o.speed) * dt;
        }

        let car = self.car_rect();
        for o in &mut self.obstacles {
            if o.horn != Some(Horn::Ready) { continue; }
            let r = o.rect();
            let gap = car.y - (r.y + r.h);
            let same_lane = r.x < car.x + car.w && car.x < r.x + r.w;
            if same_lane && gap > 0.0 && gap < HORN_RANGE {
                o.horn = Some(Horn::Sounded);
                events.push(DriveEvent::Horn);
            }
        }

        let bottom = self.screen.1;
        let before = self.obstacles.len();
        self.obstacles.retain(|o| o.y < bottom && o.y > -4.0 * o.h);
        self.passed += (before - self.obstacles.len()) as u32;

        let hitbox = car.shrunk(HIT_SLACK);
        if self.obstacles.iter().any(|o| o.rect().shrunk(HIT_SLACK).overlaps(&hitbox)) {
            self.phase = Phase::Crashed;
            events.push(DriveEvent::Crash);
            log::debug!("Crashed after {:.0} m", self.distance);
        } else if self.distance >= GOAL_METERS {
            self.phase = Phase::Finished;
            events.push(DriveEvent::Finished);
        }
        events
    }

    /// Seconds between spawns; traffic thickens along the way.
    fn spawn_interval(&self) -> f32 {
        (1.2 - self.progress() * 0.6).max(0.5)
    }

    /// Adds a car at the top of a random lane unless that lane's entry is busy.
    fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        let lane = rng.gen_range(0..LANES);
        let x = self.lane_center(lane);
        let busy = self
            .obstacles
            .iter()
            .any(|o| (o.x - x).abs() < 1.0 && o.y < CAR_H * 1.5);
        if busy {
            return false;
        }
        let horn = rng.gen_bool(HORN_CHANCE).then_some(Horn::Ready);
        self.obstacles.push(Obstacle {
            x,
            y: -CAR_H,
            w: CAR_W,
            h: CAR_H,
            speed: rng.gen_range(TRAFFIC_MIN_SPEED..TRAFFIC_MAX_SPEED),
            horn,
        });
        true
    }
}
