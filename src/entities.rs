//! All game entity types: mostly data, plus the helpers that keep derived
//! fields such as hitboxes in sync with positions.

use std::ops::{Add, Sub};

use crate::animation::FrameTags;
use crate::consts::PROJ_SIZE;

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle covering `min.x <= x < max.x`, `min.y <= y < max.y`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_size(origin: Point, w: i32, h: i32) -> Self {
        Self::new(origin, origin + Point::new(w, h))
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }

    pub fn is_empty(&self) -> bool {
        self.min.x >= self.max.x || self.min.y >= self.max.y
    }

    /// True when both rectangles are non-empty and share at least one point.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

// ── Screens & per-tick I/O ────────────────────────────────────────────────────

/// The screens of the game, in the order the coordinator stores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenId {
    Title = 0,
    Game = 1,
}

impl ScreenId {
    pub const COUNT: usize = 2;

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Outcome of one screen update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The screen is done; the coordinator should switch to the given screen.
    EndOfScreen(ScreenId),
}

/// Input sampled once per tick by the front-end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Primary action newly pressed this tick.
    pub action: bool,
    /// Quit requested.
    pub quit: bool,
    /// Fullscreen toggle newly pressed this tick.
    pub fullscreen: bool,
}

/// State that outlives individual screens. Lives for the whole process and
/// is never written to disk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub high_score: u64,
}

impl Session {
    /// Records the length of a finished run. Returns true on a new best.
    pub fn record_run(&mut self, ticks: u64) -> bool {
        if ticks > self.high_score {
            self.high_score = ticks;
            true
        } else {
            false
        }
    }
}

// ── Player box ────────────────────────────────────────────────────────────────

/// Parachute animation states of the player box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationState {
    Closed,
    Opening,
    Open,
    Closing,
}

impl AnimationState {
    pub const ALL: [AnimationState; 4] = [
        AnimationState::Closed,
        AnimationState::Opening,
        AnimationState::Open,
        AnimationState::Closing,
    ];

    /// Frame tag name used in sprite sheet descriptors.
    pub fn tag_name(self) -> &'static str {
        match self {
            AnimationState::Closed => "closed",
            AnimationState::Opening => "opening",
            AnimationState::Open => "open",
            AnimationState::Closing => "closing",
        }
    }

    /// True while the parachute is being deployed or stowed.
    pub fn in_transition(self) -> bool {
        matches!(self, AnimationState::Opening | AnimationState::Closing)
    }
}

/// The player character.
#[derive(Clone, Debug)]
pub struct PlayerBox {
    pub pos: Point,
    pub hitbox: Rect,
    /// Parachute deployed; halves the apparent fall rate.
    pub chute: bool,
    pub state: AnimationState,
    pub frame: usize,
    /// Animation ticks elapsed since the box was created.
    pub tick: u64,
    pub tags: FrameTags,
    size: i32,
}

impl PlayerBox {
    pub fn new(pos: Point, size: i32, tags: FrameTags) -> Self {
        Self {
            pos,
            hitbox: hitbox_around(pos, size),
            chute: false,
            state: AnimationState::Closed,
            frame: 0,
            tick: 0,
            tags,
            size,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn set_position(&mut self, pos: Point) {
        self.pos = pos;
        self.hitbox = hitbox_around(pos, self.size);
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.set_position(self.pos + Point::new(dx, dy));
    }
}

fn hitbox_around(pos: Point, size: i32) -> Rect {
    let offset = Point::new(size / 2, size / 2);
    Rect::new(pos - offset, pos + offset)
}

// ── Pooled entities ───────────────────────────────────────────────────────────

/// Decorative dirt that scrolls up to give the illusion of falling.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dust {
    pub pos: Point,
}

/// Something that flies across the screen and ends the run if it hits the box.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Horizontal position, fractional so slow projectiles move smoothly.
    pub x: f32,
    pub y: i32,
    /// Horizontal speed per update; the sign is the direction of travel.
    pub velocity: f32,
    /// Current tail length, `0..=TAIL_MAX`.
    pub tail: u32,
    /// Earliest tick at which the next projectile may spawn.
    pub spacing: u64,
}

impl Projectile {
    pub fn new(x: f32, y: i32, velocity: f32, spacing: u64) -> Self {
        Self {
            x,
            y,
            velocity,
            tail: 0,
            spacing,
        }
    }

    /// Position rounded to the pixel grid.
    pub fn pos(&self) -> Point {
        Point::new(self.x.round() as i32, self.y)
    }

    /// `-1` when travelling left, `1` otherwise.
    pub fn direction(&self) -> i32 {
        if self.velocity < 0.0 {
            -1
        } else {
            1
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_size(self.pos(), PROJ_SIZE, PROJ_SIZE)
    }
}
