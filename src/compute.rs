//! Game-logic for the player box and the entity pools.
//!
//! All randomness comes through an injected `Rng` so callers control
//! determinism (tests use a seeded RNG).

use rand::Rng;

use crate::animation::next_frame;
use crate::consts::{
    BASE_PROJECTILES, DIFFICULTY_INTERVAL, GAME_HEIGHT, GAME_WIDTH, MAX_DUSTS, MAX_PROJECTILES,
    MAX_PROJ_SPEED, MAX_SPACING, MIN_PROJ_SPEED, PROJECTILE_STEP, TAIL_MAX,
};
use crate::entities::{AnimationState, Dust, PlayerBox, Point, Projectile};

/// Row just below the bottom edge where new entities appear.
const SPAWN_Y: i32 = GAME_HEIGHT + 1;

// ── Player box ────────────────────────────────────────────────────────────────

impl PlayerBox {
    /// Advances the parachute animation by one tick.
    pub fn update(&mut self) {
        self.tick += 1;
        let range = self.tags.get(self.state);
        self.frame = next_frame(self.frame, self.tick, range);
        if self.frame == range.to {
            self.state = match self.state {
                AnimationState::Opening => AnimationState::Open,
                AnimationState::Closing => AnimationState::Closed,
                settled => settled,
            };
        }
    }

    /// Deploys or stows the parachute.
    ///
    /// Ignored while the chute is still opening or closing, so a double press
    /// can neither flip the chute back nor cut the animation short.
    pub fn pull(&mut self) {
        match self.state {
            AnimationState::Closed => {
                self.chute = !self.chute;
                self.state = AnimationState::Opening;
            }
            AnimationState::Open => {
                self.chute = !self.chute;
                self.state = AnimationState::Closing;
            }
            AnimationState::Opening | AnimationState::Closing => {}
        }
    }
}

// ── Difficulty ────────────────────────────────────────────────────────────────

/// Projectile cap after `tick` ticks of play: starts at 2 and grows by 2
/// every 100 ticks up to 20.
pub fn projectile_cap(tick: u64) -> usize {
    let steps = (tick / DIFFICULTY_INTERVAL) as usize;
    BASE_PROJECTILES
        .saturating_add(steps.saturating_mul(PROJECTILE_STEP))
        .min(MAX_PROJECTILES)
}

// ── Dust ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Dusts {
    pub list: Vec<Dust>,
}

impl Dusts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Moves every speck up one row.
    pub fn drift(&mut self) {
        for d in &mut self.list {
            d.pos.y -= 1;
        }
    }

    /// Spawns a speck while below the cap, then drops those past the top edge.
    pub fn update(&mut self, rng: &mut impl Rng) {
        if self.list.len() < MAX_DUSTS {
            let x = rng.gen_range(0..GAME_WIDTH);
            self.list.push(Dust {
                pos: Point::new(x, SPAWN_Y),
            });
        }
        self.retire();
    }

    pub fn retire(&mut self) {
        self.list.retain(|d| d.pos.y >= 0);
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Projectiles {
    pub list: Vec<Projectile>,
    cap: usize,
}

impl Default for Projectiles {
    fn default() -> Self {
        Self {
            list: Vec::new(),
            cap: BASE_PROJECTILES,
        }
    }
}

impl Projectiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Sets the cap from the difficulty curve at `tick`. Returns whether
    /// the cap went up.
    pub fn apply_difficulty(&mut self, tick: u64) -> bool {
        let cap = projectile_cap(tick);
        let raised = cap > self.cap;
        self.cap = cap;
        raised
    }

    /// Below the cap and past the spacing of the newest projectile.
    ///
    /// Every projectile drifts at the same rate, so the newest one is always
    /// the last to retire and sits at the end of the list.
    pub fn can_spawn(&self, tick: u64) -> bool {
        self.list.len() < self.cap && self.list.last().map_or(true, |p| tick >= p.spacing)
    }

    /// Launches a projectile from a random side of the screen.
    pub fn spawn(&mut self, tick: u64, rng: &mut impl Rng) {
        let from_left = rng.gen_bool(0.5);
        let speed = rng.gen_range(MIN_PROJ_SPEED..MAX_PROJ_SPEED);
        let (x, velocity) = if from_left {
            (0.0, speed)
        } else {
            (GAME_WIDTH as f32, -speed)
        };
        let spacing = tick + rng.gen_range(0..MAX_SPACING);
        self.list.push(Projectile::new(x, SPAWN_Y, velocity, spacing));
    }

    /// Moves every projectile up one row.
    pub fn drift(&mut self) {
        for p in &mut self.list {
            p.y -= 1;
        }
    }

    /// Spawns when allowed, applies horizontal velocity on even ticks, then
    /// drops projectiles past the top edge.
    pub fn update(&mut self, tick: u64, rng: &mut impl Rng) {
        if self.can_spawn(tick) {
            self.spawn(tick, rng);
        }
        if tick % 2 == 0 {
            for p in &mut self.list {
                p.x += p.velocity;
                if p.tail < TAIL_MAX {
                    p.tail += 1;
                }
            }
        }
        self.retire();
    }

    pub fn retire(&mut self) {
        self.list.retain(|p| p.y >= 0);
    }
}
