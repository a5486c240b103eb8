//! The title screen and the game proper.

use log::{debug, info};
use rand::Rng;

use crate::animation::{FrameTags, SpriteSheet};
use crate::canvas::{Shade, Surface};
use crate::compute::{Dusts, Projectiles};
use crate::consts::{BOX_SIZE, GAME_HEIGHT, GAME_WIDTH, PROJ_SIZE, TAIL_DIST};
use crate::entities::{Flow, PlayerBox, Point, Projectile, Rect, ScreenId, Session, TickInput};

/// Where the box sits during a run.
pub const BOX_SPAWN: Point = Point::new(GAME_WIDTH / 2, GAME_HEIGHT / 2);

/// The title box starts fully above the screen...
const TITLE_BOX_START: Point = Point::new(GAME_WIDTH / 2, -BOX_SIZE);
/// ...and floats down until it reaches this row.
const TITLE_BOX_REST_Y: i32 = GAME_HEIGHT - 14;

// ── Shared drawing ────────────────────────────────────────────────────────────

/// Draws the current sprite frame, horizontally centred on the box, with its
/// bottom row on the last row of the hitbox.
fn draw_box(surface: &mut impl Surface, sheet: &SpriteSheet, player: &PlayerBox) {
    let Some(region) = sheet.frame(player.frame) else {
        return;
    };
    let dest = Point::new(
        player.pos.x - region.width() / 2,
        player.hitbox.max.y - region.height(),
    );
    surface.blit(sheet, region, dest);
}

fn draw_projectile(surface: &mut impl Surface, p: &Projectile) {
    let pos = p.pos();
    surface.fill_rect(p.hitbox(), Shade::Dark);
    if p.tail > 0 {
        let dir = p.direction();
        let tail = p.tail as i32;
        surface.line(
            Point::new(pos.x - (PROJ_SIZE + TAIL_DIST) * dir, pos.y + 1),
            Point::new(pos.x - (PROJ_SIZE + TAIL_DIST + tail) * dir, pos.y + 1),
            Shade::Dark,
        );
    }
}

// ── Title ─────────────────────────────────────────────────────────────────────

/// Shows when the game first starts and after every run.
#[derive(Clone, Debug)]
pub struct TitleScreen {
    /// Decorative box floating in on its parachute.
    pub player: PlayerBox,
    tick: u64,
}

impl TitleScreen {
    pub fn new(tags: FrameTags) -> Self {
        let mut player = PlayerBox::new(TITLE_BOX_START, BOX_SIZE, tags);
        player.pull();
        Self { player, tick: 0 }
    }

    pub fn update(&mut self, input: &TickInput) -> Flow {
        self.tick += 1;
        self.player.update();
        if self.tick % 2 == 0 && self.player.pos.y < TITLE_BOX_REST_Y {
            self.player.move_by(0, 1);
        }

        if input.action {
            return Flow::EndOfScreen(ScreenId::Game);
        }
        Flow::Continue
    }

    pub fn draw(&self, surface: &mut impl Surface, sheet: &SpriteSheet, session: &Session) {
        surface.label(Point::new(GAME_WIDTH / 2 - 4, 2), "FREEFALL");
        if session.high_score > 0 {
            let hi = format!("HI {}", session.high_score);
            surface.label(Point::new(GAME_WIDTH / 2 - hi.len() as i32 / 2, 8), &hi);
        }
        surface.label(Point::new(GAME_WIDTH / 2 - 6, GAME_HEIGHT - 4), "PRESS 5/SPACE");
        draw_box(surface, sheet, &self.player);
    }
}

// ── Game ──────────────────────────────────────────────────────────────────────

/// State for the game proper. Built fresh for every run.
#[derive(Clone, Debug)]
pub struct GameScreen {
    pub player: PlayerBox,
    pub dusts: Dusts,
    pub projectiles: Projectiles,
    /// Ticks survived so far; this is the score.
    pub tick: u64,
}

impl GameScreen {
    pub fn new(tags: FrameTags) -> Self {
        Self {
            player: PlayerBox::new(BOX_SPAWN, BOX_SIZE, tags),
            dusts: Dusts::new(),
            projectiles: Projectiles::new(),
            tick: 0,
        }
    }

    /// Advances the run by one tick.
    ///
    /// Returns `EndOfScreen(Title)` on the tick a projectile touches the box.
    pub fn update(
        &mut self,
        input: &TickInput,
        session: &mut Session,
        rng: &mut impl Rng,
    ) -> Flow {
        self.tick += 1;

        self.player.update();

        // An open chute halves how fast the world scrolls past.
        if !self.player.chute || self.tick % 2 == 0 {
            self.dusts.drift();
            self.projectiles.drift();
        }

        if self.projectiles.apply_difficulty(self.tick) {
            debug!(
                "tick {}: projectile cap now {}",
                self.tick,
                self.projectiles.cap()
            );
        }

        self.dusts.update(rng);
        self.projectiles.update(self.tick, rng);

        if let Some(hit) = self.first_hit() {
            info!(
                "game over at tick {}: {:?} hit {:?}",
                self.tick, hit, self.player.hitbox
            );
            if session.record_run(self.tick) {
                info!("new high score: {}", self.tick);
            }
            return Flow::EndOfScreen(ScreenId::Title);
        }

        if input.action {
            self.player.pull();
        }

        Flow::Continue
    }

    /// Hitbox of the first projectile, in pool order, touching the box.
    pub fn first_hit(&self) -> Option<Rect> {
        self.projectiles
            .list
            .iter()
            .map(Projectile::hitbox)
            .find(|hb| self.player.hitbox.overlaps(hb))
    }

    /// Dust, then projectiles, then the box on top.
    pub fn draw(&self, surface: &mut impl Surface, sheet: &SpriteSheet) {
        for d in &self.dusts.list {
            surface.fill_rect(Rect::from_size(d.pos, 1, 1), Shade::Dark);
        }
        for p in &self.projectiles.list {
            draw_projectile(surface, p);
        }
        draw_box(surface, sheet, &self.player);
        surface.label(Point::new(1, 1), &self.tick.to_string());
    }
}
