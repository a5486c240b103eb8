use freefall::animation::SpriteSheet;
use freefall::canvas::{Canvas, Shade, Surface};
use freefall::compute::projectile_cap;
use freefall::consts::*;
use freefall::entities::*;
use freefall::screens::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

const IDLE: TickInput = TickInput {
    action: false,
    quit: false,
    fullscreen: false,
};

const PRESS: TickInput = TickInput {
    action: true,
    quit: false,
    fullscreen: false,
};

fn sheet() -> SpriteSheet {
    SpriteSheet::builtin_box().expect("builtin sheet")
}

fn make_game() -> GameScreen {
    GameScreen::new(sheet().tags())
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

/// A projectile that never lets another one spawn behind it.
fn parked_projectile(x: f32, y: i32) -> Projectile {
    Projectile::new(x, y, 0.0, u64::MAX)
}

// ── Recording surface ─────────────────────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum Call {
    Rect(Rect),
    Line(Point, Point),
    Blit(Point),
    Label(String),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl Surface for Recorder {
    fn fill_rect(&mut self, rect: Rect, _shade: Shade) {
        self.calls.push(Call::Rect(rect));
    }

    fn line(&mut self, from: Point, to: Point, _shade: Shade) {
        self.calls.push(Call::Line(from, to));
    }

    fn blit(&mut self, _sheet: &SpriteSheet, _region: Rect, dest: Point) {
        self.calls.push(Call::Blit(dest));
    }

    fn label(&mut self, _at: Point, text: &str) {
        self.calls.push(Call::Label(text.to_string()));
    }
}

// ── GameScreen ────────────────────────────────────────────────────────────────

#[test]
fn new_game_screen_is_empty() {
    let g = make_game();
    assert_eq!(g.tick, 0);
    assert!(g.dusts.is_empty());
    assert!(g.projectiles.is_empty());
    assert_eq!(g.player.pos, BOX_SPAWN);
    assert_eq!(g.player.state, AnimationState::Closed);
    assert!(!g.player.chute);
}

#[test]
fn collision_ends_run_on_the_overlapping_tick() {
    let mut g = make_game();
    let mut session = Session::default();
    let mut rng = seeded_rng();
    // Box hitbox rows are 22..26; the projectile reaches row 25 on tick 2.
    g.projectiles.list.push(parked_projectile(41.0, 27));

    assert_eq!(g.update(&IDLE, &mut session, &mut rng), Flow::Continue);
    assert_eq!(session.high_score, 0);

    assert_eq!(
        g.update(&IDLE, &mut session, &mut rng),
        Flow::EndOfScreen(ScreenId::Title)
    );
    assert_eq!(g.tick, 2);
    assert_eq!(session.high_score, 2);
}

#[test]
fn no_pull_on_the_tick_of_a_collision() {
    let mut g = make_game();
    let mut session = Session::default();
    let mut rng = seeded_rng();
    g.projectiles.list.push(parked_projectile(41.0, 25));

    let flow = g.update(&PRESS, &mut session, &mut rng);
    assert_eq!(flow, Flow::EndOfScreen(ScreenId::Title));
    assert!(!g.player.chute);
}

#[test]
fn first_hit_follows_pool_order() {
    let mut g = make_game();
    let a = parked_projectile(40.0, 23);
    let b = parked_projectile(42.0, 24);
    g.projectiles.list.push(Projectile::new(0.0, 5, 1.0, 0)); // far away
    g.projectiles.list.push(a.clone());
    g.projectiles.list.push(b);
    assert_eq!(g.first_hit(), Some(a.hitbox()));
}

#[test]
fn action_pulls_the_chute() {
    let mut g = make_game();
    let mut session = Session::default();
    let mut rng = seeded_rng();

    assert_eq!(g.update(&PRESS, &mut session, &mut rng), Flow::Continue);
    assert!(g.player.chute);
    assert_eq!(g.player.state, AnimationState::Opening);

    // Pressed again before the animation finished: ignored
    assert_eq!(g.update(&PRESS, &mut session, &mut rng), Flow::Continue);
    assert!(g.player.chute);
}

#[test]
fn open_chute_halves_drift() {
    let mut g = make_game();
    let mut session = Session::default();
    let mut rng = seeded_rng();
    g.player.chute = true;
    g.dusts.list.push(Dust {
        pos: Point::new(10, 30),
    });
    g.projectiles.list.push(parked_projectile(0.0, 40));

    let mut dust_ys = Vec::new();
    for _ in 0..4 {
        g.update(&IDLE, &mut session, &mut rng);
        dust_ys.push(g.dusts.list[0].pos.y);
    }
    assert_eq!(dust_ys, vec![30, 29, 29, 28]);
    assert_eq!(g.projectiles.list[0].y, 38);
}

#[test]
fn stowed_chute_drifts_every_tick() {
    let mut g = make_game();
    let mut session = Session::default();
    let mut rng = seeded_rng();
    g.dusts.list.push(Dust {
        pos: Point::new(10, 30),
    });
    g.projectiles.list.push(parked_projectile(0.0, 40));

    for _ in 0..4 {
        g.update(&IDLE, &mut session, &mut rng);
    }
    assert_eq!(g.dusts.list[0].pos.y, 26);
    assert_eq!(g.projectiles.list[0].y, 36);
}

#[test]
fn long_run_respects_population_caps() {
    let mut g = make_game();
    let mut session = Session::default();
    let mut rng = seeded_rng();
    // Park the box where nothing can reach it
    g.player.set_position(Point::new(GAME_WIDTH / 2, -100));

    for _ in 0..2500 {
        assert_eq!(g.update(&IDLE, &mut session, &mut rng), Flow::Continue);
        assert_eq!(g.projectiles.cap(), projectile_cap(g.tick));
        assert!(g.projectiles.len() <= g.projectiles.cap());
        assert!(g.dusts.len() <= MAX_DUSTS);
    }
    assert_eq!(g.projectiles.cap(), MAX_PROJECTILES);
    assert!(!g.projectiles.is_empty());
    assert_eq!(session.high_score, 0);
}

#[test]
fn game_draws_back_to_front() {
    let mut g = make_game();
    g.dusts.list.push(Dust {
        pos: Point::new(5, 5),
    });
    let mut p = Projectile::new(20.0, 30, 1.0, u64::MAX);
    p.tail = 3;
    g.projectiles.list.push(p);

    let mut rec = Recorder::default();
    g.draw(&mut rec, &sheet());

    assert_eq!(
        rec.calls,
        vec![
            Call::Rect(Rect::from_size(Point::new(5, 5), 1, 1)),
            Call::Rect(Rect::from_size(Point::new(20, 30), PROJ_SIZE, PROJ_SIZE)),
            Call::Line(Point::new(17, 31), Point::new(14, 31)),
            Call::Blit(Point::new(39, 17)),
            Call::Label("0".to_string()),
        ]
    );
}

#[test]
fn leftward_projectile_tail_trails_to_the_right() {
    let mut g = make_game();
    let mut p = Projectile::new(50.0, 10, -2.0, u64::MAX);
    p.tail = 2;
    g.projectiles.list.push(p);

    let mut rec = Recorder::default();
    g.draw(&mut rec, &sheet());
    assert!(rec
        .calls
        .contains(&Call::Line(Point::new(53, 11), Point::new(55, 11))));
}

#[test]
fn box_sprite_sits_on_hitbox() {
    let g = make_game();
    let mut canvas = Canvas::default();
    g.draw(&mut canvas, &sheet());
    // Bottom-left corner of the box body
    assert_eq!(canvas.get(40, 25), Shade::Dark);
    // Hollow middle
    assert_eq!(canvas.get(42, 23), Shade::Light);
    assert_eq!(canvas.labels().len(), 1);
}

// ── TitleScreen ───────────────────────────────────────────────────────────────

#[test]
fn title_box_floats_in_with_chute_open() {
    let mut t = TitleScreen::new(sheet().tags());
    assert!(t.player.chute);
    assert_eq!(t.player.state, AnimationState::Opening);
    let start_y = t.player.pos.y;
    assert!(start_y < 0);

    for _ in 0..2 {
        assert_eq!(t.update(&IDLE), Flow::Continue);
    }
    assert_eq!(t.player.pos.y, start_y + 1);

    for _ in 0..500 {
        t.update(&IDLE);
    }
    assert_eq!(t.player.state, AnimationState::Open);
    let rest = t.player.pos.y;
    assert!(rest > 0 && rest < GAME_HEIGHT);
    t.update(&IDLE);
    t.update(&IDLE);
    assert_eq!(t.player.pos.y, rest);
}

#[test]
fn title_starts_game_on_action() {
    let mut t = TitleScreen::new(sheet().tags());
    assert_eq!(t.update(&PRESS), Flow::EndOfScreen(ScreenId::Game));
}

#[test]
fn title_shows_high_score_once_set() {
    let t = TitleScreen::new(sheet().tags());
    let mut canvas = Canvas::default();
    t.draw(&mut canvas, &sheet(), &Session::default());
    let texts: Vec<&str> = canvas.labels().iter().map(|l| l.text.as_str()).collect();
    assert!(texts.contains(&"FREEFALL"));
    assert!(!texts.iter().any(|s| s.starts_with("HI")));

    let mut canvas = Canvas::default();
    t.draw(&mut canvas, &sheet(), &Session { high_score: 37 });
    assert!(canvas.labels().iter().any(|l| l.text == "HI 37"));
}
