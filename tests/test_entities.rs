use freefall::animation::{FrameRange, FrameTags};
use freefall::entities::*;

fn tags() -> FrameTags {
    FrameTags::new(
        FrameRange { from: 0, to: 1 },
        FrameRange { from: 1, to: 4 },
        FrameRange { from: 4, to: 5 },
        FrameRange { from: 5, to: 8 },
    )
}

// ── Rect ──────────────────────────────────────────────────────────────────────

#[test]
fn rect_overlap_basic() {
    let a = Rect::new(Point::new(0, 0), Point::new(4, 4));
    let b = Rect::new(Point::new(3, 3), Point::new(5, 5));
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn rect_touching_edges_do_not_overlap() {
    // Half-open: max is outside the rectangle
    let a = Rect::new(Point::new(0, 0), Point::new(4, 4));
    let right = Rect::new(Point::new(4, 0), Point::new(6, 4));
    let below = Rect::new(Point::new(0, 4), Point::new(4, 6));
    assert!(!a.overlaps(&right));
    assert!(!a.overlaps(&below));
}

#[test]
fn empty_rect_never_overlaps() {
    let a = Rect::new(Point::new(0, 0), Point::new(10, 10));
    let empty = Rect::new(Point::new(5, 5), Point::new(5, 8));
    assert!(empty.is_empty());
    assert!(!a.overlaps(&empty));
    assert!(!empty.overlaps(&a));
}

#[test]
fn rect_from_size() {
    let r = Rect::from_size(Point::new(2, 3), 4, 5);
    assert_eq!(r.min, Point::new(2, 3));
    assert_eq!(r.max, Point::new(6, 8));
    assert_eq!(r.width(), 4);
    assert_eq!(r.height(), 5);
}

// ── PlayerBox ─────────────────────────────────────────────────────────────────

#[test]
fn box_hitbox_is_centred_square() {
    let b = PlayerBox::new(Point::new(42, 24), 5, tags());
    assert_eq!(b.hitbox, Rect::new(Point::new(40, 22), Point::new(44, 26)));
    assert!(!b.chute);
    assert_eq!(b.state, AnimationState::Closed);
    assert_eq!(b.frame, 0);
    assert_eq!(b.tick, 0);
}

#[test]
fn box_hitbox_follows_position() {
    let mut b = PlayerBox::new(Point::new(42, 24), 5, tags());
    b.move_by(1, -3);
    assert_eq!(b.pos, Point::new(43, 21));
    assert_eq!(b.hitbox, Rect::new(Point::new(41, 19), Point::new(45, 23)));

    b.set_position(Point::new(0, 0));
    assert_eq!(b.hitbox, Rect::new(Point::new(-2, -2), Point::new(2, 2)));
}

#[test]
fn animation_state_names_and_transitions() {
    assert_eq!(AnimationState::Closed.tag_name(), "closed");
    assert_eq!(AnimationState::Closing.tag_name(), "closing");
    assert!(AnimationState::Opening.in_transition());
    assert!(AnimationState::Closing.in_transition());
    assert!(!AnimationState::Open.in_transition());
    assert!(!AnimationState::Closed.in_transition());
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_position_rounds_x() {
    let p = Projectile::new(10.6, 30, -1.5, 0);
    assert_eq!(p.pos(), Point::new(11, 30));
    assert_eq!(p.direction(), -1);
    assert_eq!(p.hitbox(), Rect::new(Point::new(11, 30), Point::new(13, 32)));
    assert_eq!(p.tail, 0);
}

// ── Session ───────────────────────────────────────────────────────────────────

#[test]
fn high_score_only_grows() {
    let mut s = Session::default();
    assert_eq!(s.high_score, 0);
    assert!(s.record_run(37));
    assert_eq!(s.high_score, 37);
    assert!(!s.record_run(20));
    assert_eq!(s.high_score, 37);
    assert!(!s.record_run(37));
    assert_eq!(s.high_score, 37);
}

#[test]
fn screen_ids_index_in_order() {
    assert_eq!(ScreenId::Title.index(), 0);
    assert_eq!(ScreenId::Game.index(), 1);
    assert_eq!(ScreenId::COUNT, 2);
}
