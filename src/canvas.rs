//! Render target for screens.
//!
//! Screens only issue draw commands through [`Surface`]. [`Canvas`] is the
//! in-memory 1-bit framebuffer the terminal front-end paints from.

use crate::animation::SpriteSheet;
use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::entities::{Point, Rect};

/// The two colours of the Nokia palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Shade {
    #[default]
    Light,
    Dark,
}

/// Something screens can draw on, in logical screen coordinates.
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, shade: Shade);

    /// Line segment including both end points.
    fn line(&mut self, from: Point, to: Point, shade: Shade);

    /// Copies the opaque pixels of `region` in `sheet` with the region's top
    /// left corner at `dest`.
    fn blit(&mut self, sheet: &SpriteSheet, region: Rect, dest: Point);

    /// Text anchored at `at`. How it is rendered is up to the surface.
    fn label(&mut self, at: Point, text: &str);
}

/// A piece of text queued on a [`Canvas`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Label {
    pub at: Point,
    pub text: String,
}

/// Fixed-size framebuffer. Draws outside the screen are clipped.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<Shade>,
    labels: Vec<Label>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(GAME_WIDTH, GAME_HEIGHT)
    }
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Shade::Light; (width * height) as usize],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Fills the canvas with the light shade and drops all labels.
    pub fn clear(&mut self) {
        self.pixels.fill(Shade::Light);
        self.labels.clear();
    }

    /// Pixel at (x, y); light outside the canvas.
    pub fn get(&self, x: i32, y: i32) -> Shade {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return Shade::Light;
        }
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: i32, y: i32, shade: Shade) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = shade;
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Number of dark pixels, handy for tests.
    pub fn dark_count(&self) -> usize {
        self.pixels.iter().filter(|&&s| s == Shade::Dark).count()
    }
}

impl Surface for Canvas {
    fn fill_rect(&mut self, rect: Rect, shade: Shade) {
        for y in rect.min.y..rect.max.y {
            for x in rect.min.x..rect.max.x {
                self.set(x, y, shade);
            }
        }
    }

    fn line(&mut self, from: Point, to: Point, shade: Shade) {
        // Bresenham
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);
        loop {
            self.set(x, y, shade);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn blit(&mut self, sheet: &SpriteSheet, region: Rect, dest: Point) {
        for sy in region.min.y..region.max.y {
            for sx in region.min.x..region.max.x {
                if sheet.is_opaque(sx, sy) {
                    self.set(
                        dest.x + sx - region.min.x,
                        dest.y + sy - region.min.y,
                        Shade::Dark,
                    );
                }
            }
        }
    }

    fn label(&mut self, at: Point, text: &str) {
        self.labels.push(Label {
            at,
            text: text.to_string(),
        });
    }
}
