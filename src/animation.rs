//! Sprite sheets and frame animation.
//!
//! A sheet is a 1-bit image plus a list of frame regions within it. Frame
//! tags name the range of frames played for each [`AnimationState`]:
//! `from` is the first frame, `to` is the frame that marks the end of the
//! animation.

use log::debug;
use serde::Deserialize;

use crate::entities::{AnimationState, Point, Rect};
use crate::error::{Error, Result};

/// Descriptor of the player box sprite, compiled into the binary.
const BOX_SHEET: &str = include_str!("../assets/box.json");

/// Frames played for one animation state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct FrameRange {
    pub from: usize,
    pub to: usize,
}

/// Determines the next animation frame.
///
/// A frame outside `from..to` means the state just changed (or the index went
/// stale), so the animation restarts at `from`. Otherwise it moves one frame
/// forward. Frames advance once per call whatever `tick` is.
pub fn next_frame(frame: usize, _tick: u64, range: FrameRange) -> usize {
    if frame < range.from || frame >= range.to {
        return range.from;
    }
    frame + 1
}

/// Frame ranges for every [`AnimationState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTags {
    ranges: [FrameRange; 4],
}

impl FrameTags {
    /// Ranges in [`AnimationState::ALL`] order.
    pub fn new(
        closed: FrameRange,
        opening: FrameRange,
        open: FrameRange,
        closing: FrameRange,
    ) -> Self {
        Self {
            ranges: [closed, opening, open, closing],
        }
    }

    pub fn get(&self, state: AnimationState) -> FrameRange {
        self.ranges[state as usize]
    }
}

// ── Sheet descriptor (JSON) ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct SheetFile {
    /// Rows of the image; `#` is an opaque pixel, anything else transparent.
    image: Vec<String>,
    frames: Vec<FrameRegion>,
    meta: SheetMeta,
}

#[derive(Deserialize)]
struct FrameRegion {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SheetMeta {
    frame_tags: Vec<TagEntry>,
}

#[derive(Deserialize)]
struct TagEntry {
    name: String,
    #[serde(flatten)]
    range: FrameRange,
}

// ── Loaded sheet ──────────────────────────────────────────────────────────────

/// A validated sprite sheet.
#[derive(Clone, Debug)]
pub struct SpriteSheet {
    width: i32,
    height: i32,
    opaque: Vec<bool>,
    frames: Vec<Rect>,
    tags: FrameTags,
}

impl SpriteSheet {
    /// The player box sheet shipped with the game.
    pub fn builtin_box() -> Result<Self> {
        Self::from_json(BOX_SHEET)
    }

    /// Parses and validates a sheet descriptor.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: SheetFile =
            serde_json::from_str(json).map_err(|e| Error::json("sprite sheet", e))?;

        let height = file.image.len() as i32;
        let width = file.image.first().map(|r| r.chars().count()).unwrap_or(0) as i32;
        if width == 0 {
            return Err(Error::sheet("image is empty"));
        }
        if file.image.iter().any(|r| r.chars().count() as i32 != width) {
            return Err(Error::sheet("image rows differ in length"));
        }
        let opaque: Vec<bool> = file
            .image
            .iter()
            .flat_map(|row| row.chars().map(|c| c == '#'))
            .collect();

        let bounds = Rect::from_size(Point::new(0, 0), width, height);
        let mut frames = Vec::with_capacity(file.frames.len());
        for (i, f) in file.frames.iter().enumerate() {
            let (Some(max_x), Some(max_y)) = (f.x.checked_add(f.w), f.y.checked_add(f.h)) else {
                return Err(Error::sheet(format!("frame {i} lies outside the image")));
            };
            let region = Rect::new(Point::new(f.x, f.y), Point::new(max_x, max_y));
            if region.is_empty()
                || region.min.x < bounds.min.x
                || region.min.y < bounds.min.y
                || region.max.x > bounds.max.x
                || region.max.y > bounds.max.y
            {
                return Err(Error::sheet(format!("frame {i} lies outside the image")));
            }
            frames.push(region);
        }

        let mut ranges = [FrameRange { from: 0, to: 0 }; 4];
        for state in AnimationState::ALL {
            let name = state.tag_name();
            let tag = file
                .meta
                .frame_tags
                .iter()
                .find(|t| t.name == name)
                .ok_or_else(|| Error::sheet(format!("missing frame tag '{name}'")))?;
            let range = tag.range;
            if range.from >= range.to {
                return Err(Error::sheet(format!(
                    "frame tag '{name}' has empty range {}..{}",
                    range.from, range.to
                )));
            }
            // The `to` frame is shown for one tick before the state moves on.
            if range.to >= frames.len() {
                return Err(Error::sheet(format!(
                    "frame tag '{name}' ends at frame {} but the sheet has {} frames",
                    range.to,
                    frames.len()
                )));
            }
            ranges[state as usize] = range;
        }

        debug!(
            "loaded sprite sheet {}x{} with {} frames",
            width,
            height,
            frames.len()
        );

        Ok(Self {
            width,
            height,
            opaque,
            frames,
            tags: FrameTags { ranges },
        })
    }

    pub fn tags(&self) -> FrameTags {
        self.tags
    }

    /// Region of the image holding frame `index`.
    pub fn frame(&self, index: usize) -> Option<Rect> {
        self.frames.get(index).copied()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Whether the image pixel at (x, y) is opaque. Out of range is transparent.
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return false;
        }
        self.opaque[(y * self.width + x) as usize]
    }
}
