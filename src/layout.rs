//! Bubble layout engine
//!
//! Places decorative name bubbles on the lobby background. Positions are drawn
//! by rejection sampling: a random top-left corner is accepted once the bubble
//! clears the lobby panel (plus a margin) and every bubble placed before it.
//! After [`MAX_PLACEMENT_ATTEMPTS`] the last sample is kept even if it overlaps.

use crate::types::{BubblePlacement, ExclusionRect, PlayerName, Viewport};
use rand::Rng;
use std::collections::HashMap;

pub const BUBBLE_WIDTH_REM: f64 = 8.5;
pub const BUBBLE_HEIGHT_REM: f64 = 3.7;
const PX_PER_REM: f64 = 16.0;

/// Extra clearance around the exclusion rectangle, in percent
pub const EXCLUSION_MARGIN: f64 = 8.0;
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 200;

pub const PALETTE: [&str; 10] = [
    "#fc575e", "#f7b42c", "#61dafb", "#a259f7", "#43e97b", "#fcb045", "#f857a6", "#30cfd0",
    "#fdc830", "#f37335",
];
const PALETTE_ALPHA: &str = "cc";
pub const MAX_ROTATION_DEG: f64 = 10.0;

/// Bubble size in percent of the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width_percent: f64,
    pub height_percent: f64,
}

impl Footprint {
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let pct = |rem: f64, total: f64| {
            if total > 0.0 {
                rem * PX_PER_REM * 100.0 / total
            } else {
                100.0
            }
        };

        Self {
            width_percent: pct(BUBBLE_WIDTH_REM, viewport.width),
            height_percent: pct(BUBBLE_HEIGHT_REM, viewport.height),
        }
    }
}

/// Axis-aligned rectangle in viewport percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn at(x: f64, y: f64, footprint: Footprint) -> Self {
        Self {
            left: x,
            top: y,
            right: x + footprint.width_percent,
            bottom: y + footprint.height_percent,
        }
    }

    /// Strict AABB intersection; touching edges do not count
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

impl From<ExclusionRect> for Rect {
    fn from(r: ExclusionRect) -> Self {
        Self {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}

impl BubblePlacement {
    pub fn rect(&self) -> Rect {
        Rect {
            left: self.x,
            top: self.y,
            right: self.x + self.width_percent,
            bottom: self.y + self.height_percent,
        }
    }
}

/// Outcome of the rejection sampling loop
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sample {
    pub x: f64,
    pub y: f64,
    pub attempts: u32,
    /// False when the retry budget ran out and the last sample was kept
    pub clear: bool,
}

pub(crate) fn sample_position<R: Rng>(
    rng: &mut R,
    footprint: Footprint,
    exclusion: Option<&ExclusionRect>,
    existing: &[BubblePlacement],
) -> Sample {
    let span_x = (100.0 - footprint.width_percent).max(0.0);
    let span_y = (100.0 - footprint.height_percent).max(0.0);
    let blocked: Option<Rect> = exclusion.map(|e| e.expanded(EXCLUSION_MARGIN).into());

    let mut attempts = 0;
    loop {
        let x = rng.random::<f64>() * span_x;
        let y = rng.random::<f64>() * span_y;
        attempts += 1;

        if blocked.is_none() && existing.is_empty() {
            return Sample {
                x,
                y,
                attempts,
                clear: true,
            };
        }

        let candidate = Rect::at(x, y, footprint);
        let clear = !blocked.is_some_and(|b| candidate.intersects(&b))
            && !existing.iter().any(|b| candidate.intersects(&b.rect()));

        if clear || attempts >= MAX_PLACEMENT_ATTEMPTS {
            return Sample {
                x,
                y,
                attempts,
                clear,
            };
        }
    }
}

/// Compute a placement for one new bubble
pub fn place_bubble<R: Rng>(
    rng: &mut R,
    footprint: Footprint,
    exclusion: Option<&ExclusionRect>,
    existing: &[BubblePlacement],
) -> BubblePlacement {
    let sample = sample_position(rng, footprint, exclusion, existing);
    if !sample.clear {
        tracing::debug!(
            attempts = sample.attempts,
            "No free spot for bubble, keeping overlapping position"
        );
    }

    let color = format!("{}{}", PALETTE[rng.random_range(0..PALETTE.len())], PALETTE_ALPHA);
    let rotation = rng.random_range(-MAX_ROTATION_DEG..MAX_ROTATION_DEG);

    BubblePlacement {
        x: sample.x,
        y: sample.y,
        width: BUBBLE_WIDTH_REM,
        height: BUBBLE_HEIGHT_REM,
        color,
        rotation,
        width_percent: footprint.width_percent,
        height_percent: footprint.height_percent,
    }
}

/// Placements memoized per player name for the lifetime of one lobby
#[derive(Debug, Clone, Default)]
pub struct BubbleLayout {
    placements: HashMap<PlayerName, BubblePlacement>,
}

impl BubbleLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&BubblePlacement> {
        self.placements.get(name)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Return a placement for every name in roster order, placing only names
    /// that have not been seen before. New bubbles avoid all earlier ones.
    pub fn arrange<R: Rng>(
        &mut self,
        rng: &mut R,
        names: &[PlayerName],
        footprint: Footprint,
        exclusion: Option<&ExclusionRect>,
    ) -> Vec<(PlayerName, BubblePlacement)> {
        let mut placed: Vec<BubblePlacement> = Vec::with_capacity(names.len());
        let mut arranged = Vec::with_capacity(names.len());

        for name in names {
            let placement = match self.placements.get(name) {
                Some(cached) => cached.clone(),
                None => {
                    let fresh = place_bubble(rng, footprint, exclusion, &placed);
                    self.placements.insert(name.clone(), fresh.clone());
                    fresh
                }
            };
            placed.push(placement.clone());
            arranged.push((name.clone(), placement));
        }

        arranged
    }
}
