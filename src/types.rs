use serde::{Deserialize, Serialize};

/// Opaque ID types
pub type ViewId = String;
pub type RoomCode = String;
pub type PlayerName = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    NotStarted,
    Started,
}

/// Browser viewport size in CSS pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Bounding box in CSS pixels, as reported by `getBoundingClientRect`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PixelRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Screen region the bubble layout must avoid, in percent of the viewport
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExclusionRect {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl ExclusionRect {
    /// Convert a panel's pixel bounds into viewport percentages
    pub fn from_pixels(panel: &PixelRect, viewport: &Viewport) -> Self {
        let pct = |px: f64, total: f64| {
            if total > 0.0 {
                px * 100.0 / total
            } else {
                0.0
            }
        };

        Self {
            left: pct(panel.left, viewport.width),
            right: pct(panel.right, viewport.width),
            top: pct(panel.top, viewport.height),
            bottom: pct(panel.bottom, viewport.height),
        }
    }

    /// Grow the rectangle by `margin` on every side, clamped to the screen
    pub fn expanded(&self, margin: f64) -> Self {
        Self {
            left: (self.left - margin).max(0.0),
            right: (self.right + margin).min(100.0),
            top: (self.top - margin).max(0.0),
            bottom: (self.bottom + margin).min(100.0),
        }
    }
}

/// Everything the lobby hands over when the game starts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LobbyHandoff {
    pub room_code: RoomCode,
    pub roster: Vec<PlayerName>,
    pub exclusion: Option<ExclusionRect>,
}

/// Where and how a single name bubble is drawn
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BubblePlacement {
    /// Left edge in percent of viewport width
    pub x: f64,
    /// Top edge in percent of viewport height
    pub y: f64,
    /// Width in rem
    pub width: f64,
    /// Height in rem
    pub height: f64,
    /// CSS hex color including alpha
    pub color: String,
    /// Rotation in degrees
    pub rotation: f64,
    pub width_percent: f64,
    pub height_percent: f64,
}
