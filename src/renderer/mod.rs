//! Drawing module
//!
//! The simulation never owns a canvas. Each frame the scene is emitted as
//! primitive calls on a [`DrawSurface`] supplied by the host.

pub mod scene;
pub mod shapes;
pub mod starfield;

pub use scene::SceneRenderer;
pub use starfield::Starfield;

use glam::Vec2;

use crate::sim::Rect;

/// Linear RGBA
pub type Color = [f32; 4];

/// Convert 0xRRGGBB plus alpha to a [`Color`]
pub const fn hex(rgb: u32, alpha: f32) -> Color {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, hex};

    pub const BACKGROUND: Color = hex(0x000000, 1.0);
    pub const STAR: Color = hex(0xffffff, 1.0);
    pub const CRAFT: Color = hex(0x00d4ff, 1.0);
    pub const CRAFT_WING: Color = hex(0x00a8cc, 1.0);
    pub const CRAFT_SHIELDED: Color = hex(0xffff00, 1.0);
    pub const CRAFT_WING_SHIELDED: Color = hex(0xffdd00, 1.0);
    pub const COCKPIT: Color = hex(0xffffff, 1.0);
    pub const ENGINE: Color = hex(0xff6600, 1.0);
    pub const HAZARD: Color = hex(0xff006e, 1.0);
    pub const EYE: Color = hex(0xffffff, 1.0);
    pub const PUPIL: Color = hex(0x000000, 1.0);
    pub const ALLY_SHOT: Color = hex(0x00ff00, 1.0);
    pub const HOSTILE_SHOT: Color = hex(0xff0000, 1.0);
    pub const PICKUP: Color = hex(0xffd700, 1.0);
    pub const PICKUP_BORDER: Color = hex(0xff8c00, 1.0);
    pub const PICKUP_MARK: Color = hex(0x000000, 1.0);
    pub const TEXT: Color = hex(0xffffff, 1.0);
    pub const BANNER_GOOD: Color = hex(0x00ff00, 1.0);
    pub const BANNER_BAD: Color = hex(0xff0000, 1.0);
}

/// Horizontal anchor of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub color: Color,
    pub bold: bool,
    pub align: TextAlign,
}

/// The host's canvas
pub trait DrawSurface {
    /// Wipe the whole surface to `color`
    fn clear(&mut self, size: Vec2, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Rectangle of `size` centered on `center`, rotated by `angle` radians
    fn fill_rotated_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        angle: f32,
        fill: Color,
        outline: Option<Color>,
    );
    /// Text anchored at `pos` (vertical middle for centered runs)
    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}

/// A recorded primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: Vec2,
        color: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    RotatedRect {
        center: Vec2,
        size: Vec2,
        angle: f32,
        fill: Color,
        outline: Option<Color>,
    },
    Text {
        text: String,
        pos: Vec2,
        style: TextStyle,
    },
}

/// Records every call; used by headless hosts and tests
impl DrawSurface for Vec<DrawCommand> {
    fn clear(&mut self, size: Vec2, color: Color) {
        self.push(DrawCommand::Clear { size, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::Rect { rect, color });
    }

    fn fill_rotated_rect(
        &mut self,
        center: Vec2,
        size: Vec2,
        angle: f32,
        fill: Color,
        outline: Option<Color>,
    ) {
        self.push(DrawCommand::RotatedRect {
            center,
            size,
            angle,
            fill,
            outline,
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(hex(0xff0000, 1.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x00ff00, 0.5), [0.0, 1.0, 0.0, 0.5]);
    }
}
