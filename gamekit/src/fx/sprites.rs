//! Sprite Strips
//!
//! Frames laid out left to right in one image row. Frame `n` is the
//! `frame_w`-wide slice starting at `n * frame_w`.

use serde::{Serialize, Deserialize};

use crate::host::{Blit, Surface};

/// Blit frame `frame` of a horizontal strip to (x, y), scaled by `scale`.
/// Returns the region that was drawn.
#[allow(clippy::too_many_arguments)]
pub fn draw<S: Surface + ?Sized>(
    surface: &mut S,
    image: &str,
    frame: u32,
    frame_w: f32,
    frame_h: f32,
    x: f32,
    y: f32,
    scale: f32,
) -> Blit {
    let blit = Blit {
        sx: frame as f32 * frame_w,
        sy: 0.0,
        sw: frame_w,
        sh: frame_h,
        dx: x,
        dy: y,
        dw: frame_w * scale,
        dh: frame_h * scale,
    };
    surface.draw_image(image, blit);
    blit
}

/// A strip image with its frame size, for animating by time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteSheet {
    /// Asset source of the strip
    pub image: String,
    /// Frame width in pixels
    pub frame_w: f32,
    /// Frame height in pixels
    pub frame_h: f32,
    /// Frames in the strip
    pub frames: u32,
}

impl SpriteSheet {
    /// Describe a strip of `frames` frames of `frame_w` x `frame_h`.
    pub fn new(image: impl Into<String>, frame_w: f32, frame_h: f32, frames: u32) -> Self {
        Self {
            image: image.into(),
            frame_w,
            frame_h,
            frames,
        }
    }

    /// Frame showing `elapsed_ms` into a loop played at `fps`.
    ///
    /// A sheet with no frames or a non-positive rate stays on frame 0.
    pub fn frame_at(&self, elapsed_ms: f64, fps: f64) -> u32 {
        if self.frames == 0 || fps.is_nan() || fps <= 0.0 || !elapsed_ms.is_finite() {
            return 0;
        }
        let ticks = (elapsed_ms.max(0.0) * fps / 1000.0) as u64;
        (ticks % u64::from(self.frames)) as u32
    }

    /// Draw `frame` (wrapped into the strip) at (x, y).
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, frame: u32, x: f32, y: f32, scale: f32) -> Blit {
        let frame = if self.frames == 0 { 0 } else { frame % self.frames };
        draw(surface, &self.image, frame, self.frame_w, self.frame_h, x, y, scale)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{DrawCommand, RecordingSurface};

    #[test]
    fn test_draw_selects_frame_slice() {
        let mut surface = RecordingSurface::new();
        let blit = draw(&mut surface, "hero.png", 3, 16.0, 24.0, 100.0, 50.0, 2.0);

        let expected = Blit {
            sx: 48.0,
            sy: 0.0,
            sw: 16.0,
            sh: 24.0,
            dx: 100.0,
            dy: 50.0,
            dw: 32.0,
            dh: 48.0,
        };
        assert_eq!(blit, expected);
        assert_eq!(surface.commands, vec![DrawCommand::Image("hero.png".into(), expected)]);
    }

    #[test]
    fn test_sheet_frame_at_loops() {
        let sheet = SpriteSheet::new("walk.png", 8.0, 8.0, 4);
        assert_eq!(sheet.frame_at(0.0, 10.0), 0);
        assert_eq!(sheet.frame_at(250.0, 10.0), 2);
        assert_eq!(sheet.frame_at(450.0, 10.0), 0);
        assert_eq!(sheet.frame_at(1000.0, 0.0), 0);
        assert_eq!(SpriteSheet::new("none.png", 8.0, 8.0, 0).frame_at(500.0, 10.0), 0);
    }

    #[test]
    fn test_sheet_draw_wraps_frame() {
        let sheet = SpriteSheet::new("walk.png", 8.0, 8.0, 4);
        let mut surface = RecordingSurface::new();
        let blit = sheet.draw(&mut surface, 5, 0.0, 0.0, 1.0);
        assert_eq!(blit.sx, 8.0);
        assert_eq!(surface.commands.len(), 1);
    }
}
