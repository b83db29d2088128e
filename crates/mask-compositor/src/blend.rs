//! Per-pixel overlay blending

use image::{RgbImage, RgbaImage};

/// Source of the per-pixel blend weight
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendAlpha {
    /// Overlay alpha channel scaled by a global opacity
    Channel { opacity: f32 },
    /// Every painted pixel replaces the frame
    Opaque,
}

/// Blend `overlay` into `frame` with its top-left corner at `origin`.
///
/// Overlay pixels whose channel sum is at or below `near_black` are left out,
/// so a black background never gets painted. Pixels falling outside the
/// frame are clipped. Returns the number of frame pixels written.
pub fn blend_overlay(
    frame: &mut RgbImage,
    overlay: &RgbaImage,
    origin: (i32, i32),
    alpha: BlendAlpha,
    near_black: u32,
) -> usize {
    let (frame_w, frame_h) = (frame.width() as i64, frame.height() as i64);
    let (over_w, over_h) = (overlay.width() as i64, overlay.height() as i64);
    let (ox, oy) = (origin.0 as i64, origin.1 as i64);

    // Clip the overlay rectangle to the frame once, up front
    let x0 = ox.max(0);
    let x1 = (ox + over_w).min(frame_w);
    let y0 = oy.max(0);
    let y1 = (oy + over_h).min(frame_h);
    if x0 >= x1 || y0 >= y1 {
        return 0;
    }

    let src: &[u8] = overlay;
    let dst: &mut [u8] = frame;
    let span = (x1 - x0) as usize;
    let mut written = 0;

    for y in y0..y1 {
        let src_start = (((y - oy) * over_w + (x0 - ox)) * 4) as usize;
        let dst_start = ((y * frame_w + x0) * 3) as usize;
        let src_row = &src[src_start..src_start + span * 4];
        let dst_row = &mut dst[dst_start..dst_start + span * 3];

        for (s, d) in src_row.chunks_exact(4).zip(dst_row.chunks_exact_mut(3)) {
            if u32::from(s[0]) + u32::from(s[1]) + u32::from(s[2]) <= near_black {
                continue;
            }
            let a = match alpha {
                BlendAlpha::Channel { opacity } => f32::from(s[3]) / 255.0 * opacity,
                BlendAlpha::Opaque => 1.0,
            };
            for c in 0..3 {
                d[c] = (f32::from(d[c]) * (1.0 - a) + f32::from(s[c]) * a) as u8;
            }
            written += 1;
        }
    }

    written
}
