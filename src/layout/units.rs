//! Unit conversions between millimetres, points, twips and pixels.
//!
//! Every conversion clamps non-finite input to zero so a bad measurement
//! degrades to an empty extent instead of poisoning later arithmetic.

/// Millimetres per typographic point
pub const MM_PER_PT: f32 = 0.352778;

/// Twips (1/20 pt) per point, as used by DOCX
pub const TWIPS_PER_PT: f32 = 20.0;

/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;

/// CSS reference resolution
pub const DEFAULT_DPI: f32 = 96.0;

#[inline]
fn finite(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub fn mm_to_pt(mm: f32) -> f32 {
    finite(mm) / MM_PER_PT
}

pub fn pt_to_mm(pt: f32) -> f32 {
    finite(pt) * MM_PER_PT
}

pub fn pt_to_twips(pt: f32) -> f32 {
    finite(pt) * TWIPS_PER_PT
}

pub fn twips_to_pt(twips: f32) -> f32 {
    finite(twips) / TWIPS_PER_PT
}

pub fn px_to_mm(px: f32, dpi: f32) -> f32 {
    let dpi = finite(dpi);
    if dpi <= 0.0 {
        return 0.0;
    }
    finite(px) * MM_PER_INCH / dpi
}

pub fn mm_to_px(mm: f32, dpi: f32) -> f32 {
    finite(mm) * finite(dpi) / MM_PER_INCH
}
