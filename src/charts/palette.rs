//! Fixed chart colors

use plotters::style::RGBColor;

pub const MALE_BLUE: RGBColor = RGBColor(0, 0, 255);
pub const FEMALE_PINK: RGBColor = RGBColor(255, 192, 203);
pub const RURAL_SKY: RGBColor = RGBColor(135, 206, 235);
pub const URBAN_ORANGE: RGBColor = RGBColor(255, 165, 0);
pub const DENSITY_PURPLE: RGBColor = RGBColor(128, 0, 128);
pub const RURAL_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const LINE_BLUE: RGBColor = RGBColor(0, 0, 255);
pub const GRID_GRAY: RGBColor = RGBColor(200, 200, 200);
pub const MISSING_GRAY: RGBColor = RGBColor(160, 160, 160);

/// Ten evenly spaced stops of the viridis ramp, dark to light.
pub const VIRIDIS_10: [RGBColor; 10] = [
    RGBColor(68, 1, 84),
    RGBColor(72, 40, 120),
    RGBColor(62, 73, 137),
    RGBColor(49, 104, 142),
    RGBColor(38, 130, 142),
    RGBColor(31, 158, 137),
    RGBColor(53, 183, 121),
    RGBColor(110, 206, 88),
    RGBColor(181, 222, 43),
    RGBColor(253, 231, 37),
];

const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Diverging blue-white-red color for a correlation in [-1, 1].
/// `NaN` maps to gray.
pub fn coolwarm(r: f64) -> RGBColor {
    if r.is_nan() {
        return MISSING_GRAY;
    }

    let r = r.clamp(-1.0, 1.0);
    let (from, to, t) = if r < 0.0 {
        (COOL, NEUTRAL, r + 1.0)
    } else {
        (NEUTRAL, WARM, r)
    };

    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(lerp(from.0, to.0), lerp(from.1, to.1), lerp(from.2, to.2))
}
