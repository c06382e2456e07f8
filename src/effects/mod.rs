//! Interpolated multi-channel effects: color gradients and point sweeps.

use crate::command::Color;

/// What a point effect paints onto the channels it covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointPayload {
    /// Scalar intensity, 0..1.
    Level(f32),
    /// Full RGB color.
    Rgb(Color),
}

/// Compute the per-channel colors of a linear gradient.
///
/// `from` sits at the low end of the range, `to` at the high end; a
/// collapsed range yields a single stop with `from` unblended. Stops are
/// returned in ascending channel order.
pub fn gradient_stops(start: u32, end: u32, from: Color, to: Color) -> Vec<(u32, Color)> {
    if start == end {
        return vec![(start, from)];
    }

    let min = start.min(end);
    let max = start.max(end);

    let mut stops = Vec::with_capacity((max - min + 1) as usize);
    for i in min..=max {
        // Position of this channel within the range.
        let p = (i - min) as f32 / (max - min) as f32;
        stops.push((i, from.lerp(&to, p)));
    }
    stops
}

/// Compute the per-channel intensity factors of a point effect.
///
/// `position` places the point center within the range (0..1), `size` is
/// the half-width of its footprint and `fade` steepens the triangular ramp
/// inside it. Channels outside the footprint get factor 0 so they are
/// blanked rather than left untouched. A collapsed range yields the single
/// channel at full factor; a reversed range yields nothing.
pub fn point_factors(
    start: u32,
    end: u32,
    position: f32,
    size: f32,
    fade: f32,
) -> Vec<(u32, f32)> {
    if start == end {
        return vec![(start, 1.0)];
    }
    if start > end {
        return vec![];
    }

    let mut factors = Vec::with_capacity((end - start + 1) as usize);
    for i in start..=end {
        // Position of this channel within the range.
        let p = (i - start) as f32 / (end - start) as f32;

        if (position - p).abs() < size {
            // Triangular ramp inside the footprint; the 3x shaping
            // constant is part of the established look.
            let fac = (position - p) * fade * 3.0;
            let fac = 1.0 - (fac / size).abs();
            factors.push((i, fac.max(0.0).min(1.0)));
        } else {
            factors.push((i, 0.0));
        }
    }
    factors
}
