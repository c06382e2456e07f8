//! Eos command-line formulation: channel targets, levels and color clauses.

use serde::{Deserialize, Serialize};

/// Abstract channel selection, local to the bridge.
///
/// Ids are zero-based logical indices; the configured start channel is
/// added when the selection is resolved to console channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    /// A single channel.
    One(u32),
    /// An inclusive channel range, in the given order.
    Range(u32, u32),
    /// Every channel the console knows about (dialect-dependent).
    All,
}

/// An RGB color with 0..1 channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const BLACK: Color = Color { red: 0.0, green: 0.0, blue: 0.0 };

    pub fn new(red: f32, green: f32, blue: f32) -> Color {
        Color { red, green, blue }
    }

    /// Per-channel linear blend towards `other`. `p` is 0 at self, 1 at other.
    pub fn lerp(&self, other: &Color, p: f32) -> Color {
        Color {
            red: self.red + (other.red - self.red) * p,
            green: self.green + (other.green - self.green) * p,
            blue: self.blue + (other.blue - self.blue) * p,
        }
    }

    /// Scale every channel by a factor.
    pub fn scaled(&self, fac: f32) -> Color {
        Color {
            red: self.red * fac,
            green: self.green * fac,
            blue: self.blue * fac,
        }
    }
}

/// Wire dialect selector for the console protocol variants in the field.
///
/// One Eos install speaks colors over `/eos/color/rgb`, another spells them
/// out on the command line, a third selects "everything" through a group.
/// A profile bundles those choices so the session can stay generic.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Profile {
    /// Colors ride `/eos/color/rgb`; `Select_All`; two cue patterns.
    Classic,
    /// Colors ride the command line and blackouts zero the auxiliary
    /// emitters (Cyan/Amber/Indigo/White) too; `Select_All`.
    Emitter,
    /// Colors ride the command line; "all" addresses a console group
    /// numbered like the start channel.
    Grouped,
}

impl Profile {
    /// Selection clause for the "everything" target.
    pub fn all_clause(&self, offset: u32) -> String {
        match self {
            Profile::Grouped => format!("Group {}", offset),
            _ => "Select_All".to_string(),
        }
    }

    /// Address patterns that carry cue locator updates.
    pub fn cue_patterns(&self) -> &'static [&'static str] {
        match self {
            Profile::Classic => &["/eos/out/*/cue/*/*", "/eos/out/pending/cue"],
            _ => &[
                "/eos/out/*/cue/*/*",
                "/eos/out/pending/cue",
                "/eos/out/*/cue",
            ],
        }
    }

    /// Whether colors are spelled out on the command line instead of
    /// being sent as `/eos/color/rgb` float arguments.
    pub fn inline_color(&self) -> bool {
        !matches!(self, Profile::Classic)
    }

    /// Whether color clauses zero the non-RGB emitters as well.
    pub fn other_emitters(&self) -> bool {
        matches!(self, Profile::Emitter)
    }
}

/// Resolve a selection to an Eos channel clause.
///
/// `offset` is the first real console channel; ranges keep the caller's
/// order (Eos accepts a high-to-low Thru range).
pub fn resolve(selection: Selection, offset: u32, profile: Profile) -> String {
    match selection {
        Selection::One(id) => format!("Chan {}", offset + id),
        Selection::Range(start, end) => {
            format!("Chan {} Thru {}", offset + start, offset + end)
        }
        Selection::All => profile.all_clause(offset),
    }
}

/// Format a 0..1 level as an Eos percent token.
///
/// Eos reads single digits as tens on the command line, so 1..9 get a
/// leading zero. Out-of-range input is clamped.
pub fn level(v: f32) -> String {
    let v = v.max(0.0).min(1.0);
    let n = (v * 100.0).round() as u32;
    if n > 0 && n < 10 {
        format!("0{}", n)
    } else {
        n.to_string()
    }
}

/// Format a command-line color clause.
///
/// With `other_emitters`, the four auxiliary emitter channels are zeroed
/// too so a blackout darkens multi-emitter fixtures completely.
pub fn color_clause(color: Color, other_emitters: bool) -> String {
    let mut clause = format!(
        "Red {} Green {} Blue {}",
        level(color.red),
        level(color.green),
        level(color.blue)
    );
    if other_emitters {
        clause.push_str(" Cyan 0 Amber 0 Indigo 0 White 0");
    }
    clause
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_one_applies_offset() {
        assert_eq!(resolve(Selection::One(4), 101, Profile::Classic), "Chan 105");
        assert_eq!(resolve(Selection::One(0), 0, Profile::Classic), "Chan 0");
    }

    #[test]
    fn resolve_range_keeps_order() {
        assert_eq!(
            resolve(Selection::Range(0, 9), 1, Profile::Classic),
            "Chan 1 Thru 10"
        );
        // High-to-low stays high-to-low.
        assert_eq!(
            resolve(Selection::Range(9, 0), 1, Profile::Classic),
            "Chan 10 Thru 1"
        );
    }

    #[test]
    fn resolve_all_depends_on_profile() {
        assert_eq!(resolve(Selection::All, 7, Profile::Classic), "Select_All");
        assert_eq!(resolve(Selection::All, 7, Profile::Emitter), "Select_All");
        assert_eq!(resolve(Selection::All, 7, Profile::Grouped), "Group 7");
    }

    #[test]
    fn level_pads_single_digits() {
        assert_eq!(level(0.0), "0");
        assert_eq!(level(0.09), "09");
        assert_eq!(level(0.1), "10");
        assert_eq!(level(0.5), "50");
        assert_eq!(level(1.0), "100");
    }

    #[test]
    fn level_clamps_out_of_range() {
        assert_eq!(level(-0.5), "0");
        assert_eq!(level(1.5), "100");
    }

    #[test]
    fn level_is_monotonic() {
        let mut last = 0;
        for step in 0..=100 {
            let s = level(step as f32 / 100.0);
            let n: u32 = s.parse().unwrap();
            assert!(n >= last);
            last = n;
        }
    }

    #[test]
    fn color_clause_rgb_only() {
        let c = Color::new(1.0, 0.5, 0.05);
        assert_eq!(color_clause(c, false), "Red 100 Green 50 Blue 05");
    }

    #[test]
    fn color_clause_with_other_emitters() {
        assert_eq!(
            color_clause(Color::BLACK, true),
            "Red 0 Green 0 Blue 0 Cyan 0 Amber 0 Indigo 0 White 0"
        );
    }
}
