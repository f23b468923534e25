//! The fixed set of articulated parts and their hierarchy.

/// One rigid piece of the articulated model.
///
/// Declared in topological (parent-before-child) order, so iterating
/// [`Part::ALL`] always visits a parent before any of its children. The
/// discriminant doubles as the index into per-part arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Part {
    /// Ground platform, translated across the grid plane.
    Base,
    /// Rotating turntable on top of the base.
    Top,
    /// Lower arm segment, hinged on the turntable.
    Arm1,
    /// Elbow connecting the two arm segments (rigid, no pose).
    Joint,
    /// Upper arm segment, hinged at the joint.
    Arm2,
    /// Pen mounted at the end of the upper arm (three rotation axes).
    Pen,
    /// Button on the pen barrel (rigid, no pose).
    Button,
}

/// Smallest picking code; codes below this are never emitted.
pub const PICK_CODE_MIN: u8 = 2;

/// Offset added to a part's code when its highlighted variant is drawn.
pub const HIGHLIGHT_CODE_OFFSET: u8 = 7;

impl Part {
    /// Number of parts in the model.
    pub const COUNT: usize = 7;

    /// All parts in topological order (every parent precedes its children).
    pub const ALL: [Self; Self::COUNT] = [
        Self::Base,
        Self::Top,
        Self::Arm1,
        Self::Joint,
        Self::Arm2,
        Self::Pen,
        Self::Button,
    ];

    /// The parent part, or `None` for the root of the hierarchy.
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Base => None,
            Self::Top => Some(Self::Base),
            Self::Arm1 => Some(Self::Top),
            Self::Joint => Some(Self::Arm1),
            Self::Arm2 => Some(Self::Joint),
            Self::Pen => Some(Self::Arm2),
            Self::Button => Some(Self::Pen),
        }
    }

    /// Index into per-part arrays ([`Part::ALL`] order).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label for the UI/log.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Top => "Top",
            Self::Arm1 => "Arm1",
            Self::Joint => "Joint",
            Self::Arm2 => "Arm2",
            Self::Pen => "Pen",
            Self::Button => "Button",
        }
    }

    /// Picking code for this part's normal mesh variant (2..=8).
    #[must_use]
    pub const fn pick_code(self) -> u8 {
        PICK_CODE_MIN + self as u8
    }

    /// Picking code for this part's highlighted mesh variant (9..=15).
    #[must_use]
    pub const fn highlight_pick_code(self) -> u8 {
        self.pick_code() + HIGHLIGHT_CODE_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_order_is_topological() {
        for (i, part) in Part::ALL.iter().enumerate() {
            assert_eq!(part.index(), i);
            if let Some(parent) = part.parent() {
                assert!(
                    parent.index() < i,
                    "{} must precede {}",
                    parent.label(),
                    part.label()
                );
            }
        }
    }

    #[test]
    fn base_is_the_only_root() {
        let roots: Vec<_> =
            Part::ALL.iter().filter(|p| p.parent().is_none()).collect();
        assert_eq!(roots, vec![&Part::Base]);
    }

    #[test]
    fn pick_codes_are_distinct_and_in_range() {
        let mut seen = std::collections::HashSet::new();
        for part in Part::ALL {
            for code in [part.pick_code(), part.highlight_pick_code()] {
                assert!((2..=239).contains(&code));
                assert!(seen.insert(code), "duplicate code {code}");
            }
        }
    }

    #[test]
    fn base_codes_match_identity_table() {
        assert_eq!(Part::Base.pick_code(), 2);
        assert_eq!(Part::Base.highlight_pick_code(), 9);
        assert_eq!(Part::Button.pick_code(), 8);
        assert_eq!(Part::Button.highlight_pick_code(), 15);
    }
}
