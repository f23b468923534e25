//! Typed pick-target resolution from raw picking-pass bytes.

use crate::scene::part::{Part, HIGHLIGHT_CODE_OFFSET, PICK_CODE_MIN};

/// Red-channel value of the picking pass clear color (full white).
pub const BACKGROUND_CODE: u8 = 255;

/// A typed pick target decoded from one picking-pass pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// The clear color: nothing under the cursor.
    Background,
    /// A part of the model.
    Part {
        /// Which part was hit.
        part: Part,
        /// Whether the hit pixel came from the highlighted mesh variant
        /// (i.e. the part was already selected when the pass rendered).
        highlighted: bool,
    },
    /// A code with no entry in the identity table (e.g. a blended edge
    /// artifact). Reported verbatim, never silently dropped.
    Unresolved(u8),
}

/// Picking code for `part`'s current mesh variant.
#[must_use]
pub const fn encode(part: Part, highlighted: bool) -> u8 {
    if highlighted {
        part.highlight_pick_code()
    } else {
        part.pick_code()
    }
}

/// Decode the red byte of a picking-pass pixel.
///
/// The identity table is the bijection built into [`Part`]: normal
/// variants occupy `2..=8` in [`Part::ALL`] order, highlighted variants
/// `9..=15`, and 255 is reserved for the background. Everything else is
/// [`PickTarget::Unresolved`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn resolve(code: u8) -> PickTarget {
    if code == BACKGROUND_CODE {
        return PickTarget::Background;
    }
    let span = Part::COUNT as u8;
    if code >= PICK_CODE_MIN && code < PICK_CODE_MIN + 2 * span {
        let idx = code - PICK_CODE_MIN;
        let part = Part::ALL[(idx % span) as usize];
        return PickTarget::Part {
            part,
            highlighted: idx >= HIGHLIGHT_CODE_OFFSET,
        };
    }
    PickTarget::Unresolved(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_code_resolves_to_background() {
        assert_eq!(resolve(255), PickTarget::Background);
    }

    #[test]
    fn unknown_codes_resolve_to_unresolved() {
        for code in [0u8, 1, 16, 100, 239, 254] {
            assert_eq!(resolve(code), PickTarget::Unresolved(code));
        }
    }

    #[test]
    fn every_part_round_trips_both_variants() {
        for part in Part::ALL {
            for highlighted in [false, true] {
                let code = encode(part, highlighted);
                assert_eq!(
                    resolve(code),
                    PickTarget::Part { part, highlighted }
                );
            }
        }
    }

    #[test]
    fn boundary_codes_resolve() {
        assert_eq!(
            resolve(2),
            PickTarget::Part {
                part: Part::Base,
                highlighted: false
            }
        );
        assert_eq!(
            resolve(9),
            PickTarget::Part {
                part: Part::Base,
                highlighted: true
            }
        );
    }
}
