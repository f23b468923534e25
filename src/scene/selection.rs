//! Explicit selection state fed by the picking resolver.

use crate::renderer::picking::PickTarget;
use crate::scene::part::Part;

/// What a resolved pick did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// A normal-variant hit: the part became the new selection.
    Selected(Part),
    /// A highlighted-variant hit: the label was refreshed, selection
    /// unchanged.
    Relabeled(Part),
    /// The cursor was over the clear color.
    Background,
    /// A code outside the identity table; state unchanged.
    Unresolved(u8),
}

/// At most one selected part, plus a human-readable label for display.
///
/// Selection decides which mesh variant the renderer binds for a part
/// and which pose parameter the controller's directional input drives.
/// It changes only through [`apply_pick`](Self::apply_pick) and
/// [`clear`](Self::clear).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    selected: Option<Part>,
    label: String,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    /// No selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selected: None,
            label: String::new(),
        }
    }

    /// The currently selected part, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<Part> {
        self.selected
    }

    /// Whether `part` is the current selection (and therefore drawn with
    /// its highlighted mesh variant).
    #[must_use]
    pub fn is_selected(&self, part: Part) -> bool {
        self.selected == Some(part)
    }

    /// Label of the last pick, for UI display.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Explicit deselect (mode toggled off).
    pub fn clear(&mut self) {
        self.selected = None;
        self.label.clear();
    }

    /// Fold a decoded pick target into the selection.
    ///
    /// A normal-variant hit replaces any prior selection with the hit
    /// part. A highlighted-variant hit only refreshes the label (it was
    /// already selected when the picking pass rendered). Background and
    /// unresolved codes leave the selection untouched; unresolved codes
    /// are logged verbatim.
    pub fn apply_pick(&mut self, target: PickTarget) -> PickOutcome {
        match target {
            PickTarget::Part {
                part,
                highlighted: false,
            } => {
                self.selected = Some(part);
                self.label = part.label().to_owned();
                PickOutcome::Selected(part)
            }
            PickTarget::Part {
                part,
                highlighted: true,
            } => {
                self.label = part.label().to_owned();
                PickOutcome::Relabeled(part)
            }
            PickTarget::Background => {
                self.label = "background".to_owned();
                PickOutcome::Background
            }
            PickTarget::Unresolved(code) => {
                log::warn!("unresolved pick code {code}");
                self.label = format!("point {code}");
                PickOutcome::Unresolved(code)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::picking::pick_map;

    #[test]
    fn normal_hit_selects_and_labels() {
        let mut sel = SelectionState::new();
        let outcome = sel.apply_pick(pick_map::resolve(2));
        assert_eq!(outcome, PickOutcome::Selected(Part::Base));
        assert_eq!(sel.selected(), Some(Part::Base));
        assert!(sel.is_selected(Part::Base));
        assert_eq!(sel.label(), "Base");
    }

    #[test]
    fn highlighted_hit_relabels_without_changing_selection() {
        let mut sel = SelectionState::new();
        let _ = sel.apply_pick(pick_map::resolve(Part::Base.pick_code()));
        let outcome =
            sel.apply_pick(pick_map::resolve(Part::Base.highlight_pick_code()));
        assert_eq!(outcome, PickOutcome::Relabeled(Part::Base));
        assert_eq!(sel.selected(), Some(Part::Base));
        assert_eq!(sel.label(), "Base");
    }

    #[test]
    fn new_selection_replaces_the_old_one() {
        let mut sel = SelectionState::new();
        let _ = sel.apply_pick(pick_map::resolve(Part::Arm1.pick_code()));
        let _ = sel.apply_pick(pick_map::resolve(Part::Pen.pick_code()));
        assert_eq!(sel.selected(), Some(Part::Pen));
        assert!(!sel.is_selected(Part::Arm1));
    }

    #[test]
    fn background_and_unresolved_leave_selection() {
        let mut sel = SelectionState::new();
        let _ = sel.apply_pick(pick_map::resolve(Part::Top.pick_code()));

        assert_eq!(sel.apply_pick(pick_map::resolve(255)), PickOutcome::Background);
        assert_eq!(sel.selected(), Some(Part::Top));
        assert_eq!(sel.label(), "background");

        assert_eq!(
            sel.apply_pick(pick_map::resolve(42)),
            PickOutcome::Unresolved(42)
        );
        assert_eq!(sel.selected(), Some(Part::Top));
        assert_eq!(sel.label(), "point 42");
    }

    #[test]
    fn clear_is_the_only_reset() {
        let mut sel = SelectionState::new();
        let _ = sel.apply_pick(pick_map::resolve(Part::Joint.pick_code()));
        sel.clear();
        assert_eq!(sel.selected(), None);
        assert_eq!(sel.label(), "");
    }
}
