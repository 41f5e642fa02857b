//! Selection navigation over a rendered item list.
//!
//! `SelectionNavigator` computes where the selection marker moves when the
//! user presses a select-up/select-down shortcut. It is a pure computation
//! over a `ViewSnapshot` rebuilt from the live view on every call; the
//! navigator holds no references across calls. The caller applies the
//! result: clear every selected flag now, defer the new mark, and apply
//! the scroll effect.
//!
//! Every boundary condition (no list on screen, empty list, moving past
//! either end) yields `None` and the caller does nothing. Pressing a
//! shortcut at a boundary must feel like nothing happened, not like an
//! error.

/// Default extra scroll margin so the selected item never sits flush
/// against the viewport edge.
pub const DEFAULT_SCROLL_SLACK: i64 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    fn delta(self) -> i64 {
        match self {
            Direction::Next => 1,
            Direction::Previous => -1,
        }
    }
}

/// Transient geometry of one selectable item, in vertical view units.
#[derive(Debug, Clone)]
pub struct ItemGeometry {
    pub top: i64,
    pub height: i64,
    pub selected: bool,
    /// Present when the item is a cloaked placeholder standing in for an
    /// off-screen post. Selecting it requires jumping the view to this id
    /// instead of scrolling.
    pub external_id: Option<u64>,
}

/// Snapshot of the live list view at the moment of a navigation call.
#[derive(Debug, Clone, Default)]
pub struct ViewSnapshot {
    pub items: Vec<ItemGeometry>,
    pub scroll_offset: i64,
    pub viewport_height: i64,
}

/// How the viewport should follow the new selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEffect {
    ScrollTo(i64),
    JumpToExternal(u64),
}

/// Result of a successful navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionMove {
    /// Index of the item to mark selected.
    pub select: usize,
    pub effect: Option<ScrollEffect>,
}

#[derive(Debug, Clone)]
pub struct SelectionNavigator {
    slack: i64,
}

impl Default for SelectionNavigator {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_SLACK)
    }
}

impl SelectionNavigator {
    pub fn new(slack: i64) -> Self {
        Self { slack }
    }

    /// Compute the next selection for a navigation key press.
    ///
    /// Returns `None` when nothing should change: empty snapshot, moving
    /// `Previous` from index 0, or moving past the last item. Navigation
    /// never wraps.
    pub fn move_selection(
        &self,
        view: &ViewSnapshot,
        direction: Direction,
    ) -> Option<SelectionMove> {
        if view.items.is_empty() {
            return None;
        }

        let len = view.items.len() as i64;
        let selected = view.items.iter().position(|item| item.selected);

        let candidate = match selected {
            Some(index) => {
                if direction == Direction::Previous && index == 0 {
                    return None;
                }
                index as i64 + direction.delta()
            }
            None => {
                // Nothing selected: the first item at or after the scroll
                // offset stands in as the current position, clamped to the
                // last item when the viewport is scrolled past everything.
                let mut index = view
                    .items
                    .iter()
                    .position(|item| item.top >= view.scroll_offset)
                    .unwrap_or(view.items.len()) as i64;
                if index >= len {
                    index = len - 1;
                }
                if direction == Direction::Previous && index == 0 {
                    return None;
                }
                // Moving down selects the stand-in itself rather than
                // skipping past it.
                match direction {
                    Direction::Next => index,
                    Direction::Previous => index - 1,
                }
            }
        };

        if candidate < 0 || candidate >= len {
            return None;
        }

        let candidate = candidate as usize;
        let item = &view.items[candidate];

        let effect = match item.external_id {
            // Cloaked stand-in: jump the view to the real post, no scroll
            // arithmetic against placeholder geometry.
            Some(id) => Some(ScrollEffect::JumpToExternal(id)),
            None => self
                .scroll_into_view(item, view, direction)
                .map(ScrollEffect::ScrollTo),
        };

        Some(SelectionMove {
            select: candidate,
            effect,
        })
    }

    /// Scroll offset that brings `item` into view, or `None` when that
    /// would move the viewport against the direction of travel.
    pub fn scroll_into_view(
        &self,
        item: &ItemGeometry,
        view: &ViewSnapshot,
        direction: Direction,
    ) -> Option<i64> {
        // Slack beyond what the viewport can absorb would push the item
        // out of view above the new offset
        let slack = self.slack.min((view.viewport_height - item.height).max(0));

        let mut distance = item.top + item.height - view.viewport_height - view.scroll_offset;
        distance += slack;

        let delta = direction.delta();
        if (delta > 0 && distance < 0) || (delta < 0 && distance > 0) {
            return None;
        }

        Some(view.scroll_offset + distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(top: i64, height: i64) -> ItemGeometry {
        ItemGeometry {
            top,
            height,
            selected: false,
            external_id: None,
        }
    }

    /// Five uniform items of height 10, stacked from 0.
    fn snapshot(selected: Option<usize>, scroll_offset: i64) -> ViewSnapshot {
        let mut items: Vec<ItemGeometry> = (0..5).map(|i| item(i * 10, 10)).collect();
        if let Some(index) = selected {
            items[index].selected = true;
        }
        ViewSnapshot {
            items,
            scroll_offset,
            viewport_height: 30,
        }
    }

    #[test]
    fn test_next_selects_following_item() {
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(Some(1), 0);

        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.select, 2);
    }

    #[test]
    fn test_previous_selects_preceding_item() {
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(Some(3), 0);

        let mv = navigator
            .move_selection(&view, Direction::Previous)
            .unwrap();
        assert_eq!(mv.select, 2);
    }

    #[test]
    fn test_previous_at_first_item_is_noop() {
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(Some(0), 0);

        assert!(navigator
            .move_selection(&view, Direction::Previous)
            .is_none());
    }

    #[test]
    fn test_next_at_last_item_is_noop() {
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(Some(4), 0);

        assert!(navigator.move_selection(&view, Direction::Next).is_none());
    }

    #[test]
    fn test_empty_list_is_noop() {
        let navigator = SelectionNavigator::default();
        let view = ViewSnapshot::default();

        assert!(navigator.move_selection(&view, Direction::Next).is_none());
        assert!(navigator
            .move_selection(&view, Direction::Previous)
            .is_none());
    }

    #[test]
    fn test_no_selection_picks_first_visible() {
        let navigator = SelectionNavigator::new(0);
        // Scrolled so item 2 (top 20) is the first at or after the offset
        let view = snapshot(None, 15);

        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.select, 2);
    }

    #[test]
    fn test_no_selection_at_top_picks_first_item() {
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(None, 0);

        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.select, 0);
    }

    #[test]
    fn test_no_selection_scrolled_past_end_clamps_to_last() {
        let navigator = SelectionNavigator::new(0);
        // Offset beyond every item's top
        let view = snapshot(None, 500);

        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.select, 4);
    }

    #[test]
    fn test_no_selection_previous_at_first_visible_zero_is_noop() {
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(None, 0);

        assert!(navigator
            .move_selection(&view, Direction::Previous)
            .is_none());
    }

    #[test]
    fn test_cloaked_candidate_jumps_instead_of_scrolling() {
        let navigator = SelectionNavigator::new(0);
        let mut view = snapshot(Some(2), 0);
        view.items[3].external_id = Some(17);

        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.select, 3);
        assert_eq!(mv.effect, Some(ScrollEffect::JumpToExternal(17)));
    }

    #[test]
    fn test_scroll_follows_direction_of_travel() {
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(Some(2), 0);

        // Item 3 ends at 40, viewport covers 0..30: scroll forward by 10
        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.effect, Some(ScrollEffect::ScrollTo(10)));
    }

    #[test]
    fn test_scroll_never_moves_backward_for_next() {
        let navigator = SelectionNavigator::new(0);
        // Selected item 0, scrolled well past the candidate's bottom edge
        let view = snapshot(Some(0), 25);

        // Candidate item 1 ends at 20; distance = 20 - 30 - 25 = -35 < 0,
        // which would scroll backward while moving Next
        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.select, 1);
        assert_eq!(mv.effect, None);
    }

    #[test]
    fn test_scroll_never_moves_forward_for_previous() {
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(Some(4), 0);

        // Candidate item 3 ends at 40; distance = 40 - 30 - 0 = +10 > 0,
        // which would scroll forward while moving Previous
        let mv = navigator
            .move_selection(&view, Direction::Previous)
            .unwrap();
        assert_eq!(mv.select, 3);
        assert_eq!(mv.effect, None);
    }

    #[test]
    fn test_default_slack_keeps_selection_inside_viewport() {
        let navigator = SelectionNavigator::default();
        // 4-row posts in a 22-row viewport: slack uncapped at 40 would
        // place the new offset past the selected item entirely
        let mut items: Vec<ItemGeometry> = (0..20).map(|i| item(i * 4, 4)).collect();
        items[10].selected = true;
        let view = ViewSnapshot {
            items,
            scroll_offset: 28,
            viewport_height: 22,
        };

        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.select, 11);
        let Some(ScrollEffect::ScrollTo(offset)) = mv.effect else {
            panic!("expected a scroll effect");
        };
        // Item 11 spans rows 44..48 and must lie inside the new viewport
        assert!(offset <= 44, "offset {}", offset);
        assert!(48 <= offset + 22, "offset {}", offset);
    }

    #[test]
    fn test_slack_is_added_to_scroll_distance() {
        let navigator = SelectionNavigator::new(5);
        let view = snapshot(Some(2), 0);

        // Base distance 10, plus 5 slack
        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.effect, Some(ScrollEffect::ScrollTo(15)));
    }

    #[test]
    fn test_at_most_one_selected_in_snapshot_contract() {
        // The caller clears all flags before applying the deferred mark;
        // the navigator itself only ever names a single index to select.
        let navigator = SelectionNavigator::new(0);
        let view = snapshot(Some(1), 0);

        let mv = navigator.move_selection(&view, Direction::Next).unwrap();
        assert_eq!(mv.select, 2);
        assert_eq!(view.items.iter().filter(|i| i.selected).count(), 1);
    }
}
