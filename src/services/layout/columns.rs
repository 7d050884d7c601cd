//! Column assignment within overlap groups.
//!
//! The longest member of a group becomes a full-width background block.
//! The remaining (foreground) members are re-grouped by direct overlap among
//! themselves and laid out side by side only where they actually clash.

use super::grouping::overlap_groups;
use super::interval::MinuteInterval;

/// Horizontal placement of one timed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSlot {
    /// 0-based column within the entry's sub-group
    pub column: usize,
    /// Number of columns in that sub-group
    pub total_columns: usize,
    pub is_background: bool,
    pub in_overlap_group: bool,
}

impl ColumnSlot {
    /// Full width, no overlaps.
    pub const STANDALONE: ColumnSlot = ColumnSlot {
        column: 0,
        total_columns: 1,
        is_background: false,
        in_overlap_group: false,
    };

    /// Full-width backdrop of an overlap group.
    pub const BACKGROUND: ColumnSlot = ColumnSlot {
        column: 0,
        total_columns: 1,
        is_background: true,
        in_overlap_group: false,
    };

    fn foreground(column: usize, total_columns: usize) -> Self {
        Self {
            column,
            total_columns,
            is_background: false,
            in_overlap_group: true,
        }
    }
}

impl Default for ColumnSlot {
    fn default() -> Self {
        Self::STANDALONE
    }
}

/// Assign slots to the members of one overlap group.
///
/// `group` holds indices into `intervals` in input order. Returns
/// `(index, slot)` pairs for every member.
pub fn assign_group(group: &[usize], intervals: &[MinuteInterval]) -> Vec<(usize, ColumnSlot)> {
    match group {
        [] => Vec::new(),
        [only] => vec![(*only, ColumnSlot::STANDALONE)],
        _ => {
            let background = longest_member(group, intervals);
            let foreground: Vec<usize> = group
                .iter()
                .copied()
                .filter(|&index| index != background)
                .collect();
            let foreground_intervals: Vec<MinuteInterval> =
                foreground.iter().map(|&index| intervals[index]).collect();

            let mut slots = Vec::with_capacity(group.len());
            slots.push((background, ColumnSlot::BACKGROUND));

            for sub_group in overlap_groups(&foreground_intervals) {
                let total = sub_group.len();
                for (column, local) in sub_group.into_iter().enumerate() {
                    slots.push((foreground[local], ColumnSlot::foreground(column, total)));
                }
            }

            slots
        }
    }
}

/// Group the intervals and assign a slot to each one, in input order.
pub fn assign_columns(intervals: &[MinuteInterval]) -> Vec<ColumnSlot> {
    let mut slots = vec![ColumnSlot::STANDALONE; intervals.len()];
    for group in overlap_groups(intervals) {
        for (index, slot) in assign_group(&group, intervals) {
            slots[index] = slot;
        }
    }
    slots
}

/// First member with the strictly greatest duration.
fn longest_member(group: &[usize], intervals: &[MinuteInterval]) -> usize {
    let mut best = group[0];
    for &index in &group[1..] {
        if intervals[index].duration > intervals[best].duration {
            best = index;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn iv(start: &str, end: &str) -> MinuteInterval {
        MinuteInterval::from_clock(start, end).unwrap()
    }

    #[test]
    fn test_single_item_is_standalone() {
        let slots = assign_columns(&[iv("09:00", "10:00")]);
        assert_eq!(slots, vec![ColumnSlot::STANDALONE]);
    }

    #[test]
    fn test_longest_item_becomes_background() {
        // A(09:00-10:00), B(09:30-09:45), C(09:40-11:00)
        let slots = assign_columns(&[
            iv("09:00", "10:00"),
            iv("09:30", "09:45"),
            iv("09:40", "11:00"),
        ]);

        assert_eq!(slots[2], ColumnSlot::BACKGROUND);
        assert_eq!(slots[0], ColumnSlot::foreground(0, 2));
        assert_eq!(slots[1], ColumnSlot::foreground(1, 2));
    }

    #[test]
    fn test_duration_tie_goes_to_first_item() {
        let slots = assign_columns(&[iv("09:00", "10:00"), iv("09:30", "10:30")]);
        assert!(slots[0].is_background);
        assert!(!slots[1].is_background);
        assert_eq!(slots[1], ColumnSlot::foreground(0, 1));
    }

    #[test]
    fn test_foreground_items_only_share_columns_when_they_clash() {
        // The long block overlaps both short ones, which do not touch each other.
        let slots = assign_columns(&[
            iv("08:00", "12:00"),
            iv("08:30", "09:00"),
            iv("10:00", "11:00"),
        ]);

        assert_eq!(slots[0], ColumnSlot::BACKGROUND);
        assert_eq!(slots[1], ColumnSlot::foreground(0, 1));
        assert_eq!(slots[2], ColumnSlot::foreground(0, 1));
    }

    #[test]
    fn test_exactly_one_background_per_group() {
        let intervals = [
            iv("08:00", "09:00"),
            iv("08:15", "08:45"),
            iv("08:30", "09:30"),
            iv("13:00", "14:00"),
            iv("13:30", "15:00"),
        ];
        let slots = assign_columns(&intervals);
        let backgrounds: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_background)
            .map(|(index, _)| index)
            .collect();

        assert_eq!(backgrounds, vec![0, 4]);
    }

    #[test]
    fn test_three_way_clash() {
        let slots = assign_columns(&[
            iv("09:00", "12:00"),
            iv("09:00", "10:00"),
            iv("09:15", "10:00"),
            iv("09:30", "10:00"),
        ]);

        assert!(slots[0].is_background);
        for (column, slot) in slots[1..].iter().enumerate() {
            assert_eq!(*slot, ColumnSlot::foreground(column, 3));
        }
    }
}
