//! Overlap grouping.
//!
//! Partitions a day's intervals into connected overlap groups: two intervals
//! share a group when they intersect directly or through a chain of other
//! members.

use super::interval::MinuteInterval;

/// Group intervals by transitive overlap.
///
/// Items are visited in input order. Each unprocessed item seeds a group,
/// which then absorbs any unprocessed item intersecting one of its members;
/// the scan repeats until a full pass adds nothing, so additions may cascade.
/// Returned indices are in input order within each group, and groups are
/// ordered by their first member.
pub fn overlap_groups(intervals: &[MinuteInterval]) -> Vec<Vec<usize>> {
    let mut processed = vec![false; intervals.len()];
    let mut groups = Vec::new();

    for seed in 0..intervals.len() {
        if processed[seed] {
            continue;
        }
        processed[seed] = true;
        let mut group = vec![seed];

        loop {
            let mut added = false;
            for candidate in 0..intervals.len() {
                if processed[candidate] {
                    continue;
                }
                let touches_group = group
                    .iter()
                    .any(|&member| intervals[member].overlaps(&intervals[candidate]));
                if touches_group {
                    processed[candidate] = true;
                    group.push(candidate);
                    added = true;
                }
            }
            if !added {
                break;
            }
        }

        group.sort_unstable();
        groups.push(group);
    }

    groups
}
