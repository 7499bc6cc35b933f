//! Ranking Order
//!
//! Turns the visible row order of a ballot into the canonical `RankOrder`.

use std::collections::HashSet;

use leptos::logging::warn;

use crate::models::{RankEntry, RankOrder, SubmissionId};
use crate::ordinal::place_label;

/// Per-row outcome of a recompute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMark {
    /// Counted, with its 1-based place
    Ranked(usize),
    /// Identifier already seen higher up; excluded from the order
    Duplicate,
    /// Row carries no identifier; excluded from the order
    MissingId,
}

impl RowMark {
    pub fn label(&self) -> String {
        match self {
            RowMark::Ranked(place) => place_label(*place),
            RowMark::Duplicate => "Duplicate".to_string(),
            RowMark::MissingId => "Unranked".to_string(),
        }
    }

    pub fn is_excluded(&self) -> bool {
        !matches!(self, RowMark::Ranked(_))
    }
}

/// Result of walking one list top-to-bottom
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recomputed {
    pub order: RankOrder,
    /// `(row_key, mark)` in walk order
    pub marks: Vec<(u32, RowMark)>,
    /// Identifiers that appeared more than once, first-seen order
    pub duplicates: Vec<SubmissionId>,
}

impl Recomputed {
    pub fn mark(&self, row_key: u32) -> Option<RowMark> {
        self.marks.iter().find(|(key, _)| *key == row_key).map(|(_, mark)| *mark)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn has_anomalies(&self) -> bool {
        self.marks.iter().any(|(_, mark)| mark.is_excluded())
    }

    /// Notifications the judge should see for this result, in display order
    pub fn warnings(&self, form_name: &str) -> Vec<String> {
        if self.marks.is_empty() {
            return vec![format!("The {} ballot has no submissions to rank.", form_name)];
        }
        let mut out = Vec::new();
        if !self.duplicates.is_empty() {
            let ids = self.duplicates.iter().map(SubmissionId::as_str).collect::<Vec<_>>().join(", ");
            out.push(format!("Duplicate entries ignored in the {} ranking: {}", form_name, ids));
        }
        if self.is_empty() {
            out.push(format!("Nothing is ranked in the {} ballot.", form_name));
        }
        out
    }
}

/// Walk rows in display order, dedupe, and assign contiguous places.
///
/// Excluded rows stay in `rows`; only the returned order skips them.
pub fn recompute_order(rows: &[RankEntry]) -> Recomputed {
    let mut seen: HashSet<&SubmissionId> = HashSet::new();
    let mut ids = Vec::with_capacity(rows.len());
    let mut marks = Vec::with_capacity(rows.len());
    let mut duplicates: Vec<SubmissionId> = Vec::new();

    for row in rows {
        let id = &row.submission_id;
        let mark = if id.is_missing() {
            warn!("[RANK] Row {} has no submission id, leaving it unranked", row.row_key);
            RowMark::MissingId
        } else if !seen.insert(id) {
            warn!("[RANK] Duplicate submission id {}, ignored in ranking", id);
            if !duplicates.contains(id) {
                duplicates.push(id.clone());
            }
            RowMark::Duplicate
        } else {
            ids.push(id.clone());
            RowMark::Ranked(ids.len())
        };
        marks.push((row.row_key, mark));
    }

    Recomputed {
        order: RankOrder::new(ids),
        marks,
        duplicates,
    }
}

/// Apply one drag: remove the row at `from` and reinsert it so it ends at `to`.
pub fn move_row<T>(rows: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= rows.len() || to >= rows.len() || from == to {
        return false;
    }
    let row = rows.remove(from);
    rows.insert(to, row);
    true
}

/// Assign fresh row keys in current order
pub fn assign_row_keys(rows: &mut [RankEntry]) {
    for (i, row) in rows.iter_mut().enumerate() {
        row.row_key = i as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(ids: &[&str]) -> Vec<RankEntry> {
        let mut rows: Vec<RankEntry> = ids
            .iter()
            .map(|id| RankEntry {
                submission_id: SubmissionId::from(*id),
                title: format!("Entry {}", id),
                artist: None,
                thumbnail_url: None,
                row_key: 0,
            })
            .collect();
        assign_row_keys(&mut rows);
        rows
    }

    fn permutations(items: &[&'static str]) -> Vec<Vec<&'static str>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head);
                out.push(tail);
            }
        }
        out
    }

    #[test]
    fn test_distinct_ids_follow_visual_order() {
        for perm in permutations(&["A", "B", "C", "D"]) {
            let result = recompute_order(&rows(&perm));
            assert_eq!(result.order.len(), perm.len());
            assert_eq!(result.order.serialize(), perm.join(","));
            assert!(!result.has_anomalies());
        }
    }

    #[test]
    fn test_duplicate_kept_once_at_first_position() {
        let list = rows(&["X", "A", "X", "B"]);
        let result = recompute_order(&list);

        assert_eq!(result.order.serialize(), "X,A,B");
        assert_eq!(result.duplicates, vec![SubmissionId::from("X")]);
        assert_eq!(result.mark(0), Some(RowMark::Ranked(1)));
        assert_eq!(result.mark(1), Some(RowMark::Ranked(2)));
        assert_eq!(result.mark(2), Some(RowMark::Duplicate));
        // Places stay contiguous after the excluded row
        assert_eq!(result.mark(3), Some(RowMark::Ranked(3)));
        // The duplicate row is flagged, not removed
        assert_eq!(list.len(), 4);
        assert_eq!(result.marks.len(), 4);
    }

    #[test]
    fn test_missing_id_is_excluded() {
        let result = recompute_order(&rows(&["A", "", "B"]));
        assert_eq!(result.order.serialize(), "A,B");
        assert_eq!(result.mark(1), Some(RowMark::MissingId));
        assert!(result.duplicates.is_empty());
        assert!(result.has_anomalies());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let list = rows(&["C", "A", "C", "B"]);
        assert_eq!(recompute_order(&list), recompute_order(&list));
    }

    #[test]
    fn test_empty_list() {
        let result = recompute_order(&[]);
        assert!(result.is_empty());
        assert_eq!(result.order.serialize(), "");
        assert!(result.marks.is_empty());
    }

    #[test]
    fn test_empty_list_warns() {
        let warnings = recompute_order(&[]).warnings("adult");
        assert_eq!(warnings, vec!["The adult ballot has no submissions to rank.".to_string()]);
    }

    #[test]
    fn test_duplicate_warning_names_the_id() {
        let warnings = recompute_order(&rows(&["X", "A", "X", "B"])).warnings("youth");
        assert_eq!(warnings, vec!["Duplicate entries ignored in the youth ranking: X".to_string()]);
    }

    #[test]
    fn test_nothing_ranked_warns() {
        let warnings = recompute_order(&rows(&["", ""])).warnings("adult");
        assert_eq!(warnings, vec!["Nothing is ranked in the adult ballot.".to_string()]);
    }

    #[test]
    fn test_clean_list_has_no_warnings() {
        assert!(recompute_order(&rows(&["A", "B"])).warnings("adult").is_empty());
    }

    #[test]
    fn test_ids_differing_by_whitespace_are_distinct() {
        let result = recompute_order(&rows(&["A", "A "]));
        assert_eq!(result.order.serialize(), "A,A ");
        assert_eq!(result.mark(0), Some(RowMark::Ranked(1)));
        assert_eq!(result.mark(1), Some(RowMark::Ranked(2)));
        assert!(result.duplicates.is_empty());
    }

    #[test]
    fn test_drag_b_a_c_to_a_b_c() {
        let mut list = rows(&["B", "A", "C"]);
        assert!(move_row(&mut list, 1, 0));

        let result = recompute_order(&list);
        assert_eq!(result.order.serialize(), "A,B,C");

        let labels: Vec<(String, String)> = list
            .iter()
            .map(|row| {
                let mark = result.mark(row.row_key).unwrap();
                (row.submission_id.to_string(), mark.label())
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                ("A".to_string(), "1st Place".to_string()),
                ("B".to_string(), "2nd Place".to_string()),
                ("C".to_string(), "3rd Place".to_string()),
            ]
        );
    }

    #[test]
    fn test_move_row_bounds() {
        let mut list = vec![1, 2, 3];
        assert!(!move_row(&mut list, 3, 0));
        assert!(!move_row(&mut list, 0, 3));
        assert!(!move_row(&mut list, 1, 1));
        assert!(move_row(&mut list, 0, 2));
        assert_eq!(list, vec![2, 3, 1]);
    }
}
