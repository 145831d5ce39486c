use crate::domain::model::{Fragment, Row};
use std::cmp::Ordering;

/// Fragments whose `y` differ by at most this much are ordered by `x`.
pub const SAME_LINE_TOLERANCE: i32 = 3;

/// A fragment further than this from the row anchor starts a new row.
pub const ROW_BREAK_DISTANCE: i32 = 5;

fn reading_order(a: &Fragment, b: &Fragment) -> Ordering {
    if (b.y - a.y).abs() > SAME_LINE_TOLERANCE {
        // higher y is nearer the top of the page
        return b.y.cmp(&a.y);
    }
    a.x.cmp(&b.x)
}

/// Stable insertion pass over `reading_order`.
///
/// The comparison is not transitive across the tolerance band, which std
/// sorts are allowed to reject, so fragments are inserted one at a time.
fn sort_reading_order(fragments: &mut [Fragment]) {
    for i in 1..fragments.len() {
        let mut j = i;
        while j > 0 && reading_order(&fragments[j - 1], &fragments[j]) == Ordering::Greater {
            fragments.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Group a page's fragments into visual rows, top of page first.
pub fn assemble_rows(mut fragments: Vec<Fragment>) -> Vec<Row> {
    sort_reading_order(&mut fragments);

    let mut rows = Vec::new();
    let mut current: Vec<Fragment> = Vec::new();
    let mut anchor: Option<i32> = None;

    for fragment in fragments {
        match anchor {
            // 錨點固定為該列第一個片段的 y，不隨後續片段移動
            Some(y) if (fragment.y - y).abs() <= ROW_BREAK_DISTANCE => current.push(fragment),
            _ => {
                if !current.is_empty() {
                    rows.push(Row {
                        fragments: std::mem::take(&mut current),
                    });
                }
                anchor = Some(fragment.y);
                current.push(fragment);
            }
        }
    }
    if !current.is_empty() {
        rows.push(Row { fragments: current });
    }

    for row in &mut rows {
        row.fragments.sort_by_key(|f| f.x);
    }

    tracing::trace!("Assembled {} rows", rows.len());
    rows
}
