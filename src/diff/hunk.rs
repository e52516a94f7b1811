//! Hunks: Runs of equal-kind items and the normal form the differs emit.

use super::DiffKind;

/// A maximal run of items sharing one [`DiffKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk<T> {
    /// What happened to the items.
    pub kind: DiffKind,
    /// The items, in order.
    pub items: Vec<T>,
}

impl<T> Hunk<T> {
    /// Create a hunk.
    pub const fn new(kind: DiffKind, items: Vec<T>) -> Self {
        Self { kind, items }
    }
}

/// Append one item, extending the last hunk when the kind matches.
pub(crate) fn push_item<T>(hunks: &mut Vec<Hunk<T>>, kind: DiffKind, item: T) {
    match hunks.last_mut() {
        Some(last) if last.kind == kind => last.items.push(item),
        _ => hunks.push(Hunk::new(kind, vec![item])),
    }
}

/// Append a run of items. Empty runs are dropped.
pub(crate) fn push_items<T>(hunks: &mut Vec<Hunk<T>>, kind: DiffKind, items: Vec<T>) {
    if items.is_empty() {
        return;
    }
    match hunks.last_mut() {
        Some(last) if last.kind == kind => last.items.extend(items),
        _ => hunks.push(Hunk::new(kind, items)),
    }
}

/// Bring hunks into normal form.
///
/// Between two unchanged hunks there is at most one deleted hunk followed
/// by at most one inserted hunk; adjacent unchanged hunks are merged and
/// empty hunks are dropped.
pub(crate) fn normalize<T>(hunks: Vec<Hunk<T>>) -> Vec<Hunk<T>> {
    let mut out = Vec::with_capacity(hunks.len());
    let mut deleted = Vec::new();
    let mut inserted = Vec::new();

    for hunk in hunks {
        match hunk.kind {
            DiffKind::Deleted => deleted.extend(hunk.items),
            DiffKind::Inserted => inserted.extend(hunk.items),
            DiffKind::Unchanged => {
                flush_region(&mut out, &mut deleted, &mut inserted);
                push_items(&mut out, DiffKind::Unchanged, hunk.items);
            }
        }
    }
    flush_region(&mut out, &mut deleted, &mut inserted);

    out
}

fn flush_region<T>(out: &mut Vec<Hunk<T>>, deleted: &mut Vec<T>, inserted: &mut Vec<T>) {
    push_items(out, DiffKind::Deleted, std::mem::take(deleted));
    push_items(out, DiffKind::Inserted, std::mem::take(inserted));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_item_merges() {
        let mut hunks = Vec::new();
        push_item(&mut hunks, DiffKind::Unchanged, 'a');
        push_item(&mut hunks, DiffKind::Unchanged, 'b');
        push_item(&mut hunks, DiffKind::Inserted, 'c');
        assert_eq!(
            hunks,
            vec![
                Hunk::new(DiffKind::Unchanged, vec!['a', 'b']),
                Hunk::new(DiffKind::Inserted, vec!['c']),
            ]
        );
    }

    #[test]
    fn test_normalize_orders_region() {
        let hunks = vec![
            Hunk::new(DiffKind::Unchanged, vec![1]),
            Hunk::new(DiffKind::Inserted, vec![2]),
            Hunk::new(DiffKind::Deleted, vec![3]),
            Hunk::new(DiffKind::Inserted, vec![4]),
            Hunk::new(DiffKind::Deleted, vec![5]),
            Hunk::new(DiffKind::Unchanged, vec![6]),
            Hunk::new(DiffKind::Unchanged, vec![7]),
            Hunk::new(DiffKind::Deleted, vec![]),
        ];
        assert_eq!(
            normalize(hunks),
            vec![
                Hunk::new(DiffKind::Unchanged, vec![1]),
                Hunk::new(DiffKind::Deleted, vec![3, 5]),
                Hunk::new(DiffKind::Inserted, vec![2, 4]),
                Hunk::new(DiffKind::Unchanged, vec![6, 7]),
            ]
        );
    }
}
