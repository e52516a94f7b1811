//! Semantic cleanup: Trade a minimal diff for a readable one.
//!
//! A minimal edit script happily keeps short coincidental matches ("the",
//! a single space, a blank line) between two edits, which reads as noise.
//! An unchanged run is absorbed into the surrounding change when it weighs
//! no more than the edits on each side of it.

use super::hunk::{normalize, Hunk};
use super::DiffKind;

/// Eliminate semantically trivial equalities.
///
/// `weight` gives the size of one item (character count for text). The
/// result is in normal form.
pub fn cleanup_semantic<T, F>(mut hunks: Vec<Hunk<T>>, weight: F) -> Vec<Hunk<T>>
where
    T: Clone,
    F: Fn(&T) -> usize,
{
    let size = |hunk: &Hunk<T>| hunk.items.iter().map(&weight).sum::<usize>();

    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    // Edit weight before and after the last equality.
    let (mut inserted_before, mut deleted_before) = (0usize, 0usize);
    let (mut inserted_after, mut deleted_after) = (0usize, 0usize);

    let mut pointer = 0;
    while pointer < hunks.len() {
        let len = size(&hunks[pointer]);

        match hunks[pointer].kind {
            DiffKind::Unchanged => {
                equalities.push(pointer);
                inserted_before = inserted_after;
                deleted_before = deleted_after;
                inserted_after = 0;
                deleted_after = 0;
                last_equality = Some(len);
            }
            kind => {
                if kind == DiffKind::Inserted {
                    inserted_after += len;
                } else {
                    deleted_after += len;
                }

                let absorb = last_equality.is_some_and(|eq| {
                    eq <= inserted_before.max(deleted_before)
                        && eq <= inserted_after.max(deleted_after)
                });

                if absorb {
                    if let Some(index) = equalities.pop() {
                        let items = hunks[index].items.clone();
                        hunks[index].kind = DiffKind::Inserted;
                        hunks.insert(index, Hunk::new(DiffKind::Deleted, items));

                        // The equality before this one is no longer trusted.
                        equalities.pop();
                        last_equality = None;
                        inserted_before = 0;
                        deleted_before = 0;
                        inserted_after = 0;
                        deleted_after = 0;
                        changed = true;

                        pointer = equalities.last().map_or(0, |&i| i + 1);
                        continue;
                    }
                }
            }
        }

        pointer += 1;
    }

    if changed {
        normalize(hunks)
    } else {
        hunks
    }
}
