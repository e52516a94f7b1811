//! Myers: O(ND) shortest edit script over arbitrary item sequences.
//!
//! Linear-space variant: each subproblem is split at its middle snake,
//! found by searching from both ends at once, and the halves are solved
//! recursively. Common prefixes and suffixes are trimmed first, which keeps
//! the typical revision (a few edits in a long document) close to linear.
//!
//! A subproblem whose middle snake is not found within the cost limit is
//! emitted as one deletion followed by one insertion. The result is still a
//! valid edit script, just not a minimal one.

use super::hunk::{push_items, Hunk};
use super::DiffKind;

/// Search rounds allowed per subproblem before it gives up.
pub const DEFAULT_MAX_COST: usize = 1024;

/// Diff two sequences into normalized hunks.
pub fn diff<T: PartialEq + Clone>(old: &[T], new: &[T]) -> Vec<Hunk<T>> {
    diff_bounded(old, new, DEFAULT_MAX_COST)
}

/// Diff two sequences, allowing at most `max_cost` search rounds per
/// subproblem.
pub fn diff_bounded<T: PartialEq + Clone>(old: &[T], new: &[T], max_cost: usize) -> Vec<Hunk<T>> {
    let mut hunks = Vec::new();
    conquer(old, new, max_cost, &mut hunks);
    super::hunk::normalize(hunks)
}

fn conquer<T: PartialEq + Clone>(old: &[T], new: &[T], max_cost: usize, hunks: &mut Vec<Hunk<T>>) {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    push_items(hunks, DiffKind::Unchanged, old[..prefix].to_vec());

    let (old, new) = (&old[prefix..], &new[prefix..]);
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();
    let a = &old[..old.len() - suffix];
    let b = &new[..new.len() - suffix];

    let split = if a.is_empty() || b.is_empty() {
        None
    } else {
        middle_snake(a, b, max_cost)
    };
    match split {
        Some((x, y)) => {
            conquer(&a[..x], &b[..y], max_cost, hunks);
            conquer(&a[x..], &b[y..], max_cost, hunks);
        }
        None => {
            push_items(hunks, DiffKind::Deleted, a.to_vec());
            push_items(hunks, DiffKind::Inserted, b.to_vec());
        }
    }

    push_items(hunks, DiffKind::Unchanged, old[old.len() - suffix..].to_vec());
}

/// Find a point on an optimal edit path of two non-empty sequences whose
/// first items differ and whose last items differ.
///
/// Returns `None` when no split is found within `max_cost` rounds.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
fn middle_snake<T: PartialEq>(a: &[T], b: &[T], max_cost: usize) -> Option<(usize, usize)> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max_d = (n + m + 1) / 2;
    let offset = max_d;
    let len = 2 * max_d + 2;

    // Furthest x reached on each diagonal, from the front and from the back.
    let mut forward = vec![-1isize; len as usize];
    let mut backward = vec![-1isize; len as usize];
    forward[(offset + 1) as usize] = 0;
    backward[(offset + 1) as usize] = 0;

    let delta = n - m;
    // With an odd delta the paths meet during a forward pass.
    let front = delta % 2 != 0;
    let (mut k1_start, mut k1_end, mut k2_start, mut k2_end) = (0, 0, 0, 0);

    // A split point strictly inside the grid.
    let inner = |x: isize, y: isize| {
        (0..=n).contains(&x) && (0..=m).contains(&y) && (x, y) != (0, 0) && (x, y) != (n, m)
    };

    for d in 0..max_d.min(max_cost as isize) {
        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let i = (offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && forward[i - 1] < forward[i + 1]) {
                forward[i + 1]
            } else {
                forward[i - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < n && y1 < m && a[x1 as usize] == b[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            forward[i] = x1;

            if x1 > n {
                k1_end += 2;
            } else if y1 > m {
                k1_start += 2;
            } else if front {
                let j = offset + delta - k1;
                if (0..len).contains(&j) && backward[j as usize] != -1 {
                    let x2 = n - backward[j as usize];
                    if x1 >= x2 && inner(x1, y1) {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let i = (offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && backward[i - 1] < backward[i + 1]) {
                backward[i + 1]
            } else {
                backward[i - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < n && y2 < m && a[(n - x2 - 1) as usize] == b[(m - y2 - 1) as usize] {
                x2 += 1;
                y2 += 1;
            }
            backward[i] = x2;

            if x2 > n {
                k2_end += 2;
            } else if y2 > m {
                k2_start += 2;
            } else if !front {
                let j = offset + delta - k2;
                if (0..len).contains(&j) && forward[j as usize] != -1 {
                    let x1 = forward[j as usize];
                    let y1 = x1 - (j - offset);
                    if x1 >= n - x2 && inner(x1, y1) {
                        return Some((x1 as usize, y1 as usize));
                    }
                }
            }
            k2 += 2;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn render(hunks: &[Hunk<char>]) -> String {
        hunks
            .iter()
            .map(|h| {
                let text: String = h.items.iter().collect();
                match h.kind {
                    DiffKind::Unchanged => text,
                    DiffKind::Inserted => format!("+({text})"),
                    DiffKind::Deleted => format!("-({text})"),
                }
            })
            .collect()
    }

    fn edit_count(hunks: &[Hunk<char>]) -> usize {
        hunks
            .iter()
            .filter(|h| h.kind != DiffKind::Unchanged)
            .map(|h| h.items.len())
            .sum()
    }

    #[test]
    fn test_myers_identical() {
        let hunks = diff(&chars("same"), &chars("same"));
        assert_eq!(hunks, vec![Hunk::new(DiffKind::Unchanged, chars("same"))]);
    }

    #[test]
    fn test_myers_empty_sides() {
        assert!(diff::<char>(&[], &[]).is_empty());
        assert_eq!(render(&diff(&[], &chars("ab"))), "+(ab)");
        assert_eq!(render(&diff(&chars("ab"), &[])), "-(ab)");
    }

    #[test]
    fn test_myers_single_substitution() {
        assert_eq!(render(&diff(&chars("cat"), &chars("cut"))), "c-(a)+(u)t");
    }

    #[test]
    fn test_myers_classic_example_is_minimal() {
        // ABCABBA -> CBABAC has edit distance 5.
        let hunks = diff(&chars("ABCABBA"), &chars("CBABAC"));
        assert_eq!(edit_count(&hunks), 5);
    }

    #[test]
    fn test_myers_reconstructs_both_sides() {
        let old = chars("the quick brown fox");
        let new = chars("a quick red fox jumps");
        let hunks = diff(&old, &new);

        let rebuilt_old: Vec<char> = hunks
            .iter()
            .filter(|h| h.kind != DiffKind::Inserted)
            .flat_map(|h| h.items.iter().copied())
            .collect();
        let rebuilt_new: Vec<char> = hunks
            .iter()
            .filter(|h| h.kind != DiffKind::Deleted)
            .flat_map(|h| h.items.iter().copied())
            .collect();
        assert_eq!(rebuilt_old, old);
        assert_eq!(rebuilt_new, new);
    }

    #[test]
    fn test_myers_deletions_before_insertions() {
        let hunks = diff(&chars("xaby"), &chars("xcdy"));
        let kinds: Vec<_> = hunks.iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiffKind::Unchanged,
                DiffKind::Deleted,
                DiffKind::Inserted,
                DiffKind::Unchanged
            ]
        );
    }

    #[test]
    fn test_myers_cost_limit_degrades_to_replace() {
        let hunks = diff_bounded(&chars("xay"), &chars("zaw"), 0);
        assert_eq!(render(&hunks), "-(xay)+(zaw)");
        assert_eq!(render(&diff(&chars("xay"), &chars("zaw"))), "-(x)+(z)a-(y)+(w)");
    }

    #[test]
    fn test_myers_large_inputs_reconstruct() {
        let old: Vec<u32> = (0..20_000).map(|i| i % 7).collect();
        let new: Vec<u32> = (0..20_000).map(|i| i % 5).collect();
        let hunks = diff(&old, &new);

        let rebuilt_old: Vec<u32> = hunks
            .iter()
            .filter(|h| h.kind != DiffKind::Inserted)
            .flat_map(|h| h.items.iter().copied())
            .collect();
        let rebuilt_new: Vec<u32> = hunks
            .iter()
            .filter(|h| h.kind != DiffKind::Deleted)
            .flat_map(|h| h.items.iter().copied())
            .collect();
        assert_eq!(rebuilt_old, old);
        assert_eq!(rebuilt_new, new);
    }

    #[test]
    fn test_myers_limited_search_stays_valid() {
        let old = chars("the quick brown fox jumps over the lazy dog");
        let new = chars("a quick red fox leaps over one lazy cat");
        for max_cost in [0, 1, 2, 4, DEFAULT_MAX_COST] {
            let hunks = diff_bounded(&old, &new, max_cost);
            let rebuilt_old: Vec<char> = hunks
                .iter()
                .filter(|h| h.kind != DiffKind::Inserted)
                .flat_map(|h| h.items.iter().copied())
                .collect();
            let rebuilt_new: Vec<char> = hunks
                .iter()
                .filter(|h| h.kind != DiffKind::Deleted)
                .flat_map(|h| h.items.iter().copied())
                .collect();
            assert_eq!(rebuilt_old, old);
            assert_eq!(rebuilt_new, new);
        }
    }
}
