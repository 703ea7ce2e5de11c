//! Offset lookups over a single source text.
//!
//! [`OwnershipMap`] attributes a member offset to the type header that
//! precedes it; [`LineIndex`] turns byte offsets into 1-indexed lines.

/// Sorted type-header offsets of one file.
///
/// Type `i` owns the half-open interval `[start_i, start_{i+1})`; the last
/// type owns everything up to end-of-file. Brace nesting is not tracked, so
/// a nested type is treated as a sibling of its enclosing type and owns the
/// text that follows it.
#[derive(Debug, Clone, Default)]
pub struct OwnershipMap {
    /// (start offset, index into the caller's type list), sorted by offset
    starts: Vec<(usize, usize)>,
}

impl OwnershipMap {
    /// Build from header offsets given in the caller's type order.
    pub fn new(type_starts: impl IntoIterator<Item = usize>) -> Self {
        let mut starts: Vec<(usize, usize)> = type_starts
            .into_iter()
            .enumerate()
            .map(|(idx, start)| (start, idx))
            .collect();
        starts.sort();
        Self { starts }
    }

    /// Index of the type owning `pos`, or `None` for text before the first header.
    pub fn owner_of(&self, pos: usize) -> Option<usize> {
        let after = self.starts.partition_point(|&(start, _)| start <= pos);
        if after == 0 {
            None
        } else {
            Some(self.starts[after - 1].1)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }
}

/// Byte offsets of line starts.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(text.match_indices('\n').map(|(i, _)| i + 1));
        Self { line_starts }
    }

    /// 1-indexed line containing byte offset `pos`.
    pub fn line_of(&self, pos: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_intervals() {
        let map = OwnershipMap::new([10, 50]);
        assert_eq!(map.owner_of(0), None);
        assert_eq!(map.owner_of(9), None);
        assert_eq!(map.owner_of(10), Some(0));
        assert_eq!(map.owner_of(49), Some(0));
        assert_eq!(map.owner_of(50), Some(1));
        assert_eq!(map.owner_of(10_000), Some(1));
    }

    #[test]
    fn test_owner_unsorted_input_keeps_caller_indices() {
        let map = OwnershipMap::new([80, 5, 40]);
        assert_eq!(map.owner_of(6), Some(1));
        assert_eq!(map.owner_of(45), Some(2));
        assert_eq!(map.owner_of(90), Some(0));
    }

    #[test]
    fn test_empty_map_owns_nothing() {
        let map = OwnershipMap::new(Vec::new());
        assert!(map.is_empty());
        assert_eq!(map.owner_of(3), None);
    }

    #[test]
    fn test_line_of() {
        let idx = LineIndex::new("a\nbc\n\nd");
        assert_eq!(idx.line_of(0), 1);
        assert_eq!(idx.line_of(1), 1); // the newline itself
        assert_eq!(idx.line_of(2), 2);
        assert_eq!(idx.line_of(5), 3);
        assert_eq!(idx.line_of(6), 4);
    }
}
