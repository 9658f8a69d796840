//! Non-destructive source edits.
//!
//! Recipes never mutate the tree; they emit byte-range splices against the
//! version of the source they were matched on. `EditSet::apply` sorts the
//! splices, drops overlaps, and applies them bottom-up so earlier offsets
//! stay valid.

/// A single byte-range splice. `start_byte == end_byte` is an insertion.
#[derive(Debug, Clone)]
pub struct Edit {
    pub start_byte: usize,
    pub end_byte: usize,
    pub replacement: String,
    /// Recipe that produced this edit (for reporting).
    pub recipe_id: &'static str,
}

/// Edits collected against one version of a source file.
#[derive(Debug, Default)]
pub struct EditSet {
    edits: Vec<Edit>,
}

impl EditSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Apply all non-overlapping edits and return the new source plus the
    /// edits that were actually applied.
    ///
    /// When two edits overlap, the one starting earliest wins; the loser
    /// re-fires on a later fixed-point pass if its pattern still holds.
    pub fn apply(mut self, source: &str) -> (String, Vec<Edit>) {
        self.edits.sort_by(|a, b| {
            a.start_byte
                .cmp(&b.start_byte)
                .then(a.end_byte.cmp(&b.end_byte))
        });

        let mut accepted: Vec<Edit> = Vec::with_capacity(self.edits.len());
        let mut last_end = 0usize;
        for edit in self.edits {
            if edit.start_byte > edit.end_byte || edit.end_byte > source.len() {
                continue;
            }
            if !accepted.is_empty() && edit.start_byte < last_end {
                continue;
            }
            last_end = edit.end_byte;
            accepted.push(edit);
        }

        let mut out = source.to_string();
        for edit in accepted.iter().rev() {
            out.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        }
        (out, accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(start: usize, end: usize, replacement: &str) -> Edit {
        Edit {
            start_byte: start,
            end_byte: end,
            replacement: replacement.to_string(),
            recipe_id: "test/edit",
        }
    }

    #[test]
    fn applies_bottom_up() {
        let mut set = EditSet::new();
        set.push(edit(0, 3, "x"));
        set.push(edit(4, 7, "y"));
        let (out, applied) = set.apply("abc def");
        assert_eq!(out, "x y");
        assert_eq!(applied.len(), 2);
    }

    #[test]
    fn drops_overlapping_edits() {
        let mut set = EditSet::new();
        set.push(edit(2, 6, "LATE"));
        set.push(edit(0, 4, "EARLY"));
        let (out, applied) = set.apply("abcdefgh");
        assert_eq!(out, "EARLYefgh");
        assert_eq!(applied.len(), 1);
    }

    #[test]
    fn insertion_at_prior_edit_end_is_kept() {
        let mut set = EditSet::new();
        set.push(edit(0, 2, "X"));
        set.push(edit(2, 2, "+"));
        let (out, applied) = set.apply("abcd");
        assert_eq!(out, "X+cd");
        assert_eq!(applied.len(), 2);
    }

    #[test]
    fn out_of_range_edit_is_ignored() {
        let mut set = EditSet::new();
        set.push(edit(0, 99, "X"));
        let (out, applied) = set.apply("ab");
        assert_eq!(out, "ab");
        assert!(applied.is_empty());
    }
}
