//! Live diff of the typed text against the target passage.
//!
//! Everything here is recomputed from scratch on every input event. The
//! target is bounded to a few hundred characters, so the O(target) pass is
//! cheap and sidesteps incremental-update bugs entirely.

/// Per-character classification relative to the target text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// not reached by the typed text yet
    Pending,
    Correct,
    Incorrect,
}

/// Result of diffing the typed text against the target.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Comparison {
    /// one verdict per target character
    pub verdicts: Vec<Verdict>,
    /// index of the next expected character, clamped into the target;
    /// `None` only when the target is empty
    pub caret: Option<usize>,
    pub correct: usize,
    pub incorrect: usize,
    /// full length of the typed text, including anything past the target end
    pub total_typed: usize,
}

/// Classifies every target position against the typed text. Pure function:
/// identical arguments always yield identical verdicts and counts.
pub fn compare(target: &str, typed: &str) -> Comparison {
    let typed_chars: Vec<char> = typed.chars().collect();
    let mut verdicts = Vec::new();
    let mut correct = 0;
    let mut incorrect = 0;

    for (idx, expected) in target.chars().enumerate() {
        let verdict = match typed_chars.get(idx) {
            None => Verdict::Pending,
            Some(&c) if c == expected => {
                correct += 1;
                Verdict::Correct
            }
            Some(_) => {
                incorrect += 1;
                Verdict::Incorrect
            }
        };
        verdicts.push(verdict);
    }

    let caret = if verdicts.is_empty() {
        None
    } else {
        Some(typed_chars.len().min(verdicts.len() - 1))
    };

    Comparison {
        verdicts,
        caret,
        correct,
        incorrect,
        total_typed: typed_chars.len(),
    }
}

/// Number of whitespace-delimited words the typed text contains.
/// Drives the completion check in words mode.
pub fn typed_words(typed: &str) -> usize {
    typed.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untyped_target_is_all_pending() {
        let cmp = compare("abc", "");
        assert_eq!(cmp.verdicts, vec![Verdict::Pending; 3]);
        assert_eq!(cmp.correct, 0);
        assert_eq!(cmp.incorrect, 0);
        assert_eq!(cmp.total_typed, 0);
        assert_eq!(cmp.caret, Some(0));
    }

    #[test]
    fn classifies_correct_and_incorrect() {
        let cmp = compare("abc", "abd");
        assert_eq!(
            cmp.verdicts,
            vec![Verdict::Correct, Verdict::Correct, Verdict::Incorrect]
        );
        assert_eq!(cmp.correct, 2);
        assert_eq!(cmp.incorrect, 1);
        assert_eq!(cmp.total_typed, 3);
    }

    #[test]
    fn caret_sits_on_next_expected_char() {
        let cmp = compare("hello", "he");
        assert_eq!(cmp.caret, Some(2));
        assert_eq!(cmp.verdicts[2], Verdict::Pending);
    }

    #[test]
    fn caret_clamps_to_last_target_index() {
        let cmp = compare("hi", "hi there");
        assert_eq!(cmp.caret, Some(1));
    }

    #[test]
    fn empty_target_has_no_caret() {
        let cmp = compare("", "anything");
        assert!(cmp.verdicts.is_empty());
        assert_eq!(cmp.caret, None);
        assert_eq!(cmp.total_typed, 8);
    }

    #[test]
    fn typed_overflow_counts_toward_total_only() {
        // Characters past the target end are not classified but still
        // contribute to the typed total (and thus to accuracy).
        let cmp = compare("ab", "abcd");
        assert_eq!(cmp.verdicts.len(), 2);
        assert_eq!(cmp.correct, 2);
        assert_eq!(cmp.incorrect, 0);
        assert_eq!(cmp.total_typed, 4);
    }

    #[test]
    fn comparison_is_idempotent() {
        let a = compare("the quick brown fox", "the quxck");
        let b = compare("the quick brown fox", "the quxck");
        assert_eq!(a, b);
    }

    #[test]
    fn compares_by_chars_not_bytes() {
        let cmp = compare("héllo", "hél");
        assert_eq!(cmp.verdicts.len(), 5);
        assert_eq!(cmp.correct, 3);
        assert_eq!(cmp.total_typed, 3);
        assert_eq!(cmp.caret, Some(3));
    }

    #[test]
    fn typed_words_splits_on_whitespace_runs() {
        assert_eq!(typed_words(""), 0);
        assert_eq!(typed_words("   "), 0);
        assert_eq!(typed_words("one two three "), 3);
        assert_eq!(typed_words("  one\t two  "), 2);
    }
}
