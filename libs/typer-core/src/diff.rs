//! Word-level diff between an original text and its corrected rewrite.
//!
//! Texts are split on the literal space character, aligned with a longest
//! common subsequence, and the corrected text is annotated token by token.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Whether a token of the corrected text survived from the original.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    /// Token is part of the alignment with the original.
    Unchanged,
    /// Token was introduced or moved by the correction.
    Changed,
}

/// A token of the corrected text tagged for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedToken {
    pub text: String,
    pub status: TokenStatus,
}

impl AnnotatedToken {
    pub fn is_changed(&self) -> bool {
        self.status == TokenStatus::Changed
    }
}

/// Split text into words on single spaces.
///
/// Consecutive spaces yield empty tokens and `""` yields `[""]`; both are kept
/// so that joining with `' '` reproduces the input exactly.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(' ').collect()
}

/// Longest common subsequence of two token sequences.
///
/// Backtracking prefers moving up (dropping a token of `a`) on ties, so the
/// emitted tokens are those of `a` in left-to-right order.
pub fn compute_alignment<'a>(a: &[&'a str], b: &[&str]) -> Vec<&'a str> {
    let m = a.len();
    let n = b.len();

    if m == 0 || n == 0 {
        return Vec::new();
    }

    // Flattened (m + 1) x (n + 1) table, row-major
    let width = n + 1;
    let mut dp = vec![0usize; (m + 1) * width];

    for i in 1..=m {
        for j in 1..=n {
            dp[i * width + j] = if a[i - 1] == b[j - 1] {
                dp[(i - 1) * width + (j - 1)] + 1
            } else {
                dp[(i - 1) * width + j].max(dp[i * width + (j - 1)])
            };
        }
    }

    let mut result = Vec::with_capacity(dp[m * width + n]);
    let mut i = m;
    let mut j = n;

    while i > 0 && j > 0 {
        if a[i - 1] == b[j - 1] {
            result.push(a[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[(i - 1) * width + j] >= dp[i * width + (j - 1)] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    result.reverse();
    result
}

/// Tag every token of `result_words` as changed or unchanged.
///
/// Single greedy pass: a token is unchanged only if it equals the next
/// unconsumed alignment token. With interleaved duplicates this can credit a
/// different occurrence than a minimal diff would; callers rely on that
/// highlighting staying stable.
pub fn annotate(result_words: &[&str], alignment: &[&str]) -> Vec<AnnotatedToken> {
    let mut cursor = 0;

    result_words
        .iter()
        .map(|word| {
            let status = if cursor < alignment.len() && alignment[cursor] == *word {
                cursor += 1;
                TokenStatus::Unchanged
            } else {
                TokenStatus::Changed
            };

            AnnotatedToken {
                text: (*word).to_string(),
                status,
            }
        })
        .collect()
}

/// Number of result tokens not accounted for by the alignment.
pub fn count_changed_words(original: &[&str], result: &[&str]) -> usize {
    let alignment = compute_alignment(original, result);
    result.len().saturating_sub(alignment.len())
}

/// User-perceived character count (extended grapheme clusters).
pub fn char_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Annotated diff of a corrected text, ready for display and statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDiff {
    /// Tokens of the corrected text, in order.
    pub tokens: Vec<AnnotatedToken>,
    /// `len(result) - len(alignment)`.
    pub changed_words: usize,
    /// Length of the original text in grapheme clusters.
    pub original_chars: usize,
}

impl TextDiff {
    /// Diff `original` against its corrected form `result`.
    pub fn compute(original: &str, result: &str) -> Self {
        let original_words = tokenize(original);
        let result_words = tokenize(result);
        let alignment = compute_alignment(&original_words, &result_words);

        Self {
            tokens: annotate(&result_words, &alignment),
            changed_words: result_words.len().saturating_sub(alignment.len()),
            original_chars: char_count(original),
        }
    }

    /// Number of tokens marked unchanged.
    pub fn unchanged_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_changed()).count()
    }

    /// Join tokens with single spaces, passing changed tokens through `highlight`.
    pub fn render<F>(&self, mut highlight: F) -> String
    where
        F: FnMut(&str) -> String,
    {
        let mut out = String::new();
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            if token.is_changed() {
                out.push_str(&highlight(&token.text));
            } else {
                out.push_str(&token.text);
            }
        }
        out
    }

    /// The corrected text without highlighting.
    pub fn plain_text(&self) -> String {
        self.render(str::to_string)
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // Small alphabet so duplicates and empty tokens show up often
    fn words() -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(prop::sample::select(vec!["", "a", "b", "c", "the"]), 0..12)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn alignment_no_longer_than_either_input(a in words(), b in words()) {
            let len = compute_alignment(&a, &b).len();
            prop_assert!(len <= a.len().min(b.len()));
        }

        #[test]
        fn alignment_with_itself_is_identity(a in words()) {
            prop_assert_eq!(compute_alignment(&a, &a), a.clone());
            prop_assert_eq!(count_changed_words(&a, &a), 0);
        }

        #[test]
        fn alignment_length_is_symmetric(a in words(), b in words()) {
            prop_assert_eq!(
                compute_alignment(&a, &b).len(),
                compute_alignment(&b, &a).len()
            );
        }

        #[test]
        fn alignment_is_subsequence_of_both(a in words(), b in words()) {
            let alignment = compute_alignment(&a, &b);
            for side in [&a, &b] {
                let mut rest = side.iter();
                prop_assert!(alignment.iter().all(|w| rest.any(|x| x == w)));
            }
        }

        #[test]
        fn annotation_marks_exactly_the_alignment(a in words(), b in words()) {
            let alignment = compute_alignment(&a, &b);
            let tokens = annotate(&b, &alignment);
            let unchanged = tokens.iter().filter(|t| !t.is_changed()).count();

            prop_assert_eq!(tokens.len(), b.len());
            prop_assert_eq!(unchanged, alignment.len());
            prop_assert_eq!(count_changed_words(&a, &b), b.len() - alignment.len());
        }
    }
}
