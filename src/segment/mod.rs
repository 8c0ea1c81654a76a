//! Sentence boundary segmentation.
//!
//! Splits free-form text into the sentences that become claims. The splitter
//! is heuristic but boundary-aware: it does not break on abbreviations
//! (`Dr.`, `U.S.`, `e.g.`), inside decimal numbers, or when the following
//! word is lowercase (initials, mid-sentence periods).

/// Abbreviations that end in a period without ending a sentence.
/// Compared lowercase, without the trailing period.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "rev", "gen", "sen", "rep", "gov", "sr", "jr", "st", "vs",
    "etc", "approx", "dept", "est", "fig", "inc", "ltd", "no", "al", "e.g", "i.e", "u.s", "u.k",
    "a.m", "p.m",
];

/// Splits `text` into trimmed, non-empty sentences in document order.
///
/// Sentence terminators are `.`, `!` and `?` (runs collapse into one
/// boundary). Trailing text without a terminator is returned as a final
/// sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '.' || c == '!' || c == '?' {
            // Collapse terminator runs ("?!", "...") and trailing quotes.
            let mut end = i + 1;
            while end < chars.len() && matches!(chars[end], '.' | '!' | '?' | '"' | '\'' | ')') {
                end += 1;
            }

            if c == '.' && !is_boundary_period(&chars, i) {
                i += 1;
                continue;
            }

            // A period followed by a lowercase word is mid-sentence.
            if next_alpha_is_lowercase(&chars, end) {
                i = end;
                continue;
            }

            let sentence: String = chars[start..end].iter().collect();
            let sentence = sentence.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }

    let tail: String = chars[start..].iter().collect();
    let tail = tail.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Whether the period at `idx` can end a sentence.
fn is_boundary_period(chars: &[char], idx: usize) -> bool {
    // Decimal number: digit on both sides.
    if idx > 0 && idx + 1 < chars.len() {
        let prev = chars[idx - 1];
        let next = chars[idx + 1];
        if prev.is_ascii_digit() && next.is_ascii_digit() {
            return false;
        }
    }

    // Preceding token (may itself contain periods, as in "U.S.").
    let mut word_start = idx;
    while word_start > 0 {
        let p = chars[word_start - 1];
        if p.is_alphanumeric() || p == '.' {
            word_start -= 1;
        } else {
            break;
        }
    }
    let word: String = chars[word_start..idx].iter().collect::<String>().to_lowercase();

    // Single-letter initial ("J. Smith").
    if word.len() == 1 && word.chars().all(|c| c.is_alphabetic()) {
        return false;
    }

    !ABBREVIATIONS.contains(&word.as_str())
}

/// Whether the first alphabetic character at or after `idx` is lowercase.
fn next_alpha_is_lowercase(chars: &[char], idx: usize) -> bool {
    for &c in &chars[idx.min(chars.len())..] {
        if c.is_alphabetic() {
            return c.is_lowercase();
        }
        if !c.is_whitespace() && !matches!(c, '"' | '\'' | '(' | ')') {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_two_plain_sentences() {
        let s = split_sentences("The Earth is flat. Paris is the capital of France.");
        assert_eq!(
            s,
            vec![
                "The Earth is flat.".to_string(),
                "Paris is the capital of France.".to_string(),
            ]
        );
    }

    #[test]
    fn test_abbreviations_do_not_split() {
        let s = split_sentences("Dr. Smith works in the U.S. Capitol. He is busy.");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], "Dr. Smith works in the U.S. Capitol.");
    }

    #[test]
    fn test_decimals_do_not_split() {
        let s = split_sentences("Inflation hit 3.5 percent. Prices rose.");
        assert_eq!(s.len(), 2);
        assert_eq!(s[0], "Inflation hit 3.5 percent.");
    }

    #[test]
    fn test_question_and_exclamation_terminators() {
        let s = split_sentences("Is the sky blue? Yes! It appears blue.");
        assert_eq!(s.len(), 3);
        assert_eq!(s[1], "Yes!");
    }

    #[test]
    fn test_trailing_text_without_terminator() {
        let s = split_sentences("First claim. Then a dangling fragment without a period");
        assert_eq!(s.len(), 2);
        assert_eq!(s[1], "Then a dangling fragment without a period");
    }

    #[test]
    fn test_lowercase_continuation_is_not_a_boundary() {
        let s = split_sentences("He cited e.g. apples and pears. Done.");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_empty_and_whitespace_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   \n\t ").is_empty());
    }

    #[test]
    fn test_terminator_runs_collapse() {
        let s = split_sentences("Really?! Yes... Sure.");
        assert_eq!(s, vec!["Really?!", "Yes...", "Sure."]);
    }
}
