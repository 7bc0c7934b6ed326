//! Reading-ease scoring for question text.
//!
//! Implements the Flesch reading-ease formula with a heuristic syllable
//! counter. Scores usually land in [0, 100] but the formula is unbounded:
//! very short simple text can exceed 100 and dense polysyllabic text can go
//! negative. Callers are expected to normalize.

/// Flesch reading ease:
/// `206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)`.
///
/// Returns 0.0 for text with no words.
pub fn flesch_reading_ease(text: &str) -> f64 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }

    let sentences = sentence_count(text).max(1) as f64;
    let syllables: usize = words.iter().map(|w| syllable_count(w)).sum();

    let word_count = words.len() as f64;
    206.835 - 1.015 * (word_count / sentences) - 84.6 * (syllables as f64 / word_count)
}

/// Count sentences by terminal punctuation. Runs of `.`, `!`, `?` count once.
fn sentence_count(text: &str) -> usize {
    let mut count = 0;
    let mut in_terminal = false;
    for c in text.chars() {
        if matches!(c, '.' | '!' | '?') {
            if !in_terminal {
                count += 1;
            }
            in_terminal = true;
        } else {
            in_terminal = false;
        }
    }
    count.max(1)
}

/// Heuristic syllable counter: contiguous vowel groups, minus a trailing
/// silent 'e', floored at one per word.
fn syllable_count(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if letters.is_empty() {
        // Numerals and bare punctuation still take a beat to read out.
        return 1;
    }

    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut groups = 0;
    let mut prev_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !prev_vowel {
            groups += 1;
        }
        prev_vowel = vowel;
    }

    // Silent trailing 'e' ("make", "code"), but not a lone vowel word.
    if groups > 1 && letters.ends_with(&['e']) && !letters.ends_with(&['l', 'e']) {
        groups -= 1;
    }

    groups.max(1)
}
