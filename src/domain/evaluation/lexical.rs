//! Reference-based lexical overlap scores
//!
//! Both scores are pure functions of their inputs.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use rust_stemmers::{Algorithm, Stemmer};

const BLEU_MAX_ORDER: usize = 4;

/// Tokens up to this length are compared unstemmed
const MIN_STEM_LENGTH: usize = 3;

static STEMMER: Lazy<Stemmer> = Lazy::new(|| Stemmer::create(Algorithm::English));

/// ROUGE F1 scores for one candidate/reference pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RougeScores {
    pub rouge1: f32,
    pub rouge2: f32,
    pub rouge_l: f32,
}

fn whitespace_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn alphanumeric_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Alphanumeric tokens with English stemming, so "cats" and "cat" match
fn stemmed_tokens(text: &str) -> Vec<String> {
    alphanumeric_tokens(text)
        .into_iter()
        .map(|token| {
            if token.len() > MIN_STEM_LENGTH {
                STEMMER.stem(&token).into_owned()
            } else {
                token
            }
        })
        .collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();

    if tokens.len() >= n {
        for gram in tokens.windows(n) {
            *counts.entry(gram).or_insert(0) += 1;
        }
    }

    counts
}

/// Clipped matches and candidate n-gram total for one order
fn clipped_matches(candidate: &[String], reference: &[String], n: usize) -> (usize, usize) {
    let candidate_counts = ngram_counts(candidate, n);
    let reference_counts = ngram_counts(reference, n);

    let matches: usize = candidate_counts
        .iter()
        .map(|(gram, count)| (*count).min(reference_counts.get(gram).copied().unwrap_or(0)))
        .sum();
    let total: usize = candidate_counts.values().sum();

    (matches, total)
}

/// Sentence BLEU-4 with uniform weights and brevity penalty
///
/// Tokens are lower-cased whitespace splits. Unsmoothed: the score is 0.0 when any
/// n-gram order up to 4 has no match, which includes candidates shorter than 4 tokens.
pub fn bleu(candidate: &str, reference: &str) -> f32 {
    let candidate = whitespace_tokens(candidate);
    let reference = whitespace_tokens(reference);

    if candidate.is_empty() || reference.is_empty() {
        return 0.0;
    }

    let mut log_precision_sum = 0.0_f64;

    for n in 1..=BLEU_MAX_ORDER {
        let (matches, total) = clipped_matches(&candidate, &reference, n);

        if matches == 0 {
            return 0.0;
        }

        log_precision_sum += (matches as f64 / total.max(1) as f64).ln();
    }

    let c = candidate.len() as f64;
    let r = reference.len() as f64;
    let brevity_penalty = if c > r { 1.0 } else { (1.0 - r / c).exp() };

    (brevity_penalty * (log_precision_sum / BLEU_MAX_ORDER as f64).exp()) as f32
}

fn f1(overlap: usize, candidate_total: usize, reference_total: usize) -> f32 {
    if overlap == 0 || candidate_total == 0 || reference_total == 0 {
        return 0.0;
    }

    let precision = overlap as f64 / candidate_total as f64;
    let recall = overlap as f64 / reference_total as f64;

    (2.0 * precision * recall / (precision + recall)) as f32
}

fn rouge_n(candidate: &[String], reference: &[String], n: usize) -> f32 {
    let (overlap, candidate_total) = clipped_matches(candidate, reference, n);
    let reference_total = reference.len().saturating_sub(n - 1);

    f1(overlap, candidate_total, reference_total)
}

fn lcs_length(a: &[String], b: &[String]) -> usize {
    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for token_a in a {
        for (j, token_b) in b.iter().enumerate() {
            current[j + 1] = if token_a == token_b {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// ROUGE-1, ROUGE-2 and ROUGE-L F1 over lower-cased, stemmed alphanumeric tokens
pub fn rouge(candidate: &str, reference: &str) -> RougeScores {
    let candidate = stemmed_tokens(candidate);
    let reference = stemmed_tokens(reference);

    let lcs = lcs_length(&candidate, &reference);

    RougeScores {
        rouge1: rouge_n(&candidate, &reference, 1),
        rouge2: rouge_n(&candidate, &reference, 2),
        rouge_l: f1(lcs, candidate.len(), reference.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER: &str = "The capital of France is Paris";

    #[test]
    fn test_bleu_exact_match_is_one() {
        assert!((bleu(ANSWER, ANSWER) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bleu_is_case_insensitive() {
        assert!((bleu(&ANSWER.to_uppercase(), ANSWER) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_bleu_no_overlap_is_zero() {
        assert_eq!(bleu("completely unrelated words here", ANSWER), 0.0);
    }

    #[test]
    fn test_bleu_short_candidate_is_zero() {
        assert_eq!(bleu("Paris", "Paris"), 0.0);
    }

    #[test]
    fn test_bleu_brevity_penalty() {
        let short = "the capital of france";
        let score = bleu(short, ANSWER);

        // Precisions are all 1.0, only the brevity penalty applies.
        let expected = (1.0_f64 - 6.0 / 4.0).exp() as f32;
        assert!((score - expected).abs() < 1e-6);
    }

    #[test]
    fn test_bleu_partial_overlap_between_zero_and_one() {
        let score = bleu("the capital of france is lyon today", ANSWER);
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_bleu_empty_inputs() {
        assert_eq!(bleu("", ANSWER), 0.0);
        assert_eq!(bleu(ANSWER, ""), 0.0);
    }

    #[test]
    fn test_rouge_exact_match_is_one() {
        let scores = rouge(ANSWER, ANSWER);

        assert!((scores.rouge_l - 1.0).abs() < 1e-6);
        assert!((scores.rouge1 - 1.0).abs() < 1e-6);
        assert!((scores.rouge2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rouge_ignores_punctuation() {
        let scores = rouge("The capital of France is Paris.", ANSWER);
        assert!((scores.rouge_l - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rouge_matches_inflected_forms() {
        let scores = rouge("the cats ran", "the cat ran");
        assert!((scores.rouge_l - 1.0).abs() < 1e-6);
        assert!((scores.rouge2 - 1.0).abs() < 1e-6);

        let scores = rouge("Cats running quickly", "cat runs quickly");
        assert!((scores.rouge1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_rouge_l_subsequence() {
        // LCS "a c" = 2, precision 2/3, recall 2/2
        let scores = rouge("a b c", "a c");
        assert!((scores.rouge_l - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_rouge_no_overlap() {
        let scores = rouge("alpha beta", "gamma delta");
        assert_eq!(scores.rouge_l, 0.0);
        assert_eq!(scores.rouge1, 0.0);
    }

    #[test]
    fn test_lexical_scores_are_deterministic() {
        let candidate = "paris is the capital city of france";
        assert_eq!(bleu(candidate, ANSWER), bleu(candidate, ANSWER));
        assert_eq!(rouge(candidate, ANSWER), rouge(candidate, ANSWER));
    }
}
