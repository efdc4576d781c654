// ============================================================
// Layer 7 — Metric Formulas
// ============================================================
// Every function takes the predictions (each one carrying its
// gold target) and returns a score in [0, 1]. An empty input
// scores 0.
//
//   accuracy   — share of exact label matches
//   macro_f1   — F1 per label, averaged with equal weight over
//                every label seen in targets or predictions
//   bleu       — corpus BLEU-4, uniform weights, brevity penalty
//   rouge_l    — mean LCS-based F-measure per pair
//   squad_f1   — mean token-overlap F1 after SQuAD normalisation
//
// Text metrics tokenise on whitespace.

use std::collections::{BTreeSet, HashMap};

use crate::domain::metric::Metric;
use crate::domain::task_sample::Prediction;

const BLEU_MAX_ORDER: usize = 4;

/// Dispatch a metric to its formula
pub fn compute(metric: Metric, predictions: &[Prediction]) -> f64 {
    match metric {
        Metric::Accuracy => accuracy(predictions),
        Metric::F1       => macro_f1(predictions),
        Metric::Bleu     => bleu(predictions),
        Metric::Rouge    => rouge_l(predictions),
        Metric::Squad    => squad_f1(predictions),
    }
}

pub fn accuracy(predictions: &[Prediction]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let correct = predictions.iter().filter(|p| p.is_correct()).count();
    correct as f64 / predictions.len() as f64
}

pub fn macro_f1(predictions: &[Prediction]) -> f64 {
    let labels: BTreeSet<&str> = predictions
        .iter()
        .flat_map(|p| [p.target.as_str(), p.predictions.as_str()])
        .collect();

    if labels.is_empty() {
        return 0.0;
    }

    let total: f64 = labels
        .iter()
        .map(|&label| {
            let mut tp = 0usize;
            let mut fp = 0usize;
            let mut fn_ = 0usize;
            for p in predictions {
                match (p.target == label, p.predictions == label) {
                    (true, true)   => tp += 1,
                    (false, true)  => fp += 1,
                    (true, false)  => fn_ += 1,
                    (false, false) => {}
                }
            }
            let precision = ratio(tp, tp + fp);
            let recall    = ratio(tp, tp + fn_);
            harmonic_mean(precision, recall)
        })
        .sum();

    total / labels.len() as f64
}

pub fn bleu(predictions: &[Prediction]) -> f64 {
    let mut matches = [0usize; BLEU_MAX_ORDER];
    let mut totals  = [0usize; BLEU_MAX_ORDER];
    let mut candidate_len = 0usize;
    let mut reference_len = 0usize;

    for p in predictions {
        let candidate: Vec<&str> = p.predictions.split_whitespace().collect();
        let reference: Vec<&str> = p.target.split_whitespace().collect();
        candidate_len += candidate.len();
        reference_len += reference.len();

        for n in 1..=BLEU_MAX_ORDER {
            let cand_counts = ngram_counts(&candidate, n);
            let ref_counts  = ngram_counts(&reference, n);

            // Clipped: a candidate n-gram counts at most as often as in the reference
            matches[n - 1] += cand_counts
                .iter()
                .map(|(gram, &count)| count.min(ref_counts.get(gram).copied().unwrap_or(0)))
                .sum::<usize>();
            totals[n - 1] += candidate.len().saturating_sub(n - 1);
        }
    }

    if candidate_len == 0 || matches.iter().any(|&m| m == 0) {
        return 0.0;
    }

    let log_precision: f64 = matches
        .iter()
        .zip(&totals)
        .map(|(&m, &t)| (m as f64 / t as f64).ln())
        .sum::<f64>()
        / BLEU_MAX_ORDER as f64;

    let brevity_penalty = if candidate_len > reference_len {
        1.0
    } else {
        (1.0 - reference_len as f64 / candidate_len as f64).exp()
    };

    brevity_penalty * log_precision.exp()
}

pub fn rouge_l(predictions: &[Prediction]) -> f64 {
    mean(predictions, |p| {
        let candidate: Vec<&str> = p.predictions.split_whitespace().collect();
        let reference: Vec<&str> = p.target.split_whitespace().collect();
        let lcs = lcs_len(&candidate, &reference);
        harmonic_mean(ratio(lcs, candidate.len()), ratio(lcs, reference.len()))
    })
}

pub fn squad_f1(predictions: &[Prediction]) -> f64 {
    mean(predictions, |p| {
        let candidate = normalize_answer(&p.predictions);
        let reference = normalize_answer(&p.target);

        if candidate.is_empty() || reference.is_empty() {
            return if candidate == reference { 1.0 } else { 0.0 };
        }

        let mut ref_counts: HashMap<&str, usize> = HashMap::new();
        for token in &reference {
            *ref_counts.entry(token.as_str()).or_insert(0) += 1;
        }

        let mut common = 0usize;
        for token in &candidate {
            if let Some(count) = ref_counts.get_mut(token.as_str()) {
                if *count > 0 {
                    *count -= 1;
                    common += 1;
                }
            }
        }

        harmonic_mean(ratio(common, candidate.len()), ratio(common, reference.len()))
    })
}

/// Lowercase, drop punctuation and the articles a/an/the, split on whitespace.
fn normalize_answer(text: &str) -> Vec<String> {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    lowered
        .split_whitespace()
        .filter(|w| !matches!(*w, "a" | "an" | "the"))
        .map(str::to_string)
        .collect()
}

fn ngram_counts<'a>(tokens: &[&'a str], n: usize) -> HashMap<Vec<&'a str>, usize> {
    let mut counts = HashMap::new();
    for window in tokens.windows(n) {
        *counts.entry(window.to_vec()).or_insert(0) += 1;
    }
    counts
}

/// Longest common subsequence length, single-row dynamic programming
fn lcs_len(a: &[&str], b: &[&str]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for x in a {
        let mut diagonal = 0;
        for (j, y) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if x == y { diagonal + 1 } else { above.max(row[j]) };
            diagonal = above;
        }
    }
    row[b.len()]
}

fn mean(predictions: &[Prediction], score: impl Fn(&Prediction) -> f64) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    predictions.iter().map(score).sum::<f64>() / predictions.len() as f64
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn harmonic_mean(a: f64, b: f64) -> f64 {
    if a + b == 0.0 { 0.0 } else { 2.0 * a * b / (a + b) }
}
