//! Cosine similarity and chunk ranking
//!
//! Pure functions of their inputs: no shared mutable state, restartable.
//! Malformed vectors (empty, mismatched length, zero magnitude) score a
//! neutral 0 rather than raising an error.

use std::cmp::Ordering;

/// Cosine similarity between two vectors, clamped to [-1, 1]
///
/// Defined as `dot(a, b) / (‖a‖·‖b‖)`. Empty inputs, mismatched lengths, or
/// a zero denominator yield `0.0`: a neutral, non-matching score.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    let denominator = magnitude_a * magnitude_b;
    if denominator == 0.0 {
        return 0.0;
    }

    (dot / denominator).clamp(-1.0, 1.0)
}

/// Rank chunk texts against a query vector
///
/// Scores every chunk, keeps those with similarity `>= threshold`, sorts the
/// retained set by similarity descending, and returns at most `limit` chunk
/// texts in that order. Ties keep chunk insertion order (stable sort). An
/// empty result is not an error; it means nothing cleared the threshold.
pub fn rank_chunks(
    query: &[f32],
    chunk_texts: &[String],
    chunk_vectors: &[Vec<f32>],
    threshold: f32,
    limit: usize,
) -> Vec<String> {
    let mut scored: Vec<(usize, f32)> = chunk_texts
        .iter()
        .zip(chunk_vectors.iter())
        .enumerate()
        .map(|(i, (_, vector))| (i, cosine_similarity(query, vector)))
        .filter(|(_, similarity)| *similarity >= threshold)
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored.truncate(limit);

    scored
        .into_iter()
        .map(|(i, _)| chunk_texts[i].clone())
        .collect()
}
