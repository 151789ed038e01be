//! Linear time decay of sample weights

/// Decay factor per weight, in the order given
///
/// `weights` must already be ordered oldest first. The factor grows
/// linearly with cumulative weight so the newest sample keeps factor 1 and
/// the oldest approaches `oldest_weight`. With `oldest_weight` in `(-1, 0)`
/// the oldest part of the history is zeroed out. Factors never go negative.
pub fn decay_factors(weights: &[f64], oldest_weight: f64) -> Vec<f64> {
    let cumulative: Vec<f64> = weights
        .iter()
        .scan(0.0, |acc, w| {
            *acc += w;
            Some(*acc)
        })
        .collect();

    let total = cumulative.last().copied().unwrap_or(0.0);
    if total <= 0.0 {
        return vec![1.0; weights.len()];
    }

    let slope = if oldest_weight >= 0.0 {
        (1.0 - oldest_weight) / total
    } else {
        1.0 / ((oldest_weight + 1.0) * total)
    };
    let intercept = 1.0 - slope * total;

    cumulative
        .into_iter()
        .map(|c| (intercept + slope * c).max(0.0))
        .collect()
}
