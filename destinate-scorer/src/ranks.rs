//! Competition ranking of scores.

/// Assign competition ranks to scores, highest score first.
///
/// Equal scores share the lowest eligible rank and the next distinct score
/// skips ahead by the number of tied predecessors (`1, 1, 3`). Ties compare
/// exact `f64` equality. The returned vector is aligned with `scores`.
///
/// # Examples
/// ```
/// use destinate_scorer::competition_ranks;
///
/// assert_eq!(competition_ranks(&[0.9, 0.9, 0.2]), vec![1, 1, 3]);
/// assert_eq!(competition_ranks(&[0.1, 0.7, 0.4]), vec![3, 1, 2]);
/// ```
#[must_use]
pub fn competition_ranks(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    order.sort_by(|(_, left), (_, right)| right.total_cmp(left));

    let mut ranks = vec![0; scores.len()];
    let mut previous: Option<(f64, usize)> = None;
    for (position, (index, score)) in order.into_iter().enumerate() {
        let rank = match previous {
            Some((last_score, last_rank)) if last_score.total_cmp(&score).is_eq() => last_rank,
            _ => position.saturating_add(1),
        };
        if let Some(slot) = ranks.get_mut(index) {
            *slot = rank;
        }
        previous = Some((score, rank));
    }
    ranks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[], &[])]
    #[case(&[0.5], &[1])]
    #[case(&[1.0, 1.0, 0.0], &[1, 1, 3])]
    #[case(&[0.3, 0.3, 0.3], &[1, 1, 1])]
    #[case(&[0.2, 0.8, 0.8, 0.5], &[4, 1, 1, 3])]
    #[case(&[0.70, 0.54, 0.30], &[1, 2, 3])]
    fn assigns_competition_ranks(#[case] scores: &[f64], #[case] expected: &[usize]) {
        assert_eq!(competition_ranks(scores), expected);
    }
}
