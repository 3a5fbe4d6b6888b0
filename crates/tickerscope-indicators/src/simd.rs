//! SIMD helpers for indicator inputs.
//!
//! These use the `wide` crate for portable SIMD operations.

use wide::f64x4;

/// Split close-to-close changes into gains and losses.
///
/// Element `i` of both outputs describes the change from `data[i]` to
/// `data[i + 1]`: gain = max(change, 0), loss = max(-change, 0).
/// Inputs shorter than two points yield empty outputs.
pub fn split_changes_simd(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    if data.len() < 2 {
        return (vec![], vec![]);
    }

    let changes = data.len() - 1;
    let mut gains = Vec::with_capacity(changes);
    let mut losses = Vec::with_capacity(changes);

    let chunks = changes / 4;
    let zero = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        let prev = f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]]);
        let curr = f64x4::new([
            data[idx + 1],
            data[idx + 2],
            data[idx + 3],
            data[idx + 4],
        ]);

        let diff = curr - prev;

        gains.extend(diff.max(zero).to_array());
        losses.extend((-diff).max(zero).to_array());
    }

    // Handle remaining elements
    for i in (chunks * 4)..changes {
        let change = data[i + 1] - data[i];
        gains.push(change.max(0.0));
        losses.push((-change).max(0.0));
    }

    (gains, losses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_changes_matches_scalar() {
        let data: Vec<f64> = (0..23)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0)
            .collect();

        let (gains, losses) = split_changes_simd(&data);
        assert_eq!(gains.len(), data.len() - 1);
        assert_eq!(losses.len(), data.len() - 1);

        for i in 0..gains.len() {
            let change = data[i + 1] - data[i];
            assert_eq!(gains[i], change.max(0.0));
            assert_eq!(losses[i], (-change).max(0.0));
        }
    }

    #[test]
    fn test_split_changes_short_input() {
        assert_eq!(split_changes_simd(&[]), (vec![], vec![]));
        assert_eq!(split_changes_simd(&[1.0]), (vec![], vec![]));
        assert_eq!(split_changes_simd(&[1.0, 3.0]), (vec![2.0], vec![0.0]));
    }

    #[test]
    fn test_unchanged_price_is_neither_gain_nor_loss() {
        let (gains, losses) = split_changes_simd(&[5.0, 5.0, 5.0, 5.0, 5.0, 5.0]);
        assert!(gains.iter().all(|&g| g == 0.0));
        assert!(losses.iter().all(|&l| l == 0.0));
    }
}
