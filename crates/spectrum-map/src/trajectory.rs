//! Distance trajectory utility.
//!
//! A survey driver records the estimated peak position after each refresh;
//! comparing that sequence against the true emitter location gives the
//! convergence trajectory consumed by the reporting layer.

/// Euclidean distance between two positions.
pub fn euclidean_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

/// Distance from the reference location to each recorded estimate, in
/// recording order.
pub fn distance_trajectory(reference: (f64, f64), estimates: &[(f64, f64)]) -> Vec<f64> {
    estimates
        .iter()
        .map(|&estimate| euclidean_distance(reference, estimate))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        assert_eq!(euclidean_distance((0.0, 0.0), (3.0, 4.0)), 5.0);
        assert_eq!(euclidean_distance((1.0, 1.0), (1.0, 1.0)), 0.0);
        assert_eq!(euclidean_distance((-2.0, 0.0), (2.0, 0.0)), 4.0);
    }

    #[test]
    fn test_trajectory_preserves_order() {
        let reference = (0.0, 0.0);
        let estimates = [(10.0, 0.0), (0.0, 5.0), (3.0, 4.0), (0.0, 0.0)];
        let distances = distance_trajectory(reference, &estimates);
        assert_eq!(distances, vec![10.0, 5.0, 5.0, 0.0]);
    }

    #[test]
    fn test_empty_trajectory() {
        assert!(distance_trajectory((1.0, 2.0), &[]).is_empty());
    }
}
