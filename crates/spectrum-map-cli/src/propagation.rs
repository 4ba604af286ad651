//! Simulated measurement source.
//!
//! Stands in for the external ray-tracing simulator during development and
//! testing: a log-distance path loss model with an optional uniform noise
//! term. Pure function of the transmitter and receiver positions plus the
//! caller's RNG; no hidden state.

use rand::Rng;
use spectrum_map::euclidean_distance;

/// Log-distance path loss model:
/// `RSSI(d) = rssi_ref − 10·n·log10(d / d_ref)`, clamped at the reference
/// distance so the transmitter cell itself reads `rssi_ref`.
#[derive(Debug, Clone)]
pub struct PathLossModel {
    /// Path loss exponent (2 = free space, 3+ = indoor with obstacles)
    pub exponent: f64,
    /// Reference distance for the model (meters)
    pub reference_distance: f64,
    /// RSSI at the reference distance (dBm)
    pub reference_rssi: f64,
    /// Half-width of the uniform noise term (dB); zero disables noise
    pub noise_db: f64,
}

impl Default for PathLossModel {
    fn default() -> Self {
        Self {
            exponent: 3.0,
            reference_distance: 1.0,
            reference_rssi: -30.0,
            noise_db: 0.0,
        }
    }
}

impl PathLossModel {
    /// Simulated RSSI at `receiver` for a transmitter at `transmitter`.
    pub fn rssi_at(
        &self,
        transmitter: (f64, f64),
        receiver: (f64, f64),
        rng: &mut impl Rng,
    ) -> f64 {
        let distance = euclidean_distance(transmitter, receiver).max(self.reference_distance);
        let mut rssi = self.reference_rssi
            - 10.0 * self.exponent * (distance / self.reference_distance).log10();
        if self.noise_db > 0.0 {
            rssi += rng.gen_range(-self.noise_db..=self.noise_db);
        }
        rssi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_reference_rssi_at_reference_distance() {
        let model = PathLossModel::default();
        let mut rng = StdRng::seed_from_u64(1);
        let rssi = model.rssi_at((0.0, 0.0), (1.0, 0.0), &mut rng);
        assert!((rssi - -30.0).abs() < 1e-9);
    }

    #[test]
    fn test_rssi_decays_with_distance() {
        let model = PathLossModel::default();
        let mut rng = StdRng::seed_from_u64(1);
        let near = model.rssi_at((0.0, 0.0), (2.0, 0.0), &mut rng);
        let far = model.rssi_at((0.0, 0.0), (20.0, 0.0), &mut rng);
        assert!(near > far);
        // 10x distance at exponent 3 costs 30 dB.
        assert!((near - far - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_transmitter_cell_is_clamped() {
        let model = PathLossModel::default();
        let mut rng = StdRng::seed_from_u64(1);
        let on_top = model.rssi_at((5.0, 5.0), (5.0, 5.0), &mut rng);
        assert!((on_top - -30.0).abs() < 1e-9);
    }

    #[test]
    fn test_noise_is_bounded() {
        let model = PathLossModel {
            noise_db: 2.0,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let rssi = model.rssi_at((0.0, 0.0), (10.0, 0.0), &mut rng);
            let clean = -30.0 - 30.0;
            assert!((rssi - clean).abs() <= 2.0);
        }
    }
}
