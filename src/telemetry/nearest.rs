use super::epoch::Timestamp;
use super::error::TelemetryError;
use super::types::StateVector;

/// Returns the sample whose epoch is closest to `target`.
///
/// The samples need not be sorted. On equal distance the earlier sample in
/// the slice wins.
pub fn nearest(samples: &[StateVector], target: Timestamp) -> Result<&StateVector, TelemetryError> {
    let mut best: Option<(&StateVector, chrono::Duration)> = None;

    for sample in samples {
        let distance = (sample.epoch - target).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((sample, distance)),
        }
    }

    best.map(|(sample, _)| sample)
        .ok_or(TelemetryError::EmptyInput)
}
