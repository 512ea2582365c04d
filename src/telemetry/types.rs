use serde::Serialize;

use super::epoch::Timestamp;
use super::error::TelemetryError;
use super::frames::{to_geodetic, ObservationClock};

/// Position and velocity of the station at one epoch, in the feed's inertial frame.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// Epoch exactly as published, copied through for display.
    pub epoch_text: String,
    pub epoch: Timestamp,
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

impl StateVector {
    pub fn speed_km_s(&self) -> f64 {
        let [x_dot, y_dot, z_dot] = self.velocity_km_s;
        super::kinematics::speed(x_dot, y_dot, z_dot)
    }

    pub fn geodetic(&self, clock: ObservationClock) -> Result<GeodeticPosition, TelemetryError> {
        to_geodetic(self.position_km, clock.observation_instant(self.epoch)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPosition {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}
