//! Pure conversions over ISS state vectors: epoch parsing, speed, the
//! inertial to geodetic transform and nearest-epoch lookup. Nothing in here
//! performs I/O.

mod epoch;
mod error;
mod frames;
mod kinematics;
mod nearest;
mod store;
mod types;

pub use epoch::{parse_epoch, Timestamp};
pub use error::TelemetryError;
pub use frames::{geodetic_at_epoch, ObservationClock};
pub use store::StateVectorStore;
pub use types::{GeodeticPosition, StateVector};
