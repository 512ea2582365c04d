/// Magnitude of a velocity vector, in the same unit as its components.
pub fn speed(x_dot: f64, y_dot: f64, z_dot: f64) -> f64 {
    (x_dot * x_dot + y_dot * y_dot + z_dot * z_dot).sqrt()
}
