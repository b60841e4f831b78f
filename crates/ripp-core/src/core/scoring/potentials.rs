const SPRING_ENERGY_SCALE: f64 = 2000.0;
const GAS_CONSTANT: f64 = 8.314462; // In J/(mol·K)
const PHYSIOLOGICAL_TEMPERATURE: f64 = 310.0; // In K

/// Boltzmann-weighted asymmetric spring potential for a spacing deviation.
///
/// `delta` is the actual spacing minus the optimal spacing. Positive deviations
/// (extra spacer) are penalised by `k_insert`, zero or negative ones by
/// `k_delete`. The result lies in (0, 1] and is exactly 1 at `delta == 0`.
#[inline]
pub fn spring(delta: f64, k_insert: f64, k_delete: f64) -> f64 {
    let k = if delta > 0.0 { k_insert } else { k_delete };
    let energy = k * delta * delta / SPRING_ENERGY_SCALE;
    (-energy / (GAS_CONSTANT * PHYSIOLOGICAL_TEMPERATURE)).exp()
}
