pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;
/// UHF amateur-band CubeSat downlink.
pub const DEFAULT_TRANSMIT_FREQUENCY_HZ: f64 = 437.5e6;

/// Observed minus transmitted frequency for a range-rate in m/s (receding positive).
pub fn doppler_shift_hz(frequency_hz: f64, speed_of_light_m_s: f64, range_rate_m_s: f64) -> f64 {
    frequency_hz * (speed_of_light_m_s + range_rate_m_s) / speed_of_light_m_s - frequency_hz
}
