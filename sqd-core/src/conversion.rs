use crate::{
    error::{SqdError, SqdResult},
    format::{ADC_FULL_SCALE, SENSITIVITY_SCALE},
    types::SensitivityEntry,
};

/// Пересчёт сырых отсчётов в физические единицы.
pub struct ConversionFactorComputer;

impl ConversionFactorComputer {
    /// Коэффициенты по каналам:
    /// `(output_gain / input_gain) * (gain * 1e12) / 4096`.
    pub fn compute(
        sensitivity: &[SensitivityEntry],
        input_gain: u32,
        output_gain: u32,
    ) -> SqdResult<Vec<f64>> {
        if input_gain == 0 {
            return Err(SqdError::format_violation("input gain must be positive"));
        }

        let amp_gain = output_gain as f64 / input_gain as f64;

        Ok(sensitivity
            .iter()
            .map(|entry| amp_gain * (entry.gain * SENSITIVITY_SCALE) / ADC_FULL_SCALE)
            .collect())
    }
}
