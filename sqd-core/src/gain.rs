//! Разбор битовых полей усиления из слова `ampData`.

use crate::{
    error::{GainStage, SqdError, SqdResult},
    types::AmplifierSettings,
};

/// Биты 11–12: индекс входного усиления
pub const INPUT_GAIN_BIT: u32 = 11;
pub const INPUT_GAIN_MASK: u32 = 0x1800;

/// Биты 0–2: индекс выходного усиления
pub const OUTPUT_GAIN_BIT: u32 = 0;
pub const OUTPUT_GAIN_MASK: u32 = 0x0007;

/// Множители входного каскада
pub static INPUT_GAIN_MULTIPLIERS: [u32; 4] = [1, 2, 5, 10];

/// Множители выходного каскада
pub static OUTPUT_GAIN_MULTIPLIERS: [u32; 8] = [1, 2, 5, 10, 20, 50, 100, 200];

/// Преобразование `ampData` в пару множителей усиления.
pub struct GainResolver;

impl GainResolver {
    /// Возвращает `(input_gain, output_gain)`.
    pub fn resolve(amp_data: u32) -> SqdResult<(u32, u32)> {
        let input = Self::input_gain((amp_data & INPUT_GAIN_MASK) >> INPUT_GAIN_BIT)?;
        let output = Self::output_gain((amp_data & OUTPUT_GAIN_MASK) >> OUTPUT_GAIN_BIT)?;

        Ok((input, output))
    }

    pub fn input_gain(index: u32) -> SqdResult<u32> {
        lookup(&INPUT_GAIN_MULTIPLIERS, GainStage::Input, index)
    }

    pub fn output_gain(index: u32) -> SqdResult<u32> {
        lookup(&OUTPUT_GAIN_MULTIPLIERS, GainStage::Output, index)
    }

    /// Полные настройки усилителя из сырого слова.
    pub fn settings(amp_data: u32) -> SqdResult<AmplifierSettings> {
        let (input_gain, output_gain) = Self::resolve(amp_data)?;

        Ok(AmplifierSettings {
            amp_data,
            input_gain,
            output_gain,
        })
    }
}

fn lookup(
    table: &[u32],
    stage: GainStage,
    index: u32,
) -> SqdResult<u32> {
    table
        .get(index as usize)
        .copied()
        .ok_or(SqdError::UnknownGainCode { stage, index })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_input_5_output_10() {
        let amp_data = (2 << INPUT_GAIN_BIT) | 3;

        assert_eq!(GainResolver::resolve(amp_data).unwrap(), (5, 10));
    }

    #[test]
    fn test_resolve_ignores_other_bits() {
        // биты 3..=10 и выше 12 не участвуют
        let amp_data = 0xFFFF_E7F8 | (3 << INPUT_GAIN_BIT) | 7;

        assert_eq!(GainResolver::resolve(amp_data).unwrap(), (10, 200));
        assert_eq!(GainResolver::resolve(0).unwrap(), (1, 1));
    }

    #[test]
    fn test_all_table_entries() {
        for (i, &g) in INPUT_GAIN_MULTIPLIERS.iter().enumerate() {
            let (input, _) = GainResolver::resolve((i as u32) << INPUT_GAIN_BIT).unwrap();
            assert_eq!(input, g);
        }
        for (i, &g) in OUTPUT_GAIN_MULTIPLIERS.iter().enumerate() {
            let (_, output) = GainResolver::resolve(i as u32).unwrap();
            assert_eq!(output, g);
        }
    }

    #[test]
    fn test_out_of_range_index_is_error() {
        match GainResolver::input_gain(4) {
            Err(SqdError::UnknownGainCode { stage, index }) => {
                assert_eq!(stage, GainStage::Input);
                assert_eq!(index, 4);
            }
            other => panic!("expected UnknownGainCode, got {other:?}"),
        }

        assert!(matches!(
            GainResolver::output_gain(8),
            Err(SqdError::UnknownGainCode {
                stage: GainStage::Output,
                index: 8
            })
        ));
    }

    #[test]
    fn test_settings() {
        let amp = GainResolver::settings(0x0805).unwrap();

        assert_eq!(amp.amp_data, 0x0805);
        assert_eq!(amp.input_gain, 2);
        assert_eq!(amp.output_gain, 50);
    }
}
