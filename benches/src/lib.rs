//! Синтетические записи для бенчмарков.

use byteorder::{ByteOrder, LittleEndian};
use sqd_core::{
    ACQUISITION_POINTER, AMPLIFIER_POINTER, BASIC_INFO_POINTER, BASIC_INFO_SIZE,
    PATIENT_POINTER, RAW_DATA_POINTER, SENSITIVITY_POINTER,
};

/// Непрерывная запись `channels` x `samples` с частотой `sample_rate`.
///
/// Раскладка: таблица смещений, затем секции подряд, сырые данные в конце.
pub fn synthetic_recording(
    channels: usize,
    samples: usize,
    sample_rate: f64,
) -> Vec<u8> {
    let basic = 256;
    let sensitivity = basic + BASIC_INFO_SIZE;
    let amplifier = sensitivity + channels * 16;
    let acquisition = amplifier + 4;
    let patient = acquisition + 20;
    let raw = patient;

    let mut buf = vec![0u8; raw + channels * samples * 2];

    let mut put = |at: usize, value: i32| LittleEndian::write_i32(&mut buf[at..at + 4], value);
    put(BASIC_INFO_POINTER as usize, basic as i32);
    put(PATIENT_POINTER as usize, patient as i32);
    put(SENSITIVITY_POINTER as usize, sensitivity as i32);
    put(AMPLIFIER_POINTER as usize, amplifier as i32);
    put(ACQUISITION_POINTER as usize, acquisition as i32);
    put(RAW_DATA_POINTER as usize, raw as i32);

    // channel_count после version/revision/system_id и двух имён
    put(basic + 12 + 256, channels as i32);
    put(amplifier, (1 << 11) | 2);
    put(acquisition, 1);
    put(acquisition + 12, samples as i32);
    put(acquisition + 16, samples as i32);

    LittleEndian::write_f64(&mut buf[acquisition + 4..acquisition + 12], sample_rate);
    for c in 0..channels {
        let at = sensitivity + c * 16;
        LittleEndian::write_f64(&mut buf[at..at + 8], 1.0);
        LittleEndian::write_f64(&mut buf[at + 8..at + 16], 1e-12);
    }

    for (i, chunk) in buf[raw..].chunks_exact_mut(2).enumerate() {
        LittleEndian::write_i16(chunk, (i % 4096) as i16 - 2048);
    }

    buf
}
