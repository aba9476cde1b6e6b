//! Раскладка формата MEG160 `.sqd`
//!
//! Файл — плоский бинарный образ: все секции заголовка находятся по
//! смещениям, записанным в фиксированных позициях таблицы в начале файла.
//! Все многобайтовые числа хранятся в порядке little-endian, "int" и "long"
//! занимают по 4 байта.
//!
//! ```text
//! @16   basic_info_offset          i32
//! @32   patient_offset, record_size, max_record_count, record_count   i32 x4
//! @80   sensitivity_offset         i32
//! @112  amplifier_offset           i32
//! @128  acquisition_offset         i32
//! @144  raw_data_offset            i32  (acqType 1, 3)
//! @160  average_data_offset        i32  (acqType 2)
//! ```

use crate::error::{SqdError, SqdResult};

/// Указатель на блок основной информации
pub const BASIC_INFO_POINTER: u64 = 16;

/// Указатель на цепочку записей о пациенте (+ размер, макс. и факт. число)
pub const PATIENT_POINTER: u64 = 32;

/// Указатель на таблицу чувствительности
pub const SENSITIVITY_POINTER: u64 = 80;

/// Указатель на настройки усилителя
pub const AMPLIFIER_POINTER: u64 = 112;

/// Указатель на параметры сбора
pub const ACQUISITION_POINTER: u64 = 128;

/// Указатель на область сырых отсчётов (acqType 1 и 3)
pub const RAW_DATA_POINTER: u64 = 144;

/// Указатель на область усреднённых данных (acqType 2)
pub const AVERAGE_DATA_POINTER: u64 = 160;

/// Длина полей system_name / model_name
pub const NAME_FIELD_LEN: usize = 128;

/// Длина поля comment
pub const COMMENT_FIELD_LEN: usize = 256;

/// Размер блока основной информации:
/// version + revision + system_id + 2 имени + channel_count + comment
pub const BASIC_INFO_SIZE: usize = 4 * 3 + NAME_FIELD_LEN * 2 + 4 + COMMENT_FIELD_LEN;

/// Заголовок записи о пациенте: info_size + code + subcode
pub const PATIENT_RECORD_HEADER_SIZE: usize = 12;

/// Полная шкала 12-битного АЦП, на которую нормируется пересчёт
pub const ADC_FULL_SCALE: f64 = 4096.0;

/// Множитель чувствительности (Т -> пТ)
pub const SENSITIVITY_SCALE: f64 = 1e12;

/// Убирает хвостовые `\n` и `\0`; содержимое внутри строки не трогается.
pub fn trim_text(raw: &[u8]) -> String {
    let end = raw
        .iter()
        .rposition(|&b| b != b'\n' && b != 0)
        .map_or(0, |i| i + 1);

    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Текст до первого `\0` (или весь срез, если терминатора нет).
pub fn c_string(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());

    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Проверяет, что смещение из таблицы неотрицательно.
pub fn offset_from_i32(
    field: &str,
    value: i32,
) -> SqdResult<u64> {
    u64::try_from(value)
        .map_err(|_| SqdError::format_violation(format!("{field} is negative: {value}")))
}

/// Проверяет, что счётчик из заголовка неотрицателен.
pub fn count_from_i32(
    field: &str,
    value: i32,
) -> SqdResult<u32> {
    u32::try_from(value)
        .map_err(|_| SqdError::format_violation(format!("{field} is negative: {value}")))
}
