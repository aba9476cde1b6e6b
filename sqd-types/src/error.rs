use thiserror::Error;

use crate::AcqType;

/// Результат для операций чтения SQD
pub type SqdResult<T> = std::result::Result<T, SqdError>;

/// Каскад усилителя, к которому относится битовое поле усиления.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainStage {
    /// Входной каскад (биты 11–12)
    Input,
    /// Выходной каскад (биты 0–2)
    Output,
}

/// Типы ошибок декодирования SQD.
#[derive(Debug, Error)]
pub enum SqdError {
    /// Поток закончился раньше, чем были прочитаны запрошенные байты
    #[error("Truncated read at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedRead {
        offset: u64,
        needed: usize,
        available: u64,
    },

    /// Повреждённая цепочка записей о пациенте
    #[error("Corrupt patient record at offset {offset}: {reason}")]
    CorruptPatientRecord { offset: u64, reason: String },

    /// Индекс из битового поля усиления вне таблицы множителей
    #[error("Unknown {stage:?} gain code: {index}")]
    UnknownGainCode { stage: GainStage, index: u32 },

    /// Неизвестный тип сбора данных (acqType вне {1, 2, 3})
    #[error("Unrecognized acquisition type: {0}")]
    UnrecognizedAcquisitionType(i32),

    /// Номер канала вне диапазона `0..channel_count`
    #[error("Invalid channel index {index}: file has {channel_count} channels")]
    InvalidChannelIndex { index: usize, channel_count: usize },

    /// Режим сбора без области сырых отсчётов
    #[error("Channel extraction is not supported for {0:?} records")]
    UnsupportedExtractionMode(AcqType),

    /// Нарушение формата (отрицательные смещения, ноль каналов и т.п.)
    #[error("Format violation: {0}")]
    FormatViolation(String),

    /// Ошибки ввода/вывода (автоконвертируются из std::io::Error)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqdError {
    /// Удобные конструкторы
    pub fn format_violation<S: Into<String>>(s: S) -> Self {
        Self::FormatViolation(s.into())
    }

    pub fn corrupt_patient<S: Into<String>>(
        offset: u64,
        reason: S,
    ) -> Self {
        Self::CorruptPatientRecord {
            offset,
            reason: reason.into(),
        }
    }
}
