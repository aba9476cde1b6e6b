use crate::{SqdError, SqdResult};

/// Тип сбора данных (поле `acqType` блока параметров сбора)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum AcqType {
    /// Непрерывная запись, сырые отсчёты
    ContinuousRaw = 1,
    /// Вызванные ответы, усреднённые кадры
    EvokedAverage = 2,
    /// Вызванные ответы, сырые отсчёты
    EvokedRaw = 3,
}

/// Параметры непрерывной записи (acqType = 1).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinuousRaw {
    /// Частота дискретизации, Гц
    pub sample_rate: f64,
    /// Запланированное количество отсчётов
    pub sample_count: u32,
    /// Фактически записанное количество отсчётов
    pub actual_sample_count: u32,
    /// Смещение области сырых данных (поле @144)
    pub raw_data_offset: u64,
}

/// Параметры кадров вызванных ответов (общие для acqType 2 и 3).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvokedFrames {
    /// Частота дискретизации, Гц
    pub sample_rate: f64,
    /// Длина кадра в отсчётах
    pub frame_length: u32,
    /// Длина предстимульного участка в отсчётах
    pub pretrigger_length: u32,
    /// Запланированное количество усреднений
    pub average_count: u32,
    /// Фактическое количество усреднений
    pub actual_average_count: u32,
}

/// Параметры сбора, форма которых зависит от `acqType`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AcquisitionParameters {
    ContinuousRaw(ContinuousRaw),
    EvokedAverage {
        frames: EvokedFrames,
        /// Смещение усреднённых данных (поле @160)
        average_data_offset: u64,
    },
    EvokedRaw {
        frames: EvokedFrames,
        /// Смещение области сырых данных (поле @144)
        raw_data_offset: u64,
    },
}

/// Область перемежающихся 16-битных отсчётов.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDataRegion {
    /// Абсолютное смещение первого кадра
    pub offset: u64,
    /// Количество отсчётов на канал
    pub sample_count: usize,
}

impl AcqType {
    pub fn from_i32(v: i32) -> SqdResult<Self> {
        match v {
            1 => Ok(AcqType::ContinuousRaw),
            2 => Ok(AcqType::EvokedAverage),
            3 => Ok(AcqType::EvokedRaw),
            _ => Err(SqdError::UnrecognizedAcquisitionType(v)),
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Описание режима в терминах прибора
    pub fn description(&self) -> &'static str {
        match self {
            AcqType::ContinuousRaw => "Continuous mode, Raw data file",
            AcqType::EvokedAverage => "Evoked mode, Average data file",
            AcqType::EvokedRaw => "Evoked mode, Raw data file",
        }
    }
}

impl EvokedFrames {
    /// Общее количество отсчётов на канал во всех записанных кадрах.
    ///
    /// `None`, если произведение не помещается в `usize`.
    pub fn total_samples(&self) -> Option<usize> {
        (self.frame_length as usize).checked_mul(self.actual_average_count as usize)
    }
}

impl AcquisitionParameters {
    pub fn acq_type(&self) -> AcqType {
        match self {
            AcquisitionParameters::ContinuousRaw(_) => AcqType::ContinuousRaw,
            AcquisitionParameters::EvokedAverage { .. } => AcqType::EvokedAverage,
            AcquisitionParameters::EvokedRaw { .. } => AcqType::EvokedRaw,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        match self {
            AcquisitionParameters::ContinuousRaw(c) => c.sample_rate,
            AcquisitionParameters::EvokedAverage { frames, .. }
            | AcquisitionParameters::EvokedRaw { frames, .. } => frames.sample_rate,
        }
    }

    /// Область сырых отсчётов или `None` для усреднённых записей.
    pub fn raw_data(&self) -> Option<RawDataRegion> {
        match self {
            AcquisitionParameters::ContinuousRaw(c) => Some(RawDataRegion {
                offset: c.raw_data_offset,
                sample_count: c.actual_sample_count as usize,
            }),
            AcquisitionParameters::EvokedRaw {
                frames,
                raw_data_offset,
            } => Some(RawDataRegion {
                offset: *raw_data_offset,
                // переполнение заведомо больше файла: экстрактор вернёт TruncatedRead
                sample_count: frames.total_samples().unwrap_or(usize::MAX),
            }),
            AcquisitionParameters::EvokedAverage { .. } => None,
        }
    }

    /// Параметры кадров для режимов вызванных ответов.
    pub fn evoked_frames(&self) -> Option<&EvokedFrames> {
        match self {
            AcquisitionParameters::ContinuousRaw(_) => None,
            AcquisitionParameters::EvokedAverage { frames, .. }
            | AcquisitionParameters::EvokedRaw { frames, .. } => Some(frames),
        }
    }
}
