/// Основная информация о системе (блок по смещению из поля @16)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SqdHeader {
    /// Версия формата MEG160
    pub version: i32,
    /// Ревизия формата
    pub revision: i32,
    /// Идентификатор системы
    pub system_id: i32,
    /// Название системы (128 байт, без хвостовых `\n`/`\0`)
    pub system_name: String,
    /// Модель (128 байт, без хвостовых `\n`/`\0`)
    pub model_name: String,
    /// Количество каналов (всегда > 0)
    pub channel_count: usize,
    /// Комментарий (256 байт, без хвостовых `\n`/`\0`)
    pub comment: String,
}

/// Калибровочная пара канала из таблицы чувствительности.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensitivityEntry {
    /// Первое значение пары (масштаб)
    pub scale: f64,
    /// Коэффициент усиления канала, используется в пересчёте
    pub gain: f64,
}

/// Настройки усилителя: сырое слово и разобранные множители.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmplifierSettings {
    /// Сырое 32-битное слово `ampData`
    pub amp_data: u32,
    /// Входное усиление ∈ {1, 2, 5, 10}
    pub input_gain: u32,
    /// Выходное усиление ∈ {1, 2, 5, 10, 20, 50, 100, 200}
    pub output_gain: u32,
}

impl SqdHeader {
    /// Версия в виде `V{version}R{revision:03}`, как её печатает прибор.
    pub fn version_label(&self) -> String {
        format!("V{}R{:03}", self.version, self.revision)
    }
}

impl SensitivityEntry {
    pub fn new(
        scale: f64,
        gain: f64,
    ) -> Self {
        Self { scale, gain }
    }
}
