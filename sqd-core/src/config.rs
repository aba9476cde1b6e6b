use crate::binary::SAMPLE_SIZE;

/// Блок по умолчанию, если частота дискретизации непригодна
pub const DEFAULT_BLOCK_FRAMES: usize = 1024;

/// Предел одного чтения при извлечении канала (8 МБ)
pub const DEFAULT_MAX_BLOCK_BYTES: usize = 8 * 1024 * 1024;

/// Сколько кадров читать за одно strided-чтение.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockSize {
    /// Одна секунда записи: `floor(sample_rate)` кадров
    SampleRate,
    /// Фиксированное число кадров
    Fixed(usize),
}

/// Настройки извлечения каналов.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    pub block_size: BlockSize,
    /// Верхняя граница размера одного чтения в байтах
    pub max_block_bytes: usize,
}

impl ExtractConfig {
    fn new() -> Self {
        Self {
            block_size: BlockSize::SampleRate,
            max_block_bytes: DEFAULT_MAX_BLOCK_BYTES,
        }
    }

    pub fn with_block_size(
        mut self,
        block_size: BlockSize,
    ) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_max_block_bytes(
        mut self,
        max_block_bytes: usize,
    ) -> Self {
        self.max_block_bytes = max_block_bytes;
        self
    }

    /// Эффективный размер блока в кадрах (всегда >= 1).
    pub fn block_frames(
        &self,
        sample_rate: f64,
        channel_count: usize,
    ) -> usize {
        let requested = match self.block_size {
            BlockSize::Fixed(n) => n,
            BlockSize::SampleRate if sample_rate.is_finite() && sample_rate >= 1.0 => {
                sample_rate as usize
            }
            BlockSize::SampleRate => DEFAULT_BLOCK_FRAMES,
        };

        let frame_bytes = channel_count.max(1) * SAMPLE_SIZE;
        let cap = (self.max_block_bytes / frame_bytes).max(1);

        requested.clamp(1, cap)
    }
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self::new()
    }
}
