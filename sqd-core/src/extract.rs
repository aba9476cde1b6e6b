//! Извлечение одного канала из перемежающихся 16-битных отсчётов.
//!
//! Данные хранятся кадрами: `[s0_ch0 .. s0_chN-1] [s1_ch0 .. s1_chN-1] ...`,
//! отсчёт `k` канала `c` лежит по адресу `raw_offset + 2 * (c + N * k)`.

use log::trace;

use crate::{
    binary::{BinaryCursor, ReadAt, SAMPLE_SIZE},
    error::{SqdError, SqdResult},
    types::RawDataRegion,
};

/// Разбиение `total` кадров на блоки по `block` кадров.
///
/// Все блоки полные, кроме, возможно, последнего, длина которого
/// `total % block`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPlan {
    pub total: usize,
    pub block: usize,
}

/// Итератор длин блоков из [`BlockPlan`].
pub struct BlockIter {
    remaining: usize,
    block: usize,
}

/// Чтение одного канала из области сырых отсчётов.
#[derive(Debug, Clone, Copy)]
pub struct ChannelSampleExtractor {
    region: RawDataRegion,
    channel_count: usize,
    block_frames: usize,
}

impl BlockPlan {
    pub fn new(
        total: usize,
        block: usize,
    ) -> Self {
        Self {
            total,
            block: block.max(1),
        }
    }

    pub fn full_blocks(&self) -> usize {
        self.total / self.block
    }

    /// Длина последнего неполного блока (0, если его нет).
    pub fn last_block_len(&self) -> usize {
        self.total % self.block
    }

    pub fn block_count(&self) -> usize {
        self.full_blocks() + usize::from(self.last_block_len() > 0)
    }

    pub fn iter(&self) -> BlockIter {
        BlockIter {
            remaining: self.total,
            block: self.block,
        }
    }
}

impl Iterator for BlockIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }

        let len = self.remaining.min(self.block);
        self.remaining -= len;

        Some(len)
    }
}

impl ChannelSampleExtractor {
    pub fn new(
        region: RawDataRegion,
        channel_count: usize,
        block_frames: usize,
    ) -> Self {
        Self {
            region,
            channel_count,
            block_frames: block_frames.max(1),
        }
    }

    pub fn plan(&self) -> BlockPlan {
        BlockPlan::new(self.region.sample_count, self.block_frames)
    }

    /// Отсчёты канала `channel` в порядке записи.
    pub fn extract<S: ReadAt + ?Sized>(
        &self,
        source: &S,
        channel: usize,
    ) -> SqdResult<Vec<i16>> {
        if channel >= self.channel_count {
            return Err(SqdError::InvalidChannelIndex {
                index: channel,
                channel_count: self.channel_count,
            });
        }

        if self.region.sample_count == 0 {
            return Ok(Vec::new());
        }

        let start = self.region.offset + (channel * SAMPLE_SIZE) as u64;
        let gap = ((self.channel_count - 1) * SAMPLE_SIZE) as u64;

        // счётчики из заголовка: весь столбец должен поместиться до резерва
        self.check_span(source, start)?;

        let mut cur = BinaryCursor::at(source, start);
        let mut out = Vec::with_capacity(self.region.sample_count);

        for (i, frames) in self.plan().iter().enumerate() {
            if i > 0 {
                // остаток предыдущего кадра после нужного столбца
                cur.skip(gap);
            }

            trace!(
                "channel {channel}: block {i} of {frames} frames @{}",
                cur.position()
            );
            out.extend(cur.read_i16_strided(frames, self.channel_count)?);
        }

        Ok(out)
    }

    /// Байты от первого до последнего отсчёта канала: `((n - 1) * N + 1) * 2`.
    fn check_span<S: ReadAt + ?Sized>(
        &self,
        source: &S,
        start: u64,
    ) -> SqdResult<()> {
        let needed = (self.region.sample_count - 1)
            .checked_mul(self.channel_count)
            .and_then(|n| n.checked_add(1))
            .and_then(|n| n.checked_mul(SAMPLE_SIZE));
        let available = source.len().saturating_sub(start);

        match needed {
            Some(n) if n as u64 <= available => Ok(()),
            _ => Err(SqdError::TruncatedRead {
                offset: start,
                needed: needed.unwrap_or(usize::MAX),
                available,
            }),
        }
    }
}
