use byteorder::{ByteOrder, LittleEndian};

use crate::{
    binary::ReadAt,
    error::{SqdError, SqdResult},
    format::trim_text,
};

/// Размер одного сырого отсчёта в байтах.
pub const SAMPLE_SIZE: usize = 2;

/// Курсор поверх [`ReadAt`]: смещение + типизированные little-endian чтения.
///
/// Курсор не владеет источником и дёшево создаётся заново для каждого
/// прохода.
pub struct BinaryCursor<'a, S: ReadAt + ?Sized> {
    source: &'a S,
    pos: u64,
}

impl<'a, S: ReadAt + ?Sized> BinaryCursor<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source, pos: 0 }
    }

    /// Курсор, сразу установленный на `offset`.
    pub fn at(
        source: &'a S,
        offset: u64,
    ) -> Self {
        Self {
            source,
            pos: offset,
        }
    }

    pub fn seek(
        &mut self,
        offset: u64,
    ) {
        self.pos = offset;
    }

    /// Сдвигает позицию вперёд без чтения (проверка границ при чтении).
    pub fn skip(
        &mut self,
        len: u64,
    ) {
        self.pos = self.pos.saturating_add(len);
    }

    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Сколько байт осталось до конца источника.
    pub fn remaining(&self) -> u64 {
        self.source.len().saturating_sub(self.pos)
    }

    /// Читает ровно `len` байт; при нехватке позиция не меняется.
    pub fn read_bytes(
        &mut self,
        len: usize,
    ) -> SqdResult<Vec<u8>> {
        // длина приходит из заголовка: проверяем до выделения буфера
        self.ensure(len)?;

        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    pub fn read_i32(&mut self) -> SqdResult<i32> {
        let mut b = [0u8; 4];
        self.fill(&mut b)?;
        Ok(LittleEndian::read_i32(&b))
    }

    /// "long" в этом формате — 4 байта, как и int.
    pub fn read_long(&mut self) -> SqdResult<i32> {
        self.read_i32()
    }

    pub fn read_f64(&mut self) -> SqdResult<f64> {
        let mut b = [0u8; 8];
        self.fill(&mut b)?;
        Ok(LittleEndian::read_f64(&b))
    }

    pub fn read_f64_array(
        &mut self,
        count: usize,
    ) -> SqdResult<Vec<f64>> {
        let len = byte_len(count, 8, self.pos)?;
        let raw = self.read_bytes(len)?;
        let mut out = vec![0f64; count];
        LittleEndian::read_f64_into(&raw, &mut out);
        Ok(out)
    }

    /// Текстовое поле фиксированной длины без хвостовых `\n`/`\0`.
    pub fn read_text(
        &mut self,
        len: usize,
    ) -> SqdResult<String> {
        let raw = self.read_bytes(len)?;
        Ok(trim_text(&raw))
    }

    /// Читает `count` отсчётов i16, отстоящих друг от друга на `stride`
    /// отсчётов, одним непрерывным чтением.
    ///
    /// Читается `((count - 1) * stride + 1) * 2` байт: хвост последнего
    /// кадра после нужного столбца не затрагивается. Курсор остаётся сразу
    /// за последним прочитанным отсчётом.
    pub fn read_i16_strided(
        &mut self,
        count: usize,
        stride: usize,
    ) -> SqdResult<Vec<i16>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if stride == 0 {
            return Err(SqdError::format_violation("stride must be positive"));
        }

        let span_samples = (count - 1)
            .checked_mul(stride)
            .and_then(|n| n.checked_add(1))
            .ok_or_else(|| SqdError::format_violation("strided read span overflows"))?;
        let len = byte_len(span_samples, SAMPLE_SIZE, self.pos)?;
        let raw = self.read_bytes(len)?;

        let step = stride * SAMPLE_SIZE;
        Ok((0..count)
            .map(|k| LittleEndian::read_i16(&raw[k * step..]))
            .collect())
    }

    fn fill(
        &mut self,
        buf: &mut [u8],
    ) -> SqdResult<()> {
        self.ensure(buf.len())?;

        self.source.read_exact_at(buf, self.pos)?;
        self.pos += buf.len() as u64;

        Ok(())
    }

    fn ensure(
        &self,
        needed: usize,
    ) -> SqdResult<()> {
        let available = self.remaining();

        if (needed as u64) > available {
            return Err(SqdError::TruncatedRead {
                offset: self.pos,
                needed,
                available,
            });
        }

        Ok(())
    }
}

fn byte_len(
    count: usize,
    size: usize,
    offset: u64,
) -> SqdResult<usize> {
    count.checked_mul(size).ok_or_else(|| {
        SqdError::format_violation(format!(
            "read of {count} x {size} bytes at offset {offset} overflows"
        ))
    })
}
