//! Декодирование секций заголовка по таблице смещений.
//!
//! Порядок секций фиксирован: основная информация → чувствительность
//! (нужно число каналов) → усилитель → параметры сбора → пациент.

use log::{debug, trace};

use crate::{
    binary::{BinaryCursor, ReadAt},
    error::{SqdError, SqdResult},
    format::{
        c_string, count_from_i32, offset_from_i32, ACQUISITION_POINTER, AMPLIFIER_POINTER,
        AVERAGE_DATA_POINTER, BASIC_INFO_POINTER, COMMENT_FIELD_LEN, NAME_FIELD_LEN,
        PATIENT_POINTER, PATIENT_RECORD_HEADER_SIZE, RAW_DATA_POINTER, SENSITIVITY_POINTER,
    },
    gain::GainResolver,
    types::{
        AcqType, AcquisitionParameters, AmplifierSettings, ContinuousRaw, EvokedFrames,
        PatientField, PatientRecord, SensitivityEntry, SqdHeader,
    },
};

/// Все секции заголовка, декодированные за один проход.
#[derive(Debug, Clone)]
pub struct DecodedHeader {
    pub header: SqdHeader,
    pub sensitivity: Vec<SensitivityEntry>,
    pub amplifier: AmplifierSettings,
    pub acquisition: AcquisitionParameters,
    pub patient: PatientRecord,
}

/// Таблица записей о пациенте (поля @32..@48).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientTable {
    pub offset: u64,
    pub record_size: u32,
    pub max_record_count: u32,
    pub record_count: u32,
}

/// Декодер заголовка поверх позиционного источника.
pub struct HeaderDecoder<'a, S: ReadAt + ?Sized> {
    source: &'a S,
}

impl<'a, S: ReadAt + ?Sized> HeaderDecoder<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Полное декодирование в обязательном порядке секций.
    pub fn decode(&self) -> SqdResult<DecodedHeader> {
        let header = self.basic_info()?;
        let sensitivity = self.sensitivity(header.channel_count)?;
        let amplifier = self.amplifier()?;
        let acquisition = self.acquisition()?;
        let patient = self.patient()?;

        Ok(DecodedHeader {
            header,
            sensitivity,
            amplifier,
            acquisition,
            patient,
        })
    }

    pub fn basic_info(&self) -> SqdResult<SqdHeader> {
        let offset = self.pointer(BASIC_INFO_POINTER, "basic_info_offset")?;
        let mut cur = BinaryCursor::at(self.source, offset);

        let version = cur.read_i32()?;
        let revision = cur.read_i32()?;
        let system_id = cur.read_i32()?;
        let system_name = cur.read_text(NAME_FIELD_LEN)?;
        let model_name = cur.read_text(NAME_FIELD_LEN)?;
        let raw_channels = cur.read_i32()?;
        let comment = cur.read_text(COMMENT_FIELD_LEN)?;

        let channel_count = match usize::try_from(raw_channels) {
            Ok(n) if n > 0 => n,
            _ => {
                return Err(SqdError::format_violation(format!(
                    "channel_count must be positive, found {raw_channels}"
                )))
            }
        };

        debug!(
            "basic info @{offset}: V{version}R{revision:03}, system {system_id}, {channel_count} channels"
        );

        Ok(SqdHeader {
            version,
            revision,
            system_id,
            system_name,
            model_name,
            channel_count,
            comment,
        })
    }

    /// `channel_count` пар f64 (scale, gain).
    pub fn sensitivity(
        &self,
        channel_count: usize,
    ) -> SqdResult<Vec<SensitivityEntry>> {
        let offset = self.pointer(SENSITIVITY_POINTER, "sensitivity_offset")?;
        let count = channel_count.checked_mul(2).ok_or_else(|| {
            SqdError::format_violation(format!("channel_count {channel_count} overflows"))
        })?;

        let values = BinaryCursor::at(self.source, offset).read_f64_array(count)?;
        debug!("sensitivity @{offset}: {channel_count} entries");

        Ok(values
            .chunks_exact(2)
            .map(|pair| SensitivityEntry::new(pair[0], pair[1]))
            .collect())
    }

    pub fn amplifier(&self) -> SqdResult<AmplifierSettings> {
        let offset = self.pointer(AMPLIFIER_POINTER, "amplifier_offset")?;
        let amp_data = BinaryCursor::at(self.source, offset).read_i32()? as u32;

        let settings = GainResolver::settings(amp_data)?;
        debug!(
            "amplifier @{offset}: amp_data={amp_data:#010x}, input x{}, output x{}",
            settings.input_gain, settings.output_gain
        );

        Ok(settings)
    }

    pub fn acquisition(&self) -> SqdResult<AcquisitionParameters> {
        let offset = self.pointer(ACQUISITION_POINTER, "acquisition_offset")?;
        let mut cur = BinaryCursor::at(self.source, offset);

        let acq_type = AcqType::from_i32(cur.read_long()?)?;
        let sample_rate = cur.read_f64()?;

        let params = match acq_type {
            AcqType::ContinuousRaw => {
                let sample_count = count_from_i32("sample_count", cur.read_long()?)?;
                let actual_sample_count =
                    count_from_i32("actual_sample_count", cur.read_long()?)?;

                AcquisitionParameters::ContinuousRaw(ContinuousRaw {
                    sample_rate,
                    sample_count,
                    actual_sample_count,
                    raw_data_offset: self.pointer(RAW_DATA_POINTER, "raw_data_offset")?,
                })
            }
            AcqType::EvokedAverage => AcquisitionParameters::EvokedAverage {
                frames: read_evoked_frames(&mut cur, sample_rate)?,
                average_data_offset: self.pointer(AVERAGE_DATA_POINTER, "average_data_offset")?,
            },
            AcqType::EvokedRaw => AcquisitionParameters::EvokedRaw {
                frames: read_evoked_frames(&mut cur, sample_rate)?,
                raw_data_offset: self.pointer(RAW_DATA_POINTER, "raw_data_offset")?,
            },
        };

        debug!(
            "acquisition @{offset}: {} at {sample_rate} Hz",
            acq_type.description()
        );

        Ok(params)
    }

    pub fn patient_table(&self) -> SqdResult<PatientTable> {
        let mut cur = BinaryCursor::at(self.source, PATIENT_POINTER);

        Ok(PatientTable {
            offset: offset_from_i32("patient_offset", cur.read_long()?)?,
            record_size: count_from_i32("patient_record_size", cur.read_long()?)?,
            max_record_count: count_from_i32("patient_max_record_count", cur.read_long()?)?,
            record_count: count_from_i32("patient_record_count", cur.read_long()?)?,
        })
    }

    /// Обходит цепочку записей `(info_size, code, subcode, payload)`.
    pub fn patient(&self) -> SqdResult<PatientRecord> {
        let table = self.patient_table()?;
        let end = table.offset + table.record_size as u64 * table.record_count as u64;

        let mut record = PatientRecord::default();
        let mut current = table.offset;

        while current < end {
            let mut cur = BinaryCursor::at(self.source, current);

            if cur.remaining() < PATIENT_RECORD_HEADER_SIZE as u64 {
                return Err(SqdError::corrupt_patient(
                    current,
                    "record header runs past end of file",
                ));
            }

            let info_size = cur.read_long()?;
            let code = cur.read_long()?;
            let subcode = cur.read_long()?;

            if info_size <= PATIENT_RECORD_HEADER_SIZE as i32 {
                return Err(SqdError::corrupt_patient(
                    current,
                    format!("info_size {info_size} is not larger than the record header"),
                ));
            }

            let payload_len = info_size as usize - PATIENT_RECORD_HEADER_SIZE;
            if cur.remaining() < payload_len as u64 {
                return Err(SqdError::corrupt_patient(
                    current,
                    format!(
                        "payload of {payload_len} bytes overruns file ({} left)",
                        cur.remaining()
                    ),
                ));
            }

            let value = c_string(&cur.read_bytes(payload_len)?);

            match PatientField::from_codes(code, subcode) {
                Some(field) => record.set(field, value),
                None => trace!("skipping patient record @{current}: code={code}, subcode={subcode}"),
            }

            current += info_size as u64;
        }

        debug!(
            "patient @{}: {} of {} records",
            table.offset, table.record_count, table.max_record_count
        );

        Ok(record)
    }

    fn pointer(
        &self,
        at: u64,
        field: &str,
    ) -> SqdResult<u64> {
        let value = BinaryCursor::at(self.source, at).read_i32()?;
        offset_from_i32(field, value)
    }
}

fn read_evoked_frames<S: ReadAt + ?Sized>(
    cur: &mut BinaryCursor<'_, S>,
    sample_rate: f64,
) -> SqdResult<EvokedFrames> {
    Ok(EvokedFrames {
        sample_rate,
        frame_length: count_from_i32("frame_length", cur.read_long()?)?,
        pretrigger_length: count_from_i32("pretrigger_length", cur.read_long()?)?,
        average_count: count_from_i32("average_count", cur.read_long()?)?,
        actual_average_count: count_from_i32("actual_average_count", cur.read_long()?)?,
    })
}
