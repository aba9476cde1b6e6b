//! Синтетические `.sqd` образы для модульных тестов.

use byteorder::{LittleEndian, WriteBytesExt};

use crate::{
    format::{
        ACQUISITION_POINTER, AMPLIFIER_POINTER, AVERAGE_DATA_POINTER, BASIC_INFO_POINTER,
        COMMENT_FIELD_LEN, NAME_FIELD_LEN, PATIENT_POINTER, RAW_DATA_POINTER, SENSITIVITY_POINTER,
    },
    types::AcqType,
};

/// Длина полезной части одной записи о пациенте
const PATIENT_PAYLOAD_LEN: usize = 52;

/// Детерминированное значение отсчёта `k` канала `c`.
pub fn sample_value(
    k: usize,
    c: usize,
) -> i16 {
    ((k * 31 + c * 1009) % 4000) as i16 - 2000
}

/// Читает 4-байтовый указатель из таблицы смещений.
pub fn pointer(
    image: &[u8],
    at: u64,
) -> u64 {
    let at = at as usize;
    i32::from_le_bytes(image[at..at + 4].try_into().unwrap()) as u64
}

pub struct SqdImage {
    channels: usize,
    channel_count_field: Option<i32>,
    acq_type_field: i32,
    sample_rate: f64,
    sample_count: usize,
    frame_length: usize,
    average_count: usize,
    sensitivity: Option<Vec<(f64, f64)>>,
    amp_data: u32,
    patient: Vec<(i32, i32, String)>,
    info_size_override: Option<i32>,
    truncate: Option<usize>,
}

impl SqdImage {
    fn base(
        channels: usize,
        acq_type: AcqType,
    ) -> Self {
        Self {
            channels,
            channel_count_field: None,
            acq_type_field: acq_type.as_i32(),
            sample_rate: 1000.0,
            sample_count: 0,
            frame_length: 0,
            average_count: 0,
            sensitivity: None,
            amp_data: (1 << 11) | 2,
            patient: Vec::new(),
            info_size_override: None,
            truncate: None,
        }
    }

    pub fn continuous(
        channels: usize,
        samples: usize,
    ) -> Self {
        let mut image = Self::base(channels, AcqType::ContinuousRaw);
        image.sample_count = samples;
        image
    }

    pub fn evoked_raw(
        channels: usize,
        frame_length: usize,
        average_count: usize,
    ) -> Self {
        let mut image = Self::base(channels, AcqType::EvokedRaw);
        image.frame_length = frame_length;
        image.average_count = average_count;
        image.sample_count = frame_length * average_count;
        image
    }

    pub fn evoked_average(
        channels: usize,
        frame_length: usize,
        average_count: usize,
    ) -> Self {
        let mut image = Self::base(channels, AcqType::EvokedAverage);
        image.frame_length = frame_length;
        image.average_count = average_count;
        image
    }

    pub fn sample_rate(
        mut self,
        rate: f64,
    ) -> Self {
        self.sample_rate = rate;
        self
    }

    pub fn sensitivity(
        mut self,
        table: Vec<(f64, f64)>,
    ) -> Self {
        self.sensitivity = Some(table);
        self
    }

    pub fn amp_data(
        mut self,
        amp_data: u32,
    ) -> Self {
        self.amp_data = amp_data;
        self
    }

    pub fn patient(
        mut self,
        records: Vec<(i32, i32, &str)>,
    ) -> Self {
        self.patient = records
            .into_iter()
            .map(|(code, subcode, text)| (code, subcode, text.to_string()))
            .collect();
        self
    }

    pub fn channel_count_field(
        mut self,
        value: i32,
    ) -> Self {
        self.channel_count_field = Some(value);
        self
    }

    pub fn acq_type_field(
        mut self,
        value: i32,
    ) -> Self {
        self.acq_type_field = value;
        self
    }

    pub fn patient_info_size_override(
        mut self,
        value: i32,
    ) -> Self {
        self.info_size_override = Some(value);
        self
    }

    pub fn truncate(
        mut self,
        len: usize,
    ) -> Self {
        self.truncate = Some(len);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = vec![0u8; 256];

        // основная информация
        let basic_offset = buf.len();
        buf.write_i32::<LittleEndian>(1).unwrap();
        buf.write_i32::<LittleEndian>(3).unwrap();
        buf.write_i32::<LittleEndian>(77).unwrap();
        put_text(&mut buf, b"Test System\n", NAME_FIELD_LEN);
        put_text(&mut buf, b"MEG160", NAME_FIELD_LEN);
        let channel_field = self.channel_count_field.unwrap_or(self.channels as i32);
        buf.write_i32::<LittleEndian>(channel_field).unwrap();
        put_text(&mut buf, b"synthetic\nrecording\n", COMMENT_FIELD_LEN);

        // чувствительность
        let sensitivity_offset = buf.len();
        let table = self.sensitivity.clone().unwrap_or_else(|| {
            (0..self.channels)
                .map(|c| (1.0, (c + 1) as f64 * 1e-12))
                .collect()
        });
        for (scale, gain) in table {
            buf.write_f64::<LittleEndian>(scale).unwrap();
            buf.write_f64::<LittleEndian>(gain).unwrap();
        }

        // усилитель
        let amplifier_offset = buf.len();
        buf.write_u32::<LittleEndian>(self.amp_data).unwrap();

        // параметры сбора
        let acquisition_offset = buf.len();
        buf.write_i32::<LittleEndian>(self.acq_type_field).unwrap();
        buf.write_f64::<LittleEndian>(self.sample_rate).unwrap();
        if self.acq_type_field == AcqType::ContinuousRaw.as_i32() {
            buf.write_i32::<LittleEndian>(self.sample_count as i32 + 10).unwrap();
            buf.write_i32::<LittleEndian>(self.sample_count as i32).unwrap();
        } else {
            buf.write_i32::<LittleEndian>(self.frame_length as i32).unwrap();
            buf.write_i32::<LittleEndian>(self.frame_length as i32 / 5).unwrap();
            buf.write_i32::<LittleEndian>(self.average_count as i32 + 2).unwrap();
            buf.write_i32::<LittleEndian>(self.average_count as i32).unwrap();
        }

        // пациент
        let patient_offset = buf.len();
        let record_size = 12 + PATIENT_PAYLOAD_LEN;
        for (code, subcode, text) in &self.patient {
            let info_size = self.info_size_override.unwrap_or(record_size as i32);
            buf.write_i32::<LittleEndian>(info_size).unwrap();
            buf.write_i32::<LittleEndian>(*code).unwrap();
            buf.write_i32::<LittleEndian>(*subcode).unwrap();
            put_text(&mut buf, text.as_bytes(), PATIENT_PAYLOAD_LEN);
        }

        // сырые отсчёты, кадр за кадром
        let raw_offset = buf.len();
        if self.acq_type_field != AcqType::EvokedAverage.as_i32() {
            for k in 0..self.sample_count {
                for c in 0..self.channels {
                    buf.write_i16::<LittleEndian>(sample_value(k, c)).unwrap();
                }
            }
        }

        let patch = |buf: &mut Vec<u8>, at: u64, value: usize| {
            let at = at as usize;
            buf[at..at + 4].copy_from_slice(&(value as i32).to_le_bytes());
        };
        patch(&mut buf, BASIC_INFO_POINTER, basic_offset);
        patch(&mut buf, PATIENT_POINTER, patient_offset);
        patch(&mut buf, PATIENT_POINTER + 4, record_size);
        patch(&mut buf, PATIENT_POINTER + 8, self.patient.len() + 4);
        patch(&mut buf, PATIENT_POINTER + 12, self.patient.len());
        patch(&mut buf, SENSITIVITY_POINTER, sensitivity_offset);
        patch(&mut buf, AMPLIFIER_POINTER, amplifier_offset);
        patch(&mut buf, ACQUISITION_POINTER, acquisition_offset);
        patch(&mut buf, RAW_DATA_POINTER, raw_offset);
        patch(&mut buf, AVERAGE_DATA_POINTER, raw_offset);

        if let Some(len) = self.truncate {
            buf.truncate(len);
        }
        buf
    }
}

fn put_text(
    buf: &mut Vec<u8>,
    text: &[u8],
    width: usize,
) {
    let mut field = vec![0u8; width];
    field[..text.len()].copy_from_slice(text);
    buf.extend_from_slice(&field);
}
