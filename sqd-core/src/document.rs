use std::{fmt, path::Path};

use log::info;

use crate::{
    binary::{FileSource, ReadAt},
    config::ExtractConfig,
    conversion::ConversionFactorComputer,
    error::{SqdError, SqdResult},
    extract::ChannelSampleExtractor,
    header::{DecodedHeader, HeaderDecoder},
    types::{
        AcquisitionParameters, AmplifierSettings, ChannelSamples, PatientRecord, SensitivityEntry,
        SqdHeader,
    },
};

/// Открытая `.sqd` запись: декодированный заголовок + источник отсчётов.
///
/// Заголовок декодируется целиком при создании; документ, у которого хоть
/// одна секция не разобралась, не создаётся. Источник принадлежит документу
/// и освобождается вместе с ним.
pub struct SqdDocument<S: ReadAt = FileSource> {
    source: S,
    decoded: DecodedHeader,
    conversion_factors: Vec<f64>,
    config: ExtractConfig,
}

impl SqdDocument<FileSource> {
    /// Открывает файл с настройками по умолчанию.
    pub fn open<P: AsRef<Path>>(path: P) -> SqdResult<Self> {
        Self::open_with_config(path, ExtractConfig::default())
    }

    pub fn open_with_config<P: AsRef<Path>>(
        path: P,
        config: ExtractConfig,
    ) -> SqdResult<Self> {
        let path = path.as_ref();
        let source = FileSource::open(path)?;
        let doc = Self::from_source(source, config)?;

        info!(
            "opened {:?}: {} channels, {}",
            path,
            doc.decoded.header.channel_count,
            doc.decoded.acquisition.acq_type().description()
        );

        Ok(doc)
    }
}

impl<S: ReadAt> SqdDocument<S> {
    /// Декодирует заголовок из произвольного позиционного источника.
    pub fn from_source(
        source: S,
        config: ExtractConfig,
    ) -> SqdResult<Self> {
        let decoded = HeaderDecoder::new(&source).decode()?;
        let conversion_factors = ConversionFactorComputer::compute(
            &decoded.sensitivity,
            decoded.amplifier.input_gain,
            decoded.amplifier.output_gain,
        )?;

        Ok(Self {
            source,
            decoded,
            conversion_factors,
            config,
        })
    }

    pub fn header(&self) -> &SqdHeader {
        &self.decoded.header
    }

    pub fn amplifier(&self) -> &AmplifierSettings {
        &self.decoded.amplifier
    }

    pub fn acquisition(&self) -> &AcquisitionParameters {
        &self.decoded.acquisition
    }

    pub fn patient(&self) -> &PatientRecord {
        &self.decoded.patient
    }

    pub fn sensitivity(&self) -> &[SensitivityEntry] {
        &self.decoded.sensitivity
    }

    /// Коэффициенты пересчёта, по одному на канал.
    pub fn conversion_factors(&self) -> &[f64] {
        &self.conversion_factors
    }

    pub fn channel_count(&self) -> usize {
        self.decoded.header.channel_count
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Экстрактор для области сырых отсчётов этой записи.
    pub fn extractor(&self) -> SqdResult<ChannelSampleExtractor> {
        let acquisition = &self.decoded.acquisition;
        let region = acquisition
            .raw_data()
            .ok_or(SqdError::UnsupportedExtractionMode(acquisition.acq_type()))?;
        let channels = self.channel_count();

        Ok(ChannelSampleExtractor::new(
            region,
            channels,
            self.config.block_frames(acquisition.sample_rate(), channels),
        ))
    }

    /// Отсчёты канала `index`: сырые или умноженные на коэффициент канала.
    pub fn extract_channel(
        &self,
        index: usize,
        apply_conversion: bool,
    ) -> SqdResult<ChannelSamples> {
        if apply_conversion {
            self.extract_channel_scaled(index).map(ChannelSamples::Scaled)
        } else {
            self.extract_channel_raw(index).map(ChannelSamples::Raw)
        }
    }

    pub fn extract_channel_raw(
        &self,
        index: usize,
    ) -> SqdResult<Vec<i16>> {
        self.extractor()?.extract(&self.source, index)
    }

    pub fn extract_channel_scaled(
        &self,
        index: usize,
    ) -> SqdResult<Vec<f64>> {
        let raw = self.extract_channel_raw(index)?;
        let factor = self.conversion_factors[index];

        Ok(raw.into_iter().map(|s| f64::from(s) * factor).collect())
    }

    /// Закрывает документ и возвращает источник.
    pub fn close(self) -> S {
        self.source
    }
}

impl<S: ReadAt> fmt::Display for SqdDocument<S> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let h = &self.decoded.header;
        let amp = &self.decoded.amplifier;

        writeln!(f, "Basic Information")?;
        writeln!(f, "\tMEG160 version: {}", h.version_label())?;
        writeln!(f, "\tSystem ID:      {}", h.system_id)?;
        writeln!(f, "\tSystem Name:    {}", h.system_name)?;
        writeln!(f, "\tModel:          {}", h.model_name)?;
        writeln!(f, "\tChannel count:  {}", h.channel_count)?;
        writeln!(f, "\tComment:        {}", h.comment)?;
        writeln!(f, "Amplifier information")?;
        writeln!(f, "\tInput gain:      x{}", amp.input_gain)?;
        writeln!(f, "\tOutput gain:     x{}", amp.output_gain)?;
        writeln!(f, "Acquisition information")?;

        let acquisition = &self.decoded.acquisition;
        writeln!(f, "\t{}", acquisition.acq_type().description())?;

        match acquisition {
            AcquisitionParameters::ContinuousRaw(c) => {
                writeln!(f, "\tSampling Rate:       {} Hz", c.sample_rate)?;
                writeln!(f, "\tSample Count:        {} samples", c.sample_count)?;
                writeln!(f, "\tActual Sample Count: {} samples", c.actual_sample_count)?;
                write!(f, "\tData Offset:         {} bytes", c.raw_data_offset)
            }
            AcquisitionParameters::EvokedAverage { frames, .. }
            | AcquisitionParameters::EvokedRaw { frames, .. } => {
                writeln!(f, "\tSampling Rate:        {} Hz", frames.sample_rate)?;
                writeln!(f, "\tFrame Length:         {} samples", frames.frame_length)?;
                writeln!(f, "\tPretrigger Length:    {} samples", frames.pretrigger_length)?;
                writeln!(f, "\tAverage Count:        {}", frames.average_count)?;
                write!(f, "\tActual Average Count: {}", frames.actual_average_count)
            }
        }
    }
}
