/// Отсчёты одного канала в порядке записи.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelSamples {
    /// Сырые 16-битные отсчёты АЦП
    Raw(Vec<i16>),
    /// Отсчёты, умноженные на коэффициент пересчёта канала
    Scaled(Vec<f64>),
}

impl ChannelSamples {
    pub fn len(&self) -> usize {
        match self {
            ChannelSamples::Raw(v) => v.len(),
            ChannelSamples::Scaled(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
