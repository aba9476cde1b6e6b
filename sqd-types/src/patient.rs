/// Известные поля записи о пациенте (`code` при `subcode == 1`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PatientField {
    Id = 1,
    Name = 2,
    Birthdate = 3,
    Gender = 4,
    Handedness = 5,
}

/// Сведения о пациенте. Поля без записи в файле остаются `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatientRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub handedness: Option<String>,
}

impl PatientField {
    /// Поле для пары `(code, subcode)`; неизвестные пары дают `None`.
    pub fn from_codes(
        code: i32,
        subcode: i32,
    ) -> Option<Self> {
        if subcode != 1 {
            return None;
        }

        match code {
            1 => Some(PatientField::Id),
            2 => Some(PatientField::Name),
            3 => Some(PatientField::Birthdate),
            4 => Some(PatientField::Gender),
            5 => Some(PatientField::Handedness),
            _ => None,
        }
    }
}

impl PatientRecord {
    /// Записывает значение поля; повторная запись заменяет предыдущую.
    pub fn set(
        &mut self,
        field: PatientField,
        value: String,
    ) {
        let slot = match field {
            PatientField::Id => &mut self.id,
            PatientField::Name => &mut self.name,
            PatientField::Birthdate => &mut self.birthdate,
            PatientField::Gender => &mut self.gender,
            PatientField::Handedness => &mut self.handedness,
        };
        *slot = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        *self == PatientRecord::default()
    }
}
