use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Error for a sex value that is neither `MALE`, `FEMALE`, nor empty.
#[derive(Debug, Error)]
#[error("unrecognized sex value: {0}")]
pub struct SexParseError(String);

/// Sex of the registered child. Stored as `MALE` / `FEMALE` on the wire,
/// with the empty string standing for "not yet selected".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Sex {
    #[serde(rename = "MALE")]
    Male,
    #[serde(rename = "FEMALE")]
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "MALE",
            Sex::Female => "FEMALE",
        }
    }

    /// Parse the wire form. `Ok(None)` is the cleared state; unknown values
    /// are an error so the store can reject them.
    pub fn parse(raw: &str) -> Result<Option<Sex>, SexParseError> {
        match raw.trim().to_uppercase().as_str() {
            "" => Ok(None),
            "MALE" => Ok(Some(Sex::Male)),
            "FEMALE" => Ok(Some(Sex::Female)),
            _ => Err(SexParseError(raw.to_string())),
        }
    }
}

/// Identifier for every mutable field of the record. Wire names match the
/// camelCase keys of the persisted draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    LocalBody,
    Mandal,
    District,
    Name,
    Sex,
    Dob,
    PlaceOfBirth,
    MotherName,
    FatherName,
    BirthAddr1,
    BirthAddr2,
    BirthAddr3,
    BirthAddr4,
    PermanentAddr1,
    PermanentAddr2,
    PermanentAddr3,
    PermanentAddr4,
    RegNo,
    RegDate,
    Remarks,
}

impl FieldId {
    /// Maximum accepted character count for free-text fields. Dates and sex
    /// carry no limit; they are validated by parsing instead.
    pub fn limit(self) -> Option<usize> {
        match self {
            FieldId::LocalBody | FieldId::Mandal | FieldId::District => Some(40),
            FieldId::Name
            | FieldId::PlaceOfBirth
            | FieldId::MotherName
            | FieldId::FatherName
            | FieldId::Remarks => Some(60),
            FieldId::BirthAddr1
            | FieldId::BirthAddr2
            | FieldId::BirthAddr3
            | FieldId::BirthAddr4
            | FieldId::PermanentAddr1
            | FieldId::PermanentAddr2
            | FieldId::PermanentAddr3
            | FieldId::PermanentAddr4
            | FieldId::RegNo => Some(30),
            FieldId::Sex | FieldId::Dob | FieldId::RegDate => None,
        }
    }

    pub fn is_permanent_addr(self) -> bool {
        matches!(
            self,
            FieldId::PermanentAddr1
                | FieldId::PermanentAddr2
                | FieldId::PermanentAddr3
                | FieldId::PermanentAddr4
        )
    }

    /// The permanent-address counterpart of a birth-address field, if any.
    /// Drives the one-way mirror while "same address" is on.
    pub fn mirror_target(self) -> Option<FieldId> {
        match self {
            FieldId::BirthAddr1 => Some(FieldId::PermanentAddr1),
            FieldId::BirthAddr2 => Some(FieldId::PermanentAddr2),
            FieldId::BirthAddr3 => Some(FieldId::PermanentAddr3),
            FieldId::BirthAddr4 => Some(FieldId::PermanentAddr4),
            _ => None,
        }
    }
}

/// The certificate record. Serializes to the exact field→string mapping the
/// draft slot holds: camelCase keys, dates as `YYYY-MM-DD` or `""`, sex as
/// `MALE` / `FEMALE` / `""`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateRecord {
    pub local_body: String,
    pub mandal: String,
    pub district: String,
    pub name: String,
    #[serde(with = "sex_string")]
    #[schema(value_type = String)]
    pub sex: Option<Sex>,
    #[serde(with = "iso_date")]
    #[schema(value_type = String)]
    pub dob: Option<NaiveDate>,
    pub place_of_birth: String,
    pub mother_name: String,
    pub father_name: String,
    pub birth_addr1: String,
    pub birth_addr2: String,
    pub birth_addr3: String,
    pub birth_addr4: String,
    pub permanent_addr1: String,
    pub permanent_addr2: String,
    pub permanent_addr3: String,
    pub permanent_addr4: String,
    pub reg_no: String,
    #[serde(with = "iso_date")]
    #[schema(value_type = String)]
    pub reg_date: Option<NaiveDate>,
    pub remarks: String,
}

impl CertificateRecord {
    /// Mutable access to a free-text field. `None` for sex and the dates,
    /// which are not plain strings.
    pub fn text_field_mut(&mut self, field: FieldId) -> Option<&mut String> {
        match field {
            FieldId::LocalBody => Some(&mut self.local_body),
            FieldId::Mandal => Some(&mut self.mandal),
            FieldId::District => Some(&mut self.district),
            FieldId::Name => Some(&mut self.name),
            FieldId::PlaceOfBirth => Some(&mut self.place_of_birth),
            FieldId::MotherName => Some(&mut self.mother_name),
            FieldId::FatherName => Some(&mut self.father_name),
            FieldId::BirthAddr1 => Some(&mut self.birth_addr1),
            FieldId::BirthAddr2 => Some(&mut self.birth_addr2),
            FieldId::BirthAddr3 => Some(&mut self.birth_addr3),
            FieldId::BirthAddr4 => Some(&mut self.birth_addr4),
            FieldId::PermanentAddr1 => Some(&mut self.permanent_addr1),
            FieldId::PermanentAddr2 => Some(&mut self.permanent_addr2),
            FieldId::PermanentAddr3 => Some(&mut self.permanent_addr3),
            FieldId::PermanentAddr4 => Some(&mut self.permanent_addr4),
            FieldId::RegNo => Some(&mut self.reg_no),
            FieldId::Remarks => Some(&mut self.remarks),
            FieldId::Sex | FieldId::Dob | FieldId::RegDate => None,
        }
    }
}

/// Dates serialize as `YYYY-MM-DD`, with the empty string for "unset" so the
/// draft stays a pure field→string mapping.
mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&raw, FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}

/// Sex serializes as `MALE` / `FEMALE`, empty string for "unset".
mod sex_string {
    use super::Sex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<Sex>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.map(|s| s.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Sex>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Sex::parse(&raw).map_err(serde::de::Error::custom)
    }
}
