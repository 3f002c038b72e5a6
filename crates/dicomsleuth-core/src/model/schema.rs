/// Declarative tag schema: the ordered list of fields to extract.
///
/// Field names are resolved against the standard DICOM data dictionary once,
/// up front, so the per-file hot path only deals with numeric `Tag`s.
use crate::error::SchemaError;
use dicom::core::dictionary::DataDictionary;
use dicom::core::Tag;
use dicom::dictionary_std::{tags, StandardDataDictionary};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Placeholder rendered for any requested field absent from a file.
pub const DEFAULT_SENTINEL: &str = "*NO_TAG*";

/// How an element's value should be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// String value(s), trimmed of space and NUL padding.
    #[default]
    Text,
    /// Signed integer (IS, US, SS, UL, SL ...).
    Integer,
    /// Floating point, single or multi-valued (DS, FL, FD ...).
    Decimal,
}

/// Unresolved field as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// DICOM keyword (`PatientID`) or tag expression (`0010,0020`).
    pub name: String,
    #[serde(default)]
    pub kind: FieldKind,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// The fields read by default: patient identity, study/series identifiers,
/// and a handful of acquisition parameters.
pub const DEFAULT_FIELDS: [(&str, Tag, FieldKind); 16] = [
    ("PatientID", tags::PATIENT_ID, FieldKind::Text),
    ("PatientName", tags::PATIENT_NAME, FieldKind::Text),
    ("PatientBirthDate", tags::PATIENT_BIRTH_DATE, FieldKind::Text),
    ("PatientSex", tags::PATIENT_SEX, FieldKind::Text),
    ("StudyInstanceUID", tags::STUDY_INSTANCE_UID, FieldKind::Text),
    ("StudyDescription", tags::STUDY_DESCRIPTION, FieldKind::Text),
    ("StudyDate", tags::STUDY_DATE, FieldKind::Text),
    ("SeriesInstanceUID", tags::SERIES_INSTANCE_UID, FieldKind::Text),
    ("SeriesDescription", tags::SERIES_DESCRIPTION, FieldKind::Text),
    ("SOPInstanceUID", tags::SOP_INSTANCE_UID, FieldKind::Text),
    ("Modality", tags::MODALITY, FieldKind::Text),
    ("XRayTubeCurrent", tags::X_RAY_TUBE_CURRENT, FieldKind::Integer),
    ("KVP", tags::KVP, FieldKind::Decimal),
    ("InstanceNumber", tags::INSTANCE_NUMBER, FieldKind::Integer),
    ("NumberOfFrames", tags::NUMBER_OF_FRAMES, FieldKind::Integer),
    ("ImagePositionPatient", tags::IMAGE_POSITION_PATIENT, FieldKind::Decimal),
];

/// Default field specs, in extraction order.
pub fn default_field_specs() -> Vec<FieldSpec> {
    DEFAULT_FIELDS
        .iter()
        .map(|&(name, _, kind)| FieldSpec::new(name, kind))
        .collect()
}

/// A field resolved to its numeric tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub tag: Tag,
    pub kind: FieldKind,
}

/// Resolved, validated schema shared read-only by every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSchema {
    fields: Vec<SchemaField>,
    sentinel: String,
}

impl Default for TagSchema {
    fn default() -> Self {
        let fields = DEFAULT_FIELDS
            .iter()
            .map(|&(name, tag, kind)| SchemaField {
                name: name.to_string(),
                tag,
                kind,
            })
            .collect();
        Self {
            fields,
            sentinel: DEFAULT_SENTINEL.to_string(),
        }
    }
}

impl TagSchema {
    /// Resolve field specs against the standard dictionary.
    ///
    /// Fails on an empty list, an unknown name, or two specs that name the
    /// same field (by keyword or by tag).
    pub fn resolve(specs: &[FieldSpec], sentinel: &str) -> Result<Self, SchemaError> {
        if specs.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen_tags: HashSet<Tag> = HashSet::with_capacity(specs.len());
        let mut fields = Vec::with_capacity(specs.len());
        for spec in specs {
            let name = spec.name.trim();
            let tag = StandardDataDictionary
                .parse_tag(name)
                .ok_or_else(|| SchemaError::UnknownField(name.to_string()))?;
            if !seen_tags.insert(tag) {
                return Err(SchemaError::DuplicateField(name.to_string()));
            }
            fields.push(SchemaField {
                name: name.to_string(),
                tag,
                kind: spec.kind,
            });
        }

        Ok(Self {
            fields,
            sentinel: sentinel.to_string(),
        })
    }

    #[inline]
    pub fn fields(&self) -> &[SchemaField] {
        &self.fields
    }

    #[inline]
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Field names in schema order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Same fields, different sentinel.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }
}
