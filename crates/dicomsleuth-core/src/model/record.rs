/// Extracted per-file metadata.
///
/// One `TagRecord` is produced for every file that opens as a DICOM
/// container. Every field of the schema is present; fields the file does not
/// carry hold [`TagValue::Absent`] and render as the schema's sentinel.
use super::schema::TagSchema;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

/// A decoded element value.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    /// Multi-valued string element (value multiplicity > 1).
    Texts(Vec<String>),
    Integer(i64),
    Decimal(f64),
    /// Multi-valued numeric element, e.g. ImagePositionPatient.
    Decimals(Vec<f64>),
    /// The element is missing or could not be converted to the requested kind.
    Absent,
}

impl TagValue {
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Render for display, substituting `sentinel` for [`TagValue::Absent`].
    ///
    /// Multi-valued elements render as `[a, b, c]`.
    pub fn render(&self, sentinel: &str) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Texts(values) => format!("[{}]", values.join(", ")),
            Self::Integer(v) => v.to_string(),
            Self::Decimal(v) => v.to_string(),
            Self::Decimals(values) => {
                let mut out = String::from("[");
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    let _ = write!(out, "{v}");
                }
                out.push(']');
                out
            }
            Self::Absent => sentinel.to_string(),
        }
    }
}

/// The extracted field set of one file.
#[derive(Debug, Clone, PartialEq)]
pub struct TagRecord {
    pub path: PathBuf,
    pub values: BTreeMap<String, TagValue>,
}

impl TagRecord {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            values: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, value: TagValue) {
        self.values.insert(field.into(), value);
    }

    /// Value of `field`, or `None` if the field is not part of the schema.
    pub fn get(&self, field: &str) -> Option<&TagValue> {
        self.values.get(field)
    }

    /// Number of schema fields that were actually present in the file.
    pub fn present_count(&self) -> usize {
        self.values.values().filter(|v| !v.is_absent()).count()
    }

    /// Render as `path<TAB>Field=value<TAB>...` in schema order.
    pub fn to_line(&self, schema: &TagSchema) -> String {
        let mut line = self.path.to_string_lossy().into_owned();
        for name in schema.names() {
            let rendered = self
                .values
                .get(name)
                .map(|v| v.render(schema.sentinel()))
                .unwrap_or_else(|| schema.sentinel().to_string());
            let _ = write!(line, "\t{name}={rendered}");
        }
        line
    }
}
