/// Tag extractor: opens one file and decodes the schema's fields.
///
/// Only the header and the elements preceding PixelData are parsed, so the
/// cost per file is bounded by the metadata size rather than the image size.
///
/// # Failure classification
///
/// Every failure is mapped to an [`ExtractError`] variant instead of being
/// swallowed:
///
/// - open/read denied by the OS → `Permission`
/// - other I/O failures → `Io`
/// - no `DICM` magic, truncated header, malformed data set → `Format`
/// - a panic inside the decoder → `Other`
pub mod value;

use crate::error::ExtractError;
use crate::model::{TagRecord, TagSchema};
use dicom::dictionary_std::tags;
use dicom::object::{DefaultDicomObject, OpenFileOptions};
use std::fs::File;
use std::io::{self, Read};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::debug;

pub use value::decode_element;

/// Preamble length plus the `DICM` magic code.
const HEADER_LEN: u64 = 132;
const MAGIC: &[u8; 4] = b"DICM";

/// Extract the schema's fields from the file at `path`.
///
/// Returns a record containing every schema field on success. Missing or
/// unconvertible elements are [`crate::model::TagValue::Absent`].
pub fn extract_file(path: &Path, schema: &TagSchema) -> Result<TagRecord, ExtractError> {
    let result = panic::catch_unwind(AssertUnwindSafe(|| -> Result<TagRecord, ExtractError> {
        check_magic(path)?;
        let object = open_partial(path)?;
        Ok(read_fields(path, &object, schema))
    }));

    match result {
        Ok(outcome) => {
            if let Err(err) = &outcome {
                debug!("Skipping {} ({}): {err}", path.display(), err.kind().label());
            }
            outcome
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            debug!("Decoder panicked on {}: {message}", path.display());
            Err(ExtractError::Other {
                path: path.to_path_buf(),
                message: format!("decoder panicked: {message}"),
            })
        }
    }
}

/// Reject files that do not carry the `DICM` magic code, either after the
/// 128-byte preamble or at offset 0 for preamble-less files.
/// Open-time I/O failures are classified here, before the decoder runs.
fn check_magic(path: &Path) -> Result<(), ExtractError> {
    let file = File::open(path).map_err(|e| ExtractError::from_io(path, e))?;
    let mut head = Vec::with_capacity(HEADER_LEN as usize);
    file.take(HEADER_LEN)
        .read_to_end(&mut head)
        .map_err(|e| ExtractError::from_io(path, e))?;

    let at_start = head.starts_with(MAGIC);
    let after_preamble = head.get(128..132) == Some(&MAGIC[..]);
    if at_start || after_preamble {
        Ok(())
    } else {
        Err(ExtractError::Format {
            path: path.to_path_buf(),
            reason: if head.len() < HEADER_LEN as usize {
                format!("file too short ({} bytes) for a DICOM header", head.len())
            } else {
                "missing DICM magic code".to_string()
            },
        })
    }
}

/// Parse the file meta group and data set up to (not including) PixelData.
fn open_partial(path: &Path) -> Result<DefaultDicomObject, ExtractError> {
    OpenFileOptions::new()
        .read_until(tags::PIXEL_DATA)
        .open_file(path)
        .map_err(|err| classify_read_error(path, &err))
}

/// Map a decoder error to a skip classification by inspecting its source chain.
///
/// An I/O error anywhere in the chain decides the kind, except EOF and
/// invalid-data errors, which are the decoder's way of reporting a truncated
/// or malformed file.
fn classify_read_error(path: &Path, err: &(dyn std::error::Error + 'static)) -> ExtractError {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = current {
        if let Some(io_err) = e.downcast_ref::<io::Error>() {
            match io_err.kind() {
                io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => break,
                kind => return ExtractError::from_io(path, io::Error::new(kind, io_err.to_string())),
            }
        }
        current = e.source();
    }
    ExtractError::Format {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
}

fn read_fields(path: &Path, object: &DefaultDicomObject, schema: &TagSchema) -> TagRecord {
    let mut record = TagRecord::new(path.to_path_buf());
    for field in schema.fields() {
        let value = match object.element(field.tag) {
            Ok(element) => decode_element(element, field.kind),
            Err(_) => crate::model::TagValue::Absent,
        };
        record.insert(field.name.clone(), value);
    }
    record
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
