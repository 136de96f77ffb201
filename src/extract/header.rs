//! PDF header validation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Version digits after the magic, e.g. "1.7"
const VERSION_LEN: usize = 3;

/// Read the PDF version from the start of `data`.
///
/// Returns [`Error::UnknownFormat`] when the data does not start with a
/// `%PDF-` header, and [`Error::UnsupportedVersion`] when the version is not
/// of the form `d.d`.
pub fn pdf_version(data: &[u8]) -> Result<String> {
    let Some(rest) = data.strip_prefix(PDF_MAGIC) else {
        return Err(Error::UnknownFormat);
    };
    let Some(version) = rest.get(..VERSION_LEN) else {
        return Err(Error::UnknownFormat);
    };

    match version {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(String::from_utf8_lossy(version).into_owned())
        }
        _ => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(version).into_owned(),
        )),
    }
}

/// Read the PDF version from a file's header.
pub fn pdf_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(PDF_MAGIC.len() + VERSION_LEN);
    File::open(path)?
        .take((PDF_MAGIC.len() + VERSION_LEN) as u64)
        .read_to_end(&mut header)?;
    pdf_version(&header)
}

/// Check if bytes start with a readable PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version(data).is_ok()
}
