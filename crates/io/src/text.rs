// Text file reading with encoding fallback

use std::io::Read;
use std::path::Path;

use crate::error::IoError;

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
/// A leading byte order mark is dropped.
pub fn read_file_as_utf8(path: &Path) -> Result<String, IoError> {
    let read_err = |source| IoError::Read { path: path.to_path_buf(), source };

    let mut file = std::fs::File::open(path).map_err(read_err)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes).map_err(read_err)?;

    Ok(decode(bytes))
}

/// Decode bytes as UTF-8, falling back to Windows-1252.
pub fn decode(bytes: Vec<u8>) -> String {
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            log::debug!("input is not UTF-8, decoding as Windows-1252");
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}
