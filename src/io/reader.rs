use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::domain::config::ConfigFile;
use crate::domain::document::{Document, json_type_name};
use crate::io::IoError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Fails with `MissingFile` unless `path` names a regular file.
pub fn locate_report(path: &Path) -> Result<(), IoError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(IoError::MissingFile {
            path: path.display().to_string(),
        })
    }
}

/// Opens a located report; failures here are read errors, not absence.
pub fn open_report(path: &Path) -> Result<File, IoError> {
    File::open(path).map_err(|source| IoError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Decodes one JSON object, accepting an optional UTF-8 byte-order mark.
pub fn read_document<R: Read>(mut reader: R) -> Result<Document, IoError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes);

    match serde_json::from_slice::<Value>(body)? {
        Value::Object(fields) => Ok(Document::new(fields)),
        other => Err(IoError::NotAnObject {
            found: json_type_name(&other),
        }),
    }
}

pub fn read_config(path: &Path) -> Result<ConfigFile, IoError> {
    let text = fs::read_to_string(path).map_err(|source| IoError::Read {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| IoError::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}
