//! The zip container of a DOCX file.

use std::io::{Cursor, Read, Write};

use tracing::trace;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::DocxError;

/// Path of the main document part.
pub const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Clone)]
struct Part {
    name: String,
    data: Vec<u8>,
}

/// All parts of a package, in archive order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Package {
    parts: Vec<Part>,
}

impl Package {
    pub(crate) fn read(bytes: &[u8]) -> Result<Self, DocxError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)?;
            trace!(part = file.name(), bytes = data.len(), "read package part");
            parts.push(Part {
                name: file.name().to_string(),
                data,
            });
        }
        Ok(Self { parts })
    }

    pub(crate) fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    /// Replace the data of part `name`, adding the part if it is missing.
    pub(crate) fn set_part(&mut self, name: &str, data: Vec<u8>) {
        match self.parts.iter_mut().find(|p| p.name == name) {
            Some(part) => part.data = data,
            None => self.parts.push(Part {
                name: name.to_string(),
                data,
            }),
        }
    }

    /// Write every part into a new deflated archive.
    pub(crate) fn write(&self) -> Result<Vec<u8>, DocxError> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for part in &self.parts {
            zip.start_file(part.name.as_str(), options)?;
            zip.write_all(&part.data)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archive(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut package = Package::default();
        for (name, data) in entries {
            package.set_part(name, data.as_bytes().to_vec());
        }
        package.write().unwrap()
    }

    #[test]
    fn parts_survive_rewrite_in_order() {
        let bytes = archive(&[
            ("[Content_Types].xml", "<Types/>"),
            (DOCUMENT_PART, "<w:document/>"),
        ]);
        let mut package = Package::read(&bytes).unwrap();
        package.set_part(DOCUMENT_PART, b"<w:document><w:body/></w:document>".to_vec());
        let again = Package::read(&package.write().unwrap()).unwrap();
        let names: Vec<&str> = again.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["[Content_Types].xml", DOCUMENT_PART]);
        assert_eq!(
            again.part(DOCUMENT_PART).unwrap(),
            b"<w:document><w:body/></w:document>"
        );
        assert!(again.part("word/styles.xml").is_none());
    }

    #[test]
    fn garbage_is_a_zip_error() {
        assert!(matches!(
            Package::read(b"not a zip file"),
            Err(DocxError::Zip(_))
        ));
    }
}
