//! Container packaging
//!
//! Packs the serialized streams into the ODS zip container. The
//! `mimetype` entry comes first and is stored uncompressed so readers can
//! sniff the media type; everything else deflates. The finished artifact
//! is held in memory and written to disk through a temp file + rename, so
//! an interrupted build never leaves a partial file behind.

use std::io::{Cursor, Write};
use std::path::Path;

use log::debug;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use crate::assembler::StagedDocument;
use crate::error::BuildResult;

/// Media type of an OpenDocument spreadsheet
pub const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

/// Media type of an embedded chart sub-document
const CHART_MIMETYPE: &str = "application/vnd.oasis.opendocument.chart";

/// One finished, immutable build artifact
///
/// Holds the complete container bytes; nothing exists on disk until
/// [`OdsArtifact::write_to`] succeeds.
#[derive(Debug)]
pub struct OdsArtifact {
    bytes: Vec<u8>,
}

impl OdsArtifact {
    /// The raw container bytes
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the container in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if the artifact holds no bytes (never the case for a
    /// successful build)
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the artifact to a path atomically
    ///
    /// The bytes land in a temp file next to the target and are renamed
    /// into place, so a crash mid-write cannot leave a truncated
    /// spreadsheet at the requested path.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> BuildResult<()> {
        let path = path.as_ref();
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());

        let mut file = match dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
            None => tempfile::NamedTempFile::new_in(".")?,
        };
        file.write_all(&self.bytes)?;
        file.persist(path).map_err(|e| e.error)?;

        debug!("wrote artifact: {} ({} bytes)", path.display(), self.bytes.len());
        Ok(())
    }
}

/// Package the serialized streams into the final container
pub(crate) fn package(
    staged: &StagedDocument,
    content: String,
    styles: String,
    meta: String,
    settings: String,
) -> BuildResult<OdsArtifact> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));

    // mimetype first, stored, so byte 38 of the file starts the media type
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    zip.start_file("mimetype", stored)?;
    zip.write_all(MIMETYPE.as_bytes())?;

    let deflated = SimpleFileOptions::default();

    zip.start_file("META-INF/manifest.xml", deflated)?;
    zip.write_all(manifest_xml(staged).as_bytes())?;

    for (name, body) in [
        ("content.xml", &content),
        ("styles.xml", &styles),
        ("meta.xml", &meta),
        ("settings.xml", &settings),
    ] {
        debug!("packaging {} ({} bytes)", name, body.len());
        zip.start_file(name, deflated)?;
        zip.write_all(body.as_bytes())?;
    }

    for chart in &staged.charts {
        zip.start_file(format!("{}/content.xml", chart.object_name), deflated)?;
        zip.write_all(chart.xml.as_bytes())?;
    }

    let cursor = zip.finish()?;
    Ok(OdsArtifact {
        bytes: cursor.into_inner(),
    })
}

fn manifest_xml(staged: &StagedDocument) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<manifest:manifest \
         xmlns:manifest=\"urn:oasis:names:tc:opendocument:xmlns:manifest:1.0\" \
         manifest:version=\"1.2\">\n",
    );
    out.push_str(&format!(
        " <manifest:file-entry manifest:full-path=\"/\" manifest:version=\"1.2\" manifest:media-type=\"{}\"/>\n",
        MIMETYPE
    ));

    for name in ["content.xml", "styles.xml", "meta.xml", "settings.xml"] {
        out.push_str(&format!(
            " <manifest:file-entry manifest:full-path=\"{}\" manifest:media-type=\"text/xml\"/>\n",
            name
        ));
    }

    for chart in &staged.charts {
        out.push_str(&format!(
            " <manifest:file-entry manifest:full-path=\"{}/\" manifest:media-type=\"{}\"/>\n",
            chart.object_name, CHART_MIMETYPE
        ));
        out.push_str(&format!(
            " <manifest:file-entry manifest:full-path=\"{}/content.xml\" manifest:media-type=\"text/xml\"/>\n",
            chart.object_name
        ));
    }

    out.push_str("</manifest:manifest>\n");
    out
}
