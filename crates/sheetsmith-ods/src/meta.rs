//! meta.xml and settings.xml emission

use crate::assembler::StagedSheet;
use crate::xml::{esc, push_attr};
use sheetsmith_core::document::DocumentMeta;

/// Generator string stamped into the meta stream
const GENERATOR: &str = concat!("sheetsmith/", env!("CARGO_PKG_VERSION"));

/// Build the meta.xml stream
pub(crate) fn meta_xml(meta: &DocumentMeta) -> String {
    let mut out = String::with_capacity(512);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<office:document-meta \
         xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
         xmlns:meta=\"urn:oasis:names:tc:opendocument:xmlns:meta:1.0\" \
         xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
         office:version=\"1.2\">\n <office:meta>\n",
    );

    out.push_str(&format!(
        "  <meta:generator>{}</meta:generator>\n",
        esc(GENERATOR)
    ));

    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    out.push_str(&format!(
        "  <meta:creation-date>{}</meta:creation-date>\n",
        now
    ));

    if let Some(title) = &meta.title {
        out.push_str(&format!("  <dc:title>{}</dc:title>\n", esc(title)));
    }
    if let Some(creator) = &meta.creator {
        out.push_str(&format!(
            "  <meta:initial-creator>{}</meta:initial-creator>\n",
            esc(creator)
        ));
        out.push_str(&format!("  <dc:creator>{}</dc:creator>\n", esc(creator)));
    }

    out.push_str(" </office:meta>\n</office:document-meta>\n");
    out
}

/// Build the settings.xml stream (freeze panes live here, as view settings)
pub(crate) fn settings_xml(sheets: &[StagedSheet]) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(
        "<office:document-settings \
         xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\" \
         xmlns:config=\"urn:oasis:names:tc:opendocument:xmlns:config:1.0\" \
         office:version=\"1.2\">\n <office:settings>\n",
    );
    out.push_str("  <config:config-item-set config:name=\"ooo:view-settings\">\n");
    out.push_str("   <config:config-item-map-indexed config:name=\"Views\">\n");
    out.push_str("    <config:config-item-map-entry>\n");
    out.push_str(
        "     <config:config-item config:name=\"ViewId\" config:type=\"string\">view1</config:config-item>\n",
    );
    out.push_str("     <config:config-item-map-named config:name=\"Tables\">\n");

    for sheet in sheets {
        let (freeze_cols, freeze_rows) = sheet.freeze;
        if freeze_cols == 0 && freeze_rows == 0 {
            continue;
        }

        let mut entry = String::new();
        entry.push_str("      <config:config-item-map-entry");
        push_attr(&mut entry, "config:name", &sheet.name);
        entry.push_str(">\n");
        if freeze_cols > 0 {
            entry.push_str(&format!(
                "       <config:config-item config:name=\"HorizontalSplitMode\" config:type=\"short\">2</config:config-item>\n\
                 \x20      <config:config-item config:name=\"HorizontalSplitPosition\" config:type=\"int\">{}</config:config-item>\n\
                 \x20      <config:config-item config:name=\"PositionRight\" config:type=\"int\">{}</config:config-item>\n",
                freeze_cols, freeze_cols
            ));
        }
        if freeze_rows > 0 {
            entry.push_str(&format!(
                "       <config:config-item config:name=\"VerticalSplitMode\" config:type=\"short\">2</config:config-item>\n\
                 \x20      <config:config-item config:name=\"VerticalSplitPosition\" config:type=\"int\">{}</config:config-item>\n\
                 \x20      <config:config-item config:name=\"PositionBottom\" config:type=\"int\">{}</config:config-item>\n",
                freeze_rows, freeze_rows
            ));
        }
        entry.push_str("      </config:config-item-map-entry>\n");
        out.push_str(&entry);
    }

    out.push_str("     </config:config-item-map-named>\n");
    out.push_str("    </config:config-item-map-entry>\n");
    out.push_str("   </config:config-item-map-indexed>\n");
    out.push_str("  </config:config-item-set>\n");
    out.push_str(" </office:settings>\n</office:document-settings>\n");
    out
}
