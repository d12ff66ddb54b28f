//! content.xml and styles.xml emission
//!
//! Serializes the staged document into the two main markup streams of the
//! container. Everything here is string assembly over already-resolved
//! data; no model decisions are made at this point.

use crate::assembler::{
    StagedCell, StagedCfBody, StagedDocument, StagedSheet, StagedValidation, StagedValue,
};
use crate::styles::OdsStyleTable;
use crate::xml::{esc, push_attr};
use sheetsmith_core::StyleRegistry;

const CONTENT_NAMESPACES: &str = concat!(
    " xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\"",
    " xmlns:style=\"urn:oasis:names:tc:opendocument:xmlns:style:1.0\"",
    " xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\"",
    " xmlns:table=\"urn:oasis:names:tc:opendocument:xmlns:table:1.0\"",
    " xmlns:draw=\"urn:oasis:names:tc:opendocument:xmlns:drawing:1.0\"",
    " xmlns:fo=\"urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0\"",
    " xmlns:xlink=\"http://www.w3.org/1999/xlink\"",
    " xmlns:number=\"urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0\"",
    " xmlns:svg=\"urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0\"",
    " xmlns:of=\"urn:oasis:names:tc:opendocument:xmlns:of:1.2\"",
    " xmlns:calcext=\"urn:org:documentfoundation:names:experimental:calc:xmlns:calcext:1.0\"",
);

/// Build the content.xml stream
pub(crate) fn content_xml(
    staged: &StagedDocument,
    style_table: &OdsStyleTable,
    registry: &StyleRegistry,
) -> String {
    let mut out = String::with_capacity(16 * 1024);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<office:document-content");
    out.push_str(CONTENT_NAMESPACES);
    out.push_str(" office:version=\"1.2\">\n");

    out.push_str(" <office:automatic-styles>");
    out.push_str(&style_table.automatic_styles_xml(registry));
    out.push_str("\n </office:automatic-styles>\n");

    out.push_str(" <office:body>\n  <office:spreadsheet>");

    write_content_validations(&mut out, &staged.validations);

    for sheet in &staged.sheets {
        write_table(&mut out, sheet);
    }

    write_named_expressions(&mut out, staged);

    out.push_str("\n  </office:spreadsheet>\n </office:body>\n</office:document-content>\n");
    out
}

/// Build the styles.xml stream
pub(crate) fn styles_xml(style_table: &OdsStyleTable, registry: &StyleRegistry) -> String {
    let mut out = String::with_capacity(4 * 1024);

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<office:document-styles");
    out.push_str(CONTENT_NAMESPACES);
    out.push_str(" office:version=\"1.2\">\n");

    out.push_str(" <office:styles>");
    out.push_str(&style_table.office_styles_xml(registry));
    out.push_str("\n </office:styles>\n");

    // One page layout so tables can reference the Default master page
    out.push_str(
        " <office:automatic-styles>\
         <style:page-layout style:name=\"pm1\">\
         <style:page-layout-properties style:writing-mode=\"lr-tb\"/>\
         </style:page-layout>\
         </office:automatic-styles>\n",
    );
    out.push_str(
        " <office:master-styles>\
         <style:master-page style:name=\"Default\" style:page-layout-name=\"pm1\"/>\
         </office:master-styles>\n",
    );

    out.push_str("</office:document-styles>\n");
    out
}

fn write_content_validations(out: &mut String, validations: &[StagedValidation]) {
    if validations.is_empty() {
        return;
    }

    out.push_str("\n   <table:content-validations>");
    for validation in validations {
        out.push_str("\n    <table:content-validation");
        push_attr(out, "table:name", &validation.name);
        if let Some(condition) = &validation.condition {
            push_attr(out, "table:condition", condition);
        }
        push_attr(
            out,
            "table:allow-empty-cell",
            if validation.allow_empty { "true" } else { "false" },
        );
        push_attr(out, "table:base-cell-address", &validation.base_cell);
        out.push('>');

        if let Some((title, message)) = &validation.help {
            out.push_str("<table:help-message");
            if !title.is_empty() {
                push_attr(out, "table:title", title);
            }
            push_attr(out, "table:display", "true");
            out.push_str("><text:p>");
            out.push_str(&esc(message));
            out.push_str("</text:p></table:help-message>");
        }

        if let Some((title, message)) = &validation.error {
            out.push_str("<table:error-message");
            if !title.is_empty() {
                push_attr(out, "table:title", title);
            }
            push_attr(out, "table:display", "true");
            push_attr(out, "table:message-type", validation.severity);
            out.push_str("><text:p>");
            out.push_str(&esc(message));
            out.push_str("</text:p></table:error-message>");
        }

        out.push_str("</table:content-validation>");
    }
    out.push_str("\n   </table:content-validations>");
}

fn write_table(out: &mut String, sheet: &StagedSheet) {
    out.push_str("\n   <table:table");
    push_attr(out, "table:name", &sheet.name);
    push_attr(out, "table:style-name", "ta1");
    if sheet.protected {
        push_attr(out, "table:protected", "true");
    }
    if let Some(print_range) = &sheet.print_range {
        push_attr(out, "table:print-ranges", print_range);
    }
    out.push('>');

    write_shapes(out, sheet);

    // Column declarations; sheets with no declared columns still need one
    if sheet.columns.is_empty() {
        out.push_str("\n    <table:table-column/>");
    }
    for column in &sheet.columns {
        out.push_str("\n    <table:table-column");
        if let Some(style) = &column.style {
            push_attr(out, "table:style-name", style);
        }
        if let Some(cell_style) = &column.cell_style {
            push_attr(out, "table:default-cell-style-name", cell_style);
        }
        if !column.visible {
            push_attr(out, "table:visibility", "collapse");
        }
        out.push_str("/>");
    }

    for row in &sheet.rows {
        out.push_str("\n    <table:table-row");
        if let Some(style) = &row.style {
            push_attr(out, "table:style-name", style);
        }
        out.push('>');
        for cell in &row.cells {
            write_cell(out, cell);
        }
        out.push_str("</table:table-row>");
    }
    if sheet.rows.is_empty() {
        out.push_str("\n    <table:table-row><table:table-cell/></table:table-row>");
    }

    write_conditional_formats(out, sheet);

    out.push_str("\n   </table:table>");
}

fn write_shapes(out: &mut String, sheet: &StagedSheet) {
    if sheet.frames.is_empty() {
        return;
    }

    out.push_str("\n    <table:shapes>");
    for (i, frame) in sheet.frames.iter().enumerate() {
        out.push_str("\n     <draw:frame");
        push_attr(out, "draw:z-index", &i.to_string());
        push_attr(out, "svg:width", &format!("{:.3}mm", frame.width_mm));
        push_attr(out, "svg:height", &format!("{:.3}mm", frame.height_mm));
        push_attr(out, "svg:x", &format!("{:.3}mm", frame.x_mm));
        push_attr(out, "svg:y", &format!("{:.3}mm", frame.y_mm));
        push_attr(out, "table:end-cell-address", &frame.end_cell);
        out.push('>');

        out.push_str("<draw:object");
        push_attr(out, "xlink:href", &format!("./{}", frame.object_name));
        push_attr(out, "xlink:type", "simple");
        push_attr(out, "xlink:show", "embed");
        push_attr(out, "xlink:actuate", "onLoad");
        if !frame.update_ranges.is_empty() {
            push_attr(
                out,
                "draw:notify-on-update-of-ranges",
                &frame.update_ranges.join(" "),
            );
        }
        out.push_str("/></draw:frame>");
    }
    out.push_str("\n    </table:shapes>");
}

fn write_cell(out: &mut String, cell: &StagedCell) {
    if cell.covered {
        out.push_str("<table:covered-table-cell/>");
        return;
    }

    out.push_str("<table:table-cell");

    if let Some(style) = &cell.style {
        push_attr(out, "table:style-name", style);
    }
    if let Some(validation) = &cell.validation {
        push_attr(out, "table:content-validation-name", validation);
    }
    if let Some(formula) = &cell.formula {
        push_attr(out, "table:formula", &format!("of:{}", formula));
    }
    if let Some((cols, rows)) = cell.matrix {
        push_attr(out, "table:number-matrix-columns-spanned", &cols.to_string());
        push_attr(out, "table:number-matrix-rows-spanned", &rows.to_string());
    }
    if let Some((cols, rows)) = cell.span {
        push_attr(out, "table:number-columns-spanned", &cols.to_string());
        push_attr(out, "table:number-rows-spanned", &rows.to_string());
    }

    let display: Option<String> = match &cell.value {
        StagedValue::Empty => None,
        StagedValue::Text(text) => {
            push_attr(out, "office:value-type", "string");
            Some(text.clone())
        }
        StagedValue::Number(n) => {
            push_attr(out, "office:value-type", "float");
            push_attr(out, "office:value", &n.to_string());
            Some(n.to_string())
        }
        StagedValue::Percentage(n) => {
            push_attr(out, "office:value-type", "percentage");
            push_attr(out, "office:value", &n.to_string());
            Some(n.to_string())
        }
        StagedValue::Currency { amount, code } => {
            push_attr(out, "office:value-type", "currency");
            push_attr(out, "office:currency", code);
            push_attr(out, "office:value", amount);
            Some(format!("{} {}", amount, code))
        }
        StagedValue::Date(date) => {
            push_attr(out, "office:value-type", "date");
            push_attr(out, "office:date-value", date);
            Some(date.clone())
        }
        StagedValue::Boolean(b) => {
            push_attr(out, "office:value-type", "boolean");
            push_attr(out, "office:boolean-value", if *b { "true" } else { "false" });
            Some(if *b { "TRUE" } else { "FALSE" }.to_string())
        }
    };

    match display {
        Some(text) => {
            out.push_str("><text:p>");
            out.push_str(&esc(&text));
            out.push_str("</text:p></table:table-cell>");
        }
        None => {
            out.push_str("/>");
        }
    }
}

fn write_conditional_formats(out: &mut String, sheet: &StagedSheet) {
    if sheet.cond_formats.is_empty() {
        return;
    }

    out.push_str("\n    <calcext:conditional-formats>");
    for format in &sheet.cond_formats {
        out.push_str("\n     <calcext:conditional-format");
        push_attr(out, "calcext:target-range-address", &format.target);
        out.push('>');

        match &format.body {
            StagedCfBody::Condition {
                value,
                style,
                base_cell,
            } => {
                out.push_str("<calcext:condition");
                push_attr(out, "calcext:apply-style-name", style);
                push_attr(out, "calcext:value", value);
                push_attr(out, "calcext:base-cell-address", base_cell);
                out.push_str("/>");
            }

            StagedCfBody::ColorScale { entries } => {
                out.push_str("<calcext:color-scale>");
                for entry in entries {
                    out.push_str("<calcext:color-scale-entry");
                    push_attr(
                        out,
                        "calcext:value",
                        entry.value.as_deref().unwrap_or("0"),
                    );
                    push_attr(out, "calcext:type", entry.entry_type);
                    if let Some(color) = &entry.color {
                        push_attr(out, "calcext:color", color);
                    }
                    out.push_str("/>");
                }
                out.push_str("</calcext:color-scale>");
            }

            StagedCfBody::DataBar { color, entries } => {
                out.push_str("<calcext:data-bar");
                push_attr(out, "calcext:positive-color", color);
                out.push('>');
                for entry in entries {
                    write_formatting_entry(out, entry);
                }
                out.push_str("</calcext:data-bar>");
            }

            StagedCfBody::IconSet { kind, entries } => {
                out.push_str("<calcext:icon-set");
                push_attr(out, "calcext:icon-set-type", kind);
                out.push('>');
                for entry in entries {
                    write_formatting_entry(out, entry);
                }
                out.push_str("</calcext:icon-set>");
            }
        }

        out.push_str("</calcext:conditional-format>");
    }
    out.push_str("\n    </calcext:conditional-formats>");
}

fn write_formatting_entry(out: &mut String, entry: &crate::assembler::StagedCfEntry) {
    out.push_str("<calcext:formatting-entry");
    push_attr(out, "calcext:value", entry.value.as_deref().unwrap_or("0"));
    push_attr(out, "calcext:type", entry.entry_type);
    out.push_str("/>");
}

fn write_named_expressions(out: &mut String, staged: &StagedDocument) {
    if staged.named_ranges.is_empty() {
        return;
    }

    out.push_str("\n   <table:named-expressions>");
    for named_range in &staged.named_ranges {
        out.push_str("\n    <table:named-range");
        push_attr(out, "table:name", &named_range.name);
        push_attr(out, "table:base-cell-address", &named_range.base_cell);
        push_attr(out, "table:cell-range-address", &named_range.range);
        out.push_str("/>");
    }
    out.push_str("\n   </table:named-expressions>");
}
