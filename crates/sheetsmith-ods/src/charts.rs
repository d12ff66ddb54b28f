//! Chart sub-document emission
//!
//! Each chart becomes its own embedded document (`Object N/content.xml`)
//! with media type `application/vnd.oasis.opendocument.chart`. Plot data
//! stays in the spreadsheet; the chart references it by cell range.

use crate::error::BuildResult;
use crate::xml::{esc, full_range_address, push_attr};
use sheetsmith_chart::ChartSpec;
use sheetsmith_core::SheetRef;

const CHART_NAMESPACES: &str = concat!(
    " xmlns:office=\"urn:oasis:names:tc:opendocument:xmlns:office:1.0\"",
    " xmlns:style=\"urn:oasis:names:tc:opendocument:xmlns:style:1.0\"",
    " xmlns:text=\"urn:oasis:names:tc:opendocument:xmlns:text:1.0\"",
    " xmlns:table=\"urn:oasis:names:tc:opendocument:xmlns:table:1.0\"",
    " xmlns:chart=\"urn:oasis:names:tc:opendocument:xmlns:chart:1.0\"",
    " xmlns:svg=\"urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0\"",
    " xmlns:fo=\"urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0\"",
    " xmlns:loext=\"urn:org:documentfoundation:names:experimental:office:xmlns:loext:1.0\"",
);

const MM_PER_PX: f64 = 25.4 / 96.0;

/// Build the content.xml of one chart sub-document
pub(crate) fn chart_document_xml(chart: &ChartSpec, owning_sheet: &str) -> BuildResult<String> {
    let mut out = String::with_capacity(4 * 1024);

    let width_mm = chart.size_px.0 as f64 * MM_PER_PX;
    let height_mm = chart.size_px.1 as f64 * MM_PER_PX;

    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<office:document-content");
    out.push_str(CHART_NAMESPACES);
    out.push_str(" office:version=\"1.2\">\n");

    // Chart styles: plot orientation plus one style per trendline
    out.push_str(" <office:automatic-styles>");
    out.push_str(&format!(
        "\n  <style:style style:name=\"plot\" style:family=\"chart\">\
         <style:chart-properties chart:vertical=\"{}\"/>\
         </style:style>",
        chart.kind.is_horizontal()
    ));
    for (i, series) in chart.series.iter().enumerate() {
        if let Some(trendline) = &series.trendline {
            out.push_str(&format!(
                "\n  <style:style style:name=\"trend{}\" style:family=\"chart\">\
                 <style:chart-properties chart:regression-type=\"{}\"/>\
                 </style:style>",
                i + 1,
                trendline.odf_name()
            ));
        }
    }
    out.push_str("\n </office:automatic-styles>\n");

    out.push_str(" <office:body>\n  <office:chart>\n   <chart:chart");
    push_attr(&mut out, "chart:class", chart.kind.odf_class());
    push_attr(&mut out, "svg:width", &format!("{:.3}mm", width_mm));
    push_attr(&mut out, "svg:height", &format!("{:.3}mm", height_mm));
    out.push('>');

    if let Some(title) = &chart.title {
        out.push_str("\n    <chart:title><text:p>");
        out.push_str(&esc(title));
        out.push_str("</text:p></chart:title>");
    }

    if let Some(legend) = &chart.legend {
        out.push_str("\n    <chart:legend");
        push_attr(
            &mut out,
            "chart:legend-position",
            legend.position.odf_name(),
        );
        out.push_str("/>");
    }

    out.push_str("\n    <chart:plot-area");
    push_attr(&mut out, "chart:style-name", "plot");
    if let Some(first) = chart.series.first() {
        push_attr(
            &mut out,
            "table:cell-range-address",
            &reference_address(&first.values, owning_sheet),
        );
    }
    push_attr(&mut out, "chart:data-source-has-labels", "none");
    out.push('>');

    write_axes(&mut out, chart, owning_sheet);

    for (i, series) in chart.series.iter().enumerate() {
        out.push_str("\n     <chart:series");
        push_attr(
            &mut out,
            "chart:values-cell-range-address",
            &reference_address(&series.values, owning_sheet),
        );
        push_attr(&mut out, "chart:class", chart.kind.odf_class());
        if let Some(name) = &series.name {
            push_attr(&mut out, "loext:label-string", name);
        }
        if series.secondary_axis {
            push_attr(&mut out, "chart:attached-axis", "secondary-y");
        }

        if series.trendline.is_some() {
            out.push('>');
            out.push_str(&format!(
                "<chart:regression-curve chart:style-name=\"trend{}\"/>",
                i + 1
            ));
            out.push_str("</chart:series>");
        } else {
            out.push_str("/>");
        }
    }

    out.push_str("\n    </chart:plot-area>");
    out.push_str("\n   </chart:chart>\n  </office:chart>\n </office:body>\n");
    out.push_str("</office:document-content>\n");

    Ok(out)
}

fn write_axes(out: &mut String, chart: &ChartSpec, owning_sheet: &str) {
    // Category (X) axis
    out.push_str("\n     <chart:axis");
    push_attr(out, "chart:dimension", "x");
    push_attr(out, "chart:name", "primary-x");
    out.push('>');
    if let Some(axis) = &chart.category_axis {
        if let Some(title) = &axis.title {
            out.push_str("<chart:title><text:p>");
            out.push_str(&esc(title));
            out.push_str("</text:p></chart:title>");
        }
        if axis.grid_lines {
            out.push_str("<chart:grid chart:class=\"major\"/>");
        }
    }
    if let Some(categories) = chart.series.iter().find_map(|s| s.categories.as_ref()) {
        out.push_str("<chart:categories");
        push_attr(
            out,
            "table:cell-range-address",
            &reference_address(categories, owning_sheet),
        );
        out.push_str("/>");
    }
    out.push_str("</chart:axis>");

    // Value (Y) axis
    out.push_str("\n     <chart:axis");
    push_attr(out, "chart:dimension", "y");
    push_attr(out, "chart:name", "primary-y");
    out.push('>');
    if let Some(axis) = &chart.value_axis {
        if let Some(title) = &axis.title {
            out.push_str("<chart:title><text:p>");
            out.push_str(&esc(title));
            out.push_str("</text:p></chart:title>");
        }
        if axis.grid_lines {
            out.push_str("<chart:grid chart:class=\"major\"/>");
        }
    }
    out.push_str("</chart:axis>");

    // Secondary value axis, when configured
    if chart.secondary_axis.is_some() {
        out.push_str("\n     <chart:axis");
        push_attr(out, "chart:dimension", "y");
        push_attr(out, "chart:name", "secondary-y");
        out.push_str("/>");
    }
}

/// A series reference rendered for chart consumption, defaulting to the
/// owning sheet when the reference carries no qualifier
fn reference_address(reference: &SheetRef, owning_sheet: &str) -> String {
    let sheet = reference.sheet.as_deref().unwrap_or(owning_sheet);
    full_range_address(sheet, reference.range())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetsmith_chart::{ChartKind, Series};

    #[test]
    fn test_chart_document() {
        let chart = ChartSpec::new("spend", ChartKind::Column)
            .with_title("Spending")
            .with_series(
                Series::new(SheetRef::parse("Budget.B2:B10").unwrap())
                    .with_categories(SheetRef::parse("Budget.A2:A10").unwrap()),
            );

        let xml = chart_document_xml(&chart, "Budget").unwrap();
        assert!(xml.contains("chart:class=\"chart:bar\""));
        assert!(xml.contains("<chart:title><text:p>Spending</text:p></chart:title>"));
        assert!(xml.contains("chart:values-cell-range-address=\"Budget.B2:Budget.B10\""));
        assert!(xml.contains("table:cell-range-address=\"Budget.A2:Budget.A10\""));
    }
}
