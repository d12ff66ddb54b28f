//! ODS style table
//!
//! Bridges the core style registry to the two style streams of the
//! container: named styles land in `styles.xml` (`office:styles`),
//! anonymous interned styles become automatic styles in `content.xml`
//! (`ce*`), and number formats become shared data styles (`N*`). Column
//! widths, row heights, and the table style get their own automatic
//! styles (`co*`, `ro*`, `ta1`).

use std::collections::HashMap;

use crate::xml::{esc, push_attr};
use sheetsmith_core::style::{
    BorderEdge, BorderLineStyle, Color, DateOrder, FillStyle, FontStyle, HorizontalAlignment,
    Length, NumberFormat, Protection, Style, StyleHandle, StyleRegistry, Underline,
    VerticalAlignment,
};

/// Style bookkeeping shared between staging and finalize
#[derive(Debug, Default)]
pub(crate) struct OdsStyleTable {
    data_styles: Vec<NumberFormat>,
    data_ids: HashMap<NumberFormat, u32>,
    col_widths: Vec<Length>,
    col_ids: HashMap<Length, u32>,
    row_heights: Vec<Length>,
    row_ids: HashMap<Length, u32>,
}

impl OdsStyleTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The emitted style name for an interned handle: the registered name
    /// for named styles, `ce{n}` for anonymous ones
    pub(crate) fn style_name(registry: &StyleRegistry, handle: StyleHandle) -> String {
        match registry.name_of(handle) {
            Some(name) => name.to_string(),
            None => format!("ce{}", handle.0),
        }
    }

    /// Data style name for a number format (None for General)
    pub(crate) fn data_style_name(&mut self, format: &NumberFormat) -> Option<String> {
        if *format == NumberFormat::General {
            return None;
        }
        let id = match self.data_ids.get(format) {
            Some(&id) => id,
            None => {
                let id = self.data_styles.len() as u32;
                self.data_styles.push(format.clone());
                self.data_ids.insert(format.clone(), id);
                id
            }
        };
        Some(format!("N{}", id + 1))
    }

    /// Automatic column style for a width
    pub(crate) fn column_style(&mut self, width: Length) -> String {
        let id = match self.col_ids.get(&width) {
            Some(&id) => id,
            None => {
                let id = self.col_widths.len() as u32;
                self.col_widths.push(width);
                self.col_ids.insert(width, id);
                id
            }
        };
        format!("co{}", id + 1)
    }

    /// Automatic row style for a height
    pub(crate) fn row_style(&mut self, height: Length) -> String {
        let id = match self.row_ids.get(&height) {
            Some(&id) => id,
            None => {
                let id = self.row_heights.len() as u32;
                self.row_heights.push(height);
                self.row_ids.insert(height, id);
                id
            }
        };
        format!("ro{}", id + 1)
    }

    /// Register data styles for every interned cell style
    pub(crate) fn register_registry_formats(&mut self, registry: &StyleRegistry) {
        let formats: Vec<NumberFormat> = registry
            .iter()
            .map(|(_, _, style)| style.number_format.clone())
            .collect();
        for format in formats {
            self.data_style_name(&format);
        }
    }

    /// Data style elements, shared verbatim by both style streams
    pub(crate) fn data_styles_xml(&self) -> String {
        let mut out = String::new();
        for (i, format) in self.data_styles.iter().enumerate() {
            write_data_style(&mut out, &format!("N{}", i + 1), format);
        }
        out
    }

    /// Automatic styles for content.xml: data styles, anonymous cell
    /// styles, column/row styles, and the table style
    pub(crate) fn automatic_styles_xml(&self, registry: &StyleRegistry) -> String {
        let mut out = String::new();
        out.push_str(&self.data_styles_xml());

        for (i, width) in self.col_widths.iter().enumerate() {
            out.push_str(&format!(
                "\n  <style:style style:name=\"co{}\" style:family=\"table-column\">\
                 <style:table-column-properties fo:break-before=\"auto\" style:column-width=\"{}\"/>\
                 </style:style>",
                i + 1,
                width
            ));
        }

        for (i, height) in self.row_heights.iter().enumerate() {
            out.push_str(&format!(
                "\n  <style:style style:name=\"ro{}\" style:family=\"table-row\">\
                 <style:table-row-properties fo:break-before=\"auto\" style:row-height=\"{}\" style:use-optimal-row-height=\"false\"/>\
                 </style:style>",
                i + 1,
                height
            ));
        }

        out.push_str(
            "\n  <style:style style:name=\"ta1\" style:family=\"table\" style:master-page-name=\"Default\">\
             <style:table-properties table:display=\"true\" style:writing-mode=\"lr-tb\"/>\
             </style:style>",
        );

        for (handle, name, style) in registry.iter() {
            if name.is_none() {
                let style_name = format!("ce{}", handle.0);
                self.write_cell_style(&mut out, &style_name, None, style);
            }
        }

        out
    }

    /// Common styles for styles.xml: named cell styles (plus the data
    /// styles they may reference)
    pub(crate) fn office_styles_xml(&self, registry: &StyleRegistry) -> String {
        let mut out = String::new();
        out.push_str(&self.data_styles_xml());

        for (_, name, style) in registry.iter() {
            if let Some(name) = name {
                // The Default style is the family root, not a child of itself
                let parent = if name == "Default" { None } else { Some("Default") };
                self.write_cell_style_with_parent(&mut out, name, parent, style);
            }
        }

        out
    }

    fn write_cell_style(&self, out: &mut String, name: &str, parent: Option<&str>, style: &Style) {
        self.write_cell_style_with_parent(out, name, parent.or(Some("Default")), style);
    }

    fn write_cell_style_with_parent(
        &self,
        out: &mut String,
        name: &str,
        parent: Option<&str>,
        style: &Style,
    ) {
        out.push_str("\n  <style:style");
        push_attr(out, "style:name", name);
        push_attr(out, "style:family", "table-cell");
        if let Some(parent) = parent {
            push_attr(out, "style:parent-style-name", parent);
        }
        if style.number_format != NumberFormat::General {
            if let Some(&id) = self.data_ids.get(&style.number_format) {
                push_attr(out, "style:data-style-name", &format!("N{}", id + 1));
            }
        }
        out.push('>');

        write_cell_properties(out, style);
        write_paragraph_properties(out, style);
        write_text_properties(out, &style.font);

        out.push_str("</style:style>");
    }
}

fn write_cell_properties(out: &mut String, style: &Style) {
    let mut props = String::new();

    if let FillStyle::Solid { color } = style.fill {
        push_attr(&mut props, "fo:background-color", &color.to_hex());
    }

    let border = &style.border;
    if border.is_uniform() {
        if let Some(edge) = &border.left {
            push_attr(&mut props, "fo:border", &border_value(edge));
        }
    } else {
        for (attr, edge) in [
            ("fo:border-left", &border.left),
            ("fo:border-right", &border.right),
            ("fo:border-top", &border.top),
            ("fo:border-bottom", &border.bottom),
        ] {
            if let Some(edge) = edge {
                push_attr(&mut props, attr, &border_value(edge));
            }
        }
    }

    if style.alignment.vertical != VerticalAlignment::Bottom {
        let value = match style.alignment.vertical {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Middle => "middle",
            VerticalAlignment::Bottom => "bottom",
        };
        push_attr(&mut props, "style:vertical-align", value);
    }

    if style.alignment.wrap_text {
        push_attr(&mut props, "fo:wrap-option", "wrap");
    }

    if style.protection != Protection::default() {
        let value = match (style.protection.locked, style.protection.hidden) {
            (false, _) => "none",
            (true, true) => "hidden-and-protected",
            (true, false) => "protected",
        };
        push_attr(&mut props, "style:cell-protect", value);
    }

    if !props.is_empty() {
        out.push_str("<style:table-cell-properties");
        out.push_str(&props);
        out.push_str("/>");
    }
}

fn write_paragraph_properties(out: &mut String, style: &Style) {
    if style.alignment.horizontal == HorizontalAlignment::Default {
        return;
    }
    let value = match style.alignment.horizontal {
        HorizontalAlignment::Default => return,
        HorizontalAlignment::Left => "start",
        HorizontalAlignment::Center => "center",
        HorizontalAlignment::Right => "end",
        HorizontalAlignment::Justify => "justify",
    };
    out.push_str(&format!(
        "<style:paragraph-properties fo:text-align=\"{}\"/>",
        value
    ));
}

fn write_text_properties(out: &mut String, font: &FontStyle) {
    if *font == FontStyle::default() {
        return;
    }

    let mut props = String::new();
    push_attr(&mut props, "fo:font-family", &font.name);
    push_attr(&mut props, "fo:font-size", &format!("{}pt", font.size));
    if font.bold {
        push_attr(&mut props, "fo:font-weight", "bold");
    }
    if font.italic {
        push_attr(&mut props, "fo:font-style", "italic");
    }
    match font.underline {
        Underline::None => {}
        Underline::Single => {
            push_attr(&mut props, "style:text-underline-style", "solid");
        }
        Underline::Double => {
            push_attr(&mut props, "style:text-underline-style", "solid");
            push_attr(&mut props, "style:text-underline-type", "double");
        }
    }
    if font.strikethrough {
        push_attr(&mut props, "style:text-line-through-style", "solid");
    }
    if font.color != Color::Auto {
        push_attr(&mut props, "fo:color", &font.color.to_hex());
    }

    out.push_str("<style:text-properties");
    out.push_str(&props);
    out.push_str("/>");
}

fn border_value(edge: &BorderEdge) -> String {
    let (width, line) = match edge.style {
        BorderLineStyle::None => return "none".to_string(),
        BorderLineStyle::Thin => ("0.5pt", "solid"),
        BorderLineStyle::Medium => ("1pt", "solid"),
        BorderLineStyle::Thick => ("2pt", "solid"),
        BorderLineStyle::Dashed => ("1pt", "dashed"),
        BorderLineStyle::Dotted => ("1pt", "dotted"),
        BorderLineStyle::Double => ("1pt", "double"),
    };
    let color = match edge.color {
        Color::Auto => "#000000".to_string(),
        other => other.to_hex(),
    };
    format!("{} {} {}", width, line, color)
}

fn write_data_style(out: &mut String, name: &str, format: &NumberFormat) {
    match format {
        NumberFormat::General => {}

        NumberFormat::Number {
            decimal_places,
            grouping,
        } => {
            let grouping_attr = if *grouping {
                " number:grouping=\"true\""
            } else {
                ""
            };
            out.push_str(&format!(
                "\n  <number:number-style style:name=\"{}\">\
                 <number:number number:decimal-places=\"{}\" number:min-integer-digits=\"1\"{}/>\
                 </number:number-style>",
                name, decimal_places, grouping_attr
            ));
        }

        NumberFormat::Currency {
            code,
            decimal_places,
        } => {
            out.push_str(&format!(
                "\n  <number:currency-style style:name=\"{}\">\
                 <number:number number:decimal-places=\"{}\" number:min-integer-digits=\"1\" number:grouping=\"true\"/>\
                 <number:text> </number:text>\
                 <number:currency-symbol>{}</number:currency-symbol>\
                 </number:currency-style>",
                name,
                decimal_places,
                esc(code)
            ));
        }

        NumberFormat::Percentage { decimal_places } => {
            out.push_str(&format!(
                "\n  <number:percentage-style style:name=\"{}\">\
                 <number:number number:decimal-places=\"{}\" number:min-integer-digits=\"1\"/>\
                 <number:text>%</number:text>\
                 </number:percentage-style>",
                name, decimal_places
            ));
        }

        NumberFormat::Date { order } => {
            let body = match order {
                DateOrder::YearMonthDay => {
                    "<number:year number:style=\"long\"/><number:text>-</number:text>\
                     <number:month number:style=\"long\"/><number:text>-</number:text>\
                     <number:day number:style=\"long\"/>"
                }
                DateOrder::DayMonthYear => {
                    "<number:day number:style=\"long\"/><number:text>.</number:text>\
                     <number:month number:style=\"long\"/><number:text>.</number:text>\
                     <number:year number:style=\"long\"/>"
                }
                DateOrder::MonthDayYear => {
                    "<number:month number:style=\"long\"/><number:text>/</number:text>\
                     <number:day number:style=\"long\"/><number:text>/</number:text>\
                     <number:year number:style=\"long\"/>"
                }
            };
            out.push_str(&format!(
                "\n  <number:date-style style:name=\"{}\">{}</number:date-style>",
                name, body
            ));
        }

        NumberFormat::Boolean => {
            out.push_str(&format!(
                "\n  <number:boolean-style style:name=\"{}\"><number:boolean/></number:boolean-style>",
                name
            ));
        }

        NumberFormat::Text => {
            out.push_str(&format!(
                "\n  <number:text-style style:name=\"{}\"><number:text-content/></number:text-style>",
                name
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_data_style_dedup() {
        let mut table = OdsStyleTable::new();

        assert_eq!(table.data_style_name(&NumberFormat::General), None);

        let eur = NumberFormat::currency("EUR");
        let first = table.data_style_name(&eur).unwrap();
        let second = table.data_style_name(&eur).unwrap();
        assert_eq!(first, second);

        let usd = table.data_style_name(&NumberFormat::currency("USD")).unwrap();
        assert_ne!(first, usd);
    }

    #[test]
    fn test_style_names() {
        let mut registry = StyleRegistry::new();
        let header = registry.handle_for_name("Header").unwrap();
        assert_eq!(OdsStyleTable::style_name(&registry, header), "Header");

        let custom = registry.intern(&Style::new().bold(true).font_size(12.0));
        assert_eq!(
            OdsStyleTable::style_name(&registry, custom),
            format!("ce{}", custom.0)
        );
    }

    #[test]
    fn test_column_row_styles_dedup() {
        let mut table = OdsStyleTable::new();
        assert_eq!(table.column_style(Length::cm(2.5)), "co1");
        assert_eq!(table.column_style(Length::mm(25.0)), "co1");
        assert_eq!(table.column_style(Length::cm(4.0)), "co2");
        assert_eq!(table.row_style(Length::mm(8.0)), "ro1");
    }

    #[test]
    fn test_currency_data_style_xml() {
        let mut out = String::new();
        write_data_style(&mut out, "N1", &NumberFormat::currency("EUR"));
        assert!(out.contains("number:currency-style"));
        assert!(out.contains("<number:currency-symbol>EUR</number:currency-symbol>"));
    }
}
