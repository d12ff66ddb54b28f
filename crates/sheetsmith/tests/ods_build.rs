//! Full-stack build tests through the facade: model in, container out.

use std::io::{Cursor, Read};

use sheetsmith::prelude::*;

fn read_stream(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
    let mut file = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing stream {}", name));
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

fn report_document() -> (DocumentSpec, Vec<ChartSpec>) {
    let budget = SheetSpec::new("Budget")
        .with_columns(vec![
            ColumnSpec::new("Month"),
            ColumnSpec::new("Spend").with_kind(ValueKind::Currency { code: "EUR".into() }),
        ])
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("Month").with_style_name("Header"),
            CellSpec::new("Spend").with_style_name("Header"),
        ]))
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("January"),
            CellSpec::new(1200.0),
        ]))
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("February"),
            CellSpec::new(990.5),
        ]))
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("Total").with_style_name("Total"),
            CellSpec::new(CellValue::Formula(Formula::new(Expr::func(
                "SUM",
                vec![Expr::range("B2:B3").unwrap()],
            ))))
            .with_style_name("Total"),
        ]))
        .with_freeze(0, 1)
        .with_chart("spend-chart")
        .with_validation("positive-spend")
        .with_conditional_format("overspend");

    let doc = DocumentSpec::new()
        .with_title("Annual Report")
        .push_sheet(budget)
        .with_named_range(NamedRangeSpec::new(
            "MonthlySpend",
            SheetRef::parse("Budget.B2:B3").unwrap(),
        ))
        .with_validation(
            ValidationConfig::new(
                "positive-spend",
                Range::parse("B2:B3").unwrap(),
                ValidationRule::Decimal {
                    op: ValidationOperator::GreaterEqual,
                    value: 0.0,
                    value2: None,
                },
            )
            .with_error_message("Invalid spend", "Spend must not be negative"),
        )
        .with_conditional_format(
            ConditionalFormat::new(
                "overspend",
                Range::parse("B2:B3").unwrap(),
                CfRule::CellIs {
                    op: CfOperator::GreaterThan,
                    value: "1000".into(),
                    value2: None,
                },
            )
            .with_style(Style::new().fill_color(Color::rgb(0xf4, 0xcc, 0xcc))),
        );

    let chart = ChartSpec::new("spend-chart", ChartKind::Column)
        .with_title("Monthly spend")
        .with_series(
            Series::new(SheetRef::parse("Budget.B2:B3").unwrap())
                .with_categories(SheetRef::parse("Budget.A2:A3").unwrap())
                .with_name("Spend"),
        )
        .with_legend(Legend::new(LegendPosition::Bottom))
        .anchored_at(Coordinate::new(3, 1))
        .with_size(480, 320);

    (doc, vec![chart])
}

#[test]
fn report_builds_and_writes() {
    let (doc, charts) = report_document();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.ods");
    write_document(&doc, &charts, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let content = read_stream(&bytes, "content.xml");

    // Formula, named range, validation, conditional format, chart frame
    assert!(content.contains("table:formula=\"of:=SUM([.B2:.B3])\""));
    assert!(content.contains("table:name=\"MonthlySpend\""));
    assert!(content.contains("<table:content-validations>"));
    assert!(content.contains("table:content-validation-name=\"val1\""));
    assert!(content.contains("calcext:conditional-formats"));
    assert!(content.contains("calcext:value=\"&gt;1000\""));
    assert!(content.contains("xlink:href=\"./Object 1\""));

    // The chart sub-document is a declared, well-formed stream
    let manifest = read_stream(&bytes, "META-INF/manifest.xml");
    assert!(manifest.contains("manifest:full-path=\"Object 1/\""));
    let chart_xml = read_stream(&bytes, "Object 1/content.xml");
    assert!(chart_xml.contains("chart:class=\"chart:bar\""));
    assert!(chart_xml.contains("<chart:title><text:p>Monthly spend</text:p></chart:title>"));

    // Title reached the meta stream
    let meta = read_stream(&bytes, "meta.xml");
    assert!(meta.contains("<dc:title>Annual Report</dc:title>"));
}

#[test]
fn chart_referencing_missing_sheet_fails() {
    let (doc, _) = report_document();
    let chart = ChartSpec::new("spend-chart", ChartKind::Line).with_series(Series::new(
        SheetRef::parse("Nowhere.B2:B3").unwrap(),
    ));

    let err = write_document(&doc, &[chart], "should-not-exist.ods").unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnresolvedReference { kind: "chart series", .. }
    ));
    assert!(!std::path::Path::new("should-not-exist.ods").exists());
}

#[test]
fn unattached_validation_id_fails() {
    let (mut doc, charts) = report_document();
    doc.validations.clear(); // the sheet still references "positive-spend"

    let err = sheetsmith::assemble(&doc, &charts).unwrap_err();
    assert!(matches!(
        err,
        BuildError::UnresolvedReference { kind: "validation", .. }
    ));
}

#[test]
fn validation_condition_and_messages_emit() {
    let (doc, charts) = report_document();
    let artifact = sheetsmith::assemble(&doc, &charts).unwrap();
    let content = read_stream(artifact.bytes(), "content.xml");

    assert!(content.contains(
        "table:condition=\"of:cell-content-is-decimal-number() and cell-content()&gt;=0\""
    ));
    assert!(content.contains("table:message-type=\"stop\""));
    assert!(content.contains("<text:p>Spend must not be negative</text:p>"));
}

#[test]
fn conditional_format_style_is_registered_named() {
    let (doc, charts) = report_document();
    let artifact = sheetsmith::assemble(&doc, &charts).unwrap();

    let content = read_stream(artifact.bytes(), "content.xml");
    assert!(content.contains("calcext:apply-style-name=\"Condition_1\""));

    let styles = read_stream(artifact.bytes(), "styles.xml");
    assert!(styles.contains("style:name=\"Condition_1\""));
}
