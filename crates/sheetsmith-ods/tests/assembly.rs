//! End-to-end assembly tests: build a document, unpack the artifact, and
//! inspect the container streams.

use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use sheetsmith_core::{
    CellSpec, CellValue, ColumnSpec, DocumentSpec, Expr, Formula, Length, NamedRangeSpec, RowSpec,
    SheetRef, SheetSpec, Style, ValueKind,
};
use sheetsmith_ods::{assemble, Assembler, BuildError};

fn unzip(bytes: &[u8]) -> zip::ZipArchive<Cursor<Vec<u8>>> {
    zip::ZipArchive::new(Cursor::new(bytes.to_vec())).expect("artifact is a valid zip")
}

fn read_stream(archive: &mut zip::ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut file = archive.by_name(name).unwrap_or_else(|_| panic!("missing stream {}", name));
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

fn budget_sheet() -> SheetSpec {
    let mut sheet = SheetSpec::new("Budget").with_columns(vec![
        ColumnSpec::new("Item").with_width(Length::cm(4.0)),
        ColumnSpec::new("Amount").with_kind(ValueKind::Currency { code: "EUR".into() }),
        ColumnSpec::new("Category"),
        ColumnSpec::new("Notes"),
    ]);

    sheet = sheet.push_row(RowSpec::from_cells(vec![
        CellSpec::new("Item").with_style_name("Header"),
        CellSpec::new("Amount").with_style_name("Header"),
        CellSpec::new("Category").with_style_name("Header"),
        CellSpec::new("Notes").with_style_name("Header"),
    ]));

    for i in 0..9 {
        sheet = sheet.push_row(RowSpec::from_cells(vec![
            CellSpec::new(format!("Item {}", i + 1)),
            CellSpec::new(100.0 + i as f64),
            CellSpec::new("General"),
            CellSpec::empty(),
        ]));
    }

    sheet
}

#[test]
fn budget_summary_cross_sheet_formula() {
    let summary = SheetSpec::new("Summary").push_row(RowSpec::from_cells(vec![
        CellSpec::new("Total"),
        CellSpec::new(CellValue::Formula(Formula::new(Expr::func(
            "SUM",
            vec![Expr::sheet_ref("Budget", "B2:B10").unwrap()],
        )))),
    ]));

    let doc = DocumentSpec::new()
        .push_sheet(budget_sheet())
        .push_sheet(summary);

    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());
    let content = read_stream(&mut archive, "content.xml");

    // The Summary formula is sheet-qualified
    assert!(content.contains("table:formula=\"of:=SUM([Budget.B2:.B10])\""));
    // Both tables are present
    assert!(content.contains("table:name=\"Budget\""));
    assert!(content.contains("table:name=\"Summary\""));
}

#[test]
fn merge_overlap_fails_on_second_declaration() {
    // "A1:B1" then "B1:C1" on one sheet; the second declaration must fail
    // and identify the conflicting cell B1
    let sheet = SheetSpec::new("Data").push_row(RowSpec::from_cells(vec![
        CellSpec::new("left").spanning(2, 1),
        CellSpec::new("right").spanning(2, 1),
    ]));
    let doc = DocumentSpec::new().push_sheet(sheet);

    let err = assemble(&doc, &[]).unwrap_err();
    match err {
        BuildError::Core(sheetsmith_core::Error::MergeOverlap { sheet, cell }) => {
            assert_eq!(sheet, "Data");
            assert_eq!(cell, "B1");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn covered_cell_with_value_is_rejected() {
    let sheet = SheetSpec::new("Data").push_row(RowSpec::from_cells(vec![
        CellSpec::new("anchor").spanning(2, 1),
        CellSpec::new("smuggled"),
    ]));
    let doc = DocumentSpec::new().push_sheet(sheet);

    let err = assemble(&doc, &[]).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Core(sheetsmith_core::Error::CoveredCellValue { .. })
    ));
}

#[test]
fn merged_region_emits_covered_placeholders() {
    let sheet = SheetSpec::new("Data")
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("wide").spanning(3, 2)
        ]))
        .push_row(RowSpec::new());
    let doc = DocumentSpec::new().push_sheet(sheet);

    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());
    let content = read_stream(&mut archive, "content.xml");

    assert!(content.contains("table:number-columns-spanned=\"3\""));
    assert!(content.contains("table:number-rows-spanned=\"2\""));
    // 5 covered cells: 2 to the right of the anchor, 3 in the second row
    assert_eq!(content.matches("<table:covered-table-cell/>").count(), 5);
}

#[test]
fn identical_styles_emit_once() {
    // 500 cells requesting the same currency style definition produce
    // exactly one emitted automatic style entry, referenced 500 times
    let currency = Style::new().number_format(sheetsmith_core::NumberFormat::currency("EUR"));

    let mut sheet = SheetSpec::new("Data");
    for row in 0..100 {
        let mut cells = Vec::new();
        for col in 0..5 {
            cells.push(
                CellSpec::new((row * 5 + col) as f64).with_style(currency.clone()),
            );
        }
        sheet = sheet.push_row(RowSpec::from_cells(cells));
    }
    let doc = DocumentSpec::new().push_sheet(sheet);

    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());
    let content = read_stream(&mut archive, "content.xml");

    let emitted = content
        .matches("<style:style style:name=\"ce")
        .count();
    assert_eq!(emitted, 1);

    // Find the emitted name and count references to it
    let pos = content.find("<style:style style:name=\"ce").unwrap();
    let rest = &content[pos + "<style:style style:name=\"".len()..];
    let name = &rest[..rest.find('"').unwrap()];
    let references = content
        .matches(&format!("table:style-name=\"{}\"", name))
        .count();
    assert_eq!(references, 500);
}

#[test]
fn unresolved_named_range_fails_without_output() {
    let doc = DocumentSpec::new()
        .push_sheet(SheetSpec::new("Data"))
        .with_named_range(NamedRangeSpec::new(
            "Ghost",
            SheetRef::parse("Missing.A1:A5").unwrap(),
        ));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.ods");

    let err = assemble(&doc, &[]).unwrap_err();
    assert!(matches!(err, BuildError::UnresolvedReference { kind, .. } if kind == "named range"));

    // No artifact was produced, so nothing can have been written
    assert!(!path.exists());
}

#[test]
fn named_range_lands_in_named_expressions() {
    let doc = DocumentSpec::new()
        .push_sheet(budget_sheet())
        .with_named_range(NamedRangeSpec::new(
            "Spend",
            SheetRef::parse("Budget.B2:B10").unwrap(),
        ));

    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());
    let content = read_stream(&mut archive, "content.xml");

    assert!(content.contains("<table:named-expressions>"));
    assert!(content.contains("table:name=\"Spend\""));
    assert!(content.contains("table:cell-range-address=\"$Budget.$B$2:$B$10\""));
}

#[test]
fn container_shape_is_standards_compliant() {
    let doc = DocumentSpec::new().push_sheet(budget_sheet());
    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());

    // mimetype is the first entry and is stored uncompressed
    {
        let first = archive.by_index(0).unwrap();
        assert_eq!(first.name(), "mimetype");
        assert_eq!(first.compression(), zip::CompressionMethod::Stored);
    }
    let mimetype = read_stream(&mut archive, "mimetype");
    assert_eq!(mimetype, "application/vnd.oasis.opendocument.spreadsheet");

    let manifest = read_stream(&mut archive, "META-INF/manifest.xml");
    for stream in ["content.xml", "styles.xml", "meta.xml", "settings.xml"] {
        assert!(
            manifest.contains(&format!("manifest:full-path=\"{}\"", stream)),
            "manifest missing {}",
            stream
        );
    }

    // All declared streams exist
    for stream in ["content.xml", "styles.xml", "meta.xml", "settings.xml"] {
        read_stream(&mut archive, stream);
    }
}

#[test]
fn currency_column_infers_cell_format() {
    let doc = DocumentSpec::new().push_sheet(budget_sheet());
    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());
    let content = read_stream(&mut archive, "content.xml");

    // Plain numbers in the currency column emit as currency values
    assert!(content.contains("office:value-type=\"currency\""));
    assert!(content.contains("office:currency=\"EUR\""));
    // Exactly one currency data style backs them
    assert_eq!(content.matches("<number:currency-style").count(), 1);
}

#[test]
fn explicit_currency_value_roundtrips_amount() {
    let sheet = SheetSpec::new("Data").push_row(RowSpec::from_cells(vec![CellSpec::new(
        CellValue::currency(Decimal::new(1995, 2), "USD"),
    )]));
    let doc = DocumentSpec::new().push_sheet(sheet);

    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());
    let content = read_stream(&mut archive, "content.xml");

    assert!(content.contains("office:value=\"19.95\""));
    assert!(content.contains("office:currency=\"USD\""));
}

#[test]
fn builtin_named_styles_emit_in_styles_stream() {
    let doc = DocumentSpec::new().push_sheet(budget_sheet());
    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());
    let styles = read_stream(&mut archive, "styles.xml");

    for name in ["Default", "Header", "Total", "Warning", "Success"] {
        assert!(
            styles.contains(&format!("style:name=\"{}\"", name)),
            "styles.xml missing built-in {}",
            name
        );
    }
}

#[test]
fn freeze_panes_land_in_settings() {
    let sheet = budget_sheet().with_freeze(1, 1);
    let doc = DocumentSpec::new().push_sheet(sheet);

    let artifact = assemble(&doc, &[]).unwrap();
    let mut archive = unzip(artifact.bytes());
    let settings = read_stream(&mut archive, "settings.xml");

    assert!(settings.contains("config:name=\"Budget\""));
    assert!(settings.contains("HorizontalSplitPosition"));
    assert!(settings.contains("VerticalSplitPosition"));
}

#[test]
fn assembler_is_single_use() {
    // One assembler per build session; independent sessions do not share
    // counters or registries
    let doc = DocumentSpec::new().push_sheet(budget_sheet());

    let first = Assembler::new().assemble(&doc, &[]).unwrap();
    let second = Assembler::new().assemble(&doc, &[]).unwrap();

    let mut a = unzip(first.bytes());
    let mut b = unzip(second.bytes());
    assert_eq!(
        read_stream(&mut a, "content.xml"),
        read_stream(&mut b, "content.xml")
    );
}

#[test]
fn duplicate_sheet_names_fail() {
    let doc = DocumentSpec::new()
        .push_sheet(SheetSpec::new("Data"))
        .push_sheet(SheetSpec::new("DATA"));

    let err = assemble(&doc, &[]).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Core(sheetsmith_core::Error::DuplicateSheetName(_))
    ));
}

#[test]
fn artifact_write_is_atomic() {
    let doc = DocumentSpec::new().push_sheet(budget_sheet());
    let artifact = assemble(&doc, &[]).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested.ods");
    artifact.write_to(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, artifact.bytes());
    // No temp files left behind
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path() != path)
        .collect();
    assert!(leftovers.is_empty());
}
