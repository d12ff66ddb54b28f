//! Generate a small budget report with a summary sheet and a chart.
//!
//! Run with: cargo run --example budget_report

use sheetsmith::prelude::*;

fn main() -> Result<(), BuildError> {
    let budget = SheetSpec::new("Budget")
        .with_columns(vec![
            ColumnSpec::new("Category").with_width(Length::cm(4.5)),
            ColumnSpec::new("Amount").with_kind(ValueKind::Currency { code: "EUR".into() }),
        ])
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("Category").with_style_name("Header"),
            CellSpec::new("Amount").with_style_name("Header"),
        ]))
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("Rent"),
            CellSpec::new(1200.0),
        ]))
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("Groceries"),
            CellSpec::new(410.75),
        ]))
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("Transport"),
            CellSpec::new(89.5),
        ]))
        .with_freeze(0, 1)
        .with_chart("by-category");

    let summary = SheetSpec::new("Summary")
        .push_row(RowSpec::from_cells(vec![
            CellSpec::new("Total spend").with_style_name("Total"),
            CellSpec::new(CellValue::Formula(Formula::new(Expr::func(
                "SUM",
                vec![Expr::sheet_ref("Budget", "B2:B4")?],
            ))))
            .with_style_name("Total"),
        ]));

    let doc = DocumentSpec::new()
        .with_title("Monthly budget")
        .push_sheet(budget)
        .push_sheet(summary)
        .with_named_range(NamedRangeSpec::new(
            "Spend",
            SheetRef::parse("Budget.B2:B4")?,
        ));

    let chart = ChartSpec::new("by-category", ChartKind::Column)
        .with_title("Spend by category")
        .with_series(
            Series::new(SheetRef::parse("Budget.B2:B4")?)
                .with_categories(SheetRef::parse("Budget.A2:A4")?),
        )
        .with_legend(Legend::new(LegendPosition::Bottom))
        .anchored_at(Coordinate::new(3, 1))
        .with_size(480, 320);

    write_document(&doc, &[chart], "budget.ods")?;
    println!("wrote budget.ods");
    Ok(())
}
