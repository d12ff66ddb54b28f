//! Document assembler
//!
//! A strictly sequential state machine per build:
//! Initialize -> StyleInterning -> SheetEmission -> NamedRangeEmission ->
//! ChartEmission -> ConditionalFormatEmission -> ValidationEmission ->
//! Finalize. No phase revisits a prior phase's output, `assemble`
//! consumes the assembler (builds are non-restartable), and everything is
//! staged in memory: the artifact exists only after Finalize succeeds.

use std::collections::HashMap;

use log::debug;

use crate::charts::chart_document_xml;
use crate::container::package;
use crate::content::{content_xml, styles_xml};
use crate::error::{BuildError, BuildResult};
use crate::meta::{meta_xml, settings_xml};
use crate::styles::OdsStyleTable;
use crate::xml::{abs_cell_address, abs_range_address, cell_address, full_range_address, range_address};
use crate::OdsArtifact;
use sheetsmith_chart::ChartSpec;
use sheetsmith_core::{
    CellSpec, CellValue, CfRule, CfThreshold, ColumnSpec, Coordinate, Coverage, DocumentSpec,
    Error as CoreError, MergeTracker, NumberFormat, Range, RowSpec, SheetSpec, Style, StyleRef,
    StyleRegistry, ValidationRule, ValueKind,
};
use sheetsmith_formula::Translator;

/// Default grid geometry used to place chart frames
const DEFAULT_COL_WIDTH_MM: f64 = 22.58;
const DEFAULT_ROW_HEIGHT_MM: f64 = 4.52;
const MM_PER_PX: f64 = 25.4 / 96.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Initialize,
    StyleInterning,
    SheetEmission,
    NamedRangeEmission,
    ChartEmission,
    ConditionalFormatEmission,
    ValidationEmission,
    Finalize,
}

impl Phase {
    fn name(self) -> &'static str {
        match self {
            Phase::Initialize => "Initialize",
            Phase::StyleInterning => "StyleInterning",
            Phase::SheetEmission => "SheetEmission",
            Phase::NamedRangeEmission => "NamedRangeEmission",
            Phase::ChartEmission => "ChartEmission",
            Phase::ConditionalFormatEmission => "ConditionalFormatEmission",
            Phase::ValidationEmission => "ValidationEmission",
            Phase::Finalize => "Finalize",
        }
    }
}

// === Staged intermediate structures ===

#[derive(Debug, Default)]
pub(crate) struct StagedDocument {
    pub sheets: Vec<StagedSheet>,
    pub named_ranges: Vec<StagedNamedRange>,
    pub charts: Vec<StagedChartDoc>,
    pub validations: Vec<StagedValidation>,
}

#[derive(Debug)]
pub(crate) struct StagedNamedRange {
    pub name: String,
    pub base_cell: String,
    pub range: String,
}

#[derive(Debug)]
pub(crate) struct StagedChartDoc {
    pub object_name: String,
    pub xml: String,
}

#[derive(Debug, Default)]
pub(crate) struct StagedSheet {
    pub name: String,
    pub protected: bool,
    pub print_range: Option<String>,
    pub columns: Vec<StagedColumn>,
    pub rows: Vec<StagedRow>,
    pub frames: Vec<StagedFrame>,
    pub cond_formats: Vec<StagedCondFormat>,
    pub freeze: (u16, u32),
}

#[derive(Debug)]
pub(crate) struct StagedColumn {
    pub style: Option<String>,
    pub cell_style: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub(crate) struct StagedRow {
    pub style: Option<String>,
    pub cells: Vec<StagedCell>,
}

#[derive(Debug, Default)]
pub(crate) struct StagedCell {
    pub style: Option<String>,
    pub validation: Option<String>,
    pub formula: Option<String>,
    pub matrix: Option<(u16, u32)>,
    pub span: Option<(u16, u32)>,
    pub covered: bool,
    pub value: StagedValue,
}

#[derive(Debug, Default)]
pub(crate) enum StagedValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Percentage(f64),
    Currency {
        amount: String,
        code: String,
    },
    Date(String),
    Boolean(bool),
}

#[derive(Debug)]
pub(crate) struct StagedFrame {
    pub object_name: String,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub end_cell: String,
    pub update_ranges: Vec<String>,
}

#[derive(Debug)]
pub(crate) struct StagedCondFormat {
    pub target: String,
    pub body: StagedCfBody,
}

#[derive(Debug)]
pub(crate) enum StagedCfBody {
    Condition {
        value: String,
        style: String,
        base_cell: String,
    },
    ColorScale {
        entries: Vec<StagedCfEntry>,
    },
    DataBar {
        color: String,
        entries: Vec<StagedCfEntry>,
    },
    IconSet {
        kind: &'static str,
        entries: Vec<StagedCfEntry>,
    },
}

#[derive(Debug)]
pub(crate) struct StagedCfEntry {
    pub value: Option<String>,
    pub entry_type: &'static str,
    pub color: Option<String>,
}

#[derive(Debug)]
pub(crate) struct StagedValidation {
    pub name: String,
    pub condition: Option<String>,
    pub allow_empty: bool,
    pub base_cell: String,
    pub help: Option<(String, String)>,
    pub error: Option<(String, String)>,
    pub severity: &'static str,
}

/// Cross-reference resolution computed up front by Initialize
#[derive(Debug, Default)]
struct ResolvedRefs {
    /// Validation spec id -> emitted validation name ("val1", ...)
    validation_names: HashMap<String, String>,
}

/// The document assembler
///
/// One assembler instance serves exactly one build; `assemble` consumes
/// it. All mutable state (style registry, merge tracker, id counters) is
/// session-scoped and discarded with the assembler.
#[derive(Debug)]
pub struct Assembler {
    translator: Translator,
    registry: StyleRegistry,
    merges: MergeTracker,
    style_table: OdsStyleTable,
    phase: Phase,
    chart_counter: u32,
    /// Conditional format id -> registered result style name
    cf_styles: HashMap<String, String>,
}

impl Assembler {
    /// Create an assembler for one build session
    pub fn new() -> Self {
        Self {
            translator: Translator::new(),
            registry: StyleRegistry::new(),
            merges: MergeTracker::new(),
            style_table: OdsStyleTable::new(),
            phase: Phase::Initialize,
            chart_counter: 0,
            cf_styles: HashMap::new(),
        }
    }

    /// Run the whole pipeline and return the finished artifact
    ///
    /// All-or-nothing: any error aborts the build before an artifact
    /// exists, and no output is ever produced for an invalid document.
    pub fn assemble(
        mut self,
        document: &DocumentSpec,
        charts: &[ChartSpec],
    ) -> BuildResult<OdsArtifact> {
        self.expect(Phase::Initialize)?;
        let resolved = self.initialize(document, charts)?;

        self.advance(Phase::StyleInterning)?;
        self.intern_document_styles(document)?;

        self.advance(Phase::SheetEmission)?;
        let mut staged = self.emit_sheets(document, &resolved)?;

        self.advance(Phase::NamedRangeEmission)?;
        staged.named_ranges = self.emit_named_ranges(document)?;

        self.advance(Phase::ChartEmission)?;
        self.emit_charts(document, charts, &mut staged)?;

        self.advance(Phase::ConditionalFormatEmission)?;
        self.emit_conditional_formats(document, &mut staged)?;

        self.advance(Phase::ValidationEmission)?;
        self.emit_validations(document, &resolved, &mut staged)?;

        self.advance(Phase::Finalize)?;
        self.finalize(document, staged)
    }

    fn expect(&self, expected: Phase) -> BuildResult<()> {
        if self.phase != expected {
            return Err(BuildError::PhaseOrder {
                expected: expected.name(),
                actual: self.phase.name(),
            });
        }
        Ok(())
    }

    fn advance(&mut self, next: Phase) -> BuildResult<()> {
        debug!("assembler: entering {}", next.name());
        self.phase = next;
        Ok(())
    }

    // === Phase: Initialize ===

    /// Validate sheet names and resolve every cross-reference before any
    /// output is produced
    fn initialize(
        &mut self,
        document: &DocumentSpec,
        charts: &[ChartSpec],
    ) -> BuildResult<ResolvedRefs> {
        document.check_sheet_names()?;
        sheetsmith_core::named_range::check_unique_names(&document.named_ranges)?;

        // Named range targets must name a declared sheet
        for named_range in &document.named_ranges {
            match &named_range.target.sheet {
                None => {
                    return Err(BuildError::UnresolvedReference {
                        kind: "named range",
                        reference: format!("{} (missing sheet qualifier)", named_range.name),
                    })
                }
                Some(sheet) if document.sheet(sheet).is_none() => {
                    return Err(BuildError::UnresolvedReference {
                        kind: "named range",
                        reference: format!("{} -> {}", named_range.name, sheet),
                    })
                }
                Some(_) => {}
            }
        }

        check_unique_ids("chart", charts.iter().map(|c| c.id.as_str()))?;
        check_unique_ids(
            "validation",
            document.validations.iter().map(|v| v.id.as_str()),
        )?;
        check_unique_ids(
            "conditional format",
            document.conditional_formats.iter().map(|f| f.id.as_str()),
        )?;

        let mut resolved = ResolvedRefs::default();

        for sheet in &document.sheets {
            for chart_id in &sheet.charts {
                let chart = charts.iter().find(|c| &c.id == chart_id).ok_or_else(|| {
                    BuildError::UnresolvedReference {
                        kind: "chart",
                        reference: chart_id.clone(),
                    }
                })?;
                chart.validate()?;

                for series in &chart.series {
                    for reference in
                        std::iter::once(&series.values).chain(series.categories.iter())
                    {
                        if let Some(name) = &reference.sheet {
                            if document.sheet(name).is_none() {
                                return Err(BuildError::UnresolvedReference {
                                    kind: "chart series",
                                    reference: format!("{} -> {}", chart.id, name),
                                });
                            }
                        }
                    }
                }
            }

            for validation_id in &sheet.validations {
                let validation = document.validation(validation_id).ok_or_else(|| {
                    BuildError::UnresolvedReference {
                        kind: "validation",
                        reference: validation_id.clone(),
                    }
                })?;

                if let ValidationRule::ListRange(reference) = &validation.rule {
                    if let Some(name) = &reference.sheet {
                        if document.sheet(name).is_none() {
                            return Err(BuildError::UnresolvedReference {
                                kind: "validation source",
                                reference: format!("{} -> {}", validation.id, name),
                            });
                        }
                    }
                }

                // Names are assigned up front, in attachment order, so
                // cell emission can attribute cells to validations
                let next = resolved.validation_names.len() + 1;
                resolved
                    .validation_names
                    .entry(validation_id.clone())
                    .or_insert_with(|| format!("val{}", next));
            }

            for format_id in &sheet.conditional_formats {
                if document.conditional_format(format_id).is_none() {
                    return Err(BuildError::UnresolvedReference {
                        kind: "conditional format",
                        reference: format_id.clone(),
                    });
                }
            }

            if let Some(print_area) = &sheet.print_area {
                if let Some(name) = &print_area.sheet {
                    if document.sheet(name).is_none() {
                        return Err(BuildError::UnresolvedReference {
                            kind: "print area",
                            reference: format!("{} -> {}", sheet.name, name),
                        });
                    }
                }
            }
        }

        Ok(resolved)
    }

    // === Phase: StyleInterning ===

    /// Register document named styles and conditional-format result styles
    fn intern_document_styles(&mut self, document: &DocumentSpec) -> BuildResult<()> {
        for named in &document.named_styles {
            self.registry
                .register_named(&named.name, named.style.clone())?;
        }

        for (i, format) in document.conditional_formats.iter().enumerate() {
            if let Some(style) = &format.style {
                let name = format!("Condition_{}", i + 1);
                self.registry.register_named(&name, style.clone())?;
                self.cf_styles.insert(format.id.clone(), name);
            }
        }

        Ok(())
    }

    // === Phase: SheetEmission ===

    fn emit_sheets(
        &mut self,
        document: &DocumentSpec,
        resolved: &ResolvedRefs,
    ) -> BuildResult<StagedDocument> {
        let mut staged = StagedDocument::default();

        for sheet in &document.sheets {
            staged.sheets.push(self.emit_sheet(document, sheet, resolved)?);
        }

        Ok(staged)
    }

    fn emit_sheet(
        &mut self,
        document: &DocumentSpec,
        sheet: &SheetSpec,
        resolved: &ResolvedRefs,
    ) -> BuildResult<StagedSheet> {
        debug!("assembler: emitting sheet '{}'", sheet.name);

        let mut columns = Vec::with_capacity(sheet.columns.len());
        for column in &sheet.columns {
            columns.push(self.stage_column(column)?);
        }

        // Ranges of validations attached to this sheet, for per-cell
        // attribution during the walk
        let validation_ranges: Vec<(Range, String)> = sheet
            .validations
            .iter()
            .filter_map(|id| {
                let validation = document.validation(id)?;
                let name = resolved.validation_names.get(id)?;
                Some((validation.range, name.clone()))
            })
            .collect();

        let mut rows = Vec::new();
        let mut row_extent = sheet.rows.len() as u32;
        let mut row_index: u32 = 0;

        while row_index < row_extent || (row_index as usize) < sheet.rows.len() {
            let row_spec = sheet.rows.get(row_index as usize);
            let staged_row = self.emit_row(
                sheet,
                row_spec,
                row_index,
                &validation_ranges,
                &mut row_extent,
            )?;
            rows.push(staged_row);
            row_index += 1;
        }

        let print_range = sheet.print_area.as_ref().map(|area| {
            let owner = area.sheet.as_deref().unwrap_or(&sheet.name);
            full_range_address(owner, area.range())
        });

        Ok(StagedSheet {
            name: sheet.name.clone(),
            protected: sheet.protected,
            print_range,
            columns,
            rows,
            frames: Vec::new(),
            cond_formats: Vec::new(),
            freeze: (sheet.freeze_cols, sheet.freeze_rows),
        })
    }

    fn stage_column(&mut self, column: &ColumnSpec) -> BuildResult<StagedColumn> {
        let style = column.width.map(|width| self.style_table.column_style(width));

        let cell_style = if column.style.is_some() || column.kind.is_some() {
            let base = match &column.style {
                Some(style_ref) => self.resolve_style_ref(style_ref)?,
                None => Style::default(),
            };
            let effective = apply_kind_format(base, column.kind.as_ref());
            let handle = self.registry.intern(&effective);
            Some(OdsStyleTable::style_name(&self.registry, handle))
        } else {
            None
        };

        Ok(StagedColumn {
            style,
            cell_style,
            visible: column.visible,
        })
    }

    fn emit_row(
        &mut self,
        sheet: &SheetSpec,
        row_spec: Option<&RowSpec>,
        row_index: u32,
        validation_ranges: &[(Range, String)],
        row_extent: &mut u32,
    ) -> BuildResult<StagedRow> {
        let empty_row = RowSpec::new();
        let row = row_spec.unwrap_or(&empty_row);

        let row_style = match &row.height {
            Some(height) => Some(self.style_table.row_style(*height)),
            None => None,
        };

        let mut cells = Vec::new();
        let mut col_extent = row.cells.len() as u16;
        self.update_col_extent(&sheet.name, row_index, &mut col_extent);

        let mut col_index: u16 = 0;
        while col_index < col_extent {
            let cell_spec = row.cells.get(col_index as usize);
            let coord = Coordinate::new(col_index, row_index);

            // Declaring a merge from a covered coordinate conflicts on the
            // covered cell itself, which is the error the caller wants
            if let Some(spec) = cell_spec {
                if spec.is_merged() {
                    let range = Range::from_indices(
                        col_index,
                        row_index,
                        col_index + spec.colspan - 1,
                        row_index + spec.rowspan - 1,
                    );
                    self.merges.declare(&sheet.name, range)?;
                    col_extent = col_extent.max(range.end.col + 1);
                    *row_extent = (*row_extent).max(range.end.row + 1);
                }
            }

            let staged = match self.merges.coverage(&sheet.name, coord) {
                Some(Coverage::Covered) => {
                    if let Some(spec) = cell_spec {
                        if !spec.value.is_empty() {
                            return Err(BuildError::Core(CoreError::CoveredCellValue {
                                sheet: sheet.name.clone(),
                                cell: coord.to_a1_string(),
                            }));
                        }
                    }
                    StagedCell {
                        covered: true,
                        ..StagedCell::default()
                    }
                }
                _ => match cell_spec {
                    Some(spec) => {
                        self.stage_cell(sheet, row, spec, coord, validation_ranges)?
                    }
                    None => StagedCell::default(),
                },
            };

            cells.push(staged);
            col_index += 1;
            self.update_col_extent(&sheet.name, row_index, &mut col_extent);
        }

        Ok(StagedRow {
            style: row_style,
            cells,
        })
    }

    /// Grow the column walk bound to cover merge regions crossing this row
    fn update_col_extent(&self, sheet: &str, row: u32, extent: &mut u16) {
        for region in self.merges.regions(sheet) {
            if region.start.row <= row && region.end.row >= row {
                *extent = (*extent).max(region.end.col + 1);
            }
        }
    }

    fn stage_cell(
        &mut self,
        sheet: &SheetSpec,
        row: &RowSpec,
        spec: &CellSpec,
        coord: Coordinate,
        validation_ranges: &[(Range, String)],
    ) -> BuildResult<StagedCell> {
        let column = sheet.column(coord.col as usize);

        // Value kind: explicit on the cell, else inferred from the owning
        // column, else default
        let column_kind = column.and_then(|c| c.kind.clone());
        let effective_kind = resolve_kind(&spec.value, column_kind.as_ref());
        let inferred_format = effective_kind.as_ref().and_then(kind_format);

        // Style: cell, else row, else column; the resolved kind
        // contributes a number format when the style leaves it General
        let style_ref = spec
            .style
            .as_ref()
            .or(row.style.as_ref())
            .or(column.and_then(|c| c.style.as_ref()));

        let style_name = if style_ref.is_some() || inferred_format.is_some() {
            let base = match style_ref {
                Some(style_ref) => self.resolve_style_ref(style_ref)?,
                None => Style::default(),
            };
            let effective = match inferred_format {
                Some(format) if base.number_format == NumberFormat::General => Style {
                    number_format: format,
                    ..base
                },
                _ => base,
            };
            let handle = self.registry.intern(&effective);
            Some(OdsStyleTable::style_name(&self.registry, handle))
        } else {
            None
        };

        let validation = validation_ranges
            .iter()
            .find(|(range, _)| range.contains(&coord))
            .map(|(_, name)| name.clone());

        let (value, formula, matrix) = match &spec.value {
            CellValue::Formula(formula) => {
                let text = self.translator.translate_expr(&formula.root)?;
                let matrix = formula.array.then_some((spec.colspan, spec.rowspan));
                (StagedValue::Empty, Some(format!("={}", text)), matrix)
            }
            other => (stage_value(other, effective_kind.as_ref()), None, None),
        };

        Ok(StagedCell {
            style: style_name,
            validation,
            formula,
            matrix,
            span: spec.is_merged().then_some((spec.colspan, spec.rowspan)),
            covered: false,
            value,
        })
    }

    fn resolve_style_ref(&mut self, style_ref: &StyleRef) -> BuildResult<Style> {
        match style_ref {
            StyleRef::Inline(style) => Ok(style.clone()),
            StyleRef::Named(name) => {
                let handle = self.registry.handle_for_name(name).ok_or_else(|| {
                    BuildError::UnresolvedReference {
                        kind: "style",
                        reference: name.clone(),
                    }
                })?;
                Ok(self
                    .registry
                    .get(handle)
                    .cloned()
                    .unwrap_or_default())
            }
        }
    }

    // === Phase: NamedRangeEmission ===

    fn emit_named_ranges(
        &mut self,
        document: &DocumentSpec,
    ) -> BuildResult<Vec<StagedNamedRange>> {
        let mut staged = Vec::with_capacity(document.named_ranges.len());

        for named_range in &document.named_ranges {
            // Initialize guaranteed the sheet qualifier resolves
            let sheet = named_range.target.sheet.as_deref().unwrap_or_default();
            let range = named_range.target.range();
            staged.push(StagedNamedRange {
                name: named_range.name.clone(),
                base_cell: abs_cell_address(sheet, range.start),
                range: abs_range_address(sheet, range),
            });
        }

        Ok(staged)
    }

    // === Phase: ChartEmission ===

    fn emit_charts(
        &mut self,
        document: &DocumentSpec,
        charts: &[ChartSpec],
        staged: &mut StagedDocument,
    ) -> BuildResult<()> {
        for (sheet_index, sheet) in document.sheets.iter().enumerate() {
            for chart_id in &sheet.charts {
                let chart = charts
                    .iter()
                    .find(|c| &c.id == chart_id)
                    .expect("chart resolved during Initialize");

                self.chart_counter += 1;
                let object_name = format!("Object {}", self.chart_counter);

                let xml = chart_document_xml(chart, &sheet.name)?;
                staged.charts.push(StagedChartDoc {
                    object_name: object_name.clone(),
                    xml,
                });

                let (width_px, height_px) = chart.size_px;
                let width_mm = width_px as f64 * MM_PER_PX;
                let height_mm = height_px as f64 * MM_PER_PX;
                let x_mm = chart.anchor.col as f64 * DEFAULT_COL_WIDTH_MM;
                let y_mm = chart.anchor.row as f64 * DEFAULT_ROW_HEIGHT_MM;

                let end_col =
                    chart.anchor.col + (width_mm / DEFAULT_COL_WIDTH_MM).ceil() as u16;
                let end_row =
                    chart.anchor.row + (height_mm / DEFAULT_ROW_HEIGHT_MM).ceil() as u32;
                let end_cell =
                    cell_address(Some(&sheet.name), Coordinate::new(end_col, end_row));

                let update_ranges = chart
                    .series
                    .iter()
                    .flat_map(|series| {
                        std::iter::once(&series.values).chain(series.categories.iter())
                    })
                    .map(|reference| {
                        let owner = reference.sheet.as_deref().unwrap_or(&sheet.name);
                        full_range_address(owner, reference.range())
                    })
                    .collect();

                staged.sheets[sheet_index].frames.push(StagedFrame {
                    object_name,
                    x_mm,
                    y_mm,
                    width_mm,
                    height_mm,
                    end_cell,
                    update_ranges,
                });
            }
        }

        Ok(())
    }

    // === Phase: ConditionalFormatEmission ===

    fn emit_conditional_formats(
        &mut self,
        document: &DocumentSpec,
        staged: &mut StagedDocument,
    ) -> BuildResult<()> {
        for (sheet_index, sheet) in document.sheets.iter().enumerate() {
            let mut formats: Vec<_> = sheet
                .conditional_formats
                .iter()
                .map(|id| {
                    document
                        .conditional_format(id)
                        .expect("conditional format resolved during Initialize")
                })
                .collect();
            // Lower priority evaluates first
            formats.sort_by_key(|f| f.priority);

            for format in formats {
                let target = range_address(Some(&sheet.name), format.range);
                let base_cell = cell_address(Some(&sheet.name), format.range.start);
                let style = self
                    .cf_styles
                    .get(&format.id)
                    .cloned()
                    .unwrap_or_else(|| "Default".to_string());

                let body = match &format.rule {
                    CfRule::CellIs { op, value, value2 } => {
                        use sheetsmith_core::CfOperator::*;
                        let value = match op {
                            Between => format!(
                                "between({},{})",
                                value,
                                value2.as_deref().unwrap_or("0")
                            ),
                            NotBetween => format!(
                                "not-between({},{})",
                                value,
                                value2.as_deref().unwrap_or("0")
                            ),
                            Equal => format!("={}", value),
                            NotEqual => format!("!={}", value),
                            GreaterThan => format!(">{}", value),
                            GreaterEqual => format!(">={}", value),
                            LessThan => format!("<{}", value),
                            LessEqual => format!("<={}", value),
                        };
                        StagedCfBody::Condition {
                            value,
                            style,
                            base_cell,
                        }
                    }

                    CfRule::Formula(formula) => {
                        let text = self.translator.translate_expr(&formula.root)?;
                        StagedCfBody::Condition {
                            value: format!("formula-is({})", text),
                            style,
                            base_cell,
                        }
                    }

                    CfRule::ColorScale { entries } => StagedCfBody::ColorScale {
                        entries: entries
                            .iter()
                            .map(|entry| {
                                let (value, entry_type) = threshold_parts(&entry.threshold);
                                StagedCfEntry {
                                    value,
                                    entry_type,
                                    color: Some(entry.color.to_hex()),
                                }
                            })
                            .collect(),
                    },

                    CfRule::DataBar { color, min, max } => {
                        let (min_value, min_type) = threshold_parts(min);
                        let (max_value, max_type) = threshold_parts(max);
                        StagedCfBody::DataBar {
                            color: color.to_hex(),
                            entries: vec![
                                StagedCfEntry {
                                    value: min_value,
                                    entry_type: min_type,
                                    color: None,
                                },
                                StagedCfEntry {
                                    value: max_value,
                                    entry_type: max_type,
                                    color: None,
                                },
                            ],
                        }
                    }

                    CfRule::IconSet { kind, thresholds } => {
                        let mut entries = vec![StagedCfEntry {
                            value: None,
                            entry_type: "minimum",
                            color: None,
                        }];
                        entries.extend(thresholds.iter().map(|threshold| {
                            let (value, entry_type) = threshold_parts(threshold);
                            StagedCfEntry {
                                value,
                                entry_type,
                                color: None,
                            }
                        }));
                        StagedCfBody::IconSet {
                            kind: kind.odf_name(),
                            entries,
                        }
                    }
                };

                staged.sheets[sheet_index]
                    .cond_formats
                    .push(StagedCondFormat { target, body });
            }
        }

        Ok(())
    }

    // === Phase: ValidationEmission ===

    fn emit_validations(
        &mut self,
        document: &DocumentSpec,
        resolved: &ResolvedRefs,
        staged: &mut StagedDocument,
    ) -> BuildResult<()> {
        // Emit in assigned-name order so the stream is deterministic
        let mut entries: Vec<(&String, &String)> = resolved.validation_names.iter().collect();
        entries.sort_by_key(|(_, name)| {
            name.trim_start_matches("val").parse::<u32>().unwrap_or(0)
        });

        for (id, name) in entries {
            let validation = document
                .validation(id)
                .expect("validation resolved during Initialize");

            // The validation is attached to exactly the sheets that name
            // it; base the addresses on the first attaching sheet
            let owner = document
                .sheets
                .iter()
                .find(|s| s.validations.contains(id))
                .map(|s| s.name.as_str())
                .unwrap_or_default();

            let condition = self.validation_condition(&validation.rule)?;

            staged.validations.push(StagedValidation {
                name: name.clone(),
                condition,
                allow_empty: validation.allow_empty,
                base_cell: cell_address(Some(owner), validation.range.start),
                help: match (&validation.input_title, &validation.input_message) {
                    (Some(title), Some(message)) => Some((title.clone(), message.clone())),
                    (None, Some(message)) => Some((String::new(), message.clone())),
                    _ => None,
                },
                error: match (&validation.error_title, &validation.error_message) {
                    (Some(title), Some(message)) => Some((title.clone(), message.clone())),
                    (None, Some(message)) => Some((String::new(), message.clone())),
                    _ => None,
                },
                severity: validation.severity.odf_name(),
            });
        }

        Ok(())
    }

    fn validation_condition(&self, rule: &ValidationRule) -> BuildResult<Option<String>> {
        let condition = match rule {
            ValidationRule::List { entries } => {
                let list = entries
                    .iter()
                    .map(|entry| format!("\"{}\"", entry.replace('"', "\"\"")))
                    .collect::<Vec<_>>()
                    .join(";");
                format!("of:cell-content-is-in-list({})", list)
            }
            ValidationRule::ListRange(reference) => {
                let expr = sheetsmith_core::Expr::Ref(reference.clone());
                format!(
                    "of:cell-content-is-in-list({})",
                    self.translator.translate_expr(&expr)?
                )
            }
            ValidationRule::WholeNumber { op, value, value2 } => format!(
                "of:cell-content-is-whole-number() and {}",
                comparison_condition(*op, &value.to_string(), value2.map(|v| v.to_string()))
            ),
            ValidationRule::Decimal { op, value, value2 } => format!(
                "of:cell-content-is-decimal-number() and {}",
                comparison_condition(*op, &value.to_string(), value2.map(|v| v.to_string()))
            ),
            ValidationRule::Date { op, value, value2 } => {
                let date = |d: &chrono::NaiveDate| {
                    d.format("DATE(%Y;%-m;%-d)").to_string()
                };
                format!(
                    "of:cell-content-is-date() and {}",
                    comparison_condition(*op, &date(value), value2.as_ref().map(date))
                )
            }
            ValidationRule::TextLength { op, value, value2 } => text_length_condition(
                *op,
                &value.to_string(),
                value2.map(|v| v.to_string()),
            ),
            ValidationRule::Custom(formula) => format!(
                "of:is-true-formula({})",
                self.translator.translate_expr(&formula.root)?
            ),
        };
        Ok(Some(condition))
    }

    // === Phase: Finalize ===

    /// Serialize the staged structures into the container streams and
    /// package them as one immutable artifact
    fn finalize(
        mut self,
        document: &DocumentSpec,
        staged: StagedDocument,
    ) -> BuildResult<OdsArtifact> {
        self.style_table.register_registry_formats(&self.registry);

        let content = content_xml(&staged, &self.style_table, &self.registry);
        let styles = styles_xml(&self.style_table, &self.registry);
        let meta = meta_xml(&document.meta);
        let settings = settings_xml(&staged.sheets);

        package(&staged, content, styles, meta, settings)
    }
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

/// One-call convenience: assemble with a fresh session
pub fn assemble(document: &DocumentSpec, charts: &[ChartSpec]) -> BuildResult<OdsArtifact> {
    Assembler::new().assemble(document, charts)
}

// === Helpers ===

fn check_unique_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> BuildResult<()> {
    let mut seen = std::collections::HashSet::new();
    for id in ids {
        if !seen.insert(id.to_string()) {
            return Err(BuildError::DuplicateIdentifier {
                kind,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}

/// Overlay a column kind's number format onto a base style that leaves
/// the format General
fn apply_kind_format(base: Style, kind: Option<&ValueKind>) -> Style {
    match kind.and_then(kind_format) {
        Some(format) if base.number_format == NumberFormat::General => Style {
            number_format: format,
            ..base
        },
        _ => base,
    }
}

/// The value kind in effect for a cell: explicit on the value, with plain
/// numbers adopting a column's currency/percentage declaration, else the
/// column's declared kind
fn resolve_kind(value: &CellValue, column: Option<&ValueKind>) -> Option<ValueKind> {
    match value.kind() {
        None => column.cloned(),
        Some(ValueKind::Number) => match column {
            Some(kind @ ValueKind::Currency { .. }) | Some(kind @ ValueKind::Percentage) => {
                Some(kind.clone())
            }
            _ => Some(ValueKind::Number),
        },
        Some(explicit) => Some(explicit),
    }
}

/// The number format a value kind asks the cell style to carry
fn kind_format(kind: &ValueKind) -> Option<NumberFormat> {
    match kind {
        ValueKind::Currency { code } => Some(NumberFormat::currency(code.clone())),
        ValueKind::Date => Some(NumberFormat::date_iso()),
        ValueKind::Percentage => Some(NumberFormat::percent(2)),
        ValueKind::Text | ValueKind::Number | ValueKind::Boolean => None,
    }
}

fn stage_value(value: &CellValue, effective_kind: Option<&ValueKind>) -> StagedValue {
    match value {
        CellValue::Empty => StagedValue::Empty,
        CellValue::Text(text) => StagedValue::Text(text.clone()),
        CellValue::Boolean(b) => StagedValue::Boolean(*b),
        CellValue::Date(date) => StagedValue::Date(date.format("%Y-%m-%d").to_string()),
        CellValue::Currency { amount, code } => StagedValue::Currency {
            amount: amount.to_string(),
            code: code.clone(),
        },
        CellValue::Number(n) => match effective_kind {
            Some(ValueKind::Currency { code }) => StagedValue::Currency {
                amount: n.to_string(),
                code: code.clone(),
            },
            Some(ValueKind::Percentage) => StagedValue::Percentage(*n),
            _ => StagedValue::Number(*n),
        },
        CellValue::Formula(_) => StagedValue::Empty,
    }
}

fn threshold_parts(threshold: &CfThreshold) -> (Option<String>, &'static str) {
    match threshold {
        CfThreshold::Minimum => (None, "minimum"),
        CfThreshold::Maximum => (None, "maximum"),
        CfThreshold::Number(n) => (Some(n.to_string()), "number"),
        CfThreshold::Percent(n) => (Some(n.to_string()), "percent"),
        CfThreshold::Percentile(n) => (Some(n.to_string()), "percentile"),
    }
}

fn comparison_condition(
    op: sheetsmith_core::ValidationOperator,
    value: &str,
    value2: Option<String>,
) -> String {
    use sheetsmith_core::ValidationOperator::*;
    match op {
        Between => format!(
            "cell-content-is-between({},{})",
            value,
            value2.as_deref().unwrap_or("0")
        ),
        NotBetween => format!(
            "cell-content-is-not-between({},{})",
            value,
            value2.as_deref().unwrap_or("0")
        ),
        Equal => format!("cell-content()={}", value),
        NotEqual => format!("cell-content()!={}", value),
        GreaterThan => format!("cell-content()>{}", value),
        GreaterEqual => format!("cell-content()>={}", value),
        LessThan => format!("cell-content()<{}", value),
        LessEqual => format!("cell-content()<={}", value),
    }
}

fn text_length_condition(
    op: sheetsmith_core::ValidationOperator,
    value: &str,
    value2: Option<String>,
) -> String {
    use sheetsmith_core::ValidationOperator::*;
    match op {
        Between => format!(
            "of:cell-content-text-length-is-between({},{})",
            value,
            value2.as_deref().unwrap_or("0")
        ),
        NotBetween => format!(
            "of:cell-content-text-length-is-not-between({},{})",
            value,
            value2.as_deref().unwrap_or("0")
        ),
        Equal => format!("of:cell-content-text-length()={}", value),
        NotEqual => format!("of:cell-content-text-length()!={}", value),
        GreaterThan => format!("of:cell-content-text-length()>{}", value),
        GreaterEqual => format!("of:cell-content-text-length()>={}", value),
        LessThan => format!("of:cell-content-text-length()<{}", value),
        LessEqual => format!("of:cell-content-text-length()<={}", value),
    }
}
