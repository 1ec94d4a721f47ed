use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use aviso_model::{Catalog, HtsEntry, IndustryBucket, LookupOutcome, format_code};

use crate::pipeline::RunSummary;

pub fn print_summary(result: &RunSummary) {
    println!("Rules: {}", result.rules_path.display());
    println!("Output: {}", result.output_dir.display());
    println!(
        "Entries: {} across {} industries",
        result.entry_count, result.industry_count
    );
    if result.outputs.is_empty() {
        println!("No output formats selected.");
        return;
    }
    println!("{}", summary_table(result));
}

fn summary_table(result: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Format"),
        header_cell("File"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut total_rows = 0usize;
    for output in &result.outputs {
        total_rows += output.rows;
        table.add_row(vec![
            Cell::new(output.format)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(output.path.display()),
            Cell::new(output.rows),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
    ]);
    table
}

const MISSING_VALUE: &str = "—";

pub fn print_industries(catalog: &Catalog) {
    if catalog.is_empty() {
        println!("No hay industrias con fracciones arancelarias en el archivo de reglas.");
        return;
    }
    println!("{}", industries_table(catalog));
}

fn industries_table(catalog: &Catalog) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Clave"),
        header_cell("Industria"),
        header_cell("Sector"),
        header_cell("Tipo de aviso"),
        header_cell("Fracciones"),
        header_cell("Con aviso"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for bucket in catalog.industries_by_name() {
        let industry = &bucket.industry;
        table.add_row(vec![
            Cell::new(&industry.key)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&industry.name),
            text_or_dash(&industry.sector),
            text_or_dash(&industry.notice_type),
            Cell::new(bucket.entries.len()),
            count_cell(bucket.notice_count(), Color::Yellow),
        ]);
    }
    table
}

/// Print one industry's summary followed by its fractions sorted by code.
pub fn print_industry(bucket: &IndustryBucket) {
    println!("{}", industry_summary_table(bucket));
    println!("{}", industry_entries_table(bucket));
}

fn industry_summary_table(bucket: &IndustryBucket) -> Table {
    let industry = &bucket.industry;
    let mut table = Table::new();
    apply_table_style(&mut table);
    let rows = [
        ("Industria", industry.name.clone()),
        ("Sector", fallback(&industry.sector, MISSING_VALUE)),
        ("Tipo de aviso", fallback(&industry.notice_type, MISSING_VALUE)),
        ("Notas", fallback(&industry.notes, "Sin notas adicionales")),
    ];
    for (label, value) in rows {
        table.add_row(vec![header_cell(label), Cell::new(value)]);
    }
    table
}

fn industry_entries_table(bucket: &IndustryBucket) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Fracción"),
        header_cell("Descripción"),
        header_cell("Aviso automático"),
        header_cell("Fundamento"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for entry in bucket.sorted_entries() {
        let badge = if entry.requires_notice {
            Color::Yellow
        } else {
            Color::Green
        };
        table.add_row(vec![
            Cell::new(format_code(&entry.hts_code)),
            Cell::new(&entry.hts_description),
            Cell::new(entry.requires_notice_label())
                .fg(badge)
                .add_attribute(Attribute::Bold),
            Cell::new(fallback(&entry.rule_reference, "N/A")),
        ]);
    }
    table
}

/// Result of a single fraction lookup.
#[derive(Debug)]
pub enum LookupReport<'a> {
    Found(&'a HtsEntry),
    Message(String),
}

impl<'a> LookupReport<'a> {
    /// Translate a catalog lookup into the message shown to the user.
    pub fn from_outcome(outcome: LookupOutcome<'a>, industry_key: &str, code: &str) -> Self {
        match outcome {
            LookupOutcome::Found(entry) => LookupReport::Found(entry),
            LookupOutcome::UnknownIndustry => LookupReport::Message(format!(
                "La industria '{industry_key}' no está definida en el archivo de reglas."
            )),
            LookupOutcome::UnknownCode if code.trim().is_empty() => LookupReport::Message(
                "Ingresa una fracción arancelaria para consultar.".to_string(),
            ),
            LookupOutcome::UnknownCode => LookupReport::Message(format!(
                "No encontramos la fracción {} en el catálogo de esta industria.",
                format_code(code)
            )),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupReport::Found(_))
    }

    pub fn headline(&self) -> String {
        match self {
            LookupReport::Found(entry) if entry.requires_notice => {
                "La fracción requiere aviso automático.".to_string()
            }
            LookupReport::Found(_) => "La fracción no requiere aviso automático.".to_string(),
            LookupReport::Message(message) => message.clone(),
        }
    }

    pub fn print(&self) {
        match self {
            LookupReport::Found(entry) => {
                println!("{}", self.headline());
                println!("{}", detail_table(entry));
            }
            LookupReport::Message(message) => eprintln!("{message}"),
        }
    }
}

fn detail_table(entry: &HtsEntry) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let rows = [
        ("Fracción", format_code(&entry.hts_code)),
        ("Descripción", entry.hts_description.clone()),
        ("Fundamento", fallback(&entry.rule_reference, "N/A")),
        (
            "Comentarios",
            fallback(&entry.comments, "Sin comentarios adicionales."),
        ),
        ("Industria", entry.industry_name.clone()),
        ("Tipo de aviso", fallback(&entry.notice_type, MISSING_VALUE)),
    ];
    for (label, value) in rows {
        table.add_row(vec![header_cell(label), Cell::new(value)]);
    }
    table
}

fn fallback(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn text_or_dash(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(value)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
