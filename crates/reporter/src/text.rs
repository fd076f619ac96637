use crate::document::{Metric, NO_DATA, ReportDocument, Section, SectionContent};
use crate::format::{format_amount, format_rate};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use core_types::Product;

/// Renders the document as plain text with one table per section, for the terminal.
pub fn render_text(doc: &ReportDocument) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\nGenerated on {}\n\n", doc.title, doc.generated_label()));
    out.push_str("Overall statistics\n");
    out.push_str(&metric_table(&doc.overview).to_string());
    out.push('\n');

    for section in &doc.sections {
        out.push('\n');
        out.push_str(&render_section(section));
    }
    out
}

fn render_section(section: &Section) -> String {
    let mut out = format!("{}\n", section.title);

    if section.is_empty() {
        out.push_str(&format!("  {NO_DATA}\n"));
        return out;
    }

    match &section.content {
        SectionContent::Groups(groups) => {
            // Groups share the same metric labels, so they fit in one table.
            let mut table = new_table();
            let mut header = vec![Cell::new("")];
            if let Some(first) = groups.first() {
                header.extend(first.metrics.iter().map(|m| Cell::new(m.label)));
            }
            table.set_header(header);

            for group in groups {
                let mut row = vec![Cell::new(&group.heading)];
                row.extend(
                    group
                        .metrics
                        .iter()
                        .map(|m| Cell::new(&m.value).set_alignment(CellAlignment::Right)),
                );
                table.add_row(row);
            }
            out.push_str(&table.to_string());
            out.push('\n');
        }
        SectionContent::Table(data) => {
            let mut table = new_table();
            table.set_header(data.headers.clone());
            for row in &data.rows {
                table.add_row(row.clone());
            }
            out.push_str(&table.to_string());
            out.push('\n');
        }
    }
    out
}

/// Lists products one per row, in the given order.
pub fn render_products(products: &[&Product]) -> String {
    if products.is_empty() {
        return "No matching products.\n".to_string();
    }

    let mut table = new_table();
    table.set_header(vec![
        "ID", "Name", "Issuer", "Country", "Currency", "Issue date", "Nominal", "Coupon", "Type", "Risk",
    ]);
    for p in products {
        table.add_row(vec![
            Cell::new(p.id()),
            Cell::new(p.name()),
            Cell::new(p.issuer()),
            Cell::new(p.country()),
            Cell::new(p.currency()),
            Cell::new(p.issue_date()),
            Cell::new(format_amount(p.nominal_value())).set_alignment(CellAlignment::Right),
            Cell::new(p.coupon_rate().map(format_rate).unwrap_or_default())
                .set_alignment(CellAlignment::Right),
            Cell::new(p.product_type()),
            Cell::new(p.risk_level()),
        ]);
    }
    format!("{table}\n{} product(s)\n", products.len())
}

fn metric_table(metrics: &[Metric]) -> Table {
    let mut table = new_table();
    for m in metrics {
        table.add_row(vec![
            Cell::new(m.label),
            Cell::new(&m.value).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}
