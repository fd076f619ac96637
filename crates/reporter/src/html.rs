use crate::document::{Group, Metric, NO_DATA, ReportDocument, Section, SectionContent, Table};

const STYLE: &str = r#"
        body { font-family: Arial, sans-serif; margin: 20px; color: #222; }
        .header { background-color: #f0f0f0; padding: 20px; border-radius: 5px; }
        .section { margin: 20px 0; padding: 15px; border: 1px solid #ddd; border-radius: 5px; }
        .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 15px; }
        .stat-card { background-color: #f9f9f9; padding: 15px; border-radius: 5px; text-align: center; }
        .stat-value { font-size: 22px; font-weight: bold; color: #2c5aa0; }
        .stat-label { color: #666; margin-top: 5px; }
        .notes { color: #444; font-size: 14px; }
        .empty { color: #888; font-style: italic; }
        table { width: 100%; border-collapse: collapse; margin: 10px 0; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { background-color: #f2f2f2; }
"#;

/// Renders the document as a self-contained HTML page.
///
/// All text coming from the data (issuer names in particular) is escaped.
pub fn render_html(doc: &ReportDocument) -> String {
    let mut html = String::with_capacity(16 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("    <title>{}</title>\n", escape_html(&doc.title)));
    html.push_str(&format!("    <style>{STYLE}    </style>\n"));
    html.push_str("</head>\n<body>\n");

    html.push_str("    <div class=\"header\">\n");
    html.push_str(&format!("        <h1>{}</h1>\n", escape_html(&doc.title)));
    html.push_str(&format!(
        "        <p>Generated on {}</p>\n",
        escape_html(&doc.generated_label())
    ));
    html.push_str("    </div>\n");

    html.push_str("    <div class=\"section\">\n        <h2>Overall statistics</h2>\n");
    push_stats(&mut html, &doc.overview);
    html.push_str("    </div>\n");

    for section in &doc.sections {
        push_section(&mut html, section);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_section(html: &mut String, section: &Section) {
    html.push_str("    <div class=\"section\">\n");
    html.push_str(&format!("        <h2>{}</h2>\n", escape_html(section.title)));

    if section.is_empty() {
        html.push_str(&format!("        <p class=\"empty\">{NO_DATA}</p>\n"));
    } else {
        match &section.content {
            SectionContent::Groups(groups) => groups.iter().for_each(|g| push_group(html, g)),
            SectionContent::Table(table) => push_table(html, table),
        }
    }

    html.push_str("    </div>\n");
}

fn push_group(html: &mut String, group: &Group) {
    html.push_str(&format!("        <h3>{}</h3>\n", escape_html(&group.heading)));
    push_stats(html, &group.metrics);
    if !group.notes.is_empty() {
        html.push_str("        <ul class=\"notes\">\n");
        for note in &group.notes {
            html.push_str(&format!("            <li>{}</li>\n", escape_html(note)));
        }
        html.push_str("        </ul>\n");
    }
}

fn push_stats(html: &mut String, metrics: &[Metric]) {
    html.push_str("        <div class=\"stats\">\n");
    for m in metrics {
        html.push_str(&format!(
            "            <div class=\"stat-card\"><div class=\"stat-value\">{}</div><div class=\"stat-label\">{}</div></div>\n",
            escape_html(&m.value),
            escape_html(m.label)
        ));
    }
    html.push_str("        </div>\n");
}

fn push_table(html: &mut String, table: &Table) {
    html.push_str("        <table>\n            <thead><tr>");
    for header in &table.headers {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead>\n            <tbody>\n");
    for row in &table.rows {
        html.push_str("                <tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("            </tbody>\n        </table>\n");
}

/// Escapes the five characters with special meaning in HTML text and attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
