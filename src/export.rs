//! Export the selected stack as JSON or as a standalone HTML document.
//!
//! Both serializers are pure over the selection; the JSON form round-trips
//! through `serde_json` and the HTML form escapes every catalog-sourced
//! string before it is embedded in markup, so catalog content can never
//! alter the document structure.

use anyhow::Result;
use quick_xml::escape::escape;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::Path;

use crate::models::Pattern;

/// Structured export of a selected stack.
#[derive(Debug, Serialize, Deserialize)]
pub struct StackExport {
    /// The selected pattern records, verbatim, in selection order.
    pub patterns: Vec<Pattern>,
    pub count: usize,
    /// Sorted union of every selected pattern's fabric components.
    pub components: Vec<String>,
}

impl StackExport {
    pub fn new(selected: &[&Pattern]) -> Self {
        let components: BTreeSet<String> = selected
            .iter()
            .flat_map(|p| p.fabric_components.iter().cloned())
            .collect();

        Self {
            patterns: selected.iter().map(|p| (*p).clone()).collect(),
            count: selected.len(),
            components: components.into_iter().collect(),
        }
    }
}

/// Serialize the selection as pretty-printed JSON.
pub fn to_stack_json(selected: &[&Pattern]) -> Result<String> {
    let export = StackExport::new(selected);
    Ok(serde_json::to_string_pretty(&export)?)
}

/// Render the selection as a self-contained HTML document.
///
/// Lists name, domain, complexity, maturity, description, and fabric
/// components per pattern, in selection order. Absent optional fields
/// display as "N/A". The document depends only on the selection, so
/// identical selections always render byte-identically.
pub fn to_stack_html(selected: &[&Pattern]) -> String {
    let mut html = String::new();

    html.push_str(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>HR Analytics Fabric Catalog Export</title>\n\
         <style>\n\
         body { font-family: Arial, sans-serif; margin: 20px; color: #333; }\n\
         h1 { color: #1f77b4; }\n\
         .pattern { margin: 20px 0; padding: 15px; border: 1px solid #ddd; border-radius: 5px; }\n\
         .pattern h2 { color: #1f77b4; margin-top: 0; }\n\
         .metadata { color: #666; font-size: 0.9em; }\n\
         .section { margin: 10px 0; }\n\
         .section-title { font-weight: bold; color: #1f77b4; }\n\
         ul { margin: 5px 0; padding-left: 20px; }\n\
         li { margin: 3px 0; }\n\
         </style>\n\
         </head>\n\
         <body>\n\
         <h1>HR Analytics Fabric Catalog</h1>\n",
    );
    let _ = writeln!(
        html,
        "<p>Generated Stack: {} patterns selected</p>",
        selected.len()
    );

    for pattern in selected {
        let _ = writeln!(html, "<div class=\"pattern\">");
        let _ = writeln!(html, "<h2>{}</h2>", escape(&pattern.name));
        let _ = writeln!(html, "<div class=\"metadata\">");
        let _ = writeln!(
            html,
            "<p><strong>Domain:</strong> {}</p>",
            escape(pattern.domain.as_deref().unwrap_or("N/A"))
        );
        let _ = writeln!(
            html,
            "<p><strong>Complexity:</strong> {} | <strong>Maturity:</strong> {}</p>",
            escape(pattern.complexity.as_deref().unwrap_or("N/A")),
            escape(pattern.maturity.as_deref().unwrap_or("N/A"))
        );
        let _ = writeln!(html, "</div>");
        let _ = writeln!(html, "<div class=\"section\">");
        let _ = writeln!(html, "<div class=\"section-title\">Description</div>");
        let _ = writeln!(
            html,
            "<p>{}</p>",
            escape(if pattern.description.is_empty() {
                "N/A"
            } else {
                pattern.description.as_str()
            })
        );
        let _ = writeln!(html, "</div>");
        let _ = writeln!(html, "<div class=\"section\">");
        let _ = writeln!(html, "<div class=\"section-title\">Fabric Components</div>");
        let _ = writeln!(html, "<ul>");
        for component in &pattern.fabric_components {
            let _ = writeln!(html, "<li>{}</li>", escape(component));
        }
        let _ = writeln!(html, "</ul>");
        let _ = writeln!(html, "</div>");
        let _ = writeln!(html, "</div>");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Write export content to a file, or to stdout when no path is given.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            eprintln!("Exported stack to {}", path.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
