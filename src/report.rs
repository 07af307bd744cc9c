use colored::Colorize;
use std::fmt;
use std::fs::File;
use std::io::Write;

use crate::domain::network::router::FlowOutcome;
use crate::domain::resource::resource_pool::ResourceKind;
use crate::domain::triage::TriageReport;
use crate::error::Result;

/// Writes the allocation table as `;`-separated CSV, one row per incident.
///
/// Columns: `Category;Incident;Node` followed by one column per resource kind in pool order.
pub fn write_allocation_csv<W: Write>(report: &TriageReport, writer: W) -> Result<()> {
    let kinds: Vec<ResourceKind> = report.remaining.resources().iter().map(|r| r.kind).collect();

    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    let mut headers = vec!["Category".to_string(), "Incident".to_string(), "Node".to_string()];
    headers.extend(kinds.iter().map(|k| k.name().to_string()));
    csv_wtr.write_record(&headers)?;

    for (category, records) in report.allocations.iter() {
        for record in records {
            let mut row = vec![category.to_string(), record.sequence.to_string(), record.node.to_string()];
            row.extend(kinds.iter().map(|&k| record.units(k).to_string()));
            csv_wtr.write_record(&row)?;
        }
    }

    csv_wtr.flush()?;
    Ok(())
}

pub fn write_allocation_csv_file(report: &TriageReport, file_path: &str) -> Result<()> {
    let file = File::create(file_path)?;
    write_allocation_csv(report, file)?;

    log::info!("Allocation table written to '{}'.", file_path);
    Ok(())
}

/// Human-readable rendering of the three tables.
pub fn render_text(report: &TriageReport) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail.
    if let Err(e) = write_report(&mut out, report) {
        log::error!("Failed to render the triage report: {}", e);
    }

    out
}

fn write_report(out: &mut impl fmt::Write, report: &TriageReport) -> fmt::Result {
    if !report.rejected.is_empty() {
        writeln!(out, "{}", "Rejected Incidents:".bold().red())?;
        for rejected in &report.rejected {
            writeln!(out, "#{}: {}", rejected.index, rejected.reason)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "Allocated Resources:".bold())?;
    for (category, records) in report.allocations.iter() {
        writeln!(out, "Incident Type: {}", category)?;
        for record in records {
            writeln!(out, "{}", record)?;
        }
    }

    writeln!(out, "\n{}", "Shortest Distances:".bold())?;
    for row in &report.shortest_paths.rows {
        writeln!(out, "From Emergency Unit {}:", row.unit)?;
        for entry in &row.targets {
            writeln!(out, "Shortest Path to Incident {}: {}", entry.incident_node, entry.outcome)?;
        }
    }

    writeln!(out, "\n{}", "Max Flows Information:".bold())?;
    for row in &report.flows.rows {
        writeln!(out, "From Emergency Unit {}:", row.unit)?;
        for entry in &row.targets {
            match &entry.outcome {
                FlowOutcome::NoPath => {
                    writeln!(out, "No path from Emergency Unit {} to Incident {}", row.unit, entry.incident_node)?;
                }
                FlowOutcome::Routed(flow) => {
                    writeln!(out, "Max Flow from Emergency Unit {} to Incident {}: {}", row.unit, entry.incident_node, flow.value)?;
                    let path: Vec<&str> = flow.path.iter().map(|n| n.as_str()).collect();
                    writeln!(out, "Path taken: {}", path.join(" -> "))?;
                    writeln!(out, "Flow Distribution along the path:")?;
                    for edge in &flow.distribution {
                        writeln!(out, "Edge ({}, {}): {}", edge.from, edge.to, edge)?;
                    }
                }
            }
        }
    }

    Ok(())
}
