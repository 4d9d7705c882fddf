//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use extbuild_builder::{BuildPlan, PhaseReport};
use extbuild_config::PackageMetadata;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

/// Whether the configured build tool resolves on PATH
#[derive(Debug, Clone, Serialize)]
pub struct ToolCheck {
    pub tool: String,
    pub path: Option<PathBuf>,
}

impl ToolCheck {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Result of a CLI command, ready to render
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "snake_case")]
pub enum OperationResult {
    Phase(PhaseReport),
    Plan(BuildPlan),
    Check(ToolCheck),
    Info(PackageMetadata),
}

impl OperationResult {
    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Output renderer for CLI results; results go to stdout
#[derive(Clone)]
pub struct OutputRenderer {
    json_output: bool,
}

impl OutputRenderer {
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    /// Render operation result
    pub fn render_result(&self, result: &OperationResult) -> io::Result<()> {
        if self.json_output {
            let json = result.to_json().map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        match result {
            OperationResult::Phase(report) => {
                self.render_phase_report(report);
            }
            OperationResult::Plan(plan) => println!("{}", plan_table(plan)),
            OperationResult::Check(check) => self.render_tool_check(check),
            OperationResult::Info(metadata) => println!("{}", info_table(metadata)),
        }
        Ok(())
    }

    fn render_phase_report(&self, report: &PhaseReport) {
        if report.steps_run() == 0 {
            println!("[OK] {}: nothing to build", report.phase);
            return;
        }

        let mut table = new_table();
        table.set_header(vec![
            Cell::new("Step").add_attribute(Attribute::Bold),
            Cell::new("Command").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Duration").add_attribute(Attribute::Bold),
        ]);

        let records = report.reports.iter().flat_map(|r| r.records.iter());
        for (index, record) in records.enumerate() {
            table.add_row(vec![
                Cell::new(index + 1),
                Cell::new(&record.step),
                Cell::new(record.status).fg(Color::Green),
                Cell::new(format!("{}ms", record.duration.as_millis())),
            ]);
        }

        println!("{table}");
        println!("[OK] {} completed", report.phase);
    }

    fn render_tool_check(&self, check: &ToolCheck) {
        match &check.path {
            Some(path) => println!("[OK] {} found at {}", check.tool, path.display()),
            None => println!("[ERROR] {} not found on PATH", check.tool),
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn plan_table(plan: &BuildPlan) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Step").add_attribute(Attribute::Bold),
        Cell::new("Tool").add_attribute(Attribute::Bold),
        Cell::new("Target").add_attribute(Attribute::Bold),
    ]);
    for (index, step) in plan.steps().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&step.tool),
            Cell::new(&step.target),
        ]);
    }
    table
}

fn info_table(metadata: &PackageMetadata) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Field").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);

    let optional = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let rows = [
        ("Name", metadata.name.clone()),
        ("Version", metadata.version.clone()),
        ("Description", metadata.description.clone()),
        ("URL", optional(&metadata.url)),
        ("Author", optional(&metadata.author)),
        ("License", metadata.license.clone()),
        ("Packages", metadata.packages.join(", ")),
    ];
    for (field, value) in rows {
        table.add_row(vec![Cell::new(field).add_attribute(Attribute::Bold), Cell::new(value)]);
    }
    table
}
