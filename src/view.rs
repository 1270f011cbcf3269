//! Presentational views selected for a turn.
//!
//! Views carry the data a front-end needs; [`View::render_text`] gives the
//! plain-text rendering used by the terminal client.

use std::fmt::Write;

use crate::catalog::Vehicle;
use crate::orchestrator::TextStream;
use crate::tools::ComparisonData;

/// Input kind of a test-drive form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
}

/// Local capture form. Submission stays client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDriveForm {
    pub model: String,
    pub fields: Vec<FormField>,
}

impl TestDriveForm {
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            fields: vec![
                FormField {
                    label: "Full Name",
                    kind: FieldKind::Text,
                },
                FormField {
                    label: "Email",
                    kind: FieldKind::Email,
                },
                FormField {
                    label: "Phone",
                    kind: FieldKind::Phone,
                },
                FormField {
                    label: "Preferred Date",
                    kind: FieldKind::Date,
                },
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub enum View {
    /// Live assistant text
    Text(TextStream),
    /// Single vehicle; `fallback` is set when the requested model was not found
    VehicleShowcase { vehicle: Vehicle, fallback: bool },
    Inventory { vehicles: Vec<Vehicle> },
    Comparison(ComparisonData),
    TestDriveForm(TestDriveForm),
}

impl View {
    pub fn kind(&self) -> &'static str {
        match self {
            View::Text(_) => "text",
            View::VehicleShowcase { .. } => "vehicle-showcase",
            View::Inventory { .. } => "inventory",
            View::Comparison(_) => "comparison",
            View::TestDriveForm(_) => "test-drive-form",
        }
    }

    /// Plain-text rendering. Text views render their current buffer.
    pub fn render_text(&self) -> String {
        match self {
            View::Text(stream) => stream.current(),
            View::VehicleShowcase { vehicle, .. } => render_showcase(vehicle),
            View::Inventory { vehicles } => render_inventory(vehicles),
            View::Comparison(data) => render_comparison(data),
            View::TestDriveForm(form) => render_form(form),
        }
    }
}

fn render_showcase(vehicle: &Vehicle) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", vehicle.year, vehicle.model);
    let _ = writeln!(
        out,
        "{} | Starting at {} | {}",
        vehicle.trim,
        vehicle.display_price(),
        vehicle.availability_label()
    );
    out.push_str("Key Features:\n");
    for feature in &vehicle.features {
        let _ = writeln!(out, "  - {feature}");
    }
    out
}

fn render_inventory(vehicles: &[Vehicle]) -> String {
    let mut out = String::from("Available Inventory\n");
    for vehicle in vehicles {
        let _ = writeln!(
            out,
            "  {} {} ({}) {} [{}]",
            vehicle.year,
            vehicle.model,
            vehicle.trim,
            vehicle.display_price(),
            vehicle.availability_label()
        );
    }
    out
}

fn render_comparison(data: &ComparisonData) -> String {
    let width = data
        .categories
        .iter()
        .flat_map(|c| c.specs.iter())
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
        .max("Feature".len());
    let mut out = format!("{:<width$}", "Feature");
    for model in &data.models {
        let _ = write!(out, " | {model}");
    }
    out.push('\n');
    for category in &data.categories {
        let _ = writeln!(out, "[{}]", category.name);
        for spec in &category.specs {
            let _ = write!(out, "{spec:<width$}");
            for model in &data.models {
                let _ = write!(out, " | {:<w$}", "\u{2713}", w = model.chars().count());
            }
            out.push('\n');
        }
    }
    out
}

fn render_form(form: &TestDriveForm) -> String {
    let mut out = format!("Schedule Test Drive - {}\n", form.model);
    for field in &form.fields {
        let _ = writeln!(out, "  {}: ________", field.label);
    }
    out
}
