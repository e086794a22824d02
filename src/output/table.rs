//
//  teamcity-cli
//  output/table.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Table Output Formatting
//!
//! Utilities for rendering property bags and resource lists as Unicode
//! tables with `comfy_table`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use teamcity_cli::output::TableBuilder;
//!
//! TableBuilder::new()
//!     .headers(["Name", "Value"])
//!     .row(["teamcity.step.mode", "default"])
//!     .print();
//! ```
//!
//! ## Notes
//!
//! Values of `secure:` properties are masked in tables. JSON and YAML output
//! carry them unchanged.

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::codec::{Polymorphic, PropertyBag};

/// Shown instead of a secure value.
pub const MASK: &str = "******";

/// Creates a new table with the standard CLI styling.
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// A builder for constructing formatted tables.
pub struct TableBuilder {
    table: Table,
    headers: Vec<String>,
    color: bool,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            table: create_table(),
            headers: Vec::new(),
            color: console::colors_enabled(),
        }
    }

    pub fn color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    /// Sets the table headers, cyan when color is enabled.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = headers.into_iter().map(|s| s.into()).collect();
        if self.color {
            let header_cells: Vec<Cell> = self
                .headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect();
            self.table.set_header(header_cells);
        } else {
            self.table.set_header(&self.headers);
        }
        self
    }

    pub fn row<I, S>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Vec<String> = cells.into_iter().map(|s| s.into()).collect();
        self.table.add_row(row);
        self
    }

    pub fn rows<I, R, S>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for row in rows {
            let row: Vec<String> = row.into_iter().map(|s| s.into()).collect();
            self.table.add_row(row);
        }
        self
    }

    pub fn print(self) {
        println!("{}", self.table);
    }

    pub fn build(self) -> Table {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Name/value table of a bag, in wire order, secure values masked.
pub fn property_table(bag: &PropertyBag, color: bool) -> TableBuilder {
    let rows = bag.iter().map(|property| {
        let value = if property.is_secure() && !property.value.is_empty() {
            MASK.to_string()
        } else {
            display_value(&property.value)
        };
        let mut name = property.name.clone();
        if property.inherited {
            name.push_str(" (inherited)");
        }
        [name, value]
    });
    TableBuilder::new()
        .color(color)
        .headers(["Property", "Value"])
        .rows(rows)
}

/// One row per resource: id, type, name and whether it decoded to a known variant.
pub fn resource_summary_table<P: Polymorphic>(items: &[P], color: bool) -> TableBuilder {
    let rows = items.iter().map(|item| {
        let envelope = item.to_envelope();
        [
            envelope.id.unwrap_or_else(|| "-".to_string()),
            item.discriminator().to_string(),
            envelope.name.unwrap_or_else(|| "-".to_string()),
            format_known(!item.is_generic(), color),
            format_bool(envelope.disabled.unwrap_or(false), color),
        ]
    });
    TableBuilder::new()
        .color(color)
        .headers(["ID", "Type", "Name", "Typed", "Disabled"])
        .rows(rows)
}

/// Makes list separators visible in a single table cell.
pub fn display_value(value: &str) -> String {
    value.replace("\r\n", "\n")
}

pub fn format_known(known: bool, color: bool) -> String {
    use console::style;
    match (known, color) {
        (true, true) => style("typed").green().to_string(),
        (false, true) => style("generic").yellow().to_string(),
        (true, false) => "typed".to_string(),
        (false, false) => "generic".to_string(),
    }
}

/// Formats a boolean value as Yes/No.
pub fn format_bool(value: bool, color: bool) -> String {
    if color {
        use console::style;
        if value {
            style("Yes").green().to_string()
        } else {
            style("No").dim().to_string()
        }
    } else if value {
        "Yes".to_string()
    } else {
        "No".to_string()
    }
}
