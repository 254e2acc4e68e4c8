use crate::Result;
use colored::Colorize;
use rbxthumb_core::{Thumbnail, ThumbnailState, UniverseThumbnail};
use serde::Serialize;

/// Table formatting utilities
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        let max_widths = headers.iter().map(|h| h.len()).collect();
        Self {
            headers,
            rows: Vec::new(),
            max_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        // Update max widths
        for (i, cell) in row.iter().enumerate() {
            if i < self.max_widths.len() {
                self.max_widths[i] = self.max_widths[i].max(visible_width(cell));
            }
        }
        self.rows.push(row);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.push_separator(&mut out, '┌', '┬', '┐');
        self.push_header(&mut out);
        self.push_separator(&mut out, '├', '┼', '┤');

        for row in &self.rows {
            self.push_row(&mut out, row);
        }

        self.push_separator(&mut out, '└', '┴', '┘');
        out
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    fn push_separator(&self, out: &mut String, left: char, middle: char, right: char) {
        out.push(left);
        for (i, &width) in self.max_widths.iter().enumerate() {
            out.push_str(&"─".repeat(width + 2));
            if i < self.max_widths.len() - 1 {
                out.push(middle);
            }
        }
        out.push(right);
        out.push('\n');
    }

    fn push_header(&self, out: &mut String) {
        out.push('│');
        for (i, header) in self.headers.iter().enumerate() {
            let padding = self.max_widths[i] - header.len();
            out.push_str(&format!(" {}{} │", header.bold(), " ".repeat(padding)));
        }
        out.push('\n');
    }

    fn push_row(&self, out: &mut String, row: &[String]) {
        out.push('│');
        for (i, cell) in row.iter().enumerate() {
            let width = self.max_widths.get(i).copied().unwrap_or(0);
            let padding = width.saturating_sub(visible_width(cell));
            out.push_str(&format!(" {}{} │", cell, " ".repeat(padding)));
        }
        out.push('\n');
    }
}

/// Width of a cell once ANSI colour codes are stripped
fn visible_width(cell: &str) -> usize {
    let mut width = 0;
    let mut in_escape = false;
    for c in cell.chars() {
        match (in_escape, c) {
            (false, '\u{1b}') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => width += 1,
        }
    }
    width
}

fn state_label(state: ThumbnailState) -> String {
    let label = state.as_str();
    match state {
        ThumbnailState::Completed => label.green().to_string(),
        ThumbnailState::Pending | ThumbnailState::InReview => label.yellow().to_string(),
        ThumbnailState::Error | ThumbnailState::Moderated => label.red().to_string(),
    }
}

fn thumbnail_cells(thumbnail: &Thumbnail) -> Vec<String> {
    vec![
        thumbnail.target_id.to_string(),
        state_label(thumbnail.state),
        thumbnail
            .image_url
            .clone()
            .unwrap_or_else(|| "-".to_string()),
    ]
}

/// Display thumbnails in a formatted table
pub fn display_thumbnails_table(thumbnails: &[Thumbnail]) {
    if thumbnails.is_empty() {
        println!("{}", "No thumbnails returned.".yellow());
        return;
    }

    let mut table = Table::new(vec![
        "Target ID".to_string(),
        "State".to_string(),
        "Image URL".to_string(),
    ]);

    for thumbnail in thumbnails {
        table.add_row(thumbnail_cells(thumbnail));
    }

    table.print();
}

/// Display universe thumbnails, one row per nested thumbnail
pub fn display_universe_thumbnails_table(universes: &[UniverseThumbnail]) {
    if universes.is_empty() {
        println!("{}", "No universes returned.".yellow());
        return;
    }

    let mut table = Table::new(vec![
        "Universe ID".to_string(),
        "Target ID".to_string(),
        "State".to_string(),
        "Image URL".to_string(),
    ]);

    for universe in universes {
        if let Some(error) = &universe.error {
            table.add_row(vec![
                universe.universe_id.to_string(),
                "-".to_string(),
                "Error".red().to_string(),
                error.clone(),
            ]);
        }

        for thumbnail in &universe.thumbnails {
            let mut row = thumbnail_cells(thumbnail);
            row.insert(0, universe.universe_id.to_string());
            table.add_row(row);
        }
    }

    table.print();
}

/// Pretty-print any serializable result as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
