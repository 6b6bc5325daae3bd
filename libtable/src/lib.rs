//! Titled text tables and CSV export shared by assembly logs and memory dumps.

use std::io::Write;

use anyhow::Context;
use lazy_static::lazy_static;
use prettytable::{
    format::{FormatBuilder, LinePosition, LineSeparator, TableFormat},
    Cell, Row, Table,
};

lazy_static! {
    static ref TABLE_DISPLAY_FORMAT: TableFormat = FormatBuilder::new()
        .column_separator('│')
        .borders(' ')
        .separator(LinePosition::Title, LineSeparator::new('─', '┼', ' ', ' '))
        .padding(1, 1)
        .build();
}

pub fn header_row(columns: &[&str]) -> Row {
    Row::new(columns.iter().map(|title| Cell::new(title)).collect())
}

/// Builds a display table with `columns` as its titles.
pub fn titled_table<I>(columns: &[&str], rows: I) -> Table
where
    I: IntoIterator<Item = Row>,
{
    let mut table = Table::init(rows.into_iter().collect());
    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(header_row(columns));
    table
}

/// Writes `rows` as CSV, header row first. `what` names the table in the error context.
pub fn write_csv<I, W>(columns: &[&str], rows: I, writer: W, what: &'static str) -> anyhow::Result<()>
where
    I: IntoIterator<Item = Row>,
    W: Write,
{
    let table = Table::init([header_row(columns)].into_iter().chain(rows).collect());

    table
        .to_csv(writer)
        .with_context(|| format!("Writing {} as CSV", what))?;

    Ok(())
}
