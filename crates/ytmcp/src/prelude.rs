pub use crate::error::Error;

pub use anstream::{eprintln, println};
pub use color_eyre::eyre::{eyre, Context, OptionExt, Result};

pub use std::format as f;

/// Creates a new `prettytable::Table` with the default format.
pub fn new_table() -> prettytable::Table {
    let mut table = prettytable::Table::new();

    let format = prettytable::format::FormatBuilder::new()
        .column_separator(' ')
        .borders(' ')
        .padding(1, 1)
        .build();
    table.set_format(format);

    table
}
