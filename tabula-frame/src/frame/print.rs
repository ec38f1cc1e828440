use std::fmt::Display;

use comfy_table::{presets, Attribute, Cell, ContentArrangement, Table};

use super::DataFrame;

pub fn print_frame(frame: &DataFrame) -> impl Display {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.load_preset(presets::UTF8_FULL);

    if frame.ncols() == 0 {
        return table;
    }

    let header = frame
        .columns()
        .iter()
        .map(|col| Cell::new(col.name()).add_attribute(Attribute::Bold))
        .collect::<Vec<_>>();
    table.set_header(header);

    for row in 0..frame.nrows() {
        let cells = frame
            .columns()
            .iter()
            .map(|col| Cell::new(col.value(row)))
            .collect::<Vec<_>>();
        table.add_row(cells);
    }

    table
}
