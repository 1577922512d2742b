//! Column-aligned plain-text tables. Cells never contain whitespace in the header,
//! so a headerless table can be consumed with `awk` or `cut`.

use std::fmt::{self, Write};

use modelref::color::{MaybePaint, HEADER};

pub(crate) struct Table {
    header: Vec<String>,
    body: Vec<Vec<String>>,
    print_header: bool,
}

impl Table {
    pub(crate) fn new(header: &[&str]) -> Table {
        debug_assert!(
            header.iter().all(|h| !h.contains(char::is_whitespace)),
            "table headers must not contain whitespace"
        );

        Table {
            header: header.iter().map(|h| h.to_string()).collect(),
            body: Vec::new(),
            print_header: true,
        }
    }

    pub(crate) fn print_header(&mut self, print_header: bool) {
        self.print_header = print_header;
    }

    pub(crate) fn add_row(&mut self, row: Vec<String>) {
        assert_eq!(
            row.len(),
            self.header.len(),
            "row does not match the number of table columns"
        );

        self.body.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();

        for row in &self.body {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        widths
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String], widths: &[usize]) -> fmt::Result {
    let last = cells.len().saturating_sub(1);

    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            f.write_str(cell)?;
        } else {
            write!(f, "{:<width$}  ", cell, width = width)?;
        }
    }

    f.write_char('\n')
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();

        if self.print_header {
            let last = self.header.len().saturating_sub(1);

            for (i, (cell, width)) in self.header.iter().zip(&widths).enumerate() {
                let padded = if i == last {
                    cell.clone()
                } else {
                    format!("{:<width$}  ", cell, width = width)
                };

                write!(f, "{}", HEADER.maybe_paint(padded.as_str()))?;
            }

            f.write_char('\n')?;
        }

        for row in &self.body {
            write_row(f, row, &widths)?;
        }

        Ok(())
    }
}

pub(crate) trait IntoTable: Into<Table> + Sized {
    fn into_table(self) -> Table {
        self.into()
    }
}

impl<T> IntoTable for T where T: Into<Table> + Sized {}
