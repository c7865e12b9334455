use std::cmp::max;

#[derive(Default, Debug, Clone)]
pub struct Table {
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn push_row(&mut self, row: Vec<String>) {
        if row.len() > self.widths.len() {
            self.widths.resize(row.len(), 0);
        }
        self.widths
            .iter_mut()
            .zip(&row)
            .for_each(|(width, cell)| *width = max(*width, cell.chars().count()));
        self.rows.push(row);
    }

    pub fn render(&self, sep: &str) -> String {
        let pad = |s: &str, len: usize| {
            let chars = s.chars().count();
            if chars < len {
                format!("{}{}", s, " ".repeat(len - chars))
            } else {
                s.to_string()
            }
        };
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&self.widths)
                    .map(|(cell, width)| format!("{}{sep}", pad(cell, *width)))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
