//! Bordered grid rendering of book rows.

use bookstore_core::Book;
use unicode_width::UnicodeWidthStr;

const HEADERS: [&str; 4] = ["ID", "Title", "Author", "Quantity"];
const ALIGNMENTS: [Align; 4] = [Align::Right, Align::Left, Align::Left, Align::Right];

#[derive(Clone, Copy)]
enum Align {
    Left,
    Right,
}

/// Border glyphs of one horizontal rule: left edge, fill, column joint, right edge.
type Rule = [char; 4];

const TOP: Rule = ['╒', '═', '╤', '╕'];
const HEADER_SEPARATOR: Rule = ['╞', '═', '╪', '╡'];
const ROW_SEPARATOR: Rule = ['├', '─', '┼', '┤'];
const BOTTOM: Rule = ['╘', '═', '╧', '╛'];

/// Renders books as a box-drawing grid with one header row.
///
/// Numeric columns are right-aligned, text columns left-aligned. The result
/// ends with a newline.
pub fn render_books(books: &[Book]) -> String {
    let rows: Vec<[String; 4]> = books
        .iter()
        .map(|book| {
            [
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.quantity.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(cell_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell_width(cell));
        }
    }

    let mut out = String::new();
    push_rule(&mut out, &widths, TOP);
    push_row(&mut out, &widths, &HEADERS);
    if !rows.is_empty() {
        push_rule(&mut out, &widths, HEADER_SEPARATOR);
    }
    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            push_rule(&mut out, &widths, ROW_SEPARATOR);
        }
        push_row(&mut out, &widths, row);
    }
    push_rule(&mut out, &widths, BOTTOM);
    out
}

/// Terminal columns occupied by `text`; East Asian wide characters take two.
fn cell_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

fn push_rule(out: &mut String, widths: &[usize; 4], [left, fill, joint, right]: Rule) {
    out.push(left);
    for (index, width) in widths.iter().enumerate() {
        if index > 0 {
            out.push(joint);
        }
        out.extend(std::iter::repeat(fill).take(width + 2));
    }
    out.push(right);
    out.push('\n');
}

fn push_row<S: AsRef<str>>(out: &mut String, widths: &[usize; 4], cells: &[S; 4]) {
    out.push('│');
    for ((cell, width), align) in cells.iter().zip(widths).zip(ALIGNMENTS) {
        let cell = cell.as_ref();
        let padding = " ".repeat(width - cell_width(cell));
        out.push(' ');
        match align {
            Align::Left => {
                out.push_str(cell);
                out.push_str(&padding);
            }
            Align::Right => {
                out.push_str(&padding);
                out.push_str(cell);
            }
        }
        out.push_str(" │");
    }
    out.push('\n');
}
