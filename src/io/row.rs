//! Quoted-field row splitting.
//!
//! One line in, one `Vec<String>` of raw fields out. Rules:
//! - `"` toggles quoting, except that `""` inside a quoted field emits a single
//!   literal `"` and leaves the field quoted
//! - the delimiter splits fields only outside quotes
//! - empty fields are preserved (`a,,b` has three fields)
//!
//! An unterminated quote simply runs to the end of the line.

/// Split a single line into raw fields.
pub fn split_row(line: &str, delimiter: char) -> Vec<String> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    let mut fields = Vec::with_capacity(32);
    let mut cell = String::with_capacity(64);
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    cell.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(c);
            }
        } else if c == '"' {
            in_quotes = true;
        } else if c == delimiter {
            fields.push(std::mem::take(&mut cell));
        } else {
            cell.push(c);
        }
    }

    fields.push(cell);
    fields
}
