//! HTML listing report parsing
//!
//! The list command writes `<archive>.html` next to the archive as a side
//! effect: a short page with two tables. Table one is a two-column key/value
//! description of the archive; table two is one header row of three column
//! names followed by `(offset, size, name)` member rows. The markup is
//! tool-generated and not guaranteed to be well-formed, so extraction is
//! lenient: mismatched end tags are accepted, entity references are resolved
//! where possible, and a hard parse error ends extraction with whatever was
//! collected instead of failing.

use quick_xml::Reader;
use quick_xml::events::Event;

/// The two tables extracted from a listing report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingTables {
    /// Archive description rows from the first table
    pub metadata: Vec<(String, String)>,
    /// Member table rows in document order, header row included
    pub contents: Vec<Vec<String>>,
}

/// Extract the first two tables from a listing report page
///
/// A page with fewer than two tables yields empty sequences for the missing
/// ones; tables beyond the second are ignored.
pub fn parse_listing_report(html: &str) -> ListingTables {
    let mut tables = extract_tables(html).into_iter();
    let metadata = tables
        .next()
        .unwrap_or_default()
        .into_iter()
        .filter_map(|row| {
            let mut cells = row.into_iter();
            match (cells.next(), cells.next()) {
                (Some(key), Some(value)) => Some((key, value)),
                _ => None,
            }
        })
        .collect();
    let contents = tables.next().unwrap_or_default();
    ListingTables { metadata, contents }
}

/// Pull `table`/`tr`/`td` structure out of the page, depth-insensitively
fn extract_tables(html: &str) -> Vec<Vec<Vec<String>>> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;

    let mut tables: Vec<Vec<Vec<String>>> = Vec::new();
    let mut table: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_table = false;
    let mut in_row = false;
    let mut in_cell = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name.eq_ignore_ascii_case(b"table") {
                    in_table = true;
                    table.clear();
                } else if in_table && name.eq_ignore_ascii_case(b"tr") {
                    in_row = true;
                    row.clear();
                } else if in_row
                    && (name.eq_ignore_ascii_case(b"td") || name.eq_ignore_ascii_case(b"th"))
                {
                    in_cell = true;
                    cell.clear();
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                if name.eq_ignore_ascii_case(b"table") {
                    if in_table {
                        tables.push(std::mem::take(&mut table));
                    }
                    in_table = false;
                    in_row = false;
                    in_cell = false;
                } else if name.eq_ignore_ascii_case(b"tr") {
                    if in_row {
                        table.push(std::mem::take(&mut row));
                    }
                    in_row = false;
                    in_cell = false;
                } else if name.eq_ignore_ascii_case(b"td") || name.eq_ignore_ascii_case(b"th") {
                    if in_cell {
                        row.push(cell.trim().to_string());
                    }
                    in_cell = false;
                }
            }
            Ok(Event::Text(ref t)) if in_cell => match t.unescape() {
                Ok(text) => cell.push_str(&text),
                Err(_) => cell.push_str(&String::from_utf8_lossy(t.as_ref())),
            },
            Ok(Event::Eof) => break,
            // Tool HTML can be malformed mid-page; keep what was collected
            Err(_) => break,
            _ => {}
        }
    }
    tables
}
