//! Locates yearly observance tables and pulls dated holiday rows out of them.

use chrono::NaiveDate;

use crate::diagnostics::Diagnostics;
use crate::dom::{DocumentNode, descendants_with_tag};
use crate::error::{HolidayError, HolidayResult};

/// Prefix every yearly section heading must carry.
const HEADING_PREFIX: &str = "Caltech Holiday Observances for ";

/// Class token on the block wrapping each observance table.
const TABLE_BLOCK_CLASS: &str = "block-TableBlock";

/// Placeholder row present in every table; carries no date.
const PERSONAL_HOLIDAY: &str = "Personal Holiday";

/// A single dated holiday pulled out of an observance table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayRecord {
    pub date: NaiveDate,
    pub description: String,
}

/// Extract every dated holiday from the page, in document order.
///
/// Headings that do not look like a yearly observance title are skipped. A
/// matching heading whose table block is missing, or whose block holds more
/// than one table, aborts the extraction: that means the page layout changed
/// underneath us and silently guessing would corrupt the calendar.
pub fn extract<N: DocumentNode>(
    root: &N,
    diag: &dyn Diagnostics,
) -> HolidayResult<Vec<HolidayRecord>> {
    let headings = descendants_with_tag(root, "h3");
    diag.debug(&format!("found {} header tags", headings.len()));

    let mut records = Vec::new();
    for heading in &headings {
        let Some(year) = year_from_heading(heading, diag) else {
            continue;
        };
        diag.debug(&format!("year: {year}"));

        let table = table_for_heading(heading, &year)?;
        records.extend(table_entries(&year, &table, diag));
    }
    Ok(records)
}

/// Year digits from a section heading, or `None` when the heading is not a
/// yearly observance title.
pub fn year_from_heading<N: DocumentNode>(
    heading: &N,
    diag: &dyn Diagnostics,
) -> Option<String> {
    let text = heading.text_content();
    let text = text.trim();
    if !text.starts_with(HEADING_PREFIX) {
        diag.warning(&format!("unrecognized table title: {text}"));
        return None;
    }

    // The year is the trailing four characters of the title.
    let year: String = text
        .chars()
        .skip(text.chars().count().saturating_sub(4))
        .collect();
    if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
        diag.warning(&format!("unparseable year in table title: {text}"));
        return None;
    }
    Some(year)
}

/// Pull dated rows out of one observance table. `year` supplies the year for
/// day specifiers that do not carry their own.
pub fn table_entries<N: DocumentNode>(
    year: &str,
    table: &N,
    diag: &dyn Diagnostics,
) -> Vec<HolidayRecord> {
    let mut records = Vec::new();
    for row in table_rows(table) {
        let cells = row.child_elements();
        if cells.len() != 4 {
            diag.debug(&format!("skipping row with {} cells", cells.len()));
            continue;
        }

        let day = cells[2].text_content().trim().to_string();
        let description = cells[3].text_content().trim().to_string();
        diag.debug(&format!("day: {day}"));

        if day.starts_with('-') {
            // Non-dated entry. The personal-holiday placeholder is expected;
            // anything else is worth a look at elevated verbosity.
            if description != PERSONAL_HOLIDAY {
                diag.info(&format!(
                    "unrecognized calendar line: {}",
                    row.text_content().trim()
                ));
            }
            continue;
        }

        diag.debug(&format!("description: {description}"));
        match parse_day(year, &day) {
            Some(date) => records.push(HolidayRecord { date, description }),
            None => diag.info(&format!("unparseable day specifier: {day}")),
        }
    }
    records
}

/// Walk forward in document order (next element siblings, then ancestors'
/// next siblings, skipping the heading's own subtree) to the table block
/// belonging to this section, and return its single table.
fn table_for_heading<N: DocumentNode>(heading: &N, year: &str) -> HolidayResult<N> {
    let block = next_table_block(heading)
        .ok_or_else(|| HolidayError::MissingTableBlock(year.to_string()))?;

    let mut tables = descendants_with_tag(&block, "table");
    if tables.len() != 1 {
        return Err(HolidayError::TableCount(tables.len()));
    }
    Ok(tables.remove(0))
}

fn next_table_block<N: DocumentNode>(heading: &N) -> Option<N> {
    let mut node = heading.clone();
    loop {
        while let Some(next) = node.next_sibling() {
            node = next;
            if is_table_block(&node) {
                return Some(node);
            }
        }
        node = node.parent()?;
    }
}

fn is_table_block<N: DocumentNode>(node: &N) -> bool {
    node.attr("class")
        .is_some_and(|class| class.split_whitespace().any(|token| token == TABLE_BLOCK_CLASS))
}

fn table_rows<N: DocumentNode>(table: &N) -> Vec<N> {
    table
        .child_elements()
        .into_iter()
        .filter(|child| child.tag_name() == "tbody")
        .flat_map(|tbody| tbody.child_elements())
        .filter(|child| child.tag_name() == "tr")
        .collect()
}

/// Day-specifier parse attempts, tried in order; the first hit wins. A row
/// may carry its own full date ("January 1, 2025"), which overrides the
/// section year.
fn parse_day(year: &str, day: &str) -> Option<NaiveDate> {
    let attempts = [
        (day.to_string(), "%B %d, %Y"),
        (format!("{year} {day}"), "%Y %B %d"),
    ];
    attempts
        .iter()
        .find_map(|(text, format)| NaiveDate::parse_from_str(text, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{BufferSink, Severity};
    use scraper::{ElementRef, Html};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn first<'a>(html: &'a Html, tag: &str) -> ElementRef<'a> {
        descendants_with_tag(&html.root_element(), tag).remove(0)
    }

    #[test]
    fn year_from_matching_heading() {
        let html = Html::parse_document("<h3>Caltech Holiday Observances for 2024</h3>");
        let diag = BufferSink::new();

        let year = year_from_heading(&first(&html, "h3"), &diag);
        assert_eq!(year.as_deref(), Some("2024"));
    }

    #[test]
    fn unrelated_heading_is_skipped_with_a_warning() {
        let html = Html::parse_document("<h3>Campus Parking Updates</h3>");
        let diag = BufferSink::new();

        assert_eq!(year_from_heading(&first(&html, "h3"), &diag), None);
        assert!(diag.contains(Severity::Warning, "unrecognized table title"));
    }

    #[test]
    fn heading_with_non_numeric_year_is_skipped() {
        let html = Html::parse_document("<h3>Caltech Holiday Observances for soon</h3>");
        let diag = BufferSink::new();

        assert_eq!(year_from_heading(&first(&html, "h3"), &diag), None);
        assert!(diag.contains(Severity::Warning, "unparseable year"));
    }

    #[test]
    fn dated_rows_become_records() {
        let html = Html::parse_document(
            "<table><thead></thead><tbody>\
             <tr><td>1</td><td>Monday</td><td>January 1</td><td>New Year's Day</td></tr>\
             <tr><td>2</td><td>Monday</td><td>January 15</td><td>Martin Luther King</td></tr>\
             </tbody></table>",
        );
        let diag = BufferSink::new();

        let entries = table_entries("2024", &first(&html, "table"), &diag);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, date(2024, 1, 1));
        assert_eq!(entries[0].description, "New Year's Day");
        assert_eq!(entries[1].date, date(2024, 1, 15));
        assert_eq!(entries[1].description, "Martin Luther King");
    }

    #[test]
    fn personal_holiday_placeholder_yields_nothing() {
        let html = Html::parse_document(
            "<table><tbody>\
             <tr><td>13</td><td>-</td><td>-</td><td>Personal Holiday</td></tr>\
             </tbody></table>",
        );
        let diag = BufferSink::new();

        let entries = table_entries("2024", &first(&html, "table"), &diag);
        assert!(entries.is_empty());
        assert!(diag.entries().iter().all(|(s, _)| *s == Severity::Debug));
    }

    #[test]
    fn other_non_dated_rows_are_reported() {
        let html = Html::parse_document(
            "<table><tbody>\
             <tr><td>14</td><td>-</td><td>-</td><td>Floating Holiday</td></tr>\
             </tbody></table>",
        );
        let diag = BufferSink::new();

        let entries = table_entries("2024", &first(&html, "table"), &diag);
        assert!(entries.is_empty());
        assert!(diag.contains(Severity::Info, "unrecognized calendar line"));
    }

    #[test]
    fn row_date_with_explicit_year_overrides_section_year() {
        let html = Html::parse_document(
            "<table><tbody>\
             <tr><td>1</td><td>Wednesday</td><td>January 1, 2025</td><td>New Year's Day</td></tr>\
             </tbody></table>",
        );
        let diag = BufferSink::new();

        let entries = table_entries("2024", &first(&html, "table"), &diag);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, date(2025, 1, 1));
    }

    #[test]
    fn malformed_rows_are_skipped_and_extraction_continues() {
        let html = Html::parse_document(
            "<table><tbody>\
             <tr><td>Monday</td><td>January 1</td><td>New Year's Day</td></tr>\
             <tr><td>2</td><td>Friday</td><td>Jan 32</td><td>Not a date</td></tr>\
             <tr><td>3</td><td>Monday</td><td>May 27</td><td>Memorial Day</td></tr>\
             </tbody></table>",
        );
        let diag = BufferSink::new();

        let entries = table_entries("2024", &first(&html, "table"), &diag);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, date(2024, 5, 27));
        assert!(diag.contains(Severity::Debug, "skipping row with 3 cells"));
        assert!(diag.contains(Severity::Info, "unparseable day specifier"));
    }

    #[test]
    fn finds_table_block_past_the_heading_wrapper() {
        let html = Html::parse_document(
            "<div class=\"rich-text\"><h3>Caltech Holiday Observances for 2024</h3></div>\
             <div class=\"block-TableBlock\"><div><table><tbody>\
             <tr><td>1</td><td>Monday</td><td>January 1</td><td>New Year's Day</td></tr>\
             </tbody></table></div></div>",
        );
        let diag = BufferSink::new();

        let records = extract(&html.root_element(), &diag).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].date, date(2024, 1, 1));
    }

    #[test]
    fn two_tables_in_one_block_is_a_layout_error() {
        let html = Html::parse_document(
            "<h3>Caltech Holiday Observances for 2024</h3>\
             <div class=\"block-TableBlock\"><table></table><table></table></div>",
        );
        let diag = BufferSink::new();

        let err = extract(&html.root_element(), &diag).unwrap_err();
        assert!(matches!(err, HolidayError::TableCount(2)));
    }

    #[test]
    fn missing_table_block_is_a_layout_error() {
        let html = Html::parse_document("<h3>Caltech Holiday Observances for 2024</h3>");
        let diag = BufferSink::new();

        let err = extract(&html.root_element(), &diag).unwrap_err();
        assert!(matches!(err, HolidayError::MissingTableBlock(year) if year == "2024"));
    }

    #[test]
    fn no_matching_headings_yields_an_empty_sequence() {
        let html = Html::parse_document("<h1>Holidays</h1><p>Nothing here.</p>");
        let diag = BufferSink::new();

        let records = extract(&html.root_element(), &diag).unwrap();
        assert!(records.is_empty());
    }
}
