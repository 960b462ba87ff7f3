//! Timetable workbook ingestion.
//!
//! Reads the university's published `.xlsx` timetable into raw
//! [`SessionRecord`]s. Row 1 of the first worksheet carries the column
//! headers; names are matched after trimming, since exports vary in stray
//! spaces. A day column marks an active weekday with any non-blank text.
//! Times and dates stay raw text here; [`crate::catalog`] parses them.

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use umya_spreadsheet::Worksheet;

use crate::catalog::SessionRecord;
use crate::models::{DaySet, Weekday};

/// Failure to turn a workbook into records.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file could not be opened or parsed as a workbook.
    #[error("cannot read workbook: {message}")]
    Workbook { message: String },
    /// The workbook holds no worksheet.
    #[error("workbook has no worksheet")]
    MissingSheet,
    /// The first row of the worksheet names no columns.
    #[error("worksheet header row is empty")]
    EmptyHeader,
}

const DAY_HEADERS: [(&str, Weekday); 7] = [
    ("MON", Weekday::Mon),
    ("TUE", Weekday::Tue),
    ("WED", Weekday::Wed),
    ("THU", Weekday::Thu),
    ("FRI", Weekday::Fri),
    ("SAT", Weekday::Sat),
    ("SUN", Weekday::Sun),
];

/// Loads every data row of the workbook's first worksheet.
///
/// Rows whose mapped columns are all blank are skipped. Missing columns
/// read as empty strings, so partial exports still load; the catalog's
/// filters decide what survives.
pub fn load_workbook(path: impl AsRef<Path>) -> Result<Vec<SessionRecord>, IngestError> {
    let book = umya_spreadsheet::reader::xlsx::read(path.as_ref())
        .map_err(|e| IngestError::Workbook {
            message: format!("{e:?}"),
        })?;
    let Some(sheet) = book.get_sheet(&0) else {
        return Err(IngestError::MissingSheet);
    };
    let records = records_from_sheet(sheet)?;
    log::info!(
        "ingested {} timetable rows from {}",
        records.len(),
        path.as_ref().display()
    );
    Ok(records)
}

fn records_from_sheet(sheet: &Worksheet) -> Result<Vec<SessionRecord>, IngestError> {
    let highest_row = sheet.get_highest_row();
    let highest_column = sheet.get_highest_column();

    let mut columns: HashMap<String, u32> = HashMap::new();
    for col in 1..=highest_column {
        let header = sheet.get_value((col, 1)).trim().to_string();
        if !header.is_empty() {
            columns.entry(header).or_insert(col);
        }
    }
    if columns.is_empty() {
        return Err(IngestError::EmptyHeader);
    }

    let field = |row: u32, name: &str| -> String {
        columns
            .get(name)
            .map(|col| sheet.get_value((*col, row)).trim().to_string())
            .unwrap_or_default()
    };

    let mut records = Vec::new();
    for row in 2..=highest_row {
        let term = field(row, "TERM");
        let career = field(row, "ACAD_CAREER");
        let course_code = field(row, "COURSE CODE");
        let section_id = field(row, "CLASS SECTION");
        let course_title = field(row, "COURSE TITLE");
        let department = field(row, "OFFER DEPT");
        let venue = field(row, "VENUE");
        let start_time = field(row, "START TIME");
        let end_time = field(row, "END TIME");
        let start_date = field(row, "START DATE");
        let end_date = field(row, "END DATE");

        let mut days = DaySet::new();
        for (header, day) in DAY_HEADERS {
            if !field(row, header).is_empty() {
                days.insert(day);
            }
        }

        let blank = days.is_empty()
            && [
                &term,
                &career,
                &course_code,
                &section_id,
                &course_title,
                &department,
                &venue,
                &start_time,
                &end_time,
                &start_date,
                &end_date,
            ]
            .iter()
            .all(|value| value.is_empty());
        if blank {
            continue;
        }

        records.push(
            SessionRecord::new(course_code, term)
                .with_career(career)
                .with_section(section_id)
                .with_title(course_title)
                .with_department(department)
                .with_days(days)
                .with_times(start_time, end_time)
                .with_dates(start_date, end_date)
                .with_venue(venue),
        );
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    const HEADERS: [&str; 18] = [
        "TERM",
        "ACAD_CAREER",
        "COURSE CODE",
        "CLASS SECTION",
        "COURSE TITLE",
        "OFFER DEPT",
        "VENUE",
        "START TIME",
        "END TIME",
        "START DATE",
        "END DATE",
        "MON",
        "TUE",
        "WED",
        "THU",
        "FRI",
        "SAT",
        "SUN",
    ];

    fn write_book(path: &Path, headers: &[&str], rows: &[[&str; 18]]) {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_mut(&0).unwrap();
        for (i, header) in headers.iter().enumerate() {
            sheet.get_cell_mut(((i + 1) as u32, 1)).set_value(*header);
        }
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet
                        .get_cell_mut(((c + 1) as u32, (r + 2) as u32))
                        .set_value(*value);
                }
            }
        }
        umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
    }

    #[test]
    fn test_load_workbook_reads_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timetable.xlsx");
        write_book(
            &path,
            &HEADERS,
            &[[
                "2025-26 Sem 1",
                "UG",
                "COMP1117",
                "L1",
                "Computer programming",
                "CS",
                "CB-A",
                "09:30",
                "10:20",
                "2025-09-01",
                "2025-11-29",
                "MON",
                "",
                "WED",
                "",
                "",
                "",
                "",
            ]],
        );

        let records = load_workbook(&path).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.course_code, "COMP1117");
        assert_eq!(record.term, "2025-26 Sem 1");
        assert_eq!(record.section_id, "L1");
        assert_eq!(record.course_title, "Computer programming");
        assert!(record.days.contains(Weekday::Mon));
        assert!(record.days.contains(Weekday::Wed));
        assert!(!record.days.contains(Weekday::Tue));
        assert_eq!(record.start_time, "09:30");
        assert_eq!(record.end_date, "2025-11-29");
        assert_eq!(record.venue, "CB-A");
    }

    #[test]
    fn test_headers_match_after_trimming() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("padded.xlsx");
        let padded: Vec<String> = HEADERS.iter().map(|h| format!(" {h} ")).collect();
        let padded_refs: Vec<&str> = padded.iter().map(String::as_str).collect();
        write_book(
            &path,
            &padded_refs,
            &[[
                "2025-26 Sem 1",
                "UG",
                "MATH1013",
                "T1",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "TUE",
                "",
                "",
                "",
                "",
                "",
            ]],
        );

        let records = load_workbook(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].course_code, "MATH1013");
        assert!(records[0].days.contains(Weekday::Tue));
        assert!(records[0].venue.is_empty());
        assert!(records[0].start_time.is_empty());
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gaps.xlsx");
        let blank = [""; 18];
        let mut first = [""; 18];
        first[0] = "2025-26 Sem 1";
        first[2] = "COMP1117";
        let mut second = [""; 18];
        second[0] = "2025-26 Sem 1";
        second[2] = "MATH1013";
        write_book(&path, &HEADERS, &[first, blank, second]);

        let records = load_workbook(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].course_code, "COMP1117");
        assert_eq!(records[1].course_code, "MATH1013");
    }

    #[test]
    fn test_empty_header_row_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let book = umya_spreadsheet::new_file();
        umya_spreadsheet::writer::xlsx::write(&book, &path).unwrap();

        let err = load_workbook(&path).unwrap_err();
        assert!(matches!(err, IngestError::EmptyHeader));
    }

    #[test]
    fn test_unreadable_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-a-workbook.xlsx");
        std::fs::write(&path, b"plain text").unwrap();

        let err = load_workbook(&path).unwrap_err();
        assert!(matches!(err, IngestError::Workbook { .. }));
    }

    #[test]
    fn test_ingested_rows_feed_the_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.xlsx");
        write_book(
            &path,
            &HEADERS,
            &[[
                "2025-26 Sem 1",
                "UG",
                "COMP1117",
                "L1",
                "Computer programming",
                "CS",
                "CB-A",
                "09:30",
                "10:20",
                "",
                "",
                "MON",
                "",
                "",
                "",
                "",
                "",
                "",
            ]],
        );

        let records = load_workbook(&path).unwrap();
        let catalog = Catalog::build(&records);
        let offering = catalog.offering("COMP1117", "2025-26 Sem 1").unwrap();
        let session = &offering.section("L1").unwrap().sessions[0];
        assert!(session.has_meeting_times());
        assert!(session.days.contains(Weekday::Mon));
    }
}
