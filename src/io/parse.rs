//! Fixed-width catalog parsing.
//!
//! The KOERI list is a `<pre>` block of space-aligned columns. Everything
//! before the `Tarih ...` header line is page chrome and is skipped. Every line
//! after it is sliced by character column, never by whitespace, because empty
//! magnitude cells would otherwise shift the remaining fields.

use std::iter::Enumerate;
use std::str::Lines;

use crate::domain::RawRecordTuple;
use crate::error::PipelineError;

/// Token that opens the header line.
pub const HEADER_TOKEN: &str = "Tarih";

/// Character column ranges, `end == None` meaning "to end of line".
///
/// Order: date, time, latitude, longitude, depth, md, ml, mw, place.
pub const COLUMNS: [(usize, Option<usize>); 9] = [
    (0, Some(10)),
    (11, Some(19)),
    (20, Some(30)),
    (31, Some(41)),
    (42, Some(49)),
    (50, Some(54)),
    (55, Some(59)),
    (60, Some(64)),
    (65, None),
];

/// Lazy iterator over the data lines following the header.
#[derive(Debug, Clone)]
pub struct CatalogRows<'a> {
    lines: Enumerate<Lines<'a>>,
    header_line: usize,
}

impl CatalogRows<'_> {
    /// 1-based line number of the header.
    pub fn header_line(&self) -> usize {
        self.header_line
    }
}

impl Iterator for CatalogRows<'_> {
    type Item = RawRecordTuple;

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, line) = self.lines.next()?;
        Some(split_line(idx + 1, line))
    }
}

/// Locate the header and return an iterator over the rows after it.
pub fn parse_catalog(text: &str) -> Result<CatalogRows<'_>, PipelineError> {
    let mut lines = text.lines().enumerate();
    let header_idx = lines
        .by_ref()
        .find(|(_, line)| line.trim().starts_with(HEADER_TOKEN))
        .map(|(idx, _)| idx)
        .ok_or(PipelineError::HeaderNotFound)?;

    Ok(CatalogRows {
        lines,
        header_line: header_idx + 1,
    })
}

/// Slice one line into the nine positional fields.
///
/// Never fails: columns beyond the end of the line come back empty.
pub fn split_line(line_no: usize, line: &str) -> RawRecordTuple {
    let chars: Vec<char> = line.chars().collect();
    let [date, time, lat, lon, depth, md, ml, mw, place] =
        COLUMNS.map(|(start, end)| slice_chars(&chars, start, end));

    RawRecordTuple {
        line: line_no,
        date,
        time,
        lat,
        lon,
        depth,
        md,
        ml,
        mw,
        place,
    }
}

fn slice_chars(chars: &[char], start: usize, end: Option<usize>) -> String {
    let end = end.unwrap_or(chars.len()).min(chars.len());
    if start >= end {
        return String::new();
    }
    chars[start..end].iter().collect()
}

/// Render a catalog row in the exact column layout (test helper).
#[cfg(test)]
#[allow(clippy::too_many_arguments)]
pub(crate) fn format_row(
    date: &str,
    time: &str,
    lat: &str,
    lon: &str,
    depth: &str,
    md: &str,
    ml: &str,
    mw: &str,
    place: &str,
) -> String {
    format!("{date:<10} {time:<8} {lat:>10} {lon:>10} {depth:>7} {md:>4} {ml:>4} {mw:>4} {place}")
}

#[cfg(test)]
pub(crate) const TEST_HEADER: &str = "Tarih      Saat      Enlem(N)  Boylam(E) Derinlik(km)  MD   ML   Mw    Yer                                             Çözüm Niteliği";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_header_is_an_error() {
        let err = parse_catalog("<html>\n<pre>\nno data today\n</pre>").unwrap_err();
        assert_eq!(err, PipelineError::HeaderNotFound);
    }

    #[test]
    fn rows_start_after_header() {
        let row = format_row("2025.10.21", "03:04:05", "39.5000", "35.1000", "10.0", "-.-", "2.1", "4.2", "TEST");
        let text = format!("preamble\n  {TEST_HEADER}\n---------- --------\n{row}");
        let rows = parse_catalog(&text).unwrap();
        assert_eq!(rows.header_line(), 2);

        let rows: Vec<_> = rows.collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 3);
        assert_eq!(rows[1].line, 4);
        assert_eq!(rows[1].date, "2025.10.21");
        assert_eq!(rows[1].time, "03:04:05");
        assert_eq!(rows[1].lat.trim(), "39.5000");
        assert_eq!(rows[1].lon.trim(), "35.1000");
        assert_eq!(rows[1].depth.trim(), "10.0");
        assert_eq!(rows[1].md.trim(), "-.-");
        assert_eq!(rows[1].ml.trim(), "2.1");
        assert_eq!(rows[1].mw.trim(), "4.2");
        assert_eq!(rows[1].place.trim(), "TEST");
    }

    #[test]
    fn first_matching_header_wins() {
        let text = format!("{TEST_HEADER}\nTarih again\n");
        let rows: Vec<_> = parse_catalog(&text).unwrap().collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "Tarih agai");
    }

    #[test]
    fn short_line_yields_empty_trailing_fields() {
        let row = split_line(7, "2025.10.21 03:04:05  39.5");
        assert_eq!(row.line, 7);
        assert_eq!(row.date, "2025.10.21");
        assert_eq!(row.time, "03:04:05");
        assert_eq!(row.lat.trim(), "39.5");
        assert!(row.lon.is_empty());
        assert!(row.depth.is_empty());
        assert!(row.mw.is_empty());
        assert!(row.place.is_empty());
    }

    #[test]
    fn empty_line_yields_all_empty_fields() {
        let row = split_line(1, "");
        assert_eq!(row, RawRecordTuple { line: 1, ..RawRecordTuple::default() });
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        // Turkish letters are multi-byte in UTF-8; slicing must stay on char boundaries.
        let line = format_row("ĞĞĞĞĞĞĞĞĞĞ", "03:04:05", "39.5000", "35.1000", "10.0", "-.-", "2.1", "4.2", "İZMİR");
        let row = split_line(1, &line);
        assert_eq!(row.date, "ĞĞĞĞĞĞĞĞĞĞ");
        assert_eq!(row.time, "03:04:05");
        assert_eq!(row.mw.trim(), "4.2");
        assert_eq!(row.place.trim(), "İZMİR");
    }
}
