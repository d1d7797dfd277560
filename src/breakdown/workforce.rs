// src/breakdown/workforce.rs
//
// EEOC annual federal workforce tables:
// https://www.eeoc.gov/federal-sector/reports/annual-reports-federal-workforce-including-data-tables

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Range, Reader};
use serde::Serialize;
use serde_json::{Number, Value};
use std::path::Path;
use tracing::{debug, info, instrument};

use super::OrderedMap;

/// Stripped from agency names so department-wide rows line up with the
/// names used elsewhere.
pub const NAME_SUFFIX: &str = ": Department-Wide Data";

/// Zero-based index of the first data row (row 4 in the sheet).
const FIRST_DATA_ROW: u32 = 3;

/// Demographic counts for one agency, straight from the sheet.
/// Cells are kept as-is: whole numbers, text, or null for blanks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkforceRow {
    pub agency_code: Value,
    pub total_workforce: Value,
    pub male: Value,
    pub female: Value,
    pub latin_male: Value,
    pub latin_female: Value,
    pub white_male: Value,
    pub white_female: Value,
    pub black_male: Value,
    pub black_female: Value,
    pub asian_male: Value,
    pub asian_female: Value,
    pub other_male: Value,
    pub other_female: Value,
    pub indian_male: Value,
    pub indian_female: Value,
}

/// Agency name → its latest row.
pub type WorkforceBreakdown = OrderedMap<String, WorkforceRow>;

fn is_blank(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::String(s)) => s.is_empty(),
        _ => false,
    }
}

fn cell_value(cell: Option<&Data>) -> Value {
    match cell {
        None | Some(Data::Empty) => Value::Null,
        Some(Data::Int(i)) => Value::from(*i),
        // xlsx stores every number as a float
        Some(Data::Float(f)) if f.fract() == 0.0 && f.abs() < 9.0e15 => Value::from(*f as i64),
        Some(Data::Float(f)) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Some(Data::String(s)) => Value::String(s.clone()),
        Some(Data::Bool(b)) => Value::Bool(*b),
        Some(other) => Value::String(other.to_string()),
    }
}

/// Read one sheet into `into`, from row 4 to the last row the sheet
/// actually has. Rows without an agency code are skipped; a later row for
/// the same agency replaces the earlier one. Returns the rows kept.
pub fn read_workforce_sheet(range: &Range<Data>, into: &mut WorkforceBreakdown) -> Result<usize> {
    let Some((last_row, _)) = range.end() else {
        return Ok(0);
    };

    let mut kept = 0;
    for row in FIRST_DATA_ROW..=last_row {
        let cell = |col: u32| range.get_value((row, col));

        if is_blank(cell(1)) {
            continue;
        }

        let name = match cell(0) {
            Some(Data::String(s)) if !s.is_empty() => s.clone(),
            Some(other) if !is_blank(Some(other)) => other.to_string(),
            _ => bail!("sheet row {} has an agency code but no agency name", row + 1),
        };
        let name = name.replace(NAME_SUFFIX, "");

        let v = |col: u32| cell_value(cell(col));
        let record = WorkforceRow {
            agency_code: v(1),
            total_workforce: v(2),
            male: v(3),
            female: v(4),
            latin_male: v(5),
            latin_female: v(6),
            white_male: v(7),
            white_female: v(8),
            black_male: v(9),
            black_female: v(10),
            asian_male: v(11),
            asian_female: v(12),
            other_male: v(13),
            other_female: v(14),
            indian_male: v(15),
            indian_female: v(16),
        };

        if into.insert(name.clone(), record).is_some() {
            debug!(agency = %name, row = row + 1, "replaced earlier workforce row");
        }
        kept += 1;
    }
    Ok(kept)
}

/// Open the workbook and read `sheets` in order into one breakdown.
#[instrument(level = "info", skip(path, sheets), fields(path = %path.as_ref().display()))]
pub fn load_workforce(path: impl AsRef<Path>, sheets: &[String]) -> Result<WorkforceBreakdown> {
    let path = path.as_ref();
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("opening workbook {:?}", path))?;

    let mut out = WorkforceBreakdown::new();
    for sheet in sheets {
        let range = workbook
            .worksheet_range(sheet)
            .with_context(|| format!("reading sheet {} of {:?}", sheet, path))?;
        let kept = read_workforce_sheet(&range, &mut out)
            .with_context(|| format!("sheet {}", sheet))?;
        info!(sheet = %sheet, rows = kept, "workforce sheet read");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Sheet with three title rows, like the published tables.
    fn sheet(last_row: u32) -> Range<Data> {
        let mut r = Range::new((0, 0), (last_row, 16));
        r.set_value((0, 0), Data::String("Table A-1b".into()));
        r.set_value((2, 0), Data::String("Agency".into()));
        r.set_value((2, 1), Data::String("Code".into()));
        r
    }

    fn put_row(r: &mut Range<Data>, row: u32, name: &str, code: &str, counts: [f64; 15]) {
        r.set_value((row, 0), Data::String(name.into()));
        r.set_value((row, 1), Data::String(code.into()));
        for (i, c) in counts.iter().enumerate() {
            r.set_value((row, 2 + i as u32), Data::Float(*c));
        }
    }

    fn counts(seed: f64) -> [f64; 15] {
        let mut out = [0.0; 15];
        for (i, c) in out.iter_mut().enumerate() {
            *c = seed + i as f64;
        }
        out
    }

    #[test]
    fn reads_rows_and_strips_suffix() -> Result<()> {
        let mut r = sheet(4);
        put_row(&mut r, 3, "Department of Agriculture: Department-Wide Data", "AG", counts(100.0));
        put_row(&mut r, 4, "Peace Corps", "PU", counts(5.0));

        let mut out = WorkforceBreakdown::new();
        assert_eq!(read_workforce_sheet(&r, &mut out)?, 2);

        let ag = out.get(&"Department of Agriculture".to_string()).unwrap();
        assert_eq!(ag.agency_code, json!("AG"));
        assert_eq!(ag.total_workforce, json!(100));
        assert_eq!(ag.male, json!(101));
        assert_eq!(ag.indian_female, json!(114));
        assert!(out.get(&"Peace Corps".to_string()).is_some());
        Ok(())
    }

    #[test]
    fn skips_rows_without_code() -> Result<()> {
        let mut r = sheet(5);
        put_row(&mut r, 3, "Subtotal", "", counts(1.0));
        r.set_value((4, 0), Data::String("Footnote: counts exclude".into()));
        put_row(&mut r, 5, "Peace Corps", "PU", counts(5.0));

        let mut out = WorkforceBreakdown::new();
        assert_eq!(read_workforce_sheet(&r, &mut out)?, 1);
        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["Peace Corps"]);
        Ok(())
    }

    #[test]
    fn header_rows_are_not_data() -> Result<()> {
        let mut r = sheet(3);
        // a code in the header block must not count
        r.set_value((1, 1), Data::String("XX".into()));
        put_row(&mut r, 3, "Peace Corps", "PU", counts(5.0));

        let mut out = WorkforceBreakdown::new();
        assert_eq!(read_workforce_sheet(&r, &mut out)?, 1);
        Ok(())
    }

    #[test]
    fn last_row_for_an_agency_wins() -> Result<()> {
        let mut first = counts(10.0);
        let mut second = first;
        first[5] = 7.0;
        second[5] = 8.0;

        let mut r = sheet(4);
        put_row(&mut r, 3, "Peace Corps", "PU", first);
        put_row(&mut r, 4, "Peace Corps", "PU", second);

        let mut out = WorkforceBreakdown::new();
        read_workforce_sheet(&r, &mut out)?;
        assert_eq!(out.len(), 1);
        let row = out.get(&"Peace Corps".to_string()).unwrap();
        // column 8 is white_male
        assert_eq!(row.white_male, json!(8));

        // reading the same sheet again changes nothing
        let before = out.clone();
        read_workforce_sheet(&r, &mut out)?;
        assert_eq!(out, before);
        Ok(())
    }

    #[test]
    fn reads_past_row_two_hundred() -> Result<()> {
        let mut r = sheet(320);
        put_row(&mut r, 310, "Tennessee Valley Authority", "TV", counts(3.0));

        let mut out = WorkforceBreakdown::new();
        assert_eq!(read_workforce_sheet(&r, &mut out)?, 1);
        Ok(())
    }

    #[test]
    fn code_without_name_is_malformed() {
        let mut r = sheet(3);
        r.set_value((3, 1), Data::String("ZZ".into()));
        let mut out = WorkforceBreakdown::new();
        assert!(read_workforce_sheet(&r, &mut out).is_err());
    }

    #[test]
    fn cell_values() {
        assert_eq!(cell_value(None), Value::Null);
        assert_eq!(cell_value(Some(&Data::Empty)), Value::Null);
        assert_eq!(cell_value(Some(&Data::Float(42.0))), json!(42));
        assert_eq!(cell_value(Some(&Data::Float(0.5))), json!(0.5));
        assert_eq!(cell_value(Some(&Data::Int(3))), json!(3));
        assert_eq!(cell_value(Some(&Data::String("**".into()))), json!("**"));
    }

    #[test]
    fn missing_workbook_fails() {
        let sheets = vec!["A-1b".to_string()];
        assert!(load_workforce("/nonexistent/workforce.xlsx", &sheets).is_err());
    }
}
