use chrono::NaiveDate;
use contracts::dashboards::d400_sales_explorer::Classification;
use std::collections::HashMap;
use std::io::Read;

use super::record::SalesRecord;
use super::error::{IngestError, MalformedPeriod};

// ---------------------------------------------------------------------------
// Canonical column names
// ---------------------------------------------------------------------------

pub const COL_PERIODS: &str = "Periods";
pub const COL_DOLLARS: &str = "$";
pub const COL_DOLLARS_YA: &str = "$ Year Ago";
pub const COL_UNITS: &str = "Units";
pub const COL_UNITS_YA: &str = "Units Year Ago";
pub const COL_POUNDS: &str = "Pounds";
pub const COL_POUNDS_YA: &str = "Pounds Year Ago";
pub const COL_SEGMENT: &str = "Segment";
pub const COL_SUB_CATEGORY: &str = "Sub Category";
pub const COL_ORGANIC_CLAIM: &str = "Organic Claim";

pub const REQUIRED_COLUMNS: [&str; 10] = [
    COL_PERIODS,
    COL_DOLLARS,
    COL_DOLLARS_YA,
    COL_UNITS,
    COL_UNITS_YA,
    COL_POUNDS,
    COL_POUNDS_YA,
    COL_SEGMENT,
    COL_SUB_CATEGORY,
    COL_ORGANIC_CLAIM,
];

/// Width of the trailing `MM/DD/YY` part of the period text.
const PERIOD_WIDTH: usize = 8;
const PERIOD_FORMAT: &str = "%m/%d/%y";

/// Raw source row: column header (as found in the source) -> cell text.
pub type RawRow = HashMap<String, String>;

/// Collapse whitespace and title-case every word.
///
/// ```
/// use sales_explorer::domain::a001_sales_record::normalizer::title_case;
/// assert_eq!(title_case("  honeycrisp   APPLES "), "Honeycrisp Apples");
/// ```
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical header form: underscores read as spaces, then title-cased.
pub fn canonical_column_name(raw: &str) -> String {
    title_case(&raw.replace('_', " "))
}

/// Parse the trailing eight characters of a period label as `MM/DD/YY`.
///
/// Source labels look like `"1 w/e 01/05/24"`; anything before the date is ignored.
pub fn parse_period(raw: &str) -> Result<NaiveDate, MalformedPeriod> {
    let trimmed = raw.trim();
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() < PERIOD_WIDTH {
        return Err(MalformedPeriod {
            value: raw.to_string(),
            reason: "shorter than 8 characters",
        });
    }

    let tail: String = chars[chars.len() - PERIOD_WIDTH..].iter().collect();
    NaiveDate::parse_from_str(&tail, PERIOD_FORMAT).map_err(|_| MalformedPeriod {
        value: raw.to_string(),
        reason: "trailing characters are not MM/DD/YY",
    })
}

/// `Conventional` iff the claim mentions "NOT" in any case; missing claims are `Organic`.
pub fn classify(organic_claim: Option<&str>) -> Classification {
    match organic_claim {
        Some(claim) if claim.to_uppercase().contains("NOT") => Classification::Conventional,
        _ => Classification::Organic,
    }
}

/// Fail with a schema error naming the first required column that is absent.
pub fn check_schema<'a, I>(columns: I) -> Result<(), IngestError>
where
    I: IntoIterator<Item = &'a str>,
{
    let present: Vec<&str> = columns.into_iter().collect();
    for required in REQUIRED_COLUMNS {
        if !present.contains(&required) {
            return Err(IngestError::Schema {
                column: required.to_string(),
            });
        }
    }
    Ok(())
}

/// Normalize raw rows into records, preserving order and duplicates.
pub fn normalize_rows<I>(rows: I) -> Result<Vec<SalesRecord>, IngestError>
where
    I: IntoIterator<Item = RawRow>,
{
    rows.into_iter()
        .enumerate()
        .map(|(idx, raw)| {
            let canonical: HashMap<String, String> = raw
                .into_iter()
                .map(|(column, value)| (canonical_column_name(&column), value))
                .collect();
            normalize_row(idx + 1, &canonical)
        })
        .collect()
}

/// Read a CSV export. The header is checked before any data row is read.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<SalesRecord>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| canonical_column_name(h.trim_start_matches('\u{FEFF}')))
        .collect();
    check_schema(headers.iter().map(String::as_str))?;

    tracing::debug!("Sales CSV headers: {:?}", headers);

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let csv_record = result?;
        let row: HashMap<String, String> = headers
            .iter()
            .enumerate()
            .map(|(i, column)| (column.clone(), csv_record.get(i).unwrap_or("").to_string()))
            .collect();
        records.push(normalize_row(idx + 1, &row)?);
    }

    Ok(records)
}

/// Build one record from a row already keyed by canonical column names.
fn normalize_row(row: usize, cells: &HashMap<String, String>) -> Result<SalesRecord, IngestError> {
    let period = parse_period(field(cells, COL_PERIODS)?)
        .map_err(|source| IngestError::MalformedDate { row, source })?;

    let organic_claim = Some(field(cells, COL_ORGANIC_CLAIM)?.trim())
        .filter(|claim| !claim.is_empty())
        .map(str::to_string);
    let classification = classify(organic_claim.as_deref());

    Ok(SalesRecord {
        period,
        segment: title_case(field(cells, COL_SEGMENT)?),
        sub_category: title_case(field(cells, COL_SUB_CATEGORY)?),
        organic_claim,
        classification,
        dollars: measure(row, cells, COL_DOLLARS)?,
        dollars_ya: measure(row, cells, COL_DOLLARS_YA)?,
        units: measure(row, cells, COL_UNITS)?,
        units_ya: measure(row, cells, COL_UNITS_YA)?,
        pounds: measure(row, cells, COL_POUNDS)?,
        pounds_ya: measure(row, cells, COL_POUNDS_YA)?,
    })
}

fn field<'c>(cells: &'c HashMap<String, String>, column: &str) -> Result<&'c str, IngestError> {
    cells
        .get(column)
        .map(String::as_str)
        .ok_or_else(|| IngestError::Schema {
            column: column.to_string(),
        })
}

fn measure(row: usize, cells: &HashMap<String, String>, column: &str) -> Result<f64, IngestError> {
    parse_measure(row, column, field(cells, column)?)
}

/// Blank cells count as zero; `$` and thousands separators are ignored.
fn parse_measure(row: usize, column: &str, raw: &str) -> Result<f64, IngestError> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Ok(0.0);
    }

    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(IngestError::InvalidNumber {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}
