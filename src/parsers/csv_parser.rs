use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

use crate::channels;
use crate::data_models::{GroundTruthRow, RawReading, RawTable};
use crate::errors::{EstimatorError, ParseError, Result};
use crate::utils::{minutes_since_epoch, parse_locale_float, parse_minute_timestamp};

/// Delimiter of the daily extracts.
pub const EXTRACT_DELIMITER: u8 = b',';
/// Delimiter of the ground truth temperature file.
pub const GROUND_TRUTH_DELIMITER: u8 = b';';

// Ground truth row as stored on disk. The timestamp header is `Czas` in
// plant exports; the canonical `czas` is accepted too.
#[derive(Debug, Deserialize)]
struct GroundTruthRecord {
    #[serde(rename = "Czas", alias = "czas")]
    czas: String,
    temp_zuz: String,
}

/// Decode one daily extract with a header row. The `czas` column holds the
/// timestamp, every other column is kept as an optional number.
pub fn read_raw_table<R: Read>(reader: R, source: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(EXTRACT_DELIMITER)
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ParseError::HeaderReadError {
            path: source.to_path_buf(),
            source: e,
        })?
        .clone();

    let timestamp_idx = find_column(&headers, channels::TIMESTAMP).ok_or_else(|| {
        EstimatorError::MissingColumn {
            column: channels::TIMESTAMP.to_string(),
            source_name: source.display().to_string(),
        }
    })?;

    let channel_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != timestamp_idx)
        .map(|(_, h)| h.trim().to_string())
        .collect();
    let mut table = RawTable::new(source.display().to_string(), channel_names);

    let mut unparsable_cells = 0usize;
    for (row_index, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ParseError::RecordReadError {
            path: source.to_path_buf(),
            row: row_index + 1,
            source: e,
        })?;

        let timestamp = record.get(timestamp_idx).unwrap_or_default().trim().to_string();
        let values = record
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != timestamp_idx)
            .map(|(_, cell)| {
                let trimmed = cell.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match parse_locale_float(trimmed) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        unparsable_cells += 1;
                        None
                    }
                }
            })
            .collect();

        table.rows.push(RawReading { timestamp, values });
    }

    if unparsable_cells > 0 {
        log::warn!(
            "{} non-numeric cells in {} were read as missing",
            unparsable_cells,
            source.display()
        );
    }
    log::debug!(
        "Decoded {} rows x {} channels from {}",
        table.len(),
        table.channels.len(),
        source.display()
    );
    Ok(table)
}

/// Decode the `;`-separated ground truth file.
pub fn read_ground_truth<R: Read>(reader: R, source: &Path) -> Result<Vec<GroundTruthRow>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(GROUND_TRUTH_DELIMITER)
        .has_headers(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| ParseError::HeaderReadError {
            path: source.to_path_buf(),
            source: e,
        })?
        .clone();

    let missing = |column: &str| EstimatorError::MissingColumn {
        column: column.to_string(),
        source_name: source.display().to_string(),
    };
    if find_column(&headers, channels::GROUND_TRUTH_TIMESTAMP).is_none()
        && find_column(&headers, channels::TIMESTAMP).is_none()
    {
        return Err(missing(channels::GROUND_TRUTH_TIMESTAMP));
    }
    if find_column(&headers, channels::TRUE_TEMPERATURE).is_none() {
        return Err(missing(channels::TRUE_TEMPERATURE));
    }

    let mut rows = Vec::new();
    for (row_index, result) in reader.deserialize::<GroundTruthRecord>().enumerate() {
        let record = result.map_err(|e| ParseError::RecordReadError {
            path: source.to_path_buf(),
            row: row_index + 1,
            source: e,
        })?;

        let timestamp = parse_minute_timestamp(record.czas.trim())?;
        let temperature = parse_locale_float(record.temp_zuz.trim()).map_err(|_| {
            EstimatorError::MissingValue {
                channel: channels::TRUE_TEMPERATURE.to_string(),
                timestamp: record.czas.clone(),
            }
        })?;

        rows.push(GroundTruthRow {
            timestamp,
            minutes_since_epoch: minutes_since_epoch(&timestamp),
            temperature,
        });
    }
    Ok(rows)
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_raw_table() {
        let data = "czas,a,b\n2023-01-05 10:15:00,1.5,\n2023-01-05 10:16:00,x,2\n";
        let table = read_raw_table(data.as_bytes(), Path::new("day.csv")).unwrap();

        assert_eq!(table.channels, vec!["a", "b"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].timestamp, "2023-01-05 10:15:00");
        assert_eq!(table.rows[0].values, vec![Some(1.5), None]);
        assert_eq!(table.rows[1].values, vec![None, Some(2.0)]);
    }

    #[test]
    fn test_timestamp_column_may_be_anywhere() {
        let data = "a,czas\n3,2023-01-05 10:15\n";
        let table = read_raw_table(data.as_bytes(), Path::new("day.csv")).unwrap();
        assert_eq!(table.channels, vec!["a"]);
        assert_eq!(table.rows[0].values, vec![Some(3.0)]);
    }

    #[test]
    fn test_raw_table_without_timestamp_column() {
        let data = "time,a\n2023-01-05 10:15,1\n";
        let err = read_raw_table(data.as_bytes(), Path::new("day.csv")).unwrap_err();
        assert!(matches!(err, EstimatorError::MissingColumn { ref column, .. } if column == "czas"));
    }

    #[test]
    fn test_ragged_record_is_an_error() {
        let data = "czas,a\n2023-01-05 10:15,1,2\n";
        let err = read_raw_table(data.as_bytes(), Path::new("day.csv")).unwrap_err();
        assert!(matches!(err, EstimatorError::Parse(ParseError::RecordReadError { row: 1, .. })));
    }

    #[test]
    fn test_read_ground_truth_renames_timestamp() {
        let data = "Czas;temp_zuz;inne\n2023-01-05 10:15:00;950,5;x\n2023-01-05 10:16:00;951;y\n";
        let rows = read_ground_truth(data.as_bytes(), Path::new("truth.csv")).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].temperature, 950.5);
        assert_eq!(rows[1].minutes_since_epoch - rows[0].minutes_since_epoch, 1);
    }

    #[test]
    fn test_read_ground_truth_accepts_canonical_header() {
        let data = "czas;temp_zuz\n2023-01-05 10:15;950\n";
        let rows = read_ground_truth(data.as_bytes(), Path::new("truth.csv")).unwrap();
        assert_eq!(rows[0].temperature, 950.0);
    }

    #[test]
    fn test_read_ground_truth_errors() {
        let no_temp = "Czas;other\n2023-01-05 10:15;1\n";
        assert!(matches!(
            read_ground_truth(no_temp.as_bytes(), Path::new("t.csv")),
            Err(EstimatorError::MissingColumn { .. })
        ));

        let bad_time = "Czas;temp_zuz\n05/01/2023 10:15;1\n";
        assert!(matches!(
            read_ground_truth(bad_time.as_bytes(), Path::new("t.csv")),
            Err(EstimatorError::Format { .. })
        ));
    }
}
