use chrono::NaiveDateTime;
use std::collections::HashMap;

use crate::channels;

/// One row of a daily extract: the raw timestamp cell plus every numeric cell
/// in header order. Empty or non-numeric cells are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReading {
    pub timestamp: String,
    pub values: Vec<Option<f64>>,
}

/// A decoded extract. `channels` excludes the timestamp column and lines up
/// with `RawReading::values`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub source: String,
    pub channels: Vec<String>,
    pub rows: Vec<RawReading>,
}

impl RawTable {
    pub fn new(source: impl Into<String>, channels: Vec<String>) -> Self {
        Self {
            source: source.into(),
            channels,
            rows: Vec::new(),
        }
    }

    pub fn channel_index(&self) -> HashMap<&str, usize> {
        self.channels
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A prepared row. Aggregates follow the plant model's own formulas, see
/// [`crate::preparer`].
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRow {
    pub timestamp: NaiveDateTime,
    pub minutes_since_epoch: i64,
    pub input_batch_1: f64,
    pub input_batch_2: f64,
    pub dust_flow: f64,
    pub roasted_input: f64,
    pub total_thermal_power_mw: f64,
    pub avg_layer_temperature_k: f64,
    pub heat_in_sum: f64,
    pub heat_out_sum: f64,
    pub heat_balance: f64,
}

/// Value of one cell in the exported projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Time(NaiveDateTime),
    Int(i64),
    Float(f64),
}

impl PreparedRow {
    pub fn input_batch_sum(&self) -> f64 {
        self.input_batch_1 + self.input_batch_2
    }

    /// Cells in [`channels::PREPARED_COLUMNS`] order.
    pub fn projection(&self) -> [Cell; 9] {
        [
            Cell::Time(self.timestamp),
            Cell::Int(self.minutes_since_epoch),
            Cell::Float(self.input_batch_1),
            Cell::Float(self.input_batch_2),
            Cell::Float(self.dust_flow),
            Cell::Float(self.roasted_input),
            Cell::Float(self.total_thermal_power_mw),
            Cell::Float(self.avg_layer_temperature_k),
            Cell::Float(self.heat_balance),
        ]
    }

    /// Look up a projected cell by its column name.
    pub fn get(&self, column: &str) -> Option<Cell> {
        channels::PREPARED_COLUMNS
            .iter()
            .position(|name| *name == column)
            .map(|i| self.projection()[i])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EstimationResult {
    pub row: PreparedRow,
    pub estimated_temperature: f64,
}

impl EstimationResult {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.row.timestamp
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthRow {
    pub timestamp: NaiveDateTime,
    pub minutes_since_epoch: i64,
    pub temperature: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_minute_timestamp;

    fn sample_row() -> PreparedRow {
        PreparedRow {
            timestamp: parse_minute_timestamp("2023-01-05 10:15").unwrap(),
            minutes_since_epoch: 27_885_255,
            input_batch_1: 4.0,
            input_batch_2: 6.0,
            dust_flow: 0.5,
            roasted_input: 1.5,
            total_thermal_power_mw: 12.0,
            avg_layer_temperature_k: 1000.0,
            heat_in_sum: 10.0,
            heat_out_sum: 13.0,
            heat_balance: 3.0,
        }
    }

    #[test]
    fn test_projection_follows_column_order() {
        let row = sample_row();
        assert_eq!(row.get(channels::TIMESTAMP), Some(Cell::Time(row.timestamp)));
        assert_eq!(row.get(channels::MINUTES_SINCE_EPOCH), Some(Cell::Int(27_885_255)));
        assert_eq!(row.get(channels::DUST_FLOW), Some(Cell::Float(0.5)));
        assert_eq!(row.get(channels::HEAT_BALANCE), Some(Cell::Float(3.0)));
        assert_eq!(row.get(channels::HEAT_IN_SUM), None);
        assert_eq!(row.input_batch_sum(), 10.0);
    }

    #[test]
    fn test_channel_index() {
        let table = RawTable::new("day1", vec!["a".into(), "b".into()]);
        let index = table.channel_index();
        assert_eq!(index["b"], 1);
        assert!(table.is_empty());
    }
}
