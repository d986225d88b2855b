//! Merges the daily extracts into one time-ordered table of model inputs.
//!
//! Derived quantities:
//! - `avg_layer_temperature_k = (sum of 24 layer probes + 273.15) / 24`. The
//!   Kelvin offset is added once to the sum, not to each probe. This is the
//!   plant model's definition and is kept as is.
//! - `heat_in_sum = sum(8 flows) * (mean(2 inlet temperatures) + 273.15)`
//! - `heat_out_sum = sum(flow_i * (outlet_temperature_i + 273.15))`
//! - `heat_balance = heat_out_sum - heat_in_sum`

use crate::channels;
use crate::data_models::{PreparedRow, RawReading, RawTable};
use crate::errors::{EstimatorError, Result};
use crate::utils::{minutes_since_epoch, parse_minute_timestamp};

pub const KELVIN_OFFSET: f64 = 273.15;

/// Column positions of every channel `prepare` reads, resolved per table.
#[derive(Debug, Clone)]
struct ChannelLookup {
    input_batch_1: usize,
    input_batch_2: usize,
    dust_flow: usize,
    roasted_input: usize,
    thermal_power: usize,
    layer_temperatures: [usize; 24],
    heat_in_temperatures: [usize; 2],
    flow_temperature_pairs: [(usize, usize); 8],
}

impl ChannelLookup {
    fn resolve(table: &RawTable) -> Result<Self> {
        let index = table.channel_index();
        let find = |name: &str| -> Result<usize> {
            index
                .get(name)
                .copied()
                .ok_or_else(|| EstimatorError::MissingColumn {
                    column: name.to_string(),
                    source_name: table.source.clone(),
                })
        };

        let mut layer_temperatures = [0usize; 24];
        for (slot, name) in layer_temperatures.iter_mut().zip(channels::LAYER_TEMPERATURES) {
            *slot = find(name)?;
        }
        let heat_in_temperatures = [
            find(channels::HEAT_IN_TEMPERATURES[0])?,
            find(channels::HEAT_IN_TEMPERATURES[1])?,
        ];
        let mut flow_temperature_pairs = [(0usize, 0usize); 8];
        for (slot, (flow, temperature)) in flow_temperature_pairs
            .iter_mut()
            .zip(channels::FLOW_TEMPERATURE_PAIRS)
        {
            *slot = (find(flow)?, find(temperature)?);
        }

        Ok(Self {
            input_batch_1: find(channels::INPUT_BATCH_1)?,
            input_batch_2: find(channels::INPUT_BATCH_2)?,
            dust_flow: find(channels::DUST_FLOW)?,
            roasted_input: find(channels::ROASTED_INPUT)?,
            thermal_power: find(channels::THERMAL_POWER)?,
            layer_temperatures,
            heat_in_temperatures,
            flow_temperature_pairs,
        })
    }
}

/// Concatenate `tables` in the given order, parse timestamps, sort by
/// minute-epoch (stable, so ties keep input order) and derive the aggregate
/// columns.
///
/// Every table is checked for the full channel set before its rows are read.
pub fn prepare(tables: &[RawTable]) -> Result<Vec<PreparedRow>> {
    if tables.is_empty() {
        log::warn!("No extracts to prepare");
    }

    let mut prepared = Vec::with_capacity(tables.iter().map(RawTable::len).sum());
    for table in tables {
        let lookup = ChannelLookup::resolve(table)?;
        for reading in &table.rows {
            prepared.push(prepare_row(table, reading, &lookup)?);
        }
        log::debug!("Prepared {} rows from {}", table.len(), table.source);
    }

    prepared.sort_by_key(|row| row.minutes_since_epoch);
    log::info!("Prepared {} rows from {} extracts", prepared.len(), tables.len());
    Ok(prepared)
}

fn prepare_row(table: &RawTable, reading: &RawReading, lookup: &ChannelLookup) -> Result<PreparedRow> {
    let timestamp = parse_minute_timestamp(&reading.timestamp)?;
    let value = |idx: usize| -> Result<f64> {
        reading
            .values
            .get(idx)
            .copied()
            .flatten()
            .ok_or_else(|| EstimatorError::MissingValue {
                channel: table.channels[idx].clone(),
                timestamp: reading.timestamp.clone(),
            })
    };

    let layer = lookup
        .layer_temperatures
        .iter()
        .map(|&idx| value(idx))
        .collect::<Result<Vec<f64>>>()?;
    let inlet = [
        value(lookup.heat_in_temperatures[0])?,
        value(lookup.heat_in_temperatures[1])?,
    ];
    let pairs = lookup
        .flow_temperature_pairs
        .iter()
        .map(|&(flow, temperature)| -> Result<(f64, f64)> {
            Ok((value(flow)?, value(temperature)?))
        })
        .collect::<Result<Vec<(f64, f64)>>>()?;

    let flows: Vec<f64> = pairs.iter().map(|(flow, _)| *flow).collect();
    let heat_in = heat_in_sum(&flows, inlet);
    let heat_out = heat_out_sum(&pairs);

    Ok(PreparedRow {
        timestamp,
        minutes_since_epoch: minutes_since_epoch(&timestamp),
        input_batch_1: value(lookup.input_batch_1)?,
        input_batch_2: value(lookup.input_batch_2)?,
        dust_flow: value(lookup.dust_flow)?,
        roasted_input: value(lookup.roasted_input)?,
        total_thermal_power_mw: value(lookup.thermal_power)?,
        avg_layer_temperature_k: avg_layer_temperature(&layer),
        heat_in_sum: heat_in,
        heat_out_sum: heat_out,
        heat_balance: heat_out - heat_in,
    })
}

pub fn avg_layer_temperature(temperatures: &[f64]) -> f64 {
    (temperatures.iter().sum::<f64>() + KELVIN_OFFSET) / 24.0
}

pub fn heat_in_sum(flows: &[f64], inlet_temperatures: [f64; 2]) -> f64 {
    let mean_inlet = (inlet_temperatures[0] + inlet_temperatures[1]) / 2.0;
    flows.iter().sum::<f64>() * (mean_inlet + KELVIN_OFFSET)
}

pub fn heat_out_sum(flow_temperature_pairs: &[(f64, f64)]) -> f64 {
    flow_temperature_pairs
        .iter()
        .map(|(flow, temperature)| flow * (temperature + KELVIN_OFFSET))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_avg_layer_temperature_adds_offset_once() {
        let temps = [100.0; 24];
        assert_relative_eq!(avg_layer_temperature(&temps), (2400.0 + 273.15) / 24.0);
    }

    #[test]
    fn test_heat_sums() {
        let flows = [1.0; 8];
        assert_relative_eq!(heat_in_sum(&flows, [10.0, 20.0]), 8.0 * (15.0 + 273.15));

        let pairs = [(2.0, 0.0), (1.0, 100.0)];
        assert_relative_eq!(heat_out_sum(&pairs), 2.0 * 273.15 + 373.15);
    }

    #[test]
    fn test_prepare_empty_input() {
        assert!(prepare(&[]).unwrap().is_empty());
    }
}
