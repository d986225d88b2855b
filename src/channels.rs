//! Instrument tags read from the roaster extracts.
//!
//! The derived columns depend on these exact sets. They are checked against
//! every table header before any row is touched.

/// Timestamp column, both in the extracts and (after renaming) in the ground truth file.
pub const TIMESTAMP: &str = "czas";
/// Ground truth timestamp header before renaming.
pub const GROUND_TRUTH_TIMESTAMP: &str = "Czas";
/// True temperature column in the ground truth file.
pub const TRUE_TEMPERATURE: &str = "temp_zuz";

pub const INPUT_BATCH_1: &str = "001fcx00211.pv";
pub const INPUT_BATCH_2: &str = "001fcx00221.pv";
pub const DUST_FLOW: &str = "001fcx00231.pv";
pub const ROASTED_INPUT: &str = "001fcx00241.pv";

/// Total thermal power of the line, MW.
pub const THERMAL_POWER: &str = "001nir0szr0.daca.pv";

/// 24 temperature probes under the second layer, `001tix01063` through `001tix01086`.
pub const LAYER_TEMPERATURES: [&str; 24] = [
    "001tix01063.daca.pv",
    "001tix01064.daca.pv",
    "001tix01065.daca.pv",
    "001tix01066.daca.pv",
    "001tix01067.daca.pv",
    "001tix01068.daca.pv",
    "001tix01069.daca.pv",
    "001tix01070.daca.pv",
    "001tix01071.daca.pv",
    "001tix01072.daca.pv",
    "001tix01073.daca.pv",
    "001tix01074.daca.pv",
    "001tix01075.daca.pv",
    "001tix01076.daca.pv",
    "001tix01077.daca.pv",
    "001tix01078.daca.pv",
    "001tix01079.daca.pv",
    "001tix01080.daca.pv",
    "001tix01081.daca.pv",
    "001tix01082.daca.pv",
    "001tix01083.daca.pv",
    "001tix01084.daca.pv",
    "001tix01085.daca.pv",
    "001tix01086.daca.pv",
];

/// Inlet temperatures averaged for the heat-in sum.
pub const HEAT_IN_TEMPERATURES: [&str; 2] = ["037tix00254.daca.pv", "037tix00264.daca.pv"];

/// Flow / outlet temperature pairs. Note the last pair skips 01314 / 01364.
pub const FLOW_TEMPERATURE_PAIRS: [(&str, &str); 8] = [
    ("001fir01307.daca.pv", "001tir01357.daca.pv"),
    ("001fir01308.daca.pv", "001tir01358.daca.pv"),
    ("001fir01309.daca.pv", "001tir01359.daca.pv"),
    ("001fir01310.daca.pv", "001tir01360.daca.pv"),
    ("001fir01311.daca.pv", "001tir01361.daca.pv"),
    ("001fir01312.daca.pv", "001tir01362.daca.pv"),
    ("001fir01313.daca.pv", "001tir01363.daca.pv"),
    ("001fir01315.daca.pv", "001tir01365.daca.pv"),
];

// Derived column names.
pub const MINUTES_SINCE_EPOCH: &str = "minut_od_epochu";
pub const TOTAL_THERMAL_POWER: &str = "sumaryczna_moc_cieplna_w_MW";
pub const AVG_LAYER_TEMPERATURE: &str = "sr_temp_K_pod_2_warstwa_wymorowki";
pub const HEAT_IN_SUM: &str = "suma_ciepla_wch";
pub const HEAT_OUT_SUM: &str = "suma_ciepla_wych";
pub const HEAT_BALANCE: &str = "bilans_ciepla_wych_minus_wch";
pub const ESTIMATED_TEMPERATURE: &str = "temp_estymowana";

/// Column order of the prepared table.
pub const PREPARED_COLUMNS: [&str; 9] = [
    TIMESTAMP,
    MINUTES_SINCE_EPOCH,
    INPUT_BATCH_1,
    INPUT_BATCH_2,
    DUST_FLOW,
    ROASTED_INPUT,
    TOTAL_THERMAL_POWER,
    AVG_LAYER_TEMPERATURE,
    HEAT_BALANCE,
];

/// Every raw channel `prepare` reads, in a fixed order.
pub fn required_channels() -> Vec<&'static str> {
    let mut all = vec![INPUT_BATCH_1, INPUT_BATCH_2, DUST_FLOW, ROASTED_INPUT, THERMAL_POWER];
    all.extend(LAYER_TEMPERATURES.iter());
    all.extend(HEAT_IN_TEMPERATURES.iter());
    for (flow, temperature) in FLOW_TEMPERATURE_PAIRS.iter() {
        all.push(flow);
        all.push(temperature);
    }
    all
}
