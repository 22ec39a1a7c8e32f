//! Medal reweighting.
//!
//! Group means can be tilted toward successful athletes by duplicating
//! medal-winning rows before aggregation. A multiplier of 1 or 2 leaves the
//! table unchanged; a multiplier `m > 2` appends `m - 2` extra copies of
//! every medal row, so a medalist ends up counted `m - 1` times.

use podium_data::AthleteTable;

use crate::error::AnalysisError;

/// Reweights medal winners by duplication.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidParameter`] when `multiplier` is zero.
pub fn adjust_for_medals(
    table: &AthleteTable,
    multiplier: u32,
) -> Result<AthleteTable, AnalysisError> {
    if multiplier < 1 {
        return Err(AnalysisError::invalid(format!(
            "medal multiplier must be at least 1, got {multiplier}"
        )));
    }

    let mut rows = table.rows().to_vec();
    if multiplier > 2 {
        let extra_copies = (multiplier - 2) as usize;
        let medal_rows: Vec<_> = table
            .rows()
            .iter()
            .filter(|record| record.won_medal())
            .cloned()
            .collect();
        for _ in 0..extra_copies {
            rows.extend(medal_rows.iter().cloned());
        }
    }
    Ok(AthleteTable::from_records(rows))
}
