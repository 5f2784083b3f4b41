use serde::Serialize;
use utoipa::ToSchema;

use crate::tle::builder::build_tle;
use crate::tle::error::TleError;
use crate::tle::types::{OrbitalElementRecord, TleLinePair};

/// Offsets (minutes before epoch) generated when the caller does not ask for others.
pub const DEFAULT_OFFSETS_MINUTES: [u32; 4] = [0, 4, 6, 8];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TleHistoryEntry {
    pub minutes_before: u32,
    pub tle: TleLinePair,
}

/// TLEs for one object, in the order the offsets were requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TleHistory {
    pub catalog_number: u32,
    pub entries: Vec<TleHistoryEntry>,
}

pub fn generate_history(
    record: &OrbitalElementRecord,
    offsets_minutes: &[u32],
) -> Result<TleHistory, TleError> {
    let entries = offsets_minutes
        .iter()
        .map(|&minutes_before| {
            build_tle(record, minutes_before)
                .map(|tle| TleHistoryEntry {
                    minutes_before,
                    tle,
                })
                .map_err(|e| TleError::AtOffset {
                    minutes_before,
                    source: Box::new(e),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(TleHistory {
        catalog_number: record.catalog_number,
        entries,
    })
}
