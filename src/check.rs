use crate::alerts::{self, Evaluation, Thresholds};
use crate::clock::Clock;
use crate::collectors::scan::ScanParser;
use crate::collectors::zfs::ZpoolSource;
use crate::error::{CheckError, Result};

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Restrict the check to one pool; None checks every pool.
    pub pool:       Option<String>,
    pub thresholds: Thresholds,
}

/// List, probe and judge pools one after another. The first collaborator
/// error aborts the whole run. Results are sorted by pool name.
pub fn run(
    source: &dyn ZpoolSource,
    opts:   &CheckOptions,
    parser: &ScanParser,
    clock:  &dyn Clock,
) -> Result<Vec<Evaluation>> {
    let pools = source.list_pools()?;
    tracing::debug!(?pools, "pools");

    let selected = match &opts.pool {
        Some(pool) if pools.contains(pool) => vec![pool.clone()],
        Some(pool) => {
            return Err(CheckError::UnknownPool { pool: pool.clone(), available: pools });
        }
        None => pools,
    };

    let mut evaluations = Vec::with_capacity(selected.len());
    for pool in &selected {
        let text = source.pool_status(pool)?;
        let snapshot = parser.parse(pool, &text);
        tracing::debug!(?snapshot, "parsed");
        evaluations.push(alerts::evaluate(&snapshot, &opts.thresholds, clock));
    }

    evaluations.sort_by(|a, b| a.pool.cmp(&b.pool));
    Ok(evaluations)
}
