//! Coordinate backfill over a JSON list of market records.
//!
//! Markets whose `lat`/`lng` are missing or zero are geocoded from `place`,
//! with `market_name` as the building-name hint. Records without a usable
//! place are reported as failures without calling the provider.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use fleamap_core::UNDECIDED_LOCATION;
use fleamap_geocoder::{GeocodeCache, Geocoder, PlaceSearch};
use serde::{Deserialize, Serialize};

const REASON_NO_PLACE: &str = "no place information";
const REASON_UNRESOLVED: &str = "geocoding failed (every search strategy failed)";

/// One market record. Unknown fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Market {
    pub id: serde_json::Value,
    pub market_name: Option<String>,
    pub place: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Market {
    /// Missing and zero coordinates both count as "not located".
    pub(crate) fn needs_geocoding(&self) -> bool {
        let unset = |v: Option<f64>| v.is_none_or(|x| x.abs() < f64::EPSILON);
        unset(self.lat) || unset(self.lng)
    }

    fn usable_place(&self) -> Option<&str> {
        self.place
            .as_deref()
            .filter(|p| !p.trim().is_empty() && *p != UNDECIDED_LOCATION)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct BackfillFailure {
    pub id: serde_json::Value,
    pub market_name: Option<String>,
    pub place: Option<String>,
    pub reason: String,
}

impl BackfillFailure {
    fn new(market: &Market, reason: &str) -> Self {
        Self {
            id: market.id.clone(),
            market_name: market.market_name.clone(),
            place: market.place.clone(),
            reason: reason.to_owned(),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct BackfillReport {
    pub total: usize,
    pub already_located: usize,
    pub success: usize,
    pub failures: Vec<BackfillFailure>,
}

impl BackfillReport {
    pub(crate) fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Percentage of attempted markets that were located, or `None` when
    /// nothing was attempted.
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn success_rate(&self) -> Option<f64> {
        let attempted = self.success + self.failed();
        (attempted > 0).then(|| self.success as f64 * 100.0 / attempted as f64)
    }
}

#[derive(Debug)]
pub(crate) struct BackfillOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub failures: PathBuf,
    pub delay: Duration,
    pub dry_run: bool,
}

/// Geocodes every market in `markets` that lacks coordinates, in place.
///
/// Sleeps `delay` between consecutive provider-bound lookups.
pub(crate) async fn backfill_markets<P: PlaceSearch, C: GeocodeCache>(
    geocoder: &Geocoder<P, C>,
    markets: &mut [Market],
    delay: Duration,
) -> BackfillReport {
    let pending: Vec<usize> = markets
        .iter()
        .enumerate()
        .filter(|(_, m)| m.needs_geocoding())
        .map(|(i, _)| i)
        .collect();

    let mut report = BackfillReport {
        total: markets.len(),
        already_located: markets.len() - pending.len(),
        ..BackfillReport::default()
    };
    tracing::info!(
        total = report.total,
        pending = pending.len(),
        already_located = report.already_located,
        "starting coordinate backfill"
    );

    let mut looked_up = false;
    for (position, &index) in pending.iter().enumerate() {
        let market = &mut markets[index];
        tracing::info!(
            progress = %format!("{}/{}", position + 1, pending.len()),
            id = %market.id,
            market_name = market.market_name.as_deref().unwrap_or_default(),
            place = market.place.as_deref().unwrap_or_default(),
            "geocoding market"
        );

        let Some(place) = market.usable_place() else {
            tracing::warn!(id = %market.id, "skipping market without place information");
            report
                .failures
                .push(BackfillFailure::new(market, REASON_NO_PLACE));
            continue;
        };

        if looked_up && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        looked_up = true;

        match geocoder.resolve(place, market.market_name.as_deref()).await {
            Some(resolved) => {
                tracing::info!(
                    id = %market.id,
                    lat = resolved.lat,
                    lng = resolved.lng,
                    method = %resolved.method,
                    "market located"
                );
                market.lat = Some(resolved.lat);
                market.lng = Some(resolved.lng);
                report.success += 1;
            }
            None => {
                tracing::warn!(id = %market.id, "market could not be geocoded");
                report
                    .failures
                    .push(BackfillFailure::new(market, REASON_UNRESOLVED));
            }
        }
    }

    report
}

fn read_markets(path: &Path) -> anyhow::Result<Vec<Market>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON array of markets", path.display()))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))
}

/// Reads markets from `options.input`, backfills coordinates, writes the
/// updated list to `options.output` and any failures to `options.failures`.
///
/// When `dry_run` is `true`, only reports how many markets would be
/// geocoded; nothing is written and the provider is never called.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed, or an output file
/// cannot be written. Individual geocoding failures are recorded, not
/// propagated.
pub(crate) async fn run_backfill<P: PlaceSearch, C: GeocodeCache>(
    geocoder: &Geocoder<P, C>,
    options: &BackfillOptions,
) -> anyhow::Result<()> {
    let mut markets = read_markets(&options.input)?;

    if options.dry_run {
        let pending = markets.iter().filter(|m| m.needs_geocoding()).count();
        println!(
            "dry-run: {pending} of {} markets need coordinates",
            markets.len()
        );
        return Ok(());
    }

    let report = backfill_markets(geocoder, &mut markets, options.delay).await;
    write_json(&options.output, &markets)?;

    println!(
        "located {} markets, {} failed, {} already had coordinates (of {})",
        report.success,
        report.failed(),
        report.already_located,
        report.total
    );
    if report.failed() > 0 {
        if let Some(rate) = report.success_rate() {
            println!("success rate: {rate:.1}%");
        }
        write_json(&options.failures, &report.failures)?;
        println!(
            "failures written to {}; fix those places by hand or adjust the source data",
            options.failures.display()
        );
    }

    Ok(())
}

#[cfg(test)]
#[path = "backfill_test.rs"]
mod tests;
