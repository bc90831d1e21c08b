use fleamap_geocoder::{GeocodeCache, Geocoder, PlaceSearch};

/// Resolves one location and prints the coordinate as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error when the location cannot be resolved, so the process
/// exits non-zero.
pub(crate) async fn run_resolve<P: PlaceSearch, C: GeocodeCache>(
    geocoder: &Geocoder<P, C>,
    location: &str,
    market_name: Option<&str>,
) -> anyhow::Result<()> {
    let Some(resolved) = geocoder.resolve(location, market_name).await else {
        anyhow::bail!("could not find coordinates for \"{location}\"");
    };

    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}
