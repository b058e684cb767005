use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use midway::geodesy::{DistanceUnit, EarthModel};
use midway::location::{Geocoder, LocationResolver, ResolveOptions, ResolvedLocation};
use midway::prompt::{ask_location, ask_unit};
use midway::render::{save_map, DEFAULT_MAP_FILE};
use midway::server;
use midway::trip::measure;

/// midway: distance and midpoint between two places
///
/// Resolves two place names (or "lat, lon" pairs), prints the great-circle
/// distance between them and writes a map centered on the midpoint.
/// Places left off the command line are asked for interactively.
///
/// Examples:
///   midway London "New York"
///   midway Paris Tokyo --unit mi --model wgs84
///   midway "40.7128, -74.0060" "51.5074, -0.1278" --json --no-map
///   midway --serve --port 8080
#[derive(Parser)]
#[command(name = "midway", version, about, long_about = None)]
struct Cli {
    /// First place (name or "lat, lon").
    #[arg(index = 1, allow_hyphen_values = true)]
    from: Option<String>,

    /// Second place (name or "lat, lon").
    #[arg(index = 2, allow_hyphen_values = true)]
    to: Option<String>,

    /// Distance unit: km, m, ft or mi.
    #[arg(long, short = 'u', value_parser = parse_unit)]
    unit: Option<DistanceUnit>,

    /// Earth model: "sphere" (great circle) or "wgs84" (ellipsoidal geodesic).
    #[arg(long, default_value = "sphere", value_parser = parse_model)]
    model: EarthModel,

    /// Where to write the HTML map.
    #[arg(long, short = 'o', default_value = DEFAULT_MAP_FILE)]
    output: PathBuf,

    /// Skip writing the map.
    #[arg(long)]
    no_map: bool,

    /// Print the full report as JSON on stdout.
    #[arg(long)]
    json: bool,

    /// Offline mode: only coordinates and the built-in city list.
    #[arg(long)]
    offline: bool,

    /// Country hint (ISO 3166-1 alpha-2, e.g. GB, US, FR).
    #[arg(long)]
    country: Option<String>,

    /// Serve the HTTP API instead of measuring once.
    #[arg(long)]
    serve: bool,

    /// Host to bind with --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind with --serve.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Log resolver and measurement details to stderr.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn parse_unit(s: &str) -> Result<DistanceUnit, String> {
    s.parse().map_err(|e: midway::GeoError| e.to_string())
}

fn parse_model(s: &str) -> Result<EarthModel, String> {
    s.parse()
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut resolver = LocationResolver::with_options(ResolveOptions {
        country: cli.country.clone(),
    });
    resolver.set_offline(cli.offline);

    if cli.serve {
        serve(&cli, resolver);
        return;
    }

    // ── Resolve places ──────────────────────────────────────────

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stderr = io::stderr();

    let from = resolve_or_ask(cli.from.as_deref(), 1, &mut resolver, &mut input, &mut stderr);
    let to = resolve_or_ask(cli.to.as_deref(), 2, &mut resolver, &mut input, &mut stderr);

    // Only ask for a unit in an interactive session
    let interactive = cli.from.is_none() || cli.to.is_none();
    let unit = match cli.unit {
        Some(u) => u,
        None if interactive => ask_unit(&mut input, &mut stderr, DistanceUnit::default())
            .unwrap_or_else(|e| fail(&format!("Cannot read unit: {}", e))),
        None => DistanceUnit::default(),
    };

    // ── Measure ─────────────────────────────────────────────────

    let report = measure(&from, &to, unit, cli.model).unwrap_or_else(|e| fail(&e.to_string()));

    eprintln!("  \u{1F4CD} {}", from.display_line());
    eprintln!("  \u{1F4CD} {}", to.display_line());
    eprintln!("  \u{2194}  Midpoint: {}", report.midpoint);

    if cli.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => fail(&format!("Cannot serialize report: {}", e)),
        }
    } else {
        println!("{}", report.summary_line());
    }

    // ── Map ─────────────────────────────────────────────────────

    if !cli.no_map {
        if let Err(e) = save_map(&cli.output, &report) {
            fail(&format!("Cannot write map to {}: {}", cli.output.display(), e));
        }
        eprintln!("  \u{1F5FA}  Map written to {}", cli.output.display());
    }
}

/// Resolve a place given on the command line, or prompt for it.
fn resolve_or_ask<R: BufRead, W: Write>(
    given: Option<&str>,
    number: usize,
    resolver: &mut LocationResolver,
    input: &mut R,
    output: &mut W,
) -> ResolvedLocation {
    match given {
        Some(query) => resolver.resolve(query).unwrap_or_else(|e| fail(&e.to_string())),
        None => ask_location(input, output, resolver, number)
            .map(|(typed, loc)| ResolvedLocation { query: typed, ..loc })
            .unwrap_or_else(|e| fail(&format!("Cannot read location {}: {}", number, e))),
    }
}

fn serve(cli: &Cli, resolver: LocationResolver) {
    let runtime = tokio::runtime::Runtime::new()
        .unwrap_or_else(|e| fail(&format!("Cannot start runtime: {}", e)));
    if let Err(e) = runtime.block_on(server::start(&cli.host, cli.port, resolver)) {
        fail(&format!("Server error on {}:{}: {}", cli.host, cli.port, e));
    }
}

fn fail(msg: &str) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}
