use clap::{Parser, Subcommand};
use minutiae::image::io::load_rgb_image;
use minutiae::store::DEFAULT_PRINT_DIR;
use minutiae::{
    compare, print_name, rank, Comparison, ExtractConfig, MatchConfig, Matcher, MinutiaKind,
    Print, PrintDir,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Fingerprint template builder and matcher")]
struct Cli {
    /// Directory holding prints, templates and labelled images.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_PRINT_DIR)]
    dir: PathBuf,
    /// Optional JSON configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a template from a fingerprint image and store it.
    BuildTemplate {
        /// Fingerprint image (PNG or JPEG).
        image: PathBuf,
        /// Print name; defaults to the image file name.
        name: Option<String>,
    },
    /// Score one stored print against another.
    Match {
        a: String,
        b: String,
        /// Acceptance threshold in percent.
        #[arg(long)]
        threshold: Option<u8>,
        /// Stop at the first rotation reaching the threshold.
        #[arg(long)]
        fast: bool,
    },
    /// Rank every other stored print against one print.
    Identify {
        name: String,
        #[arg(long)]
        threshold: Option<u8>,
        #[arg(long)]
        fast: bool,
    },
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ExtractConfigJson {
    threshold: u8,
    core_margin: usize,
    scan_margin: usize,
    dedup_tolerance: i32,
    capacity: usize,
    max_sweeps: usize,
}

impl Default for ExtractConfigJson {
    fn default() -> Self {
        let cfg = ExtractConfig::default();
        Self {
            threshold: cfg.threshold,
            core_margin: cfg.core_margin,
            scan_margin: cfg.scan_margin,
            dedup_tolerance: cfg.dedup_tolerance,
            capacity: cfg.capacity,
            max_sweeps: cfg.max_sweeps,
        }
    }
}

impl From<ExtractConfigJson> for ExtractConfig {
    fn from(value: ExtractConfigJson) -> Self {
        Self {
            threshold: value.threshold,
            core_margin: value.core_margin,
            scan_margin: value.scan_margin,
            dedup_tolerance: value.dedup_tolerance,
            capacity: value.capacity,
            max_sweeps: value.max_sweeps,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchConfigJson {
    threshold: u8,
    fast: bool,
    max_rotation_deg: u16,
    max_distance: u32,
    parallel: bool,
}

impl Default for MatchConfigJson {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            threshold: cfg.threshold,
            fast: cfg.fast,
            max_rotation_deg: cfg.max_rotation_deg,
            max_distance: cfg.max_distance,
            parallel: cfg.parallel,
        }
    }
}

impl From<MatchConfigJson> for MatchConfig {
    fn from(value: MatchConfigJson) -> Self {
        Self {
            threshold: value.threshold,
            fast: value.fast,
            max_rotation_deg: value.max_rotation_deg,
            max_distance: value.max_distance,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    extract: ExtractConfigJson,
    #[serde(rename = "match")]
    match_cfg: MatchConfigJson,
}

#[derive(Debug, Serialize)]
struct TemplateRecord {
    name: String,
    origin: [i32; 2],
    minutiae: usize,
    endings: usize,
    bifurcations: usize,
    count: usize,
    template_path: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum ComparisonRecord {
    Scored {
        score: u8,
        rotation_deg: i32,
        matches: usize,
        minutiae: usize,
    },
    CannotCompare {
        score: u8,
        missing: Vec<String>,
    },
    Unreadable {
        score: u8,
        unreadable: String,
        reason: String,
    },
}

impl From<Comparison> for ComparisonRecord {
    fn from(value: Comparison) -> Self {
        match value {
            Comparison::Scored(outcome) => ComparisonRecord::Scored {
                score: outcome.score,
                rotation_deg: outcome.rotation_deg,
                matches: outcome.matches,
                minutiae: outcome.minutiae,
            },
            Comparison::CannotCompare { missing } => {
                ComparisonRecord::CannotCompare { score: 0, missing }
            }
            Comparison::Unreadable { name, reason } => ComparisonRecord::Unreadable {
                score: 0,
                unreadable: name,
                reason,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    a: String,
    b: String,
    #[serde(flatten)]
    comparison: ComparisonRecord,
}

#[derive(Debug, Serialize)]
struct RankRecord {
    name: String,
    #[serde(flatten)]
    comparison: ComparisonRecord,
}

#[derive(Debug, Serialize)]
struct IdentifyRecord {
    probe: String,
    best: Option<String>,
    ranking: Vec<RankRecord>,
}

fn matcher_for(base: MatchConfig, threshold: Option<u8>, fast: bool) -> Matcher {
    Matcher::new().with_config(MatchConfig {
        threshold: threshold.unwrap_or(base.threshold),
        fast: fast || base.fast,
        ..base
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("minutiae=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config: Config = match &cli.config {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    let extract_cfg = ExtractConfig::from(config.extract);
    let match_cfg = MatchConfig::from(config.match_cfg);
    let store = PrintDir::new(cli.dir.clone());

    let json = match cli.command {
        None => return Err("no command given; see --help".into()),
        Some(Command::BuildTemplate { image, name }) => {
            let name = name.unwrap_or_else(|| print_name(&image));
            if name.is_empty() {
                return Err("cannot derive a print name from the image path".into());
            }
            let grid = load_rgb_image(&image)?;
            let print = Print::capture(name, &grid, extract_cfg)?;
            store.store(&print)?;
            tracing::info!(print = print.name(), minutiae = print.template().len(), "stored print");

            let template = print.template();
            let origin = template.origin();
            serde_json::to_string_pretty(&TemplateRecord {
                name: print.name().to_owned(),
                origin: [origin.x, origin.y],
                minutiae: template.len(),
                endings: template.of_kind(MinutiaKind::RidgeEnding).count(),
                bifurcations: template.of_kind(MinutiaKind::Bifurcation).count(),
                count: template.count(),
                template_path: store.template_path(print.name()).display().to_string(),
            })?
        }
        Some(Command::Match {
            a,
            b,
            threshold,
            fast,
        }) => {
            let matcher = matcher_for(match_cfg, threshold, fast);
            let comparison = compare(&store, &a, &b, &matcher)?;
            serde_json::to_string_pretty(&MatchRecord {
                a,
                b,
                comparison: comparison.into(),
            })?
        }
        Some(Command::Identify {
            name,
            threshold,
            fast,
        }) => {
            let matcher = matcher_for(match_cfg, threshold, fast);
            let ranked = rank(&store, &name, &matcher)?;
            let best = ranked
                .first()
                .filter(|r| r.comparison.is_scored())
                .map(|r| r.name.clone());
            let ranking = ranked
                .into_iter()
                .map(|r| RankRecord {
                    name: r.name,
                    comparison: r.comparison.into(),
                })
                .collect();
            serde_json::to_string_pretty(&IdentifyRecord {
                probe: name,
                best,
                ranking,
            })?
        }
    };

    println!("{json}");
    Ok(())
}
