use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zncc_rot::io::load_image;
use zncc_rot::{
    best_rotation, compute, Bilinear, Region, RotationConfig, SentinelMode, WeightMap, ZnccConfig,
};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ZNCC region correlation (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    Compute,
    Rotation,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SentinelConfig {
    #[default]
    Auto,
    Enabled,
    Disabled,
}

impl From<SentinelConfig> for SentinelMode {
    fn from(value: SentinelConfig) -> Self {
        match value {
            SentinelConfig::Auto => SentinelMode::Auto,
            SentinelConfig::Enabled => SentinelMode::Enabled,
            SentinelConfig::Disabled => SentinelMode::Disabled,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
struct RegionJson {
    x: i64,
    y: i64,
    width: usize,
    height: usize,
}

impl From<RegionJson> for Region {
    fn from(value: RegionJson) -> Self {
        Region::new(value.x, value.y, value.width, value.height)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image1_path: String,
    image2_path: String,
    region1: Option<RegionJson>,
    region2: Option<RegionJson>,
    mode: ModeConfig,
    step_deg: f64,
    parallel: bool,
    sentinels: SentinelConfig,
    weights: Option<Vec<f32>>,
    output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let rotation = RotationConfig::default();
        Self {
            image1_path: String::new(),
            image2_path: String::new(),
            region1: None,
            region2: None,
            mode: ModeConfig::default(),
            step_deg: rotation.step_deg,
            parallel: rotation.parallel,
            sentinels: SentinelConfig::default(),
            weights: None,
            output_path: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    score: f64,
    angle_deg: Option<f64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("zncc_rot=debug".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image1_path.is_empty() || config.image2_path.is_empty() {
        return Err("image1_path and image2_path must be set in the config".into());
    }

    let image1 = load_image(&config.image1_path)?;
    let image2 = load_image(&config.image2_path)?;
    let view1 = image1.view();
    let view2 = image2.view();
    tracing::info!(
        depth = %view1.depth(),
        width1 = view1.width(),
        height1 = view1.height(),
        width2 = view2.width(),
        height2 = view2.height(),
        "images loaded"
    );

    let region1: Region = match config.region1 {
        Some(region) => region.into(),
        None => Region::full(view1.width(), view1.height()),
    };
    let region2: Region = match config.region2 {
        Some(region) => region.into(),
        None => Region::new(0, 0, region1.width, region1.height),
    };
    let weights = config.weights.as_deref().map(WeightMap::new);
    let zncc = ZnccConfig {
        sentinels: config.sentinels.into(),
    };

    let output = match config.mode {
        ModeConfig::Compute => Output {
            score: compute(view1, region1, view2, region2, weights, &zncc)?,
            angle_deg: None,
        },
        ModeConfig::Rotation => {
            let cfg = RotationConfig {
                step_deg: config.step_deg,
                zncc,
                parallel: config.parallel,
            };
            let best = best_rotation(view1, region1, view2, region2, weights, &cfg, &Bilinear)?;
            Output {
                score: best.score,
                angle_deg: Some(best.angle_deg),
            }
        }
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
