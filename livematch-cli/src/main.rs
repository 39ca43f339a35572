use clap::Parser;
use livematch::image::io::load_pixels;
use livematch::{
    find_all, find_best, CancellationToken, Frame, FrameRing, LiveMatcher, MatchOptions,
    MatchResult, Metric, Rect, Template, WaitOptions,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/config.example.json"
));

#[derive(Parser, Debug)]
#[command(author, version, about = "livematch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum MetricConfig {
    #[default]
    Zncc,
    Ncc,
    SqDiffNormed,
}

impl From<MetricConfig> for Metric {
    fn from(value: MetricConfig) -> Self {
        match value {
            MetricConfig::Zncc => Metric::Zncc,
            MetricConfig::Ncc => Metric::Ncc,
            MetricConfig::SqDiffNormed => Metric::SqDiffNormed,
        }
    }
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum Mode {
    /// Single best match across the scale sweep.
    #[default]
    Best,
    /// Every match above the threshold, with suppression.
    All,
    /// Replay frames through a ring and wait for a stable match.
    Wait,
}

#[derive(Debug, Deserialize)]
struct RoiJson {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MatchOptionsJson {
    metric: MetricConfig,
    threshold: f32,
    scale_min: f32,
    scale_max: f32,
    scale_step: f32,
    roi: Option<RoiJson>,
    grayscale: bool,
    edge: bool,
    blur_kernel: Option<u32>,
    consecutive_hits_required: u32,
    require_hard_pass: bool,
    parallel: bool,
}

impl Default for MatchOptionsJson {
    fn default() -> Self {
        let opts = MatchOptions::default();
        Self {
            metric: MetricConfig::Zncc,
            threshold: opts.threshold,
            scale_min: opts.scale_min,
            scale_max: opts.scale_max,
            scale_step: opts.scale_step,
            roi: None,
            grayscale: opts.grayscale,
            edge: opts.edge,
            blur_kernel: opts.blur_kernel,
            consecutive_hits_required: opts.consecutive_hits_required,
            require_hard_pass: opts.require_hard_pass,
            parallel: opts.parallel,
        }
    }
}

impl From<MatchOptionsJson> for MatchOptions {
    fn from(value: MatchOptionsJson) -> Self {
        Self {
            metric: value.metric.into(),
            threshold: value.threshold,
            scale_min: value.scale_min,
            scale_max: value.scale_max,
            scale_step: value.scale_step,
            roi: value.roi.map(|r| Rect::new(r.x, r.y, r.width, r.height)),
            grayscale: value.grayscale,
            edge: value.edge,
            blur_kernel: value.blur_kernel,
            consecutive_hits_required: value.consecutive_hits_required,
            require_hard_pass: value.require_hard_pass,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WaitJson {
    frame_paths: Vec<String>,
    frame_interval_ms: u64,
    timeout_ms: u64,
    poll_interval_ms: u64,
    allow_near: bool,
    global_refresh_ticks: Option<u32>,
}

impl Default for WaitJson {
    fn default() -> Self {
        let wait = WaitOptions::default();
        Self {
            frame_paths: Vec::new(),
            frame_interval_ms: 100,
            timeout_ms: wait.timeout.as_millis() as u64,
            poll_interval_ms: wait.poll_interval.as_millis() as u64,
            allow_near: wait.allow_near,
            global_refresh_ticks: wait.global_refresh_ticks,
        }
    }
}

impl From<&WaitJson> for WaitOptions {
    fn from(value: &WaitJson) -> Self {
        Self {
            timeout: Duration::from_millis(value.timeout_ms),
            poll_interval: Duration::from_millis(value.poll_interval_ms),
            allow_near: value.allow_near,
            global_refresh_ticks: value.global_refresh_ticks,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    mode: Mode,
    max_results: usize,
    nms_overlap: f32,
    #[serde(rename = "match")]
    match_cfg: MatchOptionsJson,
    wait: WaitJson,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            mode: Mode::Best,
            max_results: 5,
            nms_overlap: 0.0,
            match_cfg: MatchOptionsJson::default(),
            wait: WaitJson::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    center_x: i32,
    center_y: i32,
    score: f32,
    scale: f32,
    hard_pass: bool,
}

impl From<MatchResult> for MatchRecord {
    fn from(value: MatchResult) -> Self {
        Self {
            x: value.bounds.x,
            y: value.bounds.y,
            width: value.bounds.width,
            height: value.bounds.height,
            center_x: value.center.x,
            center_y: value.center.y,
            score: value.score,
            scale: value.scale,
            hard_pass: value.hard_pass,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    best: Option<MatchRecord>,
    matches: Vec<MatchRecord>,
}

/// Pushes the configured frames into a ring at a fixed interval while the
/// matcher waits on it.
fn run_wait(
    config: &Config,
    template: &Template,
    options: &MatchOptions,
) -> Result<Option<MatchResult>, Box<dyn std::error::Error>> {
    let mut frames = vec![load_pixels(&config.image_path)?];
    for path in &config.wait.frame_paths {
        frames.push(load_pixels(path)?);
    }

    let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
    let result = runtime.block_on(async {
        let ring = Arc::new(FrameRing::default());
        let matcher = LiveMatcher::new(Arc::clone(&ring));
        let interval = Duration::from_millis(config.wait.frame_interval_ms);
        let producer = {
            let ring = Arc::clone(&ring);
            tokio::spawn(async move {
                for (seq, pixels) in frames.into_iter().enumerate() {
                    ring.push(Frame::new(pixels, seq as u64 + 1));
                    tokio::time::sleep(interval).await;
                }
            })
        };
        let wait = WaitOptions::from(&config.wait);
        let found = matcher
            .wait_for_match(template, &wait, options, &CancellationToken::new())
            .await;
        producer.abort();
        found
    })?;
    Ok(result)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("livematch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let mut config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }
    if config.mode == Mode::All && config.max_results == 0 {
        return Err("max_results must be at least 1".into());
    }

    let pixels = load_pixels(&config.template_path)?;
    let template = Template::new(config.template_path.as_str(), pixels);
    let options = MatchOptions::from(std::mem::take(&mut config.match_cfg));

    let matches: Vec<MatchResult> = match config.mode {
        Mode::Best => {
            let frame = Frame::new(load_pixels(&config.image_path)?, 1);
            find_best(&frame, &template, &options)?.into_iter().collect()
        }
        Mode::All => {
            let frame = Frame::new(load_pixels(&config.image_path)?, 1);
            find_all(&frame, &template, &options, config.max_results, config.nms_overlap)?
        }
        Mode::Wait => run_wait(&config, &template, &options)?.into_iter().collect(),
    };

    let best = matches.first().copied().map(MatchRecord::from);
    let matches = matches.into_iter().map(MatchRecord::from).collect();
    let output = Output { best, matches };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
