// SPDX-License-Identifier: MIT
//
// swatch — color conversion, contrast, palettes and pixel filters from the
// command line.
//
// This is the binary that wires together all the crates:
//
//   swatch-color   → hex/RGB/HSL conversion, WCAG contrast, clipboard text
//   swatch-palette → tinted whites, theme palettes, Kelvin colors, favorites
//   swatch-pixel   → color-vision simulation and white balance on RGBA
//   swatch-light   → lux arithmetic, flash seizure-risk scoring, Morse timelines
//
// Each subcommand parses its arguments, calls into one crate, and prints
// plain text (or JSON where a command offers `--json`). Image commands read
// a file through `surface::ImageFile`, transform the pixels in memory, and
// write the result to a new file.

mod config;
mod surface;

use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use swatch_color::{
    Rgb, WcagLevels, contrast_ratio, hsl_css, hsl_text, parse_color_text, readable_on, rgb_text,
    wcag_levels,
};
use swatch_light::lux as photometry;
use swatch_light::{
    FlashInput, RiskAnalysis, Segment, analyze_seizure_risk, build_timeline, encoded_preview, flash_period,
    total_units, unit_ms_from_wpm,
};
use swatch_palette::kelvin::KELVIN_PRESETS;
use swatch_palette::{
    Favorites, JsonFileStore, PaletteEntry, ThemeParams, Xorshift32, generate_theme, kelvin_preview, kelvin_to_rgb,
    palette_tokens, parse_kelvin_input, random_pastel_tint, tinted_whites,
};
use swatch_pixel::{PixelSource, apply_gains, compute_white_balance_gains, estimate_temp_and_tint, simulate};

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::surface::ImageFile;

/// Temperature a typed Kelvin value falls back to when left empty.
const DEFAULT_KELVIN: u32 = 6500;

#[derive(Parser)]
#[command(name = "swatch")]
#[command(about = "Color conversion, contrast checks, palettes and pixel filters")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a color as hex, RGB and HSL
    Convert {
        /// `#RRGGBB`, `#RGB`, `R, G, B` or `H, S%, L%`
        color: String,
    },

    /// WCAG contrast ratio between two colors
    Contrast { foreground: String, background: String },

    /// Off-whites blending a tint toward white
    Whites {
        /// Tint color; a random pastel when omitted
        tint: Option<String>,

        /// Number of steps (2–50)
        #[arg(short, long)]
        count: Option<usize>,

        /// Whiteness of the first step (0–1)
        #[arg(short, long)]
        start: Option<f64>,

        /// Seed for the random pastel
        #[arg(long)]
        seed: Option<u32>,
    },

    /// Light and dark role palettes as CSS custom properties
    Theme {
        /// Lightness offset (10–90)
        #[arg(short, long)]
        brightness: Option<f64>,

        /// Hue in degrees
        #[arg(long)]
        hue: Option<f64>,

        /// Saturation (0–100)
        #[arg(short, long)]
        saturation: Option<f64>,

        /// Entries per palette (3–5)
        #[arg(short, long)]
        count: Option<usize>,

        /// Print JSON instead of CSS
        #[arg(long)]
        json: bool,
    },

    /// Color of a light source by temperature; lists presets when omitted
    Kelvin {
        /// Temperature in K (1000–10000, snapped to 100)
        kelvin: Option<String>,
    },

    /// Simulate a color-vision deficiency on an image
    Simulate {
        input: PathBuf,
        output: PathBuf,

        /// protanopia, protanomaly, deuteranopia, deuteranomaly, tritanopia,
        /// tritanomaly, achromatopsia or achromatomaly
        #[arg(short, long)]
        mode: String,
    },

    /// Adjust an image's white balance
    Balance {
        input: PathBuf,
        output: PathBuf,

        /// Target temperature in K
        #[arg(long, default_value_t = 6500.0)]
        temp: f64,

        /// Green (-) to magenta (+) shift, -100–100
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        tint: f64,

        /// Strength of the effect (0–1)
        #[arg(long)]
        blend: Option<f64>,

        /// Guess temperature and tint from the image itself
        #[arg(long, conflicts_with_all = ["temp", "tint"])]
        auto: bool,
    },

    /// Score a flashing effect for photosensitive seizure risk
    Risk {
        /// Flashes per second
        #[arg(short, long, default_value_t = 12.0)]
        frequency: f64,

        /// Percent of each cycle spent bright
        #[arg(short, long, default_value_t = 50.0)]
        duty: f64,

        /// Percent of the screen covered
        #[arg(short, long, default_value_t = 30.0)]
        area: f64,

        /// Exposure in seconds
        #[arg(short = 't', long, default_value_t = 3.0)]
        duration: f64,

        /// Flash color
        #[arg(short, long, default_value = "#ff0000")]
        color: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Solve lux = lumens / area for whichever value is missing
    Lux {
        #[arg(long)]
        lumens: Option<f64>,

        #[arg(long)]
        lux: Option<f64>,

        /// Square metres
        #[arg(long)]
        area: Option<f64>,
    },

    /// Encode text as a Morse on/off light schedule
    Morse {
        text: String,

        /// Sending speed in words per minute
        #[arg(short, long, default_value_t = 20.0)]
        wpm: f64,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Saved colors
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
enum FavoritesAction {
    /// Show saved colors, most recent first
    List,

    /// Save a color
    Add {
        color: String,

        #[arg(short, long, default_value = "favorite")]
        label: String,
    },

    /// Forget a color
    Remove { color: String },

    /// Forget everything
    Clear,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    init_logging(cli.verbose, &config.log_level);

    match cli.command {
        Commands::Convert { color } => convert_command(&color),
        Commands::Contrast { foreground, background } => contrast_command(&foreground, &background),
        Commands::Whites {
            tint,
            count,
            start,
            seed,
        } => whites_command(&config, tint.as_deref(), count, start, seed),
        Commands::Theme {
            brightness,
            hue,
            saturation,
            count,
            json,
        } => {
            let defaults = config.theme;
            let params = ThemeParams {
                brightness: brightness.unwrap_or(defaults.brightness),
                hue: hue.unwrap_or(defaults.hue),
                saturation: saturation.unwrap_or(defaults.saturation),
                count: count.unwrap_or(defaults.count),
            };
            theme_command(params, json)
        }
        Commands::Kelvin { kelvin } => kelvin_command(kelvin.as_deref()),
        Commands::Simulate { input, output, mode } => simulate_command(input, &output, &mode),
        Commands::Balance {
            input,
            output,
            temp,
            tint,
            blend,
            auto,
        } => {
            let blend = blend.unwrap_or(config.white_balance.blend);
            balance_command(input, &output, temp, tint, blend, auto)
        }
        Commands::Risk {
            frequency,
            duty,
            area,
            duration,
            color,
            json,
        } => risk_command(
            &FlashInput {
                frequency,
                duty,
                area,
                duration,
                color,
            },
            json,
        ),
        Commands::Lux { lumens, lux, area } => lux_command(lumens, lux, area),
        Commands::Morse { text, wpm, json } => morse_command(&text, wpm, json),
        Commands::Favorites { action } => favorites_command(&config, action),
    }
}

/// `--verbose` wins, then `RUST_LOG`, then the config file's level.
fn init_logging(verbose: bool, configured: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

// ─── Color commands ──────────────────────────────────────────────────────────

fn convert_command(text: &str) -> Result<()> {
    let rgb = parse_color(text, "color")?;
    let hsl = rgb.to_hsl();
    let on = readable_on(rgb);

    println!("HEX  {rgb}");
    println!("RGB  {}", rgb_text(rgb));
    println!("HSL  {}", hsl_text(hsl));
    println!("CSS  {}", hsl_css(hsl));
    println!("Text {on} ({})", format_ratio(contrast_ratio(on, rgb)));
    Ok(())
}

fn contrast_command(foreground: &str, background: &str) -> Result<()> {
    let fg = parse_color(foreground, "foreground")?;
    let bg = parse_color(background, "background")?;
    let ratio = contrast_ratio(fg, bg);

    println!("{fg} on {bg}: {}", format_ratio(ratio));
    for line in wcag_report(wcag_levels(ratio)) {
        println!("  {line}");
    }
    Ok(())
}

fn whites_command(
    config: &Config,
    tint: Option<&str>,
    count: Option<usize>,
    start: Option<f64>,
    seed: Option<u32>,
) -> Result<()> {
    let tint = match tint {
        Some(text) => parse_color(text, "tint")?,
        None => {
            let seed = seed.unwrap_or_else(clock_seed);
            let tint = random_pastel_tint(&mut Xorshift32::new(seed));
            info!(%tint, seed, "picked a random tint");
            tint
        }
    };
    let count = count.unwrap_or(config.palette.tint_count);
    let start = start.unwrap_or(config.palette.start_whiteness);

    println!("tint {tint}");
    for (i, white) in tinted_whites(tint, count, start).into_iter().enumerate() {
        println!("{:>3}  {white}  {}", i + 1, rgb_text(white));
    }
    Ok(())
}

fn theme_command(params: ThemeParams, json: bool) -> Result<()> {
    let theme = generate_theme(params);
    if json {
        println!("{}", serde_json::to_string_pretty(&theme)?);
        return Ok(());
    }

    println!("/* light */");
    for token in palette_tokens(&theme.light_palette) {
        println!("{token}");
    }
    println!();
    println!("/* dark */");
    for token in palette_tokens(&theme.dark_palette) {
        println!("{token}");
    }
    Ok(())
}

fn kelvin_command(text: Option<&str>) -> Result<()> {
    let Some(text) = text else {
        for preset in KELVIN_PRESETS {
            let rgb = kelvin_to_rgb(f64::from(preset.kelvin));
            println!("{:>6}K  {rgb}  {}", preset.kelvin, preset.label);
        }
        return Ok(());
    };

    let kelvin = parse_kelvin_input(text, DEFAULT_KELVIN).context("could not read temperature")?;
    let rgb = kelvin_to_rgb(f64::from(kelvin));
    println!("{kelvin}K  {rgb}  {}", rgb_text(rgb));
    println!();
    for (k, stop) in kelvin_preview(f64::from(kelvin)) {
        println!("{k:>6}K  {stop}");
    }
    Ok(())
}

// ─── Image commands ──────────────────────────────────────────────────────────

fn simulate_command(input: PathBuf, output: &Path, mode: &str) -> Result<()> {
    let source = ImageFile::new(input);
    let mut buffer = source.read_pixels()?;

    match simulate(&mut buffer, mode) {
        Some(mode) => info!(%mode, source = source.name(), "simulated"),
        None => warn!(mode, "unknown simulation mode, writing the image unchanged"),
    }

    surface::save(&buffer, output)
}

fn balance_command(
    input: PathBuf,
    output: &Path,
    temp: f64,
    tint: f64,
    blend: f64,
    auto: bool,
) -> Result<()> {
    let source = ImageFile::new(input);
    let mut buffer = source.read_pixels()?;

    let (temp, tint) = if auto {
        let guess = estimate_temp_and_tint(&buffer);
        println!("estimated {}K, tint {}", guess.temp, guess.tint);
        (f64::from(guess.temp), f64::from(guess.tint))
    } else {
        (temp, tint)
    };

    let gains = compute_white_balance_gains(temp, tint);
    println!(
        "gains R {:.3}  G {:.3}  B {:.3}  blend {blend}",
        gains.r_gain, gains.g_gain, gains.b_gain
    );
    apply_gains(&mut buffer, gains, blend);

    surface::save(&buffer, output)
}

// ─── Light commands ──────────────────────────────────────────────────────────

fn risk_command(input: &FlashInput, json: bool) -> Result<()> {
    let analysis = analyze_seizure_risk(input);
    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }
    for line in risk_report(input, &analysis) {
        println!("{line}");
    }
    Ok(())
}

fn lux_command(lumens: Option<f64>, lux: Option<f64>, area: Option<f64>) -> Result<()> {
    let (lumens, lux, area) = solve_light(lumens, lux, area)?;
    println!("{lumens:.2} lm  {lux:.2} lx  {area:.2} m²");
    Ok(())
}

fn morse_command(text: &str, wpm: f64, json: bool) -> Result<()> {
    let timeline = build_timeline(text);
    if timeline.is_empty() {
        bail!("nothing in {text:?} can be sent as Morse");
    }
    let unit_ms = unit_ms_from_wpm(wpm);
    if json {
        let body = serde_json::json!({ "unitMs": unit_ms, "timeline": timeline });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }
    for line in morse_report(text, &timeline, unit_ms) {
        println!("{line}");
    }
    Ok(())
}

// ─── Favorites ───────────────────────────────────────────────────────────────

fn favorites_command(config: &Config, action: FavoritesAction) -> Result<()> {
    let path = &config.favorites.path;
    let mut favorites = Favorites::load(JsonFileStore::new(path))
        .with_context(|| format!("failed to load favorites from {}", path.display()))?;

    match action {
        FavoritesAction::List => {}
        FavoritesAction::Add { color, label } => {
            let rgb = parse_color(&color, "color")?;
            favorites.add(PaletteEntry::new(label, rgb))?;
        }
        FavoritesAction::Remove { color } => {
            let rgb = parse_color(&color, "color")?;
            if !favorites.remove(rgb)? {
                warn!(%rgb, "not a saved color");
            }
        }
        FavoritesAction::Clear => favorites.clear()?,
    }

    if favorites.entries().is_empty() {
        println!("no saved colors");
    }
    for entry in favorites.entries() {
        println!("{}  {:<12} text {}", entry.color, entry.label, entry.on_color);
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn parse_color(text: &str, what: &str) -> Result<Rgb> {
    parse_color_text(text).with_context(|| format!("could not read {what}"))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |d| d.subsec_nanos())
}

/// `4.54:1`
fn format_ratio(ratio: f64) -> String {
    format!("{ratio:.2}:1")
}

fn wcag_report(levels: WcagLevels) -> [String; 4] {
    let mark = |pass: bool| if pass { "pass" } else { "fail" };
    [
        format!("AA   normal text  {}", mark(levels.aa_normal)),
        format!("AA   large text   {}", mark(levels.aa_large)),
        format!("AAA  normal text  {}", mark(levels.aaa_normal)),
        format!("AAA  large text   {}", mark(levels.aaa_large)),
    ]
}

fn risk_report(input: &FlashInput, analysis: &RiskAnalysis) -> Vec<String> {
    let mut lines = vec![format!("score {} ({})", analysis.score, analysis.level)];
    if let Some(period) = flash_period(input.frequency) {
        lines.push(format!("period {period:.3}s"));
    }
    lines.push("reasons:".to_owned());
    lines.extend(analysis.reasons.iter().map(|r| format!("  - {r}")));
    lines.push("mitigation:".to_owned());
    lines.extend(analysis.mitigation.iter().map(|m| format!("  - {m}")));
    lines
}

fn morse_report(text: &str, timeline: &[Segment], unit_ms: f64) -> Vec<String> {
    let units = total_units(timeline);
    let schedule: Vec<String> = timeline
        .iter()
        .map(|s| format!("{} {}", if s.on { "on" } else { "off" }, s.units))
        .collect();
    vec![
        encoded_preview(text),
        format!("{unit_ms:.0} ms / unit, {units} units, {:.2}s", f64::from(units) * unit_ms / 1000.0),
        schedule.join(", "),
    ]
}

/// Given exactly two of lumens, lux and area, fill in the third.
fn solve_light(lumens: Option<f64>, lux: Option<f64>, area: Option<f64>) -> Result<(f64, f64, f64)> {
    match (lumens, lux, area) {
        (Some(lm), None, Some(m2)) => Ok((lm, photometry::lux(lm, m2), m2)),
        (None, Some(lx), Some(m2)) => Ok((photometry::lumens(lx, m2), lx, m2)),
        (Some(lm), Some(lx), None) => Ok((lm, lx, photometry::area(lm, lx))),
        _ => bail!("give exactly two of --lumens, --lux and --area"),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn balance_auto_conflicts_with_manual_values() {
        let parsed = Cli::try_parse_from(["swatch", "balance", "in.png", "out.png", "--auto", "--temp", "3000"]);
        assert!(parsed.is_err());
        let parsed = Cli::try_parse_from(["swatch", "balance", "in.png", "out.png", "--tint", "-40"]);
        assert!(parsed.is_ok());
    }

    #[test]
    fn ratio_has_two_decimals() {
        assert_eq!(format_ratio(21.0), "21.00:1");
        assert_eq!(format_ratio(4.544), "4.54:1");
    }

    #[test]
    fn wcag_report_marks_each_level() {
        let report = wcag_report(wcag_levels(4.6));
        assert_eq!(
            report,
            [
                "AA   normal text  pass",
                "AA   large text   pass",
                "AAA  normal text  fail",
                "AAA  large text   pass",
            ]
        );
    }

    #[test]
    fn risk_report_lists_period_reasons_and_mitigation() {
        let input = FlashInput::default();
        let report = risk_report(&input, &analyze_seizure_risk(&input));
        assert_eq!(report[0], "score 69 (High)");
        assert_eq!(report[1], "period 0.083s");
        assert_eq!(report[2], "reasons:");
        assert!(report.iter().any(|l| l.starts_with("  - Limit flash rate")));
    }

    #[test]
    fn morse_report_shows_code_timing_and_schedule() {
        let timeline = build_timeline("SOS");
        let report = morse_report("SOS", &timeline, unit_ms_from_wpm(20.0));
        assert_eq!(report[0], "... --- ...");
        assert_eq!(report[1], "60 ms / unit, 27 units, 1.62s");
        assert!(report[2].starts_with("on 1, off 1, on 1, off 1, on 1, off 3, on 3"));
    }

    #[test]
    fn light_solver_fills_the_gap() {
        assert_eq!(solve_light(Some(2000.0), None, Some(4.0)).unwrap(), (2000.0, 500.0, 4.0));
        assert_eq!(solve_light(None, Some(500.0), Some(4.0)).unwrap(), (2000.0, 500.0, 4.0));
        assert_eq!(solve_light(Some(2000.0), Some(500.0), None).unwrap(), (2000.0, 500.0, 4.0));
    }

    #[test]
    fn light_solver_needs_exactly_two() {
        assert!(solve_light(Some(1.0), None, None).is_err());
        assert!(solve_light(Some(1.0), Some(1.0), Some(1.0)).is_err());
    }

    #[test]
    fn parse_color_accepts_every_text_format() {
        let coral = Rgb::new(255, 122, 89);
        assert_eq!(parse_color("#FF7A59", "c").unwrap(), coral);
        assert_eq!(parse_color("255, 122, 89", "c").unwrap(), coral);
        assert!(parse_color("#GG0000", "c").is_err());
    }
}
