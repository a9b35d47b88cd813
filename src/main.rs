// src/main.rs
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;
use anyhow::{bail, Context, Result};
use photoglove::drivers::{
    render_grid_png, AcquisitionPipeline, AdjustedVector, ByteChannel, GloveError, GridStyle,
    SerialChannel, SimulatedChannel,
};
use photoglove::{recorder, AppConfig, CentroidClassifier, ClassificationDispatch, GestureLabel};
const CONFIG_PATH: &str = "photoglove.json";
type GlovePipeline = AcquisitionPipeline<Box<dyn ByteChannel>>;
fn main() -> Result<()> {
    env_logger::init();
    let config = AppConfig::load(Path::new(CONFIG_PATH))?;
    let simulate = std::env::args().any(|arg| arg == "--sim");
    let mut pipeline = connect(&config, simulate);
    if pipeline.is_none() {
        println!("failed to connect to the glove - only data playback will work");
    }
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let args: Vec<&str> = line.split_whitespace().collect();
        let Some(command) = args.first() else {
            continue;
        };
        let command = command.to_lowercase();
        if command == "quit" || command == "exit" {
            break;
        }
        let result = match command.as_str() {
            "save" => with_device(&mut pipeline, |p| save_mode(p, &config, &args)),
            "plot" => with_device(&mut pipeline, |p| plot_mode(p, &config, &args)),
            "rec" => with_device(&mut pipeline, |p| recognize_mode(p, &config, &args)),
            "cal" => with_device(&mut pipeline, |p| calibrate_mode(p, &config, &args)),
            "play" => playback_mode(&config, &args),
            other => {
                println!("unknown command: {other}");
                Ok(())
            }
        };
        if let Err(err) = result {
            eprintln!("{command} failed: {err:#}");
        }
    }
    Ok(())
}
/// Opens the channel and zeroes the baseline so the channel count is known.
/// Any failure here degrades to playback-only operation instead of aborting.
fn connect(config: &AppConfig, simulate: bool) -> Option<GlovePipeline> {
    let channel: Box<dyn ByteChannel> = if simulate {
        log::info!("using a simulated glove with {} channels", config.channels);
        Box::new(SimulatedChannel::new(config.channels))
    } else {
        match SerialChannel::open(&config.port, config.baud_rate, config.timeout()) {
            Ok(channel) => Box::new(channel),
            Err(err) => {
                log::warn!("could not open {}: {err}", config.port);
                return None;
            }
        }
    };
    let mut pipeline = AcquisitionPipeline::new(channel);
    if let Err(err) = pipeline.calibrate(0) {
        log::warn!("initial zero-calibration failed: {err}");
        return None;
    }
    check_channel_count(&pipeline, config);
    Some(pipeline)
}
fn with_device<F>(pipeline: &mut Option<GlovePipeline>, run: F) -> Result<()>
where
    F: FnOnce(&mut GlovePipeline) -> Result<()>,
{
    match pipeline.as_mut() {
        Some(pipeline) => run(pipeline),
        None => {
            println!("no glove connected; this command needs the device");
            Ok(())
        }
    }
}
fn check_channel_count(pipeline: &GlovePipeline, config: &AppConfig) {
    let actual = pipeline.calibration().channel_count();
    if actual != config.channels {
        log::warn!(
            "glove reported {actual} channel(s); configuration expects {}",
            config.channels
        );
    }
}
/// Pulls adjusted vectors, skipping samples the calibration model rejects.
/// Channel loss is not skippable and ends the calling mode.
fn next_vector(pipeline: &mut GlovePipeline) -> Result<AdjustedVector, GloveError> {
    loop {
        match pipeline.read_adjusted_vector() {
            Ok(vector) => return Ok(vector),
            Err(err) if err.is_skippable() => log::warn!("skipping sample: {err}"),
            Err(err) => return Err(err),
        }
    }
}
fn snapshot(vector: &AdjustedVector, config: &AppConfig, style: &GridStyle) -> Result<()> {
    let png = render_grid_png(&vector.values, config.grid_cols, style)?;
    fs::write(&config.snapshot_path, png)
        .with_context(|| format!("failed to write {}", config.snapshot_path.display()))?;
    Ok(())
}
/// `save <n> <file>`: acquire n vectors and persist them as a CSV matrix.
fn save_mode(pipeline: &mut GlovePipeline, config: &AppConfig, args: &[&str]) -> Result<()> {
    let (Some(count), Some(filename)) = (args.get(1), args.get(2)) else {
        println!("there are two required arguments: n, filename");
        return Ok(());
    };
    let count: usize = match count.parse() {
        Ok(count) => count,
        Err(_) => {
            println!("first argument must be an integer");
            return Ok(());
        }
    };
    let style = GridStyle::default();
    let mut matrix = Vec::with_capacity(count);
    println!("obtaining data matrix...");
    while matrix.len() < count {
        let vector = next_vector(pipeline)?;
        snapshot(&vector, config, &style)?;
        matrix.push(vector);
        println!("{:.0}%", 100.0 * matrix.len() as f32 / count as f32);
    }
    println!("finished getting matrix");
    recorder::save_matrix(Path::new(filename), &matrix)?;
    if pipeline.recovered_lines() > 0 {
        log::info!(
            "{} garbled reading(s) coerced to 0.0 this session",
            pipeline.recovered_lines()
        );
    }
    println!("saved data as {filename}");
    Ok(())
}
/// `plot [n]`: stream vectors into the grid snapshot, n frames or until the
/// channel fails.
fn plot_mode(pipeline: &mut GlovePipeline, config: &AppConfig, args: &[&str]) -> Result<()> {
    let limit: Option<usize> = args.get(1).and_then(|raw| raw.parse().ok());
    let style = GridStyle::default();
    let mut shown = 0usize;
    while limit.map_or(true, |n| shown < n) {
        let vector = next_vector(pipeline)?;
        snapshot(&vector, config, &style)?;
        shown += 1;
    }
    Ok(())
}
/// `rec [n]`: train from the recorded gesture matrices, then classify live
/// vectors, reporting each label's code back to the glove.
fn recognize_mode(pipeline: &mut GlovePipeline, config: &AppConfig, args: &[&str]) -> Result<()> {
    let limit: Option<usize> = args.get(1).and_then(|raw| raw.parse().ok());
    let dispatch = ClassificationDispatch::new(train_model(config)?);
    let style = GridStyle::default();
    let mut seen = 0usize;
    while limit.map_or(true, |n| seen < n) {
        let vector = next_vector(pipeline)?;
        let label = dispatch.classify_and_report(pipeline, &vector)?;
        println!("{label}");
        snapshot(&vector, config, &style)?;
        seen += 1;
    }
    Ok(())
}
fn train_model(config: &AppConfig) -> Result<CentroidClassifier> {
    let mut matrices = Vec::new();
    for (letter, path) in &config.training_files {
        let label = letter
            .chars()
            .next()
            .and_then(GestureLabel::from_letter)
            .with_context(|| format!("training map key {letter:?} is not a gesture letter"))?;
        let matrix = recorder::load_matrix(path)?;
        matrices.push((label, matrix));
    }
    if matrices.is_empty() {
        bail!("no training files configured");
    }
    CentroidClassifier::fit_from_matrices(&matrices)
}
/// `cal [n]`: rebuild the dark-current baseline over n frames.
fn calibrate_mode(pipeline: &mut GlovePipeline, config: &AppConfig, args: &[&str]) -> Result<()> {
    let samples: usize = args
        .get(1)
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(config.default_calibration_samples);
    println!("starting calibration over {samples} vectors");
    pipeline.calibrate(samples)?;
    check_channel_count(pipeline, config);
    println!("finished calibrating");
    Ok(())
}
/// `play <file>`: step a recorded matrix through the grid snapshot; works
/// with no glove attached.
fn playback_mode(config: &AppConfig, args: &[&str]) -> Result<()> {
    let Some(filename) = args.get(1) else {
        println!("expected second argument: play <filename>");
        return Ok(());
    };
    let matrix = recorder::load_matrix(Path::new(filename))?;
    let style = GridStyle::default();
    for row in matrix.rows() {
        let vector = AdjustedVector {
            values: row.to_vec(),
        };
        snapshot(&vector, config, &style)?;
        thread::sleep(Duration::from_millis(10));
    }
    Ok(())
}
