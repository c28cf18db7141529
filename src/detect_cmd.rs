//! Detect command: locate the reference waveform in every measured channel.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use wavematch_detect::{Channel, ChannelOutcome, DetectError, Detection, Reference};
use wavematch_io::{MeasurementTable, read_measurements, read_reference, write_columns};

use crate::cli::DetectArgs;
use crate::config::WavematchConfig;
use crate::convert;
use crate::report::{Report, render_text};

/// Run the detection pipeline.
pub fn run(args: DetectArgs) -> Result<()> {
    let _cmd = info_span!("detect").entered();
    // 1. Load project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: WavematchConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    let detect_cfg = convert::build_detect_config(&config.detect)?;
    let reader_cfg = convert::build_reader_config(&config.data)?;

    // 2. Read inputs
    let measurement_path = convert::resolve_path(
        args.measurement.as_deref(),
        &config.data.path,
        &config.data.measurement_file,
    );
    let reference_path = convert::resolve_path(
        args.reference.as_deref(),
        &config.data.path,
        &config.data.reference_file,
    );

    info!(path = %reference_path.display(), "reading reference");
    let reference_col = read_reference(&reference_path, &reader_cfg).with_context(|| {
        format!("failed to read reference: {}", reference_path.display())
    })?;
    info!(
        column = reference_col.name(),
        window = reference_col.len(),
        "reference loaded"
    );
    let (_, values) = reference_col.into_parts();
    let reference = Reference::new(values).context("unusable reference signal")?;

    info!(path = %measurement_path.display(), "reading measurements");
    let table = read_measurements(&measurement_path, &reader_cfg).with_context(|| {
        format!("failed to read measurements: {}", measurement_path.display())
    })?;
    if table.is_empty() {
        bail!("no measurement channels in {}", measurement_path.display());
    }
    info!(n_channels = table.len(), "measurements loaded");

    let (channels, rejected) = split_channels(table);

    // 3. Detect
    let mut detection = wavematch_detect::run(&channels, &reference, &detect_cfg)?;
    for (position, outcome) in rejected {
        detection.channels.insert(position, outcome);
    }

    // 4. Report
    print!("{}", render_text(&detection));

    if let Some(ref output) = args.output {
        let report = Report::new(&detection, &detect_cfg);
        let json = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        std::fs::write(output, json)
            .with_context(|| format!("failed to write report: {}", output.display()))?;
        info!(path = %output.display(), "report written");
    }

    if let Some(ref dir) = args.scores {
        write_score_tables(dir, &detection)?;
    }

    if detection.n_failed() == detection.channels.len() {
        bail!("detection failed for every channel");
    }
    Ok(())
}

/// Splits the table into scannable channels and failed outcomes, each failure
/// tagged with its position in file order.
fn split_channels(table: MeasurementTable) -> (Vec<Channel>, Vec<(usize, ChannelOutcome)>) {
    let mut channels = Vec::new();
    let mut rejected = Vec::new();
    for (position, entry) in table.into_iter().enumerate() {
        let result = match entry {
            Ok(column) => {
                let (name, values) = column.into_parts();
                Channel::new(name.clone(), values).map_err(|e| (name, e))
            }
            Err(bad) => Err((
                bad.name().to_string(),
                DetectError::InvalidSignal {
                    reason: bad.reason().to_string(),
                },
            )),
        };
        match result {
            Ok(channel) => channels.push(channel),
            Err((name, e)) => {
                warn!(channel = %name, error = %e, "channel not scanned");
                rejected.push((
                    position,
                    ChannelOutcome {
                        name,
                        result: Err(e),
                    },
                ));
            }
        }
    }
    (channels, rejected)
}

/// Writes one CSV per successful channel: a column per family plus `mean`.
fn write_score_tables(dir: &Path, detection: &Detection) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create scores directory: {}", dir.display()))?;

    let files = convert::scores_file_names(detection.channels.iter().map(|c| c.name.as_str()));
    for (outcome, file) in detection.channels.iter().zip(files) {
        let Ok(found) = &outcome.result else {
            continue;
        };
        let mut columns: Vec<(&str, &[f64])> = found
            .table
            .columns()
            .iter()
            .map(|c| (c.family.as_str(), c.scores.as_slice()))
            .collect();
        columns.push(("mean", found.table.mean()));

        let path = dir.join(file);
        write_columns(&path, &columns)
            .with_context(|| format!("failed to write scores: {}", path.display()))?;
        info!(channel = %outcome.name, path = %path.display(), "score table written");
    }
    Ok(())
}
