use ecg_classifier::config::load_config;
use ecg_classifier::diagnostics::{Stage, TimingBreakdown};
use ecg_classifier::image::io::{save_grayscale_f32, save_mask, write_json_file};
use ecg_classifier::stages::{normalize_bytes, segment_leads, trace_leads, LeadCrop, LeadOutcome, LeadTrace};
use ecg_classifier::{EcgError, EcgPipeline, LinearDiscriminant, LinearProjection, Models};
use log::info;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;
    let paths = config
        .models
        .as_ref()
        .ok_or("Config is missing the \"models\" section")?;
    let projection = LinearProjection::from_json_file(&paths.projection).map_err(|e| e.to_string())?;
    let classifier = LinearDiscriminant::from_json_file(&paths.classifier).map_err(|e| e.to_string())?;
    info!(
        "models: projection {:?}, classifier {:?} over classes {:?}",
        projection.version(),
        classifier.version(),
        classifier.classes()
    );
    let models = Models::new(Arc::new(projection), Arc::new(classifier)).map_err(|e| e.to_string())?;
    let pipeline = EcgPipeline::new(config.params.clone(), models);
    let params = pipeline.params();

    let bytes = fs::read(&config.input)
        .map_err(|e| format!("Failed to read {}: {e}", config.input.display()))?;
    let mut timings = TimingBreakdown::default();
    let stage = Instant::now();
    let page = normalize_bytes(&bytes, params.normalize_options()).map_err(|e| e.to_string())?;
    timings.record_since(Stage::Normalize, stage);
    let stage = Instant::now();
    let crops = segment_leads(&page, &params.calibration).map_err(|e| e.to_string())?;
    timings.record_since(Stage::Segment, stage);
    let stage = Instant::now();
    let results = trace_leads(&crops, &params.binarize, &params.trace, params.parallel_leads);
    timings.record_since(Stage::Leads, stage);

    if let Some(dir) = &config.output.debug_dir {
        save_grayscale_f32(&page.image, &dir.join("page.png"))?;
        dump_leads(&crops, &results, dir)?;
        println!("Saved lead dumps to {}", dir.display());
    }

    let outcomes = results
        .into_iter()
        .collect::<Result<Vec<_>, EcgError>>()
        .map_err(|e| format!("Classification failed: {e}"))?;
    let report = pipeline
        .conclude(&page, outcomes, timings)
        .map_err(|e| format!("Classification failed: {e}"))?;

    println!("{}", report.diagnosis);
    for stage in &report.trace.timings.stages {
        println!("  {:<10} {:>8.2} ms", stage.stage.to_string(), stage.elapsed_ms);
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

fn dump_leads(
    crops: &[LeadCrop],
    results: &[Result<LeadOutcome, EcgError>],
    dir: &Path,
) -> Result<(), String> {
    let mut traces: Vec<&LeadTrace> = Vec::with_capacity(results.len());
    for (crop, result) in crops.iter().zip(results) {
        let stem = format!("lead_{:02}", crop.lead.0);
        save_grayscale_f32(&crop.image, &dir.join(format!("{stem}_crop.png")))?;
        match result {
            Ok(outcome) => {
                save_mask(&outcome.mask, &dir.join(format!("{stem}_mask.png")))?;
                traces.push(&outcome.trace);
            }
            Err(err) => println!("lead {:>2}: skipped ({err})", crop.lead),
        }
    }
    write_json_file(&dir.join("signals.json"), &traces)
}

fn usage() -> String {
    "Usage: classify_ecg <config.json>".to_string()
}
