use ecg_classifier::config::load_config;
use ecg_classifier::diagnostics::LeadReport;
use ecg_classifier::image::io::{save_grayscale_f32, save_mask, write_json_file};
use ecg_classifier::stages::{binarize, load_normalized, process_lead, segment_leads};
use std::env;
use std::path::{Path, PathBuf};

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
    let out_dir = config
        .output
        .debug_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("leads"));
    let params = &config.params;

    let page = load_normalized(&config.input, params.normalize_options()).map_err(|e| e.to_string())?;
    println!(
        "Normalized {}x{} -> {}x{}",
        page.source_size.0,
        page.source_size.1,
        page.width(),
        page.height()
    );
    let crops = segment_leads(&page, &params.calibration).map_err(|e| e.to_string())?;

    let mut reports: Vec<LeadReport> = Vec::new();
    for crop in &crops {
        let stem = format!("lead_{:02}", crop.lead.0);
        save_grayscale_f32(&crop.image, &out_dir.join(format!("{stem}.png")))?;
        let mask_path = out_dir.join(format!("{stem}_mask.png"));
        match process_lead(crop, &params.binarize, &params.trace) {
            Ok(outcome) => {
                save_mask(&outcome.mask, &mask_path)?;
                println!(
                    "lead {:>2}: threshold={:.3} contours={} selected={} points{}",
                    crop.lead,
                    outcome.report.threshold,
                    outcome.report.contour_count,
                    outcome.report.contour_points,
                    if outcome.report.touches_border {
                        " (touches edge)"
                    } else {
                        ""
                    }
                );
                reports.push(outcome.report);
            }
            Err(err) => {
                // keep the mask of a failed lead for inspection
                save_mask(&binarize(&crop.image, &params.binarize).mask, &mask_path)?;
                println!("lead {:>2}: {err}", crop.lead);
            }
        }
    }
    write_json_file(&out_dir.join("leads.json"), &reports)?;
    println!("Saved {} lead crops to {}", crops.len(), out_dir.display());
    Ok(())
}

fn usage() -> String {
    "Usage: segment_leads <config.json>".to_string()
}
