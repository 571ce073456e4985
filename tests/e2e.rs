mod common;

use common::models::{trace_models, FLAT_ROUGHNESS};
use common::synthetic_image::{blank_page, encode, encode_png, flat_page, sine_page, to_gray_image};
use ecg_classifier::diagnostics::Stage;
use ecg_classifier::image::ImageU8;
use ecg_classifier::stages::{normalize_view, process_lead, segment_leads};
use ecg_classifier::types::{LeadId, SAMPLES_PER_LEAD, STANDARD_LEADS};
use ecg_classifier::{CalibrationTable, Diagnosis, EcgError, EcgPipeline, PipelineParams};
use image::imageops::{self, FilterType};
use image::ImageFormat;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn pipeline() -> EcgPipeline {
    EcgPipeline::new(
        PipelineParams::default(),
        trace_models(STANDARD_LEADS * SAMPLES_PER_LEAD),
    )
}

#[test]
fn synthetic_sine_page_classifies_as_normal() {
    init_logging();
    let table = CalibrationTable::default();
    let bytes = encode_png(sine_page(&table, 3), table.width(), table.height());

    let report = pipeline()
        .classify_with_report(&bytes)
        .expect("synthetic page should classify");

    assert_eq!(report.diagnosis, Diagnosis::Normal);
    assert_eq!(report.code, 2);
    assert_eq!(report.label, "Normal");
    assert_eq!(report.trace.feature_len, 12 * 255);
    assert_eq!(report.trace.leads.len(), 13);
    for (i, lead) in report.trace.leads.iter().enumerate() {
        assert_eq!(lead.lead, LeadId(i as u8 + 1));
        assert!(lead.contour_count >= 1);
        assert!(
            !lead.touches_border,
            "lead {} trace should stay inside its crop",
            lead.lead
        );
    }
    for stage in [
        Stage::Normalize,
        Stage::Segment,
        Stage::Leads,
        Stage::Aggregate,
        Stage::Models,
    ] {
        assert!(report.trace.timings.stage_ms(stage).is_some(), "missing {stage}");
    }
    let roughness = report.reduced[0];
    assert!(roughness > 2.0 * FLAT_ROUGHNESS, "roughness {roughness}");
}

#[test]
fn flat_traces_are_not_read_as_normal() {
    init_logging();
    let table = CalibrationTable::default();
    let bytes = encode_png(flat_page(&table, 3), table.width(), table.height());

    let report = pipeline().classify_with_report(&bytes).unwrap();
    assert_ne!(report.code, 2);
    assert_eq!(report.diagnosis, Diagnosis::AbnormalHeartbeat);
    assert!(report.reduced[0] < FLAT_ROUGHNESS, "roughness {}", report.reduced[0]);
}

#[test]
fn sine_traces_produce_unit_range_signals() {
    let table = CalibrationTable::default();
    let buf = sine_page(&table, 3);
    let view = ImageU8::packed(table.width(), table.height(), &buf).unwrap();
    let params = PipelineParams::default();
    let page = normalize_view(view, params.normalize_options()).unwrap();
    let crops = segment_leads(&page, &table).unwrap();
    for crop in crops.iter().filter(|c| c.lead.is_standard()) {
        let outcome = process_lead(crop, &params.binarize, &params.trace).unwrap();
        let values = &outcome.trace.signal.values;
        assert_eq!(values.len(), 255);
        assert!(values.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!(values.iter().any(|&v| v == 0.0) && values.iter().any(|&v| v == 1.0));
    }
}

#[test]
fn blank_page_fails_every_lead_with_empty_mask() {
    init_logging();
    let table = CalibrationTable::default();
    let buf = blank_page(&table);

    let bytes = encode_png(buf.clone(), table.width(), table.height());
    let err = pipeline().classify(&bytes).unwrap_err();
    assert!(matches!(err, EcgError::EmptyMask { .. }), "got {err:?}");

    let params = PipelineParams::default();
    let view = ImageU8::packed(table.width(), table.height(), &buf).unwrap();
    let page = normalize_view(view, params.normalize_options()).unwrap();
    for crop in segment_leads(&page, &table).unwrap() {
        match process_lead(&crop, &params.binarize, &params.trace) {
            Err(EcgError::EmptyMask { lead }) => assert_eq!(lead, crop.lead.0),
            other => panic!("lead {} expected EmptyMask, got {other:?}", crop.lead),
        }
    }
}

#[test]
fn sequential_blank_page_reports_first_lead() {
    let table = CalibrationTable::default();
    let bytes = encode_png(blank_page(&table), table.width(), table.height());
    let pipeline = EcgPipeline::new(
        PipelineParams::default().with_parallel_leads(false),
        trace_models(STANDARD_LEADS * SAMPLES_PER_LEAD),
    );
    assert!(matches!(
        pipeline.classify(&bytes),
        Err(EcgError::EmptyMask { lead: 1 })
    ));
}

#[test]
fn downscaled_photo_is_resized_before_segmentation() {
    let table = CalibrationTable::default();
    let full = to_gray_image(sine_page(&table, 5), table.width(), table.height());
    let half = imageops::resize(
        &full,
        full.width() / 2,
        full.height() / 2,
        FilterType::Triangle,
    );
    let bytes = encode(half, ImageFormat::Png);

    let report = pipeline().classify_with_report(&bytes).unwrap();
    assert_eq!(report.diagnosis, Diagnosis::Normal);
    assert_eq!(report.trace.input.source_width, table.width() / 2);
    assert_eq!(report.trace.input.width, table.width());
}

#[test]
fn undecodable_input_is_reported() {
    let err = pipeline().classify(b"GIF89a? no, just text").unwrap_err();
    assert!(
        matches!(err, EcgError::UnsupportedFormat(_) | EcgError::Decode(_)),
        "got {err:?}"
    );
    let err = pipeline().classify(b"plain text").unwrap_err();
    assert!(matches!(err, EcgError::UnsupportedFormat(_)), "got {err:?}");
}
