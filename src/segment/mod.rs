//! Lead segmenter: crop the canonical page into its lead regions.
//!
//! Pure indexing: each region of the [`CalibrationTable`] is copied out of
//! the page in lead order. Content is never inspected, so a page in an
//! unexpected layout silently yields wrong crops.

mod calibration;

pub use calibration::{CalibrationTable, LeadRegion, Rect};

use crate::error::EcgError;
use crate::image::ImageF32;
use crate::normalize::NormalizedImage;
use crate::types::LeadId;

/// Grayscale crop of one lead.
#[derive(Clone, Debug)]
pub struct LeadCrop {
    pub lead: LeadId,
    pub rect: Rect,
    pub image: ImageF32,
}

/// Crop every region of `table` out of `page`, ordered by lead index.
///
/// The only check is that the page has the size the table was calibrated
/// for.
pub fn segment_leads(page: &NormalizedImage, table: &CalibrationTable) -> Result<Vec<LeadCrop>, EcgError> {
    if (page.width(), page.height()) != (table.width(), table.height()) {
        return Err(EcgError::InvalidCalibration(format!(
            "table calibrated for {}x{} but page is {}x{}",
            table.width(),
            table.height(),
            page.width(),
            page.height()
        )));
    }
    Ok(table
        .regions()
        .iter()
        .map(|region| LeadCrop {
            lead: region.lead,
            rect: region.rect,
            image: page.image.crop(region.rect.rows, region.rect.cols),
        })
        .collect())
}
