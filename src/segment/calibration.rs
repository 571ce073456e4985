//! Fixed lead layout of a printed 12-lead ECG page.
//!
//! Regions are pixel rectangles on the canonical page. They are not derived
//! from image content: a page printed in a different layout needs a
//! different table, which is why the table is plain deserializable data.

use crate::error::EcgError;
use crate::normalize::{CANONICAL_HEIGHT, CANONICAL_WIDTH};
use crate::types::{LeadId, RHYTHM_LEAD, STANDARD_LEADS};
use serde::{Deserialize, Serialize};

/// Half-open pixel rectangle `rows.0..rows.1 × cols.0..cols.1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub rows: (usize, usize),
    pub cols: (usize, usize),
}

impl Rect {
    pub const fn new(rows: (usize, usize), cols: (usize, usize)) -> Self {
        Self { rows, cols }
    }

    pub fn height(&self) -> usize {
        self.rows.1.saturating_sub(self.rows.0)
    }

    pub fn width(&self) -> usize {
        self.cols.1.saturating_sub(self.cols.0)
    }

    pub fn is_empty(&self) -> bool {
        self.height() == 0 || self.width() == 0
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.rows.0 < other.rows.1
            && other.rows.0 < self.rows.1
            && self.cols.0 < other.cols.1
            && other.cols.0 < self.cols.1
    }

    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.rows.1 <= height && self.cols.1 <= width
    }
}

/// One lead's crop rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRegion {
    pub lead: LeadId,
    pub rect: Rect,
}

/// Lead rectangles keyed by lead index, valid for a `width × height` page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCalibrationTable")]
pub struct CalibrationTable {
    width: usize,
    height: usize,
    regions: Vec<LeadRegion>,
}

#[derive(Deserialize)]
struct RawCalibrationTable {
    width: usize,
    height: usize,
    regions: Vec<LeadRegion>,
}

impl TryFrom<RawCalibrationTable> for CalibrationTable {
    type Error = EcgError;

    fn try_from(raw: RawCalibrationTable) -> Result<Self, Self::Error> {
        CalibrationTable::new(raw.width, raw.height, raw.regions)
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::six_by_two()
    }
}

const LEFT_COLS: (usize, usize) = (150, 1135);
const RIGHT_COLS: (usize, usize) = (1140, 2125);
const RHYTHM_RECT: Rect = Rect::new((1250, 1480), (150, 2125));

impl CalibrationTable {
    /// Build a table, rejecting empty, duplicated, overlapping or
    /// out-of-page rectangles. Regions are kept sorted by lead index.
    pub fn new(width: usize, height: usize, mut regions: Vec<LeadRegion>) -> Result<Self, EcgError> {
        regions.sort_by_key(|r| r.lead);
        for (i, region) in regions.iter().enumerate() {
            if region.rect.is_empty() {
                return Err(EcgError::InvalidCalibration(format!(
                    "lead {} has an empty rectangle",
                    region.lead
                )));
            }
            if !region.rect.fits_within(width, height) {
                return Err(EcgError::InvalidCalibration(format!(
                    "lead {} rectangle {:?} exceeds the {width}x{height} page",
                    region.lead, region.rect
                )));
            }
            for other in &regions[i + 1..] {
                if other.lead == region.lead {
                    return Err(EcgError::InvalidCalibration(format!(
                        "lead {} listed twice",
                        region.lead
                    )));
                }
                if other.rect.overlaps(&region.rect) {
                    return Err(EcgError::InvalidCalibration(format!(
                        "leads {} and {} overlap",
                        region.lead, other.lead
                    )));
                }
            }
        }
        Ok(Self {
            width,
            height,
            regions,
        })
    }

    /// Six rows of left/right plot columns plus the rhythm strip.
    pub fn six_by_two() -> Self {
        let mut regions = Vec::with_capacity(STANDARD_LEADS + 1);
        for row in 0..6 {
            let rows = (300 + 150 * row, 450 + 150 * row);
            for (col, cols) in [LEFT_COLS, RIGHT_COLS].into_iter().enumerate() {
                regions.push(LeadRegion {
                    lead: LeadId((row * 2 + col + 1) as u8),
                    rect: Rect::new(rows, cols),
                });
            }
        }
        regions.push(LeadRegion {
            lead: LeadId(RHYTHM_LEAD),
            rect: RHYTHM_RECT,
        });
        Self {
            width: CANONICAL_WIDTH,
            height: CANONICAL_HEIGHT,
            regions,
        }
    }

    /// Three rows of four plot columns plus the rhythm strip.
    pub fn three_by_four() -> Self {
        const COLS: [(usize, usize); 4] = [(150, 643), (646, 1135), (1140, 1625), (1630, 2125)];
        let mut regions = Vec::with_capacity(STANDARD_LEADS + 1);
        for row in 0..3 {
            let rows = (300 + 300 * row, 600 + 300 * row);
            for (col, cols) in COLS.into_iter().enumerate() {
                regions.push(LeadRegion {
                    lead: LeadId((row * 4 + col + 1) as u8),
                    rect: Rect::new(rows, cols),
                });
            }
        }
        regions.push(LeadRegion {
            lead: LeadId(RHYTHM_LEAD),
            rect: RHYTHM_RECT,
        });
        Self {
            width: CANONICAL_WIDTH,
            height: CANONICAL_HEIGHT,
            regions,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn regions(&self) -> &[LeadRegion] {
        &self.regions
    }

    pub fn region(&self, lead: LeadId) -> Option<&LeadRegion> {
        self.regions.iter().find(|r| r.lead == lead)
    }
}
