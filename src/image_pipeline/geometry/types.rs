//! Detector configuration types

use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::{ReductionError, Result};

/// On-chip binning, rows first then columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Binning {
    #[default]
    OneByOne,
    OneByTwo,
    TwoByOne,
    TwoByTwo,
}

impl Binning {
    /// Parses a two-digit header code, column factor first: `"12"` bins
    /// rows by 2, `"21"` bins columns by 2.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "11" => Ok(Binning::OneByOne),
            "21" => Ok(Binning::OneByTwo),
            "12" => Ok(Binning::TwoByOne),
            "22" => Ok(Binning::TwoByTwo),
            other => Err(ReductionError::ConfigError(format!(
                "binning '{other}' must be one of '11', '12', '21', '22'"
            ))),
        }
    }

    pub fn from_factors(row_factor: usize, col_factor: usize) -> Result<Self> {
        match (row_factor, col_factor) {
            (1, 1) => Ok(Binning::OneByOne),
            (1, 2) => Ok(Binning::OneByTwo),
            (2, 1) => Ok(Binning::TwoByOne),
            (2, 2) => Ok(Binning::TwoByTwo),
            (r, c) => Err(ReductionError::ConfigError(format!(
                "binning factors ({r}, {c}) not supported, each must be 1 or 2"
            ))),
        }
    }

    pub fn row_factor(self) -> usize {
        match self {
            Binning::OneByOne | Binning::OneByTwo => 1,
            Binning::TwoByOne | Binning::TwoByTwo => 2,
        }
    }

    pub fn col_factor(self) -> usize {
        match self {
            Binning::OneByOne | Binning::TwoByOne => 1,
            Binning::OneByTwo | Binning::TwoByTwo => 2,
        }
    }

    pub const ALL: [Binning; 4] = [
        Binning::OneByOne,
        Binning::OneByTwo,
        Binning::TwoByOne,
        Binning::TwoByTwo,
    ];
}

impl FromStr for Binning {
    type Err = ReductionError;

    fn from_str(s: &str) -> Result<Self> {
        Binning::from_code(s.trim())
    }
}

impl fmt::Display for Binning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col_factor(), self.row_factor())
    }
}

/// Column order in which the amplifiers deliver data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadoutDirection {
    #[default]
    Normal,
    /// Captured columns are reversed relative to `Normal`.
    Mirror,
}

impl ReadoutDirection {
    pub const ALL: [ReadoutDirection; 2] = [ReadoutDirection::Normal, ReadoutDirection::Mirror];
}

impl FromStr for ReadoutDirection {
    type Err = ReductionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ReadoutDirection::Normal),
            "mirror" => Ok(ReadoutDirection::Mirror),
            other => Err(ReductionError::ConfigError(format!(
                "direction '{other}' must be either 'normal' or 'mirror'"
            ))),
        }
    }
}

/// Unbinned sensor constants.
///
/// `overscan_width` and `prescan_width` are the totals across both halves;
/// each half gets half of them, further divided by the binning factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorGeometry {
    /// Rows of one amplifier half.
    pub sensor_rows: usize,
    /// Columns of one amplifier; a half's trim block spans two of them.
    pub sensor_cols: usize,
    pub overscan_width: usize,
    pub prescan_width: usize,
}

impl Default for SensorGeometry {
    fn default() -> Self {
        Self {
            sensor_rows: 2056,
            sensor_cols: 2048,
            overscan_width: 100,
            prescan_width: 100,
        }
    }
}
