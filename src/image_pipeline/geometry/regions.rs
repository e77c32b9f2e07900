use tracing::debug;

use crate::image_pipeline::common::diagnostics::Amplifier;
use crate::image_pipeline::common::error::{ReductionError, Result};
use crate::image_pipeline::common::frame::Region;
use crate::image_pipeline::geometry::types::{Binning, ReadoutDirection, SensorGeometry};

/// The four named regions read by one amplifier half.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmplifierRegions {
    pub trim: Region,
    pub prescan: Region,
    pub overscan_col: Region,
    pub overscan_row: Region,
}

impl AmplifierRegions {
    /// Prescan, overscan-row and overscan-column bands, in that order.
    pub fn bias_bands(&self) -> [&Region; 3] {
        [&self.prescan, &self.overscan_row, &self.overscan_col]
    }

    pub fn all(&self) -> [&Region; 4] {
        [&self.trim, &self.prescan, &self.overscan_col, &self.overscan_row]
    }
}

/// Region layout of a padded two-half frame.
///
/// ```text
///   cols:  [psc | 2*nc trim | psc]
///   rows:  top trim (nr)
///          top overscan row (osc)      full width
///          bottom overscan row (osc)   full width
///          bottom trim (nr)
/// ```
/// The left column band is prescan for the top half and overscan for the
/// bottom half; the right band is the reverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryRegions {
    pub binning: Binning,
    pub direction: ReadoutDirection,
    /// Binned rows per half.
    pub nr: usize,
    /// Binned columns per amplifier.
    pub nc: usize,
    /// Binned overscan-row height per half.
    pub overscan_rows: usize,
    /// Binned width of each column band.
    pub band_cols: usize,
    pub top: AmplifierRegions,
    pub bottom: AmplifierRegions,
}

impl GeometryRegions {
    pub fn padded_shape(&self) -> (usize, usize) {
        (
            2 * self.nr + 2 * self.overscan_rows,
            2 * self.nc + 2 * self.band_cols,
        )
    }

    pub fn trimmed_shape(&self) -> (usize, usize) {
        (2 * self.nr, 2 * self.nc)
    }

    pub fn amplifier(&self, amplifier: Amplifier) -> &AmplifierRegions {
        match amplifier {
            Amplifier::Top => &self.top,
            Amplifier::Bottom => &self.bottom,
        }
    }

    pub fn amplifiers(&self) -> [(Amplifier, &AmplifierRegions); 2] {
        [(Amplifier::Top, &self.top), (Amplifier::Bottom, &self.bottom)]
    }

    /// Fails with `ValidationError` unless `shape` is the padded frame shape.
    pub fn check_padded(&self, shape: (usize, usize)) -> Result<()> {
        let expected = self.padded_shape();
        if shape != expected {
            return Err(ReductionError::shape_mismatch(
                "frame does not match the padded detector geometry",
                expected,
                shape,
            ));
        }
        Ok(())
    }
}

fn scaled(name: &str, value: usize, divisor: usize) -> Result<usize> {
    if value == 0 || value % divisor != 0 {
        return Err(ReductionError::ConfigError(format!(
            "{name} = {value} must be a positive multiple of {divisor}"
        )));
    }
    Ok(value / divisor)
}

/// Derives the named pixel regions for a binning and readout direction.
///
/// The direction is carried on the result; it never moves a region.
pub fn compute_regions(
    binning: Binning,
    direction: ReadoutDirection,
    sensor: &SensorGeometry,
) -> Result<GeometryRegions> {
    let rf = binning.row_factor();
    let cf = binning.col_factor();

    let nr = scaled("sensor_rows", sensor.sensor_rows, rf)?;
    let nc = scaled("sensor_cols", sensor.sensor_cols, cf)?;
    let osc = scaled("overscan_width", sensor.overscan_width, 2 * rf)?;
    let psc = scaled("prescan_width", sensor.prescan_width, 2 * cf)?;

    let total_rows = 2 * nr + 2 * osc;
    let total_cols = 2 * nc + 2 * psc;

    let trim_cols = psc..psc + 2 * nc;
    let left = 0..psc;
    let right = psc + 2 * nc..total_cols;
    let full = 0..total_cols;

    let top_rows = 0..nr;
    let bottom_rows = nr + 2 * osc..total_rows;

    let top = AmplifierRegions {
        trim: Region::new(top_rows.clone(), trim_cols.clone()),
        prescan: Region::new(top_rows.clone(), left.clone()),
        overscan_col: Region::new(top_rows, right.clone()),
        overscan_row: Region::new(nr..nr + osc, full.clone()),
    };
    let bottom = AmplifierRegions {
        trim: Region::new(bottom_rows.clone(), trim_cols),
        prescan: Region::new(bottom_rows.clone(), right),
        overscan_col: Region::new(bottom_rows, left),
        overscan_row: Region::new(nr + osc..nr + 2 * osc, full),
    };

    debug!(
        %binning,
        ?direction,
        nr,
        nc,
        overscan_rows = osc,
        band_cols = psc,
        rows = total_rows,
        cols = total_cols,
        "computed detector regions"
    );

    Ok(GeometryRegions {
        binning,
        direction,
        nr,
        nc,
        overscan_rows: osc,
        band_cols: psc,
        top,
        bottom,
    })
}
