//! Variable registry: dataset, band and overlay parameters per variable
//!
//! The mapping is data, not branching logic. Every consumer resolves a
//! [`Variable`] to its [`DatasetSpec`], and optionally its [`TileSpec`],
//! through this module.

use serde::{Deserialize, Serialize};

/// Satellite-observed variable: four Sentinel-5P trace gases plus the
/// MODIS vegetation index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// Nitrogen dioxide, traffic and industry tracer
    No2,
    /// Methane, agriculture and landfill tracer
    Ch4,
    /// Carbon monoxide, biomass-burning tracer
    Co,
    /// Sulphur dioxide, heavy-fuel combustion and volcanic tracer
    So2,
    /// Normalized difference vegetation index
    Ndvi,
}

/// Dataset coordinates for one variable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetSpec {
    /// Image collection identifier on the imagery service
    pub collection: &'static str,
    /// Measurement band within the collection
    pub band: &'static str,
    /// Spatial averaging resolution for point reduction, in meters
    pub scale_meters: u32,
    /// Multiplier applied to raw band values during extraction
    pub value_scale: f64,
    /// Per-query cap on the number of readings, earliest first
    pub max_samples: usize,
    /// Unit label for display and export
    pub unit: &'static str,
}

/// Visualization parameters for the rendered overlay of a variable
///
/// Consumed read-only by a map renderer; nothing in this crate draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpec {
    /// Lower bound of the color ramp
    pub min: f64,
    /// Upper bound of the color ramp
    pub max: f64,
    /// Color ramp stops, dark to hot
    pub palette: &'static [&'static str],
    /// Trailing averaging window behind the rendered layer, in days
    pub trailing_days: u32,
}

/// Days of trailing data averaged into a rendered overlay
pub const TILE_TRAILING_DAYS: u32 = 30;

const S5P_PALETTE: &[&str] = &[
    "black", "blue", "purple", "cyan", "green", "yellow", "red",
];
const CH4_PALETTE: &[&str] = &["black", "blue", "cyan", "green", "yellow", "red"];

impl Variable {
    /// All variables, in dashboard order
    pub const ALL: [Variable; 5] = [
        Variable::No2,
        Variable::Ch4,
        Variable::Co,
        Variable::So2,
        Variable::Ndvi,
    ];

    /// Dataset coordinates for this variable
    pub fn dataset(&self) -> DatasetSpec {
        match self {
            Variable::No2 => DatasetSpec {
                collection: "COPERNICUS/S5P/NRTI/L3_NO2",
                band: "NO2_column_number_density",
                scale_meters: 3000,
                value_scale: 1.0,
                max_samples: 1000,
                unit: "mol/m²",
            },
            Variable::Ch4 => DatasetSpec {
                collection: "COPERNICUS/S5P/OFFL/L3_CH4",
                band: "CH4_column_volume_mixing_ratio_dry_air",
                scale_meters: 5000,
                value_scale: 1.0,
                max_samples: 1000,
                unit: "ppbv",
            },
            Variable::Co => DatasetSpec {
                collection: "COPERNICUS/S5P/NRTI/L3_CO",
                band: "CO_column_number_density",
                scale_meters: 3000,
                value_scale: 1.0,
                max_samples: 1000,
                unit: "mol/m²",
            },
            Variable::So2 => DatasetSpec {
                collection: "COPERNICUS/S5P/NRTI/L3_SO2",
                band: "SO2_column_number_density",
                scale_meters: 3000,
                value_scale: 1.0,
                max_samples: 1000,
                unit: "mol/m²",
            },
            Variable::Ndvi => DatasetSpec {
                collection: "MODIS/006/MOD13Q1",
                band: "NDVI",
                scale_meters: 1000,
                // Raw MODIS NDVI is stored as index * 10000
                value_scale: 1e-4,
                max_samples: 500,
                unit: "index",
            },
        }
    }

    /// Overlay parameters, for the variables that have a rendered layer
    pub fn tile_spec(&self) -> Option<TileSpec> {
        let spec = match self {
            Variable::No2 => TileSpec {
                min: 0.0,
                max: 0.0002,
                palette: S5P_PALETTE,
                trailing_days: TILE_TRAILING_DAYS,
            },
            Variable::Ch4 => TileSpec {
                min: 1750.0,
                max: 1900.0,
                palette: CH4_PALETTE,
                trailing_days: TILE_TRAILING_DAYS,
            },
            Variable::Co => TileSpec {
                min: 0.0,
                max: 0.05,
                palette: S5P_PALETTE,
                trailing_days: TILE_TRAILING_DAYS,
            },
            Variable::So2 => TileSpec {
                min: 0.0,
                max: 0.0005,
                palette: S5P_PALETTE,
                trailing_days: TILE_TRAILING_DAYS,
            },
            Variable::Ndvi => return None,
        };
        Some(spec)
    }

    /// Short display label
    pub fn label(&self) -> &'static str {
        match self {
            Variable::No2 => "NO2",
            Variable::Ch4 => "CH4",
            Variable::Co => "CO",
            Variable::So2 => "SO2",
            Variable::Ndvi => "NDVI",
        }
    }
}
