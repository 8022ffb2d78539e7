//! TSM parameters
//!
//! [`MeteorologicalParameters`] and [`TemperatureParameters`] become static variables of the model,
//! [`TsmGlobalParameters`] is supplied as external parameters.

use clearwater_core::errors::{ClearwaterError, ClearwaterResult};
use clearwater_core::parameter_set;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Meteorological forcing of the energy budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorologicalParameters {
    /// Air temperature
    /// unit: °C
    /// default: 20.0
    pub air_temp_c: f64,

    /// Net shortwave radiation absorbed by the water
    /// unit: W/m^2
    /// default: 400.0
    pub q_solar: f64,

    /// Sediment temperature
    /// unit: °C
    /// default: 5.0
    pub sed_temp_c: f64,

    /// Vapour pressure of the air
    /// unit: mb
    /// default: 1.0
    pub eair_mb: f64,

    /// Air pressure
    /// unit: mb
    /// default: 1013.0
    pub pressure_mb: f64,

    /// Cloud cover fraction
    /// default: 0.1
    pub cloudiness: f64,

    /// Wind speed
    /// unit: m/s
    /// default: 3.0
    pub wind_speed: f64,

    /// Constant term of the wind function
    /// unit: 1e-6 m/s/mb
    /// default: 0.3
    pub wind_a: f64,

    /// Wind speed coefficient of the wind function
    /// unit: 1e-6 1/mb
    /// default: 1.5
    pub wind_b: f64,

    /// Wind speed exponent of the wind function
    /// default: 1.0
    pub wind_c: f64,

    /// Ratio of the heat and vapour diffusivities
    /// default: 1.0
    pub wind_kh_kw: f64,
}

impl Default for MeteorologicalParameters {
    fn default() -> Self {
        Self {
            air_temp_c: 20.0,
            q_solar: 400.0,
            sed_temp_c: 5.0,
            eair_mb: 1.0,
            pressure_mb: 1013.0,
            cloudiness: 0.1,
            wind_speed: 3.0,
            wind_a: 0.3,
            wind_b: 1.5,
            wind_c: 1.0,
            wind_kh_kw: 1.0,
        }
    }
}

parameter_set!(MeteorologicalParameters {
    air_temp_c => "air_temp_c",
    q_solar => "q_solar",
    sed_temp_c => "sed_temp_c",
    eair_mb => "eair_mb",
    pressure_mb => "pressure_mb",
    cloudiness => "cloudiness",
    wind_speed => "wind_speed",
    wind_a => "wind_a",
    wind_b => "wind_b",
    wind_c => "wind_c",
    wind_kh_kw => "wind_kh_kw",
});

/// Physical constants of the energy budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureParameters {
    /// unit: W/m^2/K^4
    /// default: 5.67e-8
    pub stefan_boltzmann: f64,

    /// Specific heat of air
    /// unit: J/kg/K
    /// default: 1005.0
    pub cp_air: f64,

    /// Emissivity of the water surface
    /// default: 0.97
    pub emissivity_water: f64,

    /// Bulk density of the sediment
    /// unit: kg/m^3
    /// default: 1600.0
    pub pb: f64,

    /// Specific heat of the sediment
    /// unit: J/kg/K
    /// default: 1673.0
    pub cps: f64,

    /// Thickness of the active sediment layer
    /// unit: m
    /// default: 0.1
    pub h2: f64,

    /// Thermal diffusivity of the sediment
    /// unit: m^2/d
    /// default: 0.0432
    pub alphas: f64,
}

impl Default for TemperatureParameters {
    fn default() -> Self {
        Self {
            stefan_boltzmann: 5.67e-8,
            cp_air: 1005.0,
            emissivity_water: 0.97,
            pb: 1600.0,
            cps: 1673.0,
            h2: 0.1,
            alphas: 0.0432,
        }
    }
}

parameter_set!(TemperatureParameters {
    stefan_boltzmann => "stefan_boltzmann",
    cp_air => "cp_air",
    emissivity_water => "emissivity_water",
    pb => "pb",
    cps => "cps",
    h2 => "h2",
    alphas => "alphas",
});

/// Switches and timestep of the energy budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsmGlobalParameters {
    /// Include heat exchange with the sediment
    /// default: true
    pub use_sed_temp: bool,

    /// Timestep length
    /// unit: d
    /// default: 1.0
    pub dt: f64,
}

impl Default for TsmGlobalParameters {
    fn default() -> Self {
        Self {
            use_sed_temp: true,
            dt: 1.0,
        }
    }
}

parameter_set!(TsmGlobalParameters {
    use_sed_temp => "use_SedTemp",
    dt => "dt",
});

/// Complete configuration of an energy budget, loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TsmConfig {
    pub meteorological: MeteorologicalParameters,
    pub temperature: TemperatureParameters,
    pub global_parameters: TsmGlobalParameters,
}

impl TsmConfig {
    pub fn from_toml_str(contents: &str) -> ClearwaterResult<Self> {
        toml::from_str(contents).map_err(|e| ClearwaterError::InvalidConfiguration(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> ClearwaterResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClearwaterError::InvalidConfiguration(format!("{}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }
}
