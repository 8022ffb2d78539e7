//! NSM1 parameters
//!
//! Every subsystem of the nutrient budget has its own parameter struct.
//! The values of these structs become the static variables of the model.
//! [`GlobalParameters`] holds the `use_*` switches for optional subsystems and
//! [`GlobalVars`] the physical conditions of the water body.
//! Both of these are supplied to the model as external parameters.
//!
//! The defaults match the reference configuration of the nutrient budget.
//! All structs deserialise with missing fields falling back to their defaults,
//! so a configuration file only needs to list the values it changes.

use clearwater_core::errors::{ClearwaterError, ClearwaterResult};
use clearwater_core::parameter_set;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Algae (phytoplankton) parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlgaeParameters {
    /// Algal dry weight ratio
    /// unit: mg-D
    /// default: 100.0
    pub awd: f64,

    /// Algal carbon ratio
    /// unit: mg-C
    /// default: 40.0
    pub awc: f64,

    /// Algal nitrogen ratio
    /// unit: mg-N
    /// default: 7.2
    pub awn: f64,

    /// Algal phosphorus ratio
    /// unit: mg-P
    /// default: 1.0
    pub awp: f64,

    /// Algal chlorophyll-a ratio
    /// unit: ug-Chla
    /// default: 1000.0
    pub awa: f64,

    /// Light half saturation constant
    /// unit: W/m^2
    /// default: 10.0
    pub kl: f64,

    /// Nitrogen half saturation constant
    /// unit: mg-N/L
    /// default: 0.04
    pub ks_n: f64,

    /// Phosphorus half saturation constant
    /// unit: mg-P/L
    /// default: 0.0012
    pub ks_p: f64,

    /// Maximum algal growth rate at 20 °C
    /// unit: 1/d
    /// default: 1.0
    pub mu_max_20: f64,

    /// Algal death rate at 20 °C
    /// unit: 1/d
    /// default: 0.15
    pub kdp_20: f64,

    /// Algal respiration rate at 20 °C
    /// unit: 1/d
    /// default: 0.2
    pub krp_20: f64,

    /// Temperature correction of the maximum growth rate
    /// default: 1.047
    pub mu_max_theta: f64,

    /// Temperature correction of the death rate
    /// default: 1.047
    pub kdp_theta: f64,

    /// Temperature correction of the respiration rate
    /// default: 1.047
    pub krp_theta: f64,

    /// Algal settling velocity
    /// unit: m/d
    /// default: 0.15
    pub vsap: f64,

    /// Combination of the light and nutrient limitations
    /// 1: multiplicative, 2: limiting nutrient, 3: harmonic mean of the nutrients
    /// default: 1
    pub growth_rate_option: f64,

    /// Depth averaged light limitation
    /// 1: half saturation, 2: Smith, 3: Steele
    /// default: 1
    pub light_limitation_option: f64,
}

impl Default for AlgaeParameters {
    fn default() -> Self {
        Self {
            awd: 100.0,
            awc: 40.0,
            awn: 7.2,
            awp: 1.0,
            awa: 1000.0,
            kl: 10.0,
            ks_n: 0.04,
            ks_p: 0.0012,
            mu_max_20: 1.0,
            kdp_20: 0.15,
            krp_20: 0.2,
            mu_max_theta: 1.047,
            kdp_theta: 1.047,
            krp_theta: 1.047,
            vsap: 0.15,
            growth_rate_option: 1.0,
            light_limitation_option: 1.0,
        }
    }
}

parameter_set!(AlgaeParameters {
    awd => "AWd",
    awc => "AWc",
    awn => "AWn",
    awp => "AWp",
    awa => "AWa",
    kl => "KL",
    ks_n => "KsN",
    ks_p => "KsP",
    mu_max_20 => "mu_max_20",
    kdp_20 => "kdp_20",
    krp_20 => "krp_20",
    mu_max_theta => "mu_max_theta",
    kdp_theta => "kdp_theta",
    krp_theta => "krp_theta",
    vsap => "vsap",
    growth_rate_option => "growth_rate_option",
    light_limitation_option => "light_limitation_option",
});

/// Alkalinity stoichiometry
///
/// All ratios are equivalents of alkalinity per mg of the converted constituent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlkalinityParameters {
    /// Alkalinity consumed by algal growth on ammonium
    /// unit: eq/mg-C
    /// default: 14 / 106 / 12 / 1000
    pub r_alkaa: f64,

    /// Alkalinity produced by algal growth on nitrate
    /// unit: eq/mg-C
    /// default: 18 / 106 / 12 / 1000
    pub r_alkan: f64,

    /// Alkalinity consumed by nitrification
    /// unit: eq/mg-N
    /// default: 2 / 14 / 1000
    pub r_alkn: f64,

    /// Alkalinity produced by denitrification
    /// unit: eq/mg-N
    /// default: 4 / 14 / 1000
    pub r_alkden: f64,

    /// Alkalinity consumed by benthic algae growth on ammonium
    /// unit: eq/mg-C
    /// default: 14 / 106 / 12 / 1000
    pub r_alkba: f64,

    /// Alkalinity produced by benthic algae growth on nitrate
    /// unit: eq/mg-C
    /// default: 18 / 106 / 12 / 1000
    pub r_alkbn: f64,
}

impl Default for AlkalinityParameters {
    fn default() -> Self {
        Self {
            r_alkaa: 14.0 / 106.0 / 12.0 / 1000.0,
            r_alkan: 18.0 / 106.0 / 12.0 / 1000.0,
            r_alkn: 2.0 / 14.0 / 1000.0,
            r_alkden: 4.0 / 14.0 / 1000.0,
            r_alkba: 14.0 / 106.0 / 12.0 / 1000.0,
            r_alkbn: 18.0 / 106.0 / 12.0 / 1000.0,
        }
    }
}

parameter_set!(AlkalinityParameters {
    r_alkaa => "r_alkaa",
    r_alkan => "r_alkan",
    r_alkn => "r_alkn",
    r_alkden => "r_alkden",
    r_alkba => "r_alkba",
    r_alkbn => "r_alkbn",
});

/// Benthic algae parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalgaeParameters {
    /// Benthic algae dry weight ratio
    /// unit: mg-D
    /// default: 100.0
    pub bwd: f64,

    /// Benthic algae carbon ratio
    /// unit: mg-C
    /// default: 40.0
    pub bwc: f64,

    /// Benthic algae nitrogen ratio
    /// unit: mg-N
    /// default: 7.2
    pub bwn: f64,

    /// Benthic algae phosphorus ratio
    /// unit: mg-P
    /// default: 1.0
    pub bwp: f64,

    /// Benthic algae chlorophyll-a ratio
    /// unit: ug-Chla
    /// default: 5000.0
    pub bwa: f64,

    /// Light half saturation constant
    /// unit: W/m^2
    /// default: 10.0
    pub klb: f64,

    /// Nitrogen half saturation constant
    /// unit: mg-N/L
    /// default: 0.25
    pub ks_nb: f64,

    /// Phosphorus half saturation constant
    /// unit: mg-P/L
    /// default: 0.125
    pub ks_pb: f64,

    /// Density half saturation constant
    /// unit: g-D/m^2
    /// default: 10.0
    pub ksb: f64,

    /// Maximum growth rate at 20 °C
    /// unit: 1/d
    /// default: 0.4
    pub mub_max_20: f64,

    /// Respiration rate at 20 °C
    /// unit: 1/d
    /// default: 0.2
    pub krb_20: f64,

    /// Death rate at 20 °C
    /// unit: 1/d
    /// default: 0.3
    pub kdb_20: f64,

    /// default: 1.047
    pub mub_max_theta: f64,

    /// default: 1.047
    pub krb_theta: f64,

    /// default: 1.047
    pub kdb_theta: f64,

    /// Combination of the light, nutrient and density limitations
    /// 1: multiplicative, 2: limiting nutrient
    /// default: 1
    pub b_growth_rate_option: f64,

    /// Light limitation at the bed
    /// 1: half saturation, 2: Smith, 3: Steele
    /// default: 1
    pub b_light_limitation_option: f64,

    /// Fraction of benthic algae mortality released into the water column
    /// default: 0.9
    pub fw: f64,

    /// Fraction of the bottom area available for benthic algae
    /// default: 0.9
    pub fb: f64,
}

impl Default for BalgaeParameters {
    fn default() -> Self {
        Self {
            bwd: 100.0,
            bwc: 40.0,
            bwn: 7.2,
            bwp: 1.0,
            bwa: 5000.0,
            klb: 10.0,
            ks_nb: 0.25,
            ks_pb: 0.125,
            ksb: 10.0,
            mub_max_20: 0.4,
            krb_20: 0.2,
            kdb_20: 0.3,
            mub_max_theta: 1.047,
            krb_theta: 1.047,
            kdb_theta: 1.047,
            b_growth_rate_option: 1.0,
            b_light_limitation_option: 1.0,
            fw: 0.9,
            fb: 0.9,
        }
    }
}

parameter_set!(BalgaeParameters {
    bwd => "BWd",
    bwc => "BWc",
    bwn => "BWn",
    bwp => "BWp",
    bwa => "BWa",
    klb => "KLb",
    ks_nb => "KsNb",
    ks_pb => "KsPb",
    ksb => "Ksb",
    mub_max_20 => "mub_max_20",
    krb_20 => "krb_20",
    kdb_20 => "kdb_20",
    mub_max_theta => "mub_max_theta",
    krb_theta => "krb_theta",
    kdb_theta => "kdb_theta",
    b_growth_rate_option => "b_growth_rate_option",
    b_light_limitation_option => "b_light_limitation_option",
    fw => "Fw",
    fb => "Fb",
});

/// Nitrogen cycle parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NitrogenParameters {
    /// Oxygen inhibition factor for nitrification
    /// unit: L/mg-O2
    /// default: 0.6
    pub knr: f64,

    /// Nitrification rate of ammonium to nitrate at 20 °C
    /// unit: 1/d
    /// default: 0.1
    pub knit_20: f64,

    /// Decay rate of organic nitrogen to ammonium at 20 °C
    /// unit: 1/d
    /// default: 0.1
    pub kon_20: f64,

    /// Denitrification rate at 20 °C
    /// unit: 1/d
    /// default: 0.002
    pub kdnit_20: f64,

    /// Sediment release rate of ammonium at 20 °C
    /// unit: mg-N/m^2/d
    /// default: 0.0
    pub rnh4_20: f64,

    /// Sediment denitrification velocity at 20 °C
    /// unit: m/d
    /// default: 0.0
    pub vno3_20: f64,

    /// default: 1.047
    pub knit_theta: f64,

    /// default: 1.047
    pub kon_theta: f64,

    /// default: 1.047
    pub kdnit_theta: f64,

    /// default: 1.047
    pub rnh4_theta: f64,

    /// default: 1.047
    pub vno3_theta: f64,

    /// Oxygen half saturation constant for denitrification
    /// unit: mg-O2/L
    /// default: 0.1
    pub ks_ox_dn: f64,

    /// Algal ammonium preference
    /// default: 0.5
    pub pn: f64,

    /// Benthic algae ammonium preference
    /// default: 0.5
    pub pnb: f64,
}

impl Default for NitrogenParameters {
    fn default() -> Self {
        Self {
            knr: 0.6,
            knit_20: 0.1,
            kon_20: 0.1,
            kdnit_20: 0.002,
            rnh4_20: 0.0,
            vno3_20: 0.0,
            knit_theta: 1.047,
            kon_theta: 1.047,
            kdnit_theta: 1.047,
            rnh4_theta: 1.047,
            vno3_theta: 1.047,
            ks_ox_dn: 0.1,
            pn: 0.5,
            pnb: 0.5,
        }
    }
}

parameter_set!(NitrogenParameters {
    knr => "KNR",
    knit_20 => "knit_20",
    kon_20 => "kon_20",
    kdnit_20 => "kdnit_20",
    rnh4_20 => "rnh4_20",
    vno3_20 => "vno3_20",
    knit_theta => "knit_theta",
    kon_theta => "kon_theta",
    kdnit_theta => "kdnit_theta",
    rnh4_theta => "rnh4_theta",
    vno3_theta => "vno3_theta",
    ks_ox_dn => "KsOxdn",
    pn => "PN",
    pnb => "PNb",
});

/// Organic and inorganic carbon parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonParameters {
    /// Fraction of algal mortality into particulate organic carbon
    /// default: 0.9
    pub f_pocp: f64,

    /// Dissolved organic carbon oxidation rate at 20 °C
    /// unit: 1/d
    /// default: 0.01
    pub kdoc_20: f64,

    /// default: 1.047
    pub kdoc_theta: f64,

    /// Fraction of benthic algae mortality into particulate organic carbon
    /// default: 0.9
    pub f_pocb: f64,

    /// Particulate organic carbon hydrolysis rate at 20 °C
    /// unit: 1/d
    /// default: 0.005
    pub kpoc_20: f64,

    /// default: 1.047
    pub kpoc_theta: f64,

    /// Oxygen half saturation constant for DOC oxidation
    /// unit: mg-O2/L
    /// default: 1.0
    pub ks_ox_mc: f64,

    /// Atmospheric partial pressure of CO2
    /// unit: ppm
    /// default: 383.0
    pub p_co2: f64,

    /// Fraction of dissolved inorganic carbon present as CO2
    /// default: 0.2
    pub f_co2: f64,

    /// Oxygen stoichiometric ratio to organic carbon
    /// unit: mg-O2/mg-C
    /// default: 32 / 12
    pub roc: f64,
}

impl Default for CarbonParameters {
    fn default() -> Self {
        Self {
            f_pocp: 0.9,
            kdoc_20: 0.01,
            kdoc_theta: 1.047,
            f_pocb: 0.9,
            kpoc_20: 0.005,
            kpoc_theta: 1.047,
            ks_ox_mc: 1.0,
            p_co2: 383.0,
            f_co2: 0.2,
            roc: 32.0 / 12.0,
        }
    }
}

parameter_set!(CarbonParameters {
    f_pocp => "f_pocp",
    kdoc_20 => "kdoc_20",
    kdoc_theta => "kdoc_theta",
    f_pocb => "f_pocb",
    kpoc_20 => "kpoc_20",
    kpoc_theta => "kpoc_theta",
    ks_ox_mc => "KsOxmc",
    p_co2 => "pCO2",
    f_co2 => "FCO2",
    roc => "roc",
});

/// Carbonaceous biochemical oxygen demand parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CbodParameters {
    /// Oxygen half saturation constant for CBOD oxidation
    /// unit: mg-O2/L
    /// default: 0.5
    pub ks_ox_bod: f64,

    /// CBOD oxidation rate at 20 °C
    /// unit: 1/d
    /// default: 0.12
    pub kbod_20: f64,

    /// CBOD sedimentation rate at 20 °C
    /// unit: 1/d
    /// default: 0.0
    pub ksbod_20: f64,

    /// default: 1.047
    pub kbod_theta: f64,

    /// default: 1.047
    pub ksbod_theta: f64,
}

impl Default for CbodParameters {
    fn default() -> Self {
        Self {
            ks_ox_bod: 0.5,
            kbod_20: 0.12,
            ksbod_20: 0.0,
            kbod_theta: 1.047,
            ksbod_theta: 1.047,
        }
    }
}

parameter_set!(CbodParameters {
    ks_ox_bod => "KsOxbod",
    kbod_20 => "kbod_20",
    ksbod_20 => "ksbod_20",
    kbod_theta => "kbod_theta",
    ksbod_theta => "ksbod_theta",
});

/// Dissolved oxygen parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DoxParameters {
    /// Oxygen consumed per unit of nitrified ammonium
    /// unit: mg-O2/mg-N
    /// default: 2 * 32 / 14
    pub ron: f64,

    /// Oxygen half saturation constant for sediment oxygen demand
    /// unit: mg-O2/L
    /// default: 1.0
    pub ks_sod: f64,
}

impl Default for DoxParameters {
    fn default() -> Self {
        Self {
            ron: 2.0 * 32.0 / 14.0,
            ks_sod: 1.0,
        }
    }
}

parameter_set!(DoxParameters {
    ron => "ron",
    ks_sod => "KsSOD",
});

/// Dissolved nitrogen gas parameters
///
/// The N2 budget only depends on shared physical conditions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct N2Parameters {}

parameter_set!(N2Parameters {});

/// Particulate organic matter parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PomParameters {
    /// POM dissolution rate at 20 °C
    /// unit: 1/d
    /// default: 0.1
    pub kpom_20: f64,

    /// default: 1.047
    pub kpom_theta: f64,
}

impl Default for PomParameters {
    fn default() -> Self {
        Self {
            kpom_20: 0.1,
            kpom_theta: 1.047,
        }
    }
}

parameter_set!(PomParameters {
    kpom_20 => "kpom_20",
    kpom_theta => "kpom_theta",
});

/// Pathogen parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathogenParameters {
    /// Pathogen death rate at 20 °C
    /// unit: 1/d
    /// default: 0.8
    pub kdx_20: f64,

    /// default: 1.047
    pub kdx_theta: f64,

    /// Light efficiency factor for pathogen decay
    /// default: 1.0
    pub apx: f64,

    /// Pathogen settling velocity
    /// unit: m/d
    /// default: 1.0
    pub vx: f64,
}

impl Default for PathogenParameters {
    fn default() -> Self {
        Self {
            kdx_20: 0.8,
            kdx_theta: 1.047,
            apx: 1.0,
            vx: 1.0,
        }
    }
}

parameter_set!(PathogenParameters {
    kdx_20 => "kdx_20",
    kdx_theta => "kdx_theta",
    apx => "apx",
    vx => "vx",
});

/// Phosphorus cycle parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhosphorusParameters {
    /// Decay rate of organic phosphorus to dissolved inorganic phosphorus at 20 °C
    /// unit: 1/d
    /// default: 0.1
    pub kop_20: f64,

    /// Sediment release rate of dissolved inorganic phosphorus at 20 °C
    /// unit: mg-P/m^2/d
    /// default: 0.0
    pub rpo4_20: f64,

    /// default: 1.047
    pub kop_theta: f64,

    /// default: 1.047
    pub rpo4_theta: f64,

    /// Partition coefficient of inorganic phosphorus onto suspended solids
    /// unit: L/kg
    /// default: 100.0
    pub kdpo4: f64,
}

impl Default for PhosphorusParameters {
    fn default() -> Self {
        Self {
            kop_20: 0.1,
            rpo4_20: 0.0,
            kop_theta: 1.047,
            rpo4_theta: 1.047,
            kdpo4: 100.0,
        }
    }
}

parameter_set!(PhosphorusParameters {
    kop_20 => "kop_20",
    rpo4_20 => "rpo4_20",
    kop_theta => "kop_theta",
    rpo4_theta => "rpo4_theta",
    kdpo4 => "kdpo4",
});

/// Switches for the optional subsystems of the nutrient budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalParameters {
    pub use_nh4: bool,
    pub use_no3: bool,
    pub use_org_n: bool,
    pub use_org_p: bool,
    pub use_tip: bool,
    /// Read bed fluxes from the sediment flux inputs of [`GlobalVars`]
    /// instead of the release rate constants
    /// default: false
    pub use_sed_flux: bool,
    pub use_dox: bool,
    pub use_algae: bool,
    pub use_balgae: bool,
    pub use_poc: bool,
    pub use_doc: bool,
    pub use_dic: bool,
    pub use_n2: bool,
    pub use_pathogen: bool,
    pub use_alk: bool,
    pub use_pom: bool,
}

impl Default for GlobalParameters {
    fn default() -> Self {
        Self {
            use_nh4: true,
            use_no3: true,
            use_org_n: true,
            use_org_p: true,
            use_tip: true,
            use_sed_flux: false,
            use_dox: true,
            use_algae: true,
            use_balgae: true,
            use_poc: true,
            use_doc: true,
            use_dic: true,
            use_n2: true,
            use_pathogen: true,
            use_alk: true,
            use_pom: true,
        }
    }
}

parameter_set!(GlobalParameters {
    use_nh4 => "use_NH4",
    use_no3 => "use_NO3",
    use_org_n => "use_OrgN",
    use_org_p => "use_OrgP",
    use_tip => "use_TIP",
    use_sed_flux => "use_SedFlux",
    use_dox => "use_DOX",
    use_algae => "use_Algae",
    use_balgae => "use_Balgae",
    use_poc => "use_POC",
    use_doc => "use_DOC",
    use_dic => "use_DIC",
    use_n2 => "use_N2",
    use_pathogen => "use_Pathogen",
    use_alk => "use_Alk",
    use_pom => "use_POM",
});

/// Physical conditions of the water body and shared coefficients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalVars {
    /// Organic nitrogen settling velocity
    /// unit: m/d
    /// default: 0.01
    pub vson: f64,

    /// Particulate organic carbon settling velocity
    /// unit: m/d
    /// default: 0.01
    pub vsoc: f64,

    /// Organic phosphorus settling velocity
    /// unit: m/d
    /// default: 0.01
    pub vsop: f64,

    /// Sediment settling velocity
    /// unit: m/d
    /// default: 0.01
    pub vs: f64,

    /// Sediment oxygen demand at 20 °C
    /// unit: g-O2/m^2/d
    /// default: 0.5
    pub sod_20: f64,

    /// default: 1.047
    pub sod_theta: f64,

    /// Burial velocity of organic matter
    /// unit: m/d
    /// default: 0.01
    pub vb: f64,

    /// Carbon fraction of organic matter
    /// unit: mg-C/mg-D
    /// default: 0.4
    pub fcom: f64,

    /// User defined wind driven reaeration velocity at 20 °C
    /// unit: m/d
    /// default: 0.0
    pub kaw_20_user: f64,

    /// User defined hydraulic reaeration rate at 20 °C
    /// unit: 1/d
    /// default: 1.0
    pub kah_20_user: f64,

    /// default: 1.047
    pub kaw_theta: f64,

    /// default: 1.047
    pub kah_theta: f64,

    /// Hydraulic reaeration formula
    /// 1: user defined, 2: O'Connor-Dobbins, 3: Churchill, 4: Owens-Gibbs, 5: Tsivoglou-Wallace
    /// default: 1
    pub hydraulic_reaeration_option: f64,

    /// Wind driven reaeration formula
    /// 1: user defined, 2: Banks-Herrera, 3: Wanninkhof
    /// default: 1
    pub wind_reaeration_option: f64,

    /// Timestep length
    /// unit: d
    /// default: 1.0
    pub dt: f64,

    /// Average water depth
    /// unit: m
    /// default: 1.5
    pub depth: f64,

    /// Water temperature
    /// unit: °C
    /// default: 25.0
    pub twater_c: f64,

    /// Generic temperature correction coefficient
    /// default: 1.047
    pub theta: f64,

    /// Average water velocity
    /// unit: m/s
    /// default: 1.0
    pub velocity: f64,

    /// unit: m^3/s
    /// default: 150.0
    pub flow: f64,

    /// unit: m
    /// default: 100.0
    pub topwidth: f64,

    /// Channel slope
    /// unit: m/m
    /// default: 0.0002
    pub slope: f64,

    /// unit: m/s
    /// default: 0.05334
    pub shear_velocity: f64,

    /// Atmospheric pressure
    /// unit: mb
    /// default: 1013.25
    pub pressure_atm: f64,

    /// Wind speed at 2 m above the surface
    /// unit: m/s
    /// default: 3.0
    pub wind_speed: f64,

    /// Incoming solar radiation
    /// unit: W/m^2
    /// default: 500.0
    pub q_solar: f64,

    /// Suspended solids concentration
    /// unit: mg/L
    /// default: 1.0
    pub solid: f64,

    /// Background light extinction
    /// unit: 1/m
    /// default: 0.02
    pub lambda0: f64,

    /// Linear algal self shading
    /// unit: 1/m/(ug-Chla/L)
    /// default: 0.0088
    pub lambda1: f64,

    /// Non-linear algal self shading
    /// unit: 1/m/(ug-Chla/L)^(2/3)
    /// default: 0.054
    pub lambda2: f64,

    /// Light extinction by suspended solids
    /// unit: L/mg/m
    /// default: 0.056
    pub lambdas: f64,

    /// Light extinction by particulate organic matter
    /// unit: L/mg/m
    /// default: 0.174
    pub lambdam: f64,

    /// Fraction of solar radiation that is photosynthetically active
    /// default: 0.47
    pub fr_par: f64,

    /// Ammonium flux from the bed, used with `use_SedFlux`
    /// unit: g-N/m^2/d
    /// default: 0.0
    pub j_nh4: f64,

    /// Nitrate flux from the bed, used with `use_SedFlux`
    /// unit: g-N/m^2/d
    /// default: 0.0
    pub j_no3: f64,

    /// Dissolved inorganic phosphorus flux from the bed, used with `use_SedFlux`
    /// unit: g-P/m^2/d
    /// default: 0.0
    pub j_dip: f64,

    /// Dissolved inorganic carbon flux from the bed, used with `use_SedFlux`
    /// unit: g-C/m^2/d
    /// default: 0.0
    pub j_dic: f64,

    /// Sediment oxygen demand computed by a sediment flux model, used with `use_SedFlux`
    /// unit: g-O2/m^2/d
    /// default: 0.0
    pub j_sod: f64,
}

impl Default for GlobalVars {
    fn default() -> Self {
        Self {
            vson: 0.01,
            vsoc: 0.01,
            vsop: 0.01,
            vs: 0.01,
            sod_20: 0.5,
            sod_theta: 1.047,
            vb: 0.01,
            fcom: 0.4,
            kaw_20_user: 0.0,
            kah_20_user: 1.0,
            kaw_theta: 1.047,
            kah_theta: 1.047,
            hydraulic_reaeration_option: 1.0,
            wind_reaeration_option: 1.0,
            dt: 1.0,
            depth: 1.5,
            twater_c: 25.0,
            theta: 1.047,
            velocity: 1.0,
            flow: 150.0,
            topwidth: 100.0,
            slope: 0.0002,
            shear_velocity: 0.05334,
            pressure_atm: 1013.25,
            wind_speed: 3.0,
            q_solar: 500.0,
            solid: 1.0,
            lambda0: 0.02,
            lambda1: 0.0088,
            lambda2: 0.054,
            lambdas: 0.056,
            lambdam: 0.174,
            fr_par: 0.47,
            j_nh4: 0.0,
            j_no3: 0.0,
            j_dip: 0.0,
            j_dic: 0.0,
            j_sod: 0.0,
        }
    }
}

parameter_set!(GlobalVars {
    vson => "vson",
    vsoc => "vsoc",
    vsop => "vsop",
    vs => "vs",
    sod_20 => "SOD_20",
    sod_theta => "SOD_theta",
    vb => "vb",
    fcom => "fcom",
    kaw_20_user => "kaw_20_user",
    kah_20_user => "kah_20_user",
    kaw_theta => "kaw_theta",
    kah_theta => "kah_theta",
    hydraulic_reaeration_option => "hydraulic_reaeration_option",
    wind_reaeration_option => "wind_reaeration_option",
    dt => "dt",
    depth => "depth",
    twater_c => "TwaterC",
    theta => "theta",
    velocity => "velocity",
    flow => "flow",
    topwidth => "topwidth",
    slope => "slope",
    shear_velocity => "shear_velocity",
    pressure_atm => "pressure_atm",
    wind_speed => "wind_speed",
    q_solar => "q_solar",
    solid => "Solid",
    lambda0 => "lambda0",
    lambda1 => "lambda1",
    lambda2 => "lambda2",
    lambdas => "lambdas",
    lambdam => "lambdam",
    fr_par => "Fr_PAR",
    j_nh4 => "JNH4",
    j_no3 => "JNO3",
    j_dip => "JDIP",
    j_dic => "JDIC",
    j_sod => "JSOD",
});

/// Complete configuration of a nutrient budget
///
/// Loaded from TOML with one table per parameter group:
///
/// ```toml
/// [cbod]
/// kbod_20 = 0.2
///
/// [global_parameters]
/// use_dox = false
///
/// [global_vars]
/// twater_c = 15.0
/// ```
///
/// Keys are the snake case field names of the parameter structs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nsm1Config {
    pub algae: AlgaeParameters,
    pub alkalinity: AlkalinityParameters,
    pub balgae: BalgaeParameters,
    pub nitrogen: NitrogenParameters,
    pub carbon: CarbonParameters,
    pub cbod: CbodParameters,
    pub dox: DoxParameters,
    pub n2: N2Parameters,
    pub pom: PomParameters,
    pub pathogen: PathogenParameters,
    pub phosphorus: PhosphorusParameters,
    pub global_parameters: GlobalParameters,
    pub global_vars: GlobalVars,
}

impl Nsm1Config {
    /// Parse a configuration from a TOML document
    pub fn from_toml_str(contents: &str) -> ClearwaterResult<Self> {
        toml::from_str(contents).map_err(|e| ClearwaterError::InvalidConfiguration(e.to_string()))
    }

    /// Read a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> ClearwaterResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClearwaterError::InvalidConfiguration(format!("{}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn to_toml_string(&self) -> ClearwaterResult<String> {
        toml::to_string(self).map_err(|e| ClearwaterError::InvalidConfiguration(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearwater_core::parameters::{ParameterSet, ParameterValue};

    #[test]
    fn test_default_parameters() {
        let params = CbodParameters::default();
        assert!((params.kbod_20 - 0.12).abs() < 1e-10);
        assert!((params.ks_ox_bod - 0.5).abs() < 1e-10);

        let globals = GlobalParameters::default();
        assert!(globals.use_dox);
        assert!(!globals.use_sed_flux);
    }

    #[test]
    fn test_parameter_names() {
        let values = CbodParameters::default().parameter_values();
        let names: Vec<_> = values.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec!["KsOxbod", "kbod_20", "ksbod_20", "kbod_theta", "ksbod_theta"]
        );

        let toggles = GlobalParameters::default().parameter_values();
        assert!(toggles.contains(&("use_DOX", ParameterValue::Flag(true))));
        assert!(toggles.contains(&("use_SedFlux", ParameterValue::Flag(false))));
        assert!(N2Parameters::default().parameter_values().is_empty());
    }

    #[test]
    fn test_partial_deserialization() {
        let config = Nsm1Config::from_toml_str(
            r#"
            [cbod]
            kbod_20 = 1.0

            [global_parameters]
            use_dox = false

            [global_vars]
            twater_c = 15.0
            "#,
        )
        .expect("Partial deserialization failed");

        // Specified fields
        assert!((config.cbod.kbod_20 - 1.0).abs() < 1e-10);
        assert!(!config.global_parameters.use_dox);
        assert!((config.global_vars.twater_c - 15.0).abs() < 1e-10);

        // Other fields should be defaults
        assert!((config.cbod.ks_ox_bod - 0.5).abs() < 1e-10);
        assert!(config.global_parameters.use_algae);
        assert_eq!(config.algae, AlgaeParameters::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Nsm1Config::default();
        config.global_vars.depth = 3.0;
        let serialised = config.to_toml_string().unwrap();
        assert_eq!(Nsm1Config::from_toml_str(&serialised).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Nsm1Config::from_toml_str("[cbod]\nkbod_20 = \"fast\"");
        assert!(matches!(
            result,
            Err(ClearwaterError::InvalidConfiguration(_))
        ));
    }
}
