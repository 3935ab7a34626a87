//! Design method selection for wind loads
//!
//! Wind speeds in ASCE 7-16 and 7-22 are strength-level, so pressures computed
//! from them are used directly in LRFD combinations (1.0W) and scaled by 0.6
//! for ASD combinations (0.6W).
//!
//! # Example
//!
//! ```
//! use wind_core::loads::DesignMethod;
//!
//! assert_eq!(DesignMethod::Asd.wind_load_factor(), 0.6);
//! assert_eq!(DesignMethod::Lrfd.code(), "LRFD");
//! ```

use serde::{Deserialize, Serialize};

use crate::pressure::ASD_FACTOR;

/// Design methodology selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DesignMethod {
    /// Load and Resistance Factor Design - strength-level wind (1.0W)
    #[default]
    Lrfd,
    /// Allowable Stress Design - service-level wind (0.6W)
    Asd,
}

impl DesignMethod {
    pub const ALL: [DesignMethod; 2] = [DesignMethod::Lrfd, DesignMethod::Asd];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD (Allowable Stress Design)",
            DesignMethod::Lrfd => "LRFD (Load and Resistance Factor Design)",
        }
    }

    /// Short abbreviation
    pub fn code(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD",
            DesignMethod::Lrfd => "LRFD",
        }
    }

    /// Factor on W in the basic load combinations
    pub fn wind_load_factor(&self) -> f64 {
        match self {
            DesignMethod::Lrfd => 1.0,
            DesignMethod::Asd => ASD_FACTOR,
        }
    }
}

impl std::fmt::Display for DesignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
