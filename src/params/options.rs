//! Enumerated option sets for the string selections carried by render parameters.
//!
//! Each set has a fixed list of display names (as shown in the submitter and stored in job
//! bundles); parsing anything else fails with the set's named error.

use std::{fmt, str::FromStr};

use crate::foundation::error::VredError;

macro_rules! option_set {
    (
        $(#[$meta:meta])*
        $name:ident, $error:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member, in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Display name as stored in render parameters.
            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = VredError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name() == s)
                    .ok_or_else(|| VredError::validation(format!("{}: {s}", $error)))
            }
        }
    };
}

option_set! {
    /// Render quality mode.
    RenderQuality, "Invalid render quality" {
        /// OpenGL, low quality.
        AnalyticLow => "Analytic Low",
        /// OpenGL, high quality.
        AnalyticHigh => "Analytic High",
        /// Realistic OpenGL, low quality.
        RealisticLow => "Realistic Low",
        /// Realistic OpenGL, high quality.
        RealisticHigh => "Realistic High",
        /// Full ray tracing.
        Raytracing => "Raytracing",
        /// Non-photorealistic rendering.
        Npr => "NPR",
    }
}

option_set! {
    /// Non-DLSS supersampling quality.
    SupersamplingQuality, "Invalid Supersampling quality" {
        /// Supersampling disabled.
        Off => "Off",
        /// Low.
        Low => "Low",
        /// Medium.
        Medium => "Medium",
        /// High.
        High => "High",
        /// Ultra high.
        UltraHigh => "Ultra High",
    }
}

option_set! {
    /// DLSS quality mode.
    DlssQuality, "Invalid DLSS quality" {
        /// DLSS disabled.
        Off => "Off",
        /// Performance.
        Performance => "Performance",
        /// Balanced.
        Balanced => "Balanced",
        /// Quality.
        Quality => "Quality",
        /// Ultra performance.
        UltraPerformance => "Ultra Performance",
    }
}

option_set! {
    /// Where animation frames come from.
    AnimationType, "Invalid animation type" {
        /// An animation clip.
        Clip => "Clip",
        /// The scene timeline.
        Timeline => "Timeline",
    }
}

option_set! {
    /// What the worker does with the scene.
    JobType, "Invalid job type" {
        /// Render every job in the scene's render queue.
        RenderQueue => "Render Queue",
        /// Run one named sequence, or all sequences.
        Sequencer => "Sequencer",
        /// Render frames with the submitted settings.
        Render => "Render",
    }
}

impl SupersamplingQuality {
    /// Whether supersampling is requested at all.
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

impl DlssQuality {
    /// Whether DLSS is requested at all.
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/options.rs"]
mod tests;
