//! The built-in part catalog.
//!
//! Each part type implements [`Part`](crate::Part); the free functions
//! alongside them build the raw [`Shape`](crate::Shape) geometry and can be
//! used directly. [`create`] resolves the kind strings used by assembly
//! definition files.

pub mod beams;
pub mod fasteners;
pub mod generic;
pub mod leadscrew;
pub mod motors;
pub mod profile;
pub mod rails;

pub use beams::{Beam2020, Beam4020, Beam4040};
pub use fasteners::{MetricBolt, MetricNut};
pub use generic::{DrilledPlate, RectangularPrism, Rhs, RingBearing, Shaft};
pub use leadscrew::{
    Bf10, Bk10, Ff10, Fk10, Sfu1204Nut, Sfu1204Screw, Sfu1204ScrewAssembly,
};
pub use motors::{Gt2Pulley, NemaMotor};
pub use rails::{
    Lm10uu, Lm12luu, Lm12uu, Mgn12Rail, Mgn12hSlider, Sbr12, Sbr12uu, Sc10uu, Sk12,
};

use crate::part::{Group, Part};

/// Instantiate a catalog part from its kind string.
///
/// Returns `None` for kinds the catalog does not know, which configuration
/// loaders should surface as a fatal error.
pub fn create(kind: &str) -> Option<Box<dyn Part>> {
    Some(match kind {
        "Group" => Box::new(Group),
        "RectangularPrism" => Box::new(RectangularPrism),
        "DrilledPlate" => Box::new(DrilledPlate),
        "RHS" => Box::new(Rhs),
        "Shaft" => Box::new(Shaft),
        "RingBearing" => Box::new(RingBearing),
        "Beam20x20" => Box::new(Beam2020),
        "Beam40x20" => Box::new(Beam4020),
        "Beam40x40" => Box::new(Beam4040),
        "SBR12" => Box::new(Sbr12),
        "SBR12UU" => Box::new(Sbr12uu),
        "SC10UU" => Box::new(Sc10uu),
        "LM12UU" => Box::new(Lm12uu),
        "LM12LUU" => Box::new(Lm12luu),
        "LM10UU" => Box::new(Lm10uu),
        "MGN12Rail" => Box::new(Mgn12Rail),
        "MGN12HSlider" => Box::new(Mgn12hSlider),
        "SK12" => Box::new(Sk12),
        "SFU1204Screw" => Box::new(Sfu1204Screw),
        "SFU1204Nut" => Box::new(Sfu1204Nut),
        "BK10" => Box::new(Bk10),
        "BF10" => Box::new(Bf10),
        "FK10" => Box::new(Fk10),
        "FF10" => Box::new(Ff10),
        "SFU1204ScrewAssembly" => Box::new(Sfu1204ScrewAssembly::new()),
        "MetricBolt" => Box::new(MetricBolt),
        "MetricNut" => Box::new(MetricNut),
        "NemaMotor" => Box::new(NemaMotor),
        "GT2Pulley" => Box::new(Gt2Pulley),
        _ => return None,
    })
}
