//! # polylog-symbols
//!
//! Concrete generator families parameterizing the linear-combination engine:
//!
//! - [`delta`]: differences of extended points, the basic symbol alphabet
//! - [`gamma`]: Grassmannian minors (Plücker coordinates)
//! - [`epsilon`]: variable products and their complements, plus `Li` formal
//!   symbols
//! - [`theta`]: mixed difference/complement factors, plus `Lira` formal
//!   symbols
//!
//! Each family is a thin parameterization of `polylog_linear::Linear`; the
//! coalgebra operators from `polylog-coalgebra` apply to all of them.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod convert;
pub mod delta;
pub mod epsilon;
pub mod gamma;
pub mod theta;
pub mod x;

pub use convert::ConvertError;
pub use delta::{Delta, DeltaExpr, DeltaICoExpr, DeltaNCoExpr};
pub use epsilon::{Epsilon, EpsilonExpr, EpsilonICoExpr, EpsilonPack, LiParam};
pub use gamma::{Gamma, GammaACoExpr, GammaExpr, GammaICoExpr, GammaNCoExpr};
pub use theta::{CompoundRatio, LiraParam, Theta, ThetaExpr, ThetaICoExpr, ThetaPack};
pub use x::X;
