pub mod effects;
pub mod overlay;
pub mod teardrop;
#[cfg(feature = "vectors")]
pub mod vector;
