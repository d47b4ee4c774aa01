pub mod frames;
pub mod mode;
pub mod provider;
pub mod viewport;
