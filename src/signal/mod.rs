//! Signal-processing primitives for motion channels.

pub mod lowpass;
pub mod peaks;

pub use lowpass::LowPassFilter;
pub use peaks::find_local_maxima;
