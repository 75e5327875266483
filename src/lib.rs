//! Spectrum loading and rescaling for the SSM overlay viewer.
//!
//! The [`data`] modules are pure functions over file content; [`state`]
//! holds the load/plot/rescale/clear cycle the viewer drives.

pub mod data;
pub mod state;

pub use data::error::SpectrumError;
pub use data::loader::{load_file, parse_ssm, parse_xy_csv};
pub use data::model::{AxisRanges, LabeledSpectrum, Sample, Spectrum, SpectrumFormat};
pub use data::normalize::rescale_by_max;
pub use state::{Session, SessionError, ViewMode};
