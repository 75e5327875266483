/// Data layer: core types, parsing, and rescaling.
///
/// Architecture:
/// ```text
///  .SSM / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  detect format, parse file → Spectrum (sorted samples)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize │  divide intensities by the peak → unit-peak samples
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ overlay   │  per-file batches with partial-failure reports
///   └──────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod overlay;
