/// External data clients.
///
/// Submodules:
/// - `elevation`: Open-Elevation lookups behind the `ElevationSource` trait.

pub mod elevation;
