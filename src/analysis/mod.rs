/// Risk analysis for a selected location.
///
/// Everything here is pure apart from the single elevation lookup that
/// `assessment::assess` performs through an injected `ElevationSource`.
///
/// Submodules:
/// - `thresholds`: elevation to flood-risk classification.
/// - `exposure`: seeded synthetic nearby-property sampler.
/// - `assessment`: one full assessment pass over all of the above.

pub mod assessment;
pub mod exposure;
pub mod thresholds;
