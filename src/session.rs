/// Interaction state for one user session.
///
/// The only mutable state in the tool is the currently selected location.
/// It lives here, owned by the shell, and is passed by value into each core
/// call; nothing in `analysis`, `zones`, or `stations` holds state.

use crate::logging::{self, Component};
use crate::model::{Coordinate, INDIA_CENTER};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    selected: Coordinate,
}

impl Default for Session {
    fn default() -> Self {
        Self { selected: INDIA_CENTER }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Coordinate {
        self.selected
    }

    /// Replaces the selection with `(latitude, longitude)`, clamped to the
    /// India input box and rounded to six decimals. Returns the stored value.
    ///
    /// NaN on either axis cannot be clamped; the update is ignored and the
    /// previous selection kept.
    pub fn update_location(&mut self, latitude: f64, longitude: f64) -> Coordinate {
        if latitude.is_nan() || longitude.is_nan() {
            logging::warn(Component::System, None, "Ignoring location update with NaN coordinate");
            return self.selected;
        }

        let requested = Coordinate::new(latitude, longitude);
        let clamped = requested.clamped_to_india();

        if !requested.is_within_india() {
            logging::warn(
                Component::System,
                None,
                &format!("Location {} outside India input box, clamped to {}", requested, clamped),
            );
        }

        self.selected = clamped;
        clamped
    }
}
