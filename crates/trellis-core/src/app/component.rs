//! Component - the capability every view implements.

use crate::domain::TrackerError;
use crate::ports::InsertPosition;

/// Views compose this instead of inheriting from a base view.
///
/// Construction runs the three steps in order: `attach`, `configure`,
/// `render_content`.
pub trait Component {
    /// Instantiates the view's template and inserts it into its host.
    fn attach(&self, at: InsertPosition) -> Result<(), TrackerError>;

    /// Wires callbacks (store listeners, drag handlers).
    fn configure(&self) {}

    /// Fills in the static text of the inserted element.
    fn render_content(&self) -> Result<(), TrackerError>;
}
