//! Domain model (IDs, records, statuses, form input, errors).

pub mod errors;
pub mod ids;
pub mod input;
pub mod project;
pub mod status;

pub use errors::{TrackerError, ValidationError};
pub use ids::{Id, IdMarker, ProjectId};
pub use input::{ProjectInput, ValidProject, ValidationRules};
pub use project::{ProjectRecord, people_label};
pub use status::ProjectStatus;
