pub mod ids;
pub mod invitation;
pub mod guest;
pub mod table;
pub mod assignment;
pub mod seating;

// Re-exports for convenience
pub use ids::Id;
pub use invitation::Invitation;
pub use guest::{Guest, GuestDraft, GuestPatch};
pub use table::{Table, TableDraft, TablePatch};
pub use assignment::Assignment;
pub use seating::{CapacityStatus, DragPayload, TableWithGuests};
