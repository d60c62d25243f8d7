//! View-model logic behind the console's screens: list snapshots with their
//! client-side filters, and the form submission flows.

pub mod achievements;
pub mod students;
pub mod themes;

/// Create vs. edit, decided once at the call site and dispatched through two
/// distinct operations. Creates never carry an id; updates are scoped by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveCommand<Id> {
    Create,
    Update(Id),
}
