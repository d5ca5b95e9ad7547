//! Catalog shapes consumed from the catalog/package collaborators.
//!
//! The engine does not own rooms or packages; it only reads them. Display
//! metadata beyond what selection and pricing need is ignored at this
//! boundary.

pub mod package;
pub mod room;

pub use package::Package;
pub use room::Room;
