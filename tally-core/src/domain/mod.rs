//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation logic - no I/O.

pub mod balance;
pub mod document;
mod note;
pub mod profit;
pub mod result;
mod todo;
mod user;

pub use balance::{Account, DEFAULT_OPENING_BALANCE};
pub use document::{Document, JsonKeyStyle};
pub use note::Note;
pub use profit::{Financials, ProfitInputs};
pub use todo::{Todo, TODO_FILE_NAME};
pub use user::{Admin, User};
