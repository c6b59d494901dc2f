//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on one flow.

mod bank;
pub mod logging;
mod notes;
mod profit;

pub use bank::{BalanceResult, BankService, Operation};
pub use logging::{EntryPoint, LogEntry, LogSummary, LoggingService, Outcome};
pub use notes::{DocumentSummary, NoteService, SavedDocument};
pub use profit::{ProfitService, RESULTS_FILE};
