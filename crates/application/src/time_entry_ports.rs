mod inputs;
mod repository;

pub use inputs::{LogTimeInput, TimeEntryListQuery, UpdateTimeEntryInput};
pub use repository::TimeEntryRepository;
