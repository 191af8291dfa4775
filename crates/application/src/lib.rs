//! Application services and ports.

#![forbid(unsafe_code)]

mod audit_ports;
mod authorization_service;
mod catalog_ports;
mod record_validator;
mod time_entry_ports;
mod time_entry_service;

#[cfg(test)]
mod test_support;

pub use audit_ports::{AuditEvent, AuditRepository};
pub use authorization_service::AuthorizationService;
pub use catalog_ports::ProjectCatalog;
pub use record_validator::RecordValidator;
pub use time_entry_ports::{
    LogTimeInput, TimeEntryListQuery, TimeEntryRepository, UpdateTimeEntryInput,
};
pub use time_entry_service::TimeEntryService;
