//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_audit_repository;
mod in_memory_project_catalog;
mod in_memory_time_entry_repository;

pub use in_memory_audit_repository::InMemoryAuditRepository;
pub use in_memory_project_catalog::InMemoryProjectCatalog;
pub use in_memory_time_entry_repository::InMemoryTimeEntryRepository;
