pub mod error;
pub mod field;
pub mod page;
pub mod record;

// Common type aliases
pub type PageNumber = u64;

// Storage limits
pub const PAGE_SIZE: usize = 10; // records per page
pub const MAX_FIELDS: usize = 10; // (name, type) pairs per schema
pub const MAX_TYPE_NAME_LENGTH: usize = 12;
pub const MAX_FIELD_NAME_LENGTH: usize = 20;
