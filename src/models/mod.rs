//! Documents, display shapes and DTOs for all domain entities.

pub mod customer;
pub mod invoice;
pub mod money;
pub mod pagination;
pub mod revenue;
pub mod user;
