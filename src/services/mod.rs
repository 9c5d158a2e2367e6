//! Query, formatting and seeding services.

pub mod customer;
pub mod dashboard;
pub mod invoice;
pub mod password;
pub mod pipeline;
pub mod seed;
