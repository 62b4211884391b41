//! Repository traits decoupling the domain from the storage backend.

pub mod click_repository;
pub mod link_repository;

pub use click_repository::{ClickFilter, ClickRepository};
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
