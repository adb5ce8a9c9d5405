//! [`Command`] definition.

pub mod create_listing;
pub mod update_listing;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_listing::CreateListing, update_listing::UpdateListing,
};
