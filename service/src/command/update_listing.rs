//! [`Command`] for updating an existing [`Listing`].

use common::{
    operations::{By, Select, Update},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{Address, Area, Description, Price, Title};
use crate::{
    domain::{listing, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`Listing`].
///
/// Replaces all the mutable fields of the [`Listing`], preserving its ID
/// and creation [`DateTime`], and refreshing its update [`DateTime`].
#[derive(Clone, Debug)]
pub struct UpdateListing {
    /// ID of the [`Listing`] to update.
    pub id: listing::Id,

    /// New [`Title`] of the [`Listing`].
    pub title: listing::Title,

    /// New [`Description`] of the [`Listing`].
    pub description: listing::Description,

    /// New [`Price`] of the [`Listing`].
    pub price: listing::Price,

    /// New [`Area`] of the [`Listing`].
    pub area: listing::Area,

    /// New [`Address`] of the [`Listing`].
    pub address: listing::Address,

    /// New availability indicator of the [`Listing`].
    pub available: bool,
}

impl<Db> Command<UpdateListing> for Service<Db>
where
    Db: Database<
            Select<By<Option<Listing>, listing::Id>>,
            Ok = Option<Listing>,
            Err = Traced<database::Error>,
        > + Database<Update<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateListing,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateListing {
            id,
            title,
            description,
            price,
            area,
            address,
            available,
        } = cmd;

        // Not-found aborts before any write happens.
        let mut listing = self
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ListingNotExists(id))
            .map_err(tracerr::wrap!())?;

        listing.title = title;
        listing.description = description;
        listing.price = price;
        listing.area = area;
        listing.address = address;
        listing.available = available;
        listing.updated_at = DateTime::now().coerce();

        tracing::info!(id = %listing.id, "updating `Listing`");

        self.database()
            .execute(Update(listing.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(listing)
    }
}

/// Error of [`UpdateListing`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Listing`] doesn't exist.
    #[display("`Listing(id: {_0})` does not exist")]
    #[from(ignore)]
    ListingNotExists(#[error(not(source))] listing::Id),
}
