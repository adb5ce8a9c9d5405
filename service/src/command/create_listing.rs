//! [`Command`] for creating a new [`Listing`].

use common::{operations::Insert, DateTime};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::listing::{Address, Area, Description, Price, Title};
use crate::{
    domain::{listing, Listing},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Listing`].
///
/// The ID and both timestamps of the new [`Listing`] are assigned here and
/// are never taken from the caller.
#[derive(Clone, Debug)]
pub struct CreateListing {
    /// [`Title`] of a new [`Listing`].
    pub title: listing::Title,

    /// [`Description`] of a new [`Listing`].
    pub description: listing::Description,

    /// [`Price`] of a new [`Listing`].
    pub price: listing::Price,

    /// [`Area`] of a new [`Listing`].
    pub area: listing::Area,

    /// [`Address`] of a new [`Listing`].
    pub address: listing::Address,

    /// Indicator whether a new [`Listing`] is available.
    pub available: bool,
}

impl<Db> Command<CreateListing> for Service<Db>
where
    Db: Database<Insert<Listing>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Listing;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateListing,
    ) -> Result<Self::Ok, Self::Err> {
        let CreateListing {
            title,
            description,
            price,
            area,
            address,
            available,
        } = cmd;

        let now = DateTime::now();
        let listing = Listing {
            id: listing::Id::new(),
            title,
            description,
            price,
            area,
            address,
            available,
            created_at: now.coerce(),
            updated_at: now.coerce(),
        };

        tracing::info!(id = %listing.id, "creating `Listing`");

        self.database()
            .execute(Insert(listing.clone()))
            .await
            .map_err(tracerr::wrap!())?;

        Ok(listing)
    }
}

/// Error of [`CreateListing`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use common::{
        money::Currency,
        operations::{By, Select},
        Money,
    };

    use crate::{
        domain::{listing, Listing},
        infra::InMemory,
        Command as _, Service,
    };

    use super::CreateListing;

    fn command() -> CreateListing {
        CreateListing {
            title: listing::Title::new("Departamento Centro").unwrap(),
            description: listing::Description::new(
                "Hermoso departamento en el centro",
            )
            .unwrap(),
            price: listing::Price::new(Money {
                amount: "150000".parse().unwrap(),
                currency: Currency::Usd,
            })
            .unwrap(),
            area: listing::Area::new("75.5".parse().unwrap()).unwrap(),
            address: listing::Address::new("Calle Principal 123").unwrap(),
            available: true,
        }
    }

    #[tokio::test]
    async fn persists_and_returns_created_listing() {
        let service = Service::new(InMemory::new());

        let created = service.execute(command()).await.unwrap();

        let stored = service
            .database()
            .execute(Select(By::<Option<Listing>, _>::new(created.id)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id, created.id);
        assert_eq!(stored.title, created.title);
        assert_eq!(stored.created_at, created.created_at);
        assert_eq!(stored.updated_at, created.updated_at);
    }

    #[tokio::test]
    async fn assigns_distinct_ids() {
        let service = Service::new(InMemory::new());

        let first = service.execute(command()).await.unwrap();
        let second = service.execute(command()).await.unwrap();

        assert_ne!(first.id, second.id);
    }
}
