//! In-memory [`Database`] implementation.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use common::operations::{By, Insert, Select, Update};
use derive_more::{Display, Error as StdError};
use tracerr::Traced;

use crate::{
    domain::{listing, Listing},
    infra::{database, Database},
    read::Predicate,
};

/// [`Database`] keeping all the [`Listing`]s in process memory.
///
/// [`Listing`]s are returned in their insertion order. Concurrent
/// operations are serialized by the inner lock, the last write wins.
#[derive(Clone, Debug, Default)]
pub struct InMemory {
    /// Stored [`Listing`]s.
    listings: Arc<RwLock<Vec<Listing>>>,
}

impl InMemory {
    /// Creates a new empty [`InMemory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the shared lock over the stored [`Listing`]s.
    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Listing>>, Error> {
        self.listings.read().map_err(Error::from)
    }

    /// Acquires the exclusive lock over the stored [`Listing`]s.
    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Listing>>, Error> {
        self.listings.write().map_err(Error::from)
    }
}

/// [`InMemory`] database error.
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Inner lock was poisoned by a panicked holder.
    #[display("`InMemory` lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for Error {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

impl Database<Insert<Listing>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(listing): Insert<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write()
            .map_err(tracerr::from_and_wrap!(=> database::Error))?
            .push(listing);
        Ok(())
    }
}

impl Database<Update<Listing>> for InMemory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(listing): Update<Listing>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut listings = self
            .write()
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;

        if let Some(stored) =
            listings.iter_mut().find(|l| l.id == listing.id)
        {
            *stored = listing;
        } else {
            listings.push(listing);
        }
        Ok(())
    }
}

impl Database<Select<By<Option<Listing>, listing::Id>>> for InMemory {
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, listing::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .read()
            .map_err(tracerr::from_and_wrap!(=> database::Error))?
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }
}

impl Database<Select<By<Vec<Listing>, ()>>> for InMemory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<Listing>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        Ok(self
            .read()
            .map_err(tracerr::from_and_wrap!(=> database::Error))?
            .clone())
    }
}

impl Database<Select<By<Vec<Listing>, Predicate>>> for InMemory {
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Predicate>>,
    ) -> Result<Self::Ok, Self::Err> {
        let predicate = by.into_inner();
        Ok(self
            .read()
            .map_err(tracerr::from_and_wrap!(=> database::Error))?
            .iter()
            .filter(|l| predicate.matches(l))
            .cloned()
            .collect())
    }
}
