//! [`PublicationDate`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{placement, PublicationDate},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

impl<C> Database<Select<By<Vec<PublicationDate>, placement::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<PublicationDate>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<PublicationDate>, placement::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let placement_id: placement::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, placement_id, date \
            FROM publication_dates \
            WHERE placement_id = $1::UUID \
            ORDER BY date ASC";
        Ok(self
            .query(SQL, &[&placement_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| PublicationDate {
                id: row.get("id"),
                placement_id: row.get("placement_id"),
                date: row.get("date"),
            })
            .collect())
    }
}

impl<C> Database<Insert<PublicationDate>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(publication): Insert<PublicationDate>,
    ) -> Result<Self::Ok, Self::Err> {
        let PublicationDate {
            id,
            placement_id,
            date,
        } = publication;

        const SQL: &str = "\
            INSERT INTO publication_dates (id, placement_id, date) \
            VALUES ($1::UUID, $2::UUID, $3::DATE)";
        self.exec(SQL, &[&id, &placement_id, &date])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}
