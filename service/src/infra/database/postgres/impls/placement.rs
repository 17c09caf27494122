//! [`Placement`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{
        placement::{self, Charge, Extra},
        receipt, Placement,
    },
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Columns of a [`Placement`] row.
const COLUMNS: &str = "\
    id, receipt_id, \
    name, caption, edition, \
    rate, extra_units, extra_unit_cost, \
    amount_charged, amount_charged_in_words, \
    created_at, updated_at";

/// Reads a [`Placement`] out of the provided [`Row`] of [`COLUMNS`].
fn from_row(row: &Row) -> Placement {
    let extra = row
        .get::<_, Option<placement::ExtraUnits>>("extra_units")
        .zip(row.get("extra_unit_cost"))
        .map(|(units, unit_cost)| Extra { units, unit_cost });
    Placement {
        id: row.get("id"),
        receipt_id: row.get("receipt_id"),
        paper: row.get("name"),
        caption: row.get("caption"),
        edition: row.get("edition"),
        rate: row.get("rate"),
        extra,
        charge: Charge {
            amount: row.get("amount_charged"),
            in_words: row.get("amount_charged_in_words"),
        },
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl<C> Database<Select<By<Option<Placement>, placement::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Placement>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Placement>, placement::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: placement::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM placements \
             WHERE id = $1::UUID",
        );
        Ok(self
            .query_opt(&sql, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(from_row))
    }
}

impl<C> Database<Select<By<Vec<Placement>, receipt::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Placement>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Placement>, receipt::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let receipt_id: receipt::Id = by.into_inner();

        let sql = format!(
            "SELECT {COLUMNS} \
             FROM placements \
             WHERE receipt_id = $1::UUID \
             ORDER BY created_at ASC, id ASC",
        );
        Ok(self
            .query(&sql, &[&receipt_id])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(from_row)
            .collect())
    }
}

impl<C> Database<Insert<Placement>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Placement>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(placement): Insert<Placement>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(placement))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Placement>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(placement): Update<Placement>,
    ) -> Result<Self::Ok, Self::Err> {
        let extra_units = placement.extra_units();
        let extra_unit_cost = placement.extra_unit_cost();
        let Placement {
            id,
            receipt_id,
            paper,
            caption,
            edition,
            rate,
            extra: _,
            charge: Charge { amount, in_words },
            created_at,
            updated_at,
        } = placement;

        const SQL: &str = "\
            INSERT INTO placements (\
                id, receipt_id, \
                name, caption, edition, \
                rate, extra_units, extra_unit_cost, \
                amount_charged, amount_charged_in_words, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, \
                $3::VARCHAR, $4::VARCHAR, $5::VARCHAR, \
                $6::INT4, $7::INT4, $8::INT4, \
                $9::NUMERIC, $10::TEXT, \
                $11::TIMESTAMPTZ, $12::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                caption = EXCLUDED.caption, \
                edition = EXCLUDED.edition, \
                rate = EXCLUDED.rate, \
                extra_units = EXCLUDED.extra_units, \
                extra_unit_cost = EXCLUDED.extra_unit_cost, \
                amount_charged = EXCLUDED.amount_charged, \
                amount_charged_in_words = EXCLUDED.amount_charged_in_words, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &receipt_id,
                &paper,
                &caption,
                &edition,
                &rate,
                &extra_units,
                &extra_unit_cost,
                &amount,
                &in_words,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
