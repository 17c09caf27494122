//! [`Receipt`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{receipt, Receipt},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read,
};

impl<C> Database<Select<By<Option<Receipt>, receipt::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Receipt>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Receipt>, receipt::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: receipt::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, created_by, message_sent, \
                   client_name, phone, address, \
                   bank_name, branch, payment_mode, \
                   caption, \
                   created_at, updated_at \
            FROM receipts \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| Receipt {
                id: row.get("id"),
                created_by: row.get("created_by"),
                message_sent: row.get("message_sent"),
                client_name: row.get("client_name"),
                phone: row.get("phone"),
                address: row.get("address"),
                bank_name: row.get("bank_name"),
                branch: row.get("branch"),
                payment_mode: row.get("payment_mode"),
                caption: row.get("caption"),
                created_at: row.get("created_at"),
                updated_at: row.get("updated_at"),
            }))
    }
}

impl<C> Database<Insert<Receipt>> for Postgres<C>
where
    C: Connection,
    Self: Database<Update<Receipt>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(receipt): Insert<Receipt>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(receipt)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Receipt>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(receipt): Update<Receipt>,
    ) -> Result<Self::Ok, Self::Err> {
        let Receipt {
            id,
            created_by,
            message_sent,
            client_name,
            phone,
            address,
            bank_name,
            branch,
            payment_mode,
            caption,
            created_at,
            updated_at,
        } = receipt;

        const SQL: &str = "\
            INSERT INTO receipts (\
                id, created_by, message_sent, \
                client_name, phone, address, \
                bank_name, branch, payment_mode, \
                caption, \
                created_at, updated_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::BOOL, \
                $4::VARCHAR, $5::VARCHAR, $6::TEXT, \
                $7::VARCHAR, $8::VARCHAR, $9::INT2, \
                $10::VARCHAR, \
                $11::TIMESTAMPTZ, $12::TIMESTAMPTZ\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET message_sent = EXCLUDED.message_sent, \
                client_name = EXCLUDED.client_name, \
                phone = EXCLUDED.phone, \
                address = EXCLUDED.address, \
                bank_name = EXCLUDED.bank_name, \
                branch = EXCLUDED.branch, \
                payment_mode = EXCLUDED.payment_mode, \
                caption = EXCLUDED.caption, \
                updated_at = EXCLUDED.updated_at";
        self.exec(
            SQL,
            &[
                &id,
                &created_by,
                &message_sent,
                &client_name,
                &phone,
                &address,
                &bank_name,
                &branch,
                &payment_mode,
                &caption,
                &created_at,
                &updated_at,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<read::receipt::TotalAmount, receipt::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = read::receipt::TotalAmount;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::receipt::TotalAmount, receipt::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: receipt::Id = by.into_inner();

        const SQL: &str = "\
            SELECT COALESCE(SUM(amount_charged), 0)::NUMERIC \
            FROM placements \
            WHERE receipt_id = $1::UUID";
        self.query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(|row| {
                row.map(|r| read::receipt::TotalAmount(r.get(0)))
                    .unwrap_or_default()
            })
    }
}
