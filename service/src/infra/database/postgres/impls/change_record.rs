//! [`ChangeRecord`]-related [`Database`] and [`AuditLog`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{placement, ChangeRecord},
    infra::{
        audit,
        database::{self, postgres::Connection, Postgres},
        AuditLog, Database,
    },
};

impl<C> AuditLog<Insert<ChangeRecord>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<audit::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<ChangeRecord>,
    ) -> Result<Self::Ok, Self::Err> {
        let ChangeRecord {
            id,
            receipt_id,
            placement_id,
            subject,
            field,
            message,
            user_id,
            created_at,
        } = record;

        const SQL: &str = "\
            INSERT INTO change_records (\
                id, receipt_id, placement_id, \
                subject, field, message, \
                user_id, created_at\
            ) \
            VALUES (\
                $1::UUID, $2::UUID, $3::UUID, \
                $4::VARCHAR, $5::INT2, $6::TEXT, \
                $7::UUID, $8::TIMESTAMPTZ\
            )";
        self.exec(
            SQL,
            &[
                &id,
                &receipt_id,
                &placement_id,
                &subject,
                &field,
                &message,
                &user_id,
                &created_at,
            ],
        )
        .await
        .map_err(tracerr::map_from_and_wrap!(=> audit::Error))
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<ChangeRecord>, placement::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<ChangeRecord>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<ChangeRecord>, placement::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let placement_id: placement::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id, receipt_id, placement_id, \
                   subject, field, message, \
                   user_id, created_at \
            FROM change_records \
            WHERE placement_id = $1::UUID \
            ORDER BY created_at ASC, field ASC";
        Ok(self
            .query(SQL, &[&placement_id])
            .await
            .map_err(tracerr::wrap!())?
            .into_iter()
            .map(|row| ChangeRecord {
                id: row.get("id"),
                receipt_id: row.get("receipt_id"),
                placement_id: row.get("placement_id"),
                subject: row.get("subject"),
                field: row.get("field"),
                message: row.get("message"),
                user_id: row.get("user_id"),
                created_at: row.get("created_at"),
            })
            .collect())
    }
}
