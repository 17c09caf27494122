//! [`Query`] of the change history of a [`Placement`].

use common::operations::By;

use crate::domain::{placement, ChangeRecord};
#[cfg(doc)]
use crate::{domain::Placement, Query};

use super::DatabaseQuery;

/// Queries all the [`ChangeRecord`]s of a [`Placement`], oldest first.
pub type ByPlacement = DatabaseQuery<By<Vec<ChangeRecord>, placement::Id>>;

#[cfg(test)]
mod spec {
    use crate::{
        command::SavePlacement,
        domain::{placement, user},
        infra::{cache, database::fake::InMemory},
        Command as _, Config, Query as _, Service,
    };

    use super::ByPlacement;

    #[tokio::test]
    async fn lists_change_history() {
        let svc = Service::new(
            Config::default(),
            InMemory::default(),
            cache::Memory::default(),
        );
        let receipt = svc.database().seed_receipt();
        let cmd = |rate, placement_id| SavePlacement {
            placement_id,
            receipt_id: receipt.id,
            paper: placement::PaperName::new("Dainik Navjyoti").unwrap(),
            caption: placement::Caption::new("Classified").unwrap(),
            edition: placement::Edition::new("Kota").unwrap(),
            rate: placement::Rate::new(rate).unwrap(),
            extra_units: None,
            extra_unit_cost: None,
            acting_user: user::Id::new(),
        };
        let id = svc.execute(cmd(300, None)).await.unwrap().placement.id;
        drop(svc.execute(cmd(350, Some(id))).await.unwrap());
        drop(svc.execute(cmd(400, Some(id))).await.unwrap());

        let history = svc.execute(ByPlacement::by(id)).await.unwrap();

        assert_eq!(
            history
                .iter()
                .map(|r| r.message.to_string())
                .collect::<Vec<_>>(),
            [
                "Previous rate: 300 | Current rate: 350",
                "Previous rate: 350 | Current rate: 400",
            ],
        );
        assert!(history
            .iter()
            .all(|r| r.subject.to_string() == "Dainik Navjyoti"));
    }
}
