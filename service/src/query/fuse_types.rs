//! [`FuseTypes`] definition.

use common::operations::{By, Select};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::circuit::FuseType;
use crate::{
    domain::circuit::PhaseKind,
    infra::{database, Database},
    read::component::FuseLadder,
    Query, Service,
};

/// [`Query`] of the [`FuseType`]s offered for circuits.
///
/// Falls back to the built-in [`FuseLadder`] of a [`PhaseKind`] having no
/// [`FuseType`]s stored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FuseTypes {
    /// [`PhaseKind`] to query the [`FuseLadder`] of.
    ///
    /// [`None`] means all of them.
    pub kind: Option<PhaseKind>,
}

impl<Db> Query<FuseTypes> for Service<Db>
where
    Db: Database<
        Select<By<Vec<FuseLadder>, ()>>,
        Ok = Vec<FuseLadder>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Vec<FuseLadder>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        FuseTypes { kind }: FuseTypes,
    ) -> Result<Self::Ok, Self::Err> {
        let mut stored = self
            .database()
            .execute(Select(By::new(())))
            .await
            .map_err(tracerr::wrap!())?;
        stored.retain(|l| !l.fuse_types.is_empty());

        let kinds = kind.map_or_else(|| PhaseKind::ALL.to_vec(), |k| vec![k]);
        Ok(kinds
            .into_iter()
            .map(|k| {
                stored
                    .iter()
                    .find(|l| l.kind == k)
                    .cloned()
                    .unwrap_or_else(|| FuseLadder::builtin(k))
            })
            .collect())
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::circuit::{FuseType, PhaseKind},
        infra::database::mock::MockDatabase,
        read::component::FuseLadder,
    };

    use super::{FuseTypes, Query as _};

    #[tokio::test]
    async fn falls_back_to_builtin_ladder() {
        let (svc, _) = MockDatabase::service_with_offer();
        svc.database().set_fuse_ladders(vec![FuseLadder {
            kind: PhaseKind::Three,
            fuse_types: vec![FuseType::new(25).unwrap()],
        }]);

        let all = svc.execute(FuseTypes::default()).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[0], FuseLadder::builtin(PhaseKind::Single));
        assert_eq!(all[1].fuse_types, [FuseType::new(25).unwrap()]);

        let single = svc
            .execute(FuseTypes {
                kind: Some(PhaseKind::Single),
            })
            .await
            .unwrap();
        assert_eq!(single, [FuseLadder::builtin(PhaseKind::Single)]);
    }
}
