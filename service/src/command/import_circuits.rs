//! [`Command`] for importing circuits of an [`Offer`] from CSV.

use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        circuit::csv::{self, Imported},
        offer, Offer,
    },
    Service,
};

use super::{
    edit_circuits::{self, Action},
    Command, EditCircuits,
};

/// [`Command`] for importing circuits of an [`Offer`] from CSV.
///
/// Imported circuits are appended to the existing ones. A file rejected as a
/// whole leaves the [`Offer`] untouched.
#[derive(Clone, Debug)]
pub struct ImportCircuits {
    /// ID of the [`Offer`] to import circuits into.
    pub offer_id: offer::Id,

    /// Content of the CSV file.
    pub csv: String,
}

impl<Db> Command<ImportCircuits> for Service<Db>
where
    Self: Command<
        EditCircuits,
        Ok = Offer,
        Err = Traced<edit_circuits::ExecutionError>,
    >,
{
    type Ok = (Offer, Imported);
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ImportCircuits,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ImportCircuits { offer_id, csv } = cmd;

        let imported =
            csv::import(&csv).map_err(tracerr::from_and_wrap!(=> E))?;
        if imported.skipped > 0 {
            log::warn!(
                "skipped {} malformed CSV rows for `Offer(id: {offer_id})`",
                imported.skipped,
            );
        }

        let offer = self
            .execute(EditCircuits {
                offer_id,
                action: Action::Append(imported.circuits.clone()),
            })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok((offer, imported))
    }
}

/// Error of [`ImportCircuits`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// CSV file is rejected as a whole.
    #[display("{_0}")]
    Csv(csv::Error),

    /// Failed to append the imported circuits.
    #[display("{_0}")]
    Edit(edit_circuits::ExecutionError),
}

#[cfg(test)]
mod spec {
    use crate::infra::database::mock::MockDatabase;

    use super::{Command as _, ExecutionError, ImportCircuits};

    const CSV: &str = "\
        Nr;Opis obwodu;Ilość gniazd/włączników;Strefa;Napięcie;Przewód;\
        Długość [m];Moc [kW];Typ bezpiecznika;Faza;Typ\r\n\
        1;Oświetlenie salonu;6;Parter;230;YDYpżo 3x1,5;12;0,3;10A;L1;1φ\r\n\
        2;Piekarnik;1;Parter;400;YDYpżo 5x2,5;8;3,5;16A;3Φ;3φ\r\n\
        3;Zepsuty;1\r\n";

    #[tokio::test]
    async fn appends_imported_circuits() {
        let (svc, offer) = MockDatabase::service_with_offer();

        let (offer, imported) = svc
            .execute(ImportCircuits {
                offer_id: offer.id,
                csv: CSV.into(),
            })
            .await
            .unwrap();

        assert_eq!(imported.skipped, 1);
        assert_eq!(imported.message(), "Zaimportowano 2 obwodów.");
        assert_eq!(offer.circuits.len(), 2);
        assert_eq!(offer.required_components.as_slice().len(), 2);
    }

    #[tokio::test]
    async fn rejects_empty_file_without_changes() {
        let (svc, offer) = MockDatabase::service_with_offer();

        let err = svc
            .execute(ImportCircuits {
                offer_id: offer.id,
                csv: String::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Csv(_)));
        assert!(svc.database().offer(offer.id).unwrap().circuits.is_empty());
    }
}
