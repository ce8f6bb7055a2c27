//! CSV codec of [`Circuit`]s.
//!
//! Files are `;`-separated, UTF-8, with a header of exactly [`COLUMNS`]
//! columns and one [`Circuit`] per row.

use std::str::FromStr;

use common::DateTime;
use derive_more::{Display, Error as StdError};
use rust_decimal::Decimal;
use tracing as log;

use super::{
    Cable, Circuit, Description, FuseType, Id, Length, Number, Phase,
    PhaseKind, Power, SocketSwitchCount, Voltage, Zone,
};

/// Header row of an exported file.
pub const COLUMNS: [&str; 11] = [
    "Nr",
    "Opis obwodu",
    "Ilość gniazd/włączników",
    "Strefa",
    "Napięcie",
    "Przewód",
    "Długość [m]",
    "Moc [kW]",
    "Typ bezpiecznika",
    "Faza",
    "Typ",
];

/// Encodes the provided [`Circuit`]s, in their given order.
#[must_use]
pub fn export<'c>(circuits: impl IntoIterator<Item = &'c Circuit>) -> String {
    let mut rows = vec![COLUMNS.join(";")];
    rows.extend(circuits.into_iter().map(|c| {
        [
            c.number.to_string(),
            c.description.to_string(),
            c.socket_switch_count.to_string(),
            c.zone.to_string(),
            c.voltage.to_string(),
            c.cable.to_string(),
            Decimal::from(c.length).normalize().to_string(),
            c.power.kilowatts().normalize().to_string(),
            c.fuse_type.to_string(),
            c.phase.to_string(),
            c.kind().symbol().to_owned(),
        ]
        .iter()
        .map(|v| escape(v))
        .collect::<Vec<_>>()
        .join(";")
    }));
    rows.join("\r\n")
}

/// Returns the name of a file exported at the provided moment.
#[must_use]
pub fn file_name(at: DateTime) -> String {
    format!("kalkulacja_obwodow_{}.csv", at.date_stamp())
}

/// Quotes the provided value if it contains a separator, a quote or a line
/// break.
fn escape(value: &str) -> String {
    if value.contains([';', ',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

/// Decodes [`Circuit`]s out of the provided file contents.
///
/// Returned [`Circuit`]s have no meaningful [`Id`]s yet.
///
/// # Errors
///
/// If the file is empty or its header doesn't have exactly [`COLUMNS`]
/// columns.
pub fn import(text: &str) -> Result<Imported, Error> {
    let text = text.trim_start_matches('\u{feff}');
    let header = text
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or(Error::Empty)?;
    let delimiter = if header.contains(';') { b';' } else { b',' };

    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut records = reader.records().filter(|r| {
        r.as_ref().map_or(true, |r| r.iter().any(|f| !f.is_empty()))
    });

    match records.next() {
        Some(Ok(h)) if h.len() == COLUMNS.len() => {}
        Some(Ok(h)) => return Err(Error::InvalidHeader(h.len())),
        Some(Err(_)) | None => return Err(Error::InvalidHeader(0)),
    }

    let mut imported = Imported::default();
    for (line, record) in records.enumerate() {
        let line = line + 2;
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                log::warn!("skipped CSV row {line}: {e}");
                imported.skipped += 1;
                continue;
            }
        };
        if record.len() != COLUMNS.len() {
            log::warn!(
                "skipped CSV row {line}: {} columns instead of {}",
                record.len(),
                COLUMNS.len(),
            );
            imported.skipped += 1;
            continue;
        }

        let position = u32::try_from(imported.circuits.len() + 1)
            .unwrap_or(u32::MAX);
        match Row(&record).circuit(position) {
            Ok(Some(c)) => imported.circuits.push(c),
            Ok(None) => {}
            Err(reason) => {
                log::warn!("skipped CSV row {line}: {reason}");
                imported.skipped += 1;
            }
        }
    }
    Ok(imported)
}

/// Single data row of an imported file.
struct Row<'r>(&'r ::csv::StringRecord);

impl Row<'_> {
    /// Returns the trimmed field at the provided column.
    fn field(&self, column: usize) -> &str {
        self.0.get(column).unwrap_or_default().trim()
    }

    /// Parses the field at the provided column, falling back to `default` if
    /// it's unparsable.
    fn parsed<T: FromStr>(&self, column: usize, default: T) -> T {
        self.field(column).parse().unwrap_or(default)
    }

    /// Parses the decimal field at the provided column, accepting both `.`
    /// and `,` as the decimal separator.
    fn decimal(&self, column: usize) -> Option<Decimal> {
        Decimal::from_str(&self.field(column).replace(',', ".")).ok()
    }

    /// Builds a [`Circuit`] out of this [`Row`], if it has a description.
    ///
    /// # Errors
    ///
    /// If the description is longer than [`Description::MAX_LEN`].
    fn circuit(&self, position: u32) -> Result<Option<Circuit>, String> {
        let Some(description) = Description::new(self.field(1)) else {
            return Err(format!(
                "description is longer than {} characters",
                Description::MAX_LEN,
            ));
        };
        if description.is_empty() {
            return Ok(None);
        }

        let number = self
            .field(0)
            .parse::<u32>()
            .map_or(Number::from(position), Number::from);
        let phase = self.field(9).parse::<Phase>().unwrap_or_else(|_| {
            match PhaseKind::from_symbol(self.field(10)) {
                Some(PhaseKind::Three) => Phase::ThreePhase,
                Some(PhaseKind::Single) | None => Phase::default(),
            }
        });

        Ok(Some(Circuit {
            id: Id::default(),
            number,
            description,
            socket_switch_count: Some(self.parsed::<u32>(2, 0))
                .filter(|n| *n <= SocketSwitchCount::MAX)
                .map_or_else(SocketSwitchCount::default, Into::into),
            zone: self.parsed(3, Zone::default()),
            voltage: self
                .decimal(4)
                .and_then(|v| u16::try_from(v.trunc()).ok())
                .map_or_else(Voltage::default, Voltage::from),
            cable: Cable::new(self.field(5)).unwrap_or_default(),
            length: self
                .decimal(6)
                .and_then(Length::new)
                .unwrap_or_default(),
            power: self.decimal(7).and_then(Power::new).unwrap_or_default(),
            fuse_type: self.parsed(8, FuseType::default()),
            phase,
        }))
    }
}

/// Outcome of [`import()`].
#[derive(Clone, Debug, Default)]
pub struct Imported {
    /// Successfully decoded [`Circuit`]s.
    pub circuits: Vec<Circuit>,

    /// Number of skipped malformed rows, including ones with a too long
    /// description.
    pub skipped: usize,
}

impl Imported {
    /// Returns the user-facing summary of this [`Imported`] outcome.
    #[must_use]
    pub fn message(&self) -> String {
        if self.circuits.is_empty() {
            "Nie znaleziono żadnych obwodów do zaimportowania.".into()
        } else {
            format!("Zaimportowano {} obwodów.", self.circuits.len())
        }
    }
}

/// Error of [`import()`], rejecting the whole file.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// File has no content.
    #[display("Plik CSV jest pusty.")]
    Empty,

    /// Header has a wrong number of columns.
    #[display(
        "Nieprawidłowy format pliku CSV. Oczekiwano 11 kolumn, znaleziono \
         {_0}."
    )]
    InvalidHeader(#[error(not(source))] usize),
}

#[cfg(test)]
mod spec {
    use rust_decimal::Decimal;

    use super::{
        super::{template, CircuitList, Phase, PhaseKind},
        export, import, Error,
    };

    const HEADER: &str = "Nr obwodu;Opis obwodu;Ilość gniazd/włączników;\
                          Strefa;Napięcie;Przewód;Długość [m];Moc [kW];\
                          Typ bezpiecznika;Faza;Typ";

    #[test]
    fn imports_single_row() {
        let text = format!(
            "{HEADER}\r\n1;Test;2;Parter;230;YDYpżo 3x1,5;10;0.5;10A;L1;1φ",
        );

        let imported = import(&text).unwrap();

        assert_eq!(imported.circuits.len(), 1);
        let c = &imported.circuits[0];
        assert_eq!(c.description.as_ref(), "Test");
        assert_eq!(u32::from(c.socket_switch_count), 2);
        assert_eq!(c.fuse_type.to_string(), "10A");
        assert_eq!(c.cable.as_ref(), "YDYpżo 3x1,5");
        assert_eq!(imported.message(), "Zaimportowano 1 obwodów.");
    }

    #[test]
    fn rejects_empty_file() {
        assert_eq!(import(" \r\n\r\n").unwrap_err(), Error::Empty);
        assert_eq!(Error::Empty.to_string(), "Plik CSV jest pusty.");
    }

    #[test]
    fn rejects_wrong_header() {
        let err = import("Nr;Opis;Moc\r\n1;A;2").unwrap_err();

        assert_eq!(err, Error::InvalidHeader(3));
        assert_eq!(
            err.to_string(),
            "Nieprawidłowy format pliku CSV. Oczekiwano 11 kolumn, \
             znaleziono 3.",
        );
    }

    #[test]
    fn skips_malformed_and_undescribed_rows() {
        let text = format!(
            "{HEADER}\n1;Krótki;2\n2;;0;Parter;230;x;10;1;10A;L1;1φ\n\
             3;Ok;0;Parter;230;x;10;1;10A;L1;1φ\n",
        );

        let imported = import(&text).unwrap();

        assert_eq!(imported.skipped, 1);
        assert_eq!(imported.circuits.len(), 1);
        assert_eq!(u32::from(imported.circuits[0].number), 3);
    }

    #[test]
    fn skips_too_long_description() {
        let long = "x".repeat(513);
        let text = format!(
            "{HEADER}\n1;{long};0;Parter;230;x;10;1;10A;L1;1φ\n\
             2;Ok;0;Parter;230;x;10;1;10A;L1;1φ\n",
        );

        let imported = import(&text).unwrap();

        assert_eq!(imported.skipped, 1);
        assert_eq!(imported.circuits.len(), 1);
        assert_eq!(imported.circuits[0].description.as_ref(), "Ok");
    }

    #[test]
    fn ignores_huge_socket_count() {
        let text = format!(
            "{HEADER}\n1;A;4000000000;Parter;230;x;10;1;10A;L1;1φ\n\
             2;B;9999;Parter;230;x;10;1;10A;L1;1φ\n",
        );

        let imported = import(&text).unwrap();

        let counts = imported
            .circuits
            .iter()
            .map(|c| u32::from(c.socket_switch_count))
            .collect::<Vec<_>>();
        assert_eq!(counts, [0, 9999]);
    }

    #[test]
    fn falls_back_to_defaults() {
        let text = format!("{HEADER}\nx;Opis;y;;abc;;-;?;;;3φ");

        let c = import(&text).unwrap().circuits.remove(0);

        assert_eq!(u32::from(c.number), 1);
        assert_eq!(u32::from(c.socket_switch_count), 0);
        assert_eq!(c.zone.to_string(), "Parter");
        assert_eq!(u16::from(c.voltage), 230);
        assert_eq!(c.cable.as_ref(), "YDYpżo 3x1,5");
        assert_eq!(Decimal::from(c.length), Decimal::TEN);
        assert_eq!(c.power.kilowatts(), Decimal::new(5, 1));
        assert_eq!(c.fuse_type.to_string(), "10A");
        assert_eq!(c.phase, Phase::ThreePhase);
    }

    #[test]
    fn reports_nothing_imported() {
        let imported = import(HEADER).unwrap();

        assert!(imported.circuits.is_empty());
        assert_eq!(
            imported.message(),
            "Nie znaleziono żadnych obwodów do zaimportowania.",
        );
    }

    #[test]
    fn quotes_values_with_separators() {
        let mut list = CircuitList::default();
        let _ = list.toggle_template(&template::all()[0]);

        let text = export(list.circuits());
        let mut lines = text.split("\r\n");

        assert_eq!(lines.next().unwrap(), super::COLUMNS.join(";"));
        assert_eq!(
            lines.next().unwrap(),
            "1;Gniazda kuchnia piekarnik;0;Parter;230;\"YDYpżo 3x2,5\";10;2;\
             10A;L1;1φ",
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn export_then_import_preserves_circuits() {
        let mut list = CircuitList::default();
        for t in template::all() {
            let _ = list.toggle_template(t);
        }

        let imported = import(&export(list.circuits())).unwrap().circuits;

        let key = |c: &super::Circuit| {
            (
                c.description.to_string(),
                c.socket_switch_count,
                c.zone,
                c.voltage,
                c.cable.to_string(),
                c.length,
                c.power,
                c.fuse_type,
                c.phase,
                c.kind() == PhaseKind::Three,
            )
        };
        assert_eq!(
            imported.iter().map(key).collect::<Vec<_>>(),
            list.circuits().iter().map(key).collect::<Vec<_>>(),
        );
    }
}
