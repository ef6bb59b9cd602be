use std::fmt;
use thiserror::Error;

/// The structural role of a record, decided by its leading token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// A standard coordinate entry (`ATOM`).
    Atom,
    /// A heteroatom coordinate entry (`HETATM`), used for ligands, ions and solvent.
    HetAtom,
    /// The end of a polymer chain (`TER`).
    ChainTerminator,
    /// The end of the structure (`END`).
    EndOfStructure,
}

impl RecordKind {
    /// Determines the kind of a raw line, or `None` when the line is not a structural record.
    ///
    /// `ENDMDL` is a frame delimiter and is deliberately not treated as `END`.
    pub fn detect(line: &str) -> Option<Self> {
        if line.starts_with("HETATM") {
            Some(Self::HetAtom)
        } else if line.starts_with("ATOM") {
            Some(Self::Atom)
        } else if line.starts_with("TER") {
            Some(Self::ChainTerminator)
        } else if line.starts_with("END") && !line.starts_with("ENDMDL") {
            Some(Self::EndOfStructure)
        } else {
            None
        }
    }

    /// Returns `true` for the kinds that carry chemically meaningful columns.
    pub fn is_coordinate(self) -> bool {
        matches!(self, Self::Atom | Self::HetAtom)
    }
}

/// A fixed column window inside a record line.
///
/// `start` and `end` are zero-based, half-open byte offsets; [`Field::columns`] renders the
/// one-based inclusive range used in format documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

impl Field {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    pub const fn width(&self) -> usize {
        self.end - self.start
    }

    pub fn columns(&self) -> String {
        if self.width() == 1 {
            format!("{}", self.start + 1)
        } else {
            format!("{}-{}", self.start + 1, self.end)
        }
    }
}

/// Column layout of `ATOM`/`HETATM` records.
pub mod columns {
    use super::Field;

    pub const SERIAL: Field = Field::new("atom serial", 6, 11);
    pub const ATOM_NAME: Field = Field::new("atom name", 12, 16);
    pub const RESIDUE_NAME: Field = Field::new("residue name", 17, 20);
    /// Residue name plus the column after it; wide enough for four-letter solvent names such
    /// as `TIP3`.
    pub const RESIDUE_WINDOW: Field = Field::new("extended residue name", 17, 21);
    /// The last column of the residue name, where one-letter nucleotide codes live when the
    /// name is right-justified.
    pub const SEQUENCE_CODE: Field = Field::new("sequence code", 19, 20);
    pub const CHAIN_ID: Field = Field::new("chain identifier", 21, 22);
    pub const RESIDUE_NUMBER: Field = Field::new("residue sequence number", 22, 26);
    pub const ELEMENT: Field = Field::new("element symbol", 76, 78);
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Value '{value}' does not fit the {width}-column {field} field")]
    FieldWidth {
        field: &'static str,
        value: String,
        width: usize,
    },
    #[error("The {field} field (columns {columns}) does not fall on character boundaries")]
    NotAddressable { field: &'static str, columns: String },
}

/// One fixed-width line of a structure file.
///
/// Fields are read and written exclusively through column windows; a write always replaces
/// exactly the bytes of its window, so no other field can shift.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    kind: RecordKind,
    line: String,
}

impl Record {
    /// Parses a raw line, returning `None` for lines that are not structural records.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        RecordKind::detect(line).map(|kind| Self {
            kind,
            line: line.to_string(),
        })
    }

    pub fn end_of_structure() -> Self {
        Self {
            kind: RecordKind::EndOfStructure,
            line: "END".to_string(),
        }
    }

    pub fn chain_terminator() -> Self {
        Self {
            kind: RecordKind::ChainTerminator,
            line: "TER".to_string(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn is_coordinate(&self) -> bool {
        self.kind.is_coordinate()
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns the raw content of a column window.
    ///
    /// A line that ends inside the window yields the part that exists; a window that is not
    /// addressable yields an empty string.
    pub fn field(&self, field: Field) -> &str {
        let end = field.end.min(self.line.len());
        if field.start >= end {
            return "";
        }
        self.line.get(field.start..end).unwrap_or("")
    }

    pub fn field_trimmed(&self, field: Field) -> &str {
        self.field(field).trim()
    }

    /// The residue name as written, trimmed but with its original case.
    pub fn residue_name(&self) -> &str {
        self.field_trimmed(columns::RESIDUE_NAME)
    }

    pub fn atom_name(&self) -> &str {
        self.field_trimmed(columns::ATOM_NAME)
    }

    pub fn element(&self) -> &str {
        self.field_trimmed(columns::ELEMENT)
    }

    pub fn chain_id(&self) -> Option<char> {
        self.field(columns::CHAIN_ID).chars().next()
    }

    /// The residue sequence number; `None` when the field is blank, `Some(Err(raw))` when it
    /// holds something that is not an integer.
    pub fn residue_number(&self) -> Option<Result<i32, &str>> {
        let raw = self.field_trimmed(columns::RESIDUE_NUMBER);
        if raw.is_empty() {
            None
        } else {
            Some(raw.parse().map_err(|_| raw))
        }
    }

    pub fn serial(&self) -> Option<u32> {
        self.field_trimmed(columns::SERIAL).parse().ok()
    }

    /// Overwrites a column window with a value of exactly the window's width.
    ///
    /// Lines shorter than the window are padded with spaces first.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), RecordError> {
        if value.len() != field.width() || !value.is_ascii() {
            return Err(RecordError::FieldWidth {
                field: field.name,
                value: value.to_string(),
                width: field.width(),
            });
        }
        let addressable = self.line.is_char_boundary(field.start.min(self.line.len()))
            && self.line.is_char_boundary(field.end.min(self.line.len()));
        if !addressable {
            return Err(RecordError::NotAddressable {
                field: field.name,
                columns: field.columns(),
            });
        }
        if self.line.len() < field.end {
            let padded = field.end - self.line.len();
            self.line.extend(std::iter::repeat_n(' ', padded));
        }
        self.line.replace_range(field.start..field.end, value);
        Ok(())
    }

    /// Writes a residue name right-justified into its 3-column window.
    pub fn set_residue_name(&mut self, name: &str) -> Result<(), RecordError> {
        let padded = pad_to_width(columns::RESIDUE_NAME, name, Justify::Right)?;
        self.set_field(columns::RESIDUE_NAME, &padded)
    }

    /// Writes an atom name using the alignment convention of the name it replaces.
    ///
    /// Names of four characters fill the window; shorter names keep a leading space when the
    /// existing name had one (the element-aligned convention).
    pub fn set_atom_name(&mut self, name: &str) -> Result<(), RecordError> {
        let current = self.field(columns::ATOM_NAME);
        let element_aligned = current.is_empty() || current.starts_with(' ');
        let padded = if name.len() < columns::ATOM_NAME.width() && element_aligned {
            format!(" {name:<3}")
        } else {
            pad_to_width(columns::ATOM_NAME, name, Justify::Left)?
        };
        self.set_field(columns::ATOM_NAME, &padded)
    }

    pub fn set_serial(&mut self, serial: usize) -> Result<(), RecordError> {
        let padded = pad_to_width(columns::SERIAL, &serial.to_string(), Justify::Right)?;
        self.set_field(columns::SERIAL, &padded)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

enum Justify {
    Left,
    Right,
}

fn pad_to_width(field: Field, value: &str, justify: Justify) -> Result<String, RecordError> {
    let width = field.width();
    if value.len() > width {
        return Err(RecordError::FieldWidth {
            field: field.name,
            value: value.to_string(),
            width,
        });
    }
    Ok(match justify {
        Justify::Left => format!("{value:<width$}"),
        Justify::Right => format!("{value:>width$}"),
    })
}
