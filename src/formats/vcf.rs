//! VCF format adapter
//!
//! Zero-copy, whitespace-delimited view over a VCF line plus a delimited
//! parser for the INFO column.

/// First field of the column header line that opens the data section
pub const HEADER_TOKEN: &str = "#CHROM";

/// A data line must carry more fields than this (CHROM..FILTER, INFO at index 7)
pub const MIN_DATA_FIELDS: usize = 7;

/// Index of the POS column
pub const POS_FIELD: usize = 1;

/// Index of the INFO column
pub const INFO_FIELD: usize = 7;

/// INFO key holding the variant end position
pub const END_KEY: &str = "END";

/// Zero-copy VCF line view
///
/// Fields are split on any run of whitespace, so both tab- and
/// space-separated files are accepted. Nothing is parsed until asked for.
#[derive(Debug, Clone)]
pub struct VcfRecordView<'a> {
    fields: Vec<&'a str>,
}

impl<'a> VcfRecordView<'a> {
    /// Split a line into its fields
    pub fn split(line: &'a str) -> Self {
        Self {
            fields: line.split_whitespace().collect(),
        }
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// True when the line has no fields at all
    pub fn is_blank(&self) -> bool {
        self.fields.is_empty()
    }

    /// Get field by index
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Get CHROM field (field 0)
    pub fn chrom(&self) -> Option<&'a str> {
        self.field(0)
    }

    /// Get INFO field (field 7)
    pub fn info(&self) -> Option<&'a str> {
        self.field(INFO_FIELD)
    }

    /// Whether this is the `#CHROM` column header line
    pub fn is_header(&self) -> bool {
        self.chrom() == Some(HEADER_TOKEN)
    }

    /// Whether the line has the shape of a data record: a first field that is
    /// not a comment and more than seven fields.
    pub fn is_data_line(&self) -> bool {
        match self.chrom() {
            Some(chrom) => !chrom.starts_with('#') && self.field_count() > MIN_DATA_FIELDS,
            None => false,
        }
    }

    /// Parse POS (field 1) as a signed integer
    pub fn pos(&self) -> Result<i64, VcfParseError> {
        let raw = self
            .field(POS_FIELD)
            .ok_or(VcfParseError::MissingField("POS"))?;
        raw.parse()
            .map_err(|_| VcfParseError::InvalidNumber("POS", raw.to_string()))
    }

    /// Look up `END` in the INFO column
    ///
    /// Returns `Ok(None)` when there is no INFO column or it has no `END` key.
    pub fn end(&self) -> Result<Option<i64>, VcfParseError> {
        match self.info() {
            Some(info) => InfoField::new(info).end(),
            None => Ok(None),
        }
    }
}

/// Delimited view over an INFO column (`key[=value];key[=value]...`)
#[derive(Debug, Clone, Copy)]
pub struct InfoField<'a> {
    raw: &'a str,
}

impl<'a> InfoField<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// Iterate over `(key, value)` pairs; flags have no value.
    /// Empty tokens (`;;`, trailing `;`) and the missing marker `.` are dropped.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, Option<&'a str>)> + 'a {
        let raw = self.raw;
        raw.split(';')
            .filter(|token| !token.is_empty() && *token != ".")
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (token, None),
            })
    }

    /// Get the value of the first entry named `key`.
    /// A flag yields `Some("")`, matching how the flag is present but valueless.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.entries()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value.unwrap_or(""))
    }

    /// Parse the `END` entry as an integer
    pub fn end(&self) -> Result<Option<i64>, VcfParseError> {
        match self.get(END_KEY) {
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| VcfParseError::InvalidNumber("END", value.to_string())),
            None => Ok(None),
        }
    }
}

/// VCF parsing error
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VcfParseError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid number in field {0}: {1:?}")]
    InvalidNumber(&'static str, String),

    #[error("Coordinate {field}={value} overflows when padded by the confidence margin")]
    CoordinateOverflow { field: &'static str, value: i64 },
}
