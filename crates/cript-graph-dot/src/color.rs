//! Node fill colors and the contrast rule for their labels.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use cript_graph_core::{Error, Result};

/// Perceived brightness below which a fill counts as dark.
pub const DARK_THRESHOLD: f64 = 127.5;

/// An RGB color decoded from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl HexColor {
    pub fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Parse a `#` followed by exactly six hex digits.
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = || {
            Error::invalid_configuration("color must be '#' followed by six hex digits")
                .with_operation("color::parse")
                .with_context("color", text)
        };

        let digits = text.strip_prefix('#').ok_or_else(malformed)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| malformed())
        };
        Ok(Self {
            red: channel(0..2)?,
            green: channel(2..4)?,
            blue: channel(4..6)?,
        })
    }

    /// HSP perceived brightness: `sqrt(0.299 R² + 0.587 G² + 0.114 B²)`.
    pub fn brightness(&self) -> f64 {
        let r = f64::from(self.red);
        let g = f64::from(self.green);
        let b = f64::from(self.blue);
        (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt()
    }

    /// Dark fills get a white font.
    pub fn is_dark(&self) -> bool {
        self.brightness() < DARK_THRESHOLD
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }
}

/// Fill color per node type.
///
/// Entries are kept as written and parsed when used, so a malformed entry
/// surfaces as `InvalidConfiguration` the first time a vertex of that type
/// is styled. [`ColorTable::validate`] checks every entry up front.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ColorTable {
    colors: BTreeMap<String, String>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::cript()
    }
}

impl ColorTable {
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    /// The CRIPT palette.
    pub fn cript() -> Self {
        [
            ("Group", "#775A55"),
            ("User", "#BFB2AB"),
            ("Project", "#20262C"),
            ("Collection", "#576575"),
            ("Experiment", "#ADAFBD"),
            ("Inventory", "#E5E6EB"),
            ("Material", "#275497"),
            ("Process", "#951919"),
            ("Data", "#2D9742"),
            ("Computation", "#FFCC00"),
            ("ComputationProcess", "#593196"),
            ("Reference", "#FFFFFF"),
            ("Software", "#FFFFFF"),
        ]
        .into_iter()
        .collect()
    }

    /// Parse a TOML table of `NodeType = "#RRGGBB"` pairs and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: Self = toml::from_str(text)
            .map_err(|e| Error::deserialization_failed(e).with_operation("color::from_toml_str"))?;
        table.validate()?;
        Ok(table)
    }

    pub fn insert(&mut self, node_type: impl Into<String>, color: impl Into<String>) {
        self.colors.insert(node_type.into(), color.into());
    }

    pub fn get(&self, node_type: &str) -> Option<&str> {
        self.colors.get(node_type).map(String::as_str)
    }

    /// Parsed fill color for `node_type`, `Ok(None)` if the type is unstyled.
    pub fn lookup(&self, node_type: &str) -> Result<Option<HexColor>> {
        match self.colors.get(node_type) {
            None => Ok(None),
            Some(text) => HexColor::parse(text)
                .map(Some)
                .map_err(|e| e.with_context("node_type", node_type)),
        }
    }

    pub fn validate(&self) -> Result<()> {
        for node_type in self.colors.keys() {
            self.lookup(node_type)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ColorTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            colors: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
