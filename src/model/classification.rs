use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized Leontis-Westhof code: '{0}'")]
pub struct ParseLeontisWesthofError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized Saenger class: '{0}'")]
pub struct ParseSaengerError(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized stacking topology: '{0}'")]
pub struct ParseStackingTopologyError(String);

/// Leontis-Westhof base-pair family: stericity (cis/trans) and the interacting edge of
/// each nucleotide (Watson-Crick, Hoogsteen, Sugar).
///
/// The textual code is three characters long, e.g. `cWH` is a cis pair between the
/// Watson-Crick edge of `nt1` and the Hoogsteen edge of `nt2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeontisWesthof {
    #[serde(rename = "cWW")]
    CWW,
    #[serde(rename = "cWH")]
    CWH,
    #[serde(rename = "cWS")]
    CWS,
    #[serde(rename = "cHW")]
    CHW,
    #[serde(rename = "cHH")]
    CHH,
    #[serde(rename = "cHS")]
    CHS,
    #[serde(rename = "cSW")]
    CSW,
    #[serde(rename = "cSH")]
    CSH,
    #[serde(rename = "cSS")]
    CSS,
    #[serde(rename = "tWW")]
    TWW,
    #[serde(rename = "tWH")]
    TWH,
    #[serde(rename = "tWS")]
    TWS,
    #[serde(rename = "tHW")]
    THW,
    #[serde(rename = "tHH")]
    THH,
    #[serde(rename = "tHS")]
    THS,
    #[serde(rename = "tSW")]
    TSW,
    #[serde(rename = "tSH")]
    TSH,
    #[serde(rename = "tSS")]
    TSS,
}

impl LeontisWesthof {
    pub const ALL: [LeontisWesthof; 18] = [
        Self::CWW,
        Self::CWH,
        Self::CWS,
        Self::CHW,
        Self::CHH,
        Self::CHS,
        Self::CSW,
        Self::CSH,
        Self::CSS,
        Self::TWW,
        Self::TWH,
        Self::TWS,
        Self::THW,
        Self::THH,
        Self::THS,
        Self::TSW,
        Self::TSH,
        Self::TSS,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CWW => "cWW",
            Self::CWH => "cWH",
            Self::CWS => "cWS",
            Self::CHW => "cHW",
            Self::CHH => "cHH",
            Self::CHS => "cHS",
            Self::CSW => "cSW",
            Self::CSH => "cSH",
            Self::CSS => "cSS",
            Self::TWW => "tWW",
            Self::TWH => "tWH",
            Self::TWS => "tWS",
            Self::THW => "tHW",
            Self::THH => "tHH",
            Self::THS => "tHS",
            Self::TSW => "tSW",
            Self::TSH => "tSH",
            Self::TSS => "tSS",
        }
    }

    /// Builds the family from its parts. Stericity is `c` or `t` (any case), edges are
    /// `W`, `H` or `S` (any case). Protonated edge markers (`+`, `z`, `g`) are accepted
    /// and folded onto the edge they protonate.
    pub fn from_parts(stericity: char, edge1: char, edge2: char) -> Option<Self> {
        let code: String = [
            stericity.to_ascii_lowercase(),
            normalize_edge(edge1),
            normalize_edge(edge2),
        ]
        .iter()
        .collect();
        code.parse().ok()
    }

    /// The same family seen from the other nucleotide: edges swap, stericity stays.
    pub fn reverse(&self) -> Self {
        let code = self.as_str().as_bytes();
        let swapped = [code[0], code[2], code[1]];
        let swapped = std::str::from_utf8(&swapped).unwrap_or_default();
        swapped.parse().unwrap_or(*self)
    }

    pub fn is_cis(&self) -> bool {
        self.as_str().starts_with('c')
    }

    pub fn is_canonical(&self) -> bool {
        *self == Self::CWW
    }
}

/// Maps a raw edge character onto `W`/`H`/`S`, folding protonated markers
/// (`+` Watson-Crick, `z` Sugar, `g` Hoogsteen). Unknown characters pass through
/// upper-cased and fail the subsequent lookup.
pub fn normalize_edge(edge: char) -> char {
    match edge {
        '+' => 'W',
        'z' => 'S',
        'g' => 'H',
        other => other.to_ascii_uppercase(),
    }
}

impl FromStr for LeontisWesthof {
    type Err = ParseLeontisWesthofError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|lw| lw.as_str() == s)
            .copied()
            .ok_or_else(|| ParseLeontisWesthofError(s.to_string()))
    }
}

impl fmt::Display for LeontisWesthof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Saenger hydrogen-bonding class, I through XXVIII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Saenger {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
    VIII,
    IX,
    X,
    XI,
    XII,
    XIII,
    XIV,
    XV,
    XVI,
    XVII,
    XVIII,
    XIX,
    XX,
    XXI,
    XXII,
    XXIII,
    XXIV,
    XXV,
    XXVI,
    XXVII,
    XXVIII,
}

impl Saenger {
    pub const ALL: [Saenger; 28] = [
        Self::I,
        Self::II,
        Self::III,
        Self::IV,
        Self::V,
        Self::VI,
        Self::VII,
        Self::VIII,
        Self::IX,
        Self::X,
        Self::XI,
        Self::XII,
        Self::XIII,
        Self::XIV,
        Self::XV,
        Self::XVI,
        Self::XVII,
        Self::XVIII,
        Self::XIX,
        Self::XX,
        Self::XXI,
        Self::XXII,
        Self::XXIII,
        Self::XXIV,
        Self::XXV,
        Self::XXVI,
        Self::XXVII,
        Self::XXVIII,
    ];

    /// Looks a class up by its 1-based index, as used by numeric codes.
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize + 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::I => "I",
            Self::II => "II",
            Self::III => "III",
            Self::IV => "IV",
            Self::V => "V",
            Self::VI => "VI",
            Self::VII => "VII",
            Self::VIII => "VIII",
            Self::IX => "IX",
            Self::X => "X",
            Self::XI => "XI",
            Self::XII => "XII",
            Self::XIII => "XIII",
            Self::XIV => "XIV",
            Self::XV => "XV",
            Self::XVI => "XVI",
            Self::XVII => "XVII",
            Self::XVIII => "XVIII",
            Self::XIX => "XIX",
            Self::XX => "XX",
            Self::XXI => "XXI",
            Self::XXII => "XXII",
            Self::XXIII => "XXIII",
            Self::XXIV => "XXIV",
            Self::XXV => "XXV",
            Self::XXVI => "XXVI",
            Self::XXVII => "XXVII",
            Self::XXVIII => "XXVIII",
        }
    }
}

impl FromStr for Saenger {
    type Err = ParseSaengerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|class| class.as_str() == s)
            .copied()
            .ok_or_else(|| ParseSaengerError(s.to_string()))
    }
}

impl fmt::Display for Saenger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relative orientation of two stacked bases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackingTopology {
    Upward,
    Downward,
    Inward,
    Outward,
}

impl StackingTopology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upward => "upward",
            Self::Downward => "downward",
            Self::Inward => "inward",
            Self::Outward => "outward",
        }
    }

    /// Topology of the same stack read in the opposite direction.
    pub fn reverse(&self) -> Self {
        match self {
            Self::Upward => Self::Downward,
            Self::Downward => Self::Upward,
            Self::Inward => Self::Outward,
            Self::Outward => Self::Inward,
        }
    }
}

impl FromStr for StackingTopology {
    type Err = ParseStackingTopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upward" => Ok(Self::Upward),
            "downward" => Ok(Self::Downward),
            "inward" => Ok(Self::Inward),
            "outward" => Ok(Self::Outward),
            _ => Err(ParseStackingTopologyError(s.to_string())),
        }
    }
}

impl fmt::Display for StackingTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base-ribose interaction class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BR {
    #[serde(rename = "0")]
    Br0,
    #[serde(rename = "1")]
    Br1,
    #[serde(rename = "2")]
    Br2,
    #[serde(rename = "3")]
    Br3,
    #[serde(rename = "4")]
    Br4,
    #[serde(rename = "5")]
    Br5,
    #[serde(rename = "6")]
    Br6,
    #[serde(rename = "7")]
    Br7,
    #[serde(rename = "8")]
    Br8,
    #[serde(rename = "9")]
    Br9,
    #[serde(rename = "unknown")]
    Unknown,
}

/// Base-phosphate interaction class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BPh {
    #[serde(rename = "0")]
    Bph0,
    #[serde(rename = "1")]
    Bph1,
    #[serde(rename = "2")]
    Bph2,
    #[serde(rename = "3")]
    Bph3,
    #[serde(rename = "4")]
    Bph4,
    #[serde(rename = "5")]
    Bph5,
    #[serde(rename = "6")]
    Bph6,
    #[serde(rename = "7")]
    Bph7,
    #[serde(rename = "8")]
    Bph8,
    #[serde(rename = "9")]
    Bph9,
    #[serde(rename = "unknown")]
    Unknown,
}

impl BR {
    const DIGITS: [BR; 10] = [
        Self::Br0,
        Self::Br1,
        Self::Br2,
        Self::Br3,
        Self::Br4,
        Self::Br5,
        Self::Br6,
        Self::Br7,
        Self::Br8,
        Self::Br9,
    ];

    pub fn from_digit(digit: u32) -> Option<Self> {
        Self::DIGITS.get(digit as usize).copied()
    }
}

impl BPh {
    const DIGITS: [BPh; 10] = [
        Self::Bph0,
        Self::Bph1,
        Self::Bph2,
        Self::Bph3,
        Self::Bph4,
        Self::Bph5,
        Self::Bph6,
        Self::Bph7,
        Self::Bph8,
        Self::Bph9,
    ];

    pub fn from_digit(digit: u32) -> Option<Self> {
        Self::DIGITS.get(digit as usize).copied()
    }
}

impl fmt::Display for BR {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            digit => write!(f, "{}BR", *digit as u8),
        }
    }
}

impl fmt::Display for BPh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => f.write_str("unknown"),
            digit => write!(f, "{}BPh", *digit as u8),
        }
    }
}
