use super::classification::{BPh, BR, LeontisWesthof, Saenger, StackingTopology};
use super::residue::Residue;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasePair {
    pub nt1: Residue,
    pub nt2: Residue,
    pub lw: LeontisWesthof,
    pub saenger: Option<Saenger>,
}

impl BasePair {
    pub fn new(nt1: Residue, nt2: Residue, lw: LeontisWesthof, saenger: Option<Saenger>) -> Self {
        Self {
            nt1,
            nt2,
            lw,
            saenger,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stacking {
    pub nt1: Residue,
    pub nt2: Residue,
    pub topology: Option<StackingTopology>,
}

impl Stacking {
    pub fn new(nt1: Residue, nt2: Residue, topology: Option<StackingTopology>) -> Self {
        Self { nt1, nt2, topology }
    }
}

/// Contact between the base of `nt1` and the ribose of `nt2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseRibose {
    pub nt1: Residue,
    pub nt2: Residue,
    pub br: Option<BR>,
}

impl BaseRibose {
    pub fn new(nt1: Residue, nt2: Residue, br: Option<BR>) -> Self {
        Self { nt1, nt2, br }
    }
}

/// Contact between the base of `nt1` and the phosphate of `nt2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasePhosphate {
    pub nt1: Residue,
    pub nt2: Residue,
    pub bph: Option<BPh>,
}

impl BasePhosphate {
    pub fn new(nt1: Residue, nt2: Residue, bph: Option<BPh>) -> Self {
        Self { nt1, nt2, bph }
    }
}

/// Any detected contact the taxonomy cannot place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OtherInteraction {
    pub nt1: Residue,
    pub nt2: Residue,
}

impl OtherInteraction {
    pub fn new(nt1: Residue, nt2: Residue) -> Self {
        Self { nt1, nt2 }
    }
}

fn fmt_option<T: fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for BasePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BasePair({}, {}, {}, {})",
            self.nt1,
            self.nt2,
            self.lw,
            fmt_option(&self.saenger)
        )
    }
}

impl fmt::Display for Stacking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stacking({}, {}, {})",
            self.nt1,
            self.nt2,
            fmt_option(&self.topology)
        )
    }
}

impl fmt::Display for BaseRibose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BaseRibose({}, {}, {})",
            self.nt1,
            self.nt2,
            fmt_option(&self.br)
        )
    }
}

impl fmt::Display for BasePhosphate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BasePhosphate({}, {}, {})",
            self.nt1,
            self.nt2,
            fmt_option(&self.bph)
        )
    }
}

impl fmt::Display for OtherInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OtherInteraction({}, {})", self.nt1, self.nt2)
    }
}

/// One canonical interaction of any kind, as emitted by a unifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Interaction {
    BasePair(BasePair),
    Stacking(Stacking),
    BaseRibose(BaseRibose),
    BasePhosphate(BasePhosphate),
    Other(OtherInteraction),
}

impl Interaction {
    pub fn nt1(&self) -> &Residue {
        match self {
            Self::BasePair(i) => &i.nt1,
            Self::Stacking(i) => &i.nt1,
            Self::BaseRibose(i) => &i.nt1,
            Self::BasePhosphate(i) => &i.nt1,
            Self::Other(i) => &i.nt1,
        }
    }

    pub fn nt2(&self) -> &Residue {
        match self {
            Self::BasePair(i) => &i.nt2,
            Self::Stacking(i) => &i.nt2,
            Self::BaseRibose(i) => &i.nt2,
            Self::BasePhosphate(i) => &i.nt2,
            Self::Other(i) => &i.nt2,
        }
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BasePair(i) => i.fmt(f),
            Self::Stacking(i) => i.fmt(f),
            Self::BaseRibose(i) => i.fmt(f),
            Self::BasePhosphate(i) => i.fmt(f),
            Self::Other(i) => i.fmt(f),
        }
    }
}

impl From<BasePair> for Interaction {
    fn from(value: BasePair) -> Self {
        Self::BasePair(value)
    }
}

impl From<Stacking> for Interaction {
    fn from(value: Stacking) -> Self {
        Self::Stacking(value)
    }
}

impl From<BaseRibose> for Interaction {
    fn from(value: BaseRibose) -> Self {
        Self::BaseRibose(value)
    }
}

impl From<BasePhosphate> for Interaction {
    fn from(value: BasePhosphate) -> Self {
        Self::BasePhosphate(value)
    }
}

impl From<OtherInteraction> for Interaction {
    fn from(value: OtherInteraction) -> Self {
        Self::Other(value)
    }
}

/// The canonical interaction set of one structural model: one ordered list per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseInteractions {
    pub base_pairs: Vec<BasePair>,
    pub stackings: Vec<Stacking>,
    pub base_ribose_interactions: Vec<BaseRibose>,
    pub base_phosphate_interactions: Vec<BasePhosphate>,
    pub other_interactions: Vec<OtherInteraction>,
}

/// Alternative name used by consumers of the secondary-structure view.
pub type Structure2D = BaseInteractions;

impl BaseInteractions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, interaction: impl Into<Interaction>) {
        match interaction.into() {
            Interaction::BasePair(i) => self.base_pairs.push(i),
            Interaction::Stacking(i) => self.stackings.push(i),
            Interaction::BaseRibose(i) => self.base_ribose_interactions.push(i),
            Interaction::BasePhosphate(i) => self.base_phosphate_interactions.push(i),
            Interaction::Other(i) => self.other_interactions.push(i),
        }
    }

    /// Appends every list of `other` after the corresponding list of `self`.
    pub fn append(&mut self, mut other: BaseInteractions) {
        self.base_pairs.append(&mut other.base_pairs);
        self.stackings.append(&mut other.stackings);
        self.base_ribose_interactions
            .append(&mut other.base_ribose_interactions);
        self.base_phosphate_interactions
            .append(&mut other.base_phosphate_interactions);
        self.other_interactions.append(&mut other.other_interactions);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.base_pairs.len()
            + self.stackings.len()
            + self.base_ribose_interactions.len()
            + self.base_phosphate_interactions.len()
            + self.other_interactions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every interaction, kind by kind, in list order.
    pub fn iter(&self) -> impl Iterator<Item = Interaction> + '_ {
        let base_pairs = self.base_pairs.iter().cloned().map(Interaction::from);
        let stackings = self.stackings.iter().cloned().map(Interaction::from);
        let riboses = self
            .base_ribose_interactions
            .iter()
            .cloned()
            .map(Interaction::from);
        let phosphates = self
            .base_phosphate_interactions
            .iter()
            .cloned()
            .map(Interaction::from);
        let others = self.other_interactions.iter().cloned().map(Interaction::from);
        base_pairs
            .chain(stackings)
            .chain(riboses)
            .chain(phosphates)
            .chain(others)
    }

    /// Rebuilds the set with every residue passed through `f`. Classifications are
    /// carried over untouched.
    pub fn try_map_residues<E>(
        self,
        mut f: impl FnMut(Residue) -> Result<Residue, E>,
    ) -> Result<Self, E> {
        let mut mapped = BaseInteractions::new();
        for i in self.base_pairs {
            mapped.push(BasePair::new(f(i.nt1)?, f(i.nt2)?, i.lw, i.saenger));
        }
        for i in self.stackings {
            mapped.push(Stacking::new(f(i.nt1)?, f(i.nt2)?, i.topology));
        }
        for i in self.base_ribose_interactions {
            mapped.push(BaseRibose::new(f(i.nt1)?, f(i.nt2)?, i.br));
        }
        for i in self.base_phosphate_interactions {
            mapped.push(BasePhosphate::new(f(i.nt1)?, f(i.nt2)?, i.bph));
        }
        for i in self.other_interactions {
            mapped.push(OtherInteraction::new(f(i.nt1)?, f(i.nt2)?));
        }
        Ok(mapped)
    }
}

impl FromIterator<Interaction> for BaseInteractions {
    fn from_iter<T: IntoIterator<Item = Interaction>>(iter: T) -> Self {
        let mut interactions = BaseInteractions::new();
        interactions.extend(iter);
        interactions
    }
}

impl Extend<Interaction> for BaseInteractions {
    fn extend<T: IntoIterator<Item = Interaction>>(&mut self, iter: T) {
        for interaction in iter {
            self.push(interaction);
        }
    }
}
