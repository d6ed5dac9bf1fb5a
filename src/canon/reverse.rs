use crate::model::interaction::{BasePair, OtherInteraction, Stacking};
use crate::model::residue::Residue;
use std::cmp::Ordering;
use std::fmt;

/// An interaction that denotes the same physical contact when read from either residue.
pub trait Reversible: Sized + fmt::Display {
    fn nt1(&self) -> &Residue;

    fn nt2(&self) -> &Residue;

    /// The same interaction seen from `nt2`.
    fn reversed(&self) -> Self;

    /// Orients the interaction so that `nt1` precedes `nt2`. Contacts of a residue with
    /// itself keep whichever direction prints first.
    fn canonical(self) -> Self {
        match self.nt1().canonical_cmp(self.nt2()) {
            Ordering::Less => self,
            Ordering::Greater => self.reversed(),
            Ordering::Equal => {
                let reversed = self.reversed();
                if reversed.to_string() < self.to_string() {
                    reversed
                } else {
                    self
                }
            }
        }
    }
}

impl Reversible for BasePair {
    fn nt1(&self) -> &Residue {
        &self.nt1
    }

    fn nt2(&self) -> &Residue {
        &self.nt2
    }

    fn reversed(&self) -> Self {
        BasePair::new(self.nt2.clone(), self.nt1.clone(), self.lw.reverse(), self.saenger)
    }
}

impl Reversible for Stacking {
    fn nt1(&self) -> &Residue {
        &self.nt1
    }

    fn nt2(&self) -> &Residue {
        &self.nt2
    }

    fn reversed(&self) -> Self {
        Stacking::new(
            self.nt2.clone(),
            self.nt1.clone(),
            self.topology.map(|t| t.reverse()),
        )
    }
}

impl Reversible for OtherInteraction {
    fn nt1(&self) -> &Residue {
        &self.nt1
    }

    fn nt2(&self) -> &Residue {
        &self.nt2
    }

    fn reversed(&self) -> Self {
        OtherInteraction::new(self.nt2.clone(), self.nt1.clone())
    }
}
