/// Nucleotide moiety an atom belongs to, used to orient base-ribose and base-phosphate
/// contacts reported as atom pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomGroup {
    Phosphate,
    Ribose,
    Base,
    Unknown,
}

const PHOSPHATE: [&str; 13] = [
    "P", "OP1", "OP2", "O5'", "C5'", "C4'", "C3'", "O3'", "O5*", "C5*", "C4*", "C3*", "O3*",
];
const RIBOSE: [&str; 8] = ["C1'", "C2'", "O2'", "O4'", "C1*", "C2*", "O2*", "O4*"];
const BASE: [&str; 15] = [
    "C2", "C4", "C5", "C6", "C8", "N1", "N2", "N3", "N4", "N6", "N7", "N9", "O2", "O4", "O6",
];

impl AtomGroup {
    pub fn classify(atom_name: &str) -> Self {
        if PHOSPHATE.contains(&atom_name) {
            AtomGroup::Phosphate
        } else if RIBOSE.contains(&atom_name) {
            AtomGroup::Ribose
        } else if BASE.contains(&atom_name) {
            AtomGroup::Base
        } else {
            AtomGroup::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_backbone_sugar_and_base_atoms() {
        assert_eq!(AtomGroup::classify("OP1"), AtomGroup::Phosphate);
        assert_eq!(AtomGroup::classify("C4'"), AtomGroup::Phosphate);
        assert_eq!(AtomGroup::classify("O3*"), AtomGroup::Phosphate);
        assert_eq!(AtomGroup::classify("O2'"), AtomGroup::Ribose);
        assert_eq!(AtomGroup::classify("C1*"), AtomGroup::Ribose);
        assert_eq!(AtomGroup::classify("N7"), AtomGroup::Base);
        assert_eq!(AtomGroup::classify("O6"), AtomGroup::Base);
        assert_eq!(AtomGroup::classify("MG"), AtomGroup::Unknown);
        assert_eq!(AtomGroup::classify("op1"), AtomGroup::Unknown);
    }
}
