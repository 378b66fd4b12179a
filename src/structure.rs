//! # Chord Catalog
//!
//! The closed catalog of chord structures the generator can produce, grouped
//! into the five families user filters operate on. Each structure carries:
//!
//! - an interval template: pitch-class offsets from the structure's root, in
//!   stacking order (templates are constants; rotation for an inversion is
//!   always performed on a per-chord copy of the spelled notes, never here)
//! - a display label ("m7", "N6", "V7/V")
//! - the mode constructor its tones spell through (see `mode`)
//! - per key-mode lists of the root offsets it commonly occurs on, plus the
//!   wider "any" pool for the plain diatonic structures
//! - the set of inversions it supports
//!
//! Everything is a closed enum dispatched by exhaustive `match`, so adding a
//! catalog member forces every structure-specific decision to be revisited.

use serde::{Deserialize, Serialize};

use crate::mode::{degree_numeral, ModeConstructor, ModeLabel};

/// The chord families a user can enable or disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChordType {
    Triad,
    Seventh,
    ChromaticVariation,
    ModeMixture,
    AppliedChord,
}

impl ChordType {
    pub const ALL: [ChordType; 5] = [
        ChordType::Triad,
        ChordType::Seventh,
        ChordType::ChromaticVariation,
        ChordType::ModeMixture,
        ChordType::AppliedChord,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChordType::Triad => "Triad",
            ChordType::Seventh => "Seventh",
            ChordType::ChromaticVariation => "Chromatic variation",
            ChordType::ModeMixture => "Mode mixture",
            ChordType::AppliedChord => "Applied chord",
        }
    }

    /// The structures belonging to this family.
    pub fn structures(self) -> &'static [ChordStructure] {
        match self {
            ChordType::Triad => &[
                ChordStructure::MajorTriad,
                ChordStructure::MinorTriad,
                ChordStructure::AugmentedTriad,
                ChordStructure::DiminishedTriad,
            ],
            ChordType::Seventh => &[
                ChordStructure::DominantSeventh,
                ChordStructure::MajorSeventh,
                ChordStructure::MinorSeventh,
                ChordStructure::HalfDiminishedSeventh,
                ChordStructure::FullyDiminishedSeventh,
            ],
            ChordType::ChromaticVariation => &[
                ChordStructure::NeapolitanSixth,
                ChordStructure::ItalianSixth,
                ChordStructure::FrenchSixth,
                ChordStructure::GermanSixth,
            ],
            ChordType::ModeMixture => &[
                ChordStructure::FlatThreeMajorTriad,
                ChordStructure::FlatSixMajorTriad,
                ChordStructure::FlatSevenMajorTriad,
                ChordStructure::TonicMajorInMinor,
                ChordStructure::SubdominantMajorInMinor,
            ],
            ChordType::AppliedChord => &[
                ChordStructure::FiveOfFive,
                ChordStructure::FiveSevenOfFive,
                ChordStructure::FiveOfSix,
                ChordStructure::FiveSevenOfSix,
                ChordStructure::FiveSevenOfMajorFour,
                ChordStructure::FiveSevenOfMinorFour,
                ChordStructure::SevenDimSevenOfFive,
                ChordStructure::SevenHalfDimSevenOfSeven,
                ChordStructure::FiveOfSevenDim,
                ChordStructure::FiveSevenOfSevenDim,
            ],
        }
    }
}

/// Every chord structure the generator knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordStructure {
    // Triads
    MajorTriad,
    MinorTriad,
    DiminishedTriad,
    AugmentedTriad,
    // Sevenths
    DominantSeventh,
    MajorSeventh,
    MinorSeventh,
    HalfDiminishedSeventh,
    FullyDiminishedSeventh,
    // Chromatic variations
    NeapolitanSixth,
    ItalianSixth,
    FrenchSixth,
    GermanSixth,
    // Mode mixture
    FlatThreeMajorTriad,
    FlatSixMajorTriad,
    FlatSevenMajorTriad,
    TonicMajorInMinor,
    SubdominantMajorInMinor,
    // Applied chords
    FiveOfFive,
    FiveSevenOfFive,
    FiveOfSix,
    FiveSevenOfSix,
    FiveSevenOfMajorFour,
    FiveSevenOfMinorFour,
    SevenDimSevenOfFive,
    SevenHalfDimSevenOfSeven,
    FiveOfSevenDim,
    FiveSevenOfSevenDim,
}

const ALL_OFFSETS: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11];

impl ChordStructure {
    pub fn display_name(self) -> &'static str {
        match self {
            ChordStructure::MajorTriad => "M",
            ChordStructure::MinorTriad => "m",
            ChordStructure::DiminishedTriad => "o",
            ChordStructure::AugmentedTriad => "+",
            ChordStructure::DominantSeventh => "7",
            ChordStructure::MajorSeventh => "M7",
            ChordStructure::MinorSeventh => "m7",
            ChordStructure::HalfDiminishedSeventh => "ø7",
            ChordStructure::FullyDiminishedSeventh => "o7",
            ChordStructure::NeapolitanSixth => "N6",
            ChordStructure::ItalianSixth => "It+6",
            ChordStructure::FrenchSixth => "Fr+6",
            ChordStructure::GermanSixth => "Ger+6",
            ChordStructure::FlatThreeMajorTriad => "bIII",
            ChordStructure::FlatSixMajorTriad => "bVI",
            ChordStructure::FlatSevenMajorTriad => "bVII",
            ChordStructure::TonicMajorInMinor => "I",
            ChordStructure::SubdominantMajorInMinor => "IV",
            ChordStructure::FiveOfFive => "V/V",
            ChordStructure::FiveSevenOfFive => "V7/V",
            ChordStructure::FiveOfSix => "V/vi",
            ChordStructure::FiveSevenOfSix => "V7/vi",
            ChordStructure::FiveSevenOfMajorFour => "V7/IV",
            ChordStructure::FiveSevenOfMinorFour => "V7/iv",
            ChordStructure::SevenDimSevenOfFive => "viio7/V",
            ChordStructure::SevenHalfDimSevenOfSeven => "viiø7/vii",
            ChordStructure::FiveOfSevenDim => "V/viio",
            ChordStructure::FiveSevenOfSevenDim => "V7/viio",
        }
    }

    /// The mode constructor whose identity table spells this structure.
    pub fn mode_constructor(self) -> ModeConstructor {
        match self {
            ChordStructure::MajorTriad
            | ChordStructure::NeapolitanSixth
            | ChordStructure::FlatThreeMajorTriad
            | ChordStructure::FlatSixMajorTriad
            | ChordStructure::FlatSevenMajorTriad
            | ChordStructure::TonicMajorInMinor => ModeConstructor::Major,
            ChordStructure::MinorTriad => ModeConstructor::Minor,
            ChordStructure::DiminishedTriad
            | ChordStructure::FullyDiminishedSeventh
            | ChordStructure::SevenDimSevenOfFive => ModeConstructor::Diminished,
            ChordStructure::AugmentedTriad => ModeConstructor::AugmentedDominant,
            ChordStructure::DominantSeventh
            | ChordStructure::FiveOfFive
            | ChordStructure::FiveSevenOfFive
            | ChordStructure::FiveOfSix
            | ChordStructure::FiveSevenOfSix
            | ChordStructure::FiveSevenOfMajorFour
            | ChordStructure::FiveSevenOfMinorFour
            | ChordStructure::FiveOfSevenDim
            | ChordStructure::FiveSevenOfSevenDim => ModeConstructor::Dominant,
            ChordStructure::MajorSeventh | ChordStructure::SubdominantMajorInMinor => {
                ModeConstructor::Lydian
            }
            ChordStructure::MinorSeventh => ModeConstructor::Dorian,
            ChordStructure::HalfDiminishedSeventh
            | ChordStructure::SevenHalfDimSevenOfSeven => ModeConstructor::DiminishedMinor,
            ChordStructure::ItalianSixth
            | ChordStructure::FrenchSixth
            | ChordStructure::GermanSixth => ModeConstructor::Phrygian,
        }
    }

    /// Pitch-class offsets from the root, in stacking order.
    pub fn template(self) -> &'static [u8] {
        match self {
            ChordStructure::MajorTriad
            | ChordStructure::NeapolitanSixth
            | ChordStructure::FlatThreeMajorTriad
            | ChordStructure::FlatSixMajorTriad
            | ChordStructure::FlatSevenMajorTriad
            | ChordStructure::TonicMajorInMinor
            | ChordStructure::SubdominantMajorInMinor
            | ChordStructure::FiveOfFive
            | ChordStructure::FiveOfSix
            | ChordStructure::FiveOfSevenDim => &[0, 4, 7],
            ChordStructure::MinorTriad => &[0, 3, 7],
            ChordStructure::DiminishedTriad => &[0, 3, 6],
            ChordStructure::AugmentedTriad => &[0, 4, 8],
            ChordStructure::DominantSeventh
            | ChordStructure::FiveSevenOfFive
            | ChordStructure::FiveSevenOfSix
            | ChordStructure::FiveSevenOfMajorFour
            | ChordStructure::FiveSevenOfMinorFour
            | ChordStructure::FiveSevenOfSevenDim => &[0, 4, 7, 10],
            ChordStructure::MajorSeventh => &[0, 4, 7, 11],
            ChordStructure::MinorSeventh => &[0, 3, 7, 10],
            ChordStructure::HalfDiminishedSeventh
            | ChordStructure::SevenHalfDimSevenOfSeven => &[0, 3, 6, 10],
            ChordStructure::FullyDiminishedSeventh
            | ChordStructure::SevenDimSevenOfFive => &[0, 3, 6, 9],
            ChordStructure::ItalianSixth => &[0, 4, 10],
            ChordStructure::FrenchSixth => &[0, 4, 6, 10],
            ChordStructure::GermanSixth => &[0, 4, 7, 10],
        }
    }

    /// Root offsets this structure commonly occurs on in the given key mode.
    /// An empty slice means the structure does not occur in that mode and the
    /// mode must be excluded before any random draw.
    pub fn common_root_offsets(self, mode: ModeLabel) -> &'static [u8] {
        match (self, mode) {
            (ChordStructure::MajorTriad, ModeLabel::Major) => &[0, 5, 7],
            (ChordStructure::MajorTriad, ModeLabel::Minor) => &[3, 7, 8, 10],
            (ChordStructure::MinorTriad, ModeLabel::Major) => &[2, 4, 9],
            (ChordStructure::MinorTriad, ModeLabel::Minor) => &[0, 2, 5],
            (ChordStructure::DiminishedTriad, ModeLabel::Major) => &[11],
            (ChordStructure::DiminishedTriad, ModeLabel::Minor) => &[2, 10],
            (ChordStructure::AugmentedTriad, ModeLabel::Major) => &[],
            (ChordStructure::AugmentedTriad, ModeLabel::Minor) => &[3],
            (ChordStructure::DominantSeventh, _) => &[7],
            (ChordStructure::MajorSeventh, ModeLabel::Major) => &[0, 5],
            (ChordStructure::MajorSeventh, ModeLabel::Minor) => &[],
            (ChordStructure::MinorSeventh, ModeLabel::Major) => &[2, 4, 9],
            (ChordStructure::MinorSeventh, ModeLabel::Minor) => &[0, 5],
            (ChordStructure::HalfDiminishedSeventh, ModeLabel::Major) => &[11],
            (ChordStructure::HalfDiminishedSeventh, ModeLabel::Minor) => &[2, 10],
            (ChordStructure::FullyDiminishedSeventh, ModeLabel::Major) => &[],
            (ChordStructure::FullyDiminishedSeventh, ModeLabel::Minor) => &[10],
            (ChordStructure::NeapolitanSixth, _) => &[1],
            (ChordStructure::ItalianSixth, _)
            | (ChordStructure::FrenchSixth, _)
            | (ChordStructure::GermanSixth, _) => &[8],
            (ChordStructure::FlatThreeMajorTriad, ModeLabel::Major) => &[3],
            (ChordStructure::FlatThreeMajorTriad, ModeLabel::Minor) => &[],
            (ChordStructure::FlatSixMajorTriad, ModeLabel::Major) => &[8],
            (ChordStructure::FlatSixMajorTriad, ModeLabel::Minor) => &[],
            (ChordStructure::FlatSevenMajorTriad, ModeLabel::Major) => &[10],
            (ChordStructure::FlatSevenMajorTriad, ModeLabel::Minor) => &[],
            (ChordStructure::TonicMajorInMinor, ModeLabel::Major) => &[],
            (ChordStructure::TonicMajorInMinor, ModeLabel::Minor) => &[0],
            (ChordStructure::SubdominantMajorInMinor, ModeLabel::Major) => &[],
            (ChordStructure::SubdominantMajorInMinor, ModeLabel::Minor) => &[5],
            (ChordStructure::FiveOfFive, _) | (ChordStructure::FiveSevenOfFive, _) => &[2],
            (ChordStructure::FiveOfSix, ModeLabel::Major) => &[4],
            (ChordStructure::FiveOfSix, ModeLabel::Minor) => &[],
            (ChordStructure::FiveSevenOfSix, ModeLabel::Major) => &[4],
            (ChordStructure::FiveSevenOfSix, ModeLabel::Minor) => &[],
            (ChordStructure::FiveSevenOfMajorFour, ModeLabel::Major) => &[0],
            (ChordStructure::FiveSevenOfMajorFour, ModeLabel::Minor) => &[],
            (ChordStructure::FiveSevenOfMinorFour, ModeLabel::Major) => &[],
            (ChordStructure::FiveSevenOfMinorFour, ModeLabel::Minor) => &[0],
            (ChordStructure::SevenDimSevenOfFive, _) => &[6],
            (ChordStructure::SevenHalfDimSevenOfSeven, ModeLabel::Major) => &[10],
            (ChordStructure::SevenHalfDimSevenOfSeven, ModeLabel::Minor) => &[],
            (ChordStructure::FiveOfSevenDim, ModeLabel::Major) => &[6],
            (ChordStructure::FiveOfSevenDim, ModeLabel::Minor) => &[],
            (ChordStructure::FiveSevenOfSevenDim, ModeLabel::Major) => &[6],
            (ChordStructure::FiveSevenOfSevenDim, ModeLabel::Minor) => &[],
        }
    }

    /// Root offsets this structure is valid on at all: every chromatic offset
    /// for the plain diatonic structures, the common set for the fixed
    /// non-diatonic ones.
    pub fn possible_root_offsets(self, mode: ModeLabel) -> &'static [u8] {
        match self {
            ChordStructure::MajorTriad
            | ChordStructure::MinorTriad
            | ChordStructure::DiminishedTriad
            | ChordStructure::AugmentedTriad
            | ChordStructure::DominantSeventh
            | ChordStructure::MajorSeventh
            | ChordStructure::MinorSeventh
            | ChordStructure::HalfDiminishedSeventh
            | ChordStructure::FullyDiminishedSeventh => &ALL_OFFSETS,
            _ => self.common_root_offsets(mode),
        }
    }

    /// Key modes this structure can be drawn in: the labels whose common
    /// offset list is non-empty.
    pub fn mode_labels(self) -> Vec<ModeLabel> {
        [ModeLabel::Major, ModeLabel::Minor]
            .into_iter()
            .filter(|&label| !self.common_root_offsets(label).is_empty())
            .collect()
    }

    /// The family this structure belongs to.
    pub fn chord_type(self) -> ChordType {
        for chord_type in ChordType::ALL {
            if chord_type.structures().contains(&self) {
                return chord_type;
            }
        }
        unreachable!("every structure belongs to a family")
    }

    /// The inversions this structure supports. Triads and triad-like
    /// structures invert twice, sevenths three times; the Neapolitan appears
    /// in root position or first inversion, the augmented sixths only in
    /// their characteristic position.
    pub fn inversions(self) -> &'static [Inversion] {
        match self {
            ChordStructure::NeapolitanSixth => &[Inversion::Root, Inversion::First],
            ChordStructure::ItalianSixth
            | ChordStructure::FrenchSixth
            | ChordStructure::GermanSixth => &[Inversion::Root],
            _ => {
                if self.template().len() == 4 {
                    &[
                        Inversion::Root,
                        Inversion::First,
                        Inversion::Second,
                        Inversion::Third,
                    ]
                } else {
                    &[Inversion::Root, Inversion::First, Inversion::Second]
                }
            }
        }
    }

    /// Sonority label for the quality question, or `None` for the
    /// augmented-sixth chords, which have no triad/seventh quality.
    pub fn quality(self) -> Option<&'static str> {
        match self {
            ChordStructure::MajorTriad
            | ChordStructure::NeapolitanSixth
            | ChordStructure::FlatThreeMajorTriad
            | ChordStructure::FlatSixMajorTriad
            | ChordStructure::FlatSevenMajorTriad
            | ChordStructure::TonicMajorInMinor
            | ChordStructure::SubdominantMajorInMinor
            | ChordStructure::FiveOfFive
            | ChordStructure::FiveOfSix
            | ChordStructure::FiveOfSevenDim => Some("M"),
            ChordStructure::MinorTriad => Some("m"),
            ChordStructure::DiminishedTriad => Some("o"),
            ChordStructure::AugmentedTriad => Some("+"),
            ChordStructure::DominantSeventh
            | ChordStructure::FiveSevenOfFive
            | ChordStructure::FiveSevenOfSix
            | ChordStructure::FiveSevenOfMajorFour
            | ChordStructure::FiveSevenOfMinorFour
            | ChordStructure::FiveSevenOfSevenDim => Some("7"),
            ChordStructure::MajorSeventh => Some("M7"),
            ChordStructure::MinorSeventh => Some("m7"),
            ChordStructure::HalfDiminishedSeventh
            | ChordStructure::SevenHalfDimSevenOfSeven => Some("ø7"),
            ChordStructure::FullyDiminishedSeventh
            | ChordStructure::SevenDimSevenOfFive => Some("o7"),
            ChordStructure::ItalianSixth
            | ChordStructure::FrenchSixth
            | ChordStructure::GermanSixth => None,
        }
    }

    /// Whether the structure reads as a major-quality sonority for numeral
    /// casing.
    fn has_major_quality(self) -> bool {
        matches!(
            self,
            ChordStructure::MajorTriad
                | ChordStructure::AugmentedTriad
                | ChordStructure::DominantSeventh
                | ChordStructure::MajorSeventh
        )
    }

    /// The roman numeral for this structure rooted on a scale degree. The
    /// fixed non-diatonic structures are their own numeral; diatonic
    /// structures compose alteration prefix, cased numeral, and quality
    /// suffix ("b6" + minor triad = "bvi", degree 2 + m7 = "ii7").
    pub fn numeral(self, degree: u8, incidental: i8) -> String {
        let suffix = match self {
            ChordStructure::MajorTriad | ChordStructure::MinorTriad => "",
            ChordStructure::DiminishedTriad => "o",
            ChordStructure::AugmentedTriad => "+",
            ChordStructure::DominantSeventh | ChordStructure::MinorSeventh => "7",
            ChordStructure::MajorSeventh => "M7",
            ChordStructure::HalfDiminishedSeventh => "ø7",
            ChordStructure::FullyDiminishedSeventh => "o7",
            _ => return self.display_name().to_string(),
        };
        let prefix = match incidental {
            i if i < 0 => "b",
            0 => "",
            _ => "#",
        };
        format!(
            "{}{}{}",
            prefix,
            degree_numeral(degree, self.has_major_quality()),
            suffix
        )
    }
}

/// A labeled rotation of chord tones: how many times the lowest tone is
/// popped and re-stacked an octave higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inversion {
    Root,
    First,
    Second,
    Third,
}

impl Inversion {
    /// Rotation steps this inversion applies.
    pub fn steps(self) -> usize {
        match self {
            Inversion::Root => 0,
            Inversion::First => 1,
            Inversion::Second => 2,
            Inversion::Third => 3,
        }
    }

    /// Figured-bass label, which depends on the chord size: first inversion
    /// of a triad is "63" but of a seventh chord "65".
    pub fn label(self, chord_size: usize) -> &'static str {
        match (self, chord_size) {
            (Inversion::Root, _) => "root",
            (Inversion::First, 4) => "65",
            (Inversion::First, _) => "63",
            (Inversion::Second, 4) => "43",
            (Inversion::Second, _) => "64",
            (Inversion::Third, _) => "42",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_structures() -> Vec<ChordStructure> {
        ChordType::ALL
            .iter()
            .flat_map(|t| t.structures().iter().copied())
            .collect()
    }

    #[test]
    fn test_every_family_is_nonempty() {
        for chord_type in ChordType::ALL {
            assert!(!chord_type.structures().is_empty());
        }
        assert_eq!(all_structures().len(), 28);
    }

    #[test]
    fn test_chord_type_round_trips() {
        for structure in all_structures() {
            assert!(structure
                .chord_type()
                .structures()
                .contains(&structure));
        }
    }

    #[test]
    fn test_every_structure_has_a_drawable_mode() {
        // A structure with no non-empty common offset list could never be
        // selected; the catalog must not contain one.
        for structure in all_structures() {
            assert!(
                !structure.mode_labels().is_empty(),
                "{:?} has no drawable mode",
                structure
            );
        }
    }

    #[test]
    fn test_templates_stack_in_distinct_letters() {
        // Every template must resolve to strictly increasing degrees under
        // its own mode constructor, so spelled letters never repeat.
        for structure in all_structures() {
            let identities = structure.mode_constructor().identities();
            let degrees: Vec<u8> = structure
                .template()
                .iter()
                .map(|&t| identities[t as usize].degree)
                .collect();
            let mut sorted = degrees.clone();
            sorted.dedup();
            assert_eq!(degrees, sorted, "{:?} repeats a letter", structure);
            assert!(
                degrees.windows(2).all(|w| w[0] < w[1]),
                "{:?} degrees not increasing: {:?}",
                structure,
                degrees
            );
            assert_eq!(degrees[0], 1, "{:?} template must start on its root", structure);
        }
    }

    #[test]
    fn test_augmented_triad_only_occurs_in_minor() {
        assert!(ChordStructure::AugmentedTriad
            .common_root_offsets(ModeLabel::Major)
            .is_empty());
        assert_eq!(
            ChordStructure::AugmentedTriad.common_root_offsets(ModeLabel::Minor),
            &[3]
        );
        assert_eq!(
            ChordStructure::AugmentedTriad.mode_labels(),
            vec![ModeLabel::Minor]
        );
    }

    #[test]
    fn test_inversion_sets_per_family() {
        assert_eq!(ChordStructure::MajorTriad.inversions().len(), 3);
        assert_eq!(ChordStructure::DominantSeventh.inversions().len(), 4);
        assert_eq!(ChordStructure::FiveSevenOfFive.inversions().len(), 4);
        assert_eq!(
            ChordStructure::NeapolitanSixth.inversions(),
            &[Inversion::Root, Inversion::First]
        );
        assert_eq!(ChordStructure::GermanSixth.inversions(), &[Inversion::Root]);
    }

    #[test]
    fn test_inversion_labels_by_size() {
        assert_eq!(Inversion::First.label(3), "63");
        assert_eq!(Inversion::First.label(4), "65");
        assert_eq!(Inversion::Second.label(3), "64");
        assert_eq!(Inversion::Second.label(4), "43");
        assert_eq!(Inversion::Third.label(4), "42");
        assert_eq!(Inversion::Root.label(3), "root");
    }

    #[test]
    fn test_numerals() {
        assert_eq!(ChordStructure::MajorTriad.numeral(5, 0), "V");
        assert_eq!(ChordStructure::MinorSeventh.numeral(2, 0), "ii7");
        assert_eq!(ChordStructure::DiminishedTriad.numeral(7, 0), "viio");
        assert_eq!(ChordStructure::MajorTriad.numeral(6, -1), "bVI");
        assert_eq!(ChordStructure::NeapolitanSixth.numeral(2, -1), "N6");
        assert_eq!(ChordStructure::FiveSevenOfFive.numeral(2, 0), "V7/V");
    }

    #[test]
    fn test_possible_pool_widens_only_diatonic_structures() {
        assert_eq!(
            ChordStructure::MajorTriad
                .possible_root_offsets(ModeLabel::Major)
                .len(),
            12
        );
        assert_eq!(
            ChordStructure::NeapolitanSixth.possible_root_offsets(ModeLabel::Major),
            &[1]
        );
    }
}
