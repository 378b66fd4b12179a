pub mod error;
pub mod generator;
pub mod key;
pub mod mode;
pub mod pitch;
pub mod question;
pub mod staff;
pub mod structure;

pub use error::ChordGenError;
pub use generator::{generate, Chord, ChordTypeFilter, GeneratorOptions, RootPool};
pub use key::KeySignature;
pub use mode::{ModeLabel, RomanNumeralContext};
pub use pitch::{Accidental, IndependentPitch, LetterName};
pub use question::{Choice, Question, QuestionKind};
pub use staff::{Clef, Note};
pub use structure::{ChordStructure, ChordType, Inversion};
