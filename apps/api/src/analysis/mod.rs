//! Pure text analysis shared by the review assistant and the ATS scorer.

pub mod fragments;
pub mod keywords;
pub mod lexicon;
pub mod ner;
pub mod sanitizer;
pub mod sections;
pub mod skills;
