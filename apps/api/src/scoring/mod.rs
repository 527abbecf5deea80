// Scoring engines. The ATS rubric and the interview-prep role match are
// separate policies and never share weights.

pub mod ats;
pub mod coach;
pub mod role_match;
