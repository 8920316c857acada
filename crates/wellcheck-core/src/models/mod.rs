pub mod instrument;
pub mod respondent;
