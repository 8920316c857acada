pub mod evaluate;
pub mod health;
pub mod instruments;
pub mod respondents;
