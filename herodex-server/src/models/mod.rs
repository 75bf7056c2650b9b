//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError(s), not panic.

pub mod hero;
pub mod input;
pub mod query;
pub mod validation;

pub use hero::{split_list, Hero, HeroId, HeroPatch, NewHero};
pub use input::{HeroForm, HeroPayload, ListInput};
pub use query::{AgeFilter, AgeFilterParams, AttributeQuery, AttributeValue, HeroAttribute};
pub use validation::{FieldError, ValidationError, ValidationErrors};
