//! Response formatting: JSON views for the API, HTML pages for the browser

pub mod html;
pub mod json;

pub use html::{render_form, render_index, render_landing, FormPage, IndexPage, LandingPage};
pub use json::{render_hero, render_hero_list, HeroEnvelope, HeroView, Message, ValidationReport};
