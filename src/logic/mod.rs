//! Logic modules: turn collected answers into diagnoses.
//!
//! - `resolver` - rule table and the pure evaluation pass

pub mod resolver;
