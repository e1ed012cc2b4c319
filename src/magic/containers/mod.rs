//! Container disambiguators.
//!
//! One outer magic number can wrap several real formats. Each resolver here
//! takes the whole buffer and returns the most specific format it can
//! prove, or `None` to hand the buffer back to the rest of the catalog.
//! All field reads go through [`super::window`] and are bounds-checked.

pub mod cfb;
pub mod pe;
pub mod zip;
