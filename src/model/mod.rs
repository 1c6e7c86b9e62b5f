//! Document and region model.
//!
//! A [`Document`] owns the loaded PDF and an ordered list of regions for
//! every page that has been visited. Region lists can be saved to and
//! restored from a [`RegionSet`] file.

mod document;
mod region;
mod region_set;

pub use document::{checksum, Document};
pub use region::{PageRegions, Region};
pub use region_set::{PdfInfo, RegionSet, SchemaVersion};
