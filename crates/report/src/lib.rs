//! Tabular reporting for terratab
//!
//! Turns zonal count tables into the land-use cross-tabulation report:
//! labelled frames, pivots with TOTALS margins, percentage views and
//! the final multi-sheet workbook. Intermediate tables persist through
//! [`Workspace`].

pub mod builder;
pub mod frame;
pub mod landuse;
pub mod workbook;
pub mod workspace;

pub use builder::{build_report, Report};
pub use frame::Frame;
pub use landuse::{LandUse, ALL_LAND_USES, CLOSE_COL, ELEV_BANDS, FAR_COL, TOTALS};
pub use workbook::{write_workbook, SHEET_NAMES};
pub use workspace::Workspace;

/// Common imports
pub mod prelude {
    pub use crate::builder::{build_report, Report};
    pub use crate::frame::Frame;
    pub use crate::landuse::LandUse;
    pub use crate::workbook::write_workbook;
    pub use crate::workspace::Workspace;
}
