//! playcards renders print-ready assets from a music playlist:
//!
//! - a front/back card pair per track (year, artists and title; QR code of the track URL),
//! - a bar chart of release years,
//! - box art tiling the playlist name diagonally.
//!
//! Load a [`Playlist`], build a [`RenderConfig`], then call [`generate`] (or one of the
//! individual generators). Every output is a pure function of its inputs.
#![forbid(unsafe_code)]

mod foundation;

pub mod config;
pub(crate) mod generate;
pub(crate) mod playlist;
pub(crate) mod render;

pub use crate::config::{FontSpec, HistogramStyle, RenderConfig, RenderConfigDef};
pub use crate::foundation::color::Rgb8;
pub use crate::foundation::error::{PlaycardsError, PlaycardsResult};

pub use crate::generate::cards::{
    BACKS_DIR, CardField, CardThreading, CardsOutput, FRONTS_DIR, OverflowWarning,
    back_file_name, exceeds_fit, front_file_name, generate_cards,
};
pub use crate::generate::code::{CodeMatrix, CodePlacement, QUIET_ZONE_MODULES};
pub use crate::generate::histogram::{YearHistogram, generate_histogram};
pub use crate::generate::pipeline::{
    BOX_FILE, GenerateOpts, GenerateReport, HISTOGRAM_FILE, OutputTarget, generate,
};
pub use crate::generate::tiling::{generate_box, tile_origins, tile_step};
pub use crate::playlist::model::{Playlist, Track};
pub use crate::playlist::spotify::SpotifyPage;
pub use crate::render::canvas::Frame;
pub use crate::render::text::{FontRole, TextEngine, TextExtent};
