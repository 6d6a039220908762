mod eq;
mod ids;
mod track;

pub use eq::{
    db_to_linear, EqBand, EqVector, EQ_BANDS, EQ_DB_LIMIT, EQ_SLOTS, FILTER_BAND_COUNT,
    VOLUME_SLOT,
};
pub use ids::TrackId;
pub use track::{Mix, SourceLocator, Track, TrackPatch};
