pub use crate::geo_point::{normalize_longitude, GeoPoint};
pub use crate::time::UtcTimestamp;
pub use crate::tle::ElementSet;
