//! Application-wide constants.

/// Default world scale: how many world pixels make up one meter.
pub const DEFAULT_PIXELS_PER_METER: f64 = 20.0;

/// Smallest permitted zoom scale.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest permitted zoom scale.
pub const MAX_ZOOM: f64 = 5.0;

/// Multiplicative step applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.1;

/// Resize handles never shrink a space below this many pixels on either axis.
pub const MIN_SPACE_SIZE_PX: f64 = 20.0;

/// Default screen-space snap threshold in pixels.
pub const DEFAULT_SNAP_THRESHOLD_PX: f64 = 10.0;

/// Screen-space tolerance used when hit-testing handles, vertices and edges.
pub const HIT_TOLERANCE_PX: f64 = 6.0;

/// Corner radius used for the dashed zone hulls.
pub const ZONE_HULL_RADIUS: f64 = 12.0;

/// Upper bound of the circulation slider (fraction of net area).
pub const MAX_CIRCULATION_FACTOR: f64 = 0.5;

/// Number of uniform parameter samples per Bezier segment when flattening.
pub const BEZIER_SAMPLES_PER_SEGMENT: usize = 10;

/// Real-world length of the calibrated scale bar, in meters.
pub const SCALE_BAR_METERS: f64 = 10.0;

/// Snapshot format version written by the serializer.
pub const SNAPSHOT_VERSION: &str = "2.0";
