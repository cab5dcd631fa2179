pub mod outline;
pub mod sketch;

pub mod errors {
    use thiserror::Error;
    use tubeframe_core::profile::ProfileKind;

    #[derive(Debug, Error)]
    pub enum EngineError {
        #[error(
            "invalid tube dimensions: width={width}, height={height}, \
             wall thickness={wall_thickness}"
        )]
        InvalidDimensions {
            width: f64,
            height: f64,
            wall_thickness: f64,
        },
        #[error("{count} closed regions share the maximal horizontal extent {extent}")]
        AmbiguousGeometry { extent: f64, count: usize },
        #[error("drafting port reported no closed region")]
        NoClosedRegion,
        #[error("profile kind {0} has no cross-section geometry")]
        NoGeometry(ProfileKind),
    }
}
