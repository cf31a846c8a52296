pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("edge requires both a source and a target node")]
    MissingEndpoint,

    #[error("source and target of an edge must differ (self loops are not supported)")]
    SelfLoop,

    #[error("node is not an endpoint of this edge")]
    NotAnEndpoint,
}
