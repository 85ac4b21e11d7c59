#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Buffer '{0}' is read-only")]
    ReadOnlyBuffer(String),

    #[error("{0} request(s) failed")]
    RequestsFailed(usize),
}
