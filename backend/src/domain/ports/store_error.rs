//! Failure vocabulary shared by every store port.

use super::define_port_error;

define_port_error! {
    /// Errors raised by store adapters.
    ///
    /// Messages may contain adapter detail; inbound adapters log them and
    /// hand clients a generic envelope instead.
    pub enum StoreError {
        /// The store could not be reached.
        Connection { message: String } => "store connection failed: {message}",
        /// The store did not answer within the configured bound.
        Timeout { message: String } => "store request timed out: {message}",
        /// The store answered with a non-success status.
        Rejected { status: u16, message: String } =>
            "store rejected request with status {status}: {message}",
        /// The store answered with a body that could not be decoded.
        Decode { message: String } => "store response could not be decoded: {message}",
    }
}
