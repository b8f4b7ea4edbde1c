//! Library components of the patron data prep CLI: logging bootstrap
//! and CSV table persistence. The argument surface and the command
//! handlers live in the binary.

pub mod logging;
pub mod table_io;
