//! Command-line front end for readcorrect.

pub mod correct;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "readcorrect";
}
