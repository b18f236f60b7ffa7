use std::error;
use std::ffi::OsString;
use std::fmt;

#[derive(Debug)]
pub(crate) struct InvalidVarError {
    pub(crate) val: OsString,
}

impl InvalidVarError {
    pub(crate) const fn invalid_utf8(val: OsString) -> Self {
        Self { val }
    }
}

impl fmt::Display for InvalidVarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid utf8: {:?}", self.val)
    }
}

impl error::Error for InvalidVarError {}
