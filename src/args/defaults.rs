pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("uriload-harness/", env!("CARGO_PKG_VERSION"));
