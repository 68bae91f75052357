//! Naming capability consumed by path rendering.
//!
//! Each data source implements [`NamingScheme`] once; the tree only knows how to
//! walk from the root and glue names together with what the scheme returns.

/// Separator and suffix strings for rendering a node's path, plus the payload
/// type the data source attaches to every node.
pub trait NamingScheme {
    /// Per-node payload (e.g. a full filesystem path).
    type Meta;

    /// Text placed between two consecutive names.
    fn separator(&self) -> &str;

    /// Text appended after a name, distinguishing leaves from containers.
    fn suffix(&self, is_leaf: bool) -> &str;
}

/// Scheme without payload: `/` between names, no suffixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlainNaming;

impl NamingScheme for PlainNaming {
    type Meta = ();

    fn separator(&self) -> &str {
        "/"
    }

    fn suffix(&self, _is_leaf: bool) -> &str {
        ""
    }
}
