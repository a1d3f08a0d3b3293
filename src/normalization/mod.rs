pub mod aliases;
pub mod names;

pub use aliases::{AliasRule, AliasTable};
pub use names::{CanonicalPair, NameNormalizer, normalize_name};
