pub(crate) mod lore;
pub(crate) mod serve;
