pub(crate) mod rules;
pub(crate) mod scorer;
