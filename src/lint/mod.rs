pub(crate) mod visual;
