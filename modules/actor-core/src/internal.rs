pub(crate) mod actor_cell;
