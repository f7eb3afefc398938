
mod test_persistence;
mod test_undo;
