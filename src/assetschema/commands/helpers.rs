use crate::error::Result;
use crate::store::{DataStore, SchemaState};

/// Run `mutate` against a copy of the current snapshot and commit the copy only
/// if `mutate` succeeds.
pub fn apply<S, T, F>(store: &mut S, mutate: F) -> Result<T>
where
    S: DataStore,
    F: FnOnce(&mut SchemaState) -> Result<T>,
{
    let mut next = store.state().clone();
    let outcome = mutate(&mut next)?;
    store.commit(next)?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaError;
    use crate::model::Category;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn failed_mutation_leaves_state_untouched() {
        let mut store = InMemoryStore::new();
        let outcome: Result<()> = apply(&mut store, |state| {
            state.categories.push(Category::new("half", "Half", None));
            Err(SchemaError::CategoryNotFound("other".into()))
        });

        assert!(outcome.is_err());
        assert!(store.state().categories.is_empty());
    }

    #[test]
    fn successful_mutation_is_committed() {
        let mut store = InMemoryStore::new();
        let id = apply(&mut store, |state| {
            state.categories.push(Category::new("boiler", "Boiler", None));
            Ok("boiler".to_string())
        })
        .unwrap();

        assert_eq!(id, "boiler");
        assert_eq!(store.state().categories.len(), 1);
    }
}
