use std::collections::HashMap;
use std::fmt::Debug;

use crate::frontend::error::{FrontendError, FrontendErrorKind};
use crate::meta::Meta;

/// alias, we use String as key everywhere in the project
pub type Env<T> = HashMap<String, T>;

pub trait UniqueEnv<ItemT, LocationT> {
    /// associates k with v, making sure k was not declared before
    fn insert_unique(&mut self, k: String, v: Meta<ItemT, LocationT>) -> Result<(), FrontendError<LocationT>>;
}

impl<ItemT: Debug + Clone, LocationT: Clone> UniqueEnv<ItemT, LocationT> for Env<ItemT> {
    /// insert only items, the first declaration wins
    fn insert_unique(&mut self, k: String, v: Meta<ItemT, LocationT>) -> Result<(), FrontendError<LocationT>> {
        if self.contains_key(&k) {
            let kind = FrontendErrorKind::EnvError {
                message: format!("Duplicate declaration of {}", k)
            };
            Err(FrontendError::new(kind, v.get_meta().clone()))
        } else {
            self.insert(k, v.item);
            Ok(())
        }
    }
}
