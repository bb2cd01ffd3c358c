//! LAZY combinator - deferred schema construction for recursive shapes

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::foundation::{Outcome, ParseContext, Validate};
use crate::schema::Schema;
use crate::value::Value;

type Init = Arc<dyn Fn() -> Schema + Send + Sync>;

/// Builds its schema on first use and reuses it afterwards.
///
/// Clones share the same cell, so a recursive definition is built once no
/// matter how many handles refer to it.
///
/// # Examples
///
/// ```
/// use vellum_schema::prelude::*;
/// use serde_json::json;
///
/// fn category() -> Schema {
///     object!{
///         "name" => string(),
///         "children" => array(lazy(category)),
///     }
///     .into_schema()
/// }
///
/// let tree = category();
/// assert!(tree.is_valid(json!({"name": "a", "children": [{"name": "b", "children": []}]})));
/// assert!(!tree.is_valid(json!({"name": "a", "children": [{"name": 1, "children": []}]})));
/// ```
#[derive(Clone)]
pub struct LazySchema {
    cell: Arc<OnceLock<Schema>>,
    init: Init,
}

impl LazySchema {
    pub fn new<F>(init: F) -> Self
    where
        F: Fn() -> Schema + Send + Sync + 'static,
    {
        Self {
            cell: Arc::new(OnceLock::new()),
            init: Arc::new(init),
        }
    }

    /// The built schema, building it if needed.
    pub fn force(&self) -> &Schema {
        self.cell.get_or_init(|| (self.init)())
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl Validate for LazySchema {
    fn validate(&self, input: &Value, ctx: &ParseContext<'_>) -> Outcome {
        self.force().validate(input, ctx)
    }
}

impl fmt::Debug for LazySchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazySchema")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::ValidateExt;
    use crate::{lazy, string};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_initializes_once() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);
        let schema = lazy(|| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            string().into_schema()
        });
        let copy = schema.clone();

        assert!(!schema.is_initialized());
        assert!(schema.is_valid("a"));
        assert!(!copy.is_valid(1));
        assert!(copy.is_initialized());
        assert_eq!(BUILDS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_does_not_build() {
        let schema = lazy(|| string().into_schema());
        assert!(format!("{schema:?}").contains("initialized: false"));
        assert!(!schema.is_initialized());
    }
}
