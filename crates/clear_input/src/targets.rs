use css::{SelectorError, SelectorList};
use dom::{Document, Id};
use page::PageState;
use std::fmt;

type Resolver = Box<dyn Fn(&Document) -> Vec<Id>>;

/// Which elements a controller binds, re-evaluated on every update.
pub enum Targets {
    Query(SelectorList),
    Elements(Vec<Id>),
    Resolver(Resolver),
}

impl Targets {
    pub fn query(selector: &str) -> Result<Self, SelectorError> {
        SelectorList::parse(selector).map(Targets::Query)
    }

    pub fn elements(ids: impl IntoIterator<Item = Id>) -> Self {
        Targets::Elements(ids.into_iter().collect())
    }

    pub fn resolver<F>(f: F) -> Self
    where
        F: Fn(&Document) -> Vec<Id> + 'static,
    {
        Targets::Resolver(Box::new(f))
    }

    /// Current matches in document order (insertion order for fixed sets).
    pub(crate) fn resolve(&self, page: &PageState) -> Vec<Id> {
        match self {
            Targets::Query(list) => page.query_all(list),
            Targets::Elements(ids) => ids.clone(),
            Targets::Resolver(f) => f(page.dom()),
        }
    }
}

impl From<SelectorList> for Targets {
    fn from(list: SelectorList) -> Self {
        Targets::Query(list)
    }
}

impl fmt::Debug for Targets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Targets::Query(list) => f.debug_tuple("Query").field(list).finish(),
            Targets::Elements(ids) => f.debug_tuple("Elements").field(ids).finish(),
            Targets::Resolver(_) => f.write_str("Resolver(..)"),
        }
    }
}
