use pdf_writer::Ref;
use std::collections::HashMap;

/// The objects of a document that other objects need to point at
#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    Font(usize),
    ContentForPage(usize),
    Image(usize),
    ImageMask(usize),
}

/// Hands out PDF object ids in write order and remembers which object got
/// which, so later objects can refer back to earlier ones
#[derive(Debug, Default)]
pub struct ObjectRefs {
    refs: HashMap<RefType, Ref>,
    last_id: i32,
}

impl ObjectRefs {
    pub fn get(&self, ref_type: RefType) -> Option<Ref> {
        self.refs.get(&ref_type).copied()
    }

    /// A fresh id for `ref_type`, replacing any earlier one
    pub fn alloc(&mut self, ref_type: RefType) -> Ref {
        self.last_id += 1;
        let id = Ref::new(self.last_id);
        self.refs.insert(ref_type, id);
        id
    }

    /// Ids of the first `count` pages, in page order
    pub fn pages(&self, count: usize) -> Vec<Ref> {
        (0..count)
            .filter_map(|i| self.get(RefType::Page(i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_retrievable() {
        let mut refs = ObjectRefs::default();
        let catalog = refs.alloc(RefType::Catalog);
        let page = refs.alloc(RefType::Page(0));
        assert_ne!(catalog, page);
        assert_eq!(catalog, Ref::new(1));
        assert_eq!(refs.get(RefType::Page(0)), Some(page));
        assert_eq!(refs.get(RefType::Page(1)), None);
        assert_eq!(refs.pages(2), vec![page]);
    }
}
