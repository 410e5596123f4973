/// The chain of intersections currently being coordinated, root first.
///
/// Each recursive call extends its parent's path with a new stack-allocated
/// link, so the path is never mutated and every call sees only its own
/// ancestry. Concurrent requests cannot observe each other's traversal.
#[derive(Debug, Clone, Copy)]
pub struct VisitPath<'a> {
    id: &'a str,
    parent: Option<&'a VisitPath<'a>>,
    depth: usize,
}

impl<'a> VisitPath<'a> {
    pub fn root(id: &'a str) -> Self {
        Self {
            id,
            parent: None,
            depth: 1,
        }
    }

    pub fn extend(&'a self, id: &'a str) -> VisitPath<'a> {
        VisitPath {
            id,
            parent: Some(self),
            depth: self.depth + 1,
        }
    }

    /// Number of intersections on the path.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Ids from the head back to the root.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        let mut next = Some(self);
        std::iter::from_fn(move || {
            let link = next?;
            next = link.parent;
            Some(link.id)
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|visited| visited == id)
    }
}
