use crate::types::*;

/// Pre-order walk over a note tree: parent before children, children in
/// document order. Yields each item with its depth (the root is depth 0).
pub struct PreOrder<'a> {
    stack: Vec<(&'a NoteItem, usize)>,
}

impl<'a> PreOrder<'a> {
    pub fn new(root: &'a NoteItem) -> Self {
        Self {
            stack: vec![(root, 0)],
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (&'a NoteItem, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (item, depth) = self.stack.pop()?;
        // Reverse so the first child is popped next
        for child in item.children().iter().rev() {
            self.stack.push((child, depth + 1));
        }
        Some((item, depth))
    }
}

impl NoteItem {
    /// Pre-order walk of this item and its descendants.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(self)
    }

    /// Visit this item and its descendants in pre-order.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&NoteItem, usize),
    {
        self.walk_from(0, &mut visit);
    }

    fn walk_from<F>(&self, depth: usize, visit: &mut F)
    where
        F: FnMut(&NoteItem, usize),
    {
        visit(self, depth);
        for child in self.children() {
            child.walk_from(depth + 1, visit);
        }
    }
}

impl ClinicalNote {
    /// Pre-order walk starting at the root document item.
    pub fn iter(&self) -> PreOrder<'_> {
        self.root().iter()
    }

    /// Visit every item, root included, in pre-order.
    pub fn walk<F>(&self, visit: F)
    where
        F: FnMut(&NoteItem, usize),
    {
        self.root().walk(visit);
    }

    /// Header-labeled sections in document order.
    pub fn sections(&self) -> impl Iterator<Item = &NoteItem> {
        self.items().iter().filter(|item| item.kind == ItemKind::Section)
    }

    /// First section whose label matches, ignoring ASCII case and surrounding whitespace.
    pub fn find_section(&self, label: &str) -> Option<&NoteItem> {
        let wanted = label.trim();
        self.sections().find(|section| {
            section
                .label
                .as_deref()
                .is_some_and(|l| l.trim().eq_ignore_ascii_case(wanted))
        })
    }

    /// Leaf items (single-span payloads) in reading order.
    pub fn leaves(&self) -> impl Iterator<Item = &NoteItem> {
        self.iter().map(|(item, _)| item).filter(|item| item.is_leaf())
    }
}
