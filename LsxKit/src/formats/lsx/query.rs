//! Depth-first search over the canonical tree
//!
//! [`Matches`] is lazy and `Clone`: cloning an unconsumed iterator restarts the
//! same search without walking the tree again up front.

use super::document::Element;

/// Pre-order depth-first iterator over an element and all of its descendants.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Descendants<'a> {
    fn new(root: &'a Element) -> Self {
        Descendants { stack: vec![root] }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        // Reverse so the first child is visited first.
        self.stack.extend(next.children().iter().rev());
        Some(next)
    }
}

/// Lazy sequence of elements matching a predicate, in document order.
#[derive(Clone)]
pub struct Matches<'a, P> {
    inner: Descendants<'a>,
    predicate: P,
}

impl<'a, P> Iterator for Matches<'a, P>
where
    P: FnMut(&Element) -> bool,
{
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = &mut self.predicate;
        self.inner.find(|el| predicate(*el))
    }
}

impl Element {
    /// Walk this element and every descendant in document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self)
    }

    /// All elements in this subtree (including `self`) matching `predicate`.
    pub fn find_all<P>(&self, predicate: P) -> Matches<'_, P>
    where
        P: FnMut(&Element) -> bool,
    {
        Matches {
            inner: self.descendants(),
            predicate,
        }
    }

    /// First element in document order matching `predicate`.
    pub fn find_first<P>(&self, predicate: P) -> Option<&Element>
    where
        P: FnMut(&Element) -> bool,
    {
        self.find_all(predicate).next()
    }

    /// Mutable access to the first element in document order matching `predicate`.
    pub fn find_first_mut<P>(&mut self, mut predicate: P) -> Option<&mut Element>
    where
        P: FnMut(&Element) -> bool,
    {
        find_first_mut_inner(self, &mut predicate)
    }

    /// Convenience: all elements with the given tag.
    pub fn find_all_tagged<'a, 'b>(
        &'a self,
        tag: &'b str,
    ) -> impl Iterator<Item = &'a Element> + Clone + use<'a, 'b> {
        self.find_all(move |el: &Element| el.tag == tag)
    }
}

fn find_first_mut_inner<'a, P>(el: &'a mut Element, predicate: &mut P) -> Option<&'a mut Element>
where
    P: FnMut(&Element) -> bool,
{
    if predicate(el) {
        return Some(el);
    }
    for child in el.children_mut() {
        if let Some(found) = find_first_mut_inner(child, predicate) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("a")
            .with_child(
                Element::new("b")
                    .with_attr("n", "1")
                    .with_child(Element::new("c").with_attr("n", "2")),
            )
            .with_child(Element::new("c").with_attr("n", "3"))
    }

    #[test]
    fn test_descendants_preorder() {
        let tree = sample();
        let tags: Vec<_> = tree.descendants().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, ["a", "b", "c", "c"]);
    }

    #[test]
    fn test_find_all_is_restartable() {
        let tree = sample();
        let matches = tree.find_all_tagged("c");
        let first: Vec<_> = matches.clone().filter_map(|e| e.attr("n")).collect();
        let second: Vec<_> = matches.filter_map(|e| e.attr("n")).collect();
        assert_eq!(first, ["2", "3"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_first_mut() {
        let mut tree = sample();
        if let Some(el) = tree.find_first_mut(|e| e.attr("n") == Some("3")) {
            el.set_attr("n", "30");
        }
        assert!(tree.find_first(|e| e.attr("n") == Some("30")).is_some());
    }
}
