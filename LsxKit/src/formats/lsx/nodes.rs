//! LSX structural conventions on top of the generic tree
//!
//! An LSX `node` element carries its data as `<attribute id=".." type=".." value=".."/>`
//! children and its sub-nodes inside a `<children>` wrapper:
//!
//! ```xml
//! <node id="flag">
//!     <attribute id="UUID" type="guid" value="..."/>
//!     <children>
//!         <node id="..."/>
//!     </children>
//! </node>
//! ```

use super::document::Element;

/// Tag of a structural node.
pub const NODE_TAG: &str = "node";
/// Tag of a typed attribute child.
pub const ATTRIBUTE_TAG: &str = "attribute";
/// Tag of the wrapper holding a node's sub-nodes.
pub const CHILDREN_TAG: &str = "children";

/// Parse an LSX boolean (`True`/`False`, `1`/`0`, any case).
#[must_use]
pub fn parse_lsx_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        None
    }
}

/// Format a boolean the way LSX documents spell it.
#[must_use]
pub fn format_lsx_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}

impl Element {
    /// A fresh `<node id="..">`.
    #[must_use]
    pub fn lsx_node(id: &str) -> Self {
        Element::new(NODE_TAG).with_attr("id", id)
    }

    /// A fresh `<attribute id=".." type=".." value=".."/>`.
    #[must_use]
    pub fn lsx_attribute(id: &str, type_name: &str, value: &str) -> Self {
        Element::new(ATTRIBUTE_TAG)
            .with_attr("id", id)
            .with_attr("type", type_name)
            .with_attr("value", value)
    }

    /// The `id` of a `node` element.
    #[must_use]
    pub fn lsx_id(&self) -> Option<&str> {
        if self.tag == NODE_TAG { self.attr("id") } else { None }
    }

    /// Whether this is `<node id="{id}">`.
    #[must_use]
    pub fn is_lsx_node(&self, id: &str) -> bool {
        self.lsx_id() == Some(id)
    }

    /// Typed attribute child by id.
    #[must_use]
    pub fn lsx_attribute_child(&self, id: &str) -> Option<&Element> {
        self.children()
            .iter()
            .find(|c| c.tag == ATTRIBUTE_TAG && c.attr("id") == Some(id))
    }

    /// Mutable typed attribute child by id.
    pub fn lsx_attribute_child_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.children_mut()
            .iter_mut()
            .find(|c| c.tag == ATTRIBUTE_TAG && c.attr("id") == Some(id))
    }

    /// Plain `value` of a typed attribute child.
    #[must_use]
    pub fn lsx_value(&self, id: &str) -> Option<&str> {
        self.lsx_attribute_child(id)?.attr("value")
    }

    /// Typed attribute child parsed as an LSX boolean; missing or unparsable is `None`.
    #[must_use]
    pub fn lsx_bool(&self, id: &str) -> Option<bool> {
        self.lsx_value(id).and_then(parse_lsx_bool)
    }

    /// Typed attribute child parsed as an integer.
    #[must_use]
    pub fn lsx_int(&self, id: &str) -> Option<i32> {
        self.lsx_value(id)?.trim().parse().ok()
    }

    /// Sub-nodes, whether held directly or inside `<children>` wrappers.
    pub fn lsx_children(&self) -> impl Iterator<Item = &Element> {
        self.children().iter().flat_map(|c| {
            if c.tag == CHILDREN_TAG {
                c.children()
            } else {
                std::slice::from_ref(c)
            }
        })
        .filter(|c| c.tag == NODE_TAG)
    }

    /// Mutable sub-nodes, whether held directly or inside `<children>` wrappers.
    pub fn lsx_children_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children_mut()
            .iter_mut()
            .flat_map(|c| {
                if c.tag == CHILDREN_TAG {
                    c.children_mut()
                } else {
                    std::slice::from_mut(c)
                }
            })
            .filter(|c| c.tag == NODE_TAG)
    }

    /// Sub-nodes with the given id.
    pub fn lsx_nodes<'a, 'b>(
        &'a self,
        id: &'b str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'b> {
        self.lsx_children().filter(move |c| c.is_lsx_node(id))
    }

    /// Sub-nodes whose id matches `id` ignoring ASCII case.
    pub fn lsx_nodes_ignore_case<'a, 'b>(
        &'a self,
        id: &'b str,
    ) -> impl Iterator<Item = &'a Element> + use<'a, 'b> {
        self.lsx_children()
            .filter(move |c| c.lsx_id().is_some_and(|n| n.eq_ignore_ascii_case(id)))
    }

    /// First sub-node with the given id.
    #[must_use]
    pub fn lsx_child_node(&self, id: &str) -> Option<&Element> {
        self.lsx_nodes(id).next()
    }

    /// Mutable first sub-node with the given id.
    pub fn lsx_child_node_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.lsx_children_mut().find(|c| c.is_lsx_node(id))
    }

    /// Mutable first sub-node whose id matches ignoring ASCII case.
    pub fn lsx_child_node_ignore_case_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.lsx_children_mut()
            .find(|c| c.lsx_id().is_some_and(|n| n.eq_ignore_ascii_case(id)))
    }

    /// Mutable `n`-th sub-node with the given id.
    pub fn nth_lsx_child_node_mut(&mut self, id: &str, n: usize) -> Option<&mut Element> {
        self.lsx_children_mut().filter(|c| c.is_lsx_node(id)).nth(n)
    }

    /// Find or create a typed attribute child.
    ///
    /// A missing attribute is created as `<attribute id type/>` and prepended to the
    /// children. An existing one is returned untouched, wherever it sits.
    pub fn ensure_lsx_attribute(&mut self, id: &str, default_type: &str) -> &mut Element {
        let position = self
            .children()
            .iter()
            .position(|c| c.tag == ATTRIBUTE_TAG && c.attr("id") == Some(id));
        let index = if let Some(index) = position {
            index
        } else {
            let attribute = Element::new(ATTRIBUTE_TAG)
                .with_attr("id", id)
                .with_attr("type", default_type);
            self.insert_child(0, attribute);
            0
        };
        &mut self.children.get_or_insert_with(Vec::new)[index]
    }

    /// Overwrite-or-create the plain `value` of a typed attribute child.
    pub fn upsert_lsx_attribute(&mut self, id: &str, default_type: &str, value: &str) -> &mut Element {
        let attribute = self.ensure_lsx_attribute(id, default_type);
        attribute.set_attr("value", value);
        attribute
    }

    /// Negate a boolean attribute child (missing reads as `false`). Returns the new value.
    pub fn toggle_lsx_bool(&mut self, id: &str) -> bool {
        let next = !self.lsx_bool(id).unwrap_or(false);
        self.upsert_lsx_attribute(id, "bool", format_lsx_bool(next));
        next
    }

    /// Find or create `<node id>` inside this node's `<children>` wrapper.
    pub fn ensure_lsx_child_node(&mut self, id: &str) -> &mut Element {
        let wrapper_index = match self.children().iter().position(|c| c.tag == CHILDREN_TAG) {
            Some(index) => index,
            None => {
                self.push_child(Element::new(CHILDREN_TAG));
                self.children().len() - 1
            }
        };
        let wrapper = &mut self.children.get_or_insert_with(Vec::new)[wrapper_index];
        let node_index = match wrapper.children().iter().position(|c| c.is_lsx_node(id)) {
            Some(index) => index,
            None => {
                wrapper.push_child(Element::lsx_node(id));
                wrapper.children().len() - 1
            }
        };
        &mut wrapper.children.get_or_insert_with(Vec::new)[node_index]
    }

    /// Replace the contents of this node's `<children>` wrapper.
    ///
    /// An empty list removes the wrapper entirely.
    pub fn set_lsx_children(&mut self, nodes: Vec<Element>) {
        if nodes.is_empty() {
            self.retain_children(|c| c.tag != CHILDREN_TAG);
            return;
        }
        if let Some(wrapper) = self.children_mut().iter_mut().find(|c| c.tag == CHILDREN_TAG) {
            wrapper.set_children(nodes);
        } else {
            self.push_child(Element::new(CHILDREN_TAG));
            if let Some(wrapper) = self.children_mut().last_mut() {
                wrapper.set_children(nodes);
            }
        }
    }
}
