use std::str::FromStr;

use thiserror::Error;

use crate::node::{Document, NodeId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("selector {0:?} has a dangling combinator")]
    DanglingCombinator(String),
    #[error("empty name after {0:?}")]
    EmptyName(char),
    #[error("unexpected character {0:?} in selector")]
    UnexpectedChar(char),
}

/// One compound step of a selector: optional tag plus id/class requirements,
/// e.g. `a.collapsed` or `#menu_principal_container`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleSelector {
    pub tag: Option<String>,
    pub element_id: Option<String>,
    pub classes: Vec<String>,
}

impl SimpleSelector {
    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            ..Default::default()
        }
    }

    pub fn class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Default::default()
        }
    }

    pub fn element_id(id: impl Into<String>) -> Self {
        Self {
            element_id: Some(id.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        if let Some(tag) = &self.tag {
            if doc.tag(node) != tag {
                return false;
            }
        }
        if let Some(id) = &self.element_id {
            if doc.element_id(node) != Some(id.as_str()) {
                return false;
            }
        }
        self.classes.iter().all(|c| doc.has_class(node, c))
    }

    fn parse(token: &str) -> Result<Self, SelectorError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Part {
            Tag,
            Id,
            Class,
        }

        let mut sel = SimpleSelector::default();
        let mut part = Part::Tag;
        let mut buf = String::new();

        let flush = |sel: &mut SimpleSelector, part: Part, buf: &mut String| {
            match part {
                Part::Tag if !buf.is_empty() => sel.tag = Some(std::mem::take(buf)),
                Part::Id => sel.element_id = Some(std::mem::take(buf)),
                Part::Class => sel.classes.push(std::mem::take(buf)),
                Part::Tag => {}
            }
        };

        for c in token.chars() {
            match c {
                '#' | '.' => {
                    if part != Part::Tag && buf.is_empty() {
                        return Err(SelectorError::EmptyName(c));
                    }
                    flush(&mut sel, part, &mut buf);
                    part = if c == '#' { Part::Id } else { Part::Class };
                }
                c if c.is_alphanumeric() || c == '-' || c == '_' => buf.push(c),
                other => return Err(SelectorError::UnexpectedChar(other)),
            }
        }
        if part != Part::Tag && buf.is_empty() {
            return Err(SelectorError::EmptyName(match part {
                Part::Id => '#',
                _ => '.',
            }));
        }
        flush(&mut sel, part, &mut buf);
        Ok(sel)
    }
}

/// How one compound step relates to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: any ancestor.
    Descendant,
    /// `>`: direct parent.
    Child,
}

/// A parsed selector covering the subset page behaviors use: `#id`,
/// `.class`, `tag`, compounds of those, and descendant/child combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub first: SimpleSelector,
    pub rest: Vec<(Combinator, SimpleSelector)>,
}

impl FromStr for Selector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace('>', " > ");
        let mut first: Option<SimpleSelector> = None;
        let mut rest = Vec::new();
        let mut pending: Option<Combinator> = None;

        for token in normalized.split_whitespace() {
            if token == ">" {
                if first.is_none() || pending.is_some() {
                    return Err(SelectorError::DanglingCombinator(s.to_string()));
                }
                pending = Some(Combinator::Child);
                continue;
            }
            let compound = SimpleSelector::parse(token)?;
            match &first {
                None => first = Some(compound),
                Some(_) => rest.push((pending.take().unwrap_or(Combinator::Descendant), compound)),
            }
        }

        if pending.is_some() {
            return Err(SelectorError::DanglingCombinator(s.to_string()));
        }
        match first {
            Some(first) => Ok(Self { first, rest }),
            None => Err(SelectorError::Empty),
        }
    }
}

impl Selector {
    /// Whether `node` matches the full selector, checking ancestry for each
    /// combinator right-to-left.
    pub fn matches(&self, doc: &Document, node: NodeId) -> bool {
        let Some(last) = self.rest.last().map(|(_, s)| s) else {
            return self.first.matches(doc, node);
        };
        if !last.matches(doc, node) {
            return false;
        }
        self.matches_upward(doc, node, self.rest.len())
    }

    // `upto` is the index of the compound already matched at `node`; the
    // compound at index 0 is `first`.
    fn matches_upward(&self, doc: &Document, node: NodeId, upto: usize) -> bool {
        if upto == 0 {
            return true;
        }
        let combinator = self.rest[upto - 1].0;
        let compound = if upto == 1 {
            &self.first
        } else {
            &self.rest[upto - 2].1
        };
        match combinator {
            Combinator::Child => match doc.parent(node) {
                Some(parent) => {
                    compound.matches(doc, parent) && self.matches_upward(doc, parent, upto - 1)
                }
                None => false,
            },
            Combinator::Descendant => {
                let mut current = doc.parent(node);
                while let Some(ancestor) = current {
                    if compound.matches(doc, ancestor) && self.matches_upward(doc, ancestor, upto - 1)
                    {
                        return true;
                    }
                    current = doc.parent(ancestor);
                }
                false
            }
        }
    }
}

impl Document {
    /// All nodes matching `selector`, in tree order. An empty result is not
    /// an error; callers attaching handlers to it simply attach nothing.
    pub fn query_all(&self, selector: &Selector) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .filter(|&node| selector.matches(self, node))
            .collect()
    }

    /// Parse and run a selector in one step.
    pub fn select(&self, selector: &str) -> Result<Vec<NodeId>, SelectorError> {
        Ok(self.query_all(&selector.parse()?))
    }

    /// Nearest preceding sibling matching `selector` (the accordion's
    /// heading lookup).
    pub fn prev_sibling_matching(&self, id: NodeId, selector: &SimpleSelector) -> Option<NodeId> {
        let mut current = self.prev_sibling(id);
        while let Some(sibling) = current {
            if selector.matches(self, sibling) {
                return Some(sibling);
            }
            current = self.prev_sibling(sibling);
        }
        None
    }

    /// All siblings (excluding `id` itself) matching `selector`.
    pub fn siblings_matching(&self, id: NodeId, selector: &SimpleSelector) -> Vec<NodeId> {
        let Some(parent) = self.parent(id) else {
            return Vec::new();
        };
        self.children(parent)
            .iter()
            .copied()
            .filter(|&s| s != id && selector.matches(self, s))
            .collect()
    }

    /// All descendants of `root` (excluding `root`) matching `selector`, in
    /// tree order.
    pub fn descendants_matching(&self, root: NodeId, selector: &SimpleSelector) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        for &child in self.children(root) {
            self.walk_from(child, &mut nodes);
        }
        nodes
            .into_iter()
            .filter(|&node| selector.matches(self, node))
            .collect()
    }
}
