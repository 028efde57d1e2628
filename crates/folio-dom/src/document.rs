#![forbid(unsafe_code)]

//! Element tree storage and structural operations.
//!
//! Nodes live in a slot arena. Freed slots are reused with a bumped
//! generation, so a [`NodeId`] kept past its node's removal can never alias
//! a newer node.
//!
//! # Failure Modes
//!
//! - Structural mutations through a stale id return [`DomError::UnknownNode`].
//! - Queries through a stale id return `None` / `false` / empty.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::element::{Element, Tag};
use crate::error::{DomError, Result};
use crate::events::{ElementHandlers, ListenerTable};
use crate::style::Overflow;
use crate::timers::TimerQueue;

/// Generational handle to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

impl NodeId {
    /// Arena slot index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Slot generation at allocation time.
    #[inline]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

pub(crate) struct NodeData {
    pub(crate) element: Element,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) handlers: ElementHandlers,
}

struct Slot {
    generation: u32,
    data: Option<NodeData>,
}

pub(crate) struct Tree {
    slots: Vec<Slot>,
    free: Vec<u32>,
    body: NodeId,
    live: usize,
    next_uid: u64,
    pub(crate) active: Option<NodeId>,
    pub(crate) overflow: Overflow,
    pub(crate) listeners: ListenerTable,
    pub(crate) timers: TimerQueue,
}

impl Tree {
    fn new() -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            free: Vec::new(),
            body: NodeId {
                index: 0,
                generation: 0,
            },
            live: 0,
            next_uid: 1,
            active: None,
            overflow: Overflow::default(),
            listeners: ListenerTable::default(),
            timers: TimerQueue::default(),
        };
        tree.body = tree.alloc(Element::new(Tag::Body));
        tree
    }

    pub(crate) fn body(&self) -> NodeId {
        self.body
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&NodeData> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_mut()
    }

    fn alloc(&mut self, element: Element) -> NodeId {
        let data = NodeData {
            element,
            parent: None,
            children: Vec::new(),
            handlers: ElementHandlers::default(),
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.data = Some(data);
            return NodeId {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            data: Some(data),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.index as usize)
            && slot.generation == id.generation
            && slot.data.take().is_some()
        {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(id.index);
            self.live -= 1;
        }
    }

    /// Whether `ancestor` is `node` or one of its ancestors.
    pub(crate) fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return self.get(id).is_some();
            }
            cursor = self.get(id).and_then(|n| n.parent);
        }
        false
    }

    pub(crate) fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.body, node)
    }

    /// Pre-order descendants of `root`, excluding `root` itself.
    pub(crate) fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.get(root) else {
            return out;
        };
        let mut stack: Vec<NodeId> = node.children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if let Some(node) = self.get(id) {
                out.push(id);
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    fn detach(&mut self, child: NodeId) {
        let parent = self.get_mut(child).and_then(|n| n.parent.take());
        if let Some(parent) = parent
            && let Some(p) = self.get_mut(parent)
        {
            p.children.retain(|&c| c != child);
        }
    }
}

/// Shared handle to a document.
///
/// Cloning is cheap and yields a handle to the same document.
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.read(|tree| {
            f.debug_struct("Document")
                .field("nodes", &tree.live)
                .field("active", &tree.active)
                .field("overflow", &tree.overflow)
                .field("key_listeners", &tree.listeners.len())
                .field("pending_tasks", &tree.timers.len())
                .finish()
        })
    }
}

/// Non-owning document handle.
///
/// Held by state that may itself be reachable from the document (through a
/// handler closure), so that such state never keeps the document alive.
#[derive(Clone, Default)]
pub struct WeakDocument {
    inner: Weak<RefCell<Tree>>,
}

impl WeakDocument {
    pub fn upgrade(&self) -> Option<Document> {
        Document::upgrade(&self.inner)
    }

    /// Whether this handle points at `doc`.
    pub fn is(&self, doc: &Document) -> bool {
        std::ptr::eq(self.inner.as_ptr(), Rc::as_ptr(&doc.inner))
    }
}

impl fmt::Debug for WeakDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakDocument")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl Document {
    /// Create an empty document containing only the body.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Tree::new())),
        }
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Tree) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Tree) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }

    pub(crate) fn downgrade(&self) -> Weak<RefCell<Tree>> {
        Rc::downgrade(&self.inner)
    }

    pub(crate) fn upgrade(weak: &Weak<RefCell<Tree>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    /// Non-owning handle; see [`WeakDocument`].
    pub fn weak(&self) -> WeakDocument {
        WeakDocument {
            inner: self.downgrade(),
        }
    }

    /// Whether two handles refer to the same document.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// The root body node.
    pub fn body(&self) -> NodeId {
        self.read(Tree::body)
    }

    /// Number of live nodes, body included.
    pub fn node_count(&self) -> usize {
        self.read(|tree| tree.live)
    }

    /// Allocate a detached element.
    pub fn create_element(&self, element: Element) -> NodeId {
        self.write(|tree| tree.alloc(element))
    }

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for a stale handle, [`DomError::WouldCycle`]
    /// when `child` is `parent` or one of its ancestors.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.write(|tree| {
            if tree.get(parent).is_none() {
                return Err(DomError::UnknownNode(parent));
            }
            if tree.get(child).is_none() {
                return Err(DomError::UnknownNode(child));
            }
            if tree.contains(child, parent) {
                return Err(DomError::WouldCycle { parent, child });
            }
            tree.detach(child);
            if let Some(node) = tree.get_mut(child) {
                node.parent = Some(parent);
            }
            if let Some(node) = tree.get_mut(parent) {
                node.children.push(child);
            }
            Ok(())
        })
    }

    /// Create `element` and append it under `parent`.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] if `parent` is stale; nothing is allocated.
    pub fn append(&self, parent: NodeId, element: Element) -> Result<NodeId> {
        if !self.exists(parent) {
            return Err(DomError::UnknownNode(parent));
        }
        let child = self.create_element(element);
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Detach `node` and free it together with its subtree.
    ///
    /// Handlers attached to removed nodes are dropped. If the active element
    /// was inside the subtree, focus returns to the body.
    ///
    /// # Errors
    ///
    /// [`DomError::RootRemoval`] for the body, [`DomError::UnknownNode`] for a
    /// stale handle.
    pub fn remove(&self, node: NodeId) -> Result<()> {
        let removed = self.write(|tree| {
            if node == tree.body {
                return Err(DomError::RootRemoval);
            }
            if tree.get(node).is_none() {
                return Err(DomError::UnknownNode(node));
            }
            let focus_inside = tree.active.is_some_and(|active| tree.contains(node, active));
            if focus_inside {
                tree.active = None;
            }
            tree.detach(node);
            let mut doomed = tree.descendants(node);
            doomed.push(node);
            let count = doomed.len();
            for id in doomed {
                tree.release(id);
            }
            Ok(count)
        })?;
        tracing::trace!(%node, removed, "removed subtree");
        Ok(())
    }

    /// Whether `node` refers to a live node (attached or not).
    pub fn exists(&self, node: NodeId) -> bool {
        self.read(|tree| tree.get(node).is_some())
    }

    /// Whether `node` is live and attached under the body.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.read(|tree| tree.is_connected(node))
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.read(|tree| tree.get(node).and_then(|n| n.parent))
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.read(|tree| tree.get(node).map(|n| n.children.clone()).unwrap_or_default())
    }

    /// Pre-order descendants of `node`, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        self.read(|tree| tree.descendants(node))
    }

    /// Inclusive containment: `node` is `ancestor` or lies beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.read(|tree| tree.contains(ancestor, node))
    }

    /// Clone of the element's attributes.
    pub fn element(&self, node: NodeId) -> Option<Element> {
        self.with_element(node, Element::clone)
    }

    pub fn with_element<R>(&self, node: NodeId, f: impl FnOnce(&Element) -> R) -> Option<R> {
        self.read(|tree| tree.get(node).map(|n| f(&n.element)))
    }

    /// Mutate an element's attributes in place.
    ///
    /// If the change makes the active element unfocusable (disabled, tab
    /// index removed), focus returns to the body.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for a stale handle.
    pub fn update_element(&self, node: NodeId, f: impl FnOnce(&mut Element)) -> Result<()> {
        self.write(|tree| {
            let data = tree.get_mut(node).ok_or(DomError::UnknownNode(node))?;
            f(&mut data.element);
            Ok(())
        })?;
        if self.active_element() == Some(node) && !self.is_focusable(node) {
            self.blur();
        }
        Ok(())
    }

    /// Replace an element's text.
    ///
    /// # Errors
    ///
    /// [`DomError::UnknownNode`] for a stale handle.
    pub fn set_text(&self, node: NodeId, text: impl Into<String>) -> Result<()> {
        let text = text.into();
        self.update_element(node, |el| el.text = Some(text))
    }

    /// First connected element, in document order, whose id is `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.read(|tree| {
            tree.descendants(tree.body).into_iter().find(|&node| {
                tree.get(node)
                    .is_some_and(|n| n.element.id.as_deref() == Some(id))
            })
        })
    }

    /// Allocate a document-unique id string such as `modal-title-3`.
    pub fn unique_id(&self, prefix: &str) -> String {
        let uid = self.write(|tree| {
            let uid = tree.next_uid;
            tree.next_uid += 1;
            uid
        });
        format!("{prefix}-{uid}")
    }
}
