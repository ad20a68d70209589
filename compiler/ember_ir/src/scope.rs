//! Scope-frame tree shape.
//!
//! A [`Frame`] is a reference-counted handle to a stack of *binding layers*
//! (identifier → slab index). Frames form a tree, never a graph: each frame
//! records the single lexical parent it was created under, and nothing ever
//! points back down, so there is no cycle for closures to leak through.

use super::Name;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// A binding layer: one `let`/parameter-binding scope within a frame.
pub type Layer = FxHashMap<Name, usize>;

struct FrameData {
    layers: Vec<Layer>,
    parent: Option<Frame>,
}

/// A scope frame: a call activation's stack of binding layers, plus a link
/// to the frame it was lexically created under.
///
/// Cheap to clone (an `Rc` clone); this is how closures retain a snapshot
/// path into the frame they were defined in without borrowing it.
#[derive(Clone)]
pub struct Frame(Rc<RefCell<FrameData>>);

impl Frame {
    /// A fresh root frame with one empty layer and no parent.
    pub fn root() -> Self {
        Frame(Rc::new(RefCell::new(FrameData {
            layers: vec![Layer::default()],
            parent: None,
        })))
    }

    /// A fresh frame with one empty layer, lexically parented under `parent`.
    pub fn child_of(parent: &Frame) -> Self {
        Frame(Rc::new(RefCell::new(FrameData {
            layers: vec![Layer::default()],
            parent: Some(parent.clone()),
        })))
    }

    /// Reference identity: used by [`crate::FunctionObject`] equality checks
    /// via its captured frame, and by scope-balance assertions in tests.
    pub fn ptr_eq(a: &Frame, b: &Frame) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub fn push_layer(&self) {
        self.0.borrow_mut().layers.push(Layer::default());
    }

    pub fn pop_layer(&self) {
        if self.0.borrow_mut().layers.pop().is_none() {
            unreachable!("pop_layer called on a frame with no open layer");
        }
    }

    pub fn depth(&self) -> usize {
        self.0.borrow().layers.len()
    }

    /// Record `name → index` in the innermost (topmost) layer of this frame.
    pub fn bind_in_top_layer(&self, name: Name, index: usize) {
        let mut data = self.0.borrow_mut();
        let Some(top) = data.layers.last_mut() else {
            unreachable!("frame has no open layer to bind into");
        };
        top.insert(name, index);
    }

    /// Search this frame's layers innermost-first, then walk the parent chain.
    pub fn lookup(&self, name: Name) -> Option<usize> {
        let data = self.0.borrow();
        for layer in data.layers.iter().rev() {
            if let Some(&index) = layer.get(&name) {
                return Some(index);
            }
        }
        match &data.parent {
            Some(parent) => parent.lookup(name),
            None => None,
        }
    }
}
