//! Typed event dispatch over a [`Document`].

use async_trait::async_trait;

use crate::counters::CounterAnimation;
use crate::dom::{Document, ElementId};
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Document is ready, fired once per page.
    Ready,

    Scroll { y: f64 },
    Click { target: ElementId },
    Submit { target: ElementId },
}

/// Side effect the hosting environment is asked to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScrollIntoView { target: ElementId, smooth: bool },
    Click { target: ElementId },
    Reload { delay: StdDuration },
    AnimateCounter { target: ElementId, animation: CounterAnimation },
}

/// Collects what the handlers decided while processing a single event.
#[derive(Debug, Default, PartialEq)]
pub struct Dispatch {
    pub default_prevented: bool,
    pub effects: Vec<Effect>,
}

impl Dispatch {
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, event: Event, document: &mut Document, dispatch: &mut Dispatch) -> Result;
}

/// Document with its registered handlers.
pub struct Page {
    document: Document,
    handlers: Vec<Box<dyn Handler>>,
    is_ready: bool,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            handlers: Vec::new(),
            is_ready: false,
        }
    }

    #[must_use]
    pub fn with(mut self, handler: impl Handler + 'static) -> Self {
        self.register(handler);
        self
    }

    pub fn register(&mut self, handler: impl Handler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    pub const fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    /// Fires [`Event::Ready`], subsequent calls are no-ops.
    pub async fn ready(&mut self) -> Result<Dispatch> {
        if self.is_ready {
            return Ok(Dispatch::default());
        }
        self.is_ready = true;
        self.dispatch(Event::Ready).await
    }

    /// Runs the handlers in registration order.
    pub async fn dispatch(&mut self, event: Event) -> Result<Dispatch> {
        if let Event::Scroll { y } = event {
            self.document.scroll_y = y;
        }
        let mut dispatch = Dispatch::default();
        for handler in &self.handlers {
            handler.handle(event, &mut self.document, &mut dispatch).await?;
        }
        debug!(?event, default_prevented = dispatch.default_prevented, n_effects = dispatch.effects.len());
        Ok(dispatch)
    }
}
