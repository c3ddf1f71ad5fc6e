//! Rendering surface, pointer input and frame counter.

use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::{Observable, PointerEvent, SceneError};

/// A drawable surface identified by an element id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    /// Element id.
    pub id: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas description.
    pub fn new(id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            id: id.into(),
            width,
            height,
        }
    }
}

/// The host page: the set of canvases the engine may attach to.
#[derive(Debug, Clone, Default)]
pub struct Document {
    canvases: BTreeMap<String, Canvas>,
}

impl Document {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a canvas element.
    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvases.insert(canvas.id.clone(), canvas);
        self
    }

    /// Find a canvas by id.
    pub fn get_element_by_id(&self, id: &str) -> Option<&Canvas> {
        self.canvases.get(id)
    }
}

/// Owns the canvas, the pointer-down signal and the frame counter.
#[derive(Debug)]
pub struct Engine {
    canvas: Canvas,
    antialias: bool,
    frame: u64,
    /// Fired for every pointer press anywhere on the canvas.
    pub on_pointer_down: Observable<PointerEvent>,
}

impl Engine {
    /// Attach to an existing canvas.
    pub fn new(canvas: Canvas, antialias: bool) -> Self {
        info!(canvas = %canvas.id, width = canvas.width, height = canvas.height, "engine created");
        Self {
            canvas,
            antialias,
            frame: 0,
            on_pointer_down: Observable::new(),
        }
    }

    /// Look up `canvas_id` in `document` and attach to it.
    pub fn from_document(
        document: &Document,
        canvas_id: &str,
        antialias: bool,
    ) -> Result<Self, SceneError> {
        let canvas = document
            .get_element_by_id(canvas_id)
            .cloned()
            .ok_or_else(|| SceneError::CanvasNotFound(canvas_id.to_string()))?;
        Ok(Self::new(canvas, antialias))
    }

    /// Current canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Whether multisampling was requested.
    pub fn antialias(&self) -> bool {
        self.antialias
    }

    /// Handle the host window's resize signal.
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) == (self.canvas.width, self.canvas.height) {
            return;
        }
        debug!(width, height, "canvas resized");
        self.canvas.width = width;
        self.canvas.height = height;
    }

    /// Deliver a pointer press to subscribers.
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.on_pointer_down.notify_observers(&PointerEvent { x, y });
    }

    /// Frames started so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance the frame counter; returns the new frame number.
    pub fn begin_frame(&mut self) -> u64 {
        self.frame += 1;
        self.frame
    }
}
