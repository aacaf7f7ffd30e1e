//! Call-origin records and the explicit call stack they are scanned from.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::panic::Location;
use std::rc::Rc;

use crossterm::style::Stylize;

/// `src/trace/origin.rs` → `origin`.
pub fn file_stem(path: &str) -> String {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    name.split('.').next().unwrap_or(name).to_string()
}

/// Where a logged call comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallOrigin {
    pub filename: String,
    pub lineno: u32,
    pub method: String,
    /// Enclosing caller, empty when unknown.
    pub function: String,
}

impl CallOrigin {
    /// Origin without caller information.
    pub fn direct(file: &str, lineno: u32, method: &str) -> Self {
        Self {
            filename: file_stem(file),
            lineno,
            method: method.to_string(),
            function: String::new(),
        }
    }

    /// Origin at the call site of this constructor.
    #[track_caller]
    pub fn here(method: &str) -> Self {
        let location = Location::caller();
        Self::direct(location.file(), location.line(), method)
    }

    /// Colored `<file>(<line>) [<caller>.]<method>`.
    pub fn label(&self) -> String {
        let caller = if self.function.is_empty() {
            String::new()
        } else {
            format!("{}.", self.function.as_str().italic().yellow())
        };
        format!(
            "{}({}) {}{}",
            self.filename.as_str().bold().cyan(),
            self.lineno.to_string().bold().cyan(),
            caller,
            self.method.as_str().italic().yellow()
        )
    }
}

impl fmt::Display for CallOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}) ", self.filename, self.lineno)?;
        if !self.function.is_empty() {
            write!(f, "{}.", self.function)?;
        }
        f.write_str(&self.method)
    }
}

/// One registered frame: the function that is running and the source text of
/// the call it is making.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub filename: String,
    pub lineno: u32,
    pub function: String,
    pub source: String,
}

impl Frame {
    #[track_caller]
    pub fn new(function: &str, source: &str) -> Self {
        let location = Location::caller();
        Self::at(location.file(), location.line(), function, source)
    }

    pub fn at(file: &str, lineno: u32, function: &str, source: &str) -> Self {
        Self {
            filename: file_stem(file),
            lineno,
            function: function.to_string(),
            source: source.to_string(),
        }
    }
}

/// Call stack maintained by the caller, outermost frame first.
///
/// Frames are pushed with [`CallStack::enter`] and removed when the returned
/// guard is dropped. Each guard removes exactly its own frame, so guards may
/// be dropped in any order. Cloning yields another handle to the same stack.
#[derive(Debug, Clone, Default)]
pub struct CallStack {
    inner: Rc<StackInner>,
}

#[derive(Debug, Default)]
struct StackInner {
    frames: RefCell<Vec<(u64, Frame)>>,
    next_id: Cell<u64>,
    /// Frames whose guard was dropped while the stack was borrowed.
    retired: RefCell<Vec<u64>>,
}

impl StackInner {
    fn is_retired(&self, id: u64) -> bool {
        self.retired
            .try_borrow()
            .map(|retired| retired.contains(&id))
            .unwrap_or(false)
    }

    fn live_frames(&self, frames: &[(u64, Frame)]) -> Vec<Frame> {
        frames
            .iter()
            .filter(|(id, _)| !self.is_retired(*id))
            .map(|(_, frame)| frame.clone())
            .collect()
    }
}

impl CallStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a frame at the call site.
    #[track_caller]
    pub fn enter(&self, function: &str, source: &str) -> FrameGuard {
        self.push(Frame::new(function, source))
    }

    pub fn push(&self, frame: Frame) -> FrameGuard {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id.wrapping_add(1));

        let mut frames = self.inner.frames.borrow_mut();
        if let Ok(mut retired) = self.inner.retired.try_borrow_mut() {
            if !retired.is_empty() {
                frames.retain(|(id, _)| !retired.contains(id));
                retired.clear();
            }
        }
        frames.push((id, frame));

        FrameGuard {
            inner: Rc::clone(&self.inner),
            id,
        }
    }

    pub fn depth(&self) -> usize {
        let frames = self.inner.frames.borrow();
        frames
            .iter()
            .filter(|(id, _)| !self.inner.is_retired(*id))
            .count()
    }

    /// Walk the frames innermost → outermost and return the origin of the
    /// last frame whose source contains `prefix`, i.e. the outermost match.
    ///
    /// Returns `None` when nothing matches or the stack is being modified.
    pub fn scan(&self, prefix: &str) -> Option<CallOrigin> {
        let frames = self.inner.frames.try_borrow().ok()?;
        scan_frames(&self.inner.live_frames(&frames), prefix)
    }
}

/// Removes its frame on drop.
#[derive(Debug)]
#[must_use = "the frame is removed as soon as the guard is dropped"]
pub struct FrameGuard {
    inner: Rc<StackInner>,
    id: u64,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        match self.inner.frames.try_borrow_mut() {
            Ok(mut frames) => {
                if let Some(pos) = frames.iter().rposition(|(id, _)| *id == self.id) {
                    frames.remove(pos);
                }
            }
            // Purged by the next push.
            Err(_) => {
                if let Ok(mut retired) = self.inner.retired.try_borrow_mut() {
                    retired.push(self.id);
                }
            }
        }
    }
}

/// Scan `frames` (outermost first) for `prefix`; the outermost match wins.
pub fn scan_frames(frames: &[Frame], prefix: &str) -> Option<CallOrigin> {
    let mut found = None;
    for frame in frames.iter().rev() {
        let method = frame.source.trim().replace("self.", "");
        if method.contains(prefix) {
            found = Some(CallOrigin {
                filename: frame.filename.clone(),
                lineno: frame.lineno,
                method,
                function: frame.function.clone(),
            });
        }
    }
    found
}
