// -- caller.rs --

use std::{cell::RefCell, marker::PhantomData, panic::Location};

// --

/// Source location reported in a record header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Caller {
    pub file: &'static str,
    pub line: u32,
}

impl Caller {
    pub const fn new(file: &'static str, line: u32) -> Self {
        Self { file, line }
    }

    /// The call site of the nearest function not marked `#[track_caller]`.
    #[track_caller]
    pub fn here() -> Self {
        Self::from(Location::caller())
    }

    pub const fn unknown() -> Self {
        Self::new("???", 1)
    }

    /// File name with any directory prefix stripped.
    pub fn basename(&self) -> &'static str {
        let file = self.file;
        match file.rfind(|c: char| c == '/' || c == '\\') {
            Some(i) => &file[i + 1..],
            None => file,
        }
    }
}

impl From<&'static Location<'static>> for Caller {
    fn from(loc: &'static Location<'static>) -> Self {
        Self::new(loc.file(), loc.line())
    }
}

// --

thread_local! {
    static FRAMES: RefCell<Vec<Caller>> = RefCell::new(Vec::new());
}

/// Keeps a call site on this thread's frame stack until dropped.
#[must_use = "the frame is popped as soon as the guard is dropped"]
pub struct FrameGuard {
    // frames are thread-local, the guard must stay on its thread
    _not_send: PhantomData<*const ()>,
}

impl Drop for FrameGuard {
    fn drop(&mut self) {
        FRAMES.with(|f| {
            f.borrow_mut().pop();
        });
    }
}

/// Records the caller of a wrapper so that `*_depth` calls made further
/// down can report it.
///
/// Call this at the top of a `#[track_caller]` wrapper: the recorded frame
/// is the wrapper's own call site. A depth of `n` then resolves to the
/// `n`-th most recently pushed frame of the current thread.
#[track_caller]
pub fn push_frame() -> FrameGuard {
    let caller = Caller::here();
    FRAMES.with(|f| f.borrow_mut().push(caller));
    FrameGuard {
        _not_send: PhantomData,
    }
}

/// Depth 0 is `direct`; anything beyond the frame stack is `???:1`.
pub(crate) fn resolve(direct: Caller, depth: usize) -> Caller {
    if depth == 0 {
        return direct;
    }
    FRAMES.with(|f| {
        let frames = f.borrow();
        frames
            .len()
            .checked_sub(depth)
            .map(|i| frames[i])
            .unwrap_or_else(Caller::unknown)
    })
}

// --
