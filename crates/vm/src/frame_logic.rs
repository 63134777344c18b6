//! Frame management: the global frame, the pending temporary frame and the
//! frame stack whose top is the current local frame.

use ippcode_common::FrameRole;

use crate::frame::Frame;
use crate::stack::FrameStack;

/// A frame role that does not currently resolve to a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingFrame(pub FrameRole);

/// Owner of every frame in a run.
///
/// Invariants: the global frame always exists; the local frame is the top
/// of the frame stack and exists iff the stack is non-empty; the temporary
/// frame exists from CREATEFRAME (or POPFRAME) until PUSHFRAME consumes it.
#[derive(Debug, Default)]
pub struct FrameLogic {
    global: Frame,
    temporary: Option<Frame>,
    stack: FrameStack,
}

impl FrameLogic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending temporary frame with a new empty one.
    pub fn create_frame(&mut self) {
        self.temporary = Some(Frame::new());
    }

    /// Move the temporary frame onto the frame stack.
    pub fn push_temp_frame(&mut self) -> Result<(), MissingFrame> {
        let frame = self
            .temporary
            .take()
            .ok_or(MissingFrame(FrameRole::Temporary))?;
        self.stack.push(frame);
        Ok(())
    }

    /// Move the top of the frame stack into the temporary slot.
    pub fn pop_frame(&mut self) -> Result<(), MissingFrame> {
        let frame = self.stack.pop().ok_or(MissingFrame(FrameRole::Local))?;
        self.temporary = Some(frame);
        Ok(())
    }

    pub fn frame(&self, role: FrameRole) -> Result<&Frame, MissingFrame> {
        match role {
            FrameRole::Global => Ok(&self.global),
            FrameRole::Local => self.stack.top().ok_or(MissingFrame(role)),
            FrameRole::Temporary => self.temporary.as_ref().ok_or(MissingFrame(role)),
        }
    }

    pub fn frame_mut(&mut self, role: FrameRole) -> Result<&mut Frame, MissingFrame> {
        match role {
            FrameRole::Global => Ok(&mut self.global),
            FrameRole::Local => self.stack.top_mut().ok_or(MissingFrame(role)),
            FrameRole::Temporary => self.temporary.as_mut().ok_or(MissingFrame(role)),
        }
    }

    /// Number of frames on the frame stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn has_temporary(&self) -> bool {
        self.temporary.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_always_exists() {
        let frames = FrameLogic::new();
        assert!(frames.frame(FrameRole::Global).is_ok());
        assert_eq!(
            frames.frame(FrameRole::Local),
            Err(MissingFrame(FrameRole::Local))
        );
        assert_eq!(
            frames.frame(FrameRole::Temporary),
            Err(MissingFrame(FrameRole::Temporary))
        );
    }

    #[test]
    fn push_without_create_fails() {
        let mut frames = FrameLogic::new();
        assert_eq!(
            frames.push_temp_frame(),
            Err(MissingFrame(FrameRole::Temporary))
        );
    }

    #[test]
    fn pop_empty_fails() {
        let mut frames = FrameLogic::new();
        assert_eq!(frames.pop_frame(), Err(MissingFrame(FrameRole::Local)));
    }

    #[test]
    fn create_replaces_pending_frame() {
        let mut frames = FrameLogic::new();
        frames.create_frame();
        frames
            .frame_mut(FrameRole::Temporary)
            .unwrap()
            .declare("x");
        frames.create_frame();
        assert!(frames.frame(FrameRole::Temporary).unwrap().is_empty());
    }

    #[test]
    fn push_moves_temporary_to_local() {
        let mut frames = FrameLogic::new();
        frames.create_frame();
        frames
            .frame_mut(FrameRole::Temporary)
            .unwrap()
            .declare("x");
        frames.push_temp_frame().unwrap();

        assert!(!frames.has_temporary());
        assert_eq!(frames.depth(), 1);
        assert!(frames.frame(FrameRole::Local).unwrap().contains("x"));
    }

    #[test]
    fn pop_moves_local_back_to_temporary() {
        let mut frames = FrameLogic::new();
        frames.create_frame();
        frames.push_temp_frame().unwrap();
        frames.frame_mut(FrameRole::Local).unwrap().declare("v");
        frames.pop_frame().unwrap();

        assert_eq!(frames.depth(), 0);
        assert!(frames.frame(FrameRole::Local).is_err());
        assert!(frames.frame(FrameRole::Temporary).unwrap().contains("v"));
    }

    #[test]
    fn nested_frames_expose_top_as_local() {
        let mut frames = FrameLogic::new();
        frames.create_frame();
        frames.frame_mut(FrameRole::Temporary).unwrap().declare("outer");
        frames.push_temp_frame().unwrap();
        frames.create_frame();
        frames.frame_mut(FrameRole::Temporary).unwrap().declare("inner");
        frames.push_temp_frame().unwrap();

        assert!(frames.frame(FrameRole::Local).unwrap().contains("inner"));
        frames.pop_frame().unwrap();
        assert!(frames.frame(FrameRole::Local).unwrap().contains("outer"));
    }
}
