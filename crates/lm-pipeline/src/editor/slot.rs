//! Guarded slot holding the single live editor of a mount.

use super::{EditorError, EditorSurface};

/// Holds at most one live editor surface.
///
/// Creation is idempotent: while a surface is live, further create requests
/// are no-ops and the creation closure is not run. Disposal empties the slot
/// and disposes the surface exactly once.
#[derive(Default)]
pub struct EditorSlot {
    surface: Option<Box<dyn EditorSurface>>,
}

impl EditorSlot {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the surface unless one is already live.
    ///
    /// Returns `Ok(true)` if `create` ran, `Ok(false)` if a surface was
    /// already live.
    pub fn create_with<F>(&mut self, create: F) -> Result<bool, EditorError>
    where
        F: FnOnce() -> Result<Box<dyn EditorSurface>, EditorError>,
    {
        if self.surface.is_some() {
            return Ok(false);
        }
        self.surface = Some(create()?);
        Ok(true)
    }

    /// Whether a surface is live.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.surface.is_some()
    }

    /// The live surface.
    #[must_use]
    pub fn get(&self) -> Option<&(dyn EditorSurface + 'static)> {
        self.surface.as_deref()
    }

    /// The live surface, mutably.
    pub fn get_mut(&mut self) -> Option<&mut (dyn EditorSurface + 'static)> {
        self.surface.as_deref_mut()
    }

    /// Dispose and drop the live surface.
    ///
    /// Returns `true` if a surface was disposed.
    pub fn dispose(&mut self) -> bool {
        match self.surface.take() {
            Some(mut surface) => {
                surface.dispose();
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for EditorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSlot")
            .field("live", &self.is_live())
            .finish()
    }
}
