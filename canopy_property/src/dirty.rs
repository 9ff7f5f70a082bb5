// Copyright 2026 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty signals raised by style writes.

bitflags::bitflags! {
    /// What a node must redo after one of its style properties changed.
    ///
    /// Every accepted assignment raises [`RECALCULATE`](Self::RECALCULATE) and
    /// [`RENDER`](Self::RENDER); a property may add more through
    /// [`PropertyDefinitionBuilder::affects`](crate::PropertyDefinitionBuilder::affects).
    /// Forwarding the signal to the render loop is the host's job.
    ///
    /// ```rust
    /// use canopy_property::DirtyFlags;
    ///
    /// let flags = DirtyFlags::STYLE_CHANGED | DirtyFlags::BOUNDS;
    /// assert!(flags.contains(DirtyFlags::RENDER));
    /// assert!(flags.contains(DirtyFlags::BOUNDS));
    /// ```
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct DirtyFlags: u8 {
        /// Used values must be recalculated.
        const RECALCULATE = 1 << 0;
        /// The node must be painted again.
        const RENDER = 1 << 1;
        /// The node's geometry, and so its bounds, changed.
        const BOUNDS = 1 << 2;

        /// The flags raised by every accepted style write.
        const STYLE_CHANGED = Self::RECALCULATE.bits() | Self::RENDER.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_changed_is_recalculate_and_render() {
        assert_eq!(
            DirtyFlags::STYLE_CHANGED,
            DirtyFlags::RECALCULATE | DirtyFlags::RENDER
        );
        assert!(!DirtyFlags::STYLE_CHANGED.contains(DirtyFlags::BOUNDS));
    }

    #[test]
    fn flags_accumulate() {
        let mut flags = DirtyFlags::empty();
        flags |= DirtyFlags::BOUNDS;
        flags |= DirtyFlags::STYLE_CHANGED;
        assert!(flags.is_all());
    }
}
