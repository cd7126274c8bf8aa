/// An index into a red-black tree's arena. Only the low 31 bits are usable.
pub(crate) type NodeIndex = u32;

/// The index of the black sentinel that stands in for every missing node.
pub(crate) const SENTINEL: NodeIndex = 0;

/// The structure of one node: its children and its parent, with the node's color in the top bit
/// of the parent index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) left: NodeIndex,
    pub(crate) right: NodeIndex,
    pub(crate) parent_color: u32,
}

impl Links {
    pub(crate) const RED_BIT: u32 = 1 << 31;

    /// Black, with every link pointing at the sentinel.
    pub(crate) const SENTINEL: Links = Links {
        left: SENTINEL,
        right: SENTINEL,
        parent_color: SENTINEL,
    };

    pub(crate) const fn parent(self) -> NodeIndex {
        self.parent_color & !Self::RED_BIT
    }

    pub(crate) const fn is_red(self) -> bool {
        self.parent_color & Self::RED_BIT != 0
    }

    pub(crate) const fn set_parent(&mut self, parent: NodeIndex) {
        self.parent_color = (self.parent_color & Self::RED_BIT) | parent;
    }

    pub(crate) const fn set_red(&mut self, red: bool) {
        if red {
            self.parent_color |= Self::RED_BIT;
        } else {
            self.parent_color &= !Self::RED_BIT;
        }
    }
}
