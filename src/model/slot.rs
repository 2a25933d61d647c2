//! Rectangular device regions and the hierarchy of bipartitions over them.

use super::resource::AreaVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCoord {
    pub x: u32,
    pub y: u32,
}

/// Axis a bipartition cuts along. The SLR grid is addressed `(x, y)`; which
/// physical axis "horizontal" corresponds to is a device-description detail
/// outside this crate's concern, so both directions just pick a grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitDir {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);

/// An axis-aligned rectangle of the device, `[down_left, up_right)` in grid
/// cells. Equality is identity (by [`SlotId`]), per spec: two slots with the
/// same bounds minted from different calls are not the same slot.
#[derive(Debug, Clone)]
pub struct Slot {
    id: SlotId,
    down_left: GridCoord,
    up_right: GridCoord,
}

impl Slot {
    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn down_left(&self) -> GridCoord {
        self.down_left
    }

    pub fn up_right(&self) -> GridCoord {
        self.up_right
    }

    /// True iff `other`'s rectangle lies fully inside `self`'s, inclusive of
    /// `self` itself (an ancestor-or-equal containment check).
    pub fn contains_child_slot(&self, other: &Slot) -> bool {
        other.down_left.x >= self.down_left.x
            && other.up_right.x <= self.up_right.x
            && other.down_left.y >= self.down_left.y
            && other.up_right.y <= self.up_right.y
    }
}

#[cfg(test)]
impl Slot {
    /// A slot detached from any `SlotManager`, for tests that need a
    /// pre-assignment target guaranteed not to lie inside any real leaf.
    pub(crate) fn test_detached(dl_x: u32, dl_y: u32, ur_x: u32, ur_y: u32) -> Self {
        Slot {
            id: SlotId(usize::MAX),
            down_left: GridCoord { x: dl_x, y: dl_y },
            up_right: GridCoord { x: ur_x, y: ur_y },
        }
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
impl Eq for Slot {}

/// The device modeled as a uniform grid of SLR-sized cells, each with its own
/// per-resource capacity. A slot's capacity is the sum of the capacities of
/// the cells its rectangle covers, so subdividing a slot conserves capacity
/// exactly.
#[derive(Debug, Clone)]
pub struct DeviceGrid {
    cols: u32,
    rows: u32,
    cell_capacity: Vec<AreaVector>,
}

impl DeviceGrid {
    pub fn new(cols: u32, rows: u32, cell_capacity: Vec<AreaVector>) -> Self {
        assert_eq!(
            cell_capacity.len(),
            (cols * rows) as usize,
            "cell_capacity must have exactly cols*rows entries"
        );
        Self { cols, rows, cell_capacity }
    }

    /// A grid where every cell carries the same capacity.
    pub fn uniform(cols: u32, rows: u32, per_cell: AreaVector) -> Self {
        Self::new(cols, rows, vec![per_cell; (cols * rows) as usize])
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    fn cell(&self, x: u32, y: u32) -> AreaVector {
        self.cell_capacity[(y * self.cols + x) as usize]
    }

    pub fn capacity_of(&self, down_left: GridCoord, up_right: GridCoord) -> AreaVector {
        let mut total = AreaVector::zero();
        for y in down_left.y..up_right.y {
            for x in down_left.x..up_right.x {
                total += self.cell(x, y);
            }
        }
        total
    }
}

/// Owns the device grid and the root slot, and materializes leaf slots for a
/// requested bipartition depth on demand.
#[derive(Debug, Clone)]
pub struct SlotManager {
    device: DeviceGrid,
    root: Slot,
}

impl SlotManager {
    pub fn new(device: DeviceGrid) -> Self {
        let root = Slot {
            id: SlotId(0),
            down_left: GridCoord { x: 0, y: 0 },
            up_right: GridCoord { x: device.cols(), y: device.rows() },
        };
        Self { device, root }
    }

    pub fn root(&self) -> &Slot {
        &self.root
    }

    pub fn capacity(&self, slot: &Slot) -> AreaVector {
        self.device.capacity_of(slot.down_left(), slot.up_right())
    }

    /// Split `order.len()` times, bit-major by split index: the first split
    /// in `order` produces the most-significant coordinate bit. Returns
    /// leaves in binary-counting order over `(y1, y2, ...)`.
    pub fn get_leaf_slots_after_partition(&self, order: &[SplitDir]) -> Vec<Slot> {
        let mut regions = vec![self.root.clone()];
        let mut next_id = 1usize;
        for dir in order {
            let mut next_regions = Vec::with_capacity(regions.len() * 2);
            for region in regions {
                let (lo, hi) = split_region(&region, *dir, &mut next_id);
                next_regions.push(lo);
                next_regions.push(hi);
            }
            regions = next_regions;
        }
        regions
    }
}

fn split_region(region: &Slot, dir: SplitDir, next_id: &mut usize) -> (Slot, Slot) {
    let (dl, ur) = (region.down_left, region.up_right);
    let (lo, hi) = match dir {
        SplitDir::Horizontal => {
            let mid_x = dl.x + (ur.x - dl.x) / 2;
            assert!(mid_x > dl.x && mid_x < ur.x, "slot too narrow to split further");
            (
                Slot { id: SlotId(0), down_left: dl, up_right: GridCoord { x: mid_x, y: ur.y } },
                Slot { id: SlotId(0), down_left: GridCoord { x: mid_x, y: dl.y }, up_right: ur },
            )
        }
        SplitDir::Vertical => {
            let mid_y = dl.y + (ur.y - dl.y) / 2;
            assert!(mid_y > dl.y && mid_y < ur.y, "slot too short to split further");
            (
                Slot { id: SlotId(0), down_left: dl, up_right: GridCoord { x: ur.x, y: mid_y } },
                Slot { id: SlotId(0), down_left: GridCoord { x: dl.x, y: mid_y }, up_right: ur },
            )
        }
    };
    let lo = Slot { id: SlotId(*next_id), ..lo };
    *next_id += 1;
    let hi = Slot { id: SlotId(*next_id), ..hi };
    *next_id += 1;
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::resource::Resource;

    fn grid() -> DeviceGrid {
        DeviceGrid::uniform(8, 1, AreaVector::from_pairs([(Resource::Lut, 1000.0)]))
    }

    #[test]
    fn two_horizontal_splits_yield_canonical_four_leaves() {
        let mgr = SlotManager::new(grid());
        let leaves = mgr.get_leaf_slots_after_partition(&[SplitDir::Horizontal, SplitDir::Horizontal]);
        assert_eq!(leaves.len(), 4);
        // Canonical order is [00, 01, 10, 11]: x grows monotonically across it.
        let xs: Vec<u32> = leaves.iter().map(|s| s.down_left().x).collect();
        assert_eq!(xs, vec![0, 2, 4, 6]);
    }

    #[test]
    fn three_horizontal_splits_yield_eight_leaves_covering_the_device() {
        let mgr = SlotManager::new(grid());
        let leaves = mgr.get_leaf_slots_after_partition(&[
            SplitDir::Horizontal,
            SplitDir::Horizontal,
            SplitDir::Horizontal,
        ]);
        assert_eq!(leaves.len(), 8);
        let total_width: u32 = leaves.iter().map(|s| s.up_right().x - s.down_left().x).sum();
        assert_eq!(total_width, 8);
    }

    #[test]
    fn leaf_capacities_conserve_parent_capacity() {
        let mgr = SlotManager::new(grid());
        let root_capacity = mgr.capacity(mgr.root());
        let leaves = mgr.get_leaf_slots_after_partition(&[SplitDir::Horizontal, SplitDir::Horizontal]);
        let summed: f64 = leaves.iter().map(|l| mgr.capacity(l).get(Resource::Lut)).sum();
        assert_eq!(summed, root_capacity.get(Resource::Lut));
    }

    #[test]
    fn contains_child_slot_is_reflexive_and_respects_bounds() {
        let mgr = SlotManager::new(grid());
        let leaves = mgr.get_leaf_slots_after_partition(&[SplitDir::Horizontal, SplitDir::Horizontal]);
        assert!(mgr.root().contains_child_slot(&leaves[0]));
        assert!(leaves[0].contains_child_slot(&leaves[0]));
        assert!(!leaves[0].contains_child_slot(&leaves[1]));
    }
}
